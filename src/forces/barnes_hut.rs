//! Barnes-Hut force approximation over a [`QuadTree`].
//!
//! The walk starts at the root. A leaf contributes one interaction per stored
//! pair; an internal node whose size-to-distance ratio `s / d` is below the
//! accuracy threshold θ contributes a single interaction with its whole mass
//! (the element count) placed at its gravity center. Otherwise the walk
//! descends into the node's children.
//!
//! θ = 0 never approximates and visits every leaf; larger values trade accuracy
//! for speed. The pairwise force law itself is supplied by the caller through
//! [`ForceLaw`].
//!
//! # Example
//!
//! ```
//! use rs_quadtree::forces::{BarnesHut, InverseSquareAttraction};
//! use rs_quadtree::index::QuadTree;
//! use rs_quadtree::models::Point;
//!
//! let mut tree = QuadTree::new(2, Point::new(0.0, 0.0), 4.0, 4.0).unwrap();
//! tree.insert(Point::new(1.0, 0.0), 1);
//! tree.insert(Point::new(-1.0, 0.0), 2);
//!
//! let law = InverseSquareAttraction { g: 1.0 };
//! let force = BarnesHut::new(0.5).unwrap()
//!     .approximate_force(&0, Point::new(0.0, 0.0), 1.0, &tree, &law);
//!
//! // The two attractions cancel out.
//! assert!(force.norm() < 1e-12);
//! ```
use log::debug;
use rayon::prelude::*;
use crate::index::QuadTree;
use crate::models::Point;
use crate::utils::{QuadTreeError, DEFAULT_THETA};

/// A pairwise force between a target and a source mass.
///
/// Returns the force exerted on `target` by `source`. Implementations may
/// assume the two positions differ: the evaluator never calls a law with a
/// zero separation.
pub trait ForceLaw {
    fn force(&self, target: Point, target_mass: f64, source: Point, source_mass: f64) -> Point;
}

impl<F> ForceLaw for F
where
    F: Fn(Point, f64, Point, f64) -> Point,
{
    fn force(&self, target: Point, target_mass: f64, source: Point, source_mass: f64) -> Point {
        self(target, target_mass, source, source_mass)
    }
}

/// One query of a batched force evaluation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ForceQuery<T> {
    /// The object the force is computed for; pairs stored with it are skipped.
    pub object: T,
    pub point: Point,
    pub mass: f64,
}

/// A source the walk interacts with: a single stored point (mass 1) or an
/// approximated subtree (mass = its element count).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interaction {
    pub position: Point,
    pub mass: f64,
}

/// The Barnes-Hut evaluator, parameterized by its accuracy threshold θ.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BarnesHut {
    theta: f64,
}

impl Default for BarnesHut {
    fn default() -> Self {
        BarnesHut { theta: DEFAULT_THETA }
    }
}

impl BarnesHut {
    /// Creates an evaluator with threshold `theta`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidTheta` if `theta` is negative or not finite.
    pub fn new(theta: f64) -> Result<Self, QuadTreeError> {
        if !theta.is_finite() || theta < 0.0 {
            return Err(QuadTreeError::InvalidTheta);
        }
        Ok(BarnesHut { theta })
    }

    pub fn theta(&self) -> f64 {
        self.theta
    }

    /// Approximates the total force on `query_object` located at
    /// `query_point` with mass `query_mass`.
    ///
    /// Stored pairs whose object equals `query_object` are skipped, as are
    /// sources at zero distance from `query_point`.
    pub fn approximate_force<T: PartialEq, L: ForceLaw>(
        &self,
        query_object: &T,
        query_point: Point,
        query_mass: f64,
        tree: &QuadTree<T>,
        law: &L,
    ) -> Point {
        let mut total = Point::ORIGIN;
        self.walk(tree, query_object, &query_point, &mut |source| {
            total += law.force(query_point, query_mass, source.position, source.mass);
        });
        total
    }

    /// Evaluates many queries against the same tree in parallel.
    ///
    /// The tree is only read, so every query runs on its own Rayon task.
    /// Results are returned in query order.
    ///
    /// # Examples
    ///
    /// ```
    /// use rs_quadtree::forces::{BarnesHut, ForceQuery, InverseSquareAttraction};
    /// use rs_quadtree::index::QuadTree;
    /// use rs_quadtree::models::Point;
    ///
    /// let mut tree = QuadTree::new(4, Point::new(0.0, 0.0), 10.0, 10.0).unwrap();
    /// let a = Point::new(-1.0, 0.0);
    /// let b = Point::new(1.0, 0.0);
    /// tree.insert(a, 0);
    /// tree.insert(b, 1);
    ///
    /// let queries = [
    ///     ForceQuery { object: 0, point: a, mass: 1.0 },
    ///     ForceQuery { object: 1, point: b, mass: 1.0 },
    /// ];
    /// let forces = BarnesHut::default()
    ///     .approximate_forces(&queries, &tree, &InverseSquareAttraction { g: 1.0 });
    ///
    /// // Equal and opposite.
    /// assert_eq!(forces[0], Point::new(0.25, 0.0));
    /// assert_eq!(forces[1], Point::new(-0.25, 0.0));
    /// ```
    pub fn approximate_forces<T, L>(&self, queries: &[ForceQuery<T>], tree: &QuadTree<T>, law: &L) -> Vec<Point>
    where
        T: PartialEq + Sync,
        L: ForceLaw + Sync,
    {
        debug!(
            "evaluating {} force queries over {} elements (theta = {})",
            queries.len(), tree.len(), self.theta
        );
        queries
            .par_iter()
            .map(|query| self.approximate_force(&query.object, query.point, query.mass, tree, law))
            .collect()
    }

    /// Collects the sources a force query would interact with, in walk order.
    ///
    /// The worklist is what [`BarnesHut::approximate_force`] sums over; its
    /// length measures how much work a given θ saves.
    pub fn collect_interactions<T: PartialEq>(
        &self,
        query_object: &T,
        query_point: Point,
        tree: &QuadTree<T>,
        worklist: &mut Vec<Interaction>,
    ) {
        self.walk(tree, query_object, &query_point, &mut |source| worklist.push(source));
    }

    fn walk<T: PartialEq, F: FnMut(Interaction)>(
        &self,
        node: &QuadTree<T>,
        query_object: &T,
        query_point: &Point,
        emit: &mut F,
    ) {
        if node.is_empty() {
            return;
        }
        if node.is_leaf() {
            for (point, object) in node.points().iter().zip(node.objects()) {
                if object == query_object || point == query_point {
                    continue;
                }
                emit(Interaction { position: *point, mass: 1.0 });
            }
            return;
        }

        let gravity_center = node.gravity_center();
        let distance = query_point.distance(&gravity_center);
        // A zero distance makes s / d infinite, which never satisfies the
        // criterion: descend instead of evaluating a singular interaction.
        if distance > 0.0 && node.width() / distance < self.theta {
            emit(Interaction { position: gravity_center, mass: node.len() as f64 });
            return;
        }
        for child in node.children().into_iter().flatten() {
            self.walk(child, query_object, query_point, emit);
        }
    }
}

/// Brute-force reference: sums `law` over every `(point, object)` source,
/// with the same skipping rules as the tree walk.
///
/// # Examples
///
/// ```
/// use rs_quadtree::forces::{exact_force, InverseSquareAttraction};
/// use rs_quadtree::models::Point;
///
/// let sources = [(Point::new(2.0, 0.0), &1), (Point::new(0.0, 0.0), &0)];
/// let force = exact_force(&0, Point::new(0.0, 0.0), 1.0, sources, &InverseSquareAttraction { g: 4.0 });
/// assert_eq!(force, Point::new(1.0, 0.0));
/// ```
pub fn exact_force<'a, T, L, I>(query_object: &T, query_point: Point, query_mass: f64, sources: I, law: &L) -> Point
where
    T: PartialEq + 'a,
    L: ForceLaw,
    I: IntoIterator<Item = (Point, &'a T)>,
{
    sources
        .into_iter()
        .filter(|(point, object)| *object != query_object && *point != query_point)
        .fold(Point::ORIGIN, |total, (point, _)| total + law.force(query_point, query_mass, point, 1.0))
}
