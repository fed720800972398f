//! An adaptive region quadtree over a fixed rectangular universe.
//!
//! Every node covers a rectangle given by its center and full extents. Leaves
//! store `(point, object)` pairs directly; a leaf that grows past the per-leaf
//! cap is split into up to four children, created lazily the first time a
//! point classifies into their quadrant. Each node keeps the number of pairs in
//! its subtree and their centroid (the "gravity center"), recomputed bottom-up
//! along every mutated path so that a Barnes-Hut walk can read them directly.
//!
//! # Example
//!
//! ```
//! use rs_quadtree::index::QuadTree;
//! use rs_quadtree::models::Point;
//!
//! let mut tree = QuadTree::new(4, Point::new(1000.0, 1000.0), 2000.0, 2000.0)
//!     .expect("valid universe");
//!
//! tree.insert(Point::new(0.0, 0.0), 0);
//! tree.insert(Point::new(5.0, 5.0), 5);
//! assert!(tree.update(Point::new(5.0, 5.0), Point::new(25.0, 25.0), 5, false));
//!
//! assert!(tree.query(&Point::new(5.0, 5.0), 0.0, 0.0).is_empty());
//! assert_eq!(tree.query(&Point::new(25.0, 25.0), 0.0, 0.0), vec![&5]);
//! assert_eq!(tree.len(), 2);
//! ```
use log::{debug, trace, warn};
use crate::models::{point_in_circle, point_in_rectangle, rectangles_overlap, Point, Quadrant};
use crate::utils::{QuadTreeConfig, QuadTreeError};

/// Contents of a node: either stored pairs or up to four owned children.
#[derive(Debug, Clone)]
enum Cell<T> {
    /// Parallel lists of coordinates and payloads. A point may appear several
    /// times with different payloads.
    Leaf { points: Vec<Point>, objects: Vec<T> },
    /// Children indexed by [`Quadrant::index`]; absent quadrants are `None`.
    Internal { children: [Option<Box<QuadTree<T>>>; 4] },
}

impl<T> Cell<T> {
    fn empty_leaf() -> Self {
        Cell::Leaf { points: Vec::new(), objects: Vec::new() }
    }
}

/// A quadtree node. The root is the whole index; every child is a `QuadTree`
/// of its own covering one quadrant of its parent.
///
/// Payloads are compared with `PartialEq` and never inspected otherwise, so
/// they should be handles (ids, keys) for which equality means identity.
#[derive(Debug, Clone)]
pub struct QuadTree<T> {
    config: QuadTreeConfig,
    center: Point,
    width: f64,
    height: f64,
    depth: usize,
    number_of_elements: usize,
    gravity_center: Point,
    cell: Cell<T>,
}

impl<T: PartialEq> QuadTree<T> {
    /// Creates an empty root covering the rectangle centered at `center` with
    /// the given full extents.
    ///
    /// # Errors
    ///
    /// Returns `InvalidCapacity` if `max_elements_per_leaf` is zero and
    /// `InvalidDimensions` if an extent is not strictly positive and finite.
    ///
    /// # Examples
    ///
    /// ```
    /// use rs_quadtree::index::QuadTree;
    /// use rs_quadtree::models::Point;
    /// use rs_quadtree::utils::QuadTreeError;
    ///
    /// let tree: QuadTree<u32> = QuadTree::new(5, Point::new(0.0, 0.0), 100.0, 50.0).unwrap();
    /// assert_eq!(tree.depth(), 0);
    /// assert!(tree.is_empty());
    ///
    /// let invalid = QuadTree::<u32>::new(0, Point::new(0.0, 0.0), 100.0, 50.0);
    /// assert_eq!(invalid.err(), Some(QuadTreeError::InvalidCapacity));
    /// ```
    pub fn new(
        max_elements_per_leaf: usize,
        center: Point,
        width: f64,
        height: f64,
    ) -> Result<Self, QuadTreeError> {
        let config = QuadTreeConfig::new(Some(max_elements_per_leaf), None);
        Self::with_config(config, center, width, height, 0)
    }

    /// Creates an empty node with explicit subdivision settings and depth.
    pub fn with_config(
        config: QuadTreeConfig,
        center: Point,
        width: f64,
        height: f64,
        depth: usize,
    ) -> Result<Self, QuadTreeError> {
        config.validate()?;
        if !center.is_finite() || !width.is_finite() || !height.is_finite() || width <= 0.0 || height <= 0.0 {
            return Err(QuadTreeError::InvalidDimensions);
        }
        Ok(Self::empty(config, center, width, height, depth))
    }

    fn empty(config: QuadTreeConfig, center: Point, width: f64, height: f64, depth: usize) -> Self {
        QuadTree {
            config,
            center,
            width,
            height,
            depth,
            number_of_elements: 0,
            gravity_center: Point::ORIGIN,
            cell: Cell::empty_leaf(),
        }
    }

    /// Inserts `object` at `point`.
    ///
    /// Returns `false`, without touching the tree, if `point` lies outside
    /// this node's rectangle. A leaf that ends up holding more than the
    /// per-leaf cap is split unless it already sits at the depth cap.
    ///
    /// # Examples
    ///
    /// ```
    /// use rs_quadtree::index::QuadTree;
    /// use rs_quadtree::models::Point;
    ///
    /// let mut tree = QuadTree::new(32, Point::new(0.0, 0.0), 2e9, 2e9).unwrap();
    /// assert!(!tree.insert(Point::new(-2e9, -2e9), 91));
    /// assert_eq!(tree.len(), 0);
    /// assert!(tree.insert(Point::new(1.0, 1.0), 91));
    /// assert_eq!(tree.len(), 1);
    /// ```
    pub fn insert(&mut self, point: Point, object: T) -> bool {
        if !self.contains(&point) {
            debug!("rejected insertion at {} outside cell {} ({} x {})", point, self.center, self.width, self.height);
            return false;
        }
        self.insert_within(point, object);
        true
    }

    /// Insertion once `point` is known to belong to this node.
    fn insert_within(&mut self, point: Point, object: T) {
        let quadrant = Quadrant::classify(&point, &self.center);
        match &mut self.cell {
            Cell::Leaf { points, objects } => {
                points.push(point);
                objects.push(object);
            }
            Cell::Internal { .. } => {
                if let Some(child) = self.child_or_create(quadrant) {
                    child.insert_within(point, object);
                }
            }
        }
        self.recompute_aggregate();
        self.split_if_overcrowded();
    }

    fn split_if_overcrowded(&mut self) {
        let Cell::Leaf { points, .. } = &self.cell else {
            return;
        };
        if points.len() <= self.config.max_elements_per_leaf {
            return;
        }
        if self.depth >= self.config.max_depth {
            if points.len() == self.config.max_elements_per_leaf + 1 {
                warn!(
                    "leaf at {} reached the depth cap ({}) and keeps {} elements",
                    self.center, self.config.max_depth, points.len()
                );
            }
            return;
        }
        self.split();
    }

    /// Turns this leaf into an internal node, moving every stored pair into
    /// the child of its quadrant. Only quadrants that receive a pair are
    /// materialised.
    fn split(&mut self) {
        let empty_internal = Cell::Internal { children: [None, None, None, None] };
        match std::mem::replace(&mut self.cell, empty_internal) {
            Cell::Leaf { points, objects } => {
                trace!("splitting cell {} at depth {} ({} elements)", self.center, self.depth, points.len());
                for (point, object) in points.into_iter().zip(objects) {
                    let quadrant = Quadrant::classify(&point, &self.center);
                    if let Some(child) = self.child_or_create(quadrant) {
                        child.insert_within(point, object);
                    }
                }
                self.recompute_aggregate();
            }
            internal => self.cell = internal,
        }
    }

    /// The child of `quadrant`, created on first use. `None` on a leaf.
    fn child_or_create(&mut self, quadrant: Quadrant) -> Option<&mut QuadTree<T>> {
        let config = self.config;
        let child_center = quadrant.child_center(&self.center, self.width, self.height);
        let (width, height, depth) = (self.width / 2.0, self.height / 2.0, self.depth + 1);
        match &mut self.cell {
            Cell::Leaf { .. } => None,
            Cell::Internal { children } => Some(
                &mut **children[quadrant.index()]
                    .get_or_insert_with(|| Box::new(QuadTree::empty(config, child_center, width, height, depth))),
            ),
        }
    }

    fn child_mut(&mut self, quadrant: Quadrant) -> Option<&mut QuadTree<T>> {
        match &mut self.cell {
            Cell::Leaf { .. } => None,
            Cell::Internal { children } => children[quadrant.index()].as_deref_mut(),
        }
    }

    /// Removes the pair `(point, object)`.
    ///
    /// Returns `false`, without touching the tree, if no stored pair matches
    /// both the coordinate and the payload. Children left as empty leaves are
    /// pruned on the way back up.
    ///
    /// # Examples
    ///
    /// ```
    /// use rs_quadtree::index::QuadTree;
    /// use rs_quadtree::models::Point;
    ///
    /// let mut tree = QuadTree::new(4, Point::new(10.0, 10.0), 40.0, 40.0).unwrap();
    /// let p = Point::new(2.0, 2.0);
    ///
    /// assert!(!tree.remove(&p, &"a"));
    /// tree.insert(p, "a");
    /// assert!(tree.remove(&p, &"a"));
    /// assert!(!tree.remove(&p, &"a"));
    /// ```
    pub fn remove(&mut self, point: &Point, object: &T) -> bool {
        let quadrant = Quadrant::classify(point, &self.center);
        let removed = match &mut self.cell {
            Cell::Leaf { points, objects } => {
                let position = points
                    .iter()
                    .zip(objects.iter())
                    .position(|(p, o)| o == object && p == point);
                match position {
                    Some(i) => {
                        points.swap_remove(i);
                        objects.swap_remove(i);
                        true
                    }
                    None => false,
                }
            }
            Cell::Internal { .. } => match self.child_mut(quadrant) {
                Some(child) => child.remove(point, object),
                None => false,
            },
        };
        if removed {
            self.prune_empty_children();
            self.recompute_aggregate();
        }
        removed
    }

    /// Moves `object` from `old_point` to `new_point`.
    ///
    /// When both points classify into the same child the move is delegated to
    /// that child, ending in an in-place coordinate change at the leaf. When
    /// they fall into different children the pair is removed from one and
    /// inserted into the other.
    ///
    /// If the pair is not stored, `force_insertion` decides between inserting
    /// `object` at `new_point` (returns `true`) and failing (returns `false`
    /// with no mutation). A `new_point` outside this node's rectangle always
    /// fails without mutation.
    ///
    /// # Examples
    ///
    /// ```
    /// use rs_quadtree::index::QuadTree;
    /// use rs_quadtree::models::Point;
    ///
    /// let mut tree = QuadTree::new(4, Point::new(1000.0, 1000.0), 2000.0, 2000.0).unwrap();
    /// tree.insert(Point::new(0.0, 0.0), 0);
    ///
    /// assert!(tree.update(Point::new(0.0, 0.0), Point::new(1500.0, 1500.0), 0, false));
    /// assert_eq!(tree.query(&Point::new(1500.0, 1500.0), 0.0, 0.0), vec![&0]);
    ///
    /// // Unknown pair: only succeeds when insertion is forced.
    /// assert!(!tree.update(Point::new(3.0, 3.0), Point::new(4.0, 4.0), 7, false));
    /// assert!(tree.update(Point::new(3.0, 3.0), Point::new(4.0, 4.0), 7, true));
    /// assert_eq!(tree.len(), 2);
    /// ```
    pub fn update(&mut self, old_point: Point, new_point: Point, object: T, force_insertion: bool) -> bool {
        if !self.contains(&new_point) {
            debug!("rejected move to {} outside cell {}", new_point, self.center);
            return false;
        }
        self.update_within(old_point, new_point, object, force_insertion)
    }

    fn update_within(&mut self, old_point: Point, new_point: Point, object: T, force_insertion: bool) -> bool {
        if let Cell::Leaf { points, objects } = &mut self.cell {
            let position = points
                .iter()
                .zip(objects.iter())
                .position(|(p, o)| *o == object && *p == old_point);
            return match position {
                Some(i) => {
                    points[i] = new_point;
                    self.recompute_aggregate();
                    true
                }
                None if force_insertion => {
                    self.insert_within(new_point, object);
                    true
                }
                None => false,
            };
        }

        let old_quadrant = Quadrant::classify(&old_point, &self.center);
        let new_quadrant = Quadrant::classify(&new_point, &self.center);

        if self.child_mut(old_quadrant).is_none() {
            if !force_insertion {
                return false;
            }
            self.insert_within(new_point, object);
            return true;
        }

        let result = if old_quadrant == new_quadrant {
            match self.child_mut(old_quadrant) {
                Some(child) => child.update_within(old_point, new_point, object, force_insertion),
                None => false,
            }
        } else {
            let removed = self
                .child_mut(old_quadrant)
                .is_some_and(|child| child.remove(&old_point, &object));
            if removed || force_insertion {
                if let Some(child) = self.child_or_create(new_quadrant) {
                    child.insert_within(new_point, object);
                }
                true
            } else {
                false
            }
        };

        if result {
            self.prune_empty_children();
            self.recompute_aggregate();
        }
        result
    }

    /// Drops children that have become empty leaves. A node left without any
    /// child collapses back into an empty leaf.
    fn prune_empty_children(&mut self) {
        let Cell::Internal { children } = &mut self.cell else {
            return;
        };
        for slot in children.iter_mut() {
            if slot.as_ref().is_some_and(|child| child.is_empty_leaf()) {
                *slot = None;
            }
        }
        if children.iter().all(Option::is_none) {
            trace!("collapsing cell {} at depth {} into a leaf", self.center, self.depth);
            self.cell = Cell::empty_leaf();
        }
    }

    /// Recomputes the element count and the centroid of this node from its
    /// own points (leaf) or from its children's aggregates (internal).
    fn recompute_aggregate(&mut self) {
        let (sum, count) = match &self.cell {
            Cell::Leaf { points, .. } => {
                let sum = points.iter().fold(Point::ORIGIN, |acc, p| acc + *p);
                (sum, points.len())
            }
            Cell::Internal { children } => children
                .iter()
                .flatten()
                .fold((Point::ORIGIN, 0), |(sum, count), child| {
                    (sum + child.gravity_center * child.number_of_elements as f64, count + child.number_of_elements)
                }),
        };
        self.number_of_elements = count;
        self.gravity_center = sum.divide_by(count as f64);
    }
}

impl<T> QuadTree<T> {
    /// Collects the objects stored inside the closed rectangle centered at
    /// `center`.
    ///
    /// Only children whose cell overlaps the query rectangle are visited.
    /// A zero-size rectangle returns exactly the objects stored at `center`.
    pub fn query(&self, center: &Point, width: f64, height: f64) -> Vec<&T> {
        let mut elements = Vec::new();
        self.query_into(center, width, height, &mut elements);
        elements
    }

    /// Accumulating form of [`QuadTree::query`].
    pub fn query_into<'a>(&'a self, center: &Point, width: f64, height: f64, elements: &mut Vec<&'a T>) {
        match &self.cell {
            Cell::Leaf { points, objects } => {
                elements.extend(
                    points
                        .iter()
                        .zip(objects.iter())
                        .filter(|(p, _)| point_in_rectangle(p, center, width, height))
                        .map(|(_, o)| o),
                );
            }
            Cell::Internal { children } => {
                for child in children.iter().flatten() {
                    if child.overlaps(center, width, height) {
                        child.query_into(center, width, height, elements);
                    }
                }
            }
        }
    }

    /// Collects the objects stored inside the closed disc of `radius` around
    /// `center`.
    ///
    /// # Examples
    ///
    /// ```
    /// use rs_quadtree::index::QuadTree;
    /// use rs_quadtree::models::Point;
    ///
    /// let mut tree = QuadTree::new(2, Point::new(0.0, 0.0), 100.0, 100.0).unwrap();
    /// tree.insert(Point::new(3.0, 4.0), 'a');
    /// tree.insert(Point::new(30.0, 40.0), 'b');
    ///
    /// assert_eq!(tree.query_circle(&Point::new(0.0, 0.0), 5.0), vec![&'a']);
    /// assert!(tree.query_circle(&Point::new(1.0, 1.0), 0.0).is_empty());
    /// ```
    pub fn query_circle(&self, center: &Point, radius: f64) -> Vec<&T> {
        let mut elements = Vec::new();
        self.query_circle_into(center, radius, &mut elements);
        elements
    }

    /// Accumulating form of [`QuadTree::query_circle`].
    pub fn query_circle_into<'a>(&'a self, center: &Point, radius: f64, elements: &mut Vec<&'a T>) {
        match &self.cell {
            Cell::Leaf { points, objects } => {
                elements.extend(
                    points
                        .iter()
                        .zip(objects.iter())
                        .filter(|(p, _)| point_in_circle(p, center, radius))
                        .map(|(_, o)| o),
                );
            }
            Cell::Internal { children } => {
                for child in children.iter().flatten() {
                    if child.overlaps(center, 2.0 * radius, 2.0 * radius) {
                        child.query_circle_into(center, radius, elements);
                    }
                }
            }
        }
    }

    /// Collects the stored coordinates inside the closed disc of `radius`
    /// around `center`, leaving out coordinates equal to `center` itself.
    pub fn query_points_with_circle(&self, center: &Point, radius: f64) -> Vec<Point> {
        let mut points = Vec::new();
        self.query_points_with_circle_into(center, radius, &mut points);
        points
    }

    fn query_points_with_circle_into(&self, center: &Point, radius: f64, out: &mut Vec<Point>) {
        match &self.cell {
            Cell::Leaf { points, .. } => {
                out.extend(
                    points
                        .iter()
                        .filter(|p| *p != center && point_in_circle(p, center, radius))
                        .copied(),
                );
            }
            Cell::Internal { children } => {
                for child in children.iter().flatten() {
                    if child.overlaps(center, 2.0 * radius, 2.0 * radius) {
                        child.query_points_with_circle_into(center, radius, out);
                    }
                }
            }
        }
    }

    /// Every object stored in this subtree.
    pub fn query_all(&self) -> Vec<&T> {
        let mut elements = Vec::with_capacity(self.number_of_elements);
        self.visit_leaves(&mut |leaf| {
            if let Cell::Leaf { objects, .. } = &leaf.cell {
                elements.extend(objects.iter());
            }
        });
        elements
    }

    /// Every coordinate stored in this subtree, one entry per stored pair.
    pub fn query_all_points(&self) -> Vec<Point> {
        let mut points = Vec::with_capacity(self.number_of_elements);
        self.visit_leaves(&mut |leaf| points.extend_from_slice(leaf.points()));
        points
    }

    /// The leaves whose cell overlaps the rectangle centered at `center`.
    ///
    /// Useful to read per-cell element counts, e.g. for level-of-detail
    /// decisions over the visible region.
    pub fn query_all_leaves(&self, center: &Point, width: f64, height: f64) -> Vec<&QuadTree<T>> {
        let mut leaves = Vec::new();
        self.visit_leaves(&mut |leaf| {
            if leaf.overlaps(center, width, height) {
                leaves.push(leaf);
            }
        });
        leaves
    }

    fn visit_leaves<'a, F: FnMut(&'a QuadTree<T>)>(&'a self, visit: &mut F) {
        match &self.cell {
            Cell::Leaf { .. } => visit(self),
            Cell::Internal { children } => {
                for child in children.iter().flatten() {
                    child.visit_leaves(visit);
                }
            }
        }
    }

    /// Returns true if `point` lies inside this node's closed rectangle.
    pub fn contains(&self, point: &Point) -> bool {
        point_in_rectangle(point, &self.center, self.width, self.height)
    }

    /// Returns true if this node's rectangle overlaps the given one.
    pub fn overlaps(&self, center: &Point, width: f64, height: f64) -> bool {
        rectangles_overlap(center, width, height, &self.center, self.width, self.height)
    }

    /// Number of `(point, object)` pairs in this subtree.
    pub fn len(&self) -> usize {
        self.number_of_elements
    }

    pub fn is_empty(&self) -> bool {
        self.number_of_elements == 0
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self.cell, Cell::Leaf { .. })
    }

    pub fn is_empty_leaf(&self) -> bool {
        matches!(&self.cell, Cell::Leaf { objects, .. } if objects.is_empty())
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn center(&self) -> Point {
        self.center
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    /// Centroid of the subtree, each stored pair weighing one. Meaningless
    /// (the origin) when the subtree is empty.
    pub fn gravity_center(&self) -> Point {
        self.gravity_center
    }

    pub fn max_elements_per_leaf(&self) -> usize {
        self.config.max_elements_per_leaf
    }

    pub fn max_depth(&self) -> usize {
        self.config.max_depth
    }

    pub fn config(&self) -> QuadTreeConfig {
        self.config
    }

    /// Coordinates stored directly in this node; empty for internal nodes.
    pub fn points(&self) -> &[Point] {
        match &self.cell {
            Cell::Leaf { points, .. } => points,
            Cell::Internal { .. } => &[],
        }
    }

    /// Payloads stored directly in this node, parallel to [`QuadTree::points`].
    pub fn objects(&self) -> &[T] {
        match &self.cell {
            Cell::Leaf { objects, .. } => objects,
            Cell::Internal { .. } => &[],
        }
    }

    pub fn number_of_elements_in_leaf(&self) -> usize {
        self.objects().len()
    }

    pub fn child(&self, quadrant: Quadrant) -> Option<&QuadTree<T>> {
        match &self.cell {
            Cell::Leaf { .. } => None,
            Cell::Internal { children } => children[quadrant.index()].as_deref(),
        }
    }

    /// Children in `Quadrant::ALL` order.
    pub fn children(&self) -> [Option<&QuadTree<T>>; 4] {
        Quadrant::ALL.map(|quadrant| self.child(quadrant))
    }
}
