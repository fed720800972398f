//! A force-directed graph layout driven by the quadtree and the Barnes-Hut
//! evaluator.
//!
//! Every vertex repels every other vertex with a Coulomb law evaluated through
//! [`BarnesHut`], and every edge pulls its endpoints together with a Hooke
//! spring. Each step integrates velocities with explicit Euler, damps them,
//! moves the vertices (clamped into the universe) and relocates them in the
//! index, so the tree's counts and gravity centers always describe the
//! current layout.
//!
//! # Example
//!
//! ```
//! use rs_quadtree::layout::ForceLayout;
//! use rs_quadtree::models::Point;
//! use rs_quadtree::utils::LayoutConfig;
//!
//! let mut layout = ForceLayout::new(LayoutConfig::default(), Point::new(0.0, 0.0), 1000.0, 1000.0)
//!     .expect("Failed to create layout");
//!
//! let a = layout.add_vertex(Point::new(-1.0, 0.0)).unwrap();
//! let b = layout.add_vertex(Point::new(1.0, 0.0)).unwrap();
//! layout.add_edge(a, b).unwrap();
//!
//! layout.simulate(200).expect("Simulation failed");
//!
//! // Repulsion and the spring settle the pair apart from each other.
//! let distance = layout.position(a).unwrap().distance(&layout.position(b).unwrap());
//! assert!(distance > 2.0);
//! ```
use log::{debug, trace};
use crate::forces::{BarnesHut, CoulombRepulsion, ForceLaw, ForceQuery, HookeSpring};
use crate::index::QuadTree;
use crate::models::Point;
use crate::utils::{LayoutConfig, QuadTreeError};

/// Unit mass of a single vertex; an approximated group weighs its size.
const VERTEX_MASS: f64 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq)]
struct Vertex {
    position: Point,
    velocity: Point,
}

/// A graph being laid out in a rectangular universe.
///
/// Vertex ids are indices handed out by [`ForceLayout::add_vertex`]; an id
/// is never reused after its vertex is removed.
#[derive(Debug, Clone)]
pub struct ForceLayout {
    config: LayoutConfig,
    barnes_hut: BarnesHut,
    repulsion: CoulombRepulsion,
    spring: HookeSpring,
    tree: QuadTree<usize>,
    vertices: Vec<Option<Vertex>>,
    edges: Vec<(usize, usize)>,
}

impl ForceLayout {
    /// Creates an empty layout over the rectangle centered at `center`.
    ///
    /// # Errors
    ///
    /// Returns the validation error of `config` or of the universe
    /// rectangle.
    pub fn new(config: LayoutConfig, center: Point, width: f64, height: f64) -> Result<Self, QuadTreeError> {
        config.validate()?;
        let tree = QuadTree::with_config(config.tree, center, width, height, 0)?;
        Ok(ForceLayout {
            barnes_hut: BarnesHut::new(config.theta)?,
            repulsion: CoulombRepulsion::from(&config),
            spring: HookeSpring::from(&config),
            config,
            tree,
            vertices: Vec::new(),
            edges: Vec::new(),
        })
    }

    /// Adds a resting vertex at `position` and returns its id.
    ///
    /// # Errors
    ///
    /// Returns `OutOfBounds` if `position` lies outside the universe.
    pub fn add_vertex(&mut self, position: Point) -> Result<usize, QuadTreeError> {
        let id = self.vertices.len();
        if !self.tree.insert(position, id) {
            return Err(QuadTreeError::OutOfBounds);
        }
        self.vertices.push(Some(Vertex { position, velocity: Point::ORIGIN }));
        Ok(id)
    }

    /// Removes a vertex together with its edges.
    pub fn remove_vertex(&mut self, id: usize) -> Result<(), QuadTreeError> {
        let vertex = self.vertex(id)?;
        if !self.tree.remove(&vertex.position, &id) {
            return Err(QuadTreeError::CalculationError(format!(
                "vertex {} missing from the index at {}",
                id, vertex.position
            )));
        }
        self.vertices[id] = None;
        self.edges.retain(|&(a, b)| a != id && b != id);
        Ok(())
    }

    /// Connects two vertices with a spring.
    ///
    /// # Errors
    ///
    /// Returns `UnknownVertex` if either end does not exist.
    pub fn add_edge(&mut self, a: usize, b: usize) -> Result<(), QuadTreeError> {
        self.vertex(a)?;
        self.vertex(b)?;
        self.edges.push((a, b));
        Ok(())
    }

    /// Advances the layout by one time step.
    ///
    /// # Errors
    ///
    /// Returns a `CalculationError` if a vertex ends up at a non-finite
    /// position or is not stored in the index where the layout left it.
    pub fn step(&mut self) -> Result<(), QuadTreeError> {
        let queries: Vec<ForceQuery<usize>> = self
            .vertices
            .iter()
            .enumerate()
            .filter_map(|(id, slot)| {
                slot.map(|vertex| ForceQuery { object: id, point: vertex.position, mass: VERTEX_MASS })
            })
            .collect();

        let mut forces = vec![Point::ORIGIN; self.vertices.len()];
        let repulsion = self.barnes_hut.approximate_forces(&queries, &self.tree, &self.repulsion);
        for (query, force) in queries.iter().zip(repulsion) {
            forces[query.object] = force;
        }

        for &(a, b) in &self.edges {
            let (position_a, position_b) = (self.vertex(a)?.position, self.vertex(b)?.position);
            let pull = self.spring.force(position_a, VERTEX_MASS, position_b, VERTEX_MASS);
            forces[a] += pull;
            forces[b] -= pull;
        }

        let dt = self.config.time_step;
        let mut moved = 0;
        for (id, slot) in self.vertices.iter_mut().enumerate() {
            let Some(vertex) = slot else {
                continue;
            };
            vertex.velocity += forces[id] * dt;
            vertex.velocity = vertex.velocity * self.config.damping;

            let target = vertex.position + vertex.velocity * dt;
            if !target.is_finite() {
                return Err(QuadTreeError::CalculationError(format!(
                    "vertex {} moved to a non-finite position",
                    id
                )));
            }
            let target = clamp_into(&self.tree, target);
            if target == vertex.position {
                continue;
            }
            if !self.tree.update(vertex.position, target, id, false) {
                return Err(QuadTreeError::CalculationError(format!(
                    "failed to move vertex {} from {} to {}",
                    id, vertex.position, target
                )));
            }
            trace!("vertex {} moved from {} to {}", id, vertex.position, target);
            vertex.position = target;
            moved += 1;
        }

        debug!(
            "layout step: {} vertices, {} edges, {} moved, kinetic energy {:.3}",
            queries.len(),
            self.edges.len(),
            moved,
            self.kinetic_energy()
        );
        Ok(())
    }

    /// Runs `steps` consecutive steps, stopping at the first error.
    pub fn simulate(&mut self, steps: usize) -> Result<(), QuadTreeError> {
        for _ in 0..steps {
            self.step()?;
        }
        Ok(())
    }

    pub fn position(&self, id: usize) -> Result<Point, QuadTreeError> {
        self.vertex(id).map(|vertex| vertex.position)
    }

    pub fn velocity(&self, id: usize) -> Result<Point, QuadTreeError> {
        self.vertex(id).map(|vertex| vertex.velocity)
    }

    /// `(id, position)` of every live vertex, by increasing id.
    pub fn positions(&self) -> Vec<(usize, Point)> {
        self.vertices
            .iter()
            .enumerate()
            .filter_map(|(id, slot)| slot.map(|vertex| (id, vertex.position)))
            .collect()
    }

    /// Sum of `½·m·|v|²` over the live vertices.
    pub fn kinetic_energy(&self) -> f64 {
        self.vertices
            .iter()
            .flatten()
            .map(|vertex| 0.5 * VERTEX_MASS * vertex.velocity.norm_squared())
            .sum()
    }

    pub fn vertex_count(&self) -> usize {
        self.tree.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn edges(&self) -> &[(usize, usize)] {
        &self.edges
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// The index holding the current vertex positions.
    pub fn tree(&self) -> &QuadTree<usize> {
        &self.tree
    }

    #[cfg(test)]
    pub(crate) fn tree_mut(&mut self) -> &mut QuadTree<usize> {
        &mut self.tree
    }

    fn vertex(&self, id: usize) -> Result<Vertex, QuadTreeError> {
        self.vertices
            .get(id)
            .copied()
            .flatten()
            .ok_or(QuadTreeError::UnknownVertex(id))
    }
}

/// Clamps `point` into the rectangle covered by `tree`.
fn clamp_into(tree: &QuadTree<usize>, point: Point) -> Point {
    let center = tree.center();
    let (half_width, half_height) = (tree.width() / 2.0, tree.height() / 2.0);
    Point::new(
        point.x.clamp(center.x - half_width, center.x + half_width),
        point.y.clamp(center.y - half_height, center.y + half_height),
    )
}
