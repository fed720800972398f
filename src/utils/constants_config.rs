// src/utils/constants_config.rs
use crate::utils::{
    DEFAULT_LAYOUT_CONFIG,
    DEFAULT_QUADTREE_CONFIG,
    errors::QuadTreeError
};

/// Subdivision settings shared by every node of a tree.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuadTreeConfig {
    pub max_elements_per_leaf: usize,
    pub max_depth: usize,
}

impl Default for QuadTreeConfig {
    fn default() -> Self {
        DEFAULT_QUADTREE_CONFIG
    }
}

impl QuadTreeConfig {
    pub fn new(max_elements_per_leaf: Option<usize>, max_depth: Option<usize>) -> Self {
        let default = DEFAULT_QUADTREE_CONFIG;
        Self {
            max_elements_per_leaf: max_elements_per_leaf.unwrap_or(default.max_elements_per_leaf),
            max_depth: max_depth.unwrap_or(default.max_depth),
        }
    }

    pub fn validate(&self) -> Result<(), QuadTreeError> {
        if self.max_elements_per_leaf == 0 { return Err(QuadTreeError::InvalidCapacity); }
        Ok(())
    }
}

/// Tuning of the force-directed layout driver.
///
/// Repulsion follows Coulomb's law (`force_constant`, `charge`), edges follow
/// Hooke's law (`spring_constant`, `spring_length`), and both are clamped to
/// `max_raw_force` before integration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutConfig {
    pub charge: f64,
    pub force_constant: f64,
    pub spring_constant: f64,
    pub spring_length: f64,
    pub max_raw_force: f64,
    pub time_step: f64,
    pub damping: f64,
    pub theta: f64,
    pub tree: QuadTreeConfig,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        DEFAULT_LAYOUT_CONFIG
    }
}

impl LayoutConfig {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        charge: Option<f64>,
        force_constant: Option<f64>,
        spring_constant: Option<f64>,
        spring_length: Option<f64>,
        max_raw_force: Option<f64>,
        time_step: Option<f64>,
        damping: Option<f64>,
        theta: Option<f64>,
    ) -> Self {
        let default = DEFAULT_LAYOUT_CONFIG;
        Self {
            charge: charge.unwrap_or(default.charge),
            force_constant: force_constant.unwrap_or(default.force_constant),
            spring_constant: spring_constant.unwrap_or(default.spring_constant),
            spring_length: spring_length.unwrap_or(default.spring_length),
            max_raw_force: max_raw_force.unwrap_or(default.max_raw_force),
            time_step: time_step.unwrap_or(default.time_step),
            damping: damping.unwrap_or(default.damping),
            theta: theta.unwrap_or(default.theta),
            tree: default.tree,
        }
    }

    /// Returns a copy using the given tree settings.
    pub fn with_tree(mut self, tree: QuadTreeConfig) -> Self {
        self.tree = tree;
        self
    }

    pub fn validate(&self) -> Result<(), QuadTreeError> {
        self.tree.validate()?;
        if !self.theta.is_finite() || self.theta < 0.0 { return Err(QuadTreeError::InvalidTheta); }
        if !self.time_step.is_finite() || self.time_step <= 0.0 {
            return Err(QuadTreeError::CalculationError("Time step must be positive".to_string()));
        }
        if !(0.0..=1.0).contains(&self.damping) {
            return Err(QuadTreeError::CalculationError("Damping must lie in [0, 1]".to_string()));
        }
        if self.max_raw_force < 0.0 {
            return Err(QuadTreeError::CalculationError("Maximum force must be non-negative".to_string()));
        }
        Ok(())
    }
}
