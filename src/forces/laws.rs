//! Stock pairwise force laws.
//!
//! The Barnes-Hut walk treats force laws as opaque; these are the ones the
//! layout driver and the tests plug into it.
use crate::forces::ForceLaw;
use crate::models::Point;
use crate::utils::LayoutConfig;

/// Newtonian attraction, `g·m₁·m₂ / r²` toward the source.
///
/// # Examples
///
/// ```
/// use rs_quadtree::forces::{ForceLaw, InverseSquareAttraction};
/// use rs_quadtree::models::Point;
///
/// let law = InverseSquareAttraction { g: 1.0 };
/// let f = law.force(Point::new(0.0, 0.0), 2.0, Point::new(0.0, 2.0), 3.0);
/// assert_eq!(f, Point::new(0.0, 1.5));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InverseSquareAttraction {
    pub g: f64,
}

impl ForceLaw for InverseSquareAttraction {
    fn force(&self, target: Point, target_mass: f64, source: Point, source_mass: f64) -> Point {
        let delta = source - target;
        let distance_squared = delta.norm_squared();
        if distance_squared == 0.0 {
            return Point::ORIGIN;
        }
        let magnitude = self.g * target_mass * source_mass / distance_squared;
        delta / distance_squared.sqrt() * magnitude
    }
}

/// Coulomb repulsion between charged vertices, `k·(q·m₁)·(q·m₂) / r²` away
/// from the source, clamped to `max_force`.
///
/// Masses scale the charge, so an approximated subtree of `n` vertices
/// repels like `n` vertices stacked at its gravity center.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoulombRepulsion {
    pub force_constant: f64,
    pub charge: f64,
    pub max_force: f64,
}

impl From<&LayoutConfig> for CoulombRepulsion {
    fn from(config: &LayoutConfig) -> Self {
        CoulombRepulsion {
            force_constant: config.force_constant,
            charge: config.charge,
            max_force: config.max_raw_force,
        }
    }
}

impl ForceLaw for CoulombRepulsion {
    fn force(&self, target: Point, target_mass: f64, source: Point, source_mass: f64) -> Point {
        let delta = target - source;
        let distance_squared = delta.norm_squared();
        if distance_squared == 0.0 {
            return Point::ORIGIN;
        }
        let charges = (self.charge * target_mass) * (self.charge * source_mass);
        let magnitude = (self.force_constant * charges / distance_squared).min(self.max_force);
        delta / distance_squared.sqrt() * magnitude
    }
}

/// Hooke spring along an edge, `k·(r − rest_length)` toward the source.
///
/// A stretched spring pulls, a compressed one pushes. The pull is clamped to
/// `max_force`; masses are ignored.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HookeSpring {
    pub spring_constant: f64,
    pub rest_length: f64,
    pub max_force: f64,
}

impl From<&LayoutConfig> for HookeSpring {
    fn from(config: &LayoutConfig) -> Self {
        HookeSpring {
            spring_constant: config.spring_constant,
            rest_length: config.spring_length,
            max_force: config.max_raw_force,
        }
    }
}

impl ForceLaw for HookeSpring {
    fn force(&self, target: Point, _target_mass: f64, source: Point, _source_mass: f64) -> Point {
        let delta = source - target;
        let distance = delta.norm();
        if distance == 0.0 {
            return Point::ORIGIN;
        }
        let magnitude = (self.spring_constant * (distance - self.rest_length)).min(self.max_force);
        delta / distance * magnitude
    }
}
