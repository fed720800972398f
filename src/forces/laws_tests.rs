use approx::assert_relative_eq;
use crate::forces::{CoulombRepulsion, ForceLaw, HookeSpring, InverseSquareAttraction};
use crate::models::Point;
use crate::utils::LayoutConfig;

#[test]
fn test_inverse_square_points_toward_source() {
    let law = InverseSquareAttraction { g: 2.0 };
    let f = law.force(Point::new(1.0, 1.0), 1.0, Point::new(4.0, 5.0), 5.0);
    // |r| = 5, magnitude = 2 * 5 / 25 = 0.4 along (0.6, 0.8).
    assert_relative_eq!(f.x, 0.24);
    assert_relative_eq!(f.y, 0.32);
}

#[test]
fn test_laws_ignore_coincident_positions() {
    let p = Point::new(3.0, 3.0);
    assert_eq!(InverseSquareAttraction { g: 1.0 }.force(p, 1.0, p, 1.0), Point::ORIGIN);
    assert_eq!(CoulombRepulsion { force_constant: 1.0, charge: 1.0, max_force: 10.0 }.force(p, 1.0, p, 1.0), Point::ORIGIN);
    assert_eq!(HookeSpring { spring_constant: 1.0, rest_length: 1.0, max_force: 10.0 }.force(p, 1.0, p, 1.0), Point::ORIGIN);
}

#[test]
fn test_coulomb_repulsion_pushes_away_and_clamps() {
    let law = CoulombRepulsion { force_constant: 0.15, charge: 128.0, max_force: 40.0 };
    let far = law.force(Point::new(0.0, 0.0), 1.0, Point::new(100.0, 0.0), 1.0);
    // 0.15 * 128 * 128 / 100^2 = 0.24576
    assert_relative_eq!(far.x, -0.24576);
    assert_relative_eq!(far.y, 0.0);

    let near = law.force(Point::new(0.0, 0.0), 1.0, Point::new(0.0, 1.0), 1.0);
    assert_relative_eq!(near.y, -40.0);
}

#[test]
fn test_coulomb_mass_scales_charge() {
    let law = CoulombRepulsion { force_constant: 1.0, charge: 1.0, max_force: f64::MAX };
    let single = law.force(Point::ORIGIN, 1.0, Point::new(10.0, 0.0), 1.0);
    let group = law.force(Point::ORIGIN, 1.0, Point::new(10.0, 0.0), 4.0);
    assert_relative_eq!(group.x, 4.0 * single.x);
}

#[test]
fn test_hooke_spring_pulls_when_stretched_and_pushes_when_compressed() {
    let law = HookeSpring { spring_constant: 0.35, rest_length: 20.0, max_force: 40.0 };
    let stretched = law.force(Point::ORIGIN, 1.0, Point::new(30.0, 0.0), 1.0);
    assert_relative_eq!(stretched.x, 3.5);
    let compressed = law.force(Point::ORIGIN, 1.0, Point::new(10.0, 0.0), 1.0);
    assert_relative_eq!(compressed.x, -3.5);
    let far = law.force(Point::ORIGIN, 1.0, Point::new(0.0, 1000.0), 1.0);
    assert_relative_eq!(far.y, 40.0);
}

#[test]
fn test_laws_from_layout_config() {
    let config = LayoutConfig::default();
    let repulsion = CoulombRepulsion::from(&config);
    assert_eq!(repulsion.charge, 128.0);
    assert_eq!(repulsion.max_force, 40.0);
    let spring = HookeSpring::from(&config);
    assert_eq!(spring.rest_length, 20.0);
    assert_eq!(spring.spring_constant, 0.35);
}
