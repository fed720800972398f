use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use crate::assert_float_eq;
use crate::layout::ForceLayout;
use crate::models::Point;
use crate::utils::{LayoutConfig, QuadTreeConfig, QuadTreeError};

fn default_layout(width: f64) -> ForceLayout {
    ForceLayout::new(LayoutConfig::default(), Point::new(0.0, 0.0), width, width)
        .expect("Failed to create layout")
}

fn assert_index_matches(layout: &ForceLayout) {
    let tree = layout.tree();
    assert_eq!(tree.len(), layout.vertex_count());
    for (id, position) in layout.positions() {
        assert!(tree.contains(&position), "vertex {} left the universe", id);
        assert!(
            tree.query(&position, 0.0, 0.0).contains(&&id),
            "vertex {} not indexed at {}",
            id,
            position
        );
    }
}

#[test]
fn test_new_rejects_invalid_settings() {
    let bad_theta = LayoutConfig { theta: -1.0, ..LayoutConfig::default() };
    assert_eq!(
        ForceLayout::new(bad_theta, Point::new(0.0, 0.0), 10.0, 10.0).err(),
        Some(QuadTreeError::InvalidTheta)
    );
    assert_eq!(
        ForceLayout::new(LayoutConfig::default(), Point::new(0.0, 0.0), 0.0, 10.0).err(),
        Some(QuadTreeError::InvalidDimensions)
    );
    let bad_tree = LayoutConfig::default().with_tree(QuadTreeConfig::new(Some(0), None));
    assert_eq!(
        ForceLayout::new(bad_tree, Point::new(0.0, 0.0), 10.0, 10.0).err(),
        Some(QuadTreeError::InvalidCapacity)
    );
}

#[test]
fn test_add_vertex_and_edges() {
    let mut layout = default_layout(100.0);
    assert_eq!(layout.add_vertex(Point::new(0.0, 0.0)), Ok(0));
    assert_eq!(layout.add_vertex(Point::new(10.0, 0.0)), Ok(1));
    assert_eq!(layout.add_vertex(Point::new(500.0, 0.0)), Err(QuadTreeError::OutOfBounds));
    assert_eq!(layout.vertex_count(), 2);

    assert_eq!(layout.add_edge(0, 1), Ok(()));
    assert_eq!(layout.add_edge(0, 7), Err(QuadTreeError::UnknownVertex(7)));
    assert_eq!(layout.edge_count(), 1);
    assert_eq!(layout.velocity(1), Ok(Point::ORIGIN));
}

#[test]
fn test_remove_vertex_drops_its_edges() {
    let mut layout = default_layout(100.0);
    let a = layout.add_vertex(Point::new(-10.0, 0.0)).unwrap();
    let b = layout.add_vertex(Point::new(10.0, 0.0)).unwrap();
    let c = layout.add_vertex(Point::new(0.0, 10.0)).unwrap();
    layout.add_edge(a, b).unwrap();
    layout.add_edge(b, c).unwrap();
    layout.add_edge(c, a).unwrap();

    assert_eq!(layout.remove_vertex(b), Ok(()));
    assert_eq!(layout.edges(), &[(c, a)]);
    assert_eq!(layout.vertex_count(), 2);
    assert_eq!(layout.position(b), Err(QuadTreeError::UnknownVertex(b)));
    assert_eq!(layout.remove_vertex(b), Err(QuadTreeError::UnknownVertex(b)));

    // Ids are not reused.
    assert_eq!(layout.add_vertex(Point::new(10.0, 0.0)), Ok(3));
    assert_index_matches(&layout);
}

#[test]
fn test_isolated_vertex_stays_put() {
    let mut layout = default_layout(100.0);
    let id = layout.add_vertex(Point::new(3.0, 4.0)).unwrap();
    layout.simulate(10).expect("Simulation failed");
    assert_eq!(layout.position(id), Ok(Point::new(3.0, 4.0)));
    assert_eq!(layout.velocity(id), Ok(Point::ORIGIN));
    assert_eq!(layout.kinetic_energy(), 0.0);
}

#[test]
fn test_unconnected_vertices_repel() {
    let mut layout = default_layout(1000.0);
    let a = layout.add_vertex(Point::new(-1.0, 0.0)).unwrap();
    let b = layout.add_vertex(Point::new(1.0, 0.0)).unwrap();
    layout.step().expect("Step failed");

    // The clamped repulsion (40) halved by damping moves each vertex by 20.
    assert_eq!(layout.position(a), Ok(Point::new(-21.0, 0.0)));
    assert_eq!(layout.position(b), Ok(Point::new(21.0, 0.0)));
    assert_index_matches(&layout);
}

#[test]
fn test_stretched_edge_pulls_vertices_together() {
    let mut layout = default_layout(1000.0);
    let a = layout.add_vertex(Point::new(-200.0, 0.0)).unwrap();
    let b = layout.add_vertex(Point::new(200.0, 0.0)).unwrap();
    layout.add_edge(a, b).unwrap();
    layout.step().expect("Step failed");

    let pa = layout.position(a).unwrap();
    let pb = layout.position(b).unwrap();
    assert!(pa.distance(&pb) < 400.0);
    assert!(pa.x > -200.0 && pb.x < 200.0);
    assert!(layout.velocity(a).unwrap().x > 0.0);
}

#[test]
fn test_connected_pair_settles_near_equilibrium() {
    let mut layout = default_layout(1000.0);
    let a = layout.add_vertex(Point::new(-1.0, 0.0)).unwrap();
    let b = layout.add_vertex(Point::new(1.0, 0.0)).unwrap();
    layout.add_edge(a, b).unwrap();
    layout.simulate(300).expect("Simulation failed");

    // Repulsion k·q²/d² balances the spring k·(d − 20) a little past the rest length.
    let distance = layout.position(a).unwrap().distance(&layout.position(b).unwrap());
    assert_float_eq(distance, 28.6, 0.5, Some("pair did not settle"));
    assert!(layout.kinetic_energy() < 1e-6);
}

#[test]
fn test_vertices_are_clamped_into_universe() {
    let mut layout = default_layout(100.0);
    let a = layout.add_vertex(Point::new(49.0, 0.0)).unwrap();
    layout.add_vertex(Point::new(48.0, 0.0)).unwrap();
    layout.step().expect("Step failed");

    assert_eq!(layout.position(a), Ok(Point::new(50.0, 0.0)));
    assert_eq!(layout.tree().query(&Point::new(50.0, 0.0), 0.0, 0.0), vec![&a]);
    assert_index_matches(&layout);
}

#[test]
fn test_random_graph_keeps_index_in_sync() {
    crate::init_test_logger();
    let mut rng = StdRng::seed_from_u64(2012);
    let config = LayoutConfig::default().with_tree(QuadTreeConfig::new(Some(4), None));
    let mut layout = ForceLayout::new(config, Point::new(0.0, 0.0), 2000.0, 2000.0)
        .expect("Failed to create layout");

    for _ in 0..200 {
        let position = Point::new(rng.random_range(-300.0..300.0), rng.random_range(-300.0..300.0));
        layout.add_vertex(position).unwrap();
    }
    for id in 1..200 {
        let other = rng.random_range(0..id);
        layout.add_edge(id, other).unwrap();
    }

    layout.simulate(30).expect("Simulation failed");
    assert_eq!(layout.vertex_count(), 200);
    assert!(layout.kinetic_energy().is_finite());
    assert!(layout.positions().iter().all(|(_, position)| position.is_finite()));
    assert_index_matches(&layout);

    for id in (0..200).step_by(3) {
        layout.remove_vertex(id).unwrap();
    }
    layout.simulate(5).expect("Simulation failed");
    assert_eq!(layout.vertex_count(), 200 - 67);
    assert!(layout.edges().iter().all(|&(a, b)| a % 3 != 0 && b % 3 != 0));
    assert_index_matches(&layout);
}

#[test]
fn test_add_vertex_rejects_non_finite_positions() {
    let mut layout = default_layout(100.0);
    assert_eq!(layout.add_vertex(Point::new(f64::NAN, 0.0)), Err(QuadTreeError::OutOfBounds));
    assert_eq!(layout.add_vertex(Point::new(0.0, f64::INFINITY)), Err(QuadTreeError::OutOfBounds));
    assert_eq!(layout.vertex_count(), 0);
    assert!(layout.positions().is_empty());
}

#[test]
fn test_step_fails_when_index_lost_a_vertex() {
    let mut layout = default_layout(1000.0);
    let a = layout.add_vertex(Point::new(-1.0, 0.0)).unwrap();
    layout.add_vertex(Point::new(1.0, 0.0)).unwrap();
    assert!(layout.tree_mut().remove(&Point::new(-1.0, 0.0), &a));

    let result = layout.step();
    assert!(matches!(result, Err(QuadTreeError::CalculationError(_))), "{:?}", result);
    // The lost vertex is reported, not silently re-inserted.
    assert_eq!(layout.tree().len(), 1);
    assert!(layout.tree().query_all().iter().all(|&&id| id != a));
}
