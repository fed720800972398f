//! Lays out a random tree-shaped graph and prints where it ended up.
//!
//! Run with `RUST_LOG=debug cargo run --example force_layout` to follow the
//! per-step log.
use log::info;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rs_quadtree::layout::ForceLayout;
use rs_quadtree::models::Point;
use rs_quadtree::utils::{LayoutConfig, QuadTreeError};

const VERTICES: usize = 2_000;
const STEPS: usize = 100;

fn main() -> Result<(), QuadTreeError> {
    env_logger::init();

    let mut rng = StdRng::seed_from_u64(2012);
    let config = LayoutConfig::default();
    let mut layout = ForceLayout::new(config, Point::new(0.0, 0.0), 20_000.0, 20_000.0)?;

    for _ in 0..VERTICES {
        layout.add_vertex(Point::new(rng.random_range(-500.0..500.0), rng.random_range(-500.0..500.0)))?;
    }
    for id in 1..VERTICES {
        layout.add_edge(id, rng.random_range(0..id))?;
    }
    info!("{} vertices, {} edges", layout.vertex_count(), layout.edge_count());

    layout.simulate(STEPS)?;

    let (min, max) = layout.positions().iter().fold(
        (Point::new(f64::MAX, f64::MAX), Point::new(f64::MIN, f64::MIN)),
        |(min, max), (_, p)| (Point::new(min.x.min(p.x), min.y.min(p.y)), Point::new(max.x.max(p.x), max.y.max(p.y))),
    );
    println!("after {} steps the layout spans {} to {}", STEPS, min, max);
    println!("gravity center: {}", layout.tree().gravity_center());
    println!("kinetic energy: {:.4}", layout.kinetic_energy());
    Ok(())
}
