use crate::utils;

/// Elements a leaf may hold before it is split.
pub const DEFAULT_MAX_ELEMENTS_PER_LEAF: usize = 16;

/// Depth at which cells stop subdividing, even when overcrowded.
pub const DEFAULT_MAX_DEPTH: usize = 50;

/// Barnes-Hut size/distance ratio below which a subtree is treated as one mass.
pub const DEFAULT_THETA: f64 = 0.5;

pub const DEFAULT_QUADTREE_CONFIG: utils::QuadTreeConfig = utils::QuadTreeConfig {
    max_elements_per_leaf: DEFAULT_MAX_ELEMENTS_PER_LEAF,
    max_depth: DEFAULT_MAX_DEPTH,
};

pub const DEFAULT_LAYOUT_CONFIG: utils::LayoutConfig = utils::LayoutConfig {
    charge: 128.0,
    force_constant: 0.15,
    spring_constant: 0.35,
    spring_length: 20.0,
    max_raw_force: 40.0,
    time_step: 1.0,
    damping: 0.5,
    theta: DEFAULT_THETA,
    tree: DEFAULT_QUADTREE_CONFIG,
};
