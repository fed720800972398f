use crate::utils::{LayoutConfig, QuadTreeConfig, QuadTreeError, DEFAULT_MAX_DEPTH, DEFAULT_MAX_ELEMENTS_PER_LEAF};

#[test]
fn test_quadtree_config_defaults() {
    let config = QuadTreeConfig::default();
    assert_eq!(config.max_elements_per_leaf, DEFAULT_MAX_ELEMENTS_PER_LEAF);
    assert_eq!(config.max_depth, DEFAULT_MAX_DEPTH);
}

#[test]
fn test_quadtree_config_new_falls_back_to_defaults() {
    let config = QuadTreeConfig::new(Some(4), None);
    assert_eq!(config.max_elements_per_leaf, 4);
    assert_eq!(config.max_depth, DEFAULT_MAX_DEPTH);
}

#[test]
fn test_quadtree_config_rejects_zero_capacity() {
    let config = QuadTreeConfig::new(Some(0), None);
    assert_eq!(config.validate(), Err(QuadTreeError::InvalidCapacity));
}

#[test]
fn test_layout_config_validate() {
    assert!(LayoutConfig::default().validate().is_ok());

    let negative_theta = LayoutConfig::new(None, None, None, None, None, None, None, Some(-0.1));
    assert_eq!(negative_theta.validate(), Err(QuadTreeError::InvalidTheta));

    let bad_damping = LayoutConfig::new(None, None, None, None, None, None, Some(1.5), None);
    assert!(matches!(bad_damping.validate(), Err(QuadTreeError::CalculationError(_))));
}

#[test]
fn test_layout_config_with_tree() {
    let config = LayoutConfig::default().with_tree(QuadTreeConfig::new(Some(2), Some(8)));
    assert_eq!(config.tree.max_elements_per_leaf, 2);
    assert_eq!(config.tree.max_depth, 8);
    assert_eq!(config.charge, 128.0);
}
