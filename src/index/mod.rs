mod quadtree;

pub use quadtree::*;
