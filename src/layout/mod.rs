#[cfg(feature = "layout")]
mod force_layout;

#[cfg(feature = "layout")]
pub use force_layout::*;

#[cfg(test)]
#[cfg(feature = "layout")]
mod force_layout_tests;
