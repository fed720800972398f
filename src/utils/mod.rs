pub mod errors;
mod constants;
mod constants_config;

pub use constants::*;
pub use constants_config::*;
pub use errors::QuadTreeError;

#[cfg(test)]
mod constants_config_tests;
