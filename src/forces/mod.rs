#[cfg(feature = "barnes_hut")]
mod barnes_hut;
#[cfg(feature = "barnes_hut")]
mod laws;

#[cfg(feature = "barnes_hut")]
pub use barnes_hut::*;
#[cfg(feature = "barnes_hut")]
pub use laws::*;

#[cfg(test)]
#[cfg(feature = "barnes_hut")]
mod laws_tests;
