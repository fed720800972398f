use std::fmt;
use std::error::Error;

/// Represents errors that can occur while building or driving a spatial index.
///
/// Tree mutations (`insert`, `remove`, `update`) report failure through their
/// `bool` return value; this type covers construction and the layout driver.
#[derive(Debug, Clone, PartialEq)]
pub enum QuadTreeError {
    /// The per-leaf element cap is zero.
    InvalidCapacity,
    /// A width or height that is not strictly positive and finite, or a non-finite center.
    InvalidDimensions,
    /// A Barnes-Hut accuracy threshold that is negative or not finite.
    InvalidTheta,
    /// A point lies outside the universe rectangle of the index.
    OutOfBounds,
    /// A vertex id that the layout does not know about.
    UnknownVertex(usize),
    /// A general error for calculations that produce invalid results.
    CalculationError(String),
}

impl fmt::Display for QuadTreeError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            QuadTreeError::InvalidCapacity => write!(f, "Invalid element capacity per leaf"),
            QuadTreeError::InvalidDimensions => write!(f, "Invalid cell dimensions"),
            QuadTreeError::InvalidTheta => write!(f, "Invalid Barnes-Hut theta"),
            QuadTreeError::OutOfBounds => write!(f, "Point lies outside the indexed region"),
            QuadTreeError::UnknownVertex(id) => write!(f, "Unknown vertex {}", id),
            QuadTreeError::CalculationError(msg) => write!(f, "Calculation error: {}", msg),
        }
    }
}

impl Error for QuadTreeError {}
