mod point;
mod quadrant;
mod shapes;

pub use point::*;
pub use quadrant::*;
pub use shapes::*;
