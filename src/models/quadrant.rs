use crate::models::Point;

/// One of the four children of a quadtree cell.
///
/// <pre>
///  _________
/// | NW | NE |
/// |____|____|
/// | SW | SE |
/// |____|____|
/// </pre>
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Quadrant {
    NorthWest,
    NorthEast,
    SouthWest,
    SouthEast,
}

impl Quadrant {
    pub const ALL: [Quadrant; 4] = [
        Quadrant::NorthWest,
        Quadrant::NorthEast,
        Quadrant::SouthWest,
        Quadrant::SouthEast,
    ];

    /// Classifies `point` relative to a cell `center`.
    ///
    /// Ties go east on `x` and north on `y`, so a coordinate sitting exactly on
    /// a dividing line always lands in the same quadrant.
    ///
    /// # Examples
    ///
    /// ```
    /// use rs_quadtree::models::{Point, Quadrant};
    ///
    /// let center = Point::new(0.0, 0.0);
    /// assert_eq!(Quadrant::classify(&Point::new(-1.0, 1.0), &center), Quadrant::NorthWest);
    /// assert_eq!(Quadrant::classify(&Point::new(0.0, 0.0), &center), Quadrant::NorthEast);
    /// assert_eq!(Quadrant::classify(&Point::new(0.0, -1.0), &center), Quadrant::SouthEast);
    /// ```
    pub fn classify(point: &Point, center: &Point) -> Quadrant {
        let east = point.x >= center.x;
        let north = point.y >= center.y;
        match (east, north) {
            (false, true) => Quadrant::NorthWest,
            (true, true) => Quadrant::NorthEast,
            (false, false) => Quadrant::SouthWest,
            (true, false) => Quadrant::SouthEast,
        }
    }

    /// Slot of this quadrant in a `[_; 4]` child array.
    pub fn index(self) -> usize {
        match self {
            Quadrant::NorthWest => 0,
            Quadrant::NorthEast => 1,
            Quadrant::SouthWest => 2,
            Quadrant::SouthEast => 3,
        }
    }

    /// Center of this quadrant inside a parent cell of the given extents.
    pub fn child_center(self, center: &Point, width: f64, height: f64) -> Point {
        let dx = width / 4.0;
        let dy = height / 4.0;
        match self {
            Quadrant::NorthWest => Point::new(center.x - dx, center.y + dy),
            Quadrant::NorthEast => Point::new(center.x + dx, center.y + dy),
            Quadrant::SouthWest => Point::new(center.x - dx, center.y - dy),
            Quadrant::SouthEast => Point::new(center.x + dx, center.y - dy),
        }
    }
}
