use std::fmt;
use std::ops::{Add, AddAssign, Div, Mul, Neg, Sub, SubAssign};

/// A 2D coordinate, used both as a geometric key and as a generic 2-vector.
///
/// Equality is exact coordinate equality, which is what the spatial index
/// relies on when it looks up a stored `(point, object)` pair.
///
/// # Examples
///
/// ```
/// use rs_quadtree::models::Point;
///
/// let a = Point::new(50.0, 60.0);
/// let b = Point::new(100.0, 100.0);
///
/// assert_eq!(a + b, Point::new(150.0, 160.0));
/// assert_eq!(b / 10.0, Point::new(10.0, 10.0));
/// assert_eq!(Point::new(3.0, 4.0).norm(), 5.0);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ORIGIN: Point = Point { x: 0.0, y: 0.0 };

    pub const fn new(x: f64, y: f64) -> Self {
        Point { x, y }
    }

    /// Divides both coordinates by `value`, leaving the point untouched when
    /// `value` is zero.
    ///
    /// Centroid computations divide by an element count; an empty cell keeps
    /// its zero sum instead of turning into NaN.
    ///
    /// # Examples
    ///
    /// ```
    /// use rs_quadtree::models::Point;
    ///
    /// assert_eq!(Point::new(10.0, 20.0).divide_by(2.0), Point::new(5.0, 10.0));
    /// assert_eq!(Point::new(10.0, 20.0).divide_by(0.0), Point::new(10.0, 20.0));
    /// ```
    pub fn divide_by(self, value: f64) -> Point {
        if value == 0.0 {
            return self;
        }
        self / value
    }

    /// Multiplies both coordinates by `value`, leaving the point untouched when
    /// `value` is zero.
    pub fn multiply_by(self, value: f64) -> Point {
        if value == 0.0 {
            return self;
        }
        self * value
    }

    pub fn norm_squared(&self) -> f64 {
        self.x * self.x + self.y * self.y
    }

    pub fn norm(&self) -> f64 {
        self.norm_squared().sqrt()
    }

    pub fn distance_squared(&self, other: &Point) -> f64 {
        (*self - *other).norm_squared()
    }

    pub fn distance(&self, other: &Point) -> f64 {
        self.distance_squared(other).sqrt()
    }

    /// Returns the unit vector pointing the same way, or the point itself when
    /// its norm is zero.
    pub fn normalize(self) -> Point {
        self.divide_by(self.norm())
    }

    /// Rotates the point about `pivot` by `angle` radians, counter-clockwise.
    ///
    /// # Examples
    ///
    /// ```
    /// use rs_quadtree::models::Point;
    /// use std::f64::consts::FRAC_PI_2;
    ///
    /// let rotated = Point::new(2.0, 1.0).rotate(Point::new(1.0, 1.0), FRAC_PI_2);
    /// assert!((rotated.x - 1.0).abs() < 1e-12);
    /// assert!((rotated.y - 2.0).abs() < 1e-12);
    /// ```
    pub fn rotate(self, pivot: Point, angle: f64) -> Point {
        let (sin, cos) = angle.sin_cos();
        let offset = self - pivot;
        Point::new(
            offset.x * cos - offset.y * sin + pivot.x,
            offset.x * sin + offset.y * cos + pivot.y,
        )
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Point {
    fn add_assign(&mut self, rhs: Point) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl SubAssign for Point {
    fn sub_assign(&mut self, rhs: Point) {
        self.x -= rhs.x;
        self.y -= rhs.y;
    }
}

impl Mul<f64> for Point {
    type Output = Point;

    fn mul(self, rhs: f64) -> Point {
        Point::new(self.x * rhs, self.y * rhs)
    }
}

impl Div<f64> for Point {
    type Output = Point;

    fn div(self, rhs: f64) -> Point {
        Point::new(self.x / rhs, self.y / rhs)
    }
}

impl Neg for Point {
    type Output = Point;

    fn neg(self) -> Point {
        Point::new(-self.x, -self.y)
    }
}

impl From<(f64, f64)> for Point {
    fn from(coordinates: (f64, f64)) -> Self {
        Point::new(coordinates.0, coordinates.1)
    }
}

impl From<Point> for (f64, f64) {
    fn from(point: Point) -> Self {
        (point.x, point.y)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}
