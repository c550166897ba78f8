//! Points and rotation transforms in SVG user space (y pointing down)

/// A 2D point in the coordinate system
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Point at parameter `t` along the segment from `self` to `other`
    pub fn lerp(self, other: Point, t: f64) -> Point {
        Point::new(
            self.x + (other.x - self.x) * t,
            self.y + (other.y - self.y) * t,
        )
    }

    pub fn midpoint(self, other: Point) -> Point {
        self.lerp(other, 0.5)
    }

    pub fn offset(self, dx: f64, dy: f64) -> Point {
        Point::new(self.x + dx, self.y + dy)
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// Direction perpendicular to `from -> to`, scaled by the inverse squared length
///
/// Returns `None` for a zero-length segment.
pub fn inverse_square_normal(from: Point, to: Point) -> Option<Point> {
    let dx = to.x - from.x;
    let dy = to.y - from.y;
    let length_sq = dx * dx + dy * dy;
    if length_sq > 0.0 {
        let inv = 1.0 / length_sq;
        Some(Point::new(-dy * inv, dx * inv))
    } else {
        None
    }
}

/// A rotation around a pivot point.
///
/// Uses the SVG convention: clockwise positive angles, in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RotationTransform {
    pub angle_degrees: f64,
    pub center: Point,
}

impl RotationTransform {
    pub fn new(angle_degrees: f64, center: Point) -> Self {
        Self {
            angle_degrees,
            center,
        }
    }

    pub fn is_finite(&self) -> bool {
        self.angle_degrees.is_finite() && self.center.is_finite()
    }
}
