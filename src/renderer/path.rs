//! Path segments for noise curves
//!
//! Converts segment lists into SVG path `d` attribute strings.

use crate::geometry::Point;

/// A segment in a noise curve
#[derive(Debug, Clone, PartialEq)]
pub enum PathSegment {
    /// Move to starting point
    MoveTo(Point),
    /// Quadratic Bezier curve
    QuadraticTo { control: Point, end: Point },
    /// Cubic Bezier curve
    CubicTo {
        control1: Point,
        control2: Point,
        end: Point,
    },
    /// Smooth quadratic continuation
    /// Uses SVG T command - control point is auto-reflected
    SmoothQuadraticTo(Point),
}

impl PathSegment {
    fn points(&self) -> Vec<Point> {
        match self {
            PathSegment::MoveTo(p) | PathSegment::SmoothQuadraticTo(p) => vec![*p],
            PathSegment::QuadraticTo { control, end } => vec![*control, *end],
            PathSegment::CubicTo {
                control1,
                control2,
                end,
            } => vec![*control1, *control2, *end],
        }
    }
}

/// A curve ready for SVG rendering
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CurvePath {
    pub segments: Vec<PathSegment>,
}

impl CurvePath {
    pub fn new(segments: Vec<PathSegment>) -> Self {
        Self { segments }
    }

    /// Convert to SVG path `d` attribute string
    pub fn to_svg_d(&self) -> String {
        let mut d = String::new();

        for (i, seg) in self.segments.iter().enumerate() {
            if i > 0 {
                d.push(' ');
            }
            match seg {
                PathSegment::MoveTo(p) => {
                    d.push_str(&format!("M{:.2},{:.2}", p.x, p.y));
                }
                PathSegment::QuadraticTo { control, end } => {
                    d.push_str(&format!(
                        "Q{:.2},{:.2} {:.2},{:.2}",
                        control.x, control.y, end.x, end.y
                    ));
                }
                PathSegment::CubicTo {
                    control1,
                    control2,
                    end,
                } => {
                    d.push_str(&format!(
                        "C{:.2},{:.2} {:.2},{:.2} {:.2},{:.2}",
                        control1.x, control1.y, control2.x, control2.y, end.x, end.y
                    ));
                }
                PathSegment::SmoothQuadraticTo(end) => {
                    d.push_str(&format!("T{:.2},{:.2}", end.x, end.y));
                }
            }
        }

        d
    }

    /// True when every coordinate is a finite number
    pub fn is_finite(&self) -> bool {
        self.segments
            .iter()
            .flat_map(PathSegment::points)
            .all(|p| p.is_finite())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quadratic_svg_output() {
        let path = CurvePath::new(vec![
            PathSegment::MoveTo(Point::new(0.0, 0.0)),
            PathSegment::QuadraticTo {
                control: Point::new(50.0, -30.0),
                end: Point::new(100.0, 0.0),
            },
        ]);

        assert_eq!(path.to_svg_d(), "M0.00,0.00 Q50.00,-30.00 100.00,0.00");
    }

    #[test]
    fn test_cubic_svg_output() {
        let path = CurvePath::new(vec![
            PathSegment::MoveTo(Point::new(1.0, 2.0)),
            PathSegment::CubicTo {
                control1: Point::new(3.333, 4.0),
                control2: Point::new(5.0, 6.667),
                end: Point::new(7.0, 8.0),
            },
        ]);

        assert_eq!(
            path.to_svg_d(),
            "M1.00,2.00 C3.33,4.00 5.00,6.67 7.00,8.00"
        );
    }

    #[test]
    fn test_smooth_quadratic_svg_output() {
        let path = CurvePath::new(vec![
            PathSegment::MoveTo(Point::new(0.0, 0.0)),
            PathSegment::QuadraticTo {
                control: Point::new(25.0, -20.0),
                end: Point::new(50.0, 0.0),
            },
            PathSegment::SmoothQuadraticTo(Point::new(100.0, 0.0)),
        ]);

        assert_eq!(
            path.to_svg_d(),
            "M0.00,0.00 Q25.00,-20.00 50.00,0.00 T100.00,0.00"
        );
    }

    #[test]
    fn test_empty_path() {
        assert_eq!(CurvePath::default().to_svg_d(), "");
    }

    #[test]
    fn test_non_finite_detected() {
        let path = CurvePath::new(vec![
            PathSegment::MoveTo(Point::new(0.0, 0.0)),
            PathSegment::SmoothQuadraticTo(Point::new(f64::NAN, 0.0)),
        ]);
        assert!(!path.is_finite());
    }
}
