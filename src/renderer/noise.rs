//! Curve and dot noise laid over the glyphs
//!
//! Generation is best-effort: a curve or dot whose position cannot be drawn is
//! left out, so callers get at most `count` elements back. Single values
//! (stroke width, radius, control offsets) fall back to fixed defaults.

use crate::geometry::{inverse_square_normal, Point};
use crate::palette::Palette;
use crate::random::{RandomError, RandomSource};

use super::document::{Curve, CurveFamily, Dot};
use super::path::{CurvePath, PathSegment};

/// Tunable magnitudes for noise generation
#[derive(Debug, Clone, PartialEq)]
pub struct NoiseSynthesizer {
    /// Stroke width range for curves, `[low, high)`
    pub stroke_width: (f64, f64),
    /// Stroke width used when the draw fails
    pub fallback_stroke_width: f64,
    /// Radius range for dots, `[low, high)`
    pub dot_radius: (f64, f64),
    /// Radius used when the draw fails
    pub fallback_dot_radius: f64,
    /// Quadratic control offset as a fraction of the canvas size
    pub quadratic_spread: f64,
    /// Cubic control offsets as a fraction of the canvas size
    pub cubic_spread: f64,
    /// Displacement range for wave points, `[low, high)`
    pub wave_amplitude: (f64, f64),
    /// Number of sub-segments in a wave
    pub wave_segments: usize,
}

impl Default for NoiseSynthesizer {
    fn default() -> Self {
        Self {
            stroke_width: (0.5, 2.0),
            fallback_stroke_width: 1.0,
            dot_radius: (1.0, 4.0),
            fallback_dot_radius: 2.0,
            quadratic_spread: 0.3,
            cubic_spread: 0.2,
            wave_amplitude: (10.0, 30.0),
            wave_segments: 3,
        }
    }
}

impl NoiseSynthesizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Generate up to `count` random curves spanning the canvas
    pub fn generate_curves(
        &self,
        count: usize,
        width: u32,
        height: u32,
        palette: &Palette,
        rng: &mut dyn RandomSource,
    ) -> Vec<Curve> {
        let (w, h) = (f64::from(width), f64::from(height));
        let mut curves = Vec::with_capacity(count);

        for _ in 0..count {
            let Ok((start, end)) = random_segment(w, h, rng) else {
                continue;
            };

            let stroke_width = rng
                .float_in(self.stroke_width.0, self.stroke_width.1)
                .unwrap_or(self.fallback_stroke_width);

            let family = rng
                .int_below(CurveFamily::ALL.len())
                .map(CurveFamily::from_index)
                .unwrap_or(CurveFamily::Quadratic);

            let path = self.curve_path(family, start, end, w, h, rng);

            curves.push(Curve {
                family,
                path,
                stroke: palette.random_noise_color(rng).to_string(),
                stroke_width,
            });
        }

        curves
    }

    /// Generate up to `count` random dots inside the canvas
    pub fn generate_dots(
        &self,
        count: usize,
        width: u32,
        height: u32,
        palette: &Palette,
        rng: &mut dyn RandomSource,
    ) -> Vec<Dot> {
        let (w, h) = (f64::from(width), f64::from(height));
        let mut dots = Vec::with_capacity(count);

        for _ in 0..count {
            let Ok(center) = random_point(w, h, rng) else {
                continue;
            };

            let radius = rng
                .float_in(self.dot_radius.0, self.dot_radius.1)
                .unwrap_or(self.fallback_dot_radius);

            dots.push(Dot {
                center,
                radius,
                fill: palette.random_noise_color(rng).to_string(),
            });
        }

        dots
    }

    /// Build the path for one curve family between two points
    pub fn curve_path(
        &self,
        family: CurveFamily,
        start: Point,
        end: Point,
        width: f64,
        height: f64,
        rng: &mut dyn RandomSource,
    ) -> CurvePath {
        match family {
            CurveFamily::Quadratic => {
                let (sx, sy) = (width * self.quadratic_spread, height * self.quadratic_spread);
                let control = start
                    .midpoint(end)
                    .offset(spread(sx, rng), spread(sy, rng));
                CurvePath::new(vec![
                    PathSegment::MoveTo(start),
                    PathSegment::QuadraticTo { control, end },
                ])
            }
            CurveFamily::Cubic => {
                let (sx, sy) = (width * self.cubic_spread, height * self.cubic_spread);
                let control1 = start
                    .lerp(end, 1.0 / 3.0)
                    .offset(spread(sx, rng), spread(sy, rng));
                let control2 = start
                    .lerp(end, 2.0 / 3.0)
                    .offset(spread(sx, rng), spread(sy, rng));
                CurvePath::new(vec![
                    PathSegment::MoveTo(start),
                    PathSegment::CubicTo {
                        control1,
                        control2,
                        end,
                    },
                ])
            }
            CurveFamily::Wave => self.wave_path(start, end, rng),
        }
    }

    /// Chain of quadratic segments whose interior points swing to alternating
    /// sides of the start -> end line
    fn wave_path(&self, start: Point, end: Point, rng: &mut dyn RandomSource) -> CurvePath {
        let segments = self.wave_segments.max(1);
        let normal = inverse_square_normal(start, end);
        let mut path = vec![PathSegment::MoveTo(start)];

        for i in 1..=segments {
            let t = i as f64 / segments as f64;
            let mut point = start.lerp(end, t);

            let amplitude = rng
                .float_in(self.wave_amplitude.0, self.wave_amplitude.1)
                .unwrap_or(0.0);
            let displacement = if i % 2 == 0 { amplitude } else { -amplitude };

            // zero-length segments have no perpendicular, the point stays on the line
            if let Some(n) = normal {
                point = point.offset(n.x * displacement, n.y * displacement);
            }

            if i == 1 {
                path.push(PathSegment::QuadraticTo {
                    control: point,
                    end: start.midpoint(end),
                });
            } else {
                path.push(PathSegment::SmoothQuadraticTo(point));
            }
        }

        CurvePath::new(path)
    }
}

fn random_point(width: f64, height: f64, rng: &mut dyn RandomSource) -> Result<Point, RandomError> {
    let x = rng.float_in(0.0, width)?;
    let y = rng.float_in(0.0, height)?;
    Ok(Point::new(x, y))
}

fn random_segment(
    width: f64,
    height: f64,
    rng: &mut dyn RandomSource,
) -> Result<(Point, Point), RandomError> {
    let start = random_point(width, height, rng)?;
    let end = random_point(width, height, rng)?;
    Ok((start, end))
}

/// Offset in `[-extent, extent)`, zero when the draw fails
fn spread(extent: f64, rng: &mut dyn RandomSource) -> f64 {
    rng.float_in(-extent, extent).unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::testing::{FailingSource, ScriptedSource};
    use crate::random::RngSource;
    use pretty_assertions::assert_eq;

    fn palette() -> Palette {
        Palette::new(true, "#f0f0f0")
    }

    #[test]
    fn test_quadratic_curve_from_script() {
        // start (10, 10), end (90, 40), stroke 1.25, family 0, offsets 0, colour 0
        let mut rng = ScriptedSource::new(&[0.1, 0.2, 0.9, 0.8, 0.5, 0.0, 0.5, 0.5, 0.0]);
        let curves = NoiseSynthesizer::new().generate_curves(1, 100, 50, &palette(), &mut rng);

        assert_eq!(curves.len(), 1);
        let curve = &curves[0];
        assert_eq!(curve.family, CurveFamily::Quadratic);
        assert_eq!(curve.path.to_svg_d(), "M10.00,10.00 Q50.00,25.00 90.00,40.00");
        assert_eq!(curve.stroke, "#bdc3c7");
        assert!((curve.stroke_width - 1.25).abs() < 1e-12);
        assert_eq!(rng.remaining(), 0);
    }

    #[test]
    fn test_cubic_curve_from_script() {
        // start (0, 0), end (90, 30), family 1, all four offsets 0
        let mut rng =
            ScriptedSource::new(&[0.0, 0.0, 0.9, 0.6, 0.0, 0.5, 0.5, 0.5, 0.5, 0.5, 0.0]);
        let curves = NoiseSynthesizer::new().generate_curves(1, 100, 50, &palette(), &mut rng);

        assert_eq!(curves[0].family, CurveFamily::Cubic);
        assert_eq!(
            curves[0].path.to_svg_d(),
            "M0.00,0.00 C30.00,10.00 60.00,20.00 90.00,30.00"
        );
    }

    #[test]
    fn test_wave_curve_alternates_sides() {
        // horizontal segment (0, 10) -> (90, 10), amplitude 20 for every point;
        // the normal is (0, 1/90) so displacements are -2/9, +2/9, -2/9
        let mut rng =
            ScriptedSource::new(&[0.0, 0.2, 0.9, 0.2, 0.0, 0.9, 0.5, 0.5, 0.5, 0.0]);
        let curves = NoiseSynthesizer::new().generate_curves(1, 100, 50, &palette(), &mut rng);

        assert_eq!(curves[0].family, CurveFamily::Wave);
        assert_eq!(
            curves[0].path.to_svg_d(),
            "M0.00,10.00 Q30.00,9.78 45.00,10.00 T60.00,10.22 T90.00,9.78"
        );
    }

    #[test]
    fn test_wave_zero_length_segment_has_no_offset() {
        let p = Point::new(20.0, 20.0);
        let mut rng = ScriptedSource::new(&[0.5, 0.5, 0.5]);
        let path =
            NoiseSynthesizer::new().curve_path(CurveFamily::Wave, p, p, 100.0, 50.0, &mut rng);
        assert!(path.is_finite());
        assert_eq!(
            path.to_svg_d(),
            "M20.00,20.00 Q20.00,20.00 20.00,20.00 T20.00,20.00 T20.00,20.00"
        );
    }

    #[test]
    fn test_failed_offsets_fall_back_to_zero() {
        let path = NoiseSynthesizer::new().curve_path(
            CurveFamily::Quadratic,
            Point::new(0.0, 0.0),
            Point::new(100.0, 50.0),
            100.0,
            50.0,
            &mut FailingSource,
        );
        assert_eq!(path.to_svg_d(), "M0.00,0.00 Q50.00,25.00 100.00,50.00");
    }

    #[test]
    fn test_failed_coordinates_skip_curve() {
        // first curve loses its end y, the source is then exhausted
        let mut rng = ScriptedSource::new(&[0.1, 0.2, 0.3]);
        let curves = NoiseSynthesizer::new().generate_curves(2, 100, 50, &palette(), &mut rng);
        assert!(curves.is_empty());

        let curves =
            NoiseSynthesizer::new().generate_curves(5, 100, 50, &palette(), &mut FailingSource);
        assert!(curves.is_empty());
    }

    #[test]
    fn test_failed_stroke_and_family_fall_back() {
        // coordinates succeed, everything afterwards fails
        let mut rng = ScriptedSource::new(&[0.0, 0.0, 0.5, 0.5]);
        let curves = NoiseSynthesizer::new().generate_curves(1, 100, 50, &palette(), &mut rng);
        assert_eq!(curves.len(), 1);
        assert_eq!(curves[0].stroke_width, 1.0);
        assert_eq!(curves[0].family, CurveFamily::Quadratic);
        assert_eq!(curves[0].stroke, "#bdc3c7");
    }

    #[test]
    fn test_curve_bounds_with_seeded_source() {
        let mut rng = RngSource::seeded(11);
        let palette = palette();
        let curves = NoiseSynthesizer::new().generate_curves(200, 150, 50, &palette, &mut rng);

        assert_eq!(curves.len(), 200);
        for curve in &curves {
            assert!((0.5..2.0).contains(&curve.stroke_width));
            assert!(palette.noise_colors().contains(&curve.stroke));
            assert!(curve.path.is_finite());
            let PathSegment::MoveTo(start) = curve.path.segments[0] else {
                panic!("curve must start with a move");
            };
            assert!((0.0..150.0).contains(&start.x));
            assert!((0.0..50.0).contains(&start.y));
        }
        for family in CurveFamily::ALL {
            assert!(curves.iter().any(|c| c.family == family), "{:?}", family);
        }
    }

    #[test]
    fn test_dot_bounds_with_seeded_source() {
        let mut rng = RngSource::seeded(12);
        let dots = NoiseSynthesizer::new().generate_dots(100, 150, 50, &palette(), &mut rng);

        assert_eq!(dots.len(), 100);
        for dot in &dots {
            assert!((1.0..4.0).contains(&dot.radius));
            assert!((0.0..150.0).contains(&dot.center.x));
            assert!((0.0..50.0).contains(&dot.center.y));
        }
    }

    #[test]
    fn test_dots_skip_and_fallback() {
        // dot 1: centre ok, radius fails -> 2.0; dot 2: no centre -> skipped
        let mut rng = ScriptedSource::new(&[0.5, 0.5]);
        let dots = NoiseSynthesizer::new().generate_dots(2, 100, 50, &palette(), &mut rng);
        assert_eq!(dots.len(), 1);
        assert_eq!(dots[0].center, Point::new(50.0, 25.0));
        assert_eq!(dots[0].radius, 2.0);
    }

    #[test]
    fn test_zero_count() {
        let mut rng = RngSource::seeded(1);
        let synth = NoiseSynthesizer::new();
        assert!(synth.generate_curves(0, 100, 50, &palette(), &mut rng).is_empty());
        assert!(synth.generate_dots(0, 100, 50, &palette(), &mut rng).is_empty());
    }
}
