//! In-memory document tree for one captcha image
//!
//! Sequences are kept in construction order; later elements paint over
//! earlier ones. The serializer walks background, glyphs, curves, dots.

use crate::geometry::{Point, RotationTransform};

use super::path::CurvePath;

/// Background rectangle
#[derive(Debug, Clone, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub fill: String,
}

/// One positioned, coloured, rotated character
#[derive(Debug, Clone, PartialEq)]
pub struct Glyph {
    pub position: Point,
    pub fill: String,
    pub font_size: u32,
    pub font_family: String,
    /// `None` when no rotation was drawn
    pub rotation: Option<RotationTransform>,
    pub character: char,
}

/// Shape family of a noise curve
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CurveFamily {
    /// Single control point near the midpoint
    Quadratic,
    /// Two control points near the thirds
    Cubic,
    /// Alternating perpendicular displacement over several sub-segments
    Wave,
}

impl CurveFamily {
    pub const ALL: [CurveFamily; 3] = [
        CurveFamily::Quadratic,
        CurveFamily::Cubic,
        CurveFamily::Wave,
    ];

    /// Family for a draw in `0..3`; anything else maps to `Quadratic`
    pub fn from_index(index: usize) -> Self {
        match index {
            1 => CurveFamily::Cubic,
            2 => CurveFamily::Wave,
            _ => CurveFamily::Quadratic,
        }
    }
}

/// A noise stroke drawn over the glyphs
#[derive(Debug, Clone, PartialEq)]
pub struct Curve {
    pub family: CurveFamily,
    pub path: CurvePath,
    pub stroke: String,
    pub stroke_width: f64,
}

/// A filled noise dot
#[derive(Debug, Clone, PartialEq)]
pub struct Dot {
    pub center: Point,
    pub radius: f64,
    pub fill: String,
}

/// Root of the document tree
#[derive(Debug, Clone, PartialEq)]
pub struct Canvas {
    pub width: u32,
    pub height: u32,
    pub view_box: String,
    pub background: Option<Rect>,
    pub glyphs: Vec<Glyph>,
    pub curves: Vec<Curve>,
    pub dots: Vec<Dot>,
}

impl Canvas {
    /// Empty canvas with a `0 0 w h` viewport and no background
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            view_box: format!("0 0 {} {}", width, height),
            background: None,
            glyphs: vec![],
            curves: vec![],
            dots: vec![],
        }
    }

    /// Cover the full canvas with a background fill
    pub fn set_background(&mut self, fill: impl Into<String>) {
        self.background = Some(Rect {
            x: 0.0,
            y: 0.0,
            width: f64::from(self.width),
            height: f64::from(self.height),
            fill: fill.into(),
        });
    }

    /// The characters of all glyphs, left to right
    pub fn glyph_text(&self) -> String {
        self.glyphs.iter().map(|g| g.character).collect()
    }
}
