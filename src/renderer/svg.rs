//! SVG serialization of a captcha document tree

use crate::error::CaptchaError;
use crate::geometry::RotationTransform;

use super::document::{Canvas, Curve, Dot, Glyph, Rect};
use super::OutputConfig;

const SVG_NAMESPACE: &str = "http://www.w3.org/2000/svg";

/// Build SVG elements incrementally
pub struct SvgBuilder {
    config: OutputConfig,
    width: u32,
    height: u32,
    view_box: String,
    elements: Vec<String>,
}

impl SvgBuilder {
    /// Create a new SVG builder for a root element of the given size
    pub fn new(config: OutputConfig, width: u32, height: u32, view_box: impl Into<String>) -> Self {
        Self {
            config,
            width,
            height,
            view_box: view_box.into(),
            elements: vec![],
        }
    }

    fn indent_str(&self) -> &'static str {
        if self.config.pretty_print {
            "  "
        } else {
            ""
        }
    }

    fn newline(&self) -> &'static str {
        if self.config.pretty_print {
            "\n"
        } else {
            ""
        }
    }

    /// Add a rectangle element
    pub fn add_rect(&mut self, rect: &Rect) {
        self.elements.push(format!(
            r#"{}<rect x="{}" y="{}" width="{}" height="{}" fill="{}"/>"#,
            self.indent_str(),
            format_coord(rect.x),
            format_coord(rect.y),
            format_coord(rect.width),
            format_coord(rect.height),
            escape_xml(&rect.fill)
        ));
    }

    /// Add a single-character text element
    pub fn add_glyph(&mut self, glyph: &Glyph) {
        let transform = glyph
            .rotation
            .map(|r| format!(r#" transform="{}""#, format_rotation(&r)))
            .unwrap_or_default();

        self.elements.push(format!(
            r#"{}<text x="{}" y="{}" fill="{}" font-size="{}" font-family="{}"{}>{}</text>"#,
            self.indent_str(),
            format_coord(glyph.position.x),
            format_coord(glyph.position.y),
            escape_xml(&glyph.fill),
            glyph.font_size,
            escape_xml(&glyph.font_family),
            transform,
            escape_xml(&glyph.character.to_string())
        ));
    }

    /// Add an unfilled noise path
    pub fn add_curve(&mut self, curve: &Curve) {
        self.elements.push(format!(
            r#"{}<path d="{}" fill="none" stroke="{}" stroke-width="{}"/>"#,
            self.indent_str(),
            curve.path.to_svg_d(),
            escape_xml(&curve.stroke),
            format_stroke_width(curve.stroke_width)
        ));
    }

    /// Add a filled noise circle
    pub fn add_dot(&mut self, dot: &Dot) {
        self.elements.push(format!(
            r#"{}<circle cx="{}" cy="{}" r="{}" fill="{}"/>"#,
            self.indent_str(),
            format_coord(dot.center.x),
            format_coord(dot.center.y),
            format_coord(dot.radius),
            escape_xml(&dot.fill)
        ));
    }

    /// Build the final SVG string
    pub fn build(self) -> String {
        let nl = self.newline();

        let mut svg = String::new();

        if self.config.xml_declaration {
            svg.push_str(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
            svg.push_str(nl);
        }

        svg.push_str(&format!(
            r#"<svg width="{}" height="{}" viewBox="{}" xmlns="{}">"#,
            self.width,
            self.height,
            escape_xml(&self.view_box),
            SVG_NAMESPACE
        ));
        svg.push_str(nl);

        // Painter's order: whatever was added last is drawn on top
        for elem in &self.elements {
            svg.push_str(elem);
            svg.push_str(nl);
        }

        svg.push_str("</svg>");

        svg
    }
}

/// Serialize a document tree as background, glyphs, curves, dots
pub fn render_canvas(canvas: &Canvas, config: &OutputConfig) -> Result<String, CaptchaError> {
    check_geometry(canvas)?;

    let mut builder = SvgBuilder::new(
        config.clone(),
        canvas.width,
        canvas.height,
        canvas.view_box.clone(),
    );

    if let Some(background) = &canvas.background {
        builder.add_rect(background);
    }
    for glyph in &canvas.glyphs {
        builder.add_glyph(glyph);
    }
    for curve in &canvas.curves {
        builder.add_curve(curve);
    }
    for dot in &canvas.dots {
        builder.add_dot(dot);
    }

    Ok(builder.build())
}

/// Reject trees that would serialize to invalid attribute values
fn check_geometry(canvas: &Canvas) -> Result<(), CaptchaError> {
    if canvas.width == 0 || canvas.height == 0 {
        return Err(CaptchaError::rendering(format!(
            "canvas size {}x{} is empty",
            canvas.width, canvas.height
        )));
    }
    for (i, glyph) in canvas.glyphs.iter().enumerate() {
        if !glyph.position.is_finite() || !glyph.rotation.map_or(true, |r| r.is_finite()) {
            return Err(CaptchaError::rendering(format!(
                "glyph {} ('{}') has a non-finite position or rotation",
                i, glyph.character
            )));
        }
    }
    for (i, curve) in canvas.curves.iter().enumerate() {
        if !curve.path.is_finite() || !is_valid_length(curve.stroke_width) {
            return Err(CaptchaError::rendering(format!(
                "curve {} has non-finite geometry",
                i
            )));
        }
    }
    for (i, dot) in canvas.dots.iter().enumerate() {
        if !dot.center.is_finite() || !is_valid_length(dot.radius) {
            return Err(CaptchaError::rendering(format!(
                "dot {} has non-finite geometry",
                i
            )));
        }
    }
    Ok(())
}

fn is_valid_length(v: f64) -> bool {
    v.is_finite() && v >= 0.0
}

/// `rotate(a cx cy)` with the pivot rounded like element coordinates
fn format_rotation(rotation: &RotationTransform) -> String {
    format!(
        "rotate({:.1} {} {})",
        rotation.angle_degrees,
        format_coord(rotation.center.x),
        format_coord(rotation.center.y)
    )
}

/// Round to two decimals without trailing zeros
fn format_coord(v: f64) -> String {
    format_rounded(v, 100.0)
}

/// Stroke widths keep four decimals
fn format_stroke_width(v: f64) -> String {
    format_rounded(v, 10_000.0)
}

fn format_rounded(v: f64, scale: f64) -> String {
    let rounded = (v * scale).round() / scale;
    // avoid "-0"
    if rounded == 0.0 {
        "0".to_string()
    } else {
        rounded.to_string()
    }
}

/// Escape special XML characters
fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
