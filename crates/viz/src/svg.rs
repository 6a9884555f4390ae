//! A [`Surface`] that builds an SVG document.
//!
//! Pure string building, always available; writing the document to disk
//! lives in [`crate::snapshot`].

use std::fmt::Write as _;

use villani_core::{DVec2, Rgba, Stroke, Surface, TextStyle, VizError};

/// Accumulates draw calls as SVG elements.
#[derive(Debug, Clone)]
pub struct SvgSurface {
    width: f64,
    height: f64,
    elements: Vec<String>,
}

/// Formats a coordinate with at most two decimals and no trailing zeros.
fn num(v: f64) -> String {
    let rounded = (v * 100.0).round() / 100.0;
    if rounded == 0.0 {
        // Avoid "-0".
        "0".to_string()
    } else {
        rounded.to_string()
    }
}

/// `fill="#rrggbb"` plus `fill-opacity` when translucent (same for `stroke`).
fn paint(attr: &str, color: Rgba) -> String {
    if color.a >= 1.0 {
        format!("{attr}=\"{}\"", color.to_hex())
    } else {
        format!("{attr}=\"{}\" {attr}-opacity=\"{}\"", color.to_hex(), color.a)
    }
}

fn escape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

impl SvgSurface {
    /// Creates an empty document of the given size.
    ///
    /// Returns `VizError::InvalidDimensions` unless both sides are finite and positive.
    pub fn new(width: f64, height: f64) -> Result<Self, VizError> {
        if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
            return Err(VizError::InvalidDimensions);
        }
        Ok(Self {
            width,
            height,
            elements: Vec::new(),
        })
    }

    /// Number of elements drawn since the last clear.
    pub fn element_count(&self) -> usize {
        self.elements.len()
    }

    /// Renders the complete SVG document.
    pub fn to_svg_string(&self) -> String {
        let (w, h) = (num(self.width), num(self.height));
        let mut out = format!(
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{w}\" height=\"{h}\" viewBox=\"0 0 {w} {h}\">\n"
        );
        for el in &self.elements {
            out.push_str("  ");
            out.push_str(el);
            out.push('\n');
        }
        out.push_str("</svg>\n");
        out
    }
}

impl Surface for SvgSurface {
    fn width(&self) -> f64 {
        self.width
    }

    fn height(&self) -> f64 {
        self.height
    }

    fn clear(&mut self) {
        self.elements.clear();
    }

    fn fill_rect(&mut self, origin: DVec2, size: DVec2, color: Rgba) {
        self.elements.push(format!(
            "<rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" {}/>",
            num(origin.x),
            num(origin.y),
            num(size.x),
            num(size.y),
            paint("fill", color)
        ));
    }

    fn stroke_polyline(&mut self, points: &[DVec2], stroke: Stroke) {
        if points.len() < 2 {
            return;
        }
        let mut coords = String::new();
        for (i, p) in points.iter().enumerate() {
            if i > 0 {
                coords.push(' ');
            }
            // Writing to a String cannot fail.
            let _ = write!(coords, "{},{}", num(p.x), num(p.y));
        }
        self.elements.push(format!(
            "<polyline points=\"{coords}\" fill=\"none\" {} stroke-width=\"{}\"/>",
            paint("stroke", stroke.color),
            num(stroke.width)
        ));
    }

    fn fill_circle(&mut self, center: DVec2, radius: f64, color: Rgba) {
        self.elements.push(format!(
            "<circle cx=\"{}\" cy=\"{}\" r=\"{}\" {}/>",
            num(center.x),
            num(center.y),
            num(radius),
            paint("fill", color)
        ));
    }

    fn fill_text(&mut self, text: &str, anchor: DVec2, style: &TextStyle) {
        let (x, y) = (num(anchor.x), num(anchor.y));
        let transform = if style.rotation == 0.0 {
            String::new()
        } else {
            format!(
                " transform=\"rotate({} {x} {y})\"",
                num(style.rotation.to_degrees())
            )
        };
        self.elements.push(format!(
            "<text x=\"{x}\" y=\"{y}\" font-size=\"{}\" font-family=\"{}\" {}{transform}>{}</text>",
            num(style.font.size_px),
            escape_text(&style.font.family),
            paint("fill", style.color),
            escape_text(text)
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use villani_core::Font;

    fn svg() -> SvgSurface {
        SvgSurface::new(600.0, 300.0).unwrap()
    }

    #[test]
    fn new_rejects_zero_size() {
        assert!(SvgSurface::new(0.0, 300.0).is_err());
    }

    #[test]
    fn empty_document_has_root_and_viewbox() {
        let doc = svg().to_svg_string();
        assert!(doc.starts_with("<svg xmlns=\"http://www.w3.org/2000/svg\""));
        assert!(doc.contains("viewBox=\"0 0 600 300\""));
        assert!(doc.trim_end().ends_with("</svg>"));
    }

    #[test]
    fn translucent_fill_uses_opacity_attribute() {
        let mut s = svg();
        s.fill_circle(DVec2::new(10.0, 20.0), 5.0, Rgba::rgba(231, 76, 60, 0.7));
        let doc = s.to_svg_string();
        assert!(doc.contains("<circle cx=\"10\" cy=\"20\" r=\"5\" fill=\"#e74c3c\" fill-opacity=\"0.7\"/>"));
    }

    #[test]
    fn polyline_lists_points() {
        let mut s = svg();
        s.stroke_polyline(
            &[DVec2::new(0.0, 0.0), DVec2::new(1.5, 2.25), DVec2::new(3.0, 4.0)],
            Stroke::new(Rgba::rgb(0, 0, 0), 2.0),
        );
        assert!(s
            .to_svg_string()
            .contains("points=\"0,0 1.5,2.25 3,4\" fill=\"none\" stroke=\"#000000\" stroke-width=\"2\""));
    }

    #[test]
    fn single_point_polyline_is_skipped() {
        let mut s = svg();
        s.stroke_polyline(&[DVec2::ONE], Stroke::new(Rgba::rgb(0, 0, 0), 1.0));
        assert_eq!(s.element_count(), 0);
    }

    #[test]
    fn text_is_escaped_and_rotation_becomes_transform() {
        let mut s = svg();
        let style = TextStyle::new(Font::arial(14.0), Rgba::rgb(0, 0, 0))
            .rotated(-std::f64::consts::FRAC_PI_2);
        s.fill_text("a<b & c", DVec2::new(20.0, 150.0), &style);
        let doc = s.to_svg_string();
        assert!(doc.contains(">a&lt;b &amp; c</text>"));
        assert!(doc.contains("transform=\"rotate(-90 20 150)\""));
    }

    #[test]
    fn clear_removes_previous_elements() {
        let mut s = svg();
        s.fill_background(Rgba::rgb(255, 255, 255));
        assert_eq!(s.element_count(), 1);
        s.clear();
        assert_eq!(s.element_count(), 0);
    }

    #[test]
    fn num_trims_and_rounds() {
        assert_eq!(num(60.0), "60");
        assert_eq!(num(1.23456), "1.23");
        assert_eq!(num(-0.001), "0");
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn num_stays_within_half_a_hundredth(v in -10_000.0f64..10_000.0) {
                let s = num(v);
                prop_assert!(!s.starts_with("-0") || s.starts_with("-0."), "negative zero: {s}");
                let parsed: f64 = s.parse().unwrap();
                prop_assert!((parsed - v).abs() <= 0.005 + 1e-9, "{v} formatted as {s}");
            }

            #[test]
            fn text_never_breaks_out_of_its_element(text in ".{0,40}") {
                let mut s = svg();
                s.fill_text(&text, DVec2::ZERO, &TextStyle::new(Font::arial(12.0), Rgba::rgb(0, 0, 0)));
                let doc = s.to_svg_string();
                prop_assert_eq!(doc.matches("</text>").count(), 1);
                prop_assert_eq!(doc.matches("<text").count(), 1);
            }
        }
    }
}
