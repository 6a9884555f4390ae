//! The drawing capability a visualizer renders onto.
//!
//! [`Surface`] is the subset of a 2D canvas context the visualizers need:
//! clear, filled rectangles, stroked polylines, filled circles and text.
//! The browser binding implements it over `CanvasRenderingContext2d`, the
//! preview CLI over SVG, and tests over [`RecordingSurface`](crate::record::RecordingSurface).

use glam::DVec2;
use serde::Serialize;

use crate::color::Rgba;

/// Font description in canvas shorthand terms (`"16px Arial"`).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Font {
    pub size_px: f64,
    pub family: String,
}

impl Font {
    pub fn new(size_px: f64, family: impl Into<String>) -> Self {
        Self {
            size_px,
            family: family.into(),
        }
    }

    /// Arial at the given pixel size.
    pub fn arial(size_px: f64) -> Self {
        Self::new(size_px, "Arial")
    }

    /// CSS font shorthand, e.g. `"16px Arial"`.
    pub fn to_css(&self) -> String {
        format!("{}px {}", self.size_px, self.family)
    }
}

/// Fill color, font and rotation for a text draw.
///
/// `rotation` is in radians, applied around the text anchor.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextStyle {
    pub font: Font,
    pub color: Rgba,
    pub rotation: f64,
}

impl TextStyle {
    pub fn new(font: Font, color: Rgba) -> Self {
        Self {
            font,
            color,
            rotation: 0.0,
        }
    }

    pub fn rotated(mut self, radians: f64) -> Self {
        self.rotation = radians;
        self
    }
}

/// Stroke color and line width.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Stroke {
    pub color: Rgba,
    pub width: f64,
}

impl Stroke {
    pub fn new(color: Rgba, width: f64) -> Self {
        Self { color, width }
    }
}

/// A 2D drawing target exclusively owned by one visualizer.
///
/// Coordinates are in pixels with the origin at the top-left corner.
pub trait Surface {
    /// Surface width in pixels.
    fn width(&self) -> f64;

    /// Surface height in pixels.
    fn height(&self) -> f64;

    /// Erases everything drawn so far.
    fn clear(&mut self);

    /// Fills an axis-aligned rectangle.
    fn fill_rect(&mut self, origin: DVec2, size: DVec2, color: Rgba);

    /// Strokes an open polyline through `points`. Fewer than two points draw nothing.
    fn stroke_polyline(&mut self, points: &[DVec2], stroke: Stroke);

    /// Fills a circle.
    fn fill_circle(&mut self, center: DVec2, radius: f64, color: Rgba);

    /// Draws `text` with its baseline-left corner at `anchor`.
    fn fill_text(&mut self, text: &str, anchor: DVec2, style: &TextStyle);

    /// Strokes a single straight segment.
    fn stroke_line(&mut self, from: DVec2, to: DVec2, stroke: Stroke) {
        self.stroke_polyline(&[from, to], stroke);
    }

    /// Fills the whole surface with `color`.
    fn fill_background(&mut self, color: Rgba) {
        let size = DVec2::new(self.width(), self.height());
        self.fill_rect(DVec2::ZERO, size, color);
    }
}

impl<S: Surface + ?Sized> Surface for Box<S> {
    fn width(&self) -> f64 {
        (**self).width()
    }

    fn height(&self) -> f64 {
        (**self).height()
    }

    fn clear(&mut self) {
        (**self).clear();
    }

    fn fill_rect(&mut self, origin: DVec2, size: DVec2, color: Rgba) {
        (**self).fill_rect(origin, size, color);
    }

    fn stroke_polyline(&mut self, points: &[DVec2], stroke: Stroke) {
        (**self).stroke_polyline(points, stroke);
    }

    fn fill_circle(&mut self, center: DVec2, radius: f64, color: Rgba) {
        (**self).fill_circle(center, radius, color);
    }

    fn fill_text(&mut self, text: &str, anchor: DVec2, style: &TextStyle) {
        (**self).fill_text(text, anchor, style);
    }
}
