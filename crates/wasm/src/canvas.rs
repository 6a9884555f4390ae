//! [`Surface`] over a 2D canvas context.

use std::f64::consts::TAU;

use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};
use villani_core::{DVec2, Rgba, Stroke, Surface, TextStyle};

use crate::dom;

pub struct WebCanvas {
    ctx: CanvasRenderingContext2d,
    width: f64,
    height: f64,
}

impl WebCanvas {
    /// Looks up a canvas by element id. `None` when the element is missing,
    /// is not a canvas, or has no 2D context.
    pub fn by_id(id: &str) -> Option<Self> {
        let canvas: HtmlCanvasElement = dom::element_by_id(id)?;
        Self::from_canvas(&canvas)
    }

    pub fn from_canvas(canvas: &HtmlCanvasElement) -> Option<Self> {
        let ctx = canvas
            .get_context("2d")
            .ok()??
            .dyn_into::<CanvasRenderingContext2d>()
            .ok()?;
        Some(Self {
            ctx,
            width: f64::from(canvas.width()),
            height: f64::from(canvas.height()),
        })
    }
}

impl Surface for WebCanvas {
    fn width(&self) -> f64 {
        self.width
    }

    fn height(&self) -> f64 {
        self.height
    }

    fn clear(&mut self) {
        self.ctx.clear_rect(0.0, 0.0, self.width, self.height);
    }

    fn fill_rect(&mut self, origin: DVec2, size: DVec2, color: Rgba) {
        self.ctx.set_fill_style_str(&color.to_css());
        self.ctx.fill_rect(origin.x, origin.y, size.x, size.y);
    }

    fn stroke_polyline(&mut self, points: &[DVec2], stroke: Stroke) {
        let [first, rest @ ..] = points else {
            return;
        };
        if rest.is_empty() {
            return;
        }
        self.ctx.begin_path();
        self.ctx.move_to(first.x, first.y);
        for p in rest {
            self.ctx.line_to(p.x, p.y);
        }
        self.ctx.set_stroke_style_str(&stroke.color.to_css());
        self.ctx.set_line_width(stroke.width);
        self.ctx.stroke();
    }

    fn fill_circle(&mut self, center: DVec2, radius: f64, color: Rgba) {
        self.ctx.begin_path();
        if self.ctx.arc(center.x, center.y, radius, 0.0, TAU).is_err() {
            return;
        }
        self.ctx.set_fill_style_str(&color.to_css());
        self.ctx.fill();
    }

    fn fill_text(&mut self, text: &str, anchor: DVec2, style: &TextStyle) {
        self.ctx.set_font(&style.font.to_css());
        self.ctx.set_fill_style_str(&style.color.to_css());
        if style.rotation == 0.0 {
            self.ctx.fill_text(text, anchor.x, anchor.y).ok();
            return;
        }
        self.ctx.save();
        self.ctx.translate(anchor.x, anchor.y).ok();
        self.ctx.rotate(style.rotation).ok();
        self.ctx.fill_text(text, 0.0, 0.0).ok();
        self.ctx.restore();
    }
}
