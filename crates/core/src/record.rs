//! A [`Surface`] that records draw calls instead of rasterizing them.
//!
//! Used as the canvas double in tests, and by the preview CLI to dump the
//! command list of the last drawn frame as JSON (`render --commands`).

use glam::DVec2;
use serde::Serialize;

use crate::color::Rgba;
use crate::error::VizError;
use crate::surface::{Stroke, Surface, TextStyle};

/// One recorded draw call.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum DrawCommand {
    Clear,
    FillRect {
        origin: DVec2,
        size: DVec2,
        color: Rgba,
    },
    StrokePolyline {
        points: Vec<DVec2>,
        stroke: Stroke,
    },
    FillCircle {
        center: DVec2,
        radius: f64,
        color: Rgba,
    },
    FillText {
        text: String,
        anchor: DVec2,
        style: TextStyle,
    },
}

/// In-memory surface that keeps every draw call since the last [`clear`](Surface::clear)
/// or [`take`](RecordingSurface::take).
#[derive(Debug, Clone, PartialEq)]
pub struct RecordingSurface {
    width: f64,
    height: f64,
    commands: Vec<DrawCommand>,
    draws: usize,
}

impl RecordingSurface {
    /// Creates an empty recorder of the given size.
    ///
    /// Returns `VizError::InvalidDimensions` unless both sides are finite and positive.
    pub fn new(width: f64, height: f64) -> Result<Self, VizError> {
        if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
            return Err(VizError::InvalidDimensions);
        }
        Ok(Self {
            width,
            height,
            commands: Vec::new(),
            draws: 0,
        })
    }

    /// Commands recorded since the last clear.
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Drains the recorded commands.
    pub fn take(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }

    /// Total number of draw calls ever made, including those since cleared.
    pub fn draw_count(&self) -> usize {
        self.draws
    }

    /// Text of every `FillText` command, in order.
    pub fn texts(&self) -> Vec<&str> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::FillText { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Every filled circle as `(center, radius)`, in order.
    pub fn circles(&self) -> Vec<(DVec2, f64)> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::FillCircle { center, radius, .. } => Some((*center, *radius)),
                _ => None,
            })
            .collect()
    }

    /// Every stroked polyline, in order.
    pub fn polylines(&self) -> Vec<&[DVec2]> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::StrokePolyline { points, .. } => Some(points.as_slice()),
                _ => None,
            })
            .collect()
    }

    fn push(&mut self, cmd: DrawCommand) {
        self.draws += 1;
        self.commands.push(cmd);
    }
}

impl Surface for RecordingSurface {
    fn width(&self) -> f64 {
        self.width
    }

    fn height(&self) -> f64 {
        self.height
    }

    fn clear(&mut self) {
        self.draws += 1;
        self.commands.clear();
        self.commands.push(DrawCommand::Clear);
    }

    fn fill_rect(&mut self, origin: DVec2, size: DVec2, color: Rgba) {
        self.push(DrawCommand::FillRect {
            origin,
            size,
            color,
        });
    }

    fn stroke_polyline(&mut self, points: &[DVec2], stroke: Stroke) {
        if points.len() < 2 {
            return;
        }
        self.push(DrawCommand::StrokePolyline {
            points: points.to_vec(),
            stroke,
        });
    }

    fn fill_circle(&mut self, center: DVec2, radius: f64, color: Rgba) {
        self.push(DrawCommand::FillCircle {
            center,
            radius,
            color,
        });
    }

    fn fill_text(&mut self, text: &str, anchor: DVec2, style: &TextStyle) {
        self.push(DrawCommand::FillText {
            text: text.to_owned(),
            anchor,
            style: style.clone(),
        });
    }
}
