#![deny(unsafe_code)]
//! Point-cloud transport animation.
//!
//! Two clouds of points (source and target) are sampled once. Each frame
//! advances a progress scalar and moves every source point toward its paired
//! target point along a straight line, reparameterized by a cubic ease-in-out
//! curve. No transport problem is solved: the pairing is simply by index.

use serde_json::{json, Value};
use tracing::debug;
use villani_core::params::{param_f64, param_usize};
use villani_core::{
    eased_positions, Animation, DVec2, Font, FrameOutcome, Rgba, Stroke, Surface, TextStyle,
    VizError, Xorshift64,
};

/// Default number of points per cloud.
const DEFAULT_POINT_COUNT: usize = 30;
/// Default half-width of the square window each cloud is sampled from.
const DEFAULT_SPREAD: f64 = 40.0;
const DEFAULT_SOURCE_CENTER: DVec2 = DVec2::new(150.0, 150.0);
const DEFAULT_TARGET_CENTER: DVec2 = DVec2::new(450.0, 150.0);
/// Default progress increment per frame.
const DEFAULT_STEP: f64 = 0.01;
const MIN_STEP: f64 = 0.001;
const MAX_STEP: f64 = 0.5;
/// Upper bound on points per cloud.
const MAX_POINT_COUNT: usize = 1000;

const BACKGROUND: Rgba = Rgba::rgb(0xf8, 0xf9, 0xfa);
const TRAJECTORY: Rgba = Rgba {
    r: 52,
    g: 152,
    b: 219,
    a: 0.3,
};
const POINT: Rgba = Rgba {
    r: 231,
    g: 76,
    b: 60,
    a: 0.7,
};
const LABEL: Rgba = Rgba::rgb(0x2c, 0x3e, 0x50);
const POINT_RADIUS: f64 = 5.0;

const SOURCE_LABEL: &str = "初期分布";
const TARGET_LABEL: &str = "最終分布";

/// Tunable parameters for the transport animation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransportParams {
    /// Points per cloud.
    pub point_count: usize,
    /// Half-width of the square sampling window around each center.
    pub spread: f64,
    pub source_center: DVec2,
    pub target_center: DVec2,
    /// Progress added per frame.
    pub step: f64,
}

impl Default for TransportParams {
    fn default() -> Self {
        Self {
            point_count: DEFAULT_POINT_COUNT,
            spread: DEFAULT_SPREAD,
            source_center: DEFAULT_SOURCE_CENTER,
            target_center: DEFAULT_TARGET_CENTER,
            step: DEFAULT_STEP,
        }
    }
}

impl TransportParams {
    /// Extracts parameters from a JSON object, falling back to defaults.
    ///
    /// `point_count` is capped at 1000. A `step` that is not a positive
    /// number falls back to the default; any other step is clamped to
    /// [0.001, 0.5] so progress keeps moving forward through [0, 1].
    pub fn from_json(params: &Value) -> Self {
        let step = param_f64(params, "step", DEFAULT_STEP);
        let step = if step.is_finite() && step > 0.0 {
            step.clamp(MIN_STEP, MAX_STEP)
        } else {
            DEFAULT_STEP
        };
        Self {
            point_count: param_usize(params, "point_count", DEFAULT_POINT_COUNT)
                .min(MAX_POINT_COUNT),
            spread: param_f64(params, "spread", DEFAULT_SPREAD),
            source_center: DVec2::new(
                param_f64(params, "source_x", DEFAULT_SOURCE_CENTER.x),
                param_f64(params, "source_y", DEFAULT_SOURCE_CENTER.y),
            ),
            target_center: DVec2::new(
                param_f64(params, "target_x", DEFAULT_TARGET_CENTER.x),
                param_f64(params, "target_y", DEFAULT_TARGET_CENTER.y),
            ),
            step,
        }
    }
}

/// Samples `n` points uniformly from the square `center ± spread`.
///
/// Each coordinate is drawn independently and uniformly; the cloud is a
/// square patch, not a Gaussian blob.
pub fn generate_uniform_points(
    rng: &mut Xorshift64,
    n: usize,
    center: DVec2,
    spread: f64,
) -> Vec<DVec2> {
    (0..n)
        .map(|_| {
            let x = rng.next_range(center.x - spread, center.x + spread);
            let y = rng.next_range(center.y - spread, center.y + spread);
            DVec2::new(x, y)
        })
        .collect()
}

/// Text of the progress readout, e.g. `"進行度: 42%"`.
pub fn progress_label(progress: f64) -> String {
    format!("進行度: {}%", (progress * 100.0).round() as i64)
}

/// Animates a source point cloud flowing onto a target point cloud.
pub struct TransportVisualizer<S> {
    surface: S,
    source: Vec<DVec2>,
    target: Vec<DVec2>,
    progress: f64,
    params: TransportParams,
}

impl<S: Surface> TransportVisualizer<S> {
    /// Creates a visualizer whose clouds are sampled from a PRNG seeded with `seed`.
    pub fn new(surface: S, seed: u64, params: TransportParams) -> Self {
        let mut rng = Xorshift64::new(seed);
        let source =
            generate_uniform_points(&mut rng, params.point_count, params.source_center, params.spread);
        let target =
            generate_uniform_points(&mut rng, params.point_count, params.target_center, params.spread);
        Self {
            surface,
            source,
            target,
            progress: 0.0,
            params,
        }
    }

    /// Creates a visualizer from a JSON params object.
    pub fn from_json(surface: S, seed: u64, json_params: &Value) -> Self {
        Self::new(surface, seed, TransportParams::from_json(json_params))
    }

    /// Creates a visualizer over explicit point clouds.
    ///
    /// Returns `VizError::PointSetMismatch` if the clouds differ in length.
    /// `params.point_count` is overwritten with the cloud length.
    pub fn with_points(
        surface: S,
        source: Vec<DVec2>,
        target: Vec<DVec2>,
        mut params: TransportParams,
    ) -> Result<Self, VizError> {
        if source.len() != target.len() {
            return Err(VizError::PointSetMismatch {
                source_len: source.len(),
                target_len: target.len(),
            });
        }
        params.point_count = source.len();
        Ok(Self {
            surface,
            source,
            target,
            progress: 0.0,
            params,
        })
    }

    /// Current progress in [0, 1].
    pub fn progress(&self) -> f64 {
        self.progress
    }

    pub fn source(&self) -> &[DVec2] {
        &self.source
    }

    pub fn target(&self) -> &[DVec2] {
        &self.target
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// Consumes the visualizer and returns its surface.
    pub fn into_surface(self) -> S {
        self.surface
    }

    /// Interpolated positions for the current progress.
    pub fn positions(&self) -> Vec<DVec2> {
        eased_positions(&self.source, &self.target, self.progress)
    }

    /// Moves progress forward by one step, wrapping to 0 once it passes 1.
    pub fn advance(&mut self) {
        self.progress += self.params.step;
        if self.progress > 1.0 {
            self.progress = 0.0;
            debug!("transport progress wrapped");
        }
    }

    /// Jumps to an arbitrary progress value, clamped to [0, 1]. Does not redraw.
    pub fn set_progress(&mut self, progress: f64) {
        self.progress = progress.clamp(0.0, 1.0);
    }

    fn draw(&mut self) {
        let positions = self.positions();
        let s = &mut self.surface;

        s.clear();
        s.fill_background(BACKGROUND);

        let trail = Stroke::new(TRAJECTORY, 1.0);
        for (from, to) in self.source.iter().zip(&self.target) {
            s.stroke_line(*from, *to, trail);
        }

        for p in positions {
            s.fill_circle(p, POINT_RADIUS, POINT);
        }

        let label = TextStyle::new(Font::arial(16.0), LABEL);
        let source_anchor = DVec2::new(self.params.source_center.x - 50.0, 30.0);
        let target_anchor = DVec2::new(self.params.target_center.x - 50.0, 30.0);
        s.fill_text(SOURCE_LABEL, source_anchor, &label);
        s.fill_text(TARGET_LABEL, target_anchor, &label);

        let readout = DVec2::new(s.width() / 2.0 - 50.0, s.height() - 20.0);
        s.fill_text(&progress_label(self.progress), readout, &label);
    }
}

impl<S: Surface> Animation for TransportVisualizer<S> {
    fn frame(&mut self) -> FrameOutcome {
        self.advance();
        self.draw();
        FrameOutcome::Continue
    }

    fn reset(&mut self) {
        self.progress = 0.0;
        self.draw();
    }

    fn render(&mut self) {
        self.draw();
    }

    fn params(&self) -> Value {
        json!({
            "point_count": self.params.point_count,
            "spread": self.params.spread,
            "source_x": self.params.source_center.x,
            "source_y": self.params.source_center.y,
            "target_x": self.params.target_center.x,
            "target_y": self.params.target_center.y,
            "step": self.params.step,
        })
    }

    fn param_schema(&self) -> Value {
        json!({
            "point_count": {
                "type": "integer",
                "default": DEFAULT_POINT_COUNT,
                "min": 1,
                "max": MAX_POINT_COUNT,
                "description": "Number of points in each cloud"
            },
            "spread": {
                "type": "number",
                "default": DEFAULT_SPREAD,
                "min": 0.0,
                "max": 300.0,
                "description": "Half-width of the square window each cloud is sampled from"
            },
            "source_x": {
                "type": "number",
                "default": DEFAULT_SOURCE_CENTER.x,
                "description": "Horizontal center of the source cloud"
            },
            "source_y": {
                "type": "number",
                "default": DEFAULT_SOURCE_CENTER.y,
                "description": "Vertical center of the source cloud"
            },
            "target_x": {
                "type": "number",
                "default": DEFAULT_TARGET_CENTER.x,
                "description": "Horizontal center of the target cloud"
            },
            "target_y": {
                "type": "number",
                "default": DEFAULT_TARGET_CENTER.y,
                "description": "Vertical center of the target cloud"
            },
            "step": {
                "type": "number",
                "default": DEFAULT_STEP,
                "min": MIN_STEP,
                "max": MAX_STEP,
                "description": "Progress added per frame"
            }
        })
    }
}
