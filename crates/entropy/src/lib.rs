#![deny(unsafe_code)]
//! Entropy-decay plot animation.
//!
//! Each frame appends one sample `exp(-rate * t)` to a time series at a fixed
//! time step and redraws a line chart of everything recorded so far. The
//! rate is read when each sample is taken, so moving the rate control mid-run
//! bends the rest of the curve without touching the samples already drawn.

use std::f64::consts::FRAC_PI_2;

use serde_json::{json, Value};
use tracing::debug;
use villani_core::params::param_f64;
use villani_core::{Animation, DVec2, Font, FrameOutcome, Rgba, Stroke, Surface, TextStyle};

/// Default time between samples.
const DEFAULT_DT: f64 = 0.1;
/// Default end of the time axis.
const DEFAULT_MAX_TIME: f64 = 10.0;
/// Default decay rate.
const DEFAULT_RATE: f64 = 1.0;
/// Default gap between the surface edge and the plot area, in pixels.
const DEFAULT_PADDING: f64 = 60.0;

/// Lower bound of the rate control.
pub const RATE_MIN: f64 = 0.1;
/// Upper bound of the rate control.
pub const RATE_MAX: f64 = 3.0;

/// Number of tick intervals per axis (six tick labels).
const TICK_INTERVALS: usize = 5;

const BACKGROUND: Rgba = Rgba::rgb(0xff, 0xff, 0xff);
const INK: Rgba = Rgba::rgb(0x2c, 0x3e, 0x50);
const SERIES: Rgba = Rgba::rgb(0xe7, 0x4c, 0x3c);
const TICK: Rgba = Rgba::rgb(0x7f, 0x8c, 0x8d);
const SAMPLE_RADIUS: f64 = 3.0;

const X_LABEL: &str = "時間";
const Y_LABEL: &str = "エントロピー H(t)";
const TITLE: &str = "エントロピーの時間発展";

/// Tunable parameters for the entropy plot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EntropyParams {
    /// Time between consecutive samples. Always positive.
    pub dt: f64,
    /// Last sampled time; also the right end of the time axis. Always positive.
    pub max_time: f64,
    /// Initial decay rate.
    pub rate: f64,
    /// Plot padding in pixels.
    pub padding: f64,
}

impl Default for EntropyParams {
    fn default() -> Self {
        Self {
            dt: DEFAULT_DT,
            max_time: DEFAULT_MAX_TIME,
            rate: DEFAULT_RATE,
            padding: DEFAULT_PADDING,
        }
    }
}

impl EntropyParams {
    /// Extracts parameters from a JSON object, falling back to defaults.
    ///
    /// A non-positive `dt` or `max_time` would stall or invert the time axis,
    /// so those fall back to their defaults as well.
    pub fn from_json(params: &Value) -> Self {
        let positive_or = |name: &str, default: f64| {
            let v = param_f64(params, name, default);
            if v.is_finite() && v > 0.0 {
                v
            } else {
                default
            }
        };
        Self {
            dt: positive_or("dt", DEFAULT_DT),
            max_time: positive_or("max_time", DEFAULT_MAX_TIME),
            rate: param_f64(params, "rate", DEFAULT_RATE),
            padding: param_f64(params, "padding", DEFAULT_PADDING),
        }
    }
}

/// Entropy proxy at time `t`: `exp(-rate * t)`.
pub fn decay(rate: f64, t: f64) -> f64 {
    (-rate * t).exp()
}

/// Parallel `(time, value)` samples.
///
/// Invariants: `times` is strictly increasing and `times.len() == values.len()`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Series {
    times: Vec<f64>,
    values: Vec<f64>,
}

impl Series {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn times(&self) -> &[f64] {
        &self.times
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.times.len()
    }

    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    pub fn last_time(&self) -> Option<f64> {
        self.times.last().copied()
    }

    /// Iterates `(time, value)` pairs in order.
    pub fn iter(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.times.iter().copied().zip(self.values.iter().copied())
    }

    pub fn clear(&mut self) {
        self.times.clear();
        self.values.clear();
    }

    /// Appends a sample. Returns `false` and leaves the series unchanged if
    /// `time` does not come strictly after the last recorded time.
    fn push(&mut self, time: f64, value: f64) -> bool {
        if self.last_time().is_some_and(|last| time <= last) {
            return false;
        }
        self.times.push(time);
        self.values.push(value);
        true
    }
}

/// Tick label text: one decimal place.
fn tick_label(v: f64) -> String {
    format!("{v:.1}")
}

/// Corner annotation showing the current rate, e.g. `"衝突率: 1.0"`.
pub fn rate_label(rate: f64) -> String {
    format!("衝突率: {rate:.1}")
}

/// Animates the decay curve `exp(-rate * t)` one sample per frame.
pub struct EntropyPlotter<S> {
    surface: S,
    series: Series,
    rate: f64,
    params: EntropyParams,
}

impl<S: Surface> EntropyPlotter<S> {
    pub fn new(surface: S, params: EntropyParams) -> Self {
        Self {
            surface,
            series: Series::new(),
            rate: params.rate,
            params,
        }
    }

    /// Creates a plotter from a JSON params object.
    pub fn from_json(surface: S, json_params: &Value) -> Self {
        Self::new(surface, EntropyParams::from_json(json_params))
    }

    /// Rate used by every sample taken from now on. Recorded samples are kept as they are.
    pub fn set_rate(&mut self, rate: f64) {
        self.rate = rate;
    }

    pub fn rate(&self) -> f64 {
        self.rate
    }

    pub fn series(&self) -> &Series {
        &self.series
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// Consumes the plotter and returns its surface.
    pub fn into_surface(self) -> S {
        self.surface
    }

    /// Time of the next sample: `len * dt`.
    pub fn next_time(&self) -> f64 {
        self.series.len() as f64 * self.params.dt
    }

    /// Whether the next sample would fall past `max_time`.
    pub fn is_complete(&self) -> bool {
        // Tolerance absorbs `k * dt` landing a hair above max_time.
        self.next_time() > self.params.max_time + self.params.dt * 1e-9
    }

    /// Appends the next sample using the current rate.
    ///
    /// Returns the new `(time, value)` pair, or `None` once past `max_time`.
    pub fn sample(&mut self) -> Option<(f64, f64)> {
        if self.is_complete() {
            return None;
        }
        let t = self.next_time();
        let v = decay(self.rate, t);
        self.series.push(t, v).then_some((t, v))
    }

    /// Maps a `(time, value)` pair into surface pixels.
    pub fn to_plot(&self, t: f64, v: f64) -> DVec2 {
        let pad = self.params.padding;
        let plot_w = self.surface.width() - 2.0 * pad;
        let plot_h = self.surface.height() - 2.0 * pad;
        DVec2::new(
            pad + (t / self.params.max_time) * plot_w,
            self.surface.height() - pad - v * plot_h,
        )
    }

    fn draw(&mut self) {
        let points: Vec<DVec2> = self
            .series
            .iter()
            .map(|(t, v)| self.to_plot(t, v))
            .collect();
        let pad = self.params.padding;
        let max_time = self.params.max_time;
        let rate = self.rate;

        let s = &mut self.surface;
        let (w, h) = (s.width(), s.height());
        let plot_w = w - 2.0 * pad;
        let plot_h = h - 2.0 * pad;

        s.clear();
        s.fill_background(BACKGROUND);

        s.stroke_polyline(
            &[
                DVec2::new(pad, pad),
                DVec2::new(pad, h - pad),
                DVec2::new(w - pad, h - pad),
            ],
            Stroke::new(INK, 2.0),
        );

        let axis_style = TextStyle::new(Font::arial(14.0), INK);
        s.fill_text(X_LABEL, DVec2::new(w / 2.0, h - 20.0), &axis_style);
        s.fill_text(
            Y_LABEL,
            DVec2::new(20.0, h / 2.0),
            &axis_style.clone().rotated(-FRAC_PI_2),
        );
        s.fill_text(
            TITLE,
            DVec2::new(w / 2.0 - 80.0, 30.0),
            &TextStyle::new(Font::arial(16.0), INK),
        );

        s.stroke_polyline(&points, Stroke::new(SERIES, 3.0));
        for p in &points {
            s.fill_circle(*p, SAMPLE_RADIUS, SERIES);
        }

        let tick_style = TextStyle::new(Font::arial(12.0), TICK);
        for i in 0..=TICK_INTERVALS {
            let frac = i as f64 / TICK_INTERVALS as f64;
            let x = pad + frac * plot_w;
            s.fill_text(
                &tick_label(frac * max_time),
                DVec2::new(x - 10.0, h - pad + 20.0),
                &tick_style,
            );
        }
        for i in 0..=TICK_INTERVALS {
            let frac = i as f64 / TICK_INTERVALS as f64;
            let y = h - pad - frac * plot_h;
            s.fill_text(&tick_label(frac), DVec2::new(pad - 30.0, y + 5.0), &tick_style);
        }

        s.fill_text(&rate_label(rate), DVec2::new(w - 150.0, 30.0), &axis_style);
    }
}

impl<S: Surface> Animation for EntropyPlotter<S> {
    fn begin(&mut self) {
        self.series.clear();
    }

    fn frame(&mut self) -> FrameOutcome {
        match self.sample() {
            Some(_) => {
                self.draw();
                FrameOutcome::Continue
            }
            None => {
                debug!(samples = self.series.len(), "entropy run complete");
                FrameOutcome::Finished
            }
        }
    }

    fn reset(&mut self) {
        self.series.clear();
        self.draw();
    }

    fn render(&mut self) {
        self.draw();
    }

    fn params(&self) -> Value {
        json!({
            "dt": self.params.dt,
            "max_time": self.params.max_time,
            "rate": self.rate,
            "padding": self.params.padding,
        })
    }

    fn param_schema(&self) -> Value {
        json!({
            "dt": {
                "type": "number",
                "default": DEFAULT_DT,
                "min": 0.001,
                "max": 1.0,
                "description": "Time between consecutive samples"
            },
            "max_time": {
                "type": "number",
                "default": DEFAULT_MAX_TIME,
                "min": 0.1,
                "max": 1000.0,
                "description": "Last sampled time and right end of the time axis"
            },
            "rate": {
                "type": "number",
                "default": DEFAULT_RATE,
                "min": RATE_MIN,
                "max": RATE_MAX,
                "description": "Decay rate used for each new sample"
            },
            "padding": {
                "type": "number",
                "default": DEFAULT_PADDING,
                "min": 0.0,
                "max": 200.0,
                "description": "Gap between the surface edge and the plot area, in pixels"
            }
        })
    }
}
