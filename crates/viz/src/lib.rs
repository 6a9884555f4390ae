#![deny(unsafe_code)]
//! Visualizer registry: maps visualizer names to implementations, plus an
//! SVG drawing surface for offline snapshots.
//!
//! This crate sits between `villani-core` (which defines the `Animation` trait)
//! and the individual visualizer crates. The preview CLI dispatches through
//! [`VisualizerKind`] so it never matches on concrete types itself.

pub mod svg;

#[cfg(feature = "snapshot")]
pub mod snapshot;

use serde_json::Value;
use villani_core::{Animation, FrameOutcome, Surface, VizError};
use villani_entropy::EntropyPlotter;
use villani_transport::TransportVisualizer;

/// All available visualizer names.
const VISUALIZER_NAMES: &[&str] = &["transport", "entropy"];

/// Enumeration of every visualizer, generic over the drawing surface.
pub enum VisualizerKind<S> {
    /// Point-cloud transport animation.
    Transport(TransportVisualizer<S>),
    /// Entropy-decay plot.
    Entropy(EntropyPlotter<S>),
}

impl<S: Surface> VisualizerKind<S> {
    /// Constructs a visualizer by name.
    ///
    /// `seed` only affects visualizers with random state (the transport clouds).
    /// Returns `VizError::UnknownVisualizer` if the name is not recognized.
    pub fn from_name(name: &str, surface: S, seed: u64, params: &Value) -> Result<Self, VizError> {
        match name {
            "transport" => Ok(Self::Transport(TransportVisualizer::from_json(
                surface, seed, params,
            ))),
            "entropy" => Ok(Self::Entropy(EntropyPlotter::from_json(surface, params))),
            _ => Err(VizError::UnknownVisualizer(name.to_string())),
        }
    }

    /// Returns a slice of all recognized visualizer names.
    pub fn list_visualizers() -> &'static [&'static str] {
        VISUALIZER_NAMES
    }

    /// Registry name of this visualizer.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Transport(_) => "transport",
            Self::Entropy(_) => "entropy",
        }
    }

    pub fn surface(&self) -> &S {
        match self {
            Self::Transport(v) => v.surface(),
            Self::Entropy(v) => v.surface(),
        }
    }

    /// Consumes the visualizer and returns its surface.
    pub fn into_surface(self) -> S {
        match self {
            Self::Transport(v) => v.into_surface(),
            Self::Entropy(v) => v.into_surface(),
        }
    }
}

impl<S: Surface> Animation for VisualizerKind<S> {
    fn begin(&mut self) {
        match self {
            Self::Transport(v) => v.begin(),
            Self::Entropy(v) => v.begin(),
        }
    }

    fn frame(&mut self) -> FrameOutcome {
        match self {
            Self::Transport(v) => v.frame(),
            Self::Entropy(v) => v.frame(),
        }
    }

    fn reset(&mut self) {
        match self {
            Self::Transport(v) => v.reset(),
            Self::Entropy(v) => v.reset(),
        }
    }

    fn render(&mut self) {
        match self {
            Self::Transport(v) => v.render(),
            Self::Entropy(v) => v.render(),
        }
    }

    fn params(&self) -> Value {
        match self {
            Self::Transport(v) => v.params(),
            Self::Entropy(v) => v.params(),
        }
    }

    fn param_schema(&self) -> Value {
        match self {
            Self::Transport(v) => v.param_schema(),
            Self::Entropy(v) => v.param_schema(),
        }
    }
}
