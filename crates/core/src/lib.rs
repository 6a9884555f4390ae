#![deny(unsafe_code)]
//! Core types and traits for the Villani explorer visualizations.
//!
//! Provides the [`Surface`] drawing capability, the [`Scheduler`] frame
//! abstraction, the [`Animation`] trait and the [`FrameLoop`] that drives it,
//! plus the shared [`Rgba`] color, [`Xorshift64`] PRNG, easing helpers,
//! parameter helpers and the [`RecordingSurface`] test double.

pub mod animation;
pub mod color;
pub mod easing;
pub mod error;
pub mod params;
pub mod prng;
pub mod record;
pub mod schedule;
pub mod surface;

pub use animation::{Animation, FrameLoop, FrameOutcome};
pub use color::Rgba;
pub use easing::{ease_in_out_cubic, eased_positions};
pub use error::VizError;
pub use glam::DVec2;
pub use prng::Xorshift64;
pub use record::{DrawCommand, RecordingSurface};
pub use schedule::{FrameCallback, FrameToken, ManualScheduler, Scheduler};
pub use surface::{Font, Stroke, Surface, TextStyle};
