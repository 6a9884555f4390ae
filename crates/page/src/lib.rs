#![deny(unsafe_code)]
//! Page behaviors for the Villani explorer.
//!
//! Everything here is host-independent: tab and topic state, quiz grading,
//! visited-topic progress over a [`KeyValueStore`], and the [`Page`]
//! controller that routes [`UiEvent`]s to the visualizers and reports
//! [`Effect`]s back to whatever renders the document.

pub mod error;
pub mod events;
pub mod math;
pub mod page;
pub mod progress;
pub mod quiz;
pub mod tabs;
pub mod topics;

pub use error::PageError;
pub use events::{ControlId, UiEvent};
pub use math::{Delimiter, MathRegion, MathRenderOptions};
pub use page::{Effect, Page, PageLayout};
pub use progress::{KeyValueStore, MemoryStore, Progress, ProgressStore, PROGRESS_KEY};
pub use quiz::{Grading, Mark, Quiz, Verdict};
pub use tabs::{content_id, TabSet, TabSwitch};
pub use topics::{TopicDecl, TopicSections};
