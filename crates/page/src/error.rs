//! Error types for page behaviors.

use thiserror::Error;
use villani_core::VizError;

/// Errors produced while handling page events or touching persisted state.
#[derive(Debug, Error)]
pub enum PageError {
    /// A visualizer or input-parsing error.
    #[error(transparent)]
    Viz(#[from] VizError),

    /// The key-value store refused a read or write.
    #[error("storage error: {0}")]
    Storage(String),

    /// A layout or progress document could not be (de)serialized.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn viz_errors_display_transparently() {
        let err = PageError::from(VizError::UnknownVisualizer("heat".into()));
        assert_eq!(err.to_string(), "unknown visualizer: heat");
    }

    #[test]
    fn storage_error_includes_message() {
        let msg = PageError::Storage("quota exceeded".into()).to_string();
        assert!(msg.contains("quota exceeded"), "missing message in: {msg}");
    }

    #[test]
    fn json_errors_convert() {
        let bad = serde_json::from_str::<serde_json::Value>("{nope").unwrap_err();
        assert!(matches!(PageError::from(bad), PageError::Json(_)));
    }
}
