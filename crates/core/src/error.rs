//! Error types for the Villani explorer core.

use thiserror::Error;

/// Errors produced by visualizer construction, drawing backends, and input handling.
#[derive(Debug, Error)]
pub enum VizError {
    /// Width or height was zero (or not finite) when creating a drawing surface.
    #[error("invalid dimensions: width and height must be positive")]
    InvalidDimensions,

    /// Source and target point clouds had different lengths.
    #[error("point set length mismatch: {source_len} source points vs {target_len} target points")]
    PointSetMismatch { source_len: usize, target_len: usize },

    /// A visualizer name was not recognized by the registry.
    #[error("unknown visualizer: {0}")]
    UnknownVisualizer(String),

    /// A value coming from a UI control could not be interpreted.
    #[error("invalid input for '{control}': {reason}")]
    InvalidInput { control: String, reason: String },

    /// Writing a snapshot or other output failed.
    #[error("I/O error: {0}")]
    Io(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_dimensions_displays_readable_message() {
        let msg = VizError::InvalidDimensions.to_string();
        assert!(
            msg.contains("width") && msg.contains("height"),
            "expected message mentioning width and height, got: {msg}"
        );
    }

    #[test]
    fn point_set_mismatch_includes_both_lengths() {
        let err = VizError::PointSetMismatch {
            source_len: 30,
            target_len: 29,
        };
        let msg = err.to_string();
        assert!(msg.contains("30"), "missing source length in: {msg}");
        assert!(msg.contains("29"), "missing target length in: {msg}");
    }

    #[test]
    fn unknown_visualizer_includes_name() {
        let msg = VizError::UnknownVisualizer("heat".into()).to_string();
        assert!(msg.contains("heat"), "missing name in: {msg}");
    }

    #[test]
    fn invalid_input_includes_control_and_reason() {
        let err = VizError::InvalidInput {
            control: "collisionRate".into(),
            reason: "not a number".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("collisionRate"), "missing control in: {msg}");
        assert!(msg.contains("not a number"), "missing reason in: {msg}");
    }

    #[test]
    fn viz_error_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<VizError>();
    }

    #[test]
    fn viz_error_implements_std_error() {
        fn assert_std_error<T: std::error::Error>() {}
        assert_std_error::<VizError>();
    }
}
