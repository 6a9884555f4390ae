//! Structured CLI errors with meaningful exit codes.
//!
//! Exit code scheme:
//! - 0:  success
//! - 2:  clap arg parse error (automatic, before our code runs)
//! - 10: visualizer error (unknown visualizer, bad dimensions)
//! - 11: I/O error (writing the SVG)
//! - 12: input error (bad JSON params, bad control value)
//! - 13: serialization error

use std::fmt;
use villani_core::VizError;

/// Errors produced by CLI operations, each mapped to a distinct exit code.
#[derive(Debug)]
pub enum CliError {
    Visualizer(VizError),
    Io(String),
    Input(String),
    Serialization(String),
}

impl CliError {
    /// Returns the process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Visualizer(_) => 10,
            CliError::Io(_) => 11,
            CliError::Input(_) => 12,
            CliError::Serialization(_) => 13,
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Visualizer(e) => write!(f, "{e}"),
            CliError::Io(msg) | CliError::Input(msg) | CliError::Serialization(msg) => {
                write!(f, "{msg}")
            }
        }
    }
}

impl From<VizError> for CliError {
    fn from(e: VizError) -> Self {
        match e {
            VizError::Io(msg) => CliError::Io(msg),
            VizError::InvalidInput { .. } => CliError::Input(e.to_string()),
            other => CliError::Visualizer(other),
        }
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        CliError::Serialization(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn visualizer_error_exit_code_is_10() {
        let err = CliError::Visualizer(VizError::UnknownVisualizer("foo".into()));
        assert_eq!(err.exit_code(), 10);
    }

    #[test]
    fn io_error_exit_code_is_11() {
        assert_eq!(CliError::Io("write failed".into()).exit_code(), 11);
    }

    #[test]
    fn input_error_exit_code_is_12() {
        assert_eq!(CliError::Input("bad params".into()).exit_code(), 12);
    }

    #[test]
    fn serialization_error_exit_code_is_13() {
        assert_eq!(CliError::Serialization("json fail".into()).exit_code(), 13);
    }

    #[test]
    fn from_viz_error_io_routes_to_cli_io() {
        let cli_err = CliError::from(VizError::Io("disk full".into()));
        assert_eq!(cli_err.exit_code(), 11);
        assert!(cli_err.to_string().contains("disk full"));
    }

    #[test]
    fn from_viz_error_invalid_input_routes_to_cli_input() {
        let cli_err = CliError::from(VizError::InvalidInput {
            control: "collisionRate".into(),
            reason: "not a number".into(),
        });
        assert_eq!(cli_err.exit_code(), 12);
        assert!(cli_err.to_string().contains("collisionRate"));
    }

    #[test]
    fn from_viz_error_other_routes_to_cli_visualizer() {
        let cli_err = CliError::from(VizError::UnknownVisualizer("xyz".into()));
        assert_eq!(cli_err.exit_code(), 10);
        assert!(cli_err.to_string().contains("xyz"));
    }

    #[test]
    fn from_serde_json_error_routes_to_serialization() {
        let bad_json = serde_json::from_str::<serde_json::Value>("{invalid");
        let cli_err = CliError::from(bad_json.unwrap_err());
        assert_eq!(cli_err.exit_code(), 13);
    }
}
