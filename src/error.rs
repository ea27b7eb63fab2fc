//! Error types for the critical temperature gauge.
//!
//! The per-tick core (rate estimation, criticality, visibility, highlight) never
//! fails: degenerate input is handled as data flow. Errors only exist at the
//! boundary where configuration is read or parts are pulled from a host source.

use std::io;
use thiserror::Error;

/// Error type for gauge configuration and source operations.
#[derive(Debug, Error)]
pub enum GaugeError {
    /// Configuration parsing error with line number.
    #[error("configuration error at line {line}: {message}")]
    ConfigParse {
        /// Line number where the error occurred (1-indexed).
        line: usize,
        /// Error message describing the issue.
        message: String,
    },

    /// Configuration file not found.
    #[error("configuration file not found: {0}")]
    ConfigNotFound(String),

    /// Invalid configuration value.
    #[error("invalid configuration value for '{key}': {message}")]
    ConfigInvalid {
        /// The configuration key with invalid value.
        key: String,
        /// Error message describing why the value is invalid.
        message: String,
    },

    /// A part source cannot produce snapshots right now.
    #[error("part source '{0}' is not available")]
    SourceUnavailable(&'static str),

    /// Scenario or config file I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Result type alias for gauge operations.
pub type Result<T> = std::result::Result<T, GaugeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_parse_error_includes_line_number() {
        let err = GaugeError::ConfigParse { line: 42, message: "invalid value".to_string() };
        let display = err.to_string();

        assert!(display.contains("42"), "Error should include line number: {}", display);
        assert!(display.contains("invalid value"), "Error should include message: {}", display);
    }

    #[test]
    fn test_config_invalid_includes_key() {
        let err = GaugeError::ConfigInvalid {
            key: "gauge.show_threshold".to_string(),
            message: "must be inside (0, 1)".to_string(),
        };

        assert!(err.to_string().contains("gauge.show_threshold"));
    }

    #[test]
    fn test_source_unavailable_includes_name() {
        let err = GaugeError::SourceUnavailable("vessel");
        assert!(err.to_string().contains("vessel"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "scenario missing");
        let err: GaugeError = io_err.into();

        assert!(matches!(err, GaugeError::Io(_)), "Should convert to Io");
        assert!(err.to_string().contains("scenario missing"));
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<GaugeError>();
    }
}
