//! Configuration error types.

use thiserror::Error;

/// Errors that can occur during configuration loading and validation.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Stage-gate threshold is outside `[0, 100]`.
    #[error("invalid stage gate threshold {value}: must be between 0 and 100")]
    InvalidThreshold { value: f64 },

    /// Stage-gate threshold string could not be parsed as a number.
    #[error("failed to parse stage gate threshold '{value}': {source}")]
    ThresholdParseError {
        value: String,
        #[source]
        source: std::num::ParseFloatError,
    },

    /// Processing timeout string could not be parsed as milliseconds.
    #[error("failed to parse max processing time '{value}': {source}")]
    InvalidDuration {
        value: String,
        #[source]
        source: std::num::ParseIntError,
    },

    /// A field that must be positive was zero.
    #[error("{field} must be greater than zero")]
    ZeroValue { field: &'static str },

    /// Unrecognized preset name.
    #[error("unknown preset '{value}': expected one of default, fast, precision")]
    UnknownPreset { value: String },
}
