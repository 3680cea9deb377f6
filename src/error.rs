//! Error types for the press core.

use crate::physics::Parameter;
use thiserror::Error;

/// Result type alias for press operations.
pub type PressResult<T> = Result<T, PressError>;

/// Errors raised at the boundary between user input and the physics model.
///
/// Every variant is recoverable: the offending input is rejected and the
/// previously committed state is kept.
#[derive(Debug, Error)]
pub enum PressError {
    /// A force, radius or stroke that is zero, negative or not finite, or
    /// one that drives a derived quantity to zero or infinity.
    #[error("{parameter} must be a positive finite number within the computable range, got {value}")]
    InvalidDomain { parameter: Parameter, value: f64 },

    /// A positive value outside the configured range for the parameter.
    #[error("{parameter} = {value} is outside the allowed range [{min}, {max}]")]
    OutOfRange {
        parameter: Parameter,
        value: f64,
        min: f64,
        max: f64,
    },

    /// A configured range that is empty, not strictly positive or has no step.
    #[error("invalid range for {parameter}: min {min}, max {max}, step {step}")]
    InvalidRange {
        parameter: Parameter,
        min: f64,
        max: f64,
        step: f64,
    },

    /// A typed field value that could not be accepted.
    #[error("rejected edit of {parameter} ({input:?}): {reason}")]
    InvalidUserEdit {
        parameter: Parameter,
        input: String,
        reason: String,
    },

    /// Configuration file could not be read.
    #[error("failed to read config {path}: {source}")]
    ConfigIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Configuration file is not valid JSON for [`PressConfig`](crate::config::PressConfig).
    #[error("failed to parse config {path}: {source}")]
    ConfigParse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

impl PressError {
    #[must_use]
    pub fn invalid_domain(parameter: Parameter, value: f64) -> Self {
        Self::InvalidDomain { parameter, value }
    }

    #[must_use]
    pub fn invalid_edit(
        parameter: Parameter,
        input: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidUserEdit {
            parameter,
            input: input.into(),
            reason: reason.into(),
        }
    }

    /// True for errors caused by a value the user supplied.
    pub fn is_input_rejection(&self) -> bool {
        matches!(
            self,
            Self::InvalidDomain { .. } | Self::OutOfRange { .. } | Self::InvalidUserEdit { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = PressError::invalid_domain(Parameter::InputRadius, 0.0);
        assert!(format!("{err}").contains("input radius"));

        let err = PressError::invalid_edit(Parameter::InputForce, "abc", "not a number");
        let text = format!("{err}");
        assert!(text.contains("abc"));
        assert!(text.contains("not a number"));
    }

    #[test]
    fn test_input_rejection_classification() {
        assert!(PressError::invalid_domain(Parameter::StrokeDepth, -1.0).is_input_rejection());

        let range = PressError::InvalidRange {
            parameter: Parameter::InputForce,
            min: -1.0,
            max: 5000.0,
            step: 1.0,
        };
        assert!(format!("{range}").contains("input force"));
        assert!(!range.is_input_rejection());

        let io = PressError::ConfigIo {
            path: "missing.json".into(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        };
        assert!(!io.is_input_rejection());
    }
}
