//! Error types
//!
//! `ValidationError` is raised while building the model and means the
//! configuration is wrong. `InvalidInputError` is raised by a single step and
//! leaves the caller's model untouched; that includes a model whose
//! entities were replaced with ones that no longer fit the board.

use std::path::PathBuf;

/// Construction-time error: a static configuration defect.
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("{what} must be positive, got {value}")]
    NonPositive { what: &'static str, value: f32 },
    #[error("{what} must be finite")]
    NonFinite { what: &'static str },
    #[error("{what} of {size} does not fit a board extent of {board}")]
    DoesNotFit {
        what: &'static str,
        size: f32,
        board: f32,
    },
    #[error("{what} at x={x} lies outside the board width {width}")]
    OffBoard { what: &'static str, x: f32, width: f32 },
}

/// Call-time error from `advance`: the step was rejected.
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum InvalidInputError {
    #[error("delta time must not be negative, got {0}")]
    NegativeDelta(f32),
    #[error("delta time must be finite, got {0}")]
    NonFiniteDelta(f32),
    #[error("model is not valid: {0}")]
    InvalidModel(#[from] ValidationError),
}

/// Errors from loading a configuration file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid config: {0}")]
    Invalid(#[from] ValidationError),
}

/// Reject anything that is not a positive, finite number.
pub(crate) fn ensure_positive(what: &'static str, value: f32) -> Result<f32, ValidationError> {
    if !value.is_finite() {
        return Err(ValidationError::NonFinite { what });
    }
    if value <= 0.0 {
        return Err(ValidationError::NonPositive { what, value });
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ensure_positive() {
        assert_eq!(ensure_positive("radius", 8.0), Ok(8.0));
        assert_eq!(
            ensure_positive("radius", 0.0),
            Err(ValidationError::NonPositive {
                what: "radius",
                value: 0.0
            })
        );
        assert!(matches!(
            ensure_positive("radius", f32::NAN),
            Err(ValidationError::NonFinite { what: "radius" })
        ));
        assert!(matches!(
            ensure_positive("width", f32::INFINITY),
            Err(ValidationError::NonFinite { .. })
        ));
    }

    #[test]
    fn test_error_messages() {
        let err = InvalidInputError::NegativeDelta(-1.0);
        assert_eq!(err.to_string(), "delta time must not be negative, got -1");

        let err = ValidationError::DoesNotFit {
            what: "paddle height",
            size: 400.0,
            board: 300.0,
        };
        assert_eq!(
            err.to_string(),
            "paddle height of 400 does not fit a board extent of 300"
        );
    }
}
