//! Error types for `zoetrope`
//!
//! Construction and configuration are the only fallible operations in the
//! crate: once a carousel exists, every operation on it is a synchronous
//! state change that either applies deterministically or is a no-op.

use std::path::PathBuf;
use thiserror::Error;

// ============================================================================
// Top-Level Error
// ============================================================================

/// Top-level error type for `zoetrope` operations.
///
/// Aggregates the domain-specific errors so callers can match on a single
/// type at the construction boundary.
#[derive(Debug, Error)]
pub enum ZoetropeError {
    /// Configuration loading or validation error
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Carousel construction error
    #[error(transparent)]
    Construction(#[from] ConstructionError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

// ============================================================================
// Configuration Errors
// ============================================================================

/// Configuration loading and validation errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// YAML parsing failed
    #[error("parse error in {path}: {message}")]
    ParseError {
        /// Path to the configuration file
        path: PathBuf,
        /// Error message from the parser
        message: String,
    },

    /// Referenced configuration file not found
    #[error("file not found: {path}")]
    MissingFile {
        /// Path to the missing file
        path: PathBuf,
    },

    /// Field has an invalid value
    #[error("invalid value for '{field}': got '{value}', expected {expected}")]
    InvalidValue {
        /// Name of the field with invalid value
        field: String,
        /// The actual value provided
        value: String,
        /// Description of what was expected
        expected: String,
    },
}

// ============================================================================
// Construction Errors
// ============================================================================

/// Carousel construction errors.
///
/// Fatal to the instance under construction only; other instances are
/// unaffected. A failed construction yields no usable carousel and
/// schedules no work.
#[derive(Debug, Error)]
pub enum ConstructionError {
    /// The rendering surface reports zero slides
    #[error("surface has no slides")]
    NoSlides,
}

// ============================================================================
// Result Type Alias
// ============================================================================

/// Result type alias for `zoetrope` operations.
pub type Result<T> = std::result::Result<T, ZoetropeError>;

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_construction_error_display() {
        let err = ConstructionError::NoSlides;
        assert_eq!(err.to_string(), "surface has no slides");
    }

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::ParseError {
            path: PathBuf::from("carousel.yaml"),
            message: "unexpected token".to_string(),
        };
        assert!(err.to_string().contains("carousel.yaml"));
        assert!(err.to_string().contains("unexpected token"));
    }

    #[test]
    fn test_invalid_value_display() {
        let err = ConfigError::InvalidValue {
            field: "slide_duration".to_string(),
            value: "0s".to_string(),
            expected: "a positive duration".to_string(),
        };
        assert!(err.to_string().contains("slide_duration"));
        assert!(err.to_string().contains("positive duration"));
    }

    #[test]
    fn test_construction_error_converts_to_top_level() {
        let err: ZoetropeError = ConstructionError::NoSlides.into();
        assert!(matches!(err, ZoetropeError::Construction(_)));
    }

    #[test]
    fn test_io_error_converts_to_top_level() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "not found");
        let err: ZoetropeError = io_err.into();
        assert!(matches!(err, ZoetropeError::Io(_)));
    }
}
