//! Carousel configuration
//!
//! Resolved once at construction and immutable for the lifetime of the
//! instance. Supports programmatic construction (plain struct literal or
//! [`Default`]) and YAML via serde, with humantime duration strings
//! (`"4s"`, `"1500ms"`).

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Deserializer};

use crate::error::{ConfigError, Result};

/// Default dwell period between automatic advances.
pub const DEFAULT_SLIDE_DURATION: Duration = Duration::from_secs(4);

/// Carousel configuration.
///
/// # Example
///
/// ```yaml
/// slide_duration: 6s
/// loop_enabled: false
/// initial_index: 2
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CarouselConfig {
    /// Dwell period between automatic advances. Must be positive.
    #[serde(deserialize_with = "deserialize_duration")]
    pub slide_duration: Duration,

    /// Wrap index arithmetic at collection edges instead of clamping.
    pub loop_enabled: bool,

    /// Starting slide. Clamped into the surface's slide range at
    /// construction rather than rejected.
    pub initial_index: usize,
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self {
            slide_duration: DEFAULT_SLIDE_DURATION,
            loop_enabled: true,
            initial_index: 0,
        }
    }
}

impl CarouselConfig {
    /// Parses a configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns `ZoetropeError::Yaml` if the document does not parse, or
    /// `ZoetropeError::Config` if a parsed value fails validation.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads and parses a configuration file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingFile` if the path does not exist,
    /// `ConfigError::ParseError` if the document does not parse, and
    /// `ZoetropeError::Config` if a parsed value fails validation.
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|err| {
            if err.kind() == std::io::ErrorKind::NotFound {
                ConfigError::MissingFile {
                    path: path.to_path_buf(),
                }
                .into()
            } else {
                crate::error::ZoetropeError::Io(err)
            }
        })?;

        let config: Self =
            serde_yaml::from_str(&contents).map_err(|err| ConfigError::ParseError {
                path: path.to_path_buf(),
                message: err.to_string(),
            })?;
        config.validate()?;
        Ok(config)
    }

    /// Validates field values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if `slide_duration` is zero.
    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        if self.slide_duration.is_zero() {
            return Err(ConfigError::InvalidValue {
                field: "slide_duration".to_string(),
                value: humantime::format_duration(self.slide_duration).to_string(),
                expected: "a positive duration".to_string(),
            });
        }
        Ok(())
    }
}

/// Deserializes a humantime duration string (`"4s"`, `"250ms"`).
fn deserialize_duration<'de, D>(deserializer: D) -> std::result::Result<Duration, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    humantime::parse_duration(&raw).map_err(serde::de::Error::custom)
}
