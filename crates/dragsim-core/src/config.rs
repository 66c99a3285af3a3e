#![forbid(unsafe_code)]

//! Simulator configuration.
//!
//! A [`SimulatorConfig`] selects the hit-testing strategy, seeds the jitter
//! source and optionally sets an interpolation applied to every drag that
//! does not bring its own. With the `config` feature it loads from TOML or
//! JSON.
//!
//! # Loading
//!
//! ```toml
//! # dragsim.toml
//! hit_test = "calibrate"
//! jitter_seed = 42
//!
//! [default_interpolation]
//! step_count = 5
//! duration_ms = 300
//! shaky = 2
//! ```
//!
//! ```rust,ignore
//! let config = SimulatorConfig::from_toml_file("dragsim.toml")?;
//! let sim = DragSimulator::new(config.validated()?);
//! ```

#[cfg(feature = "config")]
use std::path::Path;

#[cfg(feature = "config")]
use serde::{Deserialize, Serialize};
use web_time::Duration;

use crate::hit_test::HitTestMode;
use crate::interpolation::{Interpolation, Jitter, Pacing, StepSpec};

/// Top-level simulator configuration.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config", serde(default))]
pub struct SimulatorConfig {
    /// How the hit-test coordinate space is resolved.
    pub hit_test: HitTestMode,
    /// Seed for positional jitter. `None` seeds from the OS.
    pub jitter_seed: Option<u64>,
    /// Interpolation for drags that do not specify one.
    pub default_interpolation: Option<InterpolationConfig>,
}

/// Serializable form of [`Interpolation`].
///
/// `step_width` takes precedence over `step_count`, and `step_delay_ms` over
/// `duration_ms`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config", serde(default))]
pub struct InterpolationConfig {
    pub step_width: Option<u32>,
    pub step_count: Option<u32>,
    pub step_delay_ms: Option<u64>,
    pub duration_ms: Option<u64>,
    /// Jitter amplitude in pixels; 0 disables.
    pub shaky: u32,
}

impl InterpolationConfig {
    /// Convert to [`Interpolation`]; `None` when no step spec is set.
    #[must_use]
    pub fn to_interpolation(&self) -> Option<Interpolation> {
        let steps = match (self.step_width, self.step_count) {
            (Some(width), _) => StepSpec::Width(width),
            (None, Some(count)) => StepSpec::Count(count),
            (None, None) => return None,
        };
        Some(Interpolation {
            steps,
            pacing: Pacing {
                step_delay: self.step_delay_ms.map(Duration::from_millis),
                duration: self.duration_ms.map(Duration::from_millis),
            },
            jitter: Jitter::Amplitude(self.shaky),
        })
    }
}

impl SimulatorConfig {
    /// The effective default interpolation.
    #[must_use]
    pub fn interpolation(&self) -> Option<Interpolation> {
        self.default_interpolation
            .as_ref()
            .and_then(InterpolationConfig::to_interpolation)
    }

    /// Load from a TOML string.
    #[cfg(feature = "config")]
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(ConfigError::Toml)
    }

    /// Load from a TOML file on disk.
    #[cfg(feature = "config")]
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(ConfigError::Io)?;
        Self::from_toml_str(&content)
    }

    /// Load from a JSON string.
    #[cfg(feature = "config")]
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(s).map_err(ConfigError::Json)
    }

    /// Validate the configuration.
    ///
    /// Returns a list of validation errors. An empty list means the config
    /// is valid.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        let Some(interp) = &self.default_interpolation else {
            return errors;
        };

        match (interp.step_width, interp.step_count) {
            (None, None) => errors.push(
                "default_interpolation needs step_width or step_count".into(),
            ),
            (Some(_), Some(_)) => errors.push(
                "default_interpolation.step_width and step_count are mutually exclusive".into(),
            ),
            (Some(0), None) | (None, Some(0)) => errors.push(
                "default_interpolation step spec must be > 0".into(),
            ),
            _ => {}
        }

        errors
    }

    /// `self`, or every validation error at once.
    pub fn validated(self) -> Result<Self, ConfigError> {
        let errors = self.validate();
        if errors.is_empty() {
            Ok(self)
        } else {
            Err(ConfigError::Validation(errors))
        }
    }
}

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

/// Errors that can occur when loading a simulator configuration.
#[derive(Debug)]
pub enum ConfigError {
    /// I/O error reading a file.
    Io(std::io::Error),
    /// TOML parse error.
    #[cfg(feature = "config")]
    Toml(toml::de::Error),
    /// JSON parse error.
    #[cfg(feature = "config")]
    Json(serde_json::Error),
    /// Validation errors.
    Validation(Vec<String>),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            #[cfg(feature = "config")]
            Self::Toml(e) => write!(f, "TOML parse error: {e}"),
            #[cfg(feature = "config")]
            Self::Json(e) => write!(f, "JSON parse error: {e}"),
            Self::Validation(errors) => {
                write!(f, "validation errors: {}", errors.join("; "))
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            #[cfg(feature = "config")]
            Self::Toml(e) => Some(e),
            #[cfg(feature = "config")]
            Self::Json(e) => Some(e),
            Self::Validation(_) => None,
        }
    }
}
