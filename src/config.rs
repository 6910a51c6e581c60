//! TOML-based VEN configuration.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::report::ReportDescriptor;

/// Top-level agent configuration parsed from TOML.
///
/// All fields have defaults matching the development VTN setup. Load from
/// TOML with [`VenConfig::from_toml_file`] or use [`VenConfig::default`].
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct VenConfig {
    /// VEN identity and VTN endpoint.
    pub ven: IdentityConfig,
    /// Recurring telemetry report parameters.
    pub report: ReportConfig,
}

/// VEN identity and VTN endpoint.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct IdentityConfig {
    /// VEN name registered with the VTN.
    pub name: String,
    /// VTN endpoint URL.
    pub vtn_url: String,
    /// Client certificate for HTTPS, handed to the transport as-is.
    pub cert: Option<PathBuf>,
    /// Client key for HTTPS, handed to the transport as-is.
    pub key: Option<PathBuf>,
}

impl Default for IdentityConfig {
    fn default() -> Self {
        Self {
            name: "ven123".to_string(),
            vtn_url: "http://localhost:8080/OpenADR2/Simple/2.0b".to_string(),
            cert: None,
            key: None,
        }
    }
}

/// Recurring telemetry report parameters.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ReportConfig {
    /// Resource the measurement belongs to.
    pub resource_id: String,
    /// Measurement name.
    pub measurement: String,
    /// Seconds between samples (must be > 0).
    pub sampling_rate_secs: u64,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            resource_id: "device001".to_string(),
            measurement: "voltage".to_string(),
            sampling_rate_secs: 10,
        }
    }
}

impl ReportConfig {
    /// Builds the immutable descriptor the sampler runs from.
    pub fn descriptor(&self) -> ReportDescriptor {
        ReportDescriptor {
            resource_id: self.resource_id.clone(),
            measurement: self.measurement.clone(),
            sampling_interval: Duration::from_secs(self.sampling_rate_secs),
        }
    }
}

/// Configuration error with field path and constraint description.
#[derive(Debug)]
pub struct ConfigError {
    /// Dotted field path (e.g., `"report.sampling_rate_secs"`).
    pub field: String,
    /// Human-readable constraint description.
    pub message: String,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "config error: {} — {}", self.field, self.message)
    }
}

impl VenConfig {
    /// Parses a configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the file cannot be read or the TOML is invalid.
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError {
            field: "config".to_string(),
            message: format!("cannot read \"{}\": {e}", path.display()),
        })?;
        Self::from_toml_str(&content)
    }

    /// Parses a configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the TOML is invalid or contains unknown fields.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(|e| ConfigError {
            field: "toml".to_string(),
            message: e.to_string(),
        })
    }

    /// Validates all fields and returns a list of errors.
    ///
    /// Returns an empty vector if configuration is valid.
    pub fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        if self.ven.name.is_empty() {
            errors.push(ConfigError {
                field: "ven.name".into(),
                message: "must not be empty".into(),
            });
        }
        if self.ven.vtn_url.is_empty() {
            errors.push(ConfigError {
                field: "ven.vtn_url".into(),
                message: "must not be empty".into(),
            });
        }
        if self.ven.cert.is_some() != self.ven.key.is_some() {
            errors.push(ConfigError {
                field: "ven.cert".into(),
                message: "cert and key must be set together".into(),
            });
        }

        let r = &self.report;
        if r.resource_id.is_empty() {
            errors.push(ConfigError {
                field: "report.resource_id".into(),
                message: "must not be empty".into(),
            });
        }
        if r.measurement.is_empty() {
            errors.push(ConfigError {
                field: "report.measurement".into(),
                message: "must not be empty".into(),
            });
        }
        if r.sampling_rate_secs == 0 {
            errors.push(ConfigError {
                field: "report.sampling_rate_secs".into(),
                message: "must be > 0".into(),
            });
        }

        errors
    }
}
