//! Tool settings schema
//!
//! Settings describe how the tool runs (log level, CAD backend, log files),
//! independent of any particular sweep. They map to an optional TOML file.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// CAD backend selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum BackendKind {
    /// Log every model call, write nothing
    #[default]
    DryRun,
    /// Drive the OpenSCAD command-line binary
    Openscad,
}

/// Root settings structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    /// Application-level settings
    #[serde(default)]
    pub application: ApplicationConfig,

    /// CAD backend configuration
    #[serde(default)]
    pub backend: BackendConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Settings {
    /// Validates the settings
    ///
    /// # Errors
    ///
    /// Returns an error if any value is invalid
    pub fn validate(&self) -> Result<(), String> {
        self.application.validate()?;
        self.backend.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}

/// Application-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Dry run mode (no directories or files are written)
    #[serde(default)]
    pub dry_run: bool,
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            dry_run: false,
        }
    }
}

impl ApplicationConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.log_level.as_str()) {
            return Err(format!(
                "Invalid log_level '{}'. Must be one of: {}",
                self.log_level,
                valid_levels.join(", ")
            ));
        }
        Ok(())
    }
}

/// CAD backend configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BackendConfig {
    #[serde(default)]
    pub kind: BackendKind,

    /// Required when `kind = "openscad"`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub openscad: Option<OpenScadConfig>,
}

impl BackendConfig {
    fn validate(&self) -> Result<(), String> {
        match self.kind {
            BackendKind::DryRun => Ok(()),
            BackendKind::Openscad => match &self.openscad {
                Some(openscad) => openscad.validate(),
                None => Err(
                    "backend.openscad configuration is required when backend.kind = 'openscad'"
                        .to_string(),
                ),
            },
        }
    }
}

/// OpenSCAD backend configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenScadConfig {
    /// OpenSCAD executable (name on PATH or full path)
    #[serde(default = "default_openscad_binary")]
    pub binary: String,

    /// The `.scad` model source; relative paths are resolved against the
    /// settings file's directory
    pub model: PathBuf,

    /// Model variable that receives the body name being exported
    #[serde(default = "default_body_variable")]
    pub body_variable: String,

    /// Extra arguments passed before the model path
    #[serde(default)]
    pub extra_args: Vec<String>,
}

impl OpenScadConfig {
    fn validate(&self) -> Result<(), String> {
        if self.binary.trim().is_empty() {
            return Err("backend.openscad.binary cannot be empty".to_string());
        }
        if self.model.as_os_str().is_empty() {
            return Err("backend.openscad.model cannot be empty".to_string());
        }
        if self.body_variable.trim().is_empty() {
            return Err("backend.openscad.body_variable cannot be empty".to_string());
        }
        Ok(())
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Enable local JSON file logging
    #[serde(default)]
    pub local_enabled: bool,

    /// Local log directory
    #[serde(default = "default_local_path")]
    pub local_path: String,

    /// Log rotation strategy
    #[serde(default = "default_local_rotation")]
    pub local_rotation: String,
}

impl LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_rotations = ["daily", "hourly", "never"];
        if !valid_rotations.contains(&self.local_rotation.as_str()) {
            return Err(format!(
                "Invalid logging.local_rotation '{}'. Must be one of: {}",
                self.local_rotation,
                valid_rotations.join(", ")
            ));
        }

        if self.local_enabled && self.local_path.trim().is_empty() {
            return Err("logging.local_path cannot be empty when local logging is enabled".to_string());
        }

        Ok(())
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            local_enabled: false,
            local_path: default_local_path(),
            local_rotation: default_local_rotation(),
        }
    }
}

// Default value functions
fn default_log_level() -> String {
    "info".to_string()
}

fn default_openscad_binary() -> String {
    "openscad".to_string()
}

fn default_body_variable() -> String {
    "body".to_string()
}

fn default_local_path() -> String {
    "logs".to_string()
}

fn default_local_rotation() -> String {
    "daily".to_string()
}
