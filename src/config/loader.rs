//! Settings loader with TOML parsing and environment variable overrides

use super::schema::{BackendKind, Settings};
use crate::domain::errors::SweepError;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::Path;
use std::sync::OnceLock;

/// Loads tool settings from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (${VAR} syntax)
/// 3. Parses the TOML into `Settings`
/// 4. Resolves the OpenSCAD model path against the file's directory
/// 5. Applies environment variable overrides (PARAMETRIC_EXPORT_* prefix)
/// 6. Validates the settings
///
/// # Errors
///
/// Returns an error if the file cannot be read, parsing fails, a referenced
/// environment variable is unset, or validation fails
///
/// # Examples
///
/// ```no_run
/// use parametric_export::config::loader::load_settings;
///
/// let settings = load_settings("parametric-export.toml").expect("Failed to load settings");
/// ```
pub fn load_settings(path: impl AsRef<Path>) -> Result<Settings> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(SweepError::Configuration(format!(
            "Settings file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        SweepError::Configuration(format!(
            "Failed to read settings file {}: {}",
            path.display(),
            e
        ))
    })?;

    let contents = substitute_env_vars(&contents)?;

    let mut settings: Settings = toml::from_str(&contents)
        .map_err(|e| SweepError::Configuration(format!("Failed to parse TOML: {}", e)))?;

    if let Some(openscad) = settings.backend.openscad.as_mut() {
        if openscad.model.is_relative() {
            if let Some(base_dir) = path.parent() {
                openscad.model = base_dir.join(&openscad.model);
            }
        }
    }

    apply_env_overrides(&mut settings)?;

    settings
        .validate()
        .map_err(|e| SweepError::Configuration(format!("Settings validation failed: {}", e)))?;

    Ok(settings)
}

/// Loads settings from `path` when given, otherwise returns the defaults with
/// environment overrides applied
pub fn load_settings_or_default(path: Option<&str>) -> Result<Settings> {
    match path {
        Some(path) => load_settings(path),
        None => {
            let mut settings = Settings::default();
            apply_env_overrides(&mut settings)?;
            settings.validate().map_err(|e| {
                SweepError::Configuration(format!("Settings validation failed: {}", e))
            })?;
            Ok(settings)
        }
    }
}

fn env_var_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}").expect("valid env var pattern"))
}

/// Substitutes environment variables in the format ${VAR_NAME}
///
/// # Errors
///
/// Returns an error if a referenced environment variable is not set
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = env_var_pattern();
    let mut result = String::new();
    let mut missing_vars = Vec::new();

    for line in input.lines() {
        let trimmed = line.trim_start();

        // Comments may mention ${VAR} without it being required
        if trimmed.starts_with('#') {
            result.push_str(line);
            result.push('\n');
            continue;
        }

        let mut processed_line = line.to_string();
        for cap in re.captures_iter(line) {
            let var_name = &cap[1];
            match std::env::var(var_name) {
                Ok(value) => {
                    let placeholder = format!("${{{}}}", var_name);
                    processed_line = processed_line.replace(&placeholder, &value);
                }
                Err(_) => {
                    if !missing_vars.contains(&var_name.to_string()) {
                        missing_vars.push(var_name.to_string());
                    }
                }
            }
        }
        result.push_str(&processed_line);
        result.push('\n');
    }

    if !missing_vars.is_empty() {
        return Err(SweepError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(result)
}

/// Applies environment variable overrides using the PARAMETRIC_EXPORT_* prefix
///
/// Environment variables follow the pattern: PARAMETRIC_EXPORT_<SECTION>_<KEY>
/// For example: PARAMETRIC_EXPORT_APPLICATION_LOG_LEVEL, PARAMETRIC_EXPORT_BACKEND_KIND
fn apply_env_overrides(settings: &mut Settings) -> Result<()> {
    // Application overrides
    if let Ok(val) = std::env::var("PARAMETRIC_EXPORT_APPLICATION_LOG_LEVEL") {
        settings.application.log_level = val;
    }
    if let Ok(val) = std::env::var("PARAMETRIC_EXPORT_APPLICATION_DRY_RUN") {
        settings.application.dry_run = val.parse().unwrap_or(false);
    }

    // Backend overrides
    if let Ok(val) = std::env::var("PARAMETRIC_EXPORT_BACKEND_KIND") {
        settings.backend.kind = match val.to_lowercase().as_str() {
            "dry-run" | "dry_run" => BackendKind::DryRun,
            "openscad" => BackendKind::Openscad,
            other => {
                return Err(SweepError::Configuration(format!(
                    "Invalid PARAMETRIC_EXPORT_BACKEND_KIND '{other}'. Must be one of: dry-run, openscad"
                )))
            }
        };
    }
    if let Some(ref mut openscad) = settings.backend.openscad {
        if let Ok(val) = std::env::var("PARAMETRIC_EXPORT_OPENSCAD_BINARY") {
            openscad.binary = val;
        }
        if let Ok(val) = std::env::var("PARAMETRIC_EXPORT_OPENSCAD_MODEL") {
            openscad.model = val.into();
        }
    }

    // Logging overrides
    if let Ok(val) = std::env::var("PARAMETRIC_EXPORT_LOGGING_LOCAL_ENABLED") {
        settings.logging.local_enabled = val.parse().unwrap_or(false);
    }
    if let Ok(val) = std::env::var("PARAMETRIC_EXPORT_LOGGING_LOCAL_PATH") {
        settings.logging.local_path = val;
    }

    Ok(())
}
