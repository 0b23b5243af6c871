//! Domain error types
//!
//! This module defines the error hierarchy for parametric export.
//! Fatal errors (`SweepError`) stop a batch before any job runs; collaborator
//! errors (`ModelError`) are isolated to the job that produced them.

use thiserror::Error;

/// Main error type
///
/// Every fallible library operation returns this type. Variants that can occur
/// after a batch has started (`DirectoryCreation` for the output root) are the
/// only ones that move a batch into the `Failed` state.
#[derive(Debug, Error)]
pub enum SweepError {
    /// Malformed or missing required field, empty variants, duplicate names
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// A `{...}` placeholder in the file name template that names nothing
    #[error("Unknown template token '{{{token}}}' in file name template \"{template}\"")]
    UnknownTemplateToken { token: String, template: String },

    /// The output root directory could not be created
    #[error("Failed to create output directory {path}: {message}")]
    DirectoryCreation { path: String, message: String },

    /// CAD model collaborator errors raised outside of a job
    #[error("Model error: {0}")]
    Model(#[from] ModelError),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),
}

/// Errors reported by the CAD model collaborator
///
/// These map one-to-one onto the per-job failure kinds in [`JobErrorKind`].
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ModelError {
    /// The model refused a parameter assignment
    #[error("Parameter '{name}' rejected: {reason}")]
    ParameterRejected { name: String, reason: String },

    /// The model failed to regenerate after parameter changes
    #[error("Recompute failed: {0}")]
    RecomputeFailed(String),

    /// The body could not be written to the target file
    #[error("Export of body '{body}' failed: {reason}")]
    ExportFailed { body: String, reason: String },
}

impl ModelError {
    /// Failure kind recorded for a job that hit this error
    pub fn kind(&self) -> JobErrorKind {
        match self {
            ModelError::ParameterRejected { .. } => JobErrorKind::ParameterRejected,
            ModelError::RecomputeFailed(_) => JobErrorKind::RecomputeFailed,
            ModelError::ExportFailed { .. } => JobErrorKind::ExportFailed,
        }
    }
}

/// Kind of a per-job failure
///
/// Per-job failures never abort the batch; they are collected into the
/// export summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
pub enum JobErrorKind {
    /// A parameter of the job's combination was rejected
    ParameterRejected,
    /// The model could not be recomputed for the job's combination
    RecomputeFailed,
    /// The export call (or the job's output folder) failed
    ExportFailed,
}

impl std::fmt::Display for JobErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            JobErrorKind::ParameterRejected => "ParameterRejected",
            JobErrorKind::RecomputeFailed => "RecomputeFailed",
            JobErrorKind::ExportFailed => "ExportFailed",
        };
        f.write_str(name)
    }
}

// Conversion from std::io::Error
impl From<std::io::Error> for SweepError {
    fn from(err: std::io::Error) -> Self {
        SweepError::Io(err.to_string())
    }
}

// Conversion from serde_json::Error
impl From<serde_json::Error> for SweepError {
    fn from(err: serde_json::Error) -> Self {
        SweepError::Configuration(format!("JSON parse error: {err}"))
    }
}

// Conversion from toml parse errors
impl From<toml::de::Error> for SweepError {
    fn from(err: toml::de::Error) -> Self {
        SweepError::Configuration(format!("TOML parse error: {err}"))
    }
}
