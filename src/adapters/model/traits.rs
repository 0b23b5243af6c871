//! CAD model abstraction
//!
//! This module defines the trait a CAD backend implements to be driven by
//! the export coordinator.

use crate::config::sweep::{FileType, StlQuality};
use crate::domain::errors::ModelError;
use crate::domain::ids::{BodyName, ParameterName};
use crate::domain::value::ParameterValue;
use async_trait::async_trait;
use std::path::Path;

/// A single, globally mutable parametric model
///
/// Only one parameter assignment is live at a time and every export reads
/// whatever geometry the model currently holds, so callers must never issue
/// calls concurrently. The coordinator takes `&mut` access for the whole
/// batch.
#[async_trait]
pub trait CadModel: Send {
    /// Short backend name used in logs
    fn name(&self) -> &str;

    /// Assign one parameter
    ///
    /// # Errors
    ///
    /// Returns `ModelError::ParameterRejected` if the model does not accept
    /// the name or value.
    async fn set_parameter(
        &mut self,
        name: &ParameterName,
        value: &ParameterValue,
    ) -> Result<(), ModelError>;

    /// Regenerate geometry after parameter changes, returning once done
    ///
    /// # Errors
    ///
    /// Returns `ModelError::RecomputeFailed` if the model cannot be rebuilt.
    async fn recompute(&mut self) -> Result<(), ModelError>;

    /// Write `body` to `path` in the requested format
    ///
    /// `stl_quality` is only meaningful for [`FileType::Stl`]. The parent
    /// directory of `path` already exists when this is called (except in
    /// dry-run mode).
    ///
    /// # Errors
    ///
    /// Returns `ModelError::ExportFailed` if the file could not be written.
    async fn export_body(
        &mut self,
        body: &BodyName,
        path: &Path,
        file_type: FileType,
        stl_quality: StlQuality,
    ) -> Result<(), ModelError>;
}
