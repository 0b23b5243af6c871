//! CAD model factory
//!
//! Creates the CAD backend named by the settings.

use crate::adapters::dry_run::DryRunModel;
use crate::adapters::model::traits::CadModel;
use crate::adapters::openscad::OpenScadModel;
use crate::config::schema::{BackendKind, Settings};
use crate::domain::{Result, SweepError};

/// Create a CAD model based on the settings
///
/// `dry_run` forces the dry-run backend regardless of `backend.kind`.
///
/// # Errors
///
/// Returns `SweepError::Configuration` if the OpenSCAD backend is selected
/// without a `[backend.openscad]` section
pub fn create_model(settings: &Settings, dry_run: bool) -> Result<Box<dyn CadModel>> {
    if dry_run {
        tracing::info!("Using dry-run model");
        return Ok(Box::new(DryRunModel::new()));
    }

    match settings.backend.kind {
        BackendKind::DryRun => {
            tracing::info!("Using dry-run model");
            Ok(Box::new(DryRunModel::new()))
        }
        BackendKind::Openscad => {
            let openscad = settings.backend.openscad.as_ref().ok_or_else(|| {
                SweepError::Configuration(
                    "backend.openscad configuration is required when backend.kind = 'openscad'"
                        .to_string(),
                )
            })?;

            tracing::info!(
                binary = %openscad.binary,
                model = %openscad.model.display(),
                "Using OpenSCAD model"
            );
            Ok(Box::new(OpenScadModel::new(openscad.clone())))
        }
    }
}
