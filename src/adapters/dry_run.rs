//! Dry-run backend
//!
//! Accepts every call and writes nothing. Calls are logged at debug level and
//! recorded so a run can be inspected afterwards.

use crate::adapters::model::CadModel;
use crate::config::sweep::{FileType, StlQuality};
use crate::domain::errors::ModelError;
use crate::domain::ids::{BodyName, ParameterName};
use crate::domain::value::ParameterValue;
use crate::log_model_call;
use async_trait::async_trait;
use std::path::{Path, PathBuf};

/// A call received by [`DryRunModel`]
#[derive(Debug, Clone, PartialEq)]
pub enum ModelCall {
    SetParameter {
        name: String,
        value: ParameterValue,
    },
    Recompute,
    ExportBody {
        body: String,
        path: PathBuf,
        file_type: FileType,
        stl_quality: StlQuality,
    },
}

/// Model that records calls instead of touching geometry
#[derive(Debug, Default)]
pub struct DryRunModel {
    calls: Vec<ModelCall>,
}

impl DryRunModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Calls received so far, in order
    pub fn calls(&self) -> &[ModelCall] {
        &self.calls
    }

    /// Paths passed to `export_body`, in order
    pub fn exported_paths(&self) -> Vec<&Path> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                ModelCall::ExportBody { path, .. } => Some(path.as_path()),
                _ => None,
            })
            .collect()
    }
}

#[async_trait]
impl CadModel for DryRunModel {
    fn name(&self) -> &str {
        "dry-run"
    }

    async fn set_parameter(
        &mut self,
        name: &ParameterName,
        value: &ParameterValue,
    ) -> Result<(), ModelError> {
        log_model_call!(self.name(), "set_parameter", format!("{name}={value}"));
        self.calls.push(ModelCall::SetParameter {
            name: name.to_string(),
            value: value.clone(),
        });
        Ok(())
    }

    async fn recompute(&mut self) -> Result<(), ModelError> {
        log_model_call!(self.name(), "recompute");
        self.calls.push(ModelCall::Recompute);
        Ok(())
    }

    async fn export_body(
        &mut self,
        body: &BodyName,
        path: &Path,
        file_type: FileType,
        stl_quality: StlQuality,
    ) -> Result<(), ModelError> {
        log_model_call!(self.name(), "export_body", path.display());
        self.calls.push(ModelCall::ExportBody {
            body: body.to_string(),
            path: path.to_path_buf(),
            file_type,
            stl_quality,
        });
        Ok(())
    }
}
