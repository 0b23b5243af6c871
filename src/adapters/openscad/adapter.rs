//! OpenSCAD model adapter

use super::command::{is_identifier, ExportCommand};
use crate::adapters::model::CadModel;
use crate::config::schema::OpenScadConfig;
use crate::config::sweep::{FileType, StlQuality};
use crate::domain::errors::ModelError;
use crate::domain::ids::{BodyName, ParameterName};
use crate::domain::value::ParameterValue;
use crate::log_model_call;
use async_trait::async_trait;
use indexmap::IndexMap;
use std::path::Path;
use tokio::process::Command;

/// Lines of stderr kept in a failure message
const STDERR_TAIL_LINES: usize = 5;

/// A `.scad` model rendered through the OpenSCAD binary
pub struct OpenScadModel {
    config: OpenScadConfig,
    overrides: IndexMap<String, ParameterValue>,
}

impl OpenScadModel {
    pub fn new(config: OpenScadConfig) -> Self {
        Self {
            config,
            overrides: IndexMap::new(),
        }
    }

    /// Parameter overrides currently applied, in first-assignment order
    pub fn overrides(&self) -> &IndexMap<String, ParameterValue> {
        &self.overrides
    }

    /// Command that exports `body` with the current overrides
    pub fn export_command(&self, body: &BodyName, path: &Path, quality: StlQuality) -> ExportCommand {
        let mut command = ExportCommand::new(path, &self.config.model);
        for (name, value) in &self.overrides {
            command = command.define(name, value);
        }
        command
            .define(
                &self.config.body_variable,
                &ParameterValue::Text(body.to_string()),
            )
            .quality(quality)
            .extra_args(&self.config.extra_args)
    }
}

#[async_trait]
impl CadModel for OpenScadModel {
    fn name(&self) -> &str {
        "openscad"
    }

    async fn set_parameter(
        &mut self,
        name: &ParameterName,
        value: &ParameterValue,
    ) -> Result<(), ModelError> {
        if !is_identifier(name.as_str()) {
            return Err(ModelError::ParameterRejected {
                name: name.to_string(),
                reason: "not a valid OpenSCAD variable name".to_string(),
            });
        }
        if name.as_str() == self.config.body_variable {
            return Err(ModelError::ParameterRejected {
                name: name.to_string(),
                reason: "reserved for the body being exported".to_string(),
            });
        }

        log_model_call!(self.name(), "set_parameter", format!("{name}={value}"));
        self.overrides.insert(name.to_string(), value.clone());
        Ok(())
    }

    async fn recompute(&mut self) -> Result<(), ModelError> {
        log_model_call!(self.name(), "recompute");
        match tokio::fs::metadata(&self.config.model).await {
            Ok(metadata) if metadata.is_file() => Ok(()),
            Ok(_) => Err(ModelError::RecomputeFailed(format!(
                "Model source {} is not a file",
                self.config.model.display()
            ))),
            Err(e) => Err(ModelError::RecomputeFailed(format!(
                "Model source {} is not readable: {}",
                self.config.model.display(),
                e
            ))),
        }
    }

    async fn export_body(
        &mut self,
        body: &BodyName,
        path: &Path,
        file_type: FileType,
        stl_quality: StlQuality,
    ) -> Result<(), ModelError> {
        if file_type != FileType::Stl {
            return Err(ModelError::ExportFailed {
                body: body.to_string(),
                reason: format!("OpenSCAD cannot write {file_type} files"),
            });
        }

        let command = self.export_command(body, path, stl_quality);
        let args = command.args();
        log_model_call!(self.name(), "export_body", args.join(" "));

        let output = Command::new(&self.config.binary)
            .args(&args)
            .output()
            .await
            .map_err(|e| ModelError::ExportFailed {
                body: body.to_string(),
                reason: format!("Failed to run {}: {}", self.config.binary, e),
            })?;

        if output.status.success() {
            Ok(())
        } else {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let lines: Vec<&str> = stderr.lines().collect();
            let tail = lines[lines.len().saturating_sub(STDERR_TAIL_LINES)..].join("\n");
            Err(ModelError::ExportFailed {
                body: body.to_string(),
                reason: format!("{} exited with {}: {}", self.config.binary, output.status, tail),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn config(model: PathBuf) -> OpenScadConfig {
        OpenScadConfig {
            binary: "parametric-export-missing-openscad".to_string(),
            model,
            body_variable: "body".to_string(),
            extra_args: Vec::new(),
        }
    }

    fn name(value: &str) -> ParameterName {
        ParameterName::new(value).unwrap()
    }

    #[tokio::test]
    async fn test_overrides_feed_export_command() {
        let mut model = OpenScadModel::new(config(PathBuf::from("drawer.scad")));
        model
            .set_parameter(&name("COLUMNS"), &ParameterValue::Integer(2))
            .await
            .unwrap();
        model
            .set_parameter(&name("COLUMNS"), &ParameterValue::Integer(3))
            .await
            .unwrap();

        let command = model.export_command(
            &BodyName::new("Drawer").unwrap(),
            Path::new("out/Drawer.stl"),
            StlQuality::Medium,
        );
        assert_eq!(command.defines[0], "COLUMNS=3");
        assert_eq!(command.defines[1], "body=\"Drawer\"");
        assert_eq!(model.overrides().len(), 1);
    }

    #[tokio::test]
    async fn test_invalid_names_rejected() {
        let mut model = OpenScadModel::new(config(PathBuf::from("drawer.scad")));

        let err = model
            .set_parameter(&name("wall thickness"), &ParameterValue::Float(1.5))
            .await
            .unwrap_err();
        assert!(matches!(err, ModelError::ParameterRejected { .. }));

        let err = model
            .set_parameter(&name("body"), &ParameterValue::Integer(1))
            .await
            .unwrap_err();
        assert!(matches!(err, ModelError::ParameterRejected { .. }));
    }

    #[tokio::test]
    async fn test_recompute_requires_model_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut missing = OpenScadModel::new(config(dir.path().join("missing.scad")));
        assert!(matches!(
            missing.recompute().await,
            Err(ModelError::RecomputeFailed(_))
        ));

        let source = dir.path().join("drawer.scad");
        std::fs::write(&source, "cube(1);").unwrap();
        let mut present = OpenScadModel::new(config(source));
        assert!(present.recompute().await.is_ok());
    }

    #[tokio::test]
    async fn test_step_and_iges_rejected() {
        let mut model = OpenScadModel::new(config(PathBuf::from("drawer.scad")));
        let body = BodyName::new("Drawer").unwrap();

        for file_type in [FileType::Step, FileType::Iges] {
            let err = model
                .export_body(&body, Path::new("out/Drawer"), file_type, StlQuality::Medium)
                .await
                .unwrap_err();
            assert_eq!(err.kind(), crate::domain::JobErrorKind::ExportFailed);
        }
    }

    #[tokio::test]
    async fn test_missing_binary_is_export_failure() {
        let mut model = OpenScadModel::new(config(PathBuf::from("drawer.scad")));
        let err = model
            .export_body(
                &BodyName::new("Drawer").unwrap(),
                Path::new("out/Drawer.stl"),
                FileType::Stl,
                StlQuality::Medium,
            )
            .await
            .unwrap_err();

        match err {
            ModelError::ExportFailed { body, reason } => {
                assert_eq!(body, "Drawer");
                assert!(reason.contains("parametric-export-missing-openscad"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
