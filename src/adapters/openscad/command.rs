//! OpenSCAD command line construction

use crate::config::sweep::StlQuality;
use crate::domain::value::ParameterValue;
use std::path::{Path, PathBuf};

/// Arguments for one `openscad -o <path> ... <model>` invocation
#[derive(Debug, Clone, PartialEq)]
pub struct ExportCommand {
    pub output: PathBuf,
    /// `name=value` definitions, in assignment order
    pub defines: Vec<String>,
    pub extra_args: Vec<String>,
    pub model: PathBuf,
}

impl ExportCommand {
    pub fn new(output: &Path, model: &Path) -> Self {
        Self {
            output: output.to_path_buf(),
            defines: Vec::new(),
            extra_args: Vec::new(),
            model: model.to_path_buf(),
        }
    }

    /// Adds a `-D name=value` definition
    pub fn define(mut self, name: &str, value: &ParameterValue) -> Self {
        self.defines.push(format!("{name}={}", literal(value)));
        self
    }

    /// Adds `$fa`/`$fs` overrides for the requested mesh refinement
    pub fn quality(mut self, quality: StlQuality) -> Self {
        let (fa, fs) = resolution(quality);
        self.defines.push(format!("$fa={fa}"));
        self.defines.push(format!("$fs={fs}"));
        self
    }

    pub fn extra_args(mut self, args: &[String]) -> Self {
        self.extra_args.extend(args.iter().cloned());
        self
    }

    /// Full argument list, without the binary
    pub fn args(&self) -> Vec<String> {
        let mut args = vec!["-o".to_string(), self.output.display().to_string()];
        for define in &self.defines {
            args.push("-D".to_string());
            args.push(define.clone());
        }
        args.extend(self.extra_args.iter().cloned());
        args.push(self.model.display().to_string());
        args
    }
}

/// OpenSCAD literal for a value; strings are quoted and escaped
pub fn literal(value: &ParameterValue) -> String {
    match value {
        ParameterValue::Text(text) => {
            format!("\"{}\"", text.replace('\\', "\\\\").replace('"', "\\\""))
        }
        other => other.to_string(),
    }
}

/// `($fa, $fs)` for a quality level; Low matches the OpenSCAD defaults
fn resolution(quality: StlQuality) -> (f64, f64) {
    match quality {
        StlQuality::High => (2.0, 0.2),
        StlQuality::Medium => (6.0, 0.5),
        StlQuality::Low => (12.0, 2.0),
    }
}

/// True for names OpenSCAD accepts as variables
pub fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    }
}
