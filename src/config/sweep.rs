//! Sweep configuration
//!
//! Typed, validated representation of the JSON sweep file: which parameters to
//! vary, their variants, which bodies to export and how to name the results.
//!
//! ```json
//! {
//!   "outputDirectory": "output",
//!   "bodiesToExport": ["Drawer"],
//!   "exportOptions": { "fileType": "STL", "stlQuality": "High" },
//!   "parametersToIterate": {
//!     "COLUMNS": { "outputName": "c", "variants": [1, 2], "grouping": true },
//!     "ROWS": { "outputName": "r", "variants": [1, 2] }
//!   }
//! }
//! ```

use crate::domain::errors::SweepError;
use crate::domain::ids::{BodyName, ParameterName};
use crate::domain::result::Result;
use crate::domain::value::ParameterValue;
use indexmap::IndexMap;
use serde::de::{self, MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Placeholder names with a fixed meaning in file name templates
pub const RESERVED_PLACEHOLDERS: [&str; 2] = ["bodyName", "params"];

/// Output file format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum FileType {
    /// Stereolithography mesh
    #[default]
    Stl,
    /// STEP (ISO 10303) solid
    Step,
    /// IGES solid
    Iges,
}

impl FileType {
    /// File extension without the leading dot
    pub fn extension(&self) -> &'static str {
        match self {
            FileType::Stl => "stl",
            FileType::Step => "step",
            FileType::Iges => "iges",
        }
    }
}

impl fmt::Display for FileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FileType::Stl => "STL",
            FileType::Step => "STEP",
            FileType::Iges => "IGES",
        };
        f.write_str(name)
    }
}

impl FromStr for FileType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "STL" => Ok(FileType::Stl),
            "STEP" => Ok(FileType::Step),
            "IGES" => Ok(FileType::Iges),
            _ => Err(format!(
                "Invalid fileType '{s}'. Must be one of: STL, STEP, IGES"
            )),
        }
    }
}

impl TryFrom<String> for FileType {
    type Error = String;

    fn try_from(value: String) -> std::result::Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<FileType> for String {
    fn from(value: FileType) -> Self {
        value.to_string()
    }
}

/// Mesh refinement for STL exports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum StlQuality {
    High,
    #[default]
    Medium,
    Low,
}

impl fmt::Display for StlQuality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            StlQuality::High => "High",
            StlQuality::Medium => "Medium",
            StlQuality::Low => "Low",
        };
        f.write_str(name)
    }
}

impl FromStr for StlQuality {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "high" => Ok(StlQuality::High),
            "medium" => Ok(StlQuality::Medium),
            "low" => Ok(StlQuality::Low),
            _ => Err(format!(
                "Invalid stlQuality '{s}'. Must be one of: High, Medium, Low"
            )),
        }
    }
}

impl TryFrom<String> for StlQuality {
    type Error = String;

    fn try_from(value: String) -> std::result::Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<StlQuality> for String {
    fn from(value: StlQuality) -> Self {
        value.to_string()
    }
}

/// How grouping segments become folders
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GroupingStyle {
    /// One folder level per grouping parameter
    #[default]
    Nested,
    /// All grouping segments joined with `-` into a single folder
    Joined,
}

/// Export settings shared by every job of a sweep
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportOptions {
    #[serde(default)]
    pub file_type: FileType,

    /// Only meaningful when `file_type` is STL
    #[serde(default)]
    pub stl_quality: StlQuality,

    /// Template with `{bodyName}`, `{params}` and `{<ParameterName>}` placeholders
    #[serde(default)]
    pub file_name_template: Option<String>,

    #[serde(default = "default_true")]
    pub force_recompute: bool,

    #[serde(default)]
    pub grouping_style: GroupingStyle,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            file_type: FileType::default(),
            stl_quality: StlQuality::default(),
            file_name_template: None,
            force_recompute: true,
            grouping_style: GroupingStyle::default(),
        }
    }
}

/// One swept parameter
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterSpec {
    pub name: ParameterName,

    /// Short token used in default names; `None` falls back to `name`
    pub output_token: Option<String>,

    pub variants: Vec<ParameterValue>,

    /// Contributes a folder segment in addition to the file name
    pub grouping: bool,
}

impl ParameterSpec {
    /// Creates a non-grouping spec without an output token
    pub fn new(name: ParameterName, variants: Vec<ParameterValue>) -> Self {
        Self {
            name,
            output_token: None,
            variants,
            grouping: false,
        }
    }

    /// Sets the output token
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.output_token = Some(token.into());
        self
    }

    /// Marks the parameter as grouping
    pub fn grouped(mut self) -> Self {
        self.grouping = true;
        self
    }

    /// Token written in front of the value in names
    pub fn token(&self) -> &str {
        self.output_token
            .as_deref()
            .unwrap_or_else(|| self.name.as_str())
    }

    /// `<token><value>` segment for the given variant
    pub fn segment(&self, value: &ParameterValue) -> String {
        format!("{}{}", self.token(), value)
    }
}

/// Body of a `parametersToIterate` entry, the key being the name
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ParameterSpecEntry {
    #[serde(default, alias = "outputToken")]
    output_name: Option<String>,
    variants: Vec<ParameterValue>,
    #[serde(default)]
    grouping: bool,
}

/// Parameters in declaration order
///
/// Backed by an order-preserving map so enumeration order and default file
/// names follow the order parameters were written in the configuration.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParameterSet(IndexMap<String, ParameterSpec>);

impl ParameterSet {
    /// Builds a set from specs, rejecting duplicate names
    pub fn from_specs(specs: impl IntoIterator<Item = ParameterSpec>) -> Result<Self> {
        let mut map = IndexMap::new();
        for spec in specs {
            let key = spec.name.as_str().to_string();
            if map.contains_key(&key) {
                return Err(SweepError::Configuration(format!(
                    "Duplicate parameter '{key}' in parametersToIterate"
                )));
            }
            map.insert(key, spec);
        }
        Ok(Self(map))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Specs in declaration order
    pub fn iter(
        &self,
    ) -> impl DoubleEndedIterator<Item = &ParameterSpec> + ExactSizeIterator + '_ {
        self.0.values()
    }

    /// Declaration index and spec for a parameter name
    pub fn get_full(&self, name: &str) -> Option<(usize, &ParameterSpec)> {
        self.0.get_full(name).map(|(index, _, spec)| (index, spec))
    }

    /// Spec at a declaration index
    pub fn get_index(&self, index: usize) -> Option<&ParameterSpec> {
        self.0.get_index(index).map(|(_, spec)| spec)
    }

    /// Number of combinations, `None` when it does not fit in `usize`
    pub fn combination_count(&self) -> Option<usize> {
        self.iter()
            .try_fold(1usize, |acc, spec| acc.checked_mul(spec.variants.len()))
    }
}

struct ParameterSetVisitor;

impl<'de> Visitor<'de> for ParameterSetVisitor {
    type Value = ParameterSet;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("an object mapping parameter names to parameter specs")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> std::result::Result<Self::Value, A::Error> {
        let mut map: IndexMap<String, ParameterSpec> = IndexMap::new();
        while let Some(name) = access.next_key::<ParameterName>()? {
            let entry: ParameterSpecEntry = access.next_value()?;
            if map.contains_key(name.as_str()) {
                return Err(de::Error::custom(format!(
                    "duplicate parameter '{name}' in parametersToIterate"
                )));
            }
            map.insert(
                name.as_str().to_string(),
                ParameterSpec {
                    name,
                    output_token: entry.output_name,
                    variants: entry.variants,
                    grouping: entry.grouping,
                },
            );
        }
        Ok(ParameterSet(map))
    }
}

impl<'de> Deserialize<'de> for ParameterSet {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        deserializer.deserialize_map(ParameterSetVisitor)
    }
}

/// Full sweep configuration
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SweepConfig {
    /// Output root; resolved against the configuration file's directory by
    /// [`load_sweep_config`]
    #[serde(default = "default_output_directory")]
    pub output_directory: PathBuf,

    pub bodies_to_export: Vec<BodyName>,

    pub parameters_to_iterate: ParameterSet,

    #[serde(default)]
    pub export_options: ExportOptions,
}

impl SweepConfig {
    /// Parses and validates a sweep configuration from JSON text
    pub fn from_json_str(contents: &str) -> Result<Self> {
        let config: SweepConfig = serde_json::from_str(contents)?;
        config.validate().map_err(SweepError::Configuration)?;
        Ok(config)
    }

    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns a description of the first problem found
    pub fn validate(&self) -> std::result::Result<(), String> {
        if self.bodies_to_export.is_empty() {
            return Err("bodiesToExport must list at least one body".to_string());
        }

        let mut seen = HashSet::new();
        for body in &self.bodies_to_export {
            if !seen.insert(body.as_str()) {
                return Err(format!("Duplicate body '{body}' in bodiesToExport"));
            }
        }

        for spec in self.parameters_to_iterate.iter() {
            if spec.variants.is_empty() {
                return Err(format!(
                    "Parameter '{}' must have at least one variant",
                    spec.name
                ));
            }
            if RESERVED_PLACEHOLDERS.contains(&spec.name.as_str()) {
                return Err(format!(
                    "Parameter name '{}' is reserved for file name templates",
                    spec.name
                ));
            }
            check_path_piece(spec.token(), &format!("Output token of '{}'", spec.name))?;
            for value in &spec.variants {
                if let ParameterValue::Text(text) = value {
                    check_path_piece(text, &format!("Variant of '{}'", spec.name))?;
                }
                if spec.grouping && matches!(spec.segment(value).as_str(), "." | "..") {
                    return Err(format!(
                        "Parameter '{}' produces the folder name '{}'",
                        spec.name,
                        spec.segment(value)
                    ));
                }
            }
        }

        if self.parameters_to_iterate.combination_count().is_none() {
            return Err("Too many parameter combinations to enumerate".to_string());
        }

        if let Some(template) = &self.export_options.file_name_template {
            if template.trim().is_empty() {
                return Err("exportOptions.fileNameTemplate must not be empty".to_string());
            }
            check_path_piece(template, "exportOptions.fileNameTemplate")?;
        }

        if self.output_directory.as_os_str().is_empty() {
            return Err("outputDirectory must not be empty".to_string());
        }

        Ok(())
    }

    /// Total number of jobs: combinations × bodies
    pub fn total_jobs(&self) -> usize {
        self.parameters_to_iterate
            .combination_count()
            .unwrap_or(0)
            .saturating_mul(self.bodies_to_export.len())
    }
}

/// Names and folder segments must stay inside the output root
fn check_path_piece(text: &str, what: &str) -> std::result::Result<(), String> {
    if text.contains(['/', '\\']) || text.contains("..") {
        return Err(format!("{what} '{text}' must not contain path separators or '..'"));
    }
    Ok(())
}

/// Loads a sweep configuration from a JSON file
///
/// The returned configuration has `output_directory` resolved against the
/// directory containing the file.
///
/// # Errors
///
/// Returns `SweepError::Configuration` if the file is missing, unreadable,
/// not valid JSON, or fails validation
pub fn load_sweep_config(path: impl AsRef<Path>) -> Result<SweepConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(SweepError::Configuration(format!(
            "Sweep configuration not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        SweepError::Configuration(format!(
            "Failed to read sweep configuration {}: {}",
            path.display(),
            e
        ))
    })?;

    let mut config = SweepConfig::from_json_str(&contents)?;

    let base_dir = path.parent().unwrap_or_else(|| Path::new(""));
    config.output_directory = base_dir.join(&config.output_directory);

    tracing::debug!(
        path = %path.display(),
        output_directory = %config.output_directory.display(),
        parameters = config.parameters_to_iterate.len(),
        bodies = config.bodies_to_export.len(),
        "Loaded sweep configuration"
    );

    Ok(config)
}

fn default_output_directory() -> PathBuf {
    PathBuf::from("output")
}

fn default_true() -> bool {
    true
}
