//! Path planning
//!
//! Maps every `(combination, body)` pair onto an output file path:
//!
//! ```text
//! <outputDirectory>/<grouping path>/<file name>.<extension>
//! ```
//!
//! - the grouping path has one segment per parameter marked `grouping`, in
//!   declaration order, each `<token><value>`;
//! - the file name comes from the configured template or, without one,
//!   `<bodyName>-<token1><value1>-<token2><value2>-...` over all parameters;
//! - the extension follows the configured file type.
//!
//! - [`template`] - File name template parsing and rendering
//! - [`plan`] - The full, lazily enumerated job list of a sweep

pub mod plan;
pub mod template;

pub use plan::{ExportPlan, PathCollision};
pub use template::{params_token, FileNameTemplate};

use crate::config::sweep::{FileType, GroupingStyle, SweepConfig};
use crate::core::combination::Combination;
use crate::domain::ids::BodyName;
use crate::domain::result::Result;
use std::fmt;
use std::path::{Path, PathBuf};

/// The atomic unit of work: one body exported for one combination
#[derive(Debug, Clone)]
pub struct ExportJob {
    pub combination: Combination,
    pub body: BodyName,
    pub output_path: PathBuf,
}

impl ExportJob {
    /// Directory the output file is written into
    pub fn output_dir(&self) -> Option<&Path> {
        self.output_path.parent()
    }
}

impl fmt::Display for ExportJob {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {} -> {}",
            self.combination,
            self.body,
            self.output_path.display()
        )
    }
}

/// Computes grouping folders and file names for jobs
#[derive(Debug, Clone)]
pub struct PathPlanner {
    output_root: PathBuf,
    template: FileNameTemplate,
    file_type: FileType,
    grouping_style: GroupingStyle,
}

impl PathPlanner {
    /// Creates a planner for a sweep, parsing its file name template
    ///
    /// # Errors
    ///
    /// Returns `SweepError::UnknownTemplateToken` if the template references
    /// anything other than `bodyName`, `params` or a declared parameter
    pub fn new(config: &SweepConfig) -> Result<Self> {
        let parameters = &config.parameters_to_iterate;
        let template = match &config.export_options.file_name_template {
            Some(source) => FileNameTemplate::parse(source, parameters)?,
            None => FileNameTemplate::default_for(parameters),
        };

        Ok(Self {
            output_root: config.output_directory.clone(),
            template,
            file_type: config.export_options.file_type,
            grouping_style: config.export_options.grouping_style,
        })
    }

    pub fn output_root(&self) -> &Path {
        &self.output_root
    }

    pub fn template(&self) -> &FileNameTemplate {
        &self.template
    }

    /// Folder path relative to the output root; empty when nothing groups
    pub fn grouping_path(&self, combination: &Combination) -> PathBuf {
        let segments: Vec<String> = combination
            .assignments()
            .filter(|(spec, _)| spec.grouping)
            .map(|(spec, value)| spec.segment(value))
            .collect();

        match self.grouping_style {
            GroupingStyle::Nested => segments.iter().collect(),
            GroupingStyle::Joined if segments.is_empty() => PathBuf::new(),
            GroupingStyle::Joined => PathBuf::from(segments.join("-")),
        }
    }

    /// File name including exactly one extension
    pub fn file_name(&self, combination: &Combination, body: &BodyName) -> String {
        let mut name = self.template.render(combination, body);
        let extension = format!(".{}", self.file_type.extension());
        if !name.to_ascii_lowercase().ends_with(&extension) {
            name.push_str(&extension);
        }
        name
    }

    /// `output_root / grouping_path / file_name`
    pub fn output_path(&self, combination: &Combination, body: &BodyName) -> PathBuf {
        self.output_root
            .join(self.grouping_path(combination))
            .join(self.file_name(combination, body))
    }

    /// Plans a single job
    pub fn job(&self, combination: &Combination, body: &BodyName) -> ExportJob {
        ExportJob {
            combination: combination.clone(),
            body: body.clone(),
            output_path: self.output_path(combination, body),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::combination::CombinationGenerator;
    use crate::domain::errors::SweepError;
    use std::sync::Arc;

    fn config(json: &str) -> SweepConfig {
        SweepConfig::from_json_str(json).unwrap()
    }

    fn paths(config: &SweepConfig) -> Vec<PathBuf> {
        let planner = PathPlanner::new(config).unwrap();
        let generator =
            CombinationGenerator::new(Arc::new(config.parameters_to_iterate.clone())).unwrap();
        generator
            .iter()
            .flat_map(|combination| {
                config
                    .bodies_to_export
                    .iter()
                    .map(|body| planner.output_path(&combination, body))
                    .collect::<Vec<_>>()
            })
            .collect()
    }

    #[test]
    fn test_single_grouping_parameter() {
        let config = config(
            r#"{ "bodiesToExport": ["Handle"],
                 "parametersToIterate": { "Size": { "variants": [2, 3], "grouping": true } } }"#,
        );
        assert_eq!(
            paths(&config),
            vec![
                PathBuf::from("output/Size2/Handle-Size2.stl"),
                PathBuf::from("output/Size3/Handle-Size3.stl"),
            ]
        );
    }

    #[test]
    fn test_grouping_uses_only_grouped_parameters() {
        let config = config(
            r#"{ "bodiesToExport": ["Drawer"],
                 "parametersToIterate": {
                    "COLUMNS": { "variants": [1, 2], "grouping": true },
                    "ROWS": { "variants": [1, 2] } } }"#,
        );
        assert_eq!(
            paths(&config),
            vec![
                PathBuf::from("output/COLUMNS1/Drawer-COLUMNS1-ROWS1.stl"),
                PathBuf::from("output/COLUMNS1/Drawer-COLUMNS1-ROWS2.stl"),
                PathBuf::from("output/COLUMNS2/Drawer-COLUMNS2-ROWS1.stl"),
                PathBuf::from("output/COLUMNS2/Drawer-COLUMNS2-ROWS2.stl"),
            ]
        );
    }

    #[test]
    fn test_nested_and_joined_grouping() {
        let nested = config(
            r#"{ "bodiesToExport": ["Bin"],
                 "parametersToIterate": {
                    "W": { "outputName": "w", "variants": [1], "grouping": true },
                    "D": { "outputName": "d", "variants": [4] },
                    "H": { "outputName": "h", "variants": [6], "grouping": true } } }"#,
        );
        assert_eq!(
            paths(&nested),
            vec![PathBuf::from("output/w1/h6/Bin-w1-d4-h6.stl")]
        );

        let mut joined = nested.clone();
        joined.export_options.grouping_style = GroupingStyle::Joined;
        assert_eq!(
            paths(&joined),
            vec![PathBuf::from("output/w1-h6/Bin-w1-d4-h6.stl")]
        );
    }

    #[test]
    fn test_no_grouping_lands_in_output_root() {
        let config = config(
            r#"{ "outputDirectory": "exports", "bodiesToExport": ["Knob"],
                 "parametersToIterate": { "R": { "outputName": "r", "variants": [2.5] } },
                 "exportOptions": { "fileType": "STEP" } }"#,
        );
        assert_eq!(paths(&config), vec![PathBuf::from("exports/Knob-r2.5.step")]);
    }

    #[test]
    fn test_template_scenario() {
        let config = config(
            r#"{ "bodiesToExport": ["Drawer"],
                 "parametersToIterate": { "COLUMNS": { "variants": [2, 3, 4] } },
                 "exportOptions": { "fileNameTemplate": "Drawer-c{COLUMNS}", "fileType": "IGES" } }"#,
        );
        assert_eq!(
            paths(&config),
            vec![
                PathBuf::from("output/Drawer-c2.iges"),
                PathBuf::from("output/Drawer-c3.iges"),
                PathBuf::from("output/Drawer-c4.iges"),
            ]
        );
    }

    #[test]
    fn test_extension_not_duplicated() {
        let config = config(
            r#"{ "bodiesToExport": ["Lid"], "parametersToIterate": {},
                 "exportOptions": { "fileNameTemplate": "{bodyName}.STL" } }"#,
        );
        assert_eq!(paths(&config), vec![PathBuf::from("output/Lid.STL")]);
    }

    #[test]
    fn test_no_parameters_uses_body_name() {
        let config = config(r#"{ "bodiesToExport": ["Lid", "Base"], "parametersToIterate": {} }"#);
        assert_eq!(
            paths(&config),
            vec![
                PathBuf::from("output/Lid.stl"),
                PathBuf::from("output/Base.stl"),
            ]
        );
    }

    #[test]
    fn test_unknown_token_fails_at_construction() {
        let config = config(
            r#"{ "bodiesToExport": ["Drawer"],
                 "parametersToIterate": { "COLUMNS": { "variants": [2] } },
                 "exportOptions": { "fileNameTemplate": "Drawer-{Bogus}" } }"#,
        );
        assert!(matches!(
            PathPlanner::new(&config),
            Err(SweepError::UnknownTemplateToken { .. })
        ));
    }

    #[test]
    fn test_job_display_includes_identity() {
        let config = config(
            r#"{ "bodiesToExport": ["Handle"],
                 "parametersToIterate": { "Size": { "variants": [2] } } }"#,
        );
        let planner = PathPlanner::new(&config).unwrap();
        let generator =
            CombinationGenerator::new(Arc::new(config.parameters_to_iterate.clone())).unwrap();
        let combination = generator.nth_combination(0).unwrap();
        let job = planner.job(&combination, &config.bodies_to_export[0]);

        let text = job.to_string();
        assert!(text.contains("Size=2"));
        assert!(text.contains("Handle"));
        assert!(text.contains("Handle-Size2.stl"));
        assert_eq!(job.output_dir(), Some(Path::new("output")));
    }
}
