//! File name templates
//!
//! A template is parsed once against the sweep's parameter set, so an unknown
//! placeholder is reported before any job runs. Rendering is a pure function
//! of `(template, combination, body)`.
//!
//! Recognized placeholders:
//!
//! - `{bodyName}`: the body being exported
//! - `{params}`: `<token1><value1>-<token2><value2>-...` over all parameters
//! - `{<ParameterName>}`: that parameter's value in the combination

use crate::config::sweep::ParameterSet;
use crate::core::combination::Combination;
use crate::domain::errors::SweepError;
use crate::domain::ids::BodyName;
use crate::domain::result::Result;
use regex::Regex;
use std::sync::OnceLock;

const BODY_NAME: &str = "bodyName";
const PARAMS: &str = "params";

fn placeholder_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\{([^{}]*)\}").expect("valid placeholder pattern"))
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Piece {
    Literal(String),
    BodyName,
    Params,
    /// Declaration index of the parameter
    Parameter(usize),
}

/// Parsed file name template (without extension)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileNameTemplate {
    source: String,
    pieces: Vec<Piece>,
}

impl FileNameTemplate {
    /// Parses `template`, resolving parameter placeholders against `parameters`
    ///
    /// # Errors
    ///
    /// Returns `SweepError::UnknownTemplateToken` for the first placeholder
    /// that is neither reserved nor a declared parameter
    pub fn parse(template: &str, parameters: &ParameterSet) -> Result<Self> {
        let mut pieces = Vec::new();
        let mut cursor = 0;

        for captures in placeholder_pattern().captures_iter(template) {
            let (Some(whole), Some(token)) = (captures.get(0), captures.get(1)) else {
                continue;
            };
            if whole.start() > cursor {
                pieces.push(Piece::Literal(template[cursor..whole.start()].to_string()));
            }

            let piece = match token.as_str() {
                BODY_NAME => Piece::BodyName,
                PARAMS => Piece::Params,
                name => match parameters.get_full(name) {
                    Some((position, _)) => Piece::Parameter(position),
                    None => {
                        return Err(SweepError::UnknownTemplateToken {
                            token: name.to_string(),
                            template: template.to_string(),
                        })
                    }
                },
            };
            pieces.push(piece);
            cursor = whole.end();
        }

        if cursor < template.len() {
            pieces.push(Piece::Literal(template[cursor..].to_string()));
        }

        Ok(Self {
            source: template.to_string(),
            pieces,
        })
    }

    /// Template used when none is configured: `{bodyName}-{params}`, or just
    /// `{bodyName}` for a sweep without parameters
    pub fn default_for(parameters: &ParameterSet) -> Self {
        if parameters.is_empty() {
            Self {
                source: format!("{{{BODY_NAME}}}"),
                pieces: vec![Piece::BodyName],
            }
        } else {
            Self {
                source: format!("{{{BODY_NAME}}}-{{{PARAMS}}}"),
                pieces: vec![
                    Piece::BodyName,
                    Piece::Literal("-".to_string()),
                    Piece::Params,
                ],
            }
        }
    }

    /// The template text
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Substitutes every placeholder for one job
    pub fn render(&self, combination: &Combination, body: &BodyName) -> String {
        let mut name = String::new();
        for piece in &self.pieces {
            match piece {
                Piece::Literal(text) => name.push_str(text),
                Piece::BodyName => name.push_str(body.as_str()),
                Piece::Params => name.push_str(&params_token(combination)),
                Piece::Parameter(position) => {
                    if let Some(value) = combination.value_at(*position) {
                        name.push_str(&value.to_string());
                    }
                }
            }
        }
        name
    }
}

/// `<token><value>` segments of all parameters joined with `-`
pub fn params_token(combination: &Combination) -> String {
    combination
        .assignments()
        .map(|(spec, value)| spec.segment(value))
        .collect::<Vec<_>>()
        .join("-")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::sweep::ParameterSpec;
    use crate::core::combination::CombinationGenerator;
    use crate::domain::ids::ParameterName;
    use crate::domain::value::ParameterValue;
    use std::sync::Arc;

    fn parameters() -> ParameterSet {
        ParameterSet::from_specs(vec![
            ParameterSpec::new(
                ParameterName::new("COLUMNS").unwrap(),
                vec![ParameterValue::Integer(2), ParameterValue::Integer(3)],
            )
            .with_token("c"),
            ParameterSpec::new(
                ParameterName::new("Depth").unwrap(),
                vec![ParameterValue::Float(12.5)],
            ),
        ])
        .unwrap()
    }

    fn first_combination(set: ParameterSet) -> Combination {
        let generator = CombinationGenerator::new(Arc::new(set)).unwrap();
        generator.nth_combination(0).unwrap()
    }

    fn body(name: &str) -> BodyName {
        BodyName::new(name).unwrap()
    }

    #[test]
    fn test_render_parameter_placeholders() {
        let set = parameters();
        let template = FileNameTemplate::parse("Drawer-c{COLUMNS}-d{Depth}", &set).unwrap();
        let combination = first_combination(set);
        assert_eq!(template.render(&combination, &body("Drawer")), "Drawer-c2-d12.5");
    }

    #[test]
    fn test_render_reserved_placeholders() {
        let set = parameters();
        let template = FileNameTemplate::parse("{bodyName}__{params}", &set).unwrap();
        let combination = first_combination(set);
        assert_eq!(
            template.render(&combination, &body("Shelf")),
            "Shelf__c2-Depth12.5"
        );
    }

    #[test]
    fn test_unknown_placeholder_fails() {
        let err = FileNameTemplate::parse("Drawer-{Bogus}", &parameters()).unwrap_err();
        match err {
            SweepError::UnknownTemplateToken { token, template } => {
                assert_eq!(token, "Bogus");
                assert_eq!(template, "Drawer-{Bogus}");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_empty_placeholder_fails() {
        let result = FileNameTemplate::parse("Drawer-{}", &parameters());
        assert!(matches!(result, Err(SweepError::UnknownTemplateToken { .. })));
    }

    #[test]
    fn test_placeholders_are_case_sensitive() {
        let result = FileNameTemplate::parse("{columns}", &parameters());
        assert!(matches!(result, Err(SweepError::UnknownTemplateToken { .. })));
    }

    #[test]
    fn test_literal_only_template() {
        let set = parameters();
        let template = FileNameTemplate::parse("fixed", &set).unwrap();
        let combination = first_combination(set);
        assert_eq!(template.render(&combination, &body("A")), "fixed");
    }

    #[test]
    fn test_default_template() {
        let set = parameters();
        let template = FileNameTemplate::default_for(&set);
        assert_eq!(template.source(), "{bodyName}-{params}");
        let combination = first_combination(set);
        assert_eq!(
            template.render(&combination, &body("Drawer")),
            "Drawer-c2-Depth12.5"
        );
    }

    #[test]
    fn test_default_template_without_parameters() {
        let set = ParameterSet::default();
        let template = FileNameTemplate::default_for(&set);
        let combination = first_combination(set);
        assert_eq!(template.render(&combination, &body("Handle")), "Handle");
    }
}
