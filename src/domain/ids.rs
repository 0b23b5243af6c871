//! Domain identifier types with validation
//!
//! Newtype wrappers for the names that flow from the sweep configuration into
//! the CAD model and into output paths.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Parameter name newtype wrapper
///
/// Names a user parameter of the CAD model. The name also serves as a
/// `{placeholder}` in file name templates, so braces are not allowed.
///
/// # Examples
///
/// ```
/// use parametric_export::domain::ids::ParameterName;
/// use std::str::FromStr;
///
/// let name = ParameterName::from_str("COLUMNS").unwrap();
/// assert_eq!(name.as_str(), "COLUMNS");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ParameterName(String);

impl ParameterName {
    /// Creates a new ParameterName from a string
    ///
    /// Returns `Err` if the name is blank or contains `{` or `}`
    pub fn new(name: impl Into<String>) -> Result<Self, String> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err("Parameter name cannot be empty".to_string());
        }
        if name.contains(['{', '}']) {
            return Err(format!("Parameter name '{name}' cannot contain braces"));
        }
        Ok(Self(name))
    }

    /// Returns the parameter name as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes self and returns the inner String
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for ParameterName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ParameterName {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for ParameterName {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ParameterName> for String {
    fn from(name: ParameterName) -> Self {
        name.0
    }
}

impl AsRef<str> for ParameterName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Body name newtype wrapper
///
/// Names a solid body in the CAD model. Body names become part of output file
/// names, so path separators are rejected.
///
/// # Examples
///
/// ```
/// use parametric_export::domain::ids::BodyName;
/// use std::str::FromStr;
///
/// let body = BodyName::from_str("Handle").unwrap();
/// assert_eq!(body.to_string(), "Handle");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct BodyName(String);

impl BodyName {
    /// Creates a new BodyName from a string
    pub fn new(name: impl Into<String>) -> Result<Self, String> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err("Body name cannot be empty".to_string());
        }
        if name.contains(['/', '\\']) {
            return Err(format!("Body name '{name}' cannot contain path separators"));
        }
        Ok(Self(name))
    }

    /// Returns the body name as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BodyName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for BodyName {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for BodyName {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<BodyName> for String {
    fn from(name: BodyName) -> Self {
        name.0
    }
}

impl AsRef<str> for BodyName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
