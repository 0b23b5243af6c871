//! Parameter values
//!
//! A swept parameter takes scalar values, either numbers or strings. The
//! canonical text form produced by [`ParameterValue`]'s `Display` is what ends
//! up in file names, folder names and model expressions, so it is
//! locale-independent and stable across runs.

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// One scalar variant of a swept parameter
#[derive(Debug, Clone, PartialEq)]
pub enum ParameterValue {
    /// Whole number written without a fraction in the configuration
    Integer(i64),
    /// Number written with a fraction or exponent
    Float(f64),
    /// Free-form text (e.g. a material or style name)
    Text(String),
}

impl ParameterValue {
    /// Returns true for integer and float values
    pub fn is_numeric(&self) -> bool {
        !matches!(self, ParameterValue::Text(_))
    }
}

impl fmt::Display for ParameterValue {
    /// Integers print plainly, floats print the shortest decimal that
    /// round-trips and always keep a `.`, text prints verbatim.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParameterValue::Integer(v) => write!(f, "{v}"),
            ParameterValue::Float(v) => {
                let text = v.to_string();
                if v.is_finite() && !text.contains('.') {
                    write!(f, "{text}.0")
                } else {
                    f.write_str(&text)
                }
            }
            ParameterValue::Text(v) => f.write_str(v),
        }
    }
}

impl From<i64> for ParameterValue {
    fn from(value: i64) -> Self {
        ParameterValue::Integer(value)
    }
}

impl From<f64> for ParameterValue {
    fn from(value: f64) -> Self {
        ParameterValue::Float(value)
    }
}

impl From<&str> for ParameterValue {
    fn from(value: &str) -> Self {
        ParameterValue::Text(value.to_string())
    }
}

impl Serialize for ParameterValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            ParameterValue::Integer(v) => serializer.serialize_i64(*v),
            ParameterValue::Float(v) => serializer.serialize_f64(*v),
            ParameterValue::Text(v) => serializer.serialize_str(v),
        }
    }
}

struct ParameterValueVisitor;

impl<'de> Visitor<'de> for ParameterValueVisitor {
    type Value = ParameterValue;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a number or a string")
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
        Ok(ParameterValue::Integer(v))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
        i64::try_from(v)
            .map(ParameterValue::Integer)
            .map_err(|_| E::custom(format!("integer {v} is out of range")))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
        Ok(ParameterValue::Float(v))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        Ok(ParameterValue::Text(v.to_string()))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<Self::Value, E> {
        Ok(ParameterValue::Text(v))
    }
}

impl<'de> Deserialize<'de> for ParameterValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(ParameterValueVisitor)
    }
}
