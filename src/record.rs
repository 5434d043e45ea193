//! Typed view over one raw dataset row.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::ConversionError;

const TITLE_KEY: &str = "title";
const RATING_KEY: &str = "vote_average";
const RELEASE_DATE_KEY: &str = "release_date";

/// One movie from the dataset.
///
/// Every attribute is independently optional. Serializes to exactly
/// `{"title", "rating", "release_date"}` with explicit `null`s.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Movie {
    pub title: Option<String>,
    pub rating: Option<f64>,
    /// ISO-8601 calendar date (`YYYY-MM-DD`); kept verbatim, parsed only when sorting.
    pub release_date: Option<String>,
}

impl Movie {
    pub fn new(
        title: Option<impl Into<String>>,
        rating: Option<f64>,
        release_date: Option<impl Into<String>>,
    ) -> Self {
        Self {
            title: title.map(Into::into),
            rating,
            release_date: release_date.map(Into::into),
        }
    }

    /// Build a movie from a raw JSON object.
    ///
    /// Missing keys and JSON `null` become `None`. Present values go through
    /// the field's converter and any failure rejects the whole record.
    pub fn from_raw(raw: &Map<String, Value>) -> Result<Self, ConversionError> {
        Ok(Self {
            title: convert_or_none(raw, TITLE_KEY, to_text)?,
            rating: convert_or_none(raw, RATING_KEY, to_float)?,
            release_date: convert_or_none(raw, RELEASE_DATE_KEY, to_text)?,
        })
    }
}

impl TryFrom<&Map<String, Value>> for Movie {
    type Error = ConversionError;

    fn try_from(raw: &Map<String, Value>) -> Result<Self, Self::Error> {
        Movie::from_raw(raw)
    }
}

fn convert_or_none<T>(
    raw: &Map<String, Value>,
    field: &'static str,
    converter: fn(&'static str, &Value) -> Result<T, ConversionError>,
) -> Result<Option<T>, ConversionError> {
    match raw.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(value) => converter(field, value).map(Some),
    }
}

fn to_text(field: &'static str, value: &Value) -> Result<String, ConversionError> {
    match value {
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        other => Err(ConversionError {
            field,
            expected: "a string",
            found: json_kind(other).to_string(),
        }),
    }
}

fn to_float(field: &'static str, value: &Value) -> Result<f64, ConversionError> {
    match value {
        Value::Number(n) => n.as_f64().ok_or_else(|| ConversionError {
            field,
            expected: "a number",
            found: n.to_string(),
        }),
        Value::String(s) => s.trim().parse::<f64>().map_err(|_| ConversionError {
            field,
            expected: "a number",
            found: format!("{s:?}"),
        }),
        other => Err(ConversionError {
            field,
            expected: "a number",
            found: json_kind(other).to_string(),
        }),
    }
}

pub(crate) fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
