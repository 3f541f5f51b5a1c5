use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Annotation {
    pub id: Option<String>,
    pub lat: f64,
    pub lng: f64,
    pub message: String,
    pub author_id: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NewAnnotation {
    pub lat: String,
    pub lng: String,
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct AnnotationRow {
    #[serde(default)]
    pub id: Option<Value>,
    #[serde(default)]
    pub lat: Option<Value>,
    #[serde(default)]
    pub lng: Option<Value>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub user_id: Option<Value>,
    #[serde(default)]
    pub created_at: Option<String>,
}

#[derive(Debug, PartialEq)]
pub enum RowError {
    MissingCoordinate(&'static str),
    InvalidCoordinate(&'static str, String),
}

impl fmt::Display for RowError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RowError::MissingCoordinate(column) => write!(f, "`{column}` is missing"),
            RowError::InvalidCoordinate(column, raw) => {
                write!(f, "`{column}` is not a decimal number: {raw:?}")
            }
        }
    }
}

impl TryFrom<AnnotationRow> for Annotation {
    type Error = RowError;

    fn try_from(row: AnnotationRow) -> Result<Self, Self::Error> {
        Ok(Annotation {
            id: row.id.as_ref().and_then(scalar_to_string),
            lat: parse_coordinate("lat", row.lat)?,
            lng: parse_coordinate("lng", row.lng)?,
            message: row.message.unwrap_or_default(),
            author_id: row.user_id.as_ref().and_then(scalar_to_string),
            created_at: row.created_at.as_deref().and_then(parse_timestamp),
        })
    }
}

/// Decimal coordinate text. `NaN` and infinities can't be placed on a map.
pub fn coordinate_from_text(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|parsed| parsed.is_finite())
}

fn parse_coordinate(column: &'static str, value: Option<Value>) -> Result<f64, RowError> {
    match value {
        Some(Value::Number(number)) => number
            .as_f64()
            .ok_or_else(|| RowError::InvalidCoordinate(column, number.to_string())),
        Some(Value::String(text)) => {
            coordinate_from_text(&text).ok_or(RowError::InvalidCoordinate(column, text))
        }
        Some(Value::Null) | None => Err(RowError::MissingCoordinate(column)),
        Some(other) => Err(RowError::InvalidCoordinate(column, other.to_string())),
    }
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        _ => None,
    }
}

/// Accepts `timestamptz` (RFC 3339) and plain `timestamp` columns, the latter read as UTC.
fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(raw) {
        return Some(timestamp.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f"))
        .ok()
        .map(|naive| naive.and_utc())
}
