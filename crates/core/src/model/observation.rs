use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

use crate::model::position::Position;

/// Value kind of a measured-value column, declared by its `TYPE` metadata.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ValueKind {
    #[default]
    Numeric,
    Count,
    Boolean,
    Text,
}

impl ValueKind {
    /// Undeclared or unknown type metadata means numeric.
    pub fn from_metadata(value: &str) -> Self {
        match value {
            "COUNT" => ValueKind::Count,
            "BOOLEAN" => ValueKind::Boolean,
            "TEXT" => ValueKind::Text,
            _ => ValueKind::Numeric,
        }
    }
}

/// A typed measured value.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum ObservationValue {
    Numeric(f64),
    Count(i64),
    Boolean(bool),
    Text(String),
}

/// A resource as it appears on an exported observation: per-row identity
/// already rendered, position resolved for features of interest.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BoundResource {
    pub name: String,
    #[serde(default)]
    pub uri: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
}

/// One fully-bound observation record, ready for protocol-level export.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BoundObservation {
    pub column: usize,
    pub row: usize,
    pub value: ObservationValue,
    pub timestamp: DateTime<FixedOffset>,
    pub feature_of_interest: BoundResource,
    pub observed_property: BoundResource,
    pub unit_of_measurement: BoundResource,
    pub sensor: BoundResource,
}
