use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};
use crate::model::resource::ResourceKind;

/// Semantic role carried by a table column or row.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    MeasuredValue,
    DateTime,
    Position,
    Sensor,
    ObservedProperty,
    UnitOfMeasurement,
    FeatureOfInterest,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::MeasuredValue => "measured value",
            Role::DateTime => "date-time",
            Role::Position => "position",
            Role::Sensor => "sensor",
            Role::ObservedProperty => "observed property",
            Role::UnitOfMeasurement => "unit of measurement",
            Role::FeatureOfInterest => "feature of interest",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Metadata vocabulary understood by the resolvers. Serialized forms match
/// the external configuration keys (`GROUP`, `PARSE_PATTERN`, `TYPE`, ...).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MetadataKey {
    Group,
    ParsePattern,
    #[serde(rename = "TYPE")]
    ValueType,
    PositionLatitude,
    PositionLongitude,
    PositionAltitude,
    PositionEpsgCode,
    TimeYear,
    TimeMonth,
    TimeDay,
    TimeHour,
    TimeMinute,
    TimeSecond,
    TimeZone,
}

/// Target of a related-resource reference: a column of the table itself or
/// an entry in the static resource catalog.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum RefTarget {
    Column(usize),
    CatalogId(String),
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RelatedReference {
    pub kind: ResourceKind,
    pub target: RefTarget,
}

/// One tagged column (or row) of the table: its index, role, and the ordered
/// metadata describing how its values are to be interpreted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TableElement {
    pub column: usize,
    #[serde(default)]
    pub row: Option<usize>,
    pub role: Role,
    #[serde(default)]
    pub metadata: Vec<(MetadataKey, String)>,
    #[serde(default)]
    pub related: Vec<RelatedReference>,
}

impl TableElement {
    pub fn new(column: usize, role: Role) -> Self {
        Self {
            column,
            row: None,
            role,
            metadata: Vec::new(),
            related: Vec::new(),
        }
    }

    pub fn with_metadata(mut self, key: MetadataKey, value: impl Into<String>) -> Self {
        self.metadata.push((key, value.into()));
        self
    }

    pub fn with_related(mut self, kind: ResourceKind, target: RefTarget) -> Self {
        self.related.push(RelatedReference { kind, target });
        self
    }

    /// First metadata value declared for `key`.
    pub fn metadata_value(&self, key: MetadataKey) -> Option<&str> {
        self.metadata
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Replaces the first entry for `key`, or appends when absent.
    pub fn set_metadata(&mut self, key: MetadataKey, value: impl Into<String>) {
        let value = value.into();
        match self.metadata.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.metadata.push((key, value)),
        }
    }

    pub fn related_target(&self, kind: ResourceKind) -> Option<&RefTarget> {
        self.related
            .iter()
            .find(|reference| reference.kind == kind)
            .map(|reference| &reference.target)
    }
}

/// The tagged table: raw cell values plus the element list in declaration
/// order. Declaration order is authoritative for group merges.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct DataTable {
    rows: Vec<Vec<String>>,
    elements: Vec<TableElement>,
    first_data_row: usize,
}

impl DataTable {
    pub fn new(rows: Vec<Vec<String>>, first_data_row: usize) -> Self {
        Self {
            rows,
            elements: Vec::new(),
            first_data_row,
        }
    }

    pub fn push_element(&mut self, element: TableElement) {
        self.elements.push(element);
    }

    pub fn elements(&self) -> &[TableElement] {
        &self.elements
    }

    /// Role and metadata edits made during resolution go through here.
    pub fn elements_mut(&mut self) -> &mut [TableElement] {
        &mut self.elements
    }

    pub fn element_for_column(&self, column: usize) -> Option<&TableElement> {
        self.elements.iter().find(|e| e.column == column)
    }

    pub fn cell(&self, column: usize, row: usize) -> Result<&str> {
        self.rows
            .get(row)
            .and_then(|r| r.get(column))
            .map(String::as_str)
            .ok_or(CoreError::MissingCell { column, row })
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn first_data_row(&self) -> usize {
        self.first_data_row
    }

    pub fn data_rows(&self) -> std::ops::Range<usize> {
        self.first_data_row..self.rows.len()
    }

    /// All elements of `role` whose `GROUP` metadata equals `group`, in
    /// declaration order.
    pub fn group_elements(&self, role: Role, group: &str) -> Vec<&TableElement> {
        self.elements
            .iter()
            .filter(|e| e.role == role && e.metadata_value(MetadataKey::Group) == Some(group))
            .collect()
    }

    /// Group id of the first element carrying `role`, in declaration order.
    pub fn first_group(&self, role: Role) -> Option<&str> {
        self.elements
            .iter()
            .filter(|e| e.role == role)
            .find_map(|e| e.metadata_value(MetadataKey::Group))
    }

    /// Distinct group ids declared for `role`, in declaration order.
    pub fn groups(&self, role: Role) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        for element in self.elements.iter().filter(|e| e.role == role) {
            if let Some(group) = element.metadata_value(MetadataKey::Group) {
                if !seen.contains(&group) {
                    seen.push(group);
                }
            }
        }
        seen
    }

    pub fn elements_with_role(&self, role: Role) -> impl Iterator<Item = &TableElement> {
        self.elements.iter().filter(move |e| e.role == role)
    }

    pub fn first_column_with_role(&self, role: Role) -> Option<usize> {
        self.elements_with_role(role).next().map(|e| e.column)
    }

    /// Distinct cell values of `column` over the data rows, first-seen order.
    /// Rows too short to carry the column are skipped.
    pub fn distinct_values(&self, column: usize) -> Vec<String> {
        let mut seen: Vec<String> = Vec::new();
        for row in self.data_rows() {
            if let Some(value) = self.rows.get(row).and_then(|r| r.get(column)) {
                if !seen.iter().any(|v| v == value) {
                    seen.push(value.clone());
                }
            }
        }
        seen
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_table() -> DataTable {
        let mut table = DataTable::new(
            vec![
                vec!["station".into(), "temp".into()],
                vec!["a".into(), "1.0".into()],
                vec!["a".into(), "2.0".into()],
                vec!["b".into(), "3.0".into()],
            ],
            1,
        );
        table.push_element(TableElement::new(0, Role::FeatureOfInterest));
        table.push_element(
            TableElement::new(1, Role::MeasuredValue)
                .with_metadata(MetadataKey::ValueType, "NUMERIC"),
        );
        table
    }

    #[test]
    fn metadata_lookup_is_first_match_and_update_in_place() {
        let mut element = TableElement::new(0, Role::Position)
            .with_metadata(MetadataKey::Group, "A")
            .with_metadata(MetadataKey::Group, "B");
        assert_eq!(element.metadata_value(MetadataKey::Group), Some("A"));

        element.set_metadata(MetadataKey::Group, "C");
        assert_eq!(element.metadata_value(MetadataKey::Group), Some("C"));
        assert_eq!(element.metadata.len(), 2);
    }

    #[test]
    fn group_elements_follow_declaration_order() {
        let mut table = DataTable::new(vec![], 0);
        table.push_element(
            TableElement::new(2, Role::Position).with_metadata(MetadataKey::Group, "A"),
        );
        table.push_element(
            TableElement::new(1, Role::Position).with_metadata(MetadataKey::Group, "A"),
        );
        table.push_element(
            TableElement::new(3, Role::DateTime).with_metadata(MetadataKey::Group, "A"),
        );

        let columns: Vec<usize> = table
            .group_elements(Role::Position, "A")
            .iter()
            .map(|e| e.column)
            .collect();
        assert_eq!(columns, vec![2, 1]);
    }

    #[test]
    fn distinct_values_preserve_first_seen_order() {
        let table = sample_table();
        assert_eq!(
            table.distinct_values(0),
            vec!["a".to_string(), "b".to_string()]
        );
    }

    #[test]
    fn cell_out_of_range_is_an_error() {
        let table = sample_table();
        assert_eq!(
            table.cell(5, 1),
            Err(CoreError::MissingCell { column: 5, row: 1 })
        );
    }

    #[test]
    fn metadata_key_serializes_with_configuration_vocabulary() {
        let json = serde_json::to_string(&MetadataKey::ParsePattern).unwrap();
        assert_eq!(json, "\"PARSE_PATTERN\"");
        let json = serde_json::to_string(&MetadataKey::ValueType).unwrap();
        assert_eq!(json, "\"TYPE\"");
    }
}
