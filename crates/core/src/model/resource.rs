use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::model::position::Position;
use crate::model::table::Role;

/// The four resource variants a measured value binds to.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ResourceKind {
    FeatureOfInterest,
    ObservedProperty,
    UnitOfMeasurement,
    Sensor,
}

impl ResourceKind {
    /// Binding resolution order: features of interest first, sensors last.
    pub const ALL: [ResourceKind; 4] = [
        ResourceKind::FeatureOfInterest,
        ResourceKind::ObservedProperty,
        ResourceKind::UnitOfMeasurement,
        ResourceKind::Sensor,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceKind::FeatureOfInterest => "feature of interest",
            ResourceKind::ObservedProperty => "observed property",
            ResourceKind::UnitOfMeasurement => "unit of measurement",
            ResourceKind::Sensor => "sensor",
        }
    }

    /// The table role declaring columns of this resource kind.
    pub fn role(&self) -> Role {
        match self {
            ResourceKind::FeatureOfInterest => Role::FeatureOfInterest,
            ResourceKind::ObservedProperty => Role::ObservedProperty,
            ResourceKind::UnitOfMeasurement => Role::UnitOfMeasurement,
            ResourceKind::Sensor => Role::Sensor,
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Non-owning handle into the resource registry. Handles are only minted by
/// the registry that owns the resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ResourceId(pub(crate) usize);

/// How a feature of interest obtains its position: a concrete value, or a
/// position group of the table resolved per row.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum PositionBinding {
    Fixed(Position),
    TableGroup(String),
}

/// A named/URI-identified domain entity. Resources backed by a table column
/// take their per-row identity from that column's cells; the position fields
/// are only meaningful for features of interest.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Resource {
    pub kind: ResourceKind,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub uri: String,
    #[serde(default)]
    pub column: Option<usize>,
    #[serde(default)]
    pub position: Option<PositionBinding>,
    #[serde(default)]
    pub positions_by_name: BTreeMap<String, Position>,
}

impl Resource {
    pub fn named(kind: ResourceKind, name: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
            uri: String::new(),
            column: None,
            position: None,
            positions_by_name: BTreeMap::new(),
        }
    }

    pub fn from_column(kind: ResourceKind, column: usize) -> Self {
        Self {
            kind,
            name: String::new(),
            uri: String::new(),
            column: Some(column),
            position: None,
            positions_by_name: BTreeMap::new(),
        }
    }

    pub fn with_uri(mut self, uri: impl Into<String>) -> Self {
        self.uri = uri.into();
        self
    }

    pub fn with_position(mut self, binding: PositionBinding) -> Self {
        self.position = Some(binding);
        self
    }

    /// A resource must be identifiable: by name, by URI, or by the table
    /// column carrying its per-row identity.
    pub fn is_valid(&self) -> bool {
        !self.name.is_empty() || !self.uri.is_empty() || self.column.is_some()
    }

    /// The name, or the URI when no name is set.
    pub fn display_name(&self) -> &str {
        if self.name.is_empty() {
            &self.uri
        } else {
            &self.name
        }
    }

    /// Semantic identity: name comparison when both sides carry a name, URI
    /// comparison otherwise. Column-backed resources with neither compare by
    /// backing column.
    pub fn same_identity(&self, other: &Resource) -> bool {
        if self.kind != other.kind {
            return false;
        }
        if !self.name.is_empty() && !other.name.is_empty() {
            return self.name == other.name;
        }
        if !self.uri.is_empty() || !other.uri.is_empty() {
            return self.uri == other.uri;
        }
        self.column.is_some() && self.column == other.column
    }
}
