// Import configuration - the YAML-declared counterpart of the interactive
// wizard: column assignments, static catalog, and scripted answers.

use serde::Deserialize;

use obsbind_core::model::{
    CatalogEntry, DataTable, MetadataKey, Position, RelatedReference, Resource, ResourceCatalog,
    Role, TableElement,
};
use obsbind_core::{Answer, ResolutionUnit};

fn default_decimal_separator() -> char {
    '.'
}

fn default_first_data_row() -> usize {
    1
}

#[derive(Debug, Deserialize)]
pub struct ImportConfig {
    #[serde(default = "default_decimal_separator")]
    pub decimal_separator: char,
    /// Rows before this index are headers.
    #[serde(default = "default_first_data_row")]
    pub first_data_row: usize,
    pub columns: Vec<ColumnAssignment>,
    #[serde(default)]
    pub catalog: Vec<CatalogEntry>,
    #[serde(default)]
    pub answers: AnswerScript,
}

#[derive(Debug, Deserialize)]
pub struct ColumnAssignment {
    pub column: usize,
    pub role: Role,
    #[serde(default)]
    pub metadata: Vec<MetadataEntry>,
    #[serde(default)]
    pub related: Vec<RelatedReference>,
}

#[derive(Debug, Deserialize)]
pub struct MetadataEntry {
    pub key: MetadataKey,
    pub value: String,
}

/// Pre-declared answers, consumed in order as the sequencer demands them.
#[derive(Debug, Default, Deserialize)]
pub struct AnswerScript {
    #[serde(default)]
    pub resources: Vec<Resource>,
    #[serde(default)]
    pub positions: Vec<PositionAnswer>,
}

#[derive(Debug, Deserialize)]
pub struct PositionAnswer {
    /// Row identity the position answers for; absent for a fixed-identity
    /// feature of interest.
    #[serde(default)]
    pub feature: Option<String>,
    pub position: Position,
}

impl ImportConfig {
    /// Builds the tagged table from raw CSV rows and the declared column
    /// assignments.
    pub fn build_table(&self, rows: Vec<Vec<String>>) -> DataTable {
        let mut table = DataTable::new(rows, self.first_data_row);
        for assignment in &self.columns {
            let mut element = TableElement::new(assignment.column, assignment.role);
            for entry in &assignment.metadata {
                element = element.with_metadata(entry.key, entry.value.clone());
            }
            element.related = assignment.related.clone();
            table.push_element(element);
        }
        table
    }

    pub fn build_catalog(&self) -> ResourceCatalog {
        ResourceCatalog::new(self.catalog.clone())
    }
}

/// Answer provider backed by the configuration's pre-declared answers.
pub struct ScriptedAnswers {
    resources: Vec<Resource>,
    positions: Vec<PositionAnswer>,
}

impl ScriptedAnswers {
    pub fn new(script: AnswerScript) -> Self {
        Self {
            resources: script.resources,
            positions: script.positions,
        }
    }

    /// Takes the first declared answer fitting `unit`, or `None` when the
    /// script has nothing left for it.
    pub fn answer(&mut self, unit: &ResolutionUnit) -> Option<Answer> {
        match unit {
            ResolutionUnit::Binding { kind, .. } => {
                let index = self
                    .resources
                    .iter()
                    .position(|resource| resource.kind == *kind)?;
                Some(Answer::Resource(self.resources.remove(index)))
            }
            ResolutionUnit::FeaturePosition { name, .. } => {
                let index = self
                    .positions
                    .iter()
                    .position(|answer| answer.feature.as_deref() == name.as_deref())?;
                Some(Answer::Position(self.positions.remove(index).position))
            }
        }
    }
}
