// Resolution context - owns the tagged table, resource registry, and static
// catalog for exactly one resolution run. Concurrent runs get independent
// contexts; nothing here is shared.

use chrono::{DateTime, FixedOffset};

use crate::error::Result;
use crate::model::{DataTable, Position, ResourceCatalog, Timestamp};
use crate::registry::ResourceRegistry;
use crate::resolver::composite;

#[derive(Debug, Clone)]
pub struct ResolutionContext {
    pub table: DataTable,
    pub registry: ResourceRegistry,
    pub catalog: ResourceCatalog,
    pub decimal_separator: char,
}

impl ResolutionContext {
    pub fn new(table: DataTable, catalog: ResourceCatalog, decimal_separator: char) -> Self {
        Self {
            table,
            registry: ResourceRegistry::new(),
            catalog,
            decimal_separator,
        }
    }

    pub fn resolve_timestamp(&self, group: &str, row: usize) -> Result<Timestamp> {
        composite::resolve_timestamp(&self.table, group, row)
    }

    pub fn resolve_datetime(
        &self,
        group: &str,
        row: usize,
        reference: &DateTime<FixedOffset>,
    ) -> Result<DateTime<FixedOffset>> {
        self.resolve_timestamp(group, row)?.to_datetime(reference)
    }

    pub fn resolve_position(&self, group: &str, row: usize) -> Result<Position> {
        composite::resolve_position(&self.table, group, row, self.decimal_separator)
    }
}
