// Export materializer - turns the completed binding set into one typed
// observation record per measured-value cell. Nothing is persisted here;
// the records feed an external exporter.

use chrono::{DateTime, FixedOffset};

use crate::engine::binding::BindingEngine;
use crate::error::{CoreError, Result};
use crate::model::{
    BoundObservation, BoundResource, MetadataKey, ObservationValue, PositionBinding, ResourceId,
    ValueKind,
};
use crate::resolver::numeric::{parse_decimal, parse_integer};

impl BindingEngine {
    /// Materializes every measured-value cell into a bound observation.
    /// Fails without producing anything when any binding is still open:
    /// exporting an incomplete observation is never permitted.
    pub fn observations(
        &self,
        reference: &DateTime<FixedOffset>,
    ) -> Result<Vec<BoundObservation>> {
        self.ensure_complete()?;

        let context = self.context();
        let table = &context.table;
        let mut observations = Vec::new();

        for mv in self.measured_values() {
            let value_kind = table
                .element_for_column(mv.column)
                .and_then(|element| element.metadata_value(MetadataKey::ValueType))
                .map(ValueKind::from_metadata)
                .unwrap_or_default();
            let group = mv.date_time_group.as_deref().ok_or_else(|| {
                CoreError::IncompleteBinding {
                    missing: format!("a date-time group for measured value column {}", mv.column),
                }
            })?;
            let bindings = [
                mv.feature_of_interest,
                mv.observed_property,
                mv.unit_of_measurement,
                mv.sensor,
            ];
            let [Some(feature), Some(property), Some(unit), Some(sensor)] = bindings else {
                return Err(CoreError::IncompleteBinding {
                    missing: format!("bindings for measured value column {}", mv.column),
                });
            };

            for row in table.data_rows() {
                let literal = table.cell(mv.column, row)?;
                let value = parse_value(value_kind, literal, context.decimal_separator)?;
                let timestamp = context.resolve_datetime(group, row, reference)?;

                observations.push(BoundObservation {
                    column: mv.column,
                    row,
                    value,
                    timestamp,
                    feature_of_interest: self.render_feature(feature, row)?,
                    observed_property: self.render_resource(property, row)?,
                    unit_of_measurement: self.render_resource(unit, row)?,
                    sensor: self.render_resource(sensor, row)?,
                });
            }
        }
        Ok(observations)
    }

    /// Renders a resource for one row: column-backed resources take their
    /// identity from that row's cell.
    fn render_resource(&self, id: ResourceId, row: usize) -> Result<BoundResource> {
        let context = self.context();
        let resource = context.registry.get(id);
        let name = match resource.column {
            Some(column) => context.table.cell(column, row)?.to_string(),
            None => resource.name.clone(),
        };
        Ok(BoundResource {
            name,
            uri: resource.uri.clone(),
            position: None,
        })
    }

    fn render_feature(&self, id: ResourceId, row: usize) -> Result<BoundResource> {
        let mut bound = self.render_resource(id, row)?;
        let context = self.context();
        let resource = context.registry.get(id);

        bound.position = match &resource.position {
            Some(PositionBinding::Fixed(position)) => Some(*position),
            Some(PositionBinding::TableGroup(group)) => {
                Some(context.resolve_position(group, row)?)
            }
            None => Some(
                *resource
                    .positions_by_name
                    .get(&bound.name)
                    .ok_or_else(|| CoreError::IncompleteBinding {
                        missing: format!("a position for feature of interest '{}'", bound.name),
                    })?,
            ),
        };
        Ok(bound)
    }
}

fn parse_value(kind: ValueKind, literal: &str, decimal_separator: char) -> Result<ObservationValue> {
    match kind {
        ValueKind::Numeric => Ok(ObservationValue::Numeric(parse_decimal(
            literal,
            decimal_separator,
        )?)),
        ValueKind::Count => Ok(ObservationValue::Count(parse_integer(literal)?)),
        ValueKind::Boolean => {
            let literal = literal.trim();
            Ok(ObservationValue::Boolean(
                literal.eq_ignore_ascii_case("true") || literal == "1",
            ))
        }
        ValueKind::Text => Ok(ObservationValue::Text(literal.to_string())),
    }
}
