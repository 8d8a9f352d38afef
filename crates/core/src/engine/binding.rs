// Binding resolution engine - fills the binding set of every measured value,
// automatically where the table or catalog already carries the answer,
// otherwise by demanding one missing piece at a time.

use tracing::debug;

use crate::engine::{Answer, ResolutionUnit};
use crate::error::{CoreError, Result};
use crate::model::{
    BindingKind, MeasuredValue, MetadataKey, PositionBinding, RefTarget, Resource, ResourceId,
    ResourceKind, Role,
};
use crate::resolver::context::ResolutionContext;

pub struct BindingEngine {
    context: ResolutionContext,
    measured_values: Vec<MeasuredValue>,
}

impl BindingEngine {
    /// Scans the table for measured-value columns and creates one (still
    /// unbound) measured value per column, in declaration order.
    pub fn new(context: ResolutionContext) -> Self {
        let measured_values = context
            .table
            .elements_with_role(Role::MeasuredValue)
            .map(|element| MeasuredValue::new(element.column))
            .collect();
        Self {
            context,
            measured_values,
        }
    }

    pub fn context(&self) -> &ResolutionContext {
        &self.context
    }

    pub fn measured_values(&self) -> &[MeasuredValue] {
        &self.measured_values
    }

    /// First measured value with at least one unfilled binding, in table
    /// order. `None` is the terminal condition of the resolution loop.
    pub fn find_next_incomplete(&self) -> Option<usize> {
        self.measured_values.iter().position(|mv| !mv.is_complete())
    }

    pub fn incomplete_count(&self) -> usize {
        self.measured_values
            .iter()
            .filter(|mv| !mv.is_complete())
            .count()
    }

    /// Advances automatic resolution as far as it goes and returns the next
    /// demand for an external answer, or `None` when every measured value is
    /// complete and every feature of interest has a position.
    pub fn next_demand(&mut self) -> Result<Option<ResolutionUnit>> {
        while let Some(index) = self.find_next_incomplete() {
            self.try_auto_bind(index)?;
            let mv = &self.measured_values[index];
            match mv.first_missing() {
                None => continue,
                Some(BindingKind::Resource(kind)) => {
                    return Ok(Some(ResolutionUnit::Binding {
                        measured_value: index,
                        kind,
                    }));
                }
                // there is no demand kind for timestamps; a measured value
                // without a reachable date-time group cannot be completed
                Some(BindingKind::Timestamp) => {
                    return Err(CoreError::IncompleteBinding {
                        missing: format!(
                            "a date-time group for measured value column {}",
                            mv.column
                        ),
                    });
                }
            }
        }
        Ok(self.next_feature_position_demand())
    }

    /// Binds `answer` into the target of `unit` after deduplication through
    /// the registry.
    pub fn submit(&mut self, unit: &ResolutionUnit, answer: Answer) -> Result<()> {
        match (unit, answer) {
            (
                ResolutionUnit::Binding {
                    measured_value,
                    kind,
                },
                Answer::Resource(resource),
            ) => {
                if resource.kind != *kind {
                    return Err(CoreError::AnswerMismatch {
                        reason: format!(
                            "expected a {} resource, got a {}",
                            kind, resource.kind
                        ),
                    });
                }
                if self.measured_values.get(*measured_value).is_none() {
                    return Err(CoreError::AnswerMismatch {
                        reason: format!("no measured value with index {measured_value}"),
                    });
                }
                let id = self.register(resource)?;
                self.measured_values[*measured_value].bind(*kind, id);
                debug!(index = *measured_value, %kind, "bound answered resource");
                Ok(())
            }
            (ResolutionUnit::FeaturePosition { feature, name }, Answer::Position(position)) => {
                let resource = self.context.registry.get_mut(*feature);
                match name {
                    None => resource.position = Some(PositionBinding::Fixed(position)),
                    Some(name) => {
                        resource.positions_by_name.insert(name.clone(), position);
                    }
                }
                debug!(feature = resource.display_name(), "bound answered position");
                Ok(())
            }
            (unit, answer) => Err(CoreError::AnswerMismatch {
                reason: format!("answer {answer:?} does not fit unit {unit:?}"),
            }),
        }
    }

    /// Errors unless every measured value is complete and every feature of
    /// interest position is covered.
    pub fn ensure_complete(&self) -> Result<()> {
        for mv in &self.measured_values {
            if let Some(missing) = mv.first_missing() {
                return Err(CoreError::IncompleteBinding {
                    missing: format!("{} for measured value column {}", missing, mv.column),
                });
            }
        }
        if let Some(ResolutionUnit::FeaturePosition { feature, name }) =
            self.next_feature_position_demand()
        {
            let resource = self.context.registry.get(feature);
            let identity = name.unwrap_or_else(|| resource.display_name().to_string());
            return Err(CoreError::IncompleteBinding {
                missing: format!("a position for feature of interest '{identity}'"),
            });
        }
        Ok(())
    }

    /// Fills every binding of measured value `index` that the table or the
    /// catalog can supply without an external answer.
    fn try_auto_bind(&mut self, index: usize) -> Result<()> {
        let column = self.measured_values[index].column;

        for kind in ResourceKind::ALL {
            if self.measured_values[index].binding(kind).is_some() {
                continue;
            }
            if let Some(candidate) = self.auto_candidate(column, kind)? {
                let id = self.register(candidate)?;
                self.measured_values[index].bind(kind, id);
                debug!(column, %kind, "bound resource from table structure");
            }
        }

        if self.measured_values[index].date_time_group.is_none() {
            if let Some(group) = self.auto_date_time_group(column) {
                debug!(column, group = %group, "associated date-time group");
                self.measured_values[index].date_time_group = Some(group);
            }
        }
        Ok(())
    }

    /// The resource the table/configuration already declares for `kind`, if
    /// any: a related reference on the measured-value column wins, then the
    /// first column carrying the matching role, then - for sensors only -
    /// the sole catalog sensor.
    fn auto_candidate(&self, column: usize, kind: ResourceKind) -> Result<Option<Resource>> {
        if let Some(element) = self.context.table.element_for_column(column) {
            match element.related_target(kind) {
                Some(RefTarget::Column(related)) => {
                    return Ok(Some(Resource::from_column(kind, *related)));
                }
                Some(RefTarget::CatalogId(id)) => {
                    if let Some(resource) = self.context.catalog.lookup(id, kind)? {
                        return Ok(Some(resource.clone()));
                    }
                    // unknown id: fall through to the role-column fallback
                }
                None => {}
            }
        }

        if let Some(related) = self.context.table.first_column_with_role(kind.role()) {
            return Ok(Some(Resource::from_column(kind, related)));
        }

        if kind == ResourceKind::Sensor {
            if let Some(sensor) = self.context.catalog.single(kind) {
                return Ok(Some(sensor.clone()));
            }
        }

        Ok(None)
    }

    /// The date-time group supplying this measured value's timestamps: its
    /// own `GROUP` metadata when that names a date-time group, otherwise the
    /// first date-time group of the table.
    fn auto_date_time_group(&self, column: usize) -> Option<String> {
        let table = &self.context.table;
        if let Some(element) = table.element_for_column(column) {
            if let Some(group) = element.metadata_value(MetadataKey::Group) {
                if !table.group_elements(Role::DateTime, group).is_empty() {
                    return Some(group.to_string());
                }
            }
        }
        table.first_group(Role::DateTime).map(str::to_string)
    }

    /// Registers a resource, attaching the table's position group to a
    /// positionless feature of interest when exactly one group is declared.
    fn register(&mut self, mut resource: Resource) -> Result<ResourceId> {
        if resource.kind == ResourceKind::FeatureOfInterest && resource.position.is_none() {
            if let Some(group) = self.single_position_group() {
                resource.position = Some(PositionBinding::TableGroup(group));
            }
        }
        self.context.registry.lookup_or_register(resource)
    }

    fn single_position_group(&self) -> Option<String> {
        match self.context.table.groups(Role::Position).as_slice() {
            [group] => Some((*group).to_string()),
            _ => None,
        }
    }

    /// Next feature of interest still lacking a position: one demand for a
    /// fixed-identity feature, or one demand per distinct uncovered row
    /// identity for a column-backed feature.
    fn next_feature_position_demand(&self) -> Option<ResolutionUnit> {
        for (id, resource) in self.context.registry.all(ResourceKind::FeatureOfInterest) {
            if resource.position.is_some() {
                continue;
            }
            match resource.column {
                None => {
                    return Some(ResolutionUnit::FeaturePosition {
                        feature: id,
                        name: None,
                    });
                }
                Some(column) => {
                    for name in self.context.table.distinct_values(column) {
                        if !resource.positions_by_name.contains_key(&name) {
                            return Some(ResolutionUnit::FeaturePosition {
                                feature: id,
                                name: Some(name),
                            });
                        }
                    }
                }
            }
        }
        None
    }
}
