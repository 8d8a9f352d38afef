use std::fmt;

use crate::model::resource::{ResourceId, ResourceKind};

/// One missing piece of a measured value's binding set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindingKind {
    Resource(ResourceKind),
    Timestamp,
}

impl fmt::Display for BindingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BindingKind::Resource(kind) => kind.fmt(f),
            BindingKind::Timestamp => f.write_str("timestamp"),
        }
    }
}

/// The binding set of one measured-value column: four resource handles plus
/// the date-time group whose composite value supplies the per-row timestamp.
/// Complete once all five are set; mutated only by the binding engine.
#[derive(Debug, Clone, PartialEq)]
pub struct MeasuredValue {
    pub column: usize,
    pub feature_of_interest: Option<ResourceId>,
    pub observed_property: Option<ResourceId>,
    pub unit_of_measurement: Option<ResourceId>,
    pub sensor: Option<ResourceId>,
    pub date_time_group: Option<String>,
}

impl MeasuredValue {
    pub fn new(column: usize) -> Self {
        Self {
            column,
            feature_of_interest: None,
            observed_property: None,
            unit_of_measurement: None,
            sensor: None,
            date_time_group: None,
        }
    }

    pub fn binding(&self, kind: ResourceKind) -> Option<ResourceId> {
        match kind {
            ResourceKind::FeatureOfInterest => self.feature_of_interest,
            ResourceKind::ObservedProperty => self.observed_property,
            ResourceKind::UnitOfMeasurement => self.unit_of_measurement,
            ResourceKind::Sensor => self.sensor,
        }
    }

    pub fn bind(&mut self, kind: ResourceKind, id: ResourceId) {
        match kind {
            ResourceKind::FeatureOfInterest => self.feature_of_interest = Some(id),
            ResourceKind::ObservedProperty => self.observed_property = Some(id),
            ResourceKind::UnitOfMeasurement => self.unit_of_measurement = Some(id),
            ResourceKind::Sensor => self.sensor = Some(id),
        }
    }

    pub fn is_complete(&self) -> bool {
        self.first_missing().is_none()
    }

    /// First missing binding in the fixed resolution order: feature of
    /// interest, observed property, unit of measurement, sensor, timestamp.
    pub fn first_missing(&self) -> Option<BindingKind> {
        for kind in ResourceKind::ALL {
            if self.binding(kind).is_none() {
                return Some(BindingKind::Resource(kind));
            }
        }
        if self.date_time_group.is_none() {
            return Some(BindingKind::Timestamp);
        }
        None
    }
}
