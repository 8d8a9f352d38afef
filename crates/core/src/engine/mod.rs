//! Binding resolution engine and step sequencer.
//!
//! The engine walks the measured values of a table in declaration order,
//! fills every binding it can derive from the table and the static catalog,
//! and surfaces each remaining gap as one [`ResolutionUnit`] at a time. An
//! external answer provider (interactive or scripted) satisfies the unit and
//! submits the answer back; the sequencer drives this loop to completion.
pub mod binding;
pub mod export;
pub mod sequencer;

use crate::model::{Position, Resource, ResourceId, ResourceKind};

/// A single outstanding demand: one missing resource binding of a measured
/// value, or one missing position of a feature of interest. `name` carries
/// the distinct row identity for column-backed features, and is `None` for
/// features with a fixed identity.
#[derive(Debug, Clone, PartialEq)]
pub enum ResolutionUnit {
    Binding {
        measured_value: usize,
        kind: ResourceKind,
    },
    FeaturePosition {
        feature: ResourceId,
        name: Option<String>,
    },
}

/// What an answer provider hands back for a resolution unit.
#[derive(Debug, Clone, PartialEq)]
pub enum Answer {
    Resource(Resource),
    Position(Position),
}
