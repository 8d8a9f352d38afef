pub mod catalog;
pub mod measured_value;
pub mod observation;
pub mod position;
pub mod resource;
pub mod table;
pub mod timestamp;

pub use catalog::{CatalogEntry, ResourceCatalog};
pub use measured_value::{BindingKind, MeasuredValue};
pub use observation::{BoundObservation, BoundResource, ObservationValue, ValueKind};
pub use position::{Coordinate, Position, SpatialUnit, UNSET_EPSG};
pub use resource::{PositionBinding, Resource, ResourceId, ResourceKind};
pub use table::{DataTable, MetadataKey, RefTarget, RelatedReference, Role, TableElement};
pub use timestamp::Timestamp;
