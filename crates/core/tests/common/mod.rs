use obsbind_core::model::{
    DataTable, MetadataKey, Position, Resource, ResourceCatalog, ResourceKind, Role, TableElement,
};
use obsbind_core::{Answer, BindingEngine, ResolutionContext, ResolutionUnit};

#[allow(dead_code)]
pub fn engine_for(table: DataTable, decimal_separator: char) -> BindingEngine {
    BindingEngine::new(ResolutionContext::new(
        table,
        ResourceCatalog::default(),
        decimal_separator,
    ))
}

#[allow(dead_code)]
pub fn engine_with_catalog(
    table: DataTable,
    catalog: ResourceCatalog,
    decimal_separator: char,
) -> BindingEngine {
    BindingEngine::new(ResolutionContext::new(table, catalog, decimal_separator))
}

/// A minimal fully self-describing table: one measured-value column backed
/// by feature / property / unit / sensor columns, a date-time column, and a
/// position group, so nothing needs an external answer.
#[allow(dead_code)]
pub fn self_describing_table() -> DataTable {
    let mut table = DataTable::new(
        vec![
            vec![
                "station".into(),
                "property".into(),
                "unit".into(),
                "sensor".into(),
                "date".into(),
                "value".into(),
                "lat".into(),
                "lon".into(),
            ],
            vec![
                "ws-1".into(),
                "temperature".into(),
                "degC".into(),
                "thermo-1".into(),
                "12.10.2011".into(),
                "21.5".into(),
                "52.2".into(),
                "7.4".into(),
            ],
            vec![
                "ws-2".into(),
                "temperature".into(),
                "degC".into(),
                "thermo-1".into(),
                "13.10.2011".into(),
                "19.0".into(),
                "51.9".into(),
                "7.6".into(),
            ],
        ],
        1,
    );
    table.push_element(TableElement::new(0, Role::FeatureOfInterest));
    table.push_element(TableElement::new(1, Role::ObservedProperty));
    table.push_element(TableElement::new(2, Role::UnitOfMeasurement));
    table.push_element(TableElement::new(3, Role::Sensor));
    table.push_element(
        TableElement::new(4, Role::DateTime)
            .with_metadata(MetadataKey::Group, "1")
            .with_metadata(MetadataKey::ParsePattern, "d.M.yyyy")
            .with_metadata(MetadataKey::TimeHour, "12")
            .with_metadata(MetadataKey::TimeMinute, "0")
            .with_metadata(MetadataKey::TimeSecond, "0")
            .with_metadata(MetadataKey::TimeZone, "1"),
    );
    table.push_element(
        TableElement::new(5, Role::MeasuredValue).with_metadata(MetadataKey::ValueType, "NUMERIC"),
    );
    table.push_element(
        TableElement::new(6, Role::Position)
            .with_metadata(MetadataKey::Group, "A")
            .with_metadata(MetadataKey::ParsePattern, "LAT"),
    );
    table.push_element(
        TableElement::new(7, Role::Position)
            .with_metadata(MetadataKey::Group, "A")
            .with_metadata(MetadataKey::ParsePattern, "LON"),
    );
    table
}

#[allow(dead_code)]
pub fn named(kind: ResourceKind, name: &str) -> Resource {
    Resource::named(kind, name)
}

#[allow(dead_code)]
pub fn some_position() -> Position {
    use obsbind_core::model::{Coordinate, SpatialUnit};
    Position {
        latitude: Some(Coordinate::new(52.0, SpatialUnit::Degrees)),
        longitude: Some(Coordinate::new(7.0, SpatialUnit::Degrees)),
        altitude: None,
        epsg_code: 4326,
    }
}

/// Drains every demand with a generic answer and returns the units that were
/// demanded, in order.
#[allow(dead_code)]
pub fn drive_to_completion(engine: &mut BindingEngine) -> Vec<ResolutionUnit> {
    let mut demanded = Vec::new();
    while let Some(unit) = engine.next_demand().expect("demand discovery") {
        let answer = match &unit {
            ResolutionUnit::Binding { kind, .. } => {
                Answer::Resource(named(*kind, &format!("answered-{kind}")))
            }
            ResolutionUnit::FeaturePosition { .. } => Answer::Position(some_position()),
        };
        engine.submit(&unit, answer).expect("submit answer");
        demanded.push(unit);
    }
    demanded
}
