// End-to-end run: a date-time group spread over three pattern columns and a
// position group spread over two coordinate columns, driven through the
// sequencer with scripted answers and exported as bound observations.

mod common;

use chrono::DateTime;
use common::{engine_for, named, self_describing_table};
use obsbind_core::model::{
    DataTable, MetadataKey, ObservationValue, ResourceKind, Role, SpatialUnit, TableElement,
    UNSET_EPSG,
};
use obsbind_core::{Answer, ResolutionUnit, StepSequencer};

/// Column layout: 0 unused, 1 longitude, 2 latitude, 3 measured value,
/// 4 day pattern, 5 hour pattern, 6 minute pattern. Decimal separator is a
/// comma, so the hour/minute cells carry a literal ",00" tail.
fn spread_out_table() -> DataTable {
    let mut table = DataTable::new(
        vec![
            vec![
                "id".into(),
                "lon".into(),
                "lat".into(),
                "value".into(),
                "day".into(),
                "hour".into(),
                "minute".into(),
            ],
            vec![
                "r1".into(),
                "7,4".into(),
                "52,2".into(),
                "21,5".into(),
                "12.10.2011".into(),
                "14,00".into(),
                "30,00".into(),
            ],
            vec![
                "r2".into(),
                "7,6".into(),
                "51,9".into(),
                "19,0".into(),
                "13.10.2011".into(),
                "9,00".into(),
                "15,00".into(),
            ],
        ],
        1,
    );
    table.push_element(
        TableElement::new(1, Role::Position)
            .with_metadata(MetadataKey::Group, "A")
            .with_metadata(MetadataKey::ParsePattern, "LON"),
    );
    table.push_element(
        TableElement::new(2, Role::Position)
            .with_metadata(MetadataKey::Group, "A")
            .with_metadata(MetadataKey::ParsePattern, "LAT"),
    );
    table.push_element(
        TableElement::new(3, Role::MeasuredValue).with_metadata(MetadataKey::ValueType, "NUMERIC"),
    );
    table.push_element(
        TableElement::new(4, Role::DateTime)
            .with_metadata(MetadataKey::Group, "1")
            .with_metadata(MetadataKey::ParsePattern, "d.M.yyyy"),
    );
    table.push_element(
        TableElement::new(5, Role::DateTime)
            .with_metadata(MetadataKey::Group, "1")
            .with_metadata(MetadataKey::ParsePattern, "H,00"),
    );
    table.push_element(
        TableElement::new(6, Role::DateTime)
            .with_metadata(MetadataKey::Group, "1")
            .with_metadata(MetadataKey::ParsePattern, "m,00"),
    );
    table
}

#[test]
fn three_date_columns_and_two_position_columns_combine() {
    let mut sequencer = StepSequencer::new(engine_for(spread_out_table(), ','));

    // only the four resources need answers; timestamp and position come
    // from the table
    let mut demanded = Vec::new();
    while let Some(unit) = sequencer.next_unit().unwrap() {
        let ResolutionUnit::Binding { kind, .. } = unit else {
            panic!("unexpected demand {unit:?}");
        };
        demanded.push(kind);
        let answer = match kind {
            ResourceKind::FeatureOfInterest => named(kind, "weather-station"),
            ResourceKind::ObservedProperty => {
                named(kind, "near_surface_air_temperature").with_uri("http://example.org/op/nsat")
            }
            ResourceKind::UnitOfMeasurement => named(kind, "degC"),
            ResourceKind::Sensor => named(kind, "GLDAS").with_uri("http://example.org/gldas"),
        };
        sequencer.submit(&unit, Answer::Resource(answer)).unwrap();
    }
    assert_eq!(
        demanded,
        vec![
            ResourceKind::FeatureOfInterest,
            ResourceKind::ObservedProperty,
            ResourceKind::UnitOfMeasurement,
            ResourceKind::Sensor,
        ]
    );

    let engine = sequencer.into_engine();
    let reference = DateTime::parse_from_rfc3339("2000-01-01T00:00:00+01:00").unwrap();
    let observations = engine.observations(&reference).unwrap();

    assert_eq!(observations.len(), 2);

    let first = &observations[0];
    assert_eq!(first.column, 3);
    assert_eq!(first.row, 1);
    assert_eq!(first.value, ObservationValue::Numeric(21.5));
    assert_eq!(first.timestamp.to_rfc3339(), "2011-10-12T14:30:00+01:00");

    // the feature of interest inherited the table's only position group
    let position = first.feature_of_interest.position.unwrap();
    let latitude = position.latitude.unwrap();
    let longitude = position.longitude.unwrap();
    assert_eq!(latitude.value, 52.2);
    assert_eq!(latitude.unit, SpatialUnit::Degrees);
    assert_eq!(longitude.value, 7.4);
    assert_eq!(longitude.unit, SpatialUnit::Degrees);
    assert!(position.altitude.is_none());
    assert_eq!(position.epsg_code, UNSET_EPSG, "no EPSG metadata declared");

    assert_eq!(first.observed_property.name, "near_surface_air_temperature");
    assert_eq!(first.unit_of_measurement.name, "degC");
    assert_eq!(first.sensor.name, "GLDAS");

    let second = &observations[1];
    assert_eq!(second.timestamp.to_rfc3339(), "2011-10-13T09:15:00+01:00");
    assert_eq!(second.value, ObservationValue::Numeric(19.0));
    assert_eq!(
        second.feature_of_interest.position.unwrap().latitude.unwrap().value,
        51.9
    );
}

#[test]
fn a_fully_tabular_layout_exports_row_identities() {
    let engine = {
        let mut engine = engine_for(self_describing_table(), '.');
        assert_eq!(engine.next_demand().unwrap(), None);
        engine
    };

    let reference = DateTime::parse_from_rfc3339("2000-01-01T00:00:00+01:00").unwrap();
    let observations = engine.observations(&reference).unwrap();

    assert_eq!(observations.len(), 2);
    assert_eq!(observations[0].feature_of_interest.name, "ws-1");
    assert_eq!(observations[1].feature_of_interest.name, "ws-2");
    assert_eq!(observations[0].sensor.name, "thermo-1");
    assert_eq!(observations[0].timestamp.to_rfc3339(), "2011-10-12T12:00:00+01:00");
    assert_eq!(
        observations[1]
            .feature_of_interest
            .position
            .unwrap()
            .latitude
            .unwrap()
            .value,
        51.9
    );
}

#[test]
fn export_refuses_incomplete_bindings() {
    let mut table = DataTable::new(
        vec![
            vec!["d".into(), "v".into()],
            vec!["1.1.2020".into(), "5".into()],
        ],
        1,
    );
    table.push_element(
        TableElement::new(0, Role::DateTime)
            .with_metadata(MetadataKey::Group, "1")
            .with_metadata(MetadataKey::ParsePattern, "d.M.yyyy"),
    );
    table.push_element(TableElement::new(1, Role::MeasuredValue));

    let engine = engine_for(table, '.');
    let reference = DateTime::parse_from_rfc3339("2000-01-01T00:00:00+01:00").unwrap();
    assert!(matches!(
        engine.observations(&reference),
        Err(obsbind_core::CoreError::IncompleteBinding { .. })
    ));
}
