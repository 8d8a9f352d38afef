use criterion::{criterion_group, criterion_main, Criterion};
use obsbind_core::model::{DataTable, MetadataKey, Role, TableElement};
use obsbind_core::resolver::composite::{resolve_position, resolve_timestamp};

fn build_table(rows: usize) -> DataTable {
    let mut data = vec![vec![
        "lat".to_string(),
        "lon".to_string(),
        "date".to_string(),
    ]];
    for i in 0..rows {
        data.push(vec![
            format!("5{}.2°", i % 10),
            format!("7.{}°", i % 10),
            format!("{}.10.2011", 1 + i % 28),
        ]);
    }
    let mut table = DataTable::new(data, 1);
    table.push_element(
        TableElement::new(0, Role::Position)
            .with_metadata(MetadataKey::Group, "A")
            .with_metadata(MetadataKey::ParsePattern, "LAT"),
    );
    table.push_element(
        TableElement::new(1, Role::Position)
            .with_metadata(MetadataKey::Group, "A")
            .with_metadata(MetadataKey::ParsePattern, "LON"),
    );
    table.push_element(
        TableElement::new(2, Role::DateTime)
            .with_metadata(MetadataKey::Group, "1")
            .with_metadata(MetadataKey::ParsePattern, "d.M.yyyy"),
    );
    table
}

fn benchmark_position_resolution(c: &mut Criterion) {
    let table = build_table(1000);
    c.bench_function("resolve_position_1000_rows", |b| {
        b.iter(|| {
            for row in table.data_rows() {
                resolve_position(&table, "A", row, '.').expect("resolve position");
            }
        })
    });
}

fn benchmark_timestamp_resolution(c: &mut Criterion) {
    let table = build_table(1000);
    c.bench_function("resolve_timestamp_1000_rows", |b| {
        b.iter(|| {
            for row in table.data_rows() {
                resolve_timestamp(&table, "1", row).expect("resolve timestamp");
            }
        })
    });
}

criterion_group!(
    benches,
    benchmark_position_resolution,
    benchmark_timestamp_resolution
);
criterion_main!(benches);
