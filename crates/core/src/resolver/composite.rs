// Composite field resolver - reconstructs timestamps and positions from the
// elements of a group, merging sub-fields in table declaration order.

use tracing::trace;

use crate::error::{CoreError, Result};
use crate::model::{
    Coordinate, DataTable, MetadataKey, Position, Role, SpatialUnit, TableElement, Timestamp,
};
use crate::resolver::numeric::{parse_decimal, parse_integer};
use crate::resolver::pattern::{CompiledPattern, PatternError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TimestampField {
    Year,
    Month,
    Day,
    Hour,
    Minute,
    Second,
    Zone,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PositionField {
    Latitude,
    Longitude,
    Altitude,
    Epsg,
}

// Longer placeholders first so the compiler never matches a prefix.
const TIMESTAMP_PLACEHOLDERS: &[(&str, TimestampField)] = &[
    ("yyyy", TimestampField::Year),
    ("yy", TimestampField::Year),
    ("MM", TimestampField::Month),
    ("dd", TimestampField::Day),
    ("HH", TimestampField::Hour),
    ("mm", TimestampField::Minute),
    ("ss", TimestampField::Second),
    ("y", TimestampField::Year),
    ("M", TimestampField::Month),
    ("d", TimestampField::Day),
    ("H", TimestampField::Hour),
    ("m", TimestampField::Minute),
    ("s", TimestampField::Second),
    ("Z", TimestampField::Zone),
];

const POSITION_PLACEHOLDERS: &[(&str, PositionField)] = &[
    ("EPSG", PositionField::Epsg),
    ("LAT", PositionField::Latitude),
    ("LON", PositionField::Longitude),
    ("ALT", PositionField::Altitude),
];

/// Reconstructs the timestamp encoded by the date-time group `group` for one
/// data row. Elements are scanned in table declaration order; later elements
/// overwrite sub-fields set by earlier ones.
pub fn resolve_timestamp(table: &DataTable, group: &str, row: usize) -> Result<Timestamp> {
    let elements = table.group_elements(Role::DateTime, group);
    if elements.is_empty() {
        return Err(CoreError::GroupNotFound {
            group: group.to_string(),
            role: Role::DateTime,
        });
    }

    let mut merged = Timestamp::default();
    for element in elements {
        let partial = timestamp_from_element(table, element, group, row)?;
        merged.merge_from(&partial);
    }
    trace!(group, row, ?merged, "resolved timestamp");
    Ok(merged)
}

/// Reconstructs the position encoded by the position group `group` for one
/// data row, inferring units for sub-fields without a declared one.
pub fn resolve_position(
    table: &DataTable,
    group: &str,
    row: usize,
    decimal_separator: char,
) -> Result<Position> {
    let elements = table.group_elements(Role::Position, group);
    if elements.is_empty() {
        return Err(CoreError::GroupNotFound {
            group: group.to_string(),
            role: Role::Position,
        });
    }

    let mut merged = Position::default();
    for element in elements {
        let partial = position_from_element(table, element, group, row, decimal_separator)?;
        merged.merge_from(&partial);
    }
    trace!(group, row, ?merged, "resolved position");
    Ok(merged)
}

fn timestamp_from_element(
    table: &DataTable,
    element: &TableElement,
    group: &str,
    row: usize,
) -> Result<Timestamp> {
    let mut partial = Timestamp::default();

    if let Some(pattern) = element.metadata_value(MetadataKey::ParsePattern) {
        let literal = table.cell(element.column, row)?;
        let compiled = CompiledPattern::compile(pattern, TIMESTAMP_PLACEHOLDERS)
            .map_err(|source| pattern_mismatch(group, pattern, literal, source))?;
        for (field, token) in compiled
            .tokenize(literal)
            .map_err(|source| pattern_mismatch(group, pattern, literal, source))?
        {
            apply_timestamp_field(&mut partial, field, token)?;
        }
    }

    // fixed sub-values declared directly in the metadata refine the pattern
    for (key, value) in &element.metadata {
        let field = match key {
            MetadataKey::TimeYear => TimestampField::Year,
            MetadataKey::TimeMonth => TimestampField::Month,
            MetadataKey::TimeDay => TimestampField::Day,
            MetadataKey::TimeHour => TimestampField::Hour,
            MetadataKey::TimeMinute => TimestampField::Minute,
            MetadataKey::TimeSecond => TimestampField::Second,
            MetadataKey::TimeZone => TimestampField::Zone,
            _ => continue,
        };
        apply_timestamp_field(&mut partial, field, value)?;
    }

    Ok(partial)
}

fn position_from_element(
    table: &DataTable,
    element: &TableElement,
    group: &str,
    row: usize,
    decimal_separator: char,
) -> Result<Position> {
    let mut partial = Position::default();

    if let Some(pattern) = element.metadata_value(MetadataKey::ParsePattern) {
        let literal = table.cell(element.column, row)?;
        let compiled = CompiledPattern::compile(pattern, POSITION_PLACEHOLDERS)
            .map_err(|source| pattern_mismatch(group, pattern, literal, source))?;
        for (field, token) in compiled
            .tokenize(literal)
            .map_err(|source| pattern_mismatch(group, pattern, literal, source))?
        {
            apply_position_field(&mut partial, field, token, decimal_separator)?;
        }
    }

    for (key, value) in &element.metadata {
        let field = match key {
            MetadataKey::PositionLatitude => PositionField::Latitude,
            MetadataKey::PositionLongitude => PositionField::Longitude,
            MetadataKey::PositionAltitude => PositionField::Altitude,
            MetadataKey::PositionEpsgCode => PositionField::Epsg,
            _ => continue,
        };
        apply_position_field(&mut partial, field, value, decimal_separator)?;
    }

    Ok(partial)
}

fn apply_timestamp_field(timestamp: &mut Timestamp, field: TimestampField, token: &str) -> Result<()> {
    match field {
        TimestampField::Year => timestamp.year = Some(parse_integer(token)? as i32),
        TimestampField::Month => timestamp.month = Some(parse_integer(token)? as u32),
        TimestampField::Day => timestamp.day = Some(parse_integer(token)? as u32),
        TimestampField::Hour => timestamp.hour = Some(parse_integer(token)? as u32),
        TimestampField::Minute => timestamp.minute = Some(parse_integer(token)? as u32),
        TimestampField::Second => timestamp.second = Some(parse_integer(token)? as u32),
        TimestampField::Zone => timestamp.timezone_offset = Some(parse_integer(token)? as i32),
    }
    Ok(())
}

fn apply_position_field(
    position: &mut Position,
    field: PositionField,
    token: &str,
    decimal_separator: char,
) -> Result<()> {
    match field {
        PositionField::Latitude => {
            position.latitude = Some(parse_latitude(token, decimal_separator)?)
        }
        PositionField::Longitude => {
            position.longitude = Some(parse_longitude(token, decimal_separator)?)
        }
        PositionField::Altitude => {
            position.altitude = Some(parse_altitude(token, decimal_separator)?)
        }
        PositionField::Epsg => position.epsg_code = parse_integer(token)? as i32,
    }
    Ok(())
}

/// Parses a latitude literal, stripping a degree-symbol or meter suffix.
/// Without a suffix the unit is inferred from the magnitude: values within
/// [-90, 90] are degrees, anything else is treated as planar meters.
pub fn parse_latitude(literal: &str, decimal_separator: char) -> Result<Coordinate> {
    parse_angle(literal, decimal_separator, 90.0)
}

/// Like [`parse_latitude`], with the degree range [-180, 180].
pub fn parse_longitude(literal: &str, decimal_separator: char) -> Result<Coordinate> {
    parse_angle(literal, decimal_separator, 180.0)
}

fn parse_angle(literal: &str, decimal_separator: char, degree_max: f64) -> Result<Coordinate> {
    let trimmed = literal.trim();

    if let Some(index) = trimmed.find('°') {
        let value = parse_decimal(&trimmed[..index], decimal_separator)?;
        return Ok(Coordinate::new(value, SpatialUnit::Degrees));
    }
    if let Some(stripped) = trimmed.strip_suffix('m') {
        let value = parse_decimal(stripped, decimal_separator)?;
        return Ok(Coordinate::new(value, SpatialUnit::Meters));
    }

    let value = parse_decimal(trimmed, decimal_separator)?;
    let unit = if value.abs() <= degree_max {
        SpatialUnit::Degrees
    } else {
        SpatialUnit::Meters
    };
    Ok(Coordinate::new(value, unit))
}

/// Parses an altitude literal, stripping a `km`/`mi`/`ft`/`m` suffix.
/// Without a suffix the unit defaults to meters.
pub fn parse_altitude(literal: &str, decimal_separator: char) -> Result<Coordinate> {
    let trimmed = literal.trim();

    for (suffix, unit) in [
        ("km", SpatialUnit::Kilometers),
        ("mi", SpatialUnit::Miles),
        ("ft", SpatialUnit::Feet),
        ("m", SpatialUnit::Meters),
    ] {
        if let Some(stripped) = trimmed.strip_suffix(suffix) {
            let value = parse_decimal(stripped, decimal_separator)?;
            return Ok(Coordinate::new(value, unit));
        }
    }

    let value = parse_decimal(trimmed, decimal_separator)?;
    Ok(Coordinate::new(value, SpatialUnit::Meters))
}

fn pattern_mismatch(group: &str, pattern: &str, literal: &str, source: PatternError) -> CoreError {
    CoreError::PatternMismatch {
        group: group.to_string(),
        pattern: pattern.to_string(),
        literal: literal.to_string(),
        detail: source.to_string(),
    }
}
