use std::fmt;

use serde::{Deserialize, Serialize};

/// EPSG code value meaning "not declared".
pub const UNSET_EPSG: i32 = -1;

/// Unit attached to a position sub-field. Serialized forms match the unit
/// strings used by observation exports (`deg`, `m`, `km`, `mi`, `ft`).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum SpatialUnit {
    #[serde(rename = "deg")]
    Degrees,
    #[serde(rename = "m")]
    Meters,
    #[serde(rename = "km")]
    Kilometers,
    #[serde(rename = "mi")]
    Miles,
    #[serde(rename = "ft")]
    Feet,
}

impl SpatialUnit {
    pub fn symbol(&self) -> &'static str {
        match self {
            SpatialUnit::Degrees => "deg",
            SpatialUnit::Meters => "m",
            SpatialUnit::Kilometers => "km",
            SpatialUnit::Miles => "mi",
            SpatialUnit::Feet => "ft",
        }
    }
}

impl fmt::Display for SpatialUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// A numeric position sub-field together with its declared or inferred unit.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Coordinate {
    pub value: f64,
    pub unit: SpatialUnit,
}

impl Coordinate {
    pub fn new(value: f64, unit: SpatialUnit) -> Self {
        Self { value, unit }
    }
}

/// A reconstructed geographic position. Sub-fields stay unset until some
/// table element or answer provides them; the EPSG code defaults to unset.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Position {
    #[serde(default)]
    pub latitude: Option<Coordinate>,
    #[serde(default)]
    pub longitude: Option<Coordinate>,
    #[serde(default)]
    pub altitude: Option<Coordinate>,
    #[serde(default = "unset_epsg")]
    pub epsg_code: i32,
}

fn unset_epsg() -> i32 {
    UNSET_EPSG
}

impl Default for Position {
    fn default() -> Self {
        Self {
            latitude: None,
            longitude: None,
            altitude: None,
            epsg_code: UNSET_EPSG,
        }
    }
}

impl Position {
    pub fn is_empty(&self) -> bool {
        self.latitude.is_none()
            && self.longitude.is_none()
            && self.altitude.is_none()
            && self.epsg_code == UNSET_EPSG
    }

    /// Last-write-wins merge: every sub-field set on `other` overwrites the
    /// corresponding sub-field of `self`.
    pub fn merge_from(&mut self, other: &Position) {
        if other.latitude.is_some() {
            self.latitude = other.latitude;
        }
        if other.longitude.is_some() {
            self.longitude = other.longitude;
        }
        if other.altitude.is_some() {
            self.altitude = other.altitude;
        }
        if other.epsg_code != UNSET_EPSG {
            self.epsg_code = other.epsg_code;
        }
    }
}
