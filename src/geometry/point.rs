use serde::Serialize;
use serde_json::Value;

use super::{decode_coordinates, serialize_geometry, GeometryType};
use crate::{error::Error, Position};

/// A single position geometry.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Point(pub Position);

impl Point {
    #[must_use]
    pub fn new(lon: f64, lat: f64) -> Self {
        Self(Position::new(lon, lat))
    }

    #[must_use]
    pub fn position(&self) -> &Position {
        &self.0
    }

    #[must_use]
    pub fn raw(&self) -> Vec<f64> {
        self.0.raw()
    }
}

macro_rules! impl_point_from {
    ($($t:ty),*) => {$(
        impl From<$t> for Point {
            fn from(value: $t) -> Self {
                Self(Position::from(value))
            }
        }
    )*};
}

impl_point_from!(
    Position,
    Vec<f64>,
    [f64; 2],
    [f64; 3],
    (f64, f64),
    geo::Coord<f64>,
    geo::Point<f64>
);

impl Serialize for Point {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serialize_geometry(serializer, GeometryType::Point, &self.0)
    }
}

impl TryFrom<Value> for Point {
    type Error = Error;

    fn try_from(value: Value) -> crate::Result<Self> {
        decode_coordinates(value, GeometryType::Point).map(Self)
    }
}

/// A set of unconnected positions.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MultiPoint(pub Vec<Position>);

impl MultiPoint {
    #[must_use]
    pub fn raw(&self) -> Vec<Vec<f64>> {
        self.0.iter().map(Position::raw).collect()
    }
}

impl_from_vec!(MultiPoint, Position);

impl Serialize for MultiPoint {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serialize_geometry(serializer, GeometryType::MultiPoint, &self.0)
    }
}

impl TryFrom<Value> for MultiPoint {
    type Error = Error;

    fn try_from(value: Value) -> crate::Result<Self> {
        decode_coordinates(value, GeometryType::MultiPoint).map(Self)
    }
}

impl_deserialize_from_value!(Point, MultiPoint);
