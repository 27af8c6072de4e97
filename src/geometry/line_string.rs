use serde::Serialize;
use serde_json::Value;

use super::{decode_coordinates, serialize_geometry, GeometryType};
use crate::{error::Error, Position};

/// A connected path of positions; two or more are expected but not enforced.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LineString(pub Vec<Position>);

impl LineString {
    #[must_use]
    pub fn raw(&self) -> Vec<Vec<f64>> {
        self.0.iter().map(Position::raw).collect()
    }
}

impl Serialize for LineString {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serialize_geometry(serializer, GeometryType::LineString, &self.0)
    }
}

impl TryFrom<Value> for LineString {
    type Error = Error;

    fn try_from(value: Value) -> crate::Result<Self> {
        decode_coordinates(value, GeometryType::LineString).map(Self)
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct MultiLineString(pub Vec<LineString>);

impl MultiLineString {
    #[must_use]
    pub fn raw(&self) -> Vec<Vec<Vec<f64>>> {
        self.0.iter().map(LineString::raw).collect()
    }
}

impl Serialize for MultiLineString {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let lines: Vec<&[Position]> = self.0.iter().map(|line| line.0.as_slice()).collect();
        serialize_geometry(serializer, GeometryType::MultiLineString, &lines)
    }
}

impl TryFrom<Value> for MultiLineString {
    type Error = Error;

    fn try_from(value: Value) -> crate::Result<Self> {
        let lines: Vec<Vec<Position>> = decode_coordinates(value, GeometryType::MultiLineString)?;
        Ok(Self(lines.into_iter().map(LineString).collect()))
    }
}

impl_from_vec!(LineString, Position, MultiLineString, LineString);
impl_deserialize_from_value!(LineString, MultiLineString);
