use serde::{ser::SerializeStruct, Serialize};
use serde_json::Value;

use super::{
    take_member, Geometry, GeometryType, LineString, MultiLineString, MultiPoint, MultiPolygon, Point,
    Polygon,
};
use crate::error::{Error, Result};

/// One member of a [`GeometryCollection`]. Collections do not nest, so this holds
/// any geometry except another collection.
#[derive(Clone, Debug, PartialEq)]
pub enum GeometryCollectionMember {
    Point(Point),
    MultiPoint(MultiPoint),
    LineString(LineString),
    MultiLineString(MultiLineString),
    Polygon(Polygon),
    MultiPolygon(MultiPolygon),
}

impl GeometryCollectionMember {
    #[must_use]
    pub fn geometry_type(&self) -> GeometryType {
        match self {
            Self::Point(_) => GeometryType::Point,
            Self::MultiPoint(_) => GeometryType::MultiPoint,
            Self::LineString(_) => GeometryType::LineString,
            Self::MultiLineString(_) => GeometryType::MultiLineString,
            Self::Polygon(_) => GeometryType::Polygon,
            Self::MultiPolygon(_) => GeometryType::MultiPolygon,
        }
    }

    /// Decodes a raw geometry whose tag has already been read.
    pub(crate) fn decode(kind: GeometryType, value: Value) -> Result<Self> {
        Ok(match kind {
            GeometryType::Point => Self::Point(value.try_into()?),
            GeometryType::MultiPoint => Self::MultiPoint(value.try_into()?),
            GeometryType::LineString => Self::LineString(value.try_into()?),
            GeometryType::MultiLineString => Self::MultiLineString(value.try_into()?),
            GeometryType::Polygon => Self::Polygon(value.try_into()?),
            GeometryType::MultiPolygon => Self::MultiPolygon(value.try_into()?),
            GeometryType::GeometryCollection => return Err(Error::NestedGeometryCollection),
        })
    }
}

impl_accessors!(GeometryCollectionMember);

impl Serialize for GeometryCollectionMember {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        match self {
            Self::Point(g) => g.serialize(serializer),
            Self::MultiPoint(g) => g.serialize(serializer),
            Self::LineString(g) => g.serialize(serializer),
            Self::MultiLineString(g) => g.serialize(serializer),
            Self::Polygon(g) => g.serialize(serializer),
            Self::MultiPolygon(g) => g.serialize(serializer),
        }
    }
}

impl TryFrom<Value> for GeometryCollectionMember {
    type Error = Error;

    fn try_from(value: Value) -> Result<Self> {
        let kind = GeometryType::probe(&value)?;
        Self::decode(kind, value)
    }
}

impl TryFrom<Geometry> for GeometryCollectionMember {
    type Error = Error;

    fn try_from(geometry: Geometry) -> Result<Self> {
        Ok(match geometry {
            Geometry::Point(g) => Self::Point(g),
            Geometry::MultiPoint(g) => Self::MultiPoint(g),
            Geometry::LineString(g) => Self::LineString(g),
            Geometry::MultiLineString(g) => Self::MultiLineString(g),
            Geometry::Polygon(g) => Self::Polygon(g),
            Geometry::MultiPolygon(g) => Self::MultiPolygon(g),
            Geometry::GeometryCollection(_) => return Err(Error::NestedGeometryCollection),
        })
    }
}

/// An ordered list of geometries of mixed kinds.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GeometryCollection(pub Vec<GeometryCollectionMember>);

impl GeometryCollection {
    /// Returns the collection with `member` added at the end.
    #[must_use]
    pub fn append(mut self, member: impl Into<GeometryCollectionMember>) -> Self {
        self.0.push(member.into());
        self
    }

    #[must_use]
    pub fn iter(&self) -> std::slice::Iter<'_, GeometryCollectionMember> {
        self.0.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<'a> IntoIterator for &'a GeometryCollection {
    type Item = &'a GeometryCollectionMember;
    type IntoIter = std::slice::Iter<'a, GeometryCollectionMember>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl FromIterator<GeometryCollectionMember> for GeometryCollection {
    fn from_iter<I: IntoIterator<Item = GeometryCollectionMember>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl Serialize for GeometryCollection {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut state = serializer.serialize_struct("GeometryCollection", 2)?;
        state.serialize_field("geometries", &self.0)?;
        state.serialize_field("type", GeometryType::GeometryCollection.as_str())?;
        state.end()
    }
}

impl TryFrom<Value> for GeometryCollection {
    type Error = Error;

    fn try_from(value: Value) -> Result<Self> {
        let geometries = take_member(
            value,
            GeometryType::GeometryCollection.as_str(),
            "geometries",
        )?;
        let geometries: Vec<Value> = serde_json::from_value(geometries)?;
        geometries
            .into_iter()
            .map(GeometryCollectionMember::try_from)
            .collect()
    }
}

impl_deserialize_from_value!(GeometryCollectionMember, GeometryCollection);
