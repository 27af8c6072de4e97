//! The seven `GeoJSON` geometry kinds and the `type`-tag dispatch that decodes them.
//!
//! Decoding is two-pass: [`GeometryType::probe`] reads only the `type` member of a
//! raw JSON object, then the decoder of the matching variant re-reads the whole
//! object. Every variant decoder checks the tag again, so calling one directly
//! on a payload of another kind fails with [`Error::TypeMismatch`].

mod collection;
mod line_string;
mod point;
mod polygon;

pub use collection::{GeometryCollection, GeometryCollectionMember};
pub use line_string::{LineString, MultiLineString};
pub use point::{MultiPoint, Point};
pub use polygon::{LinearRing, MultiPolygon, Polygon};

use std::{fmt, str::FromStr};

use log::trace;
use serde::{de::DeserializeOwned, ser::SerializeStruct, Serialize};
use serde_json::Value;

use crate::error::{check_type, Error, Result};

/// The `type` tag of a geometry object.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GeometryType {
    Point,
    MultiPoint,
    LineString,
    MultiLineString,
    Polygon,
    MultiPolygon,
    GeometryCollection,
}

impl GeometryType {
    pub const ALL: [GeometryType; 7] = [
        GeometryType::Point,
        GeometryType::MultiPoint,
        GeometryType::LineString,
        GeometryType::MultiLineString,
        GeometryType::Polygon,
        GeometryType::MultiPolygon,
        GeometryType::GeometryCollection,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            GeometryType::Point => "Point",
            GeometryType::MultiPoint => "MultiPoint",
            GeometryType::LineString => "LineString",
            GeometryType::MultiLineString => "MultiLineString",
            GeometryType::Polygon => "Polygon",
            GeometryType::MultiPolygon => "MultiPolygon",
            GeometryType::GeometryCollection => "GeometryCollection",
        }
    }

    /// Reads the tag of a raw geometry object without looking at anything else.
    ///
    /// `null` and an object without `type` read as the empty tag, which is
    /// reported as an unknown geometry type.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::UnknownGeometryType`] for a missing or unrecognized tag.
    pub fn probe(value: &Value) -> Result<Self> {
        let kind: Self = type_member(value)?.parse()?;
        trace!("dispatching geometry of type {kind}");
        Ok(kind)
    }
}

impl fmt::Display for GeometryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GeometryType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| {
                log::debug!("unknown geometry type {s:?}");
                Error::UnknownGeometryType(s.to_string())
            })
    }
}

/// Any one of the seven geometry kinds.
#[derive(Clone, Debug, PartialEq)]
pub enum Geometry {
    Point(Point),
    MultiPoint(MultiPoint),
    LineString(LineString),
    MultiLineString(MultiLineString),
    Polygon(Polygon),
    MultiPolygon(MultiPolygon),
    GeometryCollection(GeometryCollection),
}

impl Geometry {
    #[must_use]
    pub fn geometry_type(&self) -> GeometryType {
        match self {
            Geometry::Point(_) => GeometryType::Point,
            Geometry::MultiPoint(_) => GeometryType::MultiPoint,
            Geometry::LineString(_) => GeometryType::LineString,
            Geometry::MultiLineString(_) => GeometryType::MultiLineString,
            Geometry::Polygon(_) => GeometryType::Polygon,
            Geometry::MultiPolygon(_) => GeometryType::MultiPolygon,
            Geometry::GeometryCollection(_) => GeometryType::GeometryCollection,
        }
    }

    #[must_use]
    pub fn as_geometry_collection(&self) -> Option<&GeometryCollection> {
        match self {
            Geometry::GeometryCollection(g) => Some(g),
            _ => None,
        }
    }
}

impl_accessors!(Geometry);

impl Serialize for Geometry {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        match self {
            Geometry::Point(g) => g.serialize(serializer),
            Geometry::MultiPoint(g) => g.serialize(serializer),
            Geometry::LineString(g) => g.serialize(serializer),
            Geometry::MultiLineString(g) => g.serialize(serializer),
            Geometry::Polygon(g) => g.serialize(serializer),
            Geometry::MultiPolygon(g) => g.serialize(serializer),
            Geometry::GeometryCollection(g) => g.serialize(serializer),
        }
    }
}

impl TryFrom<Value> for Geometry {
    type Error = Error;

    fn try_from(value: Value) -> Result<Self> {
        match GeometryType::probe(&value)? {
            GeometryType::GeometryCollection => {
                GeometryCollection::try_from(value).map(Geometry::GeometryCollection)
            }
            kind => GeometryCollectionMember::decode(kind, value).map(Geometry::from),
        }
    }
}

impl From<GeometryCollectionMember> for Geometry {
    fn from(member: GeometryCollectionMember) -> Self {
        match member {
            GeometryCollectionMember::Point(g) => Geometry::Point(g),
            GeometryCollectionMember::MultiPoint(g) => Geometry::MultiPoint(g),
            GeometryCollectionMember::LineString(g) => Geometry::LineString(g),
            GeometryCollectionMember::MultiLineString(g) => Geometry::MultiLineString(g),
            GeometryCollectionMember::Polygon(g) => Geometry::Polygon(g),
            GeometryCollectionMember::MultiPolygon(g) => Geometry::MultiPolygon(g),
        }
    }
}

impl From<GeometryCollection> for Geometry {
    fn from(value: GeometryCollection) -> Self {
        Geometry::GeometryCollection(value)
    }
}

impl_deserialize_from_value!(Geometry);

/// Reads the `type` member of a raw object; `null` and a missing member read as `""`.
pub(crate) fn type_member(value: &Value) -> Result<&str> {
    match value {
        Value::Null => Ok(""),
        Value::Object(object) => match object.get("type") {
            None | Some(Value::Null) => Ok(""),
            Some(Value::String(kind)) => Ok(kind.as_str()),
            Some(other) => Err(Error::Message(format!(
                "invalid type {other} for \"type\", expected a string"
            ))),
        },
        other => Err(Error::Message(format!(
            "invalid value {other}, expected a GeoJSON object"
        ))),
    }
}

/// Removes a required member from a raw object after checking its `type` tag.
pub(crate) fn take_member(
    mut value: Value,
    expected: &'static str,
    member: &'static str,
) -> Result<Value> {
    check_type(type_member(&value)?, expected)?;
    value
        .get_mut(member)
        .map(Value::take)
        .ok_or_else(|| <Error as serde::de::Error>::missing_field(member))
}

/// Decodes the `coordinates` of a single-kind geometry object.
pub(crate) fn decode_coordinates<C: DeserializeOwned>(
    value: Value,
    expected: GeometryType,
) -> Result<C> {
    let coordinates = take_member(value, expected.as_str(), "coordinates")?;
    Ok(serde_json::from_value(coordinates)?)
}

/// Writes `{"coordinates": ..., "type": ...}`.
pub(crate) fn serialize_geometry<S, C>(
    serializer: S,
    kind: GeometryType,
    coordinates: &C,
) -> std::result::Result<S::Ok, S::Error>
where
    S: serde::Serializer,
    C: Serialize + ?Sized,
{
    let mut state = serializer.serialize_struct(kind.as_str(), 2)?;
    state.serialize_field("coordinates", coordinates)?;
    state.serialize_field("type", kind.as_str())?;
    state.end()
}

#[cfg(test)]
mod test {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[case(r#"{"coordinates":[-170,40],"type":"Point"}"#, GeometryType::Point)]
    #[case(r#"{"coordinates":[[-170,40]],"type":"MultiPoint"}"#, GeometryType::MultiPoint)]
    #[case(r#"{"coordinates":[[-170,40]],"type":"LineString"}"#, GeometryType::LineString)]
    #[case(r#"{"coordinates":[[[-170,40]]],"type":"MultiLineString"}"#, GeometryType::MultiLineString)]
    #[case(r#"{"coordinates":[[[-170,40]]],"type":"Polygon"}"#, GeometryType::Polygon)]
    #[case(r#"{"coordinates":[[[[-170,40]]]],"type":"MultiPolygon"}"#, GeometryType::MultiPolygon)]
    #[case(r#"{"geometries":[{"coordinates":[-170,40],"type":"Point"}],"type":"GeometryCollection"}"#, GeometryType::GeometryCollection)]
    fn test_tag_fidelity(#[case] json: &str, #[case] kind: GeometryType) -> Result<()> {
        let geometry: Geometry = crate::from_str(json)?;
        assert_eq!(geometry.geometry_type(), kind);
        assert_eq!(crate::to_string(&geometry)?, json);
        Ok(())
    }

    #[test]
    fn test_probe_reads_only_the_tag() -> Result<()> {
        let value = json!({"type": "Polygon", "coordinates": "not checked here"});
        assert_eq!(GeometryType::probe(&value)?, GeometryType::Polygon);
        Ok(())
    }

    #[rstest]
    #[case(json!(null), "")]
    #[case(json!({"coordinates": [0, 0]}), "")]
    #[case(json!({"type": "", "coordinates": [0, 0]}), "")]
    #[case(json!({"type": "Circle", "coordinates": [0, 0]}), "Circle")]
    #[case(json!({"type": "point", "coordinates": [0, 0]}), "point")]
    fn test_unknown_tag(#[case] value: Value, #[case] tag: &str) {
        let err = Geometry::try_from(value).unwrap_err();
        assert!(matches!(&err, Error::UnknownGeometryType(found) if found == tag));
        assert_eq!(err.to_string(), format!("unknown geometry type: {tag:?}"));
    }

    #[test]
    fn test_malformed_tag_member() {
        assert!(matches!(
            GeometryType::probe(&json!({"type": 5})),
            Err(Error::Message(_))
        ));
        assert!(matches!(
            GeometryType::probe(&json!(["Point", [0, 0]])),
            Err(Error::Message(_))
        ));
    }

    #[test]
    fn test_shape_alone_does_not_select_the_variant() -> Result<()> {
        let rings = json!([[[1, 2], [3, 4]]]);
        let polygon = Geometry::try_from(json!({"type": "Polygon", "coordinates": rings}))?;
        let lines = Geometry::try_from(json!({"type": "MultiLineString", "coordinates": rings}))?;
        assert!(polygon.as_polygon().is_some());
        assert!(polygon.as_multi_line_string().is_none());
        assert!(lines.as_multi_line_string().is_some());
        assert_eq!(
            polygon.as_polygon().map(Polygon::raw),
            lines.as_multi_line_string().map(MultiLineString::raw)
        );
        Ok(())
    }

    #[test]
    fn test_malformed_coordinates() {
        let err = Geometry::try_from(json!({"type": "Point", "coordinates": [[1, 2]]})).unwrap_err();
        assert!(matches!(err, Error::Json(_)));

        let err = Geometry::try_from(json!({"type": "Point"})).unwrap_err();
        assert_eq!(err.to_string(), "missing field `coordinates`");
    }

    #[test]
    fn test_display_and_parse() -> Result<()> {
        for kind in GeometryType::ALL {
            assert_eq!(kind.to_string().parse::<GeometryType>()?, kind);
        }
        Ok(())
    }
}
