use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{decode_coordinates, serialize_geometry, GeometryType};
use crate::{error::Error, Position};

/// A closed ring of positions; closure and the four-position minimum are not enforced.
///
/// A ring is only ever written as its coordinate array, it has no `type` tag of its own.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LinearRing(pub Vec<Position>);

impl LinearRing {
    #[must_use]
    pub fn raw(&self) -> Vec<Vec<f64>> {
        self.0.iter().map(Position::raw).collect()
    }
}

/// A polygon made of rings: the first is the exterior, the rest are holes.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Polygon(pub Vec<LinearRing>);

impl Polygon {
    #[must_use]
    pub fn exterior(&self) -> Option<&LinearRing> {
        self.0.first()
    }

    #[must_use]
    pub fn interiors(&self) -> &[LinearRing] {
        self.0.get(1..).unwrap_or_default()
    }

    #[must_use]
    pub fn raw(&self) -> Vec<Vec<Vec<f64>>> {
        self.0.iter().map(LinearRing::raw).collect()
    }
}

impl Serialize for Polygon {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serialize_geometry(serializer, GeometryType::Polygon, &self.0)
    }
}

impl TryFrom<Value> for Polygon {
    type Error = Error;

    fn try_from(value: Value) -> crate::Result<Self> {
        decode_coordinates(value, GeometryType::Polygon).map(Self)
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct MultiPolygon(pub Vec<Polygon>);

impl MultiPolygon {
    #[must_use]
    pub fn raw(&self) -> Vec<Vec<Vec<Vec<f64>>>> {
        self.0.iter().map(Polygon::raw).collect()
    }
}

impl Serialize for MultiPolygon {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let polygons: Vec<&[LinearRing]> = self.0.iter().map(|p| p.0.as_slice()).collect();
        serialize_geometry(serializer, GeometryType::MultiPolygon, &polygons)
    }
}

impl TryFrom<Value> for MultiPolygon {
    type Error = Error;

    fn try_from(value: Value) -> crate::Result<Self> {
        let polygons: Vec<Vec<LinearRing>> = decode_coordinates(value, GeometryType::MultiPolygon)?;
        Ok(Self(polygons.into_iter().map(Polygon).collect()))
    }
}

impl_from_vec!(
    LinearRing,
    Position,
    Polygon,
    LinearRing,
    MultiPolygon,
    Polygon
);
impl_deserialize_from_value!(Polygon, MultiPolygon);

#[cfg(test)]
mod test {
    use super::*;
    use crate::Result;
    use serde_json::json;

    fn square(offset: f64) -> Vec<[f64; 2]> {
        vec![
            [offset, offset],
            [offset + 1.0, offset],
            [offset + 1.0, offset + 1.0],
            [offset, offset],
        ]
    }

    #[test]
    fn test_polygon() -> Result<()> {
        let polygon = Polygon::from(vec![square(0.0), square(0.25)]);
        assert_eq!(polygon.exterior().map(|r| r.0.len()), Some(4));
        assert_eq!(polygon.interiors().len(), 1);
        assert_eq!(polygon.raw()[1][0], vec![0.25, 0.25]);

        let json = crate::to_string(&polygon)?;
        assert_eq!(
            json,
            r#"{"coordinates":[[[0,0],[1,0],[1,1],[0,0]],[[0.25,0.25],[1.25,0.25],[1.25,1.25],[0.25,0.25]]],"type":"Polygon"}"#
        );
        assert_eq!(crate::from_str::<Polygon>(&json)?, polygon);
        Ok(())
    }

    #[test]
    fn test_empty_polygon() {
        let polygon = Polygon::default();
        assert!(polygon.exterior().is_none());
        assert!(polygon.interiors().is_empty());
    }

    #[test]
    fn test_multi_polygon() -> Result<()> {
        let multi = MultiPolygon::from(vec![vec![vec![[-170.0, 40.0]]], vec![square(2.0)]]);
        assert_eq!(multi.raw()[0], vec![vec![vec![-170.0, 40.0]]]);

        let json = crate::to_string(&multi)?;
        assert!(json.starts_with(r#"{"coordinates":[[[[-170,40]]],[[[2,2],"#));
        assert!(json.ends_with(r#""type":"MultiPolygon"}"#));
        assert_eq!(crate::from_str::<MultiPolygon>(&json)?, multi);
        Ok(())
    }

    #[test]
    fn test_ring_depth_is_checked() {
        let err = Polygon::try_from(json!({"type": "Polygon", "coordinates": [[1, 2]]})).unwrap_err();
        assert!(matches!(err, Error::Json(_)));
    }

    #[test]
    fn test_tag_is_checked() {
        let err = MultiPolygon::try_from(json!({"type": "Polygon", "coordinates": [[[[1, 2]]]]}))
            .unwrap_err();
        assert_eq!(err.to_string(), r#"invalid type "Polygon", expected "MultiPolygon""#);
    }
}
