//! Conversions from `geo` geometries.
//!
//! `geo` has a few shapes `GeoJSON` does not: a `Line` becomes a two-position
//! [`LineString`], `Rect` and `Triangle` become a [`Polygon`]. A collection nested
//! inside a collection has no counterpart and is rejected.

use std::iter;

use crate::{
    error::{Error, Result},
    Geometry, GeometryCollection, GeometryCollectionMember, LineString, LinearRing,
    MultiLineString, MultiPoint, MultiPolygon, Point, Polygon, Position,
};

impl From<geo::Coord<f64>> for Position {
    fn from(coord: geo::Coord<f64>) -> Self {
        Position::new(coord.x, coord.y)
    }
}

impl From<geo::Point<f64>> for Position {
    fn from(point: geo::Point<f64>) -> Self {
        point.0.into()
    }
}

impl From<geo::LineString<f64>> for LineString {
    fn from(line: geo::LineString<f64>) -> Self {
        Self(line.0.into_iter().map(Position::from).collect())
    }
}

impl From<geo::LineString<f64>> for LinearRing {
    fn from(ring: geo::LineString<f64>) -> Self {
        Self(ring.0.into_iter().map(Position::from).collect())
    }
}

impl From<geo::Polygon<f64>> for Polygon {
    fn from(polygon: geo::Polygon<f64>) -> Self {
        let (exterior, interiors) = polygon.into_inner();
        Self(
            iter::once(exterior)
                .chain(interiors)
                .map(LinearRing::from)
                .collect(),
        )
    }
}

impl From<geo::MultiPoint<f64>> for MultiPoint {
    fn from(points: geo::MultiPoint<f64>) -> Self {
        Self(points.0.into_iter().map(Position::from).collect())
    }
}

impl From<geo::MultiLineString<f64>> for MultiLineString {
    fn from(lines: geo::MultiLineString<f64>) -> Self {
        Self(lines.0.into_iter().map(LineString::from).collect())
    }
}

impl From<geo::MultiPolygon<f64>> for MultiPolygon {
    fn from(polygons: geo::MultiPolygon<f64>) -> Self {
        Self(polygons.0.into_iter().map(Polygon::from).collect())
    }
}

impl TryFrom<geo::Geometry<f64>> for GeometryCollectionMember {
    type Error = Error;

    fn try_from(geometry: geo::Geometry<f64>) -> Result<Self> {
        Ok(match geometry {
            geo::Geometry::Point(g) => Self::Point(Point::from(g)),
            geo::Geometry::Line(g) => Self::LineString(LineString(vec![g.start.into(), g.end.into()])),
            geo::Geometry::LineString(g) => Self::LineString(g.into()),
            geo::Geometry::Polygon(g) => Self::Polygon(g.into()),
            geo::Geometry::MultiPoint(g) => Self::MultiPoint(g.into()),
            geo::Geometry::MultiLineString(g) => Self::MultiLineString(g.into()),
            geo::Geometry::MultiPolygon(g) => Self::MultiPolygon(g.into()),
            geo::Geometry::Rect(g) => Self::Polygon(g.to_polygon().into()),
            geo::Geometry::Triangle(g) => Self::Polygon(g.to_polygon().into()),
            geo::Geometry::GeometryCollection(_) => return Err(Error::NestedGeometryCollection),
        })
    }
}

impl TryFrom<geo::GeometryCollection<f64>> for GeometryCollection {
    type Error = Error;

    fn try_from(collection: geo::GeometryCollection<f64>) -> Result<Self> {
        collection
            .0
            .into_iter()
            .map(GeometryCollectionMember::try_from)
            .collect()
    }
}

impl TryFrom<geo::Geometry<f64>> for Geometry {
    type Error = Error;

    fn try_from(geometry: geo::Geometry<f64>) -> Result<Self> {
        match geometry {
            geo::Geometry::GeometryCollection(g) => GeometryCollection::try_from(g).map(Self::from),
            g => GeometryCollectionMember::try_from(g).map(Self::from),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use geo::{coord, line_string, point, polygon, Rect};

    #[test]
    fn test_point() -> Result<()> {
        let geometry = Geometry::try_from(geo::Geometry::Point(point!(x: -170.0, y: 40.0)))?;
        assert_eq!(geometry, Geometry::Point(Point::from([-170.0, 40.0])));
        Ok(())
    }

    #[test]
    fn test_polygon_with_hole() {
        let polygon = polygon!(
            exterior: [(x: 0.0, y: 0.0), (x: 4.0, y: 0.0), (x: 4.0, y: 4.0), (x: 0.0, y: 0.0)],
            interiors: [[(x: 1.0, y: 1.0), (x: 2.0, y: 1.0), (x: 2.0, y: 2.0), (x: 1.0, y: 1.0)]],
        );
        let polygon = Polygon::from(polygon);
        assert_eq!(polygon.0.len(), 2);
        assert_eq!(polygon.interiors()[0].0[1], Position::new(2.0, 1.0));
    }

    #[test]
    fn test_shapes_without_counterpart() -> Result<()> {
        let line = geo::Line::new(coord! { x: 0.0, y: 0.0 }, coord! { x: 1.0, y: 1.0 });
        let geometry = Geometry::try_from(geo::Geometry::Line(line))?;
        assert_eq!(
            geometry.as_line_string().map(LineString::raw),
            Some(vec![vec![0.0, 0.0], vec![1.0, 1.0]])
        );

        let rect = Rect::new(coord! { x: 0.0, y: 0.0 }, coord! { x: 2.0, y: 1.0 });
        let geometry = Geometry::try_from(geo::Geometry::Rect(rect))?;
        let exterior = geometry.as_polygon().and_then(Polygon::exterior);
        assert_eq!(exterior.map(|ring| ring.0.len()), Some(5));
        Ok(())
    }

    #[test]
    fn test_collection() -> Result<()> {
        let collection = geo::GeometryCollection(vec![
            geo::Geometry::Point(point!(x: 1.0, y: 2.0)),
            geo::Geometry::LineString(line_string![(x: 1.0, y: 2.0), (x: 3.0, y: 4.0)]),
        ]);
        let geometry = Geometry::try_from(geo::Geometry::GeometryCollection(collection))?;
        let members = geometry.as_geometry_collection().map(GeometryCollection::len);
        assert_eq!(members, Some(2));
        Ok(())
    }

    #[test]
    fn test_nested_collection_is_rejected() {
        let inner = geo::GeometryCollection(vec![geo::Geometry::Point(point!(x: 1.0, y: 2.0))]);
        let outer = geo::GeometryCollection(vec![geo::Geometry::GeometryCollection(inner)]);
        assert!(matches!(
            Geometry::try_from(geo::Geometry::GeometryCollection(outer)),
            Err(Error::NestedGeometryCollection)
        ));
    }
}
