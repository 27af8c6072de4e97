//! Feeding geometries and feature collections into geozero processors.
//!
//! [`Geometry`] and its parts implement `GeozeroGeometry`, so they work with every
//! geozero writer and with `geozero::ToGeo`. [`FeatureCollection`] implements
//! `GeozeroDatasource`. Positions are written as `xy` unless the processor asks
//! for more dimensions, in which case the elevation is passed as `z`.

use geozero::{
    error::Result as GeozeroResult, ColumnValue, FeatureProcessor, GeomProcessor,
    GeozeroDatasource, GeozeroGeometry, PropertyProcessor,
};
use serde_json::Value;

use crate::{
    feature::Properties, Feature, FeatureCollection, Geometry, GeometryCollection,
    GeometryCollectionMember, LineString, LinearRing, MultiLineString, MultiPoint, MultiPolygon,
    Point, Polygon, Position,
};

fn process_position<P: GeomProcessor>(
    position: &Position,
    idx: usize,
    processor: &mut P,
) -> GeozeroResult<()> {
    if processor.multi_dim() {
        let z = position.has_elevation().then(|| position.elevation());
        processor.coordinate(position.lon(), position.lat(), z, None, None, None, idx)
    } else {
        processor.xy(position.lon(), position.lat(), idx)
    }
}

fn process_line<P: GeomProcessor>(
    positions: &[Position],
    tagged: bool,
    idx: usize,
    processor: &mut P,
) -> GeozeroResult<()> {
    processor.linestring_begin(tagged, positions.len(), idx)?;
    for (i, position) in positions.iter().enumerate() {
        process_position(position, i, processor)?;
    }
    processor.linestring_end(tagged, idx)
}

fn process_polygon<P: GeomProcessor>(
    rings: &[LinearRing],
    tagged: bool,
    idx: usize,
    processor: &mut P,
) -> GeozeroResult<()> {
    processor.polygon_begin(tagged, rings.len(), idx)?;
    for (i, ring) in rings.iter().enumerate() {
        process_line(&ring.0, false, i, processor)?;
    }
    processor.polygon_end(tagged, idx)
}

fn process_point<P: GeomProcessor>(
    point: &Point,
    idx: usize,
    processor: &mut P,
) -> GeozeroResult<()> {
    if point.0 .0.len() < 2 {
        return processor.empty_point(idx);
    }
    processor.point_begin(idx)?;
    process_position(&point.0, 0, processor)?;
    processor.point_end(idx)
}

fn process_multi_point<P: GeomProcessor>(
    points: &MultiPoint,
    idx: usize,
    processor: &mut P,
) -> GeozeroResult<()> {
    processor.multipoint_begin(points.0.len(), idx)?;
    for (i, position) in points.0.iter().enumerate() {
        process_position(position, i, processor)?;
    }
    processor.multipoint_end(idx)
}

fn process_multi_line<P: GeomProcessor>(
    lines: &MultiLineString,
    idx: usize,
    processor: &mut P,
) -> GeozeroResult<()> {
    processor.multilinestring_begin(lines.0.len(), idx)?;
    for (i, line) in lines.0.iter().enumerate() {
        process_line(&line.0, false, i, processor)?;
    }
    processor.multilinestring_end(idx)
}

fn process_multi_polygon<P: GeomProcessor>(
    polygons: &MultiPolygon,
    idx: usize,
    processor: &mut P,
) -> GeozeroResult<()> {
    processor.multipolygon_begin(polygons.0.len(), idx)?;
    for (i, polygon) in polygons.0.iter().enumerate() {
        process_polygon(&polygon.0, false, i, processor)?;
    }
    processor.multipolygon_end(idx)
}

fn process_member<P: GeomProcessor>(
    member: &GeometryCollectionMember,
    idx: usize,
    processor: &mut P,
) -> GeozeroResult<()> {
    match member {
        GeometryCollectionMember::Point(g) => process_point(g, idx, processor),
        GeometryCollectionMember::MultiPoint(g) => process_multi_point(g, idx, processor),
        GeometryCollectionMember::LineString(g) => process_line(&g.0, true, idx, processor),
        GeometryCollectionMember::MultiLineString(g) => process_multi_line(g, idx, processor),
        GeometryCollectionMember::Polygon(g) => process_polygon(&g.0, true, idx, processor),
        GeometryCollectionMember::MultiPolygon(g) => process_multi_polygon(g, idx, processor),
    }
}

fn process_collection<P: GeomProcessor>(
    collection: &GeometryCollection,
    idx: usize,
    processor: &mut P,
) -> GeozeroResult<()> {
    processor.geometrycollection_begin(collection.len(), idx)?;
    for (i, member) in collection.iter().enumerate() {
        process_member(member, i, processor)?;
    }
    processor.geometrycollection_end(idx)
}

fn process_geometry<P: GeomProcessor>(
    geometry: &Geometry,
    idx: usize,
    processor: &mut P,
) -> GeozeroResult<()> {
    match geometry {
        Geometry::Point(g) => process_point(g, idx, processor),
        Geometry::MultiPoint(g) => process_multi_point(g, idx, processor),
        Geometry::LineString(g) => process_line(&g.0, true, idx, processor),
        Geometry::MultiLineString(g) => process_multi_line(g, idx, processor),
        Geometry::Polygon(g) => process_polygon(&g.0, true, idx, processor),
        Geometry::MultiPolygon(g) => process_multi_polygon(g, idx, processor),
        Geometry::GeometryCollection(g) => process_collection(g, idx, processor),
    }
}

impl GeozeroGeometry for Geometry {
    fn process_geom<P: GeomProcessor>(&self, processor: &mut P) -> GeozeroResult<()> {
        process_geometry(self, 0, processor)
    }
}

impl GeozeroGeometry for GeometryCollectionMember {
    fn process_geom<P: GeomProcessor>(&self, processor: &mut P) -> GeozeroResult<()> {
        process_member(self, 0, processor)
    }
}

impl GeozeroGeometry for GeometryCollection {
    fn process_geom<P: GeomProcessor>(&self, processor: &mut P) -> GeozeroResult<()> {
        process_collection(self, 0, processor)
    }
}

macro_rules! impl_geozero_geometry {
    ($($t:ty => $process:ident),*) => {$(
        impl GeozeroGeometry for $t {
            fn process_geom<P: GeomProcessor>(&self, processor: &mut P) -> GeozeroResult<()> {
                $process(self, 0, processor)
            }
        }
    )*};
}

impl_geozero_geometry!(
    Point => process_point,
    MultiPoint => process_multi_point,
    MultiLineString => process_multi_line,
    MultiPolygon => process_multi_polygon
);

impl GeozeroGeometry for LineString {
    fn process_geom<P: GeomProcessor>(&self, processor: &mut P) -> GeozeroResult<()> {
        process_line(&self.0, true, 0, processor)
    }
}

impl GeozeroGeometry for Polygon {
    fn process_geom<P: GeomProcessor>(&self, processor: &mut P) -> GeozeroResult<()> {
        process_polygon(&self.0, true, 0, processor)
    }
}

/// Hands properties to the processor as column values. `null` values have no
/// column counterpart and are skipped.
fn process_properties<P: PropertyProcessor>(
    properties: &Properties,
    processor: &mut P,
) -> GeozeroResult<()> {
    let mut i = 0;
    for (name, value) in properties {
        let json;
        let column = match value {
            Value::Null => continue,
            Value::Bool(v) => ColumnValue::Bool(*v),
            Value::String(v) => ColumnValue::String(v.as_str()),
            Value::Number(v) => match (v.as_i64(), v.as_u64(), v.as_f64()) {
                (Some(v), _, _) => ColumnValue::Long(v),
                (None, Some(v), _) => ColumnValue::ULong(v),
                (None, None, Some(v)) => ColumnValue::Double(v),
                (None, None, None) => continue,
            },
            Value::Array(_) | Value::Object(_) => {
                json = value.to_string();
                ColumnValue::Json(json.as_str())
            }
        };
        if processor.property(i, name, &column)? {
            break;
        }
        i += 1;
    }
    Ok(())
}

fn process_feature<P: FeatureProcessor>(
    feature: &Feature,
    idx: u64,
    processor: &mut P,
) -> GeozeroResult<()> {
    processor.feature_begin(idx)?;
    if let Some(properties) = &feature.properties {
        processor.properties_begin()?;
        process_properties(properties, processor)?;
        processor.properties_end()?;
    }
    if let Some(geometry) = feature.geometry() {
        processor.geometry_begin()?;
        process_geometry(geometry, 0, processor)?;
        processor.geometry_end()?;
    }
    processor.feature_end(idx)
}

impl GeozeroDatasource for FeatureCollection {
    fn process_geom<P: GeomProcessor>(&mut self, processor: &mut P) -> GeozeroResult<()> {
        let geometries = self.features.iter().filter_map(Feature::geometry);
        for (idx, geometry) in geometries.enumerate() {
            process_geometry(geometry, idx, processor)?;
        }
        Ok(())
    }

    fn process<P: FeatureProcessor>(&mut self, processor: &mut P) -> GeozeroResult<()> {
        processor.dataset_begin(None)?;
        for (idx, feature) in (0_u64..).zip(&self.features) {
            process_feature(feature, idx, processor)?;
        }
        processor.dataset_end()
    }
}
