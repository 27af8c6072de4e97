//! A collector for geometry and property data from geospatial sources.
//!
//! [`GeozeroCollector`] implements the geozero processor traits and turns every
//! feature it sees into a [`Feature`]. Geometries are assembled position by
//! position, asking the source for `z` so that elevations survive, and
//! properties are converted from geozero's `ColumnValue` to JSON values.
//!
//! # Example
//!
//! ```rust
//! use geozero::GeozeroDatasource;
//! use serde_geojson::collector::GeozeroCollector;
//!
//! let geojson = r#"{
//!     "type": "Feature",
//!     "geometry": {"type": "Point", "coordinates": [102.0, 0.5]},
//!     "properties": {"name": "Test Point", "value": 42}
//! }"#;
//!
//! let mut collector = GeozeroCollector::new();
//! let mut reader = geozero::geojson::GeoJsonReader(geojson.as_bytes());
//! reader.process(&mut collector).unwrap();
//!
//! let collection = collector.finish().unwrap();
//! let feature = &collection.features[0];
//! assert_eq!(feature.as_point().map(|p| p.raw()), Some(vec![102.0, 0.5]));
//! ```
use std::mem;

use geozero::{
    error::{GeozeroError, Result as GeozeroResult},
    ColumnValue, CoordDimensions, FeatureProcessor, GeomProcessor, PropertyProcessor,
};
use log::debug;
use serde_json::Value;

use crate::{
    error::{Error, Result},
    feature::Properties,
    Feature, FeatureCollection, Geometry, GeometryCollection, GeometryCollectionMember,
    LineString, LinearRing, MultiLineString, MultiPoint, MultiPolygon, Point, Polygon, Position,
};

/// Assembles one geometry from geozero processor events.
///
/// Positions gather in `positions` until their line, ring or point ends. Untagged
/// lines become rings inside a polygon and parts of a multi line string
/// elsewhere. Open collections are stacked; a collection inside a collection is
/// recorded as an error.
#[derive(Default)]
struct GeometryBuilder {
    positions: Vec<Position>,
    lines: Vec<LineString>,
    rings: Vec<LinearRing>,
    polygons: Vec<Polygon>,
    in_polygon: bool,
    collections: Vec<Vec<Geometry>>,
    geometry: Option<Geometry>,
    error: Option<Error>,
}

impl GeometryBuilder {
    fn push(&mut self, geometry: Geometry) {
        match self.collections.last_mut() {
            Some(members) => members.push(geometry),
            None => self.geometry = Some(geometry),
        }
    }

    fn take(&mut self) -> Result<Option<Geometry>> {
        let builder = mem::take(self);
        match builder.error {
            Some(err) => Err(err),
            None => Ok(builder.geometry),
        }
    }
}

pub struct GeozeroCollector {
    features: Vec<Feature>,

    current_geometry: GeometryBuilder,
    current_properties: Option<Properties>,
    error: Option<Error>,
}

impl GeozeroCollector {
    #[must_use]
    pub fn new() -> Self {
        Self {
            features: Vec::new(),
            current_geometry: GeometryBuilder::default(),
            current_properties: None,
            error: None,
        }
    }

    /// Number of features collected so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.features.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    /// Returns the collected features.
    ///
    /// # Errors
    ///
    /// Returns the first conversion error hit while collecting, e.g. a nested
    /// geometry collection.
    pub fn finish(self) -> Result<FeatureCollection> {
        match self.error {
            Some(err) => Err(err),
            None => Ok(FeatureCollection::new(self.features)),
        }
    }
}

impl Default for GeozeroCollector {
    fn default() -> Self {
        Self::new()
    }
}

/// Converts a geozero column value into the JSON value stored in `properties`.
fn column_value_to_json(value: &ColumnValue) -> GeozeroResult<Value> {
    Ok(match value {
        ColumnValue::Byte(v) => Value::from(*v),
        ColumnValue::UByte(v) => Value::from(*v),
        ColumnValue::Bool(v) => Value::from(*v),
        ColumnValue::Short(v) => Value::from(*v),
        ColumnValue::UShort(v) => Value::from(*v),
        ColumnValue::Int(v) => Value::from(*v),
        ColumnValue::UInt(v) => Value::from(*v),
        ColumnValue::Long(v) => Value::from(*v),
        ColumnValue::ULong(v) => Value::from(*v),
        ColumnValue::Float(v) => Value::from(f64::from(*v)),
        ColumnValue::Double(v) => Value::from(*v),
        ColumnValue::String(v) => Value::from(v.to_string()),
        ColumnValue::DateTime(v) => {
            let v: &str = v.as_ref();
            Value::from(v)
        }
        ColumnValue::Json(v) => {
            serde_json::from_str(v).map_err(|err| GeozeroError::Property(err.to_string()))?
        }
        ColumnValue::Binary(v) => Value::from(v.to_vec()),
    })
}

impl PropertyProcessor for GeozeroCollector {
    fn property(&mut self, _idx: usize, name: &str, value: &ColumnValue) -> GeozeroResult<bool> {
        self.current_properties
            .get_or_insert_with(Properties::new)
            .insert(name.to_string(), column_value_to_json(value)?);
        Ok(false)
    }
}

impl GeomProcessor for GeozeroCollector {
    fn dimensions(&self) -> CoordDimensions {
        CoordDimensions::xyz()
    }

    fn multi_dim(&self) -> bool {
        true
    }

    fn xy(&mut self, x: f64, y: f64, _idx: usize) -> GeozeroResult<()> {
        self.current_geometry.positions.push(Position::new(x, y));
        Ok(())
    }

    fn coordinate(
        &mut self,
        x: f64,
        y: f64,
        z: Option<f64>,
        _m: Option<f64>,
        _t: Option<f64>,
        _tm: Option<u64>,
        _idx: usize,
    ) -> GeozeroResult<()> {
        let position = match z {
            Some(z) => Position::with_elevation(x, y, z),
            None => Position::new(x, y),
        };
        self.current_geometry.positions.push(position);
        Ok(())
    }

    fn empty_point(&mut self, _idx: usize) -> GeozeroResult<()> {
        self.current_geometry.push(Point::default().into());
        Ok(())
    }

    fn point_begin(&mut self, _idx: usize) -> GeozeroResult<()> {
        self.current_geometry.positions.clear();
        Ok(())
    }

    fn point_end(&mut self, _idx: usize) -> GeozeroResult<()> {
        let builder = &mut self.current_geometry;
        let position = builder.positions.pop().unwrap_or_default();
        builder.positions.clear();
        builder.push(Point(position).into());
        Ok(())
    }

    fn multipoint_begin(&mut self, _size: usize, _idx: usize) -> GeozeroResult<()> {
        self.current_geometry.positions.clear();
        Ok(())
    }

    fn multipoint_end(&mut self, _idx: usize) -> GeozeroResult<()> {
        let builder = &mut self.current_geometry;
        let positions = mem::take(&mut builder.positions);
        builder.push(MultiPoint(positions).into());
        Ok(())
    }

    fn linestring_begin(&mut self, _tagged: bool, _size: usize, _idx: usize) -> GeozeroResult<()> {
        self.current_geometry.positions.clear();
        Ok(())
    }

    fn linestring_end(&mut self, tagged: bool, _idx: usize) -> GeozeroResult<()> {
        let builder = &mut self.current_geometry;
        let positions = mem::take(&mut builder.positions);
        if tagged {
            builder.push(LineString(positions).into());
        } else if builder.in_polygon {
            builder.rings.push(LinearRing(positions));
        } else {
            builder.lines.push(LineString(positions));
        }
        Ok(())
    }

    fn multilinestring_begin(&mut self, _size: usize, _idx: usize) -> GeozeroResult<()> {
        self.current_geometry.lines.clear();
        Ok(())
    }

    fn multilinestring_end(&mut self, _idx: usize) -> GeozeroResult<()> {
        let builder = &mut self.current_geometry;
        let lines = mem::take(&mut builder.lines);
        builder.push(MultiLineString(lines).into());
        Ok(())
    }

    fn polygon_begin(&mut self, _tagged: bool, _size: usize, _idx: usize) -> GeozeroResult<()> {
        let builder = &mut self.current_geometry;
        builder.rings.clear();
        builder.in_polygon = true;
        Ok(())
    }

    fn polygon_end(&mut self, tagged: bool, _idx: usize) -> GeozeroResult<()> {
        let builder = &mut self.current_geometry;
        builder.in_polygon = false;
        let polygon = Polygon(mem::take(&mut builder.rings));
        if tagged {
            builder.push(polygon.into());
        } else {
            builder.polygons.push(polygon);
        }
        Ok(())
    }

    fn multipolygon_begin(&mut self, _size: usize, _idx: usize) -> GeozeroResult<()> {
        self.current_geometry.polygons.clear();
        Ok(())
    }

    fn multipolygon_end(&mut self, _idx: usize) -> GeozeroResult<()> {
        let builder = &mut self.current_geometry;
        let polygons = mem::take(&mut builder.polygons);
        builder.push(MultiPolygon(polygons).into());
        Ok(())
    }

    fn geometrycollection_begin(&mut self, size: usize, _idx: usize) -> GeozeroResult<()> {
        self.current_geometry.collections.push(Vec::with_capacity(size));
        Ok(())
    }

    fn geometrycollection_end(&mut self, _idx: usize) -> GeozeroResult<()> {
        let builder = &mut self.current_geometry;
        let members = builder.collections.pop().unwrap_or_default();
        match members
            .into_iter()
            .map(GeometryCollectionMember::try_from)
            .collect::<Result<GeometryCollection>>()
        {
            Ok(collection) => builder.push(collection.into()),
            Err(err) => {
                builder.error.get_or_insert(err);
            }
        }
        Ok(())
    }
}

impl FeatureProcessor for GeozeroCollector {
    fn feature_begin(&mut self, _idx: u64) -> GeozeroResult<()> {
        self.current_geometry = GeometryBuilder::default();
        self.current_properties = None;
        Ok(())
    }

    fn properties_begin(&mut self) -> GeozeroResult<()> {
        self.current_properties = Some(Properties::new());
        Ok(())
    }

    fn geometry_begin(&mut self) -> GeozeroResult<()> {
        self.current_geometry = GeometryBuilder::default();
        Ok(())
    }

    fn feature_end(&mut self, idx: u64) -> GeozeroResult<()> {
        let mut feature = match self.current_properties.take() {
            Some(properties) => Feature::default().with_properties(properties),
            None => Feature::default(),
        };

        match self.current_geometry.take() {
            Ok(Some(geometry)) => feature = feature.with_geometry(geometry),
            Ok(None) => {}
            Err(err) => {
                debug!("dropping feature {idx}: {err}");
                self.error.get_or_insert(err);
                return Ok(());
            }
        }

        debug!(
            "collected feature {idx} with geometry {:?}",
            feature.geometry_type()
        );
        self.features.push(feature);
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use approx::assert_relative_eq;
    use geozero::GeozeroDatasource;
    use serde_json::Value;

    use super::GeozeroCollector;
    use crate::{
        from_datasource, Error, Feature, FeatureCollection, GeometryCollection, MultiLineString,
        Point, Polygon,
    };

    #[test]
    fn test_from_geojson() -> anyhow::Result<()> {
        let geojson = r#"{
            "type": "FeatureCollection",
            "features": [
                {
                    "type": "Feature",
                    "geometry": {
                        "type": "Point",
                        "coordinates": [102.0, 0.5]
                    },
                    "properties": {
                        "name": "Test Point",
                        "value": 42
                    }
                },
                {
                    "type": "Feature",
                    "geometry": {
                        "type": "MultiLineString",
                        "coordinates": [[[103.0, 1.5], [104.0, 2.5]]]
                    },
                    "properties": {
                        "name": "Another Line",
                        "value": 43
                    }
                }
            ]
        }"#;

        let mut collector = GeozeroCollector::new();

        let mut reader = geozero::geojson::GeoJsonReader(geojson.as_bytes());
        reader.process(&mut collector)?;
        assert_eq!(collector.len(), 2);

        let collection = collector.finish()?;

        let feature = &collection.features[0];
        let point = feature.as_point().map(Point::raw).unwrap_or_default();
        assert_relative_eq!(point[0], 102.0);
        assert_relative_eq!(point[1], 0.5);
        let properties = feature.properties.clone().unwrap_or_default();
        assert_eq!(properties.get("name"), Some(&Value::from("Test Point")));
        assert_eq!(properties.get("value").and_then(Value::as_i64), Some(42));

        let feature = &collection.features[1];
        let lines = feature.as_multi_line_string().map(MultiLineString::raw).unwrap_or_default();
        assert_eq!(lines.len(), 1);
        assert_relative_eq!(lines[0][1][0], 104.0);
        assert_relative_eq!(lines[0][1][1], 2.5);
        assert_eq!(
            feature.properties.as_ref().and_then(|p| p.get("value")).and_then(Value::as_i64),
            Some(43)
        );

        Ok(())
    }

    #[test]
    fn test_column_values() -> geozero::error::Result<()> {
        use geozero::ColumnValue;

        assert_eq!(super::column_value_to_json(&ColumnValue::Bool(true))?, Value::Bool(true));
        assert_eq!(super::column_value_to_json(&ColumnValue::ULong(7))?, Value::from(7_u64));
        assert_eq!(super::column_value_to_json(&ColumnValue::Float(0.5))?, Value::from(0.5));
        assert_eq!(
            super::column_value_to_json(&ColumnValue::Json(r#"{"a":[1]}"#))?,
            serde_json::json!({"a": [1]})
        );
        assert!(super::column_value_to_json(&ColumnValue::Json("{")).is_err());
        Ok(())
    }

    #[test]
    fn test_elevation_is_kept() -> anyhow::Result<()> {
        let mut collection = FeatureCollection::default()
            .push(Feature::default().with_point(Point::from([1.0, 2.0, 3.0])))
            .push(Feature::default().with_polygon(Polygon::from(vec![vec![
                [0.0, 0.0, 5.0],
                [1.0, 0.0, 6.0],
                [1.0, 1.0, 7.0],
                [0.0, 0.0, 5.0],
            ]])))
            .push(Feature::default().with_geometry_collection(
                GeometryCollection::default()
                    .append(Point::from([4.0, 5.0, 6.0]))
                    .append(MultiLineString::from(vec![vec![[0.0, 0.0], [1.0, 1.0]]])),
            ));
        assert_eq!(from_datasource(&mut collection.clone())?, collection);

        let geojson = r#"{"type":"Feature","geometry":{"type":"Point","coordinates":[1,2,3]}}"#;
        let mut reader = geozero::geojson::GeoJsonReader(geojson.as_bytes());
        let collected = from_datasource(&mut reader)?;
        assert_eq!(
            collected.features[0].as_point().map(Point::raw),
            Some(vec![1.0, 2.0, 3.0])
        );
        Ok(())
    }

    #[test]
    fn test_nested_collection_is_rejected() -> geozero::error::Result<()> {
        use geozero::{FeatureProcessor, GeomProcessor};

        let mut collector = GeozeroCollector::new();
        collector.feature_begin(0)?;
        collector.geometry_begin()?;
        collector.geometrycollection_begin(1, 0)?;
        collector.geometrycollection_begin(1, 0)?;
        collector.point_begin(0)?;
        collector.xy(1.0, 2.0, 0)?;
        collector.point_end(0)?;
        collector.geometrycollection_end(0)?;
        collector.geometrycollection_end(0)?;
        collector.geometry_end()?;
        collector.feature_end(0)?;

        assert!(collector.is_empty());
        assert!(matches!(collector.finish(), Err(Error::NestedGeometryCollection)));
        Ok(())
    }
}
