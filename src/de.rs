use geozero::GeozeroDatasource;
use serde_json::Value;

use crate::{
    collector::GeozeroCollector,
    error::{Error, Result},
    FeatureCollection,
};

/// Decodes `GeoJSON` text into any of this crate's types.
///
/// The text is parsed into a generic JSON tree first, then handed to the typed
/// decoder, so failures keep their [`Error`] variant.
///
/// ```
/// use serde_geojson::{from_str, Feature, GeometryType};
///
/// let feature: Feature = from_str(
///     r#"{"type":"Feature","geometry":{"type":"Point","coordinates":[13.4,52.5]}}"#,
/// )
/// .unwrap();
///
/// assert_eq!(feature.geometry_type(), Some(GeometryType::Point));
/// ```
///
/// # Errors
///
/// Returns an error if the text is not JSON, or does not describe a valid value
/// of the target type (bad `id` kind, unknown geometry type, `type` mismatch).
pub fn from_str<T>(s: &str) -> Result<T>
where
    T: TryFrom<Value, Error = Error>,
{
    from_value(serde_json::from_str(s)?)
}

/// Decodes `GeoJSON` bytes; see [`from_str`].
///
/// # Errors
///
/// See [`from_str`].
pub fn from_slice<T>(v: &[u8]) -> Result<T>
where
    T: TryFrom<Value, Error = Error>,
{
    from_value(serde_json::from_slice(v)?)
}

/// Decodes a generic JSON tree; see [`from_str`].
///
/// # Errors
///
/// See [`from_str`].
pub fn from_value<T>(value: Value) -> Result<T>
where
    T: TryFrom<Value, Error = Error>,
{
    T::try_from(value)
}

/// Reads every feature of a `GeozeroDatasource` into a [`FeatureCollection`].
///
/// ```
/// use serde_geojson::from_datasource;
///
/// let geojson = r#"{
///     "type": "Feature",
///     "geometry": {"type": "Point", "coordinates": [13.4, 52.5]},
///     "properties": {"name": "Berlin"}
/// }"#;
///
/// let mut reader = geozero::geojson::GeoJsonReader(geojson.as_bytes());
/// let collection = from_datasource(&mut reader).unwrap();
///
/// assert_eq!(collection.features.len(), 1);
/// assert!(collection.features[0].as_point().is_some());
/// ```
///
/// # Errors
///
/// Returns an error if the datasource processing fails, or if it produces a
/// geometry that has no `GeoJSON` counterpart (a nested geometry collection).
pub fn from_datasource<S: GeozeroDatasource>(datasource: &mut S) -> Result<FeatureCollection> {
    let mut collector = GeozeroCollector::new();
    datasource.process(&mut collector)?;
    collector.finish()
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{Feature, Geometry, Point};
    use approx::assert_relative_eq;

    #[test]
    fn test_from_slice() -> Result<()> {
        let geometry: Geometry = from_slice(br#"{"type":"Point","coordinates":[1,2]}"#)?;
        assert_eq!(geometry, Geometry::Point(Point::from([1.0, 2.0])));
        Ok(())
    }

    #[test]
    fn test_malformed_input() {
        let err = from_str::<Feature>(r#"{"type":"Feature","#).unwrap_err();
        assert!(matches!(err, Error::Json(_)));
    }

    #[test]
    fn test_geojson() -> Result<()> {
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
                        "name": "Test Point"
                    }
                },
                {
                    "type": "Feature",
                    "geometry": {
                        "type": "Polygon",
                        "coordinates": [[[100.0, 0.0], [101.0, 0.0], [101.0, 1.0], [100.0, 0.0]]]
                    },
                    "properties": {
                        "name": "Another Shape"
                    }
                }
            ]
        }"#;

        let mut reader = geozero::geojson::GeoJsonReader(geojson.as_bytes());
        let collection = from_datasource(&mut reader)?;

        assert_eq!(collection.features.len(), 2);

        let first = &collection.features[0];
        let point = first.as_point().map(Point::position);
        assert_relative_eq!(point.map_or(f64::NAN, |p| p.lon()), 102.0);
        assert_relative_eq!(point.map_or(f64::NAN, |p| p.lat()), 0.5);
        let name = first.properties.as_ref().and_then(|p| p.get("name"));
        assert_eq!(name, Some(&Value::from("Test Point")));

        let second = &collection.features[1];
        let ring = second.as_polygon().and_then(|p| p.exterior());
        assert_eq!(ring.map(|r| r.0.len()), Some(4));

        Ok(())
    }
}
