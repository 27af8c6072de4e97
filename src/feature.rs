//! `GeoJSON` features: an optional id, a free-form property map, an optional
//! bounding box and at most one geometry.

use log::debug;
use serde::{
    ser::{Error as _, SerializeStruct},
    Deserialize, Serialize,
};
use serde_json::{Number, Value};

use crate::{
    error::{check_type, Error, Result},
    geometry::{
        Geometry, GeometryCollection, GeometryType, LineString, MultiLineString, MultiPoint,
        MultiPolygon, Point, Polygon,
    },
    ser::JsonNumberSerializer,
    Position,
};

/// The `properties` member of a feature.
pub type Properties = hashbrown::HashMap<String, Value>;

/// A spatially bounded thing.
///
/// The geometry is installed with one of the `with_*` builders; the last call wins.
/// A feature without geometry encodes `"geometry": null`, which does not decode
/// again: `null` is not a recognized geometry.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Feature {
    /// Optional identifier. Only strings and numbers are valid; anything else is
    /// rejected when the feature is encoded.
    pub id: Option<Value>,
    pub properties: Option<Properties>,
    /// Coordinate range of the geometry, stored as given.
    pub bbox: Option<Vec<Position>>,
    geometry: Option<Geometry>,
}

macro_rules! impl_geometry_builders {
    ($($variant:ident => $with_fn:ident, $as_fn:ident);* $(;)?) => {
        impl Feature {
            $(
                #[must_use]
                pub fn $with_fn(self, geometry: $variant) -> Self {
                    self.with_geometry(geometry)
                }

                #[must_use]
                pub fn $as_fn(&self) -> Option<&$variant> {
                    self.geometry.as_ref()?.$as_fn()
                }
            )*
        }
    };
}

impl_geometry_builders!(
    Point => with_point, as_point;
    MultiPoint => with_multi_point, as_multi_point;
    LineString => with_line_string, as_line_string;
    MultiLineString => with_multi_line_string, as_multi_line_string;
    Polygon => with_polygon, as_polygon;
    MultiPolygon => with_multi_polygon, as_multi_polygon;
    GeometryCollection => with_geometry_collection, as_geometry_collection;
);

impl Feature {
    /// Returns the feature with its geometry replaced.
    #[must_use]
    pub fn with_geometry(mut self, geometry: impl Into<Geometry>) -> Self {
        self.geometry = Some(geometry.into());
        self
    }

    /// Sets the id. A non-finite float has no JSON form, so it leaves the
    /// feature without an id.
    #[must_use]
    pub fn with_id(mut self, id: impl Into<FeatureId>) -> Self {
        self.id = id.into().0;
        self
    }

    #[must_use]
    pub fn with_properties(mut self, properties: Properties) -> Self {
        self.properties = Some(properties);
        self
    }

    #[must_use]
    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.properties
            .get_or_insert_with(Properties::new)
            .insert(key.into(), value.into());
        self
    }

    #[must_use]
    pub fn with_bbox(mut self, bbox: Vec<Position>) -> Self {
        self.bbox = Some(bbox);
        self
    }

    #[must_use]
    pub fn geometry(&self) -> Option<&Geometry> {
        self.geometry.as_ref()
    }

    #[must_use]
    pub fn into_geometry(self) -> Option<Geometry> {
        self.geometry
    }

    /// The tag of the installed geometry, `None` if there is none.
    #[must_use]
    pub fn geometry_type(&self) -> Option<GeometryType> {
        self.geometry.as_ref().map(Geometry::geometry_type)
    }
}

/// A value accepted by [`Feature::with_id`].
///
/// Integers keep their kind. Floats are stored as the shortest decimal that reads
/// back to the same value in their own width, so an `f32` id of `0.1` encodes as
/// `0.1`. `NaN` and the infinities convert to no id at all.
#[derive(Clone, Debug, PartialEq)]
pub struct FeatureId(Option<Value>);

impl FeatureId {
    fn from_f64(id: f64) -> Self {
        let number = Number::from_f64(id);
        if number.is_none() {
            debug!("ignoring non-finite feature id {id}");
        }
        Self(number.map(Value::Number))
    }
}

impl From<Value> for FeatureId {
    fn from(id: Value) -> Self {
        Self(Some(id))
    }
}

impl From<Number> for FeatureId {
    fn from(id: Number) -> Self {
        Self(Some(Value::Number(id)))
    }
}

impl From<&str> for FeatureId {
    fn from(id: &str) -> Self {
        Self(Some(Value::from(id)))
    }
}

impl From<String> for FeatureId {
    fn from(id: String) -> Self {
        Self(Some(Value::from(id)))
    }
}

impl From<f64> for FeatureId {
    fn from(id: f64) -> Self {
        Self::from_f64(id)
    }
}

impl From<f32> for FeatureId {
    fn from(id: f32) -> Self {
        // The shortest `f32` decimal is also a valid `f64` literal.
        Self::from_f64(id.to_string().parse().unwrap_or(f64::NAN))
    }
}

macro_rules! impl_integer_id {
    ($($t:ty),*) => {$(
        impl From<$t> for FeatureId {
            fn from(id: $t) -> Self {
                Self(Some(Value::from(id)))
            }
        }
    )*};
}

impl_integer_id!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

/// The name used in errors for the kind of a JSON value.
fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Checks that an id is absent, a string or a number.
///
/// # Errors
///
/// Fails with [`Error::InvalidIdKind`] naming the kind of any other value.
pub fn check_id(id: Option<&Value>) -> Result<()> {
    match id {
        None | Some(Value::Null | Value::String(_) | Value::Number(_)) => Ok(()),
        Some(other) => {
            debug!("rejecting feature id {other}");
            Err(Error::InvalidIdKind(value_kind(other)))
        }
    }
}

/// Decoded ids carry a single numeric representation, whatever the source token.
fn narrow_id(id: Value) -> Option<Value> {
    match id {
        Value::Null => None,
        Value::Number(number) => Some(
            number
                .as_f64()
                .and_then(Number::from_f64)
                .map_or(Value::Number(number), Value::Number),
        ),
        other => Some(other),
    }
}

impl Serialize for Feature {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        check_id(self.id.as_ref()).map_err(S::Error::custom)?;

        let mut state = serializer.serialize_struct("Feature", 5)?;
        match &self.id {
            Some(Value::String(id)) => state.serialize_field("id", id)?,
            Some(Value::Number(id)) => state.serialize_field("id", &JsonNumberSerializer(id))?,
            _ => state.skip_field("id")?,
        }
        state.serialize_field("type", "Feature")?;
        state.serialize_field("geometry", &self.geometry)?;
        match &self.properties {
            Some(properties) => state.serialize_field("properties", properties)?,
            None => state.skip_field("properties")?,
        }
        match &self.bbox {
            Some(bbox) => state.serialize_field("bbox", bbox)?,
            None => state.skip_field("bbox")?,
        }
        state.end()
    }
}

#[derive(Deserialize)]
struct RawFeature {
    #[serde(default)]
    id: Option<Value>,
    #[serde(default)]
    geometry: Value,
    #[serde(default)]
    properties: Option<Properties>,
    #[serde(default)]
    bbox: Option<Vec<Position>>,
}

impl TryFrom<Value> for Feature {
    type Error = Error;

    fn try_from(value: Value) -> Result<Self> {
        check_type(crate::geometry::type_member(&value)?, "Feature")?;
        let raw: RawFeature = serde_json::from_value(value)?;

        check_id(raw.id.as_ref())?;

        Ok(Feature {
            id: raw.id.and_then(narrow_id),
            properties: raw.properties,
            bbox: raw.bbox,
            geometry: Some(Geometry::try_from(raw.geometry)?),
        })
    }
}

impl_deserialize_from_value!(Feature);
