use serde::{ser::SerializeStruct, Deserialize, Serialize};
use serde_json::Value;

use crate::{
    error::{check_type, Error, Result},
    geometry::type_member,
    Feature, Position,
};

/// An ordered list of features.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FeatureCollection {
    pub features: Vec<Feature>,
    pub bbox: Option<Vec<Position>>,
}

impl FeatureCollection {
    #[must_use]
    pub fn new(features: Vec<Feature>) -> Self {
        Self {
            features,
            bbox: None,
        }
    }

    /// Returns the collection with `feature` added at the end.
    #[must_use]
    pub fn push(mut self, feature: Feature) -> Self {
        self.features.push(feature);
        self
    }

    #[must_use]
    pub fn with_bbox(mut self, bbox: Vec<Position>) -> Self {
        self.bbox = Some(bbox);
        self
    }
}

impl FromIterator<Feature> for FeatureCollection {
    fn from_iter<I: IntoIterator<Item = Feature>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl Serialize for FeatureCollection {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut state = serializer.serialize_struct("FeatureCollection", 3)?;
        state.serialize_field("type", "FeatureCollection")?;
        state.serialize_field("features", &self.features)?;
        match &self.bbox {
            Some(bbox) => state.serialize_field("bbox", bbox)?,
            None => state.skip_field("bbox")?,
        }
        state.end()
    }
}

#[derive(Deserialize)]
struct RawFeatureCollection {
    #[serde(default)]
    features: Vec<Value>,
    #[serde(default)]
    bbox: Option<Vec<Position>>,
}

impl TryFrom<Value> for FeatureCollection {
    type Error = Error;

    fn try_from(value: Value) -> Result<Self> {
        check_type(type_member(&value)?, "FeatureCollection")?;
        let raw: RawFeatureCollection = serde_json::from_value(value)?;

        Ok(FeatureCollection {
            features: raw
                .features
                .into_iter()
                .map(Feature::try_from)
                .collect::<Result<_>>()?,
            bbox: raw.bbox,
        })
    }
}

impl_deserialize_from_value!(FeatureCollection);
