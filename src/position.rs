use serde::{ser::SerializeSeq, Deserialize, Serialize};

use crate::ser::NumberSerializer;

/// A coordinate tuple: longitude, latitude and an optional elevation.
///
/// Values are stored verbatim; no rounding, normalization or bounds checking
/// is applied. An empty position is only meaningful as an unset default.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct Position(pub Vec<f64>);

impl Position {
    #[must_use]
    pub fn new(lon: f64, lat: f64) -> Self {
        Self(vec![lon, lat])
    }

    #[must_use]
    pub fn with_elevation(lon: f64, lat: f64, elevation: f64) -> Self {
        Self(vec![lon, lat, elevation])
    }

    #[must_use]
    pub fn lon(&self) -> f64 {
        self.component(0)
    }

    #[must_use]
    pub fn lat(&self) -> f64 {
        self.component(1)
    }

    /// Elevation, or `0` when the position is two-dimensional.
    #[must_use]
    pub fn elevation(&self) -> f64 {
        self.component(2)
    }

    #[must_use]
    pub fn has_elevation(&self) -> bool {
        self.0.len() > 2
    }

    /// The plain numbers of this position.
    #[must_use]
    pub fn raw(&self) -> Vec<f64> {
        self.0.clone()
    }

    fn component(&self, idx: usize) -> f64 {
        self.0.get(idx).copied().unwrap_or_default()
    }
}

impl Serialize for Position {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut seq = serializer.serialize_seq(Some(self.0.len()))?;
        for value in &self.0 {
            seq.serialize_element(&NumberSerializer(*value))?;
        }
        seq.end()
    }
}

impl From<Vec<f64>> for Position {
    fn from(value: Vec<f64>) -> Self {
        Self(value)
    }
}

impl From<[f64; 2]> for Position {
    fn from(value: [f64; 2]) -> Self {
        Self(value.to_vec())
    }
}

impl From<[f64; 3]> for Position {
    fn from(value: [f64; 3]) -> Self {
        Self(value.to_vec())
    }
}

impl From<(f64, f64)> for Position {
    fn from((lon, lat): (f64, f64)) -> Self {
        Self::new(lon, lat)
    }
}

impl From<Position> for Vec<f64> {
    fn from(value: Position) -> Self {
        value.0
    }
}
