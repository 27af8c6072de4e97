//! # serde-geojson
//!
//! A library for encoding and decoding the `GeoJSON` object model using serde, with
//! geozero interop.
//!
//! Every object carries a `"type"` tag naming its kind. Decoding always reads that
//! tag first and picks the variant from it; the shape of `coordinates` never
//! selects a variant. Encoding writes the tag the value's kind demands.
//!
//! ## Features
//!
//! - Typed geometries: [`Point`], [`MultiPoint`], [`LineString`], [`MultiLineString`],
//!   [`Polygon`], [`MultiPolygon`] and [`GeometryCollection`], unified in [`Geometry`]
//! - [`Feature`] with a validated `id` (string or number), free-form properties and
//!   a bounding box, plus [`FeatureCollection`]
//! - Bridges to geozero: every geometry is a `GeozeroGeometry`, a feature collection
//!   is a `GeozeroDatasource`, and any datasource can be read via [`from_datasource`]
//! - Conversions from `geo` geometries
//!
//! ## Main Components
//!
//! - [`from_str`], [`from_slice`], [`from_value`] - Decode `GeoJSON`
//! - [`to_string`], [`to_vec`], [`to_value`] - Encode `GeoJSON`
//! - [`collector::GeozeroCollector`] - Collects features from geozero sources
//! - [`error::Error`] - Custom error types for the library
//!
//! ## Example
//!
//! ```rust
//! use serde_geojson::{from_str, to_string, Feature, Point};
//!
//! let feature = Feature::default()
//!     .with_id("berlin")
//!     .with_property("population", 3669495)
//!     .with_point(Point::from([13.4, 52.5]));
//!
//! let text = to_string(&feature).unwrap();
//! assert_eq!(
//!     text,
//!     r#"{"id":"berlin","type":"Feature","geometry":{"coordinates":[13.4,52.5],"type":"Point"},"properties":{"population":3669495}}"#
//! );
//!
//! let decoded: Feature = from_str(&text).unwrap();
//! assert_eq!(decoded, feature);
//! ```
//!
//! ## Modules
//!
//! - [`collector`] - Contains the `GeozeroCollector` implementation
//! - [`de`] - Decoding functionality
//! - [`error`] - Error types and handling
//! - [`ser`] - Encoding functionality

#[macro_use]
mod macros;

pub mod collector;
mod convert;
pub mod de;
pub mod error;
mod feature;
mod feature_collection;
mod geometry;
mod position;
mod process;
pub mod ser;

pub use de::{from_datasource, from_slice, from_str, from_value};
pub use error::{Error, Result};
pub use feature::{check_id, Feature, FeatureId, Properties};
pub use feature_collection::FeatureCollection;
pub use geometry::{
    Geometry, GeometryCollection, GeometryCollectionMember, GeometryType, LineString,
    LinearRing, MultiLineString, MultiPoint, MultiPolygon, Point, Polygon,
};
pub use position::Position;
pub use ser::{to_string, to_value, to_vec};
