//! # hydrosite-core: Stream and Plant Modeling Core
//!
//! Shared data structures for small hydropower site search.
//!
//! ## Contents
//!
//! - [`units`]: `Meters`, `CubicMetersPerSecond`, `Kilowatts` newtypes
//! - [`geometry`]: [`Polyline`] with linear referencing (`segment`, `point_at`)
//! - [`raster`]: the [`RasterSampler`] capability used to read discharge and elevation
//! - [`vector`]: [`StreamLine`] input and the [`VectorWriter`] output capability
//! - [`error`]: [`HydroError`] / [`HydroResult`]
//!
//! ## Quick Start
//!
//! ```rust
//! use hydrosite_core::*;
//!
//! let line = StreamLine::new(
//!     StreamId::new(3),
//!     Polyline::from_xy(&[(0.0, 0.0), (50.0, 0.0), (100.0, 0.0)]),
//! );
//! let reach = line.geometry.segment(20.0, 70.0).unwrap();
//! assert!((reach.length() - 50.0).abs() < 1e-9);
//! ```

pub mod error;
pub mod geometry;
pub mod raster;
pub mod units;
pub mod vector;

pub use error::{HydroError, HydroResult};
pub use geo_types::Coord;
pub use geometry::Polyline;
pub use raster::{ConstantRaster, FnRaster, RasterSampler};
pub use units::{CubicMetersPerSecond, Kilowatts, Meters, GRAVITY, WATER_DENSITY};
pub use vector::{
    AttributeValue, FeatureGeometry, Field, FieldType, LayerKind, MemoryWriter, StreamLine,
    VectorWriter,
};

use serde::{Deserialize, Serialize};

// Newtype wrappers for IDs for type safety
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StreamId(u64);
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlantId(usize);
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PointId(usize);

impl StreamId {
    #[inline]
    pub fn new(value: u64) -> Self {
        StreamId(value)
    }
    #[inline]
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl PlantId {
    #[inline]
    pub fn new(value: usize) -> Self {
        PlantId(value)
    }
    #[inline]
    pub fn value(&self) -> usize {
        self.0
    }
}

impl PointId {
    #[inline]
    pub fn new(value: usize) -> Self {
        PointId(value)
    }
    #[inline]
    pub fn value(&self) -> usize {
        self.0
    }
}

impl std::fmt::Display for StreamId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_roundtrip() {
        assert_eq!(StreamId::new(12).value(), 12);
        assert_eq!(PlantId::new(3).value(), 3);
        assert_eq!(PointId::new(0).value(), 0);
    }

    #[test]
    fn test_ids_serialize_transparently() {
        assert_eq!(serde_json::to_string(&StreamId::new(42)).unwrap(), "42");
    }

    #[test]
    fn test_stream_ids_order() {
        let mut ids = vec![StreamId::new(5), StreamId::new(1), StreamId::new(3)];
        ids.sort();
        assert_eq!(ids, vec![StreamId::new(1), StreamId::new(3), StreamId::new(5)]);
    }
}
