//! # hydrosite-io: Rasters, Stream Networks and Vector Output
//!
//! File collaborators for the plant search.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use hydrosite_io::{read_streams, AsciiGrid};
//! use hydrosite_core::RasterSampler;
//!
//! fn main() -> anyhow::Result<()> {
//!     let streams = read_streams("streams.geojson")?;
//!     let dem = AsciiGrid::from_path("dem.asc")?;
//!
//!     let first = &streams[0].geometry.coords()[0];
//!     println!("{} streams, outlet elevation {:?}", streams.len(), dem.sample(first.x, first.y));
//!     Ok(())
//! }
//! ```
//!
//! ## Formats
//!
//! | Data | Format | Entry point |
//! |------|--------|-------------|
//! | Discharge, elevation | ESRI ASCII grid (`.asc`) | [`AsciiGrid`] |
//! | Stream network | GeoJSON LineString/MultiLineString | [`read_streams`] |
//! | Plants, plant points | GeoJSON or CSV with WKT | [`create_writer`] |
//! | Sampled profiles | CSV | [`write_profiles_csv`] |
//!
//! ## Feature Flags
//!
//! - `csv` (default): CSV writers

pub mod ascii_grid;
#[cfg(feature = "csv")]
pub mod csv_writer;
pub mod format;
pub mod geojson_writer;
#[cfg(feature = "csv")]
pub mod profiles;
pub mod streams;

pub use ascii_grid::AsciiGrid;
#[cfg(feature = "csv")]
pub use csv_writer::{CsvWriter, WKT_COLUMN};
pub use format::{create_writer, OutputFormat};
pub use geojson_writer::GeoJsonWriter;
#[cfg(feature = "csv")]
pub use profiles::{write_profiles, write_profiles_csv, ProfileRecord};
pub use streams::{parse_streams, read_streams};
