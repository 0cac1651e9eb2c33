//! # hydrosite-algo: Optimal Plant Placement on Stream Networks
//!
//! This crate finds non-overlapping run-of-river plant sites along stream
//! lines, given a discharge raster and an elevation raster.
//!
//! ## Pipeline
//!
//! | Stage | Entry point | Output |
//! |-------|-------------|--------|
//! | Array builder | [`build_profile`] | [`Profile`] (`prog`, `h`, `q`) |
//! | Single-segment optimizer | [`find_optimal`] | [`Placement`] maximizing the energy objective |
//! | Length solver | [`min_len_plant`], [`min_len_plant_z`] | [`Placement`] capped by power or pipe length |
//! | Recursive partitioner | [`recursive_plant`] | [`PlantArena`] |
//! | Writers | [`write_plant_segments`], [`write_plant_points`] | vector features |
//! | Driver | [`optimize_streams`] | [`RunReport`] over many streams |
//!
//! ### Placement strategies
//!
//! The partitioner locates each plant with one [`PlacementStrategy`]:
//!
//! - **Optimal**: 20×20 grid over intake and length, maximizing
//!   `(h(x0) - h(x0+s)) · q(x0+s)`
//! - **PowerCap**: longest segment whose potential power reaches `p_max`
//! - **PipeLength**: longest segment whose straight pipe reaches `l_max`
//!
//! The root finding in the length solver uses argmin's Brent method.
//!
//! ## Example
//!
//! ```ignore
//! use hydrosite_algo::{optimize_streams, OptimalConfig};
//! use hydrosite_io::{read_streams, AsciiGrid};
//!
//! let streams = read_streams("streams.geojson")?;
//! let discharge = AsciiGrid::from_path("q.asc")?;
//! let elevation = AsciiGrid::from_path("dem.asc")?;
//!
//! let params = OptimalConfig::default().search_params()?;
//! let report = optimize_streams(&streams, &discharge, &elevation, &params);
//! println!("{} plants, {}", report.plant_count(), report.total_power(0.8));
//! ```

pub mod config;
pub mod interp;
pub mod length_solver;
pub mod objective;
pub mod optimal;
pub mod partition;
pub mod profile;
pub mod run;
pub mod window;
pub mod writers;

pub use config::{ConfigError, OptimalConfig};
pub use interp::Interp1d;
pub use length_solver::{
    min_len_plant, min_len_plant_z, solve_length, LengthConstraint, LengthSolverConfig,
};
pub use objective::{energy_objective, pipe_residual, plant_power, power_residual};
pub use optimal::find_optimal;
pub use partition::{
    check_plant, check_segments, recursive_plant, Branch, Candidate, Intake, PlacementStrategy,
    Plant, PlantArena, PlantIdx, PlantPath, PlantPoint, PointKind, Restitution, SearchBudget,
    SearchParams,
};
pub use profile::{build_profile, Profile, ProfileError};
pub use run::{build_profiles, optimize_streams, RunReport, SkippedStream, StreamResult};
pub use window::{LengthRange, Placement, Window};
pub use writers::{
    write_plant_points, write_plant_segments, PlantPointRecord, PlantSegmentRecord, POINT_SCHEMA,
    SEGMENT_SCHEMA,
};
