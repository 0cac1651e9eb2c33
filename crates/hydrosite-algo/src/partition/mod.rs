//! Recursive partitioner
//!
//! Places plants one window at a time. Each accepted plant splits its
//! window into an upstream and a downstream residual, which are searched in
//! turn:
//!
//! ```text
//!  window.start                                          window.end
//!  |-------- branch 1 --------[ intake ==== restitution ]--- branch 2 ---|
//! ```
//!
//! A window terminates the recursion when it is too short for the minimum
//! plant length plus twice the plant distance, when no plant can be cut out
//! of the line, or when the per-stream invocation budget is spent. None of
//! these are errors: the search degrades to fewer plants.

mod arena;
mod plant;
mod search;

pub use arena::{Branch, PlantArena, PlantIdx, PlantPath};
pub use plant::{Intake, Plant, PlantPoint, PointKind, Restitution};
pub use search::{
    check_plant, check_segments, recursive_plant, Candidate, PlacementStrategy, SearchBudget,
    SearchParams, DEFAULT_MAX_INVOCATIONS,
};
