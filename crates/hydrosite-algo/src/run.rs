//! Multi-stream driver.
//!
//! Streams share nothing but the read-only rasters, so each one is profiled
//! and partitioned on its own. With the `parallel` feature the streams are
//! spread over the rayon pool; results are sorted by stream id either way.
//!
//! Lines sharing a stream id (parts of a MultiLineString, or repeated ids in
//! the input) are numbered as parts in input order. Their plants carry the
//! part in the rank and plant ids run on across the parts, so output rows
//! stay unique per stream id.

use crate::partition::{recursive_plant, Plant, PlantArena, SearchParams};
use crate::profile::{build_profile, Profile, ProfileError};
use hydrosite_core::{Kilowatts, PlantId, RasterSampler, StreamId, StreamLine};
#[cfg(feature = "parallel")]
use rayon::prelude::*;
use std::collections::HashMap;
use tracing::{info, warn};

/// A stream that could not be processed.
#[derive(Debug, Clone, PartialEq)]
pub struct SkippedStream {
    pub id: StreamId,
    pub part: Option<u32>,
    pub error: ProfileError,
}

/// Plants found on one stream.
#[derive(Debug, Clone, PartialEq)]
pub struct StreamResult {
    pub id: StreamId,
    /// Part number when several lines share `id`
    pub part: Option<u32>,
    pub profile: Profile,
    pub plants: PlantArena,
}

/// Outcome of a multi-stream search.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunReport {
    pub streams: Vec<StreamResult>,
    pub skipped: Vec<SkippedStream>,
}

impl RunReport {
    /// Every plant, in stream order then discovery order.
    pub fn plants(&self) -> impl Iterator<Item = &Plant> + '_ {
        self.streams.iter().flat_map(|s| s.plants.iter())
    }

    pub fn plant_count(&self) -> usize {
        self.streams.iter().map(|s| s.plants.len()).sum()
    }

    pub fn total_power(&self, efficiency: f64) -> Kilowatts {
        self.plants().map(|p| p.potential_power(efficiency)).sum()
    }
}

/// Build the profile of every stream. Failed streams are returned apart.
pub fn build_profiles<D, E>(
    streams: &[StreamLine],
    discharge: &D,
    elevation: &E,
) -> (Vec<(StreamId, Profile)>, Vec<SkippedStream>)
where
    D: RasterSampler + ?Sized,
    E: RasterSampler + ?Sized,
{
    let mut built = Vec::with_capacity(streams.len());
    let mut skipped = Vec::new();
    for stream in streams {
        match build_profile(&stream.geometry, discharge, elevation) {
            Ok(profile) => built.push((stream.id, profile)),
            Err(error) => {
                warn!(stream = %stream.id, %error, "skipping stream");
                skipped.push(SkippedStream {
                    id: stream.id,
                    part: None,
                    error,
                });
            }
        }
    }
    (built, skipped)
}

/// Profile and partition every stream.
pub fn optimize_streams<D, E>(
    streams: &[StreamLine],
    discharge: &D,
    elevation: &E,
    params: &SearchParams,
) -> RunReport
where
    D: RasterSampler + ?Sized,
    E: RasterSampler + ?Sized,
{
    type Outcome = Result<StreamResult, SkippedStream>;
    let process = |(stream, part): (&StreamLine, Option<u32>)| -> Outcome {
        let profile = build_profile(&stream.geometry, discharge, elevation).map_err(|error| {
            warn!(stream = %stream.id, ?part, %error, "skipping stream");
            SkippedStream {
                id: stream.id,
                part,
                error,
            }
        })?;
        let plants = recursive_plant(&profile, stream.id, params);
        Ok(StreamResult {
            id: stream.id,
            part,
            profile,
            plants,
        })
    };

    let jobs: Vec<(&StreamLine, Option<u32>)> =
        streams.iter().zip(part_numbers(streams)).collect();
    #[cfg(feature = "parallel")]
    let outcomes: Vec<Outcome> = jobs.into_par_iter().map(process).collect();
    #[cfg(not(feature = "parallel"))]
    let outcomes: Vec<Outcome> = jobs.into_iter().map(process).collect();

    let mut report = RunReport::default();
    for outcome in outcomes {
        match outcome {
            Ok(result) => report.streams.push(result),
            Err(skipped) => report.skipped.push(skipped),
        }
    }
    report.streams.sort_by_key(|s| (s.id, s.part));
    report.skipped.sort_by_key(|s| (s.id, s.part));
    number_parts(&mut report.streams);

    info!(
        streams = report.streams.len(),
        skipped = report.skipped.len(),
        plants = report.plant_count(),
        "search finished"
    );
    report
}

/// Part number of every line, `None` when its stream id is unique.
fn part_numbers(streams: &[StreamLine]) -> Vec<Option<u32>> {
    let mut totals: HashMap<StreamId, u32> = HashMap::new();
    for stream in streams {
        *totals.entry(stream.id).or_default() += 1;
    }
    let mut seen: HashMap<StreamId, u32> = HashMap::new();
    streams
        .iter()
        .map(|stream| {
            if totals[&stream.id] < 2 {
                return None;
            }
            let part = seen.entry(stream.id).or_default();
            *part += 1;
            Some(*part)
        })
        .collect()
}

/// Continue plant ids across the parts of a stream. `results` must be sorted.
fn number_parts(results: &mut [StreamResult]) {
    let mut current = None;
    let mut next_id = 1;
    for result in results {
        if current != Some(result.id) {
            current = Some(result.id);
            next_id = 1;
        }
        if let Some(part) = result.part {
            result.plants.assign_part(part, PlantId::new(next_id));
        }
        next_id += result.plants.len();
    }
}
