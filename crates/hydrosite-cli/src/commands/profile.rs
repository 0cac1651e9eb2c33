use std::path::Path;

use anyhow::{Context, Result};
use hydrosite_algo::{build_profiles, Profile};
use hydrosite_cli::cli::InputArgs;
use hydrosite_core::StreamId;
use hydrosite_io::{read_streams, write_profiles_csv, AsciiGrid, ProfileRecord};
use tracing::info;

pub fn handle(inputs: &InputArgs, out: &Path) -> Result<()> {
    let streams = read_streams(&inputs.streams)?;
    let discharge = AsciiGrid::from_path(&inputs.discharge)?;
    let elevation = AsciiGrid::from_path(&inputs.elevation)?;

    let (profiles, skipped) = build_profiles(&streams, &discharge, &elevation);
    let rows = write_profiles_csv(out, profiles.iter().flat_map(|(id, p)| records(*id, p)))
        .with_context(|| format!("writing profiles to {}", out.display()))?;
    info!(
        streams = profiles.len(),
        skipped = skipped.len(),
        rows,
        path = %out.display(),
        "Wrote profiles"
    );
    Ok(())
}

fn records(stream: StreamId, profile: &Profile) -> impl Iterator<Item = ProfileRecord> + '_ {
    profile
        .line
        .coords()
        .iter()
        .enumerate()
        .map(move |(vertex, c)| ProfileRecord {
            stream_id: stream.value(),
            vertex,
            x: c.x,
            y: c.y,
            prog: profile.prog[vertex],
            h: profile.h[vertex],
            q: profile.q[vertex],
        })
}
