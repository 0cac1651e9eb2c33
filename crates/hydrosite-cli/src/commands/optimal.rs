use std::io::{self, Write};
use std::time::Instant;

use anyhow::{Context, Result};
use hydrosite_algo::{
    optimize_streams, write_plant_points, write_plant_segments, OptimalConfig, RunReport,
};
use hydrosite_cli::cli::{OptimalArgs, SummaryFormat};
use hydrosite_io::{create_writer, read_streams, AsciiGrid};
use serde::Serialize;
use tabwriter::TabWriter;
use tracing::info;

use crate::commands::config::resolve_config;
use crate::commands::util::configure_threads;

pub fn handle(args: &OptimalArgs) -> Result<()> {
    let start = Instant::now();
    configure_threads(&args.threads);

    let config = resolve_config(args)?;
    let params = config.search_params()?;
    let streams = read_streams(&args.inputs.streams)?;
    let discharge = AsciiGrid::from_path(&args.inputs.discharge)?;
    let elevation = AsciiGrid::from_path(&args.inputs.elevation)?;
    info!(
        streams = streams.len(),
        strategy = ?params.strategy,
        len_min = config.len_min,
        len_max = config.len_max,
        "Searching plant sites"
    );

    let report = optimize_streams(&streams, &discharge, &elevation, &params);

    if let Some(path) = &args.plants {
        let mut writer = create_writer(path)?;
        let written = write_plant_segments(
            writer.as_mut(),
            report.plants(),
            config.efficiency,
            config.min_power,
        )
        .with_context(|| format!("writing {}", path.display()))?;
        info!(features = written, path = %path.display(), "Wrote plants");
    }
    if let Some(path) = &args.points {
        let mut writer = create_writer(path)?;
        let written = write_plant_points(
            writer.as_mut(),
            report.plants(),
            config.efficiency,
            config.min_power,
        )
        .with_context(|| format!("writing {}", path.display()))?;
        info!(features = written, path = %path.display(), "Wrote plant points");
    }

    let summary = summarize(&report, &config);
    match args.format {
        SummaryFormat::Plain => print_summary_table(&summary)?,
        SummaryFormat::Json => {
            serde_json::to_writer_pretty(io::stdout(), &summary)
                .context("serializing run summary to JSON")?;
            println!();
        }
    }
    info!(elapsed_ms = start.elapsed().as_millis() as u64, "Done");
    Ok(())
}

#[derive(Debug, Serialize)]
struct StreamSummary {
    stream_id: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    part: Option<u32>,
    plants: usize,
    /// Plants above the power threshold
    kept: usize,
    power_kw: f64,
    reversed: bool,
}

#[derive(Debug, Serialize)]
struct RunSummary {
    streams: Vec<StreamSummary>,
    skipped: Vec<u64>,
    total_power_kw: f64,
}

fn summarize(report: &RunReport, config: &OptimalConfig) -> RunSummary {
    let streams: Vec<StreamSummary> = report
        .streams
        .iter()
        .map(|s| {
            let powers: Vec<f64> = s
                .plants
                .iter()
                .map(|p| p.potential_power(config.efficiency).value())
                .filter(|kw| *kw > config.min_power)
                .collect();
            StreamSummary {
                stream_id: s.id.value(),
                part: s.part,
                plants: s.plants.len(),
                kept: powers.len(),
                power_kw: powers.iter().sum(),
                reversed: s.profile.reversed,
            }
        })
        .collect();
    let total_power_kw = streams.iter().map(|s| s.power_kw).sum();
    RunSummary {
        streams,
        skipped: report.skipped.iter().map(|s| s.id.value()).collect(),
        total_power_kw,
    }
}

fn print_summary_table(summary: &RunSummary) -> Result<()> {
    let mut writer = TabWriter::new(io::stdout());
    writeln!(writer, "STREAM\tPLANTS\tKEPT\tPOWER (kW)\tREVERSED")?;
    for s in &summary.streams {
        let stream = match s.part {
            Some(part) => format!("{}/{part}", s.stream_id),
            None => s.stream_id.to_string(),
        };
        writeln!(
            writer,
            "{stream}\t{}\t{}\t{:.1}\t{}",
            s.plants, s.kept, s.power_kw, s.reversed
        )?;
    }
    for id in &summary.skipped {
        writeln!(writer, "{id}\t-\t-\t-\tskipped")?;
    }
    writeln!(writer, "TOTAL\t\t\t{:.1}\t", summary.total_power_kw)?;
    writer.flush()?;
    Ok(())
}
