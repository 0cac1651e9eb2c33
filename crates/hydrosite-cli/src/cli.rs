use clap::{ArgGroup, Args, CommandFactory, Parser, Subcommand, ValueEnum, ValueHint};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "hydrosite", author, version, about, long_about = None)]
pub struct Cli {
    /// Set the logging level
    #[arg(long, default_value = "info", global = true)]
    pub log_level: tracing::Level,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Place non-overlapping plants along every stream
    Optimal(OptimalArgs),
    /// Write the sampled distance/elevation/discharge profile of every stream
    Profile {
        #[command(flatten)]
        inputs: InputArgs,
        /// Output CSV file
        #[arg(long, value_hint = ValueHint::FilePath)]
        out: PathBuf,
    },
}

/// Stream network and the two rasters sampled along it.
#[derive(Args, Debug, Clone)]
pub struct InputArgs {
    /// Stream network (GeoJSON LineString/MultiLineString features)
    #[arg(long, value_hint = ValueHint::FilePath)]
    pub streams: PathBuf,
    /// Discharge raster (ESRI ASCII grid, m³/s)
    #[arg(long, value_hint = ValueHint::FilePath)]
    pub discharge: PathBuf,
    /// Elevation raster (ESRI ASCII grid, m)
    #[arg(long, value_hint = ValueHint::FilePath)]
    pub elevation: PathBuf,
}

#[derive(Args, Debug, Clone)]
#[command(group(ArgGroup::new("outputs").required(true).multiple(true).args(["plants", "points"])))]
pub struct OptimalArgs {
    #[command(flatten)]
    pub inputs: InputArgs,

    /// TOML run configuration; command-line values take precedence
    #[arg(long, value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    /// Plant segments output (.geojson, .json or .csv)
    #[arg(long, value_hint = ValueHint::FilePath)]
    pub plants: Option<PathBuf>,

    /// Intake and restitution points output (.geojson, .json or .csv)
    #[arg(long, value_hint = ValueHint::FilePath)]
    pub points: Option<PathBuf>,

    /// Minimum plant length (m)
    #[arg(long)]
    pub len_min: Option<f64>,

    /// Maximum plant length (m)
    #[arg(long)]
    pub len_max: Option<f64>,

    /// Minimum distance between neighbouring plants (m)
    #[arg(long)]
    pub distance: Option<f64>,

    /// Power cap per plant (kW); selects the power-capped length solver
    #[arg(long, conflicts_with = "l_max")]
    pub p_max: Option<f64>,

    /// Straight pipe-length cap (m); selects the pipe-length solver
    #[arg(long)]
    pub l_max: Option<f64>,

    /// Plant efficiency in (0, 1]
    #[arg(long)]
    pub efficiency: Option<f64>,

    /// Only write plants above this potential power (kW)
    #[arg(long)]
    pub min_power: Option<f64>,

    /// Step between candidate intakes in the length solver (m)
    #[arg(long)]
    pub tol: Option<f64>,

    /// Worker threads ("auto" or a count)
    #[arg(long, default_value = "auto")]
    pub threads: String,

    /// Summary format printed after the run
    #[arg(long, value_enum, default_value_t = SummaryFormat::Plain)]
    pub format: SummaryFormat,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SummaryFormat {
    /// Tab-aligned table
    Plain,
    /// JSON document
    Json,
}

pub fn build_cli_command() -> clap::Command {
    Cli::command()
}
