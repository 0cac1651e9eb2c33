use anyhow::{Context, Result};
use hydrosite_algo::OptimalConfig;
use hydrosite_cli::cli::OptimalArgs;
use std::path::Path;

/// Read a TOML run configuration. Missing keys keep their defaults.
pub fn read_config_file(path: &Path) -> Result<OptimalConfig> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    let config: OptimalConfig =
        toml::from_str(&contents).with_context(|| format!("parsing config {}", path.display()))?;
    Ok(config)
}

/// Defaults, then the config file, then command-line flags.
pub fn resolve_config(args: &OptimalArgs) -> Result<OptimalConfig> {
    let mut config = match &args.config {
        Some(path) => read_config_file(path)?,
        None => OptimalConfig::default(),
    };
    apply_overrides(&mut config, args);
    config.validate()?;
    Ok(config)
}

fn apply_overrides(config: &mut OptimalConfig, args: &OptimalArgs) {
    if let Some(v) = args.len_min {
        config.len_min = v;
    }
    if let Some(v) = args.len_max {
        config.len_max = v;
    }
    if let Some(v) = args.distance {
        config.distance = v;
    }
    // a cap given on the command line replaces whichever cap the file set
    if let Some(v) = args.p_max {
        config.p_max = Some(v);
        config.l_max = None;
    }
    if let Some(v) = args.l_max {
        config.l_max = Some(v);
        config.p_max = None;
    }
    if let Some(v) = args.efficiency {
        config.efficiency = v;
    }
    if let Some(v) = args.min_power {
        config.min_power = v;
    }
    if let Some(v) = args.tol {
        config.tol = v;
    }
}
