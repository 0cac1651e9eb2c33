//! Run configuration for the optimal plant search.

use crate::length_solver::LengthSolverConfig;
use crate::partition::{PlacementStrategy, SearchParams, DEFAULT_MAX_INVOCATIONS};
use crate::window::LengthRange;
use hydrosite_core::HydroError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration errors
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    #[error("{name} must be positive, got {value}")]
    NotPositive { name: &'static str, value: f64 },
    #[error("len_min ({min}) exceeds len_max ({max})")]
    InvertedRange { min: f64, max: f64 },
    #[error("distance must be non-negative, got {0}")]
    NegativeDistance(f64),
    #[error("efficiency must lie in (0, 1], got {0}")]
    Efficiency(f64),
    #[error("p_max and l_max are mutually exclusive")]
    ConflictingCaps,
    #[error("max_invocations must be at least 1")]
    NoInvocations,
}

impl From<ConfigError> for HydroError {
    fn from(err: ConfigError) -> Self {
        HydroError::Config(err.to_string())
    }
}

/// User-facing parameters of a run.
///
/// Lengths are in map units (meters), power in kW.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OptimalConfig {
    /// Minimum plant length
    pub len_min: f64,
    /// Maximum plant length
    pub len_max: f64,
    /// Minimum distance between neighbouring plants
    pub distance: f64,
    /// Power cap per plant; selects the power-capped length solver
    pub p_max: Option<f64>,
    /// Straight pipe-length cap; selects the pipe-length solver
    pub l_max: Option<f64>,
    /// Plant efficiency applied to the potential power
    pub efficiency: f64,
    /// Plants at or below this power are not written
    pub min_power: f64,
    /// Step between candidate intakes in the length solver
    pub tol: f64,
    /// Cap on recursive invocations per stream
    pub max_invocations: usize,
}

impl Default for OptimalConfig {
    fn default() -> Self {
        Self {
            len_min: 10.0,
            len_max: 100.0,
            distance: 0.5,
            p_max: None,
            l_max: None,
            efficiency: 1.0,
            min_power: 0.0,
            tol: 10.0,
            max_invocations: DEFAULT_MAX_INVOCATIONS,
        }
    }
}

impl OptimalConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("len_min", self.len_min)?;
        positive("len_max", self.len_max)?;
        positive("tol", self.tol)?;
        if self.len_min > self.len_max {
            return Err(ConfigError::InvertedRange {
                min: self.len_min,
                max: self.len_max,
            });
        }
        if !(self.distance >= 0.0) {
            return Err(ConfigError::NegativeDistance(self.distance));
        }
        if !(self.efficiency > 0.0 && self.efficiency <= 1.0) {
            return Err(ConfigError::Efficiency(self.efficiency));
        }
        if self.p_max.is_some() && self.l_max.is_some() {
            return Err(ConfigError::ConflictingCaps);
        }
        if let Some(p_max) = self.p_max {
            positive("p_max", p_max)?;
        }
        if let Some(l_max) = self.l_max {
            positive("l_max", l_max)?;
        }
        if self.max_invocations == 0 {
            return Err(ConfigError::NoInvocations);
        }
        Ok(())
    }

    pub fn strategy(&self) -> PlacementStrategy {
        match (self.p_max, self.l_max) {
            (Some(p_max), _) => PlacementStrategy::PowerCap { p_max },
            (None, Some(l_max)) => PlacementStrategy::PipeLength { l_max },
            (None, None) => PlacementStrategy::Optimal,
        }
    }

    /// Validated search parameters.
    pub fn search_params(&self) -> Result<SearchParams, ConfigError> {
        self.validate()?;
        Ok(SearchParams {
            range: LengthRange::new(self.len_min, self.len_max),
            distance: self.distance,
            strategy: self.strategy(),
            solver: LengthSolverConfig {
                tol: self.tol,
                ..LengthSolverConfig::default()
            },
            max_invocations: self.max_invocations,
        })
    }
}

fn positive(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::NotPositive { name, value })
    }
}
