//! Segment-length solver.
//!
//! For each intake position on a uniform grid across the window, solve for
//! the segment length at which a physical cap is reached exactly: either the
//! plant power hits `p_max` ([`min_len_plant`]) or the straight pipe between
//! intake and restitution hits `l_max` ([`min_len_plant_z`]).
//!
//! ## Root finding
//!
//! Each residual is solved with argmin's [`BrentRoot`] on the bracket
//! `[MIN_TRIAL_LENGTH, line_end - x0]`. A root is accepted only when argmin
//! terminates with [`TerminationReason::SolverConverged`]; a bracket without
//! a sign change, an evaluation error or an exhausted iteration budget all
//! record a length of 0 for that intake.
//!
//! ## Selection and fallback
//!
//! Candidates are sorted by length, longest first, and the first one whose
//! restitution stays inside the window with a positive length wins. When no
//! candidate qualifies the whole window `(start, end - start)` is returned.
//! That fallback can exceed the cap it was asked to respect; it is kept on
//! purpose so that short windows still yield a plant.

use crate::objective::{pipe_residual, power_residual};
use crate::profile::Profile;
use crate::window::{Placement, Window};
use argmin::core::{CostFunction, Error, Executor, State, TerminationReason};
use argmin::solver::brent::BrentRoot;
use serde::{Deserialize, Serialize};
use tracing::trace;

/// Smallest trial length; the pipe residual is undefined at `s = 0`.
const MIN_TRIAL_LENGTH: f64 = 1e-6;

/// Length solver configuration
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LengthSolverConfig {
    /// Step between candidate intake positions
    pub tol: f64,
    /// Bracket tolerance passed to Brent's method
    pub root_tol: f64,
    /// Iteration cap per root search
    pub max_iters: u64,
}

impl Default for LengthSolverConfig {
    fn default() -> Self {
        Self {
            tol: 10.0,
            root_tol: 1e-6,
            max_iters: 100,
        }
    }
}

/// Physical cap that fixes the segment length.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LengthConstraint {
    /// Plant power must not exceed `p_max` (kW)
    Power { p_max: f64 },
    /// Straight-line pipe must not exceed `l_max`
    PipeLength { l_max: f64 },
}

struct Residual<'a> {
    profile: &'a Profile,
    x0: f64,
    constraint: LengthConstraint,
}

impl CostFunction for Residual<'_> {
    type Param = f64;
    type Output = f64;

    fn cost(&self, s: &Self::Param) -> Result<Self::Output, Error> {
        Ok(match self.constraint {
            LengthConstraint::Power { p_max } => power_residual(*s, self.x0, self.profile, p_max),
            LengthConstraint::PipeLength { l_max } => {
                pipe_residual(*s, self.x0, self.profile, l_max)
            }
        })
    }
}

/// Solve for the length at which `constraint` binds for an intake at `x0`.
///
/// Returns `None` unless the root search reports convergence.
pub fn solve_length(
    profile: &Profile,
    x0: f64,
    constraint: LengthConstraint,
    config: &LengthSolverConfig,
) -> Option<f64> {
    let upper = profile.end() - x0;
    if !(upper > MIN_TRIAL_LENGTH) {
        return None;
    }

    let problem = Residual {
        profile,
        x0,
        constraint,
    };
    let lo = problem.cost(&MIN_TRIAL_LENGTH).ok()?;
    let hi = problem.cost(&upper).ok()?;
    if !(lo.is_finite() && hi.is_finite()) || lo * hi > 0.0 {
        return None;
    }
    let solver = BrentRoot::new(MIN_TRIAL_LENGTH, upper, config.root_tol);
    let result = match Executor::new(problem, solver)
        .configure(|state| state.max_iters(config.max_iters))
        .run()
    {
        Ok(result) => result,
        Err(err) => {
            trace!(x0, %err, "no root for segment length");
            return None;
        }
    };

    let state = result.state();
    if !matches!(
        state.get_termination_reason(),
        Some(TerminationReason::SolverConverged)
    ) {
        trace!(x0, "segment length search did not converge");
        return None;
    }
    state.get_param().copied().filter(|s| s.is_finite())
}

/// Power-capped variant: `(intake, length)` with the longest feasible length.
pub fn min_len_plant(
    profile: &Profile,
    window: Window,
    p_max: f64,
    config: &LengthSolverConfig,
) -> Placement {
    scan_lengths(profile, window, LengthConstraint::Power { p_max }, config)
}

/// Pipe-length-capped variant: `(intake, length)` with the longest feasible length.
pub fn min_len_plant_z(
    profile: &Profile,
    window: Window,
    l_max: f64,
    config: &LengthSolverConfig,
) -> Placement {
    scan_lengths(profile, window, LengthConstraint::PipeLength { l_max }, config)
}

fn scan_lengths(
    profile: &Profile,
    window: Window,
    constraint: LengthConstraint,
    config: &LengthSolverConfig,
) -> Placement {
    let discharge = profile.discharge_filled();
    let mut candidates: Vec<Placement> = intake_grid(window, config.tol)
        .map(|x0| {
            let dry = matches!(constraint, LengthConstraint::Power { .. })
                && discharge.eval_or_zero(x0) == 0.0;
            let length = if dry {
                0.0
            } else {
                solve_length(profile, x0, constraint, config).unwrap_or(0.0)
            };
            Placement::new(x0, length)
        })
        .collect();

    // stable: equal lengths keep the upstream-most intake first
    candidates.sort_by(|a, b| b.length.total_cmp(&a.length));

    candidates
        .into_iter()
        .find(|c| c.length > 0.0 && c.restitution() <= window.end)
        .unwrap_or_else(|| {
            trace!(?window, "no candidate fits, using whole window");
            Placement::whole(window)
        })
}

/// `start, start + tol, ...` strictly below `end`.
fn intake_grid(window: Window, tol: f64) -> impl Iterator<Item = f64> {
    let count = if tol > 0.0 && window.len() > 0.0 {
        (window.len() / tol).ceil() as usize
    } else {
        0
    };
    (0..count).map(move |i| window.start + i as f64 * tol)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn linear_profile() -> Profile {
        Profile::straight(
            vec![0.0, 10.0, 20.0, 30.0, 40.0],
            vec![100.0, 90.0, 80.0, 70.0, 60.0],
            vec![5.0; 5],
        )
        .unwrap()
    }

    #[test]
    fn test_intake_grid() {
        let xs: Vec<f64> = intake_grid(Window::new(0.0, 40.0), 10.0).collect();
        assert_eq!(xs, vec![0.0, 10.0, 20.0, 30.0]);
        let xs: Vec<f64> = intake_grid(Window::new(5.0, 26.0), 10.0).collect();
        assert_eq!(xs, vec![5.0, 15.0, 25.0]);
        assert_eq!(intake_grid(Window::new(5.0, 5.0), 10.0).count(), 0);
    }

    #[test]
    fn test_solve_pipe_length() {
        // slope 1: s * sqrt(2) = 20
        let s = solve_length(
            &linear_profile(),
            0.0,
            LengthConstraint::PipeLength { l_max: 20.0 },
            &LengthSolverConfig::default(),
        )
        .unwrap();
        assert!((s - 20.0 / 2f64.sqrt()).abs() < 1e-4);
    }

    #[test]
    fn test_solve_power_cap() {
        // 9.81 * 5 * s = 981 -> s = 20
        let s = solve_length(
            &linear_profile(),
            0.0,
            LengthConstraint::Power { p_max: 981.0 },
            &LengthSolverConfig::default(),
        )
        .unwrap();
        assert!((s - 20.0).abs() < 1e-4);
    }

    #[test]
    fn test_unreachable_cap_has_no_root() {
        // At most 100 m of head in the whole line
        let s = solve_length(
            &linear_profile(),
            0.0,
            LengthConstraint::Power { p_max: 1e9 },
            &LengthSolverConfig::default(),
        );
        assert!(s.is_none());
    }

    #[test]
    fn test_min_len_plant_z_inside_window() {
        let p = linear_profile();
        let config = LengthSolverConfig::default();
        let placement = min_len_plant_z(&p, Window::new(0.0, 40.0), 25.0, &config);
        assert!(placement.intake >= 0.0);
        assert!(placement.restitution() <= 40.0);
        assert!((placement.length - 25.0 / 2f64.sqrt()).abs() < 1e-3);
    }

    #[test]
    fn test_short_window_falls_back_to_whole() {
        let p = linear_profile();
        let config = LengthSolverConfig::default();
        let placement = min_len_plant_z(&p, Window::new(10.0, 20.0), 25.0, &config);
        assert_eq!(placement, Placement::new(10.0, 10.0));
    }

    #[test]
    fn test_dry_stream_falls_back_to_whole() {
        let p = Profile::straight(vec![0.0, 50.0, 100.0], vec![30.0, 20.0, 10.0], vec![0.0; 3])
            .unwrap();
        let config = LengthSolverConfig::default();
        let placement = min_len_plant(&p, Window::new(0.0, 100.0), 10.0, &config);
        assert_eq!(placement, Placement::new(0.0, 100.0));
    }
}
