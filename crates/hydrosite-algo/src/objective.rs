//! Scalar objectives over a profile.
//!
//! `x0` is the intake position and `s` the along-line segment length, so
//! the restitution sits at `x0 + s`. All three functions are free of side
//! effects and borrow the profile read-only.

use crate::profile::Profile;
use hydrosite_core::{GRAVITY, WATER_DENSITY};

/// Residual returned by [`power_residual`] when the intake has no water.
pub const NO_DISCHARGE_SENTINEL: f64 = 99999.0;

/// Negated energy proxy: `-(h(x0) - h(x0 + s)) · q(x0 + s)`.
///
/// Uses strict interpolation; candidates reaching outside the profile
/// evaluate to `+inf` so a minimizer never picks them.
pub fn energy_objective(x0: f64, s: f64, profile: &Profile) -> f64 {
    let h = profile.elevation();
    let q = profile.discharge();
    match (h.eval(x0), h.eval(x0 + s), q.eval(x0 + s)) {
        (Some(h_in), Some(h_out), Some(q_out)) => -((h_in - h_out) * q_out),
        _ => f64::INFINITY,
    }
}

/// Potential power in kW of a plant diverting the intake discharge.
///
/// Outside the profile, elevation and discharge read as 0.
pub fn plant_power(x0: f64, s: f64, profile: &Profile) -> f64 {
    let h = profile.elevation_filled();
    let q = profile.discharge_filled();
    let head = h.eval_or_zero(x0) - h.eval_or_zero(x0 + s);
    WATER_DENSITY * GRAVITY * q.eval_or_zero(x0) * head / 1000.0
}

/// `p_max - power(x0, s)`; its root in `s` reaches the power cap exactly.
pub fn power_residual(s: f64, x0: f64, profile: &Profile, p_max: f64) -> f64 {
    if profile.discharge_filled().eval_or_zero(x0) == 0.0 {
        return NO_DISCHARGE_SENTINEL;
    }
    p_max - plant_power(x0, s, profile)
}

/// `l_max - s / cos(atan(Δh / s))`: pipe-length cap minus the straight-line
/// distance between intake and restitution.
pub fn pipe_residual(s: f64, x0: f64, profile: &Profile, l_max: f64) -> f64 {
    let h = profile.elevation_filled();
    let dz = h.eval_or_zero(x0) - h.eval_or_zero(x0 + s);
    let alpha = (dz / s).atan();
    l_max - s / alpha.cos()
}
