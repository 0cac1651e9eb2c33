//! Single-segment optimizer: exhaustive grid search.
//!
//! The grid spans intake positions `x0 ∈ [start, end - eps - min_len]` and
//! segment lengths `s ∈ [min_len, max_len]` with [`GRID_POINTS`] points per
//! axis, endpoints included. There is no local refinement after the grid,
//! so results are fully deterministic for a given resolution.

use crate::objective::energy_objective;
use crate::profile::Profile;
use crate::window::{LengthRange, Placement, Window};

/// Points per grid axis.
pub const GRID_POINTS: usize = 20;

/// Margin taken off the far edge of the intake axis.
pub const EDGE_EPS: f64 = 0.5;

/// Best `(x0, s)` grid point for [`energy_objective`].
///
/// A point is feasible when its restitution stays inside the window and the
/// objective is finite. Ties keep the first point in intake-major order.
/// Returns `None` when no grid point is feasible.
pub fn find_optimal(profile: &Profile, range: LengthRange, window: Window) -> Option<Placement> {
    let x_hi = (window.end - EDGE_EPS - range.min).max(window.start);
    let intakes = grid_axis(window.start, x_hi, GRID_POINTS);
    let lengths = grid_axis(range.min, range.max, GRID_POINTS);

    let mut best: Option<(f64, Placement)> = None;
    for &x0 in &intakes {
        for &s in &lengths {
            let candidate = Placement::new(x0, s);
            if candidate.restitution() > window.end {
                continue;
            }
            let value = energy_objective(x0, s, profile);
            if !value.is_finite() {
                continue;
            }
            if best.map_or(true, |(v, _)| value < v) {
                best = Some((value, candidate));
            }
        }
    }
    best.map(|(_, placement)| placement)
}

/// `n` evenly spaced points over `[lo, hi]`, or just `lo` for an empty range.
fn grid_axis(lo: f64, hi: f64, n: usize) -> Vec<f64> {
    if !(hi > lo) || n < 2 {
        return vec![lo];
    }
    let step = (hi - lo) / (n - 1) as f64;
    (0..n)
        .map(|i| if i == n - 1 { hi } else { lo + i as f64 * step })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile() -> Profile {
        // steep upper half, flat lower half, discharge growing downstream
        Profile::straight(
            vec![0.0, 50.0, 100.0, 150.0, 200.0],
            vec![200.0, 150.0, 100.0, 95.0, 90.0],
            vec![1.0, 1.0, 2.0, 2.0, 2.0],
        )
        .unwrap()
    }

    #[test]
    fn test_grid_axis() {
        let axis = grid_axis(0.0, 19.0, 20);
        assert_eq!(axis.len(), 20);
        assert_eq!(axis[0], 0.0);
        assert_eq!(axis[19], 19.0);
        assert_eq!(grid_axis(5.0, 5.0, 20), vec![5.0]);
        assert_eq!(grid_axis(5.0, 1.0, 20), vec![5.0]);
    }

    #[test]
    fn test_picks_steep_reach() {
        let best = find_optimal(
            &profile(),
            LengthRange::new(20.0, 100.0),
            Window::new(0.0, 200.0),
        )
        .unwrap();
        assert!(best.restitution() <= 200.0);
        assert!(best.length >= 20.0 && best.length <= 100.0);
        // any window ending at 100 with full length has head 100 * q 2
        let value = energy_objective(best.intake, best.length, &profile());
        assert!(value <= -200.0 + 1e-9);
    }

    #[test]
    fn test_deterministic() {
        let p = profile();
        let a = find_optimal(&p, LengthRange::new(10.0, 60.0), Window::new(20.0, 180.0));
        let b = find_optimal(&p, LengthRange::new(10.0, 60.0), Window::new(20.0, 180.0));
        assert_eq!(a, b);
    }

    #[test]
    fn test_exact_fit_window() {
        let best = find_optimal(
            &profile(),
            LengthRange::new(40.0, 40.0),
            Window::new(60.0, 100.0),
        )
        .unwrap();
        assert_eq!(best, Placement::new(60.0, 40.0));
    }

    #[test]
    fn test_no_feasible_point() {
        let best = find_optimal(
            &profile(),
            LengthRange::new(50.0, 60.0),
            Window::new(0.0, 30.0),
        );
        assert!(best.is_none());
    }
}
