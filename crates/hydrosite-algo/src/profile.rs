//! Array builder: along-line profiles of distance, elevation and discharge.
//!
//! Every vertex of the stream line is sampled on both rasters (no
//! resampling). The resulting arrays are shared read-only by every solver
//! that works on the line.
//!
//! ## Direction normalization
//!
//! The search assumes positions grow downstream. Lines digitized the other
//! way are detected with a partial sum of elevation drops over the first
//! `N - 2` vertices, i.e. `h[0] - h[N-2]`. When negative, the line and all
//! arrays are reversed. This is a heuristic: a profile with a hump near the
//! outlet can stay unreversed, so callers must not assume `h` is monotone.

use crate::interp::Interp1d;
use hydrosite_core::{HydroError, Polyline, RasterSampler};
use thiserror::Error;
use tracing::trace;

/// Profile building errors
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ProfileError {
    #[error("line has no vertices")]
    EmptyLine,
    #[error("no elevation at vertex {vertex} ({x:.3}, {y:.3})")]
    MissingElevation { vertex: usize, x: f64, y: f64 },
    #[error("profile arrays differ in length: prog={prog}, h={h}, q={q}")]
    LengthMismatch { prog: usize, h: usize, q: usize },
}

impl From<ProfileError> for HydroError {
    fn from(err: ProfileError) -> Self {
        HydroError::Validation(err.to_string())
    }
}

/// Sampled profile of one stream line.
#[derive(Debug, Clone, PartialEq)]
pub struct Profile {
    /// Line geometry, possibly reversed
    pub line: Polyline,
    /// Cumulative distance along the line at each vertex
    pub prog: Vec<f64>,
    /// Elevation at each vertex
    pub h: Vec<f64>,
    /// Discharge at each vertex
    pub q: Vec<f64>,
    /// Whether the input line was reversed
    pub reversed: bool,
}

impl Profile {
    /// Assemble a profile from precomputed arrays.
    pub fn new(
        line: Polyline,
        prog: Vec<f64>,
        h: Vec<f64>,
        q: Vec<f64>,
    ) -> Result<Self, ProfileError> {
        if prog.len() != h.len() || prog.len() != q.len() {
            return Err(ProfileError::LengthMismatch {
                prog: prog.len(),
                h: h.len(),
                q: q.len(),
            });
        }
        Ok(Self {
            line,
            prog,
            h,
            q,
            reversed: false,
        })
    }

    /// Profile of a straight line laid along the x axis at the `prog` stations.
    pub fn straight(prog: Vec<f64>, h: Vec<f64>, q: Vec<f64>) -> Result<Self, ProfileError> {
        let line = Polyline::from_xy(&prog.iter().map(|&p| (p, 0.0)).collect::<Vec<_>>());
        Self::new(line, prog, h, q)
    }

    pub fn len(&self) -> usize {
        self.prog.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prog.is_empty()
    }

    /// Along-line position of the last vertex.
    pub fn end(&self) -> f64 {
        self.prog.last().copied().unwrap_or(0.0)
    }

    /// Strict elevation interpolator.
    pub fn elevation(&self) -> Interp1d<'_> {
        Interp1d::new(&self.prog, &self.h)
    }

    /// Strict discharge interpolator.
    pub fn discharge(&self) -> Interp1d<'_> {
        Interp1d::new(&self.prog, &self.q)
    }

    /// Elevation interpolator that reads 0 outside the line.
    pub fn elevation_filled(&self) -> Interp1d<'_> {
        self.elevation().with_fill(0.0)
    }

    /// Discharge interpolator that reads 0 outside the line.
    pub fn discharge_filled(&self) -> Interp1d<'_> {
        self.discharge().with_fill(0.0)
    }
}

/// Sample `line` on both rasters and normalize its direction.
///
/// Missing discharge reads as 0; missing elevation is an error because the
/// head of every candidate would be meaningless.
pub fn build_profile<D, E>(
    line: &Polyline,
    discharge: &D,
    elevation: &E,
) -> Result<Profile, ProfileError>
where
    D: RasterSampler + ?Sized,
    E: RasterSampler + ?Sized,
{
    if line.is_empty() {
        return Err(ProfileError::EmptyLine);
    }

    let mut h = Vec::with_capacity(line.len());
    let mut q = Vec::with_capacity(line.len());
    for (vertex, c) in line.coords().iter().enumerate() {
        let z = elevation
            .sample(c.x, c.y)
            .filter(|z| z.is_finite())
            .ok_or(ProfileError::MissingElevation {
                vertex,
                x: c.x,
                y: c.y,
            })?;
        h.push(z);
        q.push(discharge.sample(c.x, c.y).filter(|v| v.is_finite()).unwrap_or(0.0));
    }

    let mut line = line.clone();
    let reversed = needs_reversal(&h);
    if reversed {
        trace!(vertices = line.len(), "reversing line to run downstream");
        line.reverse();
        h.reverse();
        q.reverse();
    }
    let prog = line.cumulative_distances();

    Ok(Profile {
        line,
        prog,
        h,
        q,
        reversed,
    })
}

/// Partial-sum direction heuristic: `Σ (h[i] - h[i+1])` over `i < N-2`.
pub fn needs_reversal(h: &[f64]) -> bool {
    let n = h.len();
    if n < 3 {
        return false;
    }
    let drop: f64 = h[..n - 1].windows(2).map(|w| w[0] - w[1]).sum();
    drop < 0.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use hydrosite_core::{ConstantRaster, FnRaster};

    fn line() -> Polyline {
        Polyline::from_xy(&[(0.0, 0.0), (10.0, 0.0), (20.0, 0.0), (30.0, 0.0), (40.0, 0.0)])
    }

    #[test]
    fn test_downstream_line_kept() {
        let dem = FnRaster(|x: f64, _| Some(100.0 - x));
        let p = build_profile(&line(), &ConstantRaster(5.0), &dem).unwrap();
        assert!(!p.reversed);
        assert_eq!(p.prog, vec![0.0, 10.0, 20.0, 30.0, 40.0]);
        assert_eq!(p.h, vec![100.0, 90.0, 80.0, 70.0, 60.0]);
        assert_eq!(p.q, vec![5.0; 5]);
    }

    #[test]
    fn test_upstream_line_reversed() {
        let dem = FnRaster(|x: f64, _| Some(60.0 + x));
        let flow = FnRaster(|x: f64, _| Some(10.0 - x / 10.0));
        let p = build_profile(&line(), &flow, &dem).unwrap();
        assert!(p.reversed);
        assert_eq!(p.h, vec![100.0, 90.0, 80.0, 70.0, 60.0]);
        assert_eq!(p.q, vec![6.0, 7.0, 8.0, 9.0, 10.0]);
        assert_eq!(p.line.coords()[0].x, 40.0);
        assert!(p.prog.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn test_heuristic_ignores_last_vertex() {
        // Rises only on the final step, so h[0] - h[N-2] >= 0
        assert!(!needs_reversal(&[100.0, 90.0, 80.0, 120.0]));
        assert!(needs_reversal(&[80.0, 90.0, 100.0, 50.0]));
        assert!(!needs_reversal(&[10.0, 20.0]));
    }

    #[test]
    fn test_missing_discharge_reads_zero() {
        let flow = FnRaster(|x: f64, _| if x > 25.0 { None } else { Some(2.0) });
        let dem = FnRaster(|x: f64, _| Some(100.0 - x));
        let p = build_profile(&line(), &flow, &dem).unwrap();
        assert_eq!(p.q, vec![2.0, 2.0, 2.0, 0.0, 0.0]);
    }

    #[test]
    fn test_missing_elevation_is_error() {
        let dem = FnRaster(|x: f64, _| if x == 20.0 { None } else { Some(1.0) });
        let err = build_profile(&line(), &ConstantRaster(1.0), &dem).unwrap_err();
        assert_eq!(
            err,
            ProfileError::MissingElevation {
                vertex: 2,
                x: 20.0,
                y: 0.0
            }
        );
    }

    #[test]
    fn test_short_line_not_special_cased() {
        let short = Polyline::from_xy(&[(0.0, 0.0), (5.0, 0.0)]);
        let dem = FnRaster(|x: f64, _| Some(x));
        let p = build_profile(&short, &ConstantRaster(1.0), &dem).unwrap();
        assert_eq!(p.len(), 2);
        assert!(!p.reversed);
    }

    #[test]
    fn test_length_mismatch() {
        let err = Profile::straight(vec![0.0, 1.0], vec![1.0], vec![1.0, 1.0]).unwrap_err();
        assert!(matches!(err, ProfileError::LengthMismatch { .. }));
    }
}
