//! Polyline geometry with linear referencing.
//!
//! Stream centerlines are ordered vertex sequences. Positions along a line
//! are measured as cumulative 2D distance from the first vertex, which is the
//! same measure the profile arrays use, so a `(start, end)` pair found by the
//! search can be cut out of the line with [`Polyline::segment`].

use geo::{Euclidean, Length, LineInterpolatePoint};
use geo_types::{Coord, LineString};
use serde::{Deserialize, Serialize};

/// Segments shorter than this are treated as degenerate.
const SEGMENT_EPS: f64 = 1e-9;

/// An ordered sequence of 2D vertices.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Polyline {
    line: LineString<f64>,
}

impl Default for Polyline {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl Polyline {
    pub fn new(coords: Vec<Coord<f64>>) -> Self {
        Self {
            line: LineString::new(coords),
        }
    }

    /// Build from `(x, y)` tuples.
    pub fn from_xy(points: &[(f64, f64)]) -> Self {
        Self::new(points.iter().map(|&(x, y)| Coord { x, y }).collect())
    }

    pub fn coords(&self) -> &[Coord<f64>] {
        &self.line.0
    }

    /// Number of vertices
    pub fn len(&self) -> usize {
        self.line.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.line.0.is_empty()
    }

    /// Total 2D length of the line.
    pub fn length(&self) -> f64 {
        Euclidean.length(&self.line)
    }

    /// Cumulative distance at every vertex, starting at 0.
    pub fn cumulative_distances(&self) -> Vec<f64> {
        if self.is_empty() {
            return Vec::new();
        }
        let mut acc = 0.0;
        std::iter::once(0.0)
            .chain(self.line.lines().map(|segment| {
                acc += Euclidean.length(&segment);
                acc
            }))
            .collect()
    }

    /// Reverse vertex order in place.
    pub fn reverse(&mut self) {
        self.line.0.reverse();
    }

    /// Interpolated point at `distance` along the line, or `None` when the
    /// distance falls outside `[0, length]`.
    pub fn point_at(&self, distance_along: f64) -> Option<Coord<f64>> {
        if self.is_empty() || !distance_along.is_finite() || distance_along < 0.0 {
            return None;
        }
        let total = self.length();
        if distance_along > total + SEGMENT_EPS {
            return None;
        }
        if total <= SEGMENT_EPS {
            return self.line.0.first().copied();
        }
        let fraction = (distance_along / total).min(1.0);
        self.line.line_interpolate_point(fraction).map(|p| p.0)
    }

    /// Sub-line between two along-line distances.
    ///
    /// Distances are clamped to the line extent. Returns `None` for
    /// degenerate requests: `start >= end`, a window entirely outside the
    /// line, or a clamped window of zero length.
    pub fn segment(&self, start: f64, end: f64) -> Option<Polyline> {
        if self.len() < 2 || !start.is_finite() || !end.is_finite() || start >= end {
            return None;
        }
        let start = start.max(0.0);
        let end = end.min(self.length());
        if end - start <= SEGMENT_EPS {
            return None;
        }

        let first = self.point_at(start)?;
        let last = self.point_at(end)?;
        let interior = self
            .line
            .0
            .iter()
            .zip(self.cumulative_distances())
            .filter(|&(_, d)| d > start + SEGMENT_EPS && d < end - SEGMENT_EPS)
            .map(|(c, _)| *c);
        let coords = std::iter::once(first)
            .chain(interior)
            .chain(std::iter::once(last))
            .collect();
        Some(Polyline::new(coords))
    }
}

impl From<LineString<f64>> for Polyline {
    fn from(line: LineString<f64>) -> Self {
        Self { line }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn straight() -> Polyline {
        Polyline::from_xy(&[(0.0, 0.0), (10.0, 0.0), (20.0, 0.0), (30.0, 0.0)])
    }

    #[test]
    fn test_length_and_cumulative() {
        let line = Polyline::from_xy(&[(0.0, 0.0), (3.0, 4.0), (3.0, 10.0)]);
        assert!((line.length() - 11.0).abs() < 1e-12);
        assert_eq!(line.cumulative_distances(), vec![0.0, 5.0, 11.0]);
    }

    #[test]
    fn test_point_at() {
        let line = straight();
        let p = line.point_at(15.0).unwrap();
        assert!((p.x - 15.0).abs() < 1e-12);
        assert!(line.point_at(30.0).is_some());
        assert!(line.point_at(31.0).is_none());
        assert!(line.point_at(-1.0).is_none());
    }

    #[test]
    fn test_segment_keeps_interior_vertices() {
        let seg = straight().segment(5.0, 25.0).unwrap();
        let xs: Vec<f64> = seg.coords().iter().map(|c| c.x).collect();
        assert_eq!(xs, vec![5.0, 10.0, 20.0, 25.0]);
        assert!((seg.length() - 20.0).abs() < 1e-12);
    }

    #[test]
    fn test_segment_degenerate() {
        let line = straight();
        assert!(line.segment(10.0, 10.0).is_none());
        assert!(line.segment(20.0, 10.0).is_none());
        assert!(line.segment(40.0, 50.0).is_none());
        assert!(Polyline::from_xy(&[(0.0, 0.0)]).segment(0.0, 1.0).is_none());
    }

    #[test]
    fn test_segment_clamps_to_extent() {
        let seg = straight().segment(-5.0, 100.0).unwrap();
        assert_eq!(seg.coords().len(), 4);
        assert!((seg.length() - 30.0).abs() < 1e-12);
    }

    #[test]
    fn test_point_at_on_a_collapsed_line() {
        let line = Polyline::from_xy(&[(4.0, 2.0), (4.0, 2.0)]);
        assert_eq!(line.length(), 0.0);
        assert_eq!(line.point_at(0.0), Some(Coord { x: 4.0, y: 2.0 }));
        assert!(line.point_at(1.0).is_none());
        assert!(Polyline::default().point_at(0.0).is_none());
        assert!(Polyline::default().cumulative_distances().is_empty());
    }

    #[test]
    fn test_segment_on_a_bent_line() {
        let line = Polyline::from_xy(&[(0.0, 0.0), (3.0, 4.0), (3.0, 10.0)]);
        let seg = line.segment(2.5, 8.0).unwrap();
        let coords = seg.coords();
        assert_eq!(coords.len(), 3);
        assert!((coords[0].x - 1.5).abs() < 1e-9 && (coords[0].y - 2.0).abs() < 1e-9);
        assert_eq!(coords[1], Coord { x: 3.0, y: 4.0 });
        assert!((coords[2].y - 7.0).abs() < 1e-9);
        assert!((seg.length() - 5.5).abs() < 1e-9);
    }

    #[test]
    fn test_reverse() {
        let mut line = straight();
        line.reverse();
        assert_eq!(line.coords()[0].x, 30.0);
        assert_eq!(line.cumulative_distances()[3], 30.0);
    }
}
