//! Search windows, length ranges and placements.

use serde::{Deserialize, Serialize};

/// Along-line interval still available for placing plants.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Window {
    pub start: f64,
    pub end: f64,
}

impl Window {
    pub fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }

    /// Available length (`end - start`), possibly negative.
    #[inline]
    pub fn len(&self) -> f64 {
        self.end - self.start
    }

    /// Shrink both edges by `margin`.
    pub fn shrink(&self, margin: f64) -> Self {
        Self::new(self.start + margin, self.end - margin)
    }

    pub fn contains(&self, placement: &Placement) -> bool {
        placement.intake >= self.start && placement.restitution() <= self.end
    }
}

/// Acceptable plant lengths.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LengthRange {
    pub min: f64,
    pub max: f64,
}

impl LengthRange {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }
}

/// Intake position and segment length of one plant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Placement {
    pub intake: f64,
    pub length: f64,
}

impl Placement {
    pub fn new(intake: f64, length: f64) -> Self {
        Self { intake, length }
    }

    /// Along-line position of the restitution.
    #[inline]
    pub fn restitution(&self) -> f64 {
        self.intake + self.length
    }

    /// Whole-window fallback `(start, end - start)`.
    pub fn whole(window: Window) -> Self {
        Self::new(window.start, window.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_shrink_and_contains() {
        let w = Window::new(0.0, 100.0).shrink(5.0);
        assert_eq!(w, Window::new(5.0, 95.0));
        assert_eq!(w.len(), 90.0);
        assert!(w.contains(&Placement::new(5.0, 90.0)));
        assert!(!w.contains(&Placement::new(4.0, 10.0)));
        assert!(!w.contains(&Placement::new(50.0, 46.0)));
    }

    #[test]
    fn test_whole_window_placement() {
        let p = Placement::whole(Window::new(10.0, 35.0));
        assert_eq!(p.intake, 10.0);
        assert_eq!(p.restitution(), 35.0);
    }
}
