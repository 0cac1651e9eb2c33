//! Piecewise-linear interpolation over profile arrays.

/// Linear interpolator over sorted abscissae.
///
/// Strict by default: queries outside `[x[0], x[n-1]]` yield `None`.
/// [`Interp1d::with_fill`] turns out-of-range queries into a constant.
/// Repeated abscissae (duplicate vertices) resolve to the left value.
#[derive(Debug, Clone, Copy)]
pub struct Interp1d<'a> {
    x: &'a [f64],
    y: &'a [f64],
    fill: Option<f64>,
}

impl<'a> Interp1d<'a> {
    pub fn new(x: &'a [f64], y: &'a [f64]) -> Self {
        debug_assert_eq!(x.len(), y.len());
        Self { x, y, fill: None }
    }

    /// Return `fill` instead of `None` outside the observed range.
    pub fn with_fill(mut self, fill: f64) -> Self {
        self.fill = Some(fill);
        self
    }

    pub fn eval(&self, xq: f64) -> Option<f64> {
        let n = self.x.len().min(self.y.len());
        if n == 0 || xq.is_nan() || xq < self.x[0] || xq > self.x[n - 1] {
            return self.fill;
        }
        let i = self.x[..n].partition_point(|v| *v <= xq);
        if i == 0 {
            return Some(self.y[0]);
        }
        if i == n {
            return Some(self.y[n - 1]);
        }
        let (x0, x1) = (self.x[i - 1], self.x[i]);
        let (y0, y1) = (self.y[i - 1], self.y[i]);
        if x1 <= x0 {
            return Some(y0);
        }
        Some(y0 + (y1 - y0) * (xq - x0) / (x1 - x0))
    }

    /// Evaluate with the fill value, treating a strict miss as 0.
    #[inline]
    pub fn eval_or_zero(&self, xq: f64) -> f64 {
        self.eval(xq).unwrap_or(0.0)
    }
}
