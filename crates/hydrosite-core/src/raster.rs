//! Raster sampling capability.

/// Point lookup into a raster map.
///
/// Implementations return `None` for nodata cells and for coordinates
/// outside the raster extent.
pub trait RasterSampler: Send + Sync {
    fn sample(&self, x: f64, y: f64) -> Option<f64>;
}

impl<T: RasterSampler + ?Sized> RasterSampler for &T {
    fn sample(&self, x: f64, y: f64) -> Option<f64> {
        (**self).sample(x, y)
    }
}

/// A raster with the same value everywhere. Handy for synthetic discharge.
#[derive(Debug, Clone, Copy)]
pub struct ConstantRaster(pub f64);

impl RasterSampler for ConstantRaster {
    fn sample(&self, _x: f64, _y: f64) -> Option<f64> {
        Some(self.0)
    }
}

/// A raster defined by a closure over map coordinates.
pub struct FnRaster<F>(pub F);

impl<F> RasterSampler for FnRaster<F>
where
    F: Fn(f64, f64) -> Option<f64> + Send + Sync,
{
    fn sample(&self, x: f64, y: f64) -> Option<f64> {
        (self.0)(x, y)
    }
}
