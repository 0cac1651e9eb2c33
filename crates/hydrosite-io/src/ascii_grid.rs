//! ESRI ASCII grid reader.
//!
//! ```text
//! ncols         4
//! nrows         3
//! xllcorner     0.0
//! yllcorner     0.0
//! cellsize      10.0
//! NODATA_value  -9999
//! 10 11 12 13
//! ...
//! ```
//!
//! Header keys are case-insensitive. `xllcenter`/`yllcenter` are accepted in
//! place of the corner keys. Rows are stored top to bottom, as in the file.

use anyhow::{anyhow, bail, Context, Result};
use hydrosite_core::RasterSampler;
use std::path::Path;

/// A single-band raster read from an ASCII grid.
#[derive(Debug, Clone, PartialEq)]
pub struct AsciiGrid {
    ncols: usize,
    nrows: usize,
    /// West edge of the grid
    x_min: f64,
    /// North edge of the grid
    y_max: f64,
    cellsize: f64,
    nodata: Option<f64>,
    /// Row-major, first row is the northernmost
    data: Vec<f64>,
}

impl AsciiGrid {
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading ASCII grid {}", path.display()))?;
        Self::parse(&text).with_context(|| format!("parsing ASCII grid {}", path.display()))
    }

    pub fn parse(text: &str) -> Result<Self> {
        let mut tokens = text.split_whitespace().peekable();

        let mut ncols = None;
        let mut nrows = None;
        let mut x_corner = None;
        let mut y_corner = None;
        let mut x_center = None;
        let mut y_center = None;
        let mut cellsize = None;
        let mut nodata = None;

        while let Some(&token) = tokens.peek() {
            if !token.starts_with(|c: char| c.is_ascii_alphabetic()) {
                break;
            }
            let key = token.to_ascii_lowercase();
            tokens.next();
            let value = tokens
                .next()
                .ok_or_else(|| anyhow!("header key {key} has no value"))?;
            let number: f64 = value
                .parse()
                .with_context(|| format!("header {key}: invalid number {value:?}"))?;
            match key.as_str() {
                "ncols" => ncols = Some(count(&key, number)?),
                "nrows" => nrows = Some(count(&key, number)?),
                "xllcorner" => x_corner = Some(number),
                "yllcorner" => y_corner = Some(number),
                "xllcenter" => x_center = Some(number),
                "yllcenter" => y_center = Some(number),
                "cellsize" => cellsize = Some(number),
                "nodata_value" => nodata = Some(number),
                other => bail!("unknown header key {other}"),
            }
        }

        let ncols = ncols.ok_or_else(|| anyhow!("missing ncols"))?;
        let nrows = nrows.ok_or_else(|| anyhow!("missing nrows"))?;
        let cellsize = cellsize.ok_or_else(|| anyhow!("missing cellsize"))?;
        if !(cellsize > 0.0) {
            bail!("cellsize must be positive, got {cellsize}");
        }
        let half = cellsize / 2.0;
        let x_min = x_corner
            .or(x_center.map(|c| c - half))
            .ok_or_else(|| anyhow!("missing xllcorner/xllcenter"))?;
        let y_min = y_corner
            .or(y_center.map(|c| c - half))
            .ok_or_else(|| anyhow!("missing yllcorner/yllcenter"))?;

        let cells = ncols
            .checked_mul(nrows)
            .ok_or_else(|| anyhow!("grid of {nrows} rows x {ncols} cols is too large"))?;
        let data = tokens
            .map(|t| {
                t.parse::<f64>()
                    .with_context(|| format!("invalid cell value {t:?}"))
            })
            .collect::<Result<Vec<f64>>>()?;
        if data.len() != cells {
            bail!(
                "expected {cells} cells ({nrows} rows x {ncols} cols), found {}",
                data.len()
            );
        }

        Ok(Self {
            ncols,
            nrows,
            x_min,
            y_max: y_min + nrows as f64 * cellsize,
            cellsize,
            nodata,
            data,
        })
    }

    pub fn ncols(&self) -> usize {
        self.ncols
    }

    pub fn nrows(&self) -> usize {
        self.nrows
    }

    pub fn cellsize(&self) -> f64 {
        self.cellsize
    }

    /// Cell value at `(row, col)`, `None` for nodata.
    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        if row >= self.nrows || col >= self.ncols {
            return None;
        }
        let value = self.data[row * self.ncols + col];
        match self.nodata {
            Some(nodata) if value == nodata => None,
            _ if value.is_nan() => None,
            _ => Some(value),
        }
    }

    /// Cell containing map coordinates `(x, y)`.
    ///
    /// Points on the east or south edge belong to the last column or row.
    pub fn cell_of(&self, x: f64, y: f64) -> Option<(usize, usize)> {
        let col = ((x - self.x_min) / self.cellsize).floor();
        let row = ((self.y_max - y) / self.cellsize).floor();
        if !(col >= 0.0 && row >= 0.0) {
            return None;
        }
        let (mut col, mut row) = (col as usize, row as usize);
        if col == self.ncols && x == self.x_min + self.ncols as f64 * self.cellsize {
            col -= 1;
        }
        if row == self.nrows && y == self.y_max - self.nrows as f64 * self.cellsize {
            row -= 1;
        }
        (col < self.ncols && row < self.nrows).then_some((row, col))
    }
}

impl RasterSampler for AsciiGrid {
    fn sample(&self, x: f64, y: f64) -> Option<f64> {
        let (row, col) = self.cell_of(x, y)?;
        self.get(row, col)
    }
}

fn count(key: &str, value: f64) -> Result<usize> {
    if value >= 1.0 && value.fract() == 0.0 && value <= usize::MAX as f64 {
        Ok(value as usize)
    } else {
        bail!("{key} must be a positive integer, got {value}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const GRID: &str = concat!(
        "ncols 3\nnrows 2\nxllcorner 100.0\nyllcorner 200.0\ncellsize 10\n",
        "NODATA_value -9999\n1 2 3\n4 -9999 6\n",
    );

    #[test]
    fn test_parse_header_and_cells() {
        let grid = AsciiGrid::parse(GRID).unwrap();
        assert_eq!(grid.ncols(), 3);
        assert_eq!(grid.nrows(), 2);
        assert_eq!(grid.get(0, 2), Some(3.0));
        assert_eq!(grid.get(1, 1), None);
        assert_eq!(grid.get(2, 0), None);
    }

    #[test]
    fn test_sampling_orientation() {
        let grid = AsciiGrid::parse(GRID).unwrap();
        // north row
        assert_eq!(grid.sample(105.0, 215.0), Some(1.0));
        // south row
        assert_eq!(grid.sample(125.0, 205.0), Some(6.0));
        assert_eq!(grid.sample(115.0, 205.0), None);
        assert_eq!(grid.sample(99.0, 205.0), None);
        assert_eq!(grid.sample(105.0, 221.0), None);
    }

    #[test]
    fn test_far_edges_included() {
        let grid = AsciiGrid::parse(GRID).unwrap();
        assert_eq!(grid.sample(130.0, 200.0), Some(6.0));
        assert_eq!(grid.sample(100.0, 220.0), Some(1.0));
    }

    #[test]
    fn test_center_registration() {
        let text = "NCOLS 2\nNROWS 1\nXLLCENTER 5\nYLLCENTER 5\nCELLSIZE 10\n7 8\n";
        let grid = AsciiGrid::parse(text).unwrap();
        assert_eq!(grid.sample(1.0, 1.0), Some(7.0));
        assert_eq!(grid.sample(19.0, 9.0), Some(8.0));
    }

    #[test]
    fn test_rejects_bad_grids() {
        let origin = "xllcorner 0\nyllcorner 0\n";
        let bad = [
            format!("ncols 2\nnrows 2\n{origin}cellsize 1\n1 2 3\n"),
            "ncols 2\nnrows 1\nxllcorner 0\ncellsize 1\n1 2\n".to_string(),
            format!("ncols 2\nnrows 1\n{origin}cellsize 0\n1 2\n"),
            format!("ncols 2\nnrows 1\n{origin}cellsize 1\nfoo 3\n1 2\n"),
        ];
        for text in &bad {
            assert!(AsciiGrid::parse(text).is_err(), "{text:?}");
        }
    }

    #[test]
    fn test_oversized_header_is_an_error() {
        let header = "xllcorner 0\nyllcorner 0\ncellsize 1\n1\n";
        let err = AsciiGrid::parse(&format!("ncols 1e19\nnrows 1e19\n{header}")).unwrap_err();
        assert!(err.to_string().contains("too large"));
        assert!(AsciiGrid::parse(&format!("ncols 1e300\nnrows 1\n{header}")).is_err());
    }
}
