//! CSV dump of sampled stream profiles.

use crate::csv_writer::csv_error;
use hydrosite_core::HydroResult;
use serde::Serialize;
use std::io::Write;
use std::path::Path;

/// One sampled vertex of a stream profile.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProfileRecord {
    pub stream_id: u64,
    pub vertex: usize,
    pub x: f64,
    pub y: f64,
    /// Distance along the line
    pub prog: f64,
    /// Elevation
    pub h: f64,
    /// Discharge
    pub q: f64,
}

/// Write `records` with a header row. Returns the number of rows.
pub fn write_profiles<W, I>(out: W, records: I) -> HydroResult<usize>
where
    W: Write,
    I: IntoIterator<Item = ProfileRecord>,
{
    let mut writer = csv::Writer::from_writer(out);
    let mut rows = 0;
    for record in records {
        writer.serialize(&record).map_err(csv_error)?;
        rows += 1;
    }
    if rows == 0 {
        writer
            .write_record(["stream_id", "vertex", "x", "y", "prog", "h", "q"])
            .map_err(csv_error)?;
    }
    writer.flush()?;
    Ok(rows)
}

pub fn write_profiles_csv<I>(path: impl AsRef<Path>, records: I) -> HydroResult<usize>
where
    I: IntoIterator<Item = ProfileRecord>,
{
    let file = std::fs::File::create(path.as_ref())?;
    write_profiles(std::io::BufWriter::new(file), records)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rows_with_header() {
        let records = (0..2).map(|i| ProfileRecord {
            stream_id: 4,
            vertex: i,
            x: i as f64 * 10.0,
            y: 0.0,
            prog: i as f64 * 10.0,
            h: 100.0 - i as f64,
            q: 1.5,
        });
        let mut out = Vec::new();
        let rows = write_profiles(&mut out, records).unwrap();
        assert_eq!(rows, 2);
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "stream_id,vertex,x,y,prog,h,q");
        assert_eq!(lines[1], "4,0,0.0,0.0,0.0,100.0,1.5");
        assert_eq!(lines.len(), 3);
    }

    #[test]
    fn test_empty_still_has_header() {
        let mut out = Vec::new();
        assert_eq!(write_profiles(&mut out, std::iter::empty()).unwrap(), 0);
        assert_eq!(String::from_utf8(out).unwrap(), "stream_id,vertex,x,y,prog,h,q\n");
    }
}
