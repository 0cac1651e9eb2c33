//! Output format detection from file extensions.

use crate::geojson_writer::GeoJsonWriter;
use hydrosite_core::{HydroError, HydroResult, VectorWriter};
use std::path::Path;

/// Supported vector output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    GeoJson,
    Csv,
}

impl OutputFormat {
    pub const ALL: &'static [OutputFormat] = &[OutputFormat::GeoJson, OutputFormat::Csv];

    pub fn extensions(&self) -> &'static [&'static str] {
        match self {
            OutputFormat::GeoJson => &["geojson", "json"],
            OutputFormat::Csv => &["csv"],
        }
    }

    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?;
        Self::ALL
            .iter()
            .copied()
            .find(|format| format.extensions().iter().any(|e| e.eq_ignore_ascii_case(ext)))
    }
}

/// Open a writer for `path`, picking the format from its extension.
pub fn create_writer(path: &Path) -> HydroResult<Box<dyn VectorWriter>> {
    let format = OutputFormat::from_path(path).ok_or_else(|| {
        HydroError::Config(format!(
            "cannot infer output format of {} (use .geojson, .json or .csv)",
            path.display()
        ))
    })?;
    match format {
        OutputFormat::GeoJson => Ok(Box::new(GeoJsonWriter::create(path)?)),
        #[cfg(feature = "csv")]
        OutputFormat::Csv => Ok(Box::new(crate::csv_writer::CsvWriter::create(path)?)),
        #[cfg(not(feature = "csv"))]
        OutputFormat::Csv => Err(HydroError::Config(
            "CSV output requires the `csv` feature".into(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detection() {
        assert_eq!(
            OutputFormat::from_path(Path::new("a/plants.geojson")),
            Some(OutputFormat::GeoJson)
        );
        assert_eq!(OutputFormat::from_path(Path::new("plants.JSON")), Some(OutputFormat::GeoJson));
        assert_eq!(OutputFormat::from_path(Path::new("points.csv")), Some(OutputFormat::Csv));
        assert_eq!(OutputFormat::from_path(Path::new("points.shp")), None);
        assert_eq!(OutputFormat::from_path(Path::new("points")), None);
    }

    #[test]
    fn test_unknown_extension_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = create_writer(&dir.path().join("out.gpkg")).err().unwrap();
        assert!(matches!(err, HydroError::Config(_)));
    }
}
