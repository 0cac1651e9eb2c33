//! CSV output layer with a WKT geometry column.

use hydrosite_core::{
    AttributeValue, FeatureGeometry, Field, HydroError, HydroResult, LayerKind, VectorWriter,
};
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Name of the geometry column, always first.
pub const WKT_COLUMN: &str = "wkt";

pub(crate) fn csv_error(err: csv::Error) -> HydroError {
    HydroError::Io(err.into())
}

/// Streams one CSV row per feature.
pub struct CsvWriter<W: Write> {
    inner: csv::Writer<W>,
    columns: Option<usize>,
}

impl CsvWriter<File> {
    pub fn create(path: impl AsRef<Path>) -> HydroResult<Self> {
        let inner = csv::Writer::from_path(path.as_ref()).map_err(csv_error)?;
        Ok(Self {
            inner,
            columns: None,
        })
    }
}

impl<W: Write> CsvWriter<W> {
    pub fn new(out: W) -> Self {
        Self {
            inner: csv::Writer::from_writer(out),
            columns: None,
        }
    }

    pub fn into_inner(self) -> HydroResult<W> {
        self.inner
            .into_inner()
            .map_err(|err| HydroError::Io(err.into_error()))
    }
}

impl<W: Write> VectorWriter for CsvWriter<W> {
    fn begin(&mut self, _kind: LayerKind, schema: &[Field]) -> HydroResult<()> {
        if self.columns.is_some() {
            return Err(HydroError::Validation("layer already started".into()));
        }
        let header = std::iter::once(WKT_COLUMN).chain(schema.iter().map(|f| f.name));
        self.inner.write_record(header).map_err(csv_error)?;
        self.columns = Some(schema.len());
        Ok(())
    }

    fn write(
        &mut self,
        geometry: &FeatureGeometry,
        attributes: &[AttributeValue],
    ) -> HydroResult<()> {
        let columns = self
            .columns
            .ok_or_else(|| HydroError::Validation("write before begin".into()))?;
        if attributes.len() != columns {
            return Err(HydroError::Validation(format!(
                "expected {columns} attributes, got {}",
                attributes.len()
            )));
        }
        let record =
            std::iter::once(geometry.to_wkt()).chain(attributes.iter().map(|a| a.to_string()));
        self.inner.write_record(record).map_err(csv_error)
    }

    fn finish(&mut self) -> HydroResult<()> {
        self.inner.flush()?;
        Ok(())
    }
}
