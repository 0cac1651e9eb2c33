//! Vector features: stream input and the output writer capability.

use crate::geometry::Polyline;
use crate::{HydroResult, StreamId};
use geo_types::Coord;
use serde::Serialize;

/// One reach of river, as read from the stream network.
#[derive(Debug, Clone, PartialEq)]
pub struct StreamLine {
    pub id: StreamId,
    pub geometry: Polyline,
}

impl StreamLine {
    pub fn new(id: StreamId, geometry: Polyline) -> Self {
        Self { id, geometry }
    }
}

/// Geometry of an output feature.
#[derive(Debug, Clone, PartialEq)]
pub enum FeatureGeometry {
    Line(Polyline),
    Point(Coord<f64>),
}

impl FeatureGeometry {
    /// Well-known-text rendering, used by tabular writers.
    pub fn to_wkt(&self) -> String {
        match self {
            FeatureGeometry::Point(c) => format!("POINT ({} {})", c.x, c.y),
            FeatureGeometry::Line(line) => {
                let parts: Vec<String> = line
                    .coords()
                    .iter()
                    .map(|c| format!("{} {}", c.x, c.y))
                    .collect();
                format!("LINESTRING ({})", parts.join(", "))
            }
        }
    }
}

/// Kind of geometry a layer holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LayerKind {
    Lines,
    Points,
}

/// Column type in an attribute schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    Integer,
    Real,
    Text,
}

/// Declared attribute column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub name: &'static str,
    pub kind: FieldType,
}

impl Field {
    pub const fn new(name: &'static str, kind: FieldType) -> Self {
        Self { name, kind }
    }
}

/// A single attribute value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum AttributeValue {
    Integer(i64),
    Real(f64),
    Text(String),
}

impl std::fmt::Display for AttributeValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AttributeValue::Integer(v) => write!(f, "{v}"),
            AttributeValue::Real(v) => write!(f, "{v}"),
            AttributeValue::Text(v) => f.write_str(v),
        }
    }
}

/// Sink for output features.
///
/// `begin` is called exactly once with the layer schema before any
/// `write`. Attribute slices passed to `write` follow the schema order.
pub trait VectorWriter {
    fn begin(&mut self, kind: LayerKind, schema: &[Field]) -> HydroResult<()>;
    fn write(
        &mut self,
        geometry: &FeatureGeometry,
        attributes: &[AttributeValue],
    ) -> HydroResult<()>;
    fn finish(&mut self) -> HydroResult<()>;
}

/// Collects features in memory.
#[derive(Debug, Default)]
pub struct MemoryWriter {
    pub kind: Option<LayerKind>,
    pub schema: Vec<Field>,
    pub features: Vec<(FeatureGeometry, Vec<AttributeValue>)>,
    pub finished: bool,
}

impl MemoryWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Value of column `name` in row `row`.
    pub fn value(&self, row: usize, name: &str) -> Option<&AttributeValue> {
        let col = self.schema.iter().position(|f| f.name == name)?;
        self.features.get(row)?.1.get(col)
    }
}

impl VectorWriter for MemoryWriter {
    fn begin(&mut self, kind: LayerKind, schema: &[Field]) -> HydroResult<()> {
        self.kind = Some(kind);
        self.schema = schema.to_vec();
        Ok(())
    }

    fn write(
        &mut self,
        geometry: &FeatureGeometry,
        attributes: &[AttributeValue],
    ) -> HydroResult<()> {
        self.features.push((geometry.clone(), attributes.to_vec()));
        Ok(())
    }

    fn finish(&mut self) -> HydroResult<()> {
        self.finished = true;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wkt() {
        let line = FeatureGeometry::Line(Polyline::from_xy(&[(0.0, 0.0), (1.5, 2.0)]));
        assert_eq!(line.to_wkt(), "LINESTRING (0 0, 1.5 2)");
        let point = FeatureGeometry::Point(Coord { x: 3.0, y: 4.0 });
        assert_eq!(point.to_wkt(), "POINT (3 4)");
    }

    #[test]
    fn test_memory_writer_lookup() {
        let mut w = MemoryWriter::new();
        w.begin(
            LayerKind::Points,
            &[
                Field::new("id", FieldType::Integer),
                Field::new("name", FieldType::Text),
            ],
        )
        .unwrap();
        w.write(
            &FeatureGeometry::Point(Coord { x: 0.0, y: 0.0 }),
            &[AttributeValue::Integer(7), AttributeValue::Text("a".into())],
        )
        .unwrap();
        assert_eq!(w.value(0, "id"), Some(&AttributeValue::Integer(7)));
        assert_eq!(w.value(0, "missing"), None);
    }
}
