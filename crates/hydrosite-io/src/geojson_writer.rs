//! GeoJSON output layer.

use geojson::{Feature, FeatureCollection, Geometry, JsonObject, JsonValue, Value};
use hydrosite_core::{
    AttributeValue, FeatureGeometry, Field, HydroError, HydroResult, LayerKind, VectorWriter,
};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Buffers features and writes one FeatureCollection on `finish`.
pub struct GeoJsonWriter<W: Write> {
    out: Option<W>,
    kind: Option<LayerKind>,
    schema: Vec<Field>,
    features: Vec<Feature>,
}

impl GeoJsonWriter<BufWriter<File>> {
    pub fn create(path: impl AsRef<Path>) -> HydroResult<Self> {
        let file = File::create(path.as_ref())?;
        Ok(Self::new(BufWriter::new(file)))
    }
}

impl<W: Write> GeoJsonWriter<W> {
    pub fn new(out: W) -> Self {
        Self {
            out: Some(out),
            kind: None,
            schema: Vec::new(),
            features: Vec::new(),
        }
    }

    /// Underlying sink, once the collection has been written.
    pub fn into_inner(self) -> Option<W> {
        self.out
    }
}

impl<W: Write> VectorWriter for GeoJsonWriter<W> {
    fn begin(&mut self, kind: LayerKind, schema: &[Field]) -> HydroResult<()> {
        if self.kind.is_some() {
            return Err(HydroError::Validation("layer already started".into()));
        }
        self.kind = Some(kind);
        self.schema = schema.to_vec();
        Ok(())
    }

    fn write(
        &mut self,
        geometry: &FeatureGeometry,
        attributes: &[AttributeValue],
    ) -> HydroResult<()> {
        let kind = self
            .kind
            .ok_or_else(|| HydroError::Validation("write before begin".into()))?;
        if attributes.len() != self.schema.len() {
            return Err(HydroError::Validation(format!(
                "expected {} attributes, got {}",
                self.schema.len(),
                attributes.len()
            )));
        }
        let value = match (kind, geometry) {
            (LayerKind::Lines, FeatureGeometry::Line(line)) => {
                Value::LineString(line.coords().iter().map(|c| vec![c.x, c.y]).collect())
            }
            (LayerKind::Points, FeatureGeometry::Point(c)) => Value::Point(vec![c.x, c.y]),
            _ => {
                return Err(HydroError::Geometry(format!(
                    "geometry does not match {kind:?} layer"
                )))
            }
        };

        let properties: JsonObject = self
            .schema
            .iter()
            .zip(attributes)
            .map(|(field, value)| (field.name.to_string(), json_value(value)))
            .collect();

        self.features.push(Feature {
            bbox: None,
            geometry: Some(Geometry::new(value)),
            id: None,
            properties: Some(properties),
            foreign_members: None,
        });
        Ok(())
    }

    fn finish(&mut self) -> HydroResult<()> {
        let Some(out) = self.out.as_mut() else {
            return Err(HydroError::Validation("layer already finished".into()));
        };
        let collection = FeatureCollection {
            bbox: None,
            features: std::mem::take(&mut self.features),
            foreign_members: None,
        };
        serde_json::to_writer_pretty(&mut *out, &collection)?;
        out.flush()?;
        Ok(())
    }
}

fn json_value(value: &AttributeValue) -> JsonValue {
    match value {
        AttributeValue::Integer(v) => JsonValue::from(*v),
        AttributeValue::Real(v) => serde_json::Number::from_f64(*v)
            .map(JsonValue::Number)
            .unwrap_or(JsonValue::Null),
        AttributeValue::Text(v) => JsonValue::String(v.clone()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hydrosite_core::{Coord, FieldType, Polyline};

    const SCHEMA: &[Field] = &[
        Field::new("plant_id", FieldType::Integer),
        Field::new("power_kw", FieldType::Real),
        Field::new("rank", FieldType::Text),
    ];

    #[test]
    fn test_writes_feature_collection() {
        let mut writer = GeoJsonWriter::new(Vec::new());
        writer.begin(LayerKind::Lines, SCHEMA).unwrap();
        writer
            .write(
                &FeatureGeometry::Line(Polyline::from_xy(&[(0.0, 0.0), (5.0, 5.0)])),
                &[
                    AttributeValue::Integer(1),
                    AttributeValue::Real(12.5),
                    AttributeValue::Text("3.1".into()),
                ],
            )
            .unwrap();
        writer.finish().unwrap();

        let bytes = writer.into_inner().unwrap();
        let json: JsonValue = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(json["type"], "FeatureCollection");
        let feature = &json["features"][0];
        assert_eq!(feature["geometry"]["type"], "LineString");
        assert_eq!(feature["properties"]["plant_id"], 1);
        assert_eq!(feature["properties"]["power_kw"], 12.5);
        assert_eq!(feature["properties"]["rank"], "3.1");
    }

    #[test]
    fn test_rejects_mismatched_geometry() {
        let mut writer = GeoJsonWriter::new(Vec::new());
        writer.begin(LayerKind::Lines, SCHEMA).unwrap();
        let err = writer.write(
            &FeatureGeometry::Point(Coord { x: 0.0, y: 0.0 }),
            &[
                AttributeValue::Integer(1),
                AttributeValue::Real(1.0),
                AttributeValue::Text("1".into()),
            ],
        );
        assert!(matches!(err, Err(HydroError::Geometry(_))));
        assert!(writer
            .write(&FeatureGeometry::Point(Coord { x: 0.0, y: 0.0 }), &[])
            .is_err());
    }

    #[test]
    fn test_non_finite_reals_become_null() {
        assert_eq!(json_value(&AttributeValue::Real(f64::NAN)), JsonValue::Null);
    }
}
