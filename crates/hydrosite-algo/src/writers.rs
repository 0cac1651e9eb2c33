//! Serialize plants into vector layers.
//!
//! Two shapes are supported: one line feature per plant
//! ([`write_plant_segments`]) or one point feature per intake and
//! restitution ([`write_plant_points`]). Both keep only plants whose
//! potential power is strictly above `min_power`.

use crate::partition::{Plant, PlantPoint, PointKind};
use hydrosite_core::{
    AttributeValue, FeatureGeometry, Field, FieldType, HydroResult, LayerKind, VectorWriter,
};
use serde::Serialize;

/// Attribute schema of the plant line layer.
pub const SEGMENT_SCHEMA: &[Field] = &[
    Field::new("stream_id", FieldType::Integer),
    Field::new("plant_id", FieldType::Integer),
    Field::new("rank", FieldType::Text),
    Field::new("intake_pos", FieldType::Real),
    Field::new("restitution_pos", FieldType::Real),
    Field::new("length", FieldType::Real),
    Field::new("discharge", FieldType::Real),
    Field::new("gross_head", FieldType::Real),
    Field::new("power_kw", FieldType::Real),
];

/// Attribute schema of the plant point layer.
pub const POINT_SCHEMA: &[Field] = &[
    Field::new("stream_id", FieldType::Integer),
    Field::new("plant_id", FieldType::Integer),
    Field::new("point_id", FieldType::Integer),
    Field::new("kind", FieldType::Text),
    Field::new("position", FieldType::Real),
    Field::new("discharge", FieldType::Real),
    Field::new("elevation", FieldType::Real),
    Field::new("power_kw", FieldType::Real),
];

/// One row of the plant line layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlantSegmentRecord {
    pub stream_id: u64,
    pub plant_id: usize,
    pub rank: String,
    pub intake_pos: f64,
    pub restitution_pos: f64,
    pub length: f64,
    pub discharge: f64,
    pub gross_head: f64,
    pub power_kw: f64,
}

impl PlantSegmentRecord {
    pub fn from_plant(plant: &Plant, efficiency: f64) -> Self {
        Self {
            stream_id: plant.stream.value(),
            plant_id: plant.id.value(),
            rank: plant.rank(),
            intake_pos: plant.intake_position().value(),
            restitution_pos: plant.restitution.position.value(),
            length: plant.length().value(),
            discharge: plant.discharge().value(),
            gross_head: plant.gross_head().value(),
            power_kw: plant.potential_power(efficiency).value(),
        }
    }

    pub fn attributes(&self) -> Vec<AttributeValue> {
        vec![
            AttributeValue::Integer(self.stream_id as i64),
            AttributeValue::Integer(self.plant_id as i64),
            AttributeValue::Text(self.rank.clone()),
            AttributeValue::Real(self.intake_pos),
            AttributeValue::Real(self.restitution_pos),
            AttributeValue::Real(self.length),
            AttributeValue::Real(self.discharge),
            AttributeValue::Real(self.gross_head),
            AttributeValue::Real(self.power_kw),
        ]
    }
}

/// One row of the plant point layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlantPointRecord {
    pub stream_id: u64,
    pub plant_id: usize,
    pub point_id: usize,
    pub kind: PointKind,
    pub position: f64,
    pub discharge: f64,
    pub elevation: f64,
    pub power_kw: f64,
}

impl PlantPointRecord {
    fn from_point(point: &PlantPoint, power_kw: f64) -> Self {
        Self {
            stream_id: point.stream.value(),
            plant_id: point.plant.value(),
            point_id: point.point.value(),
            kind: point.kind,
            position: point.position.value(),
            discharge: point.discharge.value(),
            elevation: point.elevation.value(),
            power_kw,
        }
    }

    pub fn attributes(&self) -> Vec<AttributeValue> {
        vec![
            AttributeValue::Integer(self.stream_id as i64),
            AttributeValue::Integer(self.plant_id as i64),
            AttributeValue::Integer(self.point_id as i64),
            AttributeValue::Text(self.kind.as_str().to_string()),
            AttributeValue::Real(self.position),
            AttributeValue::Real(self.discharge),
            AttributeValue::Real(self.elevation),
            AttributeValue::Real(self.power_kw),
        ]
    }
}

/// Write one line per plant. Returns the number of features written.
pub fn write_plant_segments<'a, W, I>(
    writer: &mut W,
    plants: I,
    efficiency: f64,
    min_power: f64,
) -> HydroResult<usize>
where
    W: VectorWriter + ?Sized,
    I: IntoIterator<Item = &'a Plant>,
{
    writer.begin(LayerKind::Lines, SEGMENT_SCHEMA)?;
    let mut written = 0;
    for plant in plants {
        let record = PlantSegmentRecord::from_plant(plant, efficiency);
        if record.power_kw <= min_power {
            continue;
        }
        writer.write(&FeatureGeometry::Line(plant.segment.clone()), &record.attributes())?;
        written += 1;
    }
    writer.finish()?;
    Ok(written)
}

/// Write one point per intake and restitution. Returns the number of
/// features written.
pub fn write_plant_points<'a, W, I>(
    writer: &mut W,
    plants: I,
    efficiency: f64,
    min_power: f64,
) -> HydroResult<usize>
where
    W: VectorWriter + ?Sized,
    I: IntoIterator<Item = &'a Plant>,
{
    writer.begin(LayerKind::Points, POINT_SCHEMA)?;
    let mut written = 0;
    for plant in plants {
        let power = plant.potential_power(efficiency).value();
        if power <= min_power {
            continue;
        }
        for point in plant.intakes.iter().chain(std::iter::once(&plant.restitution)) {
            let record = PlantPointRecord::from_point(point, power);
            writer.write(&FeatureGeometry::Point(point.coord), &record.attributes())?;
            written += 1;
        }
    }
    writer.finish()?;
    Ok(written)
}
