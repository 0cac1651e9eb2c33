//! Accepted plants and their intake/restitution points.

use super::arena::{PlantIdx, PlantPath};
use hydrosite_core::{
    Coord, CubicMetersPerSecond, Kilowatts, Meters, PlantId, PointId, Polyline, StreamId,
};
use serde::Serialize;

/// Role of a plant point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PointKind {
    Intake,
    Restitution,
}

impl PointKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            PointKind::Intake => "intake",
            PointKind::Restitution => "restitution",
        }
    }
}

/// A point of a plant on the stream (intake or restitution).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlantPoint {
    pub kind: PointKind,
    pub stream: StreamId,
    pub plant: PlantId,
    pub point: PointId,
    /// Along-line position
    pub position: Meters,
    pub discharge: CubicMetersPerSecond,
    pub elevation: Meters,
    #[serde(skip)]
    pub coord: Coord<f64>,
}

/// Water intake, upstream end of the penstock.
pub type Intake = PlantPoint;

/// Restitution, where the water returns to the stream.
pub type Restitution = PlantPoint;

/// One accepted plant.
#[derive(Debug, Clone, PartialEq)]
pub struct Plant {
    pub id: PlantId,
    pub stream: StreamId,
    /// Part number when several lines share the stream id
    pub part: Option<u32>,
    /// Position in the search tree
    pub path: PlantPath,
    pub parent: Option<PlantIdx>,
    pub restitution: Restitution,
    pub intakes: Vec<Intake>,
    /// Stream segment between intake and restitution
    pub segment: Polyline,
}

impl Plant {
    /// Dot-delimited rank such as `"3.1.2"`, or `"3/2.1.2"` on part 2.
    pub fn rank(&self) -> String {
        match self.part {
            Some(part) => self.path.part_rank(self.stream, part),
            None => self.path.rank(self.stream),
        }
    }

    /// Along-line position of the upstream-most intake.
    pub fn intake_position(&self) -> Meters {
        self.intakes
            .iter()
            .map(|i| i.position)
            .fold(self.restitution.position, Meters::min)
    }

    /// Along-line plant length.
    pub fn length(&self) -> Meters {
        self.restitution.position - self.intake_position()
    }

    /// Total discharge diverted at the intakes.
    pub fn discharge(&self) -> CubicMetersPerSecond {
        self.intakes.iter().map(|i| i.discharge).sum()
    }

    /// Gross head of the main (first) intake.
    pub fn gross_head(&self) -> Meters {
        self.intakes
            .first()
            .map(|i| i.elevation - self.restitution.elevation)
            .unwrap_or(Meters::ZERO)
    }

    /// Potential power summed over intakes: `ρ g Q_i (h_i - h_r) η / 1000`.
    pub fn potential_power(&self, efficiency: f64) -> Kilowatts {
        self.intakes
            .iter()
            .map(|i| {
                i.discharge
                    .hydraulic_power(i.elevation - self.restitution.elevation, efficiency)
            })
            .sum()
    }
}
