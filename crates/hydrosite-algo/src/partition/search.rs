//! Recursive search for non-overlapping plants on one stream.

use super::arena::{Branch, PlantArena, PlantIdx, PlantPath};
use super::plant::{Plant, PlantPoint, PointKind};
use crate::length_solver::{min_len_plant, min_len_plant_z, LengthSolverConfig};
use crate::optimal::find_optimal;
use crate::profile::Profile;
use crate::window::{LengthRange, Placement, Window};
use hydrosite_core::{Coord, CubicMetersPerSecond, Meters, PointId, Polyline, StreamId};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Default cap on `check_segments` invocations per stream.
pub const DEFAULT_MAX_INVOCATIONS: usize = 100;

/// How a plant is located inside a window.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PlacementStrategy {
    /// Grid search on the energy objective over the length range
    Optimal,
    /// Longest segment whose power reaches `p_max` (kW)
    PowerCap { p_max: f64 },
    /// Longest segment whose straight pipe reaches `l_max`
    PipeLength { l_max: f64 },
}

/// Parameters shared by every window of a search.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchParams {
    pub range: LengthRange,
    /// Minimum distance kept between neighbouring plants
    pub distance: f64,
    pub strategy: PlacementStrategy,
    pub solver: LengthSolverConfig,
    pub max_invocations: usize,
}

impl SearchParams {
    pub fn new(range: LengthRange, distance: f64, strategy: PlacementStrategy) -> Self {
        Self {
            range,
            distance,
            strategy,
            solver: LengthSolverConfig::default(),
            max_invocations: DEFAULT_MAX_INVOCATIONS,
        }
    }
}

/// Invocation counter shared by the whole recursion tree of one stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchBudget {
    used: usize,
    cap: usize,
}

impl SearchBudget {
    pub fn new(cap: usize) -> Self {
        Self { used: 0, cap }
    }

    /// Spend one invocation; `false` once the cap is reached.
    pub fn try_consume(&mut self) -> bool {
        if self.used >= self.cap {
            return false;
        }
        self.used += 1;
        true
    }

    pub fn used(&self) -> usize {
        self.used
    }

    pub fn is_exhausted(&self) -> bool {
        self.used >= self.cap
    }
}

/// A plant located in a window, before it gets an id.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    pub placement: Placement,
    pub segment: Polyline,
}

/// Find every plant on a stream, starting from the whole line.
pub fn recursive_plant(profile: &Profile, stream: StreamId, params: &SearchParams) -> PlantArena {
    let mut arena = PlantArena::new(stream);
    let mut budget = SearchBudget::new(params.max_invocations);
    check_segments(
        profile,
        Window::new(0.0, profile.end()),
        PlantPath::root(),
        None,
        params,
        &mut budget,
        &mut arena,
    );
    debug!(
        stream = %stream,
        plants = arena.len(),
        invocations = budget.used(),
        "stream search finished"
    );
    arena
}

/// Place a plant in `window`, then search both residual windows.
pub fn check_segments(
    profile: &Profile,
    window: Window,
    path: PlantPath,
    parent: Option<PlantIdx>,
    params: &SearchParams,
    budget: &mut SearchBudget,
    arena: &mut PlantArena,
) {
    if !budget.try_consume() {
        debug!(rank = %path.rank(arena.stream()), "invocation budget exhausted");
        return;
    }
    let Some(candidate) = check_plant(profile, window, params) else {
        return;
    };

    let placement = candidate.placement;
    let plant = build_plant(profile, arena, path.clone(), parent, candidate);
    let idx = arena.push(plant);

    check_segments(
        profile,
        Window::new(window.start, placement.intake),
        path.child(Branch::Upstream),
        Some(idx),
        params,
        budget,
        arena,
    );
    check_segments(
        profile,
        Window::new(placement.restitution(), window.end),
        path.child(Branch::Downstream),
        Some(idx),
        params,
        budget,
        arena,
    );
}

/// Locate at most one plant in `window`.
///
/// The window must exceed the target length (the range maximum) plus twice
/// the plant distance; otherwise, if it still holds the minimum length plus
/// margins, the target shrinks to fit it. The plant is placed inside the
/// window shrunk by `distance` on both sides.
pub fn check_plant(profile: &Profile, window: Window, params: &SearchParams) -> Option<Candidate> {
    let available = window.len();
    let margins = 2.0 * params.distance;
    let search = window.shrink(params.distance);

    let range = if available > params.range.max + margins {
        params.range
    } else if available >= params.range.min + margins {
        LengthRange::new(params.range.min, search.len())
    } else {
        return None;
    };

    let placement = locate(profile, range, search, params);
    let Some(segment) = profile.line.segment(placement.intake, placement.restitution()) else {
        debug!(?placement, "empty segment, no plant in window");
        return None;
    };
    Some(Candidate { placement, segment })
}

fn locate(
    profile: &Profile,
    range: LengthRange,
    search: Window,
    params: &SearchParams,
) -> Placement {
    match params.strategy {
        PlacementStrategy::Optimal => find_optimal(profile, range, search).unwrap_or_else(|| {
            debug!(?search, "no feasible grid point, using whole window");
            Placement::whole(search)
        }),
        PlacementStrategy::PowerCap { p_max } => {
            min_len_plant(profile, search, p_max, &params.solver)
        }
        PlacementStrategy::PipeLength { l_max } => {
            min_len_plant_z(profile, search, l_max, &params.solver)
        }
    }
}

fn build_plant(
    profile: &Profile,
    arena: &PlantArena,
    path: PlantPath,
    parent: Option<PlantIdx>,
    candidate: Candidate,
) -> Plant {
    let id = arena.next_id();
    let stream = arena.stream();
    let h = profile.elevation_filled();
    let q = profile.discharge_filled();
    let point = |kind: PointKind, point_id: usize, position: f64, coord: Coord<f64>| PlantPoint {
        kind,
        stream,
        plant: id,
        point: PointId::new(point_id),
        position: Meters(position),
        discharge: CubicMetersPerSecond(q.eval_or_zero(position)),
        elevation: Meters(h.eval_or_zero(position)),
        coord,
    };

    let coords = candidate.segment.coords();
    let (first, last) = (coords[0], coords[coords.len() - 1]);
    let placement = candidate.placement;

    Plant {
        id,
        stream,
        part: None,
        path,
        parent,
        restitution: point(PointKind::Restitution, 0, placement.restitution(), last),
        intakes: vec![point(PointKind::Intake, 1, placement.intake, first)],
        segment: candidate.segment,
    }
}
