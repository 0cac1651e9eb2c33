//! Arena of plants indexed by their position in the search tree.
//!
//! Every successful placement splits its window in two: the upstream
//! residual (branch 1) and the downstream residual (branch 2). A
//! [`PlantPath`] is the sequence of branch choices from the root window to
//! the window that produced a plant; the arena stores plants flat and keeps
//! parent links, so no string ranks are built or parsed during the search.

use super::plant::Plant;
use hydrosite_core::{PlantId, StreamId};
use serde::Serialize;

/// Which residual window a child search runs in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Branch {
    /// Window between the parent window start and the parent intake
    Upstream = 1,
    /// Window between the parent restitution and the parent window end
    Downstream = 2,
}

/// Position of a plant in the search tree.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
pub struct PlantPath(Vec<Branch>);

impl PlantPath {
    pub fn root() -> Self {
        Self(Vec::new())
    }

    pub fn child(&self, branch: Branch) -> Self {
        let mut branches = self.0.clone();
        branches.push(branch);
        Self(branches)
    }

    pub fn branches(&self) -> &[Branch] {
        &self.0
    }

    pub fn depth(&self) -> usize {
        self.0.len()
    }

    pub fn is_ancestor_of(&self, other: &PlantPath) -> bool {
        self.0.len() < other.0.len() && other.0.starts_with(&self.0)
    }

    /// Display rank: stream id followed by branch digits, e.g. `"3.1.2"`.
    pub fn rank(&self, stream: StreamId) -> String {
        self.render(stream.to_string())
    }

    /// Rank on one part of a stream id shared by several lines, e.g. `"7/2.1"`.
    pub fn part_rank(&self, stream: StreamId, part: u32) -> String {
        self.render(format!("{stream}/{part}"))
    }

    fn render(&self, mut out: String) -> String {
        for branch in &self.0 {
            out.push('.');
            out.push_str(match branch {
                Branch::Upstream => "1",
                Branch::Downstream => "2",
            });
        }
        out
    }
}

/// Index of a plant inside its arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PlantIdx(usize);

/// Plants found on one stream.
#[derive(Debug, Clone, PartialEq)]
pub struct PlantArena {
    stream: StreamId,
    plants: Vec<Plant>,
}

impl PlantArena {
    pub fn new(stream: StreamId) -> Self {
        Self {
            stream,
            plants: Vec::new(),
        }
    }

    pub fn stream(&self) -> StreamId {
        self.stream
    }

    /// Id the next pushed plant will carry (1-based per stream).
    pub fn next_id(&self) -> PlantId {
        PlantId::new(self.plants.len() + 1)
    }

    pub fn push(&mut self, plant: Plant) -> PlantIdx {
        self.plants.push(plant);
        PlantIdx(self.plants.len() - 1)
    }

    pub fn get(&self, idx: PlantIdx) -> Option<&Plant> {
        self.plants.get(idx.0)
    }

    pub fn len(&self) -> usize {
        self.plants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plants.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Plant> {
        self.plants.iter()
    }

    /// Plant found at `path`, if any.
    pub fn find(&self, path: &PlantPath) -> Option<PlantIdx> {
        self.plants.iter().position(|p| &p.path == path).map(PlantIdx)
    }

    /// Tag every plant with `part` and renumber ids upward from `first`.
    pub fn assign_part(&mut self, part: u32, first: PlantId) {
        for (offset, plant) in self.plants.iter_mut().enumerate() {
            let id = PlantId::new(first.value() + offset);
            plant.id = id;
            plant.part = Some(part);
            plant.restitution.plant = id;
            for intake in &mut plant.intakes {
                intake.plant = id;
            }
        }
    }

    pub fn into_plants(self) -> Vec<Plant> {
        self.plants
    }
}

impl<'a> IntoIterator for &'a PlantArena {
    type Item = &'a Plant;
    type IntoIter = std::slice::Iter<'a, Plant>;

    fn into_iter(self) -> Self::IntoIter {
        self.plants.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rank_rendering() {
        let path = PlantPath::root()
            .child(Branch::Upstream)
            .child(Branch::Downstream);
        assert_eq!(path.rank(StreamId::new(3)), "3.1.2");
        assert_eq!(PlantPath::root().rank(StreamId::new(7)), "7");
        assert_eq!(path.depth(), 2);
        assert_eq!(path.part_rank(StreamId::new(3), 2), "3/2.1.2");
        assert_eq!(PlantPath::root().part_rank(StreamId::new(7), 1), "7/1");
    }

    #[test]
    fn test_ancestry() {
        let root = PlantPath::root();
        let up = root.child(Branch::Upstream);
        let up_down = up.child(Branch::Downstream);
        let down = root.child(Branch::Downstream);
        assert!(root.is_ancestor_of(&up_down));
        assert!(up.is_ancestor_of(&up_down));
        assert!(!down.is_ancestor_of(&up_down));
        assert!(!up.is_ancestor_of(&up));
    }
}
