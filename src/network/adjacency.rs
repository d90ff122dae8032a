//! Incrementally maintained index of the lanes entering and leaving each node.

use crate::model::{Lane, NodeKey};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::collections::HashMap;

/// Position of a lane in the network's lane list.
///
/// Stored at full width so that every position in the list has its own id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub struct LaneId(pub usize);

impl LaneId {
    #[inline(always)]
    pub fn index(&self) -> usize {
        self.0
    }
    pub fn new(idx: usize) -> Self {
        Self(idx)
    }
}

// Most facilities have a handful of lanes per direction.
type Bucket = SmallVec<[LaneId; 4]>;

/// Append-only buckets keyed by node identity.
///
/// Buckets are created on first use and keep insertion order. A lane added
/// twice is listed twice: parallel lanes are allowed.
#[derive(Debug, Clone, Default)]
pub(crate) struct AdjacencyIndex {
    lanes_in: HashMap<NodeKey, Bucket>,
    lanes_out: HashMap<NodeKey, Bucket>,
}

impl AdjacencyIndex {
    /// Rebuilds the index by replaying `lanes` in order.
    pub fn from_lanes(lanes: &[Lane]) -> Self {
        let mut index = Self::default();
        for (i, lane) in lanes.iter().enumerate() {
            index.record(LaneId::new(i), lane);
        }
        index
    }

    pub fn record(&mut self, id: LaneId, lane: &Lane) {
        self.lanes_out.entry(lane.origin.clone()).or_default().push(id);
        self.lanes_in.entry(lane.destination.clone()).or_default().push(id);
    }

    pub fn incoming(&self, node: &NodeKey) -> &[LaneId] {
        self.lanes_in.get(node).map(|bucket| bucket.as_slice()).unwrap_or(&[])
    }

    pub fn outgoing(&self, node: &NodeKey) -> &[LaneId] {
        self.lanes_out.get(node).map(|bucket| bucket.as_slice()).unwrap_or(&[])
    }
}
