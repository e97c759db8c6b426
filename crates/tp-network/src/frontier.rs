//! Heap entry shared by the A* and Dijkstra loops.

use std::cmp::Ordering;

use tp_core::NodeId;

/// `(key, node)` ordered by key, then `NodeId` for deterministic ties.
/// `cost` rides along so stale entries can be recognised on pop.
///
/// Wrap in `std::cmp::Reverse` to make `BinaryHeap` (max) a min-heap.
#[derive(Copy, Clone, Debug)]
pub(crate) struct Entry {
    pub key:  f64,
    pub node: NodeId,
    pub cost: f64,
}

impl PartialEq for Entry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Entry {}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Entry {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key
            .total_cmp(&other.key)
            .then_with(|| self.node.cmp(&other.node))
    }
}

/// Walk `prev` back from `goal` and return the forward node sequence.
pub(crate) fn reconstruct(prev: &[NodeId], goal: NodeId) -> Vec<NodeId> {
    let mut nodes = vec![goal];
    let mut cur = goal;
    loop {
        let p = prev[cur.index()];
        if p == NodeId::INVALID {
            break;
        }
        nodes.push(p);
        cur = p;
    }
    nodes.reverse();
    nodes
}
