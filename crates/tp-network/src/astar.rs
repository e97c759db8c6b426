//! Priority-aware A* search and nearest-facility lookup.
//!
//! # Cost model
//!
//! The search accumulates each road's `weight`.  In *priority* mode (an
//! emergency vehicle with right of way at intersections) every traversed
//! weight is multiplied by [`PRIORITY_DISCOUNT`] as it is relaxed; the graph
//! itself is never rescaled, so one `Graph` can serve both modes at once.
//!
//! The heuristic is the straight-line distance between node positions.  It
//! is informative, but once weights carry traffic or condition penalties (or
//! are discounted) it is no longer guaranteed admissible, so the first path
//! to reach the goal is not always the cheapest possible one.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use log::debug;

use tp_core::NodeId;

use crate::frontier::{reconstruct, Entry};
use crate::network::Graph;
use crate::NetworkResult;

/// Weight multiplier applied at traversal time in priority mode.
pub const PRIORITY_DISCOUNT: f64 = 0.5;

// ── Path ──────────────────────────────────────────────────────────────────────

/// Result of an A* query.
///
/// Either empty (goal unreachable) or a node sequence that starts at the
/// queried start and ends at the queried goal.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Path {
    pub nodes: Vec<NodeId>,
    /// Accumulated search cost (discounted in priority mode).
    pub cost:  f64,
}

impl Path {
    pub fn empty() -> Self {
        Self::default()
    }

    /// `true` when no connection was found.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Number of roads traversed.
    pub fn edge_count(&self) -> usize {
        self.nodes.len().saturating_sub(1)
    }

    pub fn start(&self) -> Option<NodeId> {
        self.nodes.first().copied()
    }

    pub fn goal(&self) -> Option<NodeId> {
        self.nodes.last().copied()
    }
}

// ── A* ────────────────────────────────────────────────────────────────────────

/// Best-first search from `start` to `goal`.
///
/// Returns an empty [`Path`] when the goal is unreachable and
/// [`NetworkError::UnknownNode`](crate::NetworkError::UnknownNode) when
/// either id is not in `graph`.  Complexity O(E log V).
pub fn find_path(graph: &Graph, start: NodeId, goal: NodeId, priority: bool) -> NetworkResult<Path> {
    graph.check(start)?;
    graph.check(goal)?;

    let factor = if priority { PRIORITY_DISCOUNT } else { 1.0 };
    let goal_pos = graph.node(goal).pos;
    let h = |n: NodeId| graph.node(n).pos.distance(goal_pos);

    let n = graph.node_count();
    // g[v] = best known accumulated cost to reach v.
    let mut g    = vec![f64::INFINITY; n];
    let mut prev = vec![NodeId::INVALID; n];
    g[start.index()] = 0.0;

    // Min-heap on f = g + h; ties fall back to NodeId order.
    let mut heap: BinaryHeap<Reverse<Entry>> = BinaryHeap::new();
    heap.push(Reverse(Entry { key: h(start), node: start, cost: 0.0 }));

    while let Some(Reverse(Entry { node, cost, .. })) = heap.pop() {
        if node == goal {
            let path = Path { nodes: reconstruct(&prev, goal), cost };
            debug!(
                "A* {} -> {} (priority={priority}): {} nodes, cost {:.3}",
                graph.name(start),
                graph.name(goal),
                path.nodes.len(),
                path.cost
            );
            return Ok(path);
        }

        // Skip stale heap entries.
        if cost > g[node.index()] {
            continue;
        }

        for (neighbor, road) in graph.neighbors(node) {
            let tentative = cost + road.weight * factor;
            if tentative < g[neighbor.index()] {
                g[neighbor.index()] = tentative;
                prev[neighbor.index()] = node;
                heap.push(Reverse(Entry {
                    key:  tentative + h(neighbor),
                    node: neighbor,
                    cost: tentative,
                }));
            }
        }
    }

    debug!("A* {} -> {}: unreachable", graph.name(start), graph.name(goal));
    Ok(Path::empty())
}

// ── Nearest facility ──────────────────────────────────────────────────────────

/// The facility chosen by [`find_nearest_facility`].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NearestFacility {
    pub facility: NodeId,
    pub path:     Path,
    /// Undiscounted graph weight of `path`.
    pub weight:   f64,
}

/// Run [`find_path`] once per candidate facility and keep the path with the
/// smallest total graph weight.
///
/// Weights are compared undiscounted, so the choice is the same in both
/// modes when the searches return the same paths.  Ties keep the facility
/// that comes first in `facilities`.  Returns `None` when no facility is
/// reachable.
pub fn find_nearest_facility(
    graph:      &Graph,
    start:      NodeId,
    facilities: &[NodeId],
    priority:   bool,
) -> NetworkResult<Option<NearestFacility>> {
    graph.check(start)?;

    let search = |&facility: &NodeId| -> NetworkResult<Option<NearestFacility>> {
        let path = find_path(graph, start, facility, priority)?;
        if path.is_empty() {
            return Ok(None);
        }
        Ok(graph
            .path_weight(&path.nodes)
            .map(|weight| NearestFacility { facility, path, weight }))
    };

    #[cfg(feature = "parallel")]
    let candidates: Vec<Option<NearestFacility>> = {
        use rayon::prelude::*;
        facilities
            .par_iter()
            .map(search)
            .collect::<NetworkResult<_>>()?
    };

    #[cfg(not(feature = "parallel"))]
    let candidates: Vec<Option<NearestFacility>> = facilities
        .iter()
        .map(search)
        .collect::<NetworkResult<_>>()?;

    let mut best: Option<NearestFacility> = None;
    for found in candidates.into_iter().flatten() {
        if best.as_ref().is_none_or(|b| found.weight < b.weight) {
            best = Some(found);
        }
    }
    Ok(best)
}
