//! Minimum-cost connecting network (Kruskal) with mandatory connections.
//!
//! The candidate pool mixes existing roads (priced by maintenance cost) and
//! potential roads (priced by construction cost); the algorithm only sees a
//! single `cost` per edge.
//!
//! ```text
//! ① for each mandatory (u, v) not yet connected:
//!      take the first pool edge joining u and v (either orientation),
//!      or warn and skip the pair if the pool has none
//! ② Kruskal over the pool sorted by ascending cost
//! ```

use log::{debug, warn};

use tp_core::NodeId;

use crate::network::{Graph, RoadRecord, RoadStatus};
use crate::NetworkResult;

// ── Disjoint set ──────────────────────────────────────────────────────────────

/// Union-find over dense `NodeId`s with path compression and union by rank.
pub(crate) struct DisjointSet {
    parent: Vec<u32>,
    rank:   Vec<u8>,
}

impl DisjointSet {
    pub fn new(n: usize) -> Self {
        Self {
            parent: (0..n as u32).collect(),
            rank:   vec![0; n],
        }
    }

    pub fn find(&mut self, x: NodeId) -> u32 {
        let mut root = x.0;
        while self.parent[root as usize] != root {
            root = self.parent[root as usize];
        }
        // Second pass: point every node on the walk straight at the root.
        let mut cur = x.0;
        while self.parent[cur as usize] != root {
            let next = self.parent[cur as usize];
            self.parent[cur as usize] = root;
            cur = next;
        }
        root
    }

    /// Merge the sets of `a` and `b`; `false` if they were already one set.
    pub fn union(&mut self, a: NodeId, b: NodeId) -> bool {
        let ra = self.find(a);
        let rb = self.find(b);
        if ra == rb {
            return false;
        }
        let (ra_i, rb_i) = (ra as usize, rb as usize);
        match self.rank[ra_i].cmp(&self.rank[rb_i]) {
            std::cmp::Ordering::Greater => self.parent[rb_i] = ra,
            std::cmp::Ordering::Less    => self.parent[ra_i] = rb,
            std::cmp::Ordering::Equal   => {
                self.parent[rb_i] = ra;
                self.rank[ra_i] += 1;
            }
        }
        true
    }

    pub fn connected(&mut self, a: NodeId, b: NodeId) -> bool {
        self.find(a) == self.find(b)
    }
}

// ── Candidate pool ────────────────────────────────────────────────────────────

/// A priced edge the spanning tree may select.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CandidateEdge {
    pub from:      NodeId,
    pub to:        NodeId,
    pub cost:      f64,
    /// `true` for roads that do not exist yet.
    pub potential: bool,
}

impl CandidateEdge {
    /// Resolve a road row against `graph`'s node keys and price it.
    pub fn from_record(graph: &Graph, record: &RoadRecord, cost_factor: f64) -> NetworkResult<Self> {
        let resolve = |key: &str| {
            graph
                .node_id(key)
                .map_err(|_| crate::NetworkError::InvalidEdgeReference {
                    from:    record.from.clone(),
                    to:      record.to.clone(),
                    missing: key.to_owned(),
                })
        };
        Ok(Self {
            from:      resolve(&record.from)?,
            to:        resolve(&record.to)?,
            cost:      record.cost(cost_factor),
            potential: matches!(record.status, RoadStatus::Potential { .. }),
        })
    }

    fn joins(&self, a: NodeId, b: NodeId) -> bool {
        (self.from == a && self.to == b) || (self.from == b && self.to == a)
    }
}

/// Price every record (existing and potential) into one pool.
pub fn edge_pool(graph: &Graph, records: &[RoadRecord], cost_factor: f64) -> NetworkResult<Vec<CandidateEdge>> {
    records
        .iter()
        .map(|r| CandidateEdge::from_record(graph, r, cost_factor))
        .collect()
}

// ── Result ────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SelectedEdge {
    pub from:      NodeId,
    pub to:        NodeId,
    pub cost:      f64,
    pub potential: bool,
    /// Selected in the mandatory phase rather than by cost rank.
    pub mandatory: bool,
}

#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpanningNetwork {
    pub edges:             Vec<SelectedEdge>,
    pub total_cost:        f64,
    /// Mandatory pairs with no joining edge in the pool.
    pub missing_mandatory: Vec<(NodeId, NodeId)>,
}

impl SpanningNetwork {
    /// `true` if an edge joining `a` and `b` was selected (either orientation).
    pub fn contains(&self, a: NodeId, b: NodeId) -> bool {
        self.edges
            .iter()
            .any(|e| (e.from == a && e.to == b) || (e.from == b && e.to == a))
    }

    /// Cost of the selected edges that would have to be built.
    pub fn construction_cost(&self) -> f64 {
        self.edges.iter().filter(|e| e.potential).map(|e| e.cost).sum()
    }

    pub fn potential_count(&self) -> usize {
        self.edges.iter().filter(|e| e.potential).count()
    }
}

// ── Kruskal ───────────────────────────────────────────────────────────────────

/// Minimum-cost network over `graph`'s node set using edges from `pool`.
///
/// On a pool that connects every node the result has exactly
/// `node_count - 1` edges.  Mandatory pairs whose endpoints are already
/// connected when their turn comes are satisfied and add nothing.
pub fn minimum_spanning_network(
    graph:     &Graph,
    pool:      &[CandidateEdge],
    mandatory: &[(NodeId, NodeId)],
) -> NetworkResult<SpanningNetwork> {
    for e in pool {
        graph.check(e.from)?;
        graph.check(e.to)?;
    }
    for &(a, b) in mandatory {
        graph.check(a)?;
        graph.check(b)?;
    }

    let mut sets = DisjointSet::new(graph.node_count());
    let mut result = SpanningNetwork::default();

    // ── ① Mandatory connections ───────────────────────────────────────────
    for &(u, v) in mandatory {
        if sets.connected(u, v) {
            continue;
        }
        match pool.iter().find(|e| e.joins(u, v)) {
            Some(edge) => {
                sets.union(u, v);
                result.total_cost += edge.cost;
                result.edges.push(SelectedEdge {
                    from:      u,
                    to:        v,
                    cost:      edge.cost,
                    potential: edge.potential,
                    mandatory: true,
                });
            }
            None => {
                warn!(
                    "mandatory connection {}-{} has no edge in the pool; skipped",
                    graph.name(u),
                    graph.name(v)
                );
                result.missing_mandatory.push((u, v));
            }
        }
    }

    // ── ② Kruskal ─────────────────────────────────────────────────────────
    let mut order: Vec<&CandidateEdge> = pool.iter().collect();
    order.sort_by(|a, b| a.cost.total_cmp(&b.cost));

    let target = graph.node_count().saturating_sub(1);
    for edge in order {
        if result.edges.len() >= target {
            break;
        }
        if sets.union(edge.from, edge.to) {
            result.total_cost += edge.cost;
            result.edges.push(SelectedEdge {
                from:      edge.from,
                to:        edge.to,
                cost:      edge.cost,
                potential: edge.potential,
                mandatory: false,
            });
        }
    }

    debug!(
        "spanning network: {} edges ({} new), total cost {:.2}",
        result.edges.len(),
        result.potential_count(),
        result.total_cost
    );
    Ok(result)
}
