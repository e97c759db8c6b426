//! Road graph representation and builder.
//!
//! # Data layout
//!
//! Roads are undirected.  Each road is stored once in `roads` (indexed by
//! `RoadId`) and contributes two directed *arcs* to a **Compressed Sparse
//! Row** adjacency.  Given a `NodeId n`, its arcs occupy the slice:
//!
//! ```text
//! arc_to[ node_out_start[n] .. node_out_start[n+1] ]
//! ```
//!
//! `arc_road` runs parallel to `arc_to` and names the road each arc belongs
//! to, so the search loops read distance, capacity and weight from one place
//! whatever the traversal direction.
//!
//! # Identity
//!
//! Nodes keep their external string key and display name.  Both are mapped
//! to the dense `NodeId` once, in [`GraphBuilder::build`]; the algorithms
//! never hash a key.

use rustc_hash::FxHashMap;

use tp_core::{NodeId, Point, RoadId};

use crate::{NetworkError, NetworkResult};

// ── Nodes ─────────────────────────────────────────────────────────────────────

/// Settlement or facility.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum NodeKind {
    /// A residential/mixed district with a resident population.
    Settlement { population: u64 },
    /// A service location; `class` is free text (`"Medical"`, `"Airport"`, …).
    Facility { class: String },
}

/// A graph vertex as supplied by the caller.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Node {
    /// Unique external identity, e.g. `"3"` or `"F9"`.
    pub key:  String,
    /// Display name.  Also the vocabulary of traffic road names.
    pub name: String,
    /// Map position; only the A* heuristic reads it.
    pub pos:  Point,
    pub kind: NodeKind,
}

impl Node {
    pub fn settlement(key: impl Into<String>, name: impl Into<String>, pos: Point, population: u64) -> Self {
        Self {
            key: key.into(),
            name: name.into(),
            pos,
            kind: NodeKind::Settlement { population },
        }
    }

    pub fn facility(key: impl Into<String>, name: impl Into<String>, pos: Point, class: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            name: name.into(),
            pos,
            kind: NodeKind::Facility { class: class.into() },
        }
    }

    /// Resident population; facilities have none.
    pub fn population(&self) -> u64 {
        match self.kind {
            NodeKind::Settlement { population } => population,
            NodeKind::Facility { .. } => 0,
        }
    }

    pub fn is_facility(&self) -> bool {
        matches!(self.kind, NodeKind::Facility { .. })
    }
}

// ── Roads ─────────────────────────────────────────────────────────────────────

/// Whether a road exists today or is a construction candidate.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RoadStatus {
    /// `condition` is a 0–10 score, higher is better.
    Existing { condition: f64 },
    Potential { construction_cost: f64 },
}

/// A road row as it appears in tabular input: endpoints by node key.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RoadRecord {
    pub from:     String,
    pub to:       String,
    pub distance: f64,
    pub capacity: f64,
    pub status:   RoadStatus,
    /// Traversal weight for A*.  `None` means "use the distance".
    pub weight:   Option<f64>,
}

impl RoadRecord {
    pub fn existing(from: impl Into<String>, to: impl Into<String>, distance: f64, capacity: f64, condition: f64) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            distance,
            capacity,
            status: RoadStatus::Existing { condition },
            weight: None,
        }
    }

    pub fn potential(from: impl Into<String>, to: impl Into<String>, distance: f64, capacity: f64, construction_cost: f64) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            distance,
            capacity,
            status: RoadStatus::Potential { construction_cost },
            weight: None,
        }
    }

    /// Override the traversal weight (e.g. a traffic/condition penalty).
    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = Some(weight);
        self
    }

    /// `(10 - condition) * distance * cost_factor` for existing roads, the
    /// construction cost for potential ones.
    pub fn cost(&self, cost_factor: f64) -> f64 {
        status_cost(self.status, self.distance, cost_factor)
    }
}

/// A road inside a built [`Graph`].
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Road {
    pub from:     NodeId,
    pub to:       NodeId,
    pub distance: f64,
    pub capacity: f64,
    pub weight:   f64,
    pub status:   RoadStatus,
}

impl Road {
    /// The endpoint opposite `node`.
    #[inline]
    pub fn other(&self, node: NodeId) -> NodeId {
        if self.from == node { self.to } else { self.from }
    }

    /// `true` if the road joins `a` and `b` in either orientation.
    #[inline]
    pub fn connects(&self, a: NodeId, b: NodeId) -> bool {
        (self.from == a && self.to == b) || (self.from == b && self.to == a)
    }

    /// Condition score for existing roads.
    pub fn condition(&self) -> Option<f64> {
        match self.status {
            RoadStatus::Existing { condition } => Some(condition),
            RoadStatus::Potential { .. } => None,
        }
    }

    /// Maintenance cost for existing roads, `None` for potential ones.
    pub fn maintenance_cost(&self, cost_factor: f64) -> Option<f64> {
        self.condition()
            .map(|condition| (10.0 - condition) * self.distance * cost_factor)
    }

    pub fn cost(&self, cost_factor: f64) -> f64 {
        status_cost(self.status, self.distance, cost_factor)
    }
}

fn status_cost(status: RoadStatus, distance: f64, cost_factor: f64) -> f64 {
    match status {
        RoadStatus::Existing { condition } => (10.0 - condition) * distance * cost_factor,
        RoadStatus::Potential { construction_cost } => construction_cost,
    }
}

// ── Graph ─────────────────────────────────────────────────────────────────────

/// Undirected road graph in CSR format.
///
/// Immutable once built.  Scenario variants (closed roads) are new graphs,
/// see [`Graph::without_roads`].
#[derive(Clone, Debug)]
pub struct Graph {
    nodes:  Vec<Node>,
    by_key: FxHashMap<String, NodeId>,
    by_name: FxHashMap<String, NodeId>,
    roads:  Vec<Road>,

    // ── CSR arc adjacency ─────────────────────────────────────────────────
    /// Arcs of node `n` are at positions `node_out_start[n] .. node_out_start[n+1]`.
    /// Length = `node_count + 1`.
    node_out_start: Vec<u32>,
    arc_to:         Vec<NodeId>,
    arc_road:       Vec<RoadId>,
}

impl Graph {
    /// Build a graph from node and road tables.
    ///
    /// Fails with [`NetworkError::InvalidEdgeReference`] if a road names a
    /// node key absent from `nodes`.
    pub fn build(nodes: impl IntoIterator<Item = Node>, roads: &[RoadRecord]) -> NetworkResult<Graph> {
        let mut b = GraphBuilder::new();
        for node in nodes {
            b.add_node(node)?;
        }
        for road in roads {
            b.add_road(road)?;
        }
        Ok(b.build())
    }

    // ── Dimensions ────────────────────────────────────────────────────────

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn road_count(&self) -> usize {
        self.roads.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    // ── Node access ───────────────────────────────────────────────────────

    #[inline]
    pub fn contains(&self, id: NodeId) -> bool {
        id.index() < self.nodes.len()
    }

    /// Fail fast with [`NetworkError::UnknownNode`] for out-of-range ids.
    pub fn check(&self, id: NodeId) -> NetworkResult<()> {
        if self.contains(id) {
            Ok(())
        } else {
            Err(NetworkError::UnknownNode(id.to_string()))
        }
    }

    /// # Panics
    /// Panics if `id` is not a node of this graph.
    #[inline]
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    pub fn nodes(&self) -> impl Iterator<Item = (NodeId, &Node)> + '_ {
        self.nodes
            .iter()
            .enumerate()
            .map(|(i, n)| (NodeId(i as u32), n))
    }

    /// Resolve an external node key.
    pub fn node_id(&self, key: &str) -> NetworkResult<NodeId> {
        self.by_key
            .get(key)
            .copied()
            .ok_or_else(|| NetworkError::UnknownNode(key.to_owned()))
    }

    /// Resolve a display name.
    pub fn node_by_name(&self, name: &str) -> NetworkResult<NodeId> {
        self.by_name
            .get(name)
            .copied()
            .ok_or_else(|| NetworkError::UnknownNode(name.to_owned()))
    }

    #[inline]
    pub fn name(&self, id: NodeId) -> &str {
        &self.nodes[id.index()].name
    }

    /// All facility nodes in insertion order.
    pub fn facilities(&self) -> Vec<NodeId> {
        self.nodes()
            .filter(|(_, n)| n.is_facility())
            .map(|(id, _)| id)
            .collect()
    }

    // ── Roads ─────────────────────────────────────────────────────────────

    #[inline]
    pub fn road(&self, id: RoadId) -> &Road {
        &self.roads[id.index()]
    }

    pub fn roads(&self) -> impl Iterator<Item = (RoadId, &Road)> + '_ {
        self.roads
            .iter()
            .enumerate()
            .map(|(i, r)| (RoadId(i as u32), r))
    }

    /// Neighbours of `node` with the road leading to each.
    ///
    /// A contiguous slice scan with no heap allocation.
    #[inline]
    pub fn neighbors(&self, node: NodeId) -> impl Iterator<Item = (NodeId, &Road)> + '_ {
        let start = self.node_out_start[node.index()] as usize;
        let end   = self.node_out_start[node.index() + 1] as usize;
        (start..end).map(move |i| (self.arc_to[i], &self.roads[self.arc_road[i].index()]))
    }

    #[inline]
    pub fn degree(&self, node: NodeId) -> usize {
        let start = self.node_out_start[node.index()] as usize;
        let end   = self.node_out_start[node.index() + 1] as usize;
        end - start
    }

    /// The lightest road joining `a` and `b`, if any.
    pub fn road_between(&self, a: NodeId, b: NodeId) -> Option<RoadId> {
        let start = self.node_out_start[a.index()] as usize;
        let end   = self.node_out_start[a.index() + 1] as usize;
        (start..end)
            .filter(|&i| self.arc_to[i] == b)
            .map(|i| self.arc_road[i])
            .min_by(|x, y| self.road(*x).weight.total_cmp(&self.road(*y).weight))
    }

    /// Traversal weight between adjacent nodes.
    pub fn weight(&self, a: NodeId, b: NodeId) -> Option<f64> {
        self.road_between(a, b).map(|r| self.road(r).weight)
    }

    /// Sum of weights along `path`; `None` if two consecutive nodes are not
    /// adjacent.  A single-node path weighs zero.
    pub fn path_weight(&self, path: &[NodeId]) -> Option<f64> {
        path.windows(2)
            .map(|w| self.weight(w[0], w[1]))
            .sum()
    }

    /// Split a `"{from}-{to}"` road name into two node ids.
    ///
    /// Node names may themselves contain dashes, so every dash is tried as
    /// the separator until both halves name known nodes.
    pub fn resolve_road_name(&self, road_name: &str) -> NetworkResult<(NodeId, NodeId)> {
        road_name
            .match_indices('-')
            .find_map(|(i, _)| {
                let from = self.by_name.get(&road_name[..i])?;
                let to = self.by_name.get(&road_name[i + 1..])?;
                Some((*from, *to))
            })
            .ok_or_else(|| NetworkError::UnknownRoadName(road_name.to_owned()))
    }

    // ── Scenario copies ───────────────────────────────────────────────────

    /// A copy of this graph with every road joining any of the `closed`
    /// pairs removed (either orientation).  `NodeId`s are preserved;
    /// `RoadId`s are renumbered.
    pub fn without_roads(&self, closed: &[(NodeId, NodeId)]) -> Graph {
        let roads: Vec<Road> = self
            .roads
            .iter()
            .filter(|r| !closed.iter().any(|&(a, b)| r.connects(a, b)))
            .cloned()
            .collect();
        assemble(self.nodes.clone(), self.by_key.clone(), self.by_name.clone(), roads)
    }
}

// ── GraphBuilder ──────────────────────────────────────────────────────────────

/// Construct a [`Graph`] incrementally, then call [`build`](Self::build).
///
/// Nodes must be added before the roads that reference them.
///
/// # Example
///
/// ```
/// use tp_core::Point;
/// use tp_network::{GraphBuilder, Node, RoadRecord};
///
/// let mut b = GraphBuilder::new();
/// b.add_node(Node::settlement("1", "Maadi", Point::new(31.25, 29.96), 250_000)).unwrap();
/// b.add_node(Node::settlement("3", "Downtown Cairo", Point::new(31.24, 30.04), 100_000)).unwrap();
/// b.add_road(&RoadRecord::existing("1", "3", 8.5, 3000.0, 7.0)).unwrap();
/// let graph = b.build();
/// assert_eq!(graph.node_count(), 2);
/// assert_eq!(graph.road_count(), 1);
/// ```
#[derive(Default)]
pub struct GraphBuilder {
    nodes:   Vec<Node>,
    by_key:  FxHashMap<String, NodeId>,
    by_name: FxHashMap<String, NodeId>,
    roads:   Vec<Road>,
}

impl GraphBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node and return its `NodeId` (sequential from 0).
    pub fn add_node(&mut self, node: Node) -> NetworkResult<NodeId> {
        if self.by_key.contains_key(&node.key) {
            return Err(NetworkError::DuplicateNode(node.key));
        }
        if self.by_name.contains_key(&node.name) {
            return Err(NetworkError::DuplicateNode(node.name));
        }
        if !node.pos.is_finite() {
            return Err(NetworkError::InvalidNode {
                key:    node.key,
                reason: "position is not finite".into(),
            });
        }
        let id = NodeId(self.nodes.len() as u32);
        self.by_key.insert(node.key.clone(), id);
        self.by_name.insert(node.name.clone(), id);
        self.nodes.push(node);
        Ok(id)
    }

    /// Add an undirected road between two previously added node keys.
    pub fn add_road(&mut self, record: &RoadRecord) -> NetworkResult<RoadId> {
        let lookup = |key: &str| {
            self.by_key
                .get(key)
                .copied()
                .ok_or_else(|| NetworkError::InvalidEdgeReference {
                    from:    record.from.clone(),
                    to:      record.to.clone(),
                    missing: key.to_owned(),
                })
        };
        let from = lookup(&record.from)?;
        let to = lookup(&record.to)?;
        self.add_road_between(from, to, record)
    }

    /// Like [`add_road`](Self::add_road) with already-resolved endpoints.
    pub fn add_road_between(&mut self, from: NodeId, to: NodeId, record: &RoadRecord) -> NetworkResult<RoadId> {
        for id in [from, to] {
            if id.index() >= self.nodes.len() {
                return Err(NetworkError::UnknownNode(id.to_string()));
            }
        }
        let invalid = |reason: &str| NetworkError::InvalidRoad {
            from:   record.from.clone(),
            to:     record.to.clone(),
            reason: reason.to_owned(),
        };
        if from == to {
            return Err(invalid("a road must join two distinct nodes"));
        }
        if !(record.distance >= 0.0 && record.distance.is_finite()) {
            return Err(invalid("distance must be finite and non-negative"));
        }
        if !(record.capacity >= 0.0 && record.capacity.is_finite()) {
            return Err(invalid("capacity must be finite and non-negative"));
        }
        let weight = record.weight.unwrap_or(record.distance);
        if !(weight >= 0.0 && weight.is_finite()) {
            return Err(invalid("weight must be finite and non-negative"));
        }
        match record.status {
            RoadStatus::Existing { condition } if !(0.0..=10.0).contains(&condition) => {
                return Err(invalid("condition must lie in 0..=10"));
            }
            RoadStatus::Potential { construction_cost }
                if !(construction_cost >= 0.0 && construction_cost.is_finite()) =>
            {
                return Err(invalid("construction cost must be finite and non-negative"));
            }
            _ => {}
        }

        let id = RoadId(self.roads.len() as u32);
        self.roads.push(Road {
            from,
            to,
            distance: record.distance,
            capacity: record.capacity,
            weight,
            status: record.status,
        });
        Ok(id)
    }

    pub fn node_count(&self) -> usize { self.nodes.len() }
    pub fn road_count(&self) -> usize { self.roads.len() }

    /// Consume the builder and produce a [`Graph`].
    ///
    /// Time complexity: O(E log E) for the arc sort.
    pub fn build(self) -> Graph {
        assemble(self.nodes, self.by_key, self.by_name, self.roads)
    }
}

/// Lay out the CSR arrays for `roads` over `nodes`.
fn assemble(
    nodes:   Vec<Node>,
    by_key:  FxHashMap<String, NodeId>,
    by_name: FxHashMap<String, NodeId>,
    roads:   Vec<Road>,
) -> Graph {
    let node_count = nodes.len();

    // Two arcs per road, sorted by source node.  The sort is stable so arcs
    // of one node keep road insertion order.
    let mut arcs: Vec<(NodeId, NodeId, RoadId)> = Vec::with_capacity(roads.len() * 2);
    for (i, r) in roads.iter().enumerate() {
        let id = RoadId(i as u32);
        arcs.push((r.from, r.to, id));
        arcs.push((r.to, r.from, id));
    }
    arcs.sort_by_key(|&(from, _, _)| from.0);

    let mut node_out_start = vec![0u32; node_count + 1];
    for &(from, _, _) in &arcs {
        node_out_start[from.index() + 1] += 1;
    }
    for i in 1..=node_count {
        node_out_start[i] += node_out_start[i - 1];
    }
    debug_assert_eq!(node_out_start[node_count] as usize, arcs.len());

    let arc_to = arcs.iter().map(|&(_, to, _)| to).collect();
    let arc_road = arcs.iter().map(|&(_, _, road)| road).collect();

    Graph {
        nodes,
        by_key,
        by_name,
        roads,
        node_out_start,
        arc_to,
        arc_road,
    }
}
