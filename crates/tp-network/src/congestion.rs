//! Time-of-day congestion model and the congestion-aware Dijkstra.
//!
//! # Travel time
//!
//! ```text
//! travel_time(road, period) = distance × factor
//! factor = clamp(volume[period] / capacity, min_factor, max_factor)
//! ```
//!
//! The volume comes from a [`TrafficTable`] sample whose name matches the
//! road.  Road names are `"{from}-{to}"` built from node display names in
//! the direction of traversal.  With the default
//! [`RoadNameLookup::AsTraversed`] only that exact name is tried, so a
//! sample recorded as `"B-A"` does not slow down travel from `A` to `B`.
//! Roads without a sample get a factor of `1.0`.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use log::debug;
use rustc_hash::FxHashMap;

use tp_core::{CongestionConfig, NodeId, RoadNameLookup, SnapshotKey, TimeOfDay};

use crate::cache::{RouteCache, RouteKey};
use crate::frontier::{reconstruct, Entry};
use crate::network::{Graph, Road};
use crate::{NetworkError, NetworkResult};

// ── Traffic table ─────────────────────────────────────────────────────────────

/// Volume readings for one named road, one per [`TimeOfDay`].
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TrafficSample {
    pub road:    String,
    /// Indexed by [`TimeOfDay::index`].
    pub volumes: [f64; 4],
}

impl TrafficSample {
    pub fn new(road: impl Into<String>, volumes: [f64; 4]) -> Self {
        Self { road: road.into(), volumes }
    }

    #[inline]
    pub fn volume(&self, time_of_day: TimeOfDay) -> f64 {
        self.volumes[time_of_day.index()]
    }
}

/// Traffic samples keyed by exact road name.
#[derive(Clone, Debug, Default)]
pub struct TrafficTable {
    samples: FxHashMap<String, TrafficSample>,
}

impl TrafficTable {
    /// Index `samples` by road name.
    ///
    /// Two samples for the same name are rejected rather than resolved by
    /// position.  Negative or non-finite volumes are rejected too.
    pub fn new(samples: impl IntoIterator<Item = TrafficSample>) -> NetworkResult<Self> {
        let mut table = Self::default();
        for sample in samples {
            validate_sample(&sample)?;
            if table.samples.contains_key(&sample.road) {
                return Err(NetworkError::DuplicateTrafficSample(sample.road));
            }
            table.samples.insert(sample.road.clone(), sample);
        }
        Ok(table)
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn get(&self, road: &str) -> Option<&TrafficSample> {
        self.samples.get(road)
    }

    pub fn volume(&self, road: &str, time_of_day: TimeOfDay) -> Option<f64> {
        self.get(road).map(|s| s.volume(time_of_day))
    }

    /// Insert or replace the sample for `sample.road`, returning the old one.
    pub fn upsert(&mut self, sample: TrafficSample) -> NetworkResult<Option<TrafficSample>> {
        validate_sample(&sample)?;
        Ok(self.samples.insert(sample.road.clone(), sample))
    }

    /// Road names in ascending order.
    pub fn road_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.samples.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Exact view of the table used in route-cache keys.
    ///
    /// [`SnapshotKey::RoadNames`] keeps the sorted name set only, so tables
    /// that differ only in volumes produce equal snapshots.
    pub fn snapshot(&self, key: SnapshotKey) -> TrafficSnapshot {
        let roads = self
            .road_names()
            .into_iter()
            .map(|name| {
                let volumes = (key == SnapshotKey::Contents)
                    .then(|| self.samples[name].volumes.map(f64::to_bits));
                (name.to_owned(), volumes)
            })
            .collect();
        TrafficSnapshot { roads }
    }
}

/// Sorted road names, plus raw volume bits under [`SnapshotKey::Contents`].
///
/// Compared field by field, so two different tables never share a key.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct TrafficSnapshot {
    roads: Vec<(String, Option<[u64; 4]>)>,
}

impl TrafficSnapshot {
    pub fn len(&self) -> usize {
        self.roads.len()
    }

    pub fn is_empty(&self) -> bool {
        self.roads.is_empty()
    }
}

fn validate_sample(sample: &TrafficSample) -> NetworkResult<()> {
    if sample.volumes.iter().all(|v| *v >= 0.0 && v.is_finite()) {
        Ok(())
    } else {
        Err(NetworkError::InvalidTrafficSample {
            road:   sample.road.clone(),
            reason: "volumes must be finite and non-negative".into(),
        })
    }
}

// ── Congestion model ──────────────────────────────────────────────────────────

/// `"{from}-{to}"` using node display names.
pub fn road_name(graph: &Graph, from: NodeId, to: NodeId) -> String {
    format!("{}-{}", graph.name(from), graph.name(to))
}

/// Congestion factor with the default bounds `[0.5, 2.0]`.
pub fn congestion_factor(volume: Option<f64>, capacity: f64) -> f64 {
    CongestionModel::default().factor(volume, capacity)
}

/// Result of a congestion-aware query.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TimedRoute {
    /// `f64::INFINITY` when the goal is unreachable.
    pub total_time: f64,
    /// Display names from start to goal; empty when unreachable.
    pub path:       Vec<String>,
    pub nodes:      Vec<NodeId>,
}

impl TimedRoute {
    pub fn unreachable() -> Self {
        Self { total_time: f64::INFINITY, path: Vec::new(), nodes: Vec::new() }
    }

    pub fn is_reachable(&self) -> bool {
        !self.nodes.is_empty()
    }
}

/// Traffic-driven edge costs plus the Dijkstra that consumes them.
#[derive(Clone, Debug, Default)]
pub struct CongestionModel {
    config: CongestionConfig,
}

impl CongestionModel {
    pub fn new(config: CongestionConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &CongestionConfig {
        &self.config
    }

    /// `clamp(volume / capacity, min, max)`; `1.0` without a sample.
    /// A sampled road with zero capacity is treated as saturated.
    pub fn factor(&self, volume: Option<f64>, capacity: f64) -> f64 {
        let Some(volume) = volume else {
            return 1.0;
        };
        if capacity <= 0.0 {
            return self.config.max_factor;
        }
        (volume / capacity).clamp(self.config.min_factor, self.config.max_factor)
    }

    /// Factor for traversing `road` from `from` towards `to` in `time_of_day`.
    pub fn road_factor(
        &self,
        graph:       &Graph,
        from:        NodeId,
        to:          NodeId,
        road:        &Road,
        time_of_day: TimeOfDay,
        traffic:     &TrafficTable,
    ) -> f64 {
        let mut volume = traffic.volume(&road_name(graph, from, to), time_of_day);
        if volume.is_none() && self.config.lookup == RoadNameLookup::EitherDirection {
            volume = traffic.volume(&road_name(graph, to, from), time_of_day);
        }
        self.factor(volume, road.capacity)
    }

    /// Dijkstra over congestion-scaled travel time.
    ///
    /// Returns [`TimedRoute::unreachable`] (infinite time, empty path) when
    /// no path exists.  Frontier entries are pushed lazily; a node is final
    /// the first time it is popped.
    pub fn shortest_time(
        &self,
        graph:       &Graph,
        start:       NodeId,
        goal:        NodeId,
        time_of_day: TimeOfDay,
        traffic:     &TrafficTable,
    ) -> NetworkResult<TimedRoute> {
        graph.check(start)?;
        graph.check(goal)?;

        let n = graph.node_count();
        let mut dist    = vec![f64::INFINITY; n];
        let mut prev    = vec![NodeId::INVALID; n];
        let mut visited = vec![false; n];
        dist[start.index()] = 0.0;

        let mut heap: BinaryHeap<Reverse<Entry>> = BinaryHeap::new();
        heap.push(Reverse(Entry { key: 0.0, node: start, cost: 0.0 }));

        while let Some(Reverse(Entry { node, cost, .. })) = heap.pop() {
            if node == goal {
                let nodes = reconstruct(&prev, goal);
                let path = nodes.iter().map(|&id| graph.name(id).to_owned()).collect();
                debug!(
                    "shortest_time {} -> {} ({time_of_day}): {:.3} over {} nodes",
                    graph.name(start),
                    graph.name(goal),
                    cost,
                    nodes.len()
                );
                return Ok(TimedRoute { total_time: cost, path, nodes });
            }
            if visited[node.index()] {
                continue;
            }
            visited[node.index()] = true;

            for (neighbor, road) in graph.neighbors(node) {
                let factor = self.road_factor(graph, node, neighbor, road, time_of_day, traffic);
                let candidate = cost + road.distance * factor;
                if candidate < dist[neighbor.index()] {
                    dist[neighbor.index()] = candidate;
                    prev[neighbor.index()] = node;
                    heap.push(Reverse(Entry { key: candidate, node: neighbor, cost: candidate }));
                }
            }
        }

        debug!(
            "shortest_time {} -> {} ({time_of_day}): unreachable",
            graph.name(start),
            graph.name(goal)
        );
        Ok(TimedRoute::unreachable())
    }

    /// [`shortest_time`](Self::shortest_time) memoised in `cache`.
    ///
    /// The cache key is `(start, goal, time_of_day, traffic snapshot)`, where
    /// the snapshot follows the cache's [`SnapshotKey`].  A cache must only
    /// ever be used with one graph and one model configuration.
    pub fn shortest_time_cached(
        &self,
        cache:       &RouteCache,
        graph:       &Graph,
        start:       NodeId,
        goal:        NodeId,
        time_of_day: TimeOfDay,
        traffic:     &TrafficTable,
    ) -> NetworkResult<TimedRoute> {
        graph.check(start)?;
        graph.check(goal)?;
        let key = RouteKey::new(start, goal, time_of_day, traffic.snapshot(cache.key_mode()));
        if let Some(hit) = cache.lookup(&key) {
            return Ok(hit);
        }
        let route = self.shortest_time(graph, start, goal, time_of_day, traffic)?;
        cache.store(key, route.clone());
        Ok(route)
    }

    /// Shortest time with some roads closed.
    ///
    /// Runs on a throwaway copy of `graph` without the `closed` roads; the
    /// caller's graph is untouched.
    pub fn recommend_alternate_route(
        &self,
        graph:        &Graph,
        start:        NodeId,
        goal:         NodeId,
        closed_roads: &[(NodeId, NodeId)],
        time_of_day:  TimeOfDay,
        traffic:      &TrafficTable,
    ) -> NetworkResult<TimedRoute> {
        for &(a, b) in closed_roads {
            graph.check(a)?;
            graph.check(b)?;
        }
        let detour = graph.without_roads(closed_roads);
        debug!(
            "alternate route with {} closure(s): {} -> {} roads",
            closed_roads.len(),
            graph.road_count(),
            detour.road_count()
        );
        self.shortest_time(&detour, start, goal, time_of_day, traffic)
    }
}

// ── Free-function entry points (default model) ────────────────────────────────

pub fn shortest_time(
    graph:       &Graph,
    start:       NodeId,
    goal:        NodeId,
    time_of_day: TimeOfDay,
    traffic:     &TrafficTable,
) -> NetworkResult<TimedRoute> {
    CongestionModel::default().shortest_time(graph, start, goal, time_of_day, traffic)
}

pub fn shortest_time_cached(
    cache:       &RouteCache,
    graph:       &Graph,
    start:       NodeId,
    goal:        NodeId,
    time_of_day: TimeOfDay,
    traffic:     &TrafficTable,
) -> NetworkResult<TimedRoute> {
    CongestionModel::default().shortest_time_cached(cache, graph, start, goal, time_of_day, traffic)
}

pub fn recommend_alternate_route(
    graph:        &Graph,
    start:        NodeId,
    goal:         NodeId,
    closed_roads: &[(NodeId, NodeId)],
    time_of_day:  TimeOfDay,
    traffic:      &TrafficTable,
) -> NetworkResult<TimedRoute> {
    CongestionModel::default()
        .recommend_alternate_route(graph, start, goal, closed_roads, time_of_day, traffic)
}
