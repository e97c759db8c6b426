//! Unit tests for tp-network.
//!
//! All tests use hand-crafted graphs so they run without any dataset files.

#[cfg(test)]
mod helpers {
    use tp_core::{NodeId, Point};
    use crate::{Graph, Node, RoadRecord};

    /// Settlement with a generated key (`"k<name>"`) and zero population.
    pub fn node(name: &str, x: f64, y: f64) -> Node {
        Node::settlement(format!("k{name}"), name, Point::new(x, y), 0)
    }

    pub fn road(a: &str, b: &str, distance: f64) -> RoadRecord {
        RoadRecord::existing(format!("k{a}"), format!("k{b}"), distance, 100.0, 8.0)
    }

    /// Four nodes on a unit square, unit weights:
    ///
    /// ```text
    ///   D ─── C
    ///   │     │
    ///   A ─── B
    /// ```
    pub fn ring() -> (Graph, [NodeId; 4]) {
        let g = Graph::build(
            [node("A", 0.0, 0.0), node("B", 1.0, 0.0), node("C", 1.0, 1.0), node("D", 0.0, 1.0)],
            &[road("A", "B", 1.0), road("B", "C", 1.0), road("C", "D", 1.0), road("D", "A", 1.0)],
        )
        .unwrap();
        (g, [NodeId(0), NodeId(1), NodeId(2), NodeId(3)])
    }

    /// Small grid.
    ///
    /// ```text
    ///   n0 ─1─ n1 ─1─ n2
    ///   │              │
    ///   5              1
    ///   │              │
    ///   n3 ─────1───── n4
    /// ```
    ///
    /// Shortest n0→n4 is n0→n1→n2→n4 (3) rather than n0→n3→n4 (6).
    pub fn grid() -> (Graph, [NodeId; 5]) {
        let g = Graph::build(
            [
                node("n0", 0.0, 0.0),
                node("n1", 1.0, 0.0),
                node("n2", 2.0, 0.0),
                node("n3", 0.0, -1.0),
                node("n4", 2.0, -1.0),
            ],
            &[
                road("n0", "n1", 1.0),
                road("n1", "n2", 1.0),
                road("n2", "n4", 1.0),
                road("n0", "n3", 5.0),
                road("n3", "n4", 1.0),
            ],
        )
        .unwrap();
        (g, [NodeId(0), NodeId(1), NodeId(2), NodeId(3), NodeId(4)])
    }

    /// Two settlements joined by one 10 km road of capacity 1000, plus an
    /// isolated node.
    pub fn corridor() -> (Graph, [NodeId; 3]) {
        let g = Graph::build(
            [
                node("Maadi", 0.0, -5.0),
                node("Downtown", 0.0, 0.0),
                node("Island", 50.0, 50.0),
            ],
            &[RoadRecord::existing("kMaadi", "kDowntown", 10.0, 1000.0, 7.0)],
        )
        .unwrap();
        (g, [NodeId(0), NodeId(1), NodeId(2)])
    }
}

// ── Graph model ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod graph {
    use tp_core::{NodeId, Point};
    use crate::{Graph, GraphBuilder, NetworkError, Node, RoadRecord};
    use super::helpers::{grid, node, ring, road};

    #[test]
    fn empty_build() {
        let g = GraphBuilder::new().build();
        assert_eq!(g.node_count(), 0);
        assert_eq!(g.road_count(), 0);
        assert!(g.is_empty());
    }

    #[test]
    fn csr_degrees() {
        let (g, [n0, n1, n2, n3, n4]) = grid();
        assert_eq!(g.degree(n0), 2);
        assert_eq!(g.degree(n1), 2);
        assert_eq!(g.degree(n2), 2);
        assert_eq!(g.degree(n3), 2);
        assert_eq!(g.degree(n4), 2);
        // Every neighbour's road touches the node it was listed under.
        for (nbr, r) in g.neighbors(n0) {
            assert!(r.connects(n0, nbr));
        }
    }

    #[test]
    fn weight_lookup_is_symmetric() {
        let (g, [n0, _, _, n3, _]) = grid();
        assert_eq!(g.weight(n0, n3), Some(5.0));
        assert_eq!(g.weight(n3, n0), Some(5.0));
        assert_eq!(g.weight(n0, NodeId(4)), None);
    }

    #[test]
    fn path_weight_sums_consecutive_roads() {
        let (g, [n0, n1, n2, _, n4]) = grid();
        assert_eq!(g.path_weight(&[n0, n1, n2, n4]), Some(3.0));
        assert_eq!(g.path_weight(&[n0]), Some(0.0));
        assert_eq!(g.path_weight(&[n0, n4]), None);
    }

    #[test]
    fn dangling_road_rejected() {
        let err = Graph::build([node("A", 0.0, 0.0)], &[road("A", "Z", 1.0)]).unwrap_err();
        match err {
            NetworkError::InvalidEdgeReference { missing, .. } => assert_eq!(missing, "kZ"),
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn duplicate_key_rejected() {
        let mut b = GraphBuilder::new();
        b.add_node(node("A", 0.0, 0.0)).unwrap();
        let err = b.add_node(Node::settlement("kA", "Other", Point::new(1.0, 1.0), 0));
        assert!(matches!(err, Err(NetworkError::DuplicateNode(_))));
    }

    #[test]
    fn negative_distance_rejected() {
        let err = Graph::build(
            [node("A", 0.0, 0.0), node("B", 1.0, 0.0)],
            &[road("A", "B", -1.0)],
        );
        assert!(matches!(err, Err(NetworkError::InvalidRoad { .. })));
    }

    #[test]
    fn condition_out_of_range_rejected() {
        let err = Graph::build(
            [node("A", 0.0, 0.0), node("B", 1.0, 0.0)],
            &[RoadRecord::existing("kA", "kB", 1.0, 10.0, 11.0)],
        );
        assert!(matches!(err, Err(NetworkError::InvalidRoad { .. })));
    }

    #[test]
    fn self_loop_rejected() {
        let err = Graph::build([node("A", 0.0, 0.0)], &[road("A", "A", 1.0)]);
        assert!(matches!(err, Err(NetworkError::InvalidRoad { .. })));
    }

    #[test]
    fn weight_override_kept_separate_from_distance() {
        let g = Graph::build(
            [node("A", 0.0, 0.0), node("B", 1.0, 0.0)],
            &[road("A", "B", 2.0).with_weight(7.5)],
        )
        .unwrap();
        let (_, r) = g.roads().next().unwrap();
        assert_eq!(r.distance, 2.0);
        assert_eq!(r.weight, 7.5);
    }

    #[test]
    fn maintenance_cost_formula() {
        // (10 - 7) * 8.5 * 10 = 255
        let rec = RoadRecord::existing("1", "3", 8.5, 3000.0, 7.0);
        assert!((rec.cost(10.0) - 255.0).abs() < 1e-9);
        let pot = RoadRecord::potential("1", "4", 22.8, 4000.0, 450.0);
        assert_eq!(pot.cost(10.0), 450.0);
    }

    #[test]
    fn key_and_name_lookup() {
        let (g, [a, ..]) = ring();
        assert_eq!(g.node_id("kA").unwrap(), a);
        assert_eq!(g.node_by_name("A").unwrap(), a);
        assert!(matches!(g.node_id("missing"), Err(NetworkError::UnknownNode(_))));
        assert!(g.check(NodeId(99)).is_err());
    }

    #[test]
    fn facilities_listed_in_order() {
        let g = Graph::build(
            [
                node("A", 0.0, 0.0),
                Node::facility("F1", "Hospital", Point::new(1.0, 0.0), "Medical"),
                Node::facility("F2", "Station", Point::new(2.0, 0.0), "Fire"),
            ],
            &[],
        )
        .unwrap();
        assert_eq!(g.facilities(), vec![NodeId(1), NodeId(2)]);
        assert_eq!(g.node(NodeId(1)).population(), 0);
    }

    #[test]
    fn without_roads_leaves_original_untouched() {
        let (g, [n0, n1, ..]) = grid();
        let closed = g.without_roads(&[(n1, n0)]);
        assert_eq!(g.road_count(), 5);
        assert_eq!(closed.road_count(), 4);
        assert!(g.weight(n0, n1).is_some());
        assert!(closed.weight(n0, n1).is_none());
        assert_eq!(closed.node_count(), g.node_count());
    }

    #[test]
    fn road_name_with_dash_in_node_name() {
        let g = Graph::build(
            [node("Al-Rehab", 0.0, 0.0), node("New Cairo", 1.0, 0.0)],
            &[road("Al-Rehab", "New Cairo", 5.3)],
        )
        .unwrap();
        let (a, b) = g.resolve_road_name("Al-Rehab-New Cairo").unwrap();
        assert_eq!(g.name(a), "Al-Rehab");
        assert_eq!(g.name(b), "New Cairo");
        assert!(matches!(
            g.resolve_road_name("Nowhere-New Cairo"),
            Err(NetworkError::UnknownRoadName(_))
        ));
    }
}

// ── A* ────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod astar {
    use tp_core::{NodeId, Point};
    use crate::{find_nearest_facility, find_path, Graph, NetworkError, Node, RoadRecord};
    use super::helpers::{corridor, grid, node, ring};

    #[test]
    fn ring_opposite_corner() {
        let (g, [a, _, c, _]) = ring();
        let path = find_path(&g, a, c, false).unwrap();
        assert_eq!(path.nodes.len(), 3);
        assert_eq!(path.start(), Some(a));
        assert_eq!(path.goal(), Some(c));
        assert_eq!(path.cost, 2.0);
    }

    #[test]
    fn same_node_is_single_node_path() {
        let (g, [a, ..]) = ring();
        let path = find_path(&g, a, a, false).unwrap();
        assert_eq!(path.nodes, vec![a]);
        assert_eq!(path.cost, 0.0);
        assert_eq!(path.edge_count(), 0);
    }

    #[test]
    fn grid_prefers_cheaper_detour() {
        let (g, [n0, n1, n2, _, n4]) = grid();
        let path = find_path(&g, n0, n4, false).unwrap();
        assert_eq!(path.nodes, vec![n0, n1, n2, n4]);
        assert_eq!(path.cost, 3.0);
    }

    #[test]
    fn disconnected_returns_empty() {
        let (g, [maadi, _, island]) = corridor();
        let path = find_path(&g, maadi, island, false).unwrap();
        assert!(path.is_empty());
        assert_eq!(path.start(), None);
    }

    #[test]
    fn priority_halves_accumulated_cost() {
        let (g, [a, _, c, _]) = ring();
        let normal = find_path(&g, a, c, false).unwrap();
        let urgent = find_path(&g, a, c, true).unwrap();
        assert_eq!(urgent.cost, 1.0);
        assert!(urgent.cost < normal.cost);
        // Same graph instance, weights unchanged.
        assert_eq!(g.path_weight(&urgent.nodes), Some(2.0));
    }

    #[test]
    fn unknown_node_fails_fast() {
        let (g, [a, ..]) = ring();
        assert!(matches!(
            find_path(&g, a, NodeId(42), false),
            Err(NetworkError::UnknownNode(_))
        ));
    }

    fn emergency_graph() -> Graph {
        // Downtown ─2─ Zamalek ─3─ Fire Station
        //    └────────10──────── Hospital
        Graph::build(
            [
                node("Downtown", 0.0, 0.0),
                node("Zamalek", 2.0, 2.0),
                Node::facility("F1", "Hospital", Point::new(6.0, 3.0), "Medical"),
                Node::facility("F2", "Fire Station", Point::new(1.0, -4.0), "Fire"),
            ],
            &[
                RoadRecord::existing("kDowntown", "kZamalek", 2.0, 50.0, 8.0),
                RoadRecord::existing("kZamalek", "F2", 3.0, 40.0, 8.0),
                RoadRecord::existing("kDowntown", "F1", 10.0, 40.0, 8.0),
            ],
        )
        .unwrap()
    }

    #[test]
    fn nearest_facility_by_total_weight() {
        let g = emergency_graph();
        let start = g.node_by_name("Downtown").unwrap();
        let found = find_nearest_facility(&g, start, &g.facilities(), false)
            .unwrap()
            .unwrap();
        assert_eq!(g.name(found.facility), "Fire Station");
        assert_eq!(found.weight, 5.0);
        assert_eq!(found.path.goal(), Some(found.facility));
    }

    #[test]
    fn nearest_facility_same_choice_in_priority_mode() {
        let g = emergency_graph();
        let start = g.node_by_name("Downtown").unwrap();
        let normal = find_nearest_facility(&g, start, &g.facilities(), false).unwrap().unwrap();
        let urgent = find_nearest_facility(&g, start, &g.facilities(), true).unwrap().unwrap();
        assert_eq!(normal.facility, urgent.facility);
        assert_eq!(urgent.path.cost, normal.path.cost * 0.5);
    }

    #[test]
    fn nearest_facility_none_when_unreachable() {
        let (g, [maadi, _, island]) = corridor();
        assert!(find_nearest_facility(&g, maadi, &[island], false).unwrap().is_none());
        assert!(find_nearest_facility(&g, maadi, &[], false).unwrap().is_none());
    }
}

// ── Congestion Dijkstra ───────────────────────────────────────────────────────

#[cfg(test)]
mod congestion {
    use tp_core::{CongestionConfig, RoadNameLookup, TimeOfDay};
    use crate::{
        congestion_factor, recommend_alternate_route, shortest_time, CongestionModel,
        NetworkError, TrafficSample, TrafficTable,
    };
    use super::helpers::{corridor, grid};

    fn maadi_downtown(volumes: [f64; 4]) -> TrafficTable {
        TrafficTable::new([TrafficSample::new("Maadi-Downtown", volumes)]).unwrap()
    }

    #[test]
    fn factor_bounds() {
        assert_eq!(congestion_factor(None, 1000.0), 1.0);
        assert_eq!(congestion_factor(Some(1500.0), 1000.0), 1.5);
        assert_eq!(congestion_factor(Some(10.0), 1000.0), 0.5);
        assert_eq!(congestion_factor(Some(9000.0), 1000.0), 2.0);
        assert_eq!(congestion_factor(Some(1.0), 0.0), 2.0);
    }

    #[test]
    fn morning_slower_than_night() {
        let (g, [maadi, downtown, _]) = corridor();
        let traffic = maadi_downtown([1500.0, 900.0, 1200.0, 300.0]);
        let morning = shortest_time(&g, maadi, downtown, TimeOfDay::Morning, &traffic).unwrap();
        let night = shortest_time(&g, maadi, downtown, TimeOfDay::Night, &traffic).unwrap();
        assert_eq!(morning.total_time, 15.0);
        assert_eq!(night.total_time, 5.0);
        assert!(morning.total_time >= night.total_time);
        assert_eq!(morning.path, vec!["Maadi".to_owned(), "Downtown".to_owned()]);
    }

    #[test]
    fn lookup_is_direction_sensitive_by_default() {
        let (g, [maadi, downtown, _]) = corridor();
        let traffic = maadi_downtown([1500.0; 4]);
        // Reverse traversal builds "Downtown-Maadi", which has no sample.
        let back = shortest_time(&g, downtown, maadi, TimeOfDay::Morning, &traffic).unwrap();
        assert_eq!(back.total_time, 10.0);
    }

    #[test]
    fn either_direction_lookup_is_opt_in() {
        let (g, [maadi, downtown, _]) = corridor();
        let traffic = maadi_downtown([1500.0; 4]);
        let model = CongestionModel::new(CongestionConfig {
            lookup: RoadNameLookup::EitherDirection,
            ..CongestionConfig::default()
        });
        let back = model
            .shortest_time(&g, downtown, maadi, TimeOfDay::Morning, &traffic)
            .unwrap();
        assert_eq!(back.total_time, 15.0);
    }

    #[test]
    fn unreachable_is_infinite_and_empty() {
        let (g, [maadi, _, island]) = corridor();
        let r = shortest_time(&g, maadi, island, TimeOfDay::Morning, &TrafficTable::empty()).unwrap();
        assert!(r.total_time.is_infinite());
        assert!(r.path.is_empty());
        assert!(!r.is_reachable());
    }

    #[test]
    fn same_node_costs_nothing() {
        let (g, [maadi, ..]) = corridor();
        let r = shortest_time(&g, maadi, maadi, TimeOfDay::Night, &TrafficTable::empty()).unwrap();
        assert_eq!(r.total_time, 0.0);
        assert_eq!(r.path, vec!["Maadi".to_owned()]);
    }

    #[test]
    fn alternate_route_avoids_closure() {
        let (g, [n0, n1, n2, n3, n4]) = grid();
        let traffic = TrafficTable::empty();
        let open = shortest_time(&g, n0, n4, TimeOfDay::Morning, &traffic).unwrap();
        assert_eq!(open.nodes, vec![n0, n1, n2, n4]);

        let detour =
            recommend_alternate_route(&g, n0, n4, &[(n1, n2)], TimeOfDay::Morning, &traffic).unwrap();
        assert_eq!(detour.nodes, vec![n0, n3, n4]);
        assert_eq!(detour.total_time, 6.0);
        // The caller's graph still has the closed road.
        assert!(g.weight(n1, n2).is_some());
    }

    #[test]
    fn duplicate_samples_rejected() {
        let err = TrafficTable::new([
            TrafficSample::new("A-B", [1.0; 4]),
            TrafficSample::new("A-B", [2.0; 4]),
        ]);
        assert!(matches!(err, Err(NetworkError::DuplicateTrafficSample(_))));
    }

    #[test]
    fn negative_volume_rejected() {
        let err = TrafficTable::new([TrafficSample::new("A-B", [1.0, -1.0, 0.0, 0.0])]);
        assert!(matches!(err, Err(NetworkError::InvalidTrafficSample { .. })));
    }
}

// ── Route cache ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod cache {
    use std::sync::Arc;

    use tp_core::{CacheConfig, SnapshotKey, TimeOfDay};
    use crate::{shortest_time_cached, RouteCache, TrafficSample, TrafficTable};
    use super::helpers::corridor;

    fn table(morning: f64) -> TrafficTable {
        TrafficTable::new([TrafficSample::new("Maadi-Downtown", [morning, 0.0, 0.0, 0.0])]).unwrap()
    }

    #[test]
    fn second_query_hits() {
        let (g, [maadi, downtown, _]) = corridor();
        let cache = RouteCache::new();
        let traffic = table(1500.0);
        let first = shortest_time_cached(&cache, &g, maadi, downtown, TimeOfDay::Morning, &traffic).unwrap();
        let second = shortest_time_cached(&cache, &g, maadi, downtown, TimeOfDay::Morning, &traffic).unwrap();
        assert_eq!(first, second);
        let stats = cache.stats();
        assert_eq!((stats.hits, stats.misses, stats.entries), (1, 1, 1));
    }

    #[test]
    fn time_of_day_is_part_of_key() {
        let (g, [maadi, downtown, _]) = corridor();
        let cache = RouteCache::new();
        let traffic = table(1500.0);
        shortest_time_cached(&cache, &g, maadi, downtown, TimeOfDay::Morning, &traffic).unwrap();
        shortest_time_cached(&cache, &g, maadi, downtown, TimeOfDay::Night, &traffic).unwrap();
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn contents_key_sees_volume_change() {
        let (g, [maadi, downtown, _]) = corridor();
        let cache = RouteCache::new();
        let before = shortest_time_cached(&cache, &g, maadi, downtown, TimeOfDay::Morning, &table(1500.0)).unwrap();
        let after = shortest_time_cached(&cache, &g, maadi, downtown, TimeOfDay::Morning, &table(2000.0)).unwrap();
        assert_eq!(before.total_time, 15.0);
        assert_eq!(after.total_time, 20.0);
    }

    #[test]
    fn road_names_key_returns_stale_route() {
        let (g, [maadi, downtown, _]) = corridor();
        let cache = RouteCache::with_config(&CacheConfig { key: SnapshotKey::RoadNames });
        let before = shortest_time_cached(&cache, &g, maadi, downtown, TimeOfDay::Morning, &table(1500.0)).unwrap();
        let after = shortest_time_cached(&cache, &g, maadi, downtown, TimeOfDay::Morning, &table(2000.0)).unwrap();
        assert_eq!(before.total_time, 15.0);
        assert_eq!(after.total_time, 15.0, "volume-only change is invisible to a name-keyed cache");
    }

    #[test]
    fn snapshot_ignores_insertion_order() {
        let a = TrafficTable::new([
            TrafficSample::new("A-B", [1.0; 4]),
            TrafficSample::new("B-C", [2.0; 4]),
        ])
        .unwrap();
        let b = TrafficTable::new([
            TrafficSample::new("B-C", [2.0; 4]),
            TrafficSample::new("A-B", [1.0; 4]),
        ])
        .unwrap();
        assert_eq!(a.snapshot(SnapshotKey::Contents), b.snapshot(SnapshotKey::Contents));
        assert_eq!(a.snapshot(SnapshotKey::RoadNames), b.snapshot(SnapshotKey::RoadNames));
    }

    #[test]
    fn snapshot_keeps_every_volume() {
        let a = TrafficTable::new([TrafficSample::new("A-B", [1.0, 2.0, 3.0, 4.0])]).unwrap();
        let b = TrafficTable::new([TrafficSample::new("A-B", [1.0, 2.0, 3.0, 4.0 + 1e-9])]).unwrap();
        assert_ne!(a.snapshot(SnapshotKey::Contents), b.snapshot(SnapshotKey::Contents));
        assert_eq!(a.snapshot(SnapshotKey::RoadNames), b.snapshot(SnapshotKey::RoadNames));
        assert_eq!(a.snapshot(SnapshotKey::Contents).len(), 1);
        assert!(TrafficTable::empty().snapshot(SnapshotKey::Contents).is_empty());
    }

    #[test]
    fn clear_empties_cache() {
        let (g, [maadi, downtown, _]) = corridor();
        let cache = RouteCache::new();
        shortest_time_cached(&cache, &g, maadi, downtown, TimeOfDay::Morning, &table(1.0)).unwrap();
        assert!(!cache.is_empty());
        cache.clear();
        assert!(cache.is_empty());
    }

    #[test]
    fn shared_across_threads() {
        let (g, [maadi, downtown, _]) = corridor();
        let g = Arc::new(g);
        let cache = Arc::new(RouteCache::new());
        let traffic = Arc::new(table(1500.0));
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let (g, cache, traffic) = (g.clone(), cache.clone(), traffic.clone());
                std::thread::spawn(move || {
                    shortest_time_cached(&cache, &g, maadi, downtown, TimeOfDay::Morning, &traffic)
                        .unwrap()
                        .total_time
                })
            })
            .collect();
        for h in handles {
            assert_eq!(h.join().unwrap(), 15.0);
        }
        assert_eq!(cache.len(), 1);
    }
}

// ── Spanning network ──────────────────────────────────────────────────────────

#[cfg(test)]
mod mst {
    use tp_core::{NodeId, Point};
    use crate::mst::DisjointSet;
    use crate::{
        edge_pool, minimum_spanning_network, CandidateEdge, Graph, NetworkError, Node, RoadRecord,
    };
    use super::helpers::ring;

    fn edge(a: u32, b: u32, cost: f64) -> CandidateEdge {
        CandidateEdge { from: NodeId(a), to: NodeId(b), cost, potential: false }
    }

    #[test]
    fn disjoint_set_union_find() {
        let mut s = DisjointSet::new(4);
        assert!(!s.connected(NodeId(0), NodeId(1)));
        assert!(s.union(NodeId(0), NodeId(1)));
        assert!(s.union(NodeId(2), NodeId(3)));
        assert!(!s.union(NodeId(1), NodeId(0)));
        assert!(s.union(NodeId(1), NodeId(3)));
        assert!(s.connected(NodeId(0), NodeId(2)));
    }

    #[test]
    fn ring_tree_has_three_unit_edges() {
        let (g, _) = ring();
        let pool = vec![edge(0, 1, 1.0), edge(1, 2, 1.0), edge(2, 3, 1.0), edge(3, 0, 1.0)];
        let tree = minimum_spanning_network(&g, &pool, &[]).unwrap();
        assert_eq!(tree.edges.len(), 3);
        assert_eq!(tree.total_cost, 3.0);
    }

    #[test]
    fn mandatory_edge_forced_in() {
        let (g, [a, _, _, d]) = ring();
        let pool = vec![edge(0, 1, 1.0), edge(1, 2, 1.0), edge(2, 3, 1.0), edge(3, 0, 5.0)];
        let tree = minimum_spanning_network(&g, &pool, &[(a, d)]).unwrap();
        assert_eq!(tree.edges.len(), 3);
        assert!(tree.contains(d, a));
        assert!(tree.edges[0].mandatory);
        assert_eq!(tree.total_cost, 7.0);
    }

    #[test]
    fn missing_mandatory_is_reported_not_fatal() {
        let (g, [a, _, c, _]) = ring();
        let pool = vec![edge(0, 1, 1.0), edge(1, 2, 1.0), edge(2, 3, 1.0), edge(3, 0, 1.0)];
        let tree = minimum_spanning_network(&g, &pool, &[(a, c)]).unwrap();
        assert_eq!(tree.missing_mandatory, vec![(a, c)]);
        assert_eq!(tree.edges.len(), 3);
    }

    #[test]
    fn disconnected_pool_yields_forest() {
        let (g, _) = ring();
        let pool = vec![edge(0, 1, 1.0), edge(2, 3, 1.0)];
        let tree = minimum_spanning_network(&g, &pool, &[]).unwrap();
        assert_eq!(tree.edges.len(), 2);
    }

    #[test]
    fn pool_priced_by_status() {
        let g = Graph::build(
            [
                Node::settlement("1", "Maadi", Point::new(0.0, 0.0), 250_000),
                Node::settlement("4", "New Cairo", Point::new(1.0, 0.0), 300_000),
                Node::facility("F10", "Maadi Military Hospital", Point::new(0.0, -1.0), "Medical"),
            ],
            &[],
        )
        .unwrap();
        let records = [
            RoadRecord::existing("F10", "1", 2.0, 1000.0, 8.0), // (10-8)*2*10 = 40
            RoadRecord::potential("1", "4", 22.8, 4000.0, 450.0),
        ];
        let pool = edge_pool(&g, &records, 10.0).unwrap();
        assert!((pool[0].cost - 40.0).abs() < 1e-9);
        assert!(pool[1].potential);

        let tree = minimum_spanning_network(&g, &pool, &[]).unwrap();
        assert_eq!(tree.edges.len(), 2);
        assert_eq!(tree.potential_count(), 1);
        assert_eq!(tree.construction_cost(), 450.0);
    }

    #[test]
    fn pool_with_unknown_key_rejected() {
        let (g, _) = ring();
        let err = edge_pool(&g, &[RoadRecord::existing("kA", "kQ", 1.0, 1.0, 5.0)], 10.0);
        assert!(matches!(err, Err(NetworkError::InvalidEdgeReference { .. })));
    }
}

// ── Properties ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod properties {
    use std::collections::BTreeMap;

    use proptest::prelude::*;

    use tp_core::{NodeId, Point, TimeOfDay};
    use crate::{
        find_path, minimum_spanning_network, shortest_time, CandidateEdge, Graph, Node,
        RoadRecord, TrafficSample, TrafficTable,
    };

    /// `n` nodes joined by a chain (so the graph is connected) plus extra
    /// random roads.
    fn arb_edges() -> impl Strategy<Value = (usize, Vec<(usize, usize, f64)>)> {
        (2usize..8)
            .prop_flat_map(|n| {
                let chain = proptest::collection::vec(1.0f64..10.0, n - 1);
                let extra = proptest::collection::vec((0..n, 0..n, 1.0f64..10.0), 0..10);
                (Just(n), chain, extra)
            })
            .prop_map(|(n, chain, extra)| {
                let mut edges: Vec<_> = chain
                    .into_iter()
                    .enumerate()
                    .map(|(i, w)| (i, i + 1, w))
                    .collect();
                edges.extend(extra.into_iter().filter(|(a, b, _)| a != b));
                (n, edges)
            })
    }

    /// Build the graph plus one isolated extra node (index `n`).
    ///
    /// Nodes sit close together so the straight-line heuristic stays
    /// consistent even under the priority discount (weights are ≥ 1).
    fn build(n: usize, edges: &[(usize, usize, f64)]) -> Graph {
        let nodes = (0..=n).map(|i| {
            Node::settlement(i.to_string(), format!("N{i}"), Point::new(i as f64 * 0.05, 0.0), 0)
        });
        let roads: Vec<RoadRecord> = edges
            .iter()
            .map(|&(a, b, w)| RoadRecord::existing(a.to_string(), b.to_string(), w, 100.0, 5.0))
            .collect();
        Graph::build(nodes, &roads).unwrap()
    }

    proptest! {
        #[test]
        fn path_endpoints((n, edges) in arb_edges(), goal_pick in 0usize..64) {
            let g = build(n, &edges);
            let goal = NodeId((goal_pick % n) as u32);
            let path = find_path(&g, NodeId(0), goal, false).unwrap();
            prop_assert_eq!(path.start(), Some(NodeId(0)));
            prop_assert_eq!(path.goal(), Some(goal));

            let isolated = NodeId(n as u32);
            prop_assert!(find_path(&g, NodeId(0), isolated, false).unwrap().is_empty());
        }

        #[test]
        fn priority_discount_on_same_path((n, edges) in arb_edges()) {
            let g = build(n, &edges);
            let goal = NodeId((n - 1) as u32);
            let urgent = find_path(&g, NodeId(0), goal, true).unwrap();
            let full = g.path_weight(&urgent.nodes).unwrap();
            prop_assert!((urgent.cost - full * 0.5).abs() < 1e-9);
            prop_assert!(urgent.cost < full);
        }

        #[test]
        fn spanning_tree_size_and_mandatory((n, edges) in arb_edges(), pick in 0usize..64) {
            let g = build(n, &edges);
            let mut pool: Vec<CandidateEdge> = edges
                .iter()
                .map(|&(a, b, w)| CandidateEdge {
                    from: NodeId(a as u32),
                    to: NodeId(b as u32),
                    cost: w,
                    potential: false,
                })
                .collect();
            // Connect the isolated node too.
            pool.push(CandidateEdge { from: NodeId(0), to: NodeId(n as u32), cost: 50.0, potential: true });

            let forced = &pool[pick % pool.len()];
            let mandatory = [(forced.to, forced.from)];
            let tree = minimum_spanning_network(&g, &pool, &mandatory).unwrap();
            prop_assert_eq!(tree.edges.len(), g.node_count() - 1);
            prop_assert!(tree.contains(forced.from, forced.to));
        }

        #[test]
        fn congestion_is_monotonic(
            (n, edges) in arb_edges(),
            volumes in proptest::collection::vec(0.0f64..300.0, 64),
            boost in 1.0f64..5.0,
        ) {
            let g = build(n, &edges);
            // One sample per traversal name, both orientations.
            let mut samples = BTreeMap::new();
            for (i, &(a, b, _)) in edges.iter().enumerate() {
                let v = volumes[i % volumes.len()];
                samples.entry(format!("N{a}-N{b}")).or_insert(v);
                samples.entry(format!("N{b}-N{a}")).or_insert(v);
            }
            let mut traffic = TrafficTable::new(
                samples.iter().map(|(k, &v)| TrafficSample::new(k.clone(), [v; 4])),
            )
            .unwrap();

            let goal = NodeId((n - 1) as u32);
            let before = shortest_time(&g, NodeId(0), goal, TimeOfDay::Morning, &traffic).unwrap();
            prop_assume!(before.nodes.len() >= 2);

            let first = format!("{}-{}", before.path[0], before.path[1]);
            let old = traffic.get(&first).unwrap().volumes;
            traffic
                .upsert(TrafficSample::new(first, old.map(|v| v * boost + 1.0)))
                .unwrap();
            let after = shortest_time(&g, NodeId(0), goal, TimeOfDay::Morning, &traffic).unwrap();
            prop_assert!(after.total_time >= before.total_time - 1e-9);
        }
    }
}
