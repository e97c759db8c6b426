//! Directory loader bundling every table of a planning dataset.
//!
//! | File                   | Required | Field                 |
//! |------------------------|----------|-----------------------|
//! | `nodes.csv`            | yes      | `nodes`               |
//! | `roads.csv`            | yes      | `roads`               |
//! | `potential_roads.csv`  | no       | `potential`           |
//! | `traffic.csv`          | no       | `traffic`             |
//! | `transit_routes.csv`   | no       | `transit`             |
//! | `emergency_nodes.csv`  | no\*     | `emergency.nodes`     |
//! | `emergency_roads.csv`  | no\*     | `emergency.roads`     |
//!
//! \* The emergency network is loaded only when both of its files exist.

use std::path::Path;

use log::{debug, warn};

use tp_network::{edge_pool, CandidateEdge, Graph, Node, RoadRecord, TrafficTable};
use tp_transit::TransitRoute;

use crate::emergency::load_emergency_roads_csv;
use crate::loader::{
    load_nodes_csv, load_potential_roads_csv, load_roads_csv, load_traffic_csv,
    load_transit_routes_csv,
};
use crate::DataResult;

pub const NODES_FILE:           &str = "nodes.csv";
pub const ROADS_FILE:           &str = "roads.csv";
pub const POTENTIAL_ROADS_FILE: &str = "potential_roads.csv";
pub const TRAFFIC_FILE:         &str = "traffic.csv";
pub const TRANSIT_ROUTES_FILE:  &str = "transit_routes.csv";
pub const EMERGENCY_NODES_FILE: &str = "emergency_nodes.csv";
pub const EMERGENCY_ROADS_FILE: &str = "emergency_roads.csv";

/// The separate node set and weighted roads used for emergency dispatch.
#[derive(Clone, Debug, Default)]
pub struct EmergencyNetwork {
    pub nodes: Vec<Node>,
    pub roads: Vec<RoadRecord>,
}

impl EmergencyNetwork {
    pub fn graph(&self) -> DataResult<Graph> {
        Ok(Graph::build(self.nodes.iter().cloned(), &self.roads)?)
    }
}

/// Every input table of one planning scenario.
#[derive(Clone, Debug, Default)]
pub struct Dataset {
    pub nodes:     Vec<Node>,
    pub roads:     Vec<RoadRecord>,
    pub potential: Vec<RoadRecord>,
    pub traffic:   TrafficTable,
    pub transit:   Vec<TransitRoute>,
    pub emergency: Option<EmergencyNetwork>,
}

impl Dataset {
    /// Graph over the existing roads only.
    pub fn graph(&self) -> DataResult<Graph> {
        Ok(Graph::build(self.nodes.iter().cloned(), &self.roads)?)
    }

    /// Existing and potential roads priced into one spanning-tree pool.
    pub fn edge_pool(&self, graph: &Graph, cost_factor: f64) -> DataResult<Vec<CandidateEdge>> {
        let records: Vec<RoadRecord> = self.roads.iter().chain(&self.potential).cloned().collect();
        Ok(edge_pool(graph, &records, cost_factor)?)
    }

    /// `None` when the dataset has no emergency network.
    pub fn emergency_graph(&self) -> DataResult<Option<Graph>> {
        self.emergency.as_ref().map(EmergencyNetwork::graph).transpose()
    }

    /// Log traffic samples that name no road of `graph` and transit stops
    /// that are not nodes of `graph`.  Returns the number of problems found.
    pub fn report_dangling(&self, graph: &Graph) -> usize {
        let mut problems = 0;
        for name in self.traffic.road_names() {
            let known = graph
                .resolve_road_name(name)
                .is_ok_and(|(a, b)| graph.road_between(a, b).is_some());
            if !known {
                warn!("traffic sample {name:?} does not match any road");
                problems += 1;
            }
        }
        for route in &self.transit {
            for stop in route.distinct_stops() {
                if graph.node_by_name(stop).is_err() {
                    warn!("transit route {}: stop {stop:?} is not a network node", route.route_id);
                    problems += 1;
                }
            }
        }
        problems
    }
}

/// Load a dataset from `dir` using the fixed file names above.
pub fn load_dataset(dir: &Path) -> DataResult<Dataset> {
    let optional = |file: &str| {
        let path = dir.join(file);
        if path.is_file() {
            Some(path)
        } else {
            debug!("{}: not present, skipped", path.display());
            None
        }
    };

    let mut dataset = Dataset {
        nodes: load_nodes_csv(&dir.join(NODES_FILE))?,
        roads: load_roads_csv(&dir.join(ROADS_FILE))?,
        ..Dataset::default()
    };
    if let Some(path) = optional(POTENTIAL_ROADS_FILE) {
        dataset.potential = load_potential_roads_csv(&path)?;
    }
    if let Some(path) = optional(TRAFFIC_FILE) {
        dataset.traffic = load_traffic_csv(&path)?;
    }
    if let Some(path) = optional(TRANSIT_ROUTES_FILE) {
        dataset.transit = load_transit_routes_csv(&path)?;
    }
    if let (Some(nodes), Some(roads)) = (optional(EMERGENCY_NODES_FILE), optional(EMERGENCY_ROADS_FILE)) {
        dataset.emergency = Some(EmergencyNetwork {
            nodes: load_nodes_csv(&nodes)?,
            roads: load_emergency_roads_csv(&roads)?,
        });
    }

    debug!(
        "{}: {} nodes, {} roads, {} potential, {} traffic samples, {} transit routes",
        dir.display(),
        dataset.nodes.len(),
        dataset.roads.len(),
        dataset.potential.len(),
        dataset.traffic.len(),
        dataset.transit.len(),
    );

    let graph = dataset.graph()?;
    dataset.report_dangling(&graph);
    Ok(dataset)
}
