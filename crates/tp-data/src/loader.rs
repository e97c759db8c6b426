//! CSV loaders for the planning tables.
//!
//! Every table has a `load_*_reader` that accepts any `Read` source and a
//! `load_*_csv` wrapper that opens a file.  Fields are trimmed; a header row
//! is required.
//!
//! # Formats
//!
//! ```csv
//! # nodes.csv (kind = settlement | facility)
//! id,name,kind,class,x,y,population
//! 1,Maadi,settlement,Residential,31.25,29.96,250000
//! F9,Qasr El Aini Hospital,facility,Medical,31.23,30.03,
//!
//! # roads.csv (condition 0–10, higher is better)
//! from,to,distance,capacity,condition
//! 1,3,8.5,3000,7
//!
//! # potential_roads.csv
//! from,to,distance,capacity,cost
//! 1,4,22.8,4000,450
//!
//! # traffic.csv (road = "{from name}-{to name}")
//! road,morning,afternoon,evening,night
//! Maadi-Downtown Cairo,2800,1500,2600,800
//!
//! # transit_routes.csv (stops separated by ';')
//! route_id,mode,stops,frequency,capacity
//! 1,Metro,Maadi;Downtown Cairo;Zamalek,10,500
//! ```
//!
//! `class` is the facility class and is ignored for settlements.  An empty
//! `population` reads as zero.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use log::warn;
use serde::Deserialize;
use serde::de::DeserializeOwned;

use tp_core::Point;
use tp_network::{Node, RoadRecord, TrafficSample, TrafficTable};
use tp_transit::TransitRoute;

use crate::{DataError, DataResult};

// ── CSV records ───────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct NodeRow {
    id:         String,
    name:       String,
    kind:       String,
    #[serde(default)]
    class:      String,
    x:          f64,
    y:          f64,
    #[serde(default)]
    population: Option<u64>,
}

#[derive(Deserialize)]
struct RoadRow {
    from:      String,
    to:        String,
    distance:  f64,
    capacity:  f64,
    condition: f64,
}

#[derive(Deserialize)]
struct PotentialRoadRow {
    from:     String,
    to:       String,
    distance: f64,
    capacity: f64,
    cost:     f64,
}

#[derive(Deserialize)]
struct TrafficRow {
    road:      String,
    morning:   f64,
    afternoon: f64,
    evening:   f64,
    night:     f64,
}

#[derive(Deserialize)]
struct TransitRow {
    route_id:  String,
    mode:      String,
    stops:     String,
    frequency: u32,
    capacity:  u32,
}

/// Deserialize every row of a headed, trimmed CSV source.
pub(crate) fn read_rows<T: DeserializeOwned, R: Read>(reader: R) -> DataResult<Vec<T>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut rows = Vec::new();
    for result in csv_reader.deserialize::<T>() {
        rows.push(result?);
    }
    Ok(rows)
}

pub(crate) fn open(path: &Path) -> DataResult<File> {
    File::open(path).map_err(DataError::Io)
}

// ── Nodes ─────────────────────────────────────────────────────────────────────

pub fn load_nodes_reader<R: Read>(reader: R) -> DataResult<Vec<Node>> {
    read_rows::<NodeRow, _>(reader)?
        .into_iter()
        .map(|row| {
            let pos = Point::new(row.x, row.y);
            match row.kind.to_ascii_lowercase().as_str() {
                "settlement" | "neighborhood" => Ok(Node::settlement(
                    row.id,
                    row.name,
                    pos,
                    row.population.unwrap_or(0),
                )),
                "facility" => {
                    if row.population.is_some_and(|p| p > 0) {
                        warn!("facility {} has a population; ignored", row.id);
                    }
                    Ok(Node::facility(row.id, row.name, pos, row.class))
                }
                other => Err(DataError::Parse(format!(
                    "node {}: unknown kind {other:?}, expected \"settlement\" or \"facility\"",
                    row.id
                ))),
            }
        })
        .collect()
}

pub fn load_nodes_csv(path: &Path) -> DataResult<Vec<Node>> {
    load_nodes_reader(open(path)?)
}

// ── Roads ─────────────────────────────────────────────────────────────────────

pub fn load_roads_reader<R: Read>(reader: R) -> DataResult<Vec<RoadRecord>> {
    Ok(read_rows::<RoadRow, _>(reader)?
        .into_iter()
        .map(|r| RoadRecord::existing(r.from, r.to, r.distance, r.capacity, r.condition))
        .collect())
}

pub fn load_roads_csv(path: &Path) -> DataResult<Vec<RoadRecord>> {
    load_roads_reader(open(path)?)
}

pub fn load_potential_roads_reader<R: Read>(reader: R) -> DataResult<Vec<RoadRecord>> {
    Ok(read_rows::<PotentialRoadRow, _>(reader)?
        .into_iter()
        .map(|r| RoadRecord::potential(r.from, r.to, r.distance, r.capacity, r.cost))
        .collect())
}

pub fn load_potential_roads_csv(path: &Path) -> DataResult<Vec<RoadRecord>> {
    load_potential_roads_reader(open(path)?)
}

// ── Traffic ───────────────────────────────────────────────────────────────────

/// Build a [`TrafficTable`]; a road name appearing twice is an error.
pub fn load_traffic_reader<R: Read>(reader: R) -> DataResult<TrafficTable> {
    let samples = read_rows::<TrafficRow, _>(reader)?
        .into_iter()
        .map(|r| TrafficSample::new(r.road, [r.morning, r.afternoon, r.evening, r.night]));
    Ok(TrafficTable::new(samples)?)
}

pub fn load_traffic_csv(path: &Path) -> DataResult<TrafficTable> {
    load_traffic_reader(open(path)?)
}

// ── Transit routes ────────────────────────────────────────────────────────────

/// Load transit routes.  Empty entries in the `;`-separated stop list are
/// dropped with a warning; a route left with no stops, or with a zero
/// frequency, is rejected.
pub fn load_transit_routes_reader<R: Read>(reader: R) -> DataResult<Vec<TransitRoute>> {
    read_rows::<TransitRow, _>(reader)?
        .into_iter()
        .map(|row| {
            let raw: Vec<&str> = row.stops.split(';').map(str::trim).collect();
            let stops: Vec<&str> = raw.iter().copied().filter(|s| !s.is_empty()).collect();
            if stops.len() != raw.len() {
                warn!("transit route {}: dropped {} empty stop(s)", row.route_id, raw.len() - stops.len());
            }
            let route = TransitRoute::new(row.route_id.clone(), row.mode, stops, row.frequency, row.capacity);
            route.validate()?;
            Ok(route)
        })
        .collect()
}

pub fn load_transit_routes_csv(path: &Path) -> DataResult<Vec<TransitRoute>> {
    load_transit_routes_reader(open(path)?)
}
