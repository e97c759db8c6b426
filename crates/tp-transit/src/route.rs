//! Transit routes, station-to-station legs, and the inputs both DPs share.
//!
//! Stations are identified by display name, the same vocabulary the road
//! graph and traffic table use.  A route stop that names no station is
//! allowed; it simply contributes no population and no leg.

use rustc_hash::{FxHashMap, FxHashSet};

use tp_core::TimeOfDay;
use tp_network::{CongestionModel, Graph, TrafficTable};

use crate::{TransitError, TransitResult};

/// Resident population per station name.
pub type Populations = FxHashMap<String, u64>;

// ── TransitRoute ──────────────────────────────────────────────────────────────

/// A fixed-line service such as a metro line or bus route.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TransitRoute {
    pub route_id:  String,
    /// Free-text mode label (`"Metro"`, `"Bus"`, …).
    pub mode:      String,
    /// Stop names in service order.
    pub stops:     Vec<String>,
    /// Minutes between departures.  Also the number of slots one vehicle
    /// assignment occupies in the coverage DP.
    pub frequency: u32,
    /// Passengers per vehicle.
    pub capacity:  u32,
}

impl TransitRoute {
    pub fn new<S: Into<String>>(
        route_id:  impl Into<String>,
        mode:      impl Into<String>,
        stops:     impl IntoIterator<Item = S>,
        frequency: u32,
        capacity:  u32,
    ) -> Self {
        Self {
            route_id: route_id.into(),
            mode: mode.into(),
            stops: stops.into_iter().map(Into::into).collect(),
            frequency,
            capacity,
        }
    }

    /// Reject routes the schedulers cannot work with.
    pub fn validate(&self) -> TransitResult<()> {
        let invalid = |reason: &str| TransitError::InvalidRoute {
            route:  self.route_id.clone(),
            reason: reason.to_owned(),
        };
        if self.frequency == 0 {
            return Err(invalid("frequency must be at least one minute"));
        }
        if self.stops.is_empty() {
            return Err(invalid("a route needs at least one stop"));
        }
        Ok(())
    }

    /// `"Route M1 (Metro)"`.
    pub fn label(&self) -> String {
        format!("Route {} ({})", self.route_id, self.mode)
    }

    pub fn serves(&self, station: &str) -> bool {
        self.stops.iter().any(|s| s == station)
    }

    /// Stops with repeats removed, first occurrence kept.
    pub fn distinct_stops(&self) -> Vec<&str> {
        let mut seen = FxHashSet::default();
        self.stops
            .iter()
            .map(String::as_str)
            .filter(|s| seen.insert(*s))
            .collect()
    }

    /// Summed population of the distinct stops; unknown stops count zero.
    pub fn population(&self, populations: &Populations) -> u64 {
        self.distinct_stops()
            .into_iter()
            .map(|s| populations.get(s).copied().unwrap_or(0))
            .sum()
    }

    /// Consecutive stop pairs in service order.
    pub fn hops(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.stops.windows(2).map(|w| (w[0].as_str(), w[1].as_str()))
    }
}

/// Population each route is credited with when scoring coverage.
///
/// A stop served by `n` of the given routes contributes `population / n` to
/// each of them, so the shares sum to [`total_population`].
pub fn route_shares(routes: &[TransitRoute], populations: &Populations) -> Vec<f64> {
    let mut serving: FxHashMap<&str, u32> = FxHashMap::default();
    for route in routes {
        for stop in route.distinct_stops() {
            *serving.entry(stop).or_default() += 1;
        }
    }
    routes
        .iter()
        .map(|route| {
            route
                .distinct_stops()
                .into_iter()
                .map(|s| {
                    let pop = populations.get(s).copied().unwrap_or(0) as f64;
                    pop / f64::from(serving.get(s).copied().unwrap_or(1))
                })
                .sum()
        })
        .collect()
}

/// Population of every distinct stop across all routes.
///
/// Upper reference for the coverage score: a stop served by several routes
/// is counted once.
pub fn total_population(routes: &[TransitRoute], populations: &Populations) -> u64 {
    let mut seen = FxHashSet::default();
    routes
        .iter()
        .flat_map(|r| r.stops.iter().map(String::as_str))
        .filter(|s| seen.insert(*s))
        .map(|s| populations.get(s).copied().unwrap_or(0))
        .sum()
}

// ── Legs ──────────────────────────────────────────────────────────────────────

/// A directed station-to-station hop with its travel time in minutes.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TransitLeg {
    pub from: String,
    pub to:   String,
    pub time: f64,
}

impl TransitLeg {
    pub fn new(from: impl Into<String>, to: impl Into<String>, time: f64) -> Self {
        Self { from: from.into(), to: to.into(), time }
    }
}

// ── Graph-derived inputs ──────────────────────────────────────────────────────

/// Every node's display name in `NodeId` order.
pub fn stations_from_graph(graph: &Graph) -> Vec<String> {
    graph.nodes().map(|(_, n)| n.name.clone()).collect()
}

/// Settlement populations keyed by display name.  Facilities are omitted.
pub fn station_populations(graph: &Graph) -> Populations {
    graph
        .nodes()
        .filter(|(_, n)| !n.is_facility())
        .map(|(_, n)| (n.name.clone(), n.population()))
        .collect()
}

/// One leg per road per direction.
///
/// Each direction's time is `distance × factor`, the factor coming from
/// `model` for that traversal direction, so the legs agree with
/// [`CongestionModel::shortest_time`] on the same inputs.
pub fn legs_from_network(
    graph:       &Graph,
    traffic:     &TrafficTable,
    time_of_day: TimeOfDay,
    model:       &CongestionModel,
) -> Vec<TransitLeg> {
    let mut legs = Vec::with_capacity(graph.road_count() * 2);
    for (_, road) in graph.roads() {
        for (from, to) in [(road.from, road.to), (road.to, road.from)] {
            let factor = model.road_factor(graph, from, to, road, time_of_day, traffic);
            legs.push(TransitLeg::new(graph.name(from), graph.name(to), road.distance * factor));
        }
    }
    legs
}
