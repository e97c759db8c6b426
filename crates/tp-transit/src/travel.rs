//! Time-expanded travel-time propagation.
//!
//! # Recurrence
//!
//! ```text
//! best[s][t]   minimal cumulative minutes to stand at station s in slot t
//!
//! best[start][0] = 0, everything else +∞
//! for t in 0 .. T-1, for every leg (src → dst, w) with best[src][t] finite:
//!     penalty = transfer_penalty  if the hop into (src, t) was a route hop
//!               0                 otherwise
//!     best[dst][t+1] = min(best[dst][t+1], best[src][t] + w + penalty)
//! ```
//!
//! Each slot advances exactly one leg; there is no "wait in place" move, so a
//! station's answer is its minimum over all slots.  A *route hop* is a pair
//! of consecutive stops on any [`TransitRoute`], in either direction.

use log::debug;
use rustc_hash::{FxHashMap, FxHashSet};

use tp_core::{NodeId, TransitConfig};
use tp_network::Graph;

use crate::route::{TransitLeg, TransitRoute};
use crate::{TransitError, TransitResult};

const NO_PRED: u32 = u32::MAX;

/// Result of [`propagate_travel_times`]: per-station, per-slot best times
/// plus the predecessors needed to rebuild journeys.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TravelTimeTable {
    stations:   Vec<String>,
    index:      FxHashMap<String, usize>,
    start:      usize,
    time_slots: usize,
    /// Row-major `[station][slot]`.
    best:       Vec<f64>,
    pred:       Vec<u32>,
}

impl TravelTimeTable {
    pub fn time_slots(&self) -> usize {
        self.time_slots
    }

    pub fn start(&self) -> &str {
        &self.stations[self.start]
    }

    pub fn stations(&self) -> impl Iterator<Item = &str> + '_ {
        self.stations.iter().map(String::as_str)
    }

    fn station_index(&self, station: &str) -> TransitResult<usize> {
        self.index
            .get(station)
            .copied()
            .ok_or_else(|| TransitError::UnknownStation(station.to_owned()))
    }

    #[inline]
    fn cell(&self, station: usize, slot: usize) -> usize {
        station * self.time_slots + slot
    }

    /// Best time to `station` in each slot; `+∞` where it is not reachable.
    pub fn slot_times(&self, station: &str) -> TransitResult<&[f64]> {
        let s = self.station_index(station)?;
        Ok(&self.best[self.cell(s, 0)..self.cell(s + 1, 0)])
    }

    /// Minimum over all slots; `+∞` when the station is never reached.
    pub fn min_time(&self, station: &str) -> TransitResult<f64> {
        let times = self.slot_times(station)?;
        Ok(times.iter().copied().fold(f64::INFINITY, f64::min))
    }

    /// Earliest slot holding the station's minimum time.
    fn best_slot(&self, station: usize) -> Option<usize> {
        let row = &self.best[self.cell(station, 0)..self.cell(station + 1, 0)];
        let mut found: Option<usize> = None;
        for (t, &v) in row.iter().enumerate() {
            if v.is_finite() && found.is_none_or(|b| v < row[b]) {
                found = Some(t);
            }
        }
        found
    }

    /// Stations in the order the journey visits them, from the start to
    /// `station`.  Empty when `station` is unreachable.
    pub fn path_to(&self, station: &str) -> TransitResult<Vec<String>> {
        let target = self.station_index(station)?;
        let Some(mut slot) = self.best_slot(target) else {
            return Ok(Vec::new());
        };
        let mut cur = target;
        let mut stops = vec![cur];
        while slot > 0 {
            let p = self.pred[self.cell(cur, slot)];
            if p == NO_PRED {
                break;
            }
            cur = p as usize;
            stops.push(cur);
            slot -= 1;
        }
        stops.reverse();
        Ok(stops.into_iter().map(|s| self.stations[s].clone()).collect())
    }

    /// [`path_to`](Self::path_to) resolved against a road graph's node names.
    pub fn path_nodes(&self, graph: &Graph, station: &str) -> TransitResult<Vec<NodeId>> {
        self.path_to(station)?
            .iter()
            .map(|name| graph.node_by_name(name).map_err(TransitError::from))
            .collect()
    }

    /// Reachable stations with their minimum time, fastest first.
    pub fn reachable(&self) -> Vec<(&str, f64)> {
        let mut out: Vec<(&str, f64)> = (0..self.stations.len())
            .filter_map(|s| {
                let t = self.best_slot(s)?;
                Some((self.stations[s].as_str(), self.best[self.cell(s, t)]))
            })
            .collect();
        out.sort_by(|a, b| a.1.total_cmp(&b.1).then_with(|| a.0.cmp(b.0)));
        out
    }
}

/// Fill the time-expanded table from `start` over `config.time_slots` slots.
///
/// `routes` only decides which hops carry the transfer penalty; the legs
/// themselves come from `legs`.  Fails on an empty horizon, a start or leg
/// endpoint outside `stations`, or a negative leg time.
pub fn propagate_travel_times(
    stations: &[String],
    legs:     &[TransitLeg],
    routes:   &[TransitRoute],
    start:    &str,
    config:   &TransitConfig,
) -> TransitResult<TravelTimeTable> {
    let time_slots = config.time_slots;
    if time_slots == 0 {
        return Err(TransitError::EmptyHorizon);
    }

    let mut names = Vec::with_capacity(stations.len());
    let mut index = FxHashMap::default();
    for name in stations {
        if !index.contains_key(name) {
            index.insert(name.clone(), names.len());
            names.push(name.clone());
        }
    }
    let lookup = |name: &str| {
        index
            .get(name)
            .copied()
            .ok_or_else(|| TransitError::UnknownStation(name.to_owned()))
    };
    let start_idx = lookup(start)?;

    // Outgoing legs per station, in input order.
    let mut out: Vec<Vec<(usize, f64)>> = vec![Vec::new(); names.len()];
    for leg in legs {
        if !(leg.time >= 0.0 && leg.time.is_finite()) {
            return Err(TransitError::InvalidRoute {
                route:  format!("{}-{}", leg.from, leg.to),
                reason: format!("leg time must be finite and non-negative, got {}", leg.time),
            });
        }
        out[lookup(&leg.from)?].push((lookup(&leg.to)?, leg.time));
    }

    let mut route_hops: FxHashSet<(usize, usize)> = FxHashSet::default();
    for route in routes {
        for (a, b) in route.hops() {
            if let (Some(&a), Some(&b)) = (index.get(a), index.get(b)) {
                route_hops.insert((a, b));
                route_hops.insert((b, a));
            }
        }
    }

    let n = names.len();
    let mut best = vec![f64::INFINITY; n * time_slots];
    let mut pred = vec![NO_PRED; n * time_slots];
    best[start_idx * time_slots] = 0.0;

    for t in 0..time_slots - 1 {
        for src in 0..n {
            let here = best[src * time_slots + t];
            if !here.is_finite() {
                continue;
            }
            let p = pred[src * time_slots + t];
            let penalty = if p != NO_PRED && route_hops.contains(&(p as usize, src)) {
                config.transfer_penalty
            } else {
                0.0
            };
            for &(dst, w) in &out[src] {
                let candidate = here + w + penalty;
                let cell = dst * time_slots + t + 1;
                if candidate < best[cell] {
                    best[cell] = candidate;
                    pred[cell] = src as u32;
                }
            }
        }
    }

    let table = TravelTimeTable {
        stations: names,
        index,
        start: start_idx,
        time_slots,
        best,
        pred,
    };
    debug!(
        "travel times from {start}: {} of {} stations reachable within {time_slots} slots",
        table.reachable().len(),
        n
    );
    Ok(table)
}
