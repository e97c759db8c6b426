//! Transfer hubs: stations where passengers can change between routes.

use rustc_hash::FxHashMap;

use crate::route::TransitRoute;

/// A station served by at least two routes.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TransferHub {
    pub station:     String,
    pub route_count: usize,
}

/// Expected wait when changing from one route to another at a hub.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TransferWait {
    pub hub:        String,
    pub from_route: String,
    pub to_route:   String,
    /// Half the headway of `to_route`, in minutes.
    pub avg_wait:   f64,
}

#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TransferAnalysis {
    /// In order of first appearance across `routes`.
    pub hubs:  Vec<TransferHub>,
    pub waits: Vec<TransferWait>,
}

impl TransferAnalysis {
    pub fn hub(&self, station: &str) -> Option<&TransferHub> {
        self.hubs.iter().find(|h| h.station == station)
    }

    pub fn is_hub(&self, station: &str) -> bool {
        self.hub(station).is_some()
    }
}

/// Count the routes serving each station and list the pairwise transfers at
/// every hub.
///
/// A route that lists a stop twice still counts once for it.  For each hub
/// the routes are paired in input order, `(i, j)` with `i < j`, and the wait
/// is taken from the second route of the pair.
pub fn analyze_transfer_points(routes: &[TransitRoute]) -> TransferAnalysis {
    let mut order: Vec<&str> = Vec::new();
    let mut serving: FxHashMap<&str, Vec<usize>> = FxHashMap::default();
    for (i, route) in routes.iter().enumerate() {
        for stop in route.distinct_stops() {
            serving
                .entry(stop)
                .or_insert_with(|| {
                    order.push(stop);
                    Vec::new()
                })
                .push(i);
        }
    }

    let mut analysis = TransferAnalysis::default();
    for station in order {
        let served = &serving[station];
        if served.len() < 2 {
            continue;
        }
        analysis.hubs.push(TransferHub {
            station:     station.to_owned(),
            route_count: served.len(),
        });
        for (k, &i) in served.iter().enumerate() {
            for &j in &served[k + 1..] {
                analysis.waits.push(TransferWait {
                    hub:        station.to_owned(),
                    from_route: routes[i].route_id.clone(),
                    to_route:   routes[j].route_id.clone(),
                    avg_wait:   f64::from(routes[j].frequency) / 2.0,
                });
            }
        }
    }
    analysis
}
