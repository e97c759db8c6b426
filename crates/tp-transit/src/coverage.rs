//! Vehicle allocation: maximise population coverage over a slot horizon.
//!
//! # State
//!
//! `value(r, v, t)` is the best coverage obtainable from routes `r..` with
//! `v` vehicles left, starting at slot `t`:
//!
//! ```text
//! value(r, v, t) = 0                                     if r = R or t ≥ T
//! value(r, v, t) = max( value(r+1, v, t),                           skip
//!                       share(r)/freq(r) + value(r+1, v-k(r), t+freq(r)) )  assign
//!
//! k(r) = max(1, ceil(pop(r) / capacity(r)))
//! ```
//!
//! *assign* places the `k(r)` vehicles the route's riders need, and is only
//! allowed when `k(r) ≤ v` and `t + freq(r) ≤ T`.  Each route is assigned at
//! most once and `share(r)` is its [`route_shares`] entry, so coverage never
//! exceeds [`total_population`](crate::total_population).  The table is
//! filled bottom-up: `r` descending, `v` ascending, `t` descending.

use log::debug;

use crate::route::{route_shares, Populations, TransitRoute};
use crate::{TransitError, TransitResult};

/// Vehicles placed on a route for `frequency` slots starting at `slot`.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RouteAssignment {
    /// Index into the routes slice.
    pub route:    usize,
    pub route_id: String,
    pub slot:     usize,
    pub vehicles: usize,
}

#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VehicleAllocation {
    /// Population served per minute of headway, summed over assignments.
    pub coverage:    f64,
    pub assignments: Vec<RouteAssignment>,
}

impl VehicleAllocation {
    pub fn vehicles_used(&self) -> usize {
        self.assignments.iter().map(|a| a.vehicles).sum()
    }
}

/// Dense `(route, vehicles, slot)` table with one extra row on each axis
/// for the zero base cases.
struct Table {
    vehicles: usize,
    slots:    usize,
    value:    Vec<f64>,
    assign:   Vec<bool>,
}

impl Table {
    fn new(routes: usize, vehicles: usize, slots: usize) -> Self {
        let len = (routes + 1) * (vehicles + 1) * (slots + 1);
        Self {
            vehicles,
            slots,
            value: vec![0.0; len],
            assign: vec![false; len],
        }
    }

    #[inline]
    fn at(&self, r: usize, v: usize, t: usize) -> usize {
        (r * (self.vehicles + 1) + v) * (self.slots + 1) + t
    }
}

/// Vehicles a route needs to carry `population` riders, or `None` when no
/// number of vehicles will do.
fn vehicles_needed(population: u64, capacity: u32) -> Option<usize> {
    if population == 0 {
        return Some(1);
    }
    if capacity == 0 {
        return None;
    }
    usize::try_from(population.div_ceil(u64::from(capacity))).ok()
}

/// Best coverage for `max_vehicles` vehicles over `time_slots` slots, with
/// the assignments that achieve it.
///
/// Ties prefer skipping a route, so the earliest routes in the input are
/// never taken without a strict gain.
pub fn allocate_vehicles(
    routes:       &[TransitRoute],
    populations:  &Populations,
    max_vehicles: usize,
    time_slots:   usize,
) -> TransitResult<VehicleAllocation> {
    if time_slots == 0 {
        return Err(TransitError::EmptyHorizon);
    }
    for route in routes {
        route.validate()?;
    }

    let shares = route_shares(routes, populations);
    let needed: Vec<Option<usize>> = routes
        .iter()
        .map(|r| vehicles_needed(r.population(populations), r.capacity))
        .collect();

    // A fleet larger than every usable route needs at once adds nothing.
    let usable = routes
        .iter()
        .zip(&needed)
        .filter(|(r, _)| r.frequency as usize <= time_slots)
        .filter_map(|(_, &k)| k.filter(|&k| k <= max_vehicles))
        .fold(0usize, usize::saturating_add);
    let vehicles = max_vehicles.min(usable);
    let mut table = Table::new(routes.len(), vehicles, time_slots);

    for r in (0..routes.len()).rev() {
        let freq = routes[r].frequency as usize;
        let gain = shares[r] / freq as f64;
        for v in 0..=vehicles {
            for t in (0..time_slots).rev() {
                let skip = table.value[table.at(r + 1, v, t)];
                let here = table.at(r, v, t);
                table.value[here] = skip;
                let Some(k) = needed[r].filter(|&k| k <= v) else { continue };
                if t + freq <= time_slots {
                    let assign = gain + table.value[table.at(r + 1, v - k, t + freq)];
                    if assign > skip {
                        table.value[here] = assign;
                        table.assign[here] = true;
                    }
                }
            }
        }
    }

    // Walk the recorded choices from the root state.
    let mut allocation = VehicleAllocation {
        coverage: table.value[table.at(0, vehicles, 0)],
        assignments: Vec::new(),
    };
    let (mut v, mut t) = (vehicles, 0);
    for (r, route) in routes.iter().enumerate() {
        if t >= time_slots {
            break;
        }
        if table.assign[table.at(r, v, t)] {
            let k = needed[r].unwrap_or(0);
            allocation.assignments.push(RouteAssignment {
                route:    r,
                route_id: route.route_id.clone(),
                slot:     t,
                vehicles: k,
            });
            t += route.frequency as usize;
            v -= k;
        }
    }

    debug!(
        "vehicle allocation: coverage {:.2} using {} of {max_vehicles} vehicles",
        allocation.coverage,
        allocation.vehicles_used()
    );
    Ok(allocation)
}
