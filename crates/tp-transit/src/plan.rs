//! Both transit DPs behind one call.

use tp_core::TransitConfig;

use crate::coverage::{allocate_vehicles, RouteAssignment};
use crate::route::{Populations, TransitLeg, TransitRoute};
use crate::travel::{propagate_travel_times, TravelTimeTable};
use crate::TransitResult;

#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TransitPlan {
    pub travel:      TravelTimeTable,
    /// Maximum coverage score, see [`allocate_vehicles`].
    pub coverage:    f64,
    pub assignments: Vec<RouteAssignment>,
}

/// Travel times from `start` plus the best vehicle allocation, both over
/// `config.time_slots` slots.
pub fn public_transport_dp(
    stations:     &[String],
    legs:         &[TransitLeg],
    routes:       &[TransitRoute],
    populations:  &Populations,
    start:        &str,
    max_vehicles: usize,
    config:       &TransitConfig,
) -> TransitResult<TransitPlan> {
    let travel = propagate_travel_times(stations, legs, routes, start, config)?;
    let allocation = allocate_vehicles(routes, populations, max_vehicles, config.time_slots)?;
    Ok(TransitPlan {
        travel,
        coverage: allocation.coverage,
        assignments: allocation.assignments,
    })
}
