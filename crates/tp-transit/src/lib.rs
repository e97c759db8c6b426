//! `tp-transit`: transit scheduling over a discrete slot horizon.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                        |
//! |--------------|-----------------------------------------------------------------|
//! | [`route`]    | `TransitRoute`, `TransitLeg`, `legs_from_network`, populations  |
//! | [`travel`]   | `propagate_travel_times`, `TravelTimeTable`                     |
//! | [`coverage`] | `allocate_vehicles`, `VehicleAllocation`                        |
//! | [`transfer`] | `analyze_transfer_points`, `TransferAnalysis`                   |
//! | [`plan`]     | `public_transport_dp`, `TransitPlan`                            |
//! | [`error`]    | `TransitError`, `TransitResult<T>`                              |
//!
//! Stations are plain display names so routes, legs and populations can come
//! from tables that were never turned into a road [`Graph`](tp_network::Graph).
//! The `*_from_graph` helpers in [`route`] cover the common case where they
//! were.

pub mod coverage;
pub mod error;
pub mod plan;
pub mod route;
pub mod transfer;
pub mod travel;


pub use coverage::{allocate_vehicles, RouteAssignment, VehicleAllocation};
pub use error::{TransitError, TransitResult};
pub use plan::{public_transport_dp, TransitPlan};
pub use route::{
    legs_from_network, route_shares, station_populations, stations_from_graph, total_population,
    Populations, TransitLeg, TransitRoute,
};
pub use transfer::{analyze_transfer_points, TransferAnalysis, TransferHub, TransferWait};
pub use travel::{propagate_travel_times, TravelTimeTable};
