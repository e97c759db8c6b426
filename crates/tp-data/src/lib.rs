//! `tp-data`: CSV input for the planning algorithms.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                        |
//! |---------------|-----------------------------------------------------------------|
//! | [`loader`]    | `load_{nodes,roads,potential_roads,traffic,transit_routes}_{csv,reader}` |
//! | [`emergency`] | `RoadGrade`, `emergency_weight`, `load_emergency_roads_{csv,reader}` |
//! | [`dataset`]   | `Dataset`, `EmergencyNetwork`, `load_dataset`                   |
//! | [`error`]     | `DataError`, `DataResult<T>`                                    |
//!
//! Loaders only parse and validate rows.  Cross-table references (road
//! endpoints, traffic road names, transit stops) are checked when a graph is
//! built from the [`Dataset`].

pub mod dataset;
pub mod emergency;
pub mod error;
pub mod loader;


pub use dataset::{load_dataset, Dataset, EmergencyNetwork};
pub use emergency::{emergency_weight, load_emergency_roads_csv, load_emergency_roads_reader, RoadGrade};
pub use error::{DataError, DataResult};
pub use loader::{
    load_nodes_csv, load_nodes_reader, load_potential_roads_csv, load_potential_roads_reader,
    load_roads_csv, load_roads_reader, load_traffic_csv, load_traffic_reader,
    load_transit_routes_csv, load_transit_routes_reader,
};
