//! `tp-network`: road graph model and the search algorithms over it.
//!
//! # Crate layout
//!
//! | Module         | Contents                                                        |
//! |----------------|-----------------------------------------------------------------|
//! | [`network`]    | `Graph` (CSR), `GraphBuilder`, `Node`, `Road`, `RoadRecord`     |
//! | [`astar`]      | `find_path`, `find_nearest_facility`, `Path`                    |
//! | [`congestion`] | `TrafficTable`, `CongestionModel`, `shortest_time`, `TimedRoute` |
//! | [`cache`]      | `RouteCache`, `CacheStats`                                      |
//! | [`mst`]        | `minimum_spanning_network`, `CandidateEdge`, `SpanningNetwork`  |
//! | [`error`]      | `NetworkError`, `NetworkResult<T>`                              |
//!
//! Every search is a pure function of an immutable `Graph` and its query
//! parameters.  The only shared mutable state is a caller-owned
//! [`RouteCache`].
//!
//! # Feature flags
//!
//! | Flag       | Effect                                                      |
//! |------------|-------------------------------------------------------------|
//! | `parallel` | Facility fan-out in `find_nearest_facility` uses Rayon.     |
//! | `serde`    | Derives `Serialize`/`Deserialize` on public types.          |

pub mod astar;
pub mod cache;
pub mod congestion;
pub mod error;
pub mod mst;
pub mod network;

mod frontier;

#[cfg(test)]
mod tests;

pub use astar::{find_nearest_facility, find_path, NearestFacility, Path, PRIORITY_DISCOUNT};
pub use cache::{CacheStats, RouteCache};
pub use congestion::{
    congestion_factor, recommend_alternate_route, road_name, shortest_time, shortest_time_cached,
    CongestionModel, TimedRoute, TrafficSample, TrafficSnapshot, TrafficTable,
};
pub use error::{NetworkError, NetworkResult};
pub use mst::{edge_pool, minimum_spanning_network, CandidateEdge, SelectedEdge, SpanningNetwork};
pub use network::{Graph, GraphBuilder, Node, NodeKind, Road, RoadRecord, RoadStatus};
