//! `tp-core`: foundational types for the transport planning workspace.
//!
//! This crate is a dependency of every other `tp-*` crate.  It has no `tp-*`
//! dependencies and a single external one (`thiserror`, plus optional
//! `serde`).
//!
//! # What lives here
//!
//! | Module      | Contents                                                  |
//! |-------------|-----------------------------------------------------------|
//! | [`ids`]     | `NodeId`, `RoadId`                                        |
//! | [`geo`]     | `Point`, Euclidean distance                               |
//! | [`time`]    | `TimeOfDay`                                               |
//! | [`config`]  | `PlannerConfig` and its per-component sections            |
//! | [`error`]   | `CoreError`, `CoreResult`                                 |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod config;
pub mod error;
pub mod geo;
pub mod ids;
pub mod time;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::{
    CacheConfig, CongestionConfig, MaintenanceConfig, PlannerConfig, RoadNameLookup,
    SnapshotKey, TransitConfig,
};
pub use error::{CoreError, CoreResult};
pub use geo::Point;
pub use ids::{NodeId, RoadId};
pub use time::TimeOfDay;
