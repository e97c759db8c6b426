//! `tp-maintenance`: choose which roads to repair within a budget.
//!
//! | Module       | Contents                                              |
//! |--------------|-------------------------------------------------------|
//! | [`item`]     | `MaintenanceItem`, `candidates`, `MaintenancePlan`    |
//! | [`knapsack`] | `optimize_maintenance` (exact)                        |
//! | [`greedy`]   | `greedy_maintenance` (improvement per unit cost)      |
//! | [`error`]    | `MaintenanceError`, `MaintenanceResult<T>`            |
//!
//! Repairing a road lifts its condition to 10, so its improvement is
//! `10 - condition`.  Neither allocator mutates its input.

pub mod error;
pub mod greedy;
pub mod item;
pub mod knapsack;

#[cfg(test)]
mod tests;

pub use error::{MaintenanceError, MaintenanceResult};
pub use greedy::greedy_maintenance;
pub use item::{candidates, MaintenanceItem, MaintenancePlan};
pub use knapsack::optimize_maintenance;
