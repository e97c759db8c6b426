//! Planner configuration.
//!
//! Every tunable constant of the algorithm crates lives here so an embedding
//! application can load one file and hand the relevant section to each
//! component.  `Default` reproduces the reference constants.

use crate::{CoreError, CoreResult};

// ── Congestion ────────────────────────────────────────────────────────────────

/// Which road names the congestion model tries when matching a traffic sample.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RoadNameLookup {
    /// Only `"{from}-{to}"` in the direction the road is traversed.
    /// Traffic recorded under the reverse name is ignored.
    #[default]
    AsTraversed,
    /// Try the traversal name first, then `"{to}-{from}"`.
    EitherDirection,
}

/// Bounds and lookup policy for the traffic congestion multiplier.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CongestionConfig {
    pub min_factor: f64,
    pub max_factor: f64,
    pub lookup: RoadNameLookup,
}

impl Default for CongestionConfig {
    fn default() -> Self {
        Self {
            min_factor: 0.5,
            max_factor: 2.0,
            lookup: RoadNameLookup::AsTraversed,
        }
    }
}

// ── Route cache ───────────────────────────────────────────────────────────────

/// What part of the traffic table a cached route is keyed on.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SnapshotKey {
    /// Sorted set of road names only.  A change to volumes that keeps the
    /// same names returns the previously cached (stale) route.
    RoadNames,
    /// Road names and every volume reading.
    #[default]
    Contents,
}

#[derive(Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CacheConfig {
    pub key: SnapshotKey,
}

// ── Transit ───────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TransitConfig {
    /// Length of the scheduling horizon in slots (one slot = one hour).
    pub time_slots: usize,
    /// Minutes added when a journey continues after riding a transit leg.
    pub transfer_penalty: f64,
}

impl Default for TransitConfig {
    fn default() -> Self {
        Self { time_slots: 6, transfer_penalty: 5.0 }
    }
}

// ── Maintenance ───────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct MaintenanceConfig {
    /// Multiplier in `(10 - condition) * distance * cost_factor`.
    pub cost_factor: f64,
}

impl Default for MaintenanceConfig {
    fn default() -> Self {
        Self { cost_factor: 10.0 }
    }
}

// ── PlannerConfig ─────────────────────────────────────────────────────────────

/// Top-level configuration, one section per component.
#[derive(Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PlannerConfig {
    pub congestion: CongestionConfig,
    pub cache: CacheConfig,
    pub transit: TransitConfig,
    pub maintenance: MaintenanceConfig,
}

impl PlannerConfig {
    /// Reject values no component can work with.
    pub fn validate(&self) -> CoreResult<()> {
        let c = &self.congestion;
        if !(c.min_factor.is_finite() && c.max_factor.is_finite()) || c.min_factor < 0.0 {
            return Err(CoreError::Config(format!(
                "congestion factors must be finite and non-negative, got [{}, {}]",
                c.min_factor, c.max_factor
            )));
        }
        if c.min_factor > c.max_factor {
            return Err(CoreError::Config(format!(
                "congestion.min_factor {} exceeds max_factor {}",
                c.min_factor, c.max_factor
            )));
        }
        if self.transit.time_slots == 0 {
            return Err(CoreError::Config("transit.time_slots must be at least 1".into()));
        }
        if !(self.transit.transfer_penalty >= 0.0 && self.transit.transfer_penalty.is_finite()) {
            return Err(CoreError::Config(format!(
                "transit.transfer_penalty must be finite and non-negative, got {}",
                self.transit.transfer_penalty
            )));
        }
        let m = &self.maintenance;
        if !(m.cost_factor >= 0.0 && m.cost_factor.is_finite()) {
            return Err(CoreError::Config(format!(
                "maintenance.cost_factor must be finite and non-negative, got {}",
                m.cost_factor
            )));
        }
        Ok(())
    }
}
