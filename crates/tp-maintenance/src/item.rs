//! Repair candidates and the plans both allocators return.

use tp_core::{MaintenanceConfig, RoadId};
use tp_network::Graph;

use crate::{MaintenanceError, MaintenanceResult};

/// One road that could be repaired.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MaintenanceItem {
    pub road:      RoadId,
    pub cost:      f64,
    /// Current condition score, 0–10.
    pub condition: f64,
}

impl MaintenanceItem {
    pub fn new(road: RoadId, cost: f64, condition: f64) -> Self {
        Self { road, cost, condition }
    }

    #[inline]
    pub fn improvement(&self) -> f64 {
        10.0 - self.condition
    }

    pub(crate) fn validate(&self) -> MaintenanceResult<()> {
        let invalid = |reason: String| MaintenanceError::InvalidCost { road: self.road, reason };
        if !(self.cost >= 0.0 && self.cost.is_finite()) {
            return Err(invalid(format!("cost must be finite and non-negative, got {}", self.cost)));
        }
        if !(0.0..=10.0).contains(&self.condition) {
            return Err(invalid(format!("condition must lie in 0..=10, got {}", self.condition)));
        }
        Ok(())
    }
}

/// Every existing road of `graph`, priced at
/// `(10 - condition) × distance × cost_factor`.  Potential roads are skipped.
pub fn candidates(graph: &Graph, config: &MaintenanceConfig) -> Vec<MaintenanceItem> {
    graph
        .roads()
        .filter_map(|(id, road)| {
            let cost = road.maintenance_cost(config.cost_factor)?;
            let condition = road.condition()?;
            Some(MaintenanceItem::new(id, cost, condition))
        })
        .collect()
}

pub(crate) fn check_budget(budget: f64) -> MaintenanceResult<()> {
    if budget >= 0.0 && budget.is_finite() {
        Ok(())
    } else {
        Err(MaintenanceError::InvalidBudget(budget))
    }
}

/// Roads chosen for repair.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MaintenancePlan {
    /// Summed `10 - condition` over `selected`.
    pub improvement: f64,
    pub total_cost:  f64,
    pub selected:    Vec<RoadId>,
}

impl MaintenancePlan {
    pub(crate) fn from_items<'a>(items: impl IntoIterator<Item = &'a MaintenanceItem>) -> Self {
        let mut plan = Self::default();
        for item in items {
            plan.improvement += item.improvement();
            plan.total_cost += item.cost;
            plan.selected.push(item.road);
        }
        plan
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    pub fn contains(&self, road: RoadId) -> bool {
        self.selected.contains(&road)
    }
}
