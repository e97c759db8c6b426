//! Improvement-per-cost greedy allocator.

use log::debug;

use crate::item::{check_budget, MaintenanceItem, MaintenancePlan};
use crate::MaintenanceResult;

/// Take roads in descending `improvement / cost` order while the remaining
/// budget covers each one.
///
/// Zero-cost roads rank first.  The sort is stable, so equal ratios keep
/// input order.  `selected` is in acceptance order.  Runs in O(n log n) and
/// may fall short of [`optimize_maintenance`](crate::optimize_maintenance).
pub fn greedy_maintenance(items: &[MaintenanceItem], budget: f64) -> MaintenanceResult<MaintenancePlan> {
    check_budget(budget)?;
    for item in items {
        item.validate()?;
    }

    let ratio = |i: &MaintenanceItem| {
        if i.cost == 0.0 { f64::INFINITY } else { i.improvement() / i.cost }
    };
    let mut order: Vec<&MaintenanceItem> = items.iter().collect();
    order.sort_by(|a, b| ratio(b).total_cmp(&ratio(a)));

    let mut remaining = budget;
    let mut chosen = Vec::new();
    for item in order {
        if item.cost <= remaining {
            remaining -= item.cost;
            chosen.push(item);
        }
    }

    let plan = MaintenancePlan::from_items(chosen);
    debug!(
        "greedy maintenance: {} of {} roads, improvement {:.1}, cost {:.2} / {budget:.2}",
        plan.len(),
        items.len(),
        plan.improvement,
        plan.total_cost
    );
    Ok(plan)
}
