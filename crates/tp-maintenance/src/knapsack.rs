//! Exact 0/1 knapsack over real-valued costs.
//!
//! The table is keyed by spent budget rather than by integer budget steps.
//! After item `i` the frontier holds every `(cost, improvement)` pair that
//! some subset of items `0..=i` reaches, minus the dominated ones:
//!
//! ```text
//! frontier₀      = [(0, 0)]
//! frontierᵢ₊₁    = prune( frontierᵢ ∪ { (c + costᵢ, g + gainᵢ) | (c, g) ∈ frontierᵢ, c + costᵢ ≤ budget } )
//! prune          keeps a state only if no cheaper-or-equal state improves as much
//! ```
//!
//! Improvements are `10 - condition`, so the frontier never holds more
//! states than there are distinct improvement totals.  Each state links to
//! the state it was extended from; the selection is rebuilt by following
//! those links from the best final state.

use log::debug;

use crate::item::{check_budget, MaintenanceItem, MaintenancePlan};
use crate::MaintenanceResult;

#[derive(Clone, Copy)]
struct State {
    cost:        f64,
    improvement: f64,
    /// Last taken item, as an index into the link arena.
    link:        Option<usize>,
}

/// `(item, previous link)` pairs shared by every state that took `item`.
type Links = Vec<(usize, Option<usize>)>;

/// Maximum total improvement whose cost stays within `budget`.
///
/// Costs are compared exactly, so the result dominates
/// [`greedy_maintenance`](crate::greedy_maintenance) on the same input.  Among
/// optimal plans the cheapest is returned.  `selected` is in input order.
pub fn optimize_maintenance(items: &[MaintenanceItem], budget: f64) -> MaintenanceResult<MaintenancePlan> {
    check_budget(budget)?;
    for item in items {
        item.validate()?;
    }

    let mut links: Links = Vec::new();
    let mut frontier = vec![State { cost: 0.0, improvement: 0.0, link: None }];

    for (i, item) in items.iter().enumerate() {
        if item.cost > budget {
            continue;
        }
        let gain = item.improvement();
        let mut extended = Vec::with_capacity(frontier.len());
        for state in &frontier {
            let cost = state.cost + item.cost;
            if cost > budget {
                // Frontier is sorted by cost.
                break;
            }
            links.push((i, state.link));
            extended.push(State {
                cost,
                improvement: state.improvement + gain,
                link: Some(links.len() - 1),
            });
        }
        frontier = merge(&frontier, &extended);
    }

    let mut chosen = Vec::new();
    let mut link = frontier.last().and_then(|s| s.link);
    while let Some(at) = link {
        let (item, previous) = links[at];
        chosen.push(&items[item]);
        link = previous;
    }
    chosen.reverse();

    let plan = MaintenancePlan::from_items(chosen);
    debug!(
        "knapsack maintenance: {} of {} roads, improvement {:.1}, cost {:.2} / {budget:.2} ({} states)",
        plan.len(),
        items.len(),
        plan.improvement,
        plan.total_cost,
        links.len()
    );
    Ok(plan)
}

/// Merge two cost-sorted state lists and drop dominated states.
///
/// On equal cost the larger improvement comes first, and `kept` wins a full
/// tie so leaving the item out is preferred.  The result is sorted by cost
/// with strictly increasing improvement.
fn merge(kept: &[State], extended: &[State]) -> Vec<State> {
    let mut merged = Vec::with_capacity(kept.len() + extended.len());
    let (mut a, mut b) = (0, 0);
    let mut best = f64::NEG_INFINITY;
    while a < kept.len() || b < extended.len() {
        let take_kept = match (kept.get(a), extended.get(b)) {
            (Some(x), Some(y)) => {
                x.cost < y.cost || (x.cost == y.cost && x.improvement >= y.improvement)
            }
            (Some(_), None) => true,
            (None, _) => false,
        };
        let state = if take_kept {
            a += 1;
            kept[a - 1]
        } else {
            b += 1;
            extended[b - 1]
        };
        if state.improvement > best {
            best = state.improvement;
            merged.push(state);
        }
    }
    merged
}
