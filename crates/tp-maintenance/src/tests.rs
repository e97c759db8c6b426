//! Unit tests for tp-maintenance.

#[cfg(test)]
mod helpers {
    use tp_core::RoadId;
    use crate::MaintenanceItem;

    pub fn item(road: u32, cost: f64, condition: f64) -> MaintenanceItem {
        MaintenanceItem::new(RoadId(road), cost, condition)
    }

    /// Improvements 5, 3, 4, 1 at costs 100, 60, 50, 0.
    pub fn mixed() -> Vec<MaintenanceItem> {
        vec![
            item(0, 100.0, 5.0),
            item(1, 60.0, 7.0),
            item(2, 50.0, 6.0),
            item(3, 0.0, 9.0),
        ]
    }

    /// The best ratio item blocks the best pair.
    pub fn greedy_trap() -> Vec<MaintenanceItem> {
        vec![item(0, 51.0, 4.0), item(1, 50.0, 5.0), item(2, 50.0, 5.0)]
    }
}

// ── Exact knapsack ────────────────────────────────────────────────────────────

#[cfg(test)]
mod knapsack {
    use tp_core::RoadId;
    use crate::{greedy_maintenance, optimize_maintenance, MaintenanceError};
    use super::helpers::{greedy_trap, item, mixed};

    #[test]
    fn best_combination_within_budget() {
        let plan = optimize_maintenance(&mixed(), 110.0).unwrap();
        assert_eq!(plan.improvement, 8.0);
        assert_eq!(plan.total_cost, 110.0);
        assert_eq!(plan.selected, vec![RoadId(1), RoadId(2), RoadId(3)]);
    }

    #[test]
    fn escapes_greedy_trap() {
        let plan = optimize_maintenance(&greedy_trap(), 100.0).unwrap();
        assert_eq!(plan.improvement, 10.0);
        assert_eq!(plan.selected, vec![RoadId(1), RoadId(2)]);
    }

    #[test]
    fn zero_budget_takes_free_repairs_only() {
        let plan = optimize_maintenance(&mixed(), 0.0).unwrap();
        assert_eq!(plan.selected, vec![RoadId(3)]);
        assert_eq!(plan.total_cost, 0.0);
    }

    #[test]
    fn empty_input() {
        let plan = optimize_maintenance(&[], 500.0).unwrap();
        assert!(plan.is_empty());
        assert_eq!(plan.improvement, 0.0);
    }

    #[test]
    fn fractional_costs_compared_exactly() {
        let plan = optimize_maintenance(&[item(0, 10.2, 5.0)], 10.5).unwrap();
        assert!(plan.contains(RoadId(0)));

        let items = [item(0, 0.6, 5.0), item(1, 0.6, 5.0)];
        let exact = optimize_maintenance(&items, 1.2).unwrap();
        let greedy = greedy_maintenance(&items, 1.2).unwrap();
        assert_eq!(exact.improvement, 10.0);
        assert_eq!(exact.selected, vec![RoadId(0), RoadId(1)]);
        assert!(exact.improvement >= greedy.improvement);
    }

    #[test]
    fn cheapest_of_equal_plans() {
        // Both singletons improve by 5; the 30-cost one wins.
        let items = [item(0, 40.0, 5.0), item(1, 30.0, 5.0)];
        let plan = optimize_maintenance(&items, 50.0).unwrap();
        assert_eq!(plan.selected, vec![RoadId(1)]);
        assert_eq!(plan.total_cost, 30.0);
    }

    #[test]
    fn finished_roads_never_selected() {
        let plan = optimize_maintenance(&[item(0, 0.0, 10.0), item(1, 5.0, 10.0)], 10.0).unwrap();
        assert!(plan.is_empty());
    }

    #[test]
    fn invalid_budget_rejected() {
        assert!(matches!(
            optimize_maintenance(&mixed(), -1.0),
            Err(MaintenanceError::InvalidBudget(_))
        ));
        assert!(matches!(
            optimize_maintenance(&mixed(), f64::NAN),
            Err(MaintenanceError::InvalidBudget(_))
        ));
    }

    #[test]
    fn invalid_items_rejected() {
        assert!(matches!(
            optimize_maintenance(&[item(4, -3.0, 5.0)], 10.0),
            Err(MaintenanceError::InvalidCost { road: RoadId(4), .. })
        ));
        assert!(matches!(
            optimize_maintenance(&[item(5, 3.0, 11.0)], 10.0),
            Err(MaintenanceError::InvalidCost { .. })
        ));
    }

    #[test]
    fn input_left_untouched() {
        let items = mixed();
        let before = items.clone();
        optimize_maintenance(&items, 110.0).unwrap();
        assert_eq!(items, before);
    }
}

// ── Greedy ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod greedy {
    use tp_core::RoadId;
    use crate::{greedy_maintenance, MaintenanceError};
    use super::helpers::{greedy_trap, mixed};

    #[test]
    fn ratio_order_with_free_first() {
        // Ratios: r3 ∞, r2 0.08, r0 0.05, r1 0.05 (r0 stays ahead of r1).
        let plan = greedy_maintenance(&mixed(), 110.0).unwrap();
        assert_eq!(plan.selected, vec![RoadId(3), RoadId(2), RoadId(1)]);
        assert_eq!(plan.improvement, 8.0);
        assert_eq!(plan.total_cost, 110.0);
    }

    #[test]
    fn falls_into_trap() {
        let plan = greedy_maintenance(&greedy_trap(), 100.0).unwrap();
        assert_eq!(plan.selected, vec![RoadId(0)]);
        assert_eq!(plan.improvement, 6.0);
    }

    #[test]
    fn invalid_budget_rejected() {
        assert!(matches!(
            greedy_maintenance(&mixed(), f64::INFINITY),
            Err(MaintenanceError::InvalidBudget(_))
        ));
    }
}

// ── Candidates from a road graph ──────────────────────────────────────────────

#[cfg(test)]
mod candidates {
    use tp_core::{MaintenanceConfig, Point, RoadId};
    use tp_network::{Graph, Node, RoadRecord};
    use crate::candidates;

    #[test]
    fn existing_roads_only() {
        let g = Graph::build(
            [
                Node::settlement("1", "Maadi", Point::new(0.0, 0.0), 250_000),
                Node::settlement("3", "Downtown Cairo", Point::new(0.0, 1.0), 100_000),
                Node::settlement("4", "New Cairo", Point::new(2.0, 0.0), 300_000),
            ],
            &[
                RoadRecord::existing("1", "3", 8.5, 3000.0, 7.0),
                RoadRecord::potential("1", "4", 22.8, 4000.0, 450.0),
            ],
        )
        .unwrap();
        let items = candidates(&g, &MaintenanceConfig::default());
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].road, RoadId(0));
        assert!((items[0].cost - 255.0).abs() < 1e-9);
        assert_eq!(items[0].improvement(), 3.0);
    }
}

// ── Properties ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod properties {
    use proptest::prelude::*;

    use tp_core::RoadId;
    use crate::{greedy_maintenance, optimize_maintenance, MaintenanceItem};

    /// Quarter-currency costs and half-point conditions, so every sum below
    /// is exact in `f64`.
    fn arb_items() -> impl Strategy<Value = Vec<MaintenanceItem>> {
        proptest::collection::vec((0u32..200, 0u32..=20), 0..12).prop_map(|raw| {
            raw.into_iter()
                .enumerate()
                .map(|(i, (cost, cond))| {
                    MaintenanceItem::new(RoadId(i as u32), f64::from(cost) / 4.0, f64::from(cond) / 2.0)
                })
                .collect()
        })
    }

    proptest! {
        #[test]
        fn knapsack_within_budget_and_dominates_greedy(items in arb_items(), budget in 0u32..800) {
            let budget = f64::from(budget) / 4.0;
            let exact = optimize_maintenance(&items, budget).unwrap();
            let greedy = greedy_maintenance(&items, budget).unwrap();

            prop_assert!(exact.total_cost <= budget);
            prop_assert!(greedy.total_cost <= budget);
            prop_assert!(exact.improvement >= greedy.improvement);

            let mut roads = exact.selected.clone();
            roads.sort();
            roads.dedup();
            prop_assert_eq!(roads.len(), exact.selected.len());
        }

        #[test]
        fn knapsack_matches_exhaustive_search(items in arb_items(), budget in 0u32..400) {
            let budget = f64::from(budget) / 4.0;
            let mut best = 0.0f64;
            for mask in 0u32..(1 << items.len()) {
                let picked = items.iter().enumerate().filter(|(i, _)| mask & (1 << i) != 0);
                let (cost, gain) = picked.fold((0.0, 0.0), |(c, g), (_, it)| (c + it.cost, g + it.improvement()));
                if cost <= budget {
                    best = best.max(gain);
                }
            }
            prop_assert_eq!(optimize_maintenance(&items, budget).unwrap().improvement, best);
        }
    }
}
