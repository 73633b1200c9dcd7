//! Unit tests for npc-goap.

use crate::{Fact, GoapAction, GoapPlanner, WorldState, default_actions};

fn combat_start() -> WorldState {
    WorldState::new()
        .with("has_weapon", true)
        .with("in_range", false)
        .with("enemy_alive", true)
}

fn kill_goal() -> WorldState {
    WorldState::new().with("enemy_alive", false)
}

/// Cost of every goal-reaching action sequence up to `depth`, enumerated
/// breadth-first without sharing any code with the planner.
fn all_plan_costs(start: &WorldState, goal: &WorldState, depth: usize) -> Vec<f64> {
    let actions = default_actions();
    let mut frontier = vec![(start.clone(), 0.0, goal.clone())];
    let mut costs = Vec::new();
    for _ in 0..depth {
        let mut next = Vec::new();
        for (state, cost, needed) in &frontier {
            for a in actions.iter().filter(|a| a.applicable(state)) {
                let s = a.apply(state);
                let still: WorldState = needed.iter().filter(|&(k, v)| !s.holds(k, v)).collect();
                if still.is_empty() {
                    costs.push(cost + a.cost);
                } else {
                    next.push((s, cost + a.cost, still));
                }
            }
        }
        frontier = next;
    }
    costs
}

// ── WorldState ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod state_tests {
    use super::*;

    #[test]
    fn satisfies_requires_presence() {
        let s = WorldState::new().with("a", true);
        assert!(s.satisfies(&WorldState::new().with("a", true)));
        assert!(!s.satisfies(&WorldState::new().with("b", false)));
        assert!(s.satisfies(&WorldState::new()));
    }

    #[test]
    fn merged_overwrites() {
        let s = WorldState::new().with("ammo", 0).with("x", true);
        let m = s.merged(&WorldState::new().with("ammo", 30));
        assert_eq!(m.get("ammo"), Some(Fact::Int(30)));
        assert_eq!(m.get("x"), Some(Fact::Bool(true)));
        assert_eq!(s.get("ammo"), Some(Fact::Int(0)));
    }

    #[test]
    fn bool_and_int_differ() {
        let s = WorldState::new().with("ammo", 0);
        assert!(!s.holds("ammo", Fact::Bool(false)));
    }
}

// ── Actions ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod action_tests {
    use super::*;

    #[test]
    fn catalog_contents() {
        let actions = default_actions();
        let names: Vec<_> = actions.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(
            names,
            ["MoveToEnemy", "AttackEnemy", "Reload", "Flee", "HealSelf", "TakeCover", "AlertAllies", "UseAbility"]
        );
        assert!(actions.iter().all(|a| a.cost >= 0.0));
    }

    #[test]
    fn missing_key_is_inapplicable() {
        let alert = GoapAction::new("AlertAllies", 0.5)
            .requires("enemy_alive", true)
            .requires("allies_alerted", false);
        assert!(!alert.applicable(&combat_start()));
        assert!(alert.applicable(&combat_start().with("allies_alerted", false)));
    }

    #[test]
    fn negative_cost_clamped() {
        assert_eq!(GoapAction::new("x", -3.0).cost, 0.0);
    }
}

// ── Planner ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod planner_tests {
    use super::*;

    #[test]
    fn approach_then_attack() {
        let plan = GoapPlanner::default().plan(&combat_start(), &kill_goal());
        assert_eq!(plan.names(), ["MoveToEnemy", "AttackEnemy"]);
        assert!((plan.cost - 2.0).abs() < 1e-9);
        assert_eq!(plan.last().map(|a| a.name.as_str()), Some("AttackEnemy"));
    }

    #[test]
    fn plan_is_no_worse_than_any_alternative() {
        let start = combat_start().with("allies_alerted", false).with("ability_ready", true);
        let plan = GoapPlanner::default().plan(&start, &kill_goal());
        let costs = all_plan_costs(&start, &kill_goal(), 10);
        assert!(!costs.is_empty());
        assert!(costs.iter().all(|&c| plan.cost <= c + 1e-9));
        // Move (1.0) + UseAbility (0.8) beats Move + Attack.
        assert_eq!(plan.names(), ["MoveToEnemy", "UseAbility"]);
    }

    #[test]
    fn ability_in_range_wins() {
        let start = WorldState::new()
            .with("in_range", true)
            .with("enemy_alive", true)
            .with("ability_ready", true);
        let plan = GoapPlanner::default().plan(&start, &kill_goal());
        assert_eq!(plan.names(), ["UseAbility"]);
    }

    #[test]
    fn reload_int_fact() {
        let start = WorldState::new().with("ammo", 0);
        let goal = WorldState::new().with("ammo", 30);
        let plan = GoapPlanner::default().plan(&start, &goal);
        assert_eq!(plan.names(), ["Reload"]);
        assert!((plan.cost - 2.0).abs() < 1e-9);
    }

    #[test]
    fn unreachable_goal_is_empty() {
        let plan = GoapPlanner::default().plan(&combat_start(), &WorldState::new().with("is_safe", true));
        assert!(plan.is_empty());
        assert_eq!(plan.cost, 0.0);
    }

    #[test]
    fn depth_bound_limits_plans() {
        let planner = GoapPlanner::default().with_max_depth(1);
        assert!(planner.plan(&combat_start(), &kill_goal()).is_empty());
        let planner = GoapPlanner::default().with_max_depth(2);
        assert_eq!(planner.plan(&combat_start(), &kill_goal()).len(), 2);
    }

    #[test]
    fn first_found_wins_ties() {
        let actions = vec![
            GoapAction::new("A", 1.0).produces("done", true),
            GoapAction::new("B", 1.0).produces("done", true),
        ];
        let plan = GoapPlanner::new(actions).plan(&WorldState::new(), &WorldState::new().with("done", true));
        assert_eq!(plan.names(), ["A"]);
    }
}
