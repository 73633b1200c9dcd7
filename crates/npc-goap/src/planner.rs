//! Depth-bounded exhaustive plan search.
//!
//! # Complexity
//!
//! The search explores every applicable-action sequence up to `max_depth`
//! actions long, so its worst case is `O(b^d)` states for branching factor
//! `b` (actions applicable in a state) and depth `d`.  Nothing prunes the
//! tree except the depth bound and the goal test.  With the standard
//! eight-action catalog and the default depth of 10 this stays small because
//! most actions disable their own preconditions after one application, but
//! an action whose effects keep it applicable (or two actions that undo each
//! other) makes the search grow geometrically with depth.

use tracing::debug;

use crate::{GoapAction, WorldState};

pub const DEFAULT_PLAN_DEPTH: usize = 10;

/// An ordered action sequence and its total cost.
///
/// An empty plan means no action sequence within the depth bound reaches
/// the goal.  That is an ordinary outcome, not an error.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Plan {
    pub actions: Vec<GoapAction>,
    pub cost:    f64,
}

impl Plan {
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    /// Action names in execution order.
    pub fn names(&self) -> Vec<&str> {
        self.actions.iter().map(|a| a.name.as_str()).collect()
    }

    pub fn last(&self) -> Option<&GoapAction> {
        self.actions.last()
    }
}

/// Planner over a fixed action catalog.
#[derive(Clone, Debug)]
pub struct GoapPlanner {
    actions:   Vec<GoapAction>,
    max_depth: usize,
}

impl Default for GoapPlanner {
    fn default() -> Self {
        Self::new(crate::default_actions())
    }
}

impl GoapPlanner {
    pub fn new(actions: Vec<GoapAction>) -> Self {
        Self { actions, max_depth: DEFAULT_PLAN_DEPTH }
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn actions(&self) -> &[GoapAction] {
        &self.actions
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// The cheapest plan from `start` to a state satisfying `goal`.
    ///
    /// Goal keys are tested after each action, and a key counts as reached
    /// once any action along the path has produced it.  A plan therefore
    /// always has at least one action, even when `start` already satisfies
    /// `goal`.  Among equal-cost plans the first one found (catalog order,
    /// depth first) wins.
    pub fn plan(&self, start: &WorldState, goal: &WorldState) -> Plan {
        let mut search = Search {
            actions:   &self.actions,
            max_depth: self.max_depth,
            path:      Vec::with_capacity(self.max_depth),
            best:      None,
            visited:   0,
        };
        let needed: Vec<(&str, crate::Fact)> = goal.iter().collect();
        search.expand(start, &needed, 0.0);

        let visited = search.visited;
        let plan = match search.best {
            Some((indices, cost)) => Plan {
                actions: indices.into_iter().map(|i| self.actions[i].clone()).collect(),
                cost,
            },
            None => Plan::default(),
        };
        debug!(
            goal_keys = goal.len(),
            visited,
            steps = plan.len(),
            cost = plan.cost,
            "goap plan search finished"
        );
        plan
    }
}

// ── Search state ──────────────────────────────────────────────────────────────

struct Search<'a> {
    actions:   &'a [GoapAction],
    max_depth: usize,
    /// Catalog indices of the actions on the current path.
    path:      Vec<usize>,
    best:      Option<(Vec<usize>, f64)>,
    visited:   usize,
}

impl Search<'_> {
    fn expand(&mut self, state: &WorldState, needed: &[(&str, crate::Fact)], cost: f64) {
        self.visited += 1;
        if needed.is_empty() {
            if self.best.as_ref().is_none_or(|(_, best)| cost < *best) {
                self.best = Some((self.path.clone(), cost));
            }
            return;
        }
        if self.path.len() >= self.max_depth {
            return;
        }

        let actions = self.actions;
        for (i, action) in actions.iter().enumerate() {
            if !action.applicable(state) {
                continue;
            }
            let next = action.apply(state);
            let still: Vec<(&str, crate::Fact)> =
                needed.iter().copied().filter(|&(k, v)| !next.holds(k, v)).collect();
            self.path.push(i);
            self.expand(&next, &still, cost + action.cost);
            self.path.pop();
        }
    }
}
