//! Decision models an agent can be driven by.

use npc_behavior::{BehaviorResult, BehaviorTree, Clocked, Node, StateMachine, Status, guard_machine};
use npc_core::{BehaviorState, Personality};

use crate::leaves::{self, NpcLeaf};
use crate::{AgentStore, keys};

/// Seconds between two attacks of the same agent.
pub const ATTACK_COOLDOWN_SECS: f64 = 1.2;
/// Health fraction at which non-brave agents break off and flee.
pub const FLEE_HEALTH_FRACTION: f32 = 0.2;

/// Which decision model a spawn should get.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum BrainKind {
    /// Personality-shaped behavior tree.
    #[default]
    Tree,
    /// The guard state machine driven by perception.
    StateMachine,
}

/// An agent's decision model.  Built once per agent and never shared.
pub enum Brain {
    Tree(BehaviorTree<AgentStore>),
    StateMachine(GuardBrain),
}

impl Brain {
    pub fn new(kind: BrainKind, personality: Personality) -> BehaviorResult<Self> {
        Ok(match kind {
            BrainKind::Tree => Brain::Tree(build_tree(personality)?),
            BrainKind::StateMachine => Brain::StateMachine(guard_brain()),
        })
    }

    pub fn kind(&self) -> BrainKind {
        match self {
            Brain::Tree(_) => BrainKind::Tree,
            Brain::StateMachine(_) => BrainKind::StateMachine,
        }
    }

    /// Tree outline, or the machine's current state name.
    pub fn describe(&self) -> String {
        match self {
            Brain::Tree(tree) => tree.outline(),
            Brain::StateMachine(brain) => brain.machine.current().to_owned(),
        }
    }

    pub(crate) fn tick(&mut self, store: &mut AgentStore) -> Status {
        match self {
            Brain::Tree(tree) => tree.tick(store),
            Brain::StateMachine(brain) => brain.tick(store),
        }
    }
}

// ── Behavior tree ─────────────────────────────────────────────────────────────

/// The tree for `personality`.
///
/// ```text
/// root: Selector
/// ├── dead: Sequence [is_dead]
/// ├── combat: Sequence
/// │   ├── enemy_visible
/// │   ├── alert_allies
/// │   └── tactics: Selector        (cowardly: [flee] only)
/// │       ├── flee_guard: Sequence [health_below(0.2), flee]   unless brave
/// │       ├── take_cover                                       cunning only
/// │       ├── engage: Sequence [in_attack_range, attack_cd: Cooldown(1.2) [attack]]
/// │       └── move_to_enemy
/// ├── search: Sequence [is_alerted, search_last_position]
/// ├── patrol: Sequence [has_patrol, patrol]
/// └── idle
/// ```
pub fn build_tree(personality: Personality) -> BehaviorResult<BehaviorTree<AgentStore>> {
    let dead = Node::sequence("dead").with(Node::condition("is_dead", |s: &AgentStore| {
        s.active().is_none_or(|a| !a.is_alive())
    }));

    let mut tactics = Node::selector("tactics");
    if personality == Personality::Cowardly {
        tactics.push(Node::leaf(NpcLeaf::Flee));
    } else {
        if personality != Personality::Brave {
            tactics.push(
                Node::sequence("flee_guard")
                    .with(Node::leaf(NpcLeaf::HealthBelow(FLEE_HEALTH_FRACTION)))
                    .with(Node::leaf(NpcLeaf::Flee)),
            );
        }
        if personality == Personality::Cunning {
            tactics.push(Node::leaf(NpcLeaf::TakeCover));
        }
        tactics.push(
            Node::sequence("engage")
                .with(Node::leaf(NpcLeaf::InAttackRange))
                .with(Node::cooldown("attack_cd", ATTACK_COOLDOWN_SECS).with(Node::leaf(NpcLeaf::Attack))),
        );
        tactics.push(Node::leaf(NpcLeaf::MoveToEnemy));
    }

    let combat = Node::sequence("combat")
        .with(Node::leaf(NpcLeaf::EnemyVisible))
        .with(Node::leaf(NpcLeaf::AlertAllies))
        .with(tactics);

    let search = Node::sequence("search")
        .with(Node::leaf(NpcLeaf::IsAlerted))
        .with(Node::leaf(NpcLeaf::SearchLastPosition));

    let patrol = Node::sequence("patrol")
        .with(Node::leaf(NpcLeaf::HasPatrol))
        .with(Node::leaf(NpcLeaf::Patrol));

    BehaviorTree::new(
        Node::selector("root")
            .with(dead)
            .with(combat)
            .with(search)
            .with(patrol)
            .with(Node::leaf(NpcLeaf::Idle)),
    )
}

// ── Guard state machine ───────────────────────────────────────────────────────

/// The guard state machine plus the perception step that feeds it.
///
/// Each tick first derives at most one trigger from what the agent can
/// perceive, fires it, then runs the (possibly new) state's action.
pub struct GuardBrain {
    machine: StateMachine<AgentStore>,
}

impl GuardBrain {
    pub fn machine(&self) -> &StateMachine<AgentStore> {
        &self.machine
    }

    pub fn current(&self) -> &str {
        self.machine.current()
    }

    fn tick(&mut self, store: &mut AgentStore) -> Status {
        if let Some(event) = perceive(self.machine.current(), store) {
            self.machine.trigger(event);
        }
        self.machine.tick(store);
        Status::Running
    }
}

/// The guard state machine with an action bound to every state.
pub fn guard_brain() -> GuardBrain {
    let machine = guard_machine::<AgentStore>()
        .with_tick("patrol", |s: &mut AgentStore| {
            if leaves::patrol(s).is_failure() {
                leaves::idle(s);
            }
        })
        .with_tick("investigate", |s: &mut AgentStore| {
            // A noise with nothing to follow up is dropped.
            if leaves::approach_last_position(s, BehaviorState::Investigate).is_failure() {
                if let Some(me) = s.active_mut() {
                    me.blackboard.remove(keys::ALERTED);
                }
            }
        })
        .with_tick("chase", |s: &mut AgentStore| {
            leaves::move_to_enemy(s);
        })
        .with_tick("attack", |s: &mut AgentStore| {
            let now = s.now_secs();
            let ready = s
                .active()
                .and_then(|a| a.blackboard.number(keys::LAST_ATTACK_AT))
                .is_none_or(|last| now - last >= ATTACK_COOLDOWN_SECS);
            if ready && leaves::attack(s).is_success() {
                if let Some(me) = s.active_mut() {
                    me.blackboard.set(keys::LAST_ATTACK_AT, now);
                }
            }
        })
        .with_tick("search", |s: &mut AgentStore| {
            leaves::search_last_position(s);
        })
        .with_tick("flee", |s: &mut AgentStore| {
            leaves::flee(s);
        });
    GuardBrain { machine }
}

/// The trigger the current perception warrants in `state`, if any.
fn perceive(state: &str, store: &mut AgentStore) -> Option<&'static str> {
    let id = store.active_id();
    let me = store.active()?;
    let alerted = me.blackboard.flag(keys::ALERTED);
    let has_lead = me.blackboard.has(keys::LAST_ENEMY_POS);
    let low = me.stats.health_fraction() <= FLEE_HEALTH_FRACTION;
    let engaged = me.blackboard.agent(keys::ENEMY);

    match state {
        "patrol" => {
            if leaves::enemy_visible(store).is_success() {
                Some("spot")
            } else if alerted {
                Some("noise")
            } else {
                None
            }
        }
        "investigate" | "search" => {
            if leaves::enemy_visible(store).is_success() {
                Some(if state == "search" { "found" } else { "spot" })
            } else if !has_lead {
                Some("timeout")
            } else {
                None
            }
        }
        "chase" => {
            if leaves::enemy_visible(store).is_failure() {
                Some("lost")
            } else if leaves::in_attack_range(store) {
                Some("in_range")
            } else {
                None
            }
        }
        "attack" => {
            if engaged.is_none_or(|e| !store.is_living(e)) {
                Some("killed")
            } else if low {
                Some("low_hp")
            } else if !leaves::in_attack_range(store) {
                Some("out")
            } else {
                None
            }
        }
        "flee" => {
            let safe = store.nearest_visible_enemy(id).is_none();
            safe.then_some("safe")
        }
        _ => None,
    }
}
