//! Finite-state machine, the explicit-state alternative to a behavior tree.
//!
//! A [`StateMachine`] holds named [`State`]s, each with an optional enter,
//! exit and tick callback and a table of `trigger → destination` transitions.
//! Triggers that the current state does not register are a reported no-op.

use std::collections::BTreeMap;
use std::fmt;

use crate::{BehaviorError, BehaviorResult};

type Hook = Box<dyn FnMut() + Send>;
type TickHook<A> = Box<dyn FnMut(&mut A) + Send>;

// ── State ─────────────────────────────────────────────────────────────────────

pub struct State<A> {
    name:        String,
    on_enter:    Option<Hook>,
    on_exit:     Option<Hook>,
    on_tick:     Option<TickHook<A>>,
    transitions: BTreeMap<String, String>,
}

impl<A> State<A> {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name:        name.into(),
            on_enter:    None,
            on_exit:     None,
            on_tick:     None,
            transitions: BTreeMap::new(),
        }
    }

    /// Register `trigger` as a transition to state `to`.
    pub fn via(mut self, trigger: impl Into<String>, to: impl Into<String>) -> Self {
        self.transitions.insert(trigger.into(), to.into());
        self
    }

    pub fn on_enter<F: FnMut() + Send + 'static>(mut self, f: F) -> Self {
        self.on_enter = Some(Box::new(f));
        self
    }

    pub fn on_exit<F: FnMut() + Send + 'static>(mut self, f: F) -> Self {
        self.on_exit = Some(Box::new(f));
        self
    }

    pub fn on_tick<F: FnMut(&mut A) + Send + 'static>(mut self, f: F) -> Self {
        self.on_tick = Some(Box::new(f));
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Destination for `trigger`, if registered.
    pub fn target(&self, trigger: &str) -> Option<&str> {
        self.transitions.get(trigger).map(String::as_str)
    }

    /// Registered triggers in lexical order.
    pub fn triggers(&self) -> impl Iterator<Item = &str> {
        self.transitions.keys().map(String::as_str)
    }
}

impl<A> fmt::Debug for State<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("State")
            .field("name", &self.name)
            .field("transitions", &self.transitions)
            .finish_non_exhaustive()
    }
}

// ── StateMachine ──────────────────────────────────────────────────────────────

pub struct StateMachine<A> {
    states:   BTreeMap<String, State<A>>,
    current:  String,
    previous: String,
}

impl<A> StateMachine<A> {
    /// A machine positioned at `initial`.  The initial state's enter
    /// callback is not run.
    pub fn new(initial: impl Into<String>) -> Self {
        let initial = initial.into();
        Self { states: BTreeMap::new(), previous: initial.clone(), current: initial }
    }

    /// Register a state, replacing any state with the same name.
    pub fn add(mut self, state: State<A>) -> Self {
        self.states.insert(state.name.clone(), state);
        self
    }

    /// Attach a tick callback to the already-registered state `name`.
    /// Unknown names are ignored; [`validate`](Self::validate) does not see
    /// callbacks.
    pub fn with_tick<F: FnMut(&mut A) + Send + 'static>(mut self, name: &str, f: F) -> Self {
        if let Some(state) = self.states.get_mut(name) {
            state.on_tick = Some(Box::new(f));
        }
        self
    }

    pub fn current(&self) -> &str {
        &self.current
    }

    pub fn previous(&self) -> &str {
        &self.previous
    }

    pub fn state(&self, name: &str) -> Option<&State<A>> {
        self.states.get(name)
    }

    pub fn state_count(&self) -> usize {
        self.states.len()
    }

    /// Fire `event` against the current state.
    ///
    /// On a registered transition: run the current state's exit callback,
    /// switch states, run the new state's enter callback, and return `true`.
    /// Otherwise nothing changes and `false` is returned.
    pub fn trigger(&mut self, event: &str) -> bool {
        let Some(state) = self.states.get_mut(&self.current) else {
            return false;
        };
        let Some(to) = state.transitions.get(event).cloned() else {
            return false;
        };
        if let Some(exit) = state.on_exit.as_mut() {
            exit();
        }
        self.previous = std::mem::replace(&mut self.current, to);
        if let Some(enter) = self.states.get_mut(&self.current).and_then(|s| s.on_enter.as_mut()) {
            enter();
        }
        true
    }

    /// Run the current state's tick callback, if any.
    pub fn tick(&mut self, agent: &mut A) {
        if let Some(tick) = self.states.get_mut(&self.current).and_then(|s| s.on_tick.as_mut()) {
            tick(agent);
        }
    }

    /// Check that the current state and every transition target are
    /// registered states.
    pub fn validate(&self) -> BehaviorResult<()> {
        if !self.states.contains_key(&self.current) {
            return Err(BehaviorError::UnknownState(self.current.clone()));
        }
        for state in self.states.values() {
            for to in state.transitions.values() {
                if !self.states.contains_key(to) {
                    return Err(BehaviorError::UnknownState(to.clone()));
                }
            }
        }
        Ok(())
    }
}

impl<A> fmt::Debug for StateMachine<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StateMachine")
            .field("current", &self.current)
            .field("previous", &self.previous)
            .field("states", &self.states.keys().collect::<Vec<_>>())
            .finish()
    }
}

/// The standard guard workflow, starting in `patrol`.
///
/// | State         | Trigger → destination                                 |
/// |---------------|-------------------------------------------------------|
/// | `patrol`      | `spot` → chase, `noise` → investigate                 |
/// | `investigate` | `spot` → chase, `timeout` → patrol                    |
/// | `chase`       | `in_range` → attack, `lost` → search                  |
/// | `attack`      | `out` → chase, `low_hp` → flee, `killed` → patrol     |
/// | `search`      | `found` → chase, `timeout` → patrol                   |
/// | `flee`        | `safe` → patrol                                       |
/// | `dead`        | (terminal)                                            |
pub fn guard_machine<A>() -> StateMachine<A> {
    StateMachine::new("patrol")
        .add(State::new("patrol").via("spot", "chase").via("noise", "investigate"))
        .add(State::new("investigate").via("spot", "chase").via("timeout", "patrol"))
        .add(State::new("chase").via("in_range", "attack").via("lost", "search"))
        .add(
            State::new("attack")
                .via("out", "chase")
                .via("low_hp", "flee")
                .via("killed", "patrol"),
        )
        .add(State::new("search").via("found", "chase").via("timeout", "patrol"))
        .add(State::new("flee").via("safe", "patrol"))
        .add(State::new("dead"))
}
