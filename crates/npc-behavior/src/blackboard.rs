//! Per-agent scratch memory shared between leaves.

use npc_core::{AgentId, Position};
use rustc_hash::FxHashMap;

/// A value stored on a [`Blackboard`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Value {
    Position(Position),
    Agent(AgentId),
    Flag(bool),
    Number(f64),
    Null,
}

impl From<Position> for Value {
    fn from(p: Position) -> Self { Value::Position(p) }
}

impl From<AgentId> for Value {
    fn from(id: AgentId) -> Self { Value::Agent(id) }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self { Value::Flag(b) }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self { Value::Number(n) }
}

/// String-keyed store of [`Value`]s.
///
/// Typed getters return `None` when the key is absent *or* holds a different
/// variant; [`flag`](Self::flag) treats both cases as `false`.
#[derive(Clone, Debug, Default)]
pub struct Blackboard {
    entries: FxHashMap<String, Value>,
}

impl Blackboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, key: &str, value: impl Into<Value>) {
        self.entries.insert(key.to_owned(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    pub fn has(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.entries.remove(key)
    }

    pub fn position(&self, key: &str) -> Option<Position> {
        match self.get(key) {
            Some(Value::Position(p)) => Some(*p),
            _ => None,
        }
    }

    pub fn agent(&self, key: &str) -> Option<AgentId> {
        match self.get(key) {
            Some(Value::Agent(id)) => Some(*id),
            _ => None,
        }
    }

    pub fn flag(&self, key: &str) -> bool {
        matches!(self.get(key), Some(Value::Flag(true)))
    }

    pub fn number(&self, key: &str) -> Option<f64> {
        match self.get(key) {
            Some(Value::Number(n)) => Some(*n),
            _ => None,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
