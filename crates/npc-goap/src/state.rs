//! World-state facts.

use std::collections::BTreeMap;
use std::fmt;

/// A single world-state value.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum Fact {
    Bool(bool),
    Int(i64),
}

impl From<bool> for Fact {
    fn from(b: bool) -> Self { Fact::Bool(b) }
}

impl From<i64> for Fact {
    fn from(n: i64) -> Self { Fact::Int(n) }
}

impl From<i32> for Fact {
    fn from(n: i32) -> Self { Fact::Int(i64::from(n)) }
}

impl fmt::Display for Fact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Fact::Bool(b) => write!(f, "{b}"),
            Fact::Int(n)  => write!(f, "{n}"),
        }
    }
}

/// A key → [`Fact`] mapping.
///
/// Used both for full world states and for partial ones (goals,
/// preconditions, effects).  Ordered so that iteration, and therefore
/// planning, is deterministic.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct WorldState {
    facts: BTreeMap<String, Fact>,
}

impl WorldState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, key: &str, value: impl Into<Fact>) -> Self {
        self.set(key, value);
        self
    }

    pub fn set(&mut self, key: &str, value: impl Into<Fact>) {
        self.facts.insert(key.to_owned(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<Fact> {
        self.facts.get(key).copied()
    }

    /// `true` iff `key` is present and equal to `value`.
    pub fn holds(&self, key: &str, value: Fact) -> bool {
        self.get(key) == Some(value)
    }

    /// `true` iff every entry of `partial` holds in `self`.  A missing key
    /// never matches.
    pub fn satisfies(&self, partial: &WorldState) -> bool {
        partial.iter().all(|(k, v)| self.holds(k, v))
    }

    /// A copy of `self` with every entry of `effects` written over it.
    pub fn merged(&self, effects: &WorldState) -> WorldState {
        let mut next = self.clone();
        for (k, v) in effects.iter() {
            next.facts.insert(k.to_owned(), v);
        }
        next
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Fact)> {
        self.facts.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn len(&self) -> usize {
        self.facts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.facts.is_empty()
    }
}

impl<K: Into<String>, V: Into<Fact>> FromIterator<(K, V)> for WorldState {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self { facts: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect() }
    }
}
