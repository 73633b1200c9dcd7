//! Behavior-tree nodes.
//!
//! A [`Node`] is a tagged variant ([`NodeKind`]) plus an ordered list of
//! children.  Composites and decorators interpret their children; conditions
//! and leaves have none.  Nodes own their children outright, and the only
//! per-node mutable state is the `Cooldown` timestamp, so a tree must be built
//! per agent rather than shared: two agents sharing a `Cooldown` would share
//! its timer.

use std::fmt::Write as _;

use crate::Status;

// ── Context traits ────────────────────────────────────────────────────────────

/// Access to simulated time, required by time-dependent nodes.
pub trait Clocked {
    /// Seconds of simulated time elapsed since the start of the run.
    fn now_secs(&self) -> f64;
}

/// A named action or perception leaf.
///
/// Leaves run against the whole context and return a single-tick result.
/// Only leaves that drive a multi-tick action (movement, search) should
/// return [`Status::Running`].
pub trait Leaf<C>: Send {
    /// Stable name used in tree outlines and logs.
    fn name(&self) -> &str;

    fn tick(&mut self, ctx: &mut C) -> Status;
}

/// Read-only predicate evaluated by a `Condition` node.
pub type Predicate<C> = Box<dyn Fn(&C) -> bool + Send + Sync>;

// ── NodeKind ──────────────────────────────────────────────────────────────────

/// What a node does with its children.
pub enum NodeKind<C> {
    /// Tick children in order; stop at the first non-`Success`.
    Sequence,

    /// Tick children in order; stop at the first non-`Failure`.
    Selector,

    /// Tick every child; `Success` once at least `threshold` succeeded this
    /// tick (all children when `None`), `Running` otherwise.  Never fails.
    Parallel { threshold: Option<usize> },

    /// Swap the single child's `Success`/`Failure`.
    Inverter,

    /// Block the single child for `duration_secs` after it last succeeded.
    Cooldown {
        duration_secs: f64,
        last_success:  Option<f64>,
    },

    /// Evaluate a predicate against the context.
    Condition(Predicate<C>),

    /// Run a named leaf.
    Leaf(Box<dyn Leaf<C>>),
}

impl<C> NodeKind<C> {
    /// Short type label used in outlines.
    pub fn label(&self) -> &'static str {
        match self {
            NodeKind::Sequence       => "Sequence",
            NodeKind::Selector       => "Selector",
            NodeKind::Parallel { .. } => "Parallel",
            NodeKind::Inverter       => "Inverter",
            NodeKind::Cooldown { .. } => "Cooldown",
            NodeKind::Condition(_)   => "Condition",
            NodeKind::Leaf(_)        => "Leaf",
        }
    }

    /// Maximum number of children this kind accepts, `None` for unbounded.
    pub(crate) fn max_children(&self) -> Option<usize> {
        match self {
            NodeKind::Sequence | NodeKind::Selector | NodeKind::Parallel { .. } => None,
            NodeKind::Inverter | NodeKind::Cooldown { .. } => Some(1),
            NodeKind::Condition(_) | NodeKind::Leaf(_) => Some(0),
        }
    }
}

// ── Node ──────────────────────────────────────────────────────────────────────

/// One behavior-tree node and its children.
///
/// # Example
///
/// ```rust
/// use npc_behavior::{Clocked, Node, Status};
///
/// struct Ctx { hp: f32 }
/// impl Clocked for Ctx { fn now_secs(&self) -> f64 { 0.0 } }
///
/// let mut root = Node::selector("root")
///     .with(Node::condition("hurt", |c: &Ctx| c.hp < 10.0))
///     .with(Node::inverter("not_hurt").with(Node::condition("hurt", |c: &Ctx| c.hp < 10.0)));
///
/// assert_eq!(root.tick(&mut Ctx { hp: 50.0 }), Status::Success);
/// ```
pub struct Node<C> {
    name:     String,
    kind:     NodeKind<C>,
    children: Vec<Node<C>>,
}

impl<C> Node<C> {
    pub fn new(name: impl Into<String>, kind: NodeKind<C>) -> Self {
        Self { name: name.into(), kind, children: Vec::new() }
    }

    pub fn sequence(name: impl Into<String>) -> Self {
        Self::new(name, NodeKind::Sequence)
    }

    pub fn selector(name: impl Into<String>) -> Self {
        Self::new(name, NodeKind::Selector)
    }

    /// `threshold = None` requires every child to succeed.
    pub fn parallel(name: impl Into<String>, threshold: Option<usize>) -> Self {
        Self::new(name, NodeKind::Parallel { threshold })
    }

    pub fn inverter(name: impl Into<String>) -> Self {
        Self::new(name, NodeKind::Inverter)
    }

    /// A cooldown starts ready: its first tick always reaches the child.
    pub fn cooldown(name: impl Into<String>, duration_secs: f64) -> Self {
        Self::new(name, NodeKind::Cooldown { duration_secs, last_success: None })
    }

    pub fn condition<F>(name: impl Into<String>, predicate: F) -> Self
    where
        F: Fn(&C) -> bool + Send + Sync + 'static,
    {
        Self::new(name, NodeKind::Condition(Box::new(predicate)))
    }

    /// Wrap a leaf; the node takes the leaf's own name.
    pub fn leaf<L: Leaf<C> + 'static>(leaf: L) -> Self {
        let name = leaf.name().to_owned();
        Self::new(name, NodeKind::Leaf(Box::new(leaf)))
    }

    /// Append a child and return `self` (builder style).
    pub fn with(mut self, child: Node<C>) -> Self {
        self.children.push(child);
        self
    }

    /// Append several children in order.
    pub fn with_all<I: IntoIterator<Item = Node<C>>>(mut self, children: I) -> Self {
        self.children.extend(children);
        self
    }

    pub fn push(&mut self, child: Node<C>) {
        self.children.push(child);
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> &NodeKind<C> {
        &self.kind
    }

    pub fn children(&self) -> &[Node<C>] {
        &self.children
    }

    /// Number of nodes in this subtree, including `self`.
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(Node::node_count).sum::<usize>()
    }

    /// Compact single-line description of the subtree shape.
    ///
    /// Leaves print their name; every other node prints `name:Kind`, with
    /// parameters in parentheses and children in brackets, e.g.
    /// `atk:Sequence[in_attack_range,cd:Cooldown(1.2)[attack]]`.
    pub fn outline(&self) -> String {
        let mut out = String::new();
        self.write_outline(&mut out);
        out
    }

    fn write_outline(&self, out: &mut String) {
        match &self.kind {
            NodeKind::Leaf(_) => out.push_str(&self.name),
            NodeKind::Parallel { threshold } => {
                let _ = write!(out, "{}:Parallel", self.name);
                if let Some(t) = threshold {
                    let _ = write!(out, "({t})");
                }
            }
            NodeKind::Cooldown { duration_secs, .. } => {
                let _ = write!(out, "{}:Cooldown({duration_secs})", self.name);
            }
            kind => {
                let _ = write!(out, "{}:{}", self.name, kind.label());
            }
        }
        if !self.children.is_empty() {
            out.push('[');
            for (i, child) in self.children.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                child.write_outline(out);
            }
            out.push(']');
        }
    }
}

impl<C: Clocked> Node<C> {
    /// Evaluate this node once.
    pub fn tick(&mut self, ctx: &mut C) -> Status {
        match &mut self.kind {
            NodeKind::Sequence => {
                for child in &mut self.children {
                    let status = child.tick(ctx);
                    if status != Status::Success {
                        return status;
                    }
                }
                Status::Success
            }

            NodeKind::Selector => {
                for child in &mut self.children {
                    let status = child.tick(ctx);
                    if status != Status::Failure {
                        return status;
                    }
                }
                Status::Failure
            }

            NodeKind::Parallel { threshold } => {
                let required = threshold.unwrap_or(self.children.len());
                let succeeded = self
                    .children
                    .iter_mut()
                    .map(|child| child.tick(ctx))
                    .filter(|s| s.is_success())
                    .count();
                if succeeded >= required { Status::Success } else { Status::Running }
            }

            NodeKind::Inverter => match self.children.first_mut() {
                Some(child) => child.tick(ctx).invert(),
                None => Status::Failure,
            },

            NodeKind::Cooldown { duration_secs, last_success } => {
                let now = ctx.now_secs();
                if let Some(last) = *last_success {
                    if now - last < *duration_secs {
                        return Status::Failure;
                    }
                }
                let Some(child) = self.children.first_mut() else {
                    return Status::Failure;
                };
                let status = child.tick(ctx);
                if status == Status::Success {
                    *last_success = Some(now);
                }
                status
            }

            NodeKind::Condition(predicate) => Status::from_bool(predicate(&*ctx)),

            NodeKind::Leaf(leaf) => leaf.tick(ctx),
        }
    }
}
