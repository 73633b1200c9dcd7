use crate::{BehaviorError, BehaviorResult, Clocked, Node, NodeKind, Status};

/// A validated behavior tree.
///
/// Construction checks the arity and parameters of every node once, so
/// [`tick`](Self::tick) never has to deal with a malformed shape.
pub struct BehaviorTree<C> {
    root: Node<C>,
}

impl<C> BehaviorTree<C> {
    /// Validate `root` and wrap it.
    ///
    /// Rejected shapes:
    /// - `Inverter`/`Cooldown` with more than one child
    /// - `Condition`/`Leaf` with any children
    /// - `Parallel` whose threshold exceeds its child count
    /// - `Cooldown` with a negative or non-finite duration
    pub fn new(root: Node<C>) -> BehaviorResult<Self> {
        validate(&root, root.name())?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Node<C> {
        &self.root
    }

    pub fn outline(&self) -> String {
        self.root.outline()
    }

    pub fn node_count(&self) -> usize {
        self.root.node_count()
    }
}

impl<C: Clocked> BehaviorTree<C> {
    /// Tick the root once.
    #[inline]
    pub fn tick(&mut self, ctx: &mut C) -> Status {
        self.root.tick(ctx)
    }
}

fn validate<C>(node: &Node<C>, path: &str) -> BehaviorResult<()> {
    let invalid = |reason: String| BehaviorError::InvalidTree { path: path.to_owned(), reason };
    let kind = node.kind();
    let n = node.children().len();

    if let Some(max) = kind.max_children() {
        if n > max {
            return Err(invalid(format!("{} accepts at most {max} children, has {n}", kind.label())));
        }
    }
    match kind {
        NodeKind::Parallel { threshold: Some(t) } if *t > n => {
            return Err(invalid(format!("threshold {t} exceeds {n} children")));
        }
        NodeKind::Cooldown { duration_secs, .. }
            if !duration_secs.is_finite() || *duration_secs < 0.0 =>
        {
            return Err(invalid(format!("cooldown duration {duration_secs} is invalid")));
        }
        _ => {}
    }

    for child in node.children() {
        validate(child, &format!("{path}/{}", child.name()))?;
    }
    Ok(())
}
