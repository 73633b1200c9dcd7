//! `npc-behavior`: the decision structures agents are driven by.
//!
//! # Crate layout
//!
//! | Module         | Contents                                                       |
//! |----------------|----------------------------------------------------------------|
//! | [`status`]     | `Status` (`Success`, `Failure`, `Running`)                     |
//! | [`node`]       | `Node<C>`, `NodeKind<C>`, `Leaf<C>` trait, `Clocked` trait     |
//! | [`tree`]       | `BehaviorTree<C>`, the validated root node                     |
//! | [`blackboard`] | `Blackboard`, `Value` (per-agent scratch memory)               |
//! | [`fsm`]        | `StateMachine<A>`, `State<A>`, `guard_machine`                 |
//! | [`error`]      | `BehaviorError`, `BehaviorResult<T>`                           |
//!
//! # Design notes
//!
//! Both decision models are generic over the context they tick against.  The
//! engine never looks inside that context: composites only sequence their
//! children, and the one time-dependent node (`Cooldown`) reads simulated
//! time through the [`Clocked`] trait.  Leaves are trait objects so each
//! named leaf is a small, separately testable type.
//!
//! Trees are owned, so a tree can never contain a cycle and there is never a
//! missing root.  What *can* be malformed (a decorator with two children, a
//! leaf with children, an unreachable `Parallel` threshold) is rejected by
//! [`BehaviorTree::new`], before the first tick.

pub mod blackboard;
pub mod error;
pub mod fsm;
pub mod node;
pub mod status;
pub mod tree;


pub use blackboard::{Blackboard, Value};
pub use error::{BehaviorError, BehaviorResult};
pub use fsm::{State, StateMachine, guard_machine};
pub use node::{Clocked, Leaf, Node, NodeKind, Predicate};
pub use status::Status;
pub use tree::BehaviorTree;
