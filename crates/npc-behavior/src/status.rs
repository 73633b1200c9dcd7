//! Status returned by behavior nodes.

use std::fmt;

/// The result of evaluating a behavior node for one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Status {
    /// The node achieved what it set out to do this tick.
    Success,

    /// The node could not do what it set out to do (a condition was false,
    /// a required blackboard entry was missing, ...).
    Failure,

    /// A multi-tick action is in progress and wants to be ticked again.
    Running,
}

impl Status {
    #[inline]
    pub fn is_success(self) -> bool {
        matches!(self, Status::Success)
    }

    #[inline]
    pub fn is_failure(self) -> bool {
        matches!(self, Status::Failure)
    }

    #[inline]
    pub fn is_running(self) -> bool {
        matches!(self, Status::Running)
    }

    /// Swap `Success` and `Failure`; `Running` passes through unchanged.
    #[inline]
    pub fn invert(self) -> Self {
        match self {
            Status::Success => Status::Failure,
            Status::Failure => Status::Success,
            Status::Running => Status::Running,
        }
    }

    /// `Success` when `cond` holds, `Failure` otherwise.
    #[inline]
    pub fn from_bool(cond: bool) -> Self {
        if cond { Status::Success } else { Status::Failure }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Status::Success => "SUCCESS",
            Status::Failure => "FAILURE",
            Status::Running => "RUNNING",
        })
    }
}
