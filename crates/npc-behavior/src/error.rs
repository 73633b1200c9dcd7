use thiserror::Error;

#[derive(Debug, Error)]
pub enum BehaviorError {
    #[error("invalid behavior tree at '{path}': {reason}")]
    InvalidTree { path: String, reason: String },

    #[error("state machine has no state named '{0}'")]
    UnknownState(String),
}

pub type BehaviorResult<T> = Result<T, BehaviorError>;
