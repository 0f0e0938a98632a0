use std::path::PathBuf;
use thiserror::Error;
use crate::models::TaskId;

/// A field constraint rejected at the mutation boundary.
///
/// Raised before anything is persisted, so a failed write never leaves a
/// partial record behind.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("title must not be empty")]
    EmptyTitle,

    #[error("invalid priority `{0}` (expected low, medium or high)")]
    InvalidPriority(String),

    #[error("invalid time `{0}` (expected HH:MM, 24-hour)")]
    InvalidTime(String),

    #[error("invalid date `{0}` (expected YYYY-MM-DD)")]
    InvalidDate(String),

    #[error("a due time requires a due date")]
    TimeWithoutDate,

    #[error("invalid theme `{0}` (expected normal or horror)")]
    InvalidTheme(String),
}

/// Why the backing file could not be used.
#[derive(Error, Debug)]
pub enum StoreFault {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error("invalid persisted data: {0}")]
    Invalid(String),
}

#[derive(Error, Debug)]
pub enum TaskError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("task not found: {0}")]
    NotFound(TaskId),

    #[error("no task matches id `{0}`")]
    UnknownId(String),

    #[error("id prefix `{0}` matches more than one task")]
    AmbiguousId(String),

    #[error("task store unavailable at `{}`: {source}", path.display())]
    StoreUnavailable {
        path: PathBuf,
        #[source]
        source: StoreFault,
    },

    #[error("unknown reward `{0}`")]
    UnknownReward(String),

    #[error("reward `{reward}` unlocks at level {required}, current level is {level}")]
    RewardLocked {
        reward: String,
        required: u32,
        level: u32,
    },

    #[error("unknown template `{0}`")]
    UnknownTemplate(String),

    #[error("terminal error: {0}")]
    Terminal(#[from] std::io::Error),
}

impl TaskError {
    pub(crate) fn store(path: impl Into<PathBuf>, source: impl Into<StoreFault>) -> Self {
        TaskError::StoreUnavailable {
            path: path.into(),
            source: source.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, TaskError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn terminal_failure_is_a_task_error() {
        let err: TaskError = io::Error::new(io::ErrorKind::Other, "no tty").into();
        assert!(matches!(err, TaskError::Terminal(_)));
        assert_eq!(err.to_string(), "terminal error: no tty");
    }
}
