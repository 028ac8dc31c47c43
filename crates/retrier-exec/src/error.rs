use thiserror::Error;

/// Outcome of a failed command attempt.
///
/// Values compare by content so they can be registered as fatal sentinels
/// (e.g. `NonZeroExit { code: 2 }` stops retrying on exit code 2 only).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExecError {
    #[error("command not found: {command}")]
    NotFound { command: String },

    #[error("process exited with non-zero code: {code}")]
    NonZeroExit { code: i32 },

    #[error("process terminated by signal")]
    Signaled,

    #[error("io error: {0}")]
    Io(String),

    #[error("invalid specification: {0}")]
    InvalidSpec(String),
}
