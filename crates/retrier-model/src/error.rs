use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("unknown backoff strategy: {0}")]
    UnknownStrategy(String),

    #[error("unknown topology: {0}")]
    UnknownTopology(String),

    #[error("invalid model: {0}")]
    Invalid(String),
}

pub type ModelResult<T> = Result<T, ModelError>;
