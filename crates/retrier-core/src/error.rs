use std::error::Error;

use thiserror::Error;

use crate::policy::fatal::causes;

/// Type-erased error returned by step actions.
pub type BoxError = Box<dyn Error + Send + Sync + 'static>;

/// Last error of a step whose retries ended without success.
#[derive(Debug, Error)]
#[error("{name}: {source}")]
pub struct StepError {
    name: String,
    #[source]
    source: BoxError,
}

impl StepError {
    pub fn new(name: impl Into<String>, source: impl Into<BoxError>) -> Self {
        Self {
            name: name.into(),
            source: source.into(),
        }
    }

    /// Name of the step that failed.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The error returned by the last attempt.
    pub fn cause(&self) -> &(dyn Error + Send + Sync + 'static) {
        &*self.source
    }

    pub fn into_cause(self) -> BoxError {
        self.source
    }
}

/// Error returned by the orchestration entry points.
///
/// The variant tells which topology produced the failure; the wrapped [`StepError`] carries the step name and the
/// original cause. Use [`RetryError::is`] to test for a sentinel anywhere in the chain.
#[derive(Debug, Error)]
pub enum RetryError {
    #[error(transparent)]
    Step(StepError),

    #[error("chain: {0}")]
    Chain(#[source] StepError),

    #[error("parallel: {0}")]
    Parallel(#[source] StepError),

    #[error("invalid plan: {0}")]
    Plan(String),
}

impl RetryError {
    /// Underlying step failure, if any.
    pub fn step(&self) -> Option<&StepError> {
        match self {
            RetryError::Step(e) | RetryError::Chain(e) | RetryError::Parallel(e) => Some(e),
            RetryError::Plan(_) => None,
        }
    }

    /// Name of the failing step, if any.
    pub fn step_name(&self) -> Option<&str> {
        self.step().map(StepError::name)
    }

    /// Returns `true` if `sentinel` is this error or any of its causes, compared by value.
    pub fn is<E>(&self, sentinel: &E) -> bool
    where
        E: Error + PartialEq + 'static,
    {
        if let Some(step) = self.step() {
            return causes(step.cause()).any(|e| e.downcast_ref::<E>() == Some(sentinel));
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Error, PartialEq)]
    enum Check {
        #[error("refused")]
        Refused,
        #[error("timeout")]
        Timeout,
    }

    #[derive(Debug, Error)]
    #[error("connect: {0}")]
    struct Wrapped(#[source] Check);

    #[test]
    fn display_includes_topology_and_step_name() {
        let single = RetryError::Step(StepError::new("db", Check::Refused));
        let chain = RetryError::Chain(StepError::new("db", Check::Refused));
        let parallel = RetryError::Parallel(StepError::new("db", Check::Refused));

        assert_eq!(single.to_string(), "db: refused");
        assert_eq!(chain.to_string(), "chain: db: refused");
        assert_eq!(parallel.to_string(), "parallel: db: refused");
    }

    #[test]
    fn is_matches_direct_cause() {
        let err = RetryError::Chain(StepError::new("db", Check::Refused));
        assert!(err.is(&Check::Refused));
        assert!(!err.is(&Check::Timeout));
    }

    #[test]
    fn is_walks_wrapped_causes() {
        let err = RetryError::Parallel(StepError::new("db", Wrapped(Check::Timeout)));
        assert!(err.is(&Check::Timeout));
        assert!(!err.is(&Check::Refused));
    }

    #[test]
    fn is_ignores_matching_message_of_other_type() {
        let err = RetryError::Step(StepError::new("db", "refused"));
        assert!(!err.is(&Check::Refused));
    }

    #[test]
    fn source_chain_reaches_original_error() {
        let err = RetryError::Chain(StepError::new("db", Check::Refused));
        let step = err.source().expect("chain error has a source");
        assert_eq!(step.to_string(), "db: refused");
        let cause = step.source().expect("step error has a source");
        assert_eq!(cause.downcast_ref::<Check>(), Some(&Check::Refused));
    }

    #[test]
    fn plan_error_has_no_step() {
        let err = RetryError::Plan("no steps".into());
        assert!(err.step_name().is_none());
        assert!(!err.is(&Check::Refused));
    }
}
