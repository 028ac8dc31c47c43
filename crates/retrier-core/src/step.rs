use std::fmt;

use crate::error::BoxError;

/// Boxed step body.
pub type Action<'a> = Box<dyn FnMut() -> Result<(), BoxError> + Send + 'a>;

/// A named, retryable unit of work.
///
/// The action is invoked once per attempt and must tolerate being called repeatedly.
/// Steps may borrow from the caller (`'a`): parallel execution runs them on scoped threads.
pub struct Step<'a> {
    pub(crate) name: String,
    pub(crate) action: Action<'a>,
}

impl<'a> Step<'a> {
    /// Wrap `action`; any error type convertible into [`BoxError`] is accepted.
    pub fn new<F, E>(name: impl Into<String>, mut action: F) -> Self
    where
        F: FnMut() -> Result<(), E> + Send + 'a,
        E: Into<BoxError>,
    {
        Self {
            name: name.into(),
            action: Box::new(move || -> Result<(), BoxError> { action().map_err(Into::into) }),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Debug for Step<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Step")
            .field("name", &self.name)
            .field("action", &"<fn>")
            .finish()
    }
}
