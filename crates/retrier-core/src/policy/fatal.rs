//! Fatal-error sentinels.
//!
//! A sentinel is a typed error value. An attempt error is fatal when the error itself or any error in its
//! [`Error::source`] chain has the sentinel's type and compares equal to it. Messages are never compared.
use std::{error::Error, fmt, iter, sync::Arc};

type Matcher = dyn Fn(&(dyn Error + 'static)) -> bool + Send + Sync;

/// Type-erased, comparable error value that stops retrying when matched.
#[derive(Clone)]
pub struct Sentinel {
    label: String,
    matcher: Arc<Matcher>,
}

impl Sentinel {
    pub fn new<E>(sentinel: E) -> Self
    where
        E: Error + PartialEq + Send + Sync + 'static,
    {
        Self {
            label: sentinel.to_string(),
            matcher: Arc::new(move |err| err.downcast_ref::<E>() == Some(&sentinel)),
        }
    }

    /// Display form of the sentinel value, for logs.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Returns `true` if `err` or any of its causes equals this sentinel.
    pub fn matches(&self, err: &(dyn Error + 'static)) -> bool {
        causes(err).any(|e| (self.matcher)(e))
    }
}

impl fmt::Debug for Sentinel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Sentinel").field(&self.label).finish()
    }
}

/// Iterate `err` followed by every error in its source chain.
pub(crate) fn causes<'a>(
    err: &'a (dyn Error + 'static),
) -> impl Iterator<Item = &'a (dyn Error + 'static)> {
    iter::successors(Some(err), |&e| e.source())
}
