//! Orchestration entry points.
//!
//! Every topology is built on the same retry loop ([`Policy::single`]):
//! - [`Policy::chain`] runs steps strictly in order and stops at the first unrecovered failure;
//! - [`Policy::parallel`] fans steps out over scoped worker threads and waits for all of them;
//! - [`Policy::run`] dispatches on a [`Topology`] value.
mod chain;
mod parallel;
mod single;

use retrier_model::Topology;
use tracing::debug;

use crate::{error::RetryError, policy::Policy, step::Step};

impl Policy {
    /// Execute `steps` with the given topology.
    ///
    /// `Topology::Single` requires exactly one step.
    pub fn run<'a>(&self, topology: Topology, steps: Vec<Step<'a>>) -> Result<(), RetryError> {
        debug!(%topology, steps = steps.len(), policy = %self, "running steps");
        match topology {
            Topology::Single => {
                let count = steps.len();
                let mut iter = steps.into_iter();
                match (iter.next(), iter.next()) {
                    (Some(mut step), None) => self
                        .retry(&step.name, &mut *step.action)
                        .map_err(RetryError::Step),
                    _ => Err(RetryError::Plan(format!(
                        "single topology expects exactly one step, got {count}"
                    ))),
                }
            }
            Topology::Chain => self.chain(steps),
            Topology::Parallel => self.parallel(steps),
        }
    }
}
