use tracing::{debug, instrument};

use crate::{error::RetryError, policy::Policy, step::Step};

impl Policy {
    /// Run `steps` one after another, each under the full retry policy.
    ///
    /// Stops at the first step that fails for good; later steps are never invoked. An empty chain succeeds.
    #[instrument(level = "debug", skip_all)]
    pub fn chain<'a, I>(&self, steps: I) -> Result<(), RetryError>
    where
        I: IntoIterator<Item = Step<'a>>,
    {
        for mut step in steps {
            debug!(step = %step.name, "chain step starting");
            self.retry(&step.name, &mut *step.action)
                .map_err(RetryError::Chain)?;
        }
        Ok(())
    }
}
