use std::{
    any::Any,
    panic::{self, AssertUnwindSafe},
    sync::{Mutex, MutexGuard, PoisonError},
    thread, vec,
};

use tracing::{debug, instrument, trace};

use crate::{
    error::{RetryError, StepError},
    policy::Policy,
    step::Step,
};

/// Pending steps shared by the workers.
type Queue<'a> = Mutex<vec::IntoIter<Step<'a>>>;

/// What the workers report back: the first step failure and the first panic payload, each in completion order.
#[derive(Default)]
struct Outcome {
    failure: Mutex<Option<StepError>>,
    panicked: Mutex<Option<Box<dyn Any + Send>>>,
}

impl Policy {
    /// Run `steps` concurrently, each under the full retry policy, and wait for all of them.
    ///
    /// At most [`Policy::parallelism`] steps are in flight (unlimited when `0`). A failing step never cancels its
    /// siblings. If any step fails, the first failure to complete is returned; the others are dropped.
    /// An empty set succeeds. A panicking step does not stop the queue: every remaining step still runs, then the
    /// first panic resumes on the caller.
    #[instrument(level = "debug", skip_all)]
    pub fn parallel<'a, I>(&self, steps: I) -> Result<(), RetryError>
    where
        I: IntoIterator<Item = Step<'a>>,
    {
        let steps: Vec<Step<'a>> = steps.into_iter().collect();
        if steps.is_empty() {
            return Ok(());
        }
        let workers = self.worker_count(steps.len());
        debug!(steps = steps.len(), workers, "fanning out");

        let queue: Queue<'a> = Mutex::new(steps.into_iter());
        let outcome = Outcome::default();

        thread::scope(|scope| {
            for _ in 0..workers {
                scope.spawn(|| self.drain(&queue, &outcome));
            }
        });

        let Outcome { failure, panicked } = outcome;
        if let Some(payload) = panicked.into_inner().unwrap_or_else(PoisonError::into_inner) {
            panic::resume_unwind(payload);
        }
        match failure.into_inner().unwrap_or_else(PoisonError::into_inner) {
            Some(err) => Err(RetryError::Parallel(err)),
            None => Ok(()),
        }
    }

    fn worker_count(&self, steps: usize) -> usize {
        match self.parallelism() {
            0 => steps,
            cap => cap.min(steps),
        }
    }

    /// Worker body: take steps until the queue is empty.
    fn drain(&self, queue: &Queue<'_>, outcome: &Outcome) {
        loop {
            let next = lock(queue).next();
            let Some(mut step) = next else {
                return;
            };
            let name = step.name.as_str();
            let action = &mut *step.action;
            match panic::catch_unwind(AssertUnwindSafe(|| self.retry(name, action))) {
                Ok(Ok(())) => {}
                Ok(Err(err)) => {
                    trace!(step = %name, "parallel step failed");
                    lock(&outcome.failure).get_or_insert(err);
                }
                Err(payload) => {
                    debug!(step = %name, "parallel step panicked");
                    lock(&outcome.panicked).get_or_insert(payload);
                }
            }
        }
    }
}

fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    m.lock().unwrap_or_else(PoisonError::into_inner)
}
