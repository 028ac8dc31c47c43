use std::{error::Error, thread};

use tracing::{debug, instrument, trace};

use crate::{
    error::{BoxError, RetryError, StepError},
    policy::Policy,
    sink::AttemptRecord,
};

impl Policy {
    /// Run `action` until it succeeds, hits a fatal sentinel, or the attempt limit is reached.
    ///
    /// Between failed attempts the calling thread sleeps for [`Policy::delay`]. No delay follows the last attempt or a
    /// fatal error. On failure the last error is returned wrapped with `name`.
    pub fn single<F, E>(&self, name: &str, mut action: F) -> Result<(), RetryError>
    where
        F: FnMut() -> Result<(), E>,
        E: Into<BoxError>,
    {
        self.retry(name, &mut || -> Result<(), BoxError> { action().map_err(Into::into) })
            .map_err(RetryError::Step)
    }

    /// The retry loop shared by every topology.
    #[instrument(level = "trace", skip(self, action), fields(attempts = self.attempts()))]
    pub(crate) fn retry(
        &self,
        name: &str,
        action: &mut dyn FnMut() -> Result<(), BoxError>,
    ) -> Result<(), StepError> {
        let mut attempt = 0;
        loop {
            let err = match action() {
                Ok(()) => {
                    trace!(attempt, "step succeeded");
                    return Ok(());
                }
                Err(err) => err,
            };
            let cause: &(dyn Error + 'static) = &*err;

            if self.is_fatal(cause) {
                debug!(attempt, error = %cause, "fatal error; retries aborted");
                return Err(StepError::new(name, err));
            }
            if self.verbose() {
                self.sink().record_failure(&AttemptRecord {
                    step: name,
                    attempt,
                    error: cause,
                });
            }
            if attempt + 1 >= self.attempts() {
                debug!(attempt, error = %cause, "attempts exhausted");
                return Err(StepError::new(name, err));
            }

            let delay = self.delay(attempt + 1);
            trace!(attempt, ?delay, "waiting before next attempt");
            thread::sleep(delay);
            attempt += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, Instant};

    use crate::policy::option;
    use crate::run::fixtures::*;

    #[test]
    fn succeeds_after_transient_failures() {
        let table = [(0usize, 1usize), (1, 2), (2, 3)];
        for (fail_first, want_calls) in table {
            let (policy, _) = fast_policy(vec![]);
            let f = Failer::new(fail_first, Flaky::Fail);

            let res = policy.single("test-case", || f.call());
            assert!(res.is_ok(), "fail_first {fail_first}: {res:?}");
            assert_eq!(f.calls(), want_calls, "fail_first {fail_first}");
        }
    }

    #[test]
    fn exhausts_attempts_and_wraps_last_error() {
        let (policy, _) = fast_policy(vec![]);
        let f = Failer::new(usize::MAX, Flaky::Fail);

        let err = policy.single("test-case", || f.call()).unwrap_err();
        assert_eq!(f.calls(), MAX_TRIES as usize);
        assert!(err.is(&Flaky::Fail));
        assert_eq!(err.step_name(), Some("test-case"));
        assert_eq!(err.to_string(), "test-case: test fail");
    }

    #[test]
    fn fatal_error_stops_immediately() {
        let (policy, sink) = fast_policy(vec![option::fatal(Flaky::Fatal)]);
        let f = Failer::new(usize::MAX, Flaky::Fatal);

        let err = policy.single("fatal", || f.call()).unwrap_err();
        assert_eq!(f.calls(), 1);
        assert!(err.is(&Flaky::Fatal));
        assert!(sink.records().is_empty(), "fatal failures are not reported");
    }

    #[test]
    fn non_fatal_error_is_retried_when_other_sentinel_registered() {
        let (policy, _) = fast_policy(vec![option::fatal(Flaky::Fatal)]);
        let f = Failer::new(usize::MAX, Flaky::Fail);

        assert!(policy.single("x", || f.call()).is_err());
        assert_eq!(f.calls(), MAX_TRIES as usize);
    }

    #[test]
    fn single_attempt_means_no_retry_and_no_delay() {
        let policy = crate::Policy::new([option::count(1), option::sleep(Duration::from_secs(30))]);
        let f = Failer::new(usize::MAX, Flaky::Fail);

        let started = Instant::now();
        assert!(policy.single("once", || f.call()).is_err());
        assert_eq!(f.calls(), 1);
        assert!(started.elapsed() < Duration::from_secs(5));
    }

    #[test]
    fn no_delay_after_last_attempt() {
        let policy = crate::Policy::new([
            option::count(2),
            option::sleep(Duration::from_millis(50)),
            option::strategy(retrier_model::BackoffStrategy::Linear),
        ]);
        let f = Failer::new(usize::MAX, Flaky::Fail);

        let started = Instant::now();
        assert!(policy.single("twice", || f.call()).is_err());
        let elapsed = started.elapsed();
        assert!(elapsed >= Duration::from_millis(50), "{elapsed:?}");
        assert!(elapsed < Duration::from_millis(140), "{elapsed:?}");
    }

    #[test]
    fn verbose_reports_each_failed_attempt() {
        let (policy, sink) = fast_policy(vec![]);
        let f = Failer::new(2, Flaky::Fail);

        assert!(policy.single("health", || f.call()).is_ok());
        assert_eq!(
            sink.records(),
            vec![
                ("health".to_string(), 0, "test fail".to_string()),
                ("health".to_string(), 1, "test fail".to_string()),
            ]
        );
    }

    #[test]
    fn quiet_policy_reports_nothing() {
        let (policy, sink) = fast_policy(vec![option::verbose(false)]);
        let f = Failer::new(usize::MAX, Flaky::Fail);

        assert!(policy.single("health", || f.call()).is_err());
        assert!(sink.records().is_empty());
    }

    #[test]
    fn accepts_string_errors() {
        let (policy, _) = fast_policy(vec![]);
        let err = policy.single("str", || Err::<(), _>("boom")).unwrap_err();
        assert_eq!(err.to_string(), "str: boom");
    }
}
