use std::time::Duration;

use retrier_model::BackoffStrategy;

const NANOS_PER_SEC: u128 = 1_000_000_000;

/// Delay before the attempt following attempt `n`.
///
/// All arithmetic saturates at [`Duration::MAX`].
pub(crate) fn backoff(
    strategy: BackoffStrategy,
    base: Duration,
    jitter: Duration,
    n: u32,
) -> Duration {
    match strategy {
        BackoffStrategy::Simple => base.saturating_add(scale(jitter, u64::from(n))),
        BackoffStrategy::Linear => scale(base, u64::from(n)).saturating_add(jitter),
        BackoffStrategy::Exponential => scale(base, pow2(n)).saturating_add(jitter),
        BackoffStrategy::Fibonacci => scale(base, fibonacci(n)).saturating_add(jitter),
    }
}

/// `2^n`, saturating at `u64::MAX`.
fn pow2(n: u32) -> u64 {
    1u64.checked_shl(n).unwrap_or(u64::MAX)
}

/// Iterative Fibonacci with `fib(0) = 0`, `fib(1) = 1`, saturating at `u64::MAX`.
pub(crate) fn fibonacci(n: u32) -> u64 {
    let (mut prev, mut curr) = (0u64, 1u64);
    if n == 0 {
        return prev;
    }
    for _ in 1..n {
        let next = prev.saturating_add(curr);
        prev = curr;
        curr = next;
        if curr == u64::MAX {
            break;
        }
    }
    curr
}

fn scale(d: Duration, k: u64) -> Duration {
    let nanos = d.as_nanos().saturating_mul(u128::from(k));
    match u64::try_from(nanos / NANOS_PER_SEC) {
        Ok(secs) if secs < u64::MAX => Duration::new(secs, (nanos % NANOS_PER_SEC) as u32),
        _ => Duration::MAX,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MS: Duration = Duration::from_millis(1);

    #[test]
    fn fibonacci_sequence() {
        let got: Vec<u64> = (0..12).map(fibonacci).collect();
        assert_eq!(got, vec![0, 1, 1, 2, 3, 5, 8, 13, 21, 34, 55, 89]);
    }

    #[test]
    fn fibonacci_is_fast_for_large_n() {
        assert_eq!(fibonacci(90), 2_880_067_194_370_816_120);
        assert_eq!(fibonacci(10_000), u64::MAX);
    }

    #[test]
    fn pow2_saturates() {
        assert_eq!(pow2(0), 1);
        assert_eq!(pow2(10), 1024);
        assert_eq!(pow2(64), u64::MAX);
    }

    #[test]
    fn scale_clamps_to_duration_max() {
        assert_eq!(scale(Duration::from_secs(1), u64::MAX), Duration::MAX);
        assert_eq!(scale(Duration::MAX, 2), Duration::MAX);
        assert_eq!(scale(1500 * MS, 3), 4500 * MS);
    }

    #[test]
    fn simple_scales_jitter() {
        let d = backoff(BackoffStrategy::Simple, 100 * MS, 10 * MS, 3);
        assert_eq!(d, 130 * MS);
    }

    #[test]
    fn linear_scales_base() {
        let d = backoff(BackoffStrategy::Linear, 100 * MS, 10 * MS, 3);
        assert_eq!(d, 310 * MS);
    }

    #[test]
    fn exponential_doubles_base() {
        let got: Vec<Duration> = (1..=4)
            .map(|n| backoff(BackoffStrategy::Exponential, 100 * MS, Duration::ZERO, n))
            .collect();
        assert_eq!(got, vec![200 * MS, 400 * MS, 800 * MS, 1600 * MS]);
    }

    #[test]
    fn fibonacci_follows_sequence() {
        let got: Vec<Duration> = (1..=6)
            .map(|n| backoff(BackoffStrategy::Fibonacci, 100 * MS, 5 * MS, n))
            .collect();
        assert_eq!(
            got,
            vec![105 * MS, 105 * MS, 205 * MS, 305 * MS, 505 * MS, 805 * MS]
        );
    }

    #[test]
    fn huge_attempts_saturate_instead_of_panicking() {
        for s in [
            BackoffStrategy::Simple,
            BackoffStrategy::Linear,
            BackoffStrategy::Exponential,
            BackoffStrategy::Fibonacci,
        ] {
            let hour = Duration::from_secs(3600);
            let d = backoff(s, hour, hour, u32::MAX);
            assert!(d >= Duration::from_secs(3600), "{s}: {d:?}");
        }
        let d = backoff(
            BackoffStrategy::Exponential,
            Duration::from_secs(1),
            Duration::ZERO,
            200,
        );
        assert_eq!(d, Duration::MAX);

        let d = backoff(
            BackoffStrategy::Fibonacci,
            Duration::from_secs(1),
            Duration::from_millis(5),
            10_000,
        );
        assert_eq!(d, Duration::MAX);
    }
}
