use retrier_model::PolicySpec;

use crate::policy::{Opt, Policy, option};

/// Options equivalent to `spec`, in a fixed order.
///
/// Callers append their own options (fatal sentinels, a sink, CLI overrides) before building the policy;
/// later options win.
pub fn to_options(spec: &PolicySpec) -> Vec<Opt> {
    vec![
        option::count(spec.attempts),
        option::sleep_ms(spec.delay_ms),
        option::jitter_ms(spec.jitter_ms),
        option::strategy(spec.strategy),
        option::parallelism(spec.parallelism),
        option::verbose(spec.verbose),
    ]
}

/// Build a validated policy from `spec` alone.
pub fn to_policy(spec: &PolicySpec) -> Policy {
    Policy::new(to_options(spec))
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use retrier_model::BackoffStrategy;

    use super::*;
    use crate::policy::MIN_DELAY;

    #[test]
    fn zero_valued_spec_maps_to_defaults() {
        let p = to_policy(&PolicySpec::default());
        let d = Policy::default();

        assert_eq!(p.attempts(), d.attempts());
        assert_eq!(p.base_delay(), d.base_delay());
        assert_eq!(p.jitter(), d.jitter());
        assert_eq!(p.parallelism(), d.parallelism());
        assert_eq!(p.strategy(), d.strategy());
    }

    #[test]
    fn spec_matches_equivalent_options() {
        let spec = PolicySpec {
            attempts: 4,
            delay_ms: 250,
            jitter_ms: 30,
            strategy: BackoffStrategy::Linear,
            parallelism: 3,
            verbose: true,
        };
        let p = to_policy(&spec);

        assert_eq!(p.attempts(), 4);
        assert_eq!(p.base_delay(), Duration::from_millis(250));
        assert_eq!(p.jitter(), Duration::from_millis(30));
        assert_eq!(p.strategy(), BackoffStrategy::Linear);
        assert_eq!(p.parallelism(), 3);
        assert!(p.verbose());
    }

    #[test]
    fn negative_spec_values_are_clamped() {
        let spec = PolicySpec {
            attempts: -10,
            delay_ms: -3_600_000,
            jitter_ms: -60_000,
            parallelism: -6,
            ..Default::default()
        };
        let p = to_policy(&spec);

        assert_eq!(p.attempts(), 1);
        assert_eq!(p.base_delay(), MIN_DELAY);
        assert_eq!(p.jitter(), Duration::ZERO);
        assert_eq!(p.parallelism(), 0);
    }

    #[test]
    fn appended_options_override_spec() {
        let spec = PolicySpec {
            attempts: 2,
            ..Default::default()
        };
        let mut opts = to_options(&spec);
        opts.push(option::count(9));

        assert_eq!(Policy::new(opts).attempts(), 9);
    }
}
