//! Property-based tests for the core data model
//!
//! These tests pin down the invariants of the quantile, moment, and
//! coverage primitives across a wide range of generated inputs.

#[cfg(test)]
mod property_tests {
    use interval_core::*;
    use proptest::prelude::*;

    proptest! {
        // Property: quantiles never leave the data range
        #[test]
        fn prop_quantile_within_data_range(
            values in prop::collection::vec(-50.0..50.0f64, 1..100),
            p in 0.0..=1.0f64
        ) {
            let mut sorted = values.clone();
            sorted.sort_by(|a, b| a.total_cmp(b));

            let q = empirical_quantile(&sorted, p).unwrap();
            let tol = 1e-9 * (1.0 + sorted[sorted.len() - 1].abs().max(sorted[0].abs()));
            prop_assert!(q >= sorted[0] - tol && q <= sorted[sorted.len() - 1] + tol,
                "quantile {} left the range [{}, {}]",
                q, sorted[0], sorted[sorted.len() - 1]);
        }

        // Property: quantiles are non-decreasing in p
        #[test]
        fn prop_quantile_monotone_in_p(
            values in prop::collection::vec(-50.0..50.0f64, 2..100),
            p1 in 0.0..=1.0f64,
            p2 in 0.0..=1.0f64
        ) {
            let mut sorted = values.clone();
            sorted.sort_by(|a, b| a.total_cmp(b));

            let (lo, hi) = if p1 <= p2 { (p1, p2) } else { (p2, p1) };
            let q_lo = empirical_quantile(&sorted, lo).unwrap();
            let q_hi = empirical_quantile(&sorted, hi).unwrap();
            prop_assert!(q_hi >= q_lo - 1e-9,
                "quantile at p={} was {} but p={} gave {}", lo, q_lo, hi, q_hi);
        }

        // Property: the mean stays inside the data range and the sd is
        // non-negative whenever it exists
        #[test]
        fn prop_moments_are_well_formed(
            values in prop::collection::vec(-50.0..50.0f64, 1..100)
        ) {
            let moments = GroupMoments::from_values(&values).unwrap();
            let min = values.iter().cloned().fold(f64::INFINITY, f64::min);
            let max = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
            let tol = 1e-9 * (1.0 + max.abs().max(min.abs()));

            prop_assert_eq!(moments.n, values.len());
            prop_assert!(moments.mean >= min - tol && moments.mean <= max + tol);
            match moments.sd {
                Some(sd) => {
                    prop_assert!(values.len() >= 2);
                    prop_assert!(sd >= 0.0);
                }
                None => prop_assert_eq!(values.len(), 1),
            }
        }

        // Property: coverage grows with k and stays inside [0, 1)
        #[test]
        fn prop_coverage_monotone_in_k(
            k in 0.0..5.0f64,
            delta in 0.0..2.0f64
        ) {
            let narrow = CoverageSpec::new(k).unwrap();
            let wide = CoverageSpec::new(k + delta).unwrap();

            prop_assert!(narrow.coverage() >= 0.0 && narrow.coverage() < 1.0);
            prop_assert!(wide.coverage() + 1e-12 >= narrow.coverage());
        }
    }

    // Regression test for grouping edge cases
    #[test]
    fn test_grouping_preserves_every_observation() {
        let observations = vec![
            Observation::new(1.0, "ci", "small"),
            Observation::new(2.0, "ci", "small"),
            Observation::new(3.0, "pi", "small"),
            Observation::new(4.0, "ci", "large"),
        ];

        let groups = group_observations(&observations);
        let total: usize = groups.values().map(Vec::len).sum();
        assert_eq!(total, observations.len());

        for (key, values) in &groups {
            for value in values {
                assert!(observations
                    .iter()
                    .any(|o| &o.key() == key && o.value == *value));
            }
        }
    }
}
