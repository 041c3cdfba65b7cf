use std::collections::HashSet;

use proptest::prelude::*;
use track_chart::core::{
    BucketStackScale, LinearScale, N_BUCKETS, Scale, bucket_for_normalized, bucket_index,
};

proptest! {
    #[test]
    fn linear_scale_round_trip_property(
        domain_start in -1_000_000.0f64..1_000_000.0,
        domain_span in 0.001f64..1_000_000.0,
        value_factor in 0.0f64..1.0
    ) {
        let domain_end = domain_start + domain_span;
        let value = domain_start + value_factor * domain_span;

        let mut scale = LinearScale::new((domain_start, domain_end), (55.0, 2043.0))
            .expect("valid scale");
        let px = scale.forward(value);
        let recovered = scale.invert(px);

        prop_assert!((recovered - value).abs() <= 1e-6 * domain_span.max(1.0));
    }

    #[test]
    fn bucket_index_stays_in_range(normalized in -10.0f64..10.0) {
        let bucket = bucket_for_normalized(normalized);
        prop_assert!(bucket < N_BUCKETS);
    }

    #[test]
    fn stacking_never_overlaps_within_a_bucket(
        values in proptest::collection::vec(0.0f64..1.0, 1..64)
    ) {
        let mut scale = BucketStackScale::new((0.0, 1.0), (600.0, 20.0), 10.0)
            .expect("stack scale");
        scale.tally(values.iter().copied());

        let mut seen = HashSet::new();
        for value in &values {
            let px = scale.forward(*value);
            let bucket = bucket_index((0.0, 1.0), *value);
            prop_assert!(seen.insert((bucket, px.to_bits())));
        }
        prop_assert_eq!(scale.counters(), scale.totals());
    }
}
