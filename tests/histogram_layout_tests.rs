use track_chart::core::{
    BucketStackScale, BucketedScale, ChartMode, N_BUCKETS, NumericColumn, PixelRanges, Scale,
    SelectedColumns, TrackRecord, bucket_for_normalized, bucket_index, build_scales,
};

fn records(values: &[f64]) -> Vec<TrackRecord> {
    values
        .iter()
        .enumerate()
        .map(|(index, value)| {
            TrackRecord::new(format!("t{index}"), format!("Track {index}"))
                .with_value(NumericColumn::Danceability, *value)
        })
        .collect()
}

#[test]
fn markers_in_one_bucket_stack_by_one_diameter() {
    let records = records(&[0.05, 0.05, 0.05, 0.05, 0.05]);
    let columns = SelectedColumns::new(NumericColumn::Danceability, NumericColumn::Energy);
    let ranges = PixelRanges::new((55.0, 495.0), (350.0, 50.0));
    let mut scales = build_scales(&records, ChartMode::Histogram, columns, ranges, 5.0)
        .expect("build scales");

    scales.begin_pass();
    let offsets: Vec<f64> = records
        .iter()
        .map(|record| scales.project(record).1)
        .collect();
    assert_eq!(offsets, vec![350.0, 340.0, 330.0, 320.0, 310.0]);
}

#[test]
fn rerender_with_same_scales_yields_same_offsets() {
    let records = records(&[0.1, 0.9, 0.1, 0.5, 0.1]);
    let columns = SelectedColumns::new(NumericColumn::Danceability, NumericColumn::Energy);
    let ranges = PixelRanges::new((55.0, 495.0), (350.0, 50.0));
    let mut scales = build_scales(&records, ChartMode::Histogram, columns, ranges, 5.0)
        .expect("build scales");

    let pass = |scales: &mut track_chart::core::ScalePair| -> Vec<(f64, f64)> {
        scales.begin_pass();
        records.iter().map(|record| scales.project(record)).collect()
    };
    let first = pass(&mut scales);
    let second = pass(&mut scales);
    assert_eq!(first, second);
    assert_eq!(first[0].1, 350.0);
    assert_eq!(first[2].1, 340.0);
    assert_eq!(first[4].1, 330.0);
}

#[test]
fn clone_starts_with_clean_counters() {
    let mut stack = BucketStackScale::new((0.0, 1.0), (300.0, 20.0), 10.0).expect("stack scale");
    stack.tally([0.1, 0.1, 0.95]);
    assert_eq!(stack.forward(0.1), 300.0);
    assert_eq!(stack.forward(0.1), 290.0);
    assert_eq!(stack.counters()[0], 2);

    let mut cloned = stack.clone();
    assert_eq!(cloned.counters(), [0; N_BUCKETS]);
    assert_eq!(cloned.totals(), stack.totals());
    assert_eq!(cloned.forward(0.1), 300.0);
}

#[test]
fn boundaries_belong_to_lower_bucket() {
    assert_eq!(bucket_for_normalized(0.0), 0);
    assert_eq!(bucket_for_normalized(0.2), 0);
    assert_eq!(bucket_for_normalized(0.21), 1);
    assert_eq!(bucket_for_normalized(0.4), 1);
    assert_eq!(bucket_for_normalized(1.0), N_BUCKETS - 1);
    assert_eq!(bucket_for_normalized(f64::NAN), 0);
}

#[test]
fn degenerate_domain_puts_everything_in_first_bucket() {
    assert_eq!(bucket_index((0.5, 0.5), 0.5), 0);
    let scale = BucketedScale::new((0.5, 0.5), (0.0, 500.0)).expect("bucketed scale");
    assert_eq!(scale.map(0.5), 50.0);
}

#[test]
fn bucketed_x_snaps_to_bucket_midpoints() {
    let mut scale = BucketedScale::new((0.0, 10.0), (0.0, 500.0)).expect("bucketed scale");
    assert_eq!(scale.forward(0.5), 50.0);
    assert_eq!(scale.forward(1.9), 50.0);
    assert_eq!(scale.forward(5.0), 250.0);
    assert_eq!(scale.forward(10.0), 450.0);
    assert_eq!(scale.invert(260.0), 5.0);
    assert_eq!(scale.ticks().len(), N_BUCKETS + 1);
}

#[test]
fn stack_invert_reports_slot() {
    let stack = BucketStackScale::new((0.0, 1.0), (300.0, 20.0), 10.0).expect("stack scale");
    assert_eq!(stack.invert(300.0), 0.0);
    assert_eq!(stack.invert(270.0), 3.0);
    assert_eq!(stack.invert(310.0), 0.0);
}
