use approx::assert_relative_eq;
use track_chart::core::{
    AxisScale, ChartMode, LinearScale, NumericColumn, PixelRanges, Scale, SelectedColumns,
    TrackRecord, build_scales,
};
use track_chart::error::ChartError;

fn danceability_records(values: &[f64]) -> Vec<TrackRecord> {
    values
        .iter()
        .enumerate()
        .map(|(index, value)| {
            TrackRecord::new(format!("t{index}"), format!("Track {index}"))
                .with_value(NumericColumn::Danceability, *value)
                .with_value(NumericColumn::Energy, *value * 2.0)
        })
        .collect()
}

fn ranges() -> PixelRanges {
    PixelRanges::new((50.0, 450.0), (350.0, 50.0))
}

#[test]
fn scatter_scale_maps_domain_ends_to_range_ends() {
    let records = danceability_records(&[0.2, 0.5, 0.9]);
    let columns = SelectedColumns::new(NumericColumn::Danceability, NumericColumn::Energy);
    let mut scales =
        build_scales(&records, ChartMode::Scatter, columns, ranges(), 5.0).expect("build scales");

    assert_relative_eq!(scales.x.forward(0.2), 50.0);
    assert_relative_eq!(scales.x.forward(0.9), 450.0);
    // (0.5 - 0.2) / 0.7 of the 400px span.
    assert_relative_eq!(scales.x.forward(0.5), 221.428_571_428_571_4, epsilon = 1e-9);
    assert_eq!(scales.x.domain(), (0.2, 0.9));
    assert_eq!(scales.y.domain(), (0.4, 1.8));
}

#[test]
fn degenerate_domain_maps_to_range_midpoint() {
    let records = danceability_records(&[0.5]);
    let columns = SelectedColumns::new(NumericColumn::Danceability, NumericColumn::Energy);
    let mut scales =
        build_scales(&records, ChartMode::Scatter, columns, ranges(), 5.0).expect("build scales");

    let px = scales.x.forward(0.5);
    assert!(px.is_finite());
    assert_eq!(px, 250.0);
    assert_eq!(scales.x.invert(123.0), 0.5);
    assert_eq!(scales.y.forward(1.0), 200.0);
}

#[test]
fn scatter_forward_invert_round_trip() {
    let scale = LinearScale::new((-3.0, 17.0), (55.0, 995.0)).expect("valid scale");
    let mut forward = scale;

    for value in [-3.0, 0.0, 4.25, 16.999] {
        let px = forward.forward(value);
        assert!((scale.invert(px) - value).abs() <= 1e-9);
    }
}

#[test]
fn histogram_mode_pairs_bucketed_x_with_stacked_y() {
    let records = danceability_records(&[0.1, 0.3, 0.9]);
    let columns = SelectedColumns::new(NumericColumn::Danceability, NumericColumn::Energy);
    let scales = build_scales(&records, ChartMode::Histogram, columns, ranges(), 5.0)
        .expect("build scales");

    assert!(matches!(scales.x, AxisScale::Bucketed(_)));
    let stacked = scales.y.as_stacked().expect("stacked y scale");
    assert_eq!(stacked.step_px(), 10.0);
    assert_eq!(stacked.baseline_px(), 350.0);
    assert_eq!(stacked.totals().iter().sum::<usize>(), 3);
    // The y selection does not feed histogram layout.
    assert_eq!(stacked.domain(), (0.1, 0.9));
}

#[test]
fn empty_record_set_is_rejected() {
    let columns = SelectedColumns::new(NumericColumn::Danceability, NumericColumn::Energy);
    let result = build_scales(&[], ChartMode::Scatter, columns, ranges(), 5.0);
    assert!(matches!(result, Err(ChartError::EmptyRecordSet)));
}

#[test]
fn non_finite_column_value_is_rejected() {
    let records = danceability_records(&[0.1, f64::NAN]);
    let columns = SelectedColumns::new(NumericColumn::Danceability, NumericColumn::Energy);
    let result = build_scales(&records, ChartMode::Scatter, columns, ranges(), 5.0);
    assert!(result.is_err());
}
