use track_chart::core::{
    ChartMode, NumericColumn, PixelRanges, ScalePair, SelectedColumns, TrackRecord, Viewport,
    build_scales,
};
use track_chart::render::{
    ChartStyle, Ease, MarkerPhase, RenderEngine, RenderFrame, TransitionTiming,
};

fn record(id: &str, danceability: f64, energy: f64) -> TrackRecord {
    TrackRecord::new(id, format!("Title {id}"))
        .with_value(NumericColumn::Danceability, danceability)
        .with_value(NumericColumn::Energy, energy)
}

fn scatter_scales(records: &[TrackRecord]) -> ScalePair {
    build_scales(
        records,
        ChartMode::Scatter,
        SelectedColumns::new(NumericColumn::Danceability, NumericColumn::Energy),
        PixelRanges::new((50.0, 450.0), (350.0, 50.0)),
        5.0,
    )
    .expect("build scales")
}

fn linear_engine() -> RenderEngine {
    let timing = TransitionTiming {
        duration_ms: 1_000.0,
        stagger_ms: 5.0,
        ease: Ease::Linear,
    };
    RenderEngine::new(timing, 5.0, 10.0).expect("engine")
}

fn three_records() -> Vec<TrackRecord> {
    vec![
        record("a", 0.0, 0.0),
        record("b", 0.5, 0.5),
        record("c", 1.0, 1.0),
    ]
}

#[test]
fn new_markers_grow_from_collapsed_to_full_size() {
    let records = three_records();
    let mut scales = scatter_scales(&records);
    let mut engine = linear_engine();

    let summary = engine.bind(&records, &mut scales, 0.0).expect("bind");
    assert_eq!(summary.entered, 3);
    assert_eq!(summary.updated, 0);

    let marker = engine.marker("a").expect("marker a");
    assert_eq!(marker.phase, MarkerPhase::Entering);
    assert_eq!(marker.current.radius, 0.0);
    assert_eq!(marker.current.opacity, 0.0);

    engine.advance(500.0);
    assert_eq!(engine.marker("a").expect("marker a").current.radius, 2.5);

    engine.advance(1_000.0);
    let marker = engine.marker("c").expect("marker c");
    assert_eq!(marker.phase, MarkerPhase::Idle);
    assert_eq!((marker.current.x, marker.current.y), (450.0, 50.0));
    assert_eq!(marker.current.radius, 5.0);
    assert!(!engine.has_pending_transitions());
}

#[test]
fn updates_are_staggered_by_record_index() {
    let records = three_records();
    let mut scales = scatter_scales(&records);
    let mut engine = linear_engine();
    engine.bind(&records, &mut scales, 0.0).expect("bind");
    engine.advance(1_000.0);

    let moved = vec![
        record("a", 0.0, 1.0),
        record("b", 0.5, 0.0),
        record("c", 1.0, 0.5),
    ];
    let mut scales = scatter_scales(&moved);
    let summary = engine.bind(&moved, &mut scales, 2_000.0).expect("rebind");
    assert_eq!(summary.updated, 3);

    let delays: Vec<f64> = engine
        .markers()
        .map(|marker| marker.transition.expect("in flight").delay_ms)
        .collect();
    assert_eq!(delays, vec![0.0, 5.0, 10.0]);

    engine.advance(2_005.0);
    let b = engine.marker("b").expect("marker b");
    assert_eq!(b.phase, MarkerPhase::Updating);
    assert_eq!(b.current.y, 200.0);
}

#[test]
fn new_transition_starts_from_current_geometry() {
    let records = three_records();
    let mut scales = scatter_scales(&records);
    let mut engine = linear_engine();
    engine.bind(&records, &mut scales, 0.0).expect("bind");
    engine.advance(500.0);

    engine.bind(&records, &mut scales, 500.0).expect("rebind");
    let a = engine.marker("a").expect("marker a");
    let transition = a.transition.expect("in flight");
    assert_eq!(a.phase, MarkerPhase::Updating);
    assert_eq!(transition.from.radius, 2.5);
    assert_eq!(transition.start_ms, 500.0);
    assert_eq!(transition.to.radius, 5.0);
}

#[test]
fn removed_records_exit_then_disappear() {
    let records = three_records();
    let mut scales = scatter_scales(&records);
    let mut engine = linear_engine();
    engine.bind(&records, &mut scales, 0.0).expect("bind");
    engine.advance(1_000.0);

    let remaining = vec![record("a", 0.0, 0.0), record("b", 0.5, 0.5)];
    let mut scales = scatter_scales(&remaining);
    let summary = engine.bind(&remaining, &mut scales, 1_000.0).expect("rebind");
    assert_eq!(summary.exiting, 1);
    assert_eq!(
        engine.marker("c").expect("marker c").phase,
        MarkerPhase::Exiting
    );
    assert!(engine.hit_test(450.0, 50.0).is_none());

    engine.advance(1_500.0);
    assert_eq!(engine.marker_count(), 3);
    engine.advance(2_000.0);
    assert_eq!(engine.marker_count(), 2);
    assert!(engine.marker("c").is_none());
}

#[test]
fn exiting_marker_is_revived_when_record_returns() {
    let records = three_records();
    let mut scales = scatter_scales(&records);
    let mut engine = linear_engine();
    engine.bind(&records, &mut scales, 0.0).expect("bind");
    engine.advance(1_000.0);

    let remaining = vec![record("a", 0.0, 0.0), record("b", 0.5, 0.5)];
    let mut scales = scatter_scales(&remaining);
    engine.bind(&remaining, &mut scales, 1_000.0).expect("exit c");

    let mut scales = scatter_scales(&records);
    let summary = engine.bind(&records, &mut scales, 1_200.0).expect("revive c");
    assert_eq!(summary.updated, 3);
    assert_eq!(summary.entered, 0);
    assert_eq!(
        engine.marker("c").expect("marker c").phase,
        MarkerPhase::Updating
    );
}

#[test]
fn tooltip_follows_pointer_enter_and_leave() {
    let records = three_records();
    let mut scales = scatter_scales(&records);
    let mut engine = linear_engine();
    engine.bind(&records, &mut scales, 0.0).expect("bind");
    engine.advance(1_000.0);

    let hovered = engine.hit_test(251.0, 199.0).expect("marker under pointer");
    assert_eq!(hovered.record_id, "b");

    assert!(engine.on_pointer_enter("b", 251.0, 199.0));
    let tooltip = engine.tooltip();
    assert!(tooltip.visible);
    assert_eq!(tooltip.x, 261.0);
    assert_eq!(tooltip.y, 199.0);
    assert_eq!(tooltip.title, "Title b");
    assert_eq!(tooltip.column_label, "Danceability");
    assert_eq!(tooltip.value, 0.5);
    assert_eq!(tooltip.lines()[0], "Title: Title b");

    let mut frame = RenderFrame::new(Viewport::new(500, 400));
    engine.append_primitives(&mut frame, ChartStyle::default());
    assert_eq!(frame.circles.len(), 3);
    assert_eq!(frame.rects.len(), 1);
    assert_eq!(frame.texts.len(), 2);
    frame.validate().expect("valid frame");

    engine.on_pointer_leave();
    assert!(!engine.tooltip().visible);
    assert!(!engine.on_pointer_enter("missing", 0.0, 0.0));
}

#[test]
fn duplicate_ids_keep_first_occurrence() {
    let records = vec![record("a", 0.0, 0.0), record("a", 1.0, 1.0)];
    let mut scales = scatter_scales(&records);
    let mut engine = linear_engine();

    let summary = engine.bind(&records, &mut scales, 0.0).expect("bind");
    assert_eq!(summary.entered, 1);
    assert_eq!(engine.marker("a").expect("marker a").target.x, 50.0);
}

#[test]
fn rebinding_same_histogram_scales_keeps_stack_offsets() {
    let records = vec![
        record("a", 0.1, 0.0),
        record("b", 0.1, 0.0),
        record("c", 0.9, 0.0),
        record("d", 0.1, 0.0),
    ];
    let mut scales = build_scales(
        &records,
        ChartMode::Histogram,
        SelectedColumns::new(NumericColumn::Danceability, NumericColumn::Energy),
        PixelRanges::new((50.0, 450.0), (350.0, 50.0)),
        5.0,
    )
    .expect("build scales");
    let mut engine = linear_engine();

    engine.bind(&records, &mut scales, 0.0).expect("first bind");
    let first: Vec<(f64, f64)> = engine
        .markers()
        .map(|marker| (marker.target.x, marker.target.y))
        .collect();

    engine.bind(&records, &mut scales, 100.0).expect("second bind");
    let second: Vec<(f64, f64)> = engine
        .markers()
        .map(|marker| (marker.target.x, marker.target.y))
        .collect();

    assert_eq!(first, second);
    let stacked: Vec<f64> = first.iter().map(|(_, y)| *y).collect();
    assert_eq!(stacked, vec![350.0, 340.0, 350.0, 330.0]);
}
