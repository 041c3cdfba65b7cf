use track_chart::core::{NumericColumn, TrackRecord, derive_view};

#[test]
fn backend_payload_deserializes_with_renamed_fields() {
    let payload = r#"{
        "idx": 3, "id": "5vYA1mW9g2Coh1HUFUSmlb", "title": "3AM",
        "rating": 2, "danceability": 0.521, "energy": 0.673, "key": 8,
        "loudness": -8.685, "mode": 1, "acousticness": 0.00573,
        "instrumentalness": 0.0, "liveness": 0.12, "valence": 0.543,
        "tempo": 108.031, "duration_ms": 225947, "time_signature": 4,
        "num_bars": 100, "num_sections": 8, "num_segments": 830, "song_class": 1
    }"#;

    let record: TrackRecord = serde_json::from_str(payload).expect("valid payload");
    assert_eq!(record.user_rating, 0.0);
    assert_eq!(record.duration, 225_947.0);
    assert_eq!(NumericColumn::Class.value(&record), 1.0);

    let view = derive_view(std::slice::from_ref(&record));
    assert_eq!(view[0].duration, 225.0);
}
