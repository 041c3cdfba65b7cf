use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

/// One catalog track as delivered by the fetch collaborator.
///
/// Field names follow the backend song payload (`duration_ms`, `song_class`,
/// `user_rating`, ...). Records are treated as immutable; the chart only ever
/// reads them or derives a separate view with [`derive_view`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackRecord {
    pub idx: f64,
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub user_rating: f64,
    pub rating: f64,
    pub danceability: f64,
    pub energy: f64,
    pub key: f64,
    pub loudness: f64,
    pub mode: f64,
    pub acousticness: f64,
    pub instrumentalness: f64,
    pub liveness: f64,
    pub valence: f64,
    pub tempo: f64,
    /// Track length in milliseconds.
    #[serde(rename = "duration_ms", alias = "duration")]
    pub duration: f64,
    pub time_signature: f64,
    pub num_bars: f64,
    pub num_sections: f64,
    pub num_segments: f64,
    #[serde(rename = "song_class", alias = "class")]
    pub class: f64,
}

impl TrackRecord {
    /// Creates a record with every numeric field zeroed.
    #[must_use]
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            idx: 0.0,
            id: id.into(),
            title: title.into(),
            user_rating: 0.0,
            rating: 0.0,
            danceability: 0.0,
            energy: 0.0,
            key: 0.0,
            loudness: 0.0,
            mode: 0.0,
            acousticness: 0.0,
            instrumentalness: 0.0,
            liveness: 0.0,
            valence: 0.0,
            tempo: 0.0,
            duration: 0.0,
            time_signature: 0.0,
            num_bars: 0.0,
            num_sections: 0.0,
            num_segments: 0.0,
            class: 0.0,
        }
    }

    /// Returns a copy with `column` set to `value`.
    #[must_use]
    pub fn with_value(mut self, column: NumericColumn, value: f64) -> Self {
        *column.slot_mut(&mut self) = value;
        self
    }
}

/// Numeric field of [`TrackRecord`] that can be projected on an axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NumericColumn {
    Idx,
    UserRating,
    Rating,
    Danceability,
    Energy,
    Key,
    Loudness,
    Mode,
    Acousticness,
    Instrumentalness,
    Liveness,
    Valence,
    Tempo,
    Duration,
    TimeSignature,
    NumBars,
    NumSections,
    NumSegments,
    Class,
}

const SELECTABLE_COLUMNS: [NumericColumn; 18] = [
    NumericColumn::Idx,
    NumericColumn::Rating,
    NumericColumn::Danceability,
    NumericColumn::Energy,
    NumericColumn::Key,
    NumericColumn::Loudness,
    NumericColumn::Mode,
    NumericColumn::Acousticness,
    NumericColumn::Instrumentalness,
    NumericColumn::Liveness,
    NumericColumn::Valence,
    NumericColumn::Tempo,
    NumericColumn::Duration,
    NumericColumn::TimeSignature,
    NumericColumn::NumBars,
    NumericColumn::NumSections,
    NumericColumn::NumSegments,
    NumericColumn::Class,
];

impl NumericColumn {
    pub const ALL: [NumericColumn; 19] = [
        NumericColumn::Idx,
        NumericColumn::UserRating,
        NumericColumn::Rating,
        NumericColumn::Danceability,
        NumericColumn::Energy,
        NumericColumn::Key,
        NumericColumn::Loudness,
        NumericColumn::Mode,
        NumericColumn::Acousticness,
        NumericColumn::Instrumentalness,
        NumericColumn::Liveness,
        NumericColumn::Valence,
        NumericColumn::Tempo,
        NumericColumn::Duration,
        NumericColumn::TimeSignature,
        NumericColumn::NumBars,
        NumericColumn::NumSections,
        NumericColumn::NumSegments,
        NumericColumn::Class,
    ];

    /// Columns offered by the axis selectors.
    ///
    /// The per-user rating is excluded; the string identifier is never a column.
    #[must_use]
    pub fn selectable() -> &'static [NumericColumn] {
        &SELECTABLE_COLUMNS
    }

    #[must_use]
    pub fn is_selectable(self) -> bool {
        self != NumericColumn::UserRating
    }

    /// Stable key used by host selectors.
    #[must_use]
    pub fn key(self) -> &'static str {
        match self {
            NumericColumn::Idx => "idx",
            NumericColumn::UserRating => "user_rating",
            NumericColumn::Rating => "rating",
            NumericColumn::Danceability => "danceability",
            NumericColumn::Energy => "energy",
            NumericColumn::Key => "key",
            NumericColumn::Loudness => "loudness",
            NumericColumn::Mode => "mode",
            NumericColumn::Acousticness => "acousticness",
            NumericColumn::Instrumentalness => "instrumentalness",
            NumericColumn::Liveness => "liveness",
            NumericColumn::Valence => "valence",
            NumericColumn::Tempo => "tempo",
            NumericColumn::Duration => "duration",
            NumericColumn::TimeSignature => "time_signature",
            NumericColumn::NumBars => "num_bars",
            NumericColumn::NumSections => "num_sections",
            NumericColumn::NumSegments => "num_segments",
            NumericColumn::Class => "class",
        }
    }

    /// Human-readable caption for menus, axes and tooltips.
    #[must_use]
    pub fn display_name(self) -> &'static str {
        match self {
            NumericColumn::Idx => "Index",
            NumericColumn::UserRating => "",
            NumericColumn::Rating => "Rating",
            NumericColumn::Danceability => "Danceability",
            NumericColumn::Energy => "Energy",
            NumericColumn::Key => "Key",
            NumericColumn::Loudness => "Loudness",
            NumericColumn::Mode => "Mode",
            NumericColumn::Acousticness => "Acousticness",
            NumericColumn::Instrumentalness => "Instrumentalness",
            NumericColumn::Liveness => "Liveliness",
            NumericColumn::Valence => "Valence",
            NumericColumn::Tempo => "Tempo",
            NumericColumn::Duration => "Duration",
            NumericColumn::TimeSignature => "Signature",
            NumericColumn::NumBars => "# of Bars",
            NumericColumn::NumSections => "# of Sections",
            NumericColumn::NumSegments => "# of Segments",
            NumericColumn::Class => "Class",
        }
    }

    /// Resolves a selector key into a selectable column.
    pub fn from_key(key: &str) -> ChartResult<Self> {
        SELECTABLE_COLUMNS
            .iter()
            .copied()
            .find(|column| column.key() == key)
            .ok_or_else(|| ChartError::UnknownColumn(key.to_owned()))
    }

    #[must_use]
    pub fn value(self, record: &TrackRecord) -> f64 {
        match self {
            NumericColumn::Idx => record.idx,
            NumericColumn::UserRating => record.user_rating,
            NumericColumn::Rating => record.rating,
            NumericColumn::Danceability => record.danceability,
            NumericColumn::Energy => record.energy,
            NumericColumn::Key => record.key,
            NumericColumn::Loudness => record.loudness,
            NumericColumn::Mode => record.mode,
            NumericColumn::Acousticness => record.acousticness,
            NumericColumn::Instrumentalness => record.instrumentalness,
            NumericColumn::Liveness => record.liveness,
            NumericColumn::Valence => record.valence,
            NumericColumn::Tempo => record.tempo,
            NumericColumn::Duration => record.duration,
            NumericColumn::TimeSignature => record.time_signature,
            NumericColumn::NumBars => record.num_bars,
            NumericColumn::NumSections => record.num_sections,
            NumericColumn::NumSegments => record.num_segments,
            NumericColumn::Class => record.class,
        }
    }

    fn slot_mut(self, record: &mut TrackRecord) -> &mut f64 {
        match self {
            NumericColumn::Idx => &mut record.idx,
            NumericColumn::UserRating => &mut record.user_rating,
            NumericColumn::Rating => &mut record.rating,
            NumericColumn::Danceability => &mut record.danceability,
            NumericColumn::Energy => &mut record.energy,
            NumericColumn::Key => &mut record.key,
            NumericColumn::Loudness => &mut record.loudness,
            NumericColumn::Mode => &mut record.mode,
            NumericColumn::Acousticness => &mut record.acousticness,
            NumericColumn::Instrumentalness => &mut record.instrumentalness,
            NumericColumn::Liveness => &mut record.liveness,
            NumericColumn::Valence => &mut record.valence,
            NumericColumn::Tempo => &mut record.tempo,
            NumericColumn::Duration => &mut record.duration,
            NumericColumn::TimeSignature => &mut record.time_signature,
            NumericColumn::NumBars => &mut record.num_bars,
            NumericColumn::NumSections => &mut record.num_sections,
            NumericColumn::NumSegments => &mut record.num_segments,
            NumericColumn::Class => &mut record.class,
        }
    }
}

/// Builds the visualization view of a record set.
///
/// Durations are rescaled from milliseconds to whole seconds and ratings are
/// floored at zero. The input slice is left untouched.
#[must_use]
pub fn derive_view(records: &[TrackRecord]) -> Vec<TrackRecord> {
    records
        .iter()
        .map(|record| TrackRecord {
            duration: (record.duration / 1_000.0).floor(),
            rating: record.rating.max(0.0),
            ..record.clone()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{NumericColumn, TrackRecord, derive_view};

    #[test]
    fn selectable_columns_exclude_user_rating() {
        assert_eq!(NumericColumn::selectable().len(), NumericColumn::ALL.len() - 1);
        assert!(
            !NumericColumn::selectable()
                .iter()
                .any(|column| *column == NumericColumn::UserRating)
        );
    }

    #[test]
    fn from_key_rejects_user_rating_and_identifier() {
        assert!(NumericColumn::from_key("user_rating").is_err());
        assert!(NumericColumn::from_key("id").is_err());
        assert_eq!(
            NumericColumn::from_key("num_bars").expect("known key"),
            NumericColumn::NumBars
        );
    }

    #[test]
    fn derived_view_rescales_duration_and_floors_rating() {
        let original = vec![
            TrackRecord::new("a", "A")
                .with_value(NumericColumn::Duration, 215_999.0)
                .with_value(NumericColumn::Rating, -1.0),
        ];
        let view = derive_view(&original);

        assert_eq!(view[0].duration, 215.0);
        assert_eq!(view[0].rating, 0.0);
        assert_eq!(original[0].duration, 215_999.0);
        assert_eq!(original[0].rating, -1.0);
    }
}
