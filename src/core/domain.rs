use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

use crate::core::{NumericColumn, TrackRecord};
use crate::error::{ChartError, ChartResult};

/// Closed `[min, max]` interval of one column over a record set.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Domain {
    pub min: f64,
    pub max: f64,
}

impl Domain {
    pub fn new(min: f64, max: f64) -> ChartResult<Self> {
        if !min.is_finite() || !max.is_finite() {
            return Err(ChartError::InvalidData(
                "domain bounds must be finite".to_owned(),
            ));
        }
        if min > max {
            return Err(ChartError::InvalidData(format!(
                "domain min must be <= max (min={min}, max={max})"
            )));
        }
        Ok(Self { min, max })
    }

    /// Computes the extent of `column` over `records`.
    ///
    /// Records are scanned in full; no ordering is assumed.
    pub fn of_column(records: &[TrackRecord], column: NumericColumn) -> ChartResult<Self> {
        if records.is_empty() {
            return Err(ChartError::EmptyRecordSet);
        }

        let mut min = OrderedFloat(f64::INFINITY);
        let mut max = OrderedFloat(f64::NEG_INFINITY);
        for record in records {
            let value = column.value(record);
            if !value.is_finite() {
                return Err(ChartError::InvalidData(format!(
                    "column `{}` of record `{}` must be finite",
                    column.key(),
                    record.id
                )));
            }
            min = min.min(OrderedFloat(value));
            max = max.max(OrderedFloat(value));
        }

        Self::new(min.0, max.0)
    }

    #[must_use]
    pub fn span(self) -> f64 {
        self.max - self.min
    }

    /// `true` when every value of the column is identical.
    #[must_use]
    pub fn is_degenerate(self) -> bool {
        self.min == self.max
    }

    #[must_use]
    pub fn as_tuple(self) -> (f64, f64) {
        (self.min, self.max)
    }
}

#[cfg(test)]
mod tests {
    use super::Domain;
    use crate::core::{NumericColumn, TrackRecord};

    #[test]
    fn extent_ignores_input_order() {
        let records: Vec<TrackRecord> = [0.7, 0.1, 0.9, 0.4]
            .into_iter()
            .enumerate()
            .map(|(i, v)| {
                TrackRecord::new(format!("t{i}"), "t").with_value(NumericColumn::Energy, v)
            })
            .collect();

        let domain = Domain::of_column(&records, NumericColumn::Energy).expect("domain");
        assert_eq!(domain.as_tuple(), (0.1, 0.9));
        assert!(!domain.is_degenerate());
    }

    #[test]
    fn empty_records_are_rejected() {
        assert!(Domain::of_column(&[], NumericColumn::Energy).is_err());
    }

    #[test]
    fn non_finite_value_is_rejected() {
        let records =
            vec![TrackRecord::new("x", "x").with_value(NumericColumn::Tempo, f64::NAN)];
        assert!(Domain::of_column(&records, NumericColumn::Tempo).is_err());
    }
}
