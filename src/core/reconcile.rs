//! Full outer join of the actual and forecasted readings on a shared timeline.

use std::ops::RangeInclusive;

use chrono::NaiveDateTime;
use itertools::Itertools;

use crate::{
    core::{error::FormatError, reading::Reading},
    quantity::energy::KilovoltAmpereHours,
};

/// Value of a reconciled point together with the series it came from.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Sample {
    Actual(Option<KilovoltAmpereHours>),
    Forecast(Option<KilovoltAmpereHours>),
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[must_use]
pub struct ReconciledPoint {
    pub timestamp: NaiveDateTime,
    pub sample: Sample,
}

impl ReconciledPoint {
    #[must_use]
    pub const fn actual(&self) -> Option<KilovoltAmpereHours> {
        match self.sample {
            Sample::Actual(value) => value,
            Sample::Forecast(_) => None,
        }
    }

    #[must_use]
    pub const fn forecast(&self) -> Option<KilovoltAmpereHours> {
        match self.sample {
            Sample::Forecast(value) => value,
            Sample::Actual(_) => None,
        }
    }
}

impl Reading {
    fn reconcile(
        &self,
        sample: fn(Option<KilovoltAmpereHours>) -> Sample,
    ) -> Result<ReconciledPoint, FormatError> {
        Ok(ReconciledPoint { timestamp: self.parse_timestamp()?, sample: sample(self.value) })
    }
}

/// Merged series, sorted by timestamp.
#[derive(Clone, Debug, Default, PartialEq, Eq, derive_more::Deref)]
#[must_use]
pub struct ReconciledSeries(Vec<ReconciledPoint>);

/// Merge the readings into a single chronologically ordered series.
///
/// Every reading produces exactly one point: matching timestamps are **not** coalesced,
/// so a timestamp present in both inputs yields two adjacent points, the actual one first.
/// Duplicates within one input are not removed either.
///
/// Any malformed timestamp fails the whole merge.
pub fn merge(actual: &[Reading], forecast: &[Reading]) -> Result<ReconciledSeries, FormatError> {
    let mut points: Vec<ReconciledPoint> = actual
        .iter()
        .map(|reading| reading.reconcile(Sample::Actual))
        .chain(forecast.iter().map(|reading| reading.reconcile(Sample::Forecast)))
        .collect::<Result<_, _>>()?;
    points.sort_by_key(|point| point.timestamp);
    Ok(ReconciledSeries(points))
}

/// Row of the coalesced view: all points sharing a timestamp folded together.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[must_use]
pub struct CoalescedPoint {
    pub timestamp: NaiveDateTime,
    pub actual: Option<KilovoltAmpereHours>,
    pub forecast: Option<KilovoltAmpereHours>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[must_use]
pub struct SeriesSummary {
    pub n_actual: usize,
    pub n_forecast: usize,

    /// Sum over the present actual values.
    pub total_actual: KilovoltAmpereHours,

    /// Sum over the present forecasted values.
    pub total_forecast: KilovoltAmpereHours,

    /// First and last timestamps, [`None`] for an empty series.
    pub span: Option<RangeInclusive<NaiveDateTime>>,
}

impl ReconciledSeries {
    /// Fold the points sharing a timestamp into single rows.
    ///
    /// Within a row, the first present value of each kind wins.
    pub fn coalesce(&self) -> Vec<CoalescedPoint> {
        self.0
            .iter()
            .chunk_by(|point| point.timestamp)
            .into_iter()
            .map(|(timestamp, points)| {
                points.fold(
                    CoalescedPoint { timestamp, actual: None, forecast: None },
                    |mut row, point| {
                        match point.sample {
                            Sample::Actual(value) => row.actual = row.actual.or(value),
                            Sample::Forecast(value) => row.forecast = row.forecast.or(value),
                        }
                        row
                    },
                )
            })
            .collect()
    }

    pub fn summary(&self) -> SeriesSummary {
        let (actual, forecast): (Vec<&ReconciledPoint>, Vec<&ReconciledPoint>) =
            self.0.iter().partition(|point| matches!(point.sample, Sample::Actual(_)));
        SeriesSummary {
            n_actual: actual.len(),
            n_forecast: forecast.len(),
            total_actual: actual.iter().filter_map(|point| point.actual()).sum(),
            total_forecast: forecast.iter().filter_map(|point| point.forecast()).sum(),
            span: self
                .0
                .first()
                .zip(self.0.last())
                .map(|(first, last)| first.timestamp..=last.timestamp),
        }
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use chrono::NaiveDate;

    use super::*;

    fn at(day: u32, hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, day).unwrap().and_hms_opt(hour, 0, 0).unwrap()
    }

    fn kvah(value: f64) -> Option<KilovoltAmpereHours> {
        Some(KilovoltAmpereHours(value))
    }

    #[test]
    fn test_merge_keeps_matching_timestamps_apart() -> anyhow::Result<()> {
        let actual = [Reading::new("2024-01-01T00:00", kvah(5.2))];
        let forecast = [
            Reading::new("2024-01-01T00:00", kvah(5.0)),
            Reading::new("2024-01-01T01:00", kvah(5.1)),
        ];
        let series = merge(&actual, &forecast)?;
        assert_eq!(
            *series,
            vec![
                ReconciledPoint { timestamp: at(1, 0), sample: Sample::Actual(kvah(5.2)) },
                ReconciledPoint { timestamp: at(1, 0), sample: Sample::Forecast(kvah(5.0)) },
                ReconciledPoint { timestamp: at(1, 1), sample: Sample::Forecast(kvah(5.1)) },
            ],
        );
        Ok(())
    }

    #[test]
    fn test_merge_sorts_unordered_inputs() -> anyhow::Result<()> {
        let actual = [
            Reading::new("2024-01-02 03:00:00", kvah(3.0)),
            Reading::new("2024-01-01 23:00:00", kvah(1.0)),
            Reading::new("2024-01-02 01:00:00", None),
        ];
        let forecast = [
            Reading::new("2024-01-02 04:00:00", kvah(4.0)),
            Reading::new("2024-01-02 00:00:00", kvah(2.0)),
        ];
        let series = merge(&actual, &forecast)?;
        assert_eq!(series.len(), actual.len() + forecast.len());
        assert!(series.is_sorted_by_key(|point| point.timestamp));
        assert_eq!(series.first().map(|point| point.timestamp), Some(at(1, 23)));
        assert_eq!(series.last().map(|point| point.timestamp), Some(at(2, 4)));
        Ok(())
    }

    #[test]
    fn test_merge_field_exclusivity() -> anyhow::Result<()> {
        let actual = [
            Reading::new("2024-01-01 00:00:00", kvah(1.0)),
            Reading::new("2024-01-01 01:00:00", kvah(2.0)),
        ];
        let forecast = [
            Reading::new("2024-01-01 01:00:00", kvah(3.0)),
            Reading::new("2024-01-01 02:00:00", kvah(4.0)),
        ];
        let series = merge(&actual, &forecast)?;
        let (from_actual, from_forecast): (Vec<&ReconciledPoint>, Vec<&ReconciledPoint>) =
            series.iter().partition(|point| matches!(point.sample, Sample::Actual(_)));
        assert_eq!(from_actual.len(), 2);
        assert_eq!(from_forecast.len(), 2);
        assert!(from_actual.iter().all(|point| point.forecast().is_none()));
        assert!(from_forecast.iter().all(|point| point.actual().is_none()));
        Ok(())
    }

    #[test]
    fn test_merge_propagates_duplicates() -> anyhow::Result<()> {
        let actual = [
            Reading::new("2024-01-01 00:00:00", kvah(1.0)),
            Reading::new("2024-01-01 00:00:00", kvah(1.5)),
        ];
        let series = merge(&actual, &[])?;
        assert_eq!(series.len(), 2);
        Ok(())
    }

    #[test]
    fn test_merge_empty() -> anyhow::Result<()> {
        let series = merge(&[], &[])?;
        assert!(series.is_empty());
        assert_eq!(series.summary().span, None);
        Ok(())
    }

    #[test]
    fn test_merge_malformed_timestamp_fails() {
        let actual = vec![Reading::new("2024-01-01T00:00", kvah(5.2))];
        let forecast = vec![
            Reading::new("2024-01-01T00:00", kvah(5.0)),
            Reading::new("not-a-date", kvah(5.1)),
        ];
        let snapshot = (actual.clone(), forecast.clone());

        let result = merge(&actual, &forecast);

        assert!(matches!(result, Err(FormatError::Timestamp(ref text)) if text == "not-a-date"));
        assert_eq!((actual, forecast), snapshot);
    }

    #[test]
    fn test_coalesce() -> anyhow::Result<()> {
        let actual = [
            Reading::new("2024-01-01T00:00", kvah(5.2)),
            Reading::new("2024-01-01T02:00", None),
        ];
        let forecast = [
            Reading::new("2024-01-01T00:00", kvah(5.0)),
            Reading::new("2024-01-01T01:00", kvah(5.1)),
        ];
        let rows = merge(&actual, &forecast)?.coalesce();
        assert_eq!(
            rows,
            vec![
                CoalescedPoint { timestamp: at(1, 0), actual: kvah(5.2), forecast: kvah(5.0) },
                CoalescedPoint { timestamp: at(1, 1), actual: None, forecast: kvah(5.1) },
                CoalescedPoint { timestamp: at(1, 2), actual: None, forecast: None },
            ],
        );
        Ok(())
    }

    #[test]
    fn test_summary() -> anyhow::Result<()> {
        let actual = [
            Reading::new("2024-01-01 00:00:00", kvah(1.25)),
            Reading::new("2024-01-01 01:00:00", None),
            Reading::new("2024-01-01 02:00:00", kvah(2.5)),
        ];
        let forecast = [Reading::new("2024-01-01 03:00:00", kvah(4.0))];
        let summary = merge(&actual, &forecast)?.summary();
        assert_eq!(summary.n_actual, 3);
        assert_eq!(summary.n_forecast, 1);
        assert_abs_diff_eq!(summary.total_actual.0, 3.75);
        assert_abs_diff_eq!(summary.total_forecast.0, 4.0);
        assert_eq!(summary.span, Some(at(1, 0)..=at(1, 3)));
        Ok(())
    }
}
