use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};

use crate::{core::error::FormatError, quantity::energy::KilovoltAmpereHours};

/// Wall-clock formats the forecast service is known to produce, tried in order.
const FORMATS: [&str; 4] =
    ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M"];

/// Single observation from either the actual or the forecasted series.
///
/// The timestamp is kept as it came over the wire and only gets parsed during reconciliation,
/// so that a malformed one fails the whole merge.
#[derive(Clone, Debug, PartialEq, Eq)]
#[must_use]
pub struct Reading {
    pub timestamp: String,

    /// Absent when the service sends `null` or omits the value.
    pub value: Option<KilovoltAmpereHours>,
}

impl Reading {
    pub fn new(
        timestamp: impl Into<String>,
        value: impl Into<Option<KilovoltAmpereHours>>,
    ) -> Self {
        Self { timestamp: timestamp.into(), value: value.into() }
    }

    pub fn parse_timestamp(&self) -> Result<NaiveDateTime, FormatError> {
        parse_timestamp(&self.timestamp)
    }
}

/// Parse an hourly timestamp.
///
/// RFC 3339 timestamps with an offset are converted to UTC wall-clock time,
/// and a bare date means its midnight.
pub fn parse_timestamp(text: &str) -> Result<NaiveDateTime, FormatError> {
    FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(text, format).ok())
        .or_else(|| DateTime::parse_from_rfc3339(text).ok().map(|timestamp| timestamp.naive_utc()))
        .or_else(|| {
            NaiveDate::parse_from_str(text, "%Y-%m-%d").ok().map(|date| date.and_time(NaiveTime::MIN))
        })
        .ok_or_else(|| FormatError::Timestamp(text.to_owned()))
}
