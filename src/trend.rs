use std::collections::BTreeMap;

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};

use crate::error::AnalyticsError;
use crate::models::{NormalizedRecord, TimeSeriesPoint};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Granularity {
    Monthly,
    Quarterly,
    Yearly,
}

/// Accepts a plain `YYYY-MM-DD` date, an RFC 3339 timestamp, or a naive
/// `YYYY-MM-DDTHH:MM:SS` timestamp.
pub fn parse_added_date(value: &str) -> Result<NaiveDate, AnalyticsError> {
    let value = value.trim();
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .or_else(|_| DateTime::parse_from_rfc3339(value).map(|dt| dt.date_naive()))
        .or_else(|_| NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f").map(|dt| dt.date()))
        .or_else(|_| NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S%.f").map(|dt| dt.date()))
        .map_err(|_| AnalyticsError::UnparsableValue {
            field: "addedDate",
            value: value.to_string(),
        })
}

pub fn period_key(date: NaiveDate, granularity: Granularity) -> String {
    match granularity {
        Granularity::Yearly => format!("{:04}", date.year()),
        Granularity::Quarterly => format!("{:04}-Q{}", date.year(), date.month0() / 3 + 1),
        Granularity::Monthly => format!("{:04}-{:02}", date.year(), date.month()),
    }
}

/// Record counts per period, ascending. Fixed-width keys make lexicographic
/// order chronological.
pub fn trend_by(records: &[NormalizedRecord], granularity: Granularity) -> Vec<TimeSeriesPoint> {
    let periods = records
        .iter()
        .filter_map(|record| match parse_added_date(&record.added_date) {
            Ok(date) => Some(period_key(date, granularity)),
            Err(err) => {
                tracing::debug!(record = %record.id, "excluded from trend view: {err}");
                None
            }
        })
        .fold(BTreeMap::<String, u64>::new(), |mut periods, key| {
            *periods.entry(key).or_insert(0) += 1;
            periods
        });

    periods
        .into_iter()
        .map(|(period_key, count)| TimeSeriesPoint { period_key, count })
        .collect()
}
