//! Filter windows
//!
//! A [`DateWindow`] is the half-open interval `[start, end)` in the service
//! timezone that selects records for statistics.

use chrono::{DateTime, Duration, FixedOffset, NaiveDate, TimeZone};

use crate::stats::error::StatsError;

/// Half-open time window: `[start, end)`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateWindow {
    /// Inclusive lower bound
    pub start: DateTime<FixedOffset>,
    /// Exclusive upper bound
    pub end: DateTime<FixedOffset>,
}

impl DateWindow {
    pub fn new(start: DateTime<FixedOffset>, end: DateTime<FixedOffset>) -> Self {
        Self { start, end }
    }

    /// Window spanning whole calendar days, `end_date` inclusive.
    ///
    /// Both bounds are `YYYY-MM-DD` and are taken as local midnight in `tz`.
    pub fn from_dates(start_date: &str, end_date: &str, tz: &FixedOffset) -> Result<Self, StatsError> {
        let start = local_midnight("start", start_date, tz)?;
        let end = local_midnight("end", end_date, tz)? + Duration::days(1);
        Ok(Self { start, end })
    }

    /// Trailing window ending one day after `now`.
    ///
    /// The extra day keeps "today" inside the window regardless of the time
    /// of day and absorbs client/server clock skew.
    pub fn trailing(now: DateTime<FixedOffset>, days: i64) -> Self {
        Self {
            start: now - Duration::days(days),
            end: now + Duration::days(1),
        }
    }

    /// Explicit dates when both are supplied, otherwise the trailing window.
    ///
    /// Empty strings count as missing.
    pub fn resolve(
        start_date: Option<&str>,
        end_date: Option<&str>,
        now: DateTime<FixedOffset>,
        default_days: i64,
    ) -> Result<Self, StatsError> {
        fn supplied(value: Option<&str>) -> Option<&str> {
            value.filter(|s| !s.is_empty())
        }

        match (supplied(start_date), supplied(end_date)) {
            (Some(start), Some(end)) => Self::from_dates(start, end, now.offset()),
            _ => Ok(Self::trailing(now, default_days)),
        }
    }

    /// Check if a timestamp falls within this window
    pub fn contains(&self, at: &DateTime<FixedOffset>) -> bool {
        *at >= self.start && *at < self.end
    }
}

fn local_midnight(
    field: &'static str,
    value: &str,
    tz: &FixedOffset,
) -> Result<DateTime<FixedOffset>, StatsError> {
    let parse_error = || StatsError::DateParse {
        field,
        value: value.to_string(),
    };

    let date = NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| parse_error())?;
    let midnight = date.and_hms_opt(0, 0, 0).ok_or_else(parse_error)?;
    tz.from_local_datetime(&midnight).single().ok_or_else(parse_error)
}
