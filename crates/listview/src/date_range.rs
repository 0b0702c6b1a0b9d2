//! Relative date-range filter.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, FixedOffset, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::value::Timestamp;

const DAY_MS: i64 = 24 * 60 * 60 * 1000;

/// Relative window a record's timestamp must fall in.
///
/// Windows are computed against the local "now" at evaluation time, so the
/// same filter can select different rows as the day rolls over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DateRange {
    #[default]
    All,
    Today,
    Yesterday,
    Last7Days,
    Last30Days,
}

/// Half-open interval `[start, end)` in milliseconds. `end: None` is unbounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateWindow {
    pub start: Timestamp,
    pub end: Option<Timestamp>,
}

impl DateWindow {
    pub fn contains(&self, ts: Timestamp) -> bool {
        ts >= self.start && self.end.map_or(true, |end| ts < end)
    }
}

impl DateRange {
    pub const VARIANTS: [DateRange; 5] = [
        DateRange::All,
        DateRange::Today,
        DateRange::Yesterday,
        DateRange::Last7Days,
        DateRange::Last30Days,
    ];

    pub fn is_active(self) -> bool {
        self != DateRange::All
    }

    pub fn as_str(self) -> &'static str {
        match self {
            DateRange::All => "all",
            DateRange::Today => "today",
            DateRange::Yesterday => "yesterday",
            DateRange::Last7Days => "last7days",
            DateRange::Last30Days => "last30days",
        }
    }

    /// Human label, as shown in a filter dropdown.
    pub fn label(self) -> &'static str {
        match self {
            DateRange::All => "All Dates",
            DateRange::Today => "Today",
            DateRange::Yesterday => "Yesterday",
            DateRange::Last7Days => "Last 7 days",
            DateRange::Last30Days => "Last 30 days",
        }
    }

    /// The window for this range relative to `now`. `None` for [`DateRange::All`].
    pub fn window(self, now: DateTime<FixedOffset>) -> Option<DateWindow> {
        let now_ms = now.timestamp_millis();
        let today = start_of_day(now);

        let window = match self {
            DateRange::All => return None,
            DateRange::Today => DateWindow {
                start: Timestamp(today),
                end: None,
            },
            DateRange::Yesterday => DateWindow {
                start: Timestamp(today - DAY_MS),
                end: Some(Timestamp(today)),
            },
            DateRange::Last7Days => DateWindow {
                start: Timestamp(now_ms - 7 * DAY_MS),
                end: None,
            },
            DateRange::Last30Days => DateWindow {
                start: Timestamp(now_ms - 30 * DAY_MS),
                end: None,
            },
        };
        Some(window)
    }

    /// Whether a record with this timestamp passes the filter.
    ///
    /// Records without a timestamp only pass when the filter is inactive.
    pub fn admits(self, ts: Option<Timestamp>, now: DateTime<FixedOffset>) -> bool {
        match (self.window(now), ts) {
            (None, _) => true,
            (Some(_), None) => false,
            (Some(window), Some(ts)) => window.contains(ts),
        }
    }
}

/// Local midnight of `now`'s day, in epoch milliseconds.
fn start_of_day(now: DateTime<FixedOffset>) -> i64 {
    let local_midnight = now.date_naive().and_time(NaiveTime::MIN);
    let offset_ms = i64::from(now.offset().local_minus_utc()) * 1000;
    local_midnight.and_utc().timestamp_millis() - offset_ms
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DateRange {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DateRange::VARIANTS
            .into_iter()
            .find(|range| range.as_str() == s)
            .ok_or_else(|| {
                format!(
                    "unknown date range '{s}'. Expected one of: all, today, yesterday, last7days, last30days"
                )
            })
    }
}
