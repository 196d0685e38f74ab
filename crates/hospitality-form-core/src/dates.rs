//! Arrival/departure date range checks

use chrono::NaiveDate;
use serde::Serialize;

/// Format used by `<input type="date">` values
pub const ISO_DATE: &str = "%Y-%m-%d";

/// Result of comparing an arrival and a departure date
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum DateRangeCheck {
    /// One or both dates missing; nothing to compare yet
    Incomplete,
    Valid { nights: i64 },
    /// Departure on or before arrival
    NotAfterArrival,
    TooLong { nights: i64 },
    /// A value that is not an ISO calendar date
    Unparseable,
}

impl DateRangeCheck {
    pub fn is_valid(&self) -> bool {
        matches!(self, DateRangeCheck::Incomplete | DateRangeCheck::Valid { .. })
    }
}

pub fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), ISO_DATE).ok()
}

pub fn format_date(date: NaiveDate) -> String {
    date.format(ISO_DATE).to_string()
}

/// Compare two date input values
///
/// Empty values short-circuit to `Incomplete` before any parsing happens.
pub fn check_date_range(arrival: &str, departure: &str, max_nights: i64) -> DateRangeCheck {
    if arrival.trim().is_empty() || departure.trim().is_empty() {
        return DateRangeCheck::Incomplete;
    }

    let (from, to) = match (parse_date(arrival), parse_date(departure)) {
        (Some(from), Some(to)) => (from, to),
        _ => return DateRangeCheck::Unparseable,
    };

    let nights = (to - from).num_days();
    if nights <= 0 {
        DateRangeCheck::NotAfterArrival
    } else if nights > max_nights {
        DateRangeCheck::TooLong { nights }
    } else {
        DateRangeCheck::Valid { nights }
    }
}
