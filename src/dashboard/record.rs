//! The record and summary types shown on the dashboard.
//!
//! Records arrive from the backend with their dates as plain strings. Dates
//! are only parsed when a view needs them, so a malformed date never stops a
//! record from being displayed or counted.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use time::{OffsetDateTime, UtcOffset};

use crate::timezone::parse_record_date;

/// A single dated monetary amount as returned by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatedAmount {
    /// The date as written by the backend, e.g. "2024-03-01".
    pub date: String,
    /// The amount of money recorded on `date`.
    pub amount: f64,
}

impl DatedAmount {
    /// Parse the record's date as a date-time in `local_offset`.
    ///
    /// Returns `None` if the date string is not in a recognised format.
    pub fn local_date_time(&self, local_offset: UtcOffset) -> Option<OffsetDateTime> {
        parse_record_date(&self.date, local_offset)
    }
}

/// The total amount for one month name, across all years.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthSummary {
    /// The three-letter month name, e.g. "Jan".
    pub month: String,
    /// The sum of the amounts of every record in `month`.
    pub amount: f64,
}

/// The total amount for one calendar year.
#[derive(Debug, Clone, PartialEq)]
pub struct YearSummary {
    /// The calendar year, or `None` for records whose date could not be parsed.
    pub year: Option<i32>,
    /// The sum of the amounts of every record in `year`.
    pub amount: f64,
}

/// Sort `records` from the most recent date to the oldest.
///
/// Records with unparseable dates are placed after all valid dates, keeping
/// their relative order.
pub(crate) fn sort_by_date_descending(records: &mut [DatedAmount], local_offset: UtcOffset) {
    records.sort_by_cached_key(|record| {
        std::cmp::Reverse(SortKey(record.local_date_time(local_offset)))
    });
}

/// Count the records whose date is not in any recognised format.
pub(crate) fn count_invalid_dates(records: &[DatedAmount]) -> usize {
    records
        .iter()
        .filter(|record| record.local_date_time(UtcOffset::UTC).is_none())
        .count()
}

/// Orders parsed dates chronologically with invalid dates before every valid one,
/// which puts them last once reversed.
#[derive(PartialEq, Eq)]
struct SortKey(Option<OffsetDateTime>);

impl PartialOrd for SortKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for SortKey {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.0, other.0) {
            (Some(lhs), Some(rhs)) => lhs.cmp(&rhs),
            (None, Some(_)) => Ordering::Less,
            (Some(_), None) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        }
    }
}

#[cfg(test)]
mod tests {
    use time::UtcOffset;

    use super::{DatedAmount, count_invalid_dates, sort_by_date_descending};

    fn record(date: &str, amount: f64) -> DatedAmount {
        DatedAmount {
            date: date.to_owned(),
            amount,
        }
    }

    #[test]
    fn deserializes_from_backend_json() {
        let json = r#"{"date": "2023-01-05", "amount": 100}"#;

        let got: DatedAmount = serde_json::from_str(json).unwrap();

        assert_eq!(got, record("2023-01-05", 100.0));
    }

    #[test]
    fn sorts_most_recent_first() {
        let mut records = vec![
            record("2023-01-05", 1.0),
            record("2024-03-01", 2.0),
            record("2023-01-20", 3.0),
        ];

        sort_by_date_descending(&mut records, UtcOffset::UTC);

        let dates: Vec<_> = records.iter().map(|record| record.date.as_str()).collect();
        assert_eq!(dates, ["2024-03-01", "2023-01-20", "2023-01-05"]);
    }

    #[test]
    fn sorts_date_times_by_instant() {
        let mut records = vec![
            record("2024-03-01T08:00:00Z", 1.0),
            record("2024-03-01T10:00:00+01:00", 2.0),
            record("2024-03-01", 3.0),
        ];

        sort_by_date_descending(&mut records, UtcOffset::UTC);

        let amounts: Vec<_> = records.iter().map(|record| record.amount).collect();
        assert_eq!(amounts, [2.0, 1.0, 3.0]);
    }

    #[test]
    fn invalid_dates_sort_last_in_original_order() {
        let mut records = vec![
            record("not a date", 1.0),
            record("2023-01-05", 2.0),
            record("", 3.0),
            record("2024-03-01", 4.0),
        ];

        sort_by_date_descending(&mut records, UtcOffset::UTC);

        let amounts: Vec<_> = records.iter().map(|record| record.amount).collect();
        assert_eq!(amounts, [4.0, 2.0, 1.0, 3.0]);
    }

    #[test]
    fn counts_invalid_dates() {
        let records = vec![
            record("2023-01-05", 1.0),
            record("not a date", 2.0),
            record("2024-03", 3.0),
            record("", 4.0),
        ];

        assert_eq!(count_invalid_dates(&records), 2);
        assert_eq!(count_invalid_dates(&[]), 0);
    }
}
