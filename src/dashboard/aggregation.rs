//! Record aggregation for the dashboard tables.
//!
//! Each aggregator buckets records by a key derived from the record date and
//! sums the amounts in each bucket. Buckets are returned in the order their
//! key was first seen, not in calendar order.

use std::{collections::HashMap, hash::Hash};

use time::UtcOffset;

use crate::{
    dashboard::record::{DatedAmount, MonthSummary, YearSummary},
    timezone::short_month_name,
};

/// The month label used for records whose date could not be parsed.
pub(crate) const INVALID_DATE_LABEL: &str = "Invalid Date";

/// Sums record amounts by calendar year in `local_offset`.
///
/// Records with an invalid date are summed under a year of `None`.
pub(crate) fn aggregate_by_year(
    records: &[DatedAmount],
    local_offset: UtcOffset,
) -> Vec<YearSummary> {
    group_and_sum(records, |record| match record.local_date_time(local_offset) {
        Some(date_time) => Some(date_time.year()),
        None => {
            log_invalid_date(record);
            None
        }
    })
    .into_iter()
    .map(|(year, amount)| YearSummary { year, amount })
    .collect()
}

/// Sums record amounts by month name in `local_offset`.
///
/// The key is the month name alone, so e.g. January 2023 and January 2024
/// share one total. Records with an invalid date are summed under
/// [INVALID_DATE_LABEL].
pub(crate) fn aggregate_by_month(
    records: &[DatedAmount],
    local_offset: UtcOffset,
) -> Vec<MonthSummary> {
    group_and_sum(records, |record| match record.local_date_time(local_offset) {
        Some(date_time) => short_month_name(date_time.month()),
        None => {
            log_invalid_date(record);
            INVALID_DATE_LABEL
        }
    })
    .into_iter()
    .map(|(month, amount)| MonthSummary {
        month: month.to_owned(),
        amount,
    })
    .collect()
}

/// Returns the records unchanged.
pub(crate) fn identity_aggregate(records: &[DatedAmount]) -> Vec<DatedAmount> {
    records.to_vec()
}

/// Sums the amounts of `records` grouped by `key`.
///
/// The groups are returned in order of first appearance.
fn group_and_sum<K, F>(records: &[DatedAmount], key: F) -> Vec<(K, f64)>
where
    K: Eq + Hash + Clone,
    F: Fn(&DatedAmount) -> K,
{
    let mut positions: HashMap<K, usize> = HashMap::new();
    let mut totals: Vec<(K, f64)> = Vec::new();

    for record in records {
        let group_key = key(record);

        match positions.get(&group_key) {
            Some(&position) => totals[position].1 += record.amount,
            None => {
                positions.insert(group_key.clone(), totals.len());
                totals.push((group_key, record.amount));
            }
        }
    }

    totals
}

fn log_invalid_date(record: &DatedAmount) {
    tracing::debug!(
        "could not parse the date \"{}\" of a record with amount {}",
        record.date,
        record.amount
    );
}
