//! Resolving the configured timezone and reading record dates in it.

use time::{
    Date, Month, OffsetDateTime, PrimitiveDateTime, Time, UtcOffset,
    format_description::{BorrowedFormatItem, well_known::Rfc3339},
    macros::format_description,
};
use time_tz::{Offset, TimeZone};

const DATE_FORMAT: &[BorrowedFormatItem<'_>] = format_description!("[year]-[month]-[day]");
const LOCAL_DATE_TIME_SUBSECOND_FORMAT: &[BorrowedFormatItem<'_>] =
    format_description!("[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond]");
const LOCAL_DATE_TIME_FORMAT: &[BorrowedFormatItem<'_>] =
    format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]");
const LOCAL_DATE_TIME_NO_SECONDS_FORMAT: &[BorrowedFormatItem<'_>] =
    format_description!("[year]-[month]-[day]T[hour]:[minute]");

/// Get the current UTC offset of a canonical timezone name, e.g. "Pacific/Auckland".
///
/// Returns `None` if the name is not a known timezone.
pub fn get_local_offset(canonical_timezone: &str) -> Option<UtcOffset> {
    time_tz::timezones::get_by_name(canonical_timezone)
        .map(|tz| tz.get_offset_utc(&OffsetDateTime::now_utc()).to_utc())
}

/// Parse a record date string as a date-time in `local_offset`.
///
/// Accepts:
/// - calendar dates (`2024-03-01`) and the partial forms `2024-03` and `2024`,
///   read as midnight UTC on the first day they name and then converted to
///   `local_offset`,
/// - local date-times without an offset (`2024-03-01T09:30`,
///   `2024-03-01T09:30:00` or `2024-03-01T09:30:00.000`),
/// - RFC 3339 date-times, which are converted to `local_offset`.
///
/// Returns `None` if the text is in none of these formats, or if the
/// converted date-time is outside the supported range.
pub(crate) fn parse_record_date(text: &str, local_offset: UtcOffset) -> Option<OffsetDateTime> {
    let text = text.trim();

    if let Some(date) = parse_calendar_date(text) {
        return PrimitiveDateTime::new(date, Time::MIDNIGHT)
            .assume_utc()
            .checked_to_offset(local_offset);
    }

    if let Ok(date_time) = OffsetDateTime::parse(text, &Rfc3339) {
        return date_time.checked_to_offset(local_offset);
    }

    [
        LOCAL_DATE_TIME_SUBSECOND_FORMAT,
        LOCAL_DATE_TIME_FORMAT,
        LOCAL_DATE_TIME_NO_SECONDS_FORMAT,
    ]
    .into_iter()
    .find_map(|format| PrimitiveDateTime::parse(text, format).ok())
    .map(|date_time| date_time.assume_offset(local_offset))
}

/// Partial dates name the first day of their month or year.
fn parse_calendar_date(text: &str) -> Option<Date> {
    match text.len() {
        4 => Date::parse(&format!("{text}-01-01"), DATE_FORMAT).ok(),
        7 => Date::parse(&format!("{text}-01"), DATE_FORMAT).ok(),
        _ => Date::parse(text, DATE_FORMAT).ok(),
    }
}

/// The three-letter English abbreviation of `month`, e.g. "Jan".
pub(crate) fn short_month_name(month: Month) -> &'static str {
    match month {
        Month::January => "Jan",
        Month::February => "Feb",
        Month::March => "Mar",
        Month::April => "Apr",
        Month::May => "May",
        Month::June => "Jun",
        Month::July => "Jul",
        Month::August => "Aug",
        Month::September => "Sep",
        Month::October => "Oct",
        Month::November => "Nov",
        Month::December => "Dec",
    }
}
