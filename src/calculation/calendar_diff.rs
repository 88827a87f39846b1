//! Calendar-aware date differences.
//!
//! Differences are decomposed into whole months and residual days the way a
//! relative delta does it: months are counted first, with end-of-month
//! clamping when they are added to the start date, and the remainder is a
//! plain day count. Naive division of a day count by 30 is never used.

use chrono::{Datelike, Months, NaiveDate};

/// Adds `months` to `date`, clamping the day to the end of the target month.
///
/// Returns `None` only when the result falls outside chrono's date range.
///
/// # Example
///
/// ```
/// use liquidation_engine::calculation::add_months_clamped;
/// use chrono::NaiveDate;
///
/// let jan_31 = NaiveDate::from_ymd_opt(2024, 1, 31).unwrap();
/// assert_eq!(
///     add_months_clamped(jan_31, 1),
///     NaiveDate::from_ymd_opt(2024, 2, 29)
/// );
/// ```
pub fn add_months_clamped(date: NaiveDate, months: u32) -> Option<NaiveDate> {
    date.checked_add_months(Months::new(months))
}

/// Decomposes `[start, end_exclusive)` into whole months and residual days.
///
/// The month count starts at the calendar month distance and is reduced
/// until `start + months` no longer passes `end_exclusive`. Days are what
/// remains. An empty or inverted range yields `(0, 0)`.
///
/// # Examples
///
/// ```
/// use liquidation_engine::calculation::months_and_days;
/// use chrono::NaiveDate;
///
/// let start = NaiveDate::from_ymd_opt(2021, 3, 15).unwrap();
/// let end = NaiveDate::from_ymd_opt(2021, 5, 1).unwrap();
/// assert_eq!(months_and_days(start, end), (1, 16));
///
/// // A whole semester
/// let start = NaiveDate::from_ymd_opt(2023, 11, 1).unwrap();
/// let end = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
/// assert_eq!(months_and_days(start, end), (6, 0));
/// ```
pub fn months_and_days(start: NaiveDate, end_exclusive: NaiveDate) -> (u32, u32) {
    if end_exclusive <= start {
        return (0, 0);
    }

    let span = (end_exclusive.year() - start.year()) * 12 + end_exclusive.month() as i32
        - start.month() as i32;
    let mut months = span.max(0) as u32;

    let mut anchor = add_months_clamped(start, months).unwrap_or(end_exclusive);
    while months > 0 && anchor > end_exclusive {
        months -= 1;
        anchor = add_months_clamped(start, months).unwrap_or(start);
    }

    let days = (end_exclusive - anchor).num_days().max(0) as u32;
    (months, days)
}
