//! Statutory labor interest.
//!
//! Unpaid labor debts accrue interest compounded daily at the rate published
//! by the BCRP. This module provides the plain calculation on typed dates, the
//! standalone string interface, and the extended [`InterestResult`] report.

use chrono::{Local, NaiveDate};
use rust_decimal::Decimal;
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use tracing::error;

use crate::error::{LiquidationError, LiquidationResult};
use crate::models::InterestResult;

/// Effective daily rate applied to labor debts (about 2.68 % a year).
pub const BCRP_DAILY_RATE: f64 = 7.35e-5;

/// Date format accepted by the string interface.
pub const ISO_DATE_FORMAT: &str = "%Y-%m-%d";

/// Parses a `YYYY-MM-DD` date.
///
/// # Example
///
/// ```
/// use liquidation_engine::calculation::parse_iso_date;
///
/// assert!(parse_iso_date("2023-12-31").is_ok());
/// assert!(parse_iso_date("31/12/2023").is_err());
/// ```
pub fn parse_iso_date(value: &str) -> LiquidationResult<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), ISO_DATE_FORMAT).map_err(|e| {
        LiquidationError::InvalidDate {
            value: value.to_string(),
            message: e.to_string(),
        }
    })
}

/// Unrounded interest on `principal` after `days` days of daily compounding.
///
/// `principal * ((1 + r)^days - 1)` with `r` = [`BCRP_DAILY_RATE`].
pub fn unrounded_interest(principal: f64, days: i64) -> f64 {
    principal * ((1.0 + BCRP_DAILY_RATE).powf(days as f64) - 1.0)
}

/// Interest on `principal` from `start` to `end`, rounded to cents.
///
/// The elapsed time is `end - start` in whole days. An inverted range is not
/// an error: it simply accrues nothing.
///
/// # Examples
///
/// ```
/// use liquidation_engine::calculation::compound_interest;
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let start = NaiveDate::from_ymd_opt(2023, 1, 1).unwrap();
/// let end = NaiveDate::from_ymd_opt(2023, 12, 31).unwrap();
/// let principal = Decimal::new(100000, 2);
///
/// assert_eq!(compound_interest(principal, start, end), Decimal::new(2711, 2));
/// assert_eq!(compound_interest(principal, end, start), Decimal::ZERO);
/// ```
pub fn compound_interest(principal: Decimal, start: NaiveDate, end: NaiveDate) -> Decimal {
    if start > end {
        return to_cents(Decimal::ZERO);
    }

    let days = (end - start).num_days();
    let raw = unrounded_interest(principal.to_f64().unwrap_or(0.0), days);

    to_cents(Decimal::from_f64(raw).unwrap_or(Decimal::ZERO))
}

/// Interest on `principal` between two `YYYY-MM-DD` dates.
///
/// A malformed date is logged and yields zero; it is never returned to the
/// caller as an error.
///
/// # Example
///
/// ```
/// use liquidation_engine::calculation::bcrp_interest;
/// use rust_decimal::Decimal;
///
/// let principal = Decimal::new(100000, 2);
/// assert_eq!(bcrp_interest(principal, "2024-01-01", "2024-01-31"), Decimal::new(221, 2));
/// assert_eq!(bcrp_interest(principal, "2024-01-01", "not a date"), Decimal::ZERO);
/// ```
pub fn bcrp_interest(principal: Decimal, start: &str, end: &str) -> Decimal {
    match (parse_iso_date(start), parse_iso_date(end)) {
        (Ok(start), Ok(end)) => compound_interest(principal, start, end),
        (Err(err), _) | (_, Err(err)) => {
            error!(error = %err, "Malformed date in interest calculation");
            to_cents(Decimal::ZERO)
        }
    }
}

/// Extended interest calculation up to `end`, or up to today when omitted.
pub fn interest_report(principal: Decimal, start: &str, end: Option<&str>) -> InterestResult {
    interest_report_at(principal, start, end, Local::now().date_naive())
}

/// Extended interest calculation with an explicit "today".
///
/// Elapsed days are zero when the range is empty, inverted or unparsable.
/// The effective rate is zero unless the principal is positive.
///
/// # Example
///
/// ```
/// use liquidation_engine::calculation::interest_report_at;
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let today = NaiveDate::from_ymd_opt(2025, 7, 23).unwrap();
/// let report = interest_report_at(Decimal::new(7600, 2), "2021-01-15", None, today);
///
/// assert_eq!(report.end_date, "2025-07-23");
/// assert_eq!(report.elapsed_days, 1650);
/// assert_eq!(report.interest, Decimal::new(980, 2));
/// assert_eq!(report.total, Decimal::new(8580, 2));
/// ```
pub fn interest_report_at(
    principal: Decimal,
    start: &str,
    end: Option<&str>,
    today: NaiveDate,
) -> InterestResult {
    let end_date = end
        .map(str::to_string)
        .unwrap_or_else(|| today.format(ISO_DATE_FORMAT).to_string());

    let interest = bcrp_interest(principal, start, &end_date);

    let elapsed_days = match (parse_iso_date(start), parse_iso_date(&end_date)) {
        (Ok(s), Ok(e)) if e > s => (e - s).num_days(),
        _ => 0,
    };

    let effective_rate_percent = if principal > Decimal::ZERO {
        (interest / principal * Decimal::ONE_HUNDRED).round_dp(4)
    } else {
        Decimal::ZERO
    };

    InterestResult {
        principal,
        start_date: start.to_string(),
        end_date,
        elapsed_days,
        interest,
        total: principal + interest,
        effective_rate_percent,
    }
}

/// Rounds to cents, always carrying two decimals.
pub(crate) fn to_cents(value: Decimal) -> Decimal {
    let mut rounded = value.round_dp(2);
    rounded.rescale(2);
    rounded
}
