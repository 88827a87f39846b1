//! Roster date parsing.
//!
//! Roster dates arrive either as Excel serial numbers or as text in one of a
//! few formats. Day-first formats win over month-first ones.

use chrono::{Days, NaiveDate, NaiveDateTime};

use crate::error::{LiquidationError, LiquidationResult};

/// Day zero of the Excel 1900 date system, accounting for the phantom
/// 29 Feb 1900.
const EXCEL_EPOCH: (i32, u32, u32) = (1899, 12, 30);

/// Largest serial Excel accepts (31 Dec 9999).
const MAX_EXCEL_SERIAL: f64 = 2_958_465.0;

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%d/%m/%Y", "%d-%m-%Y", "%d.%m.%Y"];
const DATETIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%d/%m/%Y %H:%M:%S"];

/// Converts an Excel serial day number to a date. The time fraction is dropped.
///
/// # Example
///
/// ```
/// use liquidation_engine::roster::excel_serial_to_date;
/// use chrono::NaiveDate;
///
/// assert_eq!(excel_serial_to_date(44270.0), NaiveDate::from_ymd_opt(2021, 3, 15));
/// assert_eq!(excel_serial_to_date(-1.0), None);
/// ```
pub fn excel_serial_to_date(serial: f64) -> Option<NaiveDate> {
    if !serial.is_finite() || !(1.0..=MAX_EXCEL_SERIAL).contains(&serial) {
        return None;
    }
    let (y, m, d) = EXCEL_EPOCH;
    NaiveDate::from_ymd_opt(y, m, d)?.checked_add_days(Days::new(serial.trunc() as u64))
}

/// Parses a roster date cell.
///
/// Empty cells are `Ok(None)`. Anything non-empty that is neither a serial
/// number nor a supported date format is `InvalidDate`.
///
/// # Examples
///
/// ```
/// use liquidation_engine::roster::parse_roster_date;
/// use chrono::NaiveDate;
///
/// let expected = NaiveDate::from_ymd_opt(2021, 3, 15);
/// assert_eq!(parse_roster_date("15/03/2021").unwrap(), expected);
/// assert_eq!(parse_roster_date("2021-03-15 00:00:00").unwrap(), expected);
/// assert_eq!(parse_roster_date("44270").unwrap(), expected);
/// assert_eq!(parse_roster_date("  ").unwrap(), None);
/// assert!(parse_roster_date("ayer").is_err());
/// ```
pub fn parse_roster_date(raw: &str) -> LiquidationResult<Option<NaiveDate>> {
    let value = raw.trim();
    if value.is_empty() || value.eq_ignore_ascii_case("nan") || value.eq_ignore_ascii_case("nat") {
        return Ok(None);
    }

    if let Ok(serial) = value.parse::<f64>() {
        return excel_serial_to_date(serial)
            .map(Some)
            .ok_or_else(|| LiquidationError::InvalidDate {
                value: raw.to_string(),
                message: "serial number outside the Excel date range".to_string(),
            });
    }

    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(value, format) {
            return Ok(Some(date));
        }
    }

    for format in DATETIME_FORMATS {
        if let Ok(datetime) = NaiveDateTime::parse_from_str(value, format) {
            return Ok(Some(datetime.date()));
        }
    }

    Err(LiquidationError::InvalidDate {
        value: raw.to_string(),
        message: "expected an Excel serial, YYYY-MM-DD or DD/MM/YYYY".to_string(),
    })
}
