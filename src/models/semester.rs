//! Semester and period result models.
//!
//! A [`Semester`] is one regulatory half-year bucket. A [`PeriodResult`] is
//! the part of that bucket a worker actually accrued, decomposed into whole
//! months and residual days.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A closed half-year interval `[start, end]`.
///
/// # Example
///
/// ```
/// use liquidation_engine::models::Semester;
/// use chrono::NaiveDate;
///
/// let semester = Semester {
///     start: NaiveDate::from_ymd_opt(2023, 5, 1).unwrap(),
///     end: NaiveDate::from_ymd_opt(2023, 10, 31).unwrap(),
/// };
/// assert_eq!(semester.label(), "2023-05-01 al 2023-10-31");
/// assert!(semester.contains(NaiveDate::from_ymd_opt(2023, 10, 31).unwrap()));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Semester {
    /// First day of the semester (inclusive).
    pub start: NaiveDate,
    /// Last day of the semester (inclusive).
    pub end: NaiveDate,
}

impl Semester {
    /// Checks whether `date` falls inside the semester, both ends inclusive.
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }

    /// The label used on the liquidation sheet, e.g. `2023-05-01 al 2023-10-31`.
    pub fn label(&self) -> String {
        format!(
            "{} al {}",
            self.start.format("%Y-%m-%d"),
            self.end.format("%Y-%m-%d")
        )
    }
}

impl fmt::Display for Semester {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

/// The computable time a worker accrued inside one semester.
///
/// # Example
///
/// ```
/// use liquidation_engine::models::{PeriodResult, Semester};
/// use chrono::NaiveDate;
///
/// let period = PeriodResult {
///     semester: Semester {
///         start: NaiveDate::from_ymd_opt(2020, 11, 1).unwrap(),
///         end: NaiveDate::from_ymd_opt(2021, 4, 30).unwrap(),
///     },
///     accrual_start: NaiveDate::from_ymd_opt(2021, 3, 15).unwrap(),
///     accrual_end: NaiveDate::from_ymd_opt(2021, 4, 30).unwrap(),
///     months: 1,
///     days: 16,
/// };
/// assert!(!period.is_full_semester());
/// assert_eq!(period.label(), "2020-11-01 al 2021-04-30");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodResult {
    /// The regulatory semester this period belongs to.
    pub semester: Semester,
    /// First accrued day (hire date or semester start).
    pub accrual_start: NaiveDate,
    /// Last accrued day (cutoff date or semester end).
    pub accrual_end: NaiveDate,
    /// Whole computable months.
    pub months: u32,
    /// Residual computable days.
    pub days: u32,
}

impl PeriodResult {
    /// The semester label, see [`Semester::label`].
    pub fn label(&self) -> String {
        self.semester.label()
    }

    /// True when nothing was accrued; such periods are never emitted.
    pub fn is_empty(&self) -> bool {
        self.months == 0 && self.days == 0
    }

    /// True when the worker accrued the whole six months.
    pub fn is_full_semester(&self) -> bool {
        self.months == 6 && self.days == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn create_semester() -> Semester {
        Semester {
            start: date(2023, 11, 1),
            end: date(2024, 4, 30),
        }
    }

    #[test]
    fn test_contains_on_bounds() {
        let semester = create_semester();
        assert!(semester.contains(semester.start));
        assert!(semester.contains(semester.end));
        assert!(!semester.contains(date(2023, 10, 31)));
        assert!(!semester.contains(date(2024, 5, 1)));
    }

    #[test]
    fn test_display_matches_label() {
        let semester = create_semester();
        assert_eq!(semester.to_string(), "2023-11-01 al 2024-04-30");
    }

    #[test]
    fn test_empty_and_full_flags() {
        let mut period = PeriodResult {
            semester: create_semester(),
            accrual_start: date(2023, 11, 1),
            accrual_end: date(2024, 4, 30),
            months: 6,
            days: 0,
        };
        assert!(period.is_full_semester());
        assert!(!period.is_empty());

        period.months = 0;
        assert!(period.is_empty());
        assert!(!period.is_full_semester());
    }

    #[test]
    fn test_serialize_period_result() {
        let period = PeriodResult {
            semester: create_semester(),
            accrual_start: date(2024, 1, 10),
            accrual_end: date(2024, 4, 30),
            months: 3,
            days: 21,
        };
        let json = serde_json::to_string(&period).unwrap();
        assert!(json.contains("\"start\":\"2023-11-01\""));
        assert!(json.contains("\"accrual_start\":\"2024-01-10\""));
        assert!(json.contains("\"months\":3"));
        assert!(json.contains("\"days\":21"));
    }
}
