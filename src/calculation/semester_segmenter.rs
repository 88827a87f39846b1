//! Semestral period segmentation.
//!
//! CTS and gratificación both accrue per half-year; they only differ in where
//! the half-years start. A [`SemesterCalendar`] captures that boundary rule and
//! [`segment_semesters`] partitions an employment span with it.

use chrono::{Datelike, Months, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{LiquidationError, LiquidationResult};
use crate::models::{PeriodResult, Semester};

use super::calendar_diff::months_and_days;

/// Boundary rule for a half-year accrual calendar.
///
/// Semesters start on the first day of `anchor_month` and six months later.
///
/// # Example
///
/// ```
/// use liquidation_engine::calculation::SemesterCalendar;
/// use chrono::NaiveDate;
///
/// let hire = NaiveDate::from_ymd_opt(2021, 3, 15).unwrap();
/// let semester = SemesterCalendar::CTS.semester_containing(hire).unwrap();
/// assert_eq!(semester.label(), "2020-11-01 al 2021-04-30");
///
/// let semester = SemesterCalendar::GRATIFICACION.semester_containing(hire).unwrap();
/// assert_eq!(semester.label(), "2021-01-01 al 2021-06-30");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SemesterCalendar {
    anchor_month: u32,
}

impl SemesterCalendar {
    /// CTS semesters: May–October and November–April.
    pub const CTS: SemesterCalendar = SemesterCalendar { anchor_month: 5 };

    /// Gratificación semesters: January–June and July–December.
    pub const GRATIFICACION: SemesterCalendar = SemesterCalendar { anchor_month: 1 };

    /// Creates a calendar whose semesters start in `anchor_month` and six
    /// months later.
    ///
    /// Returns `InvalidCalendar` unless `anchor_month` is in `1..=12`.
    pub fn new(anchor_month: u32) -> LiquidationResult<Self> {
        if !(1..=12).contains(&anchor_month) {
            return Err(LiquidationError::InvalidCalendar {
                message: format!("anchor month must be 1..=12, got {}", anchor_month),
            });
        }
        Ok(Self { anchor_month })
    }

    /// The month the first semester of the cycle starts in.
    pub fn anchor_month(&self) -> u32 {
        self.anchor_month
    }

    /// The semester that contains `date`.
    ///
    /// Returns `None` only at the edges of chrono's date range.
    pub fn semester_containing(&self, date: NaiveDate) -> Option<Semester> {
        let months_into_cycle = (date.month() as i32 - self.anchor_month as i32).rem_euclid(12);
        let months_into_semester = (months_into_cycle % 6) as u32;

        let start = date
            .with_day(1)?
            .checked_sub_months(Months::new(months_into_semester))?;
        Self::semester_from(start)
    }

    /// The semester immediately after `semester`.
    pub fn following(&self, semester: Semester) -> Option<Semester> {
        Self::semester_from(semester.start.checked_add_months(Months::new(6))?)
    }

    fn semester_from(start: NaiveDate) -> Option<Semester> {
        let end = start.checked_add_months(Months::new(6))?.pred_opt()?;
        Some(Semester { start, end })
    }
}

/// Clips `semester` to `[hire, cutoff]` and measures the overlap.
///
/// The overlap `[max(hire, start), min(cutoff, end)]` is measured as the
/// half-open interval ending the day after its last day. When the overlap is
/// empty the result carries zero months and zero days.
///
/// # Example
///
/// ```
/// use liquidation_engine::calculation::{accrue_period, SemesterCalendar};
/// use chrono::NaiveDate;
///
/// let hire = NaiveDate::from_ymd_opt(2022, 8, 10).unwrap();
/// let cutoff = NaiveDate::from_ymd_opt(2025, 7, 23).unwrap();
/// let semester = SemesterCalendar::GRATIFICACION.semester_containing(hire).unwrap();
///
/// let period = accrue_period(semester, hire, cutoff);
/// assert_eq!((period.months, period.days), (4, 22));
/// ```
pub fn accrue_period(semester: Semester, hire: NaiveDate, cutoff: NaiveDate) -> PeriodResult {
    let accrual_start = hire.max(semester.start);
    let accrual_end = cutoff.min(semester.end);

    let (months, days) = if accrual_end < accrual_start {
        (0, 0)
    } else {
        let end_exclusive = accrual_end.succ_opt().unwrap_or(accrual_end);
        months_and_days(accrual_start, end_exclusive)
    };

    PeriodResult {
        semester,
        accrual_start,
        accrual_end,
        months,
        days,
    }
}

/// Partitions `[hire, cutoff]` into semesters of `calendar`.
///
/// Starts with the semester containing `hire` and advances six months at a
/// time until a semester starts after `cutoff`. Periods with zero months and
/// zero days are dropped, so the result is ordered, non-overlapping and
/// contiguous. A cutoff before the hire date yields no periods.
///
/// # Example
///
/// ```
/// use liquidation_engine::calculation::{segment_semesters, SemesterCalendar};
/// use chrono::NaiveDate;
///
/// let hire = NaiveDate::from_ymd_opt(2024, 11, 1).unwrap();
/// let cutoff = NaiveDate::from_ymd_opt(2025, 7, 23).unwrap();
///
/// let periods = segment_semesters(SemesterCalendar::CTS, hire, cutoff);
/// assert_eq!(periods.len(), 2);
/// assert_eq!((periods[0].months, periods[0].days), (6, 0));
/// assert_eq!((periods[1].months, periods[1].days), (2, 23));
/// ```
pub fn segment_semesters(
    calendar: SemesterCalendar,
    hire: NaiveDate,
    cutoff: NaiveDate,
) -> Vec<PeriodResult> {
    let mut periods = Vec::new();
    if cutoff < hire {
        return periods;
    }

    let mut current = calendar.semester_containing(hire);
    while let Some(semester) = current {
        if semester.start > cutoff {
            break;
        }

        let period = accrue_period(semester, hire, cutoff);
        if !period.is_empty() {
            periods.push(period);
        }

        current = calendar.following(semester);
    }

    periods
}

/// CTS periods for a worker hired on `hire`, up to `cutoff`.
pub fn cts_periods(hire: NaiveDate, cutoff: NaiveDate) -> Vec<PeriodResult> {
    segment_semesters(SemesterCalendar::CTS, hire, cutoff)
}

/// Gratificación periods for a worker hired on `hire`, up to `cutoff`.
pub fn gratificacion_periods(hire: NaiveDate, cutoff: NaiveDate) -> Vec<PeriodResult> {
    segment_semesters(SemesterCalendar::GRATIFICACION, hire, cutoff)
}
