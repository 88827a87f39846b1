//! Calculation logic for the liquidation engine.
//!
//! This module contains the calendar arithmetic, the semestral period
//! segmentation shared by CTS and gratificación, the per-period accruals,
//! the BCRP statutory interest, and the per-worker liquidation that ties
//! them together.

mod bcrp_interest;
mod calendar_diff;
mod cts_accrual;
mod gratificacion_accrual;
mod liquidation;
mod semester_segmenter;

pub use bcrp_interest::{
    BCRP_DAILY_RATE, ISO_DATE_FORMAT, bcrp_interest, compound_interest, interest_report,
    interest_report_at, parse_iso_date, unrounded_interest,
};
pub use calendar_diff::{add_months_clamped, months_and_days};
pub use cts_accrual::{CTS_LEGAL_REF, CtsAccrualResult, INTEREST_LEGAL_REF, accrue_cts};
pub use gratificacion_accrual::{
    DEFAULT_EXTRAORDINARY_BONUS_RATE, EXTRAORDINARY_BONUS_LEGAL_REF, GRATIFICACION_LEGAL_REF,
    GratificacionAccrualResult, accrue_gratificacion,
};
pub use liquidation::liquidate_worker;
pub use semester_segmenter::{
    SemesterCalendar, accrue_period, cts_periods, gratificacion_periods, segment_semesters,
};
