//! Core data models for the liquidation engine.
//!
//! This module contains all the domain models used throughout the engine.

mod interest;
mod liquidation;
mod remuneration;
mod semester;
mod worker;

pub use interest::InterestResult;
pub use liquidation::{
    AuditStep, AuditTrace, AuditWarning, CtsAccrual, GratificacionAccrual, LiquidationTotals,
    WorkerLiquidation,
};
pub use remuneration::{PeriodBasis, Remuneration};
pub use semester::{PeriodResult, Semester};
pub use worker::{MISSING_CODE, MISSING_NAME, WorkerRecord};
