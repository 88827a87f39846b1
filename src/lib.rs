//! Liquidation engine for Peruvian CTS and gratificaciones
//!
//! This crate segments an employment span into the semesters of the CTS and
//! gratificación calendars, accrues each semester, adds BCRP statutory
//! interest, and transcribes the result into a liquidation template workbook
//! per worker of a payroll roster.

#![warn(missing_docs)]

pub mod batch;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
pub mod roster;
pub mod template;
