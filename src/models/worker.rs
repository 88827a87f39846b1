//! Worker model.
//!
//! This module defines the [`WorkerRecord`] read from the roster, together
//! with the sentinel values substituted for missing identity fields.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Placeholder written when the roster row has no worker code.
pub const MISSING_CODE: &str = "SIN_CODIGO";

/// Placeholder written when the roster row has no worker name.
pub const MISSING_NAME: &str = "SIN_NOMBRE";

/// A worker as read from the roster.
///
/// Dates are optional because the roster may leave them blank; the
/// calculations that need a missing date are skipped for that worker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkerRecord {
    /// Worker code (document number), or [`MISSING_CODE`].
    pub code: String,
    /// Full name, surnames first, or [`MISSING_NAME`].
    pub name: String,
    /// Position held.
    pub position: String,
    /// Date the worker was hired.
    pub hire_date: Option<NaiveDate>,
    /// Date the employment ended, if it has.
    pub termination_date: Option<NaiveDate>,
    /// Monthly base salary.
    pub base_salary: Decimal,
}

impl WorkerRecord {
    /// Returns true if the roster records a termination date.
    ///
    /// # Examples
    ///
    /// ```
    /// use liquidation_engine::models::WorkerRecord;
    /// use chrono::NaiveDate;
    /// use rust_decimal::Decimal;
    ///
    /// let worker = WorkerRecord {
    ///     code: "40123456".to_string(),
    ///     name: "QUISPE MAMANI ROSA".to_string(),
    ///     position: "AUXILIAR".to_string(),
    ///     hire_date: NaiveDate::from_ymd_opt(2021, 3, 15),
    ///     termination_date: NaiveDate::from_ymd_opt(2025, 7, 23),
    ///     base_salary: Decimal::new(1500, 0),
    /// };
    /// assert!(worker.is_terminated());
    /// ```
    pub fn is_terminated(&self) -> bool {
        self.termination_date.is_some()
    }

    /// Returns true if either identity field had to be replaced by a sentinel.
    pub fn has_placeholder_identity(&self) -> bool {
        self.code == MISSING_CODE || self.name == MISSING_NAME
    }
}
