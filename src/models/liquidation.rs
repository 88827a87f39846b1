//! Liquidation result models.
//!
//! This module contains the [`WorkerLiquidation`] type and the structures it
//! aggregates: per-period CTS and gratificación accruals, totals, and the
//! audit trace recording every rule that was applied.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{PeriodBasis, PeriodResult, Remuneration, WorkerRecord};

/// The CTS accrued in one semester.
///
/// Half of the computable remuneration is due per semester, so the monthly
/// rate is `computable / 2 / 12` and the daily rate is a thirtieth of that.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CtsAccrual {
    /// The computable time in the semester.
    pub period: PeriodResult,
    /// Half of the computable remuneration.
    pub half_computable: Decimal,
    /// Amount per whole month.
    pub monthly_rate: Decimal,
    /// Amount per residual day.
    pub daily_rate: Decimal,
    /// `monthly_rate * months`.
    pub months_amount: Decimal,
    /// `daily_rate * days`.
    pub days_amount: Decimal,
    /// Months amount plus days amount, rounded to cents.
    pub total: Decimal,
    /// Statutory interest on `total` up to the settlement date.
    pub interest: Decimal,
    /// `total + interest`.
    pub total_with_interest: Decimal,
}

/// The gratificación accrued in one semester.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GratificacionAccrual {
    /// The computable time in the semester.
    pub period: PeriodResult,
    /// The full semestral gratificación the rates derive from.
    pub gratification: Decimal,
    /// Amount per whole month (`gratification / 6`).
    pub monthly_rate: Decimal,
    /// Amount per residual day (`monthly_rate / 30`).
    pub daily_rate: Decimal,
    /// `monthly_rate * months`.
    pub months_amount: Decimal,
    /// `daily_rate * days`.
    pub days_amount: Decimal,
    /// Months amount plus days amount, rounded to cents.
    pub total: Decimal,
    /// Ley 29351 extraordinary bonus on `total`.
    pub extraordinary_bonus: Decimal,
    /// `total + extraordinary_bonus`.
    pub total_with_bonus: Decimal,
    /// Statutory interest on `total_with_bonus` up to the settlement date.
    pub interest: Decimal,
    /// `total_with_bonus + interest`.
    pub grand_total: Decimal,
}

/// Aggregated totals for a worker's liquidation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LiquidationTotals {
    /// Sum of CTS totals.
    pub cts: Decimal,
    /// Sum of gratificación totals including the extraordinary bonus.
    pub gratificacion: Decimal,
    /// Sum of all statutory interest.
    pub interest: Decimal,
    /// Everything owed.
    pub grand_total: Decimal,
}

impl LiquidationTotals {
    /// Sums the accruals of a worker.
    pub fn from_accruals(cts: &[CtsAccrual], gratificaciones: &[GratificacionAccrual]) -> Self {
        let cts_total: Decimal = cts.iter().map(|c| c.total).sum();
        let grat_total: Decimal = gratificaciones.iter().map(|g| g.total_with_bonus).sum();
        let interest: Decimal = cts.iter().map(|c| c.interest).sum::<Decimal>()
            + gratificaciones.iter().map(|g| g.interest).sum::<Decimal>();

        Self {
            cts: cts_total,
            gratificacion: grat_total,
            interest,
            grand_total: cts_total + grat_total + interest,
        }
    }
}

/// A single step in the audit trace recording a calculation decision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number.
    pub step_number: u32,
    /// The unique identifier of the rule that was applied.
    pub rule_id: String,
    /// The human-readable name of the rule.
    pub rule_name: String,
    /// The legal provision the rule implements.
    pub legal_ref: String,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
}

/// A warning generated during calculation.
///
/// Warnings mark calculations that were skipped or degraded to a default,
/// without failing the worker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditWarning {
    /// A code identifying the type of warning.
    pub code: String,
    /// A human-readable description of the warning.
    pub message: String,
}

/// The complete audit trace for a worker's liquidation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditTrace {
    /// The sequence of calculation steps.
    pub steps: Vec<AuditStep>,
    /// Any warnings generated during calculation.
    pub warnings: Vec<AuditWarning>,
}

impl AuditTrace {
    /// The number the next pushed step should carry.
    pub fn next_step_number(&self) -> u32 {
        self.steps.len() as u32 + 1
    }
}

/// The complete liquidation of one worker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkerLiquidation {
    /// Unique identifier for this calculation.
    pub calculation_id: Uuid,
    /// When the calculation was performed.
    pub timestamp: DateTime<Utc>,
    /// The version of the engine that performed the calculation.
    pub engine_version: String,
    /// The worker being liquidated.
    pub worker: WorkerRecord,
    /// Remuneration built from the roster salary.
    pub current_pay: Remuneration,
    /// Remuneration built from the legacy fixed salary.
    pub legacy_pay: Remuneration,
    /// Which of the two remunerations fed the accruals.
    pub period_basis: PeriodBasis,
    /// The date interest runs up to.
    pub settlement_date: NaiveDate,
    /// CTS per semester, earliest first.
    pub cts: Vec<CtsAccrual>,
    /// Gratificación per semester, earliest first.
    pub gratificaciones: Vec<GratificacionAccrual>,
    /// Aggregated totals.
    pub totals: LiquidationTotals,
    /// Complete audit trace of calculation decisions.
    pub audit_trace: AuditTrace,
}

impl WorkerLiquidation {
    /// The remuneration the accruals were computed from.
    pub fn period_pay(&self) -> &Remuneration {
        match self.period_basis {
            PeriodBasis::Legacy => &self.legacy_pay,
            PeriodBasis::Roster => &self.current_pay,
        }
    }
}
