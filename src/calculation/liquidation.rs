//! Per-worker liquidation.
//!
//! Ties segmentation, accrual and interest together for one roster record
//! and records every step in the audit trace.

use chrono::{NaiveDate, Utc};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::config::EngineConfig;
use crate::models::{
    AuditStep, AuditTrace, AuditWarning, LiquidationTotals, PeriodBasis, WorkerLiquidation,
    WorkerRecord,
};

use super::cts_accrual::accrue_cts;
use super::gratificacion_accrual::accrue_gratificacion;
use super::semester_segmenter::{cts_periods, gratificacion_periods};

/// Liquidates one worker up to `settlement_date`.
///
/// The CTS cutoff and the gratificación cutoff are the worker's termination
/// date when the roster has one, otherwise the defaults of `run.yaml`.
/// A worker without a hire date gets no periods and a `MISSING_HIRE_DATE`
/// warning; the header data is still produced.
///
/// # Example
///
/// ```
/// use liquidation_engine::calculation::liquidate_worker;
/// use liquidation_engine::config::{EngineConfig, LayoutConfig, RemunerationConfig, RunConfig};
/// use liquidation_engine::models::WorkerRecord;
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let config = EngineConfig::new(
///     RunConfig::new("planilla.xlsx", "plantilla.xlsx", "salida"),
///     RemunerationConfig::default(),
///     LayoutConfig::default(),
/// );
/// let worker = WorkerRecord {
///     code: "40123456".to_string(),
///     name: "QUISPE MAMANI ROSA".to_string(),
///     position: "AUXILIAR".to_string(),
///     hire_date: NaiveDate::from_ymd_opt(2024, 11, 1),
///     termination_date: NaiveDate::from_ymd_opt(2025, 7, 23),
///     base_salary: Decimal::new(1500, 0),
/// };
///
/// let settlement = NaiveDate::from_ymd_opt(2025, 7, 23).unwrap();
/// let liquidation = liquidate_worker(&worker, &config, settlement);
/// assert_eq!(liquidation.cts.len(), 2);
/// assert_eq!(liquidation.gratificaciones.len(), 3);
/// ```
pub fn liquidate_worker(
    worker: &WorkerRecord,
    config: &EngineConfig,
    settlement_date: NaiveDate,
) -> WorkerLiquidation {
    let remuneration = config.remuneration();
    let current_pay = remuneration.current_pay(worker.base_salary);
    let legacy_pay = remuneration.legacy_pay();
    let period_basis = remuneration.period_basis;
    let pay = match period_basis {
        PeriodBasis::Legacy => legacy_pay,
        PeriodBasis::Roster => current_pay,
    };

    let mut trace = AuditTrace::default();

    trace.steps.push(AuditStep {
        step_number: trace.next_step_number(),
        rule_id: "computable_remuneration".to_string(),
        rule_name: "Computable Remuneration".to_string(),
        legal_ref: "D.S. 001-97-TR".to_string(),
        input: serde_json::json!({
            "base_salary": worker.base_salary.to_string(),
            "reference_bonus": remuneration.reference_bonus.to_string(),
            "legacy_salary": legacy_pay.salary.to_string(),
            "legacy_bonus": legacy_pay.bonus.to_string(),
            "period_basis": period_basis
        }),
        output: serde_json::json!({
            "current_computable": current_pay.computable().round_dp(2).to_string(),
            "legacy_computable": legacy_pay.computable().round_dp(2).to_string()
        }),
        reasoning: format!(
            "Accruals use the {:?} remuneration with computable {}",
            period_basis,
            pay.computable().round_dp(2)
        ),
    });

    if worker.has_placeholder_identity() {
        trace.warnings.push(AuditWarning {
            code: "PLACEHOLDER_IDENTITY".to_string(),
            message: format!(
                "Worker identity incomplete (code {}, name {})",
                worker.code, worker.name
            ),
        });
    }

    let mut cts = Vec::new();
    let mut gratificaciones = Vec::new();

    match worker.hire_date {
        None => {
            warn!(worker = %worker.name, "Missing hire date, periods skipped");
            trace.warnings.push(AuditWarning {
                code: "MISSING_HIRE_DATE".to_string(),
                message: "No hire date on the roster; CTS and gratificación not computed"
                    .to_string(),
            });
        }
        Some(hire) => {
            let cts_cutoff = worker.termination_date.unwrap_or(config.run().cts_cutoff);
            let grat_cutoff = worker
                .termination_date
                .unwrap_or(config.run().gratificacion_cutoff);

            if cts_cutoff < hire || grat_cutoff < hire {
                warn!(worker = %worker.name, %hire, "Cutoff precedes hire date");
                trace.warnings.push(AuditWarning {
                    code: "CUTOFF_BEFORE_HIRE".to_string(),
                    message: format!(
                        "Hire date {} is after a cutoff (CTS {}, gratificación {})",
                        hire, cts_cutoff, grat_cutoff
                    ),
                });
            }

            for period in cts_periods(hire, cts_cutoff) {
                let result = accrue_cts(&period, &pay, settlement_date, trace.next_step_number());
                trace.steps.push(result.audit_step);
                cts.push(result.accrual);
            }

            for period in gratificacion_periods(hire, grat_cutoff) {
                let result = accrue_gratificacion(
                    &period,
                    &pay,
                    remuneration.extraordinary_bonus_rate,
                    settlement_date,
                    trace.next_step_number(),
                );
                trace.steps.push(result.audit_step);
                gratificaciones.push(result.accrual);
            }
        }
    }

    let totals = LiquidationTotals::from_accruals(&cts, &gratificaciones);

    debug!(
        worker = %worker.name,
        cts_periods = cts.len(),
        gratificacion_periods = gratificaciones.len(),
        grand_total = %totals.grand_total,
        "Worker liquidated"
    );

    WorkerLiquidation {
        calculation_id: Uuid::new_v4(),
        timestamp: Utc::now(),
        engine_version: env!("CARGO_PKG_VERSION").to_string(),
        worker: worker.clone(),
        current_pay,
        legacy_pay,
        period_basis,
        settlement_date,
        cts,
        gratificaciones,
        totals,
        audit_trace: trace,
    }
}
