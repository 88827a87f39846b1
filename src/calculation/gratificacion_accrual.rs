//! Gratificación accrual per semester.
//!
//! A sixth of the semestral gratificación accrues per whole month and a
//! thirtieth of that per residual day. The extraordinary bonus is a fixed
//! percentage of the accrued gratificación.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::models::{AuditStep, GratificacionAccrual, PeriodResult, Remuneration};

use super::bcrp_interest::{compound_interest, to_cents};
use super::cts_accrual::INTEREST_LEGAL_REF;

/// Legal basis for the gratificación accrual.
pub const GRATIFICACION_LEGAL_REF: &str = "Ley 27735";

/// Legal basis for the extraordinary bonus.
pub const EXTRAORDINARY_BONUS_LEGAL_REF: &str = "Ley 29351";

/// The default extraordinary bonus rate (9 %).
pub const DEFAULT_EXTRAORDINARY_BONUS_RATE: Decimal = Decimal::from_parts(9, 0, 0, false, 2);

/// The result of accruing gratificación for one period, including the audit step.
#[derive(Debug, Clone)]
pub struct GratificacionAccrualResult {
    /// The accrued amounts.
    pub accrual: GratificacionAccrual,
    /// The audit step recording this accrual.
    pub audit_step: AuditStep,
}

/// Accrues gratificación for `period` on the salary of `pay`.
///
/// # Arguments
///
/// * `period` - The computable time in the semester
/// * `pay` - The remuneration whose salary drives the gratificación
/// * `bonus_rate` - The extraordinary bonus rate (e.g. `0.09`)
/// * `settlement_date` - The date interest runs up to
/// * `step_number` - The step number for audit trail sequencing
///
/// # Example
///
/// ```
/// use liquidation_engine::calculation::{
///     accrue_gratificacion, gratificacion_periods, DEFAULT_EXTRAORDINARY_BONUS_RATE,
/// };
/// use liquidation_engine::models::Remuneration;
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let hire = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
/// let cutoff = NaiveDate::from_ymd_opt(2024, 6, 30).unwrap();
/// let period = &gratificacion_periods(hire, cutoff)[0];
/// let pay = Remuneration::new(Decimal::new(1100, 0), Decimal::new(550, 0));
///
/// let result = accrue_gratificacion(period, &pay, DEFAULT_EXTRAORDINARY_BONUS_RATE, cutoff, 1);
/// assert_eq!(result.accrual.total, Decimal::new(55000, 2));
/// assert_eq!(result.accrual.extraordinary_bonus, Decimal::new(4950, 2));
/// ```
pub fn accrue_gratificacion(
    period: &PeriodResult,
    pay: &Remuneration,
    bonus_rate: Decimal,
    settlement_date: NaiveDate,
    step_number: u32,
) -> GratificacionAccrualResult {
    let gratification = pay.gratification();
    let monthly_rate = gratification / Decimal::from(6);
    let daily_rate = monthly_rate / Decimal::from(30);

    let months_amount = monthly_rate * Decimal::from(period.months);
    let days_amount = daily_rate * Decimal::from(period.days);
    let total = to_cents(months_amount + days_amount);

    let extraordinary_bonus = to_cents(total * bonus_rate);
    let total_with_bonus = total + extraordinary_bonus;

    let interest_from = period.accrual_end.succ_opt().unwrap_or(period.accrual_end);
    let interest = compound_interest(total_with_bonus, interest_from, settlement_date);

    let audit_step = AuditStep {
        step_number,
        rule_id: "gratificacion_accrual".to_string(),
        rule_name: "Gratificación Accrual".to_string(),
        legal_ref: format!(
            "{}, {}, {}",
            GRATIFICACION_LEGAL_REF, EXTRAORDINARY_BONUS_LEGAL_REF, INTEREST_LEGAL_REF
        ),
        input: serde_json::json!({
            "period": period.label(),
            "months": period.months,
            "days": period.days,
            "gratification": gratification.round_dp(2).to_string(),
            "bonus_rate": bonus_rate.to_string(),
            "settlement_date": settlement_date.to_string()
        }),
        output: serde_json::json!({
            "total": total.to_string(),
            "extraordinary_bonus": extraordinary_bonus.to_string(),
            "interest": interest.to_string()
        }),
        reasoning: format!(
            "{} months and {} days of a {} gratificación: {}, plus {} bonus, interest {}",
            period.months,
            period.days,
            gratification.round_dp(2),
            total,
            extraordinary_bonus,
            interest
        ),
    };

    GratificacionAccrualResult {
        accrual: GratificacionAccrual {
            period: period.clone(),
            gratification,
            monthly_rate,
            daily_rate,
            months_amount,
            days_amount,
            total,
            extraordinary_bonus,
            total_with_bonus,
            interest,
            grand_total: total_with_bonus + interest,
        },
        audit_step,
    }
}
