//! CTS accrual per semester.
//!
//! Half of the computable remuneration is accrued per semester: a twelfth of
//! it per whole month and a thirtieth of that per residual day. Interest runs
//! from the day after the accrual closes up to the settlement date.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::models::{AuditStep, CtsAccrual, PeriodResult, Remuneration};

use super::bcrp_interest::{compound_interest, to_cents};

/// Legal basis for the CTS accrual.
pub const CTS_LEGAL_REF: &str = "D.S. 001-97-TR";

/// Legal basis for statutory interest on labor debts.
pub const INTEREST_LEGAL_REF: &str = "D.L. 25920";

/// The result of accruing CTS for one period, including the audit step.
#[derive(Debug, Clone)]
pub struct CtsAccrualResult {
    /// The accrued amounts.
    pub accrual: CtsAccrual,
    /// The audit step recording this accrual.
    pub audit_step: AuditStep,
}

/// Accrues CTS for `period` on the computable of `pay`.
///
/// # Arguments
///
/// * `period` - The computable time in the semester
/// * `pay` - The remuneration whose computable drives the rates
/// * `settlement_date` - The date interest runs up to
/// * `step_number` - The step number for audit trail sequencing
///
/// # Example
///
/// ```
/// use liquidation_engine::calculation::{accrue_cts, cts_periods};
/// use liquidation_engine::models::Remuneration;
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let hire = NaiveDate::from_ymd_opt(2023, 5, 1).unwrap();
/// let cutoff = NaiveDate::from_ymd_opt(2023, 10, 31).unwrap();
/// let period = &cts_periods(hire, cutoff)[0];
/// let pay = Remuneration::new(Decimal::new(1100, 0), Decimal::new(550, 0));
///
/// let result = accrue_cts(period, &pay, cutoff, 1);
/// assert_eq!(result.accrual.total, Decimal::new(29792, 2));
/// assert_eq!(result.accrual.interest, Decimal::ZERO);
/// ```
pub fn accrue_cts(
    period: &PeriodResult,
    pay: &Remuneration,
    settlement_date: NaiveDate,
    step_number: u32,
) -> CtsAccrualResult {
    let half_computable = pay.computable() / Decimal::from(2);
    let monthly_rate = half_computable / Decimal::from(12);
    let daily_rate = monthly_rate / Decimal::from(30);

    let months_amount = monthly_rate * Decimal::from(period.months);
    let days_amount = daily_rate * Decimal::from(period.days);
    let total = to_cents(months_amount + days_amount);

    let interest_from = period.accrual_end.succ_opt().unwrap_or(period.accrual_end);
    let interest = compound_interest(total, interest_from, settlement_date);

    let audit_step = AuditStep {
        step_number,
        rule_id: "cts_accrual".to_string(),
        rule_name: "CTS Accrual".to_string(),
        legal_ref: format!("{}, {}", CTS_LEGAL_REF, INTEREST_LEGAL_REF),
        input: serde_json::json!({
            "period": period.label(),
            "months": period.months,
            "days": period.days,
            "computable": pay.computable().round_dp(2).to_string(),
            "settlement_date": settlement_date.to_string()
        }),
        output: serde_json::json!({
            "monthly_rate": monthly_rate.round_dp(2).to_string(),
            "daily_rate": daily_rate.round_dp(2).to_string(),
            "total": total.to_string(),
            "interest": interest.to_string()
        }),
        reasoning: format!(
            "{} months and {} days at {} per month: {}, interest from {} to {}: {}",
            period.months,
            period.days,
            monthly_rate.round_dp(2),
            total,
            interest_from,
            settlement_date,
            interest
        ),
    };

    CtsAccrualResult {
        accrual: CtsAccrual {
            period: period.clone(),
            half_computable,
            monthly_rate,
            daily_rate,
            months_amount,
            days_amount,
            total,
            interest,
            total_with_interest: total + interest,
        },
        audit_step,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculation::cts_periods;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn legacy_pay() -> Remuneration {
        Remuneration::new(dec("1100"), dec("550"))
    }

    fn period_with(months: u32, days: u32) -> PeriodResult {
        let mut period = cts_periods(date(2023, 5, 1), date(2023, 10, 31)).remove(0);
        period.months = months;
        period.days = days;
        period
    }

    /// CTS-001: full semester on legacy pay
    #[test]
    fn test_cts_001_full_semester() {
        let result = accrue_cts(&period_with(6, 0), &legacy_pay(), date(2023, 10, 31), 1);

        assert_eq!(result.accrual.total, dec("297.92"));
        assert_eq!(result.accrual.monthly_rate.round_dp(2), dec("49.65"));
        assert_eq!(result.accrual.daily_rate.round_dp(2), dec("1.66"));
        assert_eq!(result.accrual.days_amount, Decimal::ZERO);
    }

    /// CTS-002: months and residual days
    #[test]
    fn test_cts_002_partial_semester() {
        let result = accrue_cts(&period_with(1, 16), &legacy_pay(), date(2023, 10, 31), 1);
        assert_eq!(result.accrual.total, dec("76.13"));

        let result = accrue_cts(&period_with(2, 23), &legacy_pay(), date(2023, 10, 31), 1);
        assert_eq!(result.accrual.total, dec("137.37"));
    }

    /// CTS-003: interest runs from the day after the accrual ends
    #[test]
    fn test_cts_003_interest_to_settlement() {
        // 2023-11-01 .. 2024-10-31 is 365 days
        let result = accrue_cts(&period_with(6, 0), &legacy_pay(), date(2024, 10, 31), 1);

        assert_eq!(result.accrual.interest, dec("8.10"));
        assert_eq!(result.accrual.total_with_interest, dec("306.02"));
    }

    /// CTS-004: settlement before the accrual closes accrues no interest
    #[test]
    fn test_cts_004_settlement_inside_period() {
        let result = accrue_cts(&period_with(6, 0), &legacy_pay(), date(2023, 7, 1), 1);
        assert_eq!(result.accrual.interest, Decimal::ZERO);
        assert_eq!(result.accrual.total_with_interest, dec("297.92"));
    }

    #[test]
    fn test_roster_pay_full_semester() {
        let pay = Remuneration::new(dec("1500"), dec("520"));
        let result = accrue_cts(&period_with(6, 0), &pay, date(2023, 10, 31), 1);
        assert_eq!(result.accrual.total, dec("396.67"));
    }

    #[test]
    fn test_audit_step_records_rule_and_period() {
        let result = accrue_cts(&period_with(6, 0), &legacy_pay(), date(2023, 10, 31), 4);

        assert_eq!(result.audit_step.step_number, 4);
        assert_eq!(result.audit_step.rule_id, "cts_accrual");
        assert!(result.audit_step.legal_ref.contains(CTS_LEGAL_REF));
        assert_eq!(
            result.audit_step.input["period"].as_str().unwrap(),
            "2023-05-01 al 2023-10-31"
        );
        assert_eq!(result.audit_step.output["total"].as_str().unwrap(), "297.92");
    }
}
