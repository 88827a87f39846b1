//! Remuneration model.
//!
//! The "computable" remuneration is the monthly salary plus one sixth of the
//! semestral bonus. CTS and gratificación are both derived from it.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Which remuneration feeds the per-period amounts.
///
/// The liquidation sheet carries two header blocks: one built from the
/// roster's current salary and one from a fixed legacy salary. Only one of
/// them drives the CTS and gratificación tranches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PeriodBasis {
    /// The fixed legacy salary and bonus from `remuneration.yaml`.
    Legacy,
    /// The worker's base salary from the roster.
    Roster,
}

/// A monthly salary together with its semestral bonus reference.
///
/// # Example
///
/// ```
/// use liquidation_engine::models::Remuneration;
/// use rust_decimal::Decimal;
///
/// let pay = Remuneration::new(Decimal::new(1100, 0), Decimal::new(550, 0));
/// assert_eq!(pay.gratification(), Decimal::new(550, 0));
/// assert_eq!(pay.computable().round_dp(2), Decimal::new(119167, 2));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Remuneration {
    /// Monthly salary.
    pub salary: Decimal,
    /// Semestral bonus used for the one-sixth share.
    pub bonus: Decimal,
}

impl Remuneration {
    /// Creates a remuneration from a salary and its bonus reference.
    pub fn new(salary: Decimal, bonus: Decimal) -> Self {
        Self { salary, bonus }
    }

    /// One sixth of the bonus, the share added to the computable.
    pub fn bonus_sixth(&self) -> Decimal {
        self.bonus / Decimal::from(6)
    }

    /// Salary plus one sixth of the bonus.
    pub fn computable(&self) -> Decimal {
        self.salary + self.bonus_sixth()
    }

    /// The semestral gratificación: half a monthly salary.
    pub fn gratification(&self) -> Decimal {
        self.salary / Decimal::from(2)
    }
}
