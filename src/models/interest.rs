//! Interest result model.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The extended result of a statutory interest calculation.
///
/// Dates are kept as the caller supplied them so that a malformed input can
/// still be echoed back next to a zero result.
///
/// # Example
///
/// ```
/// use liquidation_engine::models::InterestResult;
/// use rust_decimal::Decimal;
///
/// let result = InterestResult {
///     principal: Decimal::new(100000, 2),
///     start_date: "2023-01-01".to_string(),
///     end_date: "2023-12-31".to_string(),
///     elapsed_days: 364,
///     interest: Decimal::new(2711, 2),
///     total: Decimal::new(102711, 2),
///     effective_rate_percent: Decimal::new(2711, 3),
/// };
/// assert_eq!(result.total, result.principal + result.interest);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterestResult {
    /// The amount interest accrues on.
    pub principal: Decimal,
    /// Start of the accrual, `YYYY-MM-DD`.
    pub start_date: String,
    /// End of the accrual, `YYYY-MM-DD`.
    pub end_date: String,
    /// Days between start and end; zero when the range is empty or invalid.
    pub elapsed_days: i64,
    /// Interest rounded to two decimals.
    pub interest: Decimal,
    /// Principal plus interest.
    pub total: Decimal,
    /// Interest as a percentage of the principal; zero for a zero principal.
    pub effective_rate_percent: Decimal,
}
