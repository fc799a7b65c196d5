//! Commission (fee) rules.
//!
//! Every fee in the back office is the same computation: a percentage of a
//! salary, rounded to a whole won. Job postings use the employer rate, job
//! seekings the employee rate, and a matching carries both.

use crate::currency::format_currency;
use crate::error::{CoreError, Result};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Compute `round(amount * rate_percent / 100)` in whole won.
///
/// Midpoints round away from zero. Negative amounts or rates are rejected.
///
/// # Example
///
/// ```rust
/// use helpernote_core::fee::fee;
/// use rust_decimal::Decimal;
///
/// assert_eq!(
///     fee(Decimal::from(3_000_000), Decimal::from(10)).unwrap(),
///     Decimal::from(300_000)
/// );
/// ```
pub fn fee(amount: Decimal, rate_percent: Decimal) -> Result<Decimal> {
    if amount.is_sign_negative() && !amount.is_zero() {
        return Err(CoreError::invalid_input(format!(
            "amount must not be negative (got {})",
            amount
        )));
    }
    if rate_percent.is_sign_negative() && !rate_percent.is_zero() {
        return Err(CoreError::invalid_input(format!(
            "fee rate must not be negative (got {})",
            rate_percent
        )));
    }

    let raw = amount
        .checked_mul(rate_percent)
        .ok_or_else(|| CoreError::invalid_input("fee calculation overflowed"))?
        / Decimal::ONE_HUNDRED;

    Ok(raw.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero))
}

/// Fee with a missing rate treated as zero.
pub fn fee_or_zero(amount: Decimal, rate_percent: Option<Decimal>) -> Result<Decimal> {
    fee(amount, rate_percent.unwrap_or(Decimal::ZERO))
}

/// Both sides of a matching's commission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeBreakdown {
    pub employer_fee: Decimal,
    pub employee_fee: Decimal,
}

impl FeeBreakdown {
    /// Compute employer and employee fees on an agreed salary.
    pub fn for_matching(
        agreed_salary: Decimal,
        employer_rate: Decimal,
        employee_rate: Decimal,
    ) -> Result<Self> {
        Ok(Self {
            employer_fee: fee(agreed_salary, employer_rate)?,
            employee_fee: fee(agreed_salary, employee_rate)?,
        })
    }

    /// Total commission earned by the agency.
    pub fn total(&self) -> Decimal {
        self.employer_fee + self.employee_fee
    }
}

/// Render a fee together with its rate, e.g. `₩300,000 (10%)`.
pub fn format_fee_calculation(amount: Decimal, rate_percent: Decimal) -> Result<String> {
    let fee = fee(amount, rate_percent)?;
    Ok(format!(
        "{} ({}%)",
        format_currency(fee),
        rate_percent.normalize()
    ))
}
