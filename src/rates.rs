//! Rate conversion and Price-table installments.
//!
//! Loans are usually quoted with an annual rate and a term. The generator wants a
//! monthly rate and a fixed installment, so these helpers bridge the two.

use rust_decimal::{Decimal, MathematicalOps};
use rust_decimal_macros::dec;

use crate::error::{AmortizationError, AmortizationResult};
use crate::types::{round_money, Money, Rate};

/// Normalizes an annual interest rate percentage to a monthly decimal factor.
///
/// 10.5 (% a year) becomes the monthly rate that compounds to 10.5% over twelve months.
pub fn normalize_annual_interest_rate(annual_pct: Decimal) -> Rate {
    let base = dec!(1) + annual_pct / dec!(100);
    base.powd(dec!(1) / dec!(12)) - dec!(1)
}

/// Fixed installment that pays off `balance` in `months` periods (Price table).
///
/// PMT = P * [i(1 + i)^n] / [(1 + i)^n - 1], rounded half-up to cents. With a
/// zero rate the balance is simply split evenly.
///
/// # Errors
///
/// Returns an error if `months` is zero, the balance is not positive or the rate is negative.
pub fn fixed_installment_for_term(
    balance: Money,
    monthly_rate: Rate,
    months: u32,
) -> AmortizationResult<Money> {
    if months == 0 {
        return Err(AmortizationError::invalid("months", "term cannot be zero"));
    }
    if balance <= Decimal::ZERO {
        return Err(AmortizationError::invalid(
            "initial_balance",
            format!("must be positive, got {balance}"),
        ));
    }
    if monthly_rate < Decimal::ZERO {
        return Err(AmortizationError::invalid(
            "monthly_rate",
            format!("cannot be negative, got {monthly_rate}"),
        ));
    }

    if monthly_rate.is_zero() {
        return Ok(round_money(balance / Decimal::from(months)));
    }

    let i_plus_1_pow_n = (dec!(1) + monthly_rate).powu(u64::from(months));
    let payment = balance * (monthly_rate * i_plus_1_pow_n) / (i_plus_1_pow_n - dec!(1));
    Ok(round_money(payment))
}
