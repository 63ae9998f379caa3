use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::error::{AmortizationError, AmortizationResult};

/// Monetary amounts. Always decimal, never `f64`.
pub type Money = Decimal;

/// Rates as decimals per period (0.012 = 1.2% a month), never percentages.
pub type Rate = Decimal;

/// Rounds to cents, halves away from zero.
///
/// Every amount in this crate is non-negative, so this is plain half-up rounding.
pub fn round_money(value: Decimal) -> Money {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// True when `value` carries nothing below the cent. Trailing zeros don't count.
pub fn is_whole_cents(value: Decimal) -> bool {
    value.normalize().scale() <= 2
}

/// The inputs a loan record supplies to the generator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoanParameters {
    /// Outstanding principal at installment 1.
    pub initial_balance: Money,
    /// Simple interest charged on the declining balance each period.
    pub monthly_rate: Rate,
    /// Installment paid every period, interest included.
    pub fixed_installment: Money,
    /// Nominal date of installment 1.
    pub start_date: NaiveDate,
}

impl LoanParameters {
    pub fn new(
        initial_balance: Money,
        monthly_rate: Rate,
        fixed_installment: Money,
        start_date: NaiveDate,
    ) -> Self {
        Self {
            initial_balance,
            monthly_rate,
            fixed_installment,
            start_date,
        }
    }

    pub fn validate(&self) -> AmortizationResult<()> {
        if self.initial_balance <= Decimal::ZERO {
            return Err(AmortizationError::invalid(
                "initial_balance",
                format!("must be positive, got {}", self.initial_balance),
            ));
        }
        if self.monthly_rate < Decimal::ZERO {
            return Err(AmortizationError::invalid(
                "monthly_rate",
                format!("cannot be negative, got {}", self.monthly_rate),
            ));
        }
        if self.fixed_installment <= Decimal::ZERO {
            return Err(AmortizationError::invalid(
                "fixed_installment",
                format!("must be positive, got {}", self.fixed_installment),
            ));
        }
        for (field, amount) in [
            ("initial_balance", self.initial_balance),
            ("fixed_installment", self.fixed_installment),
        ] {
            if !is_whole_cents(amount) {
                return Err(AmortizationError::invalid(
                    field,
                    format!("must be a whole number of cents, got {amount}"),
                ));
            }
        }
        Ok(())
    }
}

/// Sparse map of extra principal payments keyed by installment number.
///
/// Contributions landing on the same installment are summed, so a key always
/// holds the aggregated extra amount for that period.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExtraPayments(BTreeMap<u32, Money>);

impl ExtraPayments {
    pub fn new() -> Self {
        Self::default()
    }

    /// A map holding a single contribution.
    pub fn single(installment: u32, amount: Money) -> AmortizationResult<Self> {
        let mut payments = Self::new();
        payments.add(installment, amount)?;
        Ok(payments)
    }

    /// Builds a map from `(installment, amount)` pairs, summing repeated installments.
    pub fn try_from_pairs<I>(pairs: I) -> AmortizationResult<Self>
    where
        I: IntoIterator<Item = (u32, Money)>,
    {
        let mut payments = Self::new();
        for (installment, amount) in pairs {
            payments.add(installment, amount)?;
        }
        Ok(payments)
    }

    /// Adds `amount` to whatever is already scheduled at `installment`.
    pub fn add(&mut self, installment: u32, amount: Money) -> AmortizationResult<()> {
        validate_entry(installment, amount)?;
        *self.0.entry(installment).or_insert(Decimal::ZERO) += amount;
        Ok(())
    }

    /// Extra amount scheduled at `installment`, zero when there is none.
    pub fn get(&self, installment: u32) -> Money {
        self.0.get(&installment).copied().unwrap_or(Decimal::ZERO)
    }

    pub fn iter(&self) -> impl Iterator<Item = (u32, Money)> + '_ {
        self.0.iter().map(|(k, v)| (*k, *v))
    }

    pub fn total(&self) -> Money {
        self.0.values().copied().sum()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Re-checks every entry. Maps built through deserialization skip [`ExtraPayments::add`].
    pub fn validate(&self) -> AmortizationResult<()> {
        self.iter()
            .try_for_each(|(installment, amount)| validate_entry(installment, amount))
    }
}

fn validate_entry(installment: u32, amount: Money) -> AmortizationResult<()> {
    if installment == 0 {
        return Err(AmortizationError::invalid(
            "extra_payments",
            "installment numbers start at 1",
        ));
    }
    if amount < Decimal::ZERO {
        return Err(AmortizationError::invalid(
            "extra_payments",
            format!("amount at installment {installment} cannot be negative, got {amount}"),
        ));
    }
    if !is_whole_cents(amount) {
        return Err(AmortizationError::invalid(
            "extra_payments",
            format!(
                "amount at installment {installment} must be a whole number of cents, got {amount}"
            ),
        ));
    }
    Ok(())
}
