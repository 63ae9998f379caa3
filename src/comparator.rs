//! Savings of extra payments measured against a reference schedule.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::AmortizationResult;
use crate::generator::ScheduleGenerator;
use crate::schedule::{Schedule, ScheduleSummary, Termination};
use crate::types::{ExtraPayments, LoanParameters, Money};

/// Outcome of running a loan twice: once as reference, once with extra payments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comparison {
    pub baseline: ScheduleSummary,
    pub variant: ScheduleSummary,
    /// Installments removed from the term. Never negative for non-negative extras.
    pub periods_saved: i64,
    /// Interest no longer paid. Never negative for non-negative extras.
    pub interest_saved: Money,
}

impl Comparison {
    pub fn from_schedules(baseline: &Schedule, variant: &Schedule) -> Self {
        let periods_saved = i64::from(baseline.term_length()) - i64::from(variant.term_length());
        let interest_saved = baseline.total_interest() - variant.total_interest();
        let comparison = Self {
            baseline: baseline.summary(),
            variant: variant.summary(),
            periods_saved,
            interest_saved,
        };
        if comparison.truncated() {
            tracing::warn!(
                baseline_term = comparison.baseline.term_length,
                variant_term = comparison.variant.term_length,
                "comparison involves a truncated schedule; savings are understated"
            );
        }
        comparison
    }

    /// Extra principal the variant puts in beyond the baseline.
    pub fn extra_invested(&self) -> Money {
        self.variant.total_extra - self.baseline.total_extra
    }

    /// Interest saved per unit of extra principal, as a percentage.
    pub fn interest_return_pct(&self) -> Option<Decimal> {
        let invested = self.extra_invested();
        if invested <= Decimal::ZERO {
            return None;
        }
        Some(self.interest_saved / invested * dec!(100))
    }

    /// True when either run hit the period cap.
    pub fn truncated(&self) -> bool {
        self.baseline.termination == Termination::Truncated
            || self.variant.termination == Termination::Truncated
    }
}

/// Compares the loan without extra payments against the loan with `extra_payments`.
pub fn compare(
    generator: &ScheduleGenerator,
    params: &LoanParameters,
    extra_payments: &ExtraPayments,
) -> AmortizationResult<Comparison> {
    let baseline = generator.generate(params, &ExtraPayments::new())?;
    let variant = generator.generate(params, extra_payments)?;
    Ok(Comparison::from_schedules(&baseline, &variant))
}

/// What-if for a single contribution of `amount` at `installment`.
pub fn simulate_contribution(
    generator: &ScheduleGenerator,
    params: &LoanParameters,
    installment: u32,
    amount: Money,
) -> AmortizationResult<Comparison> {
    let extras = ExtraPayments::single(installment, amount)?;
    compare(generator, params, &extras)
}

/// Impact of every recorded contribution, against the loan with no contributions at all.
pub fn realized_impact(
    generator: &ScheduleGenerator,
    params: &LoanParameters,
    recorded: &ExtraPayments,
) -> AmortizationResult<Comparison> {
    compare(generator, params, recorded)
}

/// Impact of one new contribution on top of those already recorded.
///
/// The reference schedule already includes `prior`, so the savings belong to
/// the new contribution alone.
pub fn marginal_impact(
    generator: &ScheduleGenerator,
    params: &LoanParameters,
    prior: &ExtraPayments,
    installment: u32,
    amount: Money,
) -> AmortizationResult<Comparison> {
    let mut with_new = prior.clone();
    with_new.add(installment, amount)?;
    let baseline = generator.generate(params, prior)?;
    let variant = generator.generate(params, &with_new)?;
    Ok(Comparison::from_schedules(&baseline, &variant))
}
