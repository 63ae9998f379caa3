//! Schedule aggregate produced by a generator run.

use std::fmt;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::{AmortizationError, AmortizationResult};
use crate::types::{LoanParameters, Money, Rate};

/// Payment details for a single period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Installment {
    /// Position in the schedule, starting at 1.
    pub number: u32,
    /// Nominal due date.
    pub date: NaiveDate,
    /// Balance owed when the period starts.
    pub balance_before: Money,
    /// Interest charged on `balance_before`, rounded to cents.
    pub interest: Money,
    /// Principal covered by the regular installment.
    pub principal: Money,
    /// Extra principal applied on top of the installment.
    pub extra_payment: Money,
    /// Balance owed once the period is paid.
    pub balance_after: Money,
    /// Cash paid in the period: interest, principal and extra.
    pub total_paid: Money,
}

impl fmt::Display for Installment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Installment {:03} | Date: {} | Balance: {:.2} | Interest: {:.2} | Principal: {:.2} | Extra: {:.2} | New balance: {:.2}",
            self.number,
            self.date.format("%d/%m/%Y"),
            self.balance_before,
            self.interest,
            self.principal,
            self.extra_payment,
            self.balance_after,
        )
    }
}

/// How a generator run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Termination {
    /// The balance reached the payoff threshold.
    PaidOff,
    /// The period cap was hit with a balance still outstanding.
    Truncated,
}

/// A complete amortization schedule and its aggregates.
///
/// Built once by [`ScheduleGenerator`](crate::ScheduleGenerator) and read-only afterwards.
/// Serialize-only: a schedule always comes from a generator run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Schedule {
    initial_balance: Money,
    monthly_rate: Rate,
    fixed_installment: Money,
    start_date: NaiveDate,
    installments: Vec<Installment>,
    termination: Termination,
    floored_periods: Vec<u32>,
}

/// Headline figures of a schedule, for rendering and comparisons.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleSummary {
    pub term_length: u32,
    pub total_interest: Money,
    pub total_extra: Money,
    pub total_paid: Money,
    pub payoff_date: Option<NaiveDate>,
    pub termination: Termination,
}

impl Schedule {
    pub(crate) fn new(
        params: &LoanParameters,
        installments: Vec<Installment>,
        termination: Termination,
        floored_periods: Vec<u32>,
    ) -> Self {
        Self {
            initial_balance: params.initial_balance,
            monthly_rate: params.monthly_rate,
            fixed_installment: params.fixed_installment,
            start_date: params.start_date,
            installments,
            termination,
            floored_periods,
        }
    }

    pub fn initial_balance(&self) -> Money {
        self.initial_balance
    }

    pub fn monthly_rate(&self) -> Rate {
        self.monthly_rate
    }

    pub fn fixed_installment(&self) -> Money {
        self.fixed_installment
    }

    pub fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    pub fn installments(&self) -> &[Installment] {
        &self.installments
    }

    /// Installment by its 1-based number.
    pub fn installment(&self, number: u32) -> Option<&Installment> {
        let index = usize::try_from(number).ok()?.checked_sub(1)?;
        self.installments.get(index)
    }

    pub fn termination(&self) -> Termination {
        self.termination
    }

    pub fn is_paid_off(&self) -> bool {
        self.termination == Termination::PaidOff
    }

    /// Installments where interest consumed the whole installment and the
    /// principal floor was applied instead.
    pub fn floored_periods(&self) -> &[u32] {
        &self.floored_periods
    }

    pub fn term_length(&self) -> u32 {
        // bounded by GeneratorConfig::max_periods, which is a u32
        self.installments.len() as u32
    }

    pub fn total_interest(&self) -> Money {
        self.installments.iter().map(|i| i.interest).sum()
    }

    pub fn total_extra(&self) -> Money {
        self.installments.iter().map(|i| i.extra_payment).sum()
    }

    /// Principal covered by the regular installments, extras excluded.
    pub fn total_principal(&self) -> Money {
        self.installments.iter().map(|i| i.principal).sum()
    }

    pub fn total_paid(&self) -> Money {
        self.installments.iter().map(|i| i.total_paid).sum()
    }

    /// Balance left after the last installment.
    pub fn remaining_balance(&self) -> Money {
        self.installments
            .last()
            .map_or(self.initial_balance, |i| i.balance_after)
    }

    /// Date of the final installment, when the loan actually gets paid off.
    pub fn payoff_date(&self) -> Option<NaiveDate> {
        if !self.is_paid_off() {
            return None;
        }
        self.installments.last().map(|i| i.date)
    }

    /// Percentage of the initial balance amortized once installment `number` is paid.
    ///
    /// Numbers past the end of the schedule report the final state.
    pub fn progress_after(&self, number: u32) -> Decimal {
        if self.initial_balance <= Decimal::ZERO {
            return Decimal::ZERO;
        }
        let balance = match number {
            0 => self.initial_balance,
            n => self
                .installment(n)
                .or(self.installments.last())
                .map_or(self.initial_balance, |i| i.balance_after),
        };
        (self.initial_balance - balance) / self.initial_balance * dec!(100)
    }

    pub fn summary(&self) -> ScheduleSummary {
        ScheduleSummary {
            term_length: self.term_length(),
            total_interest: self.total_interest(),
            total_extra: self.total_extra(),
            total_paid: self.total_paid(),
            payoff_date: self.payoff_date(),
            termination: self.termination,
        }
    }

    /// Turns a truncated schedule into [`AmortizationError::RunawayAmortization`].
    pub fn into_paid_off(self) -> AmortizationResult<Self> {
        match self.termination {
            Termination::PaidOff => Ok(self),
            Termination::Truncated => Err(AmortizationError::RunawayAmortization {
                periods: self.term_length(),
                remaining_balance: self.remaining_balance(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn installment(number: u32, before: Money, interest: Money, principal: Money) -> Installment {
        Installment {
            number,
            date: NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
            balance_before: before,
            interest,
            principal,
            extra_payment: Decimal::ZERO,
            balance_after: before - principal,
            total_paid: interest + principal,
        }
    }

    fn two_period_schedule(termination: Termination) -> Schedule {
        let params = LoanParameters::new(
            dec!(200),
            dec!(0.01),
            dec!(110),
            NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
        );
        Schedule::new(
            &params,
            vec![
                installment(1, dec!(200), dec!(2), dec!(108)),
                installment(2, dec!(92), dec!(0.92), dec!(92)),
            ],
            termination,
            Vec::new(),
        )
    }

    #[test]
    fn test_aggregates() {
        let schedule = two_period_schedule(Termination::PaidOff);
        assert_eq!(schedule.term_length(), 2);
        assert_eq!(schedule.total_interest(), dec!(2.92));
        assert_eq!(schedule.total_principal(), dec!(200));
        assert_eq!(schedule.total_extra(), Decimal::ZERO);
        assert_eq!(schedule.total_paid(), dec!(202.92));
        assert_eq!(schedule.remaining_balance(), Decimal::ZERO);
    }

    #[test]
    fn test_installment_lookup_is_one_based() {
        let schedule = two_period_schedule(Termination::PaidOff);
        assert!(schedule.installment(0).is_none());
        assert_eq!(schedule.installment(2).unwrap().number, 2);
        assert!(schedule.installment(3).is_none());
    }

    #[test]
    fn test_progress() {
        let schedule = two_period_schedule(Termination::PaidOff);
        assert_eq!(schedule.progress_after(0), Decimal::ZERO);
        assert_eq!(schedule.progress_after(1), dec!(54));
        assert_eq!(schedule.progress_after(99), dec!(100));
    }

    #[test]
    fn test_progress_on_empty_balance_does_not_divide_by_zero() {
        let params = LoanParameters::new(
            Decimal::ZERO,
            dec!(0.01),
            dec!(110),
            NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
        );
        let schedule = Schedule::new(
            &params,
            vec![installment(1, Decimal::ZERO, Decimal::ZERO, Decimal::ZERO)],
            Termination::PaidOff,
            Vec::new(),
        );
        assert_eq!(schedule.progress_after(1), Decimal::ZERO);
    }

    #[test]
    fn test_serializes_for_rendering() {
        let schedule = two_period_schedule(Termination::PaidOff);
        let json = serde_json::to_value(&schedule).unwrap();
        assert_eq!(json["termination"], "paid_off");
        assert_eq!(json["installments"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn test_truncated_schedule_has_no_payoff_date() {
        let schedule = two_period_schedule(Termination::Truncated);
        assert_eq!(schedule.payoff_date(), None);
        assert_eq!(
            schedule.into_paid_off(),
            Err(AmortizationError::RunawayAmortization {
                periods: 2,
                remaining_balance: Decimal::ZERO,
            })
        );
    }

    #[test]
    fn test_display() {
        let schedule = two_period_schedule(Termination::PaidOff);
        let line = schedule.installments()[0].to_string();
        assert_eq!(
            line,
            "Installment 001 | Date: 01/01/2026 | Balance: 200.00 | Interest: 2.00 | Principal: 108.00 | Extra: 0.00 | New balance: 92.00"
        );
    }
}
