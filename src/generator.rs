//! The amortization engine.

use chrono::{Days, NaiveDate};
use rust_decimal::Decimal;

use crate::config::GeneratorConfig;
use crate::error::{AmortizationError, AmortizationResult};
use crate::schedule::{Installment, Schedule, Termination};
use crate::types::{round_money, ExtraPayments, LoanParameters};

/// Generates amortization schedules for a fixed-installment loan.
///
/// Every period charges simple interest on the declining balance, the rest of
/// the installment amortizes principal, and any extra payment scheduled for that
/// installment goes straight to principal. The generator holds no state between
/// calls and can be shared across threads.
#[derive(Debug, Clone, Default)]
pub struct ScheduleGenerator {
    config: GeneratorConfig,
}

impl ScheduleGenerator {
    /// A generator using [`GeneratorConfig::default`].
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: GeneratorConfig) -> AmortizationResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Builds the full schedule until payoff or until `max_periods` installments.
    ///
    /// # Errors
    ///
    /// Returns [`AmortizationError::InvalidParameters`] for a non-positive balance or
    /// installment, a negative rate, or an invalid extra payment entry. Hitting the
    /// period cap is not an error: the schedule comes back with
    /// [`Termination::Truncated`].
    pub fn generate(
        &self,
        params: &LoanParameters,
        extra_payments: &ExtraPayments,
    ) -> AmortizationResult<Schedule> {
        params.validate()?;
        extra_payments.validate()?;

        let config = &self.config;
        let mut balance = params.initial_balance;
        let mut installments = Vec::new();
        let mut floored_periods = Vec::new();
        let mut number: u32 = 1;

        let termination = loop {
            if balance <= config.payoff_epsilon {
                break Termination::PaidOff;
            }
            if number > config.max_periods {
                break Termination::Truncated;
            }

            let interest = round_money(balance * params.monthly_rate);
            let extra = extra_payments.get(number);
            let mut principal = params.fixed_installment - interest;

            if extra.is_zero() {
                if principal <= Decimal::ZERO {
                    principal = config.principal_floor;
                    floored_periods.push(number);
                }
            } else {
                principal = principal.max(Decimal::ZERO);
            }

            // Overshooting pays off exactly; the regular installment takes precedence.
            let principal = principal.min(balance);
            let extra = extra.min(balance - principal);
            let balance_after = balance - principal - extra;

            installments.push(Installment {
                number,
                date: self.installment_date(params.start_date, number)?,
                balance_before: balance,
                interest,
                principal,
                extra_payment: extra,
                balance_after,
                total_paid: interest + principal + extra,
            });

            balance = balance_after;
            number += 1;
        };

        if let Some(first) = floored_periods.first() {
            tracing::warn!(
                periods = floored_periods.len(),
                first_period = first,
                floor = %config.principal_floor,
                "interest consumed the whole installment; principal floor applied"
            );
        }
        if termination == Termination::Truncated {
            tracing::warn!(
                max_periods = config.max_periods,
                remaining_balance = %balance,
                "schedule truncated before payoff"
            );
        }

        let schedule = Schedule::new(params, installments, termination, floored_periods);
        tracing::debug!(
            term_length = schedule.term_length(),
            total_interest = %schedule.total_interest(),
            total_extra = %schedule.total_extra(),
            ?termination,
            "generated amortization schedule"
        );
        Ok(schedule)
    }

    fn installment_date(&self, start: NaiveDate, number: u32) -> AmortizationResult<NaiveDate> {
        let offset = u64::from(self.config.period_days) * u64::from(number - 1);
        start.checked_add_days(Days::new(offset)).ok_or_else(|| {
            AmortizationError::invalid(
                "start_date",
                format!("installment {number} falls outside the supported calendar"),
            )
        })
    }
}
