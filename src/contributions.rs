//! Recorded contributions (aportes) and how they fold into an extra payment map.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{AmortizationError, AmortizationResult};
use crate::types::{is_whole_cents, ExtraPayments, Money};

/// Where the money for a contribution came from.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContributionOrigin {
    Manual,
    /// Proceeds of selling an item.
    Resale,
    Salary,
    Bonus,
    Other(String),
}

/// One extra principal payment made against the loan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contribution {
    pub installment: u32,
    pub amount: Money,
    pub origin: ContributionOrigin,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
}

impl Contribution {
    pub fn new(installment: u32, amount: Money, origin: ContributionOrigin) -> Self {
        Self {
            installment,
            amount,
            origin,
            description: None,
            date: None,
        }
    }

    /// A contribution funded by selling `item`.
    pub fn from_sale(installment: u32, amount: Money, item: &str) -> Self {
        Self::new(installment, amount, ContributionOrigin::Resale)
            .with_description(format!("Sale of {item}"))
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }
}

/// Ordered record of contributions made against one loan.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContributionLedger {
    contributions: Vec<Contribution>,
}

impl ContributionLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a contribution after checking it targets a real installment with a positive amount.
    pub fn record(&mut self, contribution: Contribution) -> AmortizationResult<()> {
        if contribution.installment == 0 {
            return Err(AmortizationError::invalid(
                "installment",
                "installment numbers start at 1",
            ));
        }
        if contribution.amount <= Decimal::ZERO {
            return Err(AmortizationError::invalid(
                "amount",
                format!("contribution must be positive, got {}", contribution.amount),
            ));
        }
        if !is_whole_cents(contribution.amount) {
            return Err(AmortizationError::invalid(
                "amount",
                format!("must be a whole number of cents, got {}", contribution.amount),
            ));
        }
        tracing::debug!(
            installment = contribution.installment,
            amount = %contribution.amount,
            origin = ?contribution.origin,
            "recorded contribution"
        );
        self.contributions.push(contribution);
        Ok(())
    }

    /// Extra payment map for the generator. Contributions on the same installment are summed.
    pub fn extra_payments(&self) -> AmortizationResult<ExtraPayments> {
        ExtraPayments::try_from_pairs(self.contributions.iter().map(|c| (c.installment, c.amount)))
    }

    pub fn total(&self) -> Money {
        self.contributions.iter().map(|c| c.amount).sum()
    }

    pub fn total_by_origin(&self, origin: &ContributionOrigin) -> Money {
        self.contributions
            .iter()
            .filter(|c| &c.origin == origin)
            .map(|c| c.amount)
            .sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Contribution> {
        self.contributions.iter()
    }

    pub fn len(&self) -> usize {
        self.contributions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contributions.is_empty()
    }
}
