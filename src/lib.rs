//! `br_amortization` simulates extra principal payments ("aportes") on a
//! fixed-installment loan and measures what they save.
//!
//! Every period charges simple interest on the declining balance, rounded half-up
//! to cents. The rest of the fixed installment amortizes principal, and any extra
//! payment scheduled for that installment goes straight to principal. Running the
//! same loan with and without extra payments shows how many installments and how
//! much interest they save.
//!
//! ## Usage
//!
//! ```rust
//! use br_amortization::{compare, ExtraPayments, LoanParameters, ScheduleGenerator};
//! use chrono::NaiveDate;
//! use rust_decimal_macros::dec;
//!
//! fn main() -> Result<(), br_amortization::AmortizationError> {
//!     let params = LoanParameters::new(
//!         dec!(15000),
//!         dec!(0.012),
//!         dec!(400),
//!         NaiveDate::from_ymd_opt(2026, 1, 10).unwrap(),
//!     );
//!     let generator = ScheduleGenerator::new();
//!
//!     let plan = generator.generate(&params, &ExtraPayments::new())?;
//!     println!("Installments: {}", plan.term_length());
//!     println!("Total interest: {:.2}", plan.total_interest());
//!
//!     let extras = ExtraPayments::try_from_pairs([(3, dec!(500)), (7, dec!(1000))])?;
//!     let savings = compare(&generator, &params, &extras)?;
//!     println!("Months saved: {}", savings.periods_saved);
//!     println!("Interest saved: {:.2}", savings.interest_saved);
//!     Ok(())
//! }
//! ```

pub mod comparator;
pub mod config;
pub mod contributions;
pub mod error;
pub mod generator;
pub mod rates;
pub mod schedule;
pub mod types;

pub use comparator::{compare, marginal_impact, realized_impact, simulate_contribution, Comparison};
pub use config::GeneratorConfig;
pub use contributions::{Contribution, ContributionLedger, ContributionOrigin};
pub use error::{AmortizationError, AmortizationResult};
pub use generator::ScheduleGenerator;
pub use rates::{fixed_installment_for_term, normalize_annual_interest_rate};
pub use schedule::{Installment, Schedule, ScheduleSummary, Termination};
pub use types::{round_money, ExtraPayments, LoanParameters, Money, Rate};
