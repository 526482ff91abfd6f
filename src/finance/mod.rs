//! Envelope-based personal finance ledger.
//!
//! - `Wallets`: four non-negative envelopes (charity, dream, savings, investments)
//! - `distribute_income`: fixed 10/20/10/60 split, blocked by income-block turns
//! - `spend`: purpose-ordered withdrawal with debt recording on shortfall

mod ledger;
mod wallet;

pub use ledger::{
    distribute_income, percent_of, spend, split_income, IncomeOutcome, SpendPurpose, SpendReceipt,
};
pub use wallet::{Debt, Envelope, Wallets};
