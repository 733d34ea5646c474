//! Core data models for the budget guard
//!
//! This module contains the data structures the engine works on: money,
//! the monthly period, the user's profile and transactions.

pub mod ids;
pub mod money;
pub mod period;
pub mod profile;
pub mod transaction;

pub use ids::TransactionId;
pub use money::Money;
pub use period::BudgetPeriod;
pub use profile::{Profile, ProfileSource, ProfileValidationError, DEFAULT_FALLBACK_INCOME};
pub use transaction::{
    format_iso_date, parse_instant, Transaction, TransactionDraft, TransactionType,
    DEFAULT_CATEGORY,
};
