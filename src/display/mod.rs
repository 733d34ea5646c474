//! Display formatting for terminal output
//!
//! Provides utilities for formatting the budget state, the profile and
//! transactions for terminal display.

pub mod budget;
pub mod transaction;

pub use budget::{format_budget_status, format_profile, format_savings_alert};
pub use transaction::{format_transaction_details, format_transaction_table};
