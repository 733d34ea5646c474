//! Service layer for the budget guard
//!
//! The service layer holds the budget math and the savings guard on top of
//! the storage traits: aggregation, calculation, snapshot assembly and
//! transaction listing.

pub mod aggregator;
pub mod budget;
pub mod calculator;
pub mod guard;
pub mod transaction;

pub use aggregator::{aggregate, Aggregation, DateAnomaly, PeriodTotals};
pub use budget::{assemble, BudgetService, BudgetSnapshot};
pub use calculator::BudgetState;
pub use guard::{Decision, DecisionKind, GuardOutcome, GuardState, SavingsGuard};
pub use transaction::{KindFilter, SortOrder, TransactionQuery, TransactionService, TransactionUpdate};
