//! Budget calculation
//!
//! Combines the profile with period totals into the figures every screen
//! shows. Pure and stateless: the state is recomputed from scratch whenever
//! the profile or the transaction set changes.

use crate::models::{Money, Profile, TransactionDraft, TransactionType};

use super::aggregator::PeriodTotals;

/// Derived budget figures for the current period
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct BudgetState {
    /// Debits minus credits in the period; negative on net inflow
    pub total_spent: Money,
    /// Income minus savings goal
    pub spendable_capacity: Money,
    /// Spendable capacity minus total spent
    pub remaining: Money,
    /// Savings goal minus any overspend beyond the spendable capacity
    pub savings_left: Money,
}

impl BudgetState {
    /// Compute the budget state from a profile and period totals
    pub fn compute(profile: &Profile, totals: &PeriodTotals) -> Self {
        let total_spent = totals.net_spent();
        let spendable_capacity = profile.spendable_capacity();
        let remaining = spendable_capacity - total_spent;
        let overspend = (total_spent - spendable_capacity).positive_part();
        let savings_left = profile.savings_goal - overspend;

        Self {
            total_spent,
            spendable_capacity,
            remaining,
            savings_left,
        }
    }

    /// Amount spent beyond the spendable capacity
    pub fn overspend(&self) -> Money {
        (-self.remaining).positive_part()
    }

    /// Whether spending already reaches into savings
    pub fn is_overspent(&self) -> bool {
        self.remaining.is_negative()
    }

    /// What `remaining` would become if the draft were committed
    pub fn balance_after(&self, draft: &TransactionDraft) -> Money {
        match draft.kind {
            TransactionType::Credit => self.remaining + draft.amount,
            TransactionType::Debit => self.remaining - draft.amount,
        }
    }

    /// Share of the monthly income spent so far, in percent
    ///
    /// `None` when the income is zero.
    pub fn progress_percent(&self, profile: &Profile) -> Option<f64> {
        if !profile.monthly_income.is_positive() {
            return None;
        }
        Some(self.total_spent.minor() as f64 / profile.monthly_income.minor() as f64 * 100.0)
    }
}
