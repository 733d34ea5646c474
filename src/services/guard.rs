//! Savings guard
//!
//! Decides whether a new transaction may be committed straight away or must
//! first be confirmed because it would draw on the protected savings. One
//! guard belongs to one "add transaction" interaction and is dropped with it;
//! the pending draft is never persisted.

use std::mem;

use crate::error::{GuardError, GuardResult};
use crate::models::{Money, Transaction, TransactionDraft, TransactionType};
use crate::storage::TransactionSink;

use super::calculator::BudgetState;

/// Outcome of evaluating a draft against the budget
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecisionKind {
    /// Safe to commit without asking
    Approved,
    /// Would make `remaining` negative; needs an explicit yes
    PendingConfirmation,
}

/// A draft together with the verdict on it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decision {
    pub kind: DecisionKind,
    pub draft: TransactionDraft,
    /// `remaining` as it would be after the draft
    pub projected_remaining: Money,
}

impl Decision {
    pub fn is_approved(&self) -> bool {
        self.kind == DecisionKind::Approved
    }

    pub fn needs_confirmation(&self) -> bool {
        self.kind == DecisionKind::PendingConfirmation
    }
}

/// Where the guard currently stands
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum GuardState {
    /// Nothing proposed yet
    #[default]
    Idle,
    /// A savings-impacting draft awaits the user's choice
    PendingConfirmation(Decision),
    /// The last proposal was persisted
    Committed(Transaction),
    /// The last pending proposal was discarded
    Cancelled,
}

impl GuardState {
    /// Whether a new proposal may be made
    pub fn is_idle(&self) -> bool {
        !matches!(self, Self::PendingConfirmation(_))
    }
}

/// Result of [`SavingsGuard::propose`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardOutcome {
    /// Approved and persisted
    Committed(Transaction),
    /// Parked until [`SavingsGuard::confirm`] or [`SavingsGuard::cancel`]
    PendingConfirmation(Decision),
}

/// Session-scoped savings guard state machine
#[derive(Debug, Default)]
pub struct SavingsGuard {
    state: GuardState,
}

impl SavingsGuard {
    /// Create an idle guard
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state
    pub fn state(&self) -> &GuardState {
        &self.state
    }

    /// The decision awaiting confirmation, if any
    pub fn pending(&self) -> Option<&Decision> {
        match &self.state {
            GuardState::PendingConfirmation(decision) => Some(decision),
            _ => None,
        }
    }

    /// Judge a draft against the current budget state
    ///
    /// Credits are always approved. A debit needs confirmation when it would
    /// leave `remaining` below zero.
    pub fn evaluate(draft: &TransactionDraft, budget: &BudgetState) -> Decision {
        let projected_remaining = budget.balance_after(draft);
        let kind = match draft.kind {
            TransactionType::Credit => DecisionKind::Approved,
            TransactionType::Debit if projected_remaining.is_negative() => {
                DecisionKind::PendingConfirmation
            }
            TransactionType::Debit => DecisionKind::Approved,
        };

        Decision {
            kind,
            draft: draft.clone(),
            projected_remaining,
        }
    }

    /// Propose a draft
    ///
    /// Approved drafts are sent to `sink` at once. Savings-impacting drafts
    /// are held until confirmed or cancelled; proposing again meanwhile fails
    /// with [`GuardError::ProposalPending`] and keeps the held draft.
    pub fn propose<K>(
        &mut self,
        draft: TransactionDraft,
        budget: &BudgetState,
        sink: &K,
    ) -> GuardResult<GuardOutcome>
    where
        K: TransactionSink + ?Sized,
    {
        if !self.state.is_idle() {
            return Err(GuardError::ProposalPending);
        }
        draft.validate()?;

        let decision = Self::evaluate(&draft, budget);
        tracing::debug!(
            kind = %draft.kind,
            amount = %draft.amount,
            projected_remaining = %decision.projected_remaining,
            decision = ?decision.kind,
            "evaluated proposal"
        );

        match decision.kind {
            DecisionKind::Approved => self.commit(decision.draft, sink).map(GuardOutcome::Committed),
            DecisionKind::PendingConfirmation => {
                self.state = GuardState::PendingConfirmation(decision.clone());
                Ok(GuardOutcome::PendingConfirmation(decision))
            }
        }
    }

    /// Commit the pending draft exactly as it was proposed
    pub fn confirm<K>(&mut self, sink: &K) -> GuardResult<Transaction>
    where
        K: TransactionSink + ?Sized,
    {
        // take the draft out first so a second confirm finds nothing to send
        match mem::take(&mut self.state) {
            GuardState::PendingConfirmation(decision) => self.commit(decision.draft, sink),
            other => {
                self.state = other;
                Err(GuardError::NoPendingProposal)
            }
        }
    }

    /// Discard the pending draft without persisting anything
    pub fn cancel(&mut self) -> GuardResult<TransactionDraft> {
        match mem::take(&mut self.state) {
            GuardState::PendingConfirmation(decision) => {
                tracing::info!(amount = %decision.draft.amount, "pending transaction cancelled");
                self.state = GuardState::Cancelled;
                Ok(decision.draft)
            }
            other => {
                self.state = other;
                Err(GuardError::NoPendingProposal)
            }
        }
    }

    fn commit<K>(&mut self, draft: TransactionDraft, sink: &K) -> GuardResult<Transaction>
    where
        K: TransactionSink + ?Sized,
    {
        match sink.create_transaction(&draft) {
            Ok(txn) => {
                self.state = GuardState::Committed(txn.clone());
                Ok(txn)
            }
            Err(err) => {
                tracing::warn!(error = %err, amount = %draft.amount, "commit rejected");
                self.state = GuardState::Idle;
                Err(err.into_persistence_failure())
            }
        }
    }
}
