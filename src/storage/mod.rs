//! Storage layer for the budget guard
//!
//! The engine talks to persistence through two narrow traits:
//! [`BudgetSource`] for reading the profile and transactions, and
//! [`TransactionSink`] for committing a new transaction. [`Storage`] is the
//! bundled JSON-file implementation of both, with atomic writes and
//! automatic directory creation.

pub mod file_io;
pub mod profile;
pub mod records;
pub mod transactions;

pub use file_io::{read_json, write_json_atomic};
pub use profile::ProfileRepository;
pub use records::{CreateTransactionRequest, ProfileRecord, TransactionRecord};
pub use transactions::TransactionRepository;

use crate::config::paths::GuardPaths;
use crate::error::{GuardError, GuardResult};
use crate::models::{Profile, Transaction, TransactionDraft, TransactionId};

/// Read side of the persistence collaborator
///
/// `Sync` so the profile and the transactions can be fetched in parallel.
pub trait BudgetSource: Sync {
    /// The user's profile, or `None` if it has never been set up
    fn fetch_profile(&self) -> GuardResult<Option<Profile>>;

    /// Every transaction on record, in no particular order
    fn fetch_transactions(&self) -> GuardResult<Vec<Transaction>>;
}

/// Write side of the persistence collaborator
pub trait TransactionSink {
    /// Submit a create request for the draft
    fn create_transaction(&self, draft: &TransactionDraft) -> GuardResult<Transaction>;
}

/// Main storage coordinator that provides access to all repositories
pub struct Storage {
    paths: GuardPaths,
    pub profile: ProfileRepository,
    pub transactions: TransactionRepository,
}

impl Storage {
    /// Create a new Storage instance
    pub fn new(paths: GuardPaths) -> GuardResult<Self> {
        paths.ensure_directories()?;

        Ok(Self {
            profile: ProfileRepository::new(paths.profile_file()),
            transactions: TransactionRepository::new(paths.transactions_file()),
            paths,
        })
    }

    /// Get the paths configuration
    pub fn paths(&self) -> &GuardPaths {
        &self.paths
    }

    /// Load all data from disk
    pub fn load_all(&mut self) -> GuardResult<()> {
        self.profile.load()?;
        self.transactions.load()?;
        Ok(())
    }

    /// Save all data to disk
    pub fn save_all(&self) -> GuardResult<()> {
        self.profile.save()?;
        self.transactions.save()?;
        Ok(())
    }

    /// Validate and persist a new profile
    pub fn save_profile(&self, profile: Profile) -> GuardResult<()> {
        self.profile.set(profile)?;
        self.profile.save()?;
        tracing::info!(
            monthly_income = %profile.monthly_income,
            savings_goal = %profile.savings_goal,
            "profile updated"
        );
        Ok(())
    }

    /// Replace an existing transaction and persist the change
    pub fn update_transaction(&self, txn: Transaction) -> GuardResult<Transaction> {
        txn.validate()?;
        self.transactions.upsert(txn.clone())?;
        self.transactions.save()?;
        tracing::info!(transaction_id = %txn.id, "transaction updated");
        Ok(txn)
    }

    /// Permanently delete a transaction by id or unique id prefix
    pub fn delete_transaction(&self, identifier: &str) -> GuardResult<Transaction> {
        let txn = self.transactions.find(identifier)?;
        self.transactions
            .delete(&txn.id)?
            .ok_or_else(|| GuardError::transaction_not_found(identifier))?;
        self.transactions.save()?;
        tracing::info!(transaction_id = %txn.id, "transaction deleted");
        Ok(txn)
    }
}

impl Storage {
    /// Drop a created transaction whose save failed, so memory matches disk
    fn roll_back_create(&self, id: &TransactionId) {
        match self.transactions.delete(id) {
            Ok(Some(_)) => {}
            Ok(None) => {
                tracing::warn!(transaction_id = %id, "unsaved transaction was already gone")
            }
            Err(err) => tracing::warn!(
                transaction_id = %id,
                error = %err,
                "failed to roll back unsaved transaction; memory and disk differ"
            ),
        }
    }
}

impl BudgetSource for Storage {
    fn fetch_profile(&self) -> GuardResult<Option<Profile>> {
        self.profile.get()
    }

    fn fetch_transactions(&self) -> GuardResult<Vec<Transaction>> {
        self.transactions.get_all()
    }
}

impl TransactionSink for Storage {
    fn create_transaction(&self, draft: &TransactionDraft) -> GuardResult<Transaction> {
        draft.validate()?;

        let txn = self
            .transactions
            .create(CreateTransactionRequest::from(draft))?;

        if let Err(err) = self.transactions.save() {
            self.roll_back_create(&txn.id);
            return Err(err);
        }

        tracing::info!(
            transaction_id = %txn.id,
            kind = %txn.kind,
            amount = %txn.amount,
            "transaction created"
        );
        Ok(txn)
    }
}
