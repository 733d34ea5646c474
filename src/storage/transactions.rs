//! Transaction repository for JSON storage
//!
//! Manages loading and saving transactions to transactions.json

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use chrono::Utc;

use crate::error::{GuardError, GuardResult};
use crate::models::{Transaction, TransactionId};

use super::file_io::{read_json, write_json_atomic};
use super::records::{CreateTransactionRequest, TransactionRecord};

/// Serializable transaction file layout
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct TransactionData {
    transactions: Vec<TransactionRecord>,
}

/// Repository for transaction persistence
pub struct TransactionRepository {
    path: PathBuf,
    data: RwLock<HashMap<TransactionId, Transaction>>,
}

impl TransactionRepository {
    /// Create a new transaction repository
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(HashMap::new()),
        }
    }

    /// Load transactions from disk
    ///
    /// Records with an invalid amount are skipped with a warning rather than
    /// failing the whole load.
    pub fn load(&self) -> GuardResult<()> {
        let file_data: TransactionData = read_json(&self.path)?;

        let mut data = self.data.write().map_err(|e| {
            GuardError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;
        data.clear();

        for record in file_data.transactions {
            let id = record.id.clone();
            match Transaction::try_from(record) {
                Ok(txn) => {
                    data.insert(txn.id.clone(), txn);
                }
                Err(err) => {
                    tracing::warn!(transaction_id = %id, error = %err, "skipping unreadable transaction record");
                }
            }
        }

        tracing::debug!(count = data.len(), path = %self.path.display(), "loaded transactions");
        Ok(())
    }

    /// Save transactions to disk, newest first
    pub fn save(&self) -> GuardResult<()> {
        let data = self.data.read().map_err(|e| {
            GuardError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        let mut transactions: Vec<&Transaction> = data.values().collect();
        transactions.sort_by(|a, b| {
            b.date
                .cmp(&a.date)
                .then(b.created_at.cmp(&a.created_at))
                .then(a.id.cmp(&b.id))
        });

        let file_data = TransactionData {
            transactions: transactions.into_iter().map(TransactionRecord::from).collect(),
        };
        write_json_atomic(&self.path, &file_data)
    }

    /// Get all transactions
    pub fn get_all(&self) -> GuardResult<Vec<Transaction>> {
        let data = self.data.read().map_err(|e| {
            GuardError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        Ok(data.values().cloned().collect())
    }

    /// Find a transaction by full id or unique prefix
    pub fn find(&self, identifier: &str) -> GuardResult<Transaction> {
        let data = self.data.read().map_err(|e| {
            GuardError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        if let Some(txn) = data.get(&TransactionId::from_raw(identifier.trim())) {
            return Ok(txn.clone());
        }

        let mut matches = data.values().filter(|t| t.id.matches(identifier));
        match (matches.next(), matches.next()) {
            (Some(txn), None) => Ok(txn.clone()),
            (Some(_), Some(_)) => Err(GuardError::Validation(format!(
                "'{}' matches more than one transaction; use a longer id",
                identifier
            ))),
            (None, _) => Err(GuardError::transaction_not_found(identifier)),
        }
    }

    /// Accept a create request and assign it an id
    pub fn create(&self, request: CreateTransactionRequest) -> GuardResult<Transaction> {
        let record = TransactionRecord {
            id: TransactionId::generate().to_string(),
            amount: request.amount,
            kind: request.kind,
            date: Some(request.date),
            description: request.description,
            category: Some(request.category),
            created_at: Some(Utc::now()),
        };
        let txn = Transaction::try_from(record)?;
        self.upsert(txn.clone())?;
        Ok(txn)
    }

    /// Insert or replace a transaction
    pub fn upsert(&self, txn: Transaction) -> GuardResult<()> {
        let mut data = self.data.write().map_err(|e| {
            GuardError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;

        data.insert(txn.id.clone(), txn);
        Ok(())
    }

    /// Permanently remove a transaction
    pub fn delete(&self, id: &TransactionId) -> GuardResult<Option<Transaction>> {
        let mut data = self.data.write().map_err(|e| {
            GuardError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;

        Ok(data.remove(id))
    }

    /// Number of stored transactions
    pub fn count(&self) -> GuardResult<usize> {
        let data = self.data.read().map_err(|e| {
            GuardError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        Ok(data.len())
    }
}
