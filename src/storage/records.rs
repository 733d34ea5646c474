//! Wire records exchanged with the persistence layer
//!
//! The persistence API speaks camelCase JSON with amounts as decimal numbers.
//! These records convert to and from the engine's minor-unit models at the
//! boundary, so floating point never reaches the budget math.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::GuardResult;
use crate::models::{Money, Profile, Transaction, TransactionDraft, TransactionId, TransactionType};

/// Profile as returned by `GET /profile`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileRecord {
    /// Missing or null means zero
    #[serde(default)]
    pub monthly_income: Option<f64>,
    /// Missing or null means zero
    #[serde(default)]
    pub savings_goal: Option<f64>,
}

impl ProfileRecord {
    /// Convert to the engine's profile, treating unset figures as zero
    pub fn into_profile(self) -> GuardResult<Profile> {
        let income = Money::from_major(self.monthly_income.unwrap_or(0.0))?;
        let goal = Money::from_major(self.savings_goal.unwrap_or(0.0))?;
        Ok(Profile::new(income, goal))
    }
}

impl From<&Profile> for ProfileRecord {
    fn from(profile: &Profile) -> Self {
        Self {
            monthly_income: Some(profile.monthly_income.to_major()),
            savings_goal: Some(profile.savings_goal.to_major()),
        }
    }
}

/// Transaction as returned by `GET /transactions`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionRecord {
    #[serde(alias = "_id")]
    pub id: String,
    pub amount: f64,
    #[serde(rename = "type")]
    pub kind: TransactionType,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl TryFrom<TransactionRecord> for Transaction {
    type Error = crate::error::GuardError;

    fn try_from(record: TransactionRecord) -> Result<Self, Self::Error> {
        let txn = Transaction {
            id: TransactionId::from_raw(record.id),
            amount: Money::from_major(record.amount)?,
            kind: record.kind,
            // a missing date surfaces later as an aggregation anomaly
            date: record.date.unwrap_or_default(),
            description: record.description,
            category: record.category.unwrap_or_default(),
            created_at: record.created_at,
        };
        txn.validate()?;
        Ok(txn)
    }
}

impl From<&Transaction> for TransactionRecord {
    fn from(txn: &Transaction) -> Self {
        Self {
            id: txn.id.to_string(),
            amount: txn.amount.to_major(),
            kind: txn.kind,
            date: Some(txn.date.clone()),
            description: txn.description.clone(),
            category: Some(txn.category.clone()),
            created_at: txn.created_at,
        }
    }
}

/// Body of `POST /transactions`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateTransactionRequest {
    pub amount: f64,
    pub description: String,
    pub date: String,
    #[serde(rename = "type")]
    pub kind: TransactionType,
    pub category: String,
}

impl From<&TransactionDraft> for CreateTransactionRequest {
    fn from(draft: &TransactionDraft) -> Self {
        Self {
            amount: draft.amount.to_major(),
            description: draft.description.clone(),
            date: draft.iso_date(),
            kind: draft.kind,
            category: draft.category.clone(),
        }
    }
}
