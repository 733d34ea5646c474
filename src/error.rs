//! Custom error types for the budget guard
//!
//! This module defines the error hierarchy for the engine, the storage layer
//! and the CLI using thiserror for ergonomic error definitions.

use thiserror::Error;

/// The main error type for budget guard operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GuardError {
    /// An amount could not be parsed or is not a valid magnitude
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    /// A transaction date could not be parsed
    #[error("Invalid date: {0}")]
    InvalidDate(String),

    /// No profile has been fetched and no fallback was supplied
    #[error("No profile available; supply a fallback profile or set one up first")]
    MissingProfile,

    /// The persistence collaborator rejected a commit
    #[error("Persistence failure: {0}")]
    PersistenceFailure(String),

    /// A proposal is already awaiting confirmation
    #[error("A savings-impacting transaction is already awaiting confirmation")]
    ProposalPending,

    /// confirm/cancel was called with nothing pending
    #[error("No transaction is awaiting confirmation")]
    NoPendingProposal,

    /// Validation errors for data models
    #[error("Validation error: {0}")]
    Validation(String),

    /// Entity not found errors
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Storage errors
    #[error("Storage error: {0}")]
    Storage(String),
}

impl GuardError {
    /// Create a "not found" error for transactions
    pub fn transaction_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Transaction",
            identifier: identifier.into(),
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Wrap any error coming back from a commit as a persistence failure
    pub fn into_persistence_failure(self) -> Self {
        match self {
            Self::PersistenceFailure(_) => self,
            other => Self::PersistenceFailure(other.to_string()),
        }
    }
}

impl From<std::io::Error> for GuardError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for GuardError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

/// Result type alias for budget guard operations
pub type GuardResult<T> = Result<T, GuardError>;
