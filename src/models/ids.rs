//! Identifier wrapper for transactions
//!
//! Ids are assigned by the persistence collaborator and treated as opaque
//! strings; locally created transactions get a random UUID.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Minimum length of a prefix accepted by [`TransactionId::matches`]
const MIN_PREFIX_LEN: usize = 4;

/// Opaque transaction identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TransactionId(String);

impl TransactionId {
    /// Create a new random ID
    pub fn generate() -> Self {
        Self(Uuid::new_v4().simple().to_string())
    }

    /// Wrap an id received from the persistence layer
    pub fn from_raw(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// The id as sent over the wire
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Short form for terminal display
    pub fn short(&self) -> &str {
        self.0.get(..8).unwrap_or(&self.0)
    }

    /// Check if a user-supplied identifier refers to this id
    ///
    /// Accepts the full id or a prefix of at least four characters.
    pub fn matches(&self, query: &str) -> bool {
        let query = query.trim();
        self.0 == query || (query.len() >= MIN_PREFIX_LEN && self.0.starts_with(query))
    }
}

impl fmt::Display for TransactionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
