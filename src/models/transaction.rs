//! Transaction model
//!
//! Transactions carry a non-negative magnitude; whether they reduce or grow
//! the budget is decided by their type. Dates are kept exactly as the
//! persistence layer sent them and parsed on demand, so one malformed date
//! never prevents loading the rest.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ids::TransactionId;
use super::money::Money;
use crate::error::{GuardError, GuardResult};

/// Category used when the user does not pick one
pub const DEFAULT_CATEGORY: &str = "other";

/// Direction of a transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    /// Expense, reduces the spendable budget
    Debit,
    /// Income, increases the spendable budget
    Credit,
}

impl TransactionType {
    pub fn is_debit(&self) -> bool {
        matches!(self, Self::Debit)
    }

    pub fn is_credit(&self) -> bool {
        matches!(self, Self::Credit)
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Debit => write!(f, "debit"),
            Self::Credit => write!(f, "credit"),
        }
    }
}

impl FromStr for TransactionType {
    type Err = GuardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "debit" | "expense" => Ok(Self::Debit),
            "credit" | "income" => Ok(Self::Credit),
            other => Err(GuardError::Validation(format!(
                "Unknown transaction type '{}', expected 'debit' or 'credit'",
                other
            ))),
        }
    }
}

/// A persisted transaction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    /// Identifier assigned by the persistence layer
    pub id: TransactionId,

    /// Non-negative magnitude
    pub amount: Money,

    /// Debit or credit
    #[serde(rename = "type")]
    pub kind: TransactionType,

    /// ISO-8601 date as stored; see [`parse_instant`]
    pub date: String,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub category: String,

    /// When the record was created, used as a sort fallback
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Transaction {
    /// Materialize a draft that the persistence layer accepted
    pub fn from_draft(id: TransactionId, draft: &TransactionDraft, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            amount: draft.amount,
            kind: draft.kind,
            date: draft.iso_date(),
            description: draft.description.clone(),
            category: draft.category.clone(),
            created_at: Some(created_at),
        }
    }

    pub fn is_debit(&self) -> bool {
        self.kind.is_debit()
    }

    pub fn is_credit(&self) -> bool {
        self.kind.is_credit()
    }

    /// The instant this transaction happened, reading offset-less dates in `tz`
    pub fn occurred_at<Tz: TimeZone>(&self, tz: &Tz) -> GuardResult<DateTime<Utc>> {
        parse_instant(&self.date, tz)
    }

    /// Validate the transaction
    pub fn validate(&self) -> GuardResult<()> {
        if self.amount.is_negative() {
            return Err(GuardError::InvalidAmount(format!(
                "transaction {} has negative amount {}",
                self.id, self.amount
            )));
        }
        Ok(())
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {}",
            self.date, self.kind, self.description, self.amount
        )
    }
}

/// A transaction the user is about to add
///
/// Date and time are captured separately, the way an entry form collects
/// them, and combined into one ISO-8601 string on commit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionDraft {
    pub amount: Money,
    pub description: String,
    pub date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<NaiveTime>,
    #[serde(rename = "type")]
    pub kind: TransactionType,
    pub category: String,
}

impl TransactionDraft {
    /// Create a validated draft with the default category and no time
    pub fn new(
        amount: Money,
        description: impl Into<String>,
        kind: TransactionType,
        date: NaiveDate,
    ) -> GuardResult<Self> {
        let draft = Self {
            amount,
            description: description.into().trim().to_string(),
            date,
            time: None,
            kind,
            category: DEFAULT_CATEGORY.to_string(),
        };
        draft.validate()?;
        Ok(draft)
    }

    /// Set the time of day
    pub fn with_time(mut self, time: NaiveTime) -> Self {
        self.time = Some(time);
        self
    }

    /// Set the category; blank input keeps the default
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        let category = category.into();
        if !category.trim().is_empty() {
            self.category = category.trim().to_string();
        }
        self
    }

    /// Validate the draft
    pub fn validate(&self) -> GuardResult<()> {
        if self.amount.is_negative() {
            return Err(GuardError::InvalidAmount(format!(
                "amount must be a non-negative magnitude, got {}",
                self.amount
            )));
        }
        if self.description.trim().is_empty() {
            return Err(GuardError::Validation("Description is required".into()));
        }
        Ok(())
    }

    /// Combined ISO-8601 date: `YYYY-MM-DDTHH:MM:00`, or the bare date
    pub fn iso_date(&self) -> String {
        format_iso_date(self.date, self.time)
    }

    /// The instant this draft will be recorded at once stored
    pub fn occurred_at<Tz: TimeZone>(&self, tz: &Tz) -> GuardResult<DateTime<Utc>> {
        parse_instant(&self.iso_date(), tz)
    }
}

/// Combine a date and an optional time of day the way drafts are stored
pub fn format_iso_date(date: NaiveDate, time: Option<NaiveTime>) -> String {
    match time {
        Some(time) => format!("{}T{}:00", date.format("%Y-%m-%d"), time.format("%H:%M")),
        None => date.format("%Y-%m-%d").to_string(),
    }
}

/// Parse a persisted ISO-8601 date into an instant
///
/// - with an offset (`2025-01-15T10:30:00Z`): taken as is
/// - without one (`2025-01-15T10:30:00`, `2025-01-15T10:30`): local time in `tz`
/// - date only (`2025-01-15`): UTC midnight
pub fn parse_instant<Tz: TimeZone>(raw: &str, tz: &Tz) -> GuardResult<DateTime<Utc>> {
    let raw = raw.trim();
    let invalid = || GuardError::InvalidDate(format!("'{}' is not an ISO-8601 date", raw));

    if raw.is_empty() {
        return Err(GuardError::InvalidDate("date is missing".into()));
    }

    if let Ok(instant) = DateTime::parse_from_rfc3339(raw) {
        return Ok(instant.with_timezone(&Utc));
    }

    let naive = raw
        .parse::<NaiveDateTime>()
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M"));
    if let Ok(naive) = naive {
        return tz
            .from_local_datetime(&naive)
            .earliest()
            .map(|local| local.with_timezone(&Utc))
            .ok_or_else(invalid);
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map(|date| Utc.from_utc_datetime(&date.and_time(NaiveTime::MIN)))
        .map_err(|_| invalid())
}
