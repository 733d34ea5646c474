//! Transaction service
//!
//! Listing, searching, editing and deleting stored transactions. Creating a
//! transaction goes through the savings guard instead, so every new debit is
//! checked against the budget first.

use std::cmp::Ordering;

use chrono::{DateTime, Local, NaiveDate, NaiveTime, TimeZone, Utc};

use crate::error::{GuardError, GuardResult};
use crate::models::{format_iso_date, Money, Transaction, TransactionType};
use crate::storage::Storage;

/// Which direction of transactions to show
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KindFilter {
    #[default]
    All,
    /// Debits only
    Spend,
    /// Credits only
    Received,
}

impl KindFilter {
    fn accepts(&self, kind: TransactionType) -> bool {
        match self {
            Self::All => true,
            Self::Spend => kind.is_debit(),
            Self::Received => kind.is_credit(),
        }
    }
}

/// Listing order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Newest,
    Oldest,
}

/// Options for filtering transactions
#[derive(Debug, Clone, Default)]
pub struct TransactionQuery {
    /// Case-insensitive text matched against description, category and amount
    pub search: Option<String>,
    pub kind: KindFilter,
    pub order: SortOrder,
    /// Maximum number of transactions to return
    pub limit: Option<usize>,
}

impl TransactionQuery {
    /// Create a new empty query
    pub fn new() -> Self {
        Self::default()
    }

    /// Filter by search text; blank text matches everything
    pub fn search(mut self, text: impl Into<String>) -> Self {
        let text = text.into();
        self.search = if text.trim().is_empty() {
            None
        } else {
            Some(text.trim().to_lowercase())
        };
        self
    }

    /// Filter by direction
    pub fn kind(mut self, kind: KindFilter) -> Self {
        self.kind = kind;
        self
    }

    /// Set the listing order
    pub fn order(mut self, order: SortOrder) -> Self {
        self.order = order;
        self
    }

    /// Limit results
    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    fn matches(&self, txn: &Transaction) -> bool {
        if !self.kind.accepts(txn.kind) {
            return false;
        }
        match &self.search {
            Some(needle) => {
                txn.description.to_lowercase().contains(needle)
                    || txn.category.to_lowercase().contains(needle)
                    || txn.amount.to_string().contains(needle)
            }
            None => true,
        }
    }

    /// Filter, sort and truncate `transactions`
    ///
    /// Sorting uses the parsed date, read in `tz` when it has no offset, and
    /// falls back to the creation time. Transactions with neither sort last
    /// in both orders.
    pub fn apply<Tz: TimeZone>(&self, transactions: Vec<Transaction>, tz: &Tz) -> Vec<Transaction> {
        let mut keyed: Vec<(Option<DateTime<Utc>>, Transaction)> = transactions
            .into_iter()
            .filter(|t| self.matches(t))
            .map(|t| (t.occurred_at(tz).ok().or(t.created_at), t))
            .collect();

        keyed.sort_by(|(a_key, a), (b_key, b)| {
            let by_time = match (a_key, b_key) {
                (Some(a_key), Some(b_key)) => match self.order {
                    SortOrder::Newest => b_key.cmp(a_key),
                    SortOrder::Oldest => a_key.cmp(b_key),
                },
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => Ordering::Equal,
            };
            by_time.then_with(|| a.id.cmp(&b.id))
        });

        let mut result: Vec<Transaction> = keyed.into_iter().map(|(_, t)| t).collect();
        if let Some(limit) = self.limit {
            result.truncate(limit);
        }
        result
    }
}

/// Changes to apply to a stored transaction; `None` keeps the current value
#[derive(Debug, Clone, Default)]
pub struct TransactionUpdate {
    pub amount: Option<Money>,
    pub description: Option<String>,
    pub kind: Option<TransactionType>,
    pub category: Option<String>,
    pub date: Option<NaiveDate>,
    pub time: Option<NaiveTime>,
}

impl TransactionUpdate {
    pub fn is_empty(&self) -> bool {
        self.amount.is_none()
            && self.description.is_none()
            && self.kind.is_none()
            && self.category.is_none()
            && self.date.is_none()
            && self.time.is_none()
    }
}

/// Service for transaction management
pub struct TransactionService<'a> {
    storage: &'a Storage,
}

impl<'a> TransactionService<'a> {
    /// Create a new transaction service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// List transactions matching `query`, sorted in local time
    pub fn list(&self, query: &TransactionQuery) -> GuardResult<Vec<Transaction>> {
        let transactions = self.storage.transactions.get_all()?;
        Ok(query.apply(transactions, &Local))
    }

    /// Find a transaction by full id or unique prefix
    pub fn find(&self, identifier: &str) -> GuardResult<Transaction> {
        self.storage.transactions.find(identifier)
    }

    /// Edit a stored transaction
    ///
    /// Changing only the date keeps the stored time of day, and the reverse.
    pub fn update(&self, identifier: &str, update: TransactionUpdate) -> GuardResult<Transaction> {
        if update.is_empty() {
            return Err(GuardError::Validation("Nothing to update".into()));
        }

        let mut txn = self.find(identifier)?;

        if let Some(amount) = update.amount {
            txn.amount = amount;
        }
        if let Some(description) = update.description {
            let description = description.trim();
            if description.is_empty() {
                return Err(GuardError::Validation("Description is required".into()));
            }
            txn.description = description.to_string();
        }
        if let Some(kind) = update.kind {
            txn.kind = kind;
        }
        if let Some(category) = update.category {
            txn.category = category.trim().to_string();
        }
        if update.date.is_some() || update.time.is_some() {
            let date = update
                .date
                .or_else(|| stored_date(&txn.date))
                .ok_or_else(|| {
                    GuardError::Validation(format!(
                        "Transaction {} has no readable date; supply a new date",
                        txn.id.short()
                    ))
                })?;
            let time = update.time.or_else(|| stored_time(&txn.date));
            txn.date = format_iso_date(date, time);
        }

        self.storage.update_transaction(txn)
    }

    /// Permanently delete a transaction
    pub fn delete(&self, identifier: &str) -> GuardResult<Transaction> {
        self.storage.delete_transaction(identifier)
    }

    /// Number of stored transactions
    pub fn count(&self) -> GuardResult<usize> {
        self.storage.transactions.count()
    }
}

fn stored_date(raw: &str) -> Option<NaiveDate> {
    raw.get(..10)
        .and_then(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").ok())
}

fn stored_time(raw: &str) -> Option<NaiveTime> {
    raw.get(11..16)
        .and_then(|t| NaiveTime::parse_from_str(t, "%H:%M").ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::GuardPaths;
    use crate::models::{TransactionDraft, TransactionId};
    use crate::storage::TransactionSink;
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = GuardPaths::with_base_dir(temp_dir.path().to_path_buf());
        let mut storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();
        (temp_dir, storage)
    }

    fn txn(id: &str, minor: i64, kind: TransactionType, date: &str, description: &str) -> Transaction {
        Transaction {
            id: TransactionId::from_raw(id),
            amount: Money::from_minor(minor),
            kind,
            date: date.into(),
            description: description.into(),
            category: "food".into(),
            created_at: None,
        }
    }

    fn sample() -> Vec<Transaction> {
        vec![
            txn("a", 25000, TransactionType::Debit, "2025-01-10T09:00:00Z", "Groceries"),
            txn("b", 500000, TransactionType::Credit, "2025-01-01T08:00:00Z", "Salary"),
            txn("c", 1250, TransactionType::Debit, "2025-01-20T19:30:00Z", "Coffee"),
            txn("d", 999, TransactionType::Debit, "garbage", "Mystery"),
        ]
    }

    fn ids(transactions: &[Transaction]) -> Vec<&str> {
        transactions.iter().map(|t| t.id.as_str()).collect()
    }

    #[test]
    fn test_newest_first_with_unreadable_last() {
        let result = TransactionQuery::new().apply(sample(), &Utc);
        assert_eq!(ids(&result), vec!["c", "a", "b", "d"]);
    }

    #[test]
    fn test_oldest_first() {
        let result = TransactionQuery::new()
            .order(SortOrder::Oldest)
            .apply(sample(), &Utc);
        assert_eq!(ids(&result), vec!["b", "a", "c", "d"]);
    }

    #[test]
    fn test_created_at_fallback() {
        let mut transactions = sample();
        transactions[3].created_at = Some(Utc.with_ymd_and_hms(2025, 1, 15, 0, 0, 0).unwrap());
        let result = TransactionQuery::new().apply(transactions, &Utc);
        assert_eq!(ids(&result), vec!["c", "d", "a", "b"]);
    }

    #[test]
    fn test_kind_filter() {
        let spend = TransactionQuery::new()
            .kind(KindFilter::Spend)
            .apply(sample(), &Utc);
        assert_eq!(ids(&spend), vec!["c", "a", "d"]);

        let received = TransactionQuery::new()
            .kind(KindFilter::Received)
            .apply(sample(), &Utc);
        assert_eq!(ids(&received), vec!["b"]);
    }

    #[test]
    fn test_search() {
        let by_description = TransactionQuery::new().search("COFF").apply(sample(), &Utc);
        assert_eq!(ids(&by_description), vec!["c"]);

        let by_amount = TransactionQuery::new().search("250.00").apply(sample(), &Utc);
        assert_eq!(ids(&by_amount), vec!["a"]);

        let by_category = TransactionQuery::new().search("food").apply(sample(), &Utc);
        assert_eq!(by_category.len(), 4);

        let blank = TransactionQuery::new().search("   ");
        assert!(blank.search.is_none());
    }

    #[test]
    fn test_limit() {
        let result = TransactionQuery::new().limit(2).apply(sample(), &Utc);
        assert_eq!(ids(&result), vec!["c", "a"]);
    }

    #[test]
    fn test_update_transaction() {
        let (_temp_dir, storage) = create_test_storage();
        let draft = TransactionDraft::new(
            Money::from_major_units(300),
            "Dinner",
            TransactionType::Debit,
            NaiveDate::from_ymd_opt(2025, 1, 15).unwrap(),
        )
        .unwrap()
        .with_time(NaiveTime::from_hms_opt(20, 15, 0).unwrap());
        let created = storage.create_transaction(&draft).unwrap();
        let service = TransactionService::new(&storage);

        let updated = service
            .update(
                created.id.as_str(),
                TransactionUpdate {
                    amount: Some(Money::from_major_units(350)),
                    date: Some(NaiveDate::from_ymd_opt(2025, 1, 16).unwrap()),
                    ..Default::default()
                },
            )
            .unwrap();

        assert_eq!(updated.amount, Money::from_major_units(350));
        assert_eq!(updated.date, "2025-01-16T20:15:00");
        assert_eq!(updated.description, "Dinner");
        assert_eq!(service.find(created.id.short()).unwrap(), updated);
    }

    #[test]
    fn test_update_rejects_bad_input() {
        let (_temp_dir, storage) = create_test_storage();
        storage.transactions.upsert(sample().remove(3)).unwrap();
        let service = TransactionService::new(&storage);

        assert!(service
            .update("d", TransactionUpdate::default())
            .unwrap_err()
            .is_validation());
        assert!(service
            .update(
                "d",
                TransactionUpdate {
                    time: Some(NaiveTime::from_hms_opt(10, 0, 0).unwrap()),
                    ..Default::default()
                }
            )
            .unwrap_err()
            .is_validation());
        assert!(matches!(
            service.update(
                "d",
                TransactionUpdate {
                    amount: Some(Money::from_minor(-1)),
                    ..Default::default()
                }
            ),
            Err(GuardError::InvalidAmount(_))
        ));
        assert!(service
            .update(
                "nothing-here",
                TransactionUpdate {
                    description: Some("x".into()),
                    ..Default::default()
                }
            )
            .unwrap_err()
            .is_not_found());
    }

    #[test]
    fn test_delete_transaction() {
        let (_temp_dir, storage) = create_test_storage();
        for t in sample() {
            storage.transactions.upsert(t).unwrap();
        }
        let service = TransactionService::new(&storage);

        let deleted = service.delete("b").unwrap();
        assert_eq!(deleted.description, "Salary");
        assert_eq!(service.count().unwrap(), 3);
        assert!(service.find("b").unwrap_err().is_not_found());
    }
}
