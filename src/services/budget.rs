//! Budget service
//!
//! Assembles the budget snapshot every screen reads: fetches the profile and
//! the transactions, aggregates the current period and computes the
//! derived figures. Nothing is cached; each call recomputes from the source.

use std::thread;

use chrono::{Local, TimeZone};

use crate::error::{GuardError, GuardResult};
use crate::models::{BudgetPeriod, Profile, ProfileSource, Transaction};
use crate::storage::BudgetSource;

use super::aggregator::{aggregate, DateAnomaly, PeriodTotals};
use super::calculator::BudgetState;

/// Budget figures for one period, with where the profile came from
#[derive(Debug, Clone, PartialEq)]
pub struct BudgetSnapshot<Tz: TimeZone = Local> {
    pub period: BudgetPeriod<Tz>,
    pub totals: PeriodTotals,
    pub state: BudgetState,
    /// Profile the figures were computed from
    pub profile: Profile,
    pub profile_source: ProfileSource,
    /// Transactions that fell inside the period
    pub included: usize,
    /// Transactions skipped for unreadable dates
    pub anomalies: Vec<DateAnomaly>,
}

impl<Tz: TimeZone> BudgetSnapshot<Tz> {
    /// Whether the figures rest on the fallback profile rather than the
    /// user's own
    pub fn is_provisional(&self) -> bool {
        self.profile_source == ProfileSource::Fallback
    }

    /// Share of the monthly income spent so far, in percent
    pub fn progress_percent(&self) -> Option<f64> {
        self.state.progress_percent(&self.profile)
    }
}

/// Service for budget computation
pub struct BudgetService<'a, S: BudgetSource + ?Sized> {
    source: &'a S,
}

impl<'a, S: BudgetSource + ?Sized> BudgetService<'a, S> {
    /// Create a new budget service
    pub fn new(source: &'a S) -> Self {
        Self { source }
    }

    /// Compute the snapshot for `period`
    ///
    /// The profile and the transactions are fetched in parallel and combined
    /// only once both have resolved. `fallback` is used, and the snapshot
    /// flagged provisional, when no profile could be fetched.
    pub fn snapshot<Tz: TimeZone>(
        &self,
        fallback: Option<&Profile>,
        period: &BudgetPeriod<Tz>,
    ) -> GuardResult<BudgetSnapshot<Tz>> {
        let source = self.source;

        let (profile, transactions) = thread::scope(|scope| {
            let profile = scope.spawn(|| source.fetch_profile());
            let transactions = source.fetch_transactions();
            let profile = profile
                .join()
                .unwrap_or_else(|_| Err(GuardError::Storage("profile fetch panicked".into())));
            (profile, transactions)
        });

        assemble(profile, transactions, fallback, period)
    }
}

/// Combine independently fetched inputs into a snapshot
///
/// A failed transactions fetch is an error. A failed or empty profile fetch
/// falls back to `fallback` when one is given; without one, an absent profile
/// is [`GuardError::MissingProfile`] and a failed fetch keeps its own error.
pub fn assemble<Tz: TimeZone>(
    profile: GuardResult<Option<Profile>>,
    transactions: GuardResult<Vec<Transaction>>,
    fallback: Option<&Profile>,
    period: &BudgetPeriod<Tz>,
) -> GuardResult<BudgetSnapshot<Tz>> {
    let transactions = transactions?;

    let (profile, profile_source) = match (profile, fallback) {
        (Ok(Some(profile)), _) => (profile, ProfileSource::Fetched),
        (Ok(None), Some(fallback)) => {
            tracing::warn!(
                monthly_income = %fallback.monthly_income,
                "no profile set up, using fallback profile"
            );
            (*fallback, ProfileSource::Fallback)
        }
        (Err(err), Some(fallback)) => {
            tracing::warn!(
                error = %err,
                monthly_income = %fallback.monthly_income,
                "profile fetch failed, using fallback profile"
            );
            (*fallback, ProfileSource::Fallback)
        }
        (Ok(None), None) => return Err(GuardError::MissingProfile),
        (Err(err), None) => return Err(err),
    };

    let aggregation = aggregate(&transactions, period);
    for anomaly in &aggregation.anomalies {
        tracing::warn!(
            transaction_id = %anomaly.transaction_id,
            raw_date = %anomaly.raw_date,
            reason = %anomaly.reason,
            "transaction excluded from budget"
        );
    }

    let state = BudgetState::compute(&profile, &aggregation.totals);
    tracing::debug!(
        period = %period.label(),
        included = aggregation.included,
        total_spent = %state.total_spent,
        remaining = %state.remaining,
        "computed budget state"
    );

    Ok(BudgetSnapshot {
        period: period.clone(),
        totals: aggregation.totals,
        state,
        profile,
        profile_source,
        included: aggregation.included,
        anomalies: aggregation.anomalies,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Money, TransactionId, TransactionType};
    use chrono::Utc;

    struct MockSource {
        profile: GuardResult<Option<Profile>>,
        transactions: GuardResult<Vec<Transaction>>,
    }

    impl BudgetSource for MockSource {
        fn fetch_profile(&self) -> GuardResult<Option<Profile>> {
            self.profile.clone()
        }

        fn fetch_transactions(&self) -> GuardResult<Vec<Transaction>> {
            self.transactions.clone()
        }
    }

    fn units(n: i64) -> Money {
        Money::from_major_units(n)
    }

    fn period() -> BudgetPeriod<Utc> {
        BudgetPeriod::resolve(&Utc.with_ymd_and_hms(2025, 1, 15, 12, 0, 0).unwrap())
    }

    fn txn(id: &str, amount: i64, kind: TransactionType, date: &str) -> Transaction {
        Transaction {
            id: TransactionId::from_raw(id),
            amount: units(amount),
            kind,
            date: date.into(),
            description: String::new(),
            category: String::new(),
            created_at: None,
        }
    }

    fn january() -> Vec<Transaction> {
        vec![
            txn("rent", 30000, TransactionType::Debit, "2025-01-01T09:00:00"),
            txn("food", 9000, TransactionType::Debit, "2025-01-12"),
            txn("old", 7000, TransactionType::Debit, "2024-12-28"),
        ]
    }

    #[test]
    fn test_snapshot_from_fetched_profile() {
        let source = MockSource {
            profile: Ok(Some(Profile::new(units(50000), units(10000)))),
            transactions: Ok(january()),
        };
        let snapshot = BudgetService::new(&source).snapshot(None, &period()).unwrap();

        assert_eq!(snapshot.profile_source, ProfileSource::Fetched);
        assert!(!snapshot.is_provisional());
        assert_eq!(snapshot.included, 2);
        assert_eq!(snapshot.state.total_spent, units(39000));
        assert_eq!(snapshot.state.remaining, units(1000));
        assert_eq!(snapshot.state.savings_left, units(10000));
        assert_eq!(snapshot.period, period());
    }

    #[test]
    fn test_missing_profile_without_fallback() {
        let source = MockSource {
            profile: Ok(None),
            transactions: Ok(january()),
        };
        let result = BudgetService::new(&source).snapshot(None, &period());
        assert!(matches!(result, Err(GuardError::MissingProfile)));
    }

    #[test]
    fn test_missing_profile_with_fallback_is_provisional() {
        let source = MockSource {
            profile: Ok(None),
            transactions: Ok(vec![txn("a", 500, TransactionType::Debit, "2025-01-03")]),
        };
        let fallback = Profile::fallback(units(2000));
        let snapshot = BudgetService::new(&source)
            .snapshot(Some(&fallback), &period())
            .unwrap();

        assert!(snapshot.is_provisional());
        assert_eq!(snapshot.profile, fallback);
        assert_eq!(snapshot.state.remaining, units(1500));
        assert_eq!(snapshot.progress_percent(), Some(25.0));
    }

    #[test]
    fn test_failed_profile_fetch() {
        let failing = || MockSource {
            profile: Err(GuardError::Storage("timeout".into())),
            transactions: Ok(january()),
        };

        let result = BudgetService::new(&failing()).snapshot(None, &period());
        assert!(matches!(result, Err(GuardError::Storage(_))));

        let fallback = Profile::fallback(units(2000));
        let snapshot = BudgetService::new(&failing())
            .snapshot(Some(&fallback), &period())
            .unwrap();
        assert!(snapshot.is_provisional());
        assert_eq!(snapshot.state.total_spent, units(39000));
    }

    #[test]
    fn test_failed_transaction_fetch_is_not_masked() {
        let source = MockSource {
            profile: Ok(Some(Profile::new(units(50000), units(10000)))),
            transactions: Err(GuardError::Storage("connection reset".into())),
        };
        let fallback = Profile::fallback(units(2000));
        let result = BudgetService::new(&source).snapshot(Some(&fallback), &period());
        assert!(matches!(result, Err(GuardError::Storage(_))));
    }

    #[test]
    fn test_anomalies_are_carried() {
        let mut transactions = january();
        transactions.push(txn("broken", 100, TransactionType::Debit, "someday"));
        let snapshot = assemble(
            Ok(Some(Profile::new(units(50000), units(10000)))),
            Ok(transactions),
            None,
            &period(),
        )
        .unwrap();

        assert_eq!(snapshot.anomalies.len(), 1);
        assert_eq!(snapshot.anomalies[0].transaction_id.as_str(), "broken");
        assert_eq!(snapshot.state.total_spent, units(39000));
    }

    #[test]
    fn test_works_through_trait_object() {
        let source = MockSource {
            profile: Ok(Some(Profile::new(units(1000), units(0)))),
            transactions: Ok(Vec::new()),
        };
        let dyn_source: &dyn BudgetSource = &source;
        let snapshot = BudgetService::new(dyn_source).snapshot(None, &period()).unwrap();
        assert_eq!(snapshot.state.remaining, units(1000));
    }
}
