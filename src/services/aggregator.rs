//! Transaction aggregation
//!
//! Reduces a set of transactions to debit and credit totals for one budget
//! period. The reduction is a plain commutative sum over integer minor units,
//! so input order never affects the result.

use chrono::TimeZone;

use crate::models::{BudgetPeriod, Money, Transaction, TransactionId, TransactionType};

/// Debit and credit totals within a period
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PeriodTotals {
    pub total_debit: Money,
    pub total_credit: Money,
}

impl PeriodTotals {
    /// Debits minus credits; negative when more came in than went out
    pub fn net_spent(&self) -> Money {
        self.total_debit - self.total_credit
    }
}

/// A transaction left out of aggregation because its date could not be read
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateAnomaly {
    pub transaction_id: TransactionId,
    pub raw_date: String,
    pub reason: String,
}

/// Result of aggregating one period
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Aggregation {
    pub totals: PeriodTotals,
    /// Number of transactions that fell inside the period
    pub included: usize,
    /// Transactions skipped for unparseable dates, for the caller to report
    pub anomalies: Vec<DateAnomaly>,
}

/// Sum the transactions dated within `[period.start, period.end)`
///
/// Dates without an offset are read in the period's time zone. Transactions
/// whose date cannot be parsed are excluded and listed in `anomalies`.
pub fn aggregate<Tz: TimeZone>(transactions: &[Transaction], period: &BudgetPeriod<Tz>) -> Aggregation {
    let tz = period.timezone();

    transactions
        .iter()
        .fold(Aggregation::default(), |mut acc, txn| {
            match txn.occurred_at(&tz) {
                Ok(instant) if period.contains(&instant) => {
                    match txn.kind {
                        TransactionType::Debit => acc.totals.total_debit += txn.amount,
                        TransactionType::Credit => acc.totals.total_credit += txn.amount,
                    }
                    acc.included += 1;
                }
                Ok(_) => {}
                Err(err) => acc.anomalies.push(DateAnomaly {
                    transaction_id: txn.id.clone(),
                    raw_date: txn.date.clone(),
                    reason: err.to_string(),
                }),
            }
            acc
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, FixedOffset, SecondsFormat, Utc};

    fn period() -> BudgetPeriod<Utc> {
        BudgetPeriod::resolve(&Utc.with_ymd_and_hms(2025, 1, 15, 12, 0, 0).unwrap())
    }

    fn txn(id: &str, minor: i64, kind: TransactionType, date: &str) -> Transaction {
        Transaction {
            id: TransactionId::from_raw(id),
            amount: Money::from_minor(minor),
            kind,
            date: date.to_string(),
            description: String::new(),
            category: String::new(),
            created_at: None,
        }
    }

    #[test]
    fn test_empty_input() {
        let result = aggregate(&[], &period());
        assert_eq!(result.totals, PeriodTotals::default());
        assert_eq!(result.included, 0);
        assert!(result.anomalies.is_empty());
    }

    #[test]
    fn test_sums_by_type() {
        let transactions = vec![
            txn("a", 10000, TransactionType::Debit, "2025-01-02T10:00:00Z"),
            txn("b", 2550, TransactionType::Debit, "2025-01-20"),
            txn("c", 5000, TransactionType::Credit, "2025-01-10T08:00:00"),
        ];
        let result = aggregate(&transactions, &period());

        assert_eq!(result.totals.total_debit, Money::from_minor(12550));
        assert_eq!(result.totals.total_credit, Money::from_minor(5000));
        assert_eq!(result.totals.net_spent(), Money::from_minor(7550));
        assert_eq!(result.included, 3);
    }

    #[test]
    fn test_excludes_other_months() {
        let transactions = vec![
            txn("dec", 10000, TransactionType::Debit, "2024-12-31T23:59:59Z"),
            txn("jan", 100, TransactionType::Debit, "2025-01-31T23:59:59Z"),
            txn("feb", 10000, TransactionType::Debit, "2025-02-01T00:00:00Z"),
        ];
        let result = aggregate(&transactions, &period());
        assert_eq!(result.totals.total_debit, Money::from_minor(100));
        assert_eq!(result.included, 1);
    }

    #[test]
    fn test_boundaries() {
        let period = period();
        let at_start = period.start().to_rfc3339_opts(SecondsFormat::Secs, true);
        let at_end = period.end().to_rfc3339_opts(SecondsFormat::Secs, true);
        let just_before_end =
            (*period.end() - Duration::seconds(1)).to_rfc3339_opts(SecondsFormat::Secs, true);

        let transactions = vec![
            txn("start", 100, TransactionType::Debit, &at_start),
            txn("end", 10000, TransactionType::Debit, &at_end),
            txn("last", 1, TransactionType::Debit, &just_before_end),
        ];
        let result = aggregate(&transactions, &period);
        assert_eq!(result.totals.total_debit, Money::from_minor(101));
    }

    #[test]
    fn test_offsetless_dates_use_period_zone() {
        let ist = FixedOffset::east_opt(5 * 3600 + 1800).unwrap();
        let period = BudgetPeriod::resolve(&ist.with_ymd_and_hms(2025, 1, 15, 12, 0, 0).unwrap());

        // local midnight on the 1st belongs to January in IST
        let transactions = vec![
            txn("a", 700, TransactionType::Debit, "2025-01-01T00:00:00"),
            txn("b", 900, TransactionType::Debit, "2024-12-31T23:59:00"),
        ];
        let result = aggregate(&transactions, &period);
        assert_eq!(result.totals.total_debit, Money::from_minor(700));
    }

    #[test]
    fn test_unparseable_dates_are_reported_not_fatal() {
        let transactions = vec![
            txn("good", 500, TransactionType::Debit, "2025-01-05"),
            txn("bad", 900, TransactionType::Debit, "not a date"),
            txn("missing", 900, TransactionType::Credit, ""),
        ];
        let result = aggregate(&transactions, &period());

        assert_eq!(result.totals.total_debit, Money::from_minor(500));
        assert_eq!(result.totals.total_credit, Money::zero());
        assert_eq!(result.anomalies.len(), 2);
        assert_eq!(result.anomalies[0].transaction_id.as_str(), "bad");
        assert_eq!(result.anomalies[0].raw_date, "not a date");
        assert_eq!(result.anomalies[1].transaction_id.as_str(), "missing");
    }

    #[test]
    fn test_order_independent() {
        let mut transactions: Vec<Transaction> = (0..200)
            .map(|i| {
                let kind = if i % 3 == 0 {
                    TransactionType::Credit
                } else {
                    TransactionType::Debit
                };
                let day = 1 + (i % 28);
                txn(&i.to_string(), 37 * i + 1, kind, &format!("2025-01-{:02}", day))
            })
            .collect();

        let forward = aggregate(&transactions, &period());
        transactions.reverse();
        let reversed = aggregate(&transactions, &period());
        transactions.rotate_left(77);
        let rotated = aggregate(&transactions, &period());

        assert_eq!(forward.totals, reversed.totals);
        assert_eq!(forward.totals, rotated.totals);
    }
}
