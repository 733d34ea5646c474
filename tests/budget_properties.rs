//! Property-style checks of the budget math over generated transaction sets.

use budget_guard::models::{
    BudgetPeriod, Money, Profile, Transaction, TransactionId, TransactionType,
};
use budget_guard::models::money::MAX_MINOR_UNITS;
use budget_guard::services::{aggregate, BudgetState};
use chrono::{Duration, FixedOffset, SecondsFormat, TimeZone};

const SIZES: [usize; 6] = [0, 1, 2, 97, 1_000, 10_000];

/// Small deterministic generator so failures reproduce
struct Lcg(u64);

impl Lcg {
    fn next(&mut self) -> u64 {
        self.0 = self
            .0
            .wrapping_mul(6_364_136_223_846_793_005)
            .wrapping_add(1_442_695_040_888_963_407);
        self.0 >> 33
    }

    fn below(&mut self, bound: u64) -> u64 {
        self.next() % bound
    }

    fn shuffle<T>(&mut self, items: &mut [T]) {
        for i in (1..items.len()).rev() {
            let j = self.below(i as u64 + 1) as usize;
            items.swap(i, j);
        }
    }
}

fn ist() -> FixedOffset {
    FixedOffset::east_opt(5 * 3600 + 1800).unwrap()
}

fn period() -> BudgetPeriod<FixedOffset> {
    BudgetPeriod::resolve(&ist().with_ymd_and_hms(2025, 3, 14, 9, 0, 0).unwrap())
}

/// Transactions spread over February to April, some with broken dates
fn generate(rng: &mut Lcg, count: usize) -> Vec<Transaction> {
    let base = ist().with_ymd_and_hms(2025, 2, 1, 0, 0, 0).unwrap();
    (0..count)
        .map(|i| {
            let kind = if rng.below(4) == 0 {
                TransactionType::Credit
            } else {
                TransactionType::Debit
            };
            let offset = Duration::minutes(rng.below(89 * 24 * 60) as i64);
            let date = match rng.below(20) {
                0 => "not-a-date".to_string(),
                1 => (base + offset).format("%Y-%m-%dT%H:%M:%S").to_string(),
                2 => (base + offset).format("%Y-%m-%d").to_string(),
                _ => (base + offset).to_rfc3339_opts(SecondsFormat::Secs, false),
            };
            Transaction {
                id: TransactionId::from_raw(format!("t{}", i)),
                amount: Money::from_minor(rng.below(5_000_000) as i64),
                kind,
                date,
                description: String::new(),
                category: String::new(),
                created_at: None,
            }
        })
        .collect()
}

#[test]
fn remaining_is_exactly_spendable_minus_spent() {
    let mut rng = Lcg(7);
    let profile = Profile::new(Money::from_minor(7_500_033), Money::from_minor(1_250_017));

    for size in SIZES {
        let transactions = generate(&mut rng, size);
        let aggregation = aggregate(&transactions, &period());
        let state = BudgetState::compute(&profile, &aggregation.totals);

        assert_eq!(
            state.remaining,
            profile.spendable_capacity() - state.total_spent,
            "size {}",
            size
        );
        assert_eq!(
            state.total_spent,
            aggregation.totals.total_debit - aggregation.totals.total_credit
        );
    }
}

#[test]
fn totals_match_a_plain_integer_sum() {
    let mut rng = Lcg(11);
    let period = period();
    let tz = period.timezone();

    for size in SIZES {
        let transactions = generate(&mut rng, size);
        let (mut debit, mut credit) = (0i64, 0i64);
        for txn in &transactions {
            match txn.occurred_at(&tz) {
                Ok(at) if period.contains(&at) => match txn.kind {
                    TransactionType::Debit => debit += txn.amount.minor(),
                    TransactionType::Credit => credit += txn.amount.minor(),
                },
                _ => {}
            }
        }

        let aggregation = aggregate(&transactions, &period);
        assert_eq!(aggregation.totals.total_debit, Money::from_minor(debit));
        assert_eq!(aggregation.totals.total_credit, Money::from_minor(credit));
    }
}

#[test]
fn aggregation_ignores_order() {
    let mut rng = Lcg(23);

    for size in SIZES {
        let mut transactions = generate(&mut rng, size);
        let expected = aggregate(&transactions, &period());

        for _ in 0..3 {
            rng.shuffle(&mut transactions);
            let shuffled = aggregate(&transactions, &period());
            assert_eq!(shuffled.totals, expected.totals, "size {}", size);
            assert_eq!(shuffled.included, expected.included);
            assert_eq!(shuffled.anomalies.len(), expected.anomalies.len());
        }
    }
}

#[test]
fn compute_is_bit_identical_on_repeat() {
    let mut rng = Lcg(31);
    let profile = Profile::new(Money::from_minor(4_000_000), Money::from_minor(999_999));
    let transactions = generate(&mut rng, 10_000);
    let totals = aggregate(&transactions, &period()).totals;

    let first = BudgetState::compute(&profile, &totals);
    let second = BudgetState::compute(&profile, &totals);
    assert_eq!(first, second);
}

#[test]
fn period_boundaries_are_half_open() {
    let period = period();
    let at = |instant: chrono::DateTime<FixedOffset>, id: &str| Transaction {
        id: TransactionId::from_raw(id),
        amount: Money::from_minor(100),
        kind: TransactionType::Debit,
        date: instant.to_rfc3339(),
        description: String::new(),
        category: String::new(),
        created_at: None,
    };

    let transactions = vec![
        at(*period.start(), "start"),
        at(*period.end(), "end"),
        at(*period.start() - Duration::seconds(1), "before"),
    ];
    let aggregation = aggregate(&transactions, &period);

    assert_eq!(aggregation.included, 1);
    assert_eq!(aggregation.totals.total_debit, Money::from_minor(100));
}

#[test]
fn ten_thousand_amounts_at_the_cap_sum_exactly() {
    let period = period();
    let inside = (*period.start() + Duration::days(3)).to_rfc3339();
    let transactions: Vec<Transaction> = (0..10_000)
        .map(|i| Transaction {
            id: TransactionId::from_raw(format!("big{}", i)),
            amount: Money::parse("1000000000000").unwrap(),
            kind: TransactionType::Debit,
            date: inside.clone(),
            description: String::new(),
            category: String::new(),
            created_at: None,
        })
        .collect();

    let aggregation = aggregate(&transactions, &period);
    assert_eq!(aggregation.included, 10_000);
    assert_eq!(
        aggregation.totals.total_debit,
        Money::from_minor(MAX_MINOR_UNITS * 10_000)
    );

    let profile = Profile::new(Money::zero(), Money::zero());
    let state = BudgetState::compute(&profile, &aggregation.totals);
    assert_eq!(state.remaining, -aggregation.totals.total_debit);
}
