//! Transaction display formatting
//!
//! Provides utilities for formatting transactions for terminal display:
//! the listing table and the detail view.

use tabled::settings::object::Columns;
use tabled::settings::{Alignment, Modify, Style};
use tabled::{Table, Tabled};

use crate::models::{Transaction, TransactionType};

#[derive(Tabled)]
struct TransactionRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Description")]
    description: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Amount")]
    amount: String,
}

impl TransactionRow {
    fn new(txn: &Transaction, symbol: &str) -> Self {
        Self {
            id: txn.id.short().to_string(),
            date: display_date(&txn.date),
            description: truncate(&txn.description, 32),
            category: txn.category.clone(),
            amount: signed_amount(txn, symbol),
        }
    }
}

/// Format a list of transactions as a table
pub fn format_transaction_table(transactions: &[Transaction], symbol: &str) -> String {
    if transactions.is_empty() {
        return "No transactions found.\n".to_string();
    }

    let rows = transactions.iter().map(|t| TransactionRow::new(t, symbol));
    let mut table = Table::new(rows);
    table
        .with(Style::psql())
        .with(Modify::new(Columns::single(4)).with(Alignment::right()));

    format!("{}\n", table)
}

/// Format transaction details for display
pub fn format_transaction_details(txn: &Transaction, symbol: &str) -> String {
    let mut output = String::new();

    output.push_str(&format!("Transaction: {}\n", txn.id));
    output.push_str(&format!("Date:        {}\n", display_date(&txn.date)));
    output.push_str(&format!("Type:        {}\n", txn.kind));
    output.push_str(&format!("Amount:      {}\n", txn.amount.format_with_symbol(symbol)));
    output.push_str(&format!("Description: {}\n", txn.description));

    if txn.category.is_empty() {
        output.push_str("Category:    (uncategorized)\n");
    } else {
        output.push_str(&format!("Category:    {}\n", txn.category));
    }

    if let Some(created_at) = txn.created_at {
        output.push_str(&format!(
            "Created:     {}\n",
            created_at.format("%Y-%m-%d %H:%M UTC")
        ));
    }

    output
}

/// Debits shown with a leading minus, credits with a plus
fn signed_amount(txn: &Transaction, symbol: &str) -> String {
    let sign = match txn.kind {
        TransactionType::Debit => "-",
        TransactionType::Credit => "+",
    };
    format!("{}{}", sign, txn.amount.format_with_symbol(symbol))
}

/// Stored date without seconds, "T" replaced by a space
fn display_date(raw: &str) -> String {
    if raw.is_empty() {
        return "(no date)".to_string();
    }
    let trimmed = match raw.get(..16) {
        Some(prefix) if raw.len() > 16 => prefix,
        _ => raw,
    };
    trimmed.replacen('T', " ", 1)
}

/// Truncate a string to a maximum number of characters
fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_chars.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Money, TransactionId};

    fn txn(kind: TransactionType, date: &str) -> Transaction {
        Transaction {
            id: TransactionId::from_raw("0123456789abcdef"),
            amount: Money::from_minor(12550),
            kind,
            date: date.into(),
            description: "Weekly groceries".into(),
            category: "food".into(),
            created_at: None,
        }
    }

    #[test]
    fn test_format_table() {
        let output = format_transaction_table(
            &[
                txn(TransactionType::Debit, "2025-01-15T10:30:00"),
                txn(TransactionType::Credit, "2025-01-16"),
            ],
            "₹",
        );
        assert!(output.contains("Description"));
        assert!(output.contains("01234567"));
        assert!(!output.contains("0123456789abcdef"));
        assert!(output.contains("-₹125.50"));
        assert!(output.contains("+₹125.50"));
        assert!(output.contains("2025-01-15 10:30"));
    }

    #[test]
    fn test_format_empty_table() {
        assert_eq!(format_transaction_table(&[], "₹"), "No transactions found.\n");
    }

    #[test]
    fn test_format_details() {
        let output = format_transaction_details(&txn(TransactionType::Debit, ""), "$");
        assert!(output.contains("Transaction: 0123456789abcdef"));
        assert!(output.contains("(no date)"));
        assert!(output.contains("Amount:      $125.50"));
        assert!(output.contains("Type:        debit"));
    }

    #[test]
    fn test_display_date() {
        assert_eq!(display_date("2025-01-15T10:30:00Z"), "2025-01-15 10:30");
        assert_eq!(display_date("2025-01-15"), "2025-01-15");
        assert_eq!(display_date("2025-01-15T10:30"), "2025-01-15 10:30");
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("a much longer description", 10), "a much ...");
        assert_eq!(truncate("₹₹₹₹₹₹", 5), "₹₹...");
    }
}
