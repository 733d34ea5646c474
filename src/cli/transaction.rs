//! Transaction CLI commands
//!
//! Implements adding (through the savings guard), listing, showing,
//! editing and deleting transactions.

use std::io::{self, BufRead, Write};

use chrono::{Local, NaiveDate, NaiveDateTime, NaiveTime};
use clap::Args;

use crate::config::settings::Settings;
use crate::display::{format_savings_alert, format_transaction_details, format_transaction_table};
use crate::error::{GuardError, GuardResult};
use crate::models::{Money, Transaction, TransactionDraft, TransactionType};
use crate::services::{
    GuardOutcome, KindFilter, SavingsGuard, SortOrder, TransactionQuery, TransactionService,
    TransactionUpdate,
};
use crate::storage::Storage;

use super::budget::current_snapshot;

/// Arguments for `guard add`
#[derive(Args, Debug)]
pub struct AddArgs {
    /// Amount (e.g., "250", "1,499.50")
    pub amount: String,

    /// What the money was for
    pub description: String,

    /// Record income instead of an expense
    #[arg(long)]
    pub credit: bool,

    /// Transaction date (defaults to today)
    #[arg(short, long)]
    pub date: Option<String>,

    /// Time of day (HH:MM)
    #[arg(short, long)]
    pub time: Option<String>,

    /// Category
    #[arg(short, long)]
    pub category: Option<String>,

    /// Skip the savings alert confirmation
    #[arg(short, long)]
    pub yes: bool,
}

/// Arguments for `guard list`
#[derive(Args, Debug)]
pub struct ListArgs {
    /// Search description, category or amount
    #[arg(short, long)]
    pub search: Option<String>,

    /// Only expenses
    #[arg(long, conflicts_with = "received")]
    pub spend: bool,

    /// Only income
    #[arg(long)]
    pub received: bool,

    /// Oldest first
    #[arg(long)]
    pub oldest: bool,

    /// Number of transactions to show
    #[arg(short, long, default_value = "20")]
    pub limit: usize,
}

/// Arguments for `guard edit`
#[derive(Args, Debug)]
pub struct EditArgs {
    /// Transaction ID (or unique prefix)
    pub id: String,

    /// New amount
    #[arg(short, long)]
    pub amount: Option<String>,

    /// New description
    #[arg(long)]
    pub description: Option<String>,

    /// New type (debit or credit)
    #[arg(long = "type")]
    pub kind: Option<TransactionType>,

    /// New date
    #[arg(short, long)]
    pub date: Option<String>,

    /// New time of day (HH:MM)
    #[arg(short, long)]
    pub time: Option<String>,

    /// New category
    #[arg(short, long)]
    pub category: Option<String>,
}

/// Add a transaction through the savings guard
///
/// A savings-impacting debit is confirmed on `input` unless `--yes` is given.
pub fn handle_add_command<R: BufRead>(
    storage: &Storage,
    settings: &Settings,
    args: AddArgs,
    input: &mut R,
) -> GuardResult<()> {
    let symbol = &settings.currency_symbol;
    let draft = build_draft(&args, settings, Local::now().naive_local())?;

    let snapshot = current_snapshot(storage, settings)?;
    if snapshot.is_provisional() {
        println!("Note: no profile set up; checking against the fallback profile.");
    }

    // a draft dated in another month leaves this month's remaining as is
    let remaining_after = match draft.occurred_at(&snapshot.period.timezone()) {
        Ok(at) if snapshot.period.contains(&at) => snapshot.state.balance_after(&draft),
        _ => snapshot.state.remaining,
    };

    let mut guard = SavingsGuard::new();
    let txn = match guard.propose(draft, &snapshot.state, storage)? {
        GuardOutcome::Committed(txn) => txn,
        GuardOutcome::PendingConfirmation(decision) => {
            print!("{}", format_savings_alert(&decision, symbol));
            if args.yes || ask_to_continue(input)? {
                guard.confirm(storage)?
            } else {
                guard.cancel()?;
                println!("Transaction cancelled. Nothing was saved.");
                return Ok(());
            }
        }
    };

    print_added(&txn, symbol);
    println!(
        "Remaining this month: {}",
        remaining_after.format_with_symbol(symbol)
    );

    Ok(())
}

/// Build the draft for `guard add`, taking a missing date or time from `now`
///
/// Drafts always carry a time of day so they are stored as local date-times;
/// a bare date would be read as UTC midnight.
fn build_draft(
    args: &AddArgs,
    settings: &Settings,
    now: NaiveDateTime,
) -> GuardResult<TransactionDraft> {
    let kind = if args.credit {
        TransactionType::Credit
    } else {
        TransactionType::Debit
    };
    let date = match args.date.as_deref() {
        Some(raw) => parse_date(raw, &settings.date_format)?,
        None => now.date(),
    };
    let time = match args.time.as_deref() {
        Some(raw) => parse_time(raw)?,
        None => now.time(),
    };

    let draft = TransactionDraft::new(
        Money::parse(&args.amount)?,
        args.description.as_str(),
        kind,
        date,
    )?
    .with_time(time);

    Ok(match args.category.as_deref() {
        Some(category) => draft.with_category(category),
        None => draft,
    })
}

/// List transactions
pub fn handle_list_command(storage: &Storage, settings: &Settings, args: ListArgs) -> GuardResult<()> {
    let kind = if args.spend {
        KindFilter::Spend
    } else if args.received {
        KindFilter::Received
    } else {
        KindFilter::All
    };
    let order = if args.oldest {
        SortOrder::Oldest
    } else {
        SortOrder::Newest
    };

    let mut query = TransactionQuery::new().kind(kind).order(order).limit(args.limit);
    if let Some(search) = args.search {
        query = query.search(search);
    }

    let service = TransactionService::new(storage);
    let transactions = service.list(&query)?;
    print!(
        "{}",
        format_transaction_table(&transactions, &settings.currency_symbol)
    );

    let total = service.count()?;
    if transactions.len() < total {
        println!("Showing {} of {} transactions.", transactions.len(), total);
    }

    Ok(())
}

/// Show one transaction in detail
pub fn handle_show_command(storage: &Storage, settings: &Settings, id: &str) -> GuardResult<()> {
    let txn = TransactionService::new(storage).find(id)?;
    print!("{}", format_transaction_details(&txn, &settings.currency_symbol));
    Ok(())
}

/// Edit a stored transaction
///
/// Edits are not routed through the savings guard.
pub fn handle_edit_command(storage: &Storage, settings: &Settings, args: EditArgs) -> GuardResult<()> {
    let update = TransactionUpdate {
        amount: args.amount.as_deref().map(Money::parse).transpose()?,
        description: args.description,
        kind: args.kind,
        category: args.category,
        date: args
            .date
            .as_deref()
            .map(|raw| parse_date(raw, &settings.date_format))
            .transpose()?,
        time: args.time.as_deref().map(parse_time).transpose()?,
    };

    let txn = TransactionService::new(storage).update(&args.id, update)?;
    println!("Updated transaction:");
    print!("{}", format_transaction_details(&txn, &settings.currency_symbol));
    Ok(())
}

/// Permanently delete a transaction
pub fn handle_delete_command(storage: &Storage, settings: &Settings, id: &str) -> GuardResult<()> {
    let txn = TransactionService::new(storage).delete(id)?;
    println!(
        "Deleted transaction {}: {} {}",
        txn.id.short(),
        txn.description,
        txn.amount.format_with_symbol(&settings.currency_symbol)
    );
    Ok(())
}

fn print_added(txn: &Transaction, symbol: &str) {
    let label = if txn.is_credit() { "income" } else { "expense" };
    println!(
        "Added {} {}: {} {} [{}]",
        label,
        txn.id.short(),
        txn.description,
        txn.amount.format_with_symbol(symbol),
        txn.category
    );
}

/// Ask "Do you want to continue?"; anything but y/yes (including EOF) is no
fn ask_to_continue<R: BufRead>(input: &mut R) -> GuardResult<bool> {
    print!("Do you want to continue? [y/N] ");
    io::stdout().flush()?;

    let mut answer = String::new();
    input.read_line(&mut answer)?;
    let answer = answer.trim().to_lowercase();
    Ok(answer == "y" || answer == "yes")
}

/// Parse a date in the configured format, falling back to ISO
fn parse_date(raw: &str, format: &str) -> GuardResult<NaiveDate> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, format)
        .or_else(|_| NaiveDate::parse_from_str(raw, "%Y-%m-%d"))
        .map_err(|_| GuardError::InvalidDate(format!("'{}' (expected {})", raw, format)))
}

fn parse_time(raw: &str) -> GuardResult<NaiveTime> {
    let raw = raw.trim();
    NaiveTime::parse_from_str(raw, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(raw, "%H:%M:%S"))
        .map_err(|_| GuardError::Validation(format!("Invalid time '{}', expected HH:MM", raw)))
}
