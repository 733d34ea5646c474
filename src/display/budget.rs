//! Budget display formatting
//!
//! Formats the monthly budget snapshot, the profile and savings guard
//! decisions for terminal output.

use chrono::TimeZone;

use crate::models::{Money, Profile};
use crate::services::{BudgetSnapshot, Decision};

/// Format the budget status for the current period
pub fn format_budget_status<Tz: TimeZone>(snapshot: &BudgetSnapshot<Tz>, symbol: &str) -> String {
    let state = &snapshot.state;
    let money = |m: Money| m.format_with_symbol(symbol);
    let mut output = String::new();

    output.push_str(&format!("Budget for {}\n", snapshot.period.label()));
    output.push_str(&"=".repeat(40));
    output.push('\n');

    if snapshot.is_provisional() {
        output.push_str("(provisional: no profile set up, showing the fallback profile)\n");
    }

    output.push_str(&format!(
        "{:<20} {:>18}\n",
        "Monthly income:",
        money(snapshot.profile.monthly_income)
    ));
    output.push_str(&format!(
        "{:<20} {:>18}\n",
        "Savings goal:",
        money(snapshot.profile.savings_goal)
    ));
    output.push_str(&format!(
        "{:<20} {:>18}\n",
        "Spendable:",
        money(state.spendable_capacity)
    ));
    output.push_str(&"-".repeat(40));
    output.push('\n');
    output.push_str(&format!("{:<20} {:>18}\n", "Total spent:", money(state.total_spent)));
    output.push_str(&format!("{:<20} {:>18}\n", "Remaining:", money(state.remaining)));
    output.push_str(&format!(
        "{:<20} {:>18}\n",
        "Savings protected:",
        money(state.savings_left)
    ));

    if let Some(percent) = snapshot.progress_percent() {
        output.push_str(&format!(
            "\n{} {:.1}% of income spent\n",
            progress_bar(percent, 20),
            percent
        ));
    }

    if state.is_overspent() {
        output.push_str(&format!(
            "\n⚠ Overspent by {}; spending is eating into savings.\n",
            money(state.overspend())
        ));
    }

    output.push_str(&format!(
        "\n{} transaction(s) this month",
        snapshot.included
    ));
    if !snapshot.anomalies.is_empty() {
        output.push_str(&format!(
            ", {} skipped for unreadable dates",
            snapshot.anomalies.len()
        ));
    }
    output.push('\n');

    output
}

/// Format the savings alert shown before a savings-impacting debit
pub fn format_savings_alert(decision: &Decision, symbol: &str) -> String {
    format!(
        "⚠ Savings alert: this {} of {} leaves {} remaining.\n\
         You are using money from your savings goal. Avoid this purchase or adjust your expenses.\n",
        decision.draft.kind,
        decision.draft.amount.format_with_symbol(symbol),
        decision.projected_remaining.format_with_symbol(symbol)
    )
}

/// Format the profile
pub fn format_profile(profile: &Profile, symbol: &str) -> String {
    format!(
        "Monthly income:  {}\nSavings goal:    {}\nSpendable:       {}\n",
        profile.monthly_income.format_with_symbol(symbol),
        profile.savings_goal.format_with_symbol(symbol),
        profile.spendable_capacity().format_with_symbol(symbol)
    )
}

/// Text progress bar, clamped to 0..=100 percent
fn progress_bar(percent: f64, width: usize) -> String {
    let filled = ((percent.clamp(0.0, 100.0) / 100.0) * width as f64).round() as usize;
    format!("[{}{}]", "#".repeat(filled), ".".repeat(width - filled))
}
