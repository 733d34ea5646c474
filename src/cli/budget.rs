//! Budget CLI commands
//!
//! `guard status`: the budget state for the current month.

use crate::config::settings::Settings;
use crate::display::format_budget_status;
use crate::error::GuardResult;
use crate::models::BudgetPeriod;
use crate::services::{BudgetService, BudgetSnapshot};
use crate::storage::Storage;

/// Compute this month's snapshot, falling back per the settings
pub fn current_snapshot(storage: &Storage, settings: &Settings) -> GuardResult<BudgetSnapshot> {
    let fallback = settings.fallback_profile();
    BudgetService::new(storage).snapshot(fallback.as_ref(), &BudgetPeriod::current())
}

/// Handle the status command
pub fn handle_status_command(storage: &Storage, settings: &Settings) -> GuardResult<()> {
    let snapshot = current_snapshot(storage, settings)?;
    print!(
        "{}",
        format_budget_status(&snapshot, &settings.currency_symbol)
    );

    if snapshot.is_provisional() {
        println!();
        println!("Run 'guard profile set --income <amount> --goal <amount>' to set up your profile.");
    }

    Ok(())
}
