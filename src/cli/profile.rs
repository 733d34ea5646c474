//! Profile CLI commands
//!
//! Implements CLI commands for viewing and setting the monthly income and
//! savings goal.

use clap::Subcommand;

use crate::config::settings::Settings;
use crate::display::format_profile;
use crate::error::{GuardError, GuardResult};
use crate::models::{Money, Profile};
use crate::storage::{BudgetSource, Storage};

/// Profile subcommands
#[derive(Subcommand)]
pub enum ProfileCommands {
    /// Show the current profile
    Show,

    /// Set the monthly income and/or savings goal
    Set {
        /// Monthly income (e.g., "50000" or "50,000.00")
        #[arg(short, long)]
        income: Option<String>,

        /// Savings goal for each month
        #[arg(short, long)]
        goal: Option<String>,
    },
}

/// Handle a profile command
pub fn handle_profile_command(
    storage: &Storage,
    settings: &Settings,
    cmd: ProfileCommands,
) -> GuardResult<()> {
    let symbol = &settings.currency_symbol;

    match cmd {
        ProfileCommands::Show => match storage.fetch_profile()? {
            Some(profile) => print!("{}", format_profile(&profile, symbol)),
            None => {
                println!("No profile set up yet.");
                if let Some(fallback) = settings.fallback_profile() {
                    println!(
                        "Budgets are computed provisionally with a fallback income of {}.",
                        fallback.monthly_income.format_with_symbol(symbol)
                    );
                }
                println!("Run 'guard profile set --income <amount> --goal <amount>' to set one up.");
            }
        },

        ProfileCommands::Set { income, goal } => {
            if income.is_none() && goal.is_none() {
                return Err(GuardError::Validation(
                    "Provide --income and/or --goal".into(),
                ));
            }

            let current = storage.fetch_profile()?.unwrap_or_default();
            let profile = Profile::new(
                parse_or(income.as_deref(), current.monthly_income)?,
                parse_or(goal.as_deref(), current.savings_goal)?,
            );
            storage.save_profile(profile)?;

            println!("Profile updated.");
            print!("{}", format_profile(&profile, symbol));
            if profile.spendable_capacity().is_negative() {
                println!("Note: the savings goal is larger than the monthly income.");
            }
        }
    }

    Ok(())
}

fn parse_or(raw: Option<&str>, current: Money) -> GuardResult<Money> {
    raw.map(Money::parse).transpose().map(|m| m.unwrap_or(current))
}
