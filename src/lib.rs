//! Budget Guard - monthly budget engine with a savings guard
//!
//! This library computes a single user's monthly budget from their income,
//! savings goal and transactions, and guards the savings goal: a debit that
//! would push the month's remaining budget below zero has to be explicitly
//! confirmed before it is committed.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `logging`: Tracing subscriber setup
//! - `models`: Core data models (money, period, profile, transactions)
//! - `services`: Budget math, snapshot assembly and the savings guard
//! - `storage`: Persistence traits and the JSON file store
//! - `display`: Terminal formatting
//! - `cli`: Command handlers for the `guard` binary
//!
//! # Example
//!
//! ```rust,ignore
//! use budget_guard::config::{paths::GuardPaths, settings::Settings};
//! use budget_guard::models::BudgetPeriod;
//! use budget_guard::services::{BudgetService, SavingsGuard};
//! use budget_guard::storage::Storage;
//!
//! let paths = GuardPaths::new()?;
//! let settings = Settings::load_or_create(&paths)?;
//! let mut storage = Storage::new(paths)?;
//! storage.load_all()?;
//!
//! let fallback = settings.fallback_profile();
//! let snapshot = BudgetService::new(&storage).snapshot(fallback.as_ref(), &BudgetPeriod::current())?;
//! let mut guard = SavingsGuard::new();
//! let outcome = guard.propose(draft, &snapshot.state, &storage)?;
//! ```

pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod logging;
pub mod models;
pub mod services;
pub mod storage;

pub use error::{GuardError, GuardResult};
