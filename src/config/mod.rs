//! Configuration module for the budget guard
//!
//! This module provides configuration management including:
//! - XDG-compliant path resolution
//! - User settings persistence

pub mod paths;
pub mod settings;

pub use paths::GuardPaths;
pub use settings::Settings;
