//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod budget;
pub mod profile;
pub mod transaction;

pub use budget::{current_snapshot, handle_status_command};
pub use profile::{handle_profile_command, ProfileCommands};
pub use transaction::{
    handle_add_command, handle_delete_command, handle_edit_command, handle_list_command,
    handle_show_command, AddArgs, EditArgs, ListArgs,
};
