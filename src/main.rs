use std::io;

use anyhow::Result;
use clap::{Parser, Subcommand};

use budget_guard::cli::{
    handle_add_command, handle_delete_command, handle_edit_command, handle_list_command,
    handle_profile_command, handle_show_command, handle_status_command, AddArgs, EditArgs,
    ListArgs, ProfileCommands,
};
use budget_guard::config::{paths::GuardPaths, settings::Settings};
use budget_guard::logging::init_tracing;
use budget_guard::storage::Storage;

#[derive(Parser)]
#[command(
    name = "guard",
    version,
    about = "Monthly budget tracker that protects your savings goal",
    long_about = "Budget Guard tracks this month's spending against your income and \
                  savings goal, and asks before any expense that would eat into \
                  your savings."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show this month's budget
    Status,

    /// Add a transaction, checking it against your savings goal
    Add(AddArgs),

    /// List transactions
    #[command(alias = "ls")]
    List(ListArgs),

    /// Show a transaction in detail
    Show {
        /// Transaction ID (or unique prefix)
        id: String,
    },

    /// Edit a transaction
    Edit(EditArgs),

    /// Permanently delete a transaction
    #[command(alias = "rm")]
    Delete {
        /// Transaction ID (or unique prefix)
        id: String,
    },

    /// Profile commands (income and savings goal)
    #[command(subcommand)]
    Profile(ProfileCommands),

    /// Initialize the data directory
    Init,

    /// Show current configuration and paths
    Config,
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    // Initialize paths and settings
    let paths = GuardPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;

    // Initialize storage
    let mut storage = Storage::new(paths.clone())?;
    storage.load_all()?;

    match cli.command {
        Some(Commands::Status) => handle_status_command(&storage, &settings)?,
        Some(Commands::Add(args)) => {
            let stdin = io::stdin();
            handle_add_command(&storage, &settings, args, &mut stdin.lock())?;
        }
        Some(Commands::List(args)) => handle_list_command(&storage, &settings, args)?,
        Some(Commands::Show { id }) => handle_show_command(&storage, &settings, &id)?,
        Some(Commands::Edit(args)) => handle_edit_command(&storage, &settings, args)?,
        Some(Commands::Delete { id }) => handle_delete_command(&storage, &settings, &id)?,
        Some(Commands::Profile(cmd)) => handle_profile_command(&storage, &settings, cmd)?,
        Some(Commands::Init) => {
            println!("Initializing Budget Guard at: {}", paths.base_dir().display());
            settings.save(&paths)?;
            storage.save_all()?;
            println!("Initialization complete!");
            println!();
            println!("Next, set your monthly income and savings goal:");
            println!("  guard profile set --income 50000 --goal 10000");
        }
        Some(Commands::Config) => {
            println!("Budget Guard Configuration");
            println!("==========================");
            println!("Config directory: {}", paths.base_dir().display());
            println!("Data directory:   {}", paths.data_dir().display());
            println!("Settings file:    {}", paths.settings_file().display());
            println!();
            println!("Settings:");
            println!("  Currency symbol:   {}", settings.currency_symbol);
            println!("  Date format:       {}", settings.date_format);
            println!(
                "  Fallback profile:  {}",
                if settings.use_fallback_profile {
                    format!(
                        "enabled (income {})",
                        settings
                            .fallback_monthly_income
                            .format_with_symbol(&settings.currency_symbol)
                    )
                } else {
                    "disabled".to_string()
                }
            );
        }
        None => {
            println!("Budget Guard - monthly budget with a savings guard");
            println!();
            println!("Run 'guard --help' for usage information.");
            println!("Run 'guard status' to see this month's budget.");
        }
    }

    Ok(())
}
