use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use bank_records::cli::{
    handle_account_command, handle_admin_command, handle_export_command, handle_staff_command,
};
use bank_records::config::{BankPaths, Settings};
use bank_records::storage::{schema, Session};

#[derive(Parser)]
#[command(
    name = "bank",
    version,
    about = "Account, staff and admin records for a small bank branch",
    long_about = "bank keeps customer accounts, staff records and administrator \
                  credentials in a single SQLite file and manages them from the \
                  command line."
)]
struct Cli {
    /// Store file to use instead of the configured one
    #[arg(long, global = true, env = "BANK_RECORDS_DB")]
    db: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Account management commands
    #[command(subcommand)]
    Account(bank_records::cli::AccountCommands),

    /// Staff management commands
    #[command(subcommand)]
    Staff(bank_records::cli::StaffCommands),

    /// Administrator commands
    #[command(subcommand)]
    Admin(bank_records::cli::AdminCommands),

    /// Export the store
    #[command(subcommand)]
    Export(bank_records::cli::ExportCommands),

    /// Create the store and default settings
    Init,

    /// Show current configuration and paths
    Config,
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let paths = BankPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;

    let store = match cli.db {
        Some(path) => path,
        None => {
            paths.ensure_directories()?;
            paths.database_file(&settings.database_file)
        }
    };
    debug!(store = %store.display(), "resolved store path");

    match cli.command {
        Some(Commands::Account(cmd)) => {
            let session = Session::open(&store)?;
            handle_account_command(&session, &settings, cmd)?;
            session.close()?;
        }
        Some(Commands::Staff(cmd)) => {
            let session = Session::open(&store)?;
            handle_staff_command(&session, &settings, cmd)?;
            session.close()?;
        }
        Some(Commands::Admin(cmd)) => {
            let session = Session::open(&store)?;
            handle_admin_command(&session, cmd)?;
            session.close()?;
        }
        Some(Commands::Export(cmd)) => {
            let session = Session::open(&store)?;
            handle_export_command(session, cmd)?;
        }
        Some(Commands::Init) => {
            println!("Initializing bank-records at: {}", paths.base_dir().display());
            let session = Session::open(&store)?;
            let next = session.next_account_number();
            session.close()?;
            settings.save(&paths)?;
            println!("Store ready: {}", store.display());
            println!("Tables: {}", schema::TABLES.join(", "));
            match next {
                Some(next) => println!("Next account number: {}", next),
                None => println!("No account numbers left"),
            }
        }
        Some(Commands::Config) => {
            println!("bank-records Configuration");
            println!("==========================");
            println!("Base directory:   {}", paths.base_dir().display());
            println!("Settings file:    {}", paths.settings_file().display());
            println!("Store file:       {}", store.display());
            println!();
            println!("Settings:");
            println!("  Currency symbol: {}", settings.currency_symbol);
            println!("  Allow overdraft: {}", settings.allow_overdraft);
        }
        None => {
            println!("bank-records - account, staff and admin records");
            println!();
            println!("Run 'bank --help' for usage information.");
        }
    }

    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
