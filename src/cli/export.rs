//! CLI commands for data export
//!
//! Provides commands for exporting the store in various formats.

use clap::Subcommand;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::error::{BankError, BankResult};
use crate::export::{dump_db, export_accounts_csv, export_full_json};
use crate::storage::Session;

/// Export subcommands
#[derive(Subcommand, Debug)]
pub enum ExportCommands {
    /// Dump the store as SQL statements
    Sql {
        /// Output file path (default: dump.sql)
        output: Option<PathBuf>,
    },

    /// Export every record to JSON
    Json {
        /// Output file path
        output: PathBuf,

        /// Pretty-print JSON output
        #[arg(long)]
        pretty: bool,
    },

    /// Export accounts to CSV
    Csv {
        /// Output file path
        output: PathBuf,
    },
}

/// Handle export commands
///
/// Takes the session by value: the SQL dump reads the store file, so the
/// session is closed first.
pub fn handle_export_command(session: Session, cmd: ExportCommands) -> BankResult<()> {
    match cmd {
        ExportCommands::Sql { output } => {
            let store = session.path().to_path_buf();
            session.close()?;
            let written = dump_db(&store, output.as_deref())?;
            println!("Dumped {} to {}", store.display(), written.display());
        }

        ExportCommands::Json { output, pretty } => {
            let mut writer = create_output(&output)?;
            export_full_json(&session, &mut writer, pretty)?;
            writer.flush()?;
            println!("Exported store to {}", output.display());
            session.close()?;
        }

        ExportCommands::Csv { output } => {
            let writer = create_output(&output)?;
            let count = export_accounts_csv(&session, writer)?;
            println!("Exported {} accounts to {}", count, output.display());
            session.close()?;
        }
    }

    Ok(())
}

fn create_output(path: &Path) -> BankResult<BufWriter<File>> {
    let file = File::create(path).map_err(|e| {
        BankError::Export(format!("Failed to create {}: {}", path.display(), e))
    })?;
    Ok(BufWriter::new(file))
}
