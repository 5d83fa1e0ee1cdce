//! Admin CLI commands

use clap::Subcommand;

use super::password_or_prompt;
use crate::error::BankResult;
use crate::services::AdminService;
use crate::storage::Session;

/// Admin subcommands
#[derive(Subcommand)]
pub enum AdminCommands {
    /// Register an administrator
    Add {
        /// Admin name
        name: String,
        /// Password (prompted when omitted)
        #[arg(long)]
        password: Option<String>,
    },
    /// Check administrator credentials
    Login {
        /// Admin name
        name: String,
        /// Password (prompted when omitted)
        #[arg(long)]
        password: Option<String>,
    },
}

/// Handle an admin command
pub fn handle_admin_command(session: &Session, cmd: AdminCommands) -> BankResult<()> {
    let service = AdminService::new(session);

    match cmd {
        AdminCommands::Add { name, password } => {
            let password = password_or_prompt(password, "Admin password: ")?;
            let admin = service.provision(&name, &password)?;
            println!("Registered admin {}", admin.name);
        }
        AdminCommands::Login { name, password } => {
            let password = password_or_prompt(password, "Admin password: ")?;
            let admin = service.login(&name, &password)?;
            println!("Welcome, {}", admin.name);
        }
    }

    Ok(())
}
