//! Staff CLI commands

use clap::Subcommand;

use super::{parse_amount, password_or_prompt};
use crate::config::Settings;
use crate::display::staff::{format_staff_details, format_staff_list};
use crate::error::BankResult;
use crate::services::{StaffChanges, StaffService};
use crate::storage::Session;

/// Staff subcommands
#[derive(Subcommand)]
pub enum StaffCommands {
    /// Hire a staff member
    Add {
        /// Staff name
        name: String,
        /// Monthly salary
        #[arg(short, long)]
        salary: String,
        /// Job position
        #[arg(short, long)]
        position: String,
        /// Login password (prompted when omitted)
        #[arg(long)]
        password: Option<String>,
    },
    /// Check staff credentials
    Login {
        /// Staff name
        name: String,
        /// Login password (prompted when omitted)
        #[arg(long)]
        password: Option<String>,
    },
    /// List all staff
    List {
        /// Show stored passwords
        #[arg(long)]
        show_passwords: bool,
    },
    /// Edit a staff member
    Edit {
        /// Current staff name
        name: String,
        /// New name
        #[arg(long)]
        new_name: Option<String>,
        /// New password
        #[arg(long)]
        password: Option<String>,
        /// New salary
        #[arg(short, long)]
        salary: Option<String>,
        /// New position
        #[arg(short, long)]
        position: Option<String>,
    },
    /// Show a staff member's salary
    Detail {
        /// Staff name
        name: String,
    },
}

/// Handle a staff command
pub fn handle_staff_command(
    session: &Session,
    settings: &Settings,
    cmd: StaffCommands,
) -> BankResult<()> {
    let service = StaffService::new(session);
    let currency = settings.currency_symbol.as_str();

    match cmd {
        StaffCommands::Add {
            name,
            salary,
            position,
            password,
        } => {
            let salary = parse_amount(&salary)?;
            let password = password_or_prompt(password, "Password: ")?;
            let member = service.hire(&name, &password, salary, &position)?;
            println!("Hired {} as {}", member.name, member.position);
        }

        StaffCommands::Login { name, password } => {
            let password = password_or_prompt(password, "Password: ")?;
            service.login(&name, &password)?;
            println!("Welcome, {}", name);
        }

        StaffCommands::List { show_passwords } => {
            let members = service.list()?;
            println!(
                "{}",
                format_staff_list(&members, currency, show_passwords).trim_end()
            );
        }

        StaffCommands::Edit {
            name,
            new_name,
            password,
            salary,
            position,
        } => {
            let changes = StaffChanges {
                new_name,
                password,
                salary: salary.as_deref().map(parse_amount).transpose()?,
                position,
            };
            if changes.is_empty() {
                println!("No changes specified. Use --new-name, --password, --salary or --position.");
                return Ok(());
            }

            service.edit(&name, &changes)?;
            let current = changes.new_name.as_deref().unwrap_or(&name);
            println!("Updated staff member {}", current.trim());
        }

        StaffCommands::Detail { name } => {
            let detail = service.salary_of(&name)?;
            print!("{}", format_staff_details(&[detail], currency));
        }
    }

    Ok(())
}
