//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod account;
pub mod admin;
pub mod export;
pub mod staff;

pub use account::{handle_account_command, AccountCommands};
pub use admin::{handle_admin_command, AdminCommands};
pub use export::{handle_export_command, ExportCommands};
pub use staff::{handle_staff_command, StaffCommands};

use crate::error::{BankError, BankResult};
use crate::models::Money;

/// Parse a user-entered amount such as "1000" or "12.50"
pub(crate) fn parse_amount(input: &str) -> BankResult<Money> {
    Money::parse(input).map_err(|e| {
        BankError::Validation(format!(
            "Invalid amount: '{}'. Use format like '1000.00' or '1000'. Error: {}",
            input, e
        ))
    })
}

/// Use the given password, or prompt for one without echo
pub(crate) fn password_or_prompt(password: Option<String>, prompt: &str) -> BankResult<String> {
    match password {
        Some(password) => Ok(password),
        None => Ok(rpassword::prompt_password(prompt)?),
    }
}
