//! JSON Export functionality
//!
//! Exports the records of a session as one JSON document. Passwords are
//! never written.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::io::Write;

use crate::error::{BankError, BankResult};
use crate::models::{Account, Money, StaffMember};
use crate::storage::Session;

/// Current export schema version
pub const EXPORT_SCHEMA_VERSION: &str = "1.0.0";

/// Full store export structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FullExport {
    pub schema_version: String,
    pub exported_at: DateTime<Utc>,
    pub app_version: String,
    pub accounts: Vec<Account>,
    pub staff: Vec<StaffMember>,
    /// Administrator names only
    pub admins: Vec<String>,
    pub metadata: ExportMetadata,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportMetadata {
    pub account_count: usize,
    pub staff_count: usize,
    pub admin_count: usize,
    pub total_balance: Money,
    /// Number the next created account would receive
    pub next_account_number: Option<i64>,
}

impl FullExport {
    /// Snapshot every collection of the session
    pub fn from_session(session: &Session) -> BankResult<Self> {
        let accounts = session.accounts().list()?;
        let staff = session.staff().list()?;
        let admins = session.admins().names()?;

        let metadata = ExportMetadata {
            account_count: accounts.len(),
            staff_count: staff.len(),
            admin_count: admins.len(),
            total_balance: session.accounts().sum_balances()?,
            next_account_number: session.next_account_number().map(|n| n.get()),
        };

        Ok(Self {
            schema_version: EXPORT_SCHEMA_VERSION.to_string(),
            exported_at: Utc::now(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            accounts,
            staff,
            admins,
            metadata,
        })
    }
}

/// Export the session to JSON
pub fn export_full_json<W: Write>(session: &Session, writer: &mut W, pretty: bool) -> BankResult<()> {
    let export = FullExport::from_session(session)?;

    if pretty {
        serde_json::to_writer_pretty(writer, &export)
    } else {
        serde_json::to_writer(writer, &export)
    }
    .map_err(|e| BankError::Export(e.to_string()))?;

    Ok(())
}
