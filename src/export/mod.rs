//! Export module for bank-records
//!
//! - SQL: statement-per-line dump of a store file, for snapshot comparison
//! - JSON: full export of an open session
//! - CSV: the account ledger, spreadsheet-compatible

pub mod csv;
pub mod json;
pub mod sql;

pub use self::csv::export_accounts_csv;
pub use json::{export_full_json, FullExport, EXPORT_SCHEMA_VERSION};
pub use sql::{dump_db, write_dump, DEFAULT_DUMP_NAME};
