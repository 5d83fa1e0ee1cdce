//! bank-records - Persistent records for a small bank branch
//!
//! This library keeps customer accounts, staff, and administrator credentials
//! in a single SQLite file and exposes the record operations a front end
//! needs: opening accounts, moving money, staff maintenance, and login checks.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Core data models (accounts, staff, admins, money)
//! - `storage`: SQLite session and per-table repositories
//! - `services`: Business logic layer
//! - `export`: SQL dump, JSON, and CSV export
//! - `display`: Terminal formatting
//! - `cli`: Command handlers for the `bank` binary
//!
//! # Example
//!
//! ```rust,ignore
//! use bank_records::storage::Session;
//! use bank_records::models::{Money, NewAccount};
//!
//! let session = Session::open("bank.db")?;
//! let account = session.accounts().create(NewAccount::new(
//!     "Ada", 36, "1 Main St", Money::from_cents(10_000), "savings", 5550100,
//! ))?;
//! session.close()?;
//! ```

pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod models;
pub mod services;
pub mod storage;

pub use error::{BankError, BankResult};
