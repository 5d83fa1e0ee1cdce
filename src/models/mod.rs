//! Core data models for bank-records
//!
//! Row types for the three record collections plus the value types
//! (`Money`, `AccountNumber`) they are built from.

pub mod account;
pub mod admin;
pub mod ids;
pub mod money;
pub mod staff;

pub use account::{Account, AccountValidationError, NewAccount};
pub use admin::Admin;
pub use ids::AccountNumber;
pub use money::{Money, MoneyParseError};
pub use staff::{StaffDetail, StaffMember};
