//! Service layer for bank-records
//!
//! The service layer provides business rules on top of the storage layer:
//! validation, relative balance changes, uniqueness of staff and admin
//! names, and authentication outcomes as errors.

pub mod account;
pub mod admin;
pub mod staff;

pub use account::{AccountChanges, AccountService};
pub use admin::AdminService;
pub use staff::{StaffChanges, StaffService};
