//! Display formatting for terminal output

pub mod account;
pub mod staff;

pub use account::{format_account_details, format_account_list};
pub use staff::{format_staff_details, format_staff_list};
