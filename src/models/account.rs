//! Customer account model
//!
//! One row of the `bank` table.

use rusqlite::Row;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::AccountNumber;
use super::money::Money;

/// A customer account as stored
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub account_number: AccountNumber,
    pub name: String,
    pub age: i64,
    pub address: String,
    pub balance: Money,
    /// Free text such as "savings" or "current"
    pub account_type: String,
    pub mobile_number: i64,
}

impl Account {
    /// Column list matching [`Account::from_row`]
    pub(crate) const COLUMNS: &'static str =
        "account_number, name, age, address, balance, account_type, mobile_number";

    pub(crate) fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            account_number: row.get(0)?,
            name: row.get(1)?,
            age: row.get(2)?,
            address: row.get(3)?,
            balance: row.get(4)?,
            account_type: row.get(5)?,
            mobile_number: row.get(6)?,
        })
    }
}

impl fmt::Display for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{} {} ({})", self.account_number, self.name, self.account_type)
    }
}

/// Input for opening an account; the number is assigned by the store session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAccount {
    pub name: String,
    pub age: i64,
    pub address: String,
    pub balance: Money,
    pub account_type: String,
    pub mobile_number: i64,
}

impl NewAccount {
    pub fn new(
        name: impl Into<String>,
        age: i64,
        address: impl Into<String>,
        balance: Money,
        account_type: impl Into<String>,
        mobile_number: i64,
    ) -> Self {
        Self {
            name: name.into(),
            age,
            address: address.into(),
            balance,
            account_type: account_type.into(),
            mobile_number,
        }
    }

    /// Attach the assigned number, producing the stored row
    pub fn into_account(self, account_number: AccountNumber) -> Account {
        Account {
            account_number,
            name: self.name,
            age: self.age,
            address: self.address,
            balance: self.balance,
            account_type: self.account_type,
            mobile_number: self.mobile_number,
        }
    }

    /// Validate the input
    pub fn validate(&self) -> Result<(), AccountValidationError> {
        if self.name.trim().is_empty() {
            return Err(AccountValidationError::EmptyName);
        }
        if self.name.len() > 100 {
            return Err(AccountValidationError::NameTooLong(self.name.len()));
        }
        validate_age(self.age)?;
        if self.balance.is_negative() {
            return Err(AccountValidationError::NegativeOpeningBalance);
        }
        if self.mobile_number < 0 {
            return Err(AccountValidationError::InvalidMobileNumber(self.mobile_number));
        }
        Ok(())
    }
}

/// Ages outside 0..=150 are rejected
pub fn validate_age(age: i64) -> Result<(), AccountValidationError> {
    if (0..=150).contains(&age) {
        Ok(())
    } else {
        Err(AccountValidationError::InvalidAge(age))
    }
}

/// Validation errors for accounts
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AccountValidationError {
    #[error("Account holder name cannot be empty")]
    EmptyName,
    #[error("Account holder name too long ({0} chars, max 100)")]
    NameTooLong(usize),
    #[error("Invalid age: {0}")]
    InvalidAge(i64),
    #[error("Opening balance cannot be negative")]
    NegativeOpeningBalance,
    #[error("Invalid mobile number: {0}")]
    InvalidMobileNumber(i64),
}
