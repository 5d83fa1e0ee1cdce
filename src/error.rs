//! Custom error types for bank-records
//!
//! This module defines the error hierarchy for the application using thiserror
//! for ergonomic error definitions.

use rusqlite::ErrorCode;
use thiserror::Error;

/// The main error type for bank-records operations
#[derive(Error, Debug)]
pub enum BankError {
    /// The backing store file could not be opened or created
    #[error("Cannot open store at {path}: {reason}")]
    Open { path: String, reason: String },

    /// Entity not found errors
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// Store-level rejection (type coercion, NOT NULL, UNIQUE...)
    #[error("Constraint violation: {0}")]
    Constraint(String),

    /// Any other store driver failure
    #[error("Storage error: {0}")]
    Storage(String),

    /// Validation errors for data models
    #[error("Validation error: {0}")]
    Validation(String),

    /// Duplicate entity errors
    #[error("{entity_type} already exists: {identifier}")]
    Duplicate {
        entity_type: &'static str,
        identifier: String,
    },

    /// Insufficient funds
    #[error("Insufficient funds in account {account}: need {needed}, have {available}")]
    InsufficientFunds {
        account: i64,
        needed: i64,
        available: i64,
    },

    /// Credentials did not match
    #[error("Authentication failed: {0}")]
    Authentication(String),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Export errors
    #[error("Export error: {0}")]
    Export(String),
}

impl BankError {
    /// Create a "not found" error for accounts
    pub fn account_not_found(identifier: impl ToString) -> Self {
        Self::NotFound {
            entity_type: "Account",
            identifier: identifier.to_string(),
        }
    }

    /// Create a "not found" error for staff members
    pub fn staff_not_found(identifier: impl ToString) -> Self {
        Self::NotFound {
            entity_type: "Staff member",
            identifier: identifier.to_string(),
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Check if the store rejected the statement
    pub fn is_constraint(&self) -> bool {
        matches!(self, Self::Constraint(_))
    }
}

impl From<rusqlite::Error> for BankError {
    fn from(err: rusqlite::Error) -> Self {
        match err.sqlite_error_code() {
            Some(ErrorCode::ConstraintViolation) | Some(ErrorCode::TypeMismatch) => {
                Self::Constraint(err.to_string())
            }
            _ => Self::Storage(err.to_string()),
        }
    }
}

impl From<std::io::Error> for BankError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for BankError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

impl From<csv::Error> for BankError {
    fn from(err: csv::Error) -> Self {
        Self::Export(err.to_string())
    }
}

/// Result type alias for bank-records operations
pub type BankResult<T> = Result<T, BankError>;
