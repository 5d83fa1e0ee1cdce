//! Staff model
//!
//! One row of the `staff` table. The two listing shapes used by the
//! terminal layer are views over the same record.

use rusqlite::Row;
use serde::{Deserialize, Serialize};

use super::money::Money;

/// A staff member as stored (password is plaintext in the store)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaffMember {
    pub name: String,
    #[serde(skip_serializing, default)]
    pub password: String,
    pub salary: Money,
    pub position: String,
}

impl StaffMember {
    pub(crate) const COLUMNS: &'static str = "name, password, salary, position";

    pub fn new(
        name: impl Into<String>,
        password: impl Into<String>,
        salary: Money,
        position: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            password: password.into(),
            salary,
            position: position.into(),
        }
    }

    pub(crate) fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            name: row.get(0)?,
            password: row.get(1)?,
            salary: row.get(2)?,
            position: row.get(3)?,
        })
    }

    /// Listing order: (name, salary, position, password)
    pub fn display_view(&self) -> (&str, Money, &str, &str) {
        (&self.name, self.salary, &self.position, &self.password)
    }

    /// Editing order: (name, password, salary, position)
    pub fn update_view(&self) -> (&str, &str, Money, &str) {
        (&self.name, &self.password, self.salary, &self.position)
    }
}

/// Name and salary of one matching staff row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaffDetail {
    pub name: String,
    pub salary: Money,
}
