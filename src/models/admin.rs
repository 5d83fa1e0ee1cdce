//! Administrator credentials

use serde::{Deserialize, Serialize};

/// One row of the `admin` table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Admin {
    pub name: String,
    #[serde(skip_serializing, default)]
    pub password: String,
}

impl Admin {
    pub fn new(name: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            password: password.into(),
        }
    }
}
