//! Admin service

use tracing::info;

use crate::error::{BankError, BankResult};
use crate::models::Admin;
use crate::storage::Session;

pub struct AdminService<'a> {
    session: &'a Session,
}

impl<'a> AdminService<'a> {
    pub fn new(session: &'a Session) -> Self {
        Self { session }
    }

    /// Register an administrator; names must be unique
    pub fn provision(&self, name: &str, password: &str) -> BankResult<Admin> {
        let name = name.trim();
        if name.is_empty() || password.is_empty() {
            return Err(BankError::Validation(
                "Admin name and password are required".into(),
            ));
        }

        let admins = self.session.admins();
        if admins.name_exists(name)? {
            return Err(BankError::Duplicate {
                entity_type: "Admin",
                identifier: name.to_string(),
            });
        }

        let admin = Admin::new(name, password);
        admins.create(&admin)?;
        info!(name, "admin provisioned");
        Ok(admin)
    }

    /// Authenticate an administrator
    pub fn login(&self, name: &str, password: &str) -> BankResult<Admin> {
        let name = name.trim();
        self.session
            .admins()
            .authenticate(name, password)?
            .ok_or_else(|| BankError::Authentication(format!("invalid credentials for admin '{}'", name)))
    }
}
