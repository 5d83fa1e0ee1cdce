//! Admin gate over the `admin` table

use rusqlite::{params, Connection, OptionalExtension};
use tracing::{debug, warn};

use crate::error::BankResult;
use crate::models::Admin;

/// Repository for administrator credentials
pub struct AdminRepository<'a> {
    conn: &'a Connection,
}

impl<'a> AdminRepository<'a> {
    pub(crate) fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Insert an administrator row
    pub fn create(&self, admin: &Admin) -> BankResult<()> {
        self.conn.execute(
            "INSERT INTO admin (name, password) VALUES (?1, ?2)",
            params![admin.name, admin.password],
        )?;
        debug!(name = %admin.name, "admin created");
        Ok(())
    }

    /// The matching administrator, or `None` when name and password do not
    /// both match a row
    pub fn authenticate(&self, name: &str, password: &str) -> BankResult<Option<Admin>> {
        let admin = self
            .conn
            .query_row(
                "SELECT name, password FROM admin WHERE name = ?1 AND password = ?2 LIMIT 1",
                [name, password],
                |row| {
                    Ok(Admin {
                        name: row.get(0)?,
                        password: row.get(1)?,
                    })
                },
            )
            .optional()?;
        if admin.is_none() {
            warn!(name, "admin credential check failed");
        }
        Ok(admin)
    }

    /// True only on an exact name and password match
    pub fn check(&self, name: &str, password: &str) -> BankResult<bool> {
        Ok(self.authenticate(name, password)?.is_some())
    }

    pub fn name_exists(&self, name: &str) -> BankResult<bool> {
        let exists = self.conn.query_row(
            "SELECT EXISTS (SELECT 1 FROM admin WHERE name = ?1)",
            [name],
            |row| row.get(0),
        )?;
        Ok(exists)
    }

    /// Administrator names in insertion order
    pub fn names(&self) -> BankResult<Vec<String>> {
        let mut stmt = self.conn.prepare("SELECT name FROM admin ORDER BY rowid")?;
        let names = stmt.query_map([], |row| row.get(0))?;
        let names = names.collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(names)
    }

    pub fn count(&self) -> BankResult<usize> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM admin", [], |row| row.get(0))?;
        Ok(count as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::Session;

    #[test]
    fn test_check_admin() {
        let session = Session::open_in_memory().unwrap();
        session
            .admins()
            .create(&Admin::new("admin", "password"))
            .unwrap();
        let admins = session.admins();

        assert!(admins.check("admin", "password").unwrap());
        assert!(!admins.check("admin", "wrong").unwrap());
        assert!(!admins.check("nope", "password").unwrap());
    }

    #[test]
    fn test_authenticate_returns_absent_on_mismatch() {
        let session = Session::open_in_memory().unwrap();
        let admins = session.admins();
        admins.create(&Admin::new("admin", "password")).unwrap();

        assert_eq!(
            admins.authenticate("admin", "password").unwrap(),
            Some(Admin::new("admin", "password"))
        );
        assert_eq!(admins.authenticate("admin", "wrong").unwrap(), None);
        assert_eq!(admins.authenticate("' OR 1=1 --", "").unwrap(), None);
    }

    #[test]
    fn test_names_in_insertion_order() {
        let session = Session::open_in_memory().unwrap();
        let admins = session.admins();
        admins.create(&Admin::new("root", "a")).unwrap();
        admins.create(&Admin::new("ops", "b")).unwrap();

        assert_eq!(admins.names().unwrap(), vec!["root", "ops"]);
        assert_eq!(admins.count().unwrap(), 2);
    }

    #[test]
    fn test_empty_table() {
        let session = Session::open_in_memory().unwrap();
        assert_eq!(session.admins().count().unwrap(), 0);
        assert!(!session.admins().name_exists("admin").unwrap());
        assert!(!session.admins().check("admin", "password").unwrap());
    }
}
