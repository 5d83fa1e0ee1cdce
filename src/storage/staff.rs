//! Staff directory over the `staff` table
//!
//! Rows are matched by exact name. The table carries no uniqueness
//! constraint, so updates touch every row with the old name.

use rusqlite::{params, Connection, ToSql};
use tracing::{debug, warn};

use crate::error::BankResult;
use crate::models::{Money, StaffDetail, StaffMember};

/// Repository for staff records
pub struct StaffRepository<'a> {
    conn: &'a Connection,
}

impl<'a> StaffRepository<'a> {
    pub(crate) fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Insert a staff row
    pub fn create(&self, member: &StaffMember) -> BankResult<()> {
        self.conn.execute(
            "INSERT INTO staff (name, password, salary, position) VALUES (?1, ?2, ?3, ?4)",
            params![member.name, member.password, member.salary, member.position],
        )?;
        debug!(name = %member.name, "staff member created");
        Ok(())
    }

    /// Check if any row carries exactly this name
    pub fn name_exists(&self, name: &str) -> BankResult<bool> {
        let exists = self.conn.query_row(
            "SELECT EXISTS (SELECT 1 FROM staff WHERE name = ?1)",
            [name],
            |row| row.get(0),
        )?;
        Ok(exists)
    }

    /// True if a row matches both name and password exactly
    pub fn check_credentials(&self, name: &str, password: &str) -> BankResult<bool> {
        let matched: bool = self.conn.query_row(
            "SELECT EXISTS (SELECT 1 FROM staff WHERE name = ?1 AND password = ?2)",
            [name, password],
            |row| row.get(0),
        )?;
        if !matched {
            warn!(name, "staff credential check failed");
        }
        Ok(matched)
    }

    /// All staff rows in insertion order
    ///
    /// Use [`StaffMember::display_view`] or [`StaffMember::update_view`] for
    /// the two listing shapes.
    pub fn list(&self) -> BankResult<Vec<StaffMember>> {
        let sql = format!("SELECT {} FROM staff ORDER BY rowid", StaffMember::COLUMNS);
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map([], StaffMember::from_row)?;
        let members = rows.collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(members)
    }

    /// Rename every row called `old_name`; returns the number of rows changed
    pub fn update_name(&self, old_name: &str, new_name: &str) -> BankResult<usize> {
        self.update_column("name", old_name, &new_name)
    }

    pub fn update_password(&self, old_name: &str, password: &str) -> BankResult<usize> {
        self.update_column("password", old_name, &password)
    }

    pub fn update_salary(&self, old_name: &str, salary: Money) -> BankResult<usize> {
        self.update_column("salary", old_name, &salary)
    }

    pub fn update_position(&self, old_name: &str, position: &str) -> BankResult<usize> {
        self.update_column("position", old_name, &position)
    }

    // `column` is always one of the literals above, never caller input
    fn update_column(&self, column: &str, old_name: &str, value: &dyn ToSql) -> BankResult<usize> {
        let sql = format!("UPDATE staff SET {} = ?1 WHERE name = ?2", column);
        let changed = self.conn.execute(&sql, params![value, old_name])?;
        if changed > 1 {
            warn!(name = old_name, changed, column, "update matched several staff rows");
        }
        Ok(changed)
    }

    /// Name and salary of every row with this name
    pub fn get_detail(&self, name: &str) -> BankResult<Vec<StaffDetail>> {
        let mut stmt = self
            .conn
            .prepare("SELECT name, salary FROM staff WHERE name = ?1 ORDER BY rowid")?;
        let rows = stmt.query_map([name], |row| {
            Ok(StaffDetail {
                name: row.get(0)?,
                salary: row.get(1)?,
            })
        })?;
        let details = rows.collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(details)
    }

    /// Count staff rows
    pub fn count(&self) -> BankResult<usize> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM staff", [], |row| row.get(0))?;
        Ok(count as usize)
    }
}
