//! Storage layer for bank-records
//!
//! A [`Session`] owns the single connection to one SQLite store file plus the
//! in-memory account-number counter. Repositories borrow the session and
//! issue parameterized statements only.

pub mod accounts;
pub mod admins;
pub mod schema;
pub mod staff;

pub use accounts::AccountRepository;
pub use admins::AdminRepository;
pub use schema::{ensure_schema, table_names, TABLES};
pub use staff::StaffRepository;

use std::cell::Cell;
use std::path::{Path, PathBuf};

use rusqlite::Connection;
use tracing::{debug, info};

use crate::error::{BankError, BankResult};
use crate::models::AccountNumber;

/// Live connection to one store file
pub struct Session {
    path: PathBuf,
    conn: Connection,
    /// `None` once the key space is used up
    next_account_number: Cell<Option<AccountNumber>>,
}

impl Session {
    /// Open the store at `path`, creating an empty one if the file is absent
    ///
    /// Ensures the `bank`, `staff` and `admin` tables exist and derives the
    /// next account number from what is already stored.
    ///
    /// # Errors
    ///
    /// Returns [`BankError::Open`] if the containing directory is missing or
    /// not writable, the file is not a SQLite database, or an untyped table
    /// holds values the STRICT layout cannot take.
    pub fn open(path: impl AsRef<Path>) -> BankResult<Self> {
        let path = path.as_ref().to_path_buf();
        let open_error = |e: rusqlite::Error| BankError::Open {
            path: path.display().to_string(),
            reason: e.to_string(),
        };

        let conn = Connection::open(&path).map_err(open_error)?;
        ensure_schema(&conn).map_err(|e| BankError::Open {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;

        let session = Self::from_connection(path.clone(), conn)?;
        info!(
            path = %path.display(),
            next_account_number = ?session.next_account_number(),
            "store session opened"
        );
        Ok(session)
    }

    /// Open a private in-memory store (useful for testing)
    pub fn open_in_memory() -> BankResult<Self> {
        let conn = Connection::open_in_memory()?;
        ensure_schema(&conn)?;
        Self::from_connection(PathBuf::from(":memory:"), conn)
    }

    fn from_connection(path: PathBuf, conn: Connection) -> BankResult<Self> {
        let next = derive_next_account_number(&conn)?;
        Ok(Self {
            path,
            conn,
            next_account_number: Cell::new(next),
        })
    }

    /// Close this session and open another store in its place
    pub fn switch_to(self, path: impl AsRef<Path>) -> BankResult<Self> {
        self.close()?;
        Self::open(path)
    }

    /// Release the connection
    ///
    /// Must happen before the backing file is copied, moved or deleted.
    pub fn close(self) -> BankResult<()> {
        let path = self.path;
        self.conn.close().map_err(|(_, e)| BankError::from(e))?;
        info!(path = %path.display(), "store session closed");
        Ok(())
    }

    /// Path of the backing store file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The number the next created account will receive, `None` when no
    /// number above the highest stored key is left
    pub fn next_account_number(&self) -> Option<AccountNumber> {
        self.next_account_number.get()
    }

    /// Run `f` in one transaction; if it fails, none of its writes are kept
    pub fn transaction<T>(&self, f: impl FnOnce(&Self) -> BankResult<T>) -> BankResult<T> {
        let tx = self.conn.unchecked_transaction()?;
        let value = f(self)?;
        tx.commit()?;
        Ok(value)
    }

    pub fn accounts(&self) -> AccountRepository<'_> {
        AccountRepository::new(&self.conn, &self.next_account_number)
    }

    pub fn staff(&self) -> StaffRepository<'_> {
        StaffRepository::new(&self.conn)
    }

    pub fn admins(&self) -> AdminRepository<'_> {
        AdminRepository::new(&self.conn)
    }

    #[cfg(test)]
    pub(crate) fn connection(&self) -> &Connection {
        &self.conn
    }
}

/// One past the highest account number the store has ever handed out
///
/// Takes the larger of the current maximum key and the AUTOINCREMENT
/// high-water mark, so a deleted newest account is not reissued after reopen.
fn derive_next_account_number(conn: &Connection) -> BankResult<Option<AccountNumber>> {
    let max_key: Option<i64> =
        conn.query_row("SELECT MAX(account_number) FROM bank", [], |row| row.get(0))?;

    let high_water = schema::sequence_value(conn, "bank")?;

    let next = match max_key.max(high_water) {
        Some(highest) => AccountNumber::new(highest).next(),
        None => Some(AccountNumber::FIRST),
    };
    debug!(?max_key, ?high_water, ?next, "derived next account number");
    Ok(next)
}
