//! Account ledger over the `bank` table
//!
//! Every statement binds its inputs as parameters.

use std::cell::Cell;

use rusqlite::{params, Connection, OptionalExtension};
use tracing::{debug, info};

use crate::error::{BankError, BankResult};
use crate::models::{Account, AccountNumber, Money, NewAccount};

/// Repository for customer accounts
pub struct AccountRepository<'a> {
    conn: &'a Connection,
    next_account_number: &'a Cell<Option<AccountNumber>>,
}

impl<'a> AccountRepository<'a> {
    pub(crate) fn new(conn: &'a Connection, next_account_number: &'a Cell<Option<AccountNumber>>) -> Self {
        Self {
            conn,
            next_account_number,
        }
    }

    /// Insert a row under the session's current counter value, then advance it
    ///
    /// The counter only moves once the insert has succeeded.
    pub fn create(&self, account: NewAccount) -> BankResult<Account> {
        let number = self
            .next_account_number
            .get()
            .ok_or_else(|| BankError::Storage("no account numbers left".into()))?;
        self.conn.execute(
            "INSERT INTO bank (account_number, name, age, address, balance, account_type, mobile_number)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                number,
                account.name,
                account.age,
                account.address,
                account.balance,
                account.account_type,
                account.mobile_number,
            ],
        )?;
        self.next_account_number.set(number.next());

        info!(account_number = %number, "account created");
        Ok(account.into_account(number))
    }

    /// Check if an account exists
    pub fn exists(&self, number: AccountNumber) -> BankResult<bool> {
        let exists = self.conn.query_row(
            "SELECT EXISTS (SELECT 1 FROM bank WHERE account_number = ?1)",
            [number],
            |row| row.get(0),
        )?;
        Ok(exists)
    }

    /// Get the full row for an account
    pub fn get(&self, number: AccountNumber) -> BankResult<Option<Account>> {
        let sql = format!(
            "SELECT {} FROM bank WHERE account_number = ?1",
            Account::COLUMNS
        );
        let account = self
            .conn
            .query_row(&sql, [number], Account::from_row)
            .optional()?;
        Ok(account)
    }

    /// Get the balance of an account, `None` if there is no such account
    pub fn balance(&self, number: AccountNumber) -> BankResult<Option<Money>> {
        let balance = self
            .conn
            .query_row(
                "SELECT balance FROM bank WHERE account_number = ?1",
                [number],
                |row| row.get(0),
            )
            .optional()?;
        Ok(balance)
    }

    /// Overwrite the balance; returns whether a row was updated
    pub fn set_balance(&self, number: AccountNumber, balance: Money) -> BankResult<bool> {
        let changed = self.conn.execute(
            "UPDATE bank SET balance = ?1 WHERE account_number = ?2",
            params![balance, number],
        )?;
        debug!(account_number = %number, changed, "balance set");
        Ok(changed > 0)
    }

    /// Subtract `amount` from the balance and write the result back
    ///
    /// Read-modify-write; the session is the only writer. Returns the new
    /// balance. No floor is applied here.
    pub fn deduct_balance(&self, number: AccountNumber, amount: Money) -> BankResult<Money> {
        let current = self
            .balance(number)?
            .ok_or_else(|| BankError::account_not_found(number))?;
        let updated = current.checked_sub(amount).ok_or_else(|| {
            BankError::Validation(format!("Deducting {} overflows the balance", amount))
        })?;

        self.set_balance(number, updated)?;
        Ok(updated)
    }

    /// Change the account holder's name
    pub fn update_name(&self, number: AccountNumber, name: &str) -> BankResult<bool> {
        let changed = self.conn.execute(
            "UPDATE bank SET name = ?1 WHERE account_number = ?2",
            params![name, number],
        )?;
        Ok(changed > 0)
    }

    /// Change the account holder's age
    pub fn update_age(&self, number: AccountNumber, age: i64) -> BankResult<bool> {
        let changed = self.conn.execute(
            "UPDATE bank SET age = ?1 WHERE account_number = ?2",
            params![age, number],
        )?;
        Ok(changed > 0)
    }

    /// Change the account holder's address
    pub fn update_address(&self, number: AccountNumber, address: &str) -> BankResult<bool> {
        let changed = self.conn.execute(
            "UPDATE bank SET address = ?1 WHERE account_number = ?2",
            params![address, number],
        )?;
        Ok(changed > 0)
    }

    /// Delete an account; its number is never handed out again
    pub fn delete(&self, number: AccountNumber) -> BankResult<bool> {
        let changed = self
            .conn
            .execute("DELETE FROM bank WHERE account_number = ?1", [number])?;
        if changed > 0 {
            info!(account_number = %number, "account deleted");
        }
        Ok(changed > 0)
    }

    /// All accounts in creation order
    pub fn list(&self) -> BankResult<Vec<Account>> {
        let sql = format!(
            "SELECT {} FROM bank ORDER BY account_number",
            Account::COLUMNS
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map([], Account::from_row)?;
        let accounts = rows.collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(accounts)
    }

    /// Sum of every balance; zero for an empty ledger
    pub fn sum_balances(&self) -> BankResult<Money> {
        let total = self.conn.query_row(
            "SELECT COALESCE(SUM(balance), 0) FROM bank",
            [],
            |row| row.get(0),
        )?;
        Ok(total)
    }

    /// Count accounts
    pub fn count(&self) -> BankResult<usize> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM bank", [], |row| row.get(0))?;
        Ok(count as usize)
    }
}
