//! Store schema
//!
//! Idempotent DDL run on every session open. `bank.account_number` is an
//! AUTOINCREMENT key so SQLite keeps the high-water mark in
//! `sqlite_sequence` even after the newest row is deleted.
//!
//! Tables are STRICT and hold money as integer cents. Stores written with
//! the older untyped tables keep balances and salaries in whole units; they
//! are rebuilt in place the first time they are opened.

use rusqlite::{Connection, OptionalExtension};
use tracing::info;

use crate::error::{BankError, BankResult};

/// Names of the record collections guaranteed after initialization
pub const TABLES: [&str; 3] = ["bank", "staff", "admin"];

struct TableDef {
    name: &'static str,
    columns: &'static str,
    /// Target columns when copying rows out of an untyped table
    copy_into: &'static str,
    /// Source expressions matching `copy_into`
    copy_from: &'static str,
    money_column: Option<&'static str>,
}

const DEFINITIONS: [TableDef; 3] = [
    TableDef {
        name: "bank",
        columns: "(
    account_number INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    age INTEGER NOT NULL,
    address TEXT NOT NULL,
    balance INTEGER NOT NULL,
    account_type TEXT NOT NULL,
    mobile_number INTEGER NOT NULL
) STRICT",
        copy_into: "account_number, name, age, address, balance, account_type, mobile_number",
        copy_from: "account_number, name, age, address, CAST(ROUND(balance * 100) AS INTEGER), \
                    account_type, mobile_number",
        money_column: Some("balance"),
    },
    TableDef {
        name: "staff",
        columns: "(
    name TEXT NOT NULL,
    password TEXT NOT NULL,
    salary INTEGER NOT NULL,
    position TEXT NOT NULL
) STRICT",
        copy_into: "rowid, name, password, salary, position",
        copy_from: "rowid, name, password, CAST(ROUND(salary * 100) AS INTEGER), position",
        money_column: Some("salary"),
    },
    TableDef {
        name: "admin",
        columns: "(
    name TEXT NOT NULL,
    password TEXT NOT NULL
) STRICT",
        copy_into: "rowid, name, password",
        copy_from: "rowid, name, password",
        money_column: None,
    },
];

/// Create the three collections if they are missing and rebuild any that
/// predate the STRICT layout
///
/// # Errors
///
/// Fails without changing the store if an untyped table holds a
/// non-numeric amount or a value its STRICT column cannot take.
pub fn ensure_schema(conn: &Connection) -> BankResult<()> {
    for table in &DEFINITIONS {
        match is_strict(conn, table.name)? {
            None => {
                conn.execute_batch(&format!(
                    "CREATE TABLE IF NOT EXISTS {} {};",
                    table.name, table.columns
                ))?;
            }
            Some(false) => migrate_untyped(conn, table)?,
            Some(true) => {}
        }
    }
    Ok(())
}

/// `None` when the table does not exist
fn is_strict(conn: &Connection, table: &str) -> BankResult<Option<bool>> {
    let strict = conn
        .query_row(
            "SELECT strict FROM pragma_table_list WHERE schema = 'main' AND name = ?1",
            [table],
            |row| row.get(0),
        )
        .optional()?;
    Ok(strict)
}

fn migrate_untyped(conn: &Connection, table: &TableDef) -> BankResult<()> {
    let tx = conn.unchecked_transaction()?;

    if let Some(column) = table.money_column {
        let non_numeric: i64 = tx.query_row(
            &format!(
                "SELECT COUNT(*) FROM {} WHERE typeof({}) NOT IN ('integer', 'real')",
                table.name, column
            ),
            [],
            |row| row.get(0),
        )?;
        if non_numeric > 0 {
            return Err(BankError::Constraint(format!(
                "{}.{} holds {} non-numeric value(s)",
                table.name, column, non_numeric
            )));
        }
    }

    let high_water = sequence_value(&tx, table.name)?;
    let staging = format!("{}_strict", table.name);
    tx.execute_batch(&format!(
        "CREATE TABLE {staging} {columns};
         INSERT INTO {staging} ({into}) SELECT {from} FROM {name} ORDER BY rowid;
         DROP TABLE {name};
         ALTER TABLE {staging} RENAME TO {name};",
        staging = staging,
        columns = table.columns,
        into = table.copy_into,
        from = table.copy_from,
        name = table.name,
    ))?;

    // Dropping the old table took its sqlite_sequence row with it
    if let Some(seq) = high_water {
        let raised = tx.execute(
            "UPDATE sqlite_sequence SET seq = MAX(seq, ?1) WHERE name = ?2",
            rusqlite::params![seq, table.name],
        )?;
        if raised == 0 {
            tx.execute(
                "INSERT INTO sqlite_sequence (name, seq) VALUES (?1, ?2)",
                rusqlite::params![table.name, seq],
            )?;
        }
    }

    tx.commit()?;
    info!(table = table.name, "rebuilt untyped table as STRICT");
    Ok(())
}

/// AUTOINCREMENT high-water mark of `table`, if SQLite has recorded one
pub(crate) fn sequence_value(conn: &Connection, table: &str) -> BankResult<Option<i64>> {
    let has_sequence: bool = conn.query_row(
        "SELECT EXISTS (SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = 'sqlite_sequence')",
        [],
        |row| row.get(0),
    )?;
    if !has_sequence {
        return Ok(None);
    }
    let seq = conn
        .query_row(
            "SELECT seq FROM sqlite_sequence WHERE name = ?1",
            [table],
            |row| row.get(0),
        )
        .optional()?;
    Ok(seq)
}

/// User tables present in the store, sorted by name
pub fn table_names(conn: &Connection) -> rusqlite::Result<Vec<String>> {
    let mut stmt = conn.prepare(
        "SELECT name FROM sqlite_master
         WHERE type = 'table' AND name NOT LIKE 'sqlite_%'
         ORDER BY name",
    )?;
    let names = stmt.query_map([], |row| row.get(0))?;
    names.collect()
}
