//! SQL text dump of a store file
//!
//! Produces one statement per line (schema, then rows, then indexes),
//! wrapped in a transaction. Stores with equal content dump to identical
//! bytes, which is what snapshot comparisons in tests rely on.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use rusqlite::{Connection, OpenFlags};
use tracing::info;

use crate::error::{BankError, BankResult};

/// File name used when no output path is given
pub const DEFAULT_DUMP_NAME: &str = "dump.sql";

/// Dump the store at `store` into `output` (default [`DEFAULT_DUMP_NAME`])
///
/// The store is opened read-only and must already exist; the session that
/// writes to it should be closed first.
pub fn dump_db(store: &Path, output: Option<&Path>) -> BankResult<PathBuf> {
    if !store.exists() {
        return Err(BankError::Export(format!(
            "No such file: {}",
            store.display()
        )));
    }

    let conn = Connection::open_with_flags(store, OpenFlags::SQLITE_OPEN_READ_ONLY).map_err(
        |e| BankError::Open {
            path: store.display().to_string(),
            reason: e.to_string(),
        },
    )?;

    let output = output
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DUMP_NAME));
    let file = File::create(&output).map_err(|e| {
        BankError::Export(format!("Failed to create {}: {}", output.display(), e))
    })?;

    let mut writer = BufWriter::new(file);
    write_dump(&conn, &mut writer)?;
    writer.flush()?;

    info!(store = %store.display(), output = %output.display(), "store dumped");
    Ok(output)
}

/// Write the dump of an open connection
pub fn write_dump<W: Write>(conn: &Connection, writer: &mut W) -> BankResult<()> {
    writeln!(writer, "BEGIN TRANSACTION;")?;

    let tables = schema_entries(
        conn,
        "SELECT name, sql FROM sqlite_master
         WHERE sql NOT NULL AND type = 'table'
         ORDER BY name",
    )?;

    for (name, sql) in tables {
        if name == "sqlite_sequence" {
            writeln!(writer, "DELETE FROM \"sqlite_sequence\";")?;
        } else if name == "sqlite_stat1" {
            writeln!(writer, "ANALYZE \"sqlite_master\";")?;
        } else if name.starts_with("sqlite_") {
            continue;
        } else {
            writeln!(writer, "{};", single_line(&sql))?;
        }

        for statement in insert_statements(conn, &name)? {
            writeln!(writer, "{};", statement)?;
        }
    }

    let others = schema_entries(
        conn,
        "SELECT name, sql FROM sqlite_master
         WHERE sql NOT NULL AND type IN ('index', 'trigger', 'view')
         ORDER BY name",
    )?;
    for (_, sql) in others {
        writeln!(writer, "{};", single_line(&sql))?;
    }

    writeln!(writer, "COMMIT;")?;
    Ok(())
}

fn schema_entries(conn: &Connection, sql: &str) -> BankResult<Vec<(String, String)>> {
    let mut stmt = conn.prepare(sql)?;
    let rows = stmt.query_map([], |row| Ok((row.get(0)?, row.get(1)?)))?;
    let entries = rows.collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(entries)
}

/// `INSERT INTO "t" VALUES(...)` for every row, values rendered by SQLite's quote()
fn insert_statements(conn: &Connection, table: &str) -> BankResult<Vec<String>> {
    let quoted_table = quote_identifier(table);

    let mut info = conn.prepare(&format!("PRAGMA table_info({})", quoted_table))?;
    let columns = info
        .query_map([], |row| row.get::<_, String>(1))?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    if columns.is_empty() {
        return Ok(Vec::new());
    }

    let values = columns
        .iter()
        .map(|c| format!("quote({})", quote_identifier(c)))
        .collect::<Vec<_>>()
        .join(" || ',' || ");
    let prefix = format!("INSERT INTO {} VALUES(", quoted_table);
    let sql = format!(
        "SELECT {} || {} || ')' FROM {} ORDER BY rowid",
        quote_literal(&prefix),
        values,
        quoted_table
    );

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map([], |row| row.get(0))?;
    let statements = rows.collect::<rusqlite::Result<Vec<String>>>()?;
    Ok(statements)
}

/// Schema text as stored keeps the author's line breaks
fn single_line(sql: &str) -> String {
    sql.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

fn quote_identifier(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

fn quote_literal(text: &str) -> String {
    format!("'{}'", text.replace('\'', "''"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Admin, Money, NewAccount, StaffMember};
    use crate::storage::Session;
    use tempfile::TempDir;

    fn populate(path: &Path) {
        let session = Session::open(path).unwrap();
        session
            .accounts()
            .create(NewAccount::new("O'Brien", 30, "1 Main St", Money::from_units(100), "savings", 555))
            .unwrap();
        session
            .staff()
            .create(&StaffMember::new("ann", "pw", Money::from_units(3000), "manager"))
            .unwrap();
        session.admins().create(&Admin::new("admin", "password")).unwrap();
        session.close().unwrap();
    }

    fn dump_to_string(path: &Path) -> String {
        let conn = Connection::open(path).unwrap();
        let mut out = Vec::new();
        write_dump(&conn, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_dump_layout() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("bank.db");
        populate(&path);

        let dump = dump_to_string(&path);
        let lines: Vec<&str> = dump.lines().collect();

        assert_eq!(lines.first(), Some(&"BEGIN TRANSACTION;"));
        assert_eq!(lines.last(), Some(&"COMMIT;"));
        assert!(lines.contains(&"INSERT INTO \"admin\" VALUES('admin','password');"));
        assert!(lines.contains(
            &"INSERT INTO \"bank\" VALUES(1,'O''Brien',30,'1 Main St',10000,'savings',555);"
        ));
        assert!(lines.contains(&"INSERT INTO \"staff\" VALUES('ann','pw',300000,'manager');"));
        assert!(lines
            .iter()
            .any(|l| l.starts_with("CREATE TABLE") && l.contains("bank (") && l.ends_with(") STRICT;")));
        assert!(lines.contains(&"DELETE FROM \"sqlite_sequence\";"));
        assert!(lines.contains(&"INSERT INTO \"sqlite_sequence\" VALUES('bank',1);"));
    }

    #[test]
    fn test_equal_stores_dump_identically() {
        let temp_dir = TempDir::new().unwrap();
        let first = temp_dir.path().join("first.db");
        let second = temp_dir.path().join("second.db");
        populate(&first);
        populate(&second);

        assert_eq!(dump_to_string(&first), dump_to_string(&second));

        let session = Session::open(&second).unwrap();
        session.accounts().update_age(crate::models::AccountNumber::FIRST, 31).unwrap();
        session.close().unwrap();

        assert_ne!(dump_to_string(&first), dump_to_string(&second));
    }

    #[test]
    fn test_dump_db_writes_file() {
        let temp_dir = TempDir::new().unwrap();
        let store = temp_dir.path().join("bank.db");
        let output = temp_dir.path().join("snapshot.sql");
        populate(&store);

        let written = dump_db(&store, Some(&output)).unwrap();

        assert_eq!(written, output);
        let contents = std::fs::read_to_string(&output).unwrap();
        assert_eq!(contents, dump_to_string(&store));
    }

    #[test]
    fn test_dump_db_missing_store() {
        let temp_dir = TempDir::new().unwrap();
        let err = dump_db(&temp_dir.path().join("absent.db"), None).unwrap_err();
        assert!(matches!(err, BankError::Export(_)));
        assert!(!temp_dir.path().join("absent.db").exists());
    }
}
