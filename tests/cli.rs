//! End-to-end tests for the `bank` binary

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn bank(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("bank").unwrap();
    cmd.env("BANK_RECORDS_DATA_DIR", home.path())
        .env_remove("BANK_RECORDS_DB")
        .env("RUST_LOG", "off");
    cmd
}

fn open_account(home: &TempDir, name: &str, balance: &str) {
    bank(home)
        .args(["account", "create", name, "--age", "30", "--balance", balance])
        .assert()
        .success();
}

#[test]
fn init_creates_store_and_settings() {
    let home = TempDir::new().unwrap();

    bank(&home)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Next account number: 1"));

    assert!(home.path().join("config.json").exists());
    assert!(home.path().join("data").join("bank.db").exists());
}

#[test]
fn accounts_are_numbered_from_one() {
    let home = TempDir::new().unwrap();

    bank(&home)
        .args(["account", "create", "Ada", "--age", "36", "--balance", "100"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Opened account #1"));
    bank(&home)
        .args(["account", "create", "Bo", "--age", "41"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Opened account #2"));

    bank(&home)
        .args(["account", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Ada").and(predicate::str::contains("Bo")));
}

#[test]
fn deposit_and_withdraw_update_balance() {
    let home = TempDir::new().unwrap();
    open_account(&home, "Ada", "100");

    bank(&home)
        .args(["account", "deposit", "1", "25.50"])
        .assert()
        .success()
        .stdout(predicate::str::contains("$125.50"));
    bank(&home)
        .args(["account", "withdraw", "1", "0.50"])
        .assert()
        .success();

    bank(&home)
        .args(["account", "balance", "1"])
        .assert()
        .success()
        .stdout("$125.00\n");
}

#[test]
fn overdraft_is_refused() {
    let home = TempDir::new().unwrap();
    open_account(&home, "Ada", "10");

    bank(&home)
        .args(["account", "withdraw", "1", "50"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Insufficient funds"));

    bank(&home)
        .args(["account", "balance", "1"])
        .assert()
        .success()
        .stdout("$10.00\n");
}

#[test]
fn missing_account_is_reported() {
    let home = TempDir::new().unwrap();

    bank(&home)
        .args(["account", "show", "42"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn deleted_numbers_are_not_reused() {
    let home = TempDir::new().unwrap();
    open_account(&home, "Ada", "0");
    open_account(&home, "Bo", "0");

    bank(&home).args(["account", "delete", "2"]).assert().success();

    bank(&home)
        .args(["account", "create", "Cy", "--age", "22"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Opened account #3"));
}

#[test]
fn total_sums_every_balance() {
    let home = TempDir::new().unwrap();
    open_account(&home, "Ada", "100");
    open_account(&home, "Bo", "500");

    bank(&home)
        .args(["account", "total"])
        .assert()
        .success()
        .stdout(predicate::str::contains("$600.00"));
}

#[test]
fn staff_login_checks_password() {
    let home = TempDir::new().unwrap();

    bank(&home)
        .args([
            "staff", "add", "ann", "--salary", "3000", "--position", "manager", "--password",
            "pw",
        ])
        .assert()
        .success();

    bank(&home)
        .args(["staff", "login", "ann", "--password", "pw"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Welcome, ann"));
    bank(&home)
        .args(["staff", "login", "ann", "--password", "nope"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Authentication failed"));

    bank(&home)
        .args(["staff", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("manager").and(predicate::str::contains("pw").not()));
}

#[test]
fn staff_edit_then_detail() {
    let home = TempDir::new().unwrap();

    bank(&home)
        .args([
            "staff", "add", "ann", "--salary", "3000", "--position", "clerk", "--password", "pw",
        ])
        .assert()
        .success();
    bank(&home)
        .args(["staff", "edit", "ann", "--salary", "3500", "--new-name", "anne"])
        .assert()
        .success();

    bank(&home)
        .args(["staff", "detail", "anne"])
        .assert()
        .success()
        .stdout("anne: $3500.00\n");
    bank(&home)
        .args(["staff", "detail", "ann"])
        .assert()
        .failure();
}

#[test]
fn admin_add_and_login() {
    let home = TempDir::new().unwrap();

    bank(&home)
        .args(["admin", "add", "root", "--password", "secret"])
        .assert()
        .success();
    bank(&home)
        .args(["admin", "add", "root", "--password", "other"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));

    bank(&home)
        .args(["admin", "login", "root", "--password", "secret"])
        .assert()
        .success();
    bank(&home)
        .args(["admin", "login", "root", "--password", "wrong"])
        .assert()
        .failure();
}

#[test]
fn db_flag_selects_store() {
    let home = TempDir::new().unwrap();
    let store = home.path().join("branch.db");

    bank(&home)
        .arg("--db")
        .arg(&store)
        .args(["account", "create", "Ada", "--age", "36"])
        .assert()
        .success();

    assert!(store.exists());
    assert!(!home.path().join("data").join("bank.db").exists());
}

#[test]
fn export_sql_writes_dump() {
    let home = TempDir::new().unwrap();
    let output = home.path().join("snapshot.sql");
    open_account(&home, "Ada", "100");

    bank(&home)
        .args(["export", "sql"])
        .arg(&output)
        .assert()
        .success();

    let dump = std::fs::read_to_string(&output).unwrap();
    assert!(dump.starts_with("BEGIN TRANSACTION;\n"));
    assert!(dump.contains("INSERT INTO \"bank\" VALUES(1,'Ada',30,'',10000,'savings',0);"));
    assert!(dump.ends_with("COMMIT;\n"));
}

#[test]
fn export_json_and_csv() {
    let home = TempDir::new().unwrap();
    let json = home.path().join("records.json");
    let csv = home.path().join("accounts.csv");
    open_account(&home, "Ada", "100");

    bank(&home)
        .args(["export", "json", "--pretty"])
        .arg(&json)
        .assert()
        .success();
    bank(&home)
        .args(["export", "csv"])
        .arg(&csv)
        .assert()
        .success()
        .stdout(predicate::str::contains("Exported 1 accounts"));

    let parsed: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&json).unwrap()).unwrap();
    assert_eq!(parsed["metadata"]["account_count"], 1);

    let text = std::fs::read_to_string(&csv).unwrap();
    assert!(text.contains("1,Ada,30,,100.00,savings,0"));
}

#[test]
fn staff_edit_onto_taken_name_leaves_record_alone() {
    let home = TempDir::new().unwrap();
    for (name, salary) in [("ann", "3000"), ("bob", "2000")] {
        bank(&home)
            .args([
                "staff", "add", name, "--salary", salary, "--position", "clerk", "--password",
                "pw",
            ])
            .assert()
            .success();
    }

    bank(&home)
        .args(["staff", "edit", "ann", "--salary", "3500", "--new-name", "bob"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));

    bank(&home)
        .args(["staff", "detail", "ann"])
        .assert()
        .success()
        .stdout("ann: $3000.00\n");
}

#[test]
fn account_edit_with_bad_age_leaves_record_alone() {
    let home = TempDir::new().unwrap();
    open_account(&home, "Ada", "100");

    bank(&home)
        .args(["account", "edit", "1", "--name", "X", "--age", "200"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid age"));

    bank(&home)
        .args(["account", "show", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Name:           Ada"));
}
