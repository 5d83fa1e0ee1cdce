//! CSV export of the account ledger

use serde::Serialize;
use std::io::Write;

use crate::error::BankResult;
use crate::storage::Session;

#[derive(Serialize)]
struct AccountCsvRow<'a> {
    #[serde(rename = "Account Number")]
    account_number: i64,
    #[serde(rename = "Name")]
    name: &'a str,
    #[serde(rename = "Age")]
    age: i64,
    #[serde(rename = "Address")]
    address: &'a str,
    #[serde(rename = "Balance")]
    balance: String,
    #[serde(rename = "Type")]
    account_type: &'a str,
    #[serde(rename = "Mobile")]
    mobile_number: i64,
}

/// Write every account as one CSV row; returns the number of rows written
pub fn export_accounts_csv<W: Write>(session: &Session, writer: W) -> BankResult<usize> {
    let accounts = session.accounts().list()?;
    let mut csv_writer = csv::Writer::from_writer(writer);

    for account in &accounts {
        csv_writer.serialize(AccountCsvRow {
            account_number: account.account_number.get(),
            name: &account.name,
            age: account.age,
            address: &account.address,
            balance: account.balance.format_with_symbol(""),
            account_type: &account.account_type,
            mobile_number: account.mobile_number,
        })?;
    }

    csv_writer.flush()?;
    Ok(accounts.len())
}
