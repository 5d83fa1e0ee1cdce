//! Account display formatting
//!
//! Formats accounts for terminal output in table and detail views.

use crate::models::{Account, Money};

/// Format a list of accounts as a table with a total row
///
/// `total` is the store's sum of every balance.
pub fn format_account_list(accounts: &[Account], total: Money, currency: &str) -> String {
    if accounts.is_empty() {
        return "No accounts found.".to_string();
    }

    let name_width = accounts
        .iter()
        .map(|a| a.name.len())
        .max()
        .unwrap_or(4)
        .max(4);

    let type_width = accounts
        .iter()
        .map(|a| a.account_type.len())
        .max()
        .unwrap_or(4)
        .max(4);

    let mut output = String::new();
    output.push_str(&format!(
        "{:>8}  {:<name_width$}  {:<type_width$}  {:>14}\n",
        "Number",
        "Name",
        "Type",
        "Balance",
        name_width = name_width,
        type_width = type_width,
    ));

    let separator = format!(
        "{:->8}  {:-<name_width$}  {:-<type_width$}  {:->14}\n",
        "",
        "",
        "",
        "",
        name_width = name_width,
        type_width = type_width,
    );
    output.push_str(&separator);

    for account in accounts {
        output.push_str(&format!(
            "{:>8}  {:<name_width$}  {:<type_width$}  {:>14}\n",
            account.account_number,
            account.name,
            account.account_type,
            account.balance.format_with_symbol(currency),
            name_width = name_width,
            type_width = type_width,
        ));
    }

    output.push_str(&separator);
    output.push_str(&format!(
        "{:>8}  {:<name_width$}  {:<type_width$}  {:>14}\n",
        "",
        "TOTAL",
        "",
        total.format_with_symbol(currency),
        name_width = name_width,
        type_width = type_width,
    ));

    output
}

/// Format a single account's details
pub fn format_account_details(account: &Account, currency: &str) -> String {
    let mut output = String::new();

    output.push_str(&format!("Account #{}\n", account.account_number));
    output.push_str(&format!("  Name:           {}\n", account.name));
    output.push_str(&format!("  Age:            {}\n", account.age));
    output.push_str(&format!("  Address:        {}\n", account.address));
    output.push_str(&format!(
        "  Balance:        {}\n",
        account.balance.format_with_symbol(currency)
    ));
    output.push_str(&format!("  Type:           {}\n", account.account_type));
    output.push_str(&format!("  Mobile:         {}\n", account.mobile_number));

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AccountNumber, NewAccount};

    fn account(number: i64, name: &str, units: i64) -> Account {
        NewAccount::new(name, 30, "addr", Money::from_units(units), "savings", 1)
            .into_account(AccountNumber::new(number))
    }

    #[test]
    fn test_empty_list() {
        assert_eq!(
            format_account_list(&[], Money::zero(), "$"),
            "No accounts found."
        );
    }

    #[test]
    fn test_list_has_rows_and_total() {
        let output = format_account_list(
            &[account(1, "Ada", 100), account(2, "Bo", 500)],
            Money::from_units(600),
            "$",
        );

        assert!(output.contains("Ada"));
        assert!(output.contains("Bo"));
        assert!(output.contains("$600.00"));
        assert_eq!(output.lines().count(), 6);
    }

    #[test]
    fn test_details() {
        let output = format_account_details(&account(7, "Ada", 12), "£");
        assert!(output.starts_with("Account #7\n"));
        assert!(output.contains("£12.00"));
    }
}
