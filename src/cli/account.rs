//! Account CLI commands
//!
//! Implements CLI commands for account management.

use clap::Subcommand;

use super::parse_amount;
use crate::config::Settings;
use crate::display::account::{format_account_details, format_account_list};
use crate::error::BankResult;
use crate::models::{AccountNumber, NewAccount};
use crate::services::{AccountChanges, AccountService};
use crate::storage::Session;

/// Account subcommands
#[derive(Subcommand)]
pub enum AccountCommands {
    /// Open a new account
    Create {
        /// Holder name
        name: String,
        /// Holder age
        #[arg(short, long)]
        age: i64,
        /// Postal address
        #[arg(long, default_value = "")]
        address: String,
        /// Opening balance (e.g., "1000.00" or "1000")
        #[arg(short, long, default_value = "0")]
        balance: String,
        /// Account type label
        #[arg(short = 't', long, default_value = "savings")]
        account_type: String,
        /// Mobile number
        #[arg(short, long, default_value = "0")]
        mobile: i64,
    },
    /// Show account details
    Show {
        /// Account number
        number: AccountNumber,
    },
    /// Show the current balance
    Balance {
        /// Account number
        number: AccountNumber,
    },
    /// Add funds to an account
    Deposit {
        /// Account number
        number: AccountNumber,
        /// Amount to add
        amount: String,
    },
    /// Take funds from an account
    Withdraw {
        /// Account number
        number: AccountNumber,
        /// Amount to take
        amount: String,
    },
    /// Overwrite the balance
    SetBalance {
        /// Account number
        number: AccountNumber,
        /// New balance
        balance: String,
    },
    /// Edit holder details
    Edit {
        /// Account number
        number: AccountNumber,
        /// New name
        #[arg(short, long)]
        name: Option<String>,
        /// New age
        #[arg(short, long)]
        age: Option<i64>,
        /// New address
        #[arg(long)]
        address: Option<String>,
    },
    /// Close an account
    Delete {
        /// Account number
        number: AccountNumber,
    },
    /// List all accounts
    List,
    /// Show the sum of all balances
    Total,
}

/// Handle an account command
pub fn handle_account_command(
    session: &Session,
    settings: &Settings,
    cmd: AccountCommands,
) -> BankResult<()> {
    let service = AccountService::new(session, settings);
    let currency = settings.currency_symbol.as_str();

    match cmd {
        AccountCommands::Create {
            name,
            age,
            address,
            balance,
            account_type,
            mobile,
        } => {
            let balance = parse_amount(&balance)?;
            let account = service.open_account(NewAccount::new(
                name,
                age,
                address,
                balance,
                account_type,
                mobile,
            ))?;

            println!("Opened account #{}", account.account_number);
            println!("  Holder: {}", account.name);
            println!(
                "  Opening Balance: {}",
                account.balance.format_with_symbol(currency)
            );
        }

        AccountCommands::Show { number } => {
            let account = service.details(number)?;
            print!("{}", format_account_details(&account, currency));
        }

        AccountCommands::Balance { number } => {
            let balance = service.balance(number)?;
            println!("{}", balance.format_with_symbol(currency));
        }

        AccountCommands::Deposit { number, amount } => {
            let balance = service.deposit(number, parse_amount(&amount)?)?;
            println!(
                "Deposited into #{}. New balance: {}",
                number,
                balance.format_with_symbol(currency)
            );
        }

        AccountCommands::Withdraw { number, amount } => {
            let balance = service.withdraw(number, parse_amount(&amount)?)?;
            println!(
                "Withdrew from #{}. New balance: {}",
                number,
                balance.format_with_symbol(currency)
            );
        }

        AccountCommands::SetBalance { number, balance } => {
            let balance = parse_amount(&balance)?;
            service.set_balance(number, balance)?;
            println!(
                "Balance of #{} set to {}",
                number,
                balance.format_with_symbol(currency)
            );
        }

        AccountCommands::Edit {
            number,
            name,
            age,
            address,
        } => {
            let changes = AccountChanges { name, age, address };
            if changes.is_empty() {
                println!("No changes specified. Use --name, --age or --address.");
                return Ok(());
            }

            service.edit(number, &changes)?;
            println!("Updated account #{}", number);
        }

        AccountCommands::Delete { number } => {
            service.close(number)?;
            println!("Closed account #{}", number);
        }

        AccountCommands::List => {
            let accounts = service.list()?;
            let total = service.total_holdings()?;
            println!(
                "{}",
                format_account_list(&accounts, total, currency).trim_end()
            );
        }

        AccountCommands::Total => {
            let total = service.total_holdings()?;
            println!("Total holdings: {}", total.format_with_symbol(currency));
        }
    }

    Ok(())
}
