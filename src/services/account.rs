//! Account service
//!
//! Business rules on top of the account ledger: input validation, relative
//! deposits and withdrawals, and explicit NotFound errors.

use tracing::{info, warn};

use crate::config::Settings;
use crate::error::{BankError, BankResult};
use crate::models::account::validate_age;
use crate::models::{Account, AccountNumber, Money, NewAccount};
use crate::storage::Session;

/// Holder details to change in one [`AccountService::edit`]; `None` fields
/// are left alone
#[derive(Debug, Clone, Default)]
pub struct AccountChanges {
    pub name: Option<String>,
    pub age: Option<i64>,
    pub address: Option<String>,
}

impl AccountChanges {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.age.is_none() && self.address.is_none()
    }
}

/// Service for account management
pub struct AccountService<'a> {
    session: &'a Session,
    allow_overdraft: bool,
}

impl<'a> AccountService<'a> {
    /// Create a new account service
    pub fn new(session: &'a Session, settings: &Settings) -> Self {
        Self {
            session,
            allow_overdraft: settings.allow_overdraft,
        }
    }

    /// Validate and open a new account
    pub fn open_account(&self, mut account: NewAccount) -> BankResult<Account> {
        account
            .validate()
            .map_err(|e| BankError::Validation(e.to_string()))?;

        account.name = account.name.trim().to_string();
        self.session.accounts().create(account)
    }

    /// Get an account, failing if it does not exist
    pub fn details(&self, number: AccountNumber) -> BankResult<Account> {
        self.session
            .accounts()
            .get(number)?
            .ok_or_else(|| BankError::account_not_found(number))
    }

    /// Current balance, failing if the account does not exist
    pub fn balance(&self, number: AccountNumber) -> BankResult<Money> {
        self.session
            .accounts()
            .balance(number)?
            .ok_or_else(|| BankError::account_not_found(number))
    }

    /// Add funds; returns the new balance
    pub fn deposit(&self, number: AccountNumber, amount: Money) -> BankResult<Money> {
        require_positive(amount)?;
        let current = self.balance(number)?;
        let updated = current
            .checked_add(amount)
            .ok_or_else(|| BankError::Validation(format!("Depositing {} overflows", amount)))?;

        self.session.accounts().set_balance(number, updated)?;
        info!(account_number = %number, amount = amount.cents(), "deposit");
        Ok(updated)
    }

    /// Remove funds; returns the new balance
    ///
    /// Fails with `InsufficientFunds` when the balance would go below zero,
    /// unless overdrafts are enabled in settings.
    pub fn withdraw(&self, number: AccountNumber, amount: Money) -> BankResult<Money> {
        require_positive(amount)?;
        let current = self.balance(number)?;

        if !self.allow_overdraft && amount > current {
            warn!(account_number = %number, "withdrawal refused: insufficient funds");
            return Err(BankError::InsufficientFunds {
                account: number.get(),
                needed: amount.cents(),
                available: current.cents(),
            });
        }

        let updated = self.session.accounts().deduct_balance(number, amount)?;
        info!(account_number = %number, amount = amount.cents(), "withdrawal");
        Ok(updated)
    }

    /// Overwrite the balance with an absolute value
    pub fn set_balance(&self, number: AccountNumber, balance: Money) -> BankResult<()> {
        if !self.session.accounts().set_balance(number, balance)? {
            return Err(BankError::account_not_found(number));
        }
        Ok(())
    }

    pub fn rename(&self, number: AccountNumber, name: &str) -> BankResult<()> {
        let name = holder_name(name)?;
        touched(number, self.session.accounts().update_name(number, name)?)
    }

    pub fn change_age(&self, number: AccountNumber, age: i64) -> BankResult<()> {
        check_age(age)?;
        touched(number, self.session.accounts().update_age(number, age)?)
    }

    pub fn change_address(&self, number: AccountNumber, address: &str) -> BankResult<()> {
        touched(number, self.session.accounts().update_address(number, address)?)
    }

    /// Apply several holder-detail changes together
    ///
    /// Every change is validated before anything is written, and the writes
    /// share one transaction.
    pub fn edit(&self, number: AccountNumber, changes: &AccountChanges) -> BankResult<()> {
        let name = changes.name.as_deref().map(holder_name).transpose()?;
        if let Some(age) = changes.age {
            check_age(age)?;
        }
        if !self.session.accounts().exists(number)? {
            return Err(BankError::account_not_found(number));
        }

        self.session.transaction(|session| {
            let accounts = session.accounts();
            if let Some(name) = name {
                accounts.update_name(number, name)?;
            }
            if let Some(age) = changes.age {
                accounts.update_age(number, age)?;
            }
            if let Some(address) = &changes.address {
                accounts.update_address(number, address)?;
            }
            Ok(())
        })?;

        info!(account_number = %number, "account edited");
        Ok(())
    }

    /// Delete the account; its number is retired
    pub fn close(&self, number: AccountNumber) -> BankResult<()> {
        touched(number, self.session.accounts().delete(number)?)
    }

    pub fn list(&self) -> BankResult<Vec<Account>> {
        self.session.accounts().list()
    }

    /// Sum of every balance held by the bank
    pub fn total_holdings(&self) -> BankResult<Money> {
        self.session.accounts().sum_balances()
    }
}

fn require_positive(amount: Money) -> BankResult<()> {
    if amount.is_negative() || amount.is_zero() {
        return Err(BankError::Validation(format!(
            "Amount must be positive, got {}",
            amount
        )));
    }
    Ok(())
}

fn holder_name(name: &str) -> BankResult<&str> {
    let name = name.trim();
    if name.is_empty() {
        return Err(BankError::Validation(
            "Account holder name cannot be empty".into(),
        ));
    }
    Ok(name)
}

fn check_age(age: i64) -> BankResult<()> {
    validate_age(age).map_err(|e| BankError::Validation(e.to_string()))
}

fn touched(number: AccountNumber, changed: bool) -> BankResult<()> {
    if changed {
        Ok(())
    } else {
        Err(BankError::account_not_found(number))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(balance: i64) -> NewAccount {
        NewAccount::new("Ada", 30, "addr", Money::from_units(balance), "checking", 555)
    }

    #[test]
    fn test_open_account_validates() {
        let session = Session::open_in_memory().unwrap();
        let service = AccountService::new(&session, &Settings::default());

        let mut bad = sample(10);
        bad.name = String::new();
        assert!(service.open_account(bad).unwrap_err().is_validation());
        assert_eq!(session.next_account_number(), Some(AccountNumber::FIRST));

        let mut padded = sample(10);
        padded.name = "  Ada  ".into();
        let account = service.open_account(padded).unwrap();
        assert_eq!(account.name, "Ada");
    }

    #[test]
    fn test_deposit_and_withdraw() {
        let session = Session::open_in_memory().unwrap();
        let service = AccountService::new(&session, &Settings::default());
        let number = service.open_account(sample(100)).unwrap().account_number;

        assert_eq!(
            service.deposit(number, Money::from_units(50)).unwrap(),
            Money::from_units(150)
        );
        assert_eq!(
            service.withdraw(number, Money::from_units(120)).unwrap(),
            Money::from_units(30)
        );
        assert_eq!(service.balance(number).unwrap(), Money::from_units(30));
    }

    #[test]
    fn test_withdraw_refuses_overdraft() {
        let session = Session::open_in_memory().unwrap();
        let service = AccountService::new(&session, &Settings::default());
        let number = service.open_account(sample(10)).unwrap().account_number;

        let err = service.withdraw(number, Money::from_units(11)).unwrap_err();
        assert!(matches!(err, BankError::InsufficientFunds { .. }));
        assert_eq!(service.balance(number).unwrap(), Money::from_units(10));
    }

    #[test]
    fn test_withdraw_allows_overdraft_when_enabled() {
        let session = Session::open_in_memory().unwrap();
        let settings = Settings {
            allow_overdraft: true,
            ..Settings::default()
        };
        let service = AccountService::new(&session, &settings);
        let number = service.open_account(sample(10)).unwrap().account_number;

        assert_eq!(
            service.withdraw(number, Money::from_units(15)).unwrap(),
            Money::from_units(-5)
        );
    }

    #[test]
    fn test_rejects_non_positive_amounts() {
        let session = Session::open_in_memory().unwrap();
        let service = AccountService::new(&session, &Settings::default());
        let number = service.open_account(sample(10)).unwrap().account_number;

        assert!(service.deposit(number, Money::zero()).unwrap_err().is_validation());
        assert!(service
            .withdraw(number, Money::from_units(-1))
            .unwrap_err()
            .is_validation());
    }

    #[test]
    fn test_missing_account_is_not_found() {
        let session = Session::open_in_memory().unwrap();
        let service = AccountService::new(&session, &Settings::default());
        let missing = AccountNumber::new(77);

        assert!(service.balance(missing).unwrap_err().is_not_found());
        assert!(service.details(missing).unwrap_err().is_not_found());
        assert!(service.rename(missing, "x").unwrap_err().is_not_found());
        assert!(service.close(missing).unwrap_err().is_not_found());
        assert!(service
            .set_balance(missing, Money::zero())
            .unwrap_err()
            .is_not_found());
    }

    #[test]
    fn test_change_age_validates() {
        let session = Session::open_in_memory().unwrap();
        let service = AccountService::new(&session, &Settings::default());
        let number = service.open_account(sample(10)).unwrap().account_number;

        assert!(service.change_age(number, -1).unwrap_err().is_validation());
        service.change_age(number, 45).unwrap();
        assert_eq!(service.details(number).unwrap().age, 45);
    }

    #[test]
    fn test_scenario_numbers_after_delete() {
        let session = Session::open_in_memory().unwrap();
        let service = AccountService::new(&session, &Settings::default());
        assert_eq!(session.next_account_number(), Some(AccountNumber::FIRST));

        let first = service.open_account(sample(100)).unwrap();
        let second = service.open_account(sample(100)).unwrap();
        service.close(first.account_number).unwrap();
        let third = service.open_account(sample(100)).unwrap();

        assert_eq!(first.account_number.get(), 1);
        assert_eq!(second.account_number.get(), 2);
        assert_eq!(third.account_number.get(), 3);
        assert_eq!(service.total_holdings().unwrap(), Money::from_units(200));
    }

    #[test]
    fn test_edit_applies_all_changes() {
        let session = Session::open_in_memory().unwrap();
        let service = AccountService::new(&session, &Settings::default());
        let number = service.open_account(sample(100)).unwrap().account_number;

        let changes = AccountChanges {
            name: Some(" Ada L. ".into()),
            age: Some(31),
            address: Some("2 High St".into()),
        };
        service.edit(number, &changes).unwrap();

        let account = service.details(number).unwrap();
        assert_eq!(account.name, "Ada L.");
        assert_eq!(account.age, 31);
        assert_eq!(account.address, "2 High St");
    }

    #[test]
    fn test_edit_with_invalid_age_changes_nothing() {
        let session = Session::open_in_memory().unwrap();
        let service = AccountService::new(&session, &Settings::default());
        let number = service.open_account(sample(100)).unwrap().account_number;

        let changes = AccountChanges {
            name: Some("X".into()),
            age: Some(200),
            ..AccountChanges::default()
        };
        assert!(service.edit(number, &changes).unwrap_err().is_validation());

        let account = service.details(number).unwrap();
        assert_eq!(account.name, "Ada");
        assert_eq!(account.age, 30);
    }

    #[test]
    fn test_edit_missing_account() {
        let session = Session::open_in_memory().unwrap();
        let service = AccountService::new(&session, &Settings::default());

        let changes = AccountChanges {
            address: Some("nowhere".into()),
            ..AccountChanges::default()
        };
        assert!(service
            .edit(AccountNumber::new(9), &changes)
            .unwrap_err()
            .is_not_found());
    }
}
