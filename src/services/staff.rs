//! Staff service
//!
//! Names are treated as unique here: hiring under an existing name is
//! refused, and updates that match no row report NotFound. Names are
//! trimmed on the way in, for lookups as well as writes.

use tracing::{info, warn};

use crate::error::{BankError, BankResult};
use crate::models::{Money, StaffDetail, StaffMember};
use crate::storage::Session;

pub struct StaffService<'a> {
    session: &'a Session,
}

/// Fields to change in one [`StaffService::edit`]; `None` fields are left
/// alone
#[derive(Debug, Clone, Default)]
pub struct StaffChanges {
    pub new_name: Option<String>,
    pub password: Option<String>,
    pub salary: Option<Money>,
    pub position: Option<String>,
}

impl StaffChanges {
    pub fn is_empty(&self) -> bool {
        self.new_name.is_none()
            && self.password.is_none()
            && self.salary.is_none()
            && self.position.is_none()
    }
}

impl<'a> StaffService<'a> {
    pub fn new(session: &'a Session) -> Self {
        Self { session }
    }

    /// Add a staff member
    pub fn hire(
        &self,
        name: &str,
        password: &str,
        salary: Money,
        position: &str,
    ) -> BankResult<StaffMember> {
        let name = staff_name(name)?;
        check_password(password)?;
        check_salary(salary)?;
        self.ensure_free(name)?;

        let member = StaffMember::new(name, password, salary, position.trim());
        self.session.staff().create(&member)?;
        info!(name, "staff member hired");
        Ok(member)
    }

    /// Verify a staff member's credentials
    pub fn login(&self, name: &str, password: &str) -> BankResult<()> {
        let name = name.trim();
        if self.session.staff().check_credentials(name, password)? {
            Ok(())
        } else {
            Err(BankError::Authentication(format!(
                "invalid credentials for staff member '{}'",
                name
            )))
        }
    }

    pub fn list(&self) -> BankResult<Vec<StaffMember>> {
        self.session.staff().list()
    }

    pub fn rename(&self, old_name: &str, new_name: &str) -> BankResult<()> {
        let old_name = old_name.trim();
        let new_name = staff_name(new_name)?;
        if new_name != old_name {
            self.ensure_free(new_name)?;
        }
        matched(old_name, self.session.staff().update_name(old_name, new_name)?)
    }

    pub fn change_password(&self, name: &str, password: &str) -> BankResult<()> {
        let name = name.trim();
        check_password(password)?;
        matched(name, self.session.staff().update_password(name, password)?)
    }

    pub fn change_salary(&self, name: &str, salary: Money) -> BankResult<()> {
        let name = name.trim();
        check_salary(salary)?;
        matched(name, self.session.staff().update_salary(name, salary)?)
    }

    pub fn change_position(&self, name: &str, position: &str) -> BankResult<()> {
        let name = name.trim();
        matched(name, self.session.staff().update_position(name, position.trim())?)
    }

    /// Apply several changes to one staff member together
    ///
    /// Every change is validated, and a new name checked for clashes, before
    /// anything is written. The writes share one transaction.
    pub fn edit(&self, name: &str, changes: &StaffChanges) -> BankResult<()> {
        let name = name.trim();
        let new_name = changes.new_name.as_deref().map(staff_name).transpose()?;
        if let Some(password) = &changes.password {
            check_password(password)?;
        }
        if let Some(salary) = changes.salary {
            check_salary(salary)?;
        }
        if !self.session.staff().name_exists(name)? {
            return Err(BankError::staff_not_found(name));
        }
        if let Some(new_name) = new_name.filter(|n| *n != name) {
            self.ensure_free(new_name)?;
        }

        self.session.transaction(|session| {
            let staff = session.staff();
            if let Some(salary) = changes.salary {
                staff.update_salary(name, salary)?;
            }
            if let Some(position) = &changes.position {
                staff.update_position(name, position.trim())?;
            }
            if let Some(password) = &changes.password {
                staff.update_password(name, password)?;
            }
            // Last, so the updates above still match the old name
            if let Some(new_name) = new_name {
                staff.update_name(name, new_name)?;
            }
            Ok(())
        })?;

        info!(name, "staff member edited");
        Ok(())
    }

    /// Salary lookup; NotFound when nobody has that name
    pub fn salary_of(&self, name: &str) -> BankResult<StaffDetail> {
        let name = name.trim();
        let mut details = self.session.staff().get_detail(name)?;
        if details.len() > 1 {
            warn!(name, rows = details.len(), "several staff rows share a name");
        }
        if details.is_empty() {
            return Err(BankError::staff_not_found(name));
        }
        Ok(details.swap_remove(0))
    }

    fn ensure_free(&self, name: &str) -> BankResult<()> {
        if self.session.staff().name_exists(name)? {
            return Err(BankError::Duplicate {
                entity_type: "Staff member",
                identifier: name.to_string(),
            });
        }
        Ok(())
    }
}

/// Names are stored and matched trimmed
fn staff_name(name: &str) -> BankResult<&str> {
    let name = name.trim();
    if name.is_empty() {
        return Err(BankError::Validation("Staff name cannot be empty".into()));
    }
    Ok(name)
}

fn check_password(password: &str) -> BankResult<()> {
    if password.is_empty() {
        return Err(BankError::Validation("Password cannot be empty".into()));
    }
    Ok(())
}

fn check_salary(salary: Money) -> BankResult<()> {
    if salary.is_negative() {
        return Err(BankError::Validation("Salary cannot be negative".into()));
    }
    Ok(())
}

fn matched(name: &str, changed: usize) -> BankResult<()> {
    if changed == 0 {
        Err(BankError::staff_not_found(name))
    } else {
        Ok(())
    }
}
