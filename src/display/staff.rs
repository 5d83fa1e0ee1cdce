//! Staff display formatting

use crate::models::{StaffDetail, StaffMember};

/// Table of staff in listing order; passwords are masked unless `reveal`
pub fn format_staff_list(members: &[StaffMember], currency: &str, reveal: bool) -> String {
    if members.is_empty() {
        return "No staff found.".to_string();
    }

    let name_width = members.iter().map(|m| m.name.len()).max().unwrap_or(4).max(4);
    let position_width = members
        .iter()
        .map(|m| m.position.len())
        .max()
        .unwrap_or(8)
        .max(8);

    let mut output = format!(
        "{:<name_width$}  {:>12}  {:<position_width$}  {}\n",
        "Name",
        "Salary",
        "Position",
        "Password",
        name_width = name_width,
        position_width = position_width,
    );

    for member in members {
        let (name, salary, position, password) = member.display_view();
        let password = if reveal { password.to_string() } else { "*".repeat(8) };
        output.push_str(&format!(
            "{:<name_width$}  {:>12}  {:<position_width$}  {}\n",
            name,
            salary.format_with_symbol(currency),
            position,
            password,
            name_width = name_width,
            position_width = position_width,
        ));
    }

    output
}

/// One line per matching row: "name: salary"
pub fn format_staff_details(details: &[StaffDetail], currency: &str) -> String {
    details
        .iter()
        .map(|d| format!("{}: {}\n", d.name, d.salary.format_with_symbol(currency)))
        .collect()
}
