//! User display formatting

use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::models::User;

#[derive(Tabled)]
struct UserRow {
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Username")]
    username: String,
    #[tabled(rename = "Created")]
    created: String,
    #[tabled(rename = "ID")]
    id: String,
}

/// Format users as a table
pub fn format_user_table(users: &[User], date_format: &str) -> String {
    if users.is_empty() {
        return "No users found\nAdd a user with `user add`\n".to_string();
    }

    let rows = users.iter().map(|u| UserRow {
        name: u.full_name(),
        username: u.username.clone(),
        created: u.created_at.format(date_format).to_string(),
        id: u.id.to_string(),
    });
    let mut table = Table::new(rows);
    table.with(Style::modern());
    format!("{}\n", table)
}
