//! Look up user accounts by exact name, then list every account's role.

use tracing::info;

use crate::config::Config;
use crate::store::{self, StoreError};

/// Accounts without an explicit role are treated as plain employees.
const DEFAULT_ROLE: &str = "employee";

pub async fn run(config: &Config, name: &str) -> Result<(), StoreError> {
    let matches = store::users_by_name(config, name).await?;
    info!("Found {} accounts named {name}.", matches.len());

    println!("Accounts named {name}:");
    if matches.is_empty() {
        println!("  (no match)");
    }
    for user in &matches {
        println!("  employee id: {}", user.employee_id);
        println!("  name:        {}", user.name);
        println!("  role:        {}", user.role.as_deref().unwrap_or(DEFAULT_ROLE));
        println!("  password:    {}", user.password.as_deref().unwrap_or("N/A"));
        println!();
    }

    let all = store::user_roles(config).await?;
    println!("All account roles:");
    for user in &all {
        println!(
            "  {} - {} - {}",
            user.employee_id,
            user.name,
            user.role.as_deref().unwrap_or(DEFAULT_ROLE)
        );
    }
    Ok(())
}
