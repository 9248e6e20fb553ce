//! List every leave request in the store.

use tracing::info;

use crate::config::Config;
use crate::store::{self, StoreError};

pub async fn run(config: &Config) -> Result<(), StoreError> {
    let requests = store::leave_requests(config).await?;
    info!("Fetched {} leave requests.", requests.len());

    println!("=== Leave requests ===");
    println!("{} records total\n", requests.len());
    for request in &requests {
        println!("ID: {}", request.id);
        println!("Employee: {}", request.employee_id);
        println!("Type: {}", request.leave_type);
        println!("From: {}", request.start_date);
        println!("To: {}", request.end_date);
        println!("Status: {}", request.status);
        println!("Reason: {}", request.reason.as_deref().unwrap_or("N/A"));
        println!("{}", "-".repeat(50));
    }
    Ok(())
}
