//! The staff sync task: push a roster into the user and display stores.
//!
//! Runs strictly sequentially. Every per-record and per-step store failure is
//! flattened to a warning so one bad record cannot block the batch; only the
//! final read-only report aborts the run on error.

use itertools::Itertools;
use tracing::{info, warn};

use crate::config::Config;
use crate::roster::StaffRecord;
use crate::store::{self, StaffMemberRow, StoreError};

pub async fn run(config: &Config, roster: &[StaffRecord]) -> Result<(), StoreError> {
    if roster.is_empty() {
        info!("The roster is empty, nothing to sync.");
        return Ok(());
    }

    println!("{}", "=".repeat(60));
    println!("Staff sync: {} records", roster.len());
    println!("{}", "-".repeat(60));
    for record in roster {
        println!(
            "  {} | {} | {}",
            record.name, record.employee_id, record.position
        );
    }
    println!("{}", "-".repeat(60));

    info!("Writing {} records to the user store.", roster.len());
    let mut upserted = 0_usize;
    for record in roster {
        match store::upsert_user(config, record).await {
            Ok(()) => {
                info!("Upserted user {}.", record.employee_id);
                upserted += 1;
            }
            Err(e) => {
                warn!("Failed to upsert user {}: {e}", record.employee_id);
            }
        }
    }
    info!("{upserted} of {} user rows written.", roster.len());

    info!("Reconciling the display store.");
    for record in roster {
        match reconcile_staff_member(config, record).await {
            Ok(()) => {}
            Err(e) => {
                warn!("Failed to reconcile staff member {}: {e}", record.name);
            }
        }
    }

    report(config, roster).await
}

/// Converge the display store onto one record.
///
/// A new name is appended at the end of the display order; a known name only
/// gets its position refreshed, its display_order is never touched.
async fn reconcile_staff_member(
    config: &Config,
    record: &StaffRecord,
) -> Result<(), StoreError> {
    let existing = store::staff_members_by_name(config, &record.name).await?;
    if existing.is_empty() {
        let max_order = store::max_display_order(config).await?;
        store::insert_staff_member(
            config,
            &StaffMemberRow {
                name: record.name.clone(),
                position: record.position.clone(),
                display_order: max_order + 1,
            },
        )
        .await?;
        info!(
            "Inserted staff member {} at display position {}.",
            record.name,
            max_order + 1
        );
    } else {
        store::update_staff_member_position(config, &record.name, &record.position).await?;
        info!(
            "Staff member {} already present, updated the position only.",
            record.name
        );
    }
    Ok(())
}

/// Read back what the batch wrote and print the headcount, grouped by
/// position. Read-only; an error here ends the run.
async fn report(config: &Config, roster: &[StaffRecord]) -> Result<(), StoreError> {
    let employee_ids = roster
        .iter()
        .map(|record| record.employee_id.clone())
        .collect::<Vec<_>>();
    let written = store::users_by_employee_ids(config, &employee_ids).await?;

    println!("\nSynced staff accounts:");
    println!("{}", "-".repeat(60));
    for user in &written {
        println!(
            "  {} | {} | {}",
            user.name,
            user.employee_id,
            user.position.as_deref().unwrap_or("-")
        );
    }
    println!("{}", "-".repeat(60));

    let positions = store::staff_positions(config).await?;
    let by_position = positions
        .iter()
        .filter_map(|row| row.position.as_deref())
        .counts();
    println!("\nStaff headcount: {}", positions.len());
    for (position, count) in by_position.into_iter().sorted() {
        println!("  {position}: {count}");
    }
    Ok(())
}
