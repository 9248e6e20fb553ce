use std::str::FromStr;

use clap::{Args, Parser, Subcommand};
use tracing_subscriber::{EnvFilter, prelude::*};
use tracing_subscriber::{filter, fmt::format::FmtSpan};

mod config;
mod leave_requests;
mod query_user;
mod roster;
mod store;
mod sync_staff;

#[derive(Parser, Debug)]
#[command(
    name = "staff-admin",
    about = "Administrative tasks against the clinic's hosted store",
    long_about = "Administrative tasks against the clinic's hosted store. \
                  The store location and credential are read from SUPABASE_URL and SUPABASE_KEY."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Sync a roster of staff accounts into the user and display tables
    AddStaff(AddStaffArgs),
    /// List all leave requests
    LeaveRequests,
    /// Look up user accounts by exact name and list all account roles
    QueryUser(QueryUserArgs),
}

#[derive(Args, Debug)]
struct AddStaffArgs {
    /// Path to a YAML roster of staff records
    roster: std::path::PathBuf,
}

#[derive(Args, Debug)]
struct QueryUserArgs {
    /// Exact name to look up
    name: String,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = config::Config::create()?;

    // Setup tracing
    let my_crate_filter = EnvFilter::new("staff_admin");
    let level_filter = filter::LevelFilter::from_str(&config.global.log_level)?;
    let subscriber = tracing_subscriber::registry().with(my_crate_filter).with(
        tracing_subscriber::fmt::layer()
            .compact()
            .with_span_events(FmtSpan::NEW | FmtSpan::CLOSE)
            .with_line_number(true)
            .with_filter(level_filter),
    );
    tracing::subscriber::set_global_default(subscriber).expect("static tracing config");

    match cli.command {
        Commands::AddStaff(args) => {
            let records = roster::load_roster(&args.roster)?;
            sync_staff::run(&config, &records).await?;
        }
        Commands::LeaveRequests => {
            leave_requests::run(&config).await?;
        }
        Commands::QueryUser(args) => {
            query_user::run(&config, &args.name).await?;
        }
    }
    Ok(())
}
