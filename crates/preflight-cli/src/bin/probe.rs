//! # preflight-probe
//!
//! Verifies the database in `DATABASE_URL` answers `SELECT 1`, retrying with a
//! fixed delay. Exits 0 once it does, 1 if every attempt fails or the URL is
//! not set.

use clap::Parser;
use preflight_db::{PgConnector, ProbeOutcome, RetryPolicy, probe_connection};
use std::process::ExitCode;
use std::time::Duration;

#[derive(Parser)]
#[command(name = "preflight-probe", version)]
#[command(about = "Check that the application database is reachable")]
struct Args {
    /// Number of connection attempts
    #[arg(long, env = "PREFLIGHT_MAX_ATTEMPTS", default_value_t = RetryPolicy::DEFAULT_MAX_ATTEMPTS)]
    max_attempts: u32,

    /// Seconds to wait between attempts
    #[arg(long, env = "PREFLIGHT_DELAY_SECS", default_value_t = RetryPolicy::DEFAULT_DELAY_SECS)]
    delay_secs: u64,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let _ = dotenvy::dotenv();
    let args = Args::parse();
    preflight_cli::init_tracing();

    match run(&args).await {
        Ok(outcome) if outcome.is_success() => {
            tracing::info!("Database connection verified");
            ExitCode::SUCCESS
        }
        Ok(outcome) => {
            tracing::error!(attempts = outcome.attempts(), "Database connection check failed");
            ExitCode::FAILURE
        }
        Err(e) => {
            tracing::error!("Database probe could not start: {e:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(args: &Args) -> anyhow::Result<ProbeOutcome> {
    let settings = preflight_common::config::init()?;
    let policy = RetryPolicy::new(args.max_attempts, Duration::from_secs(args.delay_secs))?;

    let outcome = probe_connection(
        settings.database_url.as_deref(),
        &policy,
        &PgConnector::default(),
    )
    .await;
    Ok(outcome)
}
