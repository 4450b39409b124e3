//! # preflight-prepare
//!
//! Run before the web application starts: warns about missing secrets,
//! normalizes `DATABASE_URL`, and creates the upload directories.
//!
//! Exits 0 unless something unrecoverable (e.g. a filesystem error) happens.

use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "preflight-prepare", version)]
#[command(about = "Prepare the deployment environment for the web application")]
struct Args {
    /// Directory the upload tree is created under
    #[arg(long, env = "PREFLIGHT_ROOT", default_value = ".")]
    root: PathBuf,

    /// Print `export` lines for the normalized settings on stdout
    #[arg(long)]
    emit_env: bool,
}

fn main() -> ExitCode {
    let _ = dotenvy::dotenv();
    let args = Args::parse();
    preflight_cli::init_tracing();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("Environment preparation failed: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> anyhow::Result<()> {
    let settings = preflight_common::config::init()?;
    let prepared = preflight_env::prepare_environment(&settings, &args.root)?;

    if args.emit_env {
        print!("{}", preflight_cli::export_lines(&prepared));
    }
    Ok(())
}
