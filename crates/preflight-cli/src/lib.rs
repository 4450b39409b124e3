//! Shared plumbing for the preflight binaries.

use preflight_env::PreparedEnvironment;
use tracing_subscriber::EnvFilter;

/// Filter used when `RUST_LOG` is unset; covers every `preflight_*` target.
pub const DEFAULT_LOG_FILTER: &str = "preflight=info,sqlx=warn";

/// Install the fmt subscriber. Logs go to stderr so stdout stays usable for
/// `--emit-env` output.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_LOG_FILTER.into()),
        )
        .with_writer(std::io::stderr)
        .with_target(true)
        .init();
}

/// `export NAME='value'` lines for the values a start script should pick up.
pub fn export_lines(prepared: &PreparedEnvironment) -> String {
    let mut out = String::new();
    if let Some(url) = &prepared.database_url {
        out.push_str(&format!("export DATABASE_URL={}\n", shell_quote(url)));
    }
    out.push_str(&format!("export PORT={}\n", shell_quote(&prepared.port)));
    out
}

/// Single-quote for POSIX shells.
fn shell_quote(value: &str) -> String {
    format!("'{}'", value.replace('\'', r"'\''"))
}
