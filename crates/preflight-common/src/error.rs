//! Centralized error type for the preflight tools.
//!
//! Errors are never handed to a programmatic caller; the binaries log them and
//! turn them into a process exit code.

use std::path::PathBuf;

/// Core error type used across all preflight crates.
#[derive(Debug, thiserror::Error)]
pub enum PreflightError {
    // === Startup errors ===
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Invalid retry policy: {message}")]
    InvalidPolicy { message: String },

    // === Filesystem errors ===
    #[error("Failed to create directory {}: {source}", path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // === Infrastructure errors ===
    #[error("Connection not established within {}s", after.as_secs_f32())]
    ConnectTimeout { after: std::time::Duration },

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl PreflightError {
    /// Short code attached to log lines so failures can be grepped by kind.
    pub fn error_code(&self) -> &str {
        match self {
            Self::Config(_) => "CONFIG_ERROR",
            Self::InvalidPolicy { .. } => "INVALID_POLICY",
            Self::CreateDir { .. } => "FILESYSTEM_ERROR",
            Self::ConnectTimeout { .. } => "CONNECT_TIMEOUT",
            Self::Database(_) => "DATABASE_ERROR",
        }
    }
}

/// Convenience type alias for Results using PreflightError.
pub type PreflightResult<T> = Result<T, PreflightError>;
