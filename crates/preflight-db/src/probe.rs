//! Connectivity probe with a fixed-delay retry loop.

use async_trait::async_trait;
use preflight_common::connection::{normalize_scheme, redact_password};
use preflight_common::{PreflightError, PreflightResult};
use std::time::Duration;

/// One connection attempt: build a client, run a trivial query, release everything.
#[async_trait]
pub trait Connector: Send + Sync {
    /// Returns the value of `SELECT 1` on success.
    async fn round_trip(&self, database_url: &str) -> PreflightResult<i32>;
}

/// How many times to try and how long to wait in between.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    max_attempts: u32,
    delay: Duration,
}

impl RetryPolicy {
    pub const DEFAULT_MAX_ATTEMPTS: u32 = 5;
    pub const DEFAULT_DELAY_SECS: u64 = 5;

    pub fn new(max_attempts: u32, delay: Duration) -> PreflightResult<Self> {
        if max_attempts == 0 {
            return Err(PreflightError::InvalidPolicy {
                message: "max_attempts must be at least 1".into(),
            });
        }
        Ok(Self {
            max_attempts,
            delay,
        })
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: Self::DEFAULT_MAX_ATTEMPTS,
            delay: Duration::from_secs(Self::DEFAULT_DELAY_SECS),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeOutcome {
    /// `SELECT 1` succeeded on the given attempt.
    Connected { attempts: u32 },
    /// Every attempt failed.
    Exhausted { attempts: u32 },
    /// No connection string configured; nothing was attempted.
    MissingUrl,
}

impl ProbeOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Connected { .. })
    }

    pub fn attempts(&self) -> u32 {
        match self {
            Self::Connected { attempts } | Self::Exhausted { attempts } => *attempts,
            Self::MissingUrl => 0,
        }
    }
}

/// Try to reach the database up to `policy.max_attempts()` times.
///
/// The scheme is normalized locally; nothing outside this call sees the
/// rewritten URL. Returns as soon as one attempt succeeds.
pub async fn probe_connection<C>(
    database_url: Option<&str>,
    policy: &RetryPolicy,
    connector: &C,
) -> ProbeOutcome
where
    C: Connector + ?Sized,
{
    let Some(database_url) = database_url.filter(|url| !url.is_empty()) else {
        tracing::error!("DATABASE_URL is not set");
        return ProbeOutcome::MissingUrl;
    };

    let url = normalize_scheme(database_url);
    if url != database_url {
        tracing::info!("Connection string adjusted to use postgresql://");
    }
    tracing::info!(target_db = %redact_password(&url), "Probing database");

    let max = policy.max_attempts();
    for attempt in 1..=max {
        tracing::info!("Connecting to database ({attempt}/{max})...");

        match connector.round_trip(&url).await {
            Ok(value) => {
                tracing::info!(attempt, "Connected. Query result: ({value},)");
                return ProbeOutcome::Connected { attempts: attempt };
            }
            Err(e) => {
                tracing::error!(attempt, code = e.error_code(), "Database connection failed: {e}");
                if attempt < max {
                    tracing::info!("Retrying in {} seconds...", policy.delay().as_secs());
                    tokio::time::sleep(policy.delay()).await;
                }
            }
        }
    }

    tracing::error!("All {max} connection attempts failed; database unreachable");
    ProbeOutcome::Exhausted { attempts: max }
}
