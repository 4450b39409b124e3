//! PostgreSQL client used by the probe.

use async_trait::async_trait;
use preflight_common::{PreflightError, PreflightResult};
use sqlx::postgres::{PgConnectOptions, PgConnection};
use sqlx::Connection;
use std::str::FromStr;
use std::time::Duration;

use crate::probe::Connector;

/// Opens one fresh connection per attempt and runs `SELECT 1` on it.
///
/// No pool: a refused or unreachable server fails the attempt straight away
/// with the driver's own error, and the fixed delay in the probe loop is the
/// only wait between tries.
#[derive(Debug, Clone)]
pub struct PgConnector {
    /// Upper bound on establishing a connection
    pub connect_timeout: Duration,
}

impl Default for PgConnector {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(10),
        }
    }
}

#[async_trait]
impl Connector for PgConnector {
    async fn round_trip(&self, database_url: &str) -> PreflightResult<i32> {
        let options = PgConnectOptions::from_str(database_url)?;

        let connect = PgConnection::connect_with(&options);
        let mut conn = tokio::time::timeout(self.connect_timeout, connect)
            .await
            .map_err(|_| PreflightError::ConnectTimeout {
                after: self.connect_timeout,
            })??;

        let result = select_one(&mut conn).await;
        // Close on both paths; a failed close only loses the goodbye message
        if let Err(e) = conn.close().await {
            tracing::debug!("Closing probe connection failed: {e}");
        }
        result
    }
}

/// Liveness ping, then `SELECT 1`, on a connection owned by the caller.
async fn select_one(conn: &mut PgConnection) -> PreflightResult<i32> {
    conn.ping().await?;
    let value: i32 = sqlx::query_scalar("SELECT 1").fetch_one(&mut *conn).await?;
    Ok(value)
}
