//! # preflight-db
//!
//! Checks that the application's PostgreSQL database is reachable before
//! traffic is sent to it. One `SELECT 1` round trip per attempt, a fixed delay
//! between attempts, and a bounded number of attempts.

pub mod postgres;
pub mod probe;

pub use postgres::PgConnector;
pub use probe::{Connector, ProbeOutcome, RetryPolicy, probe_connection};
