//! # preflight-common
//!
//! Shared settings, error handling, and connection-string helpers used by the
//! preflight crates. No deployment logic lives here, just primitives.

pub mod config;
pub mod connection;
pub mod error;

pub use crate::config::DeploySettings;
pub use error::{PreflightError, PreflightResult};
