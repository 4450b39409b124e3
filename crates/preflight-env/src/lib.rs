//! # preflight-env
//!
//! Prepares a working directory for the web application:
//! - **Advisory checks** — warns about missing required variables, never aborts
//! - **Connection string** — rewrites `postgres://` to `postgresql://`
//! - **Upload layout** — creates the upload and instance directories

pub mod layout;
pub mod prepare;

pub use layout::{UPLOAD_DIRS, ensure_directories};
pub use prepare::{PreparedEnvironment, prepare_environment};
