//! Deployment settings loaded from environment variables.
//!
//! Supports `.env` files for development and environment variables for
//! production. Values are read once at startup and handed around by reference.

use serde::Deserialize;
use std::ffi::OsString;

/// Port reported when `PORT` is not set. Informational only.
pub const DEFAULT_PORT: &str = "5000";

/// Names that must be present for the application to start cleanly.
pub const REQUIRED_VARS: [&str; 3] = ["DATABASE_URL", "FLASK_SECRET_KEY", "SESSION_SECRET"];

/// Every variable the settings are built from.
pub const SETTING_VARS: [&str; 4] = ["DATABASE_URL", "FLASK_SECRET_KEY", "SESSION_SECRET", "PORT"];

/// Load settings from the process environment, reading `.env` first if present.
///
/// Only [`SETTING_VARS`] are looked at, so unrelated variables with non-UTF-8
/// values cannot get in the way.
pub fn init() -> Result<DeploySettings, config::ConfigError> {
    let _ = dotenvy::dotenv();
    from_vars(read_vars(|name| std::env::var_os(name)))
}

/// Look up each of [`SETTING_VARS`]; a value that is not UTF-8 counts as unset.
fn read_vars<F>(lookup: F) -> Vec<(&'static str, String)>
where
    F: Fn(&str) -> Option<OsString>,
{
    SETTING_VARS
        .iter()
        .filter_map(|&name| match lookup(name)?.into_string() {
            Ok(value) => Some((name, value)),
            Err(_) => {
                tracing::warn!("{name} is not valid UTF-8; treating it as unset");
                None
            }
        })
        .collect()
}

/// Load settings from an explicit set of variables instead of the process
/// environment.
pub fn from_vars<I, K, V>(vars: I) -> Result<DeploySettings, config::ConfigError>
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<String>,
{
    let map = vars
        .into_iter()
        .map(|(k, v)| (k.into(), v.into()))
        .collect::<config::Map<String, String>>();
    build(map)
}

fn build(source: config::Map<String, String>) -> Result<DeploySettings, config::ConfigError> {
    let cfg = config::Config::builder()
        .set_default("port", DEFAULT_PORT)?
        // Unprefixed: DATABASE_URL -> database_url, PORT -> port
        .add_source(config::Environment::default().source(Some(source)))
        .build()?;

    let settings: DeploySettings = cfg.try_deserialize()?;
    Ok(settings.without_empty_values())
}

#[derive(Debug, Deserialize, Clone)]
pub struct DeploySettings {
    /// PostgreSQL connection URL, possibly with the short `postgres://` scheme
    pub database_url: Option<String>,
    /// Presence-checked only
    pub flask_secret_key: Option<String>,
    /// Presence-checked only
    pub session_secret: Option<String>,
    /// Listening port as given; never parsed
    pub port: String,
}

impl DeploySettings {
    /// Required variable names that are unset or empty, in declaration order.
    pub fn missing_required(&self) -> Vec<&'static str> {
        let values = [
            &self.database_url,
            &self.flask_secret_key,
            &self.session_secret,
        ];
        REQUIRED_VARS
            .iter()
            .zip(values)
            .filter(|(_, value)| value.is_none())
            .map(|(name, _)| *name)
            .collect()
    }

    fn without_empty_values(self) -> Self {
        fn non_empty(value: Option<String>) -> Option<String> {
            value.filter(|v| !v.is_empty())
        }

        Self {
            database_url: non_empty(self.database_url),
            flask_secret_key: non_empty(self.flask_secret_key),
            session_secret: non_empty(self.session_secret),
            port: if self.port.is_empty() {
                DEFAULT_PORT.to_string()
            } else {
                self.port
            },
        }
    }
}
