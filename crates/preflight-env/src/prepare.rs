//! Environment preparation run before the application starts.

use preflight_common::connection::normalize_scheme;
use preflight_common::{DeploySettings, PreflightResult};
use std::path::{Path, PathBuf};

use crate::layout::ensure_directories;

/// Result of a successful preparation, passed on to whatever starts the
/// application instead of rewriting the process environment.
#[derive(Debug, Clone)]
pub struct PreparedEnvironment {
    /// `DATABASE_URL` with the scheme normalized, if it was set
    pub database_url: Option<String>,
    /// True when the scheme had to be rewritten
    pub database_url_rewritten: bool,
    /// Required variable names that were missing (advisory)
    pub missing: Vec<&'static str>,
    /// Directories that now exist, in creation order
    pub directories: Vec<PathBuf>,
    pub port: String,
}

/// Check settings, normalize the connection string and lay out the upload
/// directories beneath `root`.
///
/// Missing variables only produce a warning. A directory that cannot be
/// created aborts preparation.
pub fn prepare_environment(
    settings: &DeploySettings,
    root: &Path,
) -> PreflightResult<PreparedEnvironment> {
    tracing::info!("Preparing deployment environment...");

    let missing = settings.missing_required();
    if missing.is_empty() {
        tracing::info!("All required environment variables are set");
    } else {
        tracing::warn!("Missing environment variables: {}", missing.join(", "));
    }

    let mut database_url_rewritten = false;
    let database_url = settings.database_url.as_deref().map(|url| {
        let normalized = normalize_scheme(url);
        if normalized != url {
            database_url_rewritten = true;
            tracing::info!("DATABASE_URL rewritten to use postgresql://");
        }
        normalized.into_owned()
    });

    let directories = ensure_directories(root)?;

    let port = settings.port.clone();
    tracing::info!("Application will listen on port {port}");

    tracing::info!("Environment preparation complete");
    Ok(PreparedEnvironment {
        database_url,
        database_url_rewritten,
        missing,
        directories,
        port,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::UPLOAD_DIRS;
    use preflight_common::config::{self, DEFAULT_PORT};
    use preflight_common::PreflightError;

    #[test]
    fn missing_variables_are_advisory() {
        let tmp = tempfile::tempdir().unwrap();
        let settings = config::from_vars(Vec::<(String, String)>::new()).unwrap();

        let prepared = prepare_environment(&settings, tmp.path()).unwrap();
        assert_eq!(
            prepared.missing,
            vec!["DATABASE_URL", "FLASK_SECRET_KEY", "SESSION_SECRET"]
        );
        assert!(prepared.database_url.is_none());
        assert!(!prepared.database_url_rewritten);
        assert_eq!(prepared.port, DEFAULT_PORT);
        assert_eq!(prepared.directories.len(), UPLOAD_DIRS.len());
    }

    #[test]
    fn short_scheme_is_carried_forward_normalized() {
        let tmp = tempfile::tempdir().unwrap();
        let settings = config::from_vars([
            ("DATABASE_URL", "postgres://app:pw@db:5432/site"),
            ("FLASK_SECRET_KEY", "k"),
            ("SESSION_SECRET", "s"),
            ("PORT", "10000"),
        ])
        .unwrap();

        let prepared = prepare_environment(&settings, tmp.path()).unwrap();
        assert!(prepared.missing.is_empty());
        assert!(prepared.database_url_rewritten);
        assert_eq!(
            prepared.database_url.as_deref(),
            Some("postgresql://app:pw@db:5432/site")
        );
        assert_eq!(prepared.port, "10000");
        // Settings themselves stay as loaded
        assert_eq!(
            settings.database_url.as_deref(),
            Some("postgres://app:pw@db:5432/site")
        );
    }

    #[test]
    fn normalized_url_passes_through() {
        let tmp = tempfile::tempdir().unwrap();
        let settings =
            config::from_vars([("DATABASE_URL", "postgresql://app@db/site")]).unwrap();

        let prepared = prepare_environment(&settings, tmp.path()).unwrap();
        assert!(!prepared.database_url_rewritten);
        assert_eq!(prepared.database_url.as_deref(), Some("postgresql://app@db/site"));
    }

    #[test]
    fn filesystem_error_is_fatal() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::write(tmp.path().join("static"), b"").unwrap();
        let settings = config::from_vars(Vec::<(String, String)>::new()).unwrap();

        let err = prepare_environment(&settings, tmp.path()).unwrap_err();
        assert!(matches!(err, PreflightError::CreateDir { .. }));
    }
}
