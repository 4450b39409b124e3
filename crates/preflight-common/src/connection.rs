//! Connection-string helpers.
//!
//! Hosting platforms hand out `postgres://` URLs while the application's
//! database client only accepts `postgresql://`.

use std::borrow::Cow;
use url::Url;

pub const SHORT_SCHEME: &str = "postgres://";
pub const LONG_SCHEME: &str = "postgresql://";

/// Rewrite a leading `postgres://` to `postgresql://`.
///
/// Anything else, including an already-normalized URL, comes back borrowed
/// and untouched.
pub fn normalize_scheme(url: &str) -> Cow<'_, str> {
    match url.strip_prefix(SHORT_SCHEME) {
        Some(rest) => Cow::Owned(format!("{LONG_SCHEME}{rest}")),
        None => Cow::Borrowed(url),
    }
}

/// Mask the password of a connection string for logging.
pub fn redact_password(url: &str) -> String {
    match Url::parse(url) {
        Ok(mut parsed) if parsed.password().is_some() => {
            if parsed.set_password(Some("****")).is_err() {
                return "<redacted>".to_string();
            }
            parsed.to_string()
        }
        Ok(_) => url.to_string(),
        Err(_) => "<unparseable connection string>".to_string(),
    }
}
