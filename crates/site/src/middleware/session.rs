//! Session middleware configuration.
//!
//! Sessions live in process memory and stand in for the visitor's browser
//! storage: search, booking draft, identity, bookings and toasts. Nothing
//! survives a restart.

use secrecy::ExposeSecret;
use tower_sessions::cookie::Key;
use tower_sessions::service::SignedCookie;
use tower_sessions::{Expiry, MemoryStore, SessionManagerLayer};

use crate::config::SiteConfig;

/// Session cookie name.
pub const SESSION_COOKIE_NAME: &str = "ww_session";

/// Session expiry time in seconds (7 days).
const SESSION_EXPIRY_SECONDS: i64 = 7 * 24 * 60 * 60;

/// Create the session layer with an in-memory store.
///
/// The cookie is signed with a key derived from `session_secret`, or with a
/// fresh random key when no secret is configured.
#[must_use]
pub fn create_session_layer(
    config: &SiteConfig,
) -> SessionManagerLayer<MemoryStore, SignedCookie> {
    let key = config
        .session_secret
        .as_ref()
        .and_then(|secret| Key::try_from(secret.expose_secret().as_bytes()).ok())
        .unwrap_or_else(|| {
            tracing::warn!("No usable session secret, sessions will not survive a restart");
            Key::generate()
        });

    let is_secure = config.base_url.starts_with("https://");

    SessionManagerLayer::new(MemoryStore::default())
        .with_name(SESSION_COOKIE_NAME)
        .with_expiry(Expiry::OnInactivity(
            tower_sessions::cookie::time::Duration::seconds(SESSION_EXPIRY_SECONDS),
        ))
        .with_secure(is_secure)
        .with_same_site(tower_sessions::cookie::SameSite::Lax)
        .with_http_only(true)
        .with_path("/")
        .with_signed(key)
}

#[cfg(test)]
mod tests {
    use secrecy::SecretString;

    use super::*;

    #[test]
    fn test_layer_builds_without_secret() {
        let config = SiteConfig::default();
        let _layer: SessionManagerLayer<MemoryStore, SignedCookie> =
            create_session_layer(&config);
    }

    #[test]
    fn test_layer_builds_from_configured_secret() {
        let config = SiteConfig {
            session_secret: Some(SecretString::from("k7Qz".repeat(16))),
            ..SiteConfig::default()
        };
        let _layer: SessionManagerLayer<MemoryStore, SignedCookie> =
            create_session_layer(&config);
    }
}
