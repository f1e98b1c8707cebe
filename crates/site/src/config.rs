//! Site configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional.
//!
//! - `WANDERLUST_HOST` - Bind address (default: 127.0.0.1)
//! - `WANDERLUST_PORT` - Listen port (default: 3000)
//! - `WANDERLUST_BASE_URL` - Public URL for the site (default: `http://localhost:3000`)
//! - `WANDERLUST_SESSION_SECRET` - Session signing secret (min 64 chars, high
//!   entropy). A random key is generated when unset, which logs everyone out
//!   on restart.
//! - `WANDERLUST_PAYMENT_DELAY_MS` - Simulated payment processing time (default: 2000)
//! - `WANDERLUST_CATALOG_SEED` - Seed for the flight generator; random when unset
//! - `WANDERLUST_DEMO_BOOKINGS` - Seed demo booking history on login (default: true)
//! - `WANDERLUST_RATE_LIMIT` - Rate limit the login and register forms (default: true)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name
//! - `SENTRY_SAMPLE_RATE` - Error event sample rate (default: 1.0)
//! - `SENTRY_TRACES_SAMPLE_RATE` - Transaction sample rate (default: 0.0)

use std::collections::HashMap;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::str::FromStr;
use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;

/// Minimum session secret length; the cookie signing key needs 64 bytes.
const MIN_SESSION_SECRET_LENGTH: usize = 64;
const MIN_ENTROPY_BITS_PER_CHAR: f64 = 3.3;

/// Blocklist of common placeholder patterns (case-insensitive)
const PLACEHOLDER_PATTERNS: &[&str] = &[
    "your-",
    "changeme",
    "replace",
    "placeholder",
    "example",
    "secret",
    "password",
    "xxx",
    "todo",
    "fixme",
    "insert",
    "enter-",
    "put-your",
    "add-your",
];

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
    #[error("Insecure secret in {0}: {1}")]
    InsecureSecret(String, String),
}

/// Site configuration.
#[derive(Debug, Clone)]
pub struct SiteConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Public base URL for the site
    pub base_url: String,
    /// Session signing secret
    pub session_secret: Option<SecretString>,
    /// How long the simulated payment gateway takes
    pub payment_delay: Duration,
    /// Fixed seed for the flight catalog
    pub catalog_seed: Option<u64>,
    /// Whether logging in seeds the demo booking history
    pub demo_bookings: bool,
    /// Whether the login and register forms are rate limited
    pub rate_limit: bool,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    pub sentry_environment: Option<String>,
    pub sentry_sample_rate: f32,
    pub sentry_traces_sample_rate: f32,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: 3000,
            base_url: "http://localhost:3000".to_owned(),
            session_secret: None,
            payment_delay: wanderlust_core::payment::PROCESSING_DELAY,
            catalog_seed: None,
            demo_bookings: true,
            rate_limit: true,
            sentry_dsn: None,
            sentry_environment: None,
            sentry_sample_rate: 1.0,
            sentry_traces_sample_rate: 0.0,
        }
    }
}

impl SiteConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is malformed or if the session
    /// secret fails validation (length, placeholder detection, entropy check).
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// See [`SiteConfig::from_env`].
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let env = Env(&lookup);
        let defaults = Self::default();

        let session_secret = match env.optional("WANDERLUST_SESSION_SECRET") {
            Some(value) => {
                let secret = SecretString::from(value);
                validate_session_secret(&secret, "WANDERLUST_SESSION_SECRET")?;
                validate_secret_strength(secret.expose_secret(), "WANDERLUST_SESSION_SECRET")?;
                Some(secret)
            }
            None => None,
        };

        Ok(Self {
            host: env.parsed("WANDERLUST_HOST", defaults.host)?,
            port: env.parsed("WANDERLUST_PORT", defaults.port)?,
            base_url: env
                .optional("WANDERLUST_BASE_URL")
                .unwrap_or(defaults.base_url),
            session_secret,
            payment_delay: Duration::from_millis(env.parsed(
                "WANDERLUST_PAYMENT_DELAY_MS",
                u64::try_from(defaults.payment_delay.as_millis()).unwrap_or(2000),
            )?),
            catalog_seed: env
                .optional("WANDERLUST_CATALOG_SEED")
                .map(|raw| parse_var("WANDERLUST_CATALOG_SEED", &raw))
                .transpose()?,
            demo_bookings: env.flag("WANDERLUST_DEMO_BOOKINGS", defaults.demo_bookings)?,
            rate_limit: env.flag("WANDERLUST_RATE_LIMIT", defaults.rate_limit)?,
            sentry_dsn: env.optional("SENTRY_DSN"),
            sentry_environment: env.optional("SENTRY_ENVIRONMENT"),
            sentry_sample_rate: env.parsed("SENTRY_SAMPLE_RATE", defaults.sentry_sample_rate)?,
            sentry_traces_sample_rate: env.parsed(
                "SENTRY_TRACES_SAMPLE_RATE",
                defaults.sentry_traces_sample_rate,
            )?,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

struct Env<'a>(&'a dyn Fn(&str) -> Option<String>);

impl Env<'_> {
    /// Get an optional variable, treating blank values as unset.
    fn optional(&self, key: &str) -> Option<String> {
        (self.0)(key).filter(|v| !v.trim().is_empty())
    }

    /// Parse a variable, falling back to `default` when unset.
    fn parsed<T>(&self, key: &str, default: T) -> Result<T, ConfigError>
    where
        T: FromStr,
        T::Err: std::fmt::Display,
    {
        self.optional(key)
            .map_or(Ok(default), |raw| parse_var(key, &raw))
    }

    /// Parse a boolean flag (`true/false`, `1/0`, `yes/no`, `on/off`).
    fn flag(&self, key: &str, default: bool) -> Result<bool, ConfigError> {
        let Some(raw) = self.optional(key) else {
            return Ok(default);
        };
        match raw.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Ok(true),
            "0" | "false" | "no" | "off" => Ok(false),
            other => Err(ConfigError::InvalidEnvVar(
                key.to_string(),
                format!("expected a boolean, got '{other}'"),
            )),
        }
    }
}

fn parse_var<T>(key: &str, raw: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    raw.trim()
        .parse::<T>()
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
}

/// Validate that a session secret meets minimum length requirements.
fn validate_session_secret(secret: &SecretString, var_name: &str) -> Result<(), ConfigError> {
    let value = secret.expose_secret();
    if value.len() < MIN_SESSION_SECRET_LENGTH {
        return Err(ConfigError::InsecureSecret(
            var_name.to_string(),
            format!(
                "must be at least {} characters (got {})",
                MIN_SESSION_SECRET_LENGTH,
                value.len()
            ),
        ));
    }
    Ok(())
}

/// Calculate Shannon entropy in bits per character.
fn shannon_entropy(s: &str) -> f64 {
    if s.is_empty() {
        return 0.0;
    }

    let mut freq: HashMap<char, usize> = HashMap::new();
    for c in s.chars() {
        *freq.entry(c).or_insert(0) += 1;
    }

    #[allow(clippy::cast_precision_loss)] // String length will never exceed f64 precision
    let len = s.len() as f64;
    freq.values()
        .map(|&count| {
            #[allow(clippy::cast_precision_loss)] // Character count will never exceed f64 precision
            let p = count as f64 / len;
            -p * p.log2()
        })
        .sum()
}

/// Validate that a secret is not a placeholder and has sufficient entropy.
fn validate_secret_strength(secret: &str, var_name: &str) -> Result<(), ConfigError> {
    let lower = secret.to_lowercase();

    if let Some(pattern) = PLACEHOLDER_PATTERNS.iter().find(|p| lower.contains(*p)) {
        return Err(ConfigError::InsecureSecret(
            var_name.to_string(),
            format!("appears to be a placeholder (contains '{pattern}')"),
        ));
    }

    let entropy = shannon_entropy(secret);
    if entropy < MIN_ENTROPY_BITS_PER_CHAR {
        return Err(ConfigError::InsecureSecret(
            var_name.to_string(),
            format!(
                "entropy too low ({entropy:.2} bits/char, need >= {MIN_ENTROPY_BITS_PER_CHAR:.1}). Use a randomly generated secret."
            ),
        ));
    }

    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    const STRONG_SECRET: &str =
        "aB3$xY9!mK2@nL5#pQ7&rT0*uW4^zC6-dE8+fG1=hJ3~kM5?oP7%qR9<sU2>vX4;";

    fn load(vars: &[(&str, &str)]) -> Result<SiteConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect();
        SiteConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_shannon_entropy_empty() {
        assert!((shannon_entropy("") - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_shannon_entropy_two_chars() {
        // "ab" has entropy of 1 bit per char (50% a, 50% b)
        let entropy = shannon_entropy("ab");
        assert!((entropy - 1.0).abs() < 0.01);
    }

    #[test]
    fn test_validate_secret_strength_placeholder() {
        let result = validate_secret_strength("your-session-key-here", "TEST_VAR");
        assert!(matches!(result, Err(ConfigError::InsecureSecret(_, _))));
    }

    #[test]
    fn test_validate_secret_strength_low_entropy() {
        let result = validate_secret_strength(&"a".repeat(64), "TEST_VAR");
        assert!(matches!(result, Err(ConfigError::InsecureSecret(_, _))));
    }

    #[test]
    fn test_validate_secret_strength_valid() {
        assert!(validate_secret_strength(STRONG_SECRET, "TEST_VAR").is_ok());
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = load(&[]).unwrap();
        assert_eq!(config.socket_addr().to_string(), "127.0.0.1:3000");
        assert_eq!(config.base_url, "http://localhost:3000");
        assert!(config.session_secret.is_none());
        assert_eq!(config.payment_delay, Duration::from_secs(2));
        assert_eq!(config.catalog_seed, None);
        assert!(config.demo_bookings);
        assert!(config.rate_limit);
        assert!(config.sentry_dsn.is_none());
    }

    #[test]
    fn test_overrides() {
        let config = load(&[
            ("WANDERLUST_HOST", "0.0.0.0"),
            ("WANDERLUST_PORT", "8080"),
            ("WANDERLUST_PAYMENT_DELAY_MS", "0"),
            ("WANDERLUST_CATALOG_SEED", "42"),
            ("WANDERLUST_DEMO_BOOKINGS", "false"),
            ("WANDERLUST_RATE_LIMIT", "off"),
            ("WANDERLUST_SESSION_SECRET", STRONG_SECRET),
            ("SENTRY_SAMPLE_RATE", "0.5"),
        ])
        .unwrap();
        assert_eq!(config.socket_addr().to_string(), "0.0.0.0:8080");
        assert_eq!(config.payment_delay, Duration::ZERO);
        assert_eq!(config.catalog_seed, Some(42));
        assert!(!config.demo_bookings);
        assert!(!config.rate_limit);
        assert!(config.session_secret.is_some());
        assert!((config.sentry_sample_rate - 0.5).abs() < f32::EPSILON);
    }

    #[test]
    fn test_invalid_values() {
        assert!(matches!(
            load(&[("WANDERLUST_PORT", "eighty")]),
            Err(ConfigError::InvalidEnvVar(key, _)) if key == "WANDERLUST_PORT"
        ));
        assert!(matches!(
            load(&[("WANDERLUST_RATE_LIMIT", "maybe")]),
            Err(ConfigError::InvalidEnvVar(_, _))
        ));
    }

    #[test]
    fn test_short_session_secret_rejected() {
        assert!(matches!(
            load(&[("WANDERLUST_SESSION_SECRET", "aB3$xY9!mK2@nL5#")]),
            Err(ConfigError::InsecureSecret(_, _))
        ));
    }

    #[test]
    fn test_debug_does_not_leak_secret() {
        let config = load(&[("WANDERLUST_SESSION_SECRET", STRONG_SECRET)]).unwrap();
        assert!(!format!("{config:?}").contains(STRONG_SECRET));
    }
}
