//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `STOREFRONT_BASE_URL` - Public URL for the storefront
//!
//! ## Optional
//! - `STOREFRONT_HOST` - Bind address (default: 127.0.0.1)
//! - `STOREFRONT_PORT` - Listen port (default: 3000)
//! - `STOREFRONT_CONTENT_DIR` - Markdown content root (default: crates/storefront/content)
//! - `STOREFRONT_STATIC_DIR` - Static assets root (default: crates/storefront/static)
//! - `FEBSIN_WHATSAPP_ORDER_NUMBER` - WhatsApp number receiving checkout messages
//!   (digits only, country code first, default: 6285291619898)
//! - `FEBSIN_WHATSAPP_CONTACT_NUMBER` - WhatsApp number for customer service
//!   (default: 6281234567890)
//! - `FEBSIN_FREE_SHIPPING_THRESHOLD` - Subtotal in rupiah that ships free (default: 500000)
//! - `FEBSIN_SHIPPING_FEE` - Flat shipping fee in rupiah below the threshold (default: 25000)
//! - `FEBSIN_AUTH_LATENCY_MS` - Simulated login/register delay (default: 500)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name
//! - `SENTRY_SAMPLE_RATE` - Error sample rate, 0.0-1.0 (default: 1.0)
//! - `SENTRY_TRACES_SAMPLE_RATE` - Transaction sample rate, 0.0-1.0 (default: 0.0)

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use febsin_core::Price;
use thiserror::Error;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Public base URL for the storefront
    pub base_url: String,
    /// Directory holding `blog/` and `pages/` markdown
    pub content_dir: PathBuf,
    /// Directory served under `/static`
    pub static_dir: PathBuf,
    /// WhatsApp hand-off numbers
    pub whatsapp: WhatsAppConfig,
    /// Shipping fee rules
    pub shipping: ShippingPolicy,
    /// Simulated delay applied to mock login and registration
    pub auth_latency: Duration,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment name
    pub sentry_environment: Option<String>,
    /// Sentry error sample rate
    pub sentry_sample_rate: f32,
    /// Sentry transaction sample rate
    pub sentry_traces_sample_rate: f32,
}

/// WhatsApp numbers used for the checkout hand-off and the contact page.
///
/// Numbers are stored the way `wa.me` expects them: digits only, country
/// code first, no `+`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WhatsAppConfig {
    /// Admin number that receives order messages
    pub order_number: String,
    /// Customer service number linked from the contact page
    pub contact_number: String,
}

impl Default for WhatsAppConfig {
    fn default() -> Self {
        Self {
            order_number: "6285291619898".to_string(),
            contact_number: "6281234567890".to_string(),
        }
    }
}

/// Flat-rate shipping with a free-shipping threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShippingPolicy {
    /// Subtotal at or above which shipping is free
    pub free_threshold: Price,
    /// Fee charged below the threshold
    pub flat_fee: Price,
}

impl Default for ShippingPolicy {
    fn default() -> Self {
        Self {
            free_threshold: Price::idr(500_000),
            flat_fee: Price::idr(25_000),
        }
    }
}

impl ShippingPolicy {
    /// Shipping cost for a subtotal.
    #[must_use]
    pub fn cost_for(&self, subtotal: Price) -> Price {
        if subtotal >= self.free_threshold {
            Price::zero()
        } else {
            self.flat_fee
        }
    }
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let host = parse_env_or_default::<IpAddr>("STOREFRONT_HOST", "127.0.0.1")?;
        let port = parse_env_or_default::<u16>("STOREFRONT_PORT", "3000")?;
        let base_url = get_required_env("STOREFRONT_BASE_URL")?;
        url::Url::parse(&base_url).map_err(|e| {
            ConfigError::InvalidEnvVar("STOREFRONT_BASE_URL".to_string(), e.to_string())
        })?;

        let content_dir = PathBuf::from(get_env_or_default(
            "STOREFRONT_CONTENT_DIR",
            "crates/storefront/content",
        ));
        let static_dir = PathBuf::from(get_env_or_default(
            "STOREFRONT_STATIC_DIR",
            "crates/storefront/static",
        ));

        let defaults = WhatsAppConfig::default();
        let whatsapp = WhatsAppConfig {
            order_number: get_phone_number("FEBSIN_WHATSAPP_ORDER_NUMBER", &defaults.order_number)?,
            contact_number: get_phone_number(
                "FEBSIN_WHATSAPP_CONTACT_NUMBER",
                &defaults.contact_number,
            )?,
        };

        let shipping = ShippingPolicy {
            free_threshold: Price::idr(parse_env_or_default::<i64>(
                "FEBSIN_FREE_SHIPPING_THRESHOLD",
                "500000",
            )?),
            flat_fee: Price::idr(parse_env_or_default::<i64>("FEBSIN_SHIPPING_FEE", "25000")?),
        };

        let auth_latency =
            Duration::from_millis(parse_env_or_default::<u64>("FEBSIN_AUTH_LATENCY_MS", "500")?);

        Ok(Self {
            host,
            port,
            base_url,
            content_dir,
            static_dir,
            whatsapp,
            shipping,
            auth_latency,
            sentry_dsn: get_optional_env("SENTRY_DSN"),
            sentry_environment: get_optional_env("SENTRY_ENVIRONMENT"),
            sentry_sample_rate: parse_rate("SENTRY_SAMPLE_RATE", "1.0")?,
            sentry_traces_sample_rate: parse_rate("SENTRY_TRACES_SAMPLE_RATE", "0.0")?,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Whether the storefront is served over HTTPS.
    #[must_use]
    pub fn is_secure(&self) -> bool {
        self.base_url.starts_with("https://")
    }

    /// Configuration for tests and local tooling: no env lookups, no latency.
    #[must_use]
    pub fn for_tests(content_dir: impl Into<PathBuf>) -> Self {
        Self {
            host: IpAddr::from([127, 0, 0, 1]),
            port: 3000,
            base_url: "http://localhost:3000".to_string(),
            content_dir: content_dir.into(),
            static_dir: PathBuf::from("static"),
            whatsapp: WhatsAppConfig::default(),
            shipping: ShippingPolicy::default(),
            auth_latency: Duration::ZERO,
            sentry_dsn: None,
            sentry_environment: None,
            sentry_sample_rate: 1.0,
            sentry_traces_sample_rate: 0.0,
        }
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a required environment variable.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

/// Get an optional environment variable, treating empty values as unset.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Parse an environment variable, falling back to `default` when unset.
fn parse_env_or_default<T>(key: &str, default: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    get_env_or_default(key, default)
        .trim()
        .parse::<T>()
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
}

/// Parse a sample rate and check it lies in `0.0..=1.0`.
fn parse_rate(key: &str, default: &str) -> Result<f32, ConfigError> {
    let rate = parse_env_or_default::<f32>(key, default)?;
    if (0.0..=1.0).contains(&rate) {
        Ok(rate)
    } else {
        Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            format!("must be between 0.0 and 1.0 (got {rate})"),
        ))
    }
}

/// Load a WhatsApp number and validate it.
fn get_phone_number(key: &str, default: &str) -> Result<String, ConfigError> {
    let value = get_env_or_default(key, default);
    validate_phone_number(&value)
        .map(|()| value)
        .map_err(|reason| ConfigError::InvalidEnvVar(key.to_string(), reason))
}

/// `wa.me` only accepts international numbers without `+`, spaces or dashes.
fn validate_phone_number(value: &str) -> Result<(), String> {
    if value.is_empty() {
        return Err("must not be empty".to_string());
    }
    if !value.chars().all(|c| c.is_ascii_digit()) {
        return Err("must contain digits only (e.g. 6281234567890)".to_string());
    }
    if value.starts_with('0') {
        return Err("must start with the country code, not 0".to_string());
    }
    if !(8..=15).contains(&value.len()) {
        return Err(format!("must be 8-15 digits (got {})", value.len()));
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_phone_number_accepts_international_digits() {
        assert!(validate_phone_number("6285291619898").is_ok());
    }

    #[test]
    fn test_validate_phone_number_rejects_formatting() {
        assert!(validate_phone_number("+6285291619898").is_err());
        assert!(validate_phone_number("0852-9161-9898").is_err());
        assert!(validate_phone_number("085291619898").is_err());
        assert!(validate_phone_number("").is_err());
        assert!(validate_phone_number("62812").is_err());
    }

    #[test]
    fn test_shipping_policy_threshold_is_inclusive() {
        let policy = ShippingPolicy::default();
        assert_eq!(policy.cost_for(Price::idr(499_999)), Price::idr(25_000));
        assert_eq!(policy.cost_for(Price::idr(500_000)), Price::zero());
        assert_eq!(policy.cost_for(Price::idr(1_250_000)), Price::zero());
    }

    #[test]
    fn test_socket_addr() {
        let config = StorefrontConfig::for_tests("content");
        let addr = config.socket_addr();
        assert_eq!(addr.ip().to_string(), "127.0.0.1");
        assert_eq!(addr.port(), 3000);
        assert!(!config.is_secure());
    }

    #[test]
    fn test_test_config_has_no_latency() {
        let config = StorefrontConfig::for_tests("content");
        assert_eq!(config.auth_latency, Duration::ZERO);
        assert_eq!(config.whatsapp, WhatsAppConfig::default());
    }
}
