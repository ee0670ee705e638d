//! Cart and checkout configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All optional:
//! - `CART_STORAGE_DIR` - Directory for [`FileStorage`](crate::storage::FileStorage) (default: `.filament-cart`)
//! - `CART_STORAGE_KEY` - Key the cart blob is stored under (default: `@protopasta_cart`)
//! - `CART_CHANNEL_CAPACITY` - Cart actor mailbox size, at least 1 (default: 32)
//! - `CHECKOUT_DELAY_MS` - Simulated payment processing time (default: 2000)
//! - `CHECKOUT_TAX_RATE` - Tax rate as a fraction (default: 0.08)
//! - `CHECKOUT_SHIPPING` - Flat shipping charge (default: 9.99)

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use rust_decimal::Decimal;
use thiserror::Error;

use crate::cart_actor::CART_STORAGE_KEY;

const DEFAULT_STORAGE_DIR: &str = ".filament-cart";
const DEFAULT_CHANNEL_CAPACITY: usize = 32;
const DEFAULT_CHECKOUT_DELAY_MS: u64 = 2000;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Application configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct StorefrontConfig {
    /// Directory the file-backed store writes into
    pub storage_dir: PathBuf,
    /// Storage key for the cart blob
    pub storage_key: String,
    /// Capacity of the cart actor's request channel
    pub channel_capacity: usize,
    /// Checkout pricing and timing
    pub checkout: CheckoutConfig,
}

/// Checkout pricing and the simulated processing delay.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckoutConfig {
    pub processing_delay: Duration,
    pub tax_rate: Decimal,
    pub shipping: Decimal,
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            storage_dir: PathBuf::from(DEFAULT_STORAGE_DIR),
            storage_key: CART_STORAGE_KEY.to_string(),
            channel_capacity: DEFAULT_CHANNEL_CAPACITY,
            checkout: CheckoutConfig::default(),
        }
    }
}

impl Default for CheckoutConfig {
    fn default() -> Self {
        Self {
            processing_delay: Duration::from_millis(DEFAULT_CHECKOUT_DELAY_MS),
            tax_rate: Decimal::new(8, 2),
            shipping: Decimal::new(999, 2),
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
    /// Returns `ConfigError` if a variable is set but cannot be parsed or is
    /// out of range.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let storage_dir = lookup("CART_STORAGE_DIR")
            .map(PathBuf::from)
            .unwrap_or(defaults.storage_dir);
        let storage_key = lookup("CART_STORAGE_KEY").unwrap_or(defaults.storage_key);
        if storage_key.is_empty() {
            return Err(invalid("CART_STORAGE_KEY", "must not be empty"));
        }

        let channel_capacity =
            parse_or("CART_CHANNEL_CAPACITY", &lookup, defaults.channel_capacity)?;
        if channel_capacity == 0 {
            return Err(invalid("CART_CHANNEL_CAPACITY", "must be at least 1"));
        }

        let delay_ms = parse_or("CHECKOUT_DELAY_MS", &lookup, DEFAULT_CHECKOUT_DELAY_MS)?;
        let tax_rate = parse_or("CHECKOUT_TAX_RATE", &lookup, defaults.checkout.tax_rate)?;
        if tax_rate.is_sign_negative() {
            return Err(invalid("CHECKOUT_TAX_RATE", "must not be negative"));
        }
        let shipping = parse_or("CHECKOUT_SHIPPING", &lookup, defaults.checkout.shipping)?;
        if shipping.is_sign_negative() {
            return Err(invalid("CHECKOUT_SHIPPING", "must not be negative"));
        }

        Ok(Self {
            storage_dir,
            storage_key,
            channel_capacity,
            checkout: CheckoutConfig {
                processing_delay: Duration::from_millis(delay_ms),
                tax_rate,
                shipping,
            },
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

fn invalid(key: &str, reason: &str) -> ConfigError {
    ConfigError::InvalidEnvVar(key.to_string(), reason.to_string())
}

/// Parse a variable if set, otherwise fall back to `default`.
fn parse_or<T>(
    key: &str,
    lookup: &impl Fn(&str) -> Option<String>,
    default: T,
) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string())),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = StorefrontConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config, StorefrontConfig::default());
        assert_eq!(config.storage_key, "@protopasta_cart");
        assert_eq!(config.checkout.processing_delay, Duration::from_secs(2));
        assert_eq!(config.checkout.tax_rate, Decimal::new(8, 2));
        assert_eq!(config.checkout.shipping, Decimal::new(999, 2));
    }

    #[test]
    fn test_overrides() {
        let config = StorefrontConfig::from_lookup(lookup_from(&[
            ("CART_STORAGE_DIR", "/tmp/carts"),
            ("CART_STORAGE_KEY", "cart-v2"),
            ("CART_CHANNEL_CAPACITY", "8"),
            ("CHECKOUT_DELAY_MS", "0"),
            ("CHECKOUT_TAX_RATE", "0.0725"),
            ("CHECKOUT_SHIPPING", " 4.50 "),
        ]))
        .unwrap();

        assert_eq!(config.storage_dir, PathBuf::from("/tmp/carts"));
        assert_eq!(config.storage_key, "cart-v2");
        assert_eq!(config.channel_capacity, 8);
        assert_eq!(config.checkout.processing_delay, Duration::ZERO);
        assert_eq!(config.checkout.tax_rate, Decimal::new(725, 4));
        assert_eq!(config.checkout.shipping, Decimal::new(450, 2));
    }

    #[test]
    fn test_zero_capacity_rejected() {
        let result = StorefrontConfig::from_lookup(lookup_from(&[("CART_CHANNEL_CAPACITY", "0")]));
        assert!(matches!(result, Err(ConfigError::InvalidEnvVar(key, _)) if key == "CART_CHANNEL_CAPACITY"));
    }

    #[test]
    fn test_unparsable_values_rejected() {
        let result = StorefrontConfig::from_lookup(lookup_from(&[("CHECKOUT_DELAY_MS", "soon")]));
        assert!(matches!(result, Err(ConfigError::InvalidEnvVar(key, _)) if key == "CHECKOUT_DELAY_MS"));

        let result = StorefrontConfig::from_lookup(lookup_from(&[("CHECKOUT_TAX_RATE", "-0.1")]));
        assert!(result.is_err());
    }
}
