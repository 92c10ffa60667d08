//! Pricing configuration from the environment.
//!
//! Reads `.env` through dotenvy, then:
//! - `PRICING_CURRENCY_CODE` (default `PHP`)
//! - `PRICING_CURRENCY_SYMBOL` (default `₱`)
//! - `PRICING_THOUSANDS_SEPARATOR` (default `,`)

use crate::error::{PricingError, Result};
use crate::pricing::CurrencyFormat;

/// Currency settings shared by owner preview and renter checkout
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PricingConfig {
    pub currency_code: String,
    pub currency_symbol: String,
    pub thousands_separator: String,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            currency_code: "PHP".to_string(),
            currency_symbol: "₱".to_string(),
            thousands_separator: ",".to_string(),
        }
    }
}

impl PricingConfig {
    /// Load from the process environment (and `.env`, if present)
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; unset keys fall back to defaults
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let currency_code = match lookup("PRICING_CURRENCY_CODE") {
            Some(code) => {
                let code = code.trim().to_ascii_uppercase();
                if code.len() != 3 || !code.chars().all(|c| c.is_ascii_alphabetic()) {
                    return Err(PricingError::Config(format!(
                        "PRICING_CURRENCY_CODE must be a 3-letter ISO code, got '{}'",
                        code
                    )));
                }
                code
            }
            None => defaults.currency_code,
        };

        let currency_symbol = match lookup("PRICING_CURRENCY_SYMBOL") {
            Some(symbol) if symbol.trim().is_empty() => {
                return Err(PricingError::Config(
                    "PRICING_CURRENCY_SYMBOL must not be empty".to_string(),
                ));
            }
            Some(symbol) => symbol.trim().to_string(),
            None => defaults.currency_symbol,
        };

        let thousands_separator =
            lookup("PRICING_THOUSANDS_SEPARATOR").unwrap_or(defaults.thousands_separator);

        tracing::debug!(
            currency_code = %currency_code,
            currency_symbol = %currency_symbol,
            "Loaded pricing configuration"
        );

        Ok(Self {
            currency_code,
            currency_symbol,
            thousands_separator,
        })
    }

    pub fn currency_format(&self) -> CurrencyFormat {
        CurrencyFormat::new(&self.currency_code, &self.currency_symbol)
            .with_thousands_separator(&self.thousands_separator)
    }
}
