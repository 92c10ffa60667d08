//! Display strings for discount rules.

use rust_decimal::prelude::*;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{PricingError, Result};

use super::calculators::{round_money, MONEY_PLACES};
use super::models::{DiscountRule, DiscountType};
use super::validation::validate_rule;

/// Renders a money amount for display.
///
/// Injected into `format_discount_description` so the owner's rule list and
/// the renter's checkout print amounts the same way.
pub trait CurrencyFormatter {
    fn format_amount(&self, amount: Decimal) -> String;
}

impl<F> CurrencyFormatter for F
where
    F: Fn(Decimal) -> String,
{
    fn format_amount(&self, amount: Decimal) -> String {
        self(amount)
    }
}

/// Symbol-prefixed currency format, e.g. `₱1,250` or `₱1,250.50`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrencyFormat {
    pub code: String,
    pub symbol: String,
    pub thousands_separator: String,
}

impl CurrencyFormat {
    pub fn new(code: impl Into<String>, symbol: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            symbol: symbol.into(),
            thousands_separator: ",".to_string(),
        }
    }

    pub fn with_thousands_separator(mut self, separator: impl Into<String>) -> Self {
        self.thousands_separator = separator.into();
        self
    }

    /// Format for an ISO 4217 code, with the symbol for the codes the
    /// marketplace lists in; other codes print as `USD 500`-style prefixes.
    pub fn for_code(code: &str) -> Result<Self> {
        let code = code.trim().to_ascii_uppercase();
        if code.len() != 3 || !code.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(PricingError::invalid(
                "currency",
                format!("must be a 3-letter ISO code, got '{}'", code),
            ));
        }

        let symbol = match code.as_str() {
            "PHP" => "₱".to_string(),
            "USD" => "$".to_string(),
            "EUR" => "€".to_string(),
            "GBP" => "£".to_string(),
            "JPY" => "¥".to_string(),
            other => format!("{} ", other),
        };
        Ok(Self::new(code, symbol))
    }
}

impl Default for CurrencyFormat {
    fn default() -> Self {
        Self::new("PHP", "₱")
    }
}

impl CurrencyFormatter for CurrencyFormat {
    /// Whole amounts drop the cents; anything else prints two places.
    fn format_amount(&self, amount: Decimal) -> String {
        let rounded = round_money(amount, MONEY_PLACES);
        let sign = if rounded < Decimal::ZERO { "-" } else { "" };
        let abs = rounded.abs();

        let whole = group_digits(&abs.trunc().normalize().to_string(), &self.thousands_separator);
        let cents = (abs.fract() * Decimal::ONE_HUNDRED).to_u32().unwrap_or(0);

        if cents == 0 {
            format!("{}{}{}", sign, self.symbol, whole)
        } else {
            format!("{}{}{}.{:02}", sign, self.symbol, whole, cents)
        }
    }
}

fn group_digits(digits: &str, separator: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3 * separator.len());
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push_str(separator);
        }
        out.push(ch);
    }
    out
}

/// Percentage without trailing zeros: `10%`, `12.5%`
pub fn format_percentage(value: Decimal) -> String {
    format!("{}%", value.normalize())
}

/// Human-readable offer for a rule, e.g. "Book 7+ days and save 10%".
///
/// Fails on a malformed rule instead of advertising a nonsensical offer.
pub fn format_discount_description(
    rule: &DiscountRule,
    formatter: &dyn CurrencyFormatter,
) -> Result<String> {
    validate_rule(rule)?;

    let unit = if rule.min_days == 1 { "day" } else { "days" };
    let saving = match rule.discount_type {
        DiscountType::Percentage => format_percentage(rule.discount_value),
        DiscountType::Fixed => formatter.format_amount(rule.discount_value),
    };

    Ok(format!("Book {}+ {} and save {}", rule.min_days, unit, saving))
}
