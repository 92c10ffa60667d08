//! Request DTOs for pricing calls from the booking form and rules manager.

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::error::{PricingError, Result};

use super::models::DiscountRuleRow;
use super::period::RentalPeriod;

/// Request to quote a rental
#[derive(Debug, Deserialize)]
pub struct PriceQuoteRequest {
    #[serde(with = "rust_decimal::serde::str")]
    pub daily_rate: Decimal,
    #[serde(default)]
    pub days: Option<u32>,
    #[serde(default)]
    pub period: Option<RentalPeriod>,
    #[serde(default)]
    pub rules: Vec<DiscountRuleRow>,
    /// ISO code of the listing's currency; the configured one when absent
    #[serde(default)]
    pub currency: Option<String>,
}

impl PriceQuoteRequest {
    /// Rental length from `days` or `period`; both must agree when both are sent
    pub fn rental_days(&self) -> Result<u32> {
        match (self.days, &self.period) {
            (Some(days), None) => Ok(days),
            (None, Some(period)) => period.days(),
            (Some(days), Some(period)) => {
                let from_period = period.days()?;
                if from_period != days {
                    return Err(PricingError::invalid(
                        "days",
                        format!("{} does not match rental period of {} days", days, from_period),
                    ));
                }
                Ok(days)
            }
            (None, None) => Err(PricingError::invalid(
                "days",
                "either days or a rental period is required",
            )),
        }
    }
}

/// Request to preview every tier of a listing
#[derive(Debug, Deserialize)]
pub struct TierPreviewRequest {
    #[serde(with = "rust_decimal::serde::str")]
    pub daily_rate: Decimal,
    #[serde(default)]
    pub rules: Vec<DiscountRuleRow>,
}

/// Owner submission from the pricing rules manager
#[derive(Debug, Deserialize)]
pub struct SaveDiscountRuleRequest {
    pub min_days: i32,
    pub discount_type: String,
    #[serde(with = "rust_decimal::serde::str")]
    pub discount_value: Decimal,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}
