//! Response DTOs for pricing calls.

use rust_decimal::Decimal;
use serde::Serialize;
use uuid::Uuid;

use crate::error::PricingError;

use super::models::DiscountType;

/// Money value for JSON responses
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MoneyResponse {
    #[serde(with = "rust_decimal::serde::str")]
    pub amount: Decimal,
    pub currency: String,
    /// Amount rendered with the configured currency format
    pub display: String,
}

/// The rule a quote was discounted by
#[derive(Debug, Clone, Serialize)]
pub struct AppliedRuleResponse {
    pub id: Uuid,
    pub min_days: u32,
    pub discount_type: DiscountType,
    #[serde(with = "rust_decimal::serde::str")]
    pub discount_value: Decimal,
    pub description: String,
}

/// Response for a rental quote
#[derive(Debug, Clone, Serialize)]
pub struct PriceQuoteResponse {
    pub days: u32,
    pub daily_rate: MoneyResponse,
    pub base_price: MoneyResponse,
    pub discount: MoneyResponse,
    pub final_price: MoneyResponse,
    pub effective_daily_rate: MoneyResponse,
    pub applied_rule: Option<AppliedRuleResponse>,
}

/// One row of the owner's tier preview table
#[derive(Debug, Clone, Serialize)]
pub struct TierPreviewResponse {
    pub rule_id: Uuid,
    pub min_days: u32,
    pub description: String,
    pub base_price: MoneyResponse,
    pub discount: MoneyResponse,
    pub final_price: MoneyResponse,
}

/// Generic pricing error response
#[derive(Debug, Serialize)]
pub struct PricingErrorResponse {
    pub error_type: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl From<&PricingError> for PricingErrorResponse {
    fn from(err: &PricingError) -> Self {
        let details = match err {
            PricingError::InvalidInput { field, .. } => Some(serde_json::json!({ "field": field })),
            PricingError::DuplicateTier { min_days } => {
                Some(serde_json::json!({ "min_days": min_days }))
            }
            PricingError::MalformedRule { .. } | PricingError::Config(_) => None,
        };

        Self {
            error_type: err.error_type().to_string(),
            message: err.to_string(),
            details,
        }
    }
}
