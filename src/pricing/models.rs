//! Discount rule models.
//!
//! `DiscountRuleRow` is the loosely-typed shape the rule store hands back
//! (sqlx row or JSON record). `DiscountRule` is the strict value type the
//! engine works with; converting between them is where malformed rows are
//! rejected.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::error::PricingError;

use super::validation::validate_rule_values;

/// How a rule's `discount_value` is interpreted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiscountType {
    /// Percent off the base price, in (0, 100]
    Percentage,
    /// Flat amount off in the listing's currency
    #[serde(alias = "fixed_amount")]
    Fixed,
}

impl DiscountType {
    pub fn as_str(&self) -> &'static str {
        match self {
            DiscountType::Percentage => "percentage",
            DiscountType::Fixed => "fixed",
        }
    }
}

impl fmt::Display for DiscountType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DiscountType {
    type Err = PricingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "percentage" | "percent" => Ok(DiscountType::Percentage),
            "fixed" | "fixed_amount" => Ok(DiscountType::Fixed),
            other => Err(PricingError::MalformedRule {
                message: format!("unknown discount type '{}'", other),
            }),
        }
    }
}

/// A validated discount tier for one listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscountRule {
    pub id: Uuid,
    /// Minimum rental duration (inclusive) at which the rule applies
    pub min_days: u32,
    pub discount_type: DiscountType,
    #[serde(with = "rust_decimal::serde::str")]
    pub discount_value: Decimal,
    pub is_active: bool,
}

impl DiscountRule {
    pub fn new(
        id: Uuid,
        min_days: u32,
        discount_type: DiscountType,
        discount_value: Decimal,
        is_active: bool,
    ) -> Self {
        Self {
            id,
            min_days,
            discount_type,
            discount_value,
            is_active,
        }
    }

    /// Active percentage rule with a fresh id
    pub fn percentage(min_days: u32, percent: Decimal) -> Self {
        Self::new(Uuid::new_v4(), min_days, DiscountType::Percentage, percent, true)
    }

    /// Active fixed-amount rule with a fresh id
    pub fn fixed(min_days: u32, amount: Decimal) -> Self {
        Self::new(Uuid::new_v4(), min_days, DiscountType::Fixed, amount, true)
    }

    /// Same rule, with `is_active` replaced
    pub fn with_active(mut self, is_active: bool) -> Self {
        self.is_active = is_active;
        self
    }

    /// Check if the rule is eligible for a rental of `days` days
    pub fn applies_to(&self, days: u32) -> bool {
        self.is_active && self.min_days <= days
    }
}

/// Discount rule row as stored in `car_discount_rules`
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct DiscountRuleRow {
    pub id: Uuid,
    #[serde(default)]
    pub car_id: Option<Uuid>,
    pub min_days: i32,
    pub discount_type: String,
    pub discount_value: Decimal,
    #[serde(default = "default_active")]
    pub is_active: bool,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

fn default_active() -> bool {
    true
}

impl TryFrom<DiscountRuleRow> for DiscountRule {
    type Error = PricingError;

    fn try_from(row: DiscountRuleRow) -> Result<Self, Self::Error> {
        let discount_type: DiscountType = row.discount_type.parse()?;

        let min_days = u32::try_from(row.min_days).map_err(|_| PricingError::MalformedRule {
            message: format!("rule {} has negative min_days {}", row.id, row.min_days),
        })?;

        validate_rule_values(discount_type, row.discount_value, min_days).map_err(|e| {
            PricingError::MalformedRule {
                message: format!("rule {}: {}", row.id, e),
            }
        })?;

        Ok(DiscountRule {
            id: row.id,
            min_days,
            discount_type,
            discount_value: row.discount_value,
            is_active: row.is_active,
        })
    }
}

/// Convert fetched rows, failing on the first malformed one
pub fn rules_from_rows(rows: Vec<DiscountRuleRow>) -> Result<Vec<DiscountRule>, PricingError> {
    rows.into_iter()
        .map(|row| {
            let id = row.id;
            DiscountRule::try_from(row).inspect_err(|e| {
                tracing::warn!("Rejected discount rule row {}: {}", id, e);
            })
        })
        .collect()
}
