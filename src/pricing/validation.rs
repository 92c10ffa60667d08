//! Rule value checks shared by the engine and the rule-creation flow.

use rust_decimal::Decimal;

use crate::error::{PricingError, Result};

use super::models::{DiscountRule, DiscountType};

const MAX_PERCENTAGE: Decimal = Decimal::ONE_HUNDRED;

/// Range checks for a rule's numeric fields.
///
/// - `min_days` must be at least 1
/// - `value` must be positive
/// - percentages may not exceed 100
pub fn validate_rule_values(
    discount_type: DiscountType,
    value: Decimal,
    min_days: u32,
) -> Result<()> {
    if min_days < 1 {
        return Err(PricingError::invalid("min_days", "must be at least 1"));
    }
    if value <= Decimal::ZERO {
        return Err(PricingError::invalid(
            "discount_value",
            format!("must be positive, got {}", value),
        ));
    }
    if discount_type == DiscountType::Percentage && value > MAX_PERCENTAGE {
        return Err(PricingError::invalid(
            "discount_value",
            format!("percentage must not exceed 100, got {}", value),
        ));
    }
    Ok(())
}

/// Validate a whole rule
pub fn validate_rule(rule: &DiscountRule) -> Result<()> {
    validate_rule_values(rule.discount_type, rule.discount_value, rule.min_days)
}

/// Check a rule about to be saved against the listing's existing rules.
///
/// Only one active rule may exist per `min_days`. The candidate's own id is
/// skipped so an edit does not conflict with its previous version.
pub fn ensure_unique_tier(existing: &[DiscountRule], candidate: &DiscountRule) -> Result<()> {
    validate_rule(candidate)?;

    if !candidate.is_active {
        return Ok(());
    }

    let clash = existing.iter().any(|rule| {
        rule.id != candidate.id && rule.is_active && rule.min_days == candidate.min_days
    });

    if clash {
        return Err(PricingError::DuplicateTier {
            min_days: candidate.min_days,
        });
    }
    Ok(())
}
