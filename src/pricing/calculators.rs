//! Core rental pricing calculations.
//!
//! Pure functions for pricing math - no database access, no I/O.
//! Owner previews and renter checkout both go through `calculate_rental_price`,
//! so the amount shown is always the amount charged.

use rust_decimal::prelude::*;
use rust_decimal::Decimal;
use serde::Serialize;
use std::cmp::Ordering;

use crate::error::{PricingError, Result};

use super::models::{DiscountRule, DiscountType};
use super::validation::validate_rule;

/// Currency subunit precision for every amount the engine produces
pub const MONEY_PLACES: u32 = 2;

/// Round to specified decimal places using banker's rounding (ROUND_HALF_EVEN).
///
/// Banker's rounding rounds to the nearest even number when the value is exactly
/// halfway between two possibilities. This reduces cumulative rounding bias.
///
/// # Examples
/// ```
/// use rust_decimal_macros::dec;
/// use rental_pricing::pricing::round_money;
///
/// assert_eq!(round_money(dec!(2.5), 0), dec!(2));   // rounds to even
/// assert_eq!(round_money(dec!(3.5), 0), dec!(4));   // rounds to even
/// assert_eq!(round_money(dec!(1.234), 2), dec!(1.23));
/// ```
pub fn round_money(amount: Decimal, places: u32) -> Decimal {
    amount.round_dp_with_strategy(places, RoundingStrategy::MidpointNearestEven)
}

/// Result of a rental price calculation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PriceBreakdown {
    pub daily_rate: Decimal,
    pub days: u32,
    /// `daily_rate * days`, undiscounted
    pub base_price: Decimal,
    pub applied_rule: Option<DiscountRule>,
    pub discount: Decimal,
    pub final_price: Decimal,
}

impl PriceBreakdown {
    pub fn has_discount(&self) -> bool {
        self.applied_rule.is_some() && self.discount > Decimal::ZERO
    }

    /// Final price spread over the rental days
    pub fn effective_daily_rate(&self) -> Decimal {
        round_money(self.final_price / Decimal::from(self.days), MONEY_PLACES)
    }
}

/// Discount a rule grants on `base_price`.
///
/// Percentages take `value / 100` of the base price; fixed amounts are capped
/// at the base price. The result is rounded to cents with banker's rounding.
pub fn compute_discount_amount(rule: &DiscountRule, base_price: Decimal) -> Result<Decimal> {
    validate_rule(rule)?;

    if base_price < Decimal::ZERO {
        return Err(PricingError::invalid(
            "base_price",
            format!("must not be negative, got {}", base_price),
        ));
    }

    let raw = match rule.discount_type {
        DiscountType::Percentage => base_price
            .checked_mul(rule.discount_value / Decimal::ONE_HUNDRED)
            .ok_or_else(out_of_range)?,
        DiscountType::Fixed => rule.discount_value,
    };

    Ok(round_money(raw, MONEY_PLACES).min(base_price))
}

fn out_of_range() -> PricingError {
    PricingError::invalid("daily_rate", "price exceeds supported range")
}

/// Pick the discount rule for a rental of `days` days.
///
/// Among active rules with `min_days <= days`, the deepest tier (largest
/// `min_days`) wins. Rules sharing that tier are ranked by the discount they
/// would grant on `base_price`, then by smallest id, so input order never
/// changes the outcome.
///
/// Every active rule is range-checked, qualifying or not.
pub fn select_applicable_rule<'a>(
    rules: &'a [DiscountRule],
    days: u32,
    base_price: Decimal,
) -> Result<Option<&'a DiscountRule>> {
    Ok(select_with_discount(rules, days, base_price)?.map(|(rule, _)| rule))
}

/// Winning rule together with the discount it grants
fn select_with_discount(
    rules: &[DiscountRule],
    days: u32,
    base_price: Decimal,
) -> Result<Option<(&DiscountRule, Decimal)>> {
    if days < 1 {
        return Err(PricingError::invalid("days", "must be at least 1"));
    }

    let mut candidates: Vec<(&DiscountRule, Decimal)> = Vec::new();
    for rule in rules.iter().filter(|r| r.is_active) {
        validate_rule(rule)?;
        if rule.min_days <= days {
            candidates.push((rule, compute_discount_amount(rule, base_price)?));
        }
    }

    let selected = candidates.into_iter().max_by(rank_candidates);

    tracing::debug!(
        days,
        selected = ?selected.map(|(r, _)| r.id),
        "Selected discount rule"
    );

    Ok(selected)
}

fn rank_candidates(a: &(&DiscountRule, Decimal), b: &(&DiscountRule, Decimal)) -> Ordering {
    a.0.min_days
        .cmp(&b.0.min_days)
        .then_with(|| a.1.cmp(&b.1))
        // smaller id ranks higher
        .then_with(|| b.0.id.cmp(&a.0.id))
}

/// Calculate the rental price for `days` days at `daily_rate`.
///
/// # Arguments
/// * `daily_rate` - Listing's price per day, must be positive
/// * `days` - Rental duration, must be at least 1
/// * `rules` - The listing's discount rules (inactive ones are ignored)
///
/// # Returns
/// `PriceBreakdown` with base price, applied rule, discount and final price
pub fn calculate_rental_price(
    daily_rate: Decimal,
    days: u32,
    rules: &[DiscountRule],
) -> Result<PriceBreakdown> {
    if daily_rate <= Decimal::ZERO {
        return Err(PricingError::invalid(
            "daily_rate",
            format!("must be positive, got {}", daily_rate),
        ));
    }

    let gross = daily_rate
        .checked_mul(Decimal::from(days))
        .ok_or_else(out_of_range)?;
    let base_price = round_money(gross, MONEY_PLACES);

    let (applied_rule, discount) = match select_with_discount(rules, days, base_price)? {
        Some((rule, discount)) => (Some(rule.clone()), discount),
        None => (None, Decimal::ZERO),
    };

    let final_price = (base_price - discount).max(Decimal::ZERO);

    tracing::debug!(
        %daily_rate,
        days,
        %base_price,
        %discount,
        %final_price,
        "Calculated rental price"
    );

    Ok(PriceBreakdown {
        daily_rate,
        days,
        base_price,
        applied_rule,
        discount,
        final_price,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use uuid::Uuid;

    // ==================== round_money tests ====================

    #[test]
    fn test_round_money_bankers_rounding_to_even() {
        assert_eq!(round_money(dec!(2.5), 0), dec!(2));
        assert_eq!(round_money(dec!(3.5), 0), dec!(4));
        assert_eq!(round_money(dec!(0.125), 2), dec!(0.12));
        assert_eq!(round_money(dec!(0.135), 2), dec!(0.14));
    }

    #[test]
    fn test_round_money_normal_rounding() {
        assert_eq!(round_money(dec!(1.234), 2), dec!(1.23));
        assert_eq!(round_money(dec!(1.236), 2), dec!(1.24));
        assert_eq!(round_money(dec!(999999.995), 2), dec!(1000000.00));
    }

    // ==================== compute_discount_amount tests ====================

    #[test]
    fn test_percentage_discount() {
        let rule = DiscountRule::percentage(7, dec!(10));
        assert_eq!(compute_discount_amount(&rule, dec!(15000)).unwrap(), dec!(1500.00));
    }

    #[test]
    fn test_percentage_discount_rounds_half_even() {
        // 12.5% of 0.60 = 0.075 -> 0.08 (8 is even)
        let rule = DiscountRule::percentage(1, dec!(12.5));
        assert_eq!(compute_discount_amount(&rule, dec!(0.60)).unwrap(), dec!(0.08));

        // 12.5% of 1.00 = 0.125 -> 0.12
        assert_eq!(compute_discount_amount(&rule, dec!(1.00)).unwrap(), dec!(0.12));
    }

    #[test]
    fn test_fixed_discount_capped_at_base() {
        let rule = DiscountRule::fixed(1, dec!(500));
        assert_eq!(compute_discount_amount(&rule, dec!(100)).unwrap(), dec!(100));
        assert_eq!(compute_discount_amount(&rule, dec!(2000)).unwrap(), dec!(500));
    }

    #[test]
    fn test_discount_rejects_malformed_rule() {
        let rule = DiscountRule::percentage(1, dec!(120));
        assert!(matches!(
            compute_discount_amount(&rule, dec!(100)),
            Err(PricingError::InvalidInput { field: "discount_value", .. })
        ));
    }

    // ==================== select_applicable_rule tests ====================

    #[test]
    fn test_select_deepest_tier() {
        let rules = vec![
            DiscountRule::percentage(3, dec!(5)),
            DiscountRule::percentage(7, dec!(15)),
        ];
        let selected = select_applicable_rule(&rules, 10, dec!(1000)).unwrap().unwrap();
        assert_eq!(selected.min_days, 7);
    }

    #[test]
    fn test_select_prefers_deeper_tier_even_with_smaller_discount() {
        let rules = vec![
            DiscountRule::percentage(3, dec!(20)),
            DiscountRule::percentage(7, dec!(10)),
        ];
        let selected = select_applicable_rule(&rules, 7, dec!(700)).unwrap().unwrap();
        assert_eq!(selected.min_days, 7);
    }

    #[test]
    fn test_select_skips_inactive() {
        let rules = vec![
            DiscountRule::percentage(3, dec!(5)),
            DiscountRule::percentage(7, dec!(15)).with_active(false),
        ];
        let selected = select_applicable_rule(&rules, 10, dec!(1000)).unwrap().unwrap();
        assert_eq!(selected.min_days, 3);
    }

    #[test]
    fn test_select_none_below_threshold() {
        let rules = vec![DiscountRule::percentage(7, dec!(20))];
        assert!(select_applicable_rule(&rules, 3, dec!(3000)).unwrap().is_none());
        assert!(select_applicable_rule(&[], 3, dec!(3000)).unwrap().is_none());
    }

    #[test]
    fn test_select_same_tier_takes_largest_discount() {
        // 10% of 1000 = 100 beats a flat 80
        let pct = DiscountRule::percentage(7, dec!(10));
        let flat = DiscountRule::fixed(7, dec!(80));

        let forward = vec![flat.clone(), pct.clone()];
        let backward = vec![pct.clone(), flat.clone()];
        assert_eq!(select_applicable_rule(&forward, 7, dec!(1000)).unwrap(), Some(&pct));
        assert_eq!(select_applicable_rule(&backward, 7, dec!(1000)).unwrap(), Some(&pct));

        // On a smaller base the flat amount wins
        assert_eq!(select_applicable_rule(&forward, 7, dec!(500)).unwrap(), Some(&flat));
    }

    #[test]
    fn test_select_equal_discounts_break_on_id() {
        let low = Uuid::from_u128(1);
        let high = Uuid::from_u128(2);
        let a = DiscountRule::new(high, 5, DiscountType::Fixed, dec!(100), true);
        let b = DiscountRule::new(low, 5, DiscountType::Percentage, dec!(10), true);

        let rules = vec![a.clone(), b.clone()];
        let selected = select_applicable_rule(&rules, 5, dec!(1000)).unwrap().unwrap();
        assert_eq!(selected.id, low);

        let rules = vec![b, a];
        let selected = select_applicable_rule(&rules, 5, dec!(1000)).unwrap().unwrap();
        assert_eq!(selected.id, low);
    }

    #[test]
    fn test_select_rejects_zero_days() {
        let rules = vec![DiscountRule::percentage(1, dec!(5))];
        assert!(matches!(
            select_applicable_rule(&rules, 0, dec!(100)),
            Err(PricingError::InvalidInput { field: "days", .. })
        ));
    }

    #[test]
    fn test_select_rejects_malformed_active_rule() {
        let rules = vec![
            DiscountRule::percentage(3, dec!(5)),
            DiscountRule::fixed(30, dec!(0)),
        ];
        assert!(select_applicable_rule(&rules, 5, dec!(500)).is_err());

        // The same rule parked as inactive is ignored
        let rules = vec![
            DiscountRule::percentage(3, dec!(5)),
            DiscountRule::fixed(30, dec!(0)).with_active(false),
        ];
        assert!(select_applicable_rule(&rules, 5, dec!(500)).is_ok());
    }

    // ==================== calculate_rental_price tests ====================

    #[test]
    fn test_calculate_percentage_scenario() {
        let rules = vec![DiscountRule::percentage(7, dec!(10))];
        let breakdown = calculate_rental_price(dec!(1500), 10, &rules).unwrap();

        assert_eq!(breakdown.base_price, dec!(15000));
        assert_eq!(breakdown.discount, dec!(1500.00));
        assert_eq!(breakdown.final_price, dec!(13500.00));
        assert_eq!(breakdown.applied_rule.as_ref().map(|r| r.min_days), Some(7));
        assert_eq!(breakdown.effective_daily_rate(), dec!(1350));
        assert!(breakdown.has_discount());
    }

    #[test]
    fn test_calculate_fixed_capped_scenario() {
        let rules = vec![DiscountRule::fixed(1, dec!(500))];
        let breakdown = calculate_rental_price(dec!(100), 1, &rules).unwrap();

        assert_eq!(breakdown.base_price, dec!(100));
        assert_eq!(breakdown.discount, dec!(100));
        assert_eq!(breakdown.final_price, dec!(0));
    }

    #[test]
    fn test_calculate_without_rules() {
        let breakdown = calculate_rental_price(dec!(1000), 3, &[]).unwrap();
        assert_eq!(breakdown.base_price, dec!(3000));
        assert_eq!(breakdown.final_price, dec!(3000));
        assert_eq!(breakdown.discount, Decimal::ZERO);
        assert!(breakdown.applied_rule.is_none());
        assert!(!breakdown.has_discount());
    }

    #[test]
    fn test_calculate_rejects_invalid_input() {
        assert!(matches!(
            calculate_rental_price(dec!(0), 3, &[]),
            Err(PricingError::InvalidInput { field: "daily_rate", .. })
        ));
        assert!(matches!(
            calculate_rental_price(dec!(-10), 3, &[]),
            Err(PricingError::InvalidInput { field: "daily_rate", .. })
        ));
        assert!(matches!(
            calculate_rental_price(dec!(1000), 0, &[]),
            Err(PricingError::InvalidInput { field: "days", .. })
        ));
    }

    #[test]
    fn test_calculate_overflowing_base_price_is_an_error() {
        assert!(matches!(
            calculate_rental_price(Decimal::MAX, 2, &[]),
            Err(PricingError::InvalidInput { field: "daily_rate", .. })
        ));
        assert!(calculate_rental_price(Decimal::MAX, 1, &[]).is_ok());
    }

    #[test]
    fn test_calculate_large_rate_with_percentage_rule() {
        let rules = vec![DiscountRule::percentage(1, dec!(50))];
        let breakdown = calculate_rental_price(Decimal::MAX / dec!(2), 1, &rules).unwrap();

        assert!(breakdown.discount > Decimal::ZERO);
        assert!(breakdown.discount <= breakdown.base_price);
        assert_eq!(breakdown.final_price, breakdown.base_price - breakdown.discount);
    }

    #[test]
    fn test_percentage_discount_on_huge_base_does_not_panic() {
        let rule = DiscountRule::percentage(1, dec!(100));
        assert_eq!(compute_discount_amount(&rule, Decimal::MAX).unwrap(), Decimal::MAX);
    }

    #[test]
    fn test_calculate_rounds_fractional_rates() {
        // 33.335 * 3 = 100.005 -> 100.00
        let breakdown = calculate_rental_price(dec!(33.335), 3, &[]).unwrap();
        assert_eq!(breakdown.base_price, dec!(100.00));
    }
}
