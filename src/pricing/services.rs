//! Pricing service functions.
//!
//! Glue between the request/response DTOs and the pure calculators. Callers
//! fetch the listing's rule rows themselves and pass them in.

use rust_decimal::Decimal;
use uuid::Uuid;

use crate::config::PricingConfig;
use crate::error::Result;

use super::calculators::{calculate_rental_price, PriceBreakdown};
use super::format::{format_discount_description, CurrencyFormat, CurrencyFormatter};
use super::models::{rules_from_rows, DiscountRule, DiscountRuleRow};
use super::requests::{PriceQuoteRequest, SaveDiscountRuleRequest, TierPreviewRequest};
use super::responses::{
    AppliedRuleResponse, MoneyResponse, PriceQuoteResponse, TierPreviewResponse,
};
use super::validation::ensure_unique_tier;

/// Breakdown for one tier at exactly its `min_days`
#[derive(Debug, Clone)]
pub struct TierPreview {
    pub rule: DiscountRule,
    pub description: String,
    pub breakdown: PriceBreakdown,
}

fn money(amount: Decimal, format: &CurrencyFormat) -> MoneyResponse {
    MoneyResponse {
        amount,
        currency: format.code.clone(),
        display: format.format_amount(amount),
    }
}

/// Quote a rental for the booking form.
///
/// Converts the rule rows, computes the breakdown and describes the applied
/// rule. Malformed rows fail the whole quote. A `currency` on the request
/// overrides the configured one.
pub fn quote(request: &PriceQuoteRequest, config: &PricingConfig) -> Result<PriceQuoteResponse> {
    let format = match &request.currency {
        Some(code) if !code.eq_ignore_ascii_case(&config.currency_code) => {
            CurrencyFormat::for_code(code)?
        }
        _ => config.currency_format(),
    };

    let days = request.rental_days()?;
    let rules = rules_from_rows(request.rules.clone())?;
    let breakdown = calculate_rental_price(request.daily_rate, days, &rules)?;
    breakdown_response(&breakdown, &format)
}

/// Render a breakdown with the given currency format
pub fn breakdown_response(
    breakdown: &PriceBreakdown,
    format: &CurrencyFormat,
) -> Result<PriceQuoteResponse> {
    let applied_rule = match &breakdown.applied_rule {
        Some(rule) => Some(AppliedRuleResponse {
            id: rule.id,
            min_days: rule.min_days,
            discount_type: rule.discount_type,
            discount_value: rule.discount_value,
            description: format_discount_description(rule, format)?,
        }),
        None => None,
    };

    Ok(PriceQuoteResponse {
        days: breakdown.days,
        daily_rate: money(breakdown.daily_rate, format),
        base_price: money(breakdown.base_price, format),
        discount: money(breakdown.discount, format),
        final_price: money(breakdown.final_price, format),
        effective_daily_rate: money(breakdown.effective_daily_rate(), format),
        applied_rule,
    })
}

/// Price every active tier at its own threshold for the owner's preview.
///
/// Rows come back in ascending `min_days` order. Each row is priced against
/// the full rule set, so a duplicate tier previews whichever rule checkout
/// would actually pick.
pub fn preview_tiers(
    daily_rate: Decimal,
    rules: &[DiscountRule],
    formatter: &dyn CurrencyFormatter,
) -> Result<Vec<TierPreview>> {
    let mut active: Vec<&DiscountRule> = rules.iter().filter(|r| r.is_active).collect();
    active.sort_by(|a, b| a.min_days.cmp(&b.min_days).then_with(|| a.id.cmp(&b.id)));

    let mut previews = Vec::with_capacity(active.len());
    for rule in active {
        previews.push(TierPreview {
            rule: rule.clone(),
            description: format_discount_description(rule, formatter)?,
            breakdown: calculate_rental_price(daily_rate, rule.min_days, rules)?,
        });
    }
    Ok(previews)
}

/// JSON-shaped wrapper around `preview_tiers`
pub fn preview_tiers_response(
    request: &TierPreviewRequest,
    config: &PricingConfig,
) -> Result<Vec<TierPreviewResponse>> {
    let format = config.currency_format();
    let rules = rules_from_rows(request.rules.clone())?;

    let previews = preview_tiers(request.daily_rate, &rules, &format)?;
    Ok(previews
        .into_iter()
        .map(|p| TierPreviewResponse {
            rule_id: p.rule.id,
            min_days: p.rule.min_days,
            description: p.description,
            base_price: money(p.breakdown.base_price, &format),
            discount: money(p.breakdown.discount, &format),
            final_price: money(p.breakdown.final_price, &format),
        })
        .collect())
}

/// Validate an owner's rule submission against the listing's existing rules.
///
/// `rule_id` is the id being edited, or `None` for a new rule. Returns the
/// rule ready for the store to persist.
pub fn prepare_rule(
    existing: &[DiscountRule],
    request: &SaveDiscountRuleRequest,
    rule_id: Option<Uuid>,
) -> Result<DiscountRule> {
    let row = DiscountRuleRow {
        id: rule_id.unwrap_or_else(Uuid::new_v4),
        car_id: None,
        min_days: request.min_days,
        discount_type: request.discount_type.clone(),
        discount_value: request.discount_value,
        is_active: request.is_active,
        created_at: None,
    };

    let rule = DiscountRule::try_from(row)?;
    ensure_unique_tier(existing, &rule)?;

    tracing::debug!(rule_id = %rule.id, min_days = rule.min_days, "Discount rule accepted");
    Ok(rule)
}
