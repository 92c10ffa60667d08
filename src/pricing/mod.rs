//! Rental pricing engine.
//!
//! Tiered discount selection and price breakdowns for the owner's pricing
//! rules preview and the renter's booking form. Everything here is pure:
//! callers fetch rule rows and persist rentals themselves.

pub mod calculators;
pub mod format;
pub mod models;
pub mod period;
pub mod requests;
pub mod responses;
pub mod services;
pub mod validation;

// Re-export commonly used items
pub use calculators::{
    calculate_rental_price, compute_discount_amount, round_money, select_applicable_rule,
    PriceBreakdown,
};
pub use format::{format_discount_description, CurrencyFormat, CurrencyFormatter};
pub use models::{DiscountRule, DiscountRuleRow, DiscountType};
pub use period::{rental_days, RentalPeriod};
pub use services::{preview_tiers, quote, TierPreview};
