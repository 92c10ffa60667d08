//! Tiered rental pricing for the car rental marketplace.
//!
//! The `pricing` module holds the engine: rule selection, discount and
//! final price computation, and offer descriptions. `config`, `error` and
//! `logging` carry the shared plumbing.

pub mod config;
pub mod error;
pub mod logging;
pub mod pricing;

pub use config::PricingConfig;
pub use error::{PricingError, Result};
