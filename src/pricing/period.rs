//! Billable days for a booking's pickup and return dates.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{PricingError, Result};

/// Number of rental days between pickup and return.
///
/// Days are counted as nights between the two dates, so returning the next
/// day bills one day. Same-day and reversed ranges are rejected.
pub fn rental_days(pickup: NaiveDate, return_date: NaiveDate) -> Result<u32> {
    let days = (return_date - pickup).num_days();
    if days < 1 {
        return Err(PricingError::invalid(
            "return_date",
            format!("must be after pickup date {}, got {}", pickup, return_date),
        ));
    }
    u32::try_from(days).map_err(|_| PricingError::invalid("return_date", "rental period too long"))
}

/// Pickup/return date pair from the booking form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RentalPeriod {
    pub pickup: NaiveDate,
    pub return_date: NaiveDate,
}

impl RentalPeriod {
    pub fn new(pickup: NaiveDate, return_date: NaiveDate) -> Result<Self> {
        rental_days(pickup, return_date)?;
        Ok(Self {
            pickup,
            return_date,
        })
    }

    pub fn days(&self) -> Result<u32> {
        rental_days(self.pickup, self.return_date)
    }
}
