//! Booking unit counts from a date range.
//!
//! Booking ends are exclusive: a stay from the 20th to the 22nd is two nights.

use chrono::{DateTime, Utc};

use super::services::PricingError;

/// Reject ranges where `end` is not strictly after `start`.
pub fn ensure_ordered(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<(), PricingError> {
    if end <= start {
        return Err(PricingError::InvalidBookingRange { start, end });
    }
    Ok(())
}

/// Whole 24-hour periods between `start` and `end`.
///
/// A range shorter than one night is rejected rather than priced at zero.
pub fn nights_between(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<u32, PricingError> {
    ensure_ordered(start, end)?;
    positive_count((end - start).num_days(), start, end)
}

/// Calendar days (UTC) from the start date up to, not including, the end date.
pub fn days_between(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<u32, PricingError> {
    ensure_ordered(start, end)?;
    positive_count((end.date_naive() - start.date_naive()).num_days(), start, end)
}

fn positive_count(count: i64, start: DateTime<Utc>, end: DateTime<Utc>) -> Result<u32, PricingError> {
    match u32::try_from(count) {
        Ok(count) if count > 0 => Ok(count),
        _ => Err(PricingError::InvalidBookingRange { start, end }),
    }
}
