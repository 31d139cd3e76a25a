//! Line item computation for a booking.
//!
//! Builds the booking line item and the provider and customer commissions
//! from a price configuration. Pure and synchronous: identical inputs always
//! produce identical line items, and any failure aborts the whole computation.

use chrono::{DateTime, Utc};
use serde_json::json;
use tracing::{debug, warn};

use super::calculators::clamp_magnitude;
use super::dates;
use super::line_items::{include_for_only, line_item_code, LineItem, LineItemParams};
use super::models::{Audience, BookingParams, CommissionRule, PriceConfig, UnitType};
use super::money::Money;

/// Most line items a transaction accepts.
pub const MAX_LINE_ITEMS: usize = 50;

/// Pricing calculation error types
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PricingError {
    #[error("Booking end {end} must be at least one unit after start {start}")]
    InvalidBookingRange {
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },

    #[error("Cannot calculate the line total of {code}: provide quantity, percentage, or both seats and units")]
    UnpricedLineItem { code: String },

    #[error("{count} line items exceed the limit of {limit}")]
    TooManyLineItems { count: usize, limit: usize },

    #[error("Currency mismatch in {context}: expected {expected}, found {found}")]
    CurrencyMismatch {
        expected: String,
        found: String,
        context: String,
    },

    #[error("Unsupported currency: {0}")]
    UnsupportedCurrency(String),

    #[error("Invalid line item code {code:?}: {reason}")]
    InvalidLineItemCode { code: String, reason: String },

    #[error("Line item {code} must be included for at least one party")]
    EmptyIncludeFor { code: String },

    #[error("Line total of {code} does not match: supplied {supplied}, calculated {calculated}")]
    LineTotalMismatch {
        code: String,
        supplied: i64,
        calculated: i64,
    },

    #[error("Amount out of range: {0}")]
    AmountOutOfRange(String),

    #[error("Invalid {audience} commission rule #{index}: {reason}")]
    InvalidCommission {
        audience: Audience,
        index: usize,
        reason: String,
    },
}

impl PricingError {
    /// Stable tag for API error bodies.
    pub fn error_type(&self) -> &'static str {
        match self {
            PricingError::InvalidBookingRange { .. } => "invalid_booking_range",
            PricingError::UnpricedLineItem { .. } => "unpriced_line_item",
            PricingError::TooManyLineItems { .. } => "too_many_line_items",
            PricingError::CurrencyMismatch { .. } => "currency_mismatch",
            PricingError::UnsupportedCurrency(_) => "unsupported_currency",
            PricingError::InvalidLineItemCode { .. } => "invalid_line_item_code",
            PricingError::EmptyIncludeFor { .. } => "empty_include_for",
            PricingError::LineTotalMismatch { .. } => "line_total_mismatch",
            PricingError::AmountOutOfRange(_) => "amount_out_of_range",
            PricingError::InvalidCommission { .. } => "invalid_commission",
        }
    }

    /// Structured fields identifying the failing line item or rule.
    pub fn details(&self) -> Option<serde_json::Value> {
        match self {
            PricingError::InvalidBookingRange { start, end } => {
                Some(json!({ "bookingStart": start, "bookingEnd": end }))
            }
            PricingError::UnpricedLineItem { code }
            | PricingError::InvalidLineItemCode { code, .. }
            | PricingError::EmptyIncludeFor { code } => Some(json!({ "code": code })),
            PricingError::LineTotalMismatch {
                code,
                supplied,
                calculated,
            } => Some(json!({
                "code": code,
                "supplied": supplied,
                "calculated": calculated,
            })),
            PricingError::TooManyLineItems { count, limit } => {
                Some(json!({ "count": count, "limit": limit }))
            }
            PricingError::InvalidCommission { audience, index, .. } => {
                Some(json!({ "audience": audience, "index": index }))
            }
            PricingError::CurrencyMismatch {
                expected, found, ..
            } => Some(json!({ "expected": expected, "found": found })),
            PricingError::UnsupportedCurrency(_) | PricingError::AmountOutOfRange(_) => None,
        }
    }
}

/// Compute the line items for a booking.
///
/// Returns the booking line item followed by provider commissions and then
/// customer commissions, each group in configuration order. Percentage
/// commissions are taken from the booking line total.
///
/// # Errors
/// - `InvalidBookingRange` when the booking spans no whole unit
/// - `UnpricedLineItem` when a `units` booking has no quantity
/// - `CurrencyMismatch` when a commission uses another currency than the booking
/// - `TooManyLineItems` when the result exceeds [`MAX_LINE_ITEMS`]
pub fn compute_line_items(
    price_config: &PriceConfig,
    booking: &BookingParams,
) -> Result<Vec<LineItem>, PricingError> {
    let unit_type = price_config.booking_unit_type;
    let unit_count = resolve_unit_count(unit_type, booking)?;

    let booking_item = LineItem::new(
        LineItemParams::new(unit_type.as_str(), booking.unit_price.clone()).quantity(unit_count),
    )?;

    // Commissions are calculated from the booking total only
    let booking_total = booking_item.line_total().clone();

    let mut line_items = Vec::with_capacity(1 + price_config.commission.rule_count());
    line_items.push(booking_item);

    for audience in [Audience::Provider, Audience::Customer] {
        for (index, rule) in price_config.commission.rules_for(audience).iter().enumerate() {
            line_items.push(commission_line_item(&booking_total, audience, index, rule)?);
        }
    }

    if line_items.len() > MAX_LINE_ITEMS {
        warn!(count = line_items.len(), limit = MAX_LINE_ITEMS, "Too many line items");
        return Err(PricingError::TooManyLineItems {
            count: line_items.len(),
            limit: MAX_LINE_ITEMS,
        });
    }

    debug!(
        unit_type = %unit_type,
        unit_count,
        booking_total = %booking_total,
        line_items = line_items.len(),
        "Computed line items"
    );

    Ok(line_items)
}

/// Customer pay-in and provider payout for a set of line items.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineItemTotals {
    pub payin_total: Money,
    pub payout_total: Money,
}

/// Sum the line totals each party is included for.
///
/// Every item must be in `currency`.
pub fn line_item_totals(
    line_items: &[LineItem],
    currency: &str,
) -> Result<LineItemTotals, PricingError> {
    let mut payin: i64 = 0;
    let mut payout: i64 = 0;

    for item in line_items {
        let total = item.line_total();
        if total.currency != currency {
            return Err(PricingError::CurrencyMismatch {
                expected: currency.to_string(),
                found: total.currency.clone(),
                context: format!("totals of {}", item.code()),
            });
        }

        if item.includes(Audience::Customer) {
            payin = checked_sum(payin, total)?;
        }
        if item.includes(Audience::Provider) {
            payout = checked_sum(payout, total)?;
        }
    }

    Ok(LineItemTotals {
        payin_total: Money::new(payin, currency),
        payout_total: Money::new(payout, currency),
    })
}

fn checked_sum(sum: i64, total: &Money) -> Result<i64, PricingError> {
    sum.checked_add(total.amount)
        .ok_or_else(|| PricingError::AmountOutOfRange(format!("sum including {}", total)))
}

fn resolve_unit_count(unit_type: UnitType, booking: &BookingParams) -> Result<u32, PricingError> {
    let (start, end) = (booking.booking_start, booking.booking_end);
    match unit_type {
        UnitType::Night => dates::nights_between(start, end),
        UnitType::Day => dates::days_between(start, end),
        UnitType::Units => {
            dates::ensure_ordered(start, end)?;
            // Zero or missing quantity is rejected when the line item is built
            Ok(booking.quantity.unwrap_or(0))
        }
    }
}

fn commission_line_item(
    booking_total: &Money,
    audience: Audience,
    index: usize,
    rule: &CommissionRule,
) -> Result<LineItem, PricingError> {
    let include_for = include_for_only(audience);

    match rule {
        CommissionRule::Percentage {
            percentage,
            min,
            max,
        } => {
            let name = format!("{}-commission", audience);
            let min = commission_bound(booking_total, audience, index, "min", min.as_ref())?;
            let max = commission_bound(booking_total, audience, index, "max", max.as_ref())?;
            if let (Some(min), Some(max)) = (min, max) {
                if min > max {
                    return Err(PricingError::InvalidCommission {
                        audience,
                        index,
                        reason: format!("min {} is greater than max {}", min, max),
                    });
                }
            }

            let item = LineItem::new(
                LineItemParams::new(name.as_str(), booking_total.clone())
                    .percentage(*percentage)
                    .include_for(include_for.clone()),
            )?;

            let clamped = clamp_magnitude(item.line_total(), percentage.is_sign_negative(), min, max);
            if &clamped == item.line_total() {
                return Ok(item);
            }

            // A bounded commission is no longer a plain percentage of the
            // booking, so it is charged as a single unit of the clamped amount.
            debug!(
                code = %item.code(),
                calculated = %item.line_total(),
                clamped = %clamped,
                "Commission clamped to configured bounds"
            );
            LineItem::new(
                LineItemParams::new(name, clamped)
                    .quantity(1)
                    .include_for(include_for),
            )
        }
        CommissionRule::Fixed { unit_price } => {
            let code = line_item_code(&format!("fixed-{}-commission", audience));
            ensure_currency(booking_total, unit_price, || {
                format!("{} commission rule #{} ({})", audience, index, code)
            })?;

            LineItem::new(
                LineItemParams::new(format!("fixed-{}-commission", audience), unit_price.clone())
                    .quantity(1)
                    .include_for(include_for),
            )
        }
    }
}

/// Validate a min/max bound and return its magnitude in sub-units.
fn commission_bound(
    booking_total: &Money,
    audience: Audience,
    index: usize,
    which: &str,
    bound: Option<&Money>,
) -> Result<Option<i64>, PricingError> {
    let Some(bound) = bound else {
        return Ok(None);
    };

    ensure_currency(booking_total, bound, || {
        format!("{} of {} commission rule #{}", which, audience, index)
    })?;

    if bound.amount < 0 {
        return Err(PricingError::InvalidCommission {
            audience,
            index,
            reason: format!("{} must not be negative", which),
        });
    }

    Ok(Some(bound.amount))
}

fn ensure_currency(
    expected: &Money,
    found: &Money,
    context: impl FnOnce() -> String,
) -> Result<(), PricingError> {
    if expected.is_same_currency(found) {
        return Ok(());
    }
    Err(PricingError::CurrencyMismatch {
        expected: expected.currency.clone(),
        found: found.currency.clone(),
        context: context(),
    })
}
