//! Request DTOs for pricing API endpoints.

use serde::Deserialize;

use super::models::{BookingParams, PriceConfig};

/// Request to compute the line items of a booking
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculateLineItemsRequest {
    pub price_config: PriceConfig,
    pub booking_params: BookingParams,
}
