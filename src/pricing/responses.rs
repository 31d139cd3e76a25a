//! Response DTOs for pricing API endpoints.

use serde::Serialize;

use super::line_items::LineItem;
use super::money::Money;
use super::services::{LineItemTotals, PricingError};

/// Response for line item computation
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItemsResponse {
    pub line_items: Vec<LineItem>,
    pub payin_total: Money,
    pub payout_total: Money,
}

impl LineItemsResponse {
    pub fn new(line_items: Vec<LineItem>, totals: LineItemTotals) -> Self {
        Self {
            line_items,
            payin_total: totals.payin_total,
            payout_total: totals.payout_total,
        }
    }
}

/// Generic pricing error response
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingErrorResponse {
    pub error_type: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl From<&PricingError> for PricingErrorResponse {
    fn from(err: &PricingError) -> Self {
        Self {
            error_type: err.error_type().to_string(),
            message: err.to_string(),
            details: err.details(),
        }
    }
}
