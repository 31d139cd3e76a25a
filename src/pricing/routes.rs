//! HTTP routes for the pricing engine.

use axum::{extract::rejection::JsonRejection, routing::post, Json, Router};

use crate::error::Result;
use crate::AppState;

use super::requests::CalculateLineItemsRequest;
use super::responses::LineItemsResponse;
use super::services::{compute_line_items, line_item_totals};

/// Pricing routes, mounted under `/api/pricing`
pub fn router() -> Router<AppState> {
    Router::new().route("/api/pricing/line-items", post(calculate_line_items))
}

/// Compute the line items and party totals for a booking
async fn calculate_line_items(
    payload: std::result::Result<Json<CalculateLineItemsRequest>, JsonRejection>,
) -> Result<Json<LineItemsResponse>> {
    let Json(request) = payload?;

    let line_items = compute_line_items(&request.price_config, &request.booking_params)?;
    let totals = line_item_totals(&line_items, &request.booking_params.unit_price.currency)?;

    tracing::debug!(
        line_items = line_items.len(),
        payin_total = %totals.payin_total,
        payout_total = %totals.payout_total,
        "Line items calculated"
    );

    Ok(Json(LineItemsResponse::new(line_items, totals)))
}
