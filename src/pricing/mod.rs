//! Pricing engine module for booking transactions.
//!
//! Turns a price configuration and booking parameters into the line items of
//! a transaction: the booking itself plus provider and customer commissions.
//! The calculation is exposed over HTTP/JSON by [`router`].

pub mod calculators;
pub mod dates;
pub mod line_items;
pub mod models;
pub mod money;
pub mod requests;
pub mod responses;
pub mod routes;
pub mod services;

// Re-export commonly used items
pub use calculators::round_money;
pub use line_items::{LineItem, LineItemParams, PricingMode};
pub use models::{Audience, BookingParams, CommissionConfig, CommissionRule, PriceConfig, UnitType};
pub use money::Money;
pub use routes::router;
pub use services::{compute_line_items, line_item_totals, LineItemTotals, PricingError, MAX_LINE_ITEMS};
