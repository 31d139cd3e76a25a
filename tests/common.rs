//! Shared helpers for pricing API tests.

#![allow(dead_code)]

use axum_test::TestServer;
use serde_json::{json, Value};

use booking_pricing::{create_router, AppConfig, AppState};

pub fn test_server() -> TestServer {
    let config = AppConfig {
        listen_addr: "127.0.0.1:0".into(),
        cors_origins: vec!["http://localhost:3000".into()],
        service_name: "booking-pricing-test".into(),
    };
    TestServer::new(create_router(AppState::new(config))).expect("Failed to create test server")
}

pub fn usd(amount: i64) -> Value {
    json!({ "amount": amount, "currency": "USD" })
}

/// Two nights at 250.00 USD with a -15% provider commission and a 25.00
/// customer fee.
pub fn sample_request() -> Value {
    json!({
        "priceConfig": {
            "bookingUnitType": "night",
            "commission": {
                "provider": [{ "percentage": -15 }],
                "customer": [{ "unitPrice": usd(2500) }]
            }
        },
        "bookingParams": {
            "bookingStart": "2018-04-20T12:00:00.000Z",
            "bookingEnd": "2018-04-22T16:00:00.000Z",
            "unitPrice": usd(25000)
        }
    })
}
