//! Pricing configuration and booking input types.
//!
//! These are supplied by the caller on every request; nothing here has a
//! built-in default beyond empty commission lists.

use std::fmt;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::money::Money;

/// How the booking is counted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitType {
    Night,
    Day,
    /// Explicit quantity taken from `BookingParams::quantity`
    Units,
}

impl UnitType {
    pub fn as_str(&self) -> &'static str {
        match self {
            UnitType::Night => "night",
            UnitType::Day => "day",
            UnitType::Units => "units",
        }
    }
}

impl fmt::Display for UnitType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Party a line item applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Audience {
    Customer,
    Provider,
}

impl Audience {
    pub fn as_str(&self) -> &'static str {
        match self {
            Audience::Customer => "customer",
            Audience::Provider => "provider",
        }
    }
}

impl fmt::Display for Audience {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single commission rule.
///
/// JSON shape is either `{"percentage": -15, "min": Money?, "max": Money?}`
/// or `{"unitPrice": Money}`. A rule carrying both is a percentage rule.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum CommissionRule {
    /// Percentage of the booking total. Negative values are deducted.
    Percentage {
        percentage: Decimal,
        /// Lower bound on the commission's magnitude
        #[serde(default)]
        min: Option<Money>,
        /// Upper bound on the commission's magnitude
        #[serde(default)]
        max: Option<Money>,
    },
    /// Flat fee charged once.
    Fixed {
        #[serde(rename = "unitPrice")]
        unit_price: Money,
    },
}

/// Ordered commission rules per audience.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct CommissionConfig {
    #[serde(default)]
    pub provider: Vec<CommissionRule>,
    #[serde(default)]
    pub customer: Vec<CommissionRule>,
}

impl CommissionConfig {
    pub fn rules_for(&self, audience: Audience) -> &[CommissionRule] {
        match audience {
            Audience::Provider => &self.provider,
            Audience::Customer => &self.customer,
        }
    }

    pub fn rule_count(&self) -> usize {
        self.provider.len() + self.customer.len()
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceConfig {
    pub booking_unit_type: UnitType,
    #[serde(default)]
    pub commission: CommissionConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingParams {
    pub booking_start: DateTime<Utc>,
    pub booking_end: DateTime<Utc>,
    pub unit_price: Money,
    /// Only read for `UnitType::Units`
    #[serde(default)]
    pub quantity: Option<u32>,
}
