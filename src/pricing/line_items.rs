//! Transaction line items.
//!
//! A line item is one priced component of a booking: the base rental or a
//! commission. Each item is priced in exactly one mode:
//! - quantity: `lineTotal = unitPrice * quantity`
//! - percentage: `lineTotal = unitPrice * (percentage / 100)`
//! - seats and units: `quantity = seats * units`, `lineTotal = unitPrice * seats * units`
//!
//! Items are only built through [`LineItem::new`], which resolves the mode
//! from the supplied fields and computes the total. A caller-supplied total
//! is checked against the computed one.

use std::collections::BTreeSet;

use rust_decimal::Decimal;
use serde::{Serialize, Serializer};

use super::calculators::{total_from_percentage, total_from_quantity, total_from_seats_and_units};
use super::models::Audience;
use super::money::Money;
use super::services::PricingError;

pub const LINE_ITEM_CODE_PREFIX: &str = "line-item/";

/// Longest code accepted by the transaction protocol.
pub const MAX_CODE_LENGTH: usize = 64;

/// Parties a line item applies to.
pub type IncludeFor = BTreeSet<Audience>;

/// Both customer and provider.
pub fn include_for_both() -> IncludeFor {
    IncludeFor::from([Audience::Customer, Audience::Provider])
}

pub fn include_for_only(audience: Audience) -> IncludeFor {
    IncludeFor::from([audience])
}

/// Full line item code for a name (`night` -> `line-item/night`).
pub fn line_item_code(name: &str) -> String {
    format!("{}{}", LINE_ITEM_CODE_PREFIX, name)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PricingMode {
    Quantity(u32),
    Percentage(Decimal),
    SeatsAndUnits { seats: u32, units: u32 },
}

/// Loose inputs for a line item, resolved by [`LineItem::new`].
#[derive(Debug, Clone)]
pub struct LineItemParams {
    name: String,
    unit_price: Money,
    quantity: Option<u32>,
    percentage: Option<Decimal>,
    seats: Option<u32>,
    units: Option<u32>,
    include_for: Option<IncludeFor>,
    line_total: Option<Money>,
}

impl LineItemParams {
    pub fn new(name: impl Into<String>, unit_price: Money) -> Self {
        Self {
            name: name.into(),
            unit_price,
            quantity: None,
            percentage: None,
            seats: None,
            units: None,
            include_for: None,
            line_total: None,
        }
    }

    pub fn quantity(mut self, quantity: u32) -> Self {
        self.quantity = Some(quantity);
        self
    }

    pub fn percentage(mut self, percentage: Decimal) -> Self {
        self.percentage = Some(percentage);
        self
    }

    pub fn seats_and_units(mut self, seats: u32, units: u32) -> Self {
        self.seats = Some(seats);
        self.units = Some(units);
        self
    }

    /// Defaults to both parties when not set.
    pub fn include_for(mut self, include_for: IncludeFor) -> Self {
        self.include_for = Some(include_for);
        self
    }

    /// Expected total, validated against the computed one.
    pub fn line_total(mut self, line_total: Money) -> Self {
        self.line_total = Some(line_total);
        self
    }

    /// Pick the pricing mode: quantity, then percentage, then seats and units.
    fn resolve_mode(&self) -> Option<PricingMode> {
        if let Some(quantity) = self.quantity.filter(|q| *q > 0) {
            return Some(PricingMode::Quantity(quantity));
        }
        if let Some(percentage) = self.percentage {
            return Some(PricingMode::Percentage(percentage));
        }
        match (self.seats, self.units) {
            (Some(seats), Some(units)) if seats > 0 && units > 0 => {
                Some(PricingMode::SeatsAndUnits { seats, units })
            }
            _ => None,
        }
    }
}

/// A priced, validated line item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineItem {
    code: String,
    unit_price: Money,
    line_total: Money,
    mode: PricingMode,
    include_for: IncludeFor,
}

impl LineItem {
    pub fn new(params: LineItemParams) -> Result<Self, PricingError> {
        let code = line_item_code(&params.name);
        validate_code(&params.name, &code)?;

        let include_for = params.include_for.clone().unwrap_or_else(include_for_both);
        if include_for.is_empty() {
            return Err(PricingError::EmptyIncludeFor { code });
        }

        let Some(mode) = params.resolve_mode() else {
            tracing::warn!(
                code = %code,
                "Line item has no quantity, percentage, or seats and units"
            );
            return Err(PricingError::UnpricedLineItem { code });
        };

        let line_total = match mode {
            PricingMode::Quantity(quantity) => total_from_quantity(&params.unit_price, quantity)?,
            PricingMode::Percentage(percentage) => {
                total_from_percentage(&params.unit_price, percentage)?
            }
            PricingMode::SeatsAndUnits { seats, units } => {
                total_from_seats_and_units(&params.unit_price, seats, units)?.1
            }
        };

        if let Some(supplied) = params.line_total {
            if !supplied.is_same_currency(&line_total) {
                return Err(PricingError::CurrencyMismatch {
                    expected: line_total.currency,
                    found: supplied.currency,
                    context: format!("line total of {}", code),
                });
            }
            if supplied.amount != line_total.amount {
                return Err(PricingError::LineTotalMismatch {
                    code,
                    supplied: supplied.amount,
                    calculated: line_total.amount,
                });
            }
        }

        Ok(Self {
            code,
            unit_price: params.unit_price,
            line_total,
            mode,
            include_for,
        })
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn unit_price(&self) -> &Money {
        &self.unit_price
    }

    pub fn line_total(&self) -> &Money {
        &self.line_total
    }

    pub fn mode(&self) -> PricingMode {
        self.mode
    }

    pub fn include_for(&self) -> &IncludeFor {
        &self.include_for
    }

    pub fn includes(&self, audience: Audience) -> bool {
        self.include_for.contains(&audience)
    }

    /// Effective quantity; seats and units report their product.
    pub fn quantity(&self) -> Option<u32> {
        match self.mode {
            PricingMode::Quantity(quantity) => Some(quantity),
            // Overflow was rejected at construction
            PricingMode::SeatsAndUnits { seats, units } => Some(seats.saturating_mul(units)),
            PricingMode::Percentage(_) => None,
        }
    }

    pub fn percentage(&self) -> Option<Decimal> {
        match self.mode {
            PricingMode::Percentage(percentage) => Some(percentage),
            _ => None,
        }
    }
}

fn validate_code(name: &str, code: &str) -> Result<(), PricingError> {
    let reason = if name.trim().is_empty() {
        "name is empty".to_string()
    } else if code.chars().count() > MAX_CODE_LENGTH {
        format!("longer than {} characters", MAX_CODE_LENGTH)
    } else if name.chars().any(char::is_whitespace) {
        "name contains whitespace".to_string()
    } else {
        return Ok(());
    };

    Err(PricingError::InvalidLineItemCode {
        code: code.to_string(),
        reason,
    })
}

/// Wire shape of the transaction line item protocol.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct WireLineItem<'a> {
    code: &'a str,
    unit_price: &'a Money,
    line_total: &'a Money,
    #[serde(skip_serializing_if = "Option::is_none")]
    quantity: Option<u32>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        with = "rust_decimal::serde::float_option"
    )]
    percentage: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    seats: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    units: Option<u32>,
    include_for: &'a IncludeFor,
}

impl Serialize for LineItem {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let (seats, units) = match self.mode {
            PricingMode::SeatsAndUnits { seats, units } => (Some(seats), Some(units)),
            _ => (None, None),
        };

        WireLineItem {
            code: &self.code,
            unit_price: &self.unit_price,
            line_total: &self.line_total,
            quantity: self.quantity(),
            percentage: self.percentage(),
            seats,
            units,
            include_for: &self.include_for,
        }
        .serialize(serializer)
    }
}
