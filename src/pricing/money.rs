//! Money values in integer currency sub-units.
//!
//! Amounts are always stored as integer sub-units (cents for USD). Arithmetic
//! happens on `Decimal` in the human-readable unit and is converted back to
//! sub-units only when a `Money` value is built.

use rust_decimal::prelude::*;
use serde::{Deserialize, Serialize};

use super::calculators::round_money;
use super::services::PricingError;

/// Currencies without a minor unit.
const ZERO_DECIMAL_CURRENCIES: &[&str] = &[
    "BIF", "CLP", "DJF", "GNF", "ISK", "JPY", "KMF", "KRW", "PYG", "RWF", "UGX", "VND", "VUV",
    "XAF", "XOF", "XPF",
];

/// Currencies with three minor-unit digits.
const THREE_DECIMAL_CURRENCIES: &[&str] = &["BHD", "IQD", "JOD", "KWD", "LYD", "OMR", "TND"];

/// Currencies with the usual two minor-unit digits.
const TWO_DECIMAL_CURRENCIES: &[&str] = &[
    "AUD", "BGN", "BRL", "CAD", "CHF", "CNY", "CZK", "DKK", "EUR", "GBP", "HKD", "HUF", "IDR",
    "ILS", "INR", "MXN", "MYR", "NOK", "NZD", "PHP", "PLN", "RON", "SEK", "SGD", "THB", "TRY",
    "TWD", "USD", "ZAR",
];

/// Number of minor-unit digits for an ISO 4217 currency code.
pub fn minor_unit_digits(currency: &str) -> Result<u32, PricingError> {
    if TWO_DECIMAL_CURRENCIES.contains(&currency) {
        Ok(2)
    } else if ZERO_DECIMAL_CURRENCIES.contains(&currency) {
        Ok(0)
    } else if THREE_DECIMAL_CURRENCIES.contains(&currency) {
        Ok(3)
    } else {
        Err(PricingError::UnsupportedCurrency(currency.to_string()))
    }
}

/// Sub-units per whole unit (100 for USD, 1 for JPY, 1000 for KWD).
pub fn subunit_divisor(currency: &str) -> Result<Decimal, PricingError> {
    let digits = minor_unit_digits(currency)?;
    Ok(Decimal::from(10_i64.pow(digits)))
}

/// An integer amount of currency sub-units.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Money {
    pub amount: i64,
    pub currency: String,
}

impl Money {
    pub fn new(amount: i64, currency: impl Into<String>) -> Self {
        Self {
            amount,
            currency: currency.into(),
        }
    }

    /// Build a `Money` from a value in whole currency units.
    ///
    /// The value is rounded to the currency's minor unit with banker's
    /// rounding before conversion.
    ///
    /// # Examples
    /// ```
    /// use rust_decimal_macros::dec;
    /// use booking_pricing::pricing::Money;
    ///
    /// let money = Money::from_decimal(dec!(-75.00), "USD").unwrap();
    /// assert_eq!(money, Money::new(-7500, "USD"));
    /// ```
    pub fn from_decimal(value: Decimal, currency: &str) -> Result<Self, PricingError> {
        let digits = minor_unit_digits(currency)?;
        let divisor = subunit_divisor(currency)?;

        let amount = round_money(value, digits)
            .checked_mul(divisor)
            .and_then(|subunits| subunits.to_i64())
            .ok_or_else(|| PricingError::AmountOutOfRange(format!("{} {}", value, currency)))?;

        Ok(Self::new(amount, currency))
    }

    /// The amount in whole currency units (25000 USD cents -> 250.00).
    pub fn to_decimal(&self) -> Result<Decimal, PricingError> {
        let digits = minor_unit_digits(&self.currency)?;
        Ok(Decimal::new(self.amount, digits))
    }

    pub fn is_same_currency(&self, other: &Money) -> bool {
        self.currency == other.currency
    }
}

impl std::fmt::Display for Money {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.to_decimal() {
            Ok(value) => write!(f, "{} {}", value, self.currency),
            Err(_) => write!(f, "{} {} (sub-units)", self.amount, self.currency),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_subunit_divisor_by_currency() {
        assert_eq!(subunit_divisor("USD").unwrap(), dec!(100));
        assert_eq!(subunit_divisor("JPY").unwrap(), dec!(1));
        assert_eq!(subunit_divisor("KWD").unwrap(), dec!(1000));
    }

    #[test]
    fn test_unknown_currency_is_rejected() {
        assert_eq!(
            minor_unit_digits("XYZ"),
            Err(PricingError::UnsupportedCurrency("XYZ".to_string()))
        );
        // Codes are case-sensitive
        assert!(minor_unit_digits("usd").is_err());
    }

    #[test]
    fn test_to_decimal() {
        assert_eq!(Money::new(25000, "USD").to_decimal().unwrap(), dec!(250.00));
        assert_eq!(Money::new(-7500, "USD").to_decimal().unwrap(), dec!(-75.00));
        assert_eq!(Money::new(1200, "JPY").to_decimal().unwrap(), dec!(1200));
        assert_eq!(Money::new(1500, "KWD").to_decimal().unwrap(), dec!(1.500));
    }

    #[test]
    fn test_from_decimal_rounds_to_minor_unit() {
        assert_eq!(
            Money::from_decimal(dec!(1.4985), "USD").unwrap(),
            Money::new(150, "USD")
        );
        // Midpoint goes to the even neighbour
        assert_eq!(
            Money::from_decimal(dec!(1.265), "USD").unwrap(),
            Money::new(126, "USD")
        );
        assert_eq!(
            Money::from_decimal(dec!(10.5), "JPY").unwrap(),
            Money::new(10, "JPY")
        );
    }

    #[test]
    fn test_from_decimal_out_of_range() {
        let huge = Decimal::from(i64::MAX);
        assert!(matches!(
            Money::from_decimal(huge, "USD"),
            Err(PricingError::AmountOutOfRange(_))
        ));
    }

    #[test]
    fn test_display() {
        assert_eq!(Money::new(25000, "USD").to_string(), "250.00 USD");
        assert_eq!(Money::new(5, "XYZ").to_string(), "5 XYZ (sub-units)");
    }
}
