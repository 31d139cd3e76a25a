//! Core pricing calculation functions.
//!
//! Pure functions for line total math - no I/O. Every multiplication and
//! division runs on `Decimal` in whole currency units; the result is converted
//! to integer sub-units only when the final `Money` is built.

use rust_decimal::prelude::*;

use super::money::Money;
use super::services::PricingError;

/// Round to specified decimal places using banker's rounding (ROUND_HALF_EVEN).
///
/// Banker's rounding rounds to the nearest even number when the value is exactly
/// halfway between two possibilities. This reduces cumulative rounding bias.
///
/// # Examples
/// ```
/// use rust_decimal_macros::dec;
/// use booking_pricing::pricing::round_money;
///
/// assert_eq!(round_money(dec!(2.5), 0), dec!(2));   // rounds to even
/// assert_eq!(round_money(dec!(3.5), 0), dec!(4));   // rounds to even
/// assert_eq!(round_money(dec!(1.234), 2), dec!(1.23));
/// ```
pub fn round_money(amount: Decimal, places: u32) -> Decimal {
    amount.round_dp_with_strategy(places, RoundingStrategy::MidpointNearestEven)
}

/// Line total for `quantity` units at `unit_price`.
pub fn total_from_quantity(unit_price: &Money, quantity: u32) -> Result<Money, PricingError> {
    let total = unit_price
        .to_decimal()?
        .checked_mul(Decimal::from(quantity))
        .ok_or_else(|| overflow(unit_price, "quantity"))?;

    Money::from_decimal(total, &unit_price.currency)
}

/// Line total for a percentage of `unit_price` (-15 means -15%).
pub fn total_from_percentage(unit_price: &Money, percentage: Decimal) -> Result<Money, PricingError> {
    let total = unit_price
        .to_decimal()?
        .checked_mul(percentage)
        .and_then(|value| value.checked_div(Decimal::ONE_HUNDRED))
        .ok_or_else(|| overflow(unit_price, "percentage"))?;

    Money::from_decimal(total, &unit_price.currency)
}

/// Line total for `seats` x `units` at `unit_price`.
///
/// Returns the derived quantity together with the total.
pub fn total_from_seats_and_units(
    unit_price: &Money,
    seats: u32,
    units: u32,
) -> Result<(u32, Money), PricingError> {
    let quantity = seats
        .checked_mul(units)
        .ok_or_else(|| overflow(unit_price, "seats x units"))?;

    Ok((quantity, total_from_quantity(unit_price, quantity)?))
}

/// Clamp the magnitude of `total` into `[min, max]`, keeping its sign.
///
/// `negative` decides the sign when `total` is zero and has to be raised to
/// `min`. Bounds are magnitudes in the same currency as `total`.
pub fn clamp_magnitude(total: &Money, negative: bool, min: Option<i64>, max: Option<i64>) -> Money {
    let magnitude = total.amount.saturating_abs();
    let mut clamped = magnitude;

    if let Some(min) = min {
        clamped = clamped.max(min);
    }
    if let Some(max) = max {
        clamped = clamped.min(max);
    }

    if clamped == magnitude {
        return total.clone();
    }

    let signed = if negative || total.amount < 0 {
        -clamped
    } else {
        clamped
    };
    Money::new(signed, total.currency.clone())
}

fn overflow(unit_price: &Money, operation: &str) -> PricingError {
    PricingError::AmountOutOfRange(format!("{} applied to {}", operation, unit_price))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    // ==================== round_money tests ====================

    #[test]
    fn test_round_money_bankers_rounding_to_even() {
        assert_eq!(round_money(dec!(2.5), 0), dec!(2));
        assert_eq!(round_money(dec!(3.5), 0), dec!(4));
        assert_eq!(round_money(dec!(4.5), 0), dec!(4));
        assert_eq!(round_money(dec!(5.5), 0), dec!(6));
    }

    #[test]
    fn test_round_money_decimal_places() {
        assert_eq!(round_money(dec!(2.25), 1), dec!(2.2));
        assert_eq!(round_money(dec!(1.234), 2), dec!(1.23));
        assert_eq!(round_money(dec!(1.236), 2), dec!(1.24));
        assert_eq!(round_money(dec!(0.1875), 3), dec!(0.188));
    }

    #[test]
    fn test_round_money_negative() {
        assert_eq!(round_money(dec!(-2.5), 0), dec!(-2));
        assert_eq!(round_money(dec!(-3.5), 0), dec!(-4));
        assert_eq!(round_money(dec!(-1.234), 2), dec!(-1.23));
    }

    // ==================== quantity tests ====================

    #[test]
    fn test_total_from_quantity_is_exact() {
        let price = Money::new(25000, "USD");
        assert_eq!(total_from_quantity(&price, 2).unwrap(), Money::new(50000, "USD"));

        // 0.10 + 0.20 style drift must not appear
        let price = Money::new(10, "USD");
        assert_eq!(total_from_quantity(&price, 3).unwrap(), Money::new(30, "USD"));
    }

    #[test]
    fn test_total_from_quantity_other_divisors() {
        let yen = Money::new(1000, "JPY");
        assert_eq!(total_from_quantity(&yen, 3).unwrap(), Money::new(3000, "JPY"));

        let dinar = Money::new(1250, "KWD");
        assert_eq!(total_from_quantity(&dinar, 4).unwrap(), Money::new(5000, "KWD"));
    }

    #[test]
    fn test_total_from_quantity_overflow() {
        let price = Money::new(i64::MAX, "USD");
        assert!(matches!(
            total_from_quantity(&price, 2),
            Err(PricingError::AmountOutOfRange(_))
        ));
    }

    // ==================== percentage tests ====================

    #[test]
    fn test_total_from_negative_percentage() {
        // 500.00 * 0.15 in binary floating point is not exactly 75
        let booking_total = Money::new(50000, "USD");
        assert_eq!(
            total_from_percentage(&booking_total, dec!(-15)).unwrap(),
            Money::new(-7500, "USD")
        );
    }

    #[test]
    fn test_total_from_fractional_percentage() {
        // 9.99 * 15% = 1.4985 -> 1.50
        let price = Money::new(999, "USD");
        assert_eq!(
            total_from_percentage(&price, dec!(15)).unwrap(),
            Money::new(150, "USD")
        );

        // 10.10 * 12.5% = 1.2625 -> 1.26 (half to even)
        let price = Money::new(1010, "USD");
        assert_eq!(
            total_from_percentage(&price, dec!(12.5)).unwrap(),
            Money::new(126, "USD")
        );

        // 1.500 KWD * 12.5% = 0.1875 -> 0.188
        let price = Money::new(1500, "KWD");
        assert_eq!(
            total_from_percentage(&price, dec!(12.5)).unwrap(),
            Money::new(188, "KWD")
        );
    }

    #[test]
    fn test_total_from_zero_percentage() {
        let price = Money::new(50000, "USD");
        assert_eq!(
            total_from_percentage(&price, dec!(0)).unwrap(),
            Money::new(0, "USD")
        );
    }

    // ==================== seats and units tests ====================

    #[test]
    fn test_total_from_seats_and_units() {
        let price = Money::new(1000, "USD");
        let (quantity, total) = total_from_seats_and_units(&price, 3, 2).unwrap();
        assert_eq!(quantity, 6);
        assert_eq!(total, Money::new(6000, "USD"));
    }

    #[test]
    fn test_seats_and_units_overflow() {
        let price = Money::new(1000, "USD");
        assert!(total_from_seats_and_units(&price, u32::MAX, 2).is_err());
    }

    // ==================== clamp_magnitude tests ====================

    #[test]
    fn test_clamp_within_bounds_is_unchanged() {
        let total = Money::new(-7500, "USD");
        assert_eq!(clamp_magnitude(&total, true, Some(2000), Some(10000)), total);
    }

    #[test]
    fn test_clamp_keeps_sign() {
        let total = Money::new(-15000, "USD");
        assert_eq!(
            clamp_magnitude(&total, true, Some(2000), Some(10000)),
            Money::new(-10000, "USD")
        );

        let total = Money::new(500, "USD");
        assert_eq!(
            clamp_magnitude(&total, false, Some(2000), None),
            Money::new(2000, "USD")
        );
    }

    #[test]
    fn test_clamp_zero_raised_to_negative_min() {
        let total = Money::new(0, "USD");
        assert_eq!(
            clamp_magnitude(&total, true, Some(2000), None),
            Money::new(-2000, "USD")
        );
    }
}
