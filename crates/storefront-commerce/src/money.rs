//! Money type for representing monetary values.
//!
//! Uses cents-based integer representation so running cart totals do not
//! pick up floating-point error as items are added and removed.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::CommerceError;

/// Supported currencies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Currency {
    #[default]
    USD,
    EUR,
    GBP,
    JPY,
    CAD,
    AUD,
}

impl Currency {
    /// Get the currency code (e.g., "USD").
    pub fn code(&self) -> &'static str {
        match self {
            Currency::USD => "USD",
            Currency::EUR => "EUR",
            Currency::GBP => "GBP",
            Currency::JPY => "JPY",
            Currency::CAD => "CAD",
            Currency::AUD => "AUD",
        }
    }

    /// Get the currency symbol (e.g., "$").
    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::USD => "$",
            Currency::EUR => "\u{20ac}",
            Currency::GBP => "\u{00a3}",
            Currency::JPY => "\u{00a5}",
            Currency::CAD => "CA$",
            Currency::AUD => "A$",
        }
    }

    /// Get the number of decimal places for this currency.
    pub fn decimal_places(&self) -> u32 {
        match self {
            Currency::JPY => 0,
            _ => 2,
        }
    }

    /// Parse a currency code string.
    pub fn from_code(code: &str) -> Option<Self> {
        match code.to_uppercase().as_str() {
            "USD" => Some(Currency::USD),
            "EUR" => Some(Currency::EUR),
            "GBP" => Some(Currency::GBP),
            "JPY" => Some(Currency::JPY),
            "CAD" => Some(Currency::CAD),
            "AUD" => Some(Currency::AUD),
            _ => None,
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// A monetary value with currency.
///
/// Amounts are stored in the smallest unit of the currency (e.g., cents for USD).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct Money {
    /// Amount in smallest currency unit (e.g., cents).
    pub amount_cents: i64,
    /// The currency.
    pub currency: Currency,
}

impl Money {
    /// Create a new Money value from cents.
    pub fn new(amount_cents: i64, currency: Currency) -> Self {
        Self {
            amount_cents,
            currency,
        }
    }

    /// Create a Money value from a decimal amount, as served by the product API.
    ///
    /// ```
    /// use storefront_commerce::money::{Money, Currency};
    /// let price = Money::from_decimal(9.99, Currency::USD);
    /// assert_eq!(price.amount_cents, 999);
    /// ```
    pub fn from_decimal(amount: f64, currency: Currency) -> Self {
        let multiplier = 10_i64.pow(currency.decimal_places());
        let amount_cents = (amount * multiplier as f64).round() as i64;
        Self::new(amount_cents, currency)
    }

    /// Create a zero amount in the given currency.
    pub fn zero(currency: Currency) -> Self {
        Self::new(0, currency)
    }

    pub fn is_zero(&self) -> bool {
        self.amount_cents == 0
    }

    pub fn is_negative(&self) -> bool {
        self.amount_cents < 0
    }

    /// Convert to a decimal value.
    pub fn to_decimal(&self) -> f64 {
        let divisor = 10_i64.pow(self.currency.decimal_places());
        self.amount_cents as f64 / divisor as f64
    }

    /// Format as a display string (e.g., "$49.99").
    pub fn display(&self) -> String {
        let places = self.currency.decimal_places() as usize;
        if self.is_negative() {
            format!("-{}{:.places$}", self.currency.symbol(), -self.to_decimal())
        } else {
            format!("{}{:.places$}", self.currency.symbol(), self.to_decimal())
        }
    }

    /// Add another Money value.
    pub fn checked_add(&self, other: &Money) -> Result<Money, CommerceError> {
        self.same_currency(other)?;
        self.amount_cents
            .checked_add(other.amount_cents)
            .map(|cents| Money::new(cents, self.currency))
            .ok_or(CommerceError::Overflow)
    }

    /// Subtract another Money value.
    pub fn checked_sub(&self, other: &Money) -> Result<Money, CommerceError> {
        self.same_currency(other)?;
        self.amount_cents
            .checked_sub(other.amount_cents)
            .map(|cents| Money::new(cents, self.currency))
            .ok_or(CommerceError::Overflow)
    }

    /// Multiply by a quantity.
    pub fn checked_mul(&self, factor: i64) -> Result<Money, CommerceError> {
        self.amount_cents
            .checked_mul(factor)
            .map(|cents| Money::new(cents, self.currency))
            .ok_or(CommerceError::Overflow)
    }

    /// A share of this amount in basis points (800 = 8%), rounded half away
    /// from zero to the nearest minor unit.
    pub fn checked_percentage(&self, basis_points: i64) -> Result<Money, CommerceError> {
        let raw = self
            .amount_cents
            .checked_mul(basis_points)
            .ok_or(CommerceError::Overflow)?;
        let half = if raw < 0 { -5_000 } else { 5_000 };
        let rounded = raw.checked_add(half).ok_or(CommerceError::Overflow)? / 10_000;
        Ok(Money::new(rounded, self.currency))
    }

    /// Sum an iterator of Money values.
    pub fn try_sum<'a>(
        mut iter: impl Iterator<Item = &'a Money>,
        currency: Currency,
    ) -> Result<Money, CommerceError> {
        iter.try_fold(Money::zero(currency), |acc, m| acc.checked_add(m))
    }

    fn same_currency(&self, other: &Money) -> Result<(), CommerceError> {
        if self.currency != other.currency {
            return Err(CommerceError::CurrencyMismatch {
                expected: self.currency.code().to_string(),
                got: other.currency.code().to_string(),
            });
        }
        Ok(())
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_money_from_decimal() {
        let m = Money::from_decimal(49.99, Currency::USD);
        assert_eq!(m.amount_cents, 4999);

        let m = Money::from_decimal(100.0, Currency::JPY);
        assert_eq!(m.amount_cents, 100);
    }

    #[test]
    fn test_money_display() {
        assert_eq!(Money::new(4999, Currency::USD).display(), "$49.99");
        assert_eq!(Money::new(100, Currency::JPY).display(), "\u{00a5}100");
        assert_eq!(Money::new(-250, Currency::USD).display(), "-$2.50");
    }

    #[test]
    fn test_money_arithmetic() {
        let a = Money::new(1000, Currency::USD);
        let b = Money::new(300, Currency::USD);
        assert_eq!(a.checked_add(&b).unwrap().amount_cents, 1300);
        assert_eq!(a.checked_sub(&b).unwrap().amount_cents, 700);
        assert_eq!(a.checked_mul(3).unwrap().amount_cents, 3000);
    }

    #[test]
    fn test_money_currency_mismatch() {
        let usd = Money::new(1000, Currency::USD);
        let eur = Money::new(1000, Currency::EUR);
        assert!(matches!(
            usd.checked_add(&eur),
            Err(CommerceError::CurrencyMismatch { .. })
        ));
    }

    #[test]
    fn test_money_overflow() {
        let big = Money::new(i64::MAX, Currency::USD);
        assert_eq!(big.checked_mul(2), Err(CommerceError::Overflow));
        assert_eq!(
            big.checked_add(&Money::new(1, Currency::USD)),
            Err(CommerceError::Overflow)
        );
    }

    #[test]
    fn test_try_sum() {
        let values = [
            Money::new(100, Currency::USD),
            Money::new(250, Currency::USD),
        ];
        let total = Money::try_sum(values.iter(), Currency::USD).unwrap();
        assert_eq!(total.amount_cents, 350);
    }

    #[test]
    fn test_checked_percentage_rounds_half_away_from_zero() {
        let tax = |cents| Money::new(cents, Currency::USD).checked_percentage(800).unwrap();
        assert_eq!(tax(5198).amount_cents, 416); // 415.84
        assert_eq!(tax(1000).amount_cents, 80);
        assert_eq!(tax(6250).amount_cents, 500);
        assert_eq!(tax(-6250).amount_cents, -500);
        assert_eq!(
            Money::new(i64::MAX, Currency::USD).checked_percentage(800),
            Err(CommerceError::Overflow)
        );
    }

    #[test]
    fn test_currency_from_code() {
        assert_eq!(Currency::from_code("USD"), Some(Currency::USD));
        assert_eq!(Currency::from_code("eur"), Some(Currency::EUR));
        assert_eq!(Currency::from_code("INVALID"), None);
    }
}
