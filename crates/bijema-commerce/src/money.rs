//! Money type for representing monetary values.
//!
//! Uses cents-based integer representation to avoid floating-point
//! precision issues that plague monetary calculations. Records from the
//! data store carry prices as plain major-unit numbers; see [`major_units`].

use crate::error::CommerceError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Supported currencies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
pub enum Currency {
    /// Kenyan shilling, the storefront's home currency.
    #[default]
    KES,
    USD,
}

impl Currency {
    /// Get the currency code (e.g., "KES").
    pub fn code(&self) -> &'static str {
        match self {
            Currency::KES => "KES",
            Currency::USD => "USD",
        }
    }

    /// Get the symbol shown next to prices.
    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::KES => "KSH",
            Currency::USD => "$",
        }
    }

    /// Get the number of decimal places for this currency.
    pub fn decimal_places(&self) -> u32 {
        2
    }

    /// Parse a currency code string.
    pub fn from_code(code: &str) -> Option<Self> {
        match code.to_uppercase().as_str() {
            "KES" | "KSH" => Some(Currency::KES),
            "USD" => Some(Currency::USD),
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
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
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

    /// Create a Money value from a decimal amount.
    ///
    /// ```
    /// use bijema_commerce::money::{Money, Currency};
    /// let price = Money::from_decimal(1299.5, Currency::KES);
    /// assert_eq!(price.amount_cents, 129950);
    /// ```
    pub fn from_decimal(amount: f64, currency: Currency) -> Self {
        let multiplier = 10_i64.pow(currency.decimal_places());
        let amount_cents = (amount * multiplier as f64).round() as i64;
        Self::new(amount_cents, currency)
    }

    /// Parse a major-unit amount such as `"100"` or `"49.99"`.
    ///
    /// Returns `None` for blank, non-numeric or non-finite input.
    pub fn parse_major(raw: &str, currency: Currency) -> Option<Self> {
        let amount: f64 = raw.trim().parse().ok()?;
        if !amount.is_finite() {
            return None;
        }
        Some(Self::from_decimal(amount, currency))
    }

    /// The same amount tagged with `currency`.
    ///
    /// Records stored as plain numbers carry no currency of their own; this
    /// applies the storefront's configured one.
    pub fn in_currency(self, currency: Currency) -> Money {
        Money::new(self.amount_cents, currency)
    }

    /// Create a zero amount in the given currency.
    pub fn zero(currency: Currency) -> Self {
        Self::new(0, currency)
    }

    /// Check if this is zero.
    pub fn is_zero(&self) -> bool {
        self.amount_cents == 0
    }

    /// Check if this is positive.
    pub fn is_positive(&self) -> bool {
        self.amount_cents > 0
    }

    /// Convert to a decimal value.
    pub fn to_decimal(&self) -> f64 {
        let divisor = 10_i64.pow(self.currency.decimal_places());
        self.amount_cents as f64 / divisor as f64
    }

    /// Format as a display string (e.g., "KSH49.99").
    pub fn display(&self) -> String {
        format!("{}{}", self.currency.symbol(), self.display_amount())
    }

    /// Format as a display string without symbol (e.g., "49.99").
    pub fn display_amount(&self) -> String {
        let places = self.currency.decimal_places() as usize;
        format!("{:.places$}", self.to_decimal())
    }

    /// Add another Money value, failing if currencies differ.
    pub fn checked_add(&self, other: &Money) -> Result<Money, CommerceError> {
        if self.currency != other.currency {
            return Err(CommerceError::CurrencyMismatch {
                expected: self.currency.code().to_string(),
                got: other.currency.code().to_string(),
            });
        }
        Ok(Money::new(
            self.amount_cents.saturating_add(other.amount_cents),
            self.currency,
        ))
    }

    /// Multiply by a quantity.
    pub fn multiply(&self, factor: i64) -> Money {
        Money::new(self.amount_cents.saturating_mul(factor), self.currency)
    }

    /// Sum an iterator of Money values.
    pub fn sum<'a>(
        iter: impl IntoIterator<Item = &'a Money>,
        currency: Currency,
    ) -> Result<Money, CommerceError> {
        iter.into_iter()
            .try_fold(Money::zero(currency), |acc, m| acc.checked_add(m))
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display())
    }
}

/// Serde adapter for prices stored as plain major-unit numbers in the
/// default currency, e.g. `"price": 1299.5`.
pub mod major_units {
    use super::{Currency, Money};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(money: &Money, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(money.to_decimal())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Money, D::Error> {
        let amount = f64::deserialize(deserializer)?;
        Ok(Money::from_decimal(amount, Currency::default()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_money_from_decimal() {
        let m = Money::from_decimal(49.99, Currency::KES);
        assert_eq!(m.amount_cents, 4999);
    }

    #[test]
    fn test_money_parse_major() {
        assert_eq!(
            Money::parse_major("100", Currency::KES),
            Some(Money::new(10000, Currency::KES))
        );
        assert_eq!(
            Money::parse_major(" 12.5 ", Currency::KES),
            Some(Money::new(1250, Currency::KES))
        );
        assert_eq!(Money::parse_major("abc", Currency::KES), None);
        assert_eq!(Money::parse_major("", Currency::KES), None);
        assert_eq!(Money::parse_major("inf", Currency::KES), None);
    }

    #[test]
    fn test_money_display() {
        let m = Money::new(4999, Currency::KES);
        assert_eq!(m.display(), "KSH49.99");
        assert_eq!(m.display_amount(), "49.99");
    }

    #[test]
    fn test_money_checked_add() {
        let a = Money::new(1000, Currency::KES);
        let b = Money::new(500, Currency::KES);
        assert_eq!(a.checked_add(&b).unwrap().amount_cents, 1500);

        let usd = Money::new(500, Currency::USD);
        assert!(matches!(
            a.checked_add(&usd),
            Err(CommerceError::CurrencyMismatch { .. })
        ));
    }

    #[test]
    fn test_money_sum() {
        let values = [
            Money::new(100, Currency::KES),
            Money::new(250, Currency::KES),
        ];
        let total = Money::sum(&values, Currency::KES).unwrap();
        assert_eq!(total.amount_cents, 350);
    }

    #[test]
    fn test_major_units_serde() {
        #[derive(Serialize, Deserialize)]
        struct Priced {
            #[serde(with = "major_units")]
            price: Money,
        }

        let parsed: Priced = serde_json::from_str(r#"{"price": 1299.5}"#).unwrap();
        assert_eq!(parsed.price, Money::new(129950, Currency::KES));
        assert_eq!(serde_json::to_string(&parsed).unwrap(), r#"{"price":1299.5}"#);
    }

    #[test]
    fn test_money_ordering() {
        let prices = [
            Money::new(45000, Currency::KES),
            Money::new(120000, Currency::KES),
            Money::new(30000, Currency::KES),
        ];
        assert_eq!(prices.iter().min(), Some(&Money::new(30000, Currency::KES)));
        assert_eq!(prices.iter().max(), Some(&Money::new(120000, Currency::KES)));
        assert!(prices[0] > prices[2]);
        assert!(Currency::KES < Currency::USD);
    }

    #[test]
    fn test_money_in_currency() {
        let price = Money::new(1250, Currency::KES).in_currency(Currency::USD);
        assert_eq!(price, Money::new(1250, Currency::USD));
        assert_eq!(price.display(), "$12.50");
    }

    #[test]
    fn test_currency_from_code() {
        assert_eq!(Currency::from_code("kes"), Some(Currency::KES));
        assert_eq!(Currency::from_code("KSH"), Some(Currency::KES));
        assert_eq!(Currency::from_code("EUR"), None);
    }
}
