//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely, the
//! closed set of display currencies, and the display formatter.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In JavaScript/floating point:                                          │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents                                            │
//! │    Every balance, price and spend total is an i64 number of cents.     │
//! │    Floats only appear at the display boundary, where an exchange-rate  │
//! │    multiplier turns the canonical base-currency value into a string.   │
//! │    That projection is recomputed on every render and never stored.     │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use magnate_core::money::{format_display, Currency, ExchangeRates, Money};
//!
//! let price = Money::from_major(300); // 300 USD
//! let mut rates = ExchangeRates::default();
//! rates.insert(Currency::Uzs, 12500.0);
//!
//! assert_eq!(format_display(price, Currency::Uzs, &rates), "3,750,000 UZS");
//! ```

use std::collections::HashMap;
use std::fmt;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};

use serde::{Deserialize, Serialize};
use ts_rs::TS;

// =============================================================================
// Constants
// =============================================================================

/// Shown wherever a money figure is requested before a catalog is loaded or
/// a persona is selected. The UI shows the same placeholder for both
/// cases.
pub const MONEY_PLACEHOLDER: &str = "$0";

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in the smallest unit of the base currency (cents).
///
/// ## Design Decisions
/// - **i64 (signed)**: arithmetic closed under subtraction; business rules
///   (not the type) guarantee a session balance never goes negative
/// - **Single field tuple struct**: zero-cost abstraction over i64
/// - **Derives**: full serde support for JSON serialization
///
/// Every balance, item price and spend total in the system flows through
/// this type. Other currencies exist only as display projections, see
/// [`format_display`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents (the smallest currency unit).
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Creates a Money value from whole major units.
    ///
    /// The catalog document carries prices and fortunes in whole base-currency
    /// units, so this is the constructor used at the document boundary.
    ///
    /// ## Example
    /// ```rust
    /// use magnate_core::money::Money;
    ///
    /// let price = Money::from_major(300);
    /// assert_eq!(price.cents(), 30_000);
    /// ```
    #[inline]
    pub const fn from_major(major: i64) -> Self {
        Money(major * 100)
    }

    /// Returns the value in cents (smallest currency unit).
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the major unit portion.
    #[inline]
    pub const fn major(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit portion (always 0-99).
    #[inline]
    pub const fn minor_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Multiplies money by a quantity.
    ///
    /// ## Example
    /// ```rust
    /// use magnate_core::money::Money;
    ///
    /// let unit_price = Money::from_major(300);
    /// let cost = unit_price.multiply_quantity(2);
    /// assert_eq!(cost.major(), 600);
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0 * qty)
    }
}

/// Display implementation shows money in a human-readable format.
///
/// ## Note
/// This is for debugging and log output. UI-facing strings come from
/// [`format_display`], which handles currency projection and grouping.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}${}.{:02}", sign, self.major().abs(), self.minor_part())
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        Money(self.0 * qty)
    }
}

// =============================================================================
// Currency
// =============================================================================

/// The closed set of display currencies.
///
/// USD is the base currency: all state is stored in it, the other codes are
/// display-only projections through [`ExchangeRates`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    Usd,
    Uzs,
    Rub,
}

impl Currency {
    /// The base currency all state is canonically stored in.
    pub const BASE: Currency = Currency::Usd;

    /// Returns the ISO-style currency code.
    #[inline]
    pub const fn code(&self) -> &'static str {
        match self {
            Currency::Usd => "USD",
            Currency::Uzs => "UZS",
            Currency::Rub => "RUB",
        }
    }

    /// Parses a currency code, case-insensitively.
    ///
    /// Returns `None` for codes outside the supported set; callers decide
    /// whether that is a validation failure or an ignorable document entry.
    pub fn from_code(code: &str) -> Option<Currency> {
        match code.to_ascii_uppercase().as_str() {
            "USD" => Some(Currency::Usd),
            "UZS" => Some(Currency::Uzs),
            "RUB" => Some(Currency::Rub),
            _ => None,
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl Default for Currency {
    fn default() -> Self {
        Currency::BASE
    }
}

// =============================================================================
// Exchange Rates
// =============================================================================

/// Multipliers from the base currency into each display currency.
///
/// ## Defined Fallback
/// A currency with no configured rate gets a multiplier of `1.0` (treated as
/// already being in the base currency). This is documented behavior, not an
/// error.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExchangeRates(HashMap<Currency, f64>);

impl ExchangeRates {
    /// Creates an empty rate table (every lookup falls back to `1.0`).
    pub fn new() -> Self {
        ExchangeRates(HashMap::new())
    }

    /// Sets the multiplier for a currency.
    pub fn insert(&mut self, currency: Currency, rate: f64) {
        self.0.insert(currency, rate);
    }

    /// Returns the multiplier for a currency, defaulting to `1.0`.
    #[inline]
    pub fn multiplier(&self, currency: Currency) -> f64 {
        self.0.get(&currency).copied().unwrap_or(1.0)
    }

    /// Checks whether a rate is configured for the currency.
    pub fn has_rate(&self, currency: Currency) -> bool {
        self.0.contains_key(&currency)
    }
}

// =============================================================================
// Display Formatter
// =============================================================================

/// Formats a base-currency amount for display in the selected currency.
///
/// Pure function: `amount × multiplier`, rounded to two decimals, thousands
/// grouped, suffixed with the currency code. The fractional part is trimmed
/// when zero, matching the browser's default number formatting.
///
/// ## Example
/// ```rust
/// use magnate_core::money::{format_display, Currency, ExchangeRates, Money};
///
/// let mut rates = ExchangeRates::default();
/// rates.insert(Currency::Usd, 1.0);
/// rates.insert(Currency::Uzs, 12500.0);
///
/// assert_eq!(format_display(Money::from_major(100), Currency::Usd, &rates), "100 USD");
/// assert_eq!(format_display(Money::from_major(100), Currency::Uzs, &rates), "1,250,000 UZS");
/// ```
pub fn format_display(amount: Money, currency: Currency, rates: &ExchangeRates) -> String {
    let converted = (amount.cents() as f64 / 100.0) * rates.multiplier(currency);

    // Round to cents in the display currency, then split into parts.
    // i128 keeps billionaire-scale UZS conversions well inside range.
    let scaled = (converted * 100.0).round() as i128;
    let whole = scaled / 100;
    let frac = (scaled % 100).abs();

    let grouped = group_thousands(whole);
    if frac == 0 {
        format!("{} {}", grouped, currency.code())
    } else if frac % 10 == 0 {
        format!("{}.{} {}", grouped, frac / 10, currency.code())
    } else {
        format!("{}.{:02} {}", grouped, frac, currency.code())
    }
}

/// Groups an integer with comma separators: `1250000` → `"1,250,000"`.
fn group_thousands(value: i128) -> String {
    let digits = value.abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);

    if value < 0 {
        grouped.push('-');
    }

    let lead = digits.len() % 3;
    for (i, ch) in digits.chars().enumerate() {
        if i != 0 && (i + 3 - lead) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn rates() -> ExchangeRates {
        let mut rates = ExchangeRates::new();
        rates.insert(Currency::Usd, 1.0);
        rates.insert(Currency::Uzs, 12500.0);
        rates.insert(Currency::Rub, 92.5);
        rates
    }

    #[test]
    fn test_constructors() {
        let money = Money::from_major(300);
        assert_eq!(money.cents(), 30_000);
        assert_eq!(money.major(), 300);
        assert_eq!(money.minor_part(), 0);

        let odd = Money::from_cents(1099);
        assert_eq!(odd.major(), 10);
        assert_eq!(odd.minor_part(), 99);
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_cents(1000);
        let b = Money::from_cents(500);

        assert_eq!((a + b).cents(), 1500);
        assert_eq!((a - b).cents(), 500);
        assert_eq!((a * 3).cents(), 3000);
        assert_eq!(a.multiply_quantity(2).cents(), 2000);

        let mut acc = Money::zero();
        acc += a;
        acc -= b;
        assert_eq!(acc.cents(), 500);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Money::from_cents(1099)), "$10.99");
        assert_eq!(format!("{}", Money::from_cents(-550)), "-$5.50");
        assert_eq!(format!("{}", Money::zero()), "$0.00");
    }

    #[test]
    fn test_currency_codes() {
        assert_eq!(Currency::Usd.code(), "USD");
        assert_eq!(Currency::from_code("uzs"), Some(Currency::Uzs));
        assert_eq!(Currency::from_code("EUR"), None);
        assert_eq!(Currency::default(), Currency::BASE);
    }

    #[test]
    fn test_format_base_currency() {
        assert_eq!(
            format_display(Money::from_major(100), Currency::Usd, &rates()),
            "100 USD"
        );
    }

    #[test]
    fn test_format_converts_and_groups() {
        assert_eq!(
            format_display(Money::from_major(100), Currency::Uzs, &rates()),
            "1,250,000 UZS"
        );
        assert_eq!(
            format_display(Money::from_major(244_000_000_000), Currency::Usd, &rates()),
            "244,000,000,000 USD"
        );
    }

    #[test]
    fn test_format_keeps_nonzero_fraction() {
        // 1.50 USD × 92.5 = 138.75 RUB, exactly representable
        assert_eq!(
            format_display(Money::from_cents(150), Currency::Rub, &rates()),
            "138.75 RUB"
        );
        // trailing zero in the fraction is trimmed
        assert_eq!(
            format_display(Money::from_cents(1050), Currency::Usd, &rates()),
            "10.5 USD"
        );
    }

    #[test]
    fn test_missing_rate_falls_back_to_unity() {
        let empty = ExchangeRates::new();
        assert_eq!(empty.multiplier(Currency::Uzs), 1.0);
        assert_eq!(
            format_display(Money::from_major(100), Currency::Uzs, &empty),
            "100 UZS"
        );
    }

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1000), "1,000");
        assert_eq!(group_thousands(1_250_000), "1,250,000");
        assert_eq!(group_thousands(-42_000), "-42,000");
    }
}
