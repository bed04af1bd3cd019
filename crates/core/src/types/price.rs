//! Type-safe price representation using decimal arithmetic.
//!
//! The storefront sells in Indonesian rupiah, which has no minor unit in
//! practice. Amounts are still kept as [`Decimal`] so arithmetic never goes
//! through floating point.

use std::iter::Sum;
use std::ops::Add;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A price with currency information.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Price {
    /// Amount in the currency's standard unit.
    pub amount: Decimal,
    /// ISO 4217 currency code.
    pub currency_code: CurrencyCode,
}

impl Price {
    /// Create a new price.
    #[must_use]
    pub const fn new(amount: Decimal, currency_code: CurrencyCode) -> Self {
        Self {
            amount,
            currency_code,
        }
    }

    /// Create a rupiah price from a whole amount.
    #[must_use]
    pub fn idr(amount: i64) -> Self {
        Self::new(Decimal::from(amount), CurrencyCode::IDR)
    }

    /// A zero rupiah price.
    #[must_use]
    pub const fn zero() -> Self {
        Self::new(Decimal::ZERO, CurrencyCode::IDR)
    }

    /// Whether the amount is zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.amount.is_zero()
    }

    /// Price of `quantity` units.
    #[must_use]
    pub fn times(self, quantity: u32) -> Self {
        Self::new(self.amount * Decimal::from(quantity), self.currency_code)
    }

    /// Subtract, clamping at zero.
    #[must_use]
    pub fn saturating_sub(self, other: Self) -> Self {
        let amount = (self.amount - other.amount).max(Decimal::ZERO);
        Self::new(amount, self.currency_code)
    }

    /// Format for display, e.g. `Rp 199.000`.
    ///
    /// Uses Indonesian grouping (`.` between thousands) and no fractional
    /// digits, matching how the shop prints prices everywhere.
    #[must_use]
    pub fn display(&self) -> String {
        let whole = self.amount.round().abs().to_string();
        let sign = if self.amount.is_sign_negative() && !self.amount.is_zero() {
            "-"
        } else {
            ""
        };
        format!(
            "{}{sign}{}",
            self.currency_code.symbol(),
            group_thousands(&whole)
        )
    }
}

impl Default for Price {
    fn default() -> Self {
        Self::zero()
    }
}

impl Add for Price {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self::new(self.amount + rhs.amount, self.currency_code)
    }
}

impl Sum for Price {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::zero(), Add::add)
    }
}

impl std::fmt::Display for Price {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.display())
    }
}

/// Insert `.` separators every three digits from the right.
fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push('.');
        }
        out.push(ch);
    }
    out
}

/// ISO 4217 currency codes.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
pub enum CurrencyCode {
    #[default]
    IDR,
    USD,
}

impl CurrencyCode {
    /// Display prefix for the currency.
    #[must_use]
    pub const fn symbol(&self) -> &'static str {
        match self {
            Self::IDR => "Rp ",
            Self::USD => "$",
        }
    }

    /// ISO code.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::IDR => "IDR",
            Self::USD => "USD",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_groups_thousands() {
        assert_eq!(Price::idr(199_000).display(), "Rp 199.000");
        assert_eq!(Price::idr(15_750_000).display(), "Rp 15.750.000");
        assert_eq!(Price::idr(500).display(), "Rp 500");
        assert_eq!(Price::zero().display(), "Rp 0");
    }

    #[test]
    fn test_times_and_sum() {
        let lines = [Price::idr(179_000).times(2), Price::idr(99_000)];
        let total: Price = lines.into_iter().sum();
        assert_eq!(total, Price::idr(457_000));
    }

    #[test]
    fn test_saturating_sub_clamps_at_zero() {
        let threshold = Price::idr(500_000);
        assert_eq!(
            threshold.saturating_sub(Price::idr(398_000)),
            Price::idr(102_000)
        );
        assert!(threshold.saturating_sub(Price::idr(600_000)).is_zero());
    }

    #[test]
    fn test_ordering_by_amount() {
        assert!(Price::idr(99_000) < Price::idr(129_000));
    }
}
