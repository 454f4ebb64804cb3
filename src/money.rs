use serde::{Serialize, Serializer};

use std::{
    fmt::{Debug, Display},
    num::ParseFloatError,
    ops::AddAssign,
    str::FromStr,
};

/// Represents a monetary amount, rounded to whole cents.
///
/// The amount is stored internally as an integer number of cents, so every
/// value has at most 2 decimal places. The [`Display`] implementation formats
/// it to exactly 2 decimal places, and honours any width and alignment given
/// in the format string. It serializes as a plain number.
#[derive(Clone, Copy, Default, Eq, Hash, PartialEq, Ord, PartialOrd)]
pub struct Money(i64);

impl Money {
    pub const ZERO: Self = Self(0);

    /// Rounds `amount` to the nearest cent.
    ///
    /// Halves are rounded away from zero, applied to the binary value of
    /// `amount * 100`. This differs from JavaScript's `toFixed(2)`, which
    /// rounds the binary value of `amount` itself: 10.005 is stored as
    /// 10.00499..., so `toFixed` gives 10.00, but `10.005 * 100` comes out
    /// at 1000.5000000000001 and rounds to 10.01.
    ///
    /// # Examples
    ///
    /// ```
    /// # use seller_report::Money;
    /// assert_eq!(Money::round(10.125).to_string(), "10.13");
    /// assert_eq!(Money::round(-0.125).to_string(), "-0.13");
    /// assert_eq!(Money::round(10.005).to_string(), "10.01");
    /// ```
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn round(amount: f64) -> Self {
        Self((amount * 100.0).round() as i64)
    }

    #[must_use]
    pub fn cents(self) -> i64 {
        self.0
    }

    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn as_f64(self) -> f64 {
        self.0 as f64 / 100.0
    }
}

impl Debug for Money {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        Display::fmt(self, f)
    }
}

impl Display for Money {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let cents = self.0.unsigned_abs();
        f.pad(&format!("{sign}{}.{:02}", cents / 100, cents % 100))
    }
}

impl FromStr for Money {
    type Err = ParseFloatError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(Self::round(s.replace(',', "").parse()?))
    }
}

impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.as_f64())
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_fn_rounds_halves_away_from_zero() {
        assert_eq!(Money::round(10.125).cents(), 1013);
        assert_eq!(Money::round(0.375).cents(), 38);
        assert_eq!(Money::round(-0.125).cents(), -13);
        assert_eq!(Money::round(44.0).cents(), 4400);
    }

    #[test]
    fn round_fn_rounds_scaled_value_not_stored_decimal() {
        // The stored binary values sit just below the half cent, but
        // scaling by 100 lands on or above the half, which rounds up.
        assert_eq!(Money::round(10.005).cents(), 1001);
        assert_eq!(Money::round(0.015).cents(), 2);
        assert_eq!(Money::round(0.045).cents(), 5);
    }

    #[test]
    fn display_pads_to_requested_width() {
        let amount = Money::from_str("3,409.15").unwrap();
        assert_eq!(amount.to_string(), "3409.15");
        assert_eq!(format!("{amount:>10}"), "   3409.15");
        assert_eq!(format!("{:>6}", Money::round(-0.05)), " -0.05");
        assert_eq!(Money::ZERO.to_string(), "0.00");
    }

    #[test]
    fn serializes_as_json_number() {
        let json = serde_json::to_string(&Money::round(6.6)).unwrap();
        assert_eq!(json, "6.6");
    }

    #[test]
    fn add_assign_sums_cents() {
        let mut total = Money::round(0.1);
        total += Money::round(0.2);
        assert_eq!(total, Money::from_str("0.30").unwrap());
    }
}
