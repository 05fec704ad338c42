//! Money

use std::{
    iter::Sum,
    ops::{Add, Deref, Mul, Sub},
};

use rusty_money::{Money, iso::Currency};

/// A non-negative amount of money in minor units (pence/cents).
///
/// All arithmetic is total: addition and scaling saturate instead of
/// overflowing, and subtraction floors at zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Amount {
    minor: u64,
}

impl Amount {
    /// Zero minor units.
    pub const ZERO: Amount = Amount { minor: 0 };

    /// Creates a new amount from minor units.
    pub const fn from_minor(minor: u64) -> Self {
        Amount { minor }
    }

    /// Returns the amount in minor units.
    pub const fn to_minor_units(self) -> u64 {
        self.minor
    }

    /// Returns true if this amount is zero.
    pub const fn is_zero(self) -> bool {
        self.minor == 0
    }

    /// Multiplies a unit price by a quantity.
    #[must_use]
    pub fn scale(self, quantity: u32) -> Self {
        Amount {
            minor: self.minor.saturating_mul(u64::from(quantity)),
        }
    }

    /// Converts the amount to a [`Money`] value in the given currency, for display.
    pub fn to_money(self, currency: &'static Currency) -> Money<'static, Currency> {
        let minor = i64::try_from(self.minor).unwrap_or(i64::MAX);

        Money::from_minor(minor, currency)
    }
}

impl Deref for Amount {
    type Target = u64;

    fn deref(&self) -> &Self::Target {
        &self.minor
    }
}

impl From<u64> for Amount {
    fn from(minor: u64) -> Self {
        Amount::from_minor(minor)
    }
}

impl Add for Amount {
    type Output = Amount;

    fn add(self, rhs: Amount) -> Self::Output {
        Amount {
            minor: self.minor.saturating_add(rhs.minor),
        }
    }
}

impl Sub for Amount {
    type Output = Amount;

    /// Subtracts `rhs`, flooring at zero.
    fn sub(self, rhs: Amount) -> Self::Output {
        Amount {
            minor: self.minor.saturating_sub(rhs.minor),
        }
    }
}

impl Mul<u32> for Amount {
    type Output = Amount;

    fn mul(self, quantity: u32) -> Self::Output {
        self.scale(quantity)
    }
}

impl Sum for Amount {
    fn sum<I: Iterator<Item = Amount>>(iter: I) -> Self {
        iter.fold(Amount::ZERO, Add::add)
    }
}

#[cfg(test)]
mod tests {
    use rusty_money::iso;

    use super::*;

    #[test]
    fn from_minor() {
        let amount = Amount::from_minor(1000);

        assert_eq!(amount.minor, 1000);
    }

    #[test]
    fn amount_derefs_to_u64() {
        let amount = Amount { minor: 100 };

        assert_eq!(*amount, 100);
    }

    #[test]
    fn add_sums_minor_units() {
        assert_eq!(
            Amount::from_minor(300) + Amount::from_minor(500),
            Amount::from_minor(800)
        );
    }

    #[test]
    fn add_saturates() {
        assert_eq!(
            Amount::from_minor(u64::MAX) + Amount::from_minor(1),
            Amount::from_minor(u64::MAX)
        );
    }

    #[test]
    fn sub_floors_at_zero() {
        assert_eq!(
            Amount::from_minor(600) - Amount::from_minor(1000),
            Amount::ZERO
        );
        assert_eq!(
            Amount::from_minor(600) - Amount::from_minor(60),
            Amount::from_minor(540)
        );
    }

    #[test]
    fn scale_multiplies_by_quantity() {
        assert_eq!(Amount::from_minor(300).scale(3), Amount::from_minor(900));
        assert_eq!(Amount::from_minor(300) * 0, Amount::ZERO);
    }

    #[test]
    fn sum_of_amounts() {
        let total: Amount = [100, 200, 300].into_iter().map(Amount::from_minor).sum();

        assert_eq!(total, Amount::from_minor(600));
    }

    #[test]
    fn to_money_keeps_minor_units() {
        let money = Amount::from_minor(250).to_money(iso::EUR);

        assert_eq!(money, Money::from_minor(250, iso::EUR));
    }
}
