//! Discounts

use std::{fmt, num::NonZeroU32};

use rust_decimal::{Decimal, RoundingStrategy, prelude::ToPrimitive};
use thiserror::Error;

use crate::{
    cart::Cart,
    money::Amount,
    shop::{ItemKey, Shop},
};

/// Errors raised while constructing a discount.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DiscountError {
    /// Percentages must lie within 0..=100.
    #[error("percentage {0} is outside 0..=100")]
    PercentOutOfRange(u32),

    /// Bundle pay/get counts must be positive.
    #[error("bundle counts must be positive, got pay {pay} and get {get}")]
    EmptyBundle {
        /// Number of items paid for
        pay: u32,
        /// Number of items received free
        get: u32,
    },
}

/// A whole percentage between 0 and 100.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Percent(u8);

impl Percent {
    /// Returns the percentage points.
    pub fn value(self) -> u8 {
        self.0
    }

    /// Applies this percentage to an amount, rounding towards zero.
    pub fn of(self, amount: Amount) -> Amount {
        let applied = Decimal::from(amount.to_minor_units()) * Decimal::from(self.0)
            / Decimal::ONE_HUNDRED;

        applied
            .round_dp_with_strategy(0, RoundingStrategy::ToZero)
            .to_u64()
            .map_or(Amount::ZERO, Amount::from_minor)
    }
}

impl TryFrom<u32> for Percent {
    type Error = DiscountError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        u8::try_from(value)
            .ok()
            .filter(|points| *points <= 100)
            .map(Percent)
            .ok_or(DiscountError::PercentOutOfRange(value))
    }
}

impl fmt::Display for Percent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

/// A rule reducing the payable total of a cart.
///
/// Discounts compare structurally: two discounts with the same fields are the same discount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Discount {
    /// Take a flat amount off the cart.
    Fixed(Amount),

    /// Take a percentage off the items subtotal.
    Percentage(Percent),

    /// Pay for `pay` units of `item` and get `get` more free, per complete group.
    Bundle {
        /// Item the bundle applies to
        item: ItemKey,

        /// Units paid for in each group
        pay: NonZeroU32,

        /// Units received free in each group
        get: NonZeroU32,
    },
}

impl Discount {
    /// Fixed amount off.
    pub fn fixed(amount: Amount) -> Self {
        Discount::Fixed(amount)
    }

    /// Percentage off the items subtotal.
    ///
    /// # Errors
    ///
    /// Returns [`DiscountError::PercentOutOfRange`] when `value` exceeds 100.
    pub fn percentage(value: u32) -> Result<Self, DiscountError> {
        Ok(Discount::Percentage(Percent::try_from(value)?))
    }

    /// Pay `pay` of `item`, get `get` free.
    ///
    /// # Errors
    ///
    /// Returns [`DiscountError::EmptyBundle`] when either count is zero.
    pub fn bundle(item: ItemKey, pay: u32, get: u32) -> Result<Self, DiscountError> {
        match (NonZeroU32::new(pay), NonZeroU32::new(get)) {
            (Some(pay), Some(get)) => Ok(Discount::Bundle { item, pay, get }),
            _ => Err(DiscountError::EmptyBundle { pay, get }),
        }
    }

    /// The amount this discount takes off the given cart.
    ///
    /// Each discount is evaluated against the cart as it stands; discounts never
    /// see each other's reductions.
    pub fn amount_for(&self, cart: &Cart) -> Amount {
        match *self {
            Discount::Fixed(amount) => amount.min(cart.items_subtotal()),
            Discount::Percentage(percent) => percent.of(cart.items_subtotal()),
            Discount::Bundle { item, pay, get } => {
                let Some(price) = cart.shop().price_of(item) else {
                    return Amount::ZERO;
                };

                let group_size = pay.saturating_add(get.get());
                let full_groups = cart.quantity(item) / group_size;

                price.scale(full_groups.saturating_mul(get.get()))
            }
        }
    }

    /// Human readable description, e.g. `"10% off"`.
    pub fn label(&self, shop: &Shop) -> String {
        match *self {
            Discount::Fixed(amount) => format!("{} off", amount.to_money(shop.currency())),
            Discount::Percentage(percent) => format!("{percent} off"),
            Discount::Bundle { item, pay, get } => {
                let name = shop.item(item).map_or("<unknown>", |item| item.name.as_str());

                format!("Pay {pay} {name}, get {get} free")
            }
        }
    }
}
