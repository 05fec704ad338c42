//! Discount Fixtures

use rustc_hash::FxHashMap;
use rusty_money::iso::Currency;
use serde::Deserialize;

use crate::{
    discounts::Discount,
    fixtures::{FixtureError, items::parse_price},
    shop::ItemKey,
};

/// Discount entry from YAML
#[derive(Debug, Deserialize)]
pub struct DiscountEntry {
    /// Fixture key used by scripted actions
    pub key: String,

    /// Discount configuration
    #[serde(flatten)]
    pub discount: DiscountFixture,
}

/// Discount fixture from YAML
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DiscountFixture {
    /// Flat amount off
    Fixed {
        /// Amount (e.g., "5.00 EUR")
        amount: String,
    },

    /// Percentage off the items subtotal
    Percentage {
        /// Whole percentage points, 0 to 100
        value: u32,
    },

    /// Pay for some units of an item, get more free
    Bundle {
        /// Item fixture key
        item: String,

        /// Units paid for in each group
        pay: u32,

        /// Units received free in each group
        get: u32,
    },
}

impl DiscountFixture {
    /// Convert to a [`Discount`], resolving item references and checking the currency.
    ///
    /// # Errors
    ///
    /// Returns an error if the amount cannot be parsed or is in another currency, if a
    /// referenced item does not exist, or if the discount parameters are out of range.
    pub fn try_into_discount(
        self,
        currency: &'static Currency,
        item_keys: &FxHashMap<String, ItemKey>,
    ) -> Result<Discount, FixtureError> {
        match self {
            DiscountFixture::Fixed { amount } => {
                let (amount, found) = parse_price(&amount)?;

                if found != currency {
                    return Err(FixtureError::CurrencyMismatch(
                        currency.iso_alpha_code.to_string(),
                        found.iso_alpha_code.to_string(),
                    ));
                }

                Ok(Discount::fixed(amount))
            }
            DiscountFixture::Percentage { value } => Ok(Discount::percentage(value)?),
            DiscountFixture::Bundle { item, pay, get } => {
                let key = item_keys
                    .get(&item)
                    .copied()
                    .ok_or(FixtureError::ItemNotFound(item))?;

                Ok(Discount::bundle(key, pay, get)?)
            }
        }
    }
}
