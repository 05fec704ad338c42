//! Item Fixtures

use rust_decimal::{Decimal, prelude::ToPrimitive};
use rusty_money::iso::{self, Currency};
use serde::Deserialize;

use crate::{fixtures::FixtureError, money::Amount, shop::Item};

/// Item fixture from YAML
#[derive(Debug, Deserialize)]
pub struct ItemFixture {
    /// Fixture key used by discounts and scripted actions
    pub key: String,

    /// Display name
    pub name: String,

    /// Image reference
    pub image: String,

    /// Price (e.g., "2.99 EUR"); unpriced items are listed but never sold
    #[serde(default)]
    pub price: Option<String>,
}

impl From<&ItemFixture> for Item {
    fn from(fixture: &ItemFixture) -> Self {
        Item::new(fixture.name.clone(), fixture.image.clone())
    }
}

/// Parse currency code (e.g., "EUR")
///
/// # Errors
///
/// Returns an error if the code is not a known ISO currency.
pub fn parse_currency(code: &str) -> Result<&'static Currency, FixtureError> {
    iso::find(code.trim()).ok_or_else(|| FixtureError::UnknownCurrency(code.to_string()))
}

/// Parse price string (e.g., "2.99 EUR") into an amount and currency
///
/// # Errors
///
/// Returns an error if the string is not in the format "AMOUNT CURRENCY",
/// if the amount is not a non-negative decimal with no more precision than the
/// currency allows, or if the currency code is not recognized.
pub fn parse_price(s: &str) -> Result<(Amount, &'static Currency), FixtureError> {
    let parts: Vec<&str> = s.split_whitespace().collect();

    let [amount, currency_code] = parts.as_slice() else {
        return Err(FixtureError::InvalidPrice(format!(
            "Expected format 'AMOUNT CURRENCY', got: {s}"
        )));
    };

    let currency = parse_currency(currency_code)?;

    let amount = amount
        .parse::<Decimal>()
        .map_err(|_err| FixtureError::InvalidPrice(s.to_string()))?;

    let scale = Decimal::from(10_u64.pow(currency.exponent));

    let minor = amount
        .checked_mul(scale)
        .filter(|minor| minor.fract().is_zero())
        .and_then(|minor| minor.to_u64())
        .ok_or_else(|| FixtureError::InvalidPrice(s.to_string()))?;

    Ok((Amount::from_minor(minor), currency))
}
