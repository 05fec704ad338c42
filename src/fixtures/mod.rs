//! Fixtures
//!
//! Shops are described in YAML:
//!
//! ```yaml
//! name: Corner Shop
//! currency: EUR
//! items:
//!   - key: apple
//!     name: Apple
//!     image: apple.png
//!     price: "3.00 EUR"
//! discounts:
//!   - key: ten-percent
//!     type: percentage
//!     value: 10
//! ```

use std::{fs, path::Path, sync::Arc};

use rustc_hash::FxHashMap;
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, info};

use crate::{
    discounts::{Discount, DiscountError},
    fixtures::{
        discounts::DiscountEntry,
        items::{ItemFixture, parse_currency, parse_price},
    },
    money::Amount,
    session::Session,
    shop::{ItemKey, Shop},
};

pub mod discounts;
pub mod items;

/// Fixture Parsing Errors
#[derive(Debug, Error)]
pub enum FixtureError {
    /// IO error reading fixture files
    #[error("Failed to read fixture file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// Invalid price format
    #[error("Invalid price format: {0}")]
    InvalidPrice(String),

    /// Unknown currency code
    #[error("Unknown currency code: {0}")]
    UnknownCurrency(String),

    /// Currency mismatch between the shop and a price
    #[error("Currency mismatch: expected {0}, found {1}")]
    CurrencyMismatch(String, String),

    /// Two items or two discounts share a key
    #[error("Duplicate fixture key: {0}")]
    DuplicateKey(String),

    /// Item not found
    #[error("Item not found: {0}")]
    ItemNotFound(String),

    /// Discount not found
    #[error("Discount not found: {0}")]
    DiscountNotFound(String),

    /// Invalid discount parameters
    #[error(transparent)]
    Discount(#[from] DiscountError),
}

/// Shop fixture from YAML
#[derive(Debug, Deserialize)]
pub struct ShopFixture {
    /// Shop name
    pub name: String,

    /// ISO currency code every price is expressed in
    pub currency: String,

    /// Items in catalog order
    pub items: Vec<ItemFixture>,

    /// Discounts on offer, in display order
    #[serde(default)]
    pub discounts: Vec<DiscountEntry>,
}

/// A loaded shop along with the fixture keys of its items and discounts.
#[derive(Debug)]
pub struct Fixture {
    shop: Arc<Shop>,

    /// Fixture key -> item key
    item_keys: FxHashMap<String, ItemKey>,

    /// Discounts in fixture order, with their fixture keys
    discounts: Vec<(String, Discount)>,
}

impl Fixture {
    /// Load a shop from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or its contents are invalid.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, FixtureError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)?;

        debug!(path = %path.display(), "read shop fixture");

        Self::from_yaml(&contents)
    }

    /// Load a shop from YAML text.
    ///
    /// # Errors
    ///
    /// Returns an error if the YAML cannot be parsed, a price or currency is invalid,
    /// keys are duplicated, or a discount references an unknown item.
    pub fn from_yaml(yaml: &str) -> Result<Self, FixtureError> {
        let fixture: ShopFixture = serde_norway::from_str(yaml)?;

        Self::try_from(fixture)
    }

    /// The loaded shop.
    pub fn shop(&self) -> &Arc<Shop> {
        &self.shop
    }

    /// Looks up an item by fixture key.
    pub fn item_key(&self, key: &str) -> Option<ItemKey> {
        self.item_keys.get(key).copied()
    }

    /// Looks up a discount by fixture key.
    pub fn discount(&self, key: &str) -> Option<Discount> {
        self.discounts
            .iter()
            .find_map(|(discount_key, discount)| (discount_key == key).then_some(*discount))
    }

    /// Discounts on offer, in fixture order.
    pub fn discounts(&self) -> impl Iterator<Item = Discount> {
        self.discounts.iter().map(|(_, discount)| *discount)
    }

    /// Start a new session for this shop.
    pub fn session(&self) -> Session {
        Session::new(Arc::clone(&self.shop), self.discounts().collect::<Vec<_>>())
    }
}

impl TryFrom<ShopFixture> for Fixture {
    type Error = FixtureError;

    fn try_from(fixture: ShopFixture) -> Result<Self, Self::Error> {
        let currency = parse_currency(&fixture.currency)?;
        let mut shop = Shop::new(fixture.name, currency);
        let mut item_keys = FxHashMap::default();

        for item in &fixture.items {
            if item_keys.contains_key(&item.key) {
                return Err(FixtureError::DuplicateKey(item.key.clone()));
            }

            let price = item
                .price
                .as_deref()
                .map(|price| -> Result<Amount, FixtureError> {
                    let (amount, found) = parse_price(price)?;

                    if found == currency {
                        Ok(amount)
                    } else {
                        Err(FixtureError::CurrencyMismatch(
                            currency.iso_alpha_code.to_string(),
                            found.iso_alpha_code.to_string(),
                        ))
                    }
                })
                .transpose()?;

            let key = shop.add_item(item.into(), price);
            item_keys.insert(item.key.clone(), key);
        }

        let mut discounts: Vec<(String, Discount)> = Vec::with_capacity(fixture.discounts.len());

        for entry in fixture.discounts {
            if discounts.iter().any(|(key, _)| *key == entry.key) {
                return Err(FixtureError::DuplicateKey(entry.key));
            }

            let discount = entry.discount.try_into_discount(currency, &item_keys)?;
            discounts.push((entry.key, discount));
        }

        info!(
            shop = shop.name(),
            currency = currency.iso_alpha_code,
            items = shop.len(),
            discounts = discounts.len(),
            "loaded shop fixture"
        );

        Ok(Fixture {
            shop: Arc::new(shop),
            item_keys,
            discounts,
        })
    }
}
