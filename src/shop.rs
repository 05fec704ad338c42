//! Shop catalog

use rusty_money::iso::Currency;
use slotmap::{SecondaryMap, SlotMap, new_key_type};

use crate::money::Amount;

new_key_type! {
    /// Item Key
    pub struct ItemKey;
}

/// An item offered by a shop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    /// Display name
    pub name: String,

    /// Image reference
    pub image: String,
}

impl Item {
    /// Creates a new item.
    pub fn new(name: impl Into<String>, image: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            image: image.into(),
        }
    }
}

/// The set of purchasable items and their prices.
///
/// Items keep their insertion order. An item may be listed without a price, in
/// which case [`Shop::price_of`] returns `None` and carts skip it.
#[derive(Debug, Clone)]
pub struct Shop {
    name: String,
    currency: &'static Currency,
    items: SlotMap<ItemKey, Item>,
    prices: SecondaryMap<ItemKey, Amount>,
}

impl Shop {
    /// Creates an empty shop trading in the given currency.
    pub fn new(name: impl Into<String>, currency: &'static Currency) -> Self {
        Self {
            name: name.into(),
            currency,
            items: SlotMap::with_key(),
            prices: SecondaryMap::new(),
        }
    }

    /// Adds an item to the catalog, optionally with a price.
    pub fn add_item(&mut self, item: Item, price: Option<Amount>) -> ItemKey {
        let key = self.items.insert(item);

        if let Some(price) = price {
            self.prices.insert(key, price);
        }

        key
    }

    /// Shop name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Currency all prices are expressed in.
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }

    /// Looks up an item.
    pub fn item(&self, key: ItemKey) -> Option<&Item> {
        self.items.get(key)
    }

    /// Price of an item, or `None` if this shop does not sell it.
    pub fn price_of(&self, key: ItemKey) -> Option<Amount> {
        self.prices.get(key).copied()
    }

    /// All items, priced or not, in catalog order.
    pub fn items(&self) -> impl Iterator<Item = (ItemKey, &Item)> {
        self.items.iter()
    }

    /// Items that have a price, in catalog order.
    pub fn priced_items(&self) -> impl Iterator<Item = (ItemKey, &Item, Amount)> {
        self.items
            .iter()
            .filter_map(|(key, item)| self.price_of(key).map(|price| (key, item, price)))
    }

    /// Number of items in the catalog.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if the catalog has no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
