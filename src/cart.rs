//! Cart
//!
//! A [`Cart`] is an immutable value. Every operation returns a new cart and leaves
//! the receiver untouched, so a caller can hold the current cart and replace it
//! with the result of each action.

use std::{collections::BTreeMap, sync::Arc};

use smallvec::SmallVec;

use crate::{
    discounts::Discount,
    money::Amount,
    shop::{ItemKey, Shop},
};

/// Largest quantity of a single item a cart will hold.
pub const MAX_QUANTITY: u32 = 99;

/// Chosen item quantities and applied discounts for a shop.
#[derive(Debug, Clone)]
pub struct Cart {
    shop: Arc<Shop>,
    items: BTreeMap<ItemKey, u32>,
    discounts: SmallVec<[Discount; 4]>,
}

impl Cart {
    /// Create an empty cart for the given shop.
    pub fn new(shop: Arc<Shop>) -> Self {
        Cart {
            shop,
            items: BTreeMap::new(),
            discounts: SmallVec::new(),
        }
    }

    /// The shop this cart belongs to.
    pub fn shop(&self) -> &Arc<Shop> {
        &self.shop
    }

    /// Quantity of an item, zero if absent.
    pub fn quantity(&self, item: ItemKey) -> u32 {
        self.items.get(&item).copied().unwrap_or_default()
    }

    /// Item quantities, ordered by item key. Never yields a zero quantity.
    pub fn items(&self) -> impl Iterator<Item = (ItemKey, u32)> {
        self.items.iter().map(|(item, quantity)| (*item, *quantity))
    }

    /// Applied discounts in the order they were added.
    pub fn discounts(&self) -> &[Discount] {
        &self.discounts
    }

    /// Check if a discount has been applied.
    pub fn has_discount(&self, discount: &Discount) -> bool {
        self.discounts.contains(discount)
    }

    /// Check if the cart holds no items. Discounts alone do not count.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Add one unit of an item, up to [`MAX_QUANTITY`].
    #[must_use]
    pub fn add_item(&self, item: ItemKey) -> Cart {
        let next = self.quantity(item).saturating_add(1).min(MAX_QUANTITY);

        self.with_quantity(item, next)
    }

    /// Same as [`Cart::add_item`].
    #[must_use]
    pub fn increase_item(&self, item: ItemKey) -> Cart {
        self.add_item(item)
    }

    /// Remove one unit of an item, dropping the entry when it reaches zero.
    #[must_use]
    pub fn decrease_item(&self, item: ItemKey) -> Cart {
        let next = self.quantity(item).saturating_sub(1);

        self.with_quantity(item, next)
    }

    /// Apply a discount. Applying one that is already present changes nothing.
    #[must_use]
    pub fn add_discount(&self, discount: Discount) -> Cart {
        if self.has_discount(&discount) {
            return self.clone();
        }

        let mut discounts = self.discounts.clone();
        discounts.push(discount);

        Cart {
            shop: Arc::clone(&self.shop),
            items: self.items.clone(),
            discounts,
        }
    }

    /// Remove an applied discount. Removing one that is absent changes nothing.
    #[must_use]
    pub fn remove_discount(&self, discount: &Discount) -> Cart {
        let Some(position) = self.discounts.iter().position(|applied| applied == discount) else {
            return self.clone();
        };

        let mut discounts = self.discounts.clone();
        discounts.remove(position);

        Cart {
            shop: Arc::clone(&self.shop),
            items: self.items.clone(),
            discounts,
        }
    }

    /// Sum of price × quantity over all items the shop prices.
    pub fn items_subtotal(&self) -> Amount {
        self.items
            .iter()
            .filter_map(|(item, quantity)| {
                self.shop
                    .price_of(*item)
                    .map(|price| price.scale(*quantity))
            })
            .sum()
    }

    /// Sum of all applied discounts, never more than the items subtotal.
    pub fn discount_total(&self) -> Amount {
        let subtotal = self.items_subtotal();

        self.discounts
            .iter()
            .map(|discount| discount.amount_for(self))
            .sum::<Amount>()
            .min(subtotal)
    }

    /// Amount payable after discounts.
    pub fn final_price(&self) -> Amount {
        self.items_subtotal() - self.discount_total()
    }

    /// Total number of units across all items.
    pub fn item_count(&self) -> u32 {
        self.items
            .values()
            .fold(0, |count, quantity| count.saturating_add(*quantity))
    }

    /// Complete the purchase, returning an empty cart for the same shop.
    #[must_use]
    pub fn checkout(&self) -> Cart {
        Cart::new(Arc::clone(&self.shop))
    }

    fn with_quantity(&self, item: ItemKey, quantity: u32) -> Cart {
        let mut items = self.items.clone();

        if quantity == 0 {
            items.remove(&item);
        } else {
            items.insert(item, quantity);
        }

        Cart {
            shop: Arc::clone(&self.shop),
            items,
            discounts: self.discounts.clone(),
        }
    }
}

/// Carts are equal when they share the same shop and hold the same items and discounts.
impl PartialEq for Cart {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.shop, &other.shop)
            && self.items == other.items
            && self.discounts == other.discounts
    }
}

impl Eq for Cart {}
