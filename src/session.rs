//! Shop session
//!
//! A [`Session`] is the whole state a shop front end renders: the catalog, the
//! discounts on offer, the current [`Cart`] and which screen is showing. User
//! actions are applied with [`Session::reduce`], which returns the next session.
//! [`Store`] owns the current session and applies actions one at a time.

use std::sync::Arc;

use tracing::{debug, trace};

use crate::{
    cart::Cart,
    discounts::Discount,
    shop::{ItemKey, Shop},
};

/// Badge text shown for carts holding more units than this.
const BADGE_LIMIT: u32 = 99;

/// Screen currently shown.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Destination {
    /// Catalog listing
    #[default]
    Shop,

    /// Discounts on offer
    Discounts,

    /// Cart contents and payment
    Cart,
}

/// A user action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Add one unit of an item from the catalog.
    AddItem(ItemKey),

    /// Increase the quantity of a cart line.
    IncreaseItem(ItemKey),

    /// Decrease the quantity of a cart line.
    DecreaseItem(ItemKey),

    /// Apply an offered discount.
    AddDiscount(Discount),

    /// Remove an applied discount.
    RemoveDiscount(Discount),

    /// Switch screen.
    Navigate(Destination),

    /// Open the cart screen.
    OpenCart,

    /// Leave the cart screen.
    Back,

    /// Pay for the cart.
    Pay,
}

/// Everything a shop front end renders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    available_discounts: Arc<[Discount]>,
    cart: Cart,
    destination: Destination,
}

impl Session {
    /// Start a session with an empty cart on the shop screen.
    pub fn new(shop: Arc<Shop>, available_discounts: impl Into<Arc<[Discount]>>) -> Self {
        Self {
            available_discounts: available_discounts.into(),
            cart: Cart::new(shop),
            destination: Destination::Shop,
        }
    }

    /// The catalog.
    pub fn shop(&self) -> &Arc<Shop> {
        self.cart.shop()
    }

    /// The current cart.
    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Discounts offered by the shop.
    pub fn available_discounts(&self) -> &[Discount] {
        &self.available_discounts
    }

    /// Screen currently shown.
    pub fn destination(&self) -> Destination {
        self.destination
    }

    /// The cart screen is only reachable with at least one item in the cart.
    pub fn can_open_cart(&self) -> bool {
        self.cart.item_count() > 0
    }

    /// Paying requires at least one item in the cart.
    pub fn pay_enabled(&self) -> bool {
        self.can_open_cart()
    }

    /// Check if a discount is offered and not yet applied.
    pub fn is_discount_available(&self, discount: &Discount) -> bool {
        self.available_discounts.contains(discount) && !self.cart.has_discount(discount)
    }

    /// Title for the current screen.
    pub fn title(&self) -> &str {
        match self.destination {
            Destination::Shop => self.shop().name(),
            Destination::Discounts => "Discounts",
            Destination::Cart => "Cart",
        }
    }

    /// Cart badge text, `None` for an empty cart.
    pub fn badge_text(&self) -> Option<String> {
        badge_text(self.cart.item_count())
    }

    /// Apply an action and return the resulting session.
    #[must_use]
    pub fn reduce(&self, action: Action) -> Session {
        let mut next = self.clone();

        match action {
            Action::AddItem(item) => next.cart = self.cart.add_item(item),
            Action::IncreaseItem(item) => next.cart = self.cart.increase_item(item),
            Action::DecreaseItem(item) => next.cart = self.cart.decrease_item(item),
            Action::AddDiscount(discount) => {
                if self.is_discount_available(&discount) {
                    next.cart = self.cart.add_discount(discount);
                }
            }
            Action::RemoveDiscount(discount) => next.cart = self.cart.remove_discount(&discount),
            Action::Navigate(Destination::Cart) | Action::OpenCart => {
                if self.can_open_cart() {
                    next.destination = Destination::Cart;
                }
            }
            Action::Navigate(destination) => next.destination = destination,
            Action::Back => {
                if self.destination == Destination::Cart {
                    next.destination = Destination::Shop;
                }
            }
            Action::Pay => {
                if self.pay_enabled() {
                    next.cart = self.cart.checkout();
                    next.destination = Destination::Shop;
                }
            }
        }

        // An emptied cart cannot stay on screen.
        if next.destination == Destination::Cart && !next.can_open_cart() {
            next.destination = Destination::Shop;
        }

        next
    }
}

/// Cart badge text for a unit count: nothing when empty, `"99+"` past the limit.
pub fn badge_text(count: u32) -> Option<String> {
    match count {
        0 => None,
        count if count > BADGE_LIMIT => Some(format!("{BADGE_LIMIT}+")),
        count => Some(count.to_string()),
    }
}

/// Owns the current session and applies actions one at a time.
#[derive(Debug)]
pub struct Store {
    session: Session,
}

impl Store {
    /// Create a store holding the given session.
    pub fn new(session: Session) -> Self {
        Self { session }
    }

    /// The current session.
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Apply an action, replacing the current session with the result.
    pub fn dispatch(&mut self, action: Action) -> &Session {
        let next = self.session.reduce(action);

        if next == self.session {
            trace!(?action, "action left session unchanged");
        } else {
            debug!(
                ?action,
                destination = ?next.destination(),
                item_count = next.cart().item_count(),
                final_price = next.cart().final_price().to_minor_units(),
                "dispatched action"
            );
        }

        self.session = next;

        &self.session
    }

    /// Take the current session out of the store.
    pub fn into_session(self) -> Session {
        self.session
    }
}
