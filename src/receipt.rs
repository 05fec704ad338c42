//! Receipt
//!
//! Snapshots of a cart for display, and table rendering of the shop screens.

use std::io;

use rusty_money::iso::Currency;
use smallvec::SmallVec;
use tabled::{
    builder::Builder,
    settings::{Alignment, Style, object::Columns},
};
use thiserror::Error;

use crate::{
    cart::Cart,
    discounts::Discount,
    money::Amount,
    session::{Destination, Session},
    shop::{ItemKey, Shop},
};

/// Errors that can occur when writing a receipt.
#[derive(Debug, Error)]
pub enum ReceiptError {
    /// IO error
    #[error("failed to write receipt: {0}")]
    Io(#[from] io::Error),
}

/// A priced cart line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartLine {
    /// Item
    pub item: ItemKey,

    /// Item display name
    pub name: String,

    /// Units in the cart
    pub quantity: u32,

    /// Price of one unit
    pub unit_price: Amount,

    /// `unit_price × quantity`
    pub total: Amount,
}

/// An applied discount with its label and the amount it takes off.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscountLine {
    /// The discount
    pub discount: Discount,

    /// Display label
    pub label: String,

    /// Amount taken off, evaluated on its own against the cart
    pub amount: Amount,
}

/// Display snapshot of a cart.
#[derive(Debug, Clone)]
pub struct Receipt {
    currency: &'static Currency,
    lines: Vec<CartLine>,
    discounts: SmallVec<[DiscountLine; 4]>,
    subtotal: Amount,
    discount_total: Amount,
    total: Amount,
}

impl Receipt {
    /// Build a receipt for a cart. Lines the shop cannot price are left out.
    pub fn from_cart(cart: &Cart) -> Self {
        let shop = cart.shop();

        let lines = cart
            .items()
            .filter_map(|(item, quantity)| {
                let name = shop.item(item)?.name.clone();
                let unit_price = shop.price_of(item)?;

                Some(CartLine {
                    item,
                    name,
                    quantity,
                    unit_price,
                    total: unit_price.scale(quantity),
                })
            })
            .collect();

        let discounts = cart
            .discounts()
            .iter()
            .map(|discount| DiscountLine {
                discount: *discount,
                label: discount.label(shop),
                amount: discount.amount_for(cart),
            })
            .collect();

        Self {
            currency: shop.currency(),
            lines,
            discounts,
            subtotal: cart.items_subtotal(),
            discount_total: cart.discount_total(),
            total: cart.final_price(),
        }
    }

    /// Priced cart lines.
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Applied discounts.
    pub fn discounts(&self) -> &[DiscountLine] {
        &self.discounts
    }

    /// Total cost before discounts.
    pub fn subtotal(&self) -> Amount {
        self.subtotal
    }

    /// Total taken off by discounts.
    pub fn discount_total(&self) -> Amount {
        self.discount_total
    }

    /// Amount payable.
    pub fn total(&self) -> Amount {
        self.total
    }

    /// Writes the receipt as a table followed by a summary.
    ///
    /// # Errors
    ///
    /// Returns an error if the output cannot be written.
    pub fn write_to(&self, mut out: impl io::Write) -> Result<(), ReceiptError> {
        let mut builder = Builder::default();

        builder.push_record(["Item", "Qty", "Unit Price", "Total"]);

        for line in &self.lines {
            builder.push_record([
                line.name.clone(),
                line.quantity.to_string(),
                self.format(line.unit_price),
                self.format(line.total),
            ]);
        }

        write_table(&mut out, builder, 1)?;

        if !self.discounts.is_empty() {
            let mut builder = Builder::default();

            builder.push_record(["Discount", "Amount"]);

            for line in &self.discounts {
                builder.push_record([line.label.clone(), format!("-{}", self.format(line.amount))]);
            }

            write_table(&mut out, builder, 1)?;
        }

        let rows = [
            ("Subtotal:", self.format(self.subtotal)),
            ("Discounts:", format!("-{}", self.format(self.discount_total))),
            ("Total:", self.format(self.total)),
        ];

        let value_width = rows.iter().map(|(_, value)| value.len()).max().unwrap_or(0);

        for (label, value) in rows {
            writeln!(out, " {label:<10} {value:>value_width$}")?;
        }

        Ok(())
    }

    fn format(&self, amount: Amount) -> String {
        amount.to_money(self.currency).to_string()
    }
}

/// Writes the priced catalog.
///
/// # Errors
///
/// Returns an error if the output cannot be written.
pub fn write_items(mut out: impl io::Write, shop: &Shop) -> Result<(), ReceiptError> {
    let mut builder = Builder::default();

    builder.push_record(["Item", "Image", "Price"]);

    for (_, item, price) in shop.priced_items() {
        builder.push_record([
            item.name.clone(),
            item.image.clone(),
            price.to_money(shop.currency()).to_string(),
        ]);
    }

    write_table(&mut out, builder, 2)
}

/// Writes the discounts on offer and whether each can still be added.
///
/// # Errors
///
/// Returns an error if the output cannot be written.
pub fn write_discounts(mut out: impl io::Write, session: &Session) -> Result<(), ReceiptError> {
    let mut builder = Builder::default();

    builder.push_record(["Discount", "Status"]);

    for discount in session.available_discounts() {
        let status = if session.is_discount_available(discount) {
            "available"
        } else {
            "in cart"
        };

        builder.push_record([discount.label(session.shop()), status.to_string()]);
    }

    write_table(&mut out, builder, 1)
}

/// Writes the current screen of a session: a title bar, then the screen's contents.
///
/// # Errors
///
/// Returns an error if the output cannot be written.
pub fn write_screen(mut out: impl io::Write, session: &Session) -> Result<(), ReceiptError> {
    match session.badge_text() {
        Some(badge) => writeln!(out, "{} [cart: {badge}]", session.title())?,
        None => writeln!(out, "{}", session.title())?,
    }

    match session.destination() {
        Destination::Shop => write_items(&mut out, session.shop()),
        Destination::Discounts => write_discounts(&mut out, session),
        Destination::Cart => {
            Receipt::from_cart(session.cart()).write_to(&mut out)?;

            if session.pay_enabled() {
                writeln!(out, "\n[Pay]")?;
            }

            Ok(())
        }
    }
}

fn write_table(
    out: &mut impl io::Write,
    builder: Builder,
    first_right_aligned: usize,
) -> Result<(), ReceiptError> {
    let mut table = builder.build();

    table.with(Style::modern_rounded());
    table.modify(Columns::new(first_right_aligned..), Alignment::right());

    writeln!(out, "{table}")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use rusty_money::iso::EUR;
    use testresult::TestResult;

    use super::*;
    use crate::{session::Action, shop::Item};

    fn test_shop() -> (Arc<Shop>, ItemKey, ItemKey, ItemKey) {
        let mut shop = Shop::new("Corner Shop", EUR);
        let apple = shop.add_item(Item::new("Apple", "apple.png"), Some(Amount::from_minor(300)));
        let banana =
            shop.add_item(Item::new("Banana", "banana.png"), Some(Amount::from_minor(500)));
        let sample = shop.add_item(Item::new("Free Sample", "sample.png"), None);

        (Arc::new(shop), apple, banana, sample)
    }

    fn euros(minor: u64) -> String {
        Amount::from_minor(minor).to_money(EUR).to_string()
    }

    #[test]
    fn receipt_lines_skip_unpriced_items() {
        let (shop, apple, _, sample) = test_shop();
        let cart = Cart::new(shop).add_item(apple).add_item(apple).add_item(sample);

        let receipt = Receipt::from_cart(&cart);

        assert_eq!(
            receipt.lines(),
            &[CartLine {
                item: apple,
                name: "Apple".to_string(),
                quantity: 2,
                unit_price: Amount::from_minor(300),
                total: Amount::from_minor(600),
            }]
        );
        assert_eq!(receipt.subtotal(), Amount::from_minor(600));
    }

    #[test]
    fn receipt_totals_match_cart() -> TestResult {
        let (shop, apple, banana, _) = test_shop();
        let cart = Cart::new(shop)
            .add_item(apple)
            .add_item(banana)
            .add_discount(Discount::percentage(10)?)
            .add_discount(Discount::fixed(Amount::from_minor(100)));

        let receipt = Receipt::from_cart(&cart);

        assert_eq!(receipt.discounts().len(), 2);
        assert_eq!(
            receipt
                .discounts()
                .iter()
                .map(|line| line.amount)
                .collect::<Vec<_>>(),
            vec![Amount::from_minor(80), Amount::from_minor(100)]
        );
        assert_eq!(receipt.discount_total(), Amount::from_minor(180));
        assert_eq!(receipt.total(), Amount::from_minor(620));

        Ok(())
    }

    #[test]
    fn write_to_renders_lines_discounts_and_summary() -> TestResult {
        let (shop, apple, _, _) = test_shop();
        let cart = Cart::new(shop)
            .add_item(apple)
            .add_item(apple)
            .add_discount(Discount::percentage(10)?);

        let mut out = Vec::new();
        Receipt::from_cart(&cart).write_to(&mut out)?;
        let rendered = String::from_utf8(out)?;

        assert!(rendered.contains("Apple"));
        assert!(rendered.contains("10% off"));
        assert!(rendered.contains(&euros(600)));
        assert!(rendered.contains(&format!("-{}", euros(60))));
        assert!(rendered.contains(&euros(540)));

        Ok(())
    }

    #[test]
    fn write_to_omits_discount_table_without_discounts() -> TestResult {
        let (shop, apple, _, _) = test_shop();
        let cart = Cart::new(shop).add_item(apple);

        let mut out = Vec::new();
        Receipt::from_cart(&cart).write_to(&mut out)?;
        let rendered = String::from_utf8(out)?;

        assert!(!rendered.contains("Amount"));
        assert!(rendered.contains("Total:"));

        Ok(())
    }

    #[test]
    fn write_items_lists_priced_items_only() -> TestResult {
        let (shop, _, _, _) = test_shop();

        let mut out = Vec::new();
        write_items(&mut out, &shop)?;
        let rendered = String::from_utf8(out)?;

        assert!(rendered.contains("Apple"));
        assert!(rendered.contains("Banana"));
        assert!(!rendered.contains("Free Sample"));

        Ok(())
    }

    #[test]
    fn write_discounts_marks_applied_discounts() -> TestResult {
        let (shop, apple, _, _) = test_shop();
        let ten_percent = Discount::percentage(10)?;
        let bundle = Discount::bundle(apple, 2, 1)?;

        let session = Session::new(shop, vec![ten_percent, bundle])
            .reduce(Action::AddItem(apple))
            .reduce(Action::AddDiscount(ten_percent));

        let mut out = Vec::new();
        write_discounts(&mut out, &session)?;
        let rendered = String::from_utf8(out)?;

        assert!(rendered.contains("in cart"));
        assert!(rendered.contains("Pay 2 Apple, get 1 free"));
        assert!(rendered.contains("available"));

        Ok(())
    }

    #[test]
    fn write_screen_shows_title_badge_and_cart() -> TestResult {
        let (shop, apple, _, _) = test_shop();
        let session = Session::new(shop, Vec::<Discount>::new())
            .reduce(Action::AddItem(apple))
            .reduce(Action::OpenCart);

        let mut out = Vec::new();
        write_screen(&mut out, &session)?;
        let rendered = String::from_utf8(out)?;

        assert!(rendered.starts_with("Cart [cart: 1]"));
        assert!(rendered.contains("[Pay]"));

        Ok(())
    }

    #[test]
    fn write_screen_on_shop_lists_items() -> TestResult {
        let (shop, _, _, _) = test_shop();
        let session = Session::new(shop, Vec::<Discount>::new());

        let mut out = Vec::new();
        write_screen(&mut out, &session)?;
        let rendered = String::from_utf8(out)?;

        assert!(rendered.starts_with("Corner Shop\n"));
        assert!(rendered.contains("apple.png"));

        Ok(())
    }
}
