//! Property tests for cart invariants over random sequences of cart operations.

use std::sync::Arc;

use proptest::prelude::*;
use rusty_money::iso::EUR;

use shopcart::{
    cart::{Cart, MAX_QUANTITY},
    discounts::Discount,
    money::Amount,
    shop::{Item, ItemKey, Shop},
};

#[derive(Debug, Clone)]
enum Op {
    Add(usize),
    Increase(usize),
    Decrease(usize),
    Fixed(u64),
    Percentage(u32),
    Bundle(usize, u32, u32),
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0..3_usize).prop_map(Op::Add),
        (0..3_usize).prop_map(Op::Increase),
        (0..3_usize).prop_map(Op::Decrease),
        (0..5_000_u64).prop_map(Op::Fixed),
        (0..=100_u32).prop_map(Op::Percentage),
        (0..3_usize, 1..4_u32, 1..4_u32).prop_map(|(item, pay, get)| Op::Bundle(item, pay, get)),
    ]
}

fn catalog() -> (Arc<Shop>, [ItemKey; 3]) {
    let mut shop = Shop::new("Corner Shop", EUR);

    let keys = [
        shop.add_item(Item::new("Apple", "apple.png"), Some(Amount::from_minor(300))),
        shop.add_item(Item::new("Banana", "banana.png"), Some(Amount::from_minor(499))),
        shop.add_item(Item::new("Free Sample", "sample.png"), None),
    ];

    (Arc::new(shop), keys)
}

fn apply(cart: Cart, op: &Op, keys: &[ItemKey; 3]) -> Cart {
    let key = |index: usize| keys.get(index).copied();

    match *op {
        Op::Add(item) => key(item).map_or(cart.clone(), |item| cart.add_item(item)),
        Op::Increase(item) => key(item).map_or(cart.clone(), |item| cart.increase_item(item)),
        Op::Decrease(item) => key(item).map_or(cart.clone(), |item| cart.decrease_item(item)),
        Op::Fixed(minor) => cart.add_discount(Discount::fixed(Amount::from_minor(minor))),
        Op::Percentage(value) => match Discount::percentage(value) {
            Ok(discount) => cart.add_discount(discount),
            Err(_) => cart,
        },
        Op::Bundle(item, pay, get) => {
            match key(item).map(|item| Discount::bundle(item, pay, get)) {
                Some(Ok(discount)) => cart.add_discount(discount),
                _ => cart,
            }
        }
    }
}

fn build(ops: &[Op]) -> (Cart, [ItemKey; 3]) {
    let (shop, keys) = catalog();
    let cart = ops.iter().fold(Cart::new(shop), |cart, op| apply(cart, op, &keys));

    (cart, keys)
}

proptest! {
    #[test]
    fn item_count_is_the_sum_of_quantities(ops in prop::collection::vec(op(), 0..60)) {
        let (cart, _) = build(&ops);

        prop_assert!(cart.items().all(|(_, quantity)| quantity > 0));
        prop_assert!(cart.items().all(|(_, quantity)| quantity <= MAX_QUANTITY));
        prop_assert_eq!(cart.item_count(), cart.items().map(|(_, quantity)| quantity).sum::<u32>());
    }

    #[test]
    fn final_price_is_the_floored_difference(ops in prop::collection::vec(op(), 0..60)) {
        let (cart, _) = build(&ops);

        let subtotal = cart.items_subtotal().to_minor_units();
        let discounts = cart.discount_total().to_minor_units();

        prop_assert!(discounts <= subtotal);
        prop_assert_eq!(cart.final_price().to_minor_units(), subtotal.saturating_sub(discounts));
    }

    #[test]
    fn adding_a_discount_twice_is_idempotent(
        ops in prop::collection::vec(op(), 0..30),
        value in 0..=100_u32,
    ) {
        let (cart, _) = build(&ops);
        let discount = Discount::percentage(value);
        prop_assert!(discount.is_ok());

        if let Ok(discount) = discount {
            let once = cart.add_discount(discount);
            let twice = once.add_discount(discount);

            prop_assert_eq!(once.discounts(), twice.discounts());
        }
    }

    #[test]
    fn increase_then_decrease_of_an_absent_item_round_trips(ops in prop::collection::vec(op(), 0..30)) {
        let (cart, keys) = build(&ops);

        for key in keys {
            if cart.quantity(key) == 0 {
                prop_assert_eq!(cart.increase_item(key).decrease_item(key), cart.clone());
                prop_assert_eq!(cart.decrease_item(key), cart.clone());
            }
        }
    }

    #[test]
    fn quantity_never_exceeds_the_cap(presses in 0..150_u32) {
        let (shop, [apple, _, _]) = catalog();

        let cart = (0..presses).fold(Cart::new(shop), |cart, _| cart.increase_item(apple));

        prop_assert_eq!(cart.quantity(apple), presses.min(MAX_QUANTITY));
    }
}
