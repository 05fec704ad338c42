//! Shopcart
//!
//! Shop catalog, discount and cart pricing. Carts are immutable values: every
//! operation returns a new [`cart::Cart`], and a [`session::Session`] reduces user
//! actions into the next state of a shop front end.

pub mod cart;
pub mod cli;
pub mod config;
pub mod discounts;
pub mod fixtures;
pub mod money;
pub mod observability;
pub mod receipt;
pub mod session;
pub mod shop;
