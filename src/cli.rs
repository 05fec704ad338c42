//! Command line front end

use std::io;

use thiserror::Error;
use tracing::{debug, info};

use crate::{
    config::{Command, Config},
    fixtures::{Fixture, FixtureError},
    receipt::{ReceiptError, write_discounts, write_items, write_screen},
    session::{Action, Destination, Store},
};

/// Errors raised by the command line front end.
#[derive(Debug, Error)]
pub enum CliError {
    /// The shop fixture could not be loaded, or an action referenced an unknown key.
    #[error(transparent)]
    Fixture(#[from] FixtureError),

    /// Output could not be written.
    #[error(transparent)]
    Receipt(#[from] ReceiptError),

    /// An action could not be parsed.
    #[error(
        "unknown action {0:?}; expected add:<item>, inc:<item>, dec:<item>, discount:<key>, \
         remove-discount:<key>, goto:<shop|discounts|cart>, back or pay"
    )]
    UnknownAction(String),
}

/// Parse a scripted action such as `add:apple` against a fixture's keys.
///
/// # Errors
///
/// Returns an error if the action is malformed or names an unknown item or discount.
pub fn parse_action(script: &str, fixture: &Fixture) -> Result<Action, CliError> {
    let (verb, key) = match script.split_once(':') {
        Some((verb, key)) => (verb, Some(key)),
        None => (script, None),
    };

    let item = |key: &str| {
        fixture
            .item_key(key)
            .ok_or_else(|| FixtureError::ItemNotFound(key.to_string()))
    };

    let discount = |key: &str| {
        fixture
            .discount(key)
            .ok_or_else(|| FixtureError::DiscountNotFound(key.to_string()))
    };

    let action = match (verb, key) {
        ("add", Some(key)) => Action::AddItem(item(key)?),
        ("inc", Some(key)) => Action::IncreaseItem(item(key)?),
        ("dec", Some(key)) => Action::DecreaseItem(item(key)?),
        ("discount", Some(key)) => Action::AddDiscount(discount(key)?),
        ("remove-discount", Some(key)) => Action::RemoveDiscount(discount(key)?),
        ("goto", Some("shop")) => Action::Navigate(Destination::Shop),
        ("goto", Some("discounts")) => Action::Navigate(Destination::Discounts),
        ("goto", Some("cart")) => Action::Navigate(Destination::Cart),
        ("back", None) => Action::Back,
        ("pay", None) => Action::Pay,
        _ => return Err(CliError::UnknownAction(script.to_string())),
    };

    Ok(action)
}

/// Run a command, writing its screen to `out`.
///
/// # Errors
///
/// Returns an error if the fixture cannot be loaded, an action cannot be parsed, or
/// the output cannot be written.
pub fn run(config: &Config, mut out: impl io::Write) -> Result<(), CliError> {
    let fixture = Fixture::from_path(&config.fixture)?;

    info!(fixture = %config.fixture.display(), "loaded shop");

    match &config.command {
        Command::Items => write_items(&mut out, fixture.shop())?,
        Command::Discounts => write_discounts(&mut out, &fixture.session())?,
        Command::Cart(args) => {
            let actions = args
                .actions
                .iter()
                .map(|script| parse_action(script, &fixture))
                .collect::<Result<Vec<_>, _>>()?;

            debug!(actions = actions.len(), "running cart actions");

            let mut store = Store::new(fixture.session());

            for action in actions {
                store.dispatch(action);
            }

            if store.session().destination() != Destination::Cart {
                store.dispatch(Action::OpenCart);
            }

            write_screen(&mut out, store.session())?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;
    use crate::discounts::Discount;

    const SHOP_YAML: &str = r#"
name: Corner Shop
currency: EUR
items:
  - key: apple
    name: Apple
    image: apple.png
    price: "3.00 EUR"
discounts:
  - key: ten-percent
    type: percentage
    value: 10
"#;

    #[test]
    fn parse_action_resolves_keys() -> TestResult {
        let fixture = Fixture::from_yaml(SHOP_YAML)?;
        let apple = fixture.item_key("apple").ok_or("missing apple")?;

        assert_eq!(parse_action("add:apple", &fixture)?, Action::AddItem(apple));
        assert_eq!(parse_action("dec:apple", &fixture)?, Action::DecreaseItem(apple));
        assert_eq!(
            parse_action("discount:ten-percent", &fixture)?,
            Action::AddDiscount(Discount::percentage(10)?)
        );
        assert_eq!(parse_action("pay", &fixture)?, Action::Pay);
        assert_eq!(
            parse_action("goto:discounts", &fixture)?,
            Action::Navigate(Destination::Discounts)
        );

        Ok(())
    }

    #[test]
    fn parse_action_rejects_unknown_keys() -> TestResult {
        let fixture = Fixture::from_yaml(SHOP_YAML)?;

        assert!(matches!(
            parse_action("add:durian", &fixture),
            Err(CliError::Fixture(FixtureError::ItemNotFound(key))) if key == "durian"
        ));
        assert!(matches!(
            parse_action("discount:half-off", &fixture),
            Err(CliError::Fixture(FixtureError::DiscountNotFound(key))) if key == "half-off"
        ));

        Ok(())
    }

    #[test]
    fn parse_action_rejects_malformed_actions() -> TestResult {
        let fixture = Fixture::from_yaml(SHOP_YAML)?;

        for script in ["add", "pay:now", "goto:nowhere", "steal:apple"] {
            assert!(
                matches!(parse_action(script, &fixture), Err(CliError::UnknownAction(_))),
                "{script} should be rejected"
            );
        }

        Ok(())
    }
}
