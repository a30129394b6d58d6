use serde::Serialize;
use storefront_core::config::LoadOptions;
use storefront_core::domain::cart::{AddToCart, ModelCode};
use storefront_core::{CartBadge, CartListing, CartOutcome, CartTotals, SideEffect};

use crate::commands::{load_config, open_store, CommandResult, FileCartStore};

#[derive(Serialize)]
struct MutationReport<'a> {
    cart: &'a storefront_core::Cart,
    effects: &'a [SideEffect],
}

#[derive(Serialize)]
struct ShowReport {
    listing: CartListing,
    badge: CartBadge,
}

#[derive(Serialize)]
struct TotalsReport {
    #[serde(flatten)]
    totals: CartTotals,
    subtotal_display: String,
    total_display: String,
}

pub fn add(options: &LoadOptions, input: AddToCart) -> CommandResult {
    let model = input.model.clone();
    mutate("cart.add", options, |store| store.add_to_cart(input), |_| {
        format!("added one unit of {model}")
    })
}

pub fn remove(options: &LoadOptions, model: &ModelCode) -> CommandResult {
    mutate("cart.remove", options, |store| store.remove_from_cart(model), |_| {
        format!("removed {model} if present")
    })
}

pub fn update(options: &LoadOptions, model: &ModelCode, quantity: i64) -> CommandResult {
    mutate(
        "cart.update",
        options,
        |store| store.update_cart_item_quantity(model, quantity),
        |outcome| match outcome.cart.find(model) {
            Some(item) => format!("set {model} to quantity {}", item.quantity),
            None if outcome.effects.is_empty() => format!("{model} is not in the cart"),
            None => format!("removed {model}"),
        },
    )
}

pub fn clear(options: &LoadOptions) -> CommandResult {
    mutate("cart.clear", options, |store| store.clear_cart(), |_| "cart cleared".to_string())
}

pub fn show(options: &LoadOptions, current_page: &str) -> CommandResult {
    let config = match load_config("cart.show", options) {
        Ok(config) => config,
        Err(failure) => return failure,
    };
    let store = open_store(&config);

    match store.get_cart() {
        Ok(cart) => {
            let report = ShowReport {
                listing: CartListing::from_cart(&cart, &config.cart),
                badge: CartBadge::from_cart(&cart, current_page, &config.cart),
            };
            let message = if cart.is_empty() {
                "cart is empty".to_string()
            } else {
                format!("{} line(s) in cart", cart.items().len())
            };
            CommandResult::success_with("cart.show", message, report)
        }
        Err(error) => CommandResult::from_application_error("cart.show", &error),
    }
}

pub fn totals(options: &LoadOptions) -> CommandResult {
    let config = match load_config("cart.totals", options) {
        Ok(config) => config,
        Err(failure) => return failure,
    };
    let store = open_store(&config);

    match store.calculate_cart_totals() {
        Ok(totals) => {
            let symbol = config.cart.currency_symbol.as_str();
            let report = TotalsReport {
                totals,
                subtotal_display: storefront_core::format_amount(totals.subtotal, symbol),
                total_display: storefront_core::format_amount(totals.total, symbol),
            };
            CommandResult::success_with(
                "cart.totals",
                format!("{} item(s)", totals.item_count),
                report,
            )
        }
        Err(error) => CommandResult::from_application_error("cart.totals", &error),
    }
}

fn mutate<F, M>(command: &str, options: &LoadOptions, operation: F, describe: M) -> CommandResult
where
    F: FnOnce(&FileCartStore) -> Result<CartOutcome, storefront_core::ApplicationError>,
    M: FnOnce(&CartOutcome) -> String,
{
    let config = match load_config(command, options) {
        Ok(config) => config,
        Err(failure) => return failure,
    };
    let store = open_store(&config);

    match operation(&store) {
        Ok(outcome) => {
            let message = describe(&outcome);
            let report = MutationReport { cart: &outcome.cart, effects: &outcome.effects };
            CommandResult::success_with(command, message, report)
        }
        Err(error) => CommandResult::from_application_error(command, &error),
    }
}
