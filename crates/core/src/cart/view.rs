use serde::Serialize;

use crate::config::CartConfig;
use crate::currency::{format_amount, line_price_display};
use crate::domain::cart::Cart;

/// State of the floating "View Cart" button and the header count badge.
/// The button links to the configured cart page and is hidden on that page.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CartBadge {
    pub item_count: u64,
    pub floating_button_visible: bool,
    pub floating_button_href: String,
}

impl CartBadge {
    pub fn from_cart(cart: &Cart, current_page: &str, config: &CartConfig) -> Self {
        let item_count = cart.item_count();
        let on_cart_page = current_page.contains(config.cart_page.as_str());
        Self {
            item_count,
            floating_button_visible: item_count > 0 && !on_cart_page,
            floating_button_href: config.cart_page.clone(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CartLine {
    pub model: String,
    pub name: String,
    pub image: String,
    pub quantity: u32,
    pub price_display: String,
    /// Quantities the minus/plus controls submit back as updates.
    pub decrement_to: i64,
    pub increment_to: i64,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CartListing {
    pub is_empty: bool,
    pub lines: Vec<CartLine>,
    pub item_count: u64,
    pub subtotal_display: String,
    pub total_display: String,
}

impl CartListing {
    pub fn from_cart(cart: &Cart, config: &CartConfig) -> Self {
        let symbol = config.currency_symbol.as_str();
        let totals = cart.totals();
        let lines = cart
            .items()
            .iter()
            .map(|item| CartLine {
                model: item.model.0.clone(),
                name: item.name.clone(),
                image: item.image.clone(),
                quantity: item.quantity,
                price_display: line_price_display(item, symbol),
                decrement_to: i64::from(item.quantity) - 1,
                increment_to: i64::from(item.quantity) + 1,
            })
            .collect();

        Self {
            is_empty: cart.is_empty(),
            lines,
            item_count: totals.item_count,
            subtotal_display: format_amount(totals.subtotal, symbol),
            total_display: format_amount(totals.total, symbol),
        }
    }
}
