pub mod store;
pub mod view;

use serde::Serialize;

use crate::config::CartConfig;
use crate::domain::cart::{AddToCart, Cart, ModelCode, QuantityChange};
use crate::effects::SideEffect;

pub use store::{CartRepository, CartStore};
pub use view::{CartBadge, CartLine, CartListing};

pub const ADDED_NOTIFICATION_TITLE: &str = "Added to Cart!";

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CartCommand {
    Add(AddToCart),
    Remove(ModelCode),
    UpdateQuantity { model: ModelCode, quantity: i64 },
    Clear,
}

impl CartCommand {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Add(_) => "add",
            Self::Remove(_) => "remove",
            Self::UpdateQuantity { .. } => "update_quantity",
            Self::Clear => "clear",
        }
    }

    pub fn event_name(&self) -> &'static str {
        match self {
            Self::Add(_) => "cart.item.added",
            Self::Remove(_) => "cart.item.removed",
            Self::UpdateQuantity { .. } => "cart.item.quantity_updated",
            Self::Clear => "cart.cleared",
        }
    }
}

/// How the slot must be written after a transition.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SlotWrite {
    Overwrite,
    Remove,
    Skip,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CartOutcome {
    pub cart: Cart,
    pub write: SlotWrite,
    pub effects: Vec<SideEffect>,
}

/// Applies one command to `cart` and describes the write and page refreshes it needs.
pub fn apply(mut cart: Cart, command: CartCommand, config: &CartConfig) -> CartOutcome {
    match command {
        CartCommand::Add(input) => {
            let name = cart.add(input, &config.placeholder_image).name.clone();
            let item_count = cart.item_count();
            CartOutcome {
                cart,
                write: SlotWrite::Overwrite,
                effects: vec![
                    SideEffect::RefreshCartBadge { item_count },
                    SideEffect::Notify {
                        title: ADDED_NOTIFICATION_TITLE.to_string(),
                        body: name,
                        dismiss_after_ms: config.notification_dismiss_ms,
                    },
                ],
            }
        }
        CartCommand::Remove(model) => {
            // Removing an absent model still rewrites the slot and refreshes the page.
            cart.remove(&model);
            refreshed(cart, SlotWrite::Overwrite)
        }
        CartCommand::UpdateQuantity { model, quantity } => {
            match cart.set_quantity(&model, quantity) {
                QuantityChange::NotFound => {
                    CartOutcome { cart, write: SlotWrite::Skip, effects: Vec::new() }
                }
                QuantityChange::Removed | QuantityChange::Updated => {
                    refreshed(cart, SlotWrite::Overwrite)
                }
            }
        }
        CartCommand::Clear => refreshed(Cart::default(), SlotWrite::Remove),
    }
}

fn refreshed(cart: Cart, write: SlotWrite) -> CartOutcome {
    let item_count = cart.item_count();
    CartOutcome {
        cart,
        write,
        effects: vec![SideEffect::RefreshCartBadge { item_count }, SideEffect::RefreshCartListing],
    }
}
