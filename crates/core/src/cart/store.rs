use tracing::{debug, info};

use crate::cart::{apply, CartCommand, CartOutcome, SlotWrite};
use crate::config::CartConfig;
use crate::domain::cart::{AddToCart, Cart, CartTotals, ModelCode};
use crate::errors::ApplicationError;

/// Durable slot holding the whole cart. Implementations treat an absent or
/// undecodable value as an empty cart; only I/O failures are errors.
pub trait CartRepository {
    fn load(&self) -> Result<Cart, ApplicationError>;
    fn save(&self, cart: &Cart) -> Result<(), ApplicationError>;
    fn clear(&self) -> Result<(), ApplicationError>;
}

impl<R: CartRepository + ?Sized> CartRepository for &R {
    fn load(&self) -> Result<Cart, ApplicationError> {
        (**self).load()
    }

    fn save(&self, cart: &Cart) -> Result<(), ApplicationError> {
        (**self).save(cart)
    }

    fn clear(&self) -> Result<(), ApplicationError> {
        (**self).clear()
    }
}

/// Read-modify-write wrapper around [`apply`]: every command loads the slot,
/// transitions, and writes back before returning.
pub struct CartStore<R> {
    repository: R,
    config: CartConfig,
}

impl<R: CartRepository> CartStore<R> {
    pub fn new(repository: R, config: CartConfig) -> Self {
        Self { repository, config }
    }

    pub fn config(&self) -> &CartConfig {
        &self.config
    }

    pub fn get_cart(&self) -> Result<Cart, ApplicationError> {
        self.repository.load()
    }

    pub fn add_to_cart(&self, input: AddToCart) -> Result<CartOutcome, ApplicationError> {
        self.execute(CartCommand::Add(input))
    }

    pub fn remove_from_cart(&self, model: &ModelCode) -> Result<CartOutcome, ApplicationError> {
        self.execute(CartCommand::Remove(model.clone()))
    }

    pub fn update_cart_item_quantity(
        &self,
        model: &ModelCode,
        quantity: i64,
    ) -> Result<CartOutcome, ApplicationError> {
        self.execute(CartCommand::UpdateQuantity { model: model.clone(), quantity })
    }

    pub fn clear_cart(&self) -> Result<CartOutcome, ApplicationError> {
        self.execute(CartCommand::Clear)
    }

    pub fn calculate_cart_totals(&self) -> Result<CartTotals, ApplicationError> {
        Ok(self.repository.load()?.totals())
    }

    pub fn execute(&self, command: CartCommand) -> Result<CartOutcome, ApplicationError> {
        let command_name = command.name();
        let event_name = command.event_name();
        let model = command_model(&command);
        let current = self.repository.load()?;
        let outcome = apply(current, command, &self.config);

        match outcome.write {
            SlotWrite::Overwrite => self.repository.save(&outcome.cart)?,
            SlotWrite::Remove => self.repository.clear()?,
            SlotWrite::Skip => {
                debug!(
                    event_name = "cart.command.noop",
                    command = command_name,
                    model = model.as_deref().unwrap_or("none"),
                    "cart command matched no line; slot left untouched"
                );
                return Ok(outcome);
            }
        }

        info!(
            event_name,
            command = command_name,
            model = model.as_deref().unwrap_or("none"),
            line_count = outcome.cart.items().len(),
            item_count = outcome.cart.item_count(),
            "cart updated"
        );

        Ok(outcome)
    }
}

fn command_model(command: &CartCommand) -> Option<String> {
    match command {
        CartCommand::Add(input) => Some(input.model.0.clone()),
        CartCommand::Remove(model) | CartCommand::UpdateQuantity { model, .. } => {
            Some(model.0.clone())
        }
        CartCommand::Clear => None,
    }
}
