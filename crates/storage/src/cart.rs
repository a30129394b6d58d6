use storefront_core::cart::CartRepository;
use storefront_core::domain::cart::{Cart, CartItem};
use storefront_core::errors::ApplicationError;
use tracing::warn;

use super::{KeyValueStore, StorageError};

/// Cart persisted as one JSON array under a single key of a [`KeyValueStore`].
pub struct SlotCartRepository<S> {
    store: S,
    key: String,
}

impl<S: KeyValueStore> SlotCartRepository<S> {
    pub fn new(store: S, key: impl Into<String>) -> Self {
        Self { store, key: key.into() }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}

impl<S: KeyValueStore> CartRepository for SlotCartRepository<S> {
    fn load(&self) -> Result<Cart, ApplicationError> {
        let Some(raw) = self.store.get_item(&self.key).map_err(persistence)? else {
            return Ok(Cart::default());
        };

        match serde_json::from_str::<Vec<CartItem>>(&raw) {
            Ok(lines) => {
                let (cart, repaired) = Cart::from_stored(lines);
                if repaired {
                    warn!(
                        event_name = "cart.storage.repaired",
                        key = %self.key,
                        line_count = cart.items().len(),
                        "stored cart had empty or repeated lines; merged them"
                    );
                }
                Ok(cart)
            }
            Err(error) => {
                warn!(
                    event_name = "cart.storage.malformed",
                    key = %self.key,
                    error = %error,
                    "stored cart could not be decoded; treating it as empty"
                );
                Ok(Cart::default())
            }
        }
    }

    fn save(&self, cart: &Cart) -> Result<(), ApplicationError> {
        let encoded =
            serde_json::to_string(cart).map_err(|error| persistence(StorageError::from(error)))?;
        self.store.set_item(&self.key, &encoded).map_err(persistence)
    }

    fn clear(&self) -> Result<(), ApplicationError> {
        self.store.remove_item(&self.key).map_err(persistence)
    }
}

fn persistence(error: StorageError) -> ApplicationError {
    ApplicationError::Persistence(error.to_string())
}
