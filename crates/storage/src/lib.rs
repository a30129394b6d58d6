pub mod cart;
pub mod file;
pub mod memory;

use thiserror::Error;

pub use cart::SlotCartRepository;
pub use file::FileKeyValueStore;
pub use memory::InMemoryKeyValueStore;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage i/o error for `{key}`: {source}")]
    Io { key: String, source: std::io::Error },
    #[error("encode error: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("invalid storage key `{0}`")]
    InvalidKey(String),
}

/// String key-value store with the semantics of browser local storage:
/// one string value per key, whole-value overwrite, missing keys read as `None`.
pub trait KeyValueStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove_item(&self, key: &str) -> Result<(), StorageError>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for &S {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get_item(key)
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set_item(key, value)
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        (**self).remove_item(key)
    }
}
