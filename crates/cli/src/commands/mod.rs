pub mod cart;
pub mod config;
pub mod rfq;

use serde::Serialize;
use serde_json::Value;
use storefront_core::config::{AppConfig, LoadOptions};
use storefront_core::errors::ApplicationError;
use storefront_core::CartStore;
use storefront_storage::{FileKeyValueStore, SlotCartRepository};

pub type FileCartStore = CartStore<SlotCartRepository<FileKeyValueStore>>;

pub const EXIT_CONFIG: u8 = 2;
pub const EXIT_STORAGE: u8 = 3;
pub const EXIT_RFQ_REJECTED: u8 = 4;

#[derive(Debug, Clone)]
pub struct CommandResult {
    pub exit_code: u8,
    pub output: String,
}

#[derive(Debug, Serialize)]
struct CommandOutcome {
    command: String,
    status: String,
    error_class: Option<String>,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<Value>,
}

impl CommandResult {
    pub fn success_with(command: &str, message: impl Into<String>, data: impl Serialize) -> Self {
        let data = serde_json::to_value(data).ok().filter(|value| !value.is_null());
        let payload = CommandOutcome {
            command: command.to_string(),
            status: "ok".to_string(),
            error_class: None,
            message: message.into(),
            data,
        };
        Self { exit_code: 0, output: serialize_payload(payload) }
    }

    pub fn failure(
        command: &str,
        error_class: &str,
        message: impl Into<String>,
        exit_code: u8,
    ) -> Self {
        let payload = CommandOutcome {
            command: command.to_string(),
            status: "error".to_string(),
            error_class: Some(error_class.to_string()),
            message: message.into(),
            data: None,
        };
        Self { exit_code, output: serialize_payload(payload) }
    }

    pub fn from_application_error(command: &str, error: &ApplicationError) -> Self {
        let exit_code = match error {
            ApplicationError::Domain(_) => EXIT_RFQ_REJECTED,
            ApplicationError::Persistence(_) => EXIT_STORAGE,
        };
        let message = match error {
            ApplicationError::Domain(domain) => domain.user_message().to_string(),
            other => other.to_string(),
        };
        Self::failure(command, error.error_class(), message, exit_code)
    }
}

pub fn load_config(command: &str, options: &LoadOptions) -> Result<AppConfig, CommandResult> {
    AppConfig::load(options.clone()).map_err(|error| {
        CommandResult::failure(
            command,
            "config_validation",
            format!("configuration issue: {error}"),
            EXIT_CONFIG,
        )
    })
}

pub fn open_store(config: &AppConfig) -> FileCartStore {
    let repository = SlotCartRepository::new(
        FileKeyValueStore::new(&config.storage.data_dir),
        config.storage.cart_key.clone(),
    );
    CartStore::new(repository, config.cart.clone())
}

fn serialize_payload(payload: CommandOutcome) -> String {
    serde_json::to_string(&payload).unwrap_or_else(|error| {
        let message = error.to_string().replace('\\', "\\\\").replace('"', "\\\"");
        format!(
            "{{\"command\":\"unknown\",\"status\":\"error\",\
             \"error_class\":\"serialization\",\"message\":\"{message}\"}}"
        )
    })
}
