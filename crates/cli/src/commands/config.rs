use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use storefront_core::config::LoadOptions;
use toml::Value;

use crate::commands::{load_config, CommandResult};

struct Field {
    key_path: &'static str,
    env_keys: &'static [&'static str],
    value: String,
    overridden: bool,
}

#[derive(Debug, Serialize)]
struct ConfigEntry {
    key: &'static str,
    value: String,
    source: String,
}

pub fn run(options: &LoadOptions) -> CommandResult {
    let config = match load_config("config", options) {
        Ok(config) => config,
        Err(failure) => return failure,
    };

    let config_file_path = detect_config_path(options.config_path.as_deref());
    let config_file_doc = load_config_file_doc(config_file_path.as_deref());
    let overrides = &options.overrides;

    let fields = [
        Field {
            key_path: "storage.data_dir",
            env_keys: &["STOREFRONT_STORAGE_DATA_DIR"],
            value: config.storage.data_dir.display().to_string(),
            overridden: overrides.data_dir.is_some(),
        },
        Field {
            key_path: "storage.cart_key",
            env_keys: &["STOREFRONT_STORAGE_CART_KEY"],
            value: config.storage.cart_key.clone(),
            overridden: overrides.cart_key.is_some(),
        },
        Field {
            key_path: "cart.placeholder_image",
            env_keys: &["STOREFRONT_CART_PLACEHOLDER_IMAGE"],
            value: config.cart.placeholder_image.clone(),
            overridden: false,
        },
        Field {
            key_path: "cart.currency_symbol",
            env_keys: &["STOREFRONT_CART_CURRENCY_SYMBOL"],
            value: config.cart.currency_symbol.clone(),
            overridden: false,
        },
        Field {
            key_path: "cart.notification_dismiss_ms",
            env_keys: &["STOREFRONT_CART_NOTIFICATION_DISMISS_MS"],
            value: config.cart.notification_dismiss_ms.to_string(),
            overridden: false,
        },
        Field {
            key_path: "cart.cart_page",
            env_keys: &["STOREFRONT_CART_PAGE"],
            value: config.cart.cart_page.clone(),
            overridden: false,
        },
        Field {
            key_path: "rfq.messaging_base_url",
            env_keys: &["STOREFRONT_RFQ_MESSAGING_BASE_URL"],
            value: config.rfq.messaging_base_url.clone(),
            overridden: false,
        },
        Field {
            key_path: "rfq.business_handle",
            env_keys: &["STOREFRONT_RFQ_BUSINESS_HANDLE"],
            value: config.rfq.business_handle.clone(),
            overridden: overrides.business_handle.is_some(),
        },
        Field {
            key_path: "rfq.clear_cart_after_submit",
            env_keys: &["STOREFRONT_RFQ_CLEAR_CART_AFTER_SUBMIT"],
            value: config.rfq.clear_cart_after_submit.to_string(),
            overridden: overrides.clear_cart_after_submit.is_some(),
        },
        Field {
            key_path: "rfq.redirect_url",
            env_keys: &["STOREFRONT_RFQ_REDIRECT_URL"],
            value: config.rfq.redirect_url.clone(),
            overridden: false,
        },
        Field {
            key_path: "rfq.redirect_delay_ms",
            env_keys: &["STOREFRONT_RFQ_REDIRECT_DELAY_MS"],
            value: config.rfq.redirect_delay_ms.to_string(),
            overridden: false,
        },
        Field {
            key_path: "logging.level",
            env_keys: &["STOREFRONT_LOGGING_LEVEL", "STOREFRONT_LOG_LEVEL"],
            value: config.logging.level.clone(),
            overridden: overrides.log_level.is_some(),
        },
        Field {
            key_path: "logging.format",
            env_keys: &["STOREFRONT_LOGGING_FORMAT", "STOREFRONT_LOG_FORMAT"],
            value: format!("{:?}", config.logging.format),
            overridden: false,
        },
    ];

    let entries: Vec<ConfigEntry> = fields
        .into_iter()
        .map(|field| {
            let source = if field.overridden {
                "flag".to_string()
            } else {
                field_source(
                    field.key_path,
                    field.env_keys,
                    config_file_doc.as_ref(),
                    config_file_path.as_deref(),
                )
            };
            ConfigEntry { key: field.key_path, value: field.value, source }
        })
        .collect();

    CommandResult::success_with(
        "config",
        "effective config (source precedence: flag > env > file > default)",
        entries,
    )
}

fn detect_config_path(explicit: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return path.exists().then(|| path.to_path_buf());
    }

    let root = PathBuf::from("storefront.toml");
    if root.exists() {
        return Some(root);
    }

    let nested = PathBuf::from("config/storefront.toml");
    if nested.exists() {
        return Some(nested);
    }

    None
}

fn load_config_file_doc(path: Option<&Path>) -> Option<Value> {
    let path = path?;
    let raw = fs::read_to_string(path).ok()?;
    raw.parse::<Value>().ok()
}

fn field_source(
    key_path: &str,
    env_keys: &[&str],
    config_file_doc: Option<&Value>,
    config_file_path: Option<&Path>,
) -> String {
    let from_env = env_keys.iter().find(|key| {
        env::var(key).map(|value| !value.trim().is_empty()).unwrap_or(false)
    });
    if let Some(env_key) = from_env {
        return format!("env ({env_key})");
    }

    if let Some(doc) = config_file_doc {
        if contains_path(doc, key_path) {
            let file_path = config_file_path
                .map(|path| path.display().to_string())
                .unwrap_or_else(|| "config file".to_string());
            return format!("file ({file_path})");
        }
    }

    "default".to_string()
}

fn contains_path(root: &Value, key_path: &str) -> bool {
    let mut current = root;
    for key in key_path.split('.') {
        let Some(next) = current.get(key) else {
            return false;
        };
        current = next;
    }
    true
}
