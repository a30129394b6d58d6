use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppConfig {
    pub storage: StorageConfig,
    pub cart: CartConfig,
    pub rfq: RfqConfig,
    pub logging: LoggingConfig,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StorageConfig {
    pub data_dir: PathBuf,
    pub cart_key: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CartConfig {
    pub placeholder_image: String,
    pub currency_symbol: String,
    pub notification_dismiss_ms: u64,
    pub cart_page: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RfqConfig {
    pub messaging_base_url: String,
    pub business_handle: String,
    pub clear_cart_after_submit: bool,
    pub redirect_url: String,
    pub redirect_delay_ms: u64,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    Compact,
    Pretty,
    Json,
}

#[derive(Clone, Debug, Default)]
pub struct ConfigOverrides {
    pub data_dir: Option<PathBuf>,
    pub cart_key: Option<String>,
    pub log_level: Option<String>,
    pub business_handle: Option<String>,
    pub clear_cart_after_submit: Option<bool>,
}

#[derive(Clone, Debug, Default)]
pub struct LoadOptions {
    pub config_path: Option<PathBuf>,
    pub require_file: bool,
    pub overrides: ConfigOverrides,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config file `{path}`: {source}")]
    ReadFile { path: PathBuf, source: std::io::Error },
    #[error("could not parse config file `{path}`: {source}")]
    ParseFile { path: PathBuf, source: toml::de::Error },
    #[error("required config file was not found: `{0}`")]
    MissingConfigFile(PathBuf),
    #[error("environment variable interpolation failed for `{var}`")]
    MissingEnvInterpolation { var: String },
    #[error("unterminated environment interpolation expression")]
    UnterminatedInterpolation,
    #[error("invalid environment override for `{key}`: `{value}`")]
    InvalidEnvOverride { key: String, value: String },
    #[error("configuration validation failed: {0}")]
    Validation(String),
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            storage: StorageConfig {
                data_dir: PathBuf::from(".storefront"),
                cart_key: "pvcCart".to_string(),
            },
            cart: CartConfig {
                placeholder_image: "assets/img/products/network-products-update.png".to_string(),
                currency_symbol: "₹".to_string(),
                notification_dismiss_ms: 3000,
                cart_page: "cart.html".to_string(),
            },
            rfq: RfqConfig {
                messaging_base_url: "https://wa.me".to_string(),
                business_handle: "919144555566".to_string(),
                clear_cart_after_submit: false,
                redirect_url: "products.html".to_string(),
                redirect_delay_ms: 1000,
            },
            logging: LoggingConfig { level: "info".to_string(), format: LogFormat::Compact },
        }
    }
}

impl std::str::FromStr for LogFormat {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "compact" => Ok(Self::Compact),
            "pretty" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            other => Err(ConfigError::Validation(format!(
                "unsupported log format `{other}` (expected compact|pretty|json)"
            ))),
        }
    }
}

impl AppConfig {
    pub fn load(options: LoadOptions) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        let maybe_path = resolve_config_path(options.config_path.as_deref());

        if let Some(path) = maybe_path {
            let patch = read_patch(&path)?;
            config.apply_patch(patch);
        } else if options.require_file {
            let expected =
                options.config_path.unwrap_or_else(|| PathBuf::from("storefront.toml"));
            return Err(ConfigError::MissingConfigFile(expected));
        }

        config.apply_env_overrides()?;
        config.apply_overrides(options.overrides);
        config.validate()?;

        Ok(config)
    }

    fn apply_patch(&mut self, patch: ConfigPatch) {
        if let Some(storage) = patch.storage {
            if let Some(data_dir) = storage.data_dir {
                self.storage.data_dir = data_dir;
            }
            if let Some(cart_key) = storage.cart_key {
                self.storage.cart_key = cart_key;
            }
        }

        if let Some(cart) = patch.cart {
            if let Some(placeholder_image) = cart.placeholder_image {
                self.cart.placeholder_image = placeholder_image;
            }
            if let Some(currency_symbol) = cart.currency_symbol {
                self.cart.currency_symbol = currency_symbol;
            }
            if let Some(notification_dismiss_ms) = cart.notification_dismiss_ms {
                self.cart.notification_dismiss_ms = notification_dismiss_ms;
            }
            if let Some(cart_page) = cart.cart_page {
                self.cart.cart_page = cart_page;
            }
        }

        if let Some(rfq) = patch.rfq {
            if let Some(messaging_base_url) = rfq.messaging_base_url {
                self.rfq.messaging_base_url = messaging_base_url;
            }
            if let Some(business_handle) = rfq.business_handle {
                self.rfq.business_handle = business_handle;
            }
            if let Some(clear_cart_after_submit) = rfq.clear_cart_after_submit {
                self.rfq.clear_cart_after_submit = clear_cart_after_submit;
            }
            if let Some(redirect_url) = rfq.redirect_url {
                self.rfq.redirect_url = redirect_url;
            }
            if let Some(redirect_delay_ms) = rfq.redirect_delay_ms {
                self.rfq.redirect_delay_ms = redirect_delay_ms;
            }
        }

        if let Some(logging) = patch.logging {
            if let Some(level) = logging.level {
                self.logging.level = level;
            }
            if let Some(format) = logging.format {
                self.logging.format = format;
            }
        }
    }

    fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        if let Some(value) = read_env("STOREFRONT_STORAGE_DATA_DIR") {
            self.storage.data_dir = PathBuf::from(value);
        }
        if let Some(value) = read_env("STOREFRONT_STORAGE_CART_KEY") {
            self.storage.cart_key = value;
        }

        if let Some(value) = read_env("STOREFRONT_CART_PLACEHOLDER_IMAGE") {
            self.cart.placeholder_image = value;
        }
        if let Some(value) = read_env("STOREFRONT_CART_CURRENCY_SYMBOL") {
            self.cart.currency_symbol = value;
        }
        if let Some(value) = read_env("STOREFRONT_CART_NOTIFICATION_DISMISS_MS") {
            self.cart.notification_dismiss_ms =
                parse_u64("STOREFRONT_CART_NOTIFICATION_DISMISS_MS", &value)?;
        }
        if let Some(value) = read_env("STOREFRONT_CART_PAGE") {
            self.cart.cart_page = value;
        }

        if let Some(value) = read_env("STOREFRONT_RFQ_MESSAGING_BASE_URL") {
            self.rfq.messaging_base_url = value;
        }
        if let Some(value) = read_env("STOREFRONT_RFQ_BUSINESS_HANDLE") {
            self.rfq.business_handle = value;
        }
        if let Some(value) = read_env("STOREFRONT_RFQ_CLEAR_CART_AFTER_SUBMIT") {
            self.rfq.clear_cart_after_submit =
                parse_bool("STOREFRONT_RFQ_CLEAR_CART_AFTER_SUBMIT", &value)?;
        }
        if let Some(value) = read_env("STOREFRONT_RFQ_REDIRECT_URL") {
            self.rfq.redirect_url = value;
        }
        if let Some(value) = read_env("STOREFRONT_RFQ_REDIRECT_DELAY_MS") {
            self.rfq.redirect_delay_ms = parse_u64("STOREFRONT_RFQ_REDIRECT_DELAY_MS", &value)?;
        }

        let log_level =
            read_env("STOREFRONT_LOGGING_LEVEL").or_else(|| read_env("STOREFRONT_LOG_LEVEL"));
        if let Some(value) = log_level {
            self.logging.level = value;
        }
        let log_format =
            read_env("STOREFRONT_LOGGING_FORMAT").or_else(|| read_env("STOREFRONT_LOG_FORMAT"));
        if let Some(value) = log_format {
            self.logging.format = value.parse()?;
        }

        Ok(())
    }

    fn apply_overrides(&mut self, overrides: ConfigOverrides) {
        if let Some(data_dir) = overrides.data_dir {
            self.storage.data_dir = data_dir;
        }
        if let Some(cart_key) = overrides.cart_key {
            self.storage.cart_key = cart_key;
        }
        if let Some(log_level) = overrides.log_level {
            self.logging.level = log_level;
        }
        if let Some(business_handle) = overrides.business_handle {
            self.rfq.business_handle = business_handle;
        }
        if let Some(clear_cart_after_submit) = overrides.clear_cart_after_submit {
            self.rfq.clear_cart_after_submit = clear_cart_after_submit;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_storage(&self.storage)?;
        validate_cart(&self.cart)?;
        validate_rfq(&self.rfq)?;
        validate_logging(&self.logging)?;
        Ok(())
    }
}

fn resolve_config_path(explicit_path: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit_path {
        return path.exists().then_some(path.to_path_buf());
    }

    [PathBuf::from("storefront.toml"), PathBuf::from("config/storefront.toml")]
        .into_iter()
        .find(|path| path.exists())
}

fn read_patch(path: &Path) -> Result<ConfigPatch, ConfigError> {
    let raw = fs::read_to_string(path)
        .map_err(|source| ConfigError::ReadFile { path: path.to_path_buf(), source })?;

    let interpolated = interpolate_env_vars(&raw)?;
    toml::from_str::<ConfigPatch>(&interpolated)
        .map_err(|source| ConfigError::ParseFile { path: path.to_path_buf(), source })
}

fn interpolate_env_vars(input: &str) -> Result<String, ConfigError> {
    let mut output = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch == '$' && matches!(chars.peek(), Some('{')) {
            chars.next();
            let mut key = String::new();

            loop {
                match chars.next() {
                    Some('}') => break,
                    Some(next) => key.push(next),
                    None => return Err(ConfigError::UnterminatedInterpolation),
                }
            }

            let value = env::var(&key)
                .map_err(|_| ConfigError::MissingEnvInterpolation { var: key.clone() })?;
            output.push_str(&value);
            continue;
        }

        output.push(ch);
    }

    Ok(output)
}

fn validate_storage(storage: &StorageConfig) -> Result<(), ConfigError> {
    if storage.data_dir.as_os_str().is_empty() {
        return Err(ConfigError::Validation("storage.data_dir must not be empty".to_string()));
    }

    let key = storage.cart_key.as_str();
    let valid_key = !key.is_empty()
        && key.chars().all(|ch| ch.is_ascii_alphanumeric() || ch == '_' || ch == '-');
    if !valid_key {
        return Err(ConfigError::Validation(
            "storage.cart_key must be non-empty and use only [A-Za-z0-9_-]".to_string(),
        ));
    }

    Ok(())
}

fn validate_cart(cart: &CartConfig) -> Result<(), ConfigError> {
    if cart.placeholder_image.trim().is_empty() {
        return Err(ConfigError::Validation(
            "cart.placeholder_image must not be empty".to_string(),
        ));
    }

    if cart.cart_page.trim().is_empty() {
        return Err(ConfigError::Validation("cart.cart_page must not be empty".to_string()));
    }

    if cart.notification_dismiss_ms == 0 {
        return Err(ConfigError::Validation(
            "cart.notification_dismiss_ms must be greater than zero".to_string(),
        ));
    }

    Ok(())
}

fn validate_rfq(rfq: &RfqConfig) -> Result<(), ConfigError> {
    let base_url = rfq.messaging_base_url.trim();
    if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
        return Err(ConfigError::Validation(
            "rfq.messaging_base_url must start with http:// or https://".to_string(),
        ));
    }

    let handle = rfq.business_handle.trim();
    if handle.is_empty() || !handle.chars().all(|ch| ch.is_ascii_digit()) {
        return Err(ConfigError::Validation(
            "rfq.business_handle must be the business number in international format, digits only (e.g. 919144555566)".to_string(),
        ));
    }

    if rfq.clear_cart_after_submit && rfq.redirect_url.trim().is_empty() {
        return Err(ConfigError::Validation(
            "rfq.redirect_url is required when rfq.clear_cart_after_submit is enabled"
                .to_string(),
        ));
    }

    Ok(())
}

fn validate_logging(logging: &LoggingConfig) -> Result<(), ConfigError> {
    let level = logging.level.trim().to_ascii_lowercase();
    match level.as_str() {
        "trace" | "debug" | "info" | "warn" | "error" => Ok(()),
        _ => Err(ConfigError::Validation(
            "logging.level must be one of trace|debug|info|warn|error".to_string(),
        )),
    }
}

fn read_env(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}

fn parse_u64(key: &str, value: &str) -> Result<u64, ConfigError> {
    value.parse::<u64>().map_err(|_| ConfigError::InvalidEnvOverride {
        key: key.to_string(),
        value: value.to_string(),
    })
}

fn parse_bool(key: &str, value: &str) -> Result<bool, ConfigError> {
    value.parse::<bool>().map_err(|_| ConfigError::InvalidEnvOverride {
        key: key.to_string(),
        value: value.to_string(),
    })
}

#[derive(Debug, Default, Deserialize)]
struct ConfigPatch {
    storage: Option<StoragePatch>,
    cart: Option<CartPatch>,
    rfq: Option<RfqPatch>,
    logging: Option<LoggingPatch>,
}

#[derive(Debug, Default, Deserialize)]
struct StoragePatch {
    data_dir: Option<PathBuf>,
    cart_key: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct CartPatch {
    placeholder_image: Option<String>,
    currency_symbol: Option<String>,
    notification_dismiss_ms: Option<u64>,
    cart_page: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct RfqPatch {
    messaging_base_url: Option<String>,
    business_handle: Option<String>,
    clear_cart_after_submit: Option<bool>,
    redirect_url: Option<String>,
    redirect_delay_ms: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
struct LoggingPatch {
    level: Option<String>,
    format: Option<LogFormat>,
}
