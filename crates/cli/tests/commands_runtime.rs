use std::env;
use std::path::Path;
use std::sync::{Mutex, OnceLock};

use serde_json::Value;
use storefront_cli::commands::{cart, config, rfq};
use storefront_core::config::{ConfigOverrides, LoadOptions};
use storefront_core::domain::cart::{AddToCart, ModelCode};
use storefront_core::domain::contact::RfqContactInfo;
use tempfile::TempDir;

#[test]
fn add_then_show_reports_listing_and_badge() {
    with_env(&[], || {
        let dir = TempDir::new().expect("temp dir");
        let options = options_for(dir.path());

        let added = cart::add(&options, product("DS-2CD", "Dome Camera", Some(15999)));
        assert_eq!(added.exit_code, 0, "expected add to succeed: {}", added.output);
        let payload = parse_payload(&added.output);
        assert_eq!(payload["command"], "cart.add");
        assert_eq!(payload["status"], "ok");
        assert_eq!(payload["data"]["effects"][0]["kind"], "refresh_cart_badge");
        assert_eq!(payload["data"]["effects"][1]["kind"], "notify");
        assert_eq!(payload["data"]["effects"][1]["dismiss_after_ms"], 3000);

        let shown = cart::show(&options, "/products.html");
        assert_eq!(shown.exit_code, 0);
        let payload = parse_payload(&shown.output);
        assert_eq!(payload["data"]["listing"]["is_empty"], false);
        assert_eq!(payload["data"]["listing"]["subtotal_display"], "₹15,999.00");
        assert_eq!(payload["data"]["badge"]["item_count"], 1);
        assert_eq!(payload["data"]["badge"]["floating_button_visible"], true);
        assert_eq!(payload["data"]["badge"]["floating_button_href"], "cart.html");
    });
}

#[test]
fn update_to_zero_removes_line_and_unknown_model_is_noop() {
    with_env(&[], || {
        let dir = TempDir::new().expect("temp dir");
        let options = options_for(dir.path());
        cart::add(&options, product("A", "Adapter", Some(100)));

        let unknown = cart::update(&options, &ModelCode::from("MISSING"), 4);
        assert_eq!(unknown.exit_code, 0);
        let payload = parse_payload(&unknown.output);
        assert_eq!(payload["data"]["effects"], Value::Array(Vec::new()));

        let removed = cart::update(&options, &ModelCode::from("A"), 0);
        assert_eq!(removed.exit_code, 0);
        let payload = parse_payload(&removed.output);
        assert_eq!(payload["data"]["cart"], Value::Array(Vec::new()));

        let totals = parse_payload(&cart::totals(&options).output);
        assert_eq!(totals["data"]["item_count"], 0);
        assert_eq!(totals["data"]["total_display"], "₹0.00");
    });
}

#[test]
fn rfq_on_empty_cart_returns_rejection_exit_code() {
    with_env(&[], || {
        let dir = TempDir::new().expect("temp dir");
        let options = options_for(dir.path());

        let result = rfq::run(&options, contact());
        assert_eq!(result.exit_code, 4, "expected rfq rejection code");

        let payload = parse_payload(&result.output);
        assert_eq!(payload["command"], "rfq");
        assert_eq!(payload["status"], "error");
        assert_eq!(payload["error_class"], "empty_cart");
        assert_eq!(payload["message"], "Your cart is empty");
    });
}

#[test]
fn rfq_with_missing_mobile_names_the_field() {
    with_env(&[], || {
        let dir = TempDir::new().expect("temp dir");
        let options = options_for(dir.path());
        cart::add(&options, product("A", "Adapter", Some(100)));

        let result =
            rfq::run(&options, RfqContactInfo { mobile_number: "  ".to_string(), ..contact() });
        assert_eq!(result.exit_code, 4);
        let payload = parse_payload(&result.output);
        assert_eq!(payload["error_class"], "rfq_validation");
    });
}

#[test]
fn rfq_success_returns_deep_link_and_keeps_cart_by_default() {
    with_env(&[], || {
        let dir = TempDir::new().expect("temp dir");
        let options = options_for(dir.path());
        cart::add(&options, product("NVR-8", "8ch NVR", None));

        let result = rfq::run(&options, contact());
        assert_eq!(result.exit_code, 0, "expected rfq success: {}", result.output);
        let payload = parse_payload(&result.output);
        let link = payload["data"]["deep_link"].as_str().expect("deep link string");
        assert!(link.starts_with("https://wa.me/919144555566?text="));
        assert!(payload["data"]["message"].as_str().unwrap_or_default().contains("1 × 8ch NVR"));

        let totals = parse_payload(&cart::totals(&options).output);
        assert_eq!(totals["data"]["item_count"], 1);
    });
}

#[test]
fn rfq_with_clearing_enabled_from_env_empties_cart() {
    with_env(&[("STOREFRONT_RFQ_CLEAR_CART_AFTER_SUBMIT", "true")], || {
        let dir = TempDir::new().expect("temp dir");
        let options = options_for(dir.path());
        cart::add(&options, product("A", "Adapter", Some(100)));

        let result = rfq::run(&options, contact());
        assert_eq!(result.exit_code, 0);
        let payload = parse_payload(&result.output);
        let kinds: Vec<&str> = payload["data"]["effects"]
            .as_array()
            .expect("effects array")
            .iter()
            .filter_map(|effect| effect["kind"].as_str())
            .collect();
        assert_eq!(kinds.first(), Some(&"open_external_link"));
        assert_eq!(kinds.last(), Some(&"redirect"));

        let shown = parse_payload(&cart::show(&options, "/cart.html").output);
        assert_eq!(shown["data"]["listing"]["is_empty"], true);
        assert_eq!(shown["data"]["badge"]["floating_button_visible"], false);
    });
}

#[test]
fn invalid_env_override_returns_config_failure() {
    with_env(&[("STOREFRONT_RFQ_BUSINESS_HANDLE", "+91 9144")], || {
        let dir = TempDir::new().expect("temp dir");
        let result = cart::clear(&options_for(dir.path()));
        assert_eq!(result.exit_code, 2, "expected config validation failure code");

        let payload = parse_payload(&result.output);
        assert_eq!(payload["command"], "cart.clear");
        assert_eq!(payload["error_class"], "config_validation");
    });
}

#[test]
fn config_report_attributes_sources() {
    with_env(&[("STOREFRONT_STORAGE_CART_KEY", "demoCart")], || {
        let dir = TempDir::new().expect("temp dir");
        let result = config::run(&options_for(dir.path()));
        assert_eq!(result.exit_code, 0, "expected config report: {}", result.output);

        let payload = parse_payload(&result.output);
        assert_eq!(payload["command"], "config");
        assert_eq!(payload["status"], "ok");
        let entry = |key: &str| -> Value {
            payload["data"]
                .as_array()
                .and_then(|entries| entries.iter().find(|entry| entry["key"] == key))
                .cloned()
                .unwrap_or(Value::Null)
        };
        assert_eq!(entry("storage.cart_key")["value"], "demoCart");
        assert_eq!(entry("storage.cart_key")["source"], "env (STOREFRONT_STORAGE_CART_KEY)");
        assert_eq!(entry("storage.data_dir")["source"], "flag");
        assert_eq!(entry("rfq.business_handle")["value"], "919144555566");
        assert_eq!(entry("rfq.business_handle")["source"], "default");
    });
}

#[test]
fn config_report_with_invalid_env_returns_json_failure() {
    with_env(&[("STOREFRONT_RFQ_BUSINESS_HANDLE", "+91 9144")], || {
        let dir = TempDir::new().expect("temp dir");
        let result = config::run(&options_for(dir.path()));
        assert_eq!(result.exit_code, 2, "expected config validation failure code");

        let payload = parse_payload(&result.output);
        assert_eq!(payload["command"], "config");
        assert_eq!(payload["status"], "error");
        assert_eq!(payload["error_class"], "config_validation");
    });
}

#[test]
fn explicit_overrides_win_over_env_and_are_attributed_to_flags() {
    with_env(&[("STOREFRONT_RFQ_BUSINESS_HANDLE", "911111111111")], || {
        let dir = TempDir::new().expect("temp dir");
        let mut options = options_for(dir.path());
        options.overrides.cart_key = Some("shopCart".to_string());
        options.overrides.business_handle = Some("912222222222".to_string());
        options.overrides.clear_cart_after_submit = Some(true);

        cart::add(&options, product("A", "Adapter", Some(100)));
        assert!(dir.path().join("shopCart.json").exists());

        let payload = parse_payload(&rfq::run(&options, contact()).output);
        let link = payload["data"]["deep_link"].as_str().unwrap_or_default();
        assert!(link.starts_with("https://wa.me/912222222222?text="), "{link}");
        assert!(!dir.path().join("shopCart.json").exists());

        let report = parse_payload(&config::run(&options).output);
        let sources: Vec<&str> = report["data"]
            .as_array()
            .map(|entries| {
                entries
                    .iter()
                    .filter(|entry| entry["source"] == "flag")
                    .filter_map(|entry| entry["key"].as_str())
                    .collect()
            })
            .unwrap_or_default();
        assert_eq!(
            sources,
            [
                "storage.data_dir",
                "storage.cart_key",
                "rfq.business_handle",
                "rfq.clear_cart_after_submit"
            ]
        );
    });
}

#[test]
fn remove_clears_every_stored_line_for_the_model() {
    with_env(&[], || {
        let dir = TempDir::new().expect("temp dir");
        std::fs::write(
            dir.path().join("pvcCart.json"),
            r#"[{"name":"A","model":"A","price":10,"image":"a.png","quantity":0},
                {"name":"B","model":"B","price":20,"image":"b.png","quantity":1},
                {"name":"B","model":"B","price":20,"image":"b.png","quantity":1}]"#,
        )
        .expect("seed slot");
        let options = options_for(dir.path());

        let removed = parse_payload(&cart::remove(&options, &ModelCode::from("B")).output);
        assert_eq!(removed["data"]["cart"], Value::Array(Vec::new()));

        let totals = parse_payload(&cart::totals(&options).output);
        assert_eq!(totals["data"]["item_count"], 0);
    });
}

fn options_for(data_dir: &Path) -> LoadOptions {
    LoadOptions {
        overrides: ConfigOverrides {
            data_dir: Some(data_dir.to_path_buf()),
            ..ConfigOverrides::default()
        },
        ..LoadOptions::default()
    }
}

fn product(model: &str, name: &str, price: Option<u64>) -> AddToCart {
    AddToCart { name: name.to_string(), model: ModelCode::from(model), price, image: None }
}

fn contact() -> RfqContactInfo {
    RfqContactInfo {
        mobile_number: "9876543210".to_string(),
        customer_name: "Asha".to_string(),
        city_name: "Indore".to_string(),
        ..RfqContactInfo::default()
    }
}

fn parse_payload(output: &str) -> Value {
    serde_json::from_str(output).expect("command output should be valid JSON")
}

fn with_env(vars: &[(&str, &str)], test_fn: impl FnOnce()) {
    static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();
    let _guard =
        ENV_LOCK.get_or_init(|| Mutex::new(())).lock().expect("env mutex should not be poisoned");

    let keys = [
        "STOREFRONT_STORAGE_DATA_DIR",
        "STOREFRONT_STORAGE_CART_KEY",
        "STOREFRONT_CART_PLACEHOLDER_IMAGE",
        "STOREFRONT_CART_CURRENCY_SYMBOL",
        "STOREFRONT_CART_NOTIFICATION_DISMISS_MS",
        "STOREFRONT_CART_PAGE",
        "STOREFRONT_RFQ_MESSAGING_BASE_URL",
        "STOREFRONT_RFQ_BUSINESS_HANDLE",
        "STOREFRONT_RFQ_CLEAR_CART_AFTER_SUBMIT",
        "STOREFRONT_RFQ_REDIRECT_URL",
        "STOREFRONT_RFQ_REDIRECT_DELAY_MS",
        "STOREFRONT_LOGGING_LEVEL",
        "STOREFRONT_LOGGING_FORMAT",
        "STOREFRONT_LOG_LEVEL",
        "STOREFRONT_LOG_FORMAT",
    ];

    let previous_values: Vec<(&str, Option<String>)> =
        keys.iter().map(|key| (*key, env::var(key).ok())).collect();

    for key in &keys {
        env::remove_var(key);
    }
    for (key, value) in vars {
        env::set_var(key, value);
    }

    test_fn();

    for (key, value) in previous_values {
        if let Some(value) = value {
            env::set_var(key, value);
        } else {
            env::remove_var(key);
        }
    }
}
