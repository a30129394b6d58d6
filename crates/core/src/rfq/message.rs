use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

use crate::domain::cart::CartItem;
use crate::domain::contact::ValidatedContact;

const SEPARATOR_WIDTH: usize = 30;
const SEPARATOR_GLYPH: &str = "─";

/// `RFQ` followed by the last eight digits of the submission's Unix millisecond
/// timestamp. Unique enough within one browser session; not collision-free.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RfqNumber(pub String);

impl RfqNumber {
    pub fn from_timestamp_millis(millis: i64) -> Self {
        Self(format!("RFQ{:08}", millis.rem_euclid(100_000_000)))
    }
}

impl std::fmt::Display for RfqNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

pub fn format_rfq_date(at: &DateTime<FixedOffset>) -> String {
    at.format("%d/%m/%Y").to_string()
}

/// One `• {quantity} × {name}` line per cart item, in cart order.
pub fn product_section(items: &[CartItem]) -> String {
    items.iter().map(|item| format!("• {} × {}\n", item.quantity, item.name)).collect()
}

pub fn render_message(
    number: &RfqNumber,
    date: &str,
    contact: &ValidatedContact,
    items: &[CartItem],
) -> String {
    let separator = SEPARATOR_GLYPH.repeat(SEPARATOR_WIDTH);
    let shipping = contact
        .shipping_method
        .as_ref()
        .map(|method| format!("🚚 *Shipping Method*\n{method}\n\n"))
        .unwrap_or_default();

    format!(
        "🧾 *REQUEST FOR QUOTATION (RFQ)*\n\
         {separator}\n\n\
         📌 *RFQ Details*\n\
         • RFQ Number: {number}\n\
         • 📅 Date: {date}\n\
         • 👤 Name: {name}\n\
         • 📍 City/Village: {city}\n\
         • 📱 Registered Mobile Number: {mobile}\n\n\
         {separator}\n\n\
         📦 *Products Requested*\n\
         {products}\n\
         {separator}\n\n\
         {shipping}\
         {separator}\n\n\
         📝 _Note: Final pricing, availability, and delivery timeline\n\
         will be confirmed after review._\n\n\
         🙏 Kindly share the quotation at your earliest convenience.\n\
         Thank you.",
        name = contact.customer_name,
        city = contact.city_name,
        mobile = contact.mobile_number,
        products = product_section(items),
    )
}

/// `<base>/<handle>?text=<percent-encoded message>`.
pub fn deep_link(base_url: &str, handle: &str, message: &str) -> String {
    format!(
        "{}/{}?text={}",
        base_url.trim_end_matches('/'),
        handle.trim(),
        urlencoding::encode(message)
    )
}
