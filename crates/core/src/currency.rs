use rust_decimal::{Decimal, RoundingStrategy};

use crate::domain::cart::CartItem;

pub const PRICE_ON_REQUEST: &str = "Price on Request";

/// Renders `amount` as `<symbol><thousands-grouped integer>.<2 decimals>`,
/// e.g. `₹15,999.00`.
pub fn format_currency(amount: Decimal, symbol: &str) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let fixed = format!("{rounded:.2}");
    let (sign, unsigned) = match fixed.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", fixed.as_str()),
    };
    let (integer, fraction) = unsigned.split_once('.').unwrap_or((unsigned, "00"));

    format!("{symbol}{sign}{}.{fraction}", group_thousands(integer))
}

pub fn format_amount(amount: u64, symbol: &str) -> String {
    format_currency(Decimal::from(amount), symbol)
}

/// Line price as shown in the cart listing. Zero-priced products are quoted on request.
pub fn line_price_display(item: &CartItem, symbol: &str) -> String {
    if item.price == 0 {
        return PRICE_ON_REQUEST.to_string();
    }
    format_amount(item.line_amount(), symbol)
}

fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, ch) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}
