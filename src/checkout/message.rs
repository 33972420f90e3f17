use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use rust_decimal::{Decimal, RoundingStrategy};

use crate::cart::CartLine;

pub const DEFAULT_COUNTRY_CODE: &str = "55";

/// Characters left unescaped, the same set `encodeURIComponent` keeps.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Builds the order text sent to the producer: greeting, one `<qty>x <name>`
/// line per cart line, total, then the delivery prompt.
pub fn compose_order_message(producer_name: Option<&str>, lines: &[CartLine], total: Decimal) -> String {
    let greeting = match producer_name.map(str::trim).filter(|name| !name.is_empty()) {
        Some(name) => format!("Olá, {name}! Gostaria de fazer um pedido pelo GreenMarket:"),
        None => "Olá! Gostaria de fazer um pedido pelo GreenMarket:".to_string(),
    };

    let items = lines
        .iter()
        .map(|line| format!("{}x {}", line.quantity, line.product.name))
        .collect::<Vec<_>>()
        .join("\n");

    // `{:.2}` on a Decimal truncates, so round half away from zero first.
    let total = total.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    format!(
        "{greeting}\n\n{items}\n\nTotal: R$ {total:.2}\n\nComo podemos combinar a entrega?"
    )
}

/// Keeps only the digits of `raw` and makes sure the number carries the
/// country code. Returns `None` when no digit is left.
pub fn normalize_phone(raw: &str, country_code: &str) -> Option<String> {
    let digits: String = raw.chars().filter(char::is_ascii_digit).collect();
    if digits.is_empty() {
        return None;
    }
    if digits.starts_with(country_code) {
        Some(digits)
    } else {
        Some(format!("{country_code}{digits}"))
    }
}

pub fn whatsapp_deep_link(phone: &str, message: &str) -> String {
    format!(
        "whatsapp://send?phone={phone}&text={}",
        utf8_percent_encode(message, URI_COMPONENT)
    )
}
