//! Field heuristics over OCR text
//!
//! Receipts put the merchant at the top and the total near the bottom, so the
//! store name comes from the first line and the total is searched bottom-up.

use std::sync::OnceLock;

use regex::Regex;
use tracing::debug;

use crate::models::UNKNOWN_STORE;

/// Amounts like `19.50`, `1,234.56`, `1.234,56`, OCR-spaced `12 . 50` or
/// `19 50`, and suffixed `19.50USD`
///
/// Group 1 is the amount. The trailing group stands in for a lookahead: the
/// cents may not run on into more digits or another `.`/`,` digit group.
fn money_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(\d+(?:[,.]\d{3})*(?:\s*[.,]\s*|\s+)\d{2})(?:$|[^\d.,]|[.,](?:$|\D))")
            .expect("valid regex")
    })
}

/// Every monetary match on a line, in order
fn money_matches(line: &str) -> impl Iterator<Item = &str> {
    money_re()
        .captures_iter(line)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Parse a monetary match: the final two digits are cents and must follow a
/// separator (`.`, `,` or whitespace); every other separator is dropped
pub fn parse_money(raw: &str) -> Option<f64> {
    let raw = raw.trim();
    let split = raw.len().checked_sub(2)?;
    let (whole, cents) = (raw.get(..split)?, raw.get(split..)?);

    if !cents.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    let is_separator = |c: char| c == '.' || c == ',' || c.is_whitespace();
    if !whole.ends_with(is_separator) || !whole.chars().all(|c| c.is_ascii_digit() || is_separator(c)) {
        return None;
    }

    let whole: String = whole.chars().filter(|c| c.is_ascii_digit()).collect();
    if whole.is_empty() {
        return None;
    }
    format!("{}.{}", whole, cents).parse::<f64>().ok()
}

fn is_skipped(lower: &str) -> bool {
    lower.contains("subtotal") || lower.contains("tax")
}

/// Find the receipt total, 0.0 when nothing looks like money
pub fn extract_amount(text: &str) -> f64 {
    for line in text.lines().rev() {
        let lower = line.to_lowercase();
        if is_skipped(&lower) {
            continue;
        }
        if !(lower.contains("total") || lower.contains("amount due")) {
            continue;
        }
        if let Some(amount) = money_matches(line).find_map(parse_money) {
            debug!(amount, line = line.trim(), "Found total line");
            return amount;
        }
    }

    let largest = text
        .lines()
        .filter(|line| !line.to_lowercase().contains("subtotal"))
        .flat_map(money_matches)
        .filter_map(parse_money)
        .fold(None, |max: Option<f64>, amount| {
            Some(max.map_or(amount, |m| m.max(amount)))
        });

    match largest {
        Some(amount) => {
            debug!(amount, "No total line, using largest amount");
            amount
        }
        None => 0.0,
    }
}

/// First non-blank line, trimmed
pub fn extract_store_name(text: &str) -> String {
    text.lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .unwrap_or(UNKNOWN_STORE)
        .to_string()
}
