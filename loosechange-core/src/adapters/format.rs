//! Default display formatter
//!
//! Renders amounts as `-$1,234.56` style strings using the ISO 4217 symbol
//! and minor units of the currency. The minus sign always leads, ahead of
//! the currency symbol, instead of accounting parentheses.

use std::fmt::Write;

use chrono::NaiveDate;
use iso_currency::Currency;
use num_format::{Locale, ToFormattedString as _};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use crate::ports::DisplayFormatter;

/// Formatter using ISO 4217 symbols and minor units with `en` digit grouping
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardFormatter;

impl StandardFormatter {
    pub fn new() -> Self {
        Self
    }
}

/// Minor units of a currency (JPY = 0, USD = 2, KWD = 3)
fn decimal_places(currency: Currency) -> u32 {
    currency.exponent().map(u32::from).unwrap_or(0)
}

/// Render a non-negative amount with `,` thousands separators and exactly
/// `places` decimals. Always uses the `en` locale.
fn format_magnitude(amount: Decimal, places: u32) -> String {
    let integer_part = amount
        .trunc()
        .to_u128()
        .unwrap_or_default()
        .to_formatted_string(&Locale::en);
    if places == 0 {
        return integer_part;
    }

    let fixed = format!("{:.*}", places as usize, amount);
    let fractional_part = fixed.split_once('.').map(|(_, f)| f).unwrap_or_default();
    format!("{}.{}", integer_part, fractional_part)
}

impl DisplayFormatter for StandardFormatter {
    fn format_currency(&self, amount: &str, currency_code: &str) -> String {
        let code = currency_code.trim().to_uppercase();
        let value: Decimal = match amount.trim().parse() {
            Ok(value) => value,
            Err(_) => return format!("{} {}", amount.trim(), code),
        };

        let currency = Currency::from_code(&code);
        let places = currency.map(decimal_places).unwrap_or(2);

        let rounded = value.round_dp(places);
        let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
            "-"
        } else {
            ""
        };
        let digits = format_magnitude(rounded.abs(), places);

        match currency {
            Some(currency) => format!("{}{}{}", sign, currency.symbol(), digits),
            None => format!("{}{} {}", sign, digits, code),
        }
    }

    fn format_date(&self, date: NaiveDate, pattern: &str) -> String {
        let mut out = String::new();
        // chrono reports unknown specifiers as a fmt error
        if write!(out, "{}", date.format(pattern)).is_err() {
            return date.to_string();
        }
        out
    }

    fn unescape_html(&self, text: &str) -> String {
        html_escape::decode_html_entities(text).into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_currency_known_symbol() {
        let f = StandardFormatter::new();
        assert_eq!(f.format_currency("1234.5", "usd"), "$1,234.50");
        assert_eq!(f.format_currency("-12.00", "USD"), "-$12.00");
        assert_eq!(f.format_currency("-1234567.891", "USD"), "-$1,234,567.89");
        assert_eq!(f.format_currency("0.004", "eur"), "€0.00");
    }

    #[test]
    fn test_format_currency_uses_minor_units() {
        let f = StandardFormatter::new();
        assert_eq!(
            f.format_currency("1234567", "jpy"),
            format!("{}1,234,567", Currency::JPY.symbol())
        );
        assert_eq!(
            f.format_currency("1234.5", "KWD"),
            format!("{}1,234.500", Currency::KWD.symbol())
        );
        assert_eq!(
            f.format_currency("-950.1", "sek"),
            format!("-{}950.10", Currency::SEK.symbol())
        );
    }

    #[test]
    fn test_format_currency_negative_zero_has_no_sign() {
        let f = StandardFormatter::new();
        assert_eq!(f.format_currency("-0.001", "usd"), "$0.00");
    }

    #[test]
    fn test_format_currency_unknown_code() {
        let f = StandardFormatter::new();
        assert_eq!(f.format_currency("-950.1", "xyz"), "-950.10 XYZ");
    }

    #[test]
    fn test_format_currency_unparseable_amount() {
        let f = StandardFormatter::new();
        assert_eq!(f.format_currency("abc", "usd"), "abc USD");
    }

    #[test]
    fn test_format_magnitude() {
        assert_eq!(format_magnitude(Decimal::new(1, 0), 0), "1");
        assert_eq!(format_magnitude(Decimal::new(123, 0), 2), "123.00");
        assert_eq!(format_magnitude(Decimal::new(1234, 0), 0), "1,234");
        assert_eq!(format_magnitude(Decimal::new(12345678, 2), 2), "123,456.78");
    }

    #[test]
    fn test_format_date() {
        let f = StandardFormatter::new();
        let date = NaiveDate::from_ymd_opt(2025, 3, 14).unwrap();
        assert_eq!(f.format_date(date, "%Y-%m-%d"), "2025-03-14");
        assert_eq!(f.format_date(date, "%A, %b %-d"), "Friday, Mar 14");
    }

    #[test]
    fn test_unescape_html() {
        let f = StandardFormatter::new();
        assert_eq!(f.unescape_html("Food &amp; Drink"), "Food & Drink");
        assert_eq!(f.unescape_html("Caf&eacute;"), "Café");
        assert_eq!(f.unescape_html("Plain"), "Plain");
    }
}
