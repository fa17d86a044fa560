//! Display formatting port

use chrono::NaiveDate;

/// Locale-aware rendering of amounts, dates and API display strings
pub trait DisplayFormatter: Send + Sync {
    /// Render a decimal literal in the given ISO 4217 currency.
    /// Negative amounts are rendered with a leading minus sign.
    fn format_currency(&self, amount: &str, currency_code: &str) -> String;

    /// Render a date with a strftime-style pattern
    fn format_date(&self, date: NaiveDate, pattern: &str) -> String;

    /// Decode HTML entities the API wraps around special characters
    fn unescape_html(&self, text: &str) -> String;
}
