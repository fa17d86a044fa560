//! Lenient deserializers for API fields that arrive as either numbers or strings

use rust_decimal::Decimal;
use serde::de::Error;
use serde::{Deserialize, Deserializer};
use serde_json::Value as JsonValue;

/// Deserialize a decimal literal that can be number or string, keeping it as text
pub fn decimal_literal<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value: JsonValue = Deserialize::deserialize(deserializer)?;
    match value {
        JsonValue::Number(n) => Ok(n.to_string()),
        JsonValue::String(s) => Ok(s),
        _ => Err(D::Error::custom("expected number or string for amount")),
    }
}

/// Deserialize an optional decimal that can be number, string or null
pub fn optional_decimal<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<JsonValue> = Option::deserialize(deserializer)?;
    let text = match value {
        Some(JsonValue::Number(n)) => n.to_string(),
        Some(JsonValue::String(s)) => s,
        Some(JsonValue::Null) | None => return Ok(None),
        _ => return Err(D::Error::custom("expected number or string for amount")),
    };

    // serde_json renders large or tiny floats in exponent form
    text.parse::<Decimal>()
        .or_else(|_| Decimal::from_scientific(&text))
        .map(Some)
        .map_err(|e| D::Error::custom(format!("invalid decimal: {}", e)))
}
