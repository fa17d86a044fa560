//! Account domain model

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// An account or asset the user holds in Lunch Money.
///
/// Accounts come from two disjoint id spaces: manually managed assets and
/// Plaid-linked accounts. Both are normalized into this one shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub id: i64,
    pub display_name: String,
    /// Decimal literal as reported by the API, kept at full precision
    pub balance: String,
    /// ISO 4217 currency code as reported by the API (usually lowercase)
    pub currency_code: String,
    /// e.g. "Cash", "Credit", "Depository"
    pub type_label: String,
    /// e.g. "Checking", "Prepaid Credit Card"
    pub subtype_label: String,
}

impl Account {
    /// Create a new account with required fields
    pub fn new(id: i64, display_name: impl Into<String>) -> Self {
        Self {
            id,
            display_name: display_name.into(),
            balance: "0".to_string(),
            currency_code: "usd".to_string(),
            type_label: String::new(),
            subtype_label: String::new(),
        }
    }

    /// Title-case the type and subtype labels
    pub fn with_normalized_labels(mut self) -> Self {
        self.type_label = title_case(&self.type_label);
        self.subtype_label = title_case(&self.subtype_label);
        self
    }

    /// Balance parsed as a decimal, if the literal is well formed
    pub fn balance_decimal(&self) -> Option<Decimal> {
        self.balance.trim().parse().ok()
    }
}

/// Uppercase the first letter of every whitespace-separated word and
/// lowercase the rest ("prepaid credit CARD" -> "Prepaid Credit Card").
pub fn title_case(label: &str) -> String {
    let mut out = String::with_capacity(label.len());
    let mut at_word_start = true;

    for ch in label.chars() {
        if ch.is_whitespace() {
            at_word_start = true;
            out.push(ch);
        } else if at_word_start {
            at_word_start = false;
            out.extend(ch.to_uppercase());
        } else {
            out.extend(ch.to_lowercase());
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("cash"), "Cash");
        assert_eq!(title_case("prepaid credit CARD"), "Prepaid Credit Card");
        assert_eq!(title_case("  real estate"), "  Real Estate");
        assert_eq!(title_case(""), "");
    }

    #[test]
    fn test_normalized_labels() {
        let mut account = Account::new(1, "Checking");
        account.type_label = "depository".to_string();
        account.subtype_label = "high yield savings".to_string();

        let account = account.with_normalized_labels();
        assert_eq!(account.type_label, "Depository");
        assert_eq!(account.subtype_label, "High Yield Savings");
    }

    #[test]
    fn test_balance_decimal() {
        let mut account = Account::new(1, "Checking");
        account.balance = "1201.4500".to_string();
        assert_eq!(account.balance_decimal(), Some(Decimal::new(12014500, 4)));

        account.balance = "n/a".to_string();
        assert_eq!(account.balance_decimal(), None);
    }
}
