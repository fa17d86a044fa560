//! Transaction domain model

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::de;
use super::{Account, Category};

/// Date format used by the API for transaction dates and query windows
pub const API_DATE_FORMAT: &str = "%Y-%m-%d";

/// A transaction as returned by the API, before it is joined
#[derive(Debug, Clone, Deserialize)]
pub struct RawTransaction {
    pub id: i64,
    /// ISO date string YYYY-MM-DD
    #[serde(rename = "date")]
    pub date_string: String,
    #[serde(default)]
    pub payee: String,
    /// Decimal literal; outflows are positive, inflows negative
    #[serde(deserialize_with = "de::decimal_literal")]
    pub amount: String,
    #[serde(rename = "currency")]
    pub currency_code: String,
    #[serde(default)]
    pub asset_id: Option<i64>,
    #[serde(default)]
    pub plaid_account_id: Option<i64>,
    pub category_id: i64,
    #[serde(default)]
    pub notes: Option<String>,
}

impl RawTransaction {
    /// Whether this transaction was recorded against the given account,
    /// either as a manual asset or as a Plaid account.
    pub fn belongs_to(&self, account: &Account) -> bool {
        self.asset_id == Some(account.id) || self.plaid_account_id == Some(account.id)
    }

    pub fn parse_date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(self.date_string.trim(), API_DATE_FORMAT).ok()
    }
}

/// A transaction resolved against its account and category, ready for display
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Transaction {
    pub id: i64,
    pub date: NaiveDate,
    pub payee: String,
    /// Decimal literal in display convention (positive = money in)
    pub signed_amount: String,
    /// `signed_amount` run through the currency formatter
    pub formatted_amount: String,
    pub currency_code: String,
    pub notes: String,
    pub account: Account,
    pub category: Category,
}

/// Invert the API sign convention on a decimal literal.
///
/// Strips a leading "-" if present, otherwise prefixes one. Applying it
/// twice yields the original literal.
pub fn flip_amount(amount: &str) -> String {
    match amount.strip_prefix('-') {
        Some(magnitude) => magnitude.to_string(),
        None => format!("-{}", amount),
    }
}
