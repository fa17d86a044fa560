//! Lunch Money API client
//!
//! Composes the five read-only endpoints the app needs on top of an
//! [`HttpTransport`] and decodes their snake_case JSON bodies.
//!
//! API Documentation: https://lunchmoney.dev

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Deserialize;
use url::Url;

use crate::domain::budget::RawCategoryBudgetEntry;
use crate::domain::{Category, DateWindow, ErrorKind, RawTransaction, Session};
use crate::ports::HttpTransport;

// =============================================================================
// API Response Models
// =============================================================================

#[derive(Debug, Deserialize)]
struct AssetsResponse {
    assets: Vec<ApiAsset>,
}

/// Manually managed asset
#[derive(Debug, Clone, Deserialize)]
pub struct ApiAsset {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(deserialize_with = "crate::domain::de::decimal_literal")]
    pub balance: String,
    pub currency: String,
    pub type_name: String,
    #[serde(default)]
    pub subtype_name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PlaidAccountsResponse {
    plaid_accounts: Vec<ApiPlaidAccount>,
}

/// Account linked through Plaid
#[derive(Debug, Clone, Deserialize)]
pub struct ApiPlaidAccount {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(deserialize_with = "crate::domain::de::decimal_literal")]
    pub balance: String,
    pub currency: String,
    #[serde(rename = "type")]
    pub account_type: String,
    #[serde(default)]
    pub subtype: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TransactionsResponse {
    transactions: Vec<RawTransaction>,
}

#[derive(Debug, Deserialize)]
struct CategoriesResponse {
    categories: Vec<Category>,
}

// =============================================================================
// Lunch Money Client
// =============================================================================

/// Default production API URL
pub const LUNCHMONEY_PRODUCTION_URL: &str = "https://dev.lunchmoney.app/v1";

/// Lunch Money API client
pub struct LunchMoneyClient {
    transport: Arc<dyn HttpTransport>,
    base_url: String,
    session: Session,
}

impl LunchMoneyClient {
    pub fn new(transport: Arc<dyn HttpTransport>, base_url: &str, session: Session) -> Self {
        Self {
            transport,
            base_url: base_url.trim_end_matches('/').to_string(),
            session,
        }
    }

    /// GET /assets
    pub async fn get_assets(&self) -> Result<Vec<ApiAsset>, ErrorKind> {
        let response: AssetsResponse = self.get_json("assets", &[]).await?;
        Ok(response.assets)
    }

    /// GET /plaid_accounts
    pub async fn get_plaid_accounts(&self) -> Result<Vec<ApiPlaidAccount>, ErrorKind> {
        let response: PlaidAccountsResponse = self.get_json("plaid_accounts", &[]).await?;
        Ok(response.plaid_accounts)
    }

    /// GET /budgets for a date range. The endpoint returns a bare array.
    pub async fn get_budget(
        &self,
        window: &DateWindow,
    ) -> Result<Vec<RawCategoryBudgetEntry>, ErrorKind> {
        self.get_json(
            "budgets",
            &[
                ("start_date", window.start_param()),
                ("end_date", window.end_param()),
            ],
        )
        .await
    }

    /// GET /transactions for a date range
    pub async fn get_transactions(
        &self,
        window: &DateWindow,
    ) -> Result<Vec<RawTransaction>, ErrorKind> {
        let response: TransactionsResponse = self
            .get_json(
                "transactions",
                &[
                    ("start_date", window.start_param()),
                    ("end_date", window.end_param()),
                ],
            )
            .await?;
        Ok(response.transactions)
    }

    /// GET /categories
    pub async fn get_categories(&self) -> Result<Vec<Category>, ErrorKind> {
        let response: CategoriesResponse = self.get_json("categories", &[]).await?;
        Ok(response.categories)
    }

    /// Build the full URL for an endpoint
    pub fn endpoint(&self, path: &str, query: &[(&str, String)]) -> Result<Url, ErrorKind> {
        let mut url = Url::parse(&format!("{}/{}", self.base_url, path))
            .map_err(|e| ErrorKind::unknown(format!("Invalid API URL: {}", e)))?;

        if !query.is_empty() {
            url.query_pairs_mut()
                .extend_pairs(query.iter().map(|(k, v)| (*k, v.as_str())));
        }

        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, ErrorKind> {
        let url = self.endpoint(path, query)?;
        let body = self
            .transport
            .get(url.as_str(), self.session.access_token())
            .await?;

        serde_json::from_slice(&body).map_err(|e| {
            tracing::warn!(endpoint = path, error = %e, "failed to decode response");
            ErrorKind::unknown(format!("Failed to parse {} response: {}", path, e))
        })
    }
}

// =============================================================================
// Tests
// =============================================================================
