//! Demo transport
//!
//! Serves a small, fixed Lunch Money dataset for every endpoint so the app
//! can be explored (and tested) without an access token or network:
//! - 2 manual assets and 1 Plaid account
//! - a budget with one group, its children, ungrouped and incomplete rows
//! - a month of transactions across the three accounts

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use serde_json::{json, Value as JsonValue};
use url::Url;

use crate::domain::ErrorKind;
use crate::ports::HttpTransport;

/// Token the demo transport accepts when `require_token` is set
pub const DEMO_TOKEN: &str = "demo";

/// In-memory transport answering with demo data
#[derive(Debug, Default)]
pub struct DemoTransport {
    require_token: bool,
    requests: AtomicUsize,
}

impl DemoTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject every token other than [`DEMO_TOKEN`] with HTTP 401
    pub fn requiring_token() -> Self {
        Self {
            require_token: true,
            requests: AtomicUsize::new(0),
        }
    }

    /// Number of GET requests served so far
    pub fn request_count(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl HttpTransport for DemoTransport {
    async fn get(&self, url: &str, bearer_token: &str) -> Result<Vec<u8>, ErrorKind> {
        self.requests.fetch_add(1, Ordering::SeqCst);

        if self.require_token && bearer_token != DEMO_TOKEN {
            return Err(ErrorKind::Unauthorized);
        }

        let url = Url::parse(url).map_err(|e| ErrorKind::unknown(e.to_string()))?;
        let endpoint = url.path().rsplit('/').next().unwrap_or_default();

        let body = match endpoint {
            "assets" => demo_assets(),
            "plaid_accounts" => demo_plaid_accounts(),
            "budgets" => demo_budget(),
            "transactions" => demo_transactions(),
            "categories" => demo_categories(),
            _ => return Err(ErrorKind::InvalidResponse { status: 404 }),
        };

        serde_json::to_vec(&body).map_err(|e| ErrorKind::unknown(e.to_string()))
    }
}

fn demo_assets() -> JsonValue {
    json!({
        "assets": [
            {
                "id": 101,
                "name": "Wallet",
                "display_name": "Cash &amp; Coins",
                "balance": "84.2500",
                "currency": "usd",
                "type_name": "cash",
                "subtype_name": "physical cash"
            },
            {
                "id": 102,
                "name": "Emergency Fund",
                "display_name": null,
                "balance": "6250.0000",
                "currency": "usd",
                "type_name": "depository",
                "subtype_name": "high yield savings"
            }
        ]
    })
}

fn demo_plaid_accounts() -> JsonValue {
    json!({
        "plaid_accounts": [
            {
                "id": 201,
                "name": "Sapphire Reserve",
                "display_name": "Travel Card",
                "balance": "1432.1800",
                "currency": "usd",
                "type": "credit",
                "subtype": "credit card"
            }
        ]
    })
}

fn demo_categories() -> JsonValue {
    json!({
        "categories": [
            { "id": 1, "name": "Groceries", "is_group": false },
            { "id": 2, "name": "Restaurants", "is_group": false },
            { "id": 3, "name": "Income", "is_group": false },
            { "id": 4, "name": "Travel", "is_group": false },
            { "id": 10, "name": "Food &amp; Drink", "is_group": true }
        ]
    })
}

fn demo_budget() -> JsonValue {
    json!([
        {
            "category_name": "Groceries",
            "category_group_name": "Food &amp; Drink",
            "is_group": false,
            "data": {
                "2025-03-01": {
                    "budget_to_base": 400,
                    "spending_to_base": 312.45,
                    "budget_currency": "usd"
                }
            }
        },
        {
            "category_name": "Food &amp; Drink",
            "category_group_name": null,
            "is_group": true,
            "data": {
                "2025-03-01": {
                    "budget_to_base": 650,
                    "spending_to_base": 598.45,
                    "budget_currency": "usd"
                }
            }
        },
        {
            "category_name": "Restaurants",
            "category_group_name": "Food &amp; Drink",
            "is_group": false,
            "data": {
                "2025-03-01": {
                    "budget_to_base": 250,
                    "spending_to_base": 286,
                    "budget_currency": "usd"
                }
            }
        },
        {
            "category_name": "Travel",
            "category_group_name": null,
            "is_group": false,
            "data": {
                "2025-03-01": {
                    "budget_to_base": 300,
                    "spending_to_base": 120,
                    "budget_currency": "usd"
                }
            }
        },
        {
            "category_name": "Income",
            "category_group_name": null,
            "is_group": false,
            "data": {
                "2025-03-01": {
                    "budget_to_base": null,
                    "spending_to_base": -4200,
                    "budget_currency": null
                }
            }
        },
        {
            "category_name": "Gifts",
            "category_group_name": null,
            "is_group": false,
            "data": {}
        }
    ])
}

fn demo_transactions() -> JsonValue {
    json!({
        "transactions": [
            {
                "id": 9001,
                "date": "2025-03-03",
                "payee": "Trader Joe's",
                "amount": "84.1200",
                "currency": "usd",
                "asset_id": null,
                "plaid_account_id": 201,
                "category_id": 1,
                "notes": null
            },
            {
                "id": 9002,
                "date": "2025-03-01",
                "payee": "Employer Inc",
                "amount": "-4200.0000",
                "currency": "usd",
                "asset_id": 102,
                "plaid_account_id": null,
                "category_id": 3,
                "notes": "March salary"
            },
            {
                "id": 9003,
                "date": "2025-03-07",
                "payee": "Taqueria",
                "amount": "23.5000",
                "currency": "usd",
                "asset_id": 101,
                "plaid_account_id": null,
                "category_id": 2,
                "notes": null
            },
            {
                "id": 9004,
                "date": "2025-03-07",
                "payee": "Airline",
                "amount": "120.0000",
                "currency": "usd",
                "asset_id": null,
                "plaid_account_id": 201,
                "category_id": 4,
                "notes": "Flight home"
            },
            {
                "id": 9005,
                "date": "2025-03-05",
                "payee": "Old Bank Transfer",
                "amount": "50.0000",
                "currency": "usd",
                "asset_id": 999,
                "plaid_account_id": null,
                "category_id": 3,
                "notes": null
            }
        ]
    })
}
