//! End-to-end tests for the fetch pipelines
//!
//! Each test drives a `RemoteResource` with a producer built from the
//! services, the way a presentation layer would. Network IO is replaced
//! at the transport port by the demo data set or an in-test transport.
//!
//! Run with: cargo test --test pipeline_test -- --nocapture

use std::sync::Arc;

use async_trait::async_trait;
use rust_decimal::Decimal;
use url::Url;

use loosechange_core::adapters::demo::{DemoTransport, DEMO_TOKEN};
use loosechange_core::config::Config;
use loosechange_core::ports::HttpTransport;
use loosechange_core::services::{group_by_day, TransactionScope, DAY_HEADING_PATTERN};
use loosechange_core::{
    Account, BudgetGroup, BudgetStatus, ErrorKind, IntegrityError, LooseChangeContext,
    RemoteContent, RemoteResource, Session, Transaction,
};

// ============================================================================
// Test Helpers
// ============================================================================

fn demo_context() -> LooseChangeContext {
    LooseChangeContext::with_transport(
        Config::default(),
        Session::new(DEMO_TOKEN),
        Arc::new(DemoTransport::new()),
    )
}

async fn load_accounts(ctx: &LooseChangeContext) -> Vec<Account> {
    let mut resource = RemoteResource::new();
    let service = ctx.accounts_service.clone();
    resource.fetch(ctx.is_authenticated(), move || async move {
        service.fetch_accounts().await
    });

    match resource.settled().await {
        RemoteContent::Done(accounts) => accounts,
        other => panic!("expected accounts, got {:?}", other),
    }
}

async fn load_transactions(
    ctx: &LooseChangeContext,
    scope: TransactionScope,
) -> RemoteContent<Vec<Transaction>> {
    let mut resource = RemoteResource::new();
    let service = ctx.transactions_service.clone();
    resource.fetch(ctx.is_authenticated(), move || async move {
        service.fetch_month_transactions(&scope).await
    });
    resource.settled().await
}

/// Serves fixed bodies by endpoint name
struct FixedTransport {
    routes: Vec<(&'static str, &'static str)>,
}

#[async_trait]
impl HttpTransport for FixedTransport {
    async fn get(&self, url: &str, _bearer_token: &str) -> Result<Vec<u8>, ErrorKind> {
        let url = Url::parse(url).map_err(|e| ErrorKind::unknown(e.to_string()))?;
        let endpoint = url.path().rsplit('/').next().unwrap_or_default().to_string();
        self.routes
            .iter()
            .find(|(name, _)| *name == endpoint)
            .map(|(_, body)| body.as_bytes().to_vec())
            .ok_or(ErrorKind::InvalidResponse { status: 404 })
    }
}

// ============================================================================
// Accounts
// ============================================================================

#[tokio::test]
async fn test_accounts_merge_assets_before_plaid_accounts() {
    let ctx = demo_context();
    let accounts = load_accounts(&ctx).await;

    let ids: Vec<i64> = accounts.iter().map(|a| a.id).collect();
    assert_eq!(ids, vec![101, 102, 201]);

    // HTML entities are decoded and null display names fall back to the name
    assert_eq!(accounts[0].display_name, "Cash & Coins");
    assert_eq!(accounts[1].display_name, "Emergency Fund");
    assert_eq!(accounts[2].display_name, "Travel Card");

    assert_eq!(accounts[0].type_label, "Cash");
    assert_eq!(accounts[1].subtype_label, "High Yield Savings");
    assert_eq!(accounts[2].type_label, "Credit");
    assert_eq!(accounts[2].balance, "1432.1800");
}

// ============================================================================
// Budget
// ============================================================================

#[tokio::test]
async fn test_budget_groups_demo_rows() {
    let ctx = demo_context();
    let mut resource: RemoteResource<Vec<BudgetGroup>> = RemoteResource::new();
    let service = ctx.budget_service.clone();
    resource.fetch(ctx.is_authenticated(), move || async move {
        service.fetch_current_month().await
    });

    let groups = match resource.settled().await {
        RemoteContent::Done(groups) => groups,
        other => panic!("expected budget, got {:?}", other),
    };

    let names: Vec<&str> = groups.iter().map(|g| g.display_name()).collect();
    assert_eq!(names, vec!["Food & Drink", "Ungrouped"]);

    let food: Vec<&str> = groups[0].lines.iter().map(|l| l.name.as_str()).collect();
    assert_eq!(food, vec!["Restaurants", "Groceries"]);
    assert_eq!(groups[0].lines[0].status, BudgetStatus::Negative);
    assert_eq!(groups[0].lines[0].formatted_available, "-$36.00");
    assert_eq!(groups[0].lines[1].available_amount, Decimal::new(8755, 2));

    // Income (null budget) and Gifts (no month data) are dropped
    let ungrouped: Vec<&str> = groups[1].lines.iter().map(|l| l.name.as_str()).collect();
    assert_eq!(ungrouped, vec!["Travel"]);
}

// ============================================================================
// Transactions
// ============================================================================

#[tokio::test]
async fn test_transactions_for_all_accounts() {
    let ctx = demo_context();
    let accounts = load_accounts(&ctx).await;

    let transactions = match load_transactions(&ctx, TransactionScope::All(accounts)).await {
        RemoteContent::Done(transactions) => transactions,
        other => panic!("expected transactions, got {:?}", other),
    };

    // 9005 belongs to an account that no longer exists and is dropped
    let ids: Vec<i64> = transactions.iter().map(|t| t.id).collect();
    assert_eq!(ids, vec![9003, 9004, 9001, 9002]);

    let salary = &transactions[3];
    assert_eq!(salary.signed_amount, "4200.0000");
    assert_eq!(salary.formatted_amount, "$4,200.00");
    assert_eq!(salary.account.display_name, "Emergency Fund");
    assert_eq!(salary.category.name, "Income");
    assert_eq!(salary.notes, "March salary");

    let groceries = &transactions[2];
    assert_eq!(groceries.formatted_amount, "-$84.12");

    let days = group_by_day(&transactions, ctx.formatter.as_ref(), DAY_HEADING_PATTERN);
    let headings: Vec<&str> = days.iter().map(|d| d.heading.as_str()).collect();
    assert_eq!(headings, vec!["Friday, Mar 7", "Monday, Mar 3", "Saturday, Mar 1"]);
    assert_eq!(days[0].transactions.len(), 2);
}

#[tokio::test]
async fn test_transactions_for_specific_account() {
    let ctx = demo_context();
    let accounts = load_accounts(&ctx).await;
    let card = accounts
        .iter()
        .find(|a| a.id == 201)
        .cloned()
        .unwrap();

    let state = load_transactions(&ctx, TransactionScope::Specific(card)).await;
    let ids: Vec<i64> = state.done().unwrap().iter().map(|t| t.id).collect();
    assert_eq!(ids, vec![9004, 9001]);
}

#[tokio::test]
async fn test_unknown_category_surfaces_as_integrity_failure() {
    let transport = FixedTransport {
        routes: vec![
            (
                "transactions",
                r#"{"transactions":[{"id":1,"date":"2025-03-02","payee":"Shop","amount":"5.00",
                    "currency":"usd","asset_id":5,"plaid_account_id":null,"category_id":77,
                    "notes":null}]}"#,
            ),
            ("categories", r#"{"categories":[{"id":1,"name":"Groceries"}]}"#),
        ],
    };
    let ctx = LooseChangeContext::with_transport(
        Config::default(),
        Session::new("token"),
        Arc::new(transport),
    );

    let state = load_transactions(&ctx, TransactionScope::Specific(Account::new(5, "Checking"))).await;

    assert_eq!(
        state,
        RemoteContent::Failed(ErrorKind::DataIntegrity(IntegrityError::MissingCategory {
            transaction_id: 1,
            category_id: 77
        }))
    );
}

// ============================================================================
// Authentication
// ============================================================================

#[tokio::test]
async fn test_rejected_token_fails_unauthorized() {
    let ctx = LooseChangeContext::with_transport(
        Config::default(),
        Session::new("expired"),
        Arc::new(DemoTransport::requiring_token()),
    );

    let mut resource = RemoteResource::new();
    let service = ctx.accounts_service.clone();
    resource.fetch(ctx.is_authenticated(), move || async move {
        service.fetch_accounts().await
    });

    let state = resource.settled().await;
    assert_eq!(state, RemoteContent::Failed(ErrorKind::Unauthorized));
    assert!(state.failure().unwrap().requires_login());
}

#[tokio::test]
async fn test_anonymous_session_never_hits_transport() {
    let transport = Arc::new(DemoTransport::new());
    let ctx = LooseChangeContext::with_transport(
        Config::default(),
        Session::anonymous(),
        Arc::clone(&transport) as Arc<dyn HttpTransport>,
    );

    let mut resource = RemoteResource::new();
    let service = ctx.accounts_service.clone();
    resource.fetch(ctx.is_authenticated(), move || async move {
        service.fetch_accounts().await
    });

    assert_eq!(resource.settled().await, RemoteContent::NotRequested);
    assert_eq!(transport.request_count(), 0);
}
