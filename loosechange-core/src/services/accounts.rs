//! Accounts service - manual assets and linked accounts as one list

use std::collections::BTreeMap;
use std::sync::Arc;

use rust_decimal::Decimal;

use crate::adapters::lunchmoney::{ApiAsset, ApiPlaidAccount, LunchMoneyClient};
use crate::domain::{Account, ErrorKind};
use crate::ports::DisplayFormatter;

/// Concatenates the two independently sourced account collections.
///
/// Ids of the two sources must be disjoint; no deduplication happens here.
pub struct AccountMerger;

impl AccountMerger {
    /// Normalize each source's labels and return the source accounts
    /// followed by the linked accounts.
    pub fn merge(source: Vec<Account>, linked: Vec<Account>) -> Vec<Account> {
        let mut merged = Vec::with_capacity(source.len() + linked.len());
        merged.extend(source.into_iter().map(Account::with_normalized_labels));
        merged.extend(linked.into_iter().map(Account::with_normalized_labels));
        merged
    }
}

/// Sum of account balances per uppercase currency code.
///
/// Accounts whose balance literal does not parse are skipped.
pub fn balance_totals(accounts: &[Account]) -> BTreeMap<String, Decimal> {
    let mut totals: BTreeMap<String, Decimal> = BTreeMap::new();
    for account in accounts {
        if let Some(balance) = account.balance_decimal() {
            *totals
                .entry(account.currency_code.trim().to_uppercase())
                .or_default() += balance;
        }
    }
    totals
}

/// Fetches and merges all of the user's accounts
#[derive(Clone)]
pub struct AccountsService {
    client: Arc<LunchMoneyClient>,
    formatter: Arc<dyn DisplayFormatter>,
}

impl AccountsService {
    pub fn new(client: Arc<LunchMoneyClient>, formatter: Arc<dyn DisplayFormatter>) -> Self {
        Self { client, formatter }
    }

    /// Fetch assets and Plaid accounts concurrently and merge them
    pub async fn fetch_accounts(&self) -> Result<Vec<Account>, ErrorKind> {
        let (assets, plaid_accounts) = futures::try_join!(
            self.client.get_assets(),
            self.client.get_plaid_accounts()
        )?;

        let source = assets
            .into_iter()
            .map(|asset| self.map_asset(asset))
            .collect();
        let linked = plaid_accounts
            .into_iter()
            .map(map_plaid_account)
            .collect();

        let accounts = AccountMerger::merge(source, linked);
        tracing::debug!(count = accounts.len(), "accounts merged");
        Ok(accounts)
    }

    /// Map a manual asset to an Account.
    ///
    /// Names with special characters come wrapped in HTML entities.
    fn map_asset(&self, asset: ApiAsset) -> Account {
        let name = asset.display_name.unwrap_or(asset.name);
        Account {
            id: asset.id,
            display_name: self.formatter.unescape_html(&name),
            balance: asset.balance,
            currency_code: asset.currency,
            type_label: asset.type_name,
            subtype_label: asset.subtype_name.unwrap_or_default(),
        }
    }
}

/// Map a Plaid account to an Account
fn map_plaid_account(account: ApiPlaidAccount) -> Account {
    Account {
        id: account.id,
        display_name: account.display_name.unwrap_or(account.name),
        balance: account.balance,
        currency_code: account.currency,
        type_label: account.account_type,
        subtype_label: account.subtype.unwrap_or_default(),
    }
}
