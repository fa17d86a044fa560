//! Transactions service - raw transactions joined with accounts and categories

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{Local, NaiveDate};
use serde::Serialize;

use crate::adapters::lunchmoney::LunchMoneyClient;
use crate::domain::{
    flip_amount, Account, Category, DateWindow, ErrorKind, IntegrityError, RawTransaction,
    Transaction,
};
use crate::ports::DisplayFormatter;

/// Default heading pattern for [`group_by_day`], e.g. "Friday, Mar 14"
pub const DAY_HEADING_PATTERN: &str = "%A, %b %-d";

/// Joins raw transactions against accounts and categories.
///
/// Unlike budget aggregation, a record that cannot be resolved is not
/// skipped: the whole join fails with an [`IntegrityError`].
pub struct TransactionJoiner<'a> {
    formatter: &'a dyn DisplayFormatter,
}

impl<'a> TransactionJoiner<'a> {
    pub fn new(formatter: &'a dyn DisplayFormatter) -> Self {
        Self { formatter }
    }

    /// Keep the transactions that belong to one of `accounts`, resolve their
    /// account and category, flip the amount into display convention and
    /// sort by date, most recent first. Same-date transactions keep their
    /// API order.
    pub fn join(
        &self,
        transactions: Vec<RawTransaction>,
        accounts: &[Account],
        categories: &[Category],
    ) -> Result<Vec<Transaction>, IntegrityError> {
        let mut joined = transactions
            .into_iter()
            .filter(|tx| accounts.iter().any(|account| tx.belongs_to(account)))
            .map(|tx| self.resolve(tx, accounts, categories))
            .collect::<Result<Vec<_>, _>>()?;

        joined.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(joined)
    }

    fn resolve(
        &self,
        tx: RawTransaction,
        accounts: &[Account],
        categories: &[Category],
    ) -> Result<Transaction, IntegrityError> {
        let account = accounts
            .iter()
            .find(|account| tx.belongs_to(account))
            .ok_or(IntegrityError::MissingAccount {
                transaction_id: tx.id,
            })?;

        let category = categories
            .iter()
            .find(|category| category.id == tx.category_id)
            .ok_or(IntegrityError::MissingCategory {
                transaction_id: tx.id,
                category_id: tx.category_id,
            })?;

        let date = tx.parse_date().ok_or_else(|| IntegrityError::InvalidDate {
            transaction_id: tx.id,
            value: tx.date_string.clone(),
        })?;

        let signed_amount = flip_amount(tx.amount.trim());
        let formatted_amount = self
            .formatter
            .format_currency(&signed_amount, &tx.currency_code);

        Ok(Transaction {
            id: tx.id,
            date,
            payee: self.formatter.unescape_html(&tx.payee),
            signed_amount,
            formatted_amount,
            currency_code: tx.currency_code,
            notes: tx.notes.unwrap_or_default(),
            account: account.clone(),
            category: category.clone(),
        })
    }
}

/// Which accounts a transaction listing covers
#[derive(Debug, Clone)]
pub enum TransactionScope {
    All(Vec<Account>),
    Specific(Account),
}

impl TransactionScope {
    pub fn accounts(&self) -> &[Account] {
        match self {
            Self::All(accounts) => accounts,
            Self::Specific(account) => std::slice::from_ref(account),
        }
    }

    /// Caption describing the listing
    pub fn description(&self) -> String {
        match self {
            Self::All(_) => "Showing this month's transactions from all accounts".to_string(),
            Self::Specific(account) => format!(
                "Showing this month's transactions from {}",
                account.display_name
            ),
        }
    }
}

/// Transactions sharing one calendar day
#[derive(Debug, Clone, Serialize)]
pub struct DayGroup {
    pub heading: String,
    pub date: NaiveDate,
    pub transactions: Vec<Transaction>,
}

/// Group transactions by calendar day, each under a formatted heading.
///
/// Groups are keyed by date, so a heading pattern without a year never
/// merges days from different years. Groups are ordered most recent
/// first; transactions inside a group keep their input order.
pub fn group_by_day(
    transactions: &[Transaction],
    formatter: &dyn DisplayFormatter,
    pattern: &str,
) -> Vec<DayGroup> {
    let mut groups: Vec<DayGroup> = Vec::new();
    let mut index: HashMap<NaiveDate, usize> = HashMap::new();

    for tx in transactions {
        match index.get(&tx.date) {
            Some(&i) => groups[i].transactions.push(tx.clone()),
            None => {
                index.insert(tx.date, groups.len());
                groups.push(DayGroup {
                    heading: formatter.format_date(tx.date, pattern),
                    date: tx.date,
                    transactions: vec![tx.clone()],
                });
            }
        }
    }

    groups.sort_by(|a, b| b.date.cmp(&a.date));
    groups
}

/// Fetches transactions and categories and joins them
#[derive(Clone)]
pub struct TransactionsService {
    client: Arc<LunchMoneyClient>,
    formatter: Arc<dyn DisplayFormatter>,
}

impl TransactionsService {
    pub fn new(client: Arc<LunchMoneyClient>, formatter: Arc<dyn DisplayFormatter>) -> Self {
        Self { client, formatter }
    }

    /// This month's transactions for the accounts in `scope`
    pub async fn fetch_month_transactions(
        &self,
        scope: &TransactionScope,
    ) -> Result<Vec<Transaction>, ErrorKind> {
        let window = DateWindow::current_month(Local::now().date_naive());
        self.fetch_window(scope, &window).await
    }

    pub async fn fetch_window(
        &self,
        scope: &TransactionScope,
        window: &DateWindow,
    ) -> Result<Vec<Transaction>, ErrorKind> {
        let (transactions, categories) = futures::try_join!(
            self.client.get_transactions(window),
            self.client.get_categories()
        )?;

        let joined = TransactionJoiner::new(self.formatter.as_ref())
            .join(transactions, scope.accounts(), &categories)
            .inspect_err(|e| tracing::error!(error = %e, "transaction join failed"))?;

        tracing::debug!(count = joined.len(), "transactions joined");
        Ok(joined)
    }
}
