//! Transactions command - this month's transactions grouped by day

use anyhow::{anyhow, Result};
use colored::Colorize;

use super::{get_context, settle};
use crate::output;
use loosechange_core::services::{group_by_day, TransactionScope, DAY_HEADING_PATTERN};
use loosechange_core::RemoteResource;

pub async fn run(token: Option<String>, account_id: Option<i64>, json: bool) -> Result<()> {
    let ctx = get_context(token)?;

    // Transactions are only shown for accounts that still exist
    let mut accounts = RemoteResource::new();
    let service = ctx.accounts_service.clone();
    accounts.fetch(ctx.is_authenticated(), move || async move {
        service.fetch_accounts().await
    });
    let Some(accounts) = settle(&accounts).await? else {
        return Ok(());
    };

    let scope = match account_id {
        Some(id) => {
            let account = accounts
                .into_iter()
                .find(|a| a.id == id)
                .ok_or_else(|| anyhow!("Account {} not found", id))?;
            TransactionScope::Specific(account)
        }
        None => TransactionScope::All(accounts),
    };

    let mut transactions = RemoteResource::new();
    let service = ctx.transactions_service.clone();
    let fetch_scope = scope.clone();
    transactions.fetch(ctx.is_authenticated(), move || async move {
        service.fetch_month_transactions(&fetch_scope).await
    });
    let Some(transactions) = settle(&transactions).await? else {
        return Ok(());
    };

    if json {
        return output::json(&transactions);
    }

    output::info(&scope.description());
    println!();

    if transactions.is_empty() {
        println!("No transactions this month.");
        return Ok(());
    }

    for day in group_by_day(&transactions, ctx.formatter.as_ref(), DAY_HEADING_PATTERN) {
        println!("{}", day.heading.bold());

        let mut table = output::create_table();
        table.set_header(vec!["Payee", "Category", "Account", "Amount", "Notes"]);
        for tx in &day.transactions {
            table.add_row(vec![
                tx.payee.clone(),
                tx.category.name.clone(),
                tx.account.display_name.clone(),
                tx.formatted_amount.clone(),
                tx.notes.clone(),
            ]);
        }
        println!("{}", table);
        println!();
    }

    Ok(())
}
