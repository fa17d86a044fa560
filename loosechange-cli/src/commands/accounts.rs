//! Accounts command - list accounts and balances

use anyhow::Result;
use colored::Colorize;

use super::{get_context, settle};
use crate::output;
use loosechange_core::services::balance_totals;
use loosechange_core::RemoteResource;

pub async fn run(token: Option<String>, json: bool) -> Result<()> {
    let ctx = get_context(token)?;

    let mut accounts = RemoteResource::new();
    let service = ctx.accounts_service.clone();
    accounts.fetch(ctx.is_authenticated(), move || async move {
        service.fetch_accounts().await
    });

    let Some(accounts) = settle(&accounts).await? else {
        return Ok(());
    };

    if json {
        return output::json(&accounts);
    }

    if accounts.is_empty() {
        output::info("No accounts added. Add one in Lunch Money.");
        return Ok(());
    }

    println!("{}", "Accounts".bold());
    println!();

    let mut table = output::create_table();
    table.set_header(vec!["ID", "Account", "Type", "Subtype", "Balance"]);
    for account in &accounts {
        table.add_row(vec![
            account.id.to_string(),
            account.display_name.clone(),
            account.type_label.clone(),
            account.subtype_label.clone(),
            ctx.formatter
                .format_currency(&account.balance, &account.currency_code),
        ]);
    }
    println!("{}", table);

    for (currency, total) in balance_totals(&accounts) {
        println!(
            "{} {}",
            "Total:".bold(),
            ctx.formatter.format_currency(&total.to_string(), &currency)
        );
    }

    Ok(())
}
