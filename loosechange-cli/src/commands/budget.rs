//! Budget command - this month's budget by category group

use anyhow::Result;
use chrono::Local;
use colored::Colorize;

use super::{get_context, settle};
use crate::output;
use loosechange_core::RemoteResource;

pub async fn run(token: Option<String>, json: bool) -> Result<()> {
    let ctx = get_context(token)?;

    let mut budget = RemoteResource::new();
    let service = ctx.budget_service.clone();
    budget.fetch(ctx.is_authenticated(), move || async move {
        service.fetch_current_month().await
    });

    let Some(groups) = settle(&budget).await? else {
        return Ok(());
    };

    if json {
        return output::json(&groups);
    }

    let month = ctx.formatter.format_date(Local::now().date_naive(), "%m/%Y");
    println!("{}", format!("Budget for {}", month).bold());
    println!();

    if groups.is_empty() {
        output::info("No budgeted categories this month.");
        return Ok(());
    }

    for group in &groups {
        println!("{}", group.display_name().bold());

        let mut table = output::create_table();
        for line in &group.lines {
            table.add_row(vec![
                line.name.clone(),
                output::status_amount(&line.formatted_available, line.status).to_string(),
            ]);
        }
        if !group.lines.is_empty() {
            println!("{}", table);
        }
        println!();
    }

    println!("Amounts represent either the money left or the overspending on the category");

    Ok(())
}
