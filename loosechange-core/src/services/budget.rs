//! Budget service - category budget rows grouped for display

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{Local, NaiveDate};

use crate::adapters::lunchmoney::LunchMoneyClient;
use crate::domain::budget::BudgetFigures;
use crate::domain::{
    BudgetGroup, BudgetLine, BudgetStatus, DateWindow, ErrorKind, RawCategoryBudgetEntry,
};
use crate::ports::DisplayFormatter;

/// Key of the bucket holding categories without a group
pub const UNGROUPED: &str = "";

/// Filters, groups and sorts raw category budget rows.
///
/// Rows without complete figures for their month are skipped silently:
/// there is no safe default for a budget that cannot be parsed.
pub struct BudgetAggregator<'a> {
    formatter: &'a dyn DisplayFormatter,
}

impl<'a> BudgetAggregator<'a> {
    pub fn new(formatter: &'a dyn DisplayFormatter) -> Self {
        Self { formatter }
    }

    /// Group rows into budget groups.
    ///
    /// Groups come out sorted by name descending and lines within each group
    /// by name descending. A child row whose group header has not been seen
    /// (or never appears) creates the group on demand.
    pub fn aggregate<I>(&self, entries: I) -> Vec<BudgetGroup>
    where
        I: IntoIterator<Item = RawCategoryBudgetEntry>,
    {
        let mut groups: BTreeMap<String, Vec<BudgetLine>> = BTreeMap::new();

        for entry in entries {
            let figures = match entry.figures() {
                Some(figures) => figures,
                None => {
                    tracing::debug!(category = %entry.category_name, "skipping incomplete budget row");
                    continue;
                }
            };

            let name = self.formatter.unescape_html(&entry.category_name);
            let group_name = entry
                .category_group_name
                .as_deref()
                .map(|g| self.formatter.unescape_html(g))
                .filter(|g| !g.is_empty());

            if entry.is_group() {
                groups.entry(name).or_default();
            } else {
                let key = group_name.unwrap_or_else(|| UNGROUPED.to_string());
                let line = self.line(name, &figures);
                groups.entry(key).or_default().push(line);
            }
        }

        groups
            .into_iter()
            .rev()
            .map(|(group_name, mut lines)| {
                lines.sort_by(|a, b| b.name.cmp(&a.name));
                BudgetGroup { group_name, lines }
            })
            .collect()
    }

    fn line(&self, name: String, figures: &BudgetFigures) -> BudgetLine {
        let available = figures.available();
        BudgetLine {
            name,
            available_amount: available,
            currency_code: figures.budget_currency.clone(),
            formatted_available: self
                .formatter
                .format_currency(&available.to_string(), &figures.budget_currency),
            status: BudgetStatus::of(available),
        }
    }
}

/// Fetches the budget and aggregates it
#[derive(Clone)]
pub struct BudgetService {
    client: Arc<LunchMoneyClient>,
    formatter: Arc<dyn DisplayFormatter>,
}

impl BudgetService {
    pub fn new(client: Arc<LunchMoneyClient>, formatter: Arc<dyn DisplayFormatter>) -> Self {
        Self { client, formatter }
    }

    /// Budget for the current month, up to and including today
    pub async fn fetch_current_month(&self) -> Result<Vec<BudgetGroup>, ErrorKind> {
        self.fetch_month_of(Local::now().date_naive()).await
    }

    pub async fn fetch_month_of(&self, today: NaiveDate) -> Result<Vec<BudgetGroup>, ErrorKind> {
        self.fetch_window(&DateWindow::current_month(today)).await
    }

    pub async fn fetch_window(&self, window: &DateWindow) -> Result<Vec<BudgetGroup>, ErrorKind> {
        let entries = self.client.get_budget(window).await?;
        let total = entries.len();

        let groups = BudgetAggregator::new(self.formatter.as_ref()).aggregate(entries);
        tracing::debug!(rows = total, groups = groups.len(), "budget aggregated");
        Ok(groups)
    }
}
