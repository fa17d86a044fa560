//! Budget records as returned by the API and the grouped display model

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::de;

/// One category's budget row for the query window.
///
/// Lunch Money returns one row per category, with `data` keyed by the
/// month the numbers belong to.
#[derive(Debug, Clone, Deserialize)]
pub struct RawCategoryBudgetEntry {
    pub category_name: String,
    #[serde(default)]
    pub category_group_name: Option<String>,
    #[serde(default)]
    pub is_group: Option<bool>,
    #[serde(default, rename = "data")]
    pub monthly_data: BTreeMap<String, MonthlyBudget>,
}

/// Planned vs. actual spending for one month
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MonthlyBudget {
    #[serde(default, deserialize_with = "de::optional_decimal")]
    pub budget_to_base: Option<Decimal>,
    #[serde(default, deserialize_with = "de::optional_decimal")]
    pub spending_to_base: Option<Decimal>,
    #[serde(default)]
    pub budget_currency: Option<String>,
}

/// The fields of a row's month that must all be present to derive a line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BudgetFigures {
    pub budget_to_base: Decimal,
    pub spending_to_base: Decimal,
    pub budget_currency: String,
}

impl BudgetFigures {
    /// Money left in the category; negative when overspent
    pub fn available(&self) -> Decimal {
        self.budget_to_base - self.spending_to_base
    }
}

impl RawCategoryBudgetEntry {
    /// The complete figures of the row's month, or `None` if the row has no
    /// month data or any of the budget fields are null.
    pub fn figures(&self) -> Option<BudgetFigures> {
        let month = self.monthly_data.values().next()?;
        Some(BudgetFigures {
            budget_to_base: month.budget_to_base?,
            spending_to_base: month.spending_to_base?,
            budget_currency: month.budget_currency.clone()?,
        })
    }

    pub fn is_group(&self) -> bool {
        self.is_group.unwrap_or(false)
    }
}

/// Whether a category still has money left
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BudgetStatus {
    Positive,
    Negative,
}

impl BudgetStatus {
    pub fn of(available: Decimal) -> Self {
        if available >= Decimal::ZERO {
            Self::Positive
        } else {
            Self::Negative
        }
    }
}

/// A single category inside a budget group
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BudgetLine {
    pub name: String,
    pub available_amount: Decimal,
    pub currency_code: String,
    /// `available_amount` run through the currency formatter
    pub formatted_available: String,
    pub status: BudgetStatus,
}

/// A named bucket of budget lines. The empty name holds ungrouped categories.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BudgetGroup {
    pub group_name: String,
    pub lines: Vec<BudgetLine>,
}

impl BudgetGroup {
    pub fn is_ungrouped(&self) -> bool {
        self.group_name.is_empty()
    }

    /// Heading to show for this group
    pub fn display_name(&self) -> &str {
        if self.is_ungrouped() {
            "Ungrouped"
        } else {
            &self.group_name
        }
    }
}
