//! Service layer - fetch orchestration and data reshaping
//!
//! `RemoteResource` tracks the lifecycle of one query. The per-query
//! services are the producers handed to it: each composes API calls and
//! pipes the raw records through its aggregation step.

mod accounts;
mod budget;
mod remote_resource;
mod transactions;

pub use accounts::{balance_totals, AccountMerger, AccountsService};
pub use budget::{BudgetAggregator, BudgetService, UNGROUPED};
pub use remote_resource::RemoteResource;
pub use transactions::{
    group_by_day, DayGroup, TransactionJoiner, TransactionScope, TransactionsService,
    DAY_HEADING_PATTERN,
};
