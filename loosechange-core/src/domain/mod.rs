//! Core domain entities
//!
//! All entities are defined here: the raw records the API returns and the
//! display-ready shapes they are reshaped into. These are pure data
//! structures - no I/O or external dependencies.

mod account;
pub mod budget;
mod category;
pub(crate) mod de;
pub mod remote;
pub mod result;
mod session;
pub mod transaction;
mod window;

pub use account::{title_case, Account};
pub use budget::{BudgetGroup, BudgetLine, BudgetStatus, MonthlyBudget, RawCategoryBudgetEntry};
pub use category::Category;
pub use remote::RemoteContent;
pub use result::{ErrorKind, IntegrityError};
pub use session::Session;
pub use transaction::{flip_amount, RawTransaction, Transaction};
pub use window::DateWindow;
