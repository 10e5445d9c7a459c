pub mod budgets;
pub mod common;
pub mod transactions;

pub use budgets::BudgetIn;
pub use common::{CreatedResponse, ItemsResponse, ListParams};
pub use transactions::TransactionIn;
