pub mod budgets;
pub mod diagnostics;
pub mod health;
pub mod schema;
pub mod transactions;

pub use budgets::{add_budget, list_budgets};
pub use diagnostics::test_database;
pub use health::{health_check, metrics_endpoint, readiness_check, root};
pub use schema::get_schema;
pub use transactions::{add_transaction, list_transactions};
