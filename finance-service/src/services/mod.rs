pub mod database;
pub mod memory;
pub mod metrics;

pub use database::{DocumentStore, MongoStore};
pub use memory::MemoryStore;
pub use metrics::{get_metrics, init_metrics};
