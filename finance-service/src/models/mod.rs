pub mod budget;
pub mod category;
pub mod schema;
pub mod transaction;

pub use budget::BudgetRecord;
pub use category::CategoryRecord;
pub use schema::{FieldSchema, RecordSchema};
pub use transaction::{TransactionRecord, TransactionType};

/// The three logical document types, one collection each.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    Category,
    Budget,
    Transaction,
}

impl RecordKind {
    pub const ALL: [RecordKind; 3] = [
        RecordKind::Category,
        RecordKind::Budget,
        RecordKind::Transaction,
    ];

    pub fn collection(&self) -> &'static str {
        match self {
            RecordKind::Category => category::COLLECTION,
            RecordKind::Budget => budget::COLLECTION,
            RecordKind::Transaction => transaction::COLLECTION,
        }
    }

    pub fn schema(&self) -> RecordSchema {
        match self {
            RecordKind::Category => category::schema(),
            RecordKind::Budget => budget::schema(),
            RecordKind::Transaction => transaction::schema(),
        }
    }
}
