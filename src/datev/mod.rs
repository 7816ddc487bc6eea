//! DATEV ASCII CSV codec (component D, SPEC_FULL §4.2).

pub mod bank_transaction;
pub mod metadata;
pub mod model;
pub mod row;
pub mod schema;

pub use bank_transaction::BankTransaction;
pub use metadata::Metadata;
pub use model::DatevDocument;
pub use row::DatevRow;
pub use schema::{Category, ColumnSpec, ColumnType};
