//! bankcsv-core: transaction record types, aggregation, and CSV export.

pub mod aggregate;
pub mod export;
pub mod types;

pub use aggregate::aggregate;
pub use export::write_csv;
pub use types::{DocumentText, LayoutKind, TransactionRecord};
