//! spendview-ingest: bank statement CSV ingestion producing normalized
//! transaction records.

pub mod statement;

pub use statement::{load_statement_csv, read_statement};
