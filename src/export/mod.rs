//! Export module for FinBud
//!
//! - CSV: a user's transactions (spreadsheet-compatible)
//! - JSON: a user's full dataset, schema versioned

pub mod csv;
pub mod json;

pub use self::csv::export_transactions_csv;
pub use json::{export_user_json, ExportMetadata, UserExport, EXPORT_SCHEMA_VERSION};
