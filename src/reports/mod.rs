//! Reports module for FinBud
//!
//! Read-only derivations over fetched records. Nothing here touches storage.

pub mod budget_summary;

pub use budget_summary::{BudgetStatus, BudgetSummary, CategorySpend};
