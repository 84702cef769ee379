//! Display formatting for terminal output
//!
//! List views render through `tabled`; detail views are plain text.

pub mod budget;
pub mod goal;
pub mod learning;
pub mod profile;

pub use budget::{
    format_budget_summary, format_category_details, format_category_table,
    format_transaction_table,
};
pub use goal::{format_goal_details, format_goal_table};
pub use learning::{format_lesson, format_module_overview, format_module_progress};
pub use profile::{format_badges, format_profile, format_shop};
