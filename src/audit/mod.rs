//! Audit logging for FinBud
//!
//! Every create, update and delete that goes through [`crate::storage::Storage`]
//! is appended to `audit.log` as one JSON line with before/after snapshots.
//!
//! ```rust,ignore
//! let logger = AuditLogger::new(paths.audit_log());
//! logger.log(&AuditEntry::update(
//!     EntityType::SavingsGoal,
//!     goal.id.to_string(),
//!     Some(goal.name.clone()),
//!     &before,
//!     &goal,
//! ))?;
//! ```

mod diff;
mod entry;
mod logger;

pub use diff::generate_diff;
pub use entry::{AuditEntry, EntityType, Operation};
pub use logger::AuditLogger;
