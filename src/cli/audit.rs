//! Audit log CLI command

use crate::audit::EntityType;
use crate::error::{FinbudError, FinbudResult};
use crate::storage::Storage;

/// Print the most recent audit entries, newest first
pub fn handle_audit_command(
    storage: &Storage,
    count: usize,
    entity: Option<String>,
) -> FinbudResult<()> {
    let entity_type = entity
        .as_deref()
        .map(|e| {
            EntityType::parse(e)
                .ok_or_else(|| FinbudError::Validation(format!("Unknown entity type '{}'", e)))
        })
        .transpose()?;

    let entries = storage.audit().read_recent(count, entity_type)?;
    if entries.is_empty() {
        println!("No audit entries found.");
        return Ok(());
    }

    for entry in entries.iter().rev() {
        println!("{}", entry.format_human_readable());
    }

    Ok(())
}
