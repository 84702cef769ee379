//! JSON export
//!
//! Dumps everything one user owns, plus the lesson ids they completed, into a
//! single versioned document.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::io::Write;

use crate::error::{FinbudError, FinbudResult};
use crate::models::{
    BudgetCategory, LearningProgress, Profile, SavingsGoal, Transaction, UserBadge, UserId,
};
use crate::storage::RecordStore;

/// Current export schema version
pub const EXPORT_SCHEMA_VERSION: &str = "1.0.0";

/// A user's full dataset
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserExport {
    /// Schema version for compatibility checking
    pub schema_version: String,

    pub exported_at: DateTime<Utc>,

    /// Application version that created the export
    pub app_version: String,

    pub user_id: UserId,
    pub profile: Option<Profile>,
    pub categories: Vec<BudgetCategory>,
    pub transactions: Vec<Transaction>,
    pub goals: Vec<SavingsGoal>,
    pub progress: Vec<LearningProgress>,
    pub badges: Vec<UserBadge>,
    pub metadata: ExportMetadata,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportMetadata {
    pub category_count: usize,
    pub transaction_count: usize,
    pub goal_count: usize,
    pub completed_lessons: usize,
    pub badge_count: usize,

    /// Date range of transactions
    pub earliest_transaction: Option<String>,
    pub latest_transaction: Option<String>,
}

impl UserExport {
    pub fn collect(store: &dyn RecordStore, user: UserId) -> FinbudResult<Self> {
        let profile = store.get_profile(user)?;
        let categories = store.list_categories(user)?;
        let transactions = store.list_transactions(user)?;
        let goals = store.list_goals(user)?;
        let progress = store.list_progress(user)?;
        let badges = store.list_user_badges(user)?;

        let metadata = ExportMetadata {
            category_count: categories.len(),
            transaction_count: transactions.len(),
            goal_count: goals.len(),
            completed_lessons: progress.iter().filter(|p| p.completed).count(),
            badge_count: badges.len(),
            earliest_transaction: transactions
                .iter()
                .map(|t| t.transaction_date)
                .min()
                .map(|d| d.to_string()),
            latest_transaction: transactions
                .iter()
                .map(|t| t.transaction_date)
                .max()
                .map(|d| d.to_string()),
        };

        Ok(Self {
            schema_version: EXPORT_SCHEMA_VERSION.to_string(),
            exported_at: Utc::now(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            user_id: user,
            profile,
            categories,
            transactions,
            goals,
            progress,
            badges,
            metadata,
        })
    }

    /// Check the schema version and that every reference stays inside the export
    pub fn validate(&self) -> Result<(), String> {
        if self.schema_version != EXPORT_SCHEMA_VERSION {
            return Err(format!(
                "Schema version mismatch: expected {}, got {}",
                EXPORT_SCHEMA_VERSION, self.schema_version
            ));
        }

        for txn in &self.transactions {
            if let Some(cat_id) = txn.category_id {
                if !self.categories.iter().any(|c| c.id == cat_id) {
                    return Err(format!(
                        "Transaction {} references unknown category {}",
                        txn.id, cat_id
                    ));
                }
            }
        }

        let foreign = self
            .categories
            .iter()
            .map(|c| c.user_id)
            .chain(self.transactions.iter().map(|t| t.user_id))
            .chain(self.goals.iter().map(|g| g.user_id))
            .chain(self.progress.iter().map(|p| p.user_id))
            .any(|owner| owner != self.user_id);
        if foreign {
            return Err(format!("Export contains rows not owned by {}", self.user_id));
        }

        Ok(())
    }
}

/// Write a user's full dataset as JSON
pub fn export_user_json<W: Write>(
    store: &dyn RecordStore,
    user: UserId,
    writer: &mut W,
    pretty: bool,
) -> FinbudResult<()> {
    let export = UserExport::collect(store, user)?;

    if pretty {
        serde_json::to_writer_pretty(writer, &export)
    } else {
        serde_json::to_writer(writer, &export)
    }
    .map_err(|e| FinbudError::Export(e.to_string()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::FinbudPaths;
    use crate::models::{Money, NewCategory, NewGoal, NewTransaction};
    use crate::storage::{initialize_storage, Storage};
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage, UserId) {
        let temp_dir = TempDir::new().unwrap();
        let paths = FinbudPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::open(paths).unwrap();
        let user = UserId::new();
        initialize_storage(&storage, user, "Sam").unwrap();
        (temp_dir, storage, user)
    }

    #[test]
    fn test_user_export() {
        let (_temp_dir, storage, user) = create_test_storage();
        let cat = storage
            .insert_category(user, NewCategory::new("Groceries", Money::from_units(200)))
            .unwrap();
        storage
            .insert_transaction(
                user,
                NewTransaction::expense(
                    Money::from_units(40),
                    Some(cat.id),
                    NaiveDate::from_ymd_opt(2025, 1, 15).unwrap(),
                ),
            )
            .unwrap();
        storage
            .insert_goal(user, NewGoal::new("Laptop", Money::from_units(900)))
            .unwrap();
        storage
            .insert_category(UserId::new(), NewCategory::new("Other", Money::zero()))
            .unwrap();

        let export = UserExport::collect(&storage, user).unwrap();

        assert_eq!(export.schema_version, EXPORT_SCHEMA_VERSION);
        assert_eq!(export.profile.as_ref().unwrap().display_name, "Sam");
        assert_eq!(export.metadata.category_count, 1);
        assert_eq!(export.metadata.transaction_count, 1);
        assert_eq!(export.metadata.goal_count, 1);
        assert_eq!(export.metadata.earliest_transaction.as_deref(), Some("2025-01-15"));
        assert!(export.validate().is_ok());
    }

    #[test]
    fn test_json_roundtrip() {
        let (_temp_dir, storage, user) = create_test_storage();
        storage
            .insert_category(user, NewCategory::new("Rent", Money::from_units(900)))
            .unwrap();

        let mut json_output = Vec::new();
        export_user_json(&storage, user, &mut json_output, true).unwrap();

        let imported: UserExport = serde_json::from_slice(&json_output).unwrap();
        assert_eq!(imported.user_id, user);
        assert_eq!(imported.categories[0].name, "Rent");
        assert!(imported.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_dangling_category() {
        let (_temp_dir, storage, user) = create_test_storage();
        let mut export = UserExport::collect(&storage, user).unwrap();
        export.transactions.push(Transaction::new(
            user,
            NewTransaction::expense(
                Money::from_units(1),
                Some(crate::models::CategoryId::new()),
                NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            ),
        ));

        assert!(export.validate().is_err());
    }
}
