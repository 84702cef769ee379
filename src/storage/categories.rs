//! Budget category repository (categories.json)

use std::path::PathBuf;

use crate::error::FinbudError;
use crate::models::{BudgetCategory, CategoryId, UserId};

use super::table::{JsonTable, Keyed};

impl Keyed for BudgetCategory {
    type Key = CategoryId;

    fn key(&self) -> CategoryId {
        self.id
    }
}

pub struct CategoryRepository {
    table: JsonTable<BudgetCategory>,
}

impl CategoryRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            table: JsonTable::new(path, |a, b| {
                a.created_at.cmp(&b.created_at).then_with(|| a.name.cmp(&b.name))
            }),
        }
    }

    pub fn load(&self) -> Result<usize, FinbudError> {
        self.table.load()
    }

    /// A user's categories, oldest first
    pub fn for_user(&self, user: UserId) -> Result<Vec<BudgetCategory>, FinbudError> {
        self.table.select(|c| c.user_id == user)
    }

    /// Look up a category owned by `user`
    pub fn get_owned(
        &self,
        user: UserId,
        id: CategoryId,
    ) -> Result<Option<BudgetCategory>, FinbudError> {
        Ok(self.table.get(&id)?.filter(|c| c.user_id == user))
    }

    /// Case-insensitive name lookup within a user's categories
    pub fn find_by_name(
        &self,
        user: UserId,
        name: &str,
    ) -> Result<Option<BudgetCategory>, FinbudError> {
        let wanted = name.trim().to_lowercase();
        self.table
            .find(|c| c.user_id == user && c.name.to_lowercase() == wanted)
    }

    /// Insert or replace, then persist; nothing changes in memory if the write fails
    pub fn commit(&self, category: BudgetCategory) -> Result<(), FinbudError> {
        self.table.commit(category).map(|_| ())
    }
}
