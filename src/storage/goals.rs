//! Savings goal repository (goals.json)

use std::path::PathBuf;

use crate::error::FinbudError;
use crate::models::{GoalId, SavingsGoal, UserId};

use super::table::{JsonTable, Keyed};

impl Keyed for SavingsGoal {
    type Key = GoalId;

    fn key(&self) -> GoalId {
        self.id
    }
}

pub struct GoalRepository {
    table: JsonTable<SavingsGoal>,
}

impl GoalRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            table: JsonTable::new(path, |a, b| b.created_at.cmp(&a.created_at)),
        }
    }

    pub fn load(&self) -> Result<usize, FinbudError> {
        self.table.load()
    }

    /// A user's goals, newest first
    pub fn for_user(&self, user: UserId) -> Result<Vec<SavingsGoal>, FinbudError> {
        self.table.select(|g| g.user_id == user)
    }

    pub fn get_owned(&self, user: UserId, id: GoalId) -> Result<Option<SavingsGoal>, FinbudError> {
        Ok(self.table.get(&id)?.filter(|g| g.user_id == user))
    }

    /// Insert or replace, then persist; nothing changes in memory if the write fails
    pub fn commit(&self, goal: SavingsGoal) -> Result<(), FinbudError> {
        self.table.commit(goal).map(|_| ())
    }

    pub fn commit_remove(&self, id: GoalId) -> Result<Option<SavingsGoal>, FinbudError> {
        self.table.commit_remove(&id)
    }
}
