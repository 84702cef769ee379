//! Learning progress repository (progress.json)

use std::path::PathBuf;

use crate::error::FinbudError;
use crate::models::{LearningProgress, LessonId, ProgressId, UserId};

use super::table::{JsonTable, Keyed};

impl Keyed for LearningProgress {
    type Key = ProgressId;

    fn key(&self) -> ProgressId {
        self.id
    }
}

pub struct ProgressRepository {
    table: JsonTable<LearningProgress>,
}

impl ProgressRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            table: JsonTable::new(path, |a, b| {
                (a.module_id, a.completed_at).cmp(&(b.module_id, b.completed_at))
            }),
        }
    }

    pub fn load(&self) -> Result<usize, FinbudError> {
        self.table.load()
    }

    pub fn for_user(&self, user: UserId) -> Result<Vec<LearningProgress>, FinbudError> {
        self.table.select(|p| p.user_id == user)
    }

    /// The single record for (user, lesson), if any
    pub fn find(
        &self,
        user: UserId,
        lesson: LessonId,
    ) -> Result<Option<LearningProgress>, FinbudError> {
        self.table
            .find(|p| p.user_id == user && p.lesson_id == lesson)
    }

    /// Insert or replace, then persist; nothing changes in memory if the write fails
    pub fn commit(&self, record: LearningProgress) -> Result<(), FinbudError> {
        self.table.commit(record).map(|_| ())
    }
}
