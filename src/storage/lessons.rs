//! Lesson content repository (lessons.json)
//!
//! Lessons are global seed data, not owned by any user.

use std::path::PathBuf;

use crate::error::FinbudError;
use crate::models::{LessonContent, LessonId};

use super::table::{JsonTable, Keyed};

impl Keyed for LessonContent {
    type Key = LessonId;

    fn key(&self) -> LessonId {
        self.id
    }
}

pub struct LessonRepository {
    table: JsonTable<LessonContent>,
}

impl LessonRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            table: JsonTable::new(path, |a, b| {
                (a.module_id, a.order_index).cmp(&(b.module_id, b.order_index))
            }),
        }
    }

    pub fn load(&self) -> Result<usize, FinbudError> {
        self.table.load()
    }

    pub fn save(&self) -> Result<(), FinbudError> {
        self.table.save()
    }

    /// Every lesson, by module then order index
    pub fn all(&self) -> Result<Vec<LessonContent>, FinbudError> {
        self.table.select(|_| true)
    }

    pub fn upsert(&self, lesson: LessonContent) -> Result<(), FinbudError> {
        self.table.upsert(lesson).map(|_| ())
    }

    pub fn count(&self) -> Result<usize, FinbudError> {
        self.table.count()
    }
}
