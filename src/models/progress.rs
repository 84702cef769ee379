//! Learning progress records
//!
//! One record per (user, lesson). Stores upsert on that pair, so a second
//! completion replaces rather than duplicates.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ids::{LessonId, ProgressId, UserId};
use super::lesson::LearningModule;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LearningProgress {
    pub id: ProgressId,
    pub user_id: UserId,
    pub lesson_id: LessonId,
    pub module_id: LearningModule,
    pub completed: bool,
    pub completed_at: Option<DateTime<Utc>>,
    pub points_earned: u32,
}

impl LearningProgress {
    /// A completed record stamped with the current time
    pub fn completed(
        user_id: UserId,
        lesson_id: LessonId,
        module_id: LearningModule,
        points_earned: u32,
    ) -> Self {
        Self {
            id: ProgressId::new(),
            user_id,
            lesson_id,
            module_id,
            completed: true,
            completed_at: Some(Utc::now()),
            points_earned,
        }
    }
}
