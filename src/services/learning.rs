//! Learning service
//!
//! Lesson lock state is derived, never stored: the first lesson of a module is
//! always open, and every later lesson opens once its predecessor has a
//! completion record. Completing a lesson awards its points exactly once.

use std::collections::HashMap;
use std::fmt;

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::error::{FinbudError, FinbudResult};
use crate::models::{
    LearningModule, LearningProgress, LessonContent, LessonId, PointsFormula, ProfileUpdate,
    UserId,
};
use crate::storage::RecordStore;

/// Where a lesson stands for one user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LessonState {
    Locked,
    Unlocked,
    Completed,
}

impl fmt::Display for LessonState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Locked => write!(f, "locked"),
            Self::Unlocked => write!(f, "unlocked"),
            Self::Completed => write!(f, "completed"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ModuleProgress {
    pub module: LearningModule,
    pub completed: usize,
    pub total: usize,
    /// Rounded; zero for an empty module
    pub percentage: u32,
}

/// A lesson as shown in a module overview
#[derive(Debug, Clone, Serialize)]
pub struct LessonView {
    /// 1-based position within the module
    pub position: usize,
    pub lesson: LessonContent,
    pub state: LessonState,
    /// Points the formula would award
    pub points: u32,
    /// Points recorded at completion, if completed
    pub points_earned: Option<u32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LearningTotals {
    pub completed_lessons: usize,
    pub total_lessons: usize,
    pub points_earned: u32,
}

/// Result of a completion call
#[derive(Debug, Clone, PartialEq)]
pub struct LessonCompletion {
    pub record: LearningProgress,
    /// Zero when the lesson was already complete
    pub points_awarded: u32,
    pub newly_completed: bool,
}

/// Lessons and one user's completion records, with all queries derived
#[derive(Debug, Clone)]
pub struct LearningSnapshot {
    lessons: Vec<LessonContent>,
    completions: HashMap<LessonId, LearningProgress>,
}

impl LearningSnapshot {
    pub fn new(mut lessons: Vec<LessonContent>, progress: Vec<LearningProgress>) -> Self {
        lessons.sort_by_key(|l| (l.module_id, l.order_index));
        let completions = progress
            .into_iter()
            .filter(|p| p.completed)
            .map(|p| (p.lesson_id, p))
            .collect();
        Self {
            lessons,
            completions,
        }
    }

    /// A module's lessons by ascending order index
    pub fn lessons_in(&self, module: LearningModule) -> Vec<&LessonContent> {
        self.lessons.iter().filter(|l| l.module_id == module).collect()
    }

    pub fn lesson(&self, id: LessonId) -> Option<&LessonContent> {
        self.lessons.iter().find(|l| l.id == id)
    }

    /// Lesson at a 1-based position within a module
    pub fn lesson_at(&self, module: LearningModule, position: usize) -> Option<&LessonContent> {
        position
            .checked_sub(1)
            .and_then(|idx| self.lessons_in(module).get(idx).copied())
    }

    /// 1-based position of a lesson within its module, the inverse of [`Self::lesson_at`]
    pub fn position_of(&self, id: LessonId) -> Option<usize> {
        let lesson = self.lesson(id)?;
        self.lessons_in(lesson.module_id)
            .iter()
            .position(|l| l.id == id)
            .map(|idx| idx + 1)
    }

    pub fn completion(&self, id: LessonId) -> Option<&LearningProgress> {
        self.completions.get(&id)
    }

    pub fn is_completed(&self, id: LessonId) -> bool {
        self.completions.contains_key(&id)
    }

    /// Locked iff the lesson has a predecessor in its module that is not completed
    ///
    /// Unknown lessons are reported as locked.
    pub fn is_locked(&self, id: LessonId) -> bool {
        let Some(lesson) = self.lesson(id) else {
            return true;
        };
        let module_lessons = self.lessons_in(lesson.module_id);
        match module_lessons.iter().position(|l| l.id == id) {
            Some(0) | None => false,
            Some(idx) => !self.is_completed(module_lessons[idx - 1].id),
        }
    }

    pub fn state(&self, id: LessonId) -> LessonState {
        if self.is_completed(id) {
            LessonState::Completed
        } else if self.is_locked(id) {
            LessonState::Locked
        } else {
            LessonState::Unlocked
        }
    }

    pub fn module_progress(&self, module: LearningModule) -> ModuleProgress {
        let lessons = self.lessons_in(module);
        let total = lessons.len();
        let completed = lessons.iter().filter(|l| self.is_completed(l.id)).count();
        let percentage = if total == 0 {
            0
        } else {
            (completed as f64 / total as f64 * 100.0).round() as u32
        };
        ModuleProgress {
            module,
            completed,
            total,
            percentage,
        }
    }

    /// First incomplete lesson, modules in canonical order
    pub fn next_lesson(&self) -> Option<&LessonContent> {
        LearningModule::all()
            .iter()
            .flat_map(|m| self.lessons_in(*m))
            .find(|l| !self.is_completed(l.id))
    }

    pub fn module_overview(&self, module: LearningModule, formula: &PointsFormula) -> Vec<LessonView> {
        self.lessons_in(module)
            .into_iter()
            .enumerate()
            .map(|(idx, lesson)| LessonView {
                position: idx + 1,
                state: self.state(lesson.id),
                points: formula.points_for(lesson),
                points_earned: self.completion(lesson.id).map(|p| p.points_earned),
                lesson: lesson.clone(),
            })
            .collect()
    }

    pub fn totals(&self) -> LearningTotals {
        let completed: Vec<_> = self
            .lessons
            .iter()
            .filter_map(|l| self.completion(l.id))
            .collect();
        LearningTotals {
            completed_lessons: completed.len(),
            total_lessons: self.lessons.len(),
            points_earned: completed.iter().map(|p| p.points_earned).sum(),
        }
    }
}

/// Service for lesson progression
pub struct LearningService<'a> {
    store: &'a dyn RecordStore,
    user: UserId,
    formula: PointsFormula,
}

impl<'a> LearningService<'a> {
    pub fn new(store: &'a dyn RecordStore, user: UserId, formula: PointsFormula) -> Self {
        Self {
            store,
            user,
            formula,
        }
    }

    pub fn snapshot(&self) -> FinbudResult<LearningSnapshot> {
        Ok(LearningSnapshot::new(
            self.store.list_lesson_content()?,
            self.store.list_progress(self.user)?,
        ))
    }

    pub fn formula(&self) -> &PointsFormula {
        &self.formula
    }

    pub fn points_for(&self, lesson: &LessonContent) -> u32 {
        self.formula.points_for(lesson)
    }

    /// Mark a lesson complete and award `points`
    ///
    /// Completing an already-completed lesson returns the stored record and
    /// awards nothing. A locked lesson is rejected before any write. The
    /// progress row is written before the profile, so a failed profile write
    /// can lose points but never award them twice.
    pub fn complete_lesson(
        &self,
        lesson_id: LessonId,
        module: LearningModule,
        points: u32,
    ) -> FinbudResult<LessonCompletion> {
        let snapshot = self.snapshot()?;

        let lesson = snapshot
            .lesson(lesson_id)
            .ok_or_else(|| FinbudError::lesson_not_found(lesson_id.to_string()))?;
        if lesson.module_id != module {
            return Err(FinbudError::Validation(format!(
                "Lesson '{}' is not part of the {} module",
                lesson.title,
                module.slug()
            )));
        }

        if let Some(existing) = snapshot.completion(lesson_id) {
            debug!(lesson = %lesson.title, "lesson already completed");
            return Ok(LessonCompletion {
                record: existing.clone(),
                points_awarded: 0,
                newly_completed: false,
            });
        }

        if snapshot.is_locked(lesson_id) {
            warn!(lesson = %lesson.title, "completion rejected: lesson is locked");
            return Err(FinbudError::LessonLocked(lesson.title.clone()));
        }

        let profile = self
            .store
            .get_profile(self.user)?
            .ok_or_else(|| FinbudError::profile_not_found(self.user.to_string()))?;

        let record = self
            .store
            .upsert_progress(self.user, lesson_id, module, true, points)?;

        self.store.update_profile(
            self.user,
            &ProfileUpdate {
                current_xp: Some(profile.current_xp.saturating_add(points)),
                total_points: Some(profile.total_points.saturating_add(points)),
                ..ProfileUpdate::default()
            },
        )?;

        info!(lesson = %lesson.title, points, "lesson completed");

        Ok(LessonCompletion {
            record,
            points_awarded: points,
            newly_completed: true,
        })
    }

    pub fn is_lesson_locked(&self, lesson_id: LessonId) -> FinbudResult<bool> {
        Ok(self.snapshot()?.is_locked(lesson_id))
    }

    pub fn is_lesson_completed(&self, lesson_id: LessonId) -> FinbudResult<bool> {
        Ok(self.snapshot()?.is_completed(lesson_id))
    }

    pub fn module_progress(&self, module: LearningModule) -> FinbudResult<ModuleProgress> {
        Ok(self.snapshot()?.module_progress(module))
    }

    pub fn all_module_progress(&self) -> FinbudResult<Vec<ModuleProgress>> {
        let snapshot = self.snapshot()?;
        Ok(LearningModule::all()
            .iter()
            .map(|m| snapshot.module_progress(*m))
            .collect())
    }

    pub fn next_lesson(&self) -> FinbudResult<Option<LessonContent>> {
        Ok(self.snapshot()?.next_lesson().cloned())
    }

    pub fn module_overview(&self, module: LearningModule) -> FinbudResult<Vec<LessonView>> {
        Ok(self.snapshot()?.module_overview(module, &self.formula))
    }

    pub fn totals(&self) -> FinbudResult<LearningTotals> {
        Ok(self.snapshot()?.totals())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::FinbudPaths;
    use crate::models::Profile;
    use crate::storage::Storage;
    use tempfile::TempDir;

    struct Fixture {
        _temp: TempDir,
        storage: Storage,
        user: UserId,
        lessons: Vec<LessonContent>,
    }

    /// Budgeting module with three lessons and an empty profile
    fn fixture() -> Fixture {
        let temp = TempDir::new().unwrap();
        let storage =
            Storage::open(FinbudPaths::with_base_dir(temp.path().to_path_buf())).unwrap();
        let user = UserId::new();

        let lessons: Vec<_> = ["L1", "L2", "L3"]
            .iter()
            .enumerate()
            .map(|(i, title)| LessonContent::new(LearningModule::Budgeting, i as u32, *title, ""))
            .collect();
        for lesson in &lessons {
            storage.lessons.upsert(lesson.clone()).unwrap();
        }
        storage.create_profile(Profile::new(user, "Sam")).unwrap();

        Fixture {
            _temp: temp,
            storage,
            user,
            lessons,
        }
    }

    #[test]
    fn test_unlock_follows_predecessor() {
        let fx = fixture();
        let service = LearningService::new(&fx.storage, fx.user, PointsFormula::default());
        let [l1, l2, l3] = [&fx.lessons[0], &fx.lessons[1], &fx.lessons[2]];

        assert!(!service.is_lesson_locked(l1.id).unwrap());
        assert!(service.is_lesson_locked(l2.id).unwrap());
        assert!(service.is_lesson_locked(l3.id).unwrap());

        service
            .complete_lesson(l1.id, LearningModule::Budgeting, 25)
            .unwrap();

        assert!(!service.is_lesson_locked(l2.id).unwrap());
        assert!(service.is_lesson_locked(l3.id).unwrap());
    }

    #[test]
    fn test_completion_is_idempotent() {
        let fx = fixture();
        let service = LearningService::new(&fx.storage, fx.user, PointsFormula::default());
        let l1 = &fx.lessons[0];

        let first = service
            .complete_lesson(l1.id, LearningModule::Budgeting, 25)
            .unwrap();
        let second = service
            .complete_lesson(l1.id, LearningModule::Budgeting, 25)
            .unwrap();

        assert!(first.newly_completed);
        assert!(!second.newly_completed);
        assert_eq!(second.points_awarded, 0);
        assert_eq!(first.record, second.record);

        let profile = fx.storage.get_profile(fx.user).unwrap().unwrap();
        assert_eq!(profile.current_xp, 25);
        assert_eq!(profile.total_points, 25);
        assert_eq!(fx.storage.list_progress(fx.user).unwrap().len(), 1);
    }

    #[test]
    fn test_is_lesson_completed() {
        let fx = fixture();
        let service = LearningService::new(&fx.storage, fx.user, PointsFormula::default());
        let [l1, l2] = [&fx.lessons[0], &fx.lessons[1]];

        assert!(!service.is_lesson_completed(l1.id).unwrap());

        service
            .complete_lesson(l1.id, LearningModule::Budgeting, 25)
            .unwrap();

        assert!(service.is_lesson_completed(l1.id).unwrap());
        assert!(!service.is_lesson_completed(l2.id).unwrap());
        assert!(!service.is_lesson_completed(LessonId::new()).unwrap());
    }

    #[test]
    fn test_locked_lesson_rejected_without_write() {
        let fx = fixture();
        let service = LearningService::new(&fx.storage, fx.user, PointsFormula::default());

        let err = service
            .complete_lesson(fx.lessons[2].id, LearningModule::Budgeting, 35)
            .unwrap_err();

        assert!(matches!(err, FinbudError::LessonLocked(ref title) if title == "L3"));
        assert!(fx.storage.list_progress(fx.user).unwrap().is_empty());
        let profile = fx.storage.get_profile(fx.user).unwrap().unwrap();
        assert_eq!(profile.current_xp, 0);
    }

    #[test]
    fn test_wrong_module_and_unknown_lesson() {
        let fx = fixture();
        let service = LearningService::new(&fx.storage, fx.user, PointsFormula::default());

        let err = service
            .complete_lesson(fx.lessons[0].id, LearningModule::Credit, 25)
            .unwrap_err();
        assert!(err.is_validation());

        let err = service
            .complete_lesson(LessonId::new(), LearningModule::Budgeting, 25)
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_unlocking_is_monotonic() {
        let fx = fixture();
        let service = LearningService::new(&fx.storage, fx.user, PointsFormula::default());

        let unlocked = || -> Vec<bool> {
            fx.lessons
                .iter()
                .map(|l| !service.is_lesson_locked(l.id).unwrap())
                .collect()
        };

        let mut before = unlocked();
        for lesson in &fx.lessons {
            service
                .complete_lesson(lesson.id, LearningModule::Budgeting, 10)
                .unwrap();
            let after = unlocked();
            for (was, is) in before.iter().zip(&after) {
                assert!(!was || *is, "a lesson re-locked");
            }
            before = after;
        }
    }

    #[test]
    fn test_module_progress_and_next_lesson() {
        let fx = fixture();
        let service = LearningService::new(&fx.storage, fx.user, PointsFormula::default());

        assert_eq!(service.next_lesson().unwrap().unwrap().id, fx.lessons[0].id);
        service
            .complete_lesson(fx.lessons[0].id, LearningModule::Budgeting, 25)
            .unwrap();

        let progress = service.module_progress(LearningModule::Budgeting).unwrap();
        assert_eq!((progress.completed, progress.total), (1, 3));
        assert_eq!(progress.percentage, 33);

        let empty = service.module_progress(LearningModule::Investing).unwrap();
        assert_eq!(empty.percentage, 0);

        assert_eq!(service.next_lesson().unwrap().unwrap().id, fx.lessons[1].id);
    }

    #[test]
    fn test_next_lesson_none_when_all_done() {
        let fx = fixture();
        let service = LearningService::new(&fx.storage, fx.user, PointsFormula::default());
        for lesson in &fx.lessons {
            service
                .complete_lesson(lesson.id, LearningModule::Budgeting, 25)
                .unwrap();
        }

        assert!(service.next_lesson().unwrap().is_none());
        let totals = service.totals().unwrap();
        assert_eq!(totals.completed_lessons, 3);
        assert_eq!(totals.points_earned, 75);
    }

    #[test]
    fn test_overview_states_and_points() {
        let fx = fixture();
        let service = LearningService::new(&fx.storage, fx.user, PointsFormula::default());
        service
            .complete_lesson(fx.lessons[0].id, LearningModule::Budgeting, 25)
            .unwrap();

        let overview = service.module_overview(LearningModule::Budgeting).unwrap();
        let states: Vec<_> = overview.iter().map(|v| v.state).collect();
        assert_eq!(
            states,
            vec![
                LessonState::Completed,
                LessonState::Unlocked,
                LessonState::Locked
            ]
        );
        let points: Vec<_> = overview.iter().map(|v| v.points).collect();
        assert_eq!(points, vec![25, 30, 35]);
        assert_eq!(overview[0].points_earned, Some(25));
        assert_eq!(overview[2].position, 3);
    }

    #[test]
    fn test_lesson_at_position() {
        let fx = fixture();
        let snapshot = LearningService::new(&fx.storage, fx.user, PointsFormula::default())
            .snapshot()
            .unwrap();

        assert_eq!(
            snapshot.lesson_at(LearningModule::Budgeting, 2).unwrap().title,
            "L2"
        );
        assert!(snapshot.lesson_at(LearningModule::Budgeting, 0).is_none());
        assert!(snapshot.lesson_at(LearningModule::Budgeting, 4).is_none());
    }

    #[test]
    fn test_position_ignores_gaps_in_order_index() {
        let fx = fixture();
        let first = LessonContent::new(LearningModule::Saving, 10, "Emergency Fund", "");
        let second = LessonContent::new(LearningModule::Saving, 40, "Sinking Funds", "");
        fx.storage.lessons.upsert(second.clone()).unwrap();
        fx.storage.lessons.upsert(first.clone()).unwrap();

        let snapshot = LearningService::new(&fx.storage, fx.user, PointsFormula::default())
            .snapshot()
            .unwrap();

        assert_eq!(snapshot.position_of(first.id), Some(1));
        assert_eq!(snapshot.position_of(second.id), Some(2));
        assert_eq!(
            snapshot.lesson_at(LearningModule::Saving, 2).unwrap().id,
            second.id
        );
        assert_eq!(snapshot.position_of(fx.lessons[2].id), Some(3));
        assert_eq!(snapshot.position_of(LessonId::new()), None);
    }
}
