//! Storage layer for FinBud
//!
//! [`RecordStore`] is the gateway every service talks to. [`Storage`] is the
//! shipped implementation: one JSON file per table under `data/`, atomic
//! writes, and an audit line for every mutation.

pub mod badges;
pub mod categories;
pub mod file_io;
pub mod goals;
pub mod init;
pub mod lessons;
pub mod profiles;
pub mod progress;
pub mod table;
pub mod transactions;

pub use badges::BadgeRepository;
pub use categories::CategoryRepository;
pub use file_io::{read_json, write_json_atomic};
pub use goals::GoalRepository;
pub use init::initialize_storage;
pub use lessons::LessonRepository;
pub use profiles::ProfileRepository;
pub use progress::ProgressRepository;
pub use transactions::TransactionRepository;

use chrono::Utc;
use serde::Serialize;
use tracing::debug;

use crate::audit::{AuditEntry, AuditLogger, EntityType};
use crate::config::paths::FinbudPaths;
use crate::error::{FinbudError, FinbudResult};
use crate::models::{
    Badge, BudgetCategory, CategoryId, CategoryUpdate, GoalId, GoalUpdate, LearningModule,
    LearningProgress, LessonContent, LessonId, NewCategory, NewGoal, NewTransaction, Profile,
    ProfileUpdate, SavingsGoal, Transaction, UserBadge, UserId,
};

/// Table access scoped by owning user
///
/// Implementations do not validate caller input; services do that before
/// calling in. Rows owned by another user behave as missing.
pub trait RecordStore {
    /// A user's categories, oldest first
    fn list_categories(&self, user: UserId) -> FinbudResult<Vec<BudgetCategory>>;
    fn insert_category(&self, user: UserId, new: NewCategory) -> FinbudResult<BudgetCategory>;
    fn update_category(
        &self,
        user: UserId,
        id: CategoryId,
        update: &CategoryUpdate,
    ) -> FinbudResult<BudgetCategory>;

    /// A user's transactions, most recent date first
    fn list_transactions(&self, user: UserId) -> FinbudResult<Vec<Transaction>>;
    fn insert_transaction(&self, user: UserId, new: NewTransaction) -> FinbudResult<Transaction>;

    /// All lessons, by module then order index
    fn list_lesson_content(&self) -> FinbudResult<Vec<LessonContent>>;
    fn list_progress(&self, user: UserId) -> FinbudResult<Vec<LearningProgress>>;
    /// Insert or replace the single progress row for (user, lesson)
    fn upsert_progress(
        &self,
        user: UserId,
        lesson: LessonId,
        module: LearningModule,
        completed: bool,
        points: u32,
    ) -> FinbudResult<LearningProgress>;

    /// A user's goals, newest first
    fn list_goals(&self, user: UserId) -> FinbudResult<Vec<SavingsGoal>>;
    fn insert_goal(&self, user: UserId, new: NewGoal) -> FinbudResult<SavingsGoal>;
    fn update_goal(
        &self,
        user: UserId,
        id: GoalId,
        update: &GoalUpdate,
    ) -> FinbudResult<SavingsGoal>;
    fn delete_goal(&self, user: UserId, id: GoalId) -> FinbudResult<()>;

    fn get_profile(&self, user: UserId) -> FinbudResult<Option<Profile>>;
    fn create_profile(&self, profile: Profile) -> FinbudResult<Profile>;
    fn update_profile(&self, user: UserId, update: &ProfileUpdate) -> FinbudResult<Profile>;

    fn list_badges(&self) -> FinbudResult<Vec<Badge>>;
    fn list_user_badges(&self, user: UserId) -> FinbudResult<Vec<UserBadge>>;
    /// Record that `user` earned `badge_id`; at most once per pair
    fn insert_user_badge(&self, user: UserId, badge_id: &str) -> FinbudResult<UserBadge>;
}

/// Main storage coordinator that provides access to all repositories
pub struct Storage {
    paths: FinbudPaths,
    audit: AuditLogger,
    pub categories: CategoryRepository,
    pub transactions: TransactionRepository,
    pub lessons: LessonRepository,
    pub progress: ProgressRepository,
    pub goals: GoalRepository,
    pub profiles: ProfileRepository,
    pub badges: BadgeRepository,
}

impl Storage {
    /// Create a storage instance without reading any table
    pub fn new(paths: FinbudPaths) -> Result<Self, FinbudError> {
        paths.ensure_directories()?;

        Ok(Self {
            audit: AuditLogger::new(paths.audit_log()),
            categories: CategoryRepository::new(paths.categories_file()),
            transactions: TransactionRepository::new(paths.transactions_file()),
            lessons: LessonRepository::new(paths.lessons_file()),
            progress: ProgressRepository::new(paths.progress_file()),
            goals: GoalRepository::new(paths.goals_file()),
            profiles: ProfileRepository::new(paths.profiles_file()),
            badges: BadgeRepository::new(paths.badges_file(), paths.user_badges_file()),
            paths,
        })
    }

    /// Create a storage instance and load every table
    pub fn open(paths: FinbudPaths) -> Result<Self, FinbudError> {
        let storage = Self::new(paths)?;
        storage.load_all()?;
        Ok(storage)
    }

    pub fn paths(&self) -> &FinbudPaths {
        &self.paths
    }

    pub fn audit(&self) -> &AuditLogger {
        &self.audit
    }

    pub fn load_all(&self) -> Result<(), FinbudError> {
        let rows = self.categories.load()?
            + self.transactions.load()?
            + self.lessons.load()?
            + self.progress.load()?
            + self.goals.load()?
            + self.profiles.load()?
            + self.badges.load()?;
        debug!(rows, dir = %self.paths.data_dir().display(), "loaded tables");
        Ok(())
    }

    pub fn is_initialized(&self) -> bool {
        self.paths.is_initialized()
    }

    pub fn log_create<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        entity: &T,
    ) -> FinbudResult<()> {
        self.audit
            .log(&AuditEntry::create(entity_type, entity_id, entity_name, entity))
    }

    pub fn log_update<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        before: &T,
        after: &T,
    ) -> FinbudResult<()> {
        self.audit.log(&AuditEntry::update(
            entity_type,
            entity_id,
            entity_name,
            before,
            after,
        ))
    }

    pub fn log_delete<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        entity: &T,
    ) -> FinbudResult<()> {
        self.audit
            .log(&AuditEntry::delete(entity_type, entity_id, entity_name, entity))
    }
}

impl RecordStore for Storage {
    fn list_categories(&self, user: UserId) -> FinbudResult<Vec<BudgetCategory>> {
        self.categories.for_user(user)
    }

    fn insert_category(&self, user: UserId, new: NewCategory) -> FinbudResult<BudgetCategory> {
        let category = BudgetCategory::new(user, new);

        self.categories.commit(category.clone())?;
        self.log_create(
            EntityType::Category,
            category.id.to_string(),
            Some(category.name.clone()),
            &category,
        )?;

        Ok(category)
    }

    fn update_category(
        &self,
        user: UserId,
        id: CategoryId,
        update: &CategoryUpdate,
    ) -> FinbudResult<BudgetCategory> {
        let before = self
            .categories
            .get_owned(user, id)?
            .ok_or_else(|| FinbudError::category_not_found(id.to_string()))?;

        let mut category = before.clone();
        category.apply(update);

        self.categories.commit(category.clone())?;
        self.log_update(
            EntityType::Category,
            category.id.to_string(),
            Some(category.name.clone()),
            &before,
            &category,
        )?;

        Ok(category)
    }

    fn list_transactions(&self, user: UserId) -> FinbudResult<Vec<Transaction>> {
        self.transactions.for_user(user)
    }

    fn insert_transaction(&self, user: UserId, new: NewTransaction) -> FinbudResult<Transaction> {
        let transaction = Transaction::new(user, new);

        self.transactions.commit(transaction.clone())?;
        self.log_create(
            EntityType::Transaction,
            transaction.id.to_string(),
            Some(transaction.label().to_string()),
            &transaction,
        )?;

        Ok(transaction)
    }

    fn list_lesson_content(&self) -> FinbudResult<Vec<LessonContent>> {
        self.lessons.all()
    }

    fn list_progress(&self, user: UserId) -> FinbudResult<Vec<LearningProgress>> {
        self.progress.for_user(user)
    }

    fn upsert_progress(
        &self,
        user: UserId,
        lesson: LessonId,
        module: LearningModule,
        completed: bool,
        points: u32,
    ) -> FinbudResult<LearningProgress> {
        let existing = self.progress.find(user, lesson)?;

        let mut record = match &existing {
            Some(prior) => prior.clone(),
            None => LearningProgress::completed(user, lesson, module, points),
        };
        record.module_id = module;
        record.completed = completed;
        record.points_earned = points;
        record.completed_at = completed.then(Utc::now);

        self.progress.commit(record.clone())?;

        match existing {
            Some(before) => self.log_update(
                EntityType::LearningProgress,
                record.id.to_string(),
                None,
                &before,
                &record,
            )?,
            None => self.log_create(
                EntityType::LearningProgress,
                record.id.to_string(),
                None,
                &record,
            )?,
        }

        Ok(record)
    }

    fn list_goals(&self, user: UserId) -> FinbudResult<Vec<SavingsGoal>> {
        self.goals.for_user(user)
    }

    fn insert_goal(&self, user: UserId, new: NewGoal) -> FinbudResult<SavingsGoal> {
        let goal = SavingsGoal::new(user, new);

        self.goals.commit(goal.clone())?;
        self.log_create(
            EntityType::SavingsGoal,
            goal.id.to_string(),
            Some(goal.name.clone()),
            &goal,
        )?;

        Ok(goal)
    }

    fn update_goal(
        &self,
        user: UserId,
        id: GoalId,
        update: &GoalUpdate,
    ) -> FinbudResult<SavingsGoal> {
        let before = self
            .goals
            .get_owned(user, id)?
            .ok_or_else(|| FinbudError::goal_not_found(id.to_string()))?;

        let mut goal = before.clone();
        goal.apply(update);

        self.goals.commit(goal.clone())?;
        self.log_update(
            EntityType::SavingsGoal,
            goal.id.to_string(),
            Some(goal.name.clone()),
            &before,
            &goal,
        )?;

        Ok(goal)
    }

    fn delete_goal(&self, user: UserId, id: GoalId) -> FinbudResult<()> {
        if self.goals.get_owned(user, id)?.is_none() {
            return Err(FinbudError::goal_not_found(id.to_string()));
        }

        if let Some(goal) = self.goals.commit_remove(id)? {
            self.log_delete(
                EntityType::SavingsGoal,
                goal.id.to_string(),
                Some(goal.name.clone()),
                &goal,
            )?;
        }

        Ok(())
    }

    fn get_profile(&self, user: UserId) -> FinbudResult<Option<Profile>> {
        self.profiles.get(user)
    }

    fn create_profile(&self, profile: Profile) -> FinbudResult<Profile> {
        if self.profiles.get(profile.user_id)?.is_some() {
            return Err(FinbudError::Duplicate {
                entity_type: "Profile",
                identifier: profile.user_id.to_string(),
            });
        }

        self.profiles.commit(profile.clone())?;
        self.log_create(
            EntityType::Profile,
            profile.user_id.to_string(),
            Some(profile.display_name.clone()),
            &profile,
        )?;

        Ok(profile)
    }

    fn update_profile(&self, user: UserId, update: &ProfileUpdate) -> FinbudResult<Profile> {
        let before = self
            .profiles
            .get(user)?
            .ok_or_else(|| FinbudError::profile_not_found(user.to_string()))?;

        let mut profile = before.clone();
        profile.apply(update);

        self.profiles.commit(profile.clone())?;
        self.log_update(
            EntityType::Profile,
            profile.user_id.to_string(),
            Some(profile.display_name.clone()),
            &before,
            &profile,
        )?;

        Ok(profile)
    }

    fn list_badges(&self) -> FinbudResult<Vec<Badge>> {
        self.badges.catalog()
    }

    fn list_user_badges(&self, user: UserId) -> FinbudResult<Vec<UserBadge>> {
        self.badges.earned_by(user)
    }

    fn insert_user_badge(&self, user: UserId, badge_id: &str) -> FinbudResult<UserBadge> {
        let badge = self
            .badges
            .get_badge(badge_id)?
            .ok_or_else(|| FinbudError::badge_not_found(badge_id))?;

        if self.badges.find_earned(user, badge_id)?.is_some() {
            return Err(FinbudError::Duplicate {
                entity_type: "Badge",
                identifier: badge_id.to_string(),
            });
        }

        let earned = UserBadge::new(user, badge_id);
        self.badges.commit_earned(earned.clone())?;
        self.log_create(
            EntityType::UserBadge,
            earned.id.to_string(),
            Some(badge.name),
            &earned,
        )?;

        Ok(earned)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Money, NewGoal};
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = FinbudPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::open(paths).unwrap();
        (temp_dir, storage)
    }

    #[test]
    fn test_storage_creation() {
        let (temp_dir, storage) = create_test_storage();

        assert!(temp_dir.path().join("data").exists());
        assert!(!storage.is_initialized());
    }

    #[test]
    fn test_category_round_trip_through_disk() {
        let (temp_dir, storage) = create_test_storage();
        let user = UserId::new();

        let food = storage
            .insert_category(user, NewCategory::new("Food", Money::from_units(400)))
            .unwrap();
        storage
            .update_category(user, food.id, &CategoryUpdate::budget(Money::from_units(450)))
            .unwrap();

        let reopened =
            Storage::open(FinbudPaths::with_base_dir(temp_dir.path().to_path_buf())).unwrap();
        let categories = reopened.list_categories(user).unwrap();
        assert_eq!(categories.len(), 1);
        assert_eq!(categories[0].budget_amount, Money::from_units(450));
    }

    #[test]
    fn test_failed_write_is_not_visible_in_memory() {
        let (_temp, storage) = create_test_storage();
        let user = UserId::new();
        let goal = storage
            .insert_goal(user, NewGoal::new("Trip", Money::from_units(500)))
            .unwrap();

        let data_dir = storage.paths().data_dir();
        std::fs::remove_dir_all(&data_dir).unwrap();
        std::fs::write(&data_dir, "").unwrap();

        assert!(storage
            .insert_category(user, NewCategory::new("Food", Money::from_units(400)))
            .is_err());
        assert!(storage.list_categories(user).unwrap().is_empty());

        assert!(storage
            .update_goal(user, goal.id, &GoalUpdate::current_amount(Money::from_units(50)))
            .is_err());
        assert!(storage.delete_goal(user, goal.id).is_err());
        let goals = storage.list_goals(user).unwrap();
        assert_eq!(goals.len(), 1);
        assert_eq!(goals[0].current_amount, Money::zero());
    }

    #[test]
    fn test_other_users_rows_are_invisible() {
        let (_temp, storage) = create_test_storage();
        let owner = UserId::new();
        let stranger = UserId::new();

        let goal = storage
            .insert_goal(owner, NewGoal::new("Trip", Money::from_units(500)))
            .unwrap();

        assert!(storage.list_goals(stranger).unwrap().is_empty());
        let err = storage.delete_goal(stranger, goal.id).unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(storage.list_goals(owner).unwrap().len(), 1);
    }

    #[test]
    fn test_transactions_listed_newest_first() {
        let (_temp, storage) = create_test_storage();
        let user = UserId::new();
        let d = |day| NaiveDate::from_ymd_opt(2024, 3, day).unwrap();

        for day in [5, 20, 12] {
            storage
                .insert_transaction(
                    user,
                    NewTransaction::expense(Money::from_units(10), None, d(day)),
                )
                .unwrap();
        }

        let dates: Vec<_> = storage
            .list_transactions(user)
            .unwrap()
            .iter()
            .map(|t| t.transaction_date)
            .collect();
        assert_eq!(dates, vec![d(20), d(12), d(5)]);
    }

    #[test]
    fn test_upsert_progress_keeps_one_row_per_lesson() {
        let (_temp, storage) = create_test_storage();
        let user = UserId::new();
        let lesson = LessonId::new();

        let first = storage
            .upsert_progress(user, lesson, LearningModule::Credit, true, 25)
            .unwrap();
        let second = storage
            .upsert_progress(user, lesson, LearningModule::Credit, true, 30)
            .unwrap();

        assert_eq!(first.id, second.id);
        assert_eq!(storage.list_progress(user).unwrap().len(), 1);
        assert_eq!(storage.list_progress(user).unwrap()[0].points_earned, 30);
    }

    #[test]
    fn test_user_badge_unique_per_user() {
        let (_temp, storage) = create_test_storage();
        let user = UserId::new();
        storage
            .badges
            .upsert_badge(Badge::new("first_lesson", "First Steps", "", "", "", "learning"))
            .unwrap();

        storage.insert_user_badge(user, "first_lesson").unwrap();
        let again = storage.insert_user_badge(user, "first_lesson");
        assert!(matches!(again, Err(FinbudError::Duplicate { .. })));

        let unknown = storage.insert_user_badge(user, "no_such_badge");
        assert!(unknown.unwrap_err().is_not_found());
    }

    #[test]
    fn test_mutations_are_audited() {
        let (_temp, storage) = create_test_storage();
        let user = UserId::new();

        storage.create_profile(Profile::new(user, "Sam")).unwrap();
        storage
            .update_profile(
                user,
                &ProfileUpdate {
                    current_xp: Some(40),
                    ..ProfileUpdate::default()
                },
            )
            .unwrap();

        let entries = storage.audit().read_all().unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[1].diff_summary.as_deref(), Some("current_xp: 0 -> 40"));
    }
}
