//! Badge service
//!
//! Earning is idempotent: a badge already held is a no-op, not an error.
//! `check_milestones` evaluates the built-in badge criteria against the
//! user's records and earns whatever has been reached.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, info};

use crate::error::{FinbudError, FinbudResult};
use crate::models::{Badge, LearningModule, UserBadge, UserId};
use crate::storage::RecordStore;

use super::learning::LearningSnapshot;

/// Expenses needed for the expense tracker badge
pub const EXPENSE_TRACKER_COUNT: usize = 10;

/// A catalog badge with the user's earned state
#[derive(Debug, Clone, Serialize)]
pub struct BadgeStatus {
    pub badge: Badge,
    pub earned: bool,
    pub earned_at: Option<DateTime<Utc>>,
}

pub struct BadgeService<'a> {
    store: &'a dyn RecordStore,
    user: UserId,
}

impl<'a> BadgeService<'a> {
    pub fn new(store: &'a dyn RecordStore, user: UserId) -> Self {
        Self { store, user }
    }

    /// Earn a badge; `None` when it was already held
    pub fn earn(&self, badge_id: &str) -> FinbudResult<Option<UserBadge>> {
        let badge = self
            .store
            .list_badges()?
            .into_iter()
            .find(|b| b.id == badge_id)
            .ok_or_else(|| FinbudError::badge_not_found(badge_id))?;

        if self.has(badge_id)? {
            debug!(badge = %badge.id, "badge already earned");
            return Ok(None);
        }

        let earned = self.store.insert_user_badge(self.user, badge_id)?;
        info!(badge = %badge.name, "badge earned");
        Ok(Some(earned))
    }

    pub fn has(&self, badge_id: &str) -> FinbudResult<bool> {
        Ok(self
            .store
            .list_user_badges(self.user)?
            .iter()
            .any(|b| b.badge_id == badge_id))
    }

    /// Every catalog badge, earned or not
    pub fn with_status(&self) -> FinbudResult<Vec<BadgeStatus>> {
        let earned = self.store.list_user_badges(self.user)?;
        Ok(self
            .store
            .list_badges()?
            .into_iter()
            .map(|badge| {
                let held = earned.iter().find(|e| e.badge_id == badge.id);
                BadgeStatus {
                    earned: held.is_some(),
                    earned_at: held.map(|e| e.earned_at),
                    badge,
                }
            })
            .collect())
    }

    pub fn earned_count(&self) -> FinbudResult<usize> {
        Ok(self.store.list_user_badges(self.user)?.len())
    }

    /// Earn every built-in badge whose criteria are now met
    ///
    /// Returns only the badges earned by this call.
    pub fn check_milestones(&self) -> FinbudResult<Vec<UserBadge>> {
        let reached = self.reached_milestones()?;
        let catalog = self.store.list_badges()?;

        let mut newly_earned = Vec::new();
        for slug in reached {
            if !catalog.iter().any(|b| b.id == slug) {
                continue;
            }
            if let Some(badge) = self.earn(slug)? {
                newly_earned.push(badge);
            }
        }
        Ok(newly_earned)
    }

    fn reached_milestones(&self) -> FinbudResult<Vec<&'static str>> {
        let learning = LearningSnapshot::new(
            self.store.list_lesson_content()?,
            self.store.list_progress(self.user)?,
        );
        let categories = self.store.list_categories(self.user)?;
        let expenses = self
            .store
            .list_transactions(self.user)?
            .iter()
            .filter(|t| t.is_expense())
            .count();
        let goals = self.store.list_goals(self.user)?;

        let any_module_done = LearningModule::all().iter().any(|m| {
            let progress = learning.module_progress(*m);
            progress.total > 0 && progress.completed == progress.total
        });

        let checks = [
            ("first_lesson", learning.totals().completed_lessons >= 1),
            ("module_master", any_module_done),
            ("budget_starter", !categories.is_empty()),
            ("expense_tracker", expenses >= EXPENSE_TRACKER_COUNT),
            ("goal_setter", !goals.is_empty()),
            ("goal_crusher", goals.iter().any(|g| g.is_complete())),
        ];

        Ok(checks
            .into_iter()
            .filter_map(|(slug, met)| met.then_some(slug))
            .collect())
    }
}
