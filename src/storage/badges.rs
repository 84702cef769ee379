//! Badge catalog (badges.json) and earned badges (user_badges.json)

use std::path::PathBuf;

use crate::error::FinbudError;
use crate::models::{Badge, UserBadge, UserBadgeId, UserId};

use super::table::{JsonTable, Keyed};

impl Keyed for Badge {
    type Key = String;

    fn key(&self) -> String {
        self.id.clone()
    }
}

impl Keyed for UserBadge {
    type Key = UserBadgeId;

    fn key(&self) -> UserBadgeId {
        self.id
    }
}

pub struct BadgeRepository {
    catalog: JsonTable<Badge>,
    earned: JsonTable<UserBadge>,
}

impl BadgeRepository {
    pub fn new(catalog_path: PathBuf, earned_path: PathBuf) -> Self {
        Self {
            catalog: JsonTable::new(catalog_path, |a, b| {
                a.category.cmp(&b.category).then_with(|| a.id.cmp(&b.id))
            }),
            earned: JsonTable::new(earned_path, |a, b| a.earned_at.cmp(&b.earned_at)),
        }
    }

    pub fn load(&self) -> Result<usize, FinbudError> {
        Ok(self.catalog.load()? + self.earned.load()?)
    }

    pub fn save_catalog(&self) -> Result<(), FinbudError> {
        self.catalog.save()
    }

    pub fn catalog(&self) -> Result<Vec<Badge>, FinbudError> {
        self.catalog.select(|_| true)
    }

    pub fn get_badge(&self, slug: &str) -> Result<Option<Badge>, FinbudError> {
        self.catalog.get(&slug.to_string())
    }

    pub fn upsert_badge(&self, badge: Badge) -> Result<(), FinbudError> {
        self.catalog.upsert(badge).map(|_| ())
    }

    pub fn earned_by(&self, user: UserId) -> Result<Vec<UserBadge>, FinbudError> {
        self.earned.select(|b| b.user_id == user)
    }

    pub fn find_earned(
        &self,
        user: UserId,
        slug: &str,
    ) -> Result<Option<UserBadge>, FinbudError> {
        self.earned
            .find(|b| b.user_id == user && b.badge_id == slug)
    }

    pub fn commit_earned(&self, badge: UserBadge) -> Result<(), FinbudError> {
        self.earned.commit(badge).map(|_| ())
    }
}
