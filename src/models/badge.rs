//! Badges
//!
//! Badge definitions are catalog data; a `UserBadge` records that a user
//! earned one. A user holds each badge at most once.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ids::{UserBadgeId, UserId};

/// A badge definition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Badge {
    /// Stable slug, e.g. `first_lesson`
    pub id: String,
    pub name: String,
    pub description: String,
    pub icon: String,
    pub unlock_criteria: String,
    pub category: String,
}

impl Badge {
    pub fn new(
        id: &str,
        name: &str,
        description: &str,
        icon: &str,
        unlock_criteria: &str,
        category: &str,
    ) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            description: description.to_string(),
            icon: icon.to_string(),
            unlock_criteria: unlock_criteria.to_string(),
            category: category.to_string(),
        }
    }
}

/// A badge earned by a user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserBadge {
    pub id: UserBadgeId,
    pub user_id: UserId,
    pub badge_id: String,
    pub earned_at: DateTime<Utc>,
}

impl UserBadge {
    pub fn new(user_id: UserId, badge_id: impl Into<String>) -> Self {
        Self {
            id: UserBadgeId::new(),
            user_id,
            badge_id: badge_id.into(),
            earned_at: Utc::now(),
        }
    }
}

/// The seeded badge catalog
pub fn default_badges() -> Vec<Badge> {
    vec![
        Badge::new(
            "first_lesson",
            "First Steps",
            "Complete your first lesson",
            "book-open",
            "Complete 1 lesson",
            "learning",
        ),
        Badge::new(
            "module_master",
            "Module Master",
            "Finish every lesson in a module",
            "graduation-cap",
            "Complete all lessons in one module",
            "learning",
        ),
        Badge::new(
            "budget_starter",
            "Budget Starter",
            "Create your first budget category",
            "wallet",
            "Create 1 budget category",
            "budgeting",
        ),
        Badge::new(
            "expense_tracker",
            "Expense Tracker",
            "Log ten expenses",
            "receipt",
            "Record 10 expenses",
            "budgeting",
        ),
        Badge::new(
            "goal_setter",
            "Goal Setter",
            "Create a savings goal",
            "target",
            "Create 1 savings goal",
            "saving",
        ),
        Badge::new(
            "goal_crusher",
            "Goal Crusher",
            "Reach a savings goal",
            "trophy",
            "Complete 1 savings goal",
            "saving",
        ),
    ]
}
