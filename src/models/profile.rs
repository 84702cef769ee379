//! User profile and level progression
//!
//! `current_xp` only ever grows. `total_points` is the spendable balance:
//! lessons add to it and shop purchases take from it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::UserId;
use super::money::Money;

/// XP needed to advance one level
pub const XP_PER_LEVEL: u32 = 500;

/// Maximum length of a display name
pub const MAX_DISPLAY_NAME_LEN: usize = 50;

/// Avatar choices offered during onboarding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Avatar {
    #[default]
    Fox,
    Owl,
    Bear,
    Rabbit,
    Panda,
    Koala,
    Lion,
    Tiger,
    Cat,
    Dog,
    Unicorn,
    Dragon,
}

impl Avatar {
    pub fn all() -> &'static [Self] {
        &[
            Self::Fox,
            Self::Owl,
            Self::Bear,
            Self::Rabbit,
            Self::Panda,
            Self::Koala,
            Self::Lion,
            Self::Tiger,
            Self::Cat,
            Self::Dog,
            Self::Unicorn,
            Self::Dragon,
        ]
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Fox => "fox",
            Self::Owl => "owl",
            Self::Bear => "bear",
            Self::Rabbit => "rabbit",
            Self::Panda => "panda",
            Self::Koala => "koala",
            Self::Lion => "lion",
            Self::Tiger => "tiger",
            Self::Cat => "cat",
            Self::Dog => "dog",
            Self::Unicorn => "unicorn",
            Self::Dragon => "dragon",
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            Self::Fox => "🦊",
            Self::Owl => "🦉",
            Self::Bear => "🐻",
            Self::Rabbit => "🐰",
            Self::Panda => "🐼",
            Self::Koala => "🐨",
            Self::Lion => "🦁",
            Self::Tiger => "🐯",
            Self::Cat => "🐱",
            Self::Dog => "🐶",
            Self::Unicorn => "🦄",
            Self::Dragon => "🐲",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim().to_lowercase();
        Self::all().iter().copied().find(|a| a.name() == s)
    }
}

impl fmt::Display for Avatar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.emoji(), self.name())
    }
}

/// A user's profile (one per user)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub user_id: UserId,
    pub display_name: String,
    #[serde(default)]
    pub avatar: Avatar,
    #[serde(default)]
    pub monthly_income: Money,
    #[serde(default)]
    pub current_xp: u32,
    #[serde(default)]
    pub total_points: u32,
    #[serde(default)]
    pub current_streak: u32,
    #[serde(default)]
    pub onboarding_completed: bool,
    /// Shop item ids bought with points
    #[serde(default)]
    pub purchased_items: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Partial update of a profile; `None` leaves a field unchanged
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProfileUpdate {
    pub display_name: Option<String>,
    pub avatar: Option<Avatar>,
    pub monthly_income: Option<Money>,
    pub current_xp: Option<u32>,
    pub total_points: Option<u32>,
    pub current_streak: Option<u32>,
    pub onboarding_completed: Option<bool>,
    pub purchased_items: Option<Vec<String>>,
}

impl ProfileUpdate {
    pub fn validate(&self) -> Result<(), ProfileValidationError> {
        if let Some(name) = &self.display_name {
            if name.trim().chars().count() > MAX_DISPLAY_NAME_LEN {
                return Err(ProfileValidationError::NameTooLong(name.trim().chars().count()));
            }
        }
        if let Some(income) = self.monthly_income {
            if income.is_negative() {
                return Err(ProfileValidationError::NegativeIncome);
            }
            if income.exceeds_max() {
                return Err(ProfileValidationError::IncomeTooLarge);
            }
        }
        Ok(())
    }
}

impl Profile {
    pub fn new(user_id: UserId, display_name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            user_id,
            display_name: display_name.into(),
            avatar: Avatar::default(),
            monthly_income: Money::zero(),
            current_xp: 0,
            total_points: 0,
            current_streak: 0,
            onboarding_completed: false,
            purchased_items: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn apply(&mut self, update: &ProfileUpdate) {
        if let Some(name) = &update.display_name {
            self.display_name = name.trim().to_string();
        }
        if let Some(avatar) = update.avatar {
            self.avatar = avatar;
        }
        if let Some(income) = update.monthly_income {
            self.monthly_income = income;
        }
        if let Some(xp) = update.current_xp {
            self.current_xp = xp;
        }
        if let Some(points) = update.total_points {
            self.total_points = points;
        }
        if let Some(streak) = update.current_streak {
            self.current_streak = streak;
        }
        if let Some(done) = update.onboarding_completed {
            self.onboarding_completed = done;
        }
        if let Some(items) = &update.purchased_items {
            self.purchased_items = items.clone();
        }
        self.updated_at = Utc::now();
    }

    pub fn level(&self) -> u32 {
        1 + self.current_xp / XP_PER_LEVEL
    }

    pub fn level_progress(&self) -> LevelProgress {
        LevelProgress::from_xp(self.current_xp)
    }

    pub fn owns(&self, item_id: &str) -> bool {
        self.purchased_items.iter().any(|i| i == item_id)
    }
}

/// Where a profile stands within its current level
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LevelProgress {
    pub level: u32,
    pub xp_into_level: u32,
    pub xp_to_next_level: u32,
    pub percent: f64,
}

impl LevelProgress {
    pub fn from_xp(xp: u32) -> Self {
        let xp_into_level = xp % XP_PER_LEVEL;
        Self {
            level: 1 + xp / XP_PER_LEVEL,
            xp_into_level,
            xp_to_next_level: XP_PER_LEVEL - xp_into_level,
            percent: xp_into_level as f64 / XP_PER_LEVEL as f64 * 100.0,
        }
    }
}

/// Validation errors for profile edits
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProfileValidationError {
    NameTooLong(usize),
    NegativeIncome,
    IncomeTooLarge,
}

impl fmt::Display for ProfileValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NameTooLong(len) => write!(
                f,
                "Display name too long ({} chars, max {})",
                len, MAX_DISPLAY_NAME_LEN
            ),
            Self::NegativeIncome => write!(f, "Monthly income cannot be negative"),
            Self::IncomeTooLarge => write!(f, "Monthly income cannot exceed {}", Money::MAX),
        }
    }
}

impl std::error::Error for ProfileValidationError {}
