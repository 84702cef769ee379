//! Core data models for FinBud
//!
//! Records mirrored from the store (categories, transactions, lessons,
//! progress, goals, profiles, badges) plus the static catalogs.

pub mod badge;
pub mod category;
pub mod goal;
pub mod ids;
pub mod lesson;
pub mod money;
pub mod period;
pub mod profile;
pub mod progress;
pub mod shop;
pub mod transaction;

pub use badge::{Badge, UserBadge};
pub use category::{BudgetCategory, CategoryUpdate, NewCategory};
pub use goal::{GoalUpdate, NewGoal, SavingsGoal};
pub use ids::{CategoryId, GoalId, LessonId, ProgressId, TransactionId, UserBadgeId, UserId};
pub use lesson::{LearningModule, LessonContent, PointsFormula, Quiz};
pub use money::Money;
pub use period::{PeriodWindow, ReportingPeriod};
pub use profile::{Avatar, LevelProgress, Profile, ProfileUpdate};
pub use progress::LearningProgress;
pub use shop::{ShopCategory, ShopItem};
pub use transaction::{NewTransaction, Transaction, TransactionType};
