//! Service layer for FinBud
//!
//! Services validate input, call the [`crate::storage::RecordStore`] and return
//! typed views. Each one is scoped to a single user.

pub mod badge;
pub mod budget;
pub mod goal;
pub mod learning;
pub mod onboarding;
pub mod profile;
pub mod shop;

pub use badge::{BadgeService, BadgeStatus};
pub use budget::BudgetService;
pub use goal::{ContributionOutcome, GoalService, GoalView};
pub use learning::{
    LearningService, LearningSnapshot, LearningTotals, LessonCompletion, LessonState, LessonView,
    ModuleProgress,
};
pub use onboarding::{OnboardingInput, OnboardingPlan, OnboardingResult, OnboardingService};
pub use profile::ProfileService;
pub use shop::{Purchase, ShopListing, ShopService};
