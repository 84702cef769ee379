//! Onboarding
//!
//! Turns a monthly income into a starter budget and applies it together with
//! the profile setup.

use serde::Serialize;
use tracing::info;

use crate::error::{FinbudError, FinbudResult};
use crate::models::{
    Avatar, BudgetCategory, CategoryUpdate, Money, NewCategory, Profile, ProfileUpdate, UserId,
};
use crate::storage::RecordStore;

/// Default categories as (name, percent of income, icon, color)
const DEFAULT_SPLIT: &[(&str, i64, &str, &str)] = &[
    ("Food & Dining", 25, "utensils", "coral"),
    ("Rent/Housing", 35, "home", "blue"),
    ("Transport", 10, "car", "green"),
    ("Shopping", 15, "shopping-bag", "purple"),
    ("Entertainment", 10, "film", "gold"),
    ("Subscriptions", 5, "smartphone", "blue"),
];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlannedCategory {
    pub name: String,
    pub percent: i64,
    pub icon: String,
    pub color: String,
    pub amount: Money,
}

/// Proposed budget split for a monthly income
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OnboardingPlan {
    pub income: Money,
    pub categories: Vec<PlannedCategory>,
}

impl OnboardingPlan {
    /// Each share rounded to whole currency units
    pub fn from_income(income: Money) -> Self {
        let categories = DEFAULT_SPLIT
            .iter()
            .map(|(name, percent, icon, color)| PlannedCategory {
                name: name.to_string(),
                percent: *percent,
                icon: icon.to_string(),
                color: color.to_string(),
                amount: income.scale(*percent, 100).round_to_units(),
            })
            .collect();
        Self { income, categories }
    }

    /// Override one category's amount by name
    pub fn set_amount(&mut self, name: &str, amount: Money) -> FinbudResult<()> {
        if amount.is_negative() {
            return Err(FinbudError::Validation(
                "Budget amount cannot be negative".into(),
            ));
        }
        let planned = self
            .categories
            .iter_mut()
            .find(|c| c.name.eq_ignore_ascii_case(name.trim()))
            .ok_or_else(|| FinbudError::category_not_found(name))?;
        planned.amount = amount;
        Ok(())
    }

    pub fn total(&self) -> Money {
        self.categories.iter().map(|c| c.amount).sum()
    }

    pub fn exceeds_income(&self) -> bool {
        self.total() > self.income
    }
}

/// Everything collected by the onboarding flow
#[derive(Debug, Clone)]
pub struct OnboardingInput {
    pub display_name: Option<String>,
    pub avatar: Avatar,
    pub plan: OnboardingPlan,
}

#[derive(Debug, Clone)]
pub struct OnboardingResult {
    pub profile: Profile,
    pub created: Vec<BudgetCategory>,
    pub updated: Vec<BudgetCategory>,
}

pub struct OnboardingService<'a> {
    store: &'a dyn RecordStore,
    user: UserId,
}

impl<'a> OnboardingService<'a> {
    pub fn new(store: &'a dyn RecordStore, user: UserId) -> Self {
        Self { store, user }
    }

    /// Save the profile, then create or update one category per planned line
    ///
    /// A category whose name matches a planned line (case-insensitive) has its
    /// budget replaced; the rest are inserted.
    pub fn complete(&self, input: OnboardingInput) -> FinbudResult<OnboardingResult> {
        let profile_update = ProfileUpdate {
            display_name: input
                .display_name
                .map(|n| n.trim().to_string())
                .filter(|n| !n.is_empty()),
            avatar: Some(input.avatar),
            monthly_income: Some(input.plan.income),
            onboarding_completed: Some(true),
            ..ProfileUpdate::default()
        };
        profile_update
            .validate()
            .map_err(|e| FinbudError::Validation(e.to_string()))?;
        for planned in &input.plan.categories {
            NewCategory::new(planned.name.clone(), planned.amount)
                .validate()
                .map_err(|e| FinbudError::Validation(e.to_string()))?;
        }

        let profile = self.store.update_profile(self.user, &profile_update)?;

        let existing = self.store.list_categories(self.user)?;
        let mut created = Vec::new();
        let mut updated = Vec::new();

        for planned in input.plan.categories {
            let matching = existing
                .iter()
                .find(|c| c.name.eq_ignore_ascii_case(&planned.name));
            match matching {
                Some(category) => updated.push(self.store.update_category(
                    self.user,
                    category.id,
                    &CategoryUpdate::budget(planned.amount),
                )?),
                None => created.push(self.store.insert_category(
                    self.user,
                    NewCategory::new(planned.name, planned.amount)
                        .with_style(planned.icon, planned.color),
                )?),
            }
        }

        info!(
            created = created.len(),
            updated = updated.len(),
            income = %profile.monthly_income,
            "onboarding completed"
        );

        Ok(OnboardingResult {
            profile,
            created,
            updated,
        })
    }
}
