//! Budget category model
//!
//! A category carries the user's monthly budget for one kind of spending,
//! along with the icon and color tags the presentation layer renders.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::{CategoryId, UserId};
use super::money::Money;

/// Maximum length of a category name
pub const MAX_CATEGORY_NAME_LEN: usize = 50;

/// A user's budget category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetCategory {
    /// Unique identifier
    pub id: CategoryId,

    /// Owning user
    pub user_id: UserId,

    /// Category name
    pub name: String,

    /// Budget per month
    pub budget_amount: Money,

    /// Icon tag (e.g. "utensils")
    #[serde(default)]
    pub icon: String,

    /// Color tag (e.g. "coral")
    #[serde(default)]
    pub color: String,

    /// When the category was created
    pub created_at: DateTime<Utc>,

    /// When the category was last modified
    pub updated_at: DateTime<Utc>,
}

/// Fields supplied when creating a category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewCategory {
    pub name: String,
    pub budget_amount: Money,
    #[serde(default)]
    pub icon: String,
    #[serde(default)]
    pub color: String,
}

impl NewCategory {
    pub fn new(name: impl Into<String>, budget_amount: Money) -> Self {
        Self {
            name: name.into(),
            budget_amount,
            icon: String::new(),
            color: String::new(),
        }
    }

    /// Set the icon and color tags
    pub fn with_style(mut self, icon: impl Into<String>, color: impl Into<String>) -> Self {
        self.icon = icon.into();
        self.color = color.into();
        self
    }

    /// Validate before anything is sent to the store
    pub fn validate(&self) -> Result<(), CategoryValidationError> {
        validate_name(&self.name)?;
        validate_budget(self.budget_amount)
    }
}

/// Partial update of a category; `None` leaves a field unchanged
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CategoryUpdate {
    pub name: Option<String>,
    pub budget_amount: Option<Money>,
    pub icon: Option<String>,
    pub color: Option<String>,
}

impl CategoryUpdate {
    /// An update that only changes the budget
    pub fn budget(amount: Money) -> Self {
        Self {
            budget_amount: Some(amount),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.budget_amount.is_none()
            && self.icon.is_none()
            && self.color.is_none()
    }

    pub fn validate(&self) -> Result<(), CategoryValidationError> {
        if let Some(name) = &self.name {
            validate_name(name)?;
        }
        if let Some(amount) = self.budget_amount {
            validate_budget(amount)?;
        }
        Ok(())
    }
}

impl BudgetCategory {
    /// Build a stored category from creation fields
    pub fn new(user_id: UserId, fields: NewCategory) -> Self {
        let now = Utc::now();
        Self {
            id: CategoryId::new(),
            user_id,
            name: fields.name.trim().to_string(),
            budget_amount: fields.budget_amount,
            icon: fields.icon,
            color: fields.color,
            created_at: now,
            updated_at: now,
        }
    }

    /// Apply a partial update in place
    pub fn apply(&mut self, update: &CategoryUpdate) {
        if let Some(name) = &update.name {
            self.name = name.trim().to_string();
        }
        if let Some(amount) = update.budget_amount {
            self.budget_amount = amount;
        }
        if let Some(icon) = &update.icon {
            self.icon = icon.clone();
        }
        if let Some(color) = &update.color {
            self.color = color.clone();
        }
        self.updated_at = Utc::now();
    }

    pub fn validate(&self) -> Result<(), CategoryValidationError> {
        validate_name(&self.name)?;
        validate_budget(self.budget_amount)
    }
}

fn validate_name(name: &str) -> Result<(), CategoryValidationError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(CategoryValidationError::EmptyName);
    }
    if name.chars().count() > MAX_CATEGORY_NAME_LEN {
        return Err(CategoryValidationError::NameTooLong(name.chars().count()));
    }
    Ok(())
}

fn validate_budget(amount: Money) -> Result<(), CategoryValidationError> {
    if amount.is_negative() {
        return Err(CategoryValidationError::NegativeBudget);
    }
    if amount.exceeds_max() {
        return Err(CategoryValidationError::BudgetTooLarge);
    }
    Ok(())
}

impl fmt::Display for BudgetCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Validation errors for categories
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryValidationError {
    EmptyName,
    NameTooLong(usize),
    NegativeBudget,
    BudgetTooLarge,
}

impl fmt::Display for CategoryValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Category name cannot be empty"),
            Self::NameTooLong(len) => write!(
                f,
                "Category name too long ({} chars, max {})",
                len, MAX_CATEGORY_NAME_LEN
            ),
            Self::NegativeBudget => write!(f, "Budget amount cannot be negative"),
            Self::BudgetTooLarge => write!(f, "Budget amount cannot exceed {}", Money::MAX),
        }
    }
}

impl std::error::Error for CategoryValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_category_trims_name() {
        let user = UserId::new();
        let category = BudgetCategory::new(
            user,
            NewCategory::new("  Food  ", Money::from_units(400)).with_style("utensils", "coral"),
        );
        assert_eq!(category.name, "Food");
        assert_eq!(category.user_id, user);
        assert_eq!(category.icon, "utensils");
        assert!(category.validate().is_ok());
    }

    #[test]
    fn test_validation() {
        assert_eq!(
            NewCategory::new("", Money::zero()).validate(),
            Err(CategoryValidationError::EmptyName)
        );
        assert_eq!(
            NewCategory::new("Food", Money::from_cents(-1)).validate(),
            Err(CategoryValidationError::NegativeBudget)
        );
        assert!(matches!(
            NewCategory::new("a".repeat(51), Money::zero()).validate(),
            Err(CategoryValidationError::NameTooLong(51))
        ));
        assert!(NewCategory::new("Rent", Money::zero()).validate().is_ok());
        assert_eq!(
            NewCategory::new("Rent", Money::parse("30000000000000000").unwrap()).validate(),
            Err(CategoryValidationError::BudgetTooLarge)
        );
        assert!(NewCategory::new("Rent", Money::MAX).validate().is_ok());
    }

    #[test]
    fn test_apply_update() {
        let mut category =
            BudgetCategory::new(UserId::new(), NewCategory::new("Food", Money::from_units(400)));
        let update = CategoryUpdate::budget(Money::from_units(450));
        assert!(update.validate().is_ok());
        category.apply(&update);
        assert_eq!(category.budget_amount, Money::from_units(450));
        assert_eq!(category.name, "Food");
    }

    #[test]
    fn test_update_validation_and_emptiness() {
        assert!(CategoryUpdate::default().is_empty());
        let bad = CategoryUpdate {
            budget_amount: Some(Money::from_cents(-100)),
            ..CategoryUpdate::default()
        };
        assert_eq!(bad.validate(), Err(CategoryValidationError::NegativeBudget));
    }
}
