//! Savings goal model
//!
//! A goal accumulates contributions toward a target. Completion is derived
//! from the amounts and never stored.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::{GoalId, UserId};
use super::money::Money;

/// A user's savings goal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavingsGoal {
    pub id: GoalId,
    pub user_id: UserId,
    pub name: String,
    pub target_amount: Money,
    pub current_amount: Money,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deadline: Option<NaiveDate>,
    #[serde(default)]
    pub icon: String,
    pub created_at: DateTime<Utc>,
}

/// Fields supplied when creating a goal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewGoal {
    pub name: String,
    pub target_amount: Money,
    pub deadline: Option<NaiveDate>,
    #[serde(default)]
    pub icon: String,
}

impl NewGoal {
    pub fn new(name: impl Into<String>, target_amount: Money) -> Self {
        Self {
            name: name.into(),
            target_amount,
            deadline: None,
            icon: String::new(),
        }
    }

    pub fn with_deadline(mut self, deadline: NaiveDate) -> Self {
        self.deadline = Some(deadline);
        self
    }

    pub fn validate(&self) -> Result<(), GoalValidationError> {
        if self.name.trim().is_empty() {
            return Err(GoalValidationError::EmptyName);
        }
        if !self.target_amount.is_positive() {
            return Err(GoalValidationError::NonPositiveTarget);
        }
        if self.target_amount.exceeds_max() {
            return Err(GoalValidationError::AmountTooLarge);
        }
        Ok(())
    }
}

/// Partial update of a goal; `None` leaves a field unchanged
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GoalUpdate {
    pub name: Option<String>,
    pub target_amount: Option<Money>,
    pub current_amount: Option<Money>,
    /// `Some(None)` clears the deadline
    pub deadline: Option<Option<NaiveDate>>,
}

impl GoalUpdate {
    pub fn current_amount(amount: Money) -> Self {
        Self {
            current_amount: Some(amount),
            ..Self::default()
        }
    }
}

impl SavingsGoal {
    pub fn new(user_id: UserId, fields: NewGoal) -> Self {
        Self {
            id: GoalId::new(),
            user_id,
            name: fields.name.trim().to_string(),
            target_amount: fields.target_amount,
            current_amount: Money::zero(),
            deadline: fields.deadline,
            icon: fields.icon,
            created_at: Utc::now(),
        }
    }

    pub fn apply(&mut self, update: &GoalUpdate) {
        if let Some(name) = &update.name {
            self.name = name.trim().to_string();
        }
        if let Some(target) = update.target_amount {
            self.target_amount = target;
        }
        if let Some(current) = update.current_amount {
            self.current_amount = current;
        }
        if let Some(deadline) = update.deadline {
            self.deadline = deadline;
        }
    }

    /// Progress toward the target, capped at 100
    pub fn progress_percent(&self) -> f64 {
        if !self.target_amount.is_positive() {
            return 0.0;
        }
        self.current_amount.percent_of(self.target_amount).min(100.0)
    }

    pub fn is_complete(&self) -> bool {
        self.target_amount.is_positive() && self.current_amount >= self.target_amount
    }

    /// Amount still needed; zero once complete
    pub fn remaining(&self) -> Money {
        if self.is_complete() {
            Money::zero()
        } else {
            self.target_amount - self.current_amount
        }
    }

    /// Days until the deadline (negative when passed)
    pub fn days_left(&self, today: NaiveDate) -> Option<i64> {
        self.deadline.map(|d| (d - today).num_days())
    }
}

impl fmt::Display for SavingsGoal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({} / {})", self.name, self.current_amount, self.target_amount)
    }
}

/// Validation errors for goals
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GoalValidationError {
    EmptyName,
    NonPositiveTarget,
    NonPositiveContribution,
    AmountTooLarge,
}

impl fmt::Display for GoalValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Goal name cannot be empty"),
            Self::NonPositiveTarget => write!(f, "Goal target must be greater than zero"),
            Self::NonPositiveContribution => {
                write!(f, "Contribution must be greater than zero")
            }
            Self::AmountTooLarge => write!(f, "Goal amounts cannot exceed {}", Money::MAX),
        }
    }
}

impl std::error::Error for GoalValidationError {}
