//! Savings goal service

use chrono::NaiveDate;
use serde::Serialize;
use tracing::info;

use crate::error::{FinbudError, FinbudResult};
use crate::models::goal::GoalValidationError;
use crate::models::{GoalId, GoalUpdate, Money, NewGoal, SavingsGoal, UserId};
use crate::storage::RecordStore;

/// A goal with its derived figures
#[derive(Debug, Clone, Serialize)]
pub struct GoalView {
    pub goal: SavingsGoal,
    pub progress_percent: f64,
    pub is_complete: bool,
    pub remaining: Money,
    pub days_left: Option<i64>,
}

impl GoalView {
    pub fn new(goal: SavingsGoal, today: NaiveDate) -> Self {
        Self {
            progress_percent: goal.progress_percent(),
            is_complete: goal.is_complete(),
            remaining: goal.remaining(),
            days_left: goal.days_left(today),
            goal,
        }
    }
}

/// Result of a contribution
#[derive(Debug, Clone)]
pub struct ContributionOutcome {
    pub goal: SavingsGoal,
    /// True only for the contribution that crossed the target
    pub completed_now: bool,
}

/// Service for savings goals
pub struct GoalService<'a> {
    store: &'a dyn RecordStore,
    user: UserId,
}

impl<'a> GoalService<'a> {
    pub fn new(store: &'a dyn RecordStore, user: UserId) -> Self {
        Self { store, user }
    }

    /// Goals, newest first
    pub fn list(&self) -> FinbudResult<Vec<SavingsGoal>> {
        self.store.list_goals(self.user)
    }

    pub fn views(&self, today: NaiveDate) -> FinbudResult<Vec<GoalView>> {
        Ok(self
            .list()?
            .into_iter()
            .map(|g| GoalView::new(g, today))
            .collect())
    }

    /// Find a goal by full id, short id or name (case-insensitive)
    pub fn find(&self, identifier: &str) -> FinbudResult<Option<SavingsGoal>> {
        let wanted = identifier.trim();
        let lower = wanted.to_lowercase();
        let parsed: Option<GoalId> = wanted.parse().ok();

        Ok(self.list()?.into_iter().find(|g| {
            Some(g.id) == parsed || g.id.short() == wanted || g.name.to_lowercase() == lower
        }))
    }

    pub fn get(&self, identifier: &str) -> FinbudResult<SavingsGoal> {
        self.find(identifier)?
            .ok_or_else(|| FinbudError::goal_not_found(identifier))
    }

    pub fn create(&self, new: NewGoal) -> FinbudResult<SavingsGoal> {
        new.validate()
            .map_err(|e| FinbudError::Validation(e.to_string()))?;

        let goal = self.store.insert_goal(self.user, new)?;
        info!(goal = %goal.name, target = %goal.target_amount, "goal created");
        Ok(goal)
    }

    /// Add `amount` to a goal's balance
    ///
    /// The amount must be positive and the new balance may not exceed
    /// [`Money::MAX`]. `completed_now` is set only when this
    /// contribution moves the goal from incomplete to complete.
    pub fn contribute(&self, id: GoalId, amount: Money) -> FinbudResult<ContributionOutcome> {
        if !amount.is_positive() {
            return Err(FinbudError::Validation(
                GoalValidationError::NonPositiveContribution.to_string(),
            ));
        }

        let goal = self
            .list()?
            .into_iter()
            .find(|g| g.id == id)
            .ok_or_else(|| FinbudError::goal_not_found(id.to_string()))?;
        let was_complete = goal.is_complete();

        let balance = goal
            .current_amount
            .checked_add(amount)
            .filter(|b| !b.exceeds_max())
            .ok_or_else(|| {
                FinbudError::Validation(GoalValidationError::AmountTooLarge.to_string())
            })?;

        let updated = self
            .store
            .update_goal(self.user, id, &GoalUpdate::current_amount(balance))?;
        let completed_now = !was_complete && updated.is_complete();

        info!(goal = %updated.name, %amount, balance = %updated.current_amount, "contribution added");
        if completed_now {
            info!(goal = %updated.name, "goal reached");
        }

        Ok(ContributionOutcome {
            goal: updated,
            completed_now,
        })
    }

    /// Parse user input, then contribute
    pub fn contribute_input(&self, id: GoalId, input: &str) -> FinbudResult<ContributionOutcome> {
        let amount = Money::parse(input)?;
        self.contribute(id, amount)
    }

    pub fn delete(&self, id: GoalId) -> FinbudResult<()> {
        self.store.delete_goal(self.user, id)?;
        info!(goal = %id.short(), "goal deleted");
        Ok(())
    }
}
