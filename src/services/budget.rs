//! Budget service
//!
//! Category and transaction management plus the period summary.

use chrono::NaiveDate;
use tracing::info;

use crate::error::{FinbudError, FinbudResult};
use crate::models::{
    BudgetCategory, CategoryId, CategoryUpdate, NewCategory, NewTransaction, ReportingPeriod,
    Transaction, UserId,
};
use crate::reports::BudgetSummary;
use crate::storage::RecordStore;

/// Service for budget categories and transactions
pub struct BudgetService<'a> {
    store: &'a dyn RecordStore,
    user: UserId,
}

impl<'a> BudgetService<'a> {
    pub fn new(store: &'a dyn RecordStore, user: UserId) -> Self {
        Self { store, user }
    }

    pub fn list_categories(&self) -> FinbudResult<Vec<BudgetCategory>> {
        self.store.list_categories(self.user)
    }

    /// Transactions, most recent first, optionally capped
    pub fn list_transactions(&self, limit: Option<usize>) -> FinbudResult<Vec<Transaction>> {
        let mut transactions = self.store.list_transactions(self.user)?;
        if let Some(limit) = limit {
            transactions.truncate(limit);
        }
        Ok(transactions)
    }

    /// Find a category by name (case-insensitive), full id or short id
    pub fn find_category(&self, identifier: &str) -> FinbudResult<Option<BudgetCategory>> {
        let wanted = identifier.trim();
        let lower = wanted.to_lowercase();
        let parsed: Option<CategoryId> = wanted.parse().ok();

        Ok(self.list_categories()?.into_iter().find(|c| {
            c.name.to_lowercase() == lower
                || Some(c.id) == parsed
                || c.id.short() == wanted
        }))
    }

    pub fn get_category(&self, identifier: &str) -> FinbudResult<BudgetCategory> {
        self.find_category(identifier)?
            .ok_or_else(|| FinbudError::category_not_found(identifier))
    }

    pub fn add_category(&self, new: NewCategory) -> FinbudResult<BudgetCategory> {
        new.validate()
            .map_err(|e| FinbudError::Validation(e.to_string()))?;

        if self.find_category(&new.name)?.is_some() {
            return Err(FinbudError::Duplicate {
                entity_type: "Category",
                identifier: new.name.trim().to_string(),
            });
        }

        let category = self.store.insert_category(self.user, new)?;
        info!(category = %category.name, budget = %category.budget_amount, "category added");
        Ok(category)
    }

    pub fn update_category(
        &self,
        id: CategoryId,
        update: &CategoryUpdate,
    ) -> FinbudResult<BudgetCategory> {
        if update.is_empty() {
            return Err(FinbudError::Validation("Nothing to update".into()));
        }
        update
            .validate()
            .map_err(|e| FinbudError::Validation(e.to_string()))?;

        if let Some(name) = &update.name {
            if let Some(existing) = self.find_category(name)? {
                if existing.id != id {
                    return Err(FinbudError::Duplicate {
                        entity_type: "Category",
                        identifier: name.trim().to_string(),
                    });
                }
            }
        }

        let category = self.store.update_category(self.user, id, update)?;
        info!(category = %category.name, "category updated");
        Ok(category)
    }

    /// Record an expense or income
    ///
    /// A category id, when given, must name one of the user's categories.
    pub fn add_transaction(&self, new: NewTransaction) -> FinbudResult<Transaction> {
        new.validate()
            .map_err(|e| FinbudError::Validation(e.to_string()))?;

        if let Some(category_id) = new.category_id {
            let known = self
                .list_categories()?
                .iter()
                .any(|c| c.id == category_id);
            if !known {
                return Err(FinbudError::category_not_found(category_id.to_string()));
            }
        }

        let transaction = self.store.insert_transaction(self.user, new)?;
        info!(
            kind = %transaction.kind,
            amount = %transaction.amount,
            date = %transaction.transaction_date,
            "transaction added"
        );
        Ok(transaction)
    }

    pub fn summary(&self, period: ReportingPeriod, today: NaiveDate) -> FinbudResult<BudgetSummary> {
        let categories = self.list_categories()?;
        let transactions = self.store.list_transactions(self.user)?;
        Ok(BudgetSummary::generate(
            &categories,
            &transactions,
            period,
            today,
        ))
    }
}
