//! Transaction model
//!
//! Transactions are append-only: they are created and read, never edited.
//! Amounts are always positive; the transaction type decides the sign when
//! aggregated.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::{CategoryId, TransactionId, UserId};
use super::money::Money;

/// Whether money left or entered the user's pocket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    #[default]
    Expense,
    Income,
}

impl TransactionType {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "expense" | "e" => Some(Self::Expense),
            "income" | "i" => Some(Self::Income),
            _ => None,
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Expense => write!(f, "expense"),
            Self::Income => write!(f, "income"),
        }
    }
}

/// A recorded transaction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Unique identifier
    pub id: TransactionId,

    /// Owning user
    pub user_id: UserId,

    /// Category, or `None` for uncategorized
    pub category_id: Option<CategoryId>,

    /// Amount, always positive
    pub amount: Money,

    /// Expense or income
    #[serde(rename = "type")]
    pub kind: TransactionType,

    /// Merchant name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub merchant: Option<String>,

    /// Free-form description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Calendar date the money moved
    pub transaction_date: NaiveDate,

    /// When the record was created
    pub created_at: DateTime<Utc>,
}

/// Fields supplied when recording a transaction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewTransaction {
    pub category_id: Option<CategoryId>,
    pub amount: Money,
    #[serde(rename = "type")]
    pub kind: TransactionType,
    pub merchant: Option<String>,
    pub description: Option<String>,
    pub transaction_date: NaiveDate,
}

impl NewTransaction {
    /// An expense with no merchant or description
    pub fn expense(amount: Money, category_id: Option<CategoryId>, date: NaiveDate) -> Self {
        Self {
            category_id,
            amount,
            kind: TransactionType::Expense,
            merchant: None,
            description: None,
            transaction_date: date,
        }
    }

    /// An income entry with no merchant or description
    pub fn income(amount: Money, date: NaiveDate) -> Self {
        Self {
            category_id: None,
            amount,
            kind: TransactionType::Income,
            merchant: None,
            description: None,
            transaction_date: date,
        }
    }

    pub fn with_merchant(mut self, merchant: impl Into<String>) -> Self {
        self.merchant = Some(merchant.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn validate(&self) -> Result<(), TransactionValidationError> {
        if !self.amount.is_positive() {
            return Err(TransactionValidationError::NonPositiveAmount);
        }
        if self.amount.exceeds_max() {
            return Err(TransactionValidationError::AmountTooLarge);
        }
        Ok(())
    }
}

impl Transaction {
    /// Build a stored transaction from creation fields
    pub fn new(user_id: UserId, fields: NewTransaction) -> Self {
        Self {
            id: TransactionId::new(),
            user_id,
            category_id: fields.category_id,
            amount: fields.amount,
            kind: fields.kind,
            merchant: non_blank(fields.merchant),
            description: non_blank(fields.description),
            transaction_date: fields.transaction_date,
            created_at: Utc::now(),
        }
    }

    pub fn is_expense(&self) -> bool {
        self.kind == TransactionType::Expense
    }

    pub fn is_income(&self) -> bool {
        self.kind == TransactionType::Income
    }

    /// Amount with sign applied: negative for expenses
    pub fn signed_amount(&self) -> Money {
        match self.kind {
            TransactionType::Expense => -self.amount,
            TransactionType::Income => self.amount,
        }
    }

    /// Merchant, then description, then a generic label
    pub fn label(&self) -> &str {
        self.merchant
            .as_deref()
            .or(self.description.as_deref())
            .unwrap_or(match self.kind {
                TransactionType::Expense => "Expense",
                TransactionType::Income => "Income",
            })
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {}",
            self.transaction_date.format("%Y-%m-%d"),
            self.label(),
            self.signed_amount()
        )
    }
}

/// Validation errors for transactions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransactionValidationError {
    NonPositiveAmount,
    AmountTooLarge,
}

impl fmt::Display for TransactionValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonPositiveAmount => write!(f, "Transaction amount must be greater than zero"),
            Self::AmountTooLarge => {
                write!(f, "Transaction amount cannot exceed {}", Money::MAX)
            }
        }
    }
}

impl std::error::Error for TransactionValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, 15).unwrap()
    }

    #[test]
    fn test_expense_sign() {
        let txn = Transaction::new(
            UserId::new(),
            NewTransaction::expense(Money::from_units(50), None, today()),
        );
        assert!(txn.is_expense());
        assert_eq!(txn.signed_amount(), Money::from_units(-50));
    }

    #[test]
    fn test_income_sign() {
        let txn = Transaction::new(UserId::new(), NewTransaction::income(Money::from_units(900), today()));
        assert!(txn.is_income());
        assert_eq!(txn.signed_amount(), Money::from_units(900));
    }

    #[test]
    fn test_amount_must_be_positive() {
        let zero = NewTransaction::expense(Money::zero(), None, today());
        assert_eq!(zero.validate(), Err(TransactionValidationError::NonPositiveAmount));

        let negative = NewTransaction::expense(Money::from_cents(-1), None, today());
        assert!(negative.validate().is_err());
    }

    #[test]
    fn test_amount_is_capped() {
        let amount = Money::parse("90000000000000000").unwrap();
        let huge = NewTransaction::expense(amount, None, today());
        assert_eq!(huge.validate(), Err(TransactionValidationError::AmountTooLarge));
        assert!(NewTransaction::income(Money::MAX, today()).validate().is_ok());
    }

    #[test]
    fn test_label_fallbacks() {
        let user = UserId::new();
        let with_merchant = Transaction::new(
            user,
            NewTransaction::expense(Money::from_cents(545), None, today()).with_merchant("Starbucks"),
        );
        assert_eq!(with_merchant.label(), "Starbucks");

        let blank = Transaction::new(
            user,
            NewTransaction::expense(Money::from_cents(545), None, today()).with_merchant("  "),
        );
        assert_eq!(blank.merchant, None);
        assert_eq!(blank.label(), "Expense");
    }

    #[test]
    fn test_type_serializes_as_type_field() {
        let txn = Transaction::new(
            UserId::new(),
            NewTransaction::expense(Money::from_units(5), None, today()),
        );
        let json = serde_json::to_value(&txn).unwrap();
        assert_eq!(json["type"], "expense");
        assert_eq!(json["transaction_date"], "2025-01-15");
    }

    #[test]
    fn test_parse_type() {
        assert_eq!(TransactionType::parse("Income"), Some(TransactionType::Income));
        assert_eq!(TransactionType::parse("refund"), None);
    }
}
