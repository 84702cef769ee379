//! Custom error types for FinBud
//!
//! This module defines the error hierarchy for the application using thiserror
//! for ergonomic error definitions.

use thiserror::Error;

use crate::models::money::MoneyParseError;

/// The main error type for FinBud operations
#[derive(Error, Debug)]
pub enum FinbudError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Caller-supplied input failed a precondition
    #[error("Validation error: {0}")]
    Validation(String),

    /// Entity not found errors
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// Duplicate entity errors
    #[error("{entity_type} already exists: {identifier}")]
    Duplicate {
        entity_type: &'static str,
        identifier: String,
    },

    /// Completion attempted on a lesson whose predecessor is not complete
    #[error("Lesson is locked: {0}")]
    LessonLocked(String),

    /// Not enough points to buy a shop item
    #[error("Not enough tokens for '{item}': need {needed}, have {available}")]
    InsufficientPoints {
        item: String,
        needed: u32,
        available: u32,
    },

    /// Storage errors
    #[error("Storage error: {0}")]
    Storage(String),

    /// Export errors
    #[error("Export error: {0}")]
    Export(String),
}

impl FinbudError {
    /// Create a "not found" error for budget categories
    pub fn category_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Category",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for lessons
    pub fn lesson_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Lesson",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for savings goals
    pub fn goal_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Savings goal",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for profiles
    pub fn profile_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Profile",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for badges
    pub fn badge_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Badge",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for shop items
    pub fn shop_item_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Shop item",
            identifier: identifier.into(),
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

impl From<std::io::Error> for FinbudError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for FinbudError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

impl From<csv::Error> for FinbudError {
    fn from(err: csv::Error) -> Self {
        Self::Export(err.to_string())
    }
}

impl From<MoneyParseError> for FinbudError {
    fn from(err: MoneyParseError) -> Self {
        Self::Validation(err.to_string())
    }
}

/// Result type alias for FinBud operations
pub type FinbudResult<T> = Result<T, FinbudError>;
