//! FinBud - gamified personal finance core
//!
//! This library provides budgets aggregated over week, month and semester
//! windows, savings goals, and a financial-literacy learning path whose
//! lessons unlock in order and pay out points once.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Core data models (categories, transactions, lessons, goals, ...)
//! - `storage`: The `RecordStore` gateway and its JSON file implementation
//! - `services`: Business logic, one service per area, scoped to a user
//! - `reports`: Budget aggregation
//! - `audit`: Audit logging system
//! - `export`: CSV and JSON export
//! - `display`, `cli`: Terminal rendering and command handlers
//!
//! # Example
//!
//! ```rust,ignore
//! use finbud::config::{paths::FinbudPaths, settings::Settings};
//! use finbud::services::BudgetService;
//! use finbud::storage::Storage;
//!
//! let paths = FinbudPaths::new()?;
//! let settings = Settings::load_or_create(&paths)?;
//! let storage = Storage::open(paths)?;
//! let summary = BudgetService::new(&storage, settings.active_user)
//!     .summary(settings.default_period, chrono::Local::now().date_naive())?;
//! ```

pub mod audit;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod models;
pub mod reports;
pub mod services;
pub mod storage;

pub use error::{FinbudError, FinbudResult};
