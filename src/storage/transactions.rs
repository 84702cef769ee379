//! Transaction repository (transactions.json)

use std::path::PathBuf;

use crate::error::FinbudError;
use crate::models::{Transaction, TransactionId, UserId};

use super::table::{JsonTable, Keyed};

impl Keyed for Transaction {
    type Key = TransactionId;

    fn key(&self) -> TransactionId {
        self.id
    }
}

pub struct TransactionRepository {
    table: JsonTable<Transaction>,
}

impl TransactionRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            // Newest first; same-day entries by entry time
            table: JsonTable::new(path, |a, b| {
                b.transaction_date
                    .cmp(&a.transaction_date)
                    .then_with(|| b.created_at.cmp(&a.created_at))
            }),
        }
    }

    pub fn load(&self) -> Result<usize, FinbudError> {
        self.table.load()
    }

    /// A user's transactions ordered by date, most recent first
    pub fn for_user(&self, user: UserId) -> Result<Vec<Transaction>, FinbudError> {
        self.table.select(|t| t.user_id == user)
    }

    /// Insert or replace, then persist; nothing changes in memory if the write fails
    pub fn commit(&self, transaction: Transaction) -> Result<(), FinbudError> {
        self.table.commit(transaction).map(|_| ())
    }

    pub fn count(&self) -> Result<usize, FinbudError> {
        self.table.count()
    }
}
