//! Profile repository (profiles.json), one row per user

use std::path::PathBuf;

use crate::error::FinbudError;
use crate::models::{Profile, UserId};

use super::table::{JsonTable, Keyed};

impl Keyed for Profile {
    type Key = UserId;

    fn key(&self) -> UserId {
        self.user_id
    }
}

pub struct ProfileRepository {
    table: JsonTable<Profile>,
}

impl ProfileRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            table: JsonTable::new(path, |a, b| a.created_at.cmp(&b.created_at)),
        }
    }

    pub fn load(&self) -> Result<usize, FinbudError> {
        self.table.load()
    }

    pub fn get(&self, user: UserId) -> Result<Option<Profile>, FinbudError> {
        self.table.get(&user)
    }

    /// Insert or replace, then persist; nothing changes in memory if the write fails
    pub fn commit(&self, profile: Profile) -> Result<(), FinbudError> {
        self.table.commit(profile).map(|_| ())
    }
}
