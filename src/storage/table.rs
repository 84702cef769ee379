//! In-memory table backed by one JSON file
//!
//! Rows live in a `RwLock<HashMap>` keyed by the record's id and are written
//! back whole, in a stable order, on every save.

use std::cmp::Ordering;
use std::collections::HashMap;
use std::hash::Hash;
use std::path::PathBuf;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use serde::{de::DeserializeOwned, Deserialize, Serialize};

use crate::error::FinbudError;

use super::file_io::{read_json, write_json_atomic};

/// A record that can be stored in a [`JsonTable`]
pub trait Keyed {
    type Key: Eq + Hash;

    fn key(&self) -> Self::Key;
}

#[derive(Debug, Serialize, Deserialize)]
struct TableFile<V> {
    #[serde(default = "Vec::new")]
    records: Vec<V>,
}

impl<V> Default for TableFile<V> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
        }
    }
}

pub struct JsonTable<V: Keyed> {
    path: PathBuf,
    rows: RwLock<HashMap<V::Key, V>>,
    order: fn(&V, &V) -> Ordering,
}

impl<V> JsonTable<V>
where
    V: Keyed + Clone + Serialize + DeserializeOwned,
{
    /// `order` fixes both the file layout and the order of query results
    pub fn new(path: PathBuf, order: fn(&V, &V) -> Ordering) -> Self {
        Self {
            path,
            rows: RwLock::new(HashMap::new()),
            order,
        }
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, HashMap<V::Key, V>>, FinbudError> {
        self.rows
            .read()
            .map_err(|e| FinbudError::Storage(format!("Failed to acquire read lock: {}", e)))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, HashMap<V::Key, V>>, FinbudError> {
        self.rows
            .write()
            .map_err(|e| FinbudError::Storage(format!("Failed to acquire write lock: {}", e)))
    }

    /// Replace the in-memory rows with the file's contents
    pub fn load(&self) -> Result<usize, FinbudError> {
        let file: TableFile<V> = read_json(&self.path)?;
        let mut rows = self.write()?;
        rows.clear();
        for record in file.records {
            rows.insert(record.key(), record);
        }
        Ok(rows.len())
    }

    pub fn save(&self) -> Result<(), FinbudError> {
        let records = self.select(|_| true)?;
        write_json_atomic(&self.path, &TableFile { records })
    }

    pub fn get(&self, key: &V::Key) -> Result<Option<V>, FinbudError> {
        Ok(self.read()?.get(key).cloned())
    }

    /// Rows matching `pred`, in table order
    pub fn select(&self, pred: impl Fn(&V) -> bool) -> Result<Vec<V>, FinbudError> {
        let rows = self.read()?;
        let mut list: Vec<V> = rows.values().filter(|r| pred(r)).cloned().collect();
        list.sort_by(self.order);
        Ok(list)
    }

    pub fn find(&self, pred: impl Fn(&V) -> bool) -> Result<Option<V>, FinbudError> {
        Ok(self.read()?.values().find(|r| pred(r)).cloned())
    }

    /// Insert or replace by key; returns the previous row
    pub fn upsert(&self, record: V) -> Result<Option<V>, FinbudError> {
        Ok(self.write()?.insert(record.key(), record))
    }

    pub fn remove(&self, key: &V::Key) -> Result<Option<V>, FinbudError> {
        Ok(self.write()?.remove(key))
    }

    /// Upsert and save; the previous row is restored if the save fails
    pub fn commit(&self, record: V) -> Result<Option<V>, FinbudError> {
        let key = record.key();
        let previous = self.upsert(record)?;

        if let Err(e) = self.save() {
            let mut rows = self.write()?;
            match previous {
                Some(prior) => {
                    rows.insert(key, prior);
                }
                None => {
                    rows.remove(&key);
                }
            }
            return Err(e);
        }
        Ok(previous)
    }

    /// Remove and save; the row is put back if the save fails
    pub fn commit_remove(&self, key: &V::Key) -> Result<Option<V>, FinbudError> {
        let Some(removed) = self.remove(key)? else {
            return Ok(None);
        };

        if let Err(e) = self.save() {
            self.write()?.insert(removed.key(), removed);
            return Err(e);
        }
        Ok(Some(removed))
    }

    pub fn count(&self) -> Result<usize, FinbudError> {
        Ok(self.read()?.len())
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }
}
