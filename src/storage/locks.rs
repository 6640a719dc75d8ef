//! Per-collection write locks
//!
//! Each collection name maps to one mutex for the lifetime of the store.
//! The registry map has its own lock, held only for the lookup or insert.
//! Entries are never removed.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;

/// Handle serializing writers of one collection
pub type CollectionLock = Arc<Mutex<()>>;

#[derive(Debug, Default)]
pub struct LockRegistry {
    locks: Mutex<HashMap<String, CollectionLock>>,
}

impl LockRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the lock for `collection`, creating it on first use
    pub fn get_or_create(&self, collection: &str) -> CollectionLock {
        let mut locks = self.locks.lock();

        if let Some(lock) = locks.get(collection) {
            return Arc::clone(lock);
        }

        let lock = CollectionLock::default();
        locks.insert(collection.to_string(), Arc::clone(&lock));
        lock
    }

    /// Number of collections that have been locked so far
    pub fn len(&self) -> usize {
        self.locks.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
