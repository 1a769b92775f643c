//! In-memory store backend for native tests and non-browser callers.

#[cfg(test)]
#[path = "memory_test.rs"]
mod memory_test;

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use super::{DraftStore, StoreError};

/// `HashMap`-backed [`DraftStore`].
///
/// Clones share one underlying map, mirroring how every [`super::LocalStorage`]
/// handle sees the same browser store. The failure flags simulate a
/// misbehaving backend (quota exhaustion and kin): while set, the matching
/// operation is rejected without touching the map.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    inner: Rc<RefCell<Inner>>,
}

#[derive(Debug, Default)]
struct Inner {
    entries: HashMap<String, String>,
    fail_writes: bool,
    fail_removes: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject all subsequent writes while `fail` is set.
    pub fn fail_writes(&self, fail: bool) {
        self.inner.borrow_mut().fail_writes = fail;
    }

    /// Reject all subsequent removals while `fail` is set.
    pub fn fail_removes(&self, fail: bool) {
        self.inner.borrow_mut().fail_removes = fail;
    }

    pub fn contains(&self, key: &str) -> bool {
        self.inner.borrow().entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.inner.borrow().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.borrow().entries.is_empty()
    }
}

impl DraftStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.inner.borrow().entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut inner = self.inner.borrow_mut();
        if inner.fail_writes {
            return Err(StoreError::Write {
                key: key.to_owned(),
                reason: "write failure injected".to_owned(),
            });
        }
        inner.entries.insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        let mut inner = self.inner.borrow_mut();
        if inner.fail_removes {
            return Err(StoreError::Remove {
                key: key.to_owned(),
                reason: "remove failure injected".to_owned(),
            });
        }
        inner.entries.remove(key);
        Ok(())
    }
}
