//! Browser localStorage backend (hydrate builds only).
//!
//! SYSTEM CONTEXT
//! ==============
//! Wraps `window.localStorage` behind [`DraftStore`] so the autosave state
//! machine stays testable off-browser. Outside hydrate builds reads see an
//! empty store and writes report `Unavailable`; the autosave layer logs and
//! carries on, since a draft that only lives in memory is still a working
//! draft.

#[cfg(test)]
#[path = "local_test.rs"]
mod local_test;

use super::{DraftStore, StoreError};

/// [`DraftStore`] over `window.localStorage`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStorage;

impl LocalStorage {
    pub fn new() -> Self {
        Self
    }

    #[cfg(feature = "hydrate")]
    fn storage() -> Result<web_sys::Storage, StoreError> {
        web_sys::window()
            .and_then(|w| w.local_storage().ok().flatten())
            .ok_or(StoreError::Unavailable)
    }
}

impl DraftStore for LocalStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        #[cfg(feature = "hydrate")]
        {
            Self::storage()?.get_item(key).map_err(|e| StoreError::Read {
                key: key.to_owned(),
                reason: format!("{e:?}"),
            })
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = key;
            Ok(None)
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        #[cfg(feature = "hydrate")]
        {
            Self::storage()?.set_item(key, value).map_err(|e| StoreError::Write {
                key: key.to_owned(),
                reason: format!("{e:?}"),
            })
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (key, value);
            Err(StoreError::Unavailable)
        }
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        #[cfg(feature = "hydrate")]
        {
            Self::storage()?.remove_item(key).map_err(|e| StoreError::Remove {
                key: key.to_owned(),
                reason: format!("{e:?}"),
            })
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = key;
            Err(StoreError::Unavailable)
        }
    }
}
