//! Durable key-value storage seam for client-side drafts.
//!
//! SYSTEM CONTEXT
//! ==============
//! `record` defines the JSON payload written under each draft key, `local`
//! wraps browser localStorage (hydrate builds only), and `memory` backs
//! native tests and non-browser callers. The [`DraftStore`] trait is the
//! seam between the autosave state machine and whichever backend the
//! environment provides.

pub mod local;
pub mod memory;
pub mod record;

pub use local::LocalStorage;
pub use memory::MemoryStore;
pub use record::{DraftRecord, RecordError};

use thiserror::Error;

/// Failures surfaced by a [`DraftStore`] backend.
///
/// All of these are recoverable: the autosave layer logs them and keeps the
/// in-memory draft, so no store failure crosses the public API.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The environment has no usable storage (no window, storage disabled).
    #[error("draft storage is unavailable in this environment")]
    Unavailable,

    /// A read failed before a value could be produced.
    #[error("draft storage read failed for {key}: {reason}")]
    Read { key: String, reason: String },

    /// A write was rejected, e.g. quota exhaustion.
    #[error("draft storage write failed for {key}: {reason}")]
    Write { key: String, reason: String },

    /// A removal failed; the entry may still exist.
    #[error("draft storage remove failed for {key}: {reason}")]
    Remove { key: String, reason: String },
}

/// Synchronous key-value store drafts are persisted to.
///
/// Browser localStorage semantics are assumed: one value per key, writes
/// atomic from the caller's perspective, operations local and fast.
pub trait DraftStore {
    /// Fetch the raw value for `key`, or `None` when absent.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Write `value` under `key`, replacing any previous value.
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Delete the value under `key`. Removing an absent key is not an error.
    fn remove(&mut self, key: &str) -> Result<(), StoreError>;
}
