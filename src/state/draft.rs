//! Debounced draft autosave for free-text input.
//!
//! DESIGN
//! ======
//! `DraftAutosave` mirrors the text a user is typing into a durable
//! key-value store, one record per scope, so a reload does not lose an
//! unsent ticket comment. Writes are debounced: every keystroke supersedes
//! the previously scheduled commit and restarts the quiet period. Emptied
//! drafts take a fast path that deletes the record immediately, so a blank
//! draft never lingers in storage.
//!
//! The machine is synchronous and owns no timer. `set_content` hands back a
//! [`PendingSave`] ticket; the driver (`draft_hook`) waits out the debounce
//! window, then passes the ticket to `commit`. Tickets carry a generation
//! counter, and any event that invalidates the scheduled write (newer
//! input, scope change, clear, disposal) strands the outstanding ticket, so
//! a late timer firing is a no-op. Store failures are logged and degrade to
//! "draft lives in memory only"; they never reach the caller.

#[cfg(test)]
#[path = "draft_test.rs"]
mod draft_test;

use std::time::Duration;

use chrono::{DateTime, Utc};
use log::{debug, warn};

use crate::storage::{DraftRecord, DraftStore};

/// Default storage key prefix for ticket comment drafts.
pub const DEFAULT_KEY_PREFIX: &str = "ticket-draft-";

/// Default quiet period between the last keystroke and the durable write.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(1000);

/// What a draft is scoped to.
///
/// `Unscoped` is a first-class "no persistence target" state: content is
/// held in memory and nothing is ever read or written.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum DraftScope {
    #[default]
    Unscoped,
    /// Persist under an external id (e.g. a ticket id).
    Scoped(String),
}

impl DraftScope {
    /// The storage key for this scope, or `None` when unscoped.
    pub fn storage_key(&self, prefix: &str) -> Option<String> {
        match self {
            Self::Unscoped => None,
            Self::Scoped(id) => Some(format!("{prefix}{id}")),
        }
    }
}

/// Save status observable by the UI.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DraftStatus {
    /// A commit is scheduled and has not yet landed.
    pub is_saving: bool,
    /// When the current scope's record was last written, if ever.
    pub last_saved: Option<DateTime<Utc>>,
    /// A durable record currently exists for the current scope.
    pub has_draft: bool,
}

/// Per-instance configuration.
#[derive(Clone, Debug)]
pub struct DraftConfig {
    /// Prefix joined with the scope id to form the storage key.
    pub key_prefix: String,
    /// Quiet period before a durable write.
    pub debounce: Duration,
}

impl Default for DraftConfig {
    fn default() -> Self {
        Self {
            key_prefix: DEFAULT_KEY_PREFIX.to_owned(),
            debounce: DEFAULT_DEBOUNCE,
        }
    }
}

/// Ticket for one scheduled commit.
///
/// Issued by [`DraftAutosave::set_content`]; the driver sleeps `delay` and
/// then passes the ticket back to [`DraftAutosave::commit`]. The generation
/// inside is the cancellation token: when anything superseded the write in
/// the meantime, the ticket no longer matches and the commit is skipped.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PendingSave {
    generation: u64,
    /// How long the driver should wait before committing.
    pub delay: Duration,
}

impl PendingSave {
    /// The delay clamped to the browser timer API's `u32` millisecond range.
    pub fn delay_millis(&self) -> u32 {
        u32::try_from(self.delay.as_millis()).unwrap_or(u32::MAX)
    }
}

/// Debounced mirror of a free-text draft in a durable key-value store.
///
/// At most one commit is outstanding per instance at any moment, and the
/// store holds at most one record per scope (last write wins).
pub struct DraftAutosave<S: DraftStore> {
    store: S,
    config: DraftConfig,
    scope: DraftScope,
    content: String,
    status: DraftStatus,
    /// Generation of the one outstanding [`PendingSave`], if any.
    pending: Option<u64>,
    generation: u64,
}

impl<S: DraftStore> DraftAutosave<S> {
    pub fn new(store: S, config: DraftConfig) -> Self {
        Self {
            store,
            config,
            scope: DraftScope::Unscoped,
            content: String::new(),
            status: DraftStatus::default(),
            pending: None,
            generation: 0,
        }
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn status(&self) -> DraftStatus {
        self.status
    }

    pub fn scope(&self) -> &DraftScope {
        &self.scope
    }

    /// Point the draft at a new scope, loading whatever the store holds.
    ///
    /// Any commit scheduled for the previous scope is stranded first, so a
    /// late timer can never write old content under the new key. The new
    /// scope's state comes entirely from the store; content never carries
    /// over from the previous scope.
    pub fn set_scope(&mut self, scope: DraftScope) {
        self.cancel_pending();
        self.scope = scope;
        match self.load() {
            Some(record) => {
                self.content = record.content;
                self.status = DraftStatus {
                    is_saving: false,
                    last_saved: Some(record.timestamp),
                    has_draft: true,
                };
            }
            None => {
                self.content = String::new();
                self.status = DraftStatus::default();
            }
        }
    }

    /// Record a keystroke.
    ///
    /// Content updates synchronously and any scheduled commit is
    /// superseded. Trimmed-empty content deletes the record immediately;
    /// anything else marks the draft as saving and returns the ticket the
    /// driver commits after the debounce window. Unscoped drafts stay in
    /// memory and schedule nothing.
    pub fn set_content(&mut self, text: impl Into<String>) -> Option<PendingSave> {
        self.content = text.into();
        self.pending = None;

        let key = self.scope.storage_key(&self.config.key_prefix)?;

        if self.content.trim().is_empty() {
            self.remove_record(&key);
            self.status = DraftStatus::default();
            return None;
        }

        self.status.is_saving = true;
        self.generation += 1;
        self.pending = Some(self.generation);
        Some(PendingSave {
            generation: self.generation,
            delay: self.config.debounce,
        })
    }

    /// Land a scheduled commit.
    ///
    /// `now` becomes the record timestamp. Returns `true` only when the
    /// ticket is still current and the write succeeded; the driver runs its
    /// save callback off a `true` return. A stranded ticket is a no-op. On
    /// write failure the in-memory content is retained and only `is_saving`
    /// clears; the next keystroke schedules a fresh attempt.
    pub fn commit(&mut self, ticket: PendingSave, now: DateTime<Utc>) -> bool {
        if self.pending != Some(ticket.generation) {
            debug!("skipping stale draft commit");
            return false;
        }
        self.pending = None;

        // A current ticket implies a scoped draft.
        let Some(key) = self.scope.storage_key(&self.config.key_prefix) else {
            self.status.is_saving = false;
            return false;
        };

        let record = DraftRecord::new(self.content.clone(), now);
        let raw = match record.to_json() {
            Ok(raw) => raw,
            Err(e) => {
                warn!("draft encode failed: {e}");
                self.status.is_saving = false;
                return false;
            }
        };

        match self.store.set(&key, &raw) {
            Ok(()) => {
                self.status = DraftStatus {
                    is_saving: false,
                    last_saved: Some(now),
                    has_draft: true,
                };
                true
            }
            Err(e) => {
                warn!("draft write failed: {e}");
                self.status.is_saving = false;
                false
            }
        }
    }

    /// Drop the draft now: empty the content and delete the record.
    ///
    /// Not debounced, and does not feed the save-callback path. Remove
    /// failures are logged; the state still reflects the cleared intent.
    pub fn clear(&mut self) {
        self.pending = None;
        self.content = String::new();
        if let Some(key) = self.scope.storage_key(&self.config.key_prefix) {
            self.remove_record(&key);
        }
        self.status = DraftStatus::default();
    }

    /// Strand any scheduled commit, e.g. when the owning surface unmounts.
    pub fn cancel_pending(&mut self) {
        self.pending = None;
    }

    /// Read and decode the record for the current scope.
    ///
    /// Read failures and malformed records are logged and treated as "no
    /// record"; a malformed record is left in place rather than deleted.
    fn load(&self) -> Option<DraftRecord> {
        let key = self.scope.storage_key(&self.config.key_prefix)?;
        let raw = match self.store.get(&key) {
            Ok(raw) => raw?,
            Err(e) => {
                warn!("draft read failed: {e}");
                return None;
            }
        };
        match DraftRecord::from_json(&raw) {
            Ok(record) => Some(record),
            Err(e) => {
                warn!("ignoring malformed draft under {key}: {e}");
                None
            }
        }
    }

    fn remove_record(&mut self, key: &str) {
        if let Err(e) = self.store.remove(key) {
            warn!("draft remove failed: {e}");
        }
    }
}
