//! Leptos hook around [`DraftAutosave`] for ticket comment editors.
//!
//! SYSTEM CONTEXT
//! ==============
//! Pages own a reactive ticket id (route param or selection). This hook
//! maps that id onto the autosave machine, exposes the draft text and save
//! status as signals, and arms the debounce timer in the browser. The
//! machine stays UI-agnostic; everything reactive lives here.

#[cfg(test)]
#[path = "draft_hook_test.rs"]
mod draft_hook_test;

use std::cell::RefCell;
use std::rc::Rc;

use leptos::callback::UnsyncCallback;
use leptos::prelude::*;

use crate::state::draft::{DraftAutosave, DraftConfig, DraftScope, DraftStatus, PendingSave};
use crate::storage::LocalStorage;

/// Reactive handle returned by [`use_ticket_draft`].
#[derive(Clone, Copy)]
pub struct TicketDraft {
    /// Current draft text, updated synchronously on every `set_draft`.
    pub draft: RwSignal<String>,
    /// Save status for status-line UI ("Saving…" / "Saved 12:04").
    pub status: RwSignal<DraftStatus>,
    /// Record a keystroke; schedules the debounced durable write.
    pub set_draft: UnsyncCallback<String>,
    /// Drop the draft and its stored record immediately.
    pub clear_draft: UnsyncCallback<()>,
}

/// Bind a debounced, localStorage-backed draft to a reactive ticket id.
///
/// A `ticket_id` of `None` means no persistence target: text stays in
/// memory only. `on_saved` runs after each successful durable write. The
/// pending write is stranded when the owning scope is disposed, so
/// navigating away never commits a stale draft.
pub fn use_ticket_draft(
    ticket_id: Signal<Option<String>>,
    config: DraftConfig,
    on_saved: Option<UnsyncCallback<()>>,
) -> TicketDraft {
    let machine = Rc::new(RefCell::new(DraftAutosave::new(LocalStorage::new(), config)));

    let draft = RwSignal::new(String::new());
    let status = RwSignal::new(DraftStatus::default());

    let sync = {
        let machine = Rc::clone(&machine);
        move || {
            let m = machine.borrow();
            draft.set(m.content().to_owned());
            status.set(m.status());
        }
    };

    // Re-initialize whenever the ticket id changes; text never carries
    // across ids.
    {
        let machine = Rc::clone(&machine);
        let sync = sync.clone();
        Effect::new(move || {
            let scope = scope_for(ticket_id.get());
            machine.borrow_mut().set_scope(scope);
            sync();
        });
    }

    let set_draft = {
        let machine = Rc::clone(&machine);
        let sync = sync.clone();
        UnsyncCallback::new(move |text: String| {
            let pending = machine.borrow_mut().set_content(text);
            sync();
            if let Some(pending) = pending {
                arm_commit(&machine, pending, status, on_saved);
            }
        })
    };

    let clear_draft = {
        let machine = Rc::clone(&machine);
        UnsyncCallback::new(move |()| {
            machine.borrow_mut().clear();
            sync();
        })
    };

    // Disposal must strand the pending write.
    {
        // `on_cleanup` requires a `Send + Sync` closure, but the machine is a
        // single-threaded `Rc<RefCell<_>>`. Wrap it in leptos's own
        // `SendWrapper` shim (the pattern used by `leptos::Portal`): a no-op on
        // the single-threaded browser target where this hook actually runs.
        let machine = leptos::__reexports::send_wrapper::SendWrapper::new(Rc::clone(&machine));
        on_cleanup(move || machine.borrow_mut().cancel_pending());
    }

    TicketDraft { draft, status, set_draft, clear_draft }
}

/// Map a reactive ticket id onto a draft scope.
fn scope_for(ticket_id: Option<String>) -> DraftScope {
    match ticket_id {
        Some(id) => DraftScope::Scoped(id),
        None => DraftScope::Unscoped,
    }
}

/// Arm the debounce timer for a scheduled commit (browser builds only).
///
/// The timeout is fire-and-forget: cancellation happens inside the machine,
/// which refuses a ticket that anything has since superseded.
fn arm_commit(
    machine: &Rc<RefCell<DraftAutosave<LocalStorage>>>,
    pending: PendingSave,
    status: RwSignal<DraftStatus>,
    on_saved: Option<UnsyncCallback<()>>,
) {
    #[cfg(feature = "hydrate")]
    {
        let machine = Rc::clone(machine);
        gloo_timers::callback::Timeout::new(pending.delay_millis(), move || {
            let saved = machine.borrow_mut().commit(pending, chrono::Utc::now());
            status.set(machine.borrow().status());
            if saved {
                if let Some(cb) = on_saved {
                    cb.run(());
                }
            }
        })
        .forget();
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (machine, pending, status, on_saved);
    }
}
