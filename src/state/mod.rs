//! Client application state.
//!
//! SYSTEM CONTEXT
//! ==============
//! `draft` owns the debounced autosave state machine; `draft_hook` wires it
//! to Leptos signals and browser timers for the console's comment editors.

pub mod draft;
pub mod draft_hook;
