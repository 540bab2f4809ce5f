//! Interaction controller for the task list.
//!
//! # Responsibility
//! - Translate user intents into store calls.
//! - Enforce the capacity limit on new tasks.
//! - Own the per-row `Viewing`/`Editing` state machine and drive the renderer.
//!
//! # Invariants
//! - One count, the store's, decides both refusing `add` and disabling submission.
//! - Every full render resets all row states to `Viewing`.
//! - Refused intents never touch storage.

mod intent;
mod todo_controller;
mod view;

pub use intent::{IgnoreReason, IntentOutcome, UserIntent};
pub use todo_controller::{ControllerConfig, TodoController, DEFAULT_CAPACITY};
pub use view::{ListBody, ListView, Renderer, RowAction, RowEditState, RowView};
