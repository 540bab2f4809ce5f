//! Core domain logic for the capacity-limited task list.
//! This crate owns the item collection, its persistence contract and the
//! per-row edit state machine. Presentation lives behind [`Renderer`].

pub mod controller;
pub mod db;
pub mod kv;
pub mod logging;
pub mod model;
pub mod store;

pub use controller::{
    ControllerConfig, IgnoreReason, IntentOutcome, ListBody, ListView, Renderer, RowAction,
    RowEditState, RowView, TodoController, UserIntent, DEFAULT_CAPACITY,
};
pub use kv::{KeyValueStore, KvError, KvResult, MemoryKeyValueStore, SqliteKeyValueStore};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::todo::{IdGenerator, TodoId, TodoItem};
pub use store::{StoreError, StoreResult, TodoStore, TODOS_STORAGE_KEY};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
