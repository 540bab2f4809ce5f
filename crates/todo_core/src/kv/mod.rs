//! Durable key-value persistence contract.
//!
//! # Responsibility
//! - Define the minimal get/put surface the task store persists through.
//! - Provide SQLite-backed and in-memory implementations.
//!
//! # Invariants
//! - `put` is synchronous: once it returns `Ok`, a later `get` of the same key
//!   observes the written value.
//! - Values are opaque strings; the caller owns their encoding.

use crate::db::DbError;
use std::error::Error;
use std::fmt::{Display, Formatter};

mod memory_kv;
mod sqlite_kv;

pub use memory_kv::MemoryKeyValueStore;
pub use sqlite_kv::SqliteKeyValueStore;

pub type KvResult<T> = Result<T, KvError>;

/// Error raised by a key-value backend.
#[derive(Debug)]
pub enum KvError {
    Db(DbError),
    Unavailable(String),
}

impl Display for KvError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Unavailable(message) => write!(f, "key-value storage unavailable: {message}"),
        }
    }
}

impl Error for KvError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Unavailable(_) => None,
        }
    }
}

impl From<DbError> for KvError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for KvError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Durable string storage addressed by key.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> KvResult<Option<String>>;
    fn put(&mut self, key: &str, value: &str) -> KvResult<()>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for Box<T> {
    fn get(&self, key: &str) -> KvResult<Option<String>> {
        (**self).get(key)
    }

    fn put(&mut self, key: &str, value: &str) -> KvResult<()> {
        (**self).put(key, value)
    }
}
