//! Task record and id generation.
//!
//! # Invariants
//! - Serialized shape is exactly `{ "id": <number>, "text": <string>, "completed": <bool> }`.
//! - `IdGenerator` output is strictly increasing for one generator instance.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::time::{SystemTime, UNIX_EPOCH};

/// Opaque task identifier.
///
/// Serialized as a bare JSON number, so collections saved with
/// millisecond-timestamp ids load unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TodoId(u64);

impl TodoId {
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub const fn get(self) -> u64 {
        self.0
    }
}

impl Display for TodoId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Display::fmt(&self.0, f)
    }
}

impl std::str::FromStr for TodoId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse::<u64>().map(Self)
    }
}

/// A single task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoItem {
    pub id: TodoId,
    pub text: String,
    pub completed: bool,
}

impl TodoItem {
    /// Creates an open (not completed) task.
    pub fn new(id: TodoId, text: impl Into<String>) -> Self {
        Self {
            id,
            text: text.into(),
            completed: false,
        }
    }
}

/// Issues fresh task ids.
///
/// Ids start from the wall clock in milliseconds, matching the shape of ids
/// already present in saved data, but never repeat: every id is greater than
/// both the last issued id and the largest id the generator has observed.
/// Once `u64::MAX` has been issued or observed the generator is exhausted and
/// returns `None`; callers then pick an unused id themselves.
#[derive(Debug, Clone, Default)]
pub struct IdGenerator {
    floor: u64,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records an id that already exists so later ids stay above it.
    pub fn observe(&mut self, id: TodoId) {
        self.floor = self.floor.max(id.get());
    }

    /// Returns the next id using the current wall clock.
    pub fn next_id(&mut self) -> Option<TodoId> {
        self.next_id_at(now_millis())
    }

    /// Returns the next id given `now_ms` as the clock reading.
    pub fn next_id_at(&mut self, now_ms: u64) -> Option<TodoId> {
        let candidate = now_ms.max(self.floor.checked_add(1)?);
        self.floor = candidate;
        Some(TodoId(candidate))
    }
}

fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX))
        .unwrap_or(0)
}
