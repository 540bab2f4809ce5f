//! Task collection with write-through persistence.
//!
//! # Responsibility
//! - Own the ordered task collection (newest first).
//! - Persist the whole collection under one fixed key after every mutation.
//!
//! # Invariants
//! - Ids are unique across the collection at all times.
//! - After every call returns, memory and storage hold the same collection.
//!   A failed write leaves memory untouched.
//! - Absent or malformed saved data opens as an empty collection.
//! - The store has no capacity limit; that belongs to the controller.

use crate::kv::{KeyValueStore, KvError};
use crate::model::todo::{IdGenerator, TodoId, TodoItem};
use log::{debug, info, warn};
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Key holding the serialized task collection.
pub const TODOS_STORAGE_KEY: &str = "todos";

pub type StoreResult<T> = Result<T, StoreError>;

/// Failure to persist a mutation.
#[derive(Debug)]
pub enum StoreError {
    Storage(KvError),
    Encode(serde_json::Error),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Storage(err) => write!(f, "failed to persist tasks: {err}"),
            Self::Encode(err) => write!(f, "failed to encode tasks: {err}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Storage(err) => Some(err),
            Self::Encode(err) => Some(err),
        }
    }
}

impl From<KvError> for StoreError {
    fn from(value: KvError) -> Self {
        Self::Storage(value)
    }
}

/// Ordered task collection persisted through a [`KeyValueStore`].
pub struct TodoStore<S: KeyValueStore> {
    storage: S,
    items: Vec<TodoItem>,
    ids: IdGenerator,
}

impl<S: KeyValueStore> TodoStore<S> {
    /// Loads the saved collection from `storage`.
    ///
    /// Never fails: unreadable or malformed data starts an empty collection.
    /// Saved items sharing an id with an earlier item get a fresh id and the
    /// repaired collection is written back.
    pub fn open(storage: S) -> Self {
        let mut items = load_items(&storage);
        let mut ids = IdGenerator::new();
        for item in &items {
            ids.observe(item.id);
        }
        let repaired = rekey_duplicates(&mut items, &mut ids);

        let mut store = Self {
            storage,
            items: Vec::new(),
            ids,
        };
        if repaired == 0 {
            store.items = items;
        } else if let Err(err) = store.commit(items.clone()) {
            warn!(
                "event=store_repair module=store status=error rekeyed={} error={}",
                repaired, err
            );
            store.items = items;
        } else {
            info!(
                "event=store_repair module=store status=ok rekeyed={}",
                repaired
            );
        }

        info!(
            "event=store_open module=store status=ok count={}",
            store.items.len()
        );
        store
    }

    /// Creates an open task at the front of the collection.
    ///
    /// Returns `Ok(None)` without touching storage when `text` is empty.
    /// Whitespace is not trimmed here.
    pub fn add(&mut self, text: &str) -> StoreResult<Option<TodoId>> {
        if text.is_empty() {
            debug!("event=todo_add module=store status=skipped reason=empty_text");
            return Ok(None);
        }

        let id = self.fresh_id();
        let mut next = Vec::with_capacity(self.items.len() + 1);
        next.push(TodoItem::new(id, text));
        next.extend(self.items.iter().cloned());
        self.commit(next)?;

        info!(
            "event=todo_add module=store status=ok id={} text_len={} count={}",
            id,
            text.chars().count(),
            self.items.len()
        );
        Ok(Some(id))
    }

    /// Owned snapshot of the collection, newest first.
    pub fn get_all(&self) -> Vec<TodoItem> {
        self.items.clone()
    }

    /// Borrowed view of the collection, newest first.
    pub fn items(&self) -> &[TodoItem] {
        &self.items
    }

    pub fn get(&self, id: TodoId) -> Option<&TodoItem> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn contains(&self, id: TodoId) -> bool {
        self.get(id).is_some()
    }

    pub fn count(&self) -> usize {
        self.items.len()
    }

    /// Flips `completed`. Returns `Ok(false)` for an unknown id.
    pub fn toggle_completed(&mut self, id: TodoId) -> StoreResult<bool> {
        self.modify(id, "todo_toggle", |item| item.completed = !item.completed)
    }

    /// Replaces the text, keeping `completed`. Returns `Ok(false)` for an unknown id.
    pub fn update(&mut self, id: TodoId, new_text: &str) -> StoreResult<bool> {
        self.modify(id, "todo_update", |item| item.text = new_text.to_string())
    }

    /// Removes the task. Returns `Ok(false)` for an unknown id.
    pub fn delete(&mut self, id: TodoId) -> StoreResult<bool> {
        if !self.contains(id) {
            debug!("event=todo_delete module=store status=skipped reason=unknown_id id={id}");
            return Ok(false);
        }

        let next = self
            .items
            .iter()
            .filter(|item| item.id != id)
            .cloned()
            .collect();
        self.commit(next)?;
        info!(
            "event=todo_delete module=store status=ok id={} count={}",
            id,
            self.items.len()
        );
        Ok(true)
    }

    /// Removes every completed task and returns how many were removed.
    pub fn clean_completed(&mut self) -> StoreResult<usize> {
        let next: Vec<TodoItem> = self
            .items
            .iter()
            .filter(|item| !item.completed)
            .cloned()
            .collect();
        let removed = self.items.len() - next.len();
        if removed > 0 {
            self.commit(next)?;
        }

        info!(
            "event=todo_clean_completed module=store status=ok removed={} count={}",
            removed,
            self.items.len()
        );
        Ok(removed)
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn into_storage(self) -> S {
        self.storage
    }

    fn modify(
        &mut self,
        id: TodoId,
        event: &str,
        apply: impl FnOnce(&mut TodoItem),
    ) -> StoreResult<bool> {
        let Some(index) = self.items.iter().position(|item| item.id == id) else {
            debug!("event={event} module=store status=skipped reason=unknown_id id={id}");
            return Ok(false);
        };

        let mut next = self.items.clone();
        apply(&mut next[index]);
        self.commit(next)?;
        info!("event={event} module=store status=ok id={id}");
        Ok(true)
    }

    /// Writes `next` and only then makes it the in-memory collection.
    fn commit(&mut self, next: Vec<TodoItem>) -> StoreResult<()> {
        let encoded = serde_json::to_string(&next).map_err(StoreError::Encode)?;
        self.storage.put(TODOS_STORAGE_KEY, &encoded)?;
        self.items = next;
        Ok(())
    }

    fn fresh_id(&mut self) -> TodoId {
        if let Some(id) = self.ids.next_id().filter(|id| !self.contains(*id)) {
            return id;
        }
        let taken: HashSet<TodoId> = self.items.iter().map(|item| item.id).collect();
        lowest_unused_id(&taken)
    }
}

fn load_items(storage: &impl KeyValueStore) -> Vec<TodoItem> {
    let raw = match storage.get(TODOS_STORAGE_KEY) {
        Ok(Some(raw)) => raw,
        Ok(None) => {
            info!("event=store_load module=store status=empty reason=absent");
            return Vec::new();
        }
        Err(err) => {
            warn!("event=store_load module=store status=empty reason=read_failed error={err}");
            return Vec::new();
        }
    };

    match serde_json::from_str::<Vec<TodoItem>>(&raw) {
        Ok(items) => items,
        Err(err) => {
            warn!(
                "event=store_load module=store status=empty reason=malformed bytes={} error={}",
                raw.len(),
                err
            );
            Vec::new()
        }
    }
}

fn rekey_duplicates(items: &mut [TodoItem], ids: &mut IdGenerator) -> usize {
    let mut taken: HashSet<TodoId> = items.iter().map(|item| item.id).collect();
    let mut seen = HashSet::with_capacity(items.len());
    let mut rekeyed = 0;
    for item in items.iter_mut() {
        if seen.insert(item.id) {
            continue;
        }
        let fresh = ids
            .next_id()
            .filter(|id| !taken.contains(id))
            .unwrap_or_else(|| lowest_unused_id(&taken));
        debug!(
            "event=store_rekey module=store status=ok old_id={} new_id={}",
            item.id, fresh
        );
        item.id = fresh;
        taken.insert(fresh);
        seen.insert(fresh);
        rekeyed += 1;
    }
    rekeyed
}

/// Smallest id not in `taken`. Used once the generator runs past `u64::MAX`;
/// at most `taken.len() + 1` candidates are checked.
fn lowest_unused_id(taken: &HashSet<TodoId>) -> TodoId {
    let mut candidate = 0u64;
    while taken.contains(&TodoId::new(candidate)) {
        candidate += 1;
    }
    TodoId::new(candidate)
}
