//! Intent handling and the row edit state machine.
//!
//! | state   | intent        | effect                                  | next      |
//! |---------|---------------|-----------------------------------------|-----------|
//! | Viewing | start_edit    | row editable + focused, Save/Cancel     | Editing   |
//! | Editing | commit_edit   | `update`, Edit/Delete                   | Viewing   |
//! | Editing | cancel_edit   | full render                             | Viewing   |
//! | Viewing | delete        | `delete`, full render                   | (removed) |
//! | Viewing | toggle        | `toggle_completed`, full render         | Viewing   |
//!
//! Any other pairing is refused with `InvalidTransition`. Rows do not lock
//! each other; several may be `Editing` at once.

use super::intent::{IgnoreReason, IntentOutcome, UserIntent};
use super::view::{ListBody, ListView, Renderer, RowEditState, RowView};
use crate::kv::KeyValueStore;
use crate::model::todo::TodoId;
use crate::store::{StoreError, TodoStore};
use log::{error, info};
use std::collections::BTreeMap;

/// Task limit applied when none is configured.
pub const DEFAULT_CAPACITY: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControllerConfig {
    /// Maximum number of tasks. Submissions at or above it are refused.
    pub capacity: usize,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
        }
    }
}

impl ControllerConfig {
    pub fn with_capacity(capacity: usize) -> Self {
        Self { capacity }
    }
}

pub struct TodoController<S: KeyValueStore, R: Renderer> {
    store: TodoStore<S>,
    renderer: R,
    config: ControllerConfig,
    rows: BTreeMap<TodoId, RowEditState>,
}

impl<S: KeyValueStore, R: Renderer> TodoController<S, R> {
    /// Wires the controller. Nothing is rendered until [`Self::mount`].
    pub fn new(store: TodoStore<S>, renderer: R, config: ControllerConfig) -> Self {
        Self {
            store,
            renderer,
            config,
            rows: BTreeMap::new(),
        }
    }

    /// Initial full render.
    pub fn mount(&mut self) {
        self.render_all();
    }

    /// Dispatches one user intent.
    pub fn handle(&mut self, intent: UserIntent) -> IntentOutcome {
        let name = intent.name();
        let outcome = match intent {
            UserIntent::SubmitNew(text) => self.submit_new(&text),
            UserIntent::Toggle(id) => self.toggle(id),
            UserIntent::StartEdit(id) => self.start_edit(id),
            UserIntent::CommitEdit(id, text) => self.commit_edit(id, &text),
            UserIntent::CancelEdit(id) => self.cancel_edit(id),
            UserIntent::Delete(id) => self.delete(id),
            UserIntent::CleanCompleted => self.clean_completed(),
        };

        match outcome {
            IntentOutcome::Applied => {
                info!("event=intent module=controller status=applied intent={name}");
            }
            IntentOutcome::Ignored(reason) => {
                info!(
                    "event=intent module=controller status=ignored intent={name} reason={reason}"
                );
            }
        }
        outcome
    }

    /// Adds a task unless the text is blank or the list is full.
    ///
    /// Always ends with a full render, which also clears the input field.
    pub fn submit_new(&mut self, text: &str) -> IntentOutcome {
        let outcome = if text.trim().is_empty() {
            IntentOutcome::Ignored(IgnoreReason::EmptyInput)
        } else if self.store.count() >= self.config.capacity {
            IntentOutcome::Ignored(IgnoreReason::CapacityExceeded)
        } else {
            match self.store.add(text) {
                Ok(Some(_)) => IntentOutcome::Applied,
                Ok(None) => IntentOutcome::Ignored(IgnoreReason::EmptyInput),
                Err(err) => persistence_failed("submit_new", &err),
            }
        };

        self.render_all();
        outcome
    }

    pub fn toggle(&mut self, id: TodoId) -> IntentOutcome {
        if let Err(reason) = self.require_state(id, RowEditState::Viewing) {
            return IntentOutcome::Ignored(reason);
        }

        match self.store.toggle_completed(id) {
            Ok(_) => {
                self.render_all();
                IntentOutcome::Applied
            }
            Err(err) => persistence_failed("toggle", &err),
        }
    }

    pub fn start_edit(&mut self, id: TodoId) -> IntentOutcome {
        if let Err(reason) = self.require_state(id, RowEditState::Viewing) {
            return IntentOutcome::Ignored(reason);
        }

        self.set_row_state(id, RowEditState::Editing, true);
        IntentOutcome::Applied
    }

    /// Saves `text` (which may be empty) and returns only this row to `Viewing`.
    ///
    /// On a failed write the row stays `Editing` so the input is not lost.
    pub fn commit_edit(&mut self, id: TodoId, text: &str) -> IntentOutcome {
        if let Err(reason) = self.require_state(id, RowEditState::Editing) {
            return IntentOutcome::Ignored(reason);
        }

        match self.store.update(id, text) {
            Ok(_) => {
                self.set_row_state(id, RowEditState::Viewing, false);
                IntentOutcome::Applied
            }
            Err(err) => persistence_failed("commit_edit", &err),
        }
    }

    /// Drops pending input by re-rendering from the store, which resets
    /// every row, not just this one.
    pub fn cancel_edit(&mut self, id: TodoId) -> IntentOutcome {
        if let Err(reason) = self.require_state(id, RowEditState::Editing) {
            return IntentOutcome::Ignored(reason);
        }

        self.render_all();
        IntentOutcome::Applied
    }

    pub fn delete(&mut self, id: TodoId) -> IntentOutcome {
        if let Err(reason) = self.require_state(id, RowEditState::Viewing) {
            return IntentOutcome::Ignored(reason);
        }

        match self.store.delete(id) {
            Ok(_) => {
                self.render_all();
                IntentOutcome::Applied
            }
            Err(err) => persistence_failed("delete", &err),
        }
    }

    /// Removes completed tasks regardless of row states, then re-renders.
    pub fn clean_completed(&mut self) -> IntentOutcome {
        let outcome = match self.store.clean_completed() {
            Ok(_) => IntentOutcome::Applied,
            Err(err) => persistence_failed("clean_completed", &err),
        };

        self.render_all();
        outcome
    }

    /// Edit state of a rendered row; `None` when the row is not on screen.
    pub fn row_state(&self, id: TodoId) -> Option<RowEditState> {
        self.rows.get(&id).copied()
    }

    /// Ids of rows currently in `Editing`, in ascending id order.
    pub fn editing_rows(&self) -> Vec<TodoId> {
        self.rows
            .iter()
            .filter(|(_, state)| state.is_editing())
            .map(|(id, _)| *id)
            .collect()
    }

    pub fn is_submit_enabled(&self) -> bool {
        self.store.count() < self.config.capacity
    }

    pub fn store(&self) -> &TodoStore<S> {
        &self.store
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    fn require_state(&self, id: TodoId, expected: RowEditState) -> Result<(), IgnoreReason> {
        if !self.store.contains(id) {
            return Err(IgnoreReason::UnknownId);
        }
        let current = self.rows.get(&id).copied().unwrap_or_default();
        if current != expected {
            return Err(IgnoreReason::InvalidTransition);
        }
        Ok(())
    }

    fn set_row_state(&mut self, id: TodoId, state: RowEditState, focus: bool) {
        self.rows.insert(id, state);
        if let Some(item) = self.store.get(id) {
            let row = RowView {
                item: item.clone(),
                state,
            };
            self.renderer.update_row(&row, focus);
        }
    }

    fn render_all(&mut self) {
        self.rows = self
            .store
            .items()
            .iter()
            .map(|item| (item.id, RowEditState::Viewing))
            .collect();

        let body = if self.store.count() == 0 {
            ListBody::Placeholder
        } else {
            ListBody::Rows(
                self.store
                    .items()
                    .iter()
                    .map(|item| RowView {
                        item: item.clone(),
                        state: RowEditState::Viewing,
                    })
                    .collect(),
            )
        };

        let view = ListView {
            body,
            count: self.store.count(),
            capacity: self.config.capacity,
            submit_enabled: self.is_submit_enabled(),
        };
        self.renderer.render(&view);
    }
}

fn persistence_failed(intent: &str, err: &StoreError) -> IntentOutcome {
    error!("event=intent module=controller status=error intent={intent} error={err}");
    IntentOutcome::Ignored(IgnoreReason::PersistenceFailed)
}
