//! Render instructions handed to the presentation layer.
//!
//! The renderer is a pure function of these values; it never reads the
//! store and never decides a row's edit state on its own.

use crate::model::todo::TodoItem;

/// Per-row interaction mode. Not persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RowEditState {
    #[default]
    Viewing,
    Editing,
}

/// One control in a row's action pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowAction {
    Edit,
    Delete,
    Save,
    Cancel,
}

impl RowEditState {
    /// The `(primary, secondary)` controls a row shows in this state.
    pub fn actions(self) -> (RowAction, RowAction) {
        match self {
            Self::Viewing => (RowAction::Edit, RowAction::Delete),
            Self::Editing => (RowAction::Save, RowAction::Cancel),
        }
    }

    pub fn is_editing(self) -> bool {
        matches!(self, Self::Editing)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowView {
    pub item: TodoItem,
    pub state: RowEditState,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListBody {
    /// Shown instead of rows when the store is empty.
    Placeholder,
    Rows(Vec<RowView>),
}

/// Everything a full render needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListView {
    pub body: ListBody,
    pub count: usize,
    pub capacity: usize,
    pub submit_enabled: bool,
}

impl ListView {
    pub fn rows(&self) -> &[RowView] {
        match &self.body {
            ListBody::Placeholder => &[],
            ListBody::Rows(rows) => rows,
        }
    }
}

/// Presentation collaborator driven by the controller.
pub trait Renderer {
    /// Rebuilds the whole list: rows (or placeholder), capacity indicator and
    /// the enabled state of the add-submission control. Any pending input in
    /// rows or in the new-task field is discarded.
    fn render(&mut self, view: &ListView);

    /// Swaps a single row between view and edit presentation. `focus` asks
    /// for keyboard focus on the row's text input.
    fn update_row(&mut self, row: &RowView, focus: bool);
}
