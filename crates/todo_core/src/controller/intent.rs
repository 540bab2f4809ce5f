use crate::model::todo::TodoId;
use std::fmt::{Display, Formatter};

/// Entry points into the core, one per user gesture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserIntent {
    SubmitNew(String),
    Toggle(TodoId),
    StartEdit(TodoId),
    CommitEdit(TodoId, String),
    CancelEdit(TodoId),
    Delete(TodoId),
    CleanCompleted,
}

impl UserIntent {
    /// Stable name used in log events.
    pub fn name(&self) -> &'static str {
        match self {
            Self::SubmitNew(_) => "submit_new",
            Self::Toggle(_) => "toggle",
            Self::StartEdit(_) => "start_edit",
            Self::CommitEdit(..) => "commit_edit",
            Self::CancelEdit(_) => "cancel_edit",
            Self::Delete(_) => "delete",
            Self::CleanCompleted => "clean_completed",
        }
    }
}

/// Why an intent degraded to a no-op.
///
/// None of these are shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    /// New task text was empty or whitespace only.
    EmptyInput,
    /// The id does not name a task in the store.
    UnknownId,
    /// The store already holds `capacity` tasks.
    CapacityExceeded,
    /// The row's current edit state does not accept this intent.
    InvalidTransition,
    /// Writing to storage failed; the collection is unchanged.
    PersistenceFailed,
}

impl IgnoreReason {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::EmptyInput => "empty_input",
            Self::UnknownId => "unknown_id",
            Self::CapacityExceeded => "capacity_exceeded",
            Self::InvalidTransition => "invalid_transition",
            Self::PersistenceFailed => "persistence_failed",
        }
    }
}

impl Display for IgnoreReason {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntentOutcome {
    Applied,
    Ignored(IgnoreReason),
}

impl IntentOutcome {
    pub fn is_applied(self) -> bool {
        matches!(self, Self::Applied)
    }
}
