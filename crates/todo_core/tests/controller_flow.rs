use todo_core::{
    ControllerConfig, IgnoreReason, IntentOutcome, ListBody, ListView, MemoryKeyValueStore,
    Renderer, RowAction, RowEditState, RowView, TodoController, TodoId, TodoStore, UserIntent,
};

/// Captures render instructions the way a real presentation layer would see them.
#[derive(Default)]
struct RecordingRenderer {
    views: Vec<ListView>,
    row_updates: Vec<(RowView, bool)>,
}

impl RecordingRenderer {
    fn last_view(&self) -> &ListView {
        self.views.last().expect("at least one full render")
    }
}

impl Renderer for RecordingRenderer {
    fn render(&mut self, view: &ListView) {
        self.views.push(view.clone());
    }

    fn update_row(&mut self, row: &RowView, focus: bool) {
        self.row_updates.push((row.clone(), focus));
    }
}

type Controller = TodoController<MemoryKeyValueStore, RecordingRenderer>;

fn mounted(capacity: usize) -> Controller {
    let store = TodoStore::open(MemoryKeyValueStore::new());
    let mut controller = TodoController::new(
        store,
        RecordingRenderer::default(),
        ControllerConfig::with_capacity(capacity),
    );
    controller.mount();
    controller
}

fn add(controller: &mut Controller, text: &str) -> TodoId {
    assert!(controller.submit_new(text).is_applied());
    controller.store().items()[0].id
}

fn writes(controller: &Controller) -> usize {
    controller.store().storage().write_count()
}

#[test]
fn mount_on_empty_store_renders_placeholder() {
    let controller = mounted(5);
    let view = controller.renderer().last_view();

    assert_eq!(view.body, ListBody::Placeholder);
    assert_eq!(view.count, 0);
    assert_eq!(view.capacity, 5);
    assert!(view.submit_enabled);
}

#[test]
fn mount_renders_saved_items_in_viewing_state() {
    let mut store = TodoStore::open(MemoryKeyValueStore::new());
    store.add("Buy milk").unwrap();
    store.add("Walk dog").unwrap();

    let mut controller =
        TodoController::new(store, RecordingRenderer::default(), ControllerConfig::default());
    controller.mount();

    let view = controller.renderer().last_view();
    let texts: Vec<_> = view.rows().iter().map(|row| row.item.text.as_str()).collect();
    assert_eq!(texts, vec!["Walk dog", "Buy milk"]);
    assert!(view
        .rows()
        .iter()
        .all(|row| row.state == RowEditState::Viewing));
}

#[test]
fn sixth_add_is_refused_at_default_capacity() {
    let mut controller = mounted(5);
    for n in 1..=5 {
        add(&mut controller, &format!("task {n}"));
    }
    let writes_at_capacity = writes(&controller);

    let outcome = controller.handle(UserIntent::SubmitNew("task 6".to_string()));

    assert_eq!(outcome, IntentOutcome::Ignored(IgnoreReason::CapacityExceeded));
    assert_eq!(controller.store().count(), 5);
    assert_eq!(writes(&controller), writes_at_capacity);
    assert!(!controller.renderer().last_view().submit_enabled);
}

#[test]
fn count_never_exceeds_capacity_for_any_add_sequence() {
    for capacity in 1..=7 {
        let mut controller = mounted(capacity);
        for n in 0..(capacity * 2 + 3) {
            controller.submit_new(&format!("item {n}"));
            assert!(controller.store().count() <= capacity);
        }
        assert_eq!(controller.store().count(), capacity);
    }
}

#[test]
fn submit_affordance_reenables_after_delete() {
    let mut controller = mounted(2);
    let first = add(&mut controller, "a");
    add(&mut controller, "b");
    assert!(!controller.renderer().last_view().submit_enabled);

    assert!(controller.delete(first).is_applied());

    let view = controller.renderer().last_view();
    assert!(view.submit_enabled);
    assert_eq!(view.count, 1);
}

#[test]
fn blank_submission_never_changes_count() {
    let mut controller = mounted(5);
    for text in ["", " ", "\t\n"] {
        assert_eq!(
            controller.handle(UserIntent::SubmitNew(text.to_string())),
            IntentOutcome::Ignored(IgnoreReason::EmptyInput)
        );
    }
    assert_eq!(controller.store().count(), 0);
    assert_eq!(writes(&controller), 0);
}

#[test]
fn start_then_cancel_leaves_text_unchanged_and_row_viewing() {
    let mut controller = mounted(5);
    let id = add(&mut controller, "X");

    assert!(controller.handle(UserIntent::StartEdit(id)).is_applied());
    assert_eq!(controller.row_state(id), Some(RowEditState::Editing));
    let (row, focus) = controller.renderer().row_updates.last().unwrap().clone();
    assert_eq!(row.state.actions(), (RowAction::Save, RowAction::Cancel));
    assert!(focus);

    assert!(controller.handle(UserIntent::CancelEdit(id)).is_applied());

    assert_eq!(controller.store().get(id).unwrap().text, "X");
    assert_eq!(controller.row_state(id), Some(RowEditState::Viewing));
    let rendered = &controller.renderer().last_view().rows()[0];
    assert_eq!(rendered.state.actions(), (RowAction::Edit, RowAction::Delete));
}

#[test]
fn commit_saves_text_and_returns_row_to_viewing() {
    let mut controller = mounted(5);
    let id = add(&mut controller, "draft");
    controller.start_edit(id);

    assert!(controller
        .handle(UserIntent::CommitEdit(id, "final".to_string()))
        .is_applied());

    assert_eq!(controller.store().get(id).unwrap().text, "final");
    assert_eq!(controller.row_state(id), Some(RowEditState::Viewing));
    let (row, focus) = controller.renderer().row_updates.last().unwrap().clone();
    assert_eq!(row.item.text, "final");
    assert_eq!(row.state, RowEditState::Viewing);
    assert!(!focus);
}

#[test]
fn commit_accepts_empty_text() {
    let mut controller = mounted(5);
    let id = add(&mut controller, "draft");
    controller.start_edit(id);

    assert!(controller.commit_edit(id, "").is_applied());
    assert_eq!(controller.store().get(id).unwrap().text, "");
}

#[test]
fn rows_edit_independently_and_commit_keeps_other_rows_editing() {
    let mut controller = mounted(5);
    let a = add(&mut controller, "a");
    let b = add(&mut controller, "b");

    assert!(controller.start_edit(a).is_applied());
    assert!(controller.start_edit(b).is_applied());
    assert_eq!(controller.editing_rows().len(), 2);

    controller.commit_edit(a, "a2");

    assert_eq!(controller.row_state(a), Some(RowEditState::Viewing));
    assert_eq!(controller.row_state(b), Some(RowEditState::Editing));
}

#[test]
fn cancel_resets_every_other_editing_row() {
    let mut controller = mounted(5);
    let a = add(&mut controller, "a");
    let b = add(&mut controller, "b");
    controller.start_edit(a);
    controller.start_edit(b);

    controller.cancel_edit(a);

    assert!(controller.editing_rows().is_empty());
    assert_eq!(controller.row_state(b), Some(RowEditState::Viewing));
    assert_eq!(controller.store().get(b).unwrap().text, "b");
}

#[test]
fn delete_and_toggle_are_refused_while_editing() {
    let mut controller = mounted(5);
    let id = add(&mut controller, "busy");
    controller.start_edit(id);
    let writes_before = writes(&controller);

    assert_eq!(
        controller.handle(UserIntent::Delete(id)),
        IntentOutcome::Ignored(IgnoreReason::InvalidTransition)
    );
    assert_eq!(
        controller.handle(UserIntent::Toggle(id)),
        IntentOutcome::Ignored(IgnoreReason::InvalidTransition)
    );
    assert_eq!(writes(&controller), writes_before);
    assert_eq!(controller.row_state(id), Some(RowEditState::Editing));
}

#[test]
fn save_and_cancel_are_refused_while_viewing() {
    let mut controller = mounted(5);
    let id = add(&mut controller, "idle");

    assert_eq!(
        controller.commit_edit(id, "nope"),
        IntentOutcome::Ignored(IgnoreReason::InvalidTransition)
    );
    assert_eq!(
        controller.cancel_edit(id),
        IntentOutcome::Ignored(IgnoreReason::InvalidTransition)
    );
    assert_eq!(controller.store().get(id).unwrap().text, "idle");
}

#[test]
fn start_edit_twice_is_refused() {
    let mut controller = mounted(5);
    let id = add(&mut controller, "x");
    controller.start_edit(id);

    assert_eq!(
        controller.start_edit(id),
        IntentOutcome::Ignored(IgnoreReason::InvalidTransition)
    );
}

#[test]
fn unknown_ids_are_ignored_without_writes() {
    let mut controller = mounted(5);
    add(&mut controller, "x");
    let writes_before = writes(&controller);
    let missing = TodoId::new(1);

    for intent in [
        UserIntent::Toggle(missing),
        UserIntent::StartEdit(missing),
        UserIntent::CommitEdit(missing, "t".to_string()),
        UserIntent::CancelEdit(missing),
        UserIntent::Delete(missing),
    ] {
        assert_eq!(
            controller.handle(intent),
            IntentOutcome::Ignored(IgnoreReason::UnknownId)
        );
    }
    assert_eq!(writes(&controller), writes_before);
}

#[test]
fn toggle_rerenders_with_completed_item() {
    let mut controller = mounted(5);
    let id = add(&mut controller, "x");

    assert!(controller.handle(UserIntent::Toggle(id)).is_applied());

    assert!(controller.renderer().last_view().rows()[0].item.completed);
}

#[test]
fn clean_completed_resets_rows_and_shows_placeholder_when_empty() {
    let mut controller = mounted(5);
    let done = add(&mut controller, "done");
    controller.toggle(done);
    let open = add(&mut controller, "open");
    controller.start_edit(open);

    assert!(controller.handle(UserIntent::CleanCompleted).is_applied());

    assert_eq!(controller.store().count(), 1);
    assert_eq!(controller.row_state(open), Some(RowEditState::Viewing));
    assert_eq!(controller.row_state(done), None);

    controller.toggle(open);
    controller.clean_completed();
    assert_eq!(controller.renderer().last_view().body, ListBody::Placeholder);
}

#[test]
fn clean_completed_renders_even_when_nothing_is_removed() {
    let mut controller = mounted(5);
    add(&mut controller, "open");
    let renders = controller.renderer().views.len();

    assert!(controller.clean_completed().is_applied());
    assert_eq!(controller.renderer().views.len(), renders + 1);
}
