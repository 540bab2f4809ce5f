//! Plain-text `Renderer`.

use std::io::Write;
use todo_core::{ListBody, ListView, Renderer, RowAction, RowView};

const PLACEHOLDER: &str = "No tasks yet. Add your first task to get started.";

pub struct TextRenderer<W: Write> {
    out: W,
    muted: bool,
}

impl<W: Write> TextRenderer<W> {
    pub fn new(out: W) -> Self {
        Self { out, muted: false }
    }

    /// Suppresses output until unmuted; used for one-shot commands that only
    /// print the final list.
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Renderer for TextRenderer<W> {
    fn render(&mut self, view: &ListView) {
        if self.muted {
            return;
        }

        match &view.body {
            ListBody::Placeholder => {
                let _ = writeln!(self.out, "  {PLACEHOLDER}");
            }
            ListBody::Rows(rows) => {
                for row in rows {
                    let _ = writeln!(self.out, "{}", format_row(row));
                }
            }
        }

        let _ = writeln!(self.out, "{} / {}", view.count, view.capacity);
        if !view.submit_enabled {
            let _ = writeln!(self.out, "list is full; delete or clean tasks to add more");
        }
        let _ = self.out.flush();
    }

    fn update_row(&mut self, row: &RowView, focus: bool) {
        if self.muted {
            return;
        }

        let cursor = if focus { " <" } else { "" };
        let _ = writeln!(self.out, "{}{cursor}", format_row(row));
        let _ = self.out.flush();
    }
}

fn format_row(row: &RowView) -> String {
    let check = if row.item.completed { "x" } else { " " };
    let (primary, secondary) = row.state.actions();
    format!(
        "[{check}] {:<14} {}  ({} | {})",
        row.item.id,
        row.item.text,
        action_label(primary),
        action_label(secondary)
    )
}

fn action_label(action: RowAction) -> &'static str {
    match action {
        RowAction::Edit => "edit",
        RowAction::Delete => "delete",
        RowAction::Save => "save",
        RowAction::Cancel => "cancel",
    }
}

#[cfg(test)]
mod tests {
    use super::TextRenderer;
    use todo_core::{ListBody, ListView, Renderer, RowEditState, RowView, TodoId, TodoItem};

    fn output(renderer: TextRenderer<Vec<u8>>) -> String {
        String::from_utf8(renderer.into_inner()).expect("utf-8 output")
    }

    #[test]
    fn empty_list_prints_placeholder_and_capacity() {
        let mut renderer = TextRenderer::new(Vec::new());
        renderer.render(&ListView {
            body: ListBody::Placeholder,
            count: 0,
            capacity: 5,
            submit_enabled: true,
        });

        let text = output(renderer);
        assert!(text.contains("No tasks yet"));
        assert!(text.contains("0 / 5"));
        assert!(!text.contains("list is full"));
    }

    #[test]
    fn editing_row_shows_save_cancel_and_focus_marker() {
        let mut renderer = TextRenderer::new(Vec::new());
        let row = RowView {
            item: TodoItem {
                id: TodoId::new(3),
                text: "Walk dog".to_string(),
                completed: true,
            },
            state: RowEditState::Editing,
        };
        renderer.update_row(&row, true);

        let text = output(renderer);
        assert!(text.starts_with("[x] 3"));
        assert!(text.contains("Walk dog"));
        assert!(text.contains("(save | cancel)"));
        assert!(text.trim_end().ends_with('<'));
    }

    #[test]
    fn full_render_shows_edit_delete_for_viewing_rows_and_full_notice() {
        let mut renderer = TextRenderer::new(Vec::new());
        renderer.render(&ListView {
            body: ListBody::Rows(vec![RowView {
                item: TodoItem {
                    id: TodoId::new(9),
                    text: "Buy milk".to_string(),
                    completed: false,
                },
                state: RowEditState::Viewing,
            }]),
            count: 1,
            capacity: 1,
            submit_enabled: false,
        });

        let text = output(renderer);
        assert!(text.starts_with("[ ] 9"));
        assert!(text.contains("(edit | delete)"));
        assert!(!text.contains('<'));
        assert!(text.contains("1 / 1"));
        assert!(text.contains("list is full"));
    }

    #[test]
    fn muted_renderer_prints_nothing() {
        let mut renderer = TextRenderer::new(Vec::new());
        renderer.set_muted(true);
        renderer.render(&ListView {
            body: ListBody::Placeholder,
            count: 0,
            capacity: 5,
            submit_enabled: true,
        });
        assert!(output(renderer).is_empty());
    }
}
