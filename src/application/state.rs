//! Application state for the terminal todo list.
//!
//! Holds the store, the form's text field, the selected row and the current
//! mode. Key handling in the presentation layer drives these methods.

use super::store::TodoStore;
use crate::domain::{StoreResult, TodoId};
use tracing::{debug, info};

/// Current mode of the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppMode {
    /// Moving through the list; gestures act on the selected row
    Normal,
    /// Typing into the "new todo" form
    Editing,
    /// Help popup is displayed
    Help,
}

/// UI behaviour that can be tuned from the config file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppOptions {
    /// Title of the list block
    pub title: String,
    /// Require the delete key twice on the same row
    pub confirm_delete: bool,
}

impl Default for AppOptions {
    fn default() -> Self {
        Self {
            title: "Todos".to_string(),
            confirm_delete: false,
        }
    }
}

/// Main application state.
///
/// The selection is kept as a [`TodoId`], never as a position: positions
/// are looked up in the current snapshot at the moment a gesture fires.
///
/// # Examples
///
/// ```
/// use todolist::application::{App, AppMode};
///
/// let app = App::default();
/// assert_eq!(app.mode, AppMode::Normal);
/// assert!(app.store.state().is_empty());
/// ```
#[derive(Debug)]
pub struct App {
    pub store: TodoStore,
    pub mode: AppMode,
    pub options: AppOptions,
    /// Text of the form field
    pub input: String,
    /// Cursor within `input`, counted in characters
    pub cursor_position: usize,
    /// Selected item, if any
    pub selected: Option<TodoId>,
    /// Row armed for deletion when `confirm_delete` is on
    pub pending_delete: Option<TodoId>,
    pub help_scroll: usize,
    /// Temporary status message to display
    pub status_message: Option<String>,
}

impl Default for App {
    fn default() -> Self {
        Self::new(AppOptions::default())
    }
}

impl App {
    pub fn new(options: AppOptions) -> Self {
        Self {
            store: TodoStore::new(),
            mode: AppMode::Normal,
            options,
            input: String::new(),
            cursor_position: 0,
            selected: None,
            pending_delete: None,
            help_scroll: 0,
            status_message: None,
        }
    }

    /// Focuses the form.
    pub fn start_editing(&mut self) {
        self.mode = AppMode::Editing;
        self.cursor_position = self.input.chars().count();
        self.status_message = None;
    }

    /// Leaves the form without adding anything.
    pub fn cancel_editing(&mut self) {
        self.mode = AppMode::Normal;
        self.input.clear();
        self.cursor_position = 0;
    }

    /// Submits the form: adds the field content as a pending todo and clears
    /// the field. Blank submissions are refused here; the store itself
    /// accepts any text.
    pub fn submit_form(&mut self) {
        if self.input.trim().is_empty() {
            self.status_message = Some("Nothing to add".to_string());
            return;
        }

        let description = std::mem::take(&mut self.input);
        self.cursor_position = 0;
        let result = self.store.dispatcher().add_todo(description);
        if self.report(result) {
            self.status_message = None;
            self.selected = self.store.state().todos.last().map(|todo| todo.id);
            info!(len = self.store.state().len(), "todo added");
        }
    }

    /// Position of the selected item in the current snapshot.
    pub fn selected_position(&self) -> Option<usize> {
        self.selected.and_then(|id| self.store.state().position_of(id))
    }

    pub fn select_next(&mut self) {
        let state = self.store.state();
        if state.is_empty() {
            self.selected = None;
            return;
        }
        let next = match self.selected_position() {
            Some(pos) => (pos + 1).min(state.len() - 1),
            None => 0,
        };
        self.select_position(next);
    }

    pub fn select_previous(&mut self) {
        let state = self.store.state();
        if state.is_empty() {
            self.selected = None;
            return;
        }
        let previous = match self.selected_position() {
            Some(pos) => pos.saturating_sub(1),
            None => state.len() - 1,
        };
        self.select_position(previous);
    }

    pub fn select_first(&mut self) {
        self.select_position(0);
    }

    pub fn select_last(&mut self) {
        let len = self.store.state().len();
        self.select_position(len.saturating_sub(1));
    }

    fn select_position(&mut self, position: usize) {
        self.selected = self.store.state().get(position).map(|todo| todo.id);
        self.pending_delete = None;
    }

    /// "Mark done" gesture on the selected row.
    pub fn mark_selected_done(&mut self) {
        let Some(position) = self.selected_position() else {
            self.status_message = Some("No todo selected".to_string());
            return;
        };
        let result = self.store.dispatcher().done_todo(position);
        self.report(result);
    }

    /// "Delete" gesture on the selected row.
    ///
    /// With `confirm_delete` the first press only arms the row.
    pub fn delete_selected(&mut self) {
        let Some(position) = self.selected_position() else {
            self.status_message = Some("No todo selected".to_string());
            return;
        };

        if self.options.confirm_delete && self.pending_delete != self.selected {
            self.pending_delete = self.selected;
            self.status_message = Some("Press delete again to remove this todo".to_string());
            return;
        }

        self.pending_delete = None;
        let result = self.store.dispatcher().delete_todo(position);
        if self.report(result) {
            let len = self.store.state().len();
            if len == 0 {
                self.selected = None;
            } else {
                self.select_position(position.min(len - 1));
            }
        }
    }

    /// Puts a rejected action in the status bar. Returns whether it succeeded.
    fn report(&mut self, result: StoreResult<()>) -> bool {
        match result {
            Ok(()) => true,
            Err(err) => {
                self.status_message = Some(format!("Error: {}", err));
                false
            }
        }
    }

    fn byte_index(&self, char_index: usize) -> usize {
        self.input
            .char_indices()
            .nth(char_index)
            .map(|(i, _)| i)
            .unwrap_or(self.input.len())
    }

    pub fn insert_char(&mut self, c: char) {
        let at = self.byte_index(self.cursor_position);
        self.input.insert(at, c);
        self.cursor_position += 1;
    }

    pub fn delete_before_cursor(&mut self) {
        if self.cursor_position > 0 {
            let at = self.byte_index(self.cursor_position - 1);
            self.input.remove(at);
            self.cursor_position -= 1;
        }
    }

    pub fn delete_at_cursor(&mut self) {
        if self.cursor_position < self.input.chars().count() {
            let at = self.byte_index(self.cursor_position);
            self.input.remove(at);
        }
    }

    pub fn move_cursor_left(&mut self) {
        self.cursor_position = self.cursor_position.saturating_sub(1);
    }

    pub fn move_cursor_right(&mut self) {
        if self.cursor_position < self.input.chars().count() {
            self.cursor_position += 1;
        }
    }

    pub fn move_cursor_home(&mut self) {
        self.cursor_position = 0;
    }

    pub fn move_cursor_end(&mut self) {
        self.cursor_position = self.input.chars().count();
    }

    pub fn open_help(&mut self) {
        debug!("opening help");
        self.mode = AppMode::Help;
        self.help_scroll = 0;
    }

    pub fn close_help(&mut self) {
        self.mode = AppMode::Normal;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            app.insert_char(c);
        }
    }

    fn add(app: &mut App, text: &str) {
        app.start_editing();
        type_text(app, text);
        app.submit_form();
        app.cancel_editing();
    }

    fn descriptions(app: &App) -> Vec<String> {
        app.store
            .state()
            .items()
            .map(|item| item.description.clone())
            .collect()
    }

    #[test]
    fn test_app_default() {
        let app = App::default();
        assert_eq!(app.mode, AppMode::Normal);
        assert!(app.input.is_empty());
        assert_eq!(app.cursor_position, 0);
        assert!(app.selected.is_none());
        assert_eq!(app.options.title, "Todos");
    }

    #[test]
    fn test_submit_adds_and_clears_field() {
        let mut app = App::default();
        app.start_editing();
        type_text(&mut app, "buy milk");
        app.submit_form();

        assert_eq!(descriptions(&app), vec!["buy milk"]);
        assert!(!app.store.state().todos[0].item.done);
        assert!(app.input.is_empty());
        assert_eq!(app.cursor_position, 0);
        assert_eq!(app.mode, AppMode::Editing);
        assert_eq!(app.selected_position(), Some(0));
    }

    #[test]
    fn test_submit_blank_is_refused() {
        let mut app = App::default();
        app.start_editing();
        type_text(&mut app, "   ");
        app.submit_form();

        assert!(app.store.state().is_empty());
        assert_eq!(app.status_message.as_deref(), Some("Nothing to add"));
    }

    #[test]
    fn test_successful_submit_clears_stale_status() {
        let mut app = App::default();
        app.start_editing();
        app.submit_form();
        assert_eq!(app.status_message.as_deref(), Some("Nothing to add"));

        type_text(&mut app, "milk");
        app.submit_form();
        assert_eq!(app.store.state().len(), 1);
        assert!(app.status_message.is_none());
    }

    #[test]
    fn test_cancel_editing_discards_text() {
        let mut app = App::default();
        app.start_editing();
        type_text(&mut app, "draft");
        app.cancel_editing();

        assert_eq!(app.mode, AppMode::Normal);
        assert!(app.input.is_empty());
        assert!(app.store.state().is_empty());
    }

    #[test]
    fn test_mark_selected_done() {
        let mut app = App::default();
        add(&mut app, "A");
        add(&mut app, "B");
        app.select_first();
        app.mark_selected_done();

        let state = app.store.state();
        assert!(state.todos[0].item.done);
        assert!(!state.todos[1].item.done);
    }

    #[test]
    fn test_selection_follows_item_across_delete() {
        let mut app = App::default();
        add(&mut app, "A");
        add(&mut app, "B");
        add(&mut app, "C");

        // Select C, then delete A out from under it.
        app.select_last();
        let c = app.selected;
        app.select_first();
        app.delete_selected();
        app.selected = c;

        assert_eq!(app.selected_position(), Some(1));
        app.mark_selected_done();
        let state = app.store.state();
        assert_eq!(state.todos[1].item.description, "C");
        assert!(state.todos[1].item.done);
        assert!(!state.todos[0].item.done);
    }

    #[test]
    fn test_delete_clamps_selection() {
        let mut app = App::default();
        add(&mut app, "A");
        add(&mut app, "B");
        app.select_last();
        app.delete_selected();

        assert_eq!(descriptions(&app), vec!["A"]);
        assert_eq!(app.selected_position(), Some(0));

        app.delete_selected();
        assert!(app.store.state().is_empty());
        assert!(app.selected.is_none());
    }

    #[test]
    fn test_gesture_without_selection() {
        let mut app = App::default();
        app.mark_selected_done();
        assert_eq!(app.status_message.as_deref(), Some("No todo selected"));
        app.delete_selected();
        assert_eq!(app.status_message.as_deref(), Some("No todo selected"));
    }

    #[test]
    fn test_confirm_delete_needs_two_presses() {
        let mut app = App::new(AppOptions {
            confirm_delete: true,
            ..AppOptions::default()
        });
        add(&mut app, "A");
        app.select_first();

        app.delete_selected();
        assert_eq!(app.store.state().len(), 1);
        assert!(app.pending_delete.is_some());

        app.delete_selected();
        assert!(app.store.state().is_empty());
        assert!(app.pending_delete.is_none());
    }

    #[test]
    fn test_moving_selection_disarms_delete() {
        let mut app = App::new(AppOptions {
            confirm_delete: true,
            ..AppOptions::default()
        });
        add(&mut app, "A");
        add(&mut app, "B");
        app.select_first();
        app.delete_selected();
        app.select_next();
        assert!(app.pending_delete.is_none());
        app.delete_selected();
        assert_eq!(app.store.state().len(), 2);
    }

    #[test]
    fn test_select_next_and_previous_bounds() {
        let mut app = App::default();
        app.select_next();
        assert!(app.selected.is_none());

        add(&mut app, "A");
        add(&mut app, "B");
        app.selected = None;
        app.select_next();
        assert_eq!(app.selected_position(), Some(0));
        app.select_next();
        app.select_next();
        assert_eq!(app.selected_position(), Some(1));
        app.select_previous();
        app.select_previous();
        assert_eq!(app.selected_position(), Some(0));
    }

    #[test]
    fn test_text_editing_with_multibyte_chars() {
        let mut app = App::default();
        app.start_editing();
        type_text(&mut app, "café");
        app.move_cursor_left();
        app.insert_char('x');
        assert_eq!(app.input, "cafxé");

        app.move_cursor_end();
        app.delete_before_cursor();
        assert_eq!(app.input, "cafx");

        app.move_cursor_home();
        app.delete_at_cursor();
        assert_eq!(app.input, "afx");
        assert_eq!(app.cursor_position, 0);

        app.move_cursor_right();
        assert_eq!(app.cursor_position, 1);
    }

    #[test]
    fn test_help_mode_transitions() {
        let mut app = App::default();
        app.help_scroll = 4;
        app.open_help();
        assert_eq!(app.mode, AppMode::Help);
        assert_eq!(app.help_scroll, 0);
        app.close_help();
        assert_eq!(app.mode, AppMode::Normal);
    }
}
