//! Key bindings for record list navigation, filtering, selection, and actions.
//!
//! ## Navigation Keys
//!
//! - **Cursor Movement**: `↑/k` (up), `↓/j` (down)
//! - **Page Navigation**: `→/l/pgdn` (next page), `←/h/pgup` (prev page)
//!
//! ## Search Keys
//!
//! - **Start Search**: `/` (enter search mode)
//! - **Clear Filters**: `esc` (clear active filters)
//! - **Accept Search**: `enter` (apply and leave search mode)
//!
//! ## Selection Keys
//!
//! - **Selection Mode**: `v` (toggle), `space` (toggle record), `A` (toggle page)
//!
//! ## Record Actions
//!
//! `a` approve, `r` reject, `x` remove, `d` delete, `t` archive,
//! `s` schedule selected, `D` delete selected, `R` refresh.

use bubbletea_widgets::key;
use crossterm::event::KeyCode;

/// Key bindings for the record list controller.
#[derive(Debug, Clone)]
pub struct ControllerKeyMap {
    /// Move the cursor up one row.
    pub cursor_up: key::Binding,
    /// Move the cursor down one row.
    pub cursor_down: key::Binding,
    /// Go to the next page.
    pub next_page: key::Binding,
    /// Go to the previous page.
    pub prev_page: key::Binding,
    /// Enter search mode.
    pub search: key::Binding,
    /// Clear active filters (or exit selection mode).
    pub clear_filter: key::Binding,
    /// Cancel search input.
    pub cancel_search: key::Binding,
    /// Apply the current search input.
    pub accept_search: key::Binding,
    /// Toggle selection mode.
    pub toggle_select_mode: key::Binding,
    /// Toggle selection of the record under the cursor.
    pub toggle_select: key::Binding,
    /// Toggle selection of every record on the current page.
    pub select_page: key::Binding,
    /// Approve the record under the cursor.
    pub approve: key::Binding,
    /// Reject the record under the cursor (opens a reason form).
    pub reject: key::Binding,
    /// Remove the record under the cursor from the active list.
    pub remove: key::Binding,
    /// Delete the record under the cursor.
    pub delete: key::Binding,
    /// Archive the record under the cursor.
    pub archive: key::Binding,
    /// Schedule the selected records (opens a notice form).
    pub schedule: key::Binding,
    /// Delete the selected records.
    pub bulk_delete: key::Binding,
    /// Re-fetch the collection from the server.
    pub refresh: key::Binding,
    /// Show the full help panel.
    pub show_full_help: key::Binding,
    /// Close the full help panel.
    pub close_full_help: key::Binding,
    /// Quit.
    pub quit: key::Binding,
    /// Force quit.
    pub force_quit: key::Binding,
}

impl Default for ControllerKeyMap {
    fn default() -> Self {
        Self {
            cursor_up: key::Binding::new(vec![KeyCode::Up, KeyCode::Char('k')])
                .with_help("↑/k", "up"),
            cursor_down: key::Binding::new(vec![KeyCode::Down, KeyCode::Char('j')])
                .with_help("↓/j", "down"),
            next_page: key::Binding::new(vec![
                KeyCode::Right,
                KeyCode::Char('l'),
                KeyCode::PageDown,
            ])
            .with_help("→/l/pgdn", "next page"),
            prev_page: key::Binding::new(vec![
                KeyCode::Left,
                KeyCode::Char('h'),
                KeyCode::PageUp,
            ])
            .with_help("←/h/pgup", "prev page"),
            search: key::Binding::new(vec![KeyCode::Char('/')]).with_help("/", "search"),
            clear_filter: key::Binding::new(vec![KeyCode::Esc]).with_help("esc", "clear filters"),
            cancel_search: key::Binding::new(vec![KeyCode::Esc]).with_help("esc", "cancel"),
            accept_search: key::Binding::new(vec![KeyCode::Enter])
                .with_help("enter", "apply search"),
            toggle_select_mode: key::Binding::new(vec![KeyCode::Char('v')])
                .with_help("v", "select mode"),
            toggle_select: key::Binding::new(vec![KeyCode::Char(' ')])
                .with_help("space", "toggle select"),
            select_page: key::Binding::new(vec![KeyCode::Char('A')]).with_help("A", "select page"),
            approve: key::Binding::new(vec![KeyCode::Char('a')]).with_help("a", "approve"),
            reject: key::Binding::new(vec![KeyCode::Char('r')]).with_help("r", "reject"),
            remove: key::Binding::new(vec![KeyCode::Char('x')]).with_help("x", "remove"),
            delete: key::Binding::new(vec![KeyCode::Char('d')]).with_help("d", "delete"),
            archive: key::Binding::new(vec![KeyCode::Char('t')]).with_help("t", "archive"),
            schedule: key::Binding::new(vec![KeyCode::Char('s')])
                .with_help("s", "schedule selected"),
            bulk_delete: key::Binding::new(vec![KeyCode::Char('D')])
                .with_help("D", "delete selected"),
            refresh: key::Binding::new(vec![KeyCode::Char('R')]).with_help("R", "refresh"),
            show_full_help: key::Binding::new(vec![KeyCode::Char('?')]).with_help("?", "more"),
            close_full_help: key::Binding::new(vec![KeyCode::Char('?')])
                .with_help("?", "close help"),
            quit: key::Binding::new(vec![KeyCode::Char('q')]).with_help("q", "quit"),
            force_quit: key::new_binding(vec![key::with_keys_str(&["ctrl+c"])])
                .with_help("ctrl+c", "force quit"),
        }
    }
}

impl key::KeyMap for ControllerKeyMap {
    fn short_help(&self) -> Vec<&key::Binding> {
        vec![
            &self.cursor_up,
            &self.cursor_down,
            &self.search,
            &self.toggle_select_mode,
            &self.show_full_help,
        ]
    }

    fn full_help(&self) -> Vec<Vec<&key::Binding>> {
        vec![
            // Column 1: Navigation
            vec![
                &self.cursor_up,
                &self.cursor_down,
                &self.next_page,
                &self.prev_page,
            ],
            // Column 2: Search and Selection
            vec![
                &self.search,
                &self.clear_filter,
                &self.toggle_select_mode,
                &self.toggle_select,
                &self.select_page,
            ],
            // Column 3: Record Actions
            vec![
                &self.approve,
                &self.reject,
                &self.remove,
                &self.delete,
                &self.archive,
                &self.schedule,
                &self.bulk_delete,
            ],
            // Column 4: Misc
            vec![&self.refresh, &self.show_full_help, &self.quit],
        ]
    }
}
