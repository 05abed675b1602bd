//! View rendering for the record list controller.
//!
//! The view composes four sections: header (title or search input), the
//! record table, the pagination strip, and the footer (status bar plus
//! help). An open modal replaces the table and pagination sections until
//! it is dismissed.

use super::modal::{AlertTone, Modal};
use super::style::ELLIPSIS;
use super::Model;
use crate::pagination::{PageSlot, DEFAULT_MAX_VISIBLE};
use crate::record::Record;
use crate::selection::PageState;

/// Shown in the header while a fetch is in flight. The controller issues
/// at most one command per update, so there is no slot for an animation
/// timer alongside the fetch itself.
const LOADING_MARKER: &str = "fetching…";

impl<R: Record> Model<R> {
    /// Renders the title bar, or the search input while searching.
    pub(super) fn view_header(&self) -> String {
        if self.searching {
            return format!(
                "{} {}",
                self.styles.search_prompt.clone().render("Search:"),
                self.search_input.view()
            );
        }
        let mut header = self.styles.title.clone().render(&self.title);
        if self.track_pending_count {
            if let Some(count) = self.pending_count {
                header.push(' ');
                header.push_str(
                    &self
                        .styles
                        .badge
                        .clone()
                        .render(&format!("● {count} pending")),
                );
            }
        }
        if !self.filters.is_empty() {
            header.push_str(&format!(" (filtered: {})", self.len()));
        }
        if self.loading {
            header.push(' ');
            header.push_str(&self.styles.loading.clone().render(LOADING_MARKER));
        }
        self.styles.title_bar.clone().render(&header)
    }

    /// Renders the column header and the rows of the current page.
    pub(super) fn view_table(&self) -> String {
        if self.is_empty() {
            let message = if self.filters.is_empty() {
                "No records."
            } else {
                "No records match the active filters."
            };
            return self.styles.no_records.clone().render(message);
        }

        let mut lines = Vec::new();
        let header = self.delegate.header(self);
        if !header.is_empty() {
            let gutter = if self.selecting { "      " } else { "  " };
            lines.push(
                self.styles
                    .table_header
                    .clone()
                    .render(&format!("{gutter}{header}")),
            );
        }

        for (offset, fr) in self.page_records().iter().enumerate() {
            let marker = if offset == self.cursor { "> " } else { "  " };
            let checkbox = if self.selecting {
                if self.selection.contains(fr.record.id()) {
                    "[x] "
                } else {
                    "[ ] "
                }
            } else {
                ""
            };
            let body = self.delegate.render(self, fr.index, &fr.record);
            let line = format!("{marker}{checkbox}{body}");
            let styled = if offset == self.cursor {
                self.styles.cursor_row.clone().render(&line)
            } else if self.selecting && self.selection.contains(fr.record.id()) {
                self.styles.selected_row.clone().render(&line)
            } else {
                self.styles.row.clone().render(&line)
            };
            lines.push(styled);
            for _ in 0..self.delegate.spacing() {
                lines.push(String::new());
            }
        }

        lines.join("\n")
    }

    /// Renders the windowed pagination strip, or nothing for one page.
    pub(super) fn view_pagination(&self) -> String {
        if self.total_pages() <= 1 {
            return String::new();
        }
        let parts: Vec<String> = self
            .pager
            .window(DEFAULT_MAX_VISIBLE)
            .into_iter()
            .map(|slot| match slot {
                PageSlot::Prev { disabled } => {
                    let style = if disabled {
                        &self.styles.disabled_page
                    } else {
                        &self.styles.inactive_page
                    };
                    style.clone().render("«")
                }
                PageSlot::Next { disabled } => {
                    let style = if disabled {
                        &self.styles.disabled_page
                    } else {
                        &self.styles.inactive_page
                    };
                    style.clone().render("»")
                }
                PageSlot::Page { number, current } => {
                    let text = number.to_string();
                    if current {
                        self.styles.active_page.clone().render(&text)
                    } else {
                        self.styles.inactive_page.clone().render(&text)
                    }
                }
                PageSlot::Ellipsis => self.styles.disabled_page.clone().render(ELLIPSIS),
            })
            .collect();
        self.styles.pagination.clone().render(&parts.join(" "))
    }

    /// Renders the status bar, any transient notification, and help.
    pub(super) fn view_footer(&self) -> String {
        let mut status = String::new();
        if self.is_empty() {
            status.push_str("0 records");
        } else {
            let (start, end) = self.pager.slice_bounds(self.len());
            status.push_str(&format!("{}–{} of {} records", start + 1, end, self.len()));
        }
        if !self.filters.is_empty() {
            status.push_str(&format!(" (filtered from {})", self.total_len()));
        }
        if !self.selection.is_empty() {
            status.push_str(&format!(" • {} selected", self.selection.len()));
            if self.selecting && self.page_selection_state() == PageState::All {
                status.push_str(" (page)");
            }
        }

        let mut footer = self.styles.status_bar.clone().render(&status);
        if let Some(note) = &self.status {
            footer.push('\n');
            footer.push_str(&self.styles.status_message.clone().render(note));
        }
        let help_view = self.help.view(self);
        if !help_view.is_empty() {
            footer.push('\n');
            footer.push_str(&self.styles.help_style.clone().render(&help_view));
        }
        footer
    }

    /// Renders the open modal.
    pub(super) fn view_modal(&self, modal: &Modal) -> String {
        let hint = |text: &str| self.styles.modal_hint.clone().render(text);
        match modal {
            Modal::Confirm { prompt, .. } => {
                let mut lines = vec![
                    self.styles.modal_title.clone().render("Confirm"),
                    String::new(),
                    prompt.clone(),
                    String::new(),
                ];
                if self.pending.is_some() {
                    lines.push(hint("submitting…"));
                } else {
                    lines.push(hint("enter confirm • esc cancel"));
                }
                lines.join("\n")
            }
            Modal::RejectForm { input, error, .. } => {
                let mut lines = vec![
                    self.styles.modal_title.clone().render("Reject record"),
                    String::new(),
                    format!("Reason: {}", input.view()),
                ];
                if let Some(error) = error {
                    lines.push(self.styles.modal_error.clone().render(error));
                }
                lines.push(String::new());
                if self.pending.is_some() {
                    lines.push(hint("submitting…"));
                } else {
                    lines.push(hint("enter submit • esc cancel"));
                }
                lines.join("\n")
            }
            Modal::ScheduleForm(form) => {
                let mut lines = vec![
                    self.styles
                        .modal_title
                        .clone()
                        .render(&format!("Schedule {} records", self.selection.len())),
                    String::new(),
                ];
                for (i, (label, input)) in form.labels().iter().zip(form.inputs()).enumerate() {
                    let marker = if i == form.focus() { "> " } else { "  " };
                    lines.push(format!("{marker}{label}: {}", input.view()));
                }
                if let Some(error) = &form.error {
                    lines.push(self.styles.modal_error.clone().render(error));
                }
                lines.push(String::new());
                if self.pending.is_some() {
                    lines.push(hint("submitting…"));
                } else {
                    lines.push(hint("tab next field • enter submit • esc cancel"));
                }
                lines.join("\n")
            }
            Modal::Alert { tone, message, .. } => {
                let (title, body) = match tone {
                    AlertTone::Error => (
                        self.styles.modal_title.clone().render("Error"),
                        self.styles.modal_error.clone().render(message),
                    ),
                    AlertTone::Info => (
                        self.styles.modal_title.clone().render("Notice"),
                        message.clone(),
                    ),
                };
                [title, String::new(), body, String::new(), hint("enter dismiss")].join("\n")
            }
        }
    }
}
