//! Record list controller: pagination, filtering, selection, and
//! server-backed record actions in one component.
//!
//! This module exposes a generic `Model<R: Record>` plus supporting traits
//! and submodules:
//! - [`crate::record::Record`]: implement for your record type
//! - [`RecordDelegate`]: controls row rendering; [`ColumnDelegate`] covers
//!   flat tables
//! - Submodules: `keys` and `style`
//!
//! ## Architecture Overview
//!
//! The controller is a bubbletea-rs model composed from small parts:
//!
//! - **Derived visibility**: the full collection is kept as fetched; the
//!   visible subset is re-derived from the active filters, preserving
//!   original order and indices.
//! - **Windowed pagination**: the page strip always shows the first page,
//!   the last page, and a window around the current page.
//! - **Identifier selection**: the selection stores record IDs, never
//!   positions, so it survives re-filtering and re-pagination.
//! - **One mutation at a time**: actions set a pending guard, run as
//!   commands, and report back through [`ActionCompletedMsg`]; every
//!   completion triggers a re-fetch so the display converges on server
//!   state.
//! - **Live refresh**: an optional [`Subscription`] re-fetches the
//!   collection when the host broadcasts a matching named event.
//!
//! ## Help Integration
//!
//! The controller implements `help::KeyMap`, so the embedded `help::Model`
//! shows contextual bindings for the current mode (browsing, searching, or
//! selecting).
//!
//! ## Example
//!
//! ```rust,no_run
//! use recordlist::client::{Endpoints, HttpApi};
//! use recordlist::controller::{Column, ColumnDelegate, Model};
//! use recordlist::record::Record;
//! use serde::Deserialize;
//!
//! #[derive(Clone, Deserialize)]
//! struct Applicant {
//!     id: String,
//!     #[serde(rename = "fullName")]
//!     full_name: String,
//!     email: String,
//! }
//!
//! impl Record for Applicant {
//!     fn id(&self) -> &str {
//!         &self.id
//!     }
//!     fn search_values(&self) -> Vec<String> {
//!         vec![self.full_name.clone(), self.email.clone()]
//!     }
//!     fn field(&self, key: &str) -> Option<String> {
//!         match key {
//!             "fullName" => Some(self.full_name.clone()),
//!             "email" => Some(self.email.clone()),
//!             _ => None,
//!         }
//!     }
//! }
//!
//! let api: HttpApi = HttpApi::new(Endpoints::for_base("https://api.school.test/applications"));
//! let delegate = ColumnDelegate::new(vec![
//!     Column::new("fullName", "Name", 24),
//!     Column::new("email", "Email", 28),
//! ]);
//! let mut list: Model<Applicant> = Model::new(delegate, 80, 24)
//!     .with_title("Applications")
//!     .with_api(api)
//!     .with_pending_badge();
//! let initial_fetch = list.activate();
//! ```

pub mod keys;
pub mod style;

mod actions;
mod modal;
mod model;
mod refresh;
mod rendering;
mod types;

pub use actions::ActionCompletedMsg;
pub use keys::ControllerKeyMap;
pub use modal::{AlertTone, Modal, ScheduleForm};
pub use model::Model;
pub use refresh::{
    channel, EventSender, RefreshCompletedMsg, RefreshEvent, RefreshEventMsg, Subscription,
};
pub use style::ControllerStyles;
pub use types::{Column, ColumnDelegate, RecordDelegate};

use bubbletea_rs::{Cmd, KeyMsg, Model as BubbleTeaModel, Msg, WindowSizeMsg};
use bubbletea_widgets::{help, key};
use crossterm::event::KeyCode;

use crate::client::Action;
use crate::record::Record;

impl<R: Record> Model<R> {
    /// Handles a key press while a modal is open.
    ///
    /// While a mutation is in flight the modal is inert; the completion
    /// message closes or restores it.
    fn handle_modal_key(&mut self, key_msg: &KeyMsg) -> Option<Cmd> {
        let modal = self.modal.take()?;
        if self.pending.is_some() {
            self.modal = Some(modal);
            return None;
        }
        match modal {
            Modal::Confirm { action, prompt } => match key_msg.key {
                KeyCode::Enter | KeyCode::Char('y') => {
                    let submit = action.clone();
                    self.modal = Some(Modal::Confirm { action, prompt });
                    self.submit_action(submit)
                }
                KeyCode::Esc | KeyCode::Char('n') => None,
                _ => {
                    self.modal = Some(Modal::Confirm { action, prompt });
                    None
                }
            },
            Modal::RejectForm {
                id,
                mut input,
                error,
            } => match key_msg.key {
                KeyCode::Esc => None,
                KeyCode::Enter => {
                    let reason = input.value();
                    if reason.trim().is_empty() {
                        self.modal = Some(Modal::RejectForm {
                            id,
                            input,
                            error: Some("a rejection reason is required".to_string()),
                        });
                        return None;
                    }
                    let action = Action::Reject {
                        id: id.clone(),
                        reason: reason.trim().to_string(),
                    };
                    self.modal = Some(Modal::RejectForm {
                        id,
                        input,
                        error: None,
                    });
                    self.submit_action(action)
                }
                _ => {
                    modal::forward_key(&mut input, key_msg);
                    self.modal = Some(Modal::RejectForm { id, input, error });
                    None
                }
            },
            Modal::ScheduleForm(mut form) => match key_msg.key {
                KeyCode::Esc => None,
                KeyCode::Tab | KeyCode::Down => {
                    let cmd = form.focus_next();
                    self.modal = Some(Modal::ScheduleForm(form));
                    Some(cmd)
                }
                KeyCode::BackTab | KeyCode::Up => {
                    let cmd = form.focus_prev();
                    self.modal = Some(Modal::ScheduleForm(form));
                    Some(cmd)
                }
                KeyCode::Enter => {
                    if !form.on_last_field() {
                        let cmd = form.focus_next();
                        self.modal = Some(Modal::ScheduleForm(form));
                        return Some(cmd);
                    }
                    match form.notice() {
                        Ok(notice) => {
                            let action = Action::Schedule {
                                ids: self.selection.ids(),
                                notice,
                            };
                            form.error = None;
                            self.modal = Some(Modal::ScheduleForm(form));
                            self.submit_action(action)
                        }
                        Err(message) => {
                            form.error = Some(message);
                            self.modal = Some(Modal::ScheduleForm(form));
                            None
                        }
                    }
                }
                _ => {
                    form.handle_key(key_msg);
                    self.modal = Some(Modal::ScheduleForm(form));
                    None
                }
            },
            Modal::Alert {
                tone,
                message,
                resume,
            } => match key_msg.key {
                KeyCode::Enter | KeyCode::Esc => {
                    self.modal = resume.map(|boxed| *boxed);
                    None
                }
                _ => {
                    self.modal = Some(Modal::Alert {
                        tone,
                        message,
                        resume,
                    });
                    None
                }
            },
        }
    }

    /// Handles a key press while the search input is active.
    fn handle_search_key(&mut self, key_msg: &KeyMsg) -> Option<Cmd> {
        match key_msg.key {
            KeyCode::Esc | KeyCode::Enter => {
                // Leave search mode; the applied query stays active.
                self.searching = false;
                self.search_input.blur();
                None
            }
            _ => {
                modal::forward_key(&mut self.search_input, key_msg);
                // Re-sync from the input's value whatever the key was: the
                // text widget also edits on kill bindings like ctrl+w and
                // ctrl+u.
                let query = self.search_input.value();
                if query != self.filters.query() {
                    self.filters.set_query(&query);
                    self.filters_changed();
                }
                None
            }
        }
    }

    /// Handles a key press in normal browsing mode.
    fn handle_list_key(&mut self, key_msg: &KeyMsg) -> Option<Cmd> {
        if self.keymap.cursor_up.matches(key_msg) {
            if self.cursor > 0 {
                self.cursor -= 1;
            } else if !self.pager.on_first_page() {
                // Page-turning: land on the last row of the previous page.
                self.pager.prev_page();
                self.cursor = self.page_records().len().saturating_sub(1);
            }
        } else if self.keymap.cursor_down.matches(key_msg) {
            if self.cursor + 1 < self.page_records().len() {
                self.cursor += 1;
            } else if !self.pager.on_last_page() {
                self.pager.next_page();
                self.cursor = 0;
            }
        } else if self.keymap.next_page.matches(key_msg) {
            self.pager.next_page();
            self.clamp_cursor();
        } else if self.keymap.prev_page.matches(key_msg) {
            self.pager.prev_page();
            self.clamp_cursor();
        } else if self.keymap.search.matches(key_msg) {
            self.searching = true;
            return Some(self.search_input.focus());
        } else if self.keymap.clear_filter.matches(key_msg) {
            if self.selecting {
                self.selecting = false;
                self.selection.reset();
            } else {
                self.clear_filters();
            }
        } else if self.keymap.toggle_select_mode.matches(key_msg) {
            self.selecting = !self.selecting;
            if !self.selecting {
                self.selection.reset();
            }
        } else if self.keymap.toggle_select.matches(key_msg) {
            if self.selecting {
                if let Some(id) = self.cursor_record().map(|r| r.id().to_string()) {
                    self.selection.toggle(&id);
                }
            }
        } else if self.keymap.select_page.matches(key_msg) {
            if self.selecting {
                let page_ids = self.page_ids();
                self.selection.select_page(&page_ids);
            }
        } else if self.keymap.approve.matches(key_msg) {
            return self.confirm_for_cursor(|id| {
                (Action::Approve { id: id.clone() }, format!("Approve record {id}?"))
            });
        } else if self.keymap.reject.matches(key_msg) {
            if let Some(id) = self.cursor_record().map(|r| r.id().to_string()) {
                let (modal, cmd) = Modal::reject_form(&id);
                self.modal = Some(modal);
                return Some(cmd);
            }
        } else if self.keymap.remove.matches(key_msg) {
            return self.confirm_for_cursor(|id| {
                (
                    Action::Remove { id: id.clone() },
                    format!("Remove record {id} from the active list?"),
                )
            });
        } else if self.keymap.delete.matches(key_msg) {
            return self.confirm_for_cursor(|id| {
                (
                    Action::Delete { id: id.clone() },
                    format!("Permanently delete record {id}?"),
                )
            });
        } else if self.keymap.archive.matches(key_msg) {
            return self.confirm_for_cursor(|id| {
                (Action::Archive { id: id.clone() }, format!("Archive record {id}?"))
            });
        } else if self.keymap.schedule.matches(key_msg) {
            if self.selection.is_empty() {
                self.open_alert(
                    AlertTone::Info,
                    "Select at least one record to schedule".to_string(),
                );
                return None;
            }
            let (form, cmd) = ScheduleForm::new();
            self.modal = Some(Modal::ScheduleForm(form));
            return Some(cmd);
        } else if self.keymap.bulk_delete.matches(key_msg) {
            if self.selection.is_empty() {
                self.open_alert(
                    AlertTone::Info,
                    "Select at least one record to delete".to_string(),
                );
                return None;
            }
            let count = self.selection.len();
            self.modal = Some(Modal::Confirm {
                action: Action::BulkDelete {
                    ids: self.selection.ids(),
                },
                prompt: format!("Permanently delete {count} selected records?"),
            });
        } else if self.keymap.refresh.matches(key_msg) {
            return self.refresh();
        } else if self.keymap.show_full_help.matches(key_msg)
            || self.keymap.close_full_help.matches(key_msg)
        {
            self.help.show_all = !self.help.show_all;
        } else if self.keymap.quit.matches(key_msg) {
            return Some(bubbletea_rs::quit());
        }
        None
    }

    /// Opens a confirmation modal for the record under the cursor.
    fn confirm_for_cursor(
        &mut self,
        build: impl FnOnce(&String) -> (Action, String),
    ) -> Option<Cmd> {
        let id = self.cursor_record().map(|r| r.id().to_string())?;
        let (action, prompt) = build(&id);
        self.modal = Some(Modal::Confirm { action, prompt });
        None
    }
}

// Help integration: contextual bindings for the current mode.
impl<R: Record> help::KeyMap for Model<R> {
    fn short_help(&self) -> Vec<&key::Binding> {
        if self.is_searching() {
            return vec![&self.keymap.accept_search, &self.keymap.cancel_search];
        }
        if self.is_selecting() {
            return vec![
                &self.keymap.toggle_select,
                &self.keymap.select_page,
                &self.keymap.schedule,
                &self.keymap.bulk_delete,
                &self.keymap.clear_filter,
            ];
        }
        vec![
            &self.keymap.cursor_up,
            &self.keymap.cursor_down,
            &self.keymap.search,
            &self.keymap.toggle_select_mode,
            &self.keymap.show_full_help,
        ]
    }

    fn full_help(&self) -> Vec<Vec<&key::Binding>> {
        vec![
            // Column 1: Navigation
            vec![
                &self.keymap.cursor_up,
                &self.keymap.cursor_down,
                &self.keymap.next_page,
                &self.keymap.prev_page,
            ],
            // Column 2: Search and Selection
            vec![
                &self.keymap.search,
                &self.keymap.clear_filter,
                &self.keymap.toggle_select_mode,
                &self.keymap.toggle_select,
                &self.keymap.select_page,
            ],
            // Column 3: Record Actions
            vec![
                &self.keymap.approve,
                &self.keymap.reject,
                &self.keymap.remove,
                &self.keymap.delete,
                &self.keymap.archive,
                &self.keymap.schedule,
                &self.keymap.bulk_delete,
            ],
            // Column 4: Misc
            vec![
                &self.keymap.refresh,
                &self.keymap.show_full_help,
                &self.keymap.quit,
            ],
        ]
    }
}

impl<R: Record> BubbleTeaModel for Model<R> {
    /// Initializes an empty controller with default dimensions.
    ///
    /// The runtime-constructed model has no columns and no API; real hosts
    /// build one with [`Model::new`] and the `with_*` builders instead.
    fn init() -> (Self, Option<Cmd>) {
        (Self::new(ColumnDelegate::new(Vec::new()), 80, 24), None)
    }

    fn update(&mut self, msg: Msg) -> Option<Cmd> {
        if let Some(size) = msg.downcast_ref::<WindowSizeMsg>() {
            self.set_size(size.width as usize, size.height as usize);
            return None;
        }

        // Async completions first. The fetch completion carries the
        // records by value, so it needs an owning downcast.
        let msg = match msg.downcast::<RefreshCompletedMsg<R>>() {
            Ok(done) => return self.handle_refresh_completed(*done),
            Err(msg) => msg,
        };
        if msg.downcast_ref::<RefreshEventMsg>().is_some() {
            return self.handle_refresh_event();
        }
        if let Some(done) = msg.downcast_ref::<ActionCompletedMsg>() {
            return self.handle_action_completed(done);
        }

        if let Some(key_msg) = msg.downcast_ref::<KeyMsg>() {
            if self.keymap.force_quit.matches(key_msg) {
                return Some(bubbletea_rs::quit());
            }
            // Any key press dismisses the transient status notification.
            self.status = None;
            if self.modal.is_some() {
                return self.handle_modal_key(key_msg);
            }
            if self.is_searching() {
                return self.handle_search_key(key_msg);
            }
            return self.handle_list_key(key_msg);
        }
        None
    }

    fn view(&self) -> String {
        let mut sections = vec![self.view_header()];
        if let Some(modal) = &self.modal {
            sections.push(self.view_modal(modal));
        } else {
            sections.push(self.view_table());
            let pagination = self.view_pagination();
            if !pagination.is_empty() {
                sections.push(pagination);
            }
        }
        sections.push(self.view_footer());
        sections.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::{ActionKind, ApiFuture, MutationOutcome, RecordApi};
    use crossterm::event::KeyModifiers;
    use std::sync::{Arc, Mutex};

    #[derive(Clone)]
    struct Rec {
        id: String,
        name: String,
    }

    impl Record for Rec {
        fn id(&self) -> &str {
            &self.id
        }
        fn search_values(&self) -> Vec<String> {
            vec![self.name.clone()]
        }
        fn field(&self, key: &str) -> Option<String> {
            (key == "name").then(|| self.name.clone())
        }
    }

    fn rec(id: &str, name: &str) -> Rec {
        Rec {
            id: id.to_string(),
            name: name.to_string(),
        }
    }

    struct MockApi {
        records: Vec<Rec>,
        mutations: Arc<Mutex<Vec<Action>>>,
        fail_message: Option<String>,
    }

    impl MockApi {
        fn new(records: Vec<Rec>) -> (Self, Arc<Mutex<Vec<Action>>>) {
            let mutations = Arc::new(Mutex::new(Vec::new()));
            (
                Self {
                    records,
                    mutations: Arc::clone(&mutations),
                    fail_message: None,
                },
                mutations,
            )
        }

        fn failing(records: Vec<Rec>, message: &str) -> (Self, Arc<Mutex<Vec<Action>>>) {
            let (mut api, mutations) = Self::new(records);
            api.fail_message = Some(message.to_string());
            (api, mutations)
        }
    }

    impl RecordApi<Rec> for MockApi {
        fn fetch_collection(&self) -> ApiFuture<Vec<Rec>> {
            let records = self.records.clone();
            Box::pin(async move { Ok(records) })
        }

        fn mutate(&self, action: Action) -> ApiFuture<MutationOutcome> {
            self.mutations.lock().unwrap().push(action);
            let fail = self.fail_message.clone();
            Box::pin(async move {
                match fail {
                    Some(message) => Err(crate::client::ApiError::Server {
                        status: 422,
                        message,
                    }),
                    None => Ok(MutationOutcome {
                        success: true,
                        message: String::new(),
                        data: None,
                    }),
                }
            })
        }

        fn fetch_pending_count(&self) -> ApiFuture<u64> {
            Box::pin(async { Ok(3) })
        }
    }

    fn model(records: Vec<Rec>) -> (Model<Rec>, Arc<Mutex<Vec<Action>>>) {
        let (api, mutations) = MockApi::new(records.clone());
        let delegate = ColumnDelegate::new(vec![Column::new("name", "Name", 20)]);
        let mut m = Model::new(delegate, 80, 24).with_api(api);
        m.set_records(records);
        (m, mutations)
    }

    fn press(m: &mut Model<Rec>, key: KeyCode) -> Option<Cmd> {
        m.update(Box::new(KeyMsg {
            key,
            modifiers: KeyModifiers::empty(),
        }) as Msg)
    }

    fn type_text(m: &mut Model<Rec>, text: &str) {
        for c in text.chars() {
            let _ = press(m, KeyCode::Char(c));
        }
    }

    #[tokio::test]
    async fn empty_reject_reason_issues_no_request() {
        let (mut m, mutations) = model(vec![rec("a", "Ana")]);

        let _ = press(&mut m, KeyCode::Char('r'));
        assert!(matches!(m.modal, Some(Modal::RejectForm { .. })));

        let cmd = press(&mut m, KeyCode::Enter);
        assert!(cmd.is_none());
        assert!(mutations.lock().unwrap().is_empty());
        match &m.modal {
            Some(Modal::RejectForm { error, .. }) => assert!(error.is_some()),
            _ => panic!("reject form should stay open with an inline error"),
        }
    }

    #[tokio::test]
    async fn reject_with_reason_submits_trimmed_text() {
        let (mut m, mutations) = model(vec![rec("a", "Ana")]);

        let _ = press(&mut m, KeyCode::Char('r'));
        type_text(&mut m, "incomplete documents ");
        let cmd = press(&mut m, KeyCode::Enter).expect("submit should issue a request");
        assert_eq!(m.pending_action(), Some(ActionKind::Reject));

        let completion = cmd.await.expect("mutation should resolve");
        let _ = m.update(completion);

        let recorded = mutations.lock().unwrap();
        assert_eq!(
            recorded[0],
            Action::Reject {
                id: "a".into(),
                reason: "incomplete documents".into(),
            }
        );
        assert!(m.modal.is_none());
        assert!(m.pending_action().is_none());
        assert!(m.status().is_some());
    }

    #[tokio::test]
    async fn bulk_schedule_sends_one_request_and_resets_selection() {
        let (mut m, mutations) = model(vec![rec("a", "Ana"), rec("b", "Ben"), rec("c", "Cho")]);

        let _ = press(&mut m, KeyCode::Char('v'));
        let _ = press(&mut m, KeyCode::Char(' ')); // selects "a"
        let _ = press(&mut m, KeyCode::Down);
        let _ = press(&mut m, KeyCode::Char(' ')); // selects "b"
        assert_eq!(m.selection().len(), 2);

        let _ = press(&mut m, KeyCode::Char('s'));
        type_text(&mut m, "Orientation");
        let _ = press(&mut m, KeyCode::Tab);
        type_text(&mut m, "2025-09-01");
        let _ = press(&mut m, KeyCode::Tab);
        type_text(&mut m, "10:00");
        let _ = press(&mut m, KeyCode::Tab);
        type_text(&mut m, "Main hall");

        let cmd = press(&mut m, KeyCode::Enter).expect("submit should issue a request");
        let completion = cmd.await.expect("mutation should resolve");
        let refetch = m.update(completion);

        let recorded = mutations.lock().unwrap();
        assert_eq!(recorded.len(), 1);
        match &recorded[0] {
            Action::Schedule { ids, notice } => {
                assert_eq!(ids, &vec!["a".to_string(), "b".to_string()]);
                assert_eq!(notice.title, "Orientation");
            }
            other => panic!("expected a schedule action, got {other:?}"),
        }
        assert!(m.selection().is_empty());
        assert!(!m.is_selecting());
        assert!(refetch.is_some());
        assert_eq!(m.take_last_completed(), Some(ActionKind::Schedule));
    }

    #[tokio::test]
    async fn schedule_without_selection_opens_an_alert() {
        let (mut m, mutations) = model(vec![rec("a", "Ana")]);
        let _ = press(&mut m, KeyCode::Char('s'));
        assert!(matches!(m.modal, Some(Modal::Alert { .. })));
        assert!(mutations.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn confirm_approve_round_trip() {
        let (mut m, mutations) = model(vec![rec("a", "Ana")]);

        let _ = press(&mut m, KeyCode::Char('a'));
        assert!(matches!(m.modal, Some(Modal::Confirm { .. })));

        let cmd = press(&mut m, KeyCode::Enter).expect("confirm should submit");
        assert_eq!(m.pending_action(), Some(ActionKind::Approve));
        let completion = cmd.await.expect("mutation should resolve");
        let _ = m.update(completion);

        assert_eq!(mutations.lock().unwrap()[0], Action::Approve { id: "a".into() });
        assert!(m.modal.is_none());
        assert_eq!(m.status(), Some("approve succeeded"));
    }

    #[tokio::test]
    async fn cancelled_confirm_issues_no_request() {
        let (mut m, mutations) = model(vec![rec("a", "Ana")]);
        let _ = press(&mut m, KeyCode::Char('d'));
        let _ = press(&mut m, KeyCode::Esc);
        assert!(m.modal.is_none());
        assert!(mutations.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn failed_rejection_reopens_its_form_after_the_alert() {
        let (api, mutations) = MockApi::failing(vec![rec("a", "Ana")], "already processed");
        let delegate = ColumnDelegate::new(vec![Column::new("name", "Name", 20)]);
        let mut m = Model::new(delegate, 80, 24).with_api(api);
        m.set_records(vec![rec("a", "Ana")]);

        let _ = press(&mut m, KeyCode::Char('r'));
        type_text(&mut m, "late submission");
        let cmd = press(&mut m, KeyCode::Enter).expect("submit should issue a request");
        let completion = cmd.await.expect("mutation should resolve");
        let _ = m.update(completion);

        assert_eq!(mutations.lock().unwrap().len(), 1);
        match &m.modal {
            Some(Modal::Alert { resume, .. }) => assert!(resume.is_some()),
            _ => panic!("failure should surface as an alert"),
        }

        let _ = press(&mut m, KeyCode::Enter);
        match &m.modal {
            Some(Modal::RejectForm { input, .. }) => {
                assert_eq!(input.value(), "late submission");
            }
            _ => panic!("dismissing the alert should restore the reject form"),
        }
    }

    #[tokio::test]
    async fn duplicate_submission_is_ignored_while_pending() {
        let (mut m, mutations) = model(vec![rec("a", "Ana")]);
        let _ = press(&mut m, KeyCode::Char('a'));
        let first = press(&mut m, KeyCode::Enter).expect("confirm issues a request");
        // The action stays pending until its completion is fed back, so a
        // repeated confirm must be a no-op.
        let second = press(&mut m, KeyCode::Enter);
        assert!(second.is_none());
        let completion = first.await;
        assert!(completion.is_some());
        assert_eq!(mutations.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn stale_fetch_responses_are_discarded() {
        let (mut m, _) = model(vec![rec("a", "Ana"), rec("b", "Ben")]);
        m.records.clear();
        m.reapply_filters();

        let first = m.refresh().expect("api attached");
        let second = m.refresh().expect("api attached");

        let stale = first.await.expect("fetch should resolve");
        let _ = m.update(stale);
        assert_eq!(m.total_len(), 0, "stale response must not apply");

        let fresh = second.await.expect("fetch should resolve");
        let _ = m.update(fresh);
        assert_eq!(m.total_len(), 2);
        assert!(!m.is_loading());
    }

    #[tokio::test]
    async fn live_refresh_event_triggers_refetch_and_rearm() {
        let tx = channel(8);
        let (api, _) = MockApi::new(vec![rec("a", "Ana")]);
        let delegate = ColumnDelegate::new(vec![Column::new("name", "Name", 20)]);
        let mut m: Model<Rec> = Model::new(delegate, 80, 24)
            .with_api(api)
            .with_pending_badge()
            .with_subscription(Subscription::subscribe(&tx, &["applications:changed"]));

        let fetch = m.activate().expect("api attached");
        let completion = fetch.await.expect("fetch should resolve");
        let listen = m.update(completion).expect("listener should be re-armed");
        assert_eq!(m.total_len(), 1);
        assert_eq!(m.pending_count(), Some(3));

        tx.send(RefreshEvent::new("applications:changed")).unwrap();
        let event = listen.await.expect("listener should resolve");
        let refetch = m.update(event);
        assert!(refetch.is_some(), "matching event should trigger a fetch");
    }

    #[tokio::test]
    async fn overlapping_manual_refresh_keeps_the_listener_armed() {
        let tx = channel(8);
        let (api, _) = MockApi::new(vec![rec("a", "Ana")]);
        let delegate = ColumnDelegate::new(vec![Column::new("name", "Name", 20)]);
        let mut m: Model<Rec> = Model::new(delegate, 80, 24)
            .with_api(api)
            .with_subscription(Subscription::subscribe(&tx, &["applications:changed"]));

        let fetch = m.activate().expect("api attached");
        let completion = fetch.await.expect("fetch should resolve");
        let listen = m.update(completion).expect("listener should be re-armed");

        tx.send(RefreshEvent::new("applications:changed")).unwrap();
        let event = listen.await.expect("listener should resolve");
        let push_fetch = m.update(event).expect("event should trigger a fetch");

        // A manual refresh supersedes the push-triggered fetch; the
        // listener re-arm must survive the superseded completion.
        let manual_fetch = m.refresh().expect("api attached");

        let stale = push_fetch.await.expect("fetch should resolve");
        let rearmed = m
            .update(stale)
            .expect("superseded push fetch still re-arms the listener");

        let fresh = manual_fetch.await.expect("fetch should resolve");
        assert!(m.update(fresh).is_none(), "manual fetch does not re-arm");

        tx.send(RefreshEvent::new("applications:changed")).unwrap();
        let event = rearmed.await.expect("listener should resolve");
        assert!(
            m.update(event).is_some(),
            "a later event still triggers a fetch"
        );
    }

    #[tokio::test]
    async fn detached_controller_ignores_refresh_events() {
        let tx = channel(8);
        let (api, _) = MockApi::new(vec![rec("a", "Ana")]);
        let delegate = ColumnDelegate::new(vec![Column::new("name", "Name", 20)]);
        let mut m: Model<Rec> = Model::new(delegate, 80, 24)
            .with_api(api)
            .with_subscription(Subscription::subscribe(&tx, &[]));

        m.detach();
        let event = Box::new(RefreshEventMsg {
            event: RefreshEvent::new("applications:changed"),
        }) as Msg;
        assert!(m.update(event).is_none(), "no fetch and no re-arm");
    }

    #[tokio::test]
    async fn search_narrows_and_escape_clears() {
        let (mut m, _) = model(vec![
            rec("a", "Maria Gonzalez"),
            rec("b", "Ben Santos"),
            rec("c", "Mario Reyes"),
        ]);

        let _ = press(&mut m, KeyCode::Char('/'));
        assert!(m.is_searching());
        type_text(&mut m, "maria");
        assert_eq!(m.len(), 1);

        let _ = press(&mut m, KeyCode::Enter);
        assert!(!m.is_searching());
        assert_eq!(m.len(), 1);

        let _ = press(&mut m, KeyCode::Esc);
        assert_eq!(m.len(), 3);
    }

    #[tokio::test]
    async fn kill_binding_in_search_resyncs_the_filter() {
        let (mut m, _) = model(vec![rec("a", "Maria Gonzalez"), rec("b", "Ben Santos")]);

        let _ = press(&mut m, KeyCode::Char('/'));
        type_text(&mut m, "maria");
        assert_eq!(m.len(), 1);

        // ctrl+u kills the line inside the text input.
        let _ = m.update(Box::new(KeyMsg {
            key: KeyCode::Char('u'),
            modifiers: KeyModifiers::CONTROL,
        }) as Msg);
        assert_eq!(m.len(), 2, "cleared input should clear the applied query");
    }

    #[tokio::test]
    async fn close_full_help_binding_collapses_help() {
        let (mut m, _) = model(vec![rec("a", "Ana")]);
        // Move the open binding away so only close_full_help matches '?'.
        m.keymap.show_full_help = key::Binding::new(vec![KeyCode::F(12)]);
        m.help.show_all = true;

        let _ = press(&mut m, KeyCode::Char('?'));
        assert!(!m.help.show_all);
    }

    #[test]
    fn loading_marker_appears_in_the_header() {
        let (mut m, _) = model(vec![rec("a", "Ana")]);
        assert!(!m.view().contains("fetching"));
        m.loading = true;
        assert!(m.view().contains("fetching"));
    }

    #[test]
    fn view_renders_rows_and_pagination() {
        let records: Vec<Rec> = (0..23)
            .map(|i| rec(&format!("id-{i}"), &format!("Record {i}")))
            .collect();
        let (m, _) = model(records);
        let view = m.view();
        assert!(view.contains("Record 0"));
        assert!(view.contains("Record 9"));
        assert!(!view.contains("Record 10"), "only the first page renders");
    }
}
