//! Action submission and completion handling.
//!
//! Exactly one mutation may be in flight at a time. Submitting sets the
//! pending guard, issues the request as a command, and leaves the current
//! modal open; the completion message clears the guard, closes or restores
//! the modal, and re-fetches the collection so the display converges on
//! server state whether the mutation succeeded or not.

use bubbletea_rs::{Cmd, Msg};
use tracing::{debug, info, warn};

use super::modal::{AlertTone, Modal};
use super::Model;
use crate::client::{Action, ActionKind, MutationOutcome};
use crate::record::Record;

/// Message delivered when a record mutation finishes.
pub struct ActionCompletedMsg {
    /// Which action completed.
    pub kind: ActionKind,
    /// The server outcome, or a display-ready error message.
    pub result: Result<MutationOutcome, String>,
}

impl<R: Record> Model<R> {
    /// Submits a record action to the server.
    ///
    /// Returns `None` without issuing a request when another action is
    /// already in flight, when the action fails validation, or when no API
    /// is attached. Validation failures surface as an alert modal.
    pub fn submit_action(&mut self, action: Action) -> Option<Cmd> {
        if let Some(pending) = self.pending {
            debug!(pending = pending.label(), "action already in flight, ignoring");
            return None;
        }
        if let Err(message) = action.validate() {
            self.open_alert(AlertTone::Error, message);
            return None;
        }
        let api = match self.api.clone() {
            Some(api) => api,
            None => {
                self.open_alert(AlertTone::Error, "No server connection".to_string());
                return None;
            }
        };
        let kind = action.kind();
        self.pending = Some(kind);
        info!(action = kind.label(), "submitting record action");
        Some(Box::pin(async move {
            let result = api.mutate(action).await.map_err(|e| e.to_message());
            Some(Box::new(ActionCompletedMsg { kind, result }) as Msg)
        }))
    }

    /// Submits a partial field update for one record.
    ///
    /// This is the hook host applications use for edit flows of their own;
    /// the controller binds no key to it.
    pub fn submit_update(
        &mut self,
        id: &str,
        fields: serde_json::Map<String, serde_json::Value>,
    ) -> Option<Cmd> {
        self.submit_action(Action::Update {
            id: id.to_string(),
            fields,
        })
    }

    pub(super) fn handle_action_completed(&mut self, msg: &ActionCompletedMsg) -> Option<Cmd> {
        self.pending = None;
        match &msg.result {
            Ok(outcome) => {
                self.modal = None;
                let note = if outcome.message.is_empty() {
                    format!("{} succeeded", msg.kind.label())
                } else {
                    outcome.message.clone()
                };
                info!(action = msg.kind.label(), "record action succeeded");
                self.status = Some(note);
                if msg.kind.is_bulk() {
                    self.selection.reset();
                    self.selecting = false;
                }
                self.last_completed = Some(msg.kind);
                self.fetch_cmd(false)
            }
            Err(message) => {
                warn!(action = msg.kind.label(), %message, "record action failed");
                // A failed rejection reopens its reason form after the
                // alert is dismissed; other interrupted modals are dropped.
                let resume = match self.modal.take() {
                    Some(modal @ Modal::RejectForm { .. }) if msg.kind == ActionKind::Reject => {
                        Some(Box::new(modal))
                    }
                    _ => None,
                };
                self.modal = Some(Modal::Alert {
                    tone: AlertTone::Error,
                    message: message.clone(),
                    resume,
                });
                // Re-fetch so a mutation that failed because the record
                // changed server-side reconciles the display.
                self.fetch_cmd(false)
            }
        }
    }
}
