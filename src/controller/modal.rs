//! Modal dialog state for record actions.
//!
//! At most one modal is open at a time. Simple actions open a
//! [`Modal::Confirm`] dialog; rejection opens a single-field reason form;
//! bulk scheduling opens a four-field notice form. Failures surface as a
//! [`Modal::Alert`], which can carry the interrupted form so a failed
//! rejection reopens its reason form after the alert is dismissed.

use bubbletea_rs::{KeyMsg, Msg};
use bubbletea_widgets::textinput;
use crossterm::event::KeyCode;

use crate::client::{Action, ScheduleNotice};

/// Visual tone of an alert modal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertTone {
    /// Informational notice.
    Info,
    /// Error notice.
    Error,
}

/// The modal dialog currently blocking list interaction, if any.
pub enum Modal {
    /// Yes/no confirmation for a pending action.
    Confirm {
        /// The action submitted when the user confirms.
        action: Action,
        /// Human-readable question shown in the dialog.
        prompt: String,
    },
    /// Reason form for rejecting one record.
    RejectForm {
        /// Identifier of the record being rejected.
        id: String,
        /// Reason text input.
        input: textinput::Model,
        /// Inline validation error, if the last submit attempt failed.
        error: Option<String>,
    },
    /// Notice form for scheduling the selected records.
    ScheduleForm(ScheduleForm),
    /// A message the user must dismiss before continuing.
    Alert {
        /// Visual tone of the message.
        tone: AlertTone,
        /// The message text.
        message: String,
        /// Modal restored after dismissal, used to reopen an interrupted form.
        resume: Option<Box<Modal>>,
    },
}

impl Modal {
    /// Creates a reject-reason form for one record with the input focused.
    ///
    /// Returns the modal together with the focus command for cursor blinking.
    pub(super) fn reject_form(id: &str) -> (Self, bubbletea_rs::Cmd) {
        let mut input = textinput::new();
        let cmd = input.focus();
        (
            Modal::RejectForm {
                id: id.to_string(),
                input,
                error: None,
            },
            cmd,
        )
    }
}

/// Field order within the schedule form.
const SCHEDULE_FIELDS: [&str; 4] = ["Title", "Date (YYYY-MM-DD)", "Time (HH:MM)", "Description"];

/// Four-field form collecting a schedule notice for the selected records.
pub struct ScheduleForm {
    inputs: Vec<textinput::Model>,
    focus: usize,
    /// Inline validation error, if the last submit attempt failed.
    pub(super) error: Option<String>,
}

impl ScheduleForm {
    /// Creates the form with the first field focused.
    ///
    /// Returns the form together with the focus command for cursor blinking.
    pub(super) fn new() -> (Self, bubbletea_rs::Cmd) {
        let mut inputs: Vec<textinput::Model> =
            SCHEDULE_FIELDS.iter().map(|_| textinput::new()).collect();
        let cmd = inputs[0].focus();
        (
            Self {
                inputs,
                focus: 0,
                error: None,
            },
            cmd,
        )
    }

    /// Label for each field, in display order.
    pub(super) fn labels(&self) -> &'static [&'static str] {
        &SCHEDULE_FIELDS
    }

    /// The inputs in display order.
    pub(super) fn inputs(&self) -> &[textinput::Model] {
        &self.inputs
    }

    /// Index of the focused field.
    pub(super) fn focus(&self) -> usize {
        self.focus
    }

    /// Whether the last field has focus, meaning enter submits.
    pub(super) fn on_last_field(&self) -> bool {
        self.focus + 1 == self.inputs.len()
    }

    /// Moves focus to the next field, wrapping around.
    pub(super) fn focus_next(&mut self) -> bubbletea_rs::Cmd {
        self.inputs[self.focus].blur();
        self.focus = (self.focus + 1) % self.inputs.len();
        self.inputs[self.focus].focus()
    }

    /// Moves focus to the previous field, wrapping around.
    pub(super) fn focus_prev(&mut self) -> bubbletea_rs::Cmd {
        self.inputs[self.focus].blur();
        self.focus = (self.focus + self.inputs.len() - 1) % self.inputs.len();
        self.inputs[self.focus].focus()
    }

    /// Forwards an editing key to the focused field.
    pub(super) fn handle_key(&mut self, key_msg: &KeyMsg) {
        let forwarded = Box::new(KeyMsg {
            key: key_msg.key,
            modifiers: key_msg.modifiers,
        }) as Msg;
        self.inputs[self.focus].update(forwarded);
    }

    /// Returns the notice if every field is filled in, or the first
    /// validation error otherwise.
    pub(super) fn notice(&self) -> Result<ScheduleNotice, String> {
        let mut values = Vec::with_capacity(self.inputs.len());
        for (input, label) in self.inputs.iter().zip(SCHEDULE_FIELDS) {
            let value = input.value().trim().to_string();
            if value.is_empty() {
                return Err(format!("{label} is required"));
            }
            values.push(value);
        }
        let mut values = values.into_iter();
        Ok(ScheduleNotice {
            title: values.next().unwrap_or_default(),
            date: values.next().unwrap_or_default(),
            time: values.next().unwrap_or_default(),
            description: values.next().unwrap_or_default(),
        })
    }
}

/// Forwards an editing key to a single-input form field.
pub(super) fn forward_key(input: &mut textinput::Model, key_msg: &KeyMsg) {
    match key_msg.key {
        KeyCode::Left => {
            let pos = input.position();
            if pos > 0 {
                input.set_cursor(pos - 1);
            }
        }
        KeyCode::Right => {
            input.set_cursor(input.position() + 1);
        }
        KeyCode::Home => input.cursor_start(),
        KeyCode::End => input.cursor_end(),
        _ => {
            let forwarded = Box::new(KeyMsg {
                key: key_msg.key,
                modifiers: key_msg.modifiers,
            }) as Msg;
            input.update(forwarded);
        }
    }
}
