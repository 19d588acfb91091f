use tracing::{error, warn};

use crate::answers::{AnswerRecord, UpdateError};
use crate::binding::{bind_change, RawChange};
use crate::catalog::{FieldDescriptor, FieldKind};
use crate::submit::SubmitError;

/// Lifecycle of the single outbound submission.
/// `Submitting` gates the confirm control: at most one request in flight.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmissionState {
    Idle,
    Submitting,
    Done,
    Failed(String),
}

/// The form controller: catalog, current answers, focus cursor, and the
/// submission state machine. All mutation happens on the event loop thread.
pub struct FormSession {
    catalog: Vec<FieldDescriptor>,
    record: AnswerRecord,
    cursor: usize,
    state: SubmissionState,
}

impl FormSession {
    pub fn new(catalog: Vec<FieldDescriptor>) -> Self {
        FormSession {
            catalog,
            record: AnswerRecord::default(),
            cursor: 0,
            state: SubmissionState::Idle,
        }
    }

    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.catalog
    }

    pub fn record(&self) -> &AnswerRecord {
        &self.record
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn state(&self) -> &SubmissionState {
        &self.state
    }

    /// Index of the trailing submit control, one past the last field.
    pub fn submit_index(&self) -> usize {
        self.catalog.len()
    }

    pub fn on_submit_control(&self) -> bool {
        self.cursor == self.submit_index()
    }

    pub fn focused_field(&self) -> Option<&FieldDescriptor> {
        self.catalog.get(self.cursor)
    }

    pub fn focus_next(&mut self) {
        self.cursor = if self.cursor >= self.submit_index() {
            0
        } else {
            self.cursor + 1
        };
    }

    pub fn focus_prev(&mut self) {
        self.cursor = if self.cursor == 0 {
            self.submit_index()
        } else {
            self.cursor - 1
        };
    }

    /// What the input at `index` should display right now.
    pub fn display_value(&self, index: usize) -> String {
        match self.catalog.get(index) {
            Some(descriptor) => self.record.display(descriptor.field_name),
            None => String::new(),
        }
    }

    /// Routes one change notification through the binding into the record.
    pub fn on_change(&mut self, index: usize, change: RawChange) -> Result<(), UpdateError> {
        let Some(descriptor) = self.catalog.get(index) else {
            return Ok(());
        };
        let value = bind_change(descriptor.kind, change);
        self.record = self.record.apply_update(descriptor.field_name, value)?;
        Ok(())
    }

    /// Appends one character to the focused text or number input. Number
    /// inputs accept digits only, like their native counterparts.
    pub fn edit_char(&mut self, c: char) {
        let Some(descriptor) = self.focused_field() else {
            return;
        };
        match descriptor.kind {
            FieldKind::Checkbox => return,
            FieldKind::Number if !c.is_ascii_digit() => return,
            _ => {}
        }
        let mut buffer = self.display_value(self.cursor);
        buffer.push(c);
        self.change_focused(RawChange::Edited(buffer));
    }

    /// Removes the last character from the focused text or number input.
    pub fn backspace(&mut self) {
        let Some(descriptor) = self.focused_field() else {
            return;
        };
        if descriptor.kind == FieldKind::Checkbox {
            return;
        }
        let mut buffer = self.display_value(self.cursor);
        buffer.pop();
        self.change_focused(RawChange::Edited(buffer));
    }

    /// Flips the focused checkbox.
    pub fn toggle(&mut self) {
        let Some(descriptor) = self.focused_field() else {
            return;
        };
        if descriptor.kind != FieldKind::Checkbox {
            return;
        }
        let checked = self.record.is_checked(descriptor.field_name);
        self.change_focused(RawChange::Toggled(!checked));
    }

    fn change_focused(&mut self, change: RawChange) {
        if let Err(e) = self.on_change(self.cursor, change) {
            // Unreachable through the key handlers above; keep the record
            // intact and report it rather than dropping the session.
            warn!("Rejected field update: {e}");
        }
    }

    /// Takes a snapshot to send and enters `Submitting`, unless a submission
    /// is already in flight.
    pub fn begin_submit(&mut self) -> Option<AnswerRecord> {
        if self.state == SubmissionState::Submitting {
            return None;
        }
        self.state = SubmissionState::Submitting;
        Some(self.record.clone())
    }

    /// Resolves the in-flight submission. The record is untouched either
    /// way; a failure becomes a user-visible `Failed` state.
    pub fn complete(&mut self, result: Result<String, SubmitError>) {
        match result {
            Ok(_) => self.state = SubmissionState::Done,
            Err(e) => {
                error!("Error sending application: {e}");
                self.state = SubmissionState::Failed(e.to_string());
            }
        }
    }
}
