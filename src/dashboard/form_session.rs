//! # Form Editing Session
//!
//! Owns the editor draft. A draft is opened empty (create) or as a copy of a
//! displayed record (edit), edited field by field, then submitted or
//! cancelled. Submitting only validates and hands out the record to send;
//! the store reply comes back through [`FormSession::complete_submit`].
//!
//! Every open or cancel starts a new draft generation. A reply for an older
//! generation is reported but never touches the current draft.

use crate::dashboard::models::{
    DraftMode, DraftSession, ErrorDetail, ErrorKind, Record, RecordField, RecordId,
};
use crate::dashboard::services::{ServiceError, SubmitTicket};
use reqwest::Url;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormError {
    #[error("no record is being edited")]
    NotActive,

    #[error("a save is already in progress")]
    SubmitInFlight,

    #[error("required fields are empty: {}", field_list(.0))]
    MissingFields(Vec<RecordField>),

    #[error("image must be an absolute URL: {0}")]
    InvalidImage(String),

    #[error("record has no id and cannot be edited")]
    MissingRecordId,

    #[error("record {0} is not on the displayed page")]
    RecordNotDisplayed(RecordId),
}

fn field_list(fields: &[RecordField]) -> String {
    fields
        .iter()
        .map(|field| field.name())
        .collect::<Vec<_>>()
        .join(", ")
}

impl FormError {
    /// Detail to attach to the draft, for errors about its contents
    fn draft_detail(&self) -> Option<ErrorDetail> {
        match self {
            FormError::MissingFields(_) | FormError::InvalidImage(_) => {
                Some(ErrorDetail::new(ErrorKind::Validation, self.to_string()))
            }
            _ => None,
        }
    }
}

/// Check a draft before it is sent to the store
pub fn validate_draft(record: &Record) -> Result<(), FormError> {
    let missing = record.missing_required_fields();
    if !missing.is_empty() {
        return Err(FormError::MissingFields(missing));
    }
    if let Some(image) = &record.image {
        if Url::parse(image).is_err() {
            return Err(FormError::InvalidImage(image.clone()));
        }
    }
    Ok(())
}

#[derive(Debug, Default)]
pub struct FormSession {
    draft: DraftSession,
    generation: u64,
}

impl FormSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn draft(&self) -> &DraftSession {
        &self.draft
    }

    pub fn is_active(&self) -> bool {
        self.draft.active
    }

    pub fn is_submitting(&self) -> bool {
        self.draft.submitting
    }

    /// Open an empty draft for a new record, replacing any open draft
    pub fn open_for_new(&mut self) {
        self.generation += 1;
        self.draft = DraftSession::for_new();
        tracing::debug!("Draft #{} opened for new record", self.generation);
    }

    /// Open a draft holding a copy of `record`, replacing any open draft
    pub fn open_for_edit(&mut self, record: &Record) -> Result<(), FormError> {
        if record.is_new() {
            return Err(FormError::MissingRecordId);
        }
        self.generation += 1;
        self.draft = DraftSession::for_edit(record.clone());
        tracing::debug!("Draft #{} opened for record {}", self.generation, record.id);
        Ok(())
    }

    /// Set a field by name. Returns the field, or `None` when the name is
    /// unknown or no draft is open; both leave the draft unchanged.
    pub fn set_field(&mut self, name: &str, value: &str) -> Option<RecordField> {
        if !self.draft.active {
            return None;
        }
        match name.parse::<RecordField>() {
            Ok(field) => {
                self.draft.record.set_field(field, value);
                Some(field)
            }
            Err(e) => {
                tracing::debug!("Ignoring edit: {}", e);
                None
            }
        }
    }

    /// Validate the draft and mark it as submitting. Returns the ticket to
    /// match the reply with, and the record to send.
    ///
    /// On validation failure the draft stays open and intact, with the error
    /// attached.
    pub fn submit(&mut self) -> Result<(SubmitTicket, Record), FormError> {
        if !self.draft.active {
            return Err(FormError::NotActive);
        }
        if self.draft.submitting {
            tracing::debug!("Submit ignored, draft #{} already submitting", self.generation);
            return Err(FormError::SubmitInFlight);
        }
        if let Err(e) = validate_draft(&self.draft.record) {
            self.draft.error = e.draft_detail();
            return Err(e);
        }

        self.draft.error = None;
        self.draft.submitting = true;
        let ticket = SubmitTicket {
            generation: self.generation,
            mode: self.draft.mode,
        };
        Ok((ticket, self.draft.record.clone()))
    }

    /// Apply the store reply for a submit. On success the matching draft
    /// closes and resets to an empty new record; on failure it stays open
    /// with the error attached. Replies for replaced drafts only report.
    pub fn complete_submit(
        &mut self,
        ticket: SubmitTicket,
        result: Result<Record, ServiceError>,
    ) -> Result<Record, ErrorDetail> {
        let current = ticket.generation == self.generation;
        if !current {
            tracing::debug!(
                "Reply for draft #{} arrived after it was replaced by #{}",
                ticket.generation,
                self.generation
            );
        }

        match result {
            Ok(stored) => {
                if current {
                    self.generation += 1;
                    self.draft = DraftSession::closed();
                }
                Ok(stored)
            }
            Err(error) => {
                let detail = ErrorDetail::from(&error);
                if current {
                    self.draft.submitting = false;
                    self.draft.error = Some(detail.clone());
                }
                Err(detail)
            }
        }
    }

    /// Close and discard the draft without contacting the store
    pub fn cancel(&mut self) {
        self.generation += 1;
        self.draft = DraftSession::closed();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stored_record(id: RecordId) -> Record {
        Record {
            id,
            title: "Unit 4".to_string(),
            description: "Basic life support".to_string(),
            location: "East depot".to_string(),
            image: None,
        }
    }

    fn filled_new_session() -> FormSession {
        let mut form = FormSession::new();
        form.open_for_new();
        form.set_field("title", "Unit 9");
        form.set_field("description", "Rapid response");
        form.set_field("location", "Harbour");
        form
    }

    #[test]
    fn open_for_new_should_start_with_empty_record() {
        let mut form = FormSession::new();
        form.open_for_new();

        assert!(form.is_active());
        assert_eq!(form.draft().mode, DraftMode::New);
        assert_eq!(form.draft().record, Record::empty());
    }

    #[test]
    fn open_for_edit_should_copy_the_record() {
        let mut form = FormSession::new();
        let mut record = stored_record(4);
        form.open_for_edit(&record).unwrap();

        record.title = "Changed elsewhere".to_string();

        assert_eq!(form.draft().mode, DraftMode::Edit);
        assert_eq!(form.draft().record.title, "Unit 4");
    }

    #[test]
    fn open_for_edit_should_refuse_unsaved_record() {
        let mut form = FormSession::new();
        assert_eq!(
            form.open_for_edit(&Record::empty()),
            Err(FormError::MissingRecordId)
        );
        assert!(!form.is_active());
    }

    #[test]
    fn opening_again_should_replace_the_draft() {
        let mut form = FormSession::new();
        form.open_for_edit(&stored_record(4)).unwrap();
        form.open_for_new();

        assert_eq!(form.draft().mode, DraftMode::New);
        assert!(form.draft().record.is_new());
    }

    #[test]
    fn set_field_should_ignore_unknown_names() {
        let mut form = FormSession::new();
        form.open_for_edit(&stored_record(4)).unwrap();
        let before = form.draft().clone();

        assert_eq!(form.set_field("colour", "red"), None);
        assert_eq!(form.draft(), &before);
    }

    #[test]
    fn set_field_should_need_an_open_draft() {
        let mut form = FormSession::new();
        assert_eq!(form.set_field("title", "x"), None);
        assert_eq!(form.draft().record.title, "");
    }

    #[test]
    fn submit_with_missing_fields_should_keep_draft_open() {
        let mut form = FormSession::new();
        form.open_for_new();
        form.set_field("title", "Only a title");

        let error = form.submit().unwrap_err();

        assert_eq!(
            error,
            FormError::MissingFields(vec![RecordField::Description, RecordField::Location])
        );
        assert!(form.is_active());
        assert!(!form.is_submitting());
        assert_eq!(form.draft().record.title, "Only a title");
        assert_eq!(form.draft().error.as_ref().unwrap().kind, ErrorKind::Validation);
    }

    #[test]
    fn submit_with_relative_image_should_fail_validation() {
        let mut form = filled_new_session();
        form.set_field("image", "pictures/unit.png");

        assert_eq!(
            form.submit().unwrap_err(),
            FormError::InvalidImage("pictures/unit.png".to_string())
        );
    }

    #[test]
    fn second_submit_while_in_flight_should_be_refused() {
        let mut form = filled_new_session();

        let (ticket, record) = form.submit().unwrap();
        assert_eq!(ticket.mode, DraftMode::New);
        assert!(record.is_new());
        assert!(form.is_submitting());

        assert_eq!(form.submit().unwrap_err(), FormError::SubmitInFlight);
    }

    #[test]
    fn successful_reply_should_close_and_reset_draft() {
        let mut form = filled_new_session();
        let (ticket, mut record) = form.submit().unwrap();
        record.id = 42;

        let stored = form.complete_submit(ticket, Ok(record)).unwrap();

        assert_eq!(stored.id, 42);
        assert!(!form.is_active());
        assert_eq!(form.draft().record.id, 0);
        assert_eq!(form.draft().record, Record::empty());
    }

    #[test]
    fn failed_reply_should_keep_draft_and_release_guard() {
        let mut form = filled_new_session();
        let (ticket, _) = form.submit().unwrap();

        let detail = form
            .complete_submit(ticket, Err(ServiceError::network("timeout")))
            .unwrap_err();

        assert_eq!(detail.kind, ErrorKind::Network);
        assert!(form.is_active());
        assert!(!form.is_submitting());
        assert_eq!(form.draft().record.title, "Unit 9");
        assert_eq!(form.draft().error, Some(detail));
        assert!(form.submit().is_ok());
    }

    #[test]
    fn reply_for_replaced_draft_should_not_touch_current_draft() {
        let mut form = filled_new_session();
        let (ticket, mut record) = form.submit().unwrap();

        form.open_for_edit(&stored_record(4)).unwrap();
        record.id = 50;
        assert!(form.complete_submit(ticket, Ok(record)).is_ok());

        assert!(form.is_active());
        assert_eq!(form.draft().record.id, 4);
    }

    #[test]
    fn cancel_should_discard_draft() {
        let mut form = filled_new_session();
        form.cancel();

        assert!(!form.is_active());
        assert_eq!(form.draft(), &DraftSession::closed());
    }
}
