use super::{release, settle, DownloadOutcome, DownloadRejected, DownloadTicket, SaveTarget};
use crate::error::RenderError;
use crate::navigation::Route;
use crate::record::{ContactRecord, Field};
use crate::render::ProfileRenderer;
use crate::validation::{validate, ValidationResult};
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormState {
    #[default]
    Editing,
    /// A download is in flight; the download control is disabled.
    Submitting,
}

/// Result of the "View" action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewRequest {
    Navigate(Route),
    Invalid(ValidationResult),
}

/// The editable form.
///
/// Validation runs only on "View" and "Download". Editing a field clears that
/// field's error without re-checking it.
#[derive(Debug, Clone, Default)]
pub struct FormView {
    record: ContactRecord,
    errors: ValidationResult,
    state: FormState,
    in_flight: Option<u64>,
}

impl FormView {
    /// Mounts the form, empty or with a record handed over by navigation.
    pub fn mount(initial: Option<ContactRecord>) -> Self {
        Self {
            record: initial.unwrap_or_default(),
            ..Self::default()
        }
    }

    pub fn record(&self) -> &ContactRecord {
        &self.record
    }

    pub fn errors(&self) -> &ValidationResult {
        &self.errors
    }

    pub fn state(&self) -> FormState {
        self.state
    }

    pub fn is_submitting(&self) -> bool {
        self.state == FormState::Submitting
    }

    pub fn on_field_change(&mut self, field: Field, value: impl Into<String>) {
        self.record.set(field, value);
        if self.errors.clear(field) {
            debug!(%field, "Cleared field error on edit");
        }
    }

    /// Validates and, if clean, snapshots the record into a preview route.
    pub fn on_view_requested(&mut self) -> ViewRequest {
        match self.check() {
            Some(errors) => ViewRequest::Invalid(errors),
            None => ViewRequest::Navigate(Route::Preview(self.record.clone())),
        }
    }

    /// Validates, renders and saves the current record.
    ///
    /// The form is back in [`FormState::Editing`] when this returns,
    /// whatever the outcome.
    pub async fn on_download_requested<T: SaveTarget>(
        &mut self,
        renderer: &ProfileRenderer,
        target: &mut T,
    ) -> DownloadOutcome {
        let ticket = match self.begin_download() {
            Ok(ticket) => ticket,
            Err(rejected) => return DownloadOutcome::Rejected(rejected),
        };
        let result = ticket.fulfil(renderer, target).await;
        self.finish_download(ticket, result)
    }

    /// First half of a download: validate and claim the in-flight slot.
    pub fn begin_download(&mut self) -> Result<DownloadTicket, DownloadRejected> {
        if self.is_submitting() {
            return Err(DownloadRejected::Busy);
        }
        if let Some(errors) = self.check() {
            return Err(DownloadRejected::Invalid(errors));
        }
        let ticket = DownloadTicket::new(self.record.clone());
        self.state = FormState::Submitting;
        self.in_flight = Some(ticket.id());
        debug!(ticket = ticket.id(), "Form download started");
        Ok(ticket)
    }

    /// Second half of a download: release the slot and report the result.
    ///
    /// Only the ticket this form issued releases it; any other ticket is
    /// rejected and the form stays busy.
    pub fn finish_download(
        &mut self,
        ticket: DownloadTicket,
        result: Result<String, RenderError>,
    ) -> DownloadOutcome {
        if !release(&mut self.in_flight, &ticket) {
            return DownloadOutcome::Rejected(DownloadRejected::UnknownTicket);
        }
        self.state = FormState::Editing;
        settle(result)
    }

    /// Runs the validator; stores and returns the errors when there are any.
    fn check(&mut self) -> Option<ValidationResult> {
        let errors = validate(&self.record);
        let invalid = !errors.is_empty();
        self.errors = errors;
        if invalid {
            debug!(count = self.errors.len(), "Form has validation errors");
            Some(self.errors.clone())
        } else {
            None
        }
    }
}
