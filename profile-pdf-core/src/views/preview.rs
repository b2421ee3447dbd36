use super::{release, settle, DownloadOutcome, DownloadRejected, DownloadTicket, SaveTarget};
use crate::error::RenderError;
use crate::navigation::{decode_optional, Route};
use crate::record::ContactRecord;
use crate::render::ProfileRenderer;
use tracing::{debug, warn};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PreviewState {
    /// No record decoded yet.
    Loading,
    Ready(ContactRecord),
}

/// Read-only summary of a record that already passed validation.
#[derive(Debug, Clone)]
pub struct PreviewView {
    state: PreviewState,
    in_flight: Option<u64>,
}

impl PreviewView {
    pub fn new() -> Self {
        Self {
            state: PreviewState::Loading,
            in_flight: None,
        }
    }

    /// Creates a view and loads `param` into it, or returns where to go instead.
    pub fn mount(param: Option<&str>) -> Result<Self, Route> {
        let mut view = Self::new();
        match view.load(param) {
            Some(redirect) => Err(redirect),
            None => Ok(view),
        }
    }

    /// Decodes the `data` parameter value.
    ///
    /// A missing or malformed value leaves the view loading and returns the
    /// redirect to an empty form; the failure is logged, not shown.
    pub fn load(&mut self, param: Option<&str>) -> Option<Route> {
        match decode_optional(param) {
            Ok(record) => {
                debug!("Preview ready");
                self.state = PreviewState::Ready(record);
                None
            }
            Err(e) => {
                warn!("Error parsing user data: {e}");
                Some(Route::Form(None))
            }
        }
    }

    pub fn state(&self) -> &PreviewState {
        &self.state
    }

    pub fn record(&self) -> Option<&ContactRecord> {
        match &self.state {
            PreviewState::Ready(record) => Some(record),
            PreviewState::Loading => None,
        }
    }

    pub fn is_submitting(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Back to the form, carrying the record so nothing is lost.
    pub fn on_back(&self) -> Route {
        Route::Form(self.record().cloned())
    }

    /// Renders and saves the record. No validation: the form already did it.
    pub async fn on_download<T: SaveTarget>(
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

    pub fn begin_download(&mut self) -> Result<DownloadTicket, DownloadRejected> {
        if self.is_submitting() {
            return Err(DownloadRejected::Busy);
        }
        let record = self.record().cloned().ok_or(DownloadRejected::NotReady)?;
        let ticket = DownloadTicket::new(record);
        self.in_flight = Some(ticket.id());
        debug!(ticket = ticket.id(), "Preview download started");
        Ok(ticket)
    }

    /// Releases the slot held by `ticket`. Tickets from other views are
    /// rejected and leave this one busy.
    pub fn finish_download(
        &mut self,
        ticket: DownloadTicket,
        result: Result<String, RenderError>,
    ) -> DownloadOutcome {
        if !release(&mut self.in_flight, &ticket) {
            return DownloadOutcome::Rejected(DownloadRejected::UnknownTicket);
        }
        settle(result)
    }
}

impl Default for PreviewView {
    fn default() -> Self {
        Self::new()
    }
}
