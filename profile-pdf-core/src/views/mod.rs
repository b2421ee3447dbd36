//! View state machines for the form and the preview.
//!
//! Each view owns its own copy of the record. The only thing shared between
//! views is the value passed through [`crate::navigation::Route`].
//!
//! Downloads are guarded by a single slot: while a render is in flight the
//! view refuses to start another one. A UI shell that runs the render on a
//! separate task can drive the two halves itself with `begin_download` and
//! `finish_download`; everyone else calls the one-shot `on_download*` method.

mod entry;
mod form;
mod preview;

pub use entry::entry;
pub use form::{FormState, FormView, ViewRequest};
pub use preview::{PreviewState, PreviewView};

use crate::error::RenderError;
use crate::record::ContactRecord;
use crate::render::{ProfileRenderer, RenderedDocument};
use crate::validation::ValidationResult;
use std::io;
use std::path::{Component, Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{error, info, warn};

static NEXT_TICKET: AtomicU64 = AtomicU64::new(1);

/// Message shown when a download fails.
pub const RENDER_FAILED_NOTICE: &str = "Error generating PDF. Please try again.";

/// A blocking, user-visible notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub message: String,
}

impl Notice {
    pub fn render_failed() -> Self {
        Self {
            message: RENDER_FAILED_NOTICE.to_string(),
        }
    }
}

/// Receives finished documents: the host's "save as" mechanism.
pub trait SaveTarget {
    fn save(&mut self, document: RenderedDocument) -> Result<(), RenderError>;
}

/// Keeps saved documents in memory.
#[derive(Debug, Default)]
pub struct MemorySave {
    pub documents: Vec<RenderedDocument>,
}

impl MemorySave {
    pub fn new() -> Self {
        Self::default()
    }

    /// Takes the most recently saved document.
    pub fn take_last(&mut self) -> Option<RenderedDocument> {
        self.documents.pop()
    }
}

impl SaveTarget for MemorySave {
    fn save(&mut self, document: RenderedDocument) -> Result<(), RenderError> {
        self.documents.push(document);
        Ok(())
    }
}

/// Writes documents into a directory under their suggested file names.
#[derive(Debug)]
pub struct DirectorySave {
    dir: PathBuf,
    saved: Vec<PathBuf>,
}

impl DirectorySave {
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
            saved: Vec::new(),
        }
    }

    pub fn saved(&self) -> &[PathBuf] {
        &self.saved
    }
}

impl SaveTarget for DirectorySave {
    fn save(&mut self, document: RenderedDocument) -> Result<(), RenderError> {
        let mut components = Path::new(&document.file_name).components();
        if !matches!(
            (components.next(), components.next()),
            (Some(Component::Normal(_)), None)
        ) {
            let message = format!(
                "refusing to save outside {}: {}",
                self.dir.display(),
                document.file_name
            );
            return Err(RenderError::Io(io::Error::new(
                io::ErrorKind::InvalidInput,
                message,
            )));
        }

        let path = self.dir.join(&document.file_name);
        std::fs::write(&path, &document.bytes)?;
        info!(path = %path.display(), "Saved profile document");
        self.saved.push(path);
        Ok(())
    }
}

/// Why a download could not start or finish.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DownloadRejected {
    /// Another download from the same view is still running.
    Busy,
    /// The ticket was not issued by this view, or was already finished.
    UnknownTicket,
    /// There is no record to render yet.
    NotReady,
    /// The record failed validation; the errors are also kept on the view.
    Invalid(ValidationResult),
}

/// Result of a download action, once the view is interactive again.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DownloadOutcome {
    Saved { file_name: String },
    Rejected(DownloadRejected),
    Failed(Notice),
}

impl DownloadOutcome {
    pub fn is_saved(&self) -> bool {
        matches!(self, DownloadOutcome::Saved { .. })
    }
}

/// Snapshot of the record taken when a download starts.
///
/// Must be handed back to the view that issued it to release the slot.
#[derive(Debug)]
#[must_use = "a download ticket keeps its view busy until it is finished"]
pub struct DownloadTicket {
    id: u64,
    record: ContactRecord,
}

impl DownloadTicket {
    fn new(record: ContactRecord) -> Self {
        Self {
            id: NEXT_TICKET.fetch_add(1, Ordering::Relaxed),
            record,
        }
    }

    /// Identifier the issuing view holds while the download is in flight.
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn record(&self) -> &ContactRecord {
        &self.record
    }

    /// Renders the snapshot and hands the result to `target`, returning the
    /// saved file name.
    pub async fn fulfil<T: SaveTarget>(
        &self,
        renderer: &ProfileRenderer,
        target: &mut T,
    ) -> Result<String, RenderError> {
        let document = renderer.render(&self.record).await?;
        let file_name = document.file_name.clone();
        target.save(document)?;
        Ok(file_name)
    }
}

/// Turns the result of a fulfilled ticket into an outcome, logging failures.
/// Empties `slot` if it holds `ticket`. A foreign ticket leaves it untouched.
fn release(slot: &mut Option<u64>, ticket: &DownloadTicket) -> bool {
    if *slot == Some(ticket.id) {
        *slot = None;
        true
    } else {
        warn!(ticket = ticket.id, "Ignoring download ticket from another view");
        false
    }
}

fn settle(result: Result<String, RenderError>) -> DownloadOutcome {
    match result {
        Ok(file_name) => DownloadOutcome::Saved { file_name },
        Err(e) => {
            error!("Error downloading PDF: {e}");
            DownloadOutcome::Failed(Notice::render_failed())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_memory_save_keeps_documents() {
        let record = ContactRecord::new().with(crate::Field::Name, "Jane Doe");
        let document = ProfileRenderer::default()
            .render_on(&record, NaiveDate::from_ymd_opt(2025, 1, 2).unwrap())
            .unwrap();

        let mut target = MemorySave::new();
        target.save(document).unwrap();
        let saved = target.take_last().unwrap();
        assert_eq!(saved.file_name, "Jane_Doe_profile.pdf");
        assert!(target.take_last().is_none());
    }

    #[test]
    fn test_directory_save_into_missing_dir_fails() {
        let mut target = DirectorySave::new("/nonexistent/profile-pdf/output");
        let document = RenderedDocument {
            bytes: b"%PDF-1.7".to_vec(),
            file_name: "x_profile.pdf".to_string(),
            page_count: 1,
        };
        assert!(matches!(target.save(document), Err(RenderError::Io(_))));
        assert!(target.saved().is_empty());
    }

    #[test]
    fn test_directory_save_stays_inside_its_directory() {
        let root = tempfile::tempdir().unwrap();
        let downloads = root.path().join("downloads");
        std::fs::create_dir(&downloads).unwrap();
        let mut target = DirectorySave::new(&downloads);

        for name in ["../escaped", "/escaped", "..\\escaped"] {
            let record = ContactRecord::new().with(crate::Field::Name, name);
            let document = ProfileRenderer::default()
                .render_on(&record, NaiveDate::from_ymd_opt(2025, 1, 2).unwrap())
                .unwrap();
            target.save(document).unwrap();
        }

        assert_eq!(target.saved().len(), 3);
        for path in target.saved() {
            assert_eq!(path.parent(), Some(downloads.as_path()));
            assert!(path.exists());
        }
        assert!(!root.path().join("escaped_profile.pdf").exists());
    }

    #[test]
    fn test_directory_save_refuses_unsafe_names() {
        let root = tempfile::tempdir().unwrap();
        let mut target = DirectorySave::new(root.path());

        for file_name in ["../x_profile.pdf", "/tmp/x_profile.pdf", "a/b.pdf", "..", ""] {
            let document = RenderedDocument {
                bytes: b"%PDF-1.7".to_vec(),
                file_name: file_name.to_string(),
                page_count: 1,
            };
            assert!(
                matches!(target.save(document), Err(RenderError::Io(_))),
                "{file_name}"
            );
        }
        assert!(target.saved().is_empty());
    }

    #[test]
    fn test_settle_maps_errors_to_notice() {
        assert_eq!(
            settle(Ok("a_profile.pdf".to_string())),
            DownloadOutcome::Saved {
                file_name: "a_profile.pdf".to_string()
            }
        );
        assert_eq!(
            settle(Err(RenderError::Busy)),
            DownloadOutcome::Failed(Notice::render_failed())
        );
    }
}
