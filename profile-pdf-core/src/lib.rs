//! # profile-pdf
//!
//! Collects a person's contact details, validates them and renders them into
//! a one-page profile PDF.
//!
//! The flow mirrors a small two-page web form:
//!
//! - [`FormView`] owns the editable [`ContactRecord`] and runs [`validate`] on
//!   "View" and "Download".
//! - "View" hands a snapshot to [`PreviewView`] through the `data` query
//!   parameter (see [`navigation`]).
//! - "Download" from either view goes through [`ProfileRenderer`] and a
//!   [`SaveTarget`].
//!
//! ```rust,no_run
//! use profile_pdf::{ContactRecord, Field, FormView, ViewRequest};
//!
//! let mut form = FormView::mount(None);
//! form.on_field_change(Field::Name, "Jane Doe");
//! form.on_field_change(Field::Email, "jane@x.com");
//! form.on_field_change(Field::Phone, "(555) 123-4567");
//!
//! if let ViewRequest::Navigate(route) = form.on_view_requested() {
//!     println!("redirect to {route}");
//! }
//! ```

pub mod config;
pub mod error;
pub mod layout;
pub mod navigation;
pub mod record;
pub mod render;
pub mod validation;
pub mod views;

pub use config::RenderConfig;
pub use error::{DecodeError, ProfileError, RenderError, Result};
pub use navigation::Route;
pub use record::{ContactRecord, Field};
pub use render::{ProfileRenderer, RenderedDocument};
pub use validation::{validate, ValidationResult};
pub use views::{
    entry, DirectorySave, DownloadOutcome, DownloadRejected, DownloadTicket, FormState, FormView,
    MemorySave, Notice, PreviewState, PreviewView, SaveTarget, ViewRequest,
};

/// Current version of profile-pdf
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
