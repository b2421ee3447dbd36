//! # profile-pdf-api
//!
//! HTTP front end for profile-pdf: the form, the preview and the downloads,
//! plus a small JSON API.
//!

mod api;
pub mod html;

pub use api::{
    app, app_with_state, content_disposition, form_page, health_check, preview_back,
    preview_download, preview_page, render_record, submit_form, validate_record, AppError,
    AppState, ErrorResponse, FormAction, FormSubmission, NavigationQuery, ValidateResponse,
};
