use crate::html;
use axum::{
    extract::{Form, Json, Query, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Redirect, Response},
    routing::{get, post},
    Router,
};
use profile_pdf::{
    entry, validate, ContactRecord, DownloadOutcome, DownloadRejected, Field, FormView,
    MemorySave, PreviewView, ProfileRenderer, RenderConfig, RenderError, RenderedDocument,
    ValidationResult, ViewRequest,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{debug, info};

/// Shared state: the renderer is immutable, each request mounts its own view.
#[derive(Clone, Default)]
pub struct AppState {
    pub renderer: Arc<ProfileRenderer>,
}

impl AppState {
    pub fn new(config: RenderConfig) -> Self {
        Self {
            renderer: Arc::new(ProfileRenderer::new(config)),
        }
    }
}

/// The navigation parameter, as carried in the query string
#[derive(Debug, Default, Deserialize)]
pub struct NavigationQuery {
    pub data: Option<String>,
}

/// Which submit-like button was pressed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormAction {
    View,
    Download,
}

/// A posted form: every field plus the button that submitted it
#[derive(Debug, Deserialize)]
pub struct FormSubmission {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub position: String,
    #[serde(default)]
    pub description: String,
    pub action: FormAction,
}

impl FormSubmission {
    /// Replays the posted values into a fresh form as field edits.
    fn into_form(self) -> (FormView, FormAction) {
        let action = self.action;
        let record = ContactRecord {
            name: self.name,
            email: self.email,
            phone: self.phone,
            position: self.position,
            description: self.description,
        };
        let mut form = FormView::mount(None);
        for field in Field::ALL {
            form.on_field_change(field, record.get(field));
        }
        (form, action)
    }
}

/// Response for the validation endpoint
#[derive(Debug, Serialize)]
pub struct ValidateResponse {
    /// Whether the record can be submitted
    pub valid: bool,
    /// Error message per invalid field
    pub errors: ValidationResult,
}

/// Standard error response structure
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Human-readable error message describing what went wrong
    pub error: String,
}

/// Application-specific error types for the API
#[derive(Debug, Error)]
pub enum AppError {
    /// Rendering or saving the document failed
    #[error(transparent)]
    Render(#[from] RenderError),
    /// A download finished without producing a document
    #[error("No document was produced")]
    MissingDocument,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let error_response = ErrorResponse {
            error: self.to_string(),
        };

        (StatusCode::INTERNAL_SERVER_ERROR, Json(error_response)).into_response()
    }
}

/// Build the application router with default render settings
pub fn app() -> Router {
    app_with_state(AppState::default())
}

/// Build the application router with all routes configured
pub fn app_with_state(state: AppState) -> Router {
    Router::new()
        // Pages
        .route("/", get(form_page).post(submit_form))
        .route("/preview", get(preview_page))
        .route("/preview/back", get(preview_back))
        .route("/preview/download", get(preview_download))
        // JSON API
        .route("/api/health", get(health_check))
        .route("/api/validate", post(validate_record))
        .route("/api/render", post(render_record))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// `Content-Disposition` for a download, with an ASCII fallback name
pub fn content_disposition(file_name: &str) -> String {
    let fallback: String = file_name
        .chars()
        .map(|c| {
            if (c.is_ascii_graphic() && c != '"' && c != '\\') || c == ' ' {
                c
            } else {
                '_'
            }
        })
        .collect();
    format!(
        "attachment; filename=\"{fallback}\"; filename*=UTF-8''{}",
        urlencoding::encode(file_name)
    )
}

fn pdf_response(document: RenderedDocument) -> Response {
    (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (
                header::CONTENT_DISPOSITION,
                content_disposition(&document.file_name),
            ),
        ],
        document.bytes,
    )
        .into_response()
}

/// Hands the saved document back to the client as the download
fn saved_document(mut target: MemorySave) -> Result<Response, AppError> {
    target
        .take_last()
        .map(pdf_response)
        .ok_or(AppError::MissingDocument)
}

/// Entry point: the form, pre-populated when `data` carries a record
pub async fn form_page(Query(query): Query<NavigationQuery>) -> Html<String> {
    let form = entry(query.data.as_deref());
    Html(html::form_page(&form, None))
}

/// "View PDF" or "Download PDF" pressed on the form
pub async fn submit_form(
    State(state): State<AppState>,
    Form(submission): Form<FormSubmission>,
) -> Result<Response, AppError> {
    let (mut form, action) = submission.into_form();
    debug!(?action, "Form submitted");

    let response = match action {
        FormAction::View => match form.on_view_requested() {
            ViewRequest::Navigate(route) => Redirect::to(&route.to_url()).into_response(),
            ViewRequest::Invalid(_) => invalid_form(&form),
        },
        FormAction::Download => {
            let mut target = MemorySave::new();
            match form.on_download_requested(&state.renderer, &mut target).await {
                DownloadOutcome::Saved { .. } => saved_document(target)?,
                DownloadOutcome::Rejected(DownloadRejected::Invalid(_)) => invalid_form(&form),
                DownloadOutcome::Rejected(_) => {
                    (StatusCode::CONFLICT, Html(html::form_page(&form, None))).into_response()
                }
                DownloadOutcome::Failed(notice) => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Html(html::form_page(&form, Some(&notice))),
                )
                    .into_response(),
            }
        }
    };
    Ok(response)
}

fn invalid_form(form: &FormView) -> Response {
    (
        StatusCode::UNPROCESSABLE_ENTITY,
        Html(html::form_page(form, None)),
    )
        .into_response()
}

/// Read-only preview, or back to an empty form when `data` is unusable
pub async fn preview_page(Query(query): Query<NavigationQuery>) -> Response {
    match PreviewView::mount(query.data.as_deref()) {
        Ok(view) => Html(html::preview_page(&view, None)).into_response(),
        Err(route) => Redirect::to(&route.to_url()).into_response(),
    }
}

/// Back from the preview to the form, keeping the record
pub async fn preview_back(Query(query): Query<NavigationQuery>) -> Redirect {
    let mut view = PreviewView::new();
    let _ = view.load(query.data.as_deref());
    Redirect::to(&view.on_back().to_url())
}

/// "Download PDF" pressed on the preview
pub async fn preview_download(
    State(state): State<AppState>,
    Query(query): Query<NavigationQuery>,
) -> Result<Response, AppError> {
    let mut view = match PreviewView::mount(query.data.as_deref()) {
        Ok(view) => view,
        Err(route) => return Ok(Redirect::to(&route.to_url()).into_response()),
    };

    let mut target = MemorySave::new();
    let response = match view.on_download(&state.renderer, &mut target).await {
        DownloadOutcome::Saved { .. } => saved_document(target)?,
        DownloadOutcome::Rejected(_) => {
            (StatusCode::CONFLICT, Html(html::preview_page(&view, None))).into_response()
        }
        DownloadOutcome::Failed(notice) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Html(html::preview_page(&view, Some(&notice))),
        )
            .into_response(),
    };
    Ok(response)
}

/// Health check endpoint for monitoring and load balancing
pub async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "service": "profile-pdf API",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// Validate a record without rendering it
pub async fn validate_record(Json(record): Json<ContactRecord>) -> Json<ValidateResponse> {
    let errors = validate(&record);
    Json(ValidateResponse {
        valid: errors.is_empty(),
        errors,
    })
}

/// Validate and render a record in one call
pub async fn render_record(
    State(state): State<AppState>,
    Json(record): Json<ContactRecord>,
) -> Result<Response, AppError> {
    let errors = validate(&record);
    if !errors.is_empty() {
        let body = ValidateResponse {
            valid: false,
            errors,
        };
        return Ok((StatusCode::UNPROCESSABLE_ENTITY, Json(body)).into_response());
    }

    let document = state.renderer.render(&record).await?;
    info!(file_name = %document.file_name, "Rendered profile via API");
    Ok(pdf_response(document))
}
