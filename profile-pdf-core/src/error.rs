use thiserror::Error;

/// Failure to turn the `data` navigation parameter back into a record.
#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("Missing navigation parameter: {0}")]
    MissingParameter(&'static str),

    #[error("Invalid navigation URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("Invalid record payload: {0}")]
    Json(#[from] serde_json::Error),
}

/// Failure while composing, writing or saving a document.
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("PDF error: {0}")]
    Pdf(#[from] oxidize_pdf::PdfError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid date format: {0}")]
    DateFormat(String),

    #[error("Render task failed: {0}")]
    Join(String),

    #[error("A download is already in progress")]
    Busy,
}

#[derive(Error, Debug)]
pub enum ProfileError {
    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error(transparent)]
    Render(#[from] RenderError),

    #[error("Invalid field name: {0}")]
    UnknownField(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, ProfileError>;
