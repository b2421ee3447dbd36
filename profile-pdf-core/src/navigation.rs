//! The navigation boundary between the form and the preview.
//!
//! A record travels between views as a single query parameter named
//! [`DATA_PARAM`] whose value is the record's JSON, percent-encoded. Decoding
//! goes through the [`ContactRecord`] serde schema, so missing required keys,
//! unknown keys and non-string values are rejected rather than trusted.

use crate::error::DecodeError;
use crate::record::ContactRecord;
use lazy_static::lazy_static;
use std::fmt;
use url::{ParseError, Url};

/// Name of the query parameter carrying the record.
pub const DATA_PARAM: &str = "data";

pub const FORM_PATH: &str = "/";
pub const PREVIEW_PATH: &str = "/preview";

lazy_static! {
    /// Base for resolving paths and bare query strings.
    static ref NAV_BASE: Url = Url::parse("http://localhost/").expect("Base URL is valid");
}

/// Where a view transition leads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// The form, optionally pre-populated.
    Form(Option<ContactRecord>),
    /// The read-only preview of a validated record.
    Preview(ContactRecord),
}

impl Route {
    pub fn path(&self) -> &'static str {
        match self {
            Route::Form(_) => FORM_PATH,
            Route::Preview(_) => PREVIEW_PATH,
        }
    }

    pub fn record(&self) -> Option<&ContactRecord> {
        match self {
            Route::Form(record) => record.as_ref(),
            Route::Preview(record) => Some(record),
        }
    }

    /// Path plus query string, ready for a redirect.
    pub fn to_url(&self) -> String {
        match self.record() {
            Some(record) => format!("{}?{}", self.path(), encode_query(record)),
            None => self.path().to_string(),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_url())
    }
}

/// Serializes `record` as the raw (not yet percent-encoded) parameter value.
pub fn encode_param(record: &ContactRecord) -> String {
    // A struct of plain strings always serializes.
    serde_json::to_string(record).unwrap_or_default()
}

/// `data=<percent-encoded JSON>`
pub fn encode_query(record: &ContactRecord) -> String {
    format!("{DATA_PARAM}={}", urlencoding::encode(&encode_param(record)))
}

/// Decodes an already percent-decoded parameter value.
pub fn decode_param(raw: &str) -> Result<ContactRecord, DecodeError> {
    Ok(serde_json::from_str(raw)?)
}

/// Decodes an optional parameter value, treating absence as an error.
pub fn decode_optional(raw: Option<&str>) -> Result<ContactRecord, DecodeError> {
    decode_param(raw.ok_or(DecodeError::MissingParameter(DATA_PARAM))?)
}

/// Finds [`DATA_PARAM`] in a URL or query string and decodes it.
///
/// Accepts an absolute URL, a path with a query (`/preview?data=...`), or a
/// bare query with or without the leading `?`. Everything after that first
/// `?` is the query, so a literal `?` inside a bare value is kept. Query
/// pairs are form-decoded: `+` is a space.
pub fn decode_query(input: &str) -> Result<ContactRecord, DecodeError> {
    let url = match Url::parse(input) {
        Ok(url) => url,
        Err(ParseError::RelativeUrlWithoutBase) if input.starts_with('/') => {
            NAV_BASE.join(input)?
        }
        Err(ParseError::RelativeUrlWithoutBase) => {
            let mut url = NAV_BASE.clone();
            url.set_query(Some(input.strip_prefix('?').unwrap_or(input)));
            url
        }
        Err(e) => return Err(e.into()),
    };

    let value = url
        .query_pairs()
        .find(|(key, _)| *key == DATA_PARAM)
        .map(|(_, value)| value)
        .ok_or(DecodeError::MissingParameter(DATA_PARAM))?;
    decode_param(&value)
}
