//! The contact record collected by the form.

use crate::error::ProfileError;
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Suffix appended to the suggested download filename.
pub const FILE_SUFFIX: &str = "_profile.pdf";

lazy_static! {
    static ref WHITESPACE_RUN: Regex = Regex::new(r"\s+").expect("Whitespace pattern is valid");
    /// Path separators anywhere, or a dot that would hide the file.
    static ref PATH_UNSAFE: Regex = Regex::new(r"[/\\]|^\.").expect("Path pattern is valid");
}

/// One person's contact details.
///
/// Every field is plain text. `position` and `description` are optional and
/// may be left empty; the other three are checked by [`crate::validate`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ContactRecord {
    pub name: String,
    pub email: String,
    pub phone: String,
    #[serde(default)]
    pub position: String,
    #[serde(default)]
    pub description: String,
}

impl ContactRecord {
    /// Creates an empty record, the state of a freshly mounted form.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::Email => &self.email,
            Field::Phone => &self.phone,
            Field::Position => &self.position,
            Field::Description => &self.description,
        }
    }

    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        let value = value.into();
        match field {
            Field::Name => self.name = value,
            Field::Email => self.email = value,
            Field::Phone => self.phone = value,
            Field::Position => self.position = value,
            Field::Description => self.description = value,
        }
    }

    /// Builder-style variant of [`ContactRecord::set`].
    pub fn with(mut self, field: Field, value: impl Into<String>) -> Self {
        self.set(field, value);
        self
    }

    /// Suggested filename for the rendered document.
    ///
    /// Every run of whitespace in the name becomes a single underscore,
    /// leading and trailing runs included. The result is always one path
    /// component: separators and a leading dot are replaced as well.
    pub fn file_name(&self) -> String {
        let spaced = WHITESPACE_RUN.replace_all(&self.name, "_");
        let stem = PATH_UNSAFE.replace_all(&spaced, "_");
        format!("{stem}{FILE_SUFFIX}")
    }
}

/// The five fields of a [`ContactRecord`], in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    Name,
    Email,
    Phone,
    Position,
    Description,
}

impl Field {
    pub const ALL: [Field; 5] = [
        Field::Name,
        Field::Email,
        Field::Phone,
        Field::Position,
        Field::Description,
    ];

    /// Name used on the wire (form inputs, JSON keys).
    pub fn as_str(self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Email => "email",
            Field::Phone => "phone",
            Field::Position => "position",
            Field::Description => "description",
        }
    }

    /// Label used in the document and on the form.
    pub fn label(self) -> &'static str {
        match self {
            Field::Name => "Name",
            Field::Email => "Email",
            Field::Phone => "Phone",
            Field::Position => "Position",
            Field::Description => "Description",
        }
    }

    pub fn is_required(self) -> bool {
        matches!(self, Field::Name | Field::Email | Field::Phone)
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Field {
    type Err = ProfileError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Field::ALL
            .into_iter()
            .find(|field| field.as_str() == s)
            .ok_or_else(|| ProfileError::UnknownField(s.to_string()))
    }
}
