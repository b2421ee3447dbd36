//! Render configuration.

use crate::error::{ProfileError, Result};
use chrono::format::{Item, StrftimeItems};
use serde::{Deserialize, Serialize};

/// `strftime` pattern for the en-US short date, e.g. `7/4/2025`.
pub const DEFAULT_DATE_FORMAT: &str = "%-m/%-d/%Y";

pub const DEFAULT_CREATOR: &str = "profile-pdf";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// `strftime` pattern for the "Generated on" line.
    pub date_format: String,
    /// Value of the document's Creator entry.
    pub creator: String,
    /// Write the record's name as the document author.
    pub author_metadata: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            date_format: DEFAULT_DATE_FORMAT.to_string(),
            creator: DEFAULT_CREATOR.to_string(),
            author_metadata: true,
        }
    }
}

impl RenderConfig {
    pub fn with_date_format(mut self, date_format: impl Into<String>) -> Self {
        self.date_format = date_format.into();
        self
    }

    /// Rejects date patterns chrono cannot format.
    pub fn check(&self) -> Result<()> {
        if StrftimeItems::new(&self.date_format).any(|item| matches!(item, Item::Error)) {
            return Err(ProfileError::Config(format!(
                "invalid date format '{}'",
                self.date_format
            )));
        }
        Ok(())
    }
}
