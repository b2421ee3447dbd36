//! Profile document rendering.
//!
//! The template is fixed: a centered title, five labeled rows, the wrapped
//! description and a "Generated on" line. Positions are in millimetres from
//! the top-left of an A4 page.

use crate::config::RenderConfig;
use crate::error::RenderError;
use crate::layout::{
    Align, FontWeight, LayoutSurface, PdfMetadata, PdfSurface, TraceSurface, MM_TO_PT,
};
use crate::record::{ContactRecord, Field};
use chrono::{Local, NaiveDate};
use std::fmt::Write;
use tracing::{debug, info};

pub const TITLE: &str = "User Profile";
pub const POSITION_PLACEHOLDER: &str = "Not specified";
pub const DESCRIPTION_PLACEHOLDER: &str = "No description provided";
pub const GENERATED_PREFIX: &str = "Generated on: ";

const TITLE_SIZE: f64 = 20.0;
const BODY_SIZE: f64 = 12.0;
const FOOTER_SIZE: f64 = 10.0;

const TITLE_X: f64 = 105.0;
const TITLE_Y: f64 = 20.0;
const LABEL_X: f64 = 20.0;
const VALUE_X: f64 = 50.0;
const FIRST_ROW_Y: f64 = 40.0;

const LINE_HEIGHT: f64 = 8.0;
const ROW_GAP: f64 = 5.0;
const DESCRIPTION_OFFSET: f64 = 5.0;
const FOOTER_GAP: f64 = 15.0;

/// Wrapped description lines sit 1.15 font sizes apart.
const LINE_HEIGHT_FACTOR: f64 = 1.15;
/// Baseline distance between wrapped description lines, in millimetres.
pub const DESCRIPTION_PITCH: f64 = BODY_SIZE * LINE_HEIGHT_FACTOR / MM_TO_PT;

/// Width the description is wrapped to.
pub const WRAP_WIDTH: f64 = 170.0;

const TOP_MARGIN: f64 = 20.0;
/// Lowest baseline allowed before starting a new page.
const BOTTOM_LIMIT: f64 = 277.0;

/// A finished document and the name it should be saved under.
#[derive(Debug, Clone)]
pub struct RenderedDocument {
    pub bytes: Vec<u8>,
    pub file_name: String,
    pub page_count: usize,
}

/// Lays out [`ContactRecord`]s on the profile template.
#[derive(Debug, Clone, Default)]
pub struct ProfileRenderer {
    config: RenderConfig,
}

impl ProfileRenderer {
    pub fn new(config: RenderConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Renders `record` dated today, off the async executor.
    pub async fn render(&self, record: &ContactRecord) -> Result<RenderedDocument, RenderError> {
        let renderer = self.clone();
        let record = record.clone();
        tokio::task::spawn_blocking(move || renderer.render_sync(&record))
            .await
            .map_err(|e| RenderError::Join(e.to_string()))?
    }

    /// Renders `record` dated today on the calling thread.
    pub fn render_sync(&self, record: &ContactRecord) -> Result<RenderedDocument, RenderError> {
        self.render_on(record, Local::now().date_naive())
    }

    /// Renders `record` with a fixed generation date.
    pub fn render_on(
        &self,
        record: &ContactRecord,
        date: NaiveDate,
    ) -> Result<RenderedDocument, RenderError> {
        let mut surface = PdfSurface::new();
        self.compose(record, date, &mut surface)?;
        let page_count = surface.page_count();

        let metadata = PdfMetadata {
            title: Some(TITLE.to_string()),
            author: self
                .config
                .author_metadata
                .then(|| record.name.clone()),
            creator: Some(self.config.creator.clone()),
        };
        let bytes = surface.finish(metadata)?;
        let file_name = record.file_name();

        info!(%file_name, page_count, size = bytes.len(), "Rendered profile document");

        Ok(RenderedDocument {
            bytes,
            file_name,
            page_count,
        })
    }

    /// Lays `record` out without producing a PDF.
    pub fn trace_on(
        &self,
        record: &ContactRecord,
        date: NaiveDate,
    ) -> Result<TraceSurface, RenderError> {
        let mut surface = TraceSurface::new();
        self.compose(record, date, &mut surface)?;
        Ok(surface)
    }

    /// Places the whole template for `record` on `surface`.
    pub fn compose<S: LayoutSurface>(
        &self,
        record: &ContactRecord,
        date: NaiveDate,
        surface: &mut S,
    ) -> Result<(), RenderError> {
        let mut stamp = String::from(GENERATED_PREFIX);
        write!(stamp, "{}", date.format(&self.config.date_format))
            .map_err(|_| RenderError::DateFormat(self.config.date_format.clone()))?;

        surface.set_font(FontWeight::Bold, TITLE_SIZE);
        surface.text(TITLE, TITLE_X, TITLE_Y, Align::Center)?;

        let mut y = FIRST_ROW_Y;
        for field in [Field::Name, Field::Email, Field::Phone, Field::Position] {
            row(surface, field, display_value(record, field), y)?;
            y += LINE_HEIGHT + ROW_GAP;
        }

        surface.set_font(FontWeight::Bold, BODY_SIZE);
        surface.text(&label(Field::Description), LABEL_X, y, Align::Left)?;
        surface.set_font(FontWeight::Normal, BODY_SIZE);

        let lines = surface.split_to_width(display_value(record, Field::Description), WRAP_WIDTH);
        debug!(lines = lines.len(), "Wrapped description");

        // Lines sit DESCRIPTION_PITCH apart; the footer cursor advances
        // LINE_HEIGHT per line on the current page.
        let mut block_top = y;
        let mut on_page = 0usize;
        for line in &lines {
            let mut line_y = block_top + DESCRIPTION_OFFSET + on_page as f64 * DESCRIPTION_PITCH;
            if line_y > BOTTOM_LIMIT {
                surface.add_page();
                block_top = TOP_MARGIN - DESCRIPTION_OFFSET;
                on_page = 0;
                line_y = TOP_MARGIN;
            }
            surface.text(line, LABEL_X, line_y, Align::Left)?;
            on_page += 1;
        }

        let footer_y = break_page(
            surface,
            block_top + on_page as f64 * LINE_HEIGHT + FOOTER_GAP,
        );
        surface.set_font(FontWeight::Normal, FOOTER_SIZE);
        surface.text(&stamp, LABEL_X, footer_y, Align::Left)?;

        Ok(())
    }
}

/// The text drawn for `field`, with placeholders for empty optional fields.
pub fn display_value(record: &ContactRecord, field: Field) -> &str {
    let value = record.get(field);
    match field {
        Field::Position if value.is_empty() => POSITION_PLACEHOLDER,
        Field::Description if value.is_empty() => DESCRIPTION_PLACEHOLDER,
        _ => value,
    }
}

fn label(field: Field) -> String {
    format!("{}:", field.label())
}

fn row<S: LayoutSurface>(
    surface: &mut S,
    field: Field,
    value: &str,
    y: f64,
) -> Result<(), RenderError> {
    surface.set_font(FontWeight::Bold, BODY_SIZE);
    surface.text(&label(field), LABEL_X, y, Align::Left)?;
    surface.set_font(FontWeight::Normal, BODY_SIZE);
    surface.text(value, VALUE_X, y, Align::Left)
}

fn break_page<S: LayoutSurface>(surface: &mut S, y: f64) -> f64 {
    if y > BOTTOM_LIMIT {
        surface.add_page();
        TOP_MARGIN
    } else {
        y
    }
}
