use super::{measure_mm, Align, FontWeight, LayoutSurface, MM_TO_PT};
use crate::error::RenderError;
use oxidize_pdf::{Document, Page};

/// A4 page height in points, as used by [`Page::a4`].
const PAGE_HEIGHT_PT: f64 = 842.0;

/// Document-level metadata written on [`PdfSurface::finish`].
#[derive(Debug, Clone, Default)]
pub struct PdfMetadata {
    pub title: Option<String>,
    pub author: Option<String>,
    pub creator: Option<String>,
}

/// [`LayoutSurface`] backed by an `oxidize_pdf` document.
pub struct PdfSurface {
    document: Document,
    page: Page,
    finished_pages: usize,
    weight: FontWeight,
    size: f64,
}

impl PdfSurface {
    /// Creates a surface with one empty A4 page.
    pub fn new() -> Self {
        Self {
            document: Document::new(),
            page: Page::a4(),
            finished_pages: 0,
            weight: FontWeight::Normal,
            size: 12.0,
        }
    }

    /// Closes the current page and serializes the document.
    pub fn finish(mut self, metadata: PdfMetadata) -> Result<Vec<u8>, RenderError> {
        if let Some(title) = metadata.title {
            self.document.set_title(title);
        }
        if let Some(author) = metadata.author {
            self.document.set_author(author);
        }
        if let Some(creator) = metadata.creator {
            self.document.set_creator(creator);
        }

        self.document.add_page(self.page);

        let mut bytes = Vec::new();
        self.document.write(&mut bytes)?;
        Ok(bytes)
    }
}

impl Default for PdfSurface {
    fn default() -> Self {
        Self::new()
    }
}

impl LayoutSurface for PdfSurface {
    fn set_font(&mut self, weight: FontWeight, size: f64) {
        self.weight = weight;
        self.size = size;
    }

    fn font(&self) -> (FontWeight, f64) {
        (self.weight, self.size)
    }

    fn text(&mut self, text: &str, x: f64, y: f64, align: Align) -> Result<(), RenderError> {
        let offset = match align {
            Align::Left => 0.0,
            Align::Center => measure_mm(text, self.weight, self.size) / 2.0,
            Align::Right => measure_mm(text, self.weight, self.size),
        };
        let x_pt = (x - offset) * MM_TO_PT;
        let y_pt = PAGE_HEIGHT_PT - y * MM_TO_PT;

        self.page
            .text()
            .set_font(self.weight.font(), self.size)
            .at(x_pt, y_pt)
            .write(text)?;
        Ok(())
    }

    fn add_page(&mut self) {
        let page = std::mem::replace(&mut self.page, Page::a4());
        self.document.add_page(page);
        self.finished_pages += 1;
    }

    fn page_count(&self) -> usize {
        self.finished_pages + 1
    }
}
