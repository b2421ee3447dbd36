//! Page layout seam.
//!
//! The renderer places text through [`LayoutSurface`] using millimetre
//! coordinates measured from the top-left corner of an A4 page. The PDF
//! backend converts them to PDF user space (points, origin bottom-left).

mod pdf;
mod trace;

pub use pdf::{PdfMetadata, PdfSurface};
pub use trace::{Placement, TraceSurface};

use crate::error::RenderError;
use oxidize_pdf::{measure_text, split_into_words, Font};

/// Points per millimetre.
pub const MM_TO_PT: f64 = 72.0 / 25.4;

pub const A4_WIDTH_MM: f64 = 210.0;
pub const A4_HEIGHT_MM: f64 = 297.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontWeight {
    Normal,
    Bold,
}

impl FontWeight {
    /// The Helvetica face used for this weight.
    pub fn font(self) -> Font {
        match self {
            FontWeight::Normal => Font::Helvetica,
            FontWeight::Bold => Font::HelveticaBold,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Center,
    Right,
}

/// Width of `text` in millimetres when set in Helvetica of the given weight.
pub fn measure_mm(text: &str, weight: FontWeight, size: f64) -> f64 {
    measure_text(text, weight.font(), size) / MM_TO_PT
}

/// Something text can be laid out on.
pub trait LayoutSurface {
    fn set_font(&mut self, weight: FontWeight, size: f64);

    fn font(&self) -> (FontWeight, f64);

    /// Places `text` with its baseline at `y`. `x` is the left edge, the
    /// centre or the right edge depending on `align`.
    fn text(&mut self, text: &str, x: f64, y: f64, align: Align) -> Result<(), RenderError>;

    /// Starts a new page; subsequent text goes there.
    fn add_page(&mut self);

    fn page_count(&self) -> usize;

    /// Width of `text` in the current font, in millimetres.
    fn text_width(&self, text: &str) -> f64 {
        let (weight, size) = self.font();
        measure_mm(text, weight, size)
    }

    /// Word-wraps `text` to `width` millimetres in the current font.
    ///
    /// Explicit line breaks start a new line. Words are packed greedily and
    /// a single word wider than the line is broken between characters. An
    /// empty input yields one empty line.
    fn split_to_width(&self, text: &str, width: f64) -> Vec<String> {
        let mut lines = Vec::new();

        for paragraph in text.split('\n') {
            let paragraph = paragraph.strip_suffix('\r').unwrap_or(paragraph);
            let mut current = String::new();

            for word in split_into_words(paragraph) {
                if word.trim().is_empty() {
                    if !current.is_empty() {
                        current.push_str(word);
                    }
                    continue;
                }

                let candidate = format!("{current}{word}");
                if self.text_width(&candidate) <= width {
                    current = candidate;
                    continue;
                }

                if !current.trim().is_empty() {
                    lines.push(current.trim_end().to_string());
                }
                current = String::new();

                if self.text_width(word) <= width {
                    current.push_str(word);
                    continue;
                }

                for ch in word.chars() {
                    current.push(ch);
                    if current.chars().count() > 1 && self.text_width(&current) > width {
                        current.pop();
                        lines.push(std::mem::take(&mut current));
                        current.push(ch);
                    }
                }
            }

            lines.push(current.trim_end().to_string());
        }

        lines
    }
}
