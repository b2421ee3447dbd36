use super::{Align, FontWeight, LayoutSurface};
use crate::error::RenderError;
use std::fmt;

/// One piece of text placed on a [`TraceSurface`].
#[derive(Debug, Clone, PartialEq)]
pub struct Placement {
    /// Zero-based page index.
    pub page: usize,
    pub x: f64,
    pub y: f64,
    pub align: Align,
    pub weight: FontWeight,
    pub size: f64,
    pub text: String,
}

/// Records placements instead of drawing them.
///
/// Measurement uses the same font metrics as [`super::PdfSurface`], so a
/// trace shows exactly where the PDF would put each line.
#[derive(Debug, Clone)]
pub struct TraceSurface {
    placements: Vec<Placement>,
    page: usize,
    weight: FontWeight,
    size: f64,
}

impl TraceSurface {
    pub fn new() -> Self {
        Self {
            placements: Vec::new(),
            page: 0,
            weight: FontWeight::Normal,
            size: 12.0,
        }
    }

    pub fn placements(&self) -> &[Placement] {
        &self.placements
    }

    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.placements.iter().map(|p| p.text.as_str())
    }

    /// Whether any placed text contains `needle`.
    pub fn contains(&self, needle: &str) -> bool {
        self.texts().any(|text| text.contains(needle))
    }

    pub fn on_page(&self, page: usize) -> impl Iterator<Item = &Placement> {
        self.placements.iter().filter(move |p| p.page == page)
    }
}

impl Default for TraceSurface {
    fn default() -> Self {
        Self::new()
    }
}

impl LayoutSurface for TraceSurface {
    fn set_font(&mut self, weight: FontWeight, size: f64) {
        self.weight = weight;
        self.size = size;
    }

    fn font(&self) -> (FontWeight, f64) {
        (self.weight, self.size)
    }

    fn text(&mut self, text: &str, x: f64, y: f64, align: Align) -> Result<(), RenderError> {
        self.placements.push(Placement {
            page: self.page,
            x,
            y,
            align,
            weight: self.weight,
            size: self.size,
            text: text.to_string(),
        });
        Ok(())
    }

    fn add_page(&mut self) {
        self.page += 1;
    }

    fn page_count(&self) -> usize {
        self.page + 1
    }
}

impl fmt::Display for TraceSurface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for p in &self.placements {
            let weight = match p.weight {
                FontWeight::Normal => "normal",
                FontWeight::Bold => "bold",
            };
            writeln!(
                f,
                "p{} {:>6.1} {:>6.1} {:<6} {:>4.1}pt  {}",
                p.page + 1,
                p.x,
                p.y,
                weight,
                p.size,
                p.text
            )?;
        }
        Ok(())
    }
}
