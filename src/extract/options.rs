//! Extraction options and configuration.

/// Options for extracting text runs from résumé PDFs.
#[derive(Debug, Clone)]
pub struct ExtractOptions {
    /// Numeric font weight at or above which a run counts as emphasized
    /// when neither the bold flag nor the font name decide it.
    pub bold_weight_threshold: i64,

    /// Maximum number of pages to extract (0 = all pages).
    pub max_pages: u32,

    /// Fraction of font size used as the Y tolerance when grouping runs
    /// into visual lines.
    pub line_tolerance: f32,
}

impl ExtractOptions {
    /// Create new extract options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the bold weight threshold.
    pub fn with_bold_weight_threshold(mut self, threshold: i64) -> Self {
        self.bold_weight_threshold = threshold;
        self
    }

    /// Limit extraction to the first `pages` pages (0 = all).
    pub fn with_max_pages(mut self, pages: u32) -> Self {
        self.max_pages = pages;
        self
    }

    /// Set the line grouping tolerance as a fraction of font size.
    pub fn with_line_tolerance(mut self, tolerance: f32) -> Self {
        self.line_tolerance = tolerance;
        self
    }
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            bold_weight_threshold: 600,
            max_pages: 0,
            line_tolerance: 0.3,
        }
    }
}
