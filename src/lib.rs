//! # uncv
//!
//! Structured résumé extraction from PDF files.
//!
//! This library walks a résumé PDF's text layer, recovers per-run font
//! metadata, and folds the result into a structured JSON-ready record:
//! contact details, categorized skills, and per-section entries.
//!
//! ## Quick Start
//!
//! ```no_run
//! use uncv::{parse_file, render, JsonFormat};
//!
//! fn main() -> uncv::Result<()> {
//!     let record = parse_file("resume.pdf")?;
//!     let json = render::to_json(&record, JsonFormat::Pretty)?;
//!     println!("{}", json);
//!     Ok(())
//! }
//! ```
//!
//! ## Pipeline
//!
//! - **Run extraction**: text runs with font name, size, and position
//! - **Emphasis classification**: bold detection from descriptor flags,
//!   font names, and weights
//! - **Segmentation**: emphasized heading keywords partition the runs
//! - **Assembly**: per-section parsers fill the [`ResumeRecord`]

pub mod describe;
pub mod detect;
pub mod error;
pub mod extract;
pub mod render;
pub mod resume;

// Re-export commonly used types
pub use describe::{DescriptionContext, DescriptionGenerator, DescriptionKind, SiteRecord};
pub use detect::{detect_format_from_bytes, detect_format_from_path, is_pdf, PdfFormat};
pub use error::{Error, Result};
pub use extract::{
    classify_runs, ClassifiedRun, EmphasisSignal, ExtractOptions, RunExtractor, TextRun,
};
pub use render::{to_json, JsonFormat};
pub use resume::{
    assemble, segment, ContactInfo, Entry, ResumeRecord, Section, SectionLabel,
};

use std::io::Read;
use std::path::Path;

/// Parse a résumé PDF into a structured record.
///
/// # Example
///
/// ```no_run
/// use uncv::parse_file;
///
/// let record = parse_file("resume.pdf").unwrap();
/// println!("{}", record.contact_info.name);
/// ```
pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<ResumeRecord> {
    parse_file_with_options(path, ExtractOptions::default())
}

/// Parse a résumé PDF with custom options.
///
/// # Example
///
/// ```no_run
/// use uncv::{parse_file_with_options, ExtractOptions};
///
/// let options = ExtractOptions::default().with_bold_weight_threshold(700);
/// let record = parse_file_with_options("resume.pdf", options).unwrap();
/// ```
pub fn parse_file_with_options<P: AsRef<Path>>(
    path: P,
    options: ExtractOptions,
) -> Result<ResumeRecord> {
    let extractor = RunExtractor::open_with_options(path, options)?;
    structure(&extractor)
}

/// Parse a résumé PDF from bytes.
pub fn parse_bytes(data: &[u8]) -> Result<ResumeRecord> {
    parse_bytes_with_options(data, ExtractOptions::default())
}

/// Parse a résumé PDF from bytes with custom options.
pub fn parse_bytes_with_options(data: &[u8], options: ExtractOptions) -> Result<ResumeRecord> {
    let extractor = RunExtractor::from_bytes_with_options(data, options)?;
    structure(&extractor)
}

/// Parse a résumé PDF from a reader.
///
/// # Example
///
/// ```no_run
/// use uncv::parse_reader;
/// use std::fs::File;
///
/// let file = File::open("resume.pdf").unwrap();
/// let record = parse_reader(file).unwrap();
/// ```
pub fn parse_reader<R: Read>(reader: R) -> Result<ResumeRecord> {
    let extractor = RunExtractor::from_reader(reader)?;
    structure(&extractor)
}

/// Extract the raw text runs from a résumé PDF without structuring them.
///
/// Useful for inspecting what the extractor sees before segmentation.
pub fn extract_runs<P: AsRef<Path>>(path: P) -> Result<Vec<TextRun>> {
    let extractor = RunExtractor::open(path)?;
    extractor.extract()
}

fn structure(extractor: &RunExtractor) -> Result<ResumeRecord> {
    let options = extractor.options().clone();
    let runs = extractor.extract()?;
    let classified = classify_runs(runs, &options);
    let sections = segment(classified);
    Ok(assemble(&sections, &options))
}

/// Builder for parsing résumé PDFs.
///
/// # Example
///
/// ```no_run
/// use uncv::{JsonFormat, Uncv};
///
/// let json = Uncv::new()
///     .with_bold_weight_threshold(700)
///     .with_max_pages(4)
///     .parse("resume.pdf")?
///     .to_json(JsonFormat::Pretty)?;
/// # Ok::<(), uncv::Error>(())
/// ```
pub struct Uncv {
    options: ExtractOptions,
}

impl Uncv {
    /// Create a new builder with default options.
    pub fn new() -> Self {
        Self {
            options: ExtractOptions::default(),
        }
    }

    /// Set the minimum font weight classified as bold.
    pub fn with_bold_weight_threshold(mut self, threshold: i64) -> Self {
        self.options = self.options.with_bold_weight_threshold(threshold);
        self
    }

    /// Limit how many pages are processed (0 means all).
    pub fn with_max_pages(mut self, pages: u32) -> Self {
        self.options = self.options.with_max_pages(pages);
        self
    }

    /// Set the line-grouping tolerance as a fraction of the font size.
    pub fn with_line_tolerance(mut self, tolerance: f32) -> Self {
        self.options = self.options.with_line_tolerance(tolerance);
        self
    }

    /// Parse a résumé PDF file.
    pub fn parse<P: AsRef<Path>>(self, path: P) -> Result<UncvResult> {
        let record = parse_file_with_options(path, self.options)?;
        Ok(UncvResult { record })
    }

    /// Parse a résumé PDF from bytes.
    pub fn parse_bytes(self, data: &[u8]) -> Result<UncvResult> {
        let record = parse_bytes_with_options(data, self.options)?;
        Ok(UncvResult { record })
    }
}

impl Default for Uncv {
    fn default() -> Self {
        Self::new()
    }
}

/// Result of parsing a résumé PDF.
pub struct UncvResult {
    /// The structured record
    pub record: ResumeRecord,
}

impl UncvResult {
    /// Serialize the record to JSON.
    pub fn to_json(&self, format: JsonFormat) -> Result<String> {
        render::to_json(&self.record, format)
    }

    /// Get the record.
    pub fn record(&self) -> &ResumeRecord {
        &self.record
    }
}
