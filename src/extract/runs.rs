//! Text run extraction from PDF content streams.
//!
//! This module extracts ordered text runs with position and font information
//! from résumé PDFs, enabling emphasis classification and section detection
//! downstream. Runs are emitted in reading order: page, then vertical
//! position (top to bottom), then horizontal position.

use std::collections::{BTreeMap, HashMap};
use std::io::Read;
use std::path::Path;

use lopdf::{Document as LopdfDocument, Object, ObjectId};
use unicode_normalization::UnicodeNormalization;

use crate::detect::{detect_format_from_bytes, detect_format_from_path};
use crate::error::{Error, Result};
use crate::extract::options::ExtractOptions;

/// ForceBold bit in the font descriptor Flags entry (PDF 32000-1, table 123).
const FORCE_BOLD_FLAG: i64 = 1 << 18;

/// An atomic span of text sharing one font and position context.
#[derive(Debug, Clone, PartialEq)]
pub struct TextRun {
    /// The text content
    pub text: String,
    /// Base font name (e.g., "Helvetica-Bold")
    pub font_name: String,
    /// Effective font size in points
    pub font_size: f32,
    /// Whether the font descriptor carries the ForceBold flag
    pub bold_flag: bool,
    /// Numeric font weight from the descriptor, if the producer embedded one
    pub font_weight: Option<i64>,
    /// Zero-based page index
    pub page_index: u32,
    /// X position (left edge of the run)
    pub x: f32,
    /// Y position (baseline, PDF coordinates: larger = higher on the page)
    pub y: f32,
}

impl TextRun {
    /// Create a run with plain body-text metadata. Used heavily in tests.
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            font_name: "Helvetica".to_string(),
            font_size: 11.0,
            bold_flag: false,
            font_weight: None,
            page_index: 0,
            x: 0.0,
            y: 0.0,
        }
    }

    /// Trimmed text content.
    pub fn trimmed(&self) -> &str {
        self.text.trim()
    }
}

/// Resolved font attributes for one page font resource.
#[derive(Debug, Clone, Default)]
struct FontInfo {
    base_name: String,
    bold_flag: bool,
    weight: Option<i64>,
}

/// Extracts ordered text runs from a PDF document.
pub struct RunExtractor {
    doc: LopdfDocument,
    options: ExtractOptions,
}

impl RunExtractor {
    /// Open a PDF file.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::open_with_options(path, ExtractOptions::default())
    }

    /// Open a PDF file with custom options.
    pub fn open_with_options<P: AsRef<Path>>(path: P, options: ExtractOptions) -> Result<Self> {
        let path = path.as_ref();

        // Verify it's a PDF before handing it to the backend
        detect_format_from_path(path)?;

        let doc = LopdfDocument::load(path).map_err(|e| match e {
            lopdf::Error::Decryption(_) => Error::Encrypted,
            _ => Error::from(e),
        })?;

        Ok(Self { doc, options })
    }

    /// Load a PDF from bytes.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        Self::from_bytes_with_options(data, ExtractOptions::default())
    }

    /// Load a PDF from bytes with custom options.
    pub fn from_bytes_with_options(data: &[u8], options: ExtractOptions) -> Result<Self> {
        detect_format_from_bytes(data)?;

        let doc = LopdfDocument::load_mem(data).map_err(|e| match e {
            lopdf::Error::Decryption(_) => Error::Encrypted,
            _ => Error::from(e),
        })?;

        Ok(Self { doc, options })
    }

    /// Load a PDF from a reader.
    pub fn from_reader<R: Read>(mut reader: R) -> Result<Self> {
        let mut data = Vec::new();
        reader.read_to_end(&mut data)?;
        Self::from_bytes(&data)
    }

    /// The options this extractor was built with.
    pub fn options(&self) -> &ExtractOptions {
        &self.options
    }

    /// Extract all text runs in reading order.
    ///
    /// Fails with [`Error::NoTextLayer`] when the document yields no runs
    /// at all (pure-image scans are not supported).
    pub fn extract(&self) -> Result<Vec<TextRun>> {
        let pages = self.doc.get_pages();
        let mut runs = Vec::new();

        for (i, (_page_num, page_id)) in pages.iter().enumerate() {
            if self.options.max_pages > 0 && i as u32 >= self.options.max_pages {
                break;
            }

            let mut page_runs = self.extract_page_runs(*page_id, i as u32)?;
            sort_reading_order(&mut page_runs);
            runs.extend(page_runs);
        }

        if runs.iter().all(|r| r.trimmed().is_empty()) {
            return Err(Error::NoTextLayer);
        }

        log::debug!("Extracted {} text runs from {} pages", runs.len(), pages.len());
        Ok(runs)
    }

    /// Extract text runs from one page.
    fn extract_page_runs(&self, page_id: ObjectId, page_index: u32) -> Result<Vec<TextRun>> {
        let lopdf_fonts = self
            .doc
            .get_page_fonts(page_id)
            .map_err(|e| Error::PdfParse(e.to_string()))?;

        let fonts = self.resolve_fonts(&lopdf_fonts);
        let content = self.get_page_content(page_id)?;
        self.parse_content_stream(&content, page_index, &fonts, &lopdf_fonts)
    }

    /// Resolve base name, bold flag, and weight for each page font.
    fn resolve_fonts(
        &self,
        lopdf_fonts: &BTreeMap<Vec<u8>, &lopdf::Dictionary>,
    ) -> HashMap<Vec<u8>, FontInfo> {
        let mut fonts = HashMap::new();

        for (name, font) in lopdf_fonts {
            let base_name = font
                .get(b"BaseFont")
                .ok()
                .and_then(|o| o.as_name().ok())
                .map(|n| String::from_utf8_lossy(n).to_string())
                .unwrap_or_else(|| "Unknown".to_string());

            let mut info = FontInfo {
                base_name,
                ..Default::default()
            };

            // Flags and FontWeight live on the (usually indirect) descriptor
            if let Ok(descriptor) = font.get(b"FontDescriptor") {
                if let Some(desc) = self.resolve_dictionary(descriptor) {
                    if let Ok(flags) = desc.get(b"Flags").and_then(|o| o.as_i64()) {
                        info.bold_flag = flags & FORCE_BOLD_FLAG != 0;
                    }
                    if let Ok(weight) = desc.get(b"FontWeight").and_then(|o| o.as_i64()) {
                        info.weight = Some(weight);
                    }
                }
            }

            fonts.insert(name.clone(), info);
        }

        fonts
    }

    /// Follow a reference to a dictionary, or use the inline dictionary.
    fn resolve_dictionary<'a>(&'a self, obj: &'a Object) -> Option<&'a lopdf::Dictionary> {
        match obj {
            Object::Reference(r) => self.doc.get_dictionary(*r).ok(),
            Object::Dictionary(d) => Some(d),
            _ => None,
        }
    }

    /// Get a page's (possibly concatenated) content stream.
    fn get_page_content(&self, page_id: ObjectId) -> Result<Vec<u8>> {
        let page_dict = self
            .doc
            .get_dictionary(page_id)
            .map_err(|e| Error::PdfParse(e.to_string()))?;

        let contents = page_dict
            .get(b"Contents")
            .map_err(|e| Error::PdfParse(e.to_string()))?;

        match contents {
            Object::Reference(r) => {
                if let Ok(Object::Stream(s)) = self.doc.get_object(*r) {
                    return s
                        .decompressed_content()
                        .map_err(|e| Error::PdfParse(e.to_string()));
                }
                Err(Error::PdfParse("Invalid content stream".to_string()))
            }
            Object::Array(arr) => {
                let mut content = Vec::new();
                for obj in arr {
                    if let Object::Reference(r) = obj {
                        if let Ok(Object::Stream(s)) = self.doc.get_object(*r) {
                            if let Ok(data) = s.decompressed_content() {
                                content.extend_from_slice(&data);
                                content.push(b' ');
                            }
                        }
                    }
                }
                Ok(content)
            }
            _ => Err(Error::PdfParse("Invalid content stream".to_string())),
        }
    }

    /// Walk the content stream operators and emit text runs.
    fn parse_content_stream(
        &self,
        content: &[u8],
        page_index: u32,
        fonts: &HashMap<Vec<u8>, FontInfo>,
        lopdf_fonts: &BTreeMap<Vec<u8>, &lopdf::Dictionary>,
    ) -> Result<Vec<TextRun>> {
        let content =
            lopdf::content::Content::decode(content).map_err(|e| Error::PdfParse(e.to_string()))?;

        let mut runs = Vec::new();
        let mut current_font = FontInfo::default();
        let mut current_font_name: Vec<u8> = Vec::new();
        let mut current_font_size: f32 = 12.0;
        let mut text_matrix = TextMatrix::default();
        let mut in_text_block = false;

        for op in content.operations {
            match op.operator.as_str() {
                "BT" => {
                    in_text_block = true;
                    text_matrix = TextMatrix::default();
                }
                "ET" => {
                    in_text_block = false;
                }
                "Tf" => {
                    if op.operands.len() >= 2 {
                        if let Object::Name(font_name) = &op.operands[0] {
                            current_font_name = font_name.clone();
                            current_font = fonts
                                .get(font_name.as_slice())
                                .cloned()
                                .unwrap_or_else(|| FontInfo {
                                    base_name: String::from_utf8_lossy(font_name).to_string(),
                                    ..Default::default()
                                });
                        }
                        current_font_size = get_number(&op.operands[1]).unwrap_or(12.0);
                    }
                }
                "TL" => {
                    if let Some(leading) = op.operands.first().and_then(get_number) {
                        text_matrix.set_leading(leading);
                    }
                }
                "Td" => {
                    if op.operands.len() >= 2 {
                        let tx = get_number(&op.operands[0]).unwrap_or(0.0);
                        let ty = get_number(&op.operands[1]).unwrap_or(0.0);
                        text_matrix.translate(tx, ty);
                    }
                }
                "TD" => {
                    if op.operands.len() >= 2 {
                        let tx = get_number(&op.operands[0]).unwrap_or(0.0);
                        let ty = get_number(&op.operands[1]).unwrap_or(0.0);
                        text_matrix.set_leading(-ty);
                        text_matrix.translate(tx, ty);
                    }
                }
                "Tm" => {
                    if op.operands.len() >= 6 {
                        text_matrix.set(
                            get_number(&op.operands[0]).unwrap_or(1.0),
                            get_number(&op.operands[1]).unwrap_or(0.0),
                            get_number(&op.operands[2]).unwrap_or(0.0),
                            get_number(&op.operands[3]).unwrap_or(1.0),
                            get_number(&op.operands[4]).unwrap_or(0.0),
                            get_number(&op.operands[5]).unwrap_or(0.0),
                        );
                    }
                }
                "T*" => {
                    text_matrix.next_line();
                }
                "Tj" | "TJ" => {
                    if in_text_block {
                        let text = self.decode_show_text(&op, &current_font_name, lopdf_fonts);
                        self.push_run(
                            &mut runs,
                            text,
                            &current_font,
                            current_font_size,
                            page_index,
                            &text_matrix,
                        );
                    }
                }
                "'" | "\"" => {
                    text_matrix.next_line();
                    if in_text_block {
                        let text_idx = if op.operator == "\"" { 2 } else { 0 };
                        if let Some(Object::String(bytes, _)) = op.operands.get(text_idx) {
                            let text =
                                self.decode_string(bytes, &current_font_name, lopdf_fonts);
                            self.push_run(
                                &mut runs,
                                text,
                                &current_font,
                                current_font_size,
                                page_index,
                                &text_matrix,
                            );
                        }
                    }
                }
                _ => {}
            }
        }

        Ok(runs)
    }

    /// Decode the operand of a Tj or TJ operator.
    fn decode_show_text(
        &self,
        op: &lopdf::content::Operation,
        font_name: &[u8],
        lopdf_fonts: &BTreeMap<Vec<u8>, &lopdf::Dictionary>,
    ) -> String {
        if op.operator == "TJ" {
            // TJ: array of strings and kerning adjustments in 1/1000 text
            // space units. Large negative adjustments are word spaces.
            let space_threshold = 200.0;

            if let Some(Object::Array(arr)) = op.operands.first() {
                let mut combined = String::new();
                for item in arr {
                    match item {
                        Object::String(bytes, _) => {
                            combined.push_str(&self.decode_string(bytes, font_name, lopdf_fonts));
                        }
                        Object::Integer(n) => {
                            if -(*n as f32) > space_threshold && needs_space(&combined) {
                                combined.push(' ');
                            }
                        }
                        Object::Real(n) => {
                            if -n > space_threshold && needs_space(&combined) {
                                combined.push(' ');
                            }
                        }
                        _ => {}
                    }
                }
                combined
            } else {
                String::new()
            }
        } else if let Some(Object::String(bytes, _)) = op.operands.first() {
            self.decode_string(bytes, font_name, lopdf_fonts)
        } else {
            String::new()
        }
    }

    /// Decode one PDF string using the current font's encoding.
    fn decode_string(
        &self,
        bytes: &[u8],
        font_name: &[u8],
        lopdf_fonts: &BTreeMap<Vec<u8>, &lopdf::Dictionary>,
    ) -> String {
        let encoding = lopdf_fonts
            .get(font_name)
            .and_then(|f| f.get_font_encoding(&self.doc).ok());

        let decoded = if let Some(ref enc) = encoding {
            LopdfDocument::decode_text(enc, bytes).unwrap_or_else(|_| decode_text_simple(bytes))
        } else {
            decode_text_simple(bytes)
        };

        decoded.nfc().collect()
    }

    fn push_run(
        &self,
        runs: &mut Vec<TextRun>,
        text: String,
        font: &FontInfo,
        font_size: f32,
        page_index: u32,
        matrix: &TextMatrix,
    ) {
        if text.trim().is_empty() {
            return;
        }

        let (x, y) = matrix.position();
        runs.push(TextRun {
            text,
            font_name: font.base_name.clone(),
            font_size: font_size * matrix.scale(),
            bold_flag: font.bold_flag,
            font_weight: font.weight,
            page_index,
            x,
            y,
        });
    }
}

/// Sort runs within one page: top to bottom (PDF Y is bottom-up), then left
/// to right.
fn sort_reading_order(runs: &mut [TextRun]) {
    runs.sort_by(|a, b| {
        let y_cmp = b.y.partial_cmp(&a.y).unwrap_or(std::cmp::Ordering::Equal);
        if y_cmp == std::cmp::Ordering::Equal {
            a.x.partial_cmp(&b.x).unwrap_or(std::cmp::Ordering::Equal)
        } else {
            y_cmp
        }
    });
}

/// Whether a word space should be appended to the combined TJ text.
fn needs_space(combined: &str) -> bool {
    !combined.is_empty() && !combined.ends_with(' ') && !combined.ends_with('\u{00A0}')
}

/// Text matrix for tracking position in a content stream.
#[derive(Debug, Clone)]
struct TextMatrix {
    a: f32,
    b: f32,
    c: f32,
    d: f32,
    e: f32, // X translation
    f: f32, // Y translation
    leading: f32,
}

impl Default for TextMatrix {
    fn default() -> Self {
        Self {
            a: 1.0,
            b: 0.0,
            c: 0.0,
            d: 1.0,
            e: 0.0,
            f: 0.0,
            leading: 12.0,
        }
    }
}

impl TextMatrix {
    fn set(&mut self, a: f32, b: f32, c: f32, d: f32, e: f32, f: f32) {
        self.a = a;
        self.b = b;
        self.c = c;
        self.d = d;
        self.e = e;
        self.f = f;
    }

    fn set_leading(&mut self, leading: f32) {
        if leading > 0.0 {
            self.leading = leading;
        }
    }

    fn translate(&mut self, tx: f32, ty: f32) {
        self.e += tx * self.a + ty * self.c;
        self.f += tx * self.b + ty * self.d;
    }

    fn next_line(&mut self) {
        self.f -= self.leading * self.d;
    }

    fn position(&self) -> (f32, f32) {
        (self.e, self.f)
    }

    fn scale(&self) -> f32 {
        (self.a * self.a + self.c * self.c).sqrt()
    }
}

/// Helper to extract a number from a PDF object.
fn get_number(obj: &Object) -> Option<f32> {
    match obj {
        Object::Integer(i) => Some(*i as f32),
        Object::Real(r) => Some(*r),
        _ => None,
    }
}

/// Simple text decoding fallback when no encoding is available.
fn decode_text_simple(bytes: &[u8]) -> String {
    // UTF-16BE with BOM
    if bytes.len() >= 2 && bytes[0] == 0xFE && bytes[1] == 0xFF {
        let utf16: Vec<u16> = bytes[2..]
            .chunks(2)
            .filter_map(|c| {
                if c.len() == 2 {
                    Some(u16::from_be_bytes([c[0], c[1]]))
                } else {
                    None
                }
            })
            .collect();
        return String::from_utf16(&utf16).unwrap_or_default();
    }

    if let Ok(s) = String::from_utf8(bytes.to_vec()) {
        return s;
    }

    // Fallback: Latin-1
    bytes.iter().map(|&b| b as char).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_at(text: &str, page: u32, x: f32, y: f32) -> TextRun {
        TextRun {
            page_index: page,
            x,
            y,
            ..TextRun::plain(text)
        }
    }

    #[test]
    fn test_reading_order_sort() {
        let mut runs = vec![
            run_at("second", 0, 72.0, 700.0),
            run_at("first", 0, 72.0, 720.0),
            run_at("third", 0, 200.0, 700.0),
        ];
        sort_reading_order(&mut runs);

        let texts: Vec<&str> = runs.iter().map(|r| r.text.as_str()).collect();
        assert_eq!(texts, vec!["first", "second", "third"]);
    }

    #[test]
    fn test_text_matrix_translate() {
        let mut m = TextMatrix::default();
        m.translate(72.0, 720.0);
        assert_eq!(m.position(), (72.0, 720.0));

        m.translate(0.0, -14.0);
        assert_eq!(m.position(), (72.0, 706.0));
    }

    #[test]
    fn test_text_matrix_next_line_uses_leading() {
        let mut m = TextMatrix::default();
        m.set_leading(14.0);
        m.translate(72.0, 720.0);
        m.next_line();
        assert_eq!(m.position(), (72.0, 706.0));
    }

    #[test]
    fn test_decode_text_simple_utf16() {
        let bytes = [0xFE, 0xFF, 0x00, b'H', 0x00, b'i'];
        assert_eq!(decode_text_simple(&bytes), "Hi");
    }

    #[test]
    fn test_decode_text_simple_latin1() {
        let bytes = [b'c', b'a', b'f', 0xE9];
        assert_eq!(decode_text_simple(&bytes), "café");
    }

    #[test]
    fn test_from_bytes_rejects_garbage() {
        let result = RunExtractor::from_bytes(b"not a pdf at all");
        assert!(result.is_err());
    }
}
