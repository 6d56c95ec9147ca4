//! Entry parsing within a section.
//!
//! Groups a section's runs into visual lines, then folds the lines into
//! discrete entries: an emphasized non-bullet line starts an entry,
//! adjacent emphasized lines merge into a multi-line title, and field
//! extraction (duration, organization, location) runs over the entry's
//! header lines. The parser favors under-segmentation: a field it cannot
//! support from the text is left empty, never fabricated.

use regex::Regex;

use crate::extract::{ClassifiedRun, ExtractOptions};
use crate::resume::model::{Entry, Section};

/// A visual line: consecutive runs on the same page and baseline.
#[derive(Debug, Clone)]
pub struct Line {
    /// Runs on this line, in reading order
    pub runs: Vec<ClassifiedRun>,
    /// Page the line sits on
    pub page: u32,
    /// Baseline Y of the first run
    pub y: f32,
    /// Leftmost X of the line
    pub x: f32,
}

impl Line {
    fn new(first: ClassifiedRun) -> Self {
        Self {
            page: first.run.page_index,
            y: first.run.y,
            x: first.run.x,
            runs: vec![first],
        }
    }

    fn push(&mut self, run: ClassifiedRun) {
        if run.run.x < self.x {
            self.x = run.run.x;
        }
        self.runs.push(run);
    }

    /// Combined text of the line's runs.
    pub fn text(&self) -> String {
        let mut out = String::new();
        for run in &self.runs {
            let piece = run.run.text.as_str();
            if !out.is_empty() && !out.ends_with(' ') && !piece.starts_with(' ') {
                out.push(' ');
            }
            out.push_str(piece);
        }
        out
    }

    /// Whether the line opens with an emphasized run.
    pub fn starts_emphasized(&self) -> bool {
        self.runs.first().is_some_and(|r| r.emphasized)
    }
}

/// Group a run sequence into visual lines.
///
/// Runs arrive in reading order, so consecutive runs whose baselines sit
/// within `tolerance * font_size` of each other on the same page share a
/// line.
pub fn group_lines(runs: &[ClassifiedRun], tolerance: f32) -> Vec<Line> {
    let mut lines: Vec<Line> = Vec::new();

    for run in runs {
        let same_line = lines.last().is_some_and(|line| {
            line.page == run.run.page_index
                && (line.y - run.run.y).abs() <= run.run.font_size * tolerance
        });

        if same_line {
            lines.last_mut().unwrap().push(run.clone());
        } else {
            lines.push(Line::new(run.clone()));
        }
    }

    lines
}

/// Compiled patterns for entry field extraction.
pub(crate) struct EntryPatterns {
    bullet: Regex,
    duration: Regex,
    location_tail: Regex,
    location_paren: Regex,
}

impl EntryPatterns {
    pub(crate) fn new() -> Self {
        Self {
            // Bullet glyphs, or dash/asterisk markers followed by a space
            bullet: Regex::new(r"^(?:[•◦▪●‣⁃]|[-*–—] )\s*").unwrap(),
            // Month-year to month-year/Present, or year to year
            duration: Regex::new(
                r"(?i)\b(?:(?:Jan|Feb|Mar|Apr|May|Jun|Jul|Aug|Sep|Oct|Nov|Dec)[a-z]*\.?\s+\d{4}|\d{4})\s*(?:[-–—]|to)\s*(?:(?:Jan|Feb|Mar|Apr|May|Jun|Jul|Aug|Sep|Oct|Nov|Dec)[a-z]*\.?\s+\d{4}|\d{4}|Present|Current)\b",
            )
            .unwrap(),
            // Trailing "City, ST" / "City, ABC" token
            location_tail: Regex::new(r"([A-Z][A-Za-z .'’-]*,\s*[A-Z]{2,3})\s*$").unwrap(),
            // Parenthetical "(City, Region)" token
            location_paren: Regex::new(r"\(([^()]+,[^()]+)\)").unwrap(),
        }
    }

    /// Strip a leading bullet marker, returning the remainder when the
    /// line was a bullet.
    pub(crate) fn strip_bullet<'a>(&self, text: &'a str) -> Option<&'a str> {
        self.bullet.find(text).map(|m| text[m.end()..].trim())
    }
}

/// Parse a section's runs into entries.
pub fn parse_entries(section: &Section, options: &ExtractOptions) -> Vec<Entry> {
    let patterns = EntryPatterns::new();
    let lines = group_lines(&section.runs, options.line_tolerance);
    if lines.is_empty() {
        return Vec::new();
    }

    // Section left margin: leftmost line start. Body lines that begin here
    // start new description bullets; indented lines continue the previous
    // bullet.
    let margin = lines.iter().map(|l| l.x).fold(f32::INFINITY, f32::min);

    let mut entries: Vec<Entry> = Vec::new();
    let mut current: Option<EntryBuilder> = None;
    let mut prev_line_was_title = false;

    for line in &lines {
        let raw = line.text();
        let text = raw.trim();
        if text.is_empty() {
            continue;
        }

        if let Some(stripped) = patterns.strip_bullet(text) {
            let builder = current.get_or_insert_with(EntryBuilder::default);
            builder.push_bullet(stripped);
            prev_line_was_title = false;
            continue;
        }

        if line.starts_emphasized() {
            // Adjacent emphasized lines with no body between them are a
            // multi-line title, not two entries.
            let can_merge = prev_line_was_title
                && current
                    .as_ref()
                    .is_some_and(|b| b.organization.is_empty() && b.bullets.is_empty());
            if can_merge {
                current.as_mut().unwrap().extend_header(line);
            } else {
                if let Some(builder) = current.take() {
                    entries.push(builder.build(&patterns));
                }
                let mut builder = EntryBuilder::default();
                builder.extend_header(line);
                current = Some(builder);
            }
            prev_line_was_title = true;
            continue;
        }

        prev_line_was_title = false;
        let builder = current.get_or_insert_with(EntryBuilder::default);
        builder.push_plain(text, line.x, margin, &patterns);
    }

    if let Some(builder) = current.take() {
        entries.push(builder.build(&patterns));
    }

    entries
}

/// Accumulates one entry as lines are folded in.
#[derive(Debug, Default)]
struct EntryBuilder {
    title_parts: Vec<String>,
    organization: String,
    duration: Option<String>,
    bullets: Vec<String>,
}

impl EntryBuilder {
    /// Fold a header line in: emphasized runs extend the title, trailing
    /// plain runs on the same line are the organization.
    fn extend_header(&mut self, line: &Line) {
        for run in &line.runs {
            let piece = run.trimmed();
            if piece.is_empty() {
                continue;
            }
            if run.emphasized {
                self.title_parts.push(piece.to_string());
            } else if self.organization.is_empty() {
                self.organization = piece.to_string();
            } else {
                self.organization.push(' ');
                self.organization.push_str(piece);
            }
        }
    }

    fn push_bullet(&mut self, text: &str) {
        let text = text.trim();
        if !text.is_empty() {
            self.bullets.push(text.to_string());
        }
    }

    /// Fold a plain (non-emphasized, non-bullet) line in. While the header
    /// is still open (no body yet), plain lines may carry the duration or
    /// the organization; afterwards they are description text.
    fn push_plain(&mut self, text: &str, x: f32, margin: f32, patterns: &EntryPatterns) {
        let header_open = self.bullets.is_empty();

        if header_open {
            if self.duration.is_none() {
                if let Some(m) = patterns.duration.find(text) {
                    self.duration = Some(m.as_str().to_string());
                    let rest = strip_range(text, m.start(), m.end());
                    if !rest.is_empty() {
                        if self.organization.is_empty() && !self.title_parts.is_empty() {
                            self.organization = rest;
                        } else {
                            self.bullets.push(rest);
                        }
                    }
                    return;
                }
            }

            if self.organization.is_empty() && !self.title_parts.is_empty() {
                self.organization = text.to_string();
                return;
            }
        }

        // Description text: a line at the section's left margin starts a
        // new bullet, an indented line continues the previous one.
        if x <= margin + 1.0 || self.bullets.is_empty() {
            self.bullets.push(text.to_string());
        } else {
            let last = self.bullets.last_mut().unwrap();
            last.push(' ');
            last.push_str(text);
        }
    }

    fn build(self, patterns: &EntryPatterns) -> Entry {
        let mut title = collapse_whitespace(&self.title_parts.join(" "));
        let mut organization = collapse_whitespace(&self.organization);
        let mut duration = self.duration;
        let mut location = None;

        // A date range left inline in the title is still the duration
        if duration.is_none() {
            if let Some(m) = patterns.duration.find(&title) {
                duration = Some(m.as_str().to_string());
                title = strip_range(&title, m.start(), m.end());
            }
        }

        // Trailing or parenthetical location token, organization first
        for source in [&mut organization, &mut title] {
            if location.is_some() {
                break;
            }
            if let Some(c) = patterns.location_paren.captures(source) {
                let m = c.get(0).unwrap();
                location = Some(c[1].trim().to_string());
                *source = strip_range(source, m.start(), m.end());
            } else if let Some(c) = patterns.location_tail.captures(source) {
                let m = c.get(1).unwrap();
                // Only split when something remains; a bare "City, ST"
                // organization is left alone rather than guessed at.
                if m.start() > 0 {
                    location = Some(m.as_str().trim().to_string());
                    *source = strip_range(source, m.start(), source.len());
                }
            }
        }

        Entry {
            title,
            organization,
            location,
            duration,
            description: self.bullets,
        }
    }
}

/// Remove `start..end` from `text` and tidy up separators left behind.
fn strip_range(text: &str, start: usize, end: usize) -> String {
    let joined = format!("{} {}", &text[..start], &text[end..]);
    collapse_whitespace(joined.trim_matches(|c: char| c.is_whitespace() || ",|-–—".contains(c)))
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
