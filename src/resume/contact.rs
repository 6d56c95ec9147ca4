//! Contact block field extraction.
//!
//! The contact block does not carry entry structure, so it gets its own
//! field-pattern matcher: e-mail and phone regexes, a URL matcher that
//! routes linkedin.com/github.com into their fields, and positional
//! fallbacks for name and location.

use regex::Regex;

use crate::extract::ExtractOptions;
use crate::resume::entry::group_lines;
use crate::resume::model::{ContactInfo, Section};

/// Compiled patterns for contact extraction.
pub(crate) struct ContactPatterns {
    email: Regex,
    phone: Regex,
    url: Regex,
    location: Regex,
}

impl ContactPatterns {
    pub(crate) fn new() -> Self {
        Self {
            email: Regex::new(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}\b").unwrap(),
            phone: Regex::new(r"\+?1?\s*\(?(\d{3})\)?[-.\s]*(\d{3})[-.\s]*(\d{4})").unwrap(),
            url: Regex::new(r"(?i)https?://[^\s|]+|\b[a-zA-Z0-9-]+(?:\.[a-zA-Z0-9-]+)+(?:/[^\s|]*)?")
                .unwrap(),
            location: Regex::new(r"[A-Z][A-Za-z .'’-]*,\s*[A-Z]{2,3}\b").unwrap(),
        }
    }
}

/// Parse the CONTACT section into a [`ContactInfo`].
///
/// Lines with no recognizable field pattern fall back positionally: the
/// first becomes the name, the next the location. When nothing qualifies
/// as a name, the first emphasized run does (résumés lead with an
/// emphasized name more reliably than with a plain-text one).
pub fn parse_contact(section: &Section, options: &ExtractOptions) -> ContactInfo {
    let patterns = ContactPatterns::new();
    let lines = group_lines(&section.runs, options.line_tolerance);
    let mut contact = ContactInfo::default();

    for line in &lines {
        let raw = line.text();
        let text = raw.trim();
        if text.is_empty() {
            continue;
        }

        let mut matched = false;

        if contact.email.is_empty() {
            if let Some(m) = patterns.email.find(text) {
                contact.email = m.as_str().to_string();
                matched = true;
            }
        } else if patterns.email.is_match(text) {
            matched = true;
        }

        if contact.phone.is_empty() {
            if let Some(m) = patterns.phone.find(text) {
                contact.phone = m.as_str().trim().to_string();
                matched = true;
            }
        }

        for m in patterns.url.find_iter(text) {
            let url = m.as_str();
            let lower = url.to_lowercase();
            if lower.contains("linkedin.com") {
                if contact.linkedin.is_empty() {
                    contact.linkedin = url.to_string();
                }
                matched = true;
            } else if lower.contains("github.com") {
                if contact.github.is_empty() {
                    contact.github = url.to_string();
                }
                matched = true;
            } else if patterns.email.is_match(url) {
                // Already counted as an e-mail address
                matched = true;
            }
        }

        if contact.location.is_empty() && !matched {
            if let Some(m) = patterns.location.find(text) {
                contact.location = m.as_str().to_string();
                matched = true;
            }
        }

        if !matched {
            if contact.name.is_empty() {
                contact.name = text.to_string();
            } else if contact.location.is_empty() {
                contact.location = text.to_string();
            }
        }
    }

    // Fall back to the first emphasized run for the name
    if contact.name.is_empty() {
        if let Some(run) = section.runs.iter().find(|r| r.emphasized) {
            contact.name = run.trimmed().to_string();
        }
    }

    contact
}
