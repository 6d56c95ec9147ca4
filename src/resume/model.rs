//! Résumé data model.
//!
//! All entities are build-once: produced in a single pass over one document
//! and never mutated after assembly. Every top-level key of [`ResumeRecord`]
//! is always serialized, possibly as an empty container, so downstream
//! consumers never branch on key absence.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::extract::ClassifiedRun;

/// Conventional résumé section labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionLabel {
    Contact,
    Skills,
    Experience,
    Projects,
    Education,
    Certifications,
    Extracurricular,
    Unknown,
}

/// A labeled, contiguous partition of the run sequence.
///
/// Sections are non-overlapping and collectively exhaust the input: every
/// run lands in exactly one section, either as its heading or as body.
#[derive(Debug, Clone)]
pub struct Section {
    /// The detected label
    pub label: SectionLabel,
    /// The heading run that opened this section, if any (the leading
    /// CONTACT section has none)
    pub heading: Option<ClassifiedRun>,
    /// Body runs in reading order
    pub runs: Vec<ClassifiedRun>,
}

impl Section {
    /// Create an empty section with the given label.
    pub fn new(label: SectionLabel) -> Self {
        Self {
            label,
            heading: None,
            runs: Vec::new(),
        }
    }

    /// Total number of runs held by this section, heading included.
    pub fn run_count(&self) -> usize {
        self.runs.len() + usize::from(self.heading.is_some())
    }

    /// Whether the section holds no body runs.
    pub fn is_empty(&self) -> bool {
        self.runs.is_empty()
    }
}

/// One discrete item within a section: a job, a project, a degree, a
/// certification.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    /// Entry title (job title, project name, degree)
    pub title: String,
    /// Organization, company, institution, or issuer
    pub organization: String,
    /// Location, when one could be recovered from the text
    pub location: Option<String>,
    /// Date range, when one could be recovered from the text
    pub duration: Option<String>,
    /// Description bullets in source order (may be empty)
    pub description: Vec<String>,
}

/// Contact information from the leading block of the résumé.
///
/// All fields default to empty strings, mirroring the common case of
/// partial contact blocks.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContactInfo {
    pub name: String,
    pub location: String,
    pub phone: String,
    pub email: String,
    pub linkedin: String,
    pub github: String,
}

/// The canonical structured résumé record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResumeRecord {
    pub contact_info: ContactInfo,
    pub skills: BTreeMap<String, Vec<String>>,
    pub work_experience: Vec<Entry>,
    pub projects: Vec<Entry>,
    pub education: Vec<Entry>,
    pub certifications: Vec<Entry>,
    pub extracurriculars: Vec<String>,
}

impl ResumeRecord {
    /// Whether the record carries no extracted content at all.
    pub fn is_empty(&self) -> bool {
        self.contact_info == ContactInfo::default()
            && self.skills.is_empty()
            && self.work_experience.is_empty()
            && self.projects.is_empty()
            && self.education.is_empty()
            && self.certifications.is_empty()
            && self.extracurriculars.is_empty()
    }
}
