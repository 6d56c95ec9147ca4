//! Résumé structuring.
//!
//! Turns the flat, classified run sequence produced by [`crate::extract`]
//! into a structured [`ResumeRecord`]: segmentation into labeled sections,
//! per-section entry and contact parsing, and final record assembly.

mod assemble;
mod contact;
mod entry;
mod model;
mod segment;

pub use assemble::assemble;
pub use contact::parse_contact;
pub use entry::{group_lines, parse_entries, Line};
pub use model::{ContactInfo, Entry, ResumeRecord, Section, SectionLabel};
pub use segment::{heading_label, segment};
