//! Section segmentation.
//!
//! A single fold over the classified run sequence partitions it into
//! labeled sections. A run opens a new section only when it is emphasized
//! AND its normalized text contains a known heading keyword; stray
//! emphasized text (an emphasized company name, say) never fragments the
//! current section. Everything before the first recognized heading is the
//! contact block.

use crate::extract::ClassifiedRun;
use crate::resume::model::{Section, SectionLabel};

/// Heading keywords per label, in tie-break priority order: when a heading
/// matches keywords for two labels, the first entry here wins.
const SECTION_KEYWORDS: &[(SectionLabel, &[&str])] = &[
    (SectionLabel::Experience, &["experience", "employment", "work history"]),
    (SectionLabel::Projects, &["project"]),
    (SectionLabel::Education, &["education", "academic"]),
    (SectionLabel::Certifications, &["certificat"]),
    (SectionLabel::Skills, &["skill"]),
    (
        SectionLabel::Extracurricular,
        &["extracurricular", "activities", "leadership"],
    ),
];

/// Decide whether a run is a candidate section heading, and for which label.
///
/// Matching is case-insensitive and by containment, so "EXPERIENCE" and
/// "Professional Experience" both open an EXPERIENCE section.
pub fn heading_label(run: &ClassifiedRun) -> Option<SectionLabel> {
    if !run.emphasized {
        return None;
    }

    let text = run.trimmed().to_lowercase();
    if text.is_empty() {
        return None;
    }

    SECTION_KEYWORDS
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|k| text.contains(k)))
        .map(|(label, _)| *label)
}

/// Partition a classified run sequence into sections.
///
/// Pure function of its input: re-running on the same sequence yields
/// identical boundaries. No run is dropped or duplicated.
pub fn segment(runs: Vec<ClassifiedRun>) -> Vec<Section> {
    let mut sections = Vec::new();
    let mut current = Section::new(SectionLabel::Contact);

    for run in runs {
        if let Some(label) = heading_label(&run) {
            log::debug!("Section heading {:?}: {:?}", label, run.trimmed());
            let mut next = Section::new(label);
            next.heading = Some(run);
            sections.push(std::mem::replace(&mut current, next));
        } else {
            current.runs.push(run);
        }
    }

    sections.push(current);
    sections
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::{classify_runs, ExtractOptions, TextRun};

    fn bold(text: &str) -> TextRun {
        TextRun {
            bold_flag: true,
            ..TextRun::plain(text)
        }
    }

    fn classified(runs: Vec<TextRun>) -> Vec<ClassifiedRun> {
        classify_runs(runs, &ExtractOptions::default())
    }

    #[test]
    fn test_runs_before_first_heading_are_contact() {
        let runs = classified(vec![
            TextRun::plain("Jane Doe"),
            TextRun::plain("jane@example.com"),
            bold("EXPERIENCE"),
            TextRun::plain("Built systems."),
        ]);

        let sections = segment(runs);
        assert_eq!(sections.len(), 2);
        assert_eq!(sections[0].label, SectionLabel::Contact);
        assert_eq!(sections[0].runs.len(), 2);
        assert_eq!(sections[1].label, SectionLabel::Experience);
        assert_eq!(sections[1].runs.len(), 1);
    }

    #[test]
    fn test_keyword_matching_is_substring_and_case_insensitive() {
        for heading in ["EXPERIENCE", "Professional Experience", "employment history"] {
            let runs = classified(vec![bold(heading)]);
            let sections = segment(runs);
            assert_eq!(sections[1].label, SectionLabel::Experience, "{heading}");
        }
    }

    #[test]
    fn test_unemphasized_keyword_does_not_open_section() {
        let runs = classified(vec![
            bold("EXPERIENCE"),
            TextRun::plain("Gained experience with distributed systems."),
        ]);
        let sections = segment(runs);
        assert_eq!(sections.len(), 2);
        assert_eq!(sections[1].runs.len(), 1);
    }

    #[test]
    fn test_emphasized_non_keyword_does_not_split_section() {
        let runs = classified(vec![
            bold("EXPERIENCE"),
            bold("Acme Corporation"),
            TextRun::plain("Built systems."),
        ]);
        let sections = segment(runs);
        assert_eq!(sections.len(), 2);
        assert_eq!(sections[1].label, SectionLabel::Experience);
        assert_eq!(sections[1].runs.len(), 2);
    }

    #[test]
    fn test_keyword_collision_resolved_by_priority() {
        // Mentions both education and certification; education wins by order
        let runs = classified(vec![bold("Education & Certifications")]);
        let sections = segment(runs);
        assert_eq!(sections[1].label, SectionLabel::Education);
    }

    #[test]
    fn test_coverage_no_loss_no_duplication() {
        let runs = classified(vec![
            TextRun::plain("Jane Doe"),
            bold("SKILLS"),
            TextRun::plain("Rust, Go"),
            bold("PROJECTS"),
            bold("uncv"),
            TextRun::plain("A parser."),
        ]);
        let total = runs.len();

        let sections = segment(runs);
        let covered: usize = sections.iter().map(|s| s.run_count()).sum();
        assert_eq!(covered, total);
    }

    #[test]
    fn test_idempotence() {
        let runs = classified(vec![
            TextRun::plain("Jane Doe"),
            bold("EXPERIENCE"),
            TextRun::plain("Built systems."),
        ]);

        let a = segment(runs.clone());
        let b = segment(runs);
        assert_eq!(a.len(), b.len());
        for (x, y) in a.iter().zip(b.iter()) {
            assert_eq!(x.label, y.label);
            assert_eq!(x.runs.len(), y.runs.len());
        }
    }

    #[test]
    fn test_empty_section_between_headings() {
        let runs = classified(vec![bold("EXPERIENCE"), bold("EDUCATION")]);
        let sections = segment(runs);
        let exp = sections
            .iter()
            .find(|s| s.label == SectionLabel::Experience)
            .unwrap();
        assert!(exp.is_empty());
    }
}
