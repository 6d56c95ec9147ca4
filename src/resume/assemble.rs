//! Record assembly.
//!
//! Merges parsed sections into the canonical [`ResumeRecord`]. Partial
//! input is the expected common case: missing sections yield empty
//! containers, and a malformed section never aborts assembly of the
//! others.

use crate::extract::ExtractOptions;
use crate::resume::contact::parse_contact;
use crate::resume::entry::{group_lines, parse_entries, EntryPatterns};
use crate::resume::model::{ContactInfo, ResumeRecord, Section, SectionLabel};

/// Assemble sections into a complete, well-shaped record.
pub fn assemble(sections: &[Section], options: &ExtractOptions) -> ResumeRecord {
    let mut record = ResumeRecord::default();

    for section in sections {
        match section.label {
            SectionLabel::Contact => {
                merge_contact(&mut record.contact_info, parse_contact(section, options));
            }
            SectionLabel::Skills => {
                parse_skills(section, options, &mut record.skills);
            }
            SectionLabel::Experience => {
                record.work_experience.extend(parse_entries(section, options));
            }
            SectionLabel::Projects => {
                record.projects.extend(parse_entries(section, options));
            }
            SectionLabel::Education => {
                record.education.extend(parse_entries(section, options));
            }
            SectionLabel::Certifications => {
                record.certifications.extend(parse_entries(section, options));
            }
            SectionLabel::Extracurricular => {
                record
                    .extracurriculars
                    .extend(parse_extracurriculars(section, options));
            }
            SectionLabel::Unknown => {
                // Retained by the segmenter so no text is lost, but it
                // contributes nothing to the record.
                log::debug!("Skipping {} runs in unknown section", section.runs.len());
            }
        }
    }

    record
}

/// Fill empty contact fields from a later contact block.
fn merge_contact(into: &mut ContactInfo, from: ContactInfo) {
    if into.name.is_empty() {
        into.name = from.name;
    }
    if into.location.is_empty() {
        into.location = from.location;
    }
    if into.phone.is_empty() {
        into.phone = from.phone;
    }
    if into.email.is_empty() {
        into.email = from.email;
    }
    if into.linkedin.is_empty() {
        into.linkedin = from.linkedin;
    }
    if into.github.is_empty() {
        into.github = from.github;
    }
}

/// Parse SKILLS lines into the category map.
///
/// `"<Category>: <comma-or-bullet-separated list>"` lines populate their
/// category; lines without a colon land in "Uncategorized".
fn parse_skills(
    section: &Section,
    options: &ExtractOptions,
    skills: &mut std::collections::BTreeMap<String, Vec<String>>,
) {
    let patterns = EntryPatterns::new();

    for line in group_lines(&section.runs, options.line_tolerance) {
        let raw = line.text();
        let text = raw.trim();
        let text = patterns.strip_bullet(text).unwrap_or(text);
        if text.is_empty() {
            continue;
        }

        if let Some((category, rest)) = text.split_once(':') {
            let category = category.trim();
            if !category.is_empty() {
                skills
                    .entry(category.to_string())
                    .or_default()
                    .extend(split_skill_list(rest));
                continue;
            }
        }

        skills
            .entry("Uncategorized".to_string())
            .or_default()
            .push(text.to_string());
    }
}

/// Split a skill list on commas, bullets, semicolons, and pipes.
fn split_skill_list(text: &str) -> Vec<String> {
    text.split([',', '•', ';', '|'])
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Flatten EXTRACURRICULAR lines to plain strings, bullet glyphs stripped.
fn parse_extracurriculars(section: &Section, options: &ExtractOptions) -> Vec<String> {
    let patterns = EntryPatterns::new();

    group_lines(&section.runs, options.line_tolerance)
        .iter()
        .filter_map(|line| {
            let raw = line.text();
            let text = raw.trim();
            let text = patterns.strip_bullet(text).unwrap_or(text);
            if text.is_empty() {
                None
            } else {
                Some(text.to_string())
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::{classify_runs, TextRun};
    use crate::resume::segment::segment;

    fn classified(runs: Vec<TextRun>) -> Vec<crate::extract::ClassifiedRun> {
        let mut runs = runs;
        for (i, run) in runs.iter_mut().enumerate() {
            run.y = 720.0 - 14.0 * i as f32;
        }
        classify_runs(runs, &ExtractOptions::default())
    }

    fn bold(text: &str) -> TextRun {
        TextRun {
            bold_flag: true,
            ..TextRun::plain(text)
        }
    }

    #[test]
    fn test_skills_with_category() {
        let sections = segment(classified(vec![
            bold("SKILLS"),
            TextRun::plain("Languages: Python, Go, Rust"),
        ]));
        let record = assemble(&sections, &ExtractOptions::default());

        assert_eq!(
            record.skills.get("Languages").unwrap(),
            &vec!["Python", "Go", "Rust"]
        );
    }

    #[test]
    fn test_skills_without_colon_go_uncategorized() {
        let sections = segment(classified(vec![
            bold("SKILLS"),
            TextRun::plain("Team player"),
        ]));
        let record = assemble(&sections, &ExtractOptions::default());

        assert!(record.skills.get("Uncategorized").unwrap().contains(&"Team player".to_string()));
    }

    #[test]
    fn test_skills_bullet_separated_list() {
        let sections = segment(classified(vec![
            bold("SKILLS"),
            TextRun::plain("Tools: Docker • Kubernetes • Terraform"),
        ]));
        let record = assemble(&sections, &ExtractOptions::default());

        assert_eq!(
            record.skills.get("Tools").unwrap(),
            &vec!["Docker", "Kubernetes", "Terraform"]
        );
    }

    #[test]
    fn test_extracurriculars_flatten() {
        let sections = segment(classified(vec![
            bold("EXTRACURRICULARS"),
            TextRun::plain("• Chess club president"),
            TextRun::plain("• Volunteer firefighter"),
        ]));
        let record = assemble(&sections, &ExtractOptions::default());

        assert_eq!(
            record.extracurriculars,
            vec!["Chess club president", "Volunteer firefighter"]
        );
    }

    #[test]
    fn test_minimal_resume_has_all_keys_empty() {
        let sections = segment(classified(vec![
            TextRun::plain("Jane Doe"),
            TextRun::plain("jane@example.com"),
        ]));
        let record = assemble(&sections, &ExtractOptions::default());

        assert_eq!(record.contact_info.name, "Jane Doe");
        assert_eq!(record.contact_info.email, "jane@example.com");
        assert!(record.skills.is_empty());
        assert!(record.work_experience.is_empty());
        assert!(record.projects.is_empty());
        assert!(record.education.is_empty());
        assert!(record.certifications.is_empty());
        assert!(record.extracurriculars.is_empty());
    }

    #[test]
    fn test_contact_and_experience_end_to_end() {
        let runs = vec![
            TextRun::plain("Jane Doe"),
            TextRun::plain("jane@example.com"),
            bold("EXPERIENCE"),
            bold("Software Engineer"),
            TextRun::plain("Acme Corp"),
            TextRun::plain("Jan 2022 - Present"),
            TextRun::plain("Built systems."),
        ];
        let sections = segment(classified(runs));
        let record = assemble(&sections, &ExtractOptions::default());

        assert_eq!(record.contact_info.name, "Jane Doe");
        assert_eq!(record.contact_info.email, "jane@example.com");
        assert_eq!(record.work_experience.len(), 1);

        let entry = &record.work_experience[0];
        assert_eq!(entry.title, "Software Engineer");
        assert_eq!(entry.organization, "Acme Corp");
        assert_eq!(entry.duration.as_deref(), Some("Jan 2022 - Present"));
        assert_eq!(entry.description, vec!["Built systems."]);
    }

    #[test]
    fn test_two_experience_sections_accumulate() {
        let sections = segment(classified(vec![
            bold("EXPERIENCE"),
            bold("Engineer"),
            bold("WORK EXPERIENCE"),
            bold("Intern"),
        ]));
        let record = assemble(&sections, &ExtractOptions::default());
        assert_eq!(record.work_experience.len(), 2);
    }
}
