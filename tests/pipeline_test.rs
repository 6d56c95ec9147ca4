//! Integration tests for the run-to-record pipeline.
//!
//! These tests feed synthetic runs through classification, segmentation,
//! and assembly, bypassing the PDF backend.

use uncv::{
    assemble, classify_runs, segment, ExtractOptions, ResumeRecord, SectionLabel, TextRun,
};

/// Build a run sequence laid out as one column, one run per line.
fn column(specs: &[(&str, bool)]) -> Vec<TextRun> {
    specs
        .iter()
        .enumerate()
        .map(|(i, (text, bold))| TextRun {
            bold_flag: *bold,
            font_name: if *bold { "Helvetica-Bold" } else { "Helvetica" }.to_string(),
            x: 72.0,
            y: 720.0 - 16.0 * i as f32,
            ..TextRun::plain(*text)
        })
        .collect()
}

fn parse(specs: &[(&str, bool)]) -> ResumeRecord {
    let options = ExtractOptions::default();
    let classified = classify_runs(column(specs), &options);
    let sections = segment(classified);
    assemble(&sections, &options)
}

#[test]
fn test_full_resume_pipeline() {
    let record = parse(&[
        ("Jane Doe", true),
        ("jane@example.com | 416-555-0188", false),
        ("Toronto, ON", false),
        ("SKILLS", true),
        ("Languages: Python, Go, Rust", false),
        ("Tools: Docker, Kubernetes", false),
        ("EXPERIENCE", true),
        ("Software Engineer", true),
        ("Acme Corp", false),
        ("Jan 2022 - Present", false),
        ("• Built distributed systems", false),
        ("• Led a team of four", false),
        ("EDUCATION", true),
        ("BSc Computer Science", true),
        ("University of Toronto", false),
        ("2018 - 2022", false),
    ]);

    assert_eq!(record.contact_info.name, "Jane Doe");
    assert_eq!(record.contact_info.email, "jane@example.com");
    assert!(record.contact_info.phone.contains("416"));
    assert_eq!(record.contact_info.location, "Toronto, ON");

    assert_eq!(record.skills.len(), 2);
    assert_eq!(
        record.skills.get("Languages").unwrap(),
        &vec!["Python", "Go", "Rust"]
    );

    assert_eq!(record.work_experience.len(), 1);
    let job = &record.work_experience[0];
    assert_eq!(job.title, "Software Engineer");
    assert_eq!(job.organization, "Acme Corp");
    assert_eq!(job.duration.as_deref(), Some("Jan 2022 - Present"));
    assert_eq!(
        job.description,
        vec!["Built distributed systems", "Led a team of four"]
    );

    assert_eq!(record.education.len(), 1);
    let degree = &record.education[0];
    assert_eq!(degree.title, "BSc Computer Science");
    assert_eq!(degree.organization, "University of Toronto");
    assert_eq!(degree.duration.as_deref(), Some("2018 - 2022"));
}

#[test]
fn test_minimal_resume_keeps_every_key() {
    let record = parse(&[("Jane Doe", true), ("jane@example.com", false)]);

    let json = serde_json::to_value(&record).unwrap();
    let obj = json.as_object().unwrap();
    for key in [
        "contact_info",
        "skills",
        "work_experience",
        "projects",
        "education",
        "certifications",
        "extracurriculars",
    ] {
        assert!(obj.contains_key(key), "missing top-level key {key}");
    }
    assert!(record.work_experience.is_empty());
}

#[test]
fn test_sections_cover_all_runs() {
    let specs = [
        ("Jane Doe", true),
        ("EXPERIENCE", true),
        ("Engineer", true),
        ("Acme", false),
        ("PROJECTS", true),
        ("uncv", true),
    ];
    let options = ExtractOptions::default();
    let classified = classify_runs(column(&specs), &options);
    let total = classified.len();

    let sections = segment(classified);
    let covered: usize = sections.iter().map(|s| s.run_count()).sum();
    assert_eq!(covered, total);
}

#[test]
fn test_pipeline_is_deterministic() {
    let specs = [
        ("Jane Doe", true),
        ("EXPERIENCE", true),
        ("Engineer", true),
        ("Acme Corp", false),
        ("2020 - 2021", false),
    ];
    let a = parse(&specs);
    let b = parse(&specs);
    assert_eq!(a, b);
}

#[test]
fn test_multiple_entries_in_one_section() {
    let record = parse(&[
        ("EXPERIENCE", true),
        ("Senior Engineer", true),
        ("Acme Corp", false),
        ("2022 - Present", false),
        ("• Shipped the thing", false),
        ("Junior Engineer", true),
        ("Globex", false),
        ("2020 - 2022", false),
    ]);

    assert_eq!(record.work_experience.len(), 2);
    assert_eq!(record.work_experience[0].title, "Senior Engineer");
    assert_eq!(record.work_experience[1].title, "Junior Engineer");
    assert_eq!(record.work_experience[1].organization, "Globex");
}

#[test]
fn test_unknown_heading_text_stays_out_of_record() {
    // Emphasized non-keyword text inside a section is treated as entry
    // structure, never as a new section.
    let options = ExtractOptions::default();
    let classified = classify_runs(
        column(&[("EXPERIENCE", true), ("Acme Corporation", true)]),
        &options,
    );
    let sections = segment(classified);

    assert_eq!(sections.len(), 2);
    assert_eq!(sections[1].label, SectionLabel::Experience);
}

#[test]
fn test_record_json_round_trip() {
    let record = parse(&[
        ("Jane Doe", true),
        ("SKILLS", true),
        ("Languages: Rust", false),
    ]);

    let json = serde_json::to_string(&record).unwrap();
    let back: ResumeRecord = serde_json::from_str(&json).unwrap();
    assert_eq!(record, back);
}
