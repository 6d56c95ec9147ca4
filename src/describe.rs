//! Narrative description hooks.
//!
//! The structured record can be enriched with short narrative blurbs (a
//! hero line, an "about me" paragraph) before it feeds a site template.
//! Generation itself is pluggable through [`DescriptionGenerator`]; this
//! module only fixes the failure policy: one retry, then an empty string,
//! so a flaky generator never blocks record output.

use serde::Serialize;

use crate::error::Result;
use crate::resume::ResumeRecord;

/// Which narrative slot is being filled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DescriptionKind {
    /// One-sentence headline for the top of a page
    Hero,
    /// Short first-person paragraph
    AboutMe,
}

/// Inputs available to a generator.
#[derive(Debug, Clone)]
pub struct DescriptionContext<'a> {
    pub kind: DescriptionKind,
    pub record: &'a ResumeRecord,
}

/// Produces narrative text from a structured record.
pub trait DescriptionGenerator {
    fn generate(&self, ctx: &DescriptionContext<'_>) -> Result<String>;
}

/// Run a generator with the standard failure policy.
///
/// A failed call is retried once; a second failure yields an empty string
/// and a warning, never an error. Missing narrative text degrades the
/// output, it must not abort it.
pub fn generate_or_empty<G: DescriptionGenerator>(
    generator: &G,
    ctx: &DescriptionContext<'_>,
) -> String {
    match generator.generate(ctx) {
        Ok(text) => text,
        Err(first) => {
            log::debug!("Description generation failed, retrying: {}", first);
            match generator.generate(ctx) {
                Ok(text) => text,
                Err(second) => {
                    log::warn!(
                        "Description generation failed twice ({:?}), emitting empty text: {}",
                        ctx.kind,
                        second
                    );
                    String::new()
                }
            }
        }
    }
}

/// A résumé record plus its narrative slots, shaped for a site template.
#[derive(Debug, Clone, Serialize)]
pub struct SiteRecord {
    #[serde(flatten)]
    pub resume: ResumeRecord,
    pub hero_description: String,
    pub about_me: String,
}

impl SiteRecord {
    /// Enrich a record with both narrative slots.
    pub fn build<G: DescriptionGenerator>(resume: ResumeRecord, generator: &G) -> Self {
        let hero_description = generate_or_empty(
            generator,
            &DescriptionContext {
                kind: DescriptionKind::Hero,
                record: &resume,
            },
        );
        let about_me = generate_or_empty(
            generator,
            &DescriptionContext {
                kind: DescriptionKind::AboutMe,
                record: &resume,
            },
        );

        Self {
            resume,
            hero_description,
            about_me,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use std::cell::Cell;

    struct ScriptedGenerator {
        failures_before_success: Cell<u32>,
        text: &'static str,
    }

    impl DescriptionGenerator for ScriptedGenerator {
        fn generate(&self, _ctx: &DescriptionContext<'_>) -> Result<String> {
            let remaining = self.failures_before_success.get();
            if remaining > 0 {
                self.failures_before_success.set(remaining - 1);
                Err(Error::Describe("unavailable".to_string()))
            } else {
                Ok(self.text.to_string())
            }
        }
    }

    fn ctx(record: &ResumeRecord) -> DescriptionContext<'_> {
        DescriptionContext {
            kind: DescriptionKind::Hero,
            record,
        }
    }

    #[test]
    fn test_success_first_try() {
        let record = ResumeRecord::default();
        let gen = ScriptedGenerator {
            failures_before_success: Cell::new(0),
            text: "Engineer who ships.",
        };
        assert_eq!(generate_or_empty(&gen, &ctx(&record)), "Engineer who ships.");
    }

    #[test]
    fn test_retry_recovers_single_failure() {
        let record = ResumeRecord::default();
        let gen = ScriptedGenerator {
            failures_before_success: Cell::new(1),
            text: "Engineer who ships.",
        };
        assert_eq!(generate_or_empty(&gen, &ctx(&record)), "Engineer who ships.");
    }

    #[test]
    fn test_two_failures_yield_empty() {
        let record = ResumeRecord::default();
        let gen = ScriptedGenerator {
            failures_before_success: Cell::new(2),
            text: "never reached",
        };
        assert_eq!(generate_or_empty(&gen, &ctx(&record)), "");
    }

    #[test]
    fn test_site_record_flattens_resume_keys() {
        let mut record = ResumeRecord::default();
        record.contact_info.name = "Jane Doe".to_string();
        let gen = ScriptedGenerator {
            failures_before_success: Cell::new(0),
            text: "Hello.",
        };

        let site = SiteRecord::build(record, &gen);
        let json = serde_json::to_value(&site).unwrap();
        let obj = json.as_object().unwrap();

        assert!(obj.contains_key("contact_info"));
        assert!(obj.contains_key("hero_description"));
        assert!(obj.contains_key("about_me"));
        assert_eq!(obj["hero_description"], "Hello.");
    }
}
