//! Emphasis classification for text runs.
//!
//! PDFs encode boldness inconsistently across producers: some only set the
//! descriptor flag, some only change the font name, some embed a numeric
//! weight. The classifier is a priority chain over these independent signals
//! rather than a single check, so that any one of them is enough.

use serde::{Deserialize, Serialize};

use crate::extract::options::ExtractOptions;
use crate::extract::runs::TextRun;

/// Which signal decided that a run is emphasized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EmphasisSignal {
    /// The font descriptor carries the ForceBold flag.
    Flag,
    /// The font family name contains a boldness substring.
    Name,
    /// The numeric font weight meets the threshold.
    WeightThreshold,
}

/// A text run with its emphasis decision attached.
#[derive(Debug, Clone)]
pub struct ClassifiedRun {
    /// The underlying run
    pub run: TextRun,
    /// Whether the run is visually emphasized (bold/heading treatment)
    pub emphasized: bool,
    /// The winning signal, when emphasized
    pub signal: Option<EmphasisSignal>,
}

impl ClassifiedRun {
    /// Trimmed text content of the underlying run.
    pub fn trimmed(&self) -> &str {
        self.run.trimmed()
    }
}

/// Substrings of font family names that indicate boldness.
const BOLD_NAME_MARKERS: &[&str] = &["bold", "black", "heavy"];

/// Classify one run. First applicable signal wins; none means plain text.
pub fn classify_run(run: TextRun, options: &ExtractOptions) -> ClassifiedRun {
    let signal = if run.bold_flag {
        Some(EmphasisSignal::Flag)
    } else if has_bold_name(&run.font_name) {
        Some(EmphasisSignal::Name)
    } else if run
        .font_weight
        .is_some_and(|w| w >= options.bold_weight_threshold)
    {
        Some(EmphasisSignal::WeightThreshold)
    } else {
        None
    };

    ClassifiedRun {
        emphasized: signal.is_some(),
        signal,
        run,
    }
}

/// Classify a whole run sequence, preserving order.
pub fn classify_runs(runs: Vec<TextRun>, options: &ExtractOptions) -> Vec<ClassifiedRun> {
    runs.into_iter()
        .map(|run| classify_run(run, options))
        .collect()
}

fn has_bold_name(font_name: &str) -> bool {
    let lower = font_name.to_lowercase();
    BOLD_NAME_MARKERS.iter().any(|m| lower.contains(m))
}
