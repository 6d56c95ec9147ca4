//! PDF text run extraction and emphasis classification.

mod emphasis;
mod options;
mod runs;

pub use emphasis::{classify_run, classify_runs, ClassifiedRun, EmphasisSignal};
pub use options::ExtractOptions;
pub use runs::{RunExtractor, TextRun};
