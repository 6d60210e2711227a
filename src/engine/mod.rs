//! The heuristic analytics core.
//!
//! Three stateless components over a shared [`lexicon::Lexicon`]:
//! [`analyzer::FragmentAnalyzer`] scores one fragment,
//! [`insights::InsightAggregator`] derives collective patterns from a batch,
//! and [`query::QueryResponder`] answers free-text questions against a
//! fragment set. Every operation is a pure function of its inputs apart from
//! timestamp and id fields.

pub mod analyzer;
pub mod insights;
pub mod lexicon;
pub mod query;
pub mod types;

use thiserror::Error;

/// Errors the core can produce. Required input missing or empty is the only
/// failure mode — the engine performs no I/O and holds no resources.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("{0}")]
    Validation(String),
}

pub type EngineResult<T> = Result<T, EngineError>;

/// Lower-case whitespace tokenization shared by the analyzer and responder.
/// Punctuation is deliberately left attached to tokens — the scoring rules
/// were calibrated against this baseline.
pub(crate) fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split_whitespace()
        .map(str::to_owned)
        .collect()
}
