//! Free-text question answering over a fragment set.
//!
//! [`QueryResponder::answer`] matches question tokens against fragment
//! content (substring) and category names (exact), then composes a templated
//! answer with a confidence score and canned follow-up suggestions. An empty
//! fragment set is the normal "no relevant experiences" branch, not an error.

use std::sync::Arc;

use crate::engine::lexicon::Lexicon;
use crate::engine::types::{AnalyzedFragment, QueryAnswer, Sentiment};
use crate::engine::{tokenize, EngineError, EngineResult};

/// Maximum number of follow-up suggestions returned with an answer.
pub const MAX_SUGGESTIONS: usize = 3;

/// Confidence of the fixed "no relevant experiences" answer.
const NO_MATCH_CONFIDENCE: u8 = 30;

/// Indices of fragments relevant to a question.
///
/// A fragment is relevant iff any question token occurs as a substring of
/// its lower-cased content, or equals its category name exactly.
pub fn relevant_indices(question: &str, fragments: &[AnalyzedFragment]) -> Vec<usize> {
    let tokens = tokenize(question);
    fragments
        .iter()
        .enumerate()
        .filter(|(_, f)| {
            let content = f.fragment.content.to_lowercase();
            tokens.iter().any(|w| content.contains(w.as_str()))
                || tokens.iter().any(|w| w == f.fragment.category.as_str())
        })
        .map(|(i, _)| i)
        .collect()
}

/// Answers free-text questions by keyword overlap against a fragment set.
#[derive(Debug, Clone)]
pub struct QueryResponder {
    lexicon: Arc<Lexicon>,
}

impl QueryResponder {
    pub fn new(lexicon: Arc<Lexicon>) -> Self {
        Self { lexicon }
    }

    /// Compose an answer to `question` from the given fragment set.
    ///
    /// With at least one relevant fragment the answer reports the match
    /// count, the categories involved, and whether positive experiences are
    /// a strict majority; confidence is
    /// `min(90, 40 + 10 * relevant + 5 * positive)`. With none it is a fixed
    /// "no specific experience yet" response at confidence 30.
    ///
    /// Fails with [`EngineError::Validation`] only when `question` is empty.
    pub fn answer(
        &self,
        question: &str,
        fragments: &[AnalyzedFragment],
    ) -> EngineResult<QueryAnswer> {
        if question.trim().is_empty() {
            return Err(EngineError::Validation("question is required for query".into()));
        }

        let relevant: Vec<&AnalyzedFragment> = relevant_indices(question, fragments)
            .into_iter()
            .map(|i| &fragments[i])
            .collect();

        let (response, confidence, sources) = if relevant.is_empty() {
            (
                format!(
                    "I don't have specific community experiences directly related to \
                     \"{question}\" yet. As more Bitcoin users share their experiences, \
                     I'll be able to provide more targeted insights."
                ),
                NO_MATCH_CONFIDENCE,
                vec![format!(
                    "{} total community experiences (none directly relevant)",
                    fragments.len()
                )],
            )
        } else {
            let mut categories: Vec<&str> = Vec::new();
            for f in &relevant {
                let name = f.fragment.category.as_str();
                if !categories.contains(&name) {
                    categories.push(name);
                }
            }
            let positive = relevant
                .iter()
                .filter(|f| f.analysis.sentiment == Sentiment::Positive)
                .count();

            let mut response = format!(
                "Based on {} relevant Bitcoin experiences from the community: ",
                relevant.len()
            );
            if !categories.is_empty() {
                response.push_str(&format!(
                    "Most experiences relate to {}. ",
                    categories.join(" and ")
                ));
            }
            if positive * 2 > relevant.len() {
                response.push_str(
                    "The community generally reports positive experiences with this aspect of Bitcoin. ",
                );
            } else {
                response.push_str(
                    "The community has mixed experiences with this aspect of Bitcoin. ",
                );
            }
            response.push_str(&format!(
                "Regarding \"{question}\", the collective intelligence suggests continued \
                 Bitcoin adoption and learning."
            ));

            let confidence = (40 + relevant.len() * 10 + positive * 5).min(90) as u8;
            let sources = vec![format!("{} relevant community experiences", relevant.len())];
            (response, confidence, sources)
        };

        let suggestions = self
            .lexicon
            .suggested_questions
            .iter()
            .filter(|s| s.as_str() != question)
            .take(MAX_SUGGESTIONS)
            .cloned()
            .collect();

        Ok(QueryAnswer { response, confidence, sources, suggestions })
    }
}
