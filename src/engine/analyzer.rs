//! Per-fragment scoring.
//!
//! [`FragmentAnalyzer::analyze`] is the single entry point: tokenize, count
//! sentiment terms, pick topics, check domain relevance, and derive a
//! confidence score from content richness. Pure apart from the
//! `analyzed_at` clock read.

use std::cmp::Ordering;
use std::sync::Arc;

use crate::engine::lexicon::Lexicon;
use crate::engine::types::{
    Analysis, AnalyzedFragment, Fragment, FragmentSubmission, Sentiment,
};
use crate::engine::{tokenize, EngineError, EngineResult};

/// Maximum number of topics extracted per fragment.
pub const MAX_TOPICS: usize = 3;

/// Confidence never exceeds this for a single-fragment analysis.
pub const MAX_CONFIDENCE: usize = 95;

/// Tokens longer than this count as topics even outside the domain lexicon.
const TOPIC_MIN_CHARS: usize = 4;

/// Scores a single text fragment against an injected [`Lexicon`].
///
/// Holds no state across calls — identical inputs produce identical scores
/// (timestamps aside), and concurrent callers need no coordination.
#[derive(Debug, Clone)]
pub struct FragmentAnalyzer {
    lexicon: Arc<Lexicon>,
}

impl FragmentAnalyzer {
    pub fn new(lexicon: Arc<Lexicon>) -> Self {
        Self { lexicon }
    }

    /// Score one piece of fragment text.
    ///
    /// Sentiment is a straight count comparison of positive vs negative
    /// lexicon tokens, with ties (including 0/0) neutral. Topics are the
    /// first [`MAX_TOPICS`] tokens that are domain terms or longer than 4
    /// characters, in occurrence order and not deduplicated. Confidence is
    /// `min(95, 50 + len/10 + 10 * topics)`.
    ///
    /// Fails with [`EngineError::Validation`] when `content` is empty or
    /// whitespace-only.
    pub fn analyze(&self, content: &str) -> EngineResult<Analysis> {
        if content.trim().is_empty() {
            return Err(EngineError::Validation(
                "content is required for fragment analysis".into(),
            ));
        }

        let tokens = tokenize(content);

        let positive = tokens.iter().filter(|t| self.lexicon.is_positive(t)).count();
        let negative = tokens.iter().filter(|t| self.lexicon.is_negative(t)).count();
        let sentiment = match positive.cmp(&negative) {
            Ordering::Greater => Sentiment::Positive,
            Ordering::Less => Sentiment::Negative,
            Ordering::Equal => Sentiment::Neutral,
        };

        let topics: Vec<String> = tokens
            .iter()
            .filter(|t| self.lexicon.is_domain_term(t) || t.chars().count() > TOPIC_MIN_CHARS)
            .take(MAX_TOPICS)
            .cloned()
            .collect();

        let domain_relevant = tokens.iter().any(|t| self.lexicon.is_domain_term(t));

        let confidence = (50 + content.len() / 10 + topics.len() * 10).min(MAX_CONFIDENCE) as u8;

        Ok(Analysis {
            sentiment,
            topics,
            confidence,
            domain_relevant,
            word_count: tokens.len(),
            analyzed_at: chrono::Utc::now().to_rfc3339(),
        })
    }

    /// Analyze a whole fragment, attaching the scores to it.
    pub fn analyze_fragment(&self, fragment: Fragment) -> EngineResult<AnalyzedFragment> {
        let analysis = self.analyze(&fragment.content)?;
        Ok(AnalyzedFragment { fragment, analysis })
    }

    /// Admit a caller-supplied submission into the analyzed set.
    ///
    /// Pre-attached analyses are trusted as-is; missing ones are computed
    /// here. Submissions whose content cannot be scored still enter the set
    /// with an [`Analysis::unscored`] placeholder — batch operations treat
    /// unanalyzable fragments as neutral rather than rejecting the batch.
    pub fn admit(&self, submission: FragmentSubmission) -> AnalyzedFragment {
        let analysis = match submission.analysis {
            Some(analysis) => analysis,
            None => self
                .analyze(&submission.content)
                .unwrap_or_else(|_| Analysis::unscored()),
        };

        let fragment = Fragment {
            id: submission
                .id
                .unwrap_or_else(|| uuid::Uuid::now_v7().to_string()),
            content: submission.content,
            category: submission.category,
            location: submission.location,
            submitted_at: submission
                .submitted_at
                .unwrap_or_else(|| chrono::Utc::now().to_rfc3339()),
        };

        AnalyzedFragment { fragment, analysis }
    }
}
