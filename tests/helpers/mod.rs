#![allow(dead_code)]

use std::sync::Arc;

use palace::engine::analyzer::FragmentAnalyzer;
use palace::engine::lexicon::Lexicon;
use palace::engine::query::QueryResponder;
use palace::engine::types::{Analysis, AnalyzedFragment, Category, Fragment, Sentiment};

pub fn lexicon() -> Arc<Lexicon> {
    Arc::new(Lexicon::default())
}

pub fn analyzer() -> FragmentAnalyzer {
    FragmentAnalyzer::new(lexicon())
}

pub fn responder() -> QueryResponder {
    QueryResponder::new(lexicon())
}

/// Build an analyzed fragment with a hand-picked sentiment, bypassing the
/// analyzer. Aggregation and query tests control sentiment counts directly.
pub fn fragment(
    content: &str,
    category: Category,
    location: Option<&str>,
    sentiment: Sentiment,
) -> AnalyzedFragment {
    AnalyzedFragment {
        fragment: Fragment::new(content.to_owned(), category, location.map(str::to_owned)),
        analysis: Analysis {
            sentiment,
            topics: Vec::new(),
            confidence: 50,
            domain_relevant: false,
            word_count: content.split_whitespace().count(),
            analyzed_at: chrono::Utc::now().to_rfc3339(),
        },
    }
}

/// `n` payment fragments with the given sentiments, no locations.
pub fn batch(sentiments: &[Sentiment]) -> Vec<AnalyzedFragment> {
    sentiments
        .iter()
        .map(|s| fragment("a bitcoin experience", Category::Payment, None, *s))
        .collect()
}
