mod helpers;

use helpers::analyzer;
use palace::engine::types::{Category, Fragment, Sentiment};
use palace::engine::EngineError;

#[test]
fn empty_content_is_rejected() {
    let err = analyzer().analyze("").unwrap_err();
    assert!(matches!(err, EngineError::Validation(_)));

    let err = analyzer().analyze("   \t  ").unwrap_err();
    assert!(matches!(err, EngineError::Validation(_)));
}

#[test]
fn confidence_and_topics_stay_within_bounds() {
    let long = "bitcoin lightning wallet payment experience ".repeat(20);
    let contents = [
        "ok",
        "bought coffee with bitcoin today, super fast checkout",
        long.as_str(),
    ];
    for content in contents {
        let analysis = analyzer().analyze(content).unwrap();
        assert!(analysis.confidence <= 95, "confidence {} out of range", analysis.confidence);
        assert!(analysis.topics.len() <= 3);
    }
}

#[test]
fn confidence_follows_content_richness() {
    // "great bitcoin" — 13 bytes, two topics ("great" > 4 chars, "bitcoin"
    // is a domain term): 50 + 13/10 + 2*10 = 71.
    let analysis = analyzer().analyze("great bitcoin").unwrap();
    assert_eq!(analysis.confidence, 71);
    assert_eq!(analysis.topics, vec!["great", "bitcoin"]);
    assert_eq!(analysis.word_count, 2);
}

#[test]
fn confidence_caps_at_95() {
    let long = "amazing bitcoin lightning payment experience ".repeat(10);
    let analysis = analyzer().analyze(&long).unwrap();
    assert_eq!(analysis.confidence, 95);
}

#[test]
fn all_negative_words_classify_negative() {
    let analysis = analyzer().analyze("slow expensive terrible").unwrap();
    assert_eq!(analysis.sentiment, Sentiment::Negative);
}

#[test]
fn positive_majority_classifies_positive() {
    let analysis = analyzer().analyze("fast easy checkout one problem").unwrap();
    assert_eq!(analysis.sentiment, Sentiment::Positive);
}

#[test]
fn ties_classify_neutral() {
    // one positive, one negative
    let analysis = analyzer().analyze("fast but expensive").unwrap();
    assert_eq!(analysis.sentiment, Sentiment::Neutral);

    // zero of each
    let analysis = analyzer().analyze("the cat sat").unwrap();
    assert_eq!(analysis.sentiment, Sentiment::Neutral);
}

#[test]
fn topics_prefer_occurrence_order_without_dedup() {
    // Repeated domain terms are kept — the baseline does not deduplicate.
    let analysis = analyzer().analyze("bitcoin bitcoin bitcoin now").unwrap();
    assert_eq!(analysis.topics, vec!["bitcoin", "bitcoin", "bitcoin"]);
}

#[test]
fn short_non_domain_tokens_are_not_topics() {
    let analysis = analyzer().analyze("btc is ok now").unwrap();
    // "btc" is a domain term; "is", "ok", "now" are all too short
    assert_eq!(analysis.topics, vec!["btc"]);
    assert!(analysis.domain_relevant);
}

#[test]
fn domain_relevance_requires_a_lexicon_hit() {
    let analysis = analyzer().analyze("bought groceries with cash").unwrap();
    assert!(!analysis.domain_relevant);

    let analysis = analyzer().analyze("bought groceries with bitcoin").unwrap();
    assert!(analysis.domain_relevant);
}

#[test]
fn analysis_is_idempotent_modulo_timestamp() {
    let a = analyzer().analyze("smooth lightning payment at the market").unwrap();
    let b = analyzer().analyze("smooth lightning payment at the market").unwrap();
    assert_eq!(a.sentiment, b.sentiment);
    assert_eq!(a.topics, b.topics);
    assert_eq!(a.confidence, b.confidence);
    assert_eq!(a.domain_relevant, b.domain_relevant);
    assert_eq!(a.word_count, b.word_count);
}

#[test]
fn analyze_fragment_attaches_scores() {
    let fragment = Fragment::new(
        "easy bitcoin payment".into(),
        Category::Payment,
        Some("Seattle".into()),
    );
    let id = fragment.id.clone();
    let analyzed = analyzer().analyze_fragment(fragment).unwrap();
    assert_eq!(analyzed.fragment.id, id);
    assert_eq!(analyzed.fragment.category, Category::Payment);
    assert_eq!(analyzed.analysis.sentiment, Sentiment::Positive);
}
