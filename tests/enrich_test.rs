mod helpers;

use async_trait::async_trait;
use helpers::{batch, fragment};
use palace::config::EnrichmentConfig;
use palace::engine::insights::InsightAggregator;
use palace::engine::types::{Category, InsightCategory, Sentiment};
use palace::enrich::{
    create_enricher, insight_prompt, parse_answer, parse_insights, query_prompt, Enricher,
    EnrichmentUnavailable,
};
use serde_json::json;

/// An enricher that always fails, standing in for an unreachable or
/// misbehaving LLM provider.
struct DeadEnricher;

#[async_trait]
impl Enricher for DeadEnricher {
    async fn enrich(&self, _prompt: &str) -> Result<serde_json::Value, EnrichmentUnavailable> {
        Err(EnrichmentUnavailable::Malformed("provider returned garbage".into()))
    }
}

#[test]
fn enricher_is_absent_without_an_api_key() {
    let config = EnrichmentConfig::default();
    assert!(config.api_key.is_none());
    assert!(create_enricher(&config).is_none());
}

#[tokio::test]
async fn failed_enrichment_still_leaves_a_complete_result() {
    let fragments = batch(&[Sentiment::Positive, Sentiment::Positive]);

    // The collaborator fails...
    let enricher = DeadEnricher;
    let enriched = enricher
        .enrich(&insight_prompt(&fragments))
        .await
        .and_then(parse_insights);
    assert!(enriched.is_err());

    // ...and the heuristic path still produces a full insight set.
    let insights = InsightAggregator::new().aggregate(&fragments).unwrap();
    assert!(insights.iter().any(|i| i.category == InsightCategory::Adoption));
}

#[test]
fn parse_insights_assigns_ids_and_clamps_confidence() {
    let value = json!({
        "insights": [
            {
                "pattern": "Coffee shops increasingly accepting Bitcoin",
                "evidence": "3 fragments mention coffee purchases",
                "confidence": 120,
                "implications": "Food service Bitcoin adoption growing",
                "category": "adoption"
            }
        ]
    });
    let insights = parse_insights(value).unwrap();
    assert_eq!(insights.len(), 1);
    assert!(!insights[0].id.is_empty());
    assert_eq!(insights[0].confidence, 100);
    assert_eq!(insights[0].category, InsightCategory::Adoption);
}

#[test]
fn parse_insights_rejects_malformed_payloads() {
    let err = parse_insights(json!({"not": "insights"})).unwrap_err();
    assert!(matches!(err, EnrichmentUnavailable::Malformed(_)));

    let err = parse_insights(json!("just a string")).unwrap_err();
    assert!(matches!(err, EnrichmentUnavailable::Malformed(_)));
}

#[test]
fn parse_answer_enforces_the_suggestion_contract() {
    let question = "Where can I spend Bitcoin?";
    let value = json!({
        "answer": "Mostly coffee shops so far.",
        "confidence": 85,
        "sources": ["fragment 1"],
        "suggestions": [
            "Where can I spend Bitcoin?",
            "How fast are Bitcoin payments?",
            "What about fees?",
            "Is Lightning widely supported?",
            "Do merchants like it?"
        ]
    });
    let answer = parse_answer(value, question).unwrap();
    assert_eq!(answer.response, "Mostly coffee shops so far.");
    assert!(answer.suggestions.iter().all(|s| s != question));
    assert_eq!(answer.suggestions.len(), 3);
}

#[test]
fn parse_answer_rejects_malformed_payloads() {
    let err = parse_answer(json!({"confidence": 10}), "q").unwrap_err();
    assert!(matches!(err, EnrichmentUnavailable::Malformed(_)));
}

#[test]
fn insight_prompt_includes_every_fragment() {
    let fragments = vec![
        fragment("coffee with btc", Category::Payment, None, Sentiment::Neutral),
        fragment("set up my first wallet", Category::Experience, None, Sentiment::Neutral),
    ];
    let prompt = insight_prompt(&fragments);
    assert!(prompt.contains("coffee with btc"));
    assert!(prompt.contains("set up my first wallet"));
    assert!(prompt.contains("(payment)"));
}

#[test]
fn query_prompt_caps_context_at_ten_fragments() {
    let fragments: Vec<_> = (0..15)
        .map(|i| {
            fragment(
                &format!("experience number {i}"),
                Category::General,
                None,
                Sentiment::Neutral,
            )
        })
        .collect();
    let prompt = query_prompt("how is it going?", &fragments);
    assert!(prompt.contains("experience number 9"));
    assert!(!prompt.contains("experience number 10"));
    assert!(prompt.contains("how is it going?"));
}

#[test]
fn create_enricher_builds_a_client_when_a_key_is_present() {
    let config = EnrichmentConfig {
        api_key: Some("sk-test".into()),
        ..EnrichmentConfig::default()
    };
    assert!(create_enricher(&config).is_some());
}
