//! Optional LLM-backed enrichment collaborator.
//!
//! Provides the [`Enricher`] trait and an OpenRouter-backed implementation.
//! Enrichment may replace the heuristic insight/query results with richer
//! model-generated ones, but it is strictly optional: absence, timeout, or
//! malformed output is the *normal* path, answered by falling back to the
//! deterministic engine — [`EnrichmentUnavailable`] never reaches a caller.

pub mod openrouter;

use async_trait::async_trait;
use serde::Deserialize;
use thiserror::Error;

use crate::config::EnrichmentConfig;
use crate::engine::query::MAX_SUGGESTIONS;
use crate::engine::types::{AnalyzedFragment, Insight, InsightCategory, QueryAnswer};

/// The enrichment collaborator could not produce a usable result.
///
/// Always recovered locally by substituting the heuristic computation;
/// surfaced only to fallback logic, never to API callers.
#[derive(Debug, Error)]
pub enum EnrichmentUnavailable {
    #[error("enrichment request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("enrichment returned malformed content: {0}")]
    Malformed(String),
}

/// Capability seam for the external enrichment step.
///
/// One method: build a prompt, get back a single JSON object matching one of
/// the engine's result shapes. Implementations own their transport and
/// timeout; callers own the fallback.
#[async_trait]
pub trait Enricher: Send + Sync {
    async fn enrich(&self, prompt: &str) -> Result<serde_json::Value, EnrichmentUnavailable>;
}

/// Create an enricher from config, or `None` when no API key is configured.
/// `None` is not an error — the heuristics are the default path.
pub fn create_enricher(config: &EnrichmentConfig) -> Option<Box<dyn Enricher>> {
    let api_key = config.api_key.clone()?;
    match openrouter::OpenRouterEnricher::new(api_key, config) {
        Ok(enricher) => Some(Box::new(enricher)),
        Err(err) => {
            tracing::warn!(%err, "failed to build enrichment client, continuing without");
            None
        }
    }
}

/// Build the collective-insight prompt from a fragment batch.
pub fn insight_prompt(fragments: &[AnalyzedFragment]) -> String {
    let summary: Vec<String> = fragments
        .iter()
        .enumerate()
        .map(|(i, f)| {
            format!(
                "Fragment {}: \"{}\" ({})",
                i + 1,
                f.fragment.content,
                f.fragment.category
            )
        })
        .collect();
    format!(
        "Analyze these Bitcoin memory fragments and generate collective insights:\n\n\
         {}\n\n\
         Generate 3-5 key insights about Bitcoin adoption patterns. Return ONLY valid JSON:\n\n\
         {{\"insights\": [{{\"pattern\": \"...\", \"evidence\": \"...\", \"confidence\": 85, \
         \"implications\": \"...\", \"category\": \"adoption\"}}]}}",
        summary.join("\n")
    )
}

/// Build the question-answering prompt. Context is capped at the first 10
/// fragments, as the source did.
pub fn query_prompt(question: &str, fragments: &[AnalyzedFragment]) -> String {
    let context: Vec<String> = fragments
        .iter()
        .take(10)
        .enumerate()
        .map(|(i, f)| {
            let location = f
                .fragment
                .location
                .as_deref()
                .map(|l| format!(", {l}"))
                .unwrap_or_default();
            format!(
                "{}. \"{}\" ({}{location})",
                i + 1,
                f.fragment.content,
                f.fragment.category
            )
        })
        .collect();
    format!(
        "You are the collective Bitcoin intelligence. Answer this question using memory \
         fragments from actual Bitcoin users:\n\n\
         Question: \"{question}\"\n\n\
         Memory Fragments:\n{}\n\n\
         Return ONLY valid JSON:\n\
         {{\"answer\": \"...\", \"confidence\": 85, \"sources\": [\"...\"], \
         \"suggestions\": [\"...\"]}}",
        context.join("\n")
    )
}

#[derive(Deserialize)]
struct EnrichedInsight {
    pattern: String,
    evidence: String,
    confidence: u8,
    implications: String,
    category: InsightCategory,
}

#[derive(Deserialize)]
struct EnrichedInsightSet {
    insights: Vec<EnrichedInsight>,
}

/// Parse a model response into insights, assigning fresh ids and clamping
/// confidence. Malformed payloads trigger the heuristic fallback upstream.
pub fn parse_insights(value: serde_json::Value) -> Result<Vec<Insight>, EnrichmentUnavailable> {
    let set: EnrichedInsightSet = serde_json::from_value(value)
        .map_err(|e| EnrichmentUnavailable::Malformed(e.to_string()))?;
    Ok(set
        .insights
        .into_iter()
        .map(|i| Insight {
            id: uuid::Uuid::now_v7().to_string(),
            pattern: i.pattern,
            evidence: i.evidence,
            confidence: i.confidence.min(100),
            implications: i.implications,
            category: i.category,
            supporting_data: serde_json::json!({ "enriched": true }),
        })
        .collect())
}

#[derive(Deserialize)]
struct EnrichedAnswer {
    answer: String,
    confidence: u8,
    #[serde(default)]
    sources: Vec<String>,
    #[serde(default)]
    suggestions: Vec<String>,
}

/// Parse a model response into a [`QueryAnswer`], enforcing the suggestion
/// cap and the question-echo exclusion the heuristic path guarantees.
pub fn parse_answer(
    value: serde_json::Value,
    question: &str,
) -> Result<QueryAnswer, EnrichmentUnavailable> {
    let enriched: EnrichedAnswer = serde_json::from_value(value)
        .map_err(|e| EnrichmentUnavailable::Malformed(e.to_string()))?;
    Ok(QueryAnswer {
        response: enriched.answer,
        confidence: enriched.confidence.min(100),
        sources: enriched.sources,
        suggestions: enriched
            .suggestions
            .into_iter()
            .filter(|s| s != question)
            .take(MAX_SUGGESTIONS)
            .collect(),
    })
}
