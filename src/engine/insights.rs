//! Batch insight derivation.
//!
//! [`InsightAggregator::aggregate`] runs four independent rules over an
//! analyzed fragment set — adoption diversity, sentiment skew, geographic
//! spread, and payment-specific trends — each gated only by its own input
//! condition. Rules never read each other's output, so the result is a pure
//! function of the input set (ids and timestamps aside), emitted in fixed
//! rule order.

use serde::Serialize;
use serde_json::json;

use crate::engine::types::{AnalyzedFragment, Category, Insight, InsightCategory, Sentiment};
use crate::engine::{EngineError, EngineResult};

/// Sentiment tally across a fragment batch.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct SentimentCounts {
    pub positive: usize,
    pub negative: usize,
    pub neutral: usize,
}

/// Count sentiments across a batch. Shared by the sentiment rule and by
/// callers that report batch metadata.
pub fn sentiment_counts(fragments: &[AnalyzedFragment]) -> SentimentCounts {
    let mut counts = SentimentCounts { positive: 0, negative: 0, neutral: 0 };
    for f in fragments {
        match f.analysis.sentiment {
            Sentiment::Positive => counts.positive += 1,
            Sentiment::Negative => counts.negative += 1,
            Sentiment::Neutral => counts.neutral += 1,
        }
    }
    counts
}

/// Distinct fragment categories in first-occurrence order.
pub fn distinct_categories(fragments: &[AnalyzedFragment]) -> Vec<Category> {
    let mut categories = Vec::new();
    for f in fragments {
        if !categories.contains(&f.fragment.category) {
            categories.push(f.fragment.category);
        }
    }
    categories
}

/// Distinct non-empty locations in first-occurrence order.
pub fn distinct_locations(fragments: &[AnalyzedFragment]) -> Vec<String> {
    let mut locations: Vec<String> = Vec::new();
    for f in fragments {
        if let Some(loc) = f.fragment.location.as_deref() {
            if !loc.is_empty() && !locations.iter().any(|l| l == loc) {
                locations.push(loc.to_owned());
            }
        }
    }
    locations
}

/// Derives collective insights from analyzed fragment batches.
#[derive(Debug, Clone, Copy, Default)]
pub struct InsightAggregator;

impl InsightAggregator {
    pub fn new() -> Self {
        Self
    }

    /// Derive zero or more insights from a non-empty batch.
    ///
    /// Fails with [`EngineError::Validation`] when the batch is empty;
    /// an empty *result* is legitimate only in theory — the adoption rule
    /// fires for any non-empty batch.
    pub fn aggregate(&self, fragments: &[AnalyzedFragment]) -> EngineResult<Vec<Insight>> {
        if fragments.is_empty() {
            return Err(EngineError::Validation(
                "a non-empty fragments array is required".into(),
            ));
        }

        let total = fragments.len();
        let categories = distinct_categories(fragments);
        let locations = distinct_locations(fragments);
        let counts = sentiment_counts(fragments);

        let mut insights = Vec::new();

        // Rule 1: adoption diversity. Fires for any non-empty batch.
        if !categories.is_empty() {
            let names: Vec<&str> = categories.iter().map(Category::as_str).collect();
            let plural = if categories.len() > 1 { "s" } else { "" };
            insights.push(Insight {
                id: new_insight_id(),
                pattern: format!(
                    "Bitcoin adoption across {} use case{plural}",
                    categories.len()
                ),
                evidence: format!("{total} experiences in: {}", names.join(", ")),
                confidence: (60 + total * 5).min(95) as u8,
                implications: "Diversified Bitcoin use cases indicate growing mainstream adoption"
                    .into(),
                category: InsightCategory::Adoption,
                supporting_data: json!({
                    "categories": names,
                    "fragment_count": total,
                }),
            });
        }

        // Rule 2: sentiment skew. The 0.4..=0.6 band emits nothing.
        let positive_ratio = counts.positive as f64 / total as f64;
        if positive_ratio > 0.6 {
            insights.push(Insight {
                id: new_insight_id(),
                pattern: "Predominantly positive Bitcoin experiences".into(),
                evidence: format!(
                    "{}/{total} experiences show positive sentiment",
                    counts.positive
                ),
                confidence: 85,
                implications: "Strong positive sentiment suggests improving user experience".into(),
                category: InsightCategory::Sentiment,
                supporting_data: json!(counts),
            });
        } else if positive_ratio < 0.4 {
            insights.push(Insight {
                id: new_insight_id(),
                pattern: "Mixed or challenging Bitcoin experiences".into(),
                evidence: format!(
                    "{}/{total} experiences show neutral/negative sentiment",
                    counts.negative + counts.neutral
                ),
                confidence: 80,
                implications: "User experience improvements may be needed".into(),
                category: InsightCategory::Sentiment,
                supporting_data: json!(counts),
            });
        }

        // Rule 3: geographic spread. Needs at least two distinct locations.
        if locations.len() > 1 {
            insights.push(Insight {
                id: new_insight_id(),
                pattern: format!(
                    "Bitcoin usage across {} geographic areas",
                    locations.len()
                ),
                evidence: format!("Experiences from: {}", locations.join(", ")),
                confidence: 80,
                implications: "Geographic distribution suggests global Bitcoin adoption".into(),
                category: InsightCategory::Geographic,
                supporting_data: json!({
                    "locations": locations,
                    "count": locations.len(),
                }),
            });
        }

        // Rule 4: payment-specific trend.
        let payments: Vec<&AnalyzedFragment> = fragments
            .iter()
            .filter(|f| f.fragment.category == Category::Payment)
            .collect();
        if !payments.is_empty() {
            let positive_payments = payments
                .iter()
                .filter(|f| f.analysis.sentiment == Sentiment::Positive)
                .count();
            let ratio = positive_payments as f64 / payments.len() as f64;
            let implications = if ratio > 0.5 {
                "Bitcoin payments becoming more user-friendly"
            } else {
                "Payment experience has room for improvement"
            };
            insights.push(Insight {
                id: new_insight_id(),
                pattern: "Bitcoin payment experience trends".into(),
                evidence: format!(
                    "{} payment experiences, {positive_payments} positive",
                    payments.len()
                ),
                confidence: (70 + payments.len() * 5).min(90) as u8,
                implications: implications.into(),
                category: InsightCategory::Payment,
                supporting_data: json!({
                    "total": payments.len(),
                    "positive": positive_payments,
                    "ratio": ratio,
                }),
            });
        }

        Ok(insights)
    }
}

fn new_insight_id() -> String {
    uuid::Uuid::now_v7().to_string()
}
