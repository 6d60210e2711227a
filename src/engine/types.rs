//! Core value types.
//!
//! Defines [`Category`] and [`Sentiment`] (the two closed vocabularies),
//! [`Fragment`] (a submitted experience), [`Analysis`] (per-fragment scores),
//! [`AnalyzedFragment`] (the two combined), plus the derived [`Insight`] and
//! [`QueryAnswer`] shapes. Field names here are the wire contract for any
//! HTTP layer placed on top.

use serde::{Deserialize, Serialize};

/// Use-case category of a memory fragment.
///
/// Unknown or missing categories collapse to [`Category::General`] rather
/// than failing — fragments come from end users, not trusted callers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Payment,
    Adoption,
    Defi,
    Experience,
    Insight,
    #[default]
    General,
}

impl<'de> Deserialize<'de> for Category {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(Category::parse_lossy(&s))
    }
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Payment => "payment",
            Self::Adoption => "adoption",
            Self::Defi => "defi",
            Self::Experience => "experience",
            Self::Insight => "insight",
            Self::General => "general",
        }
    }

    /// Parse a category name, falling back to `General` for anything unknown.
    pub fn parse_lossy(s: &str) -> Self {
        match s {
            "payment" => Self::Payment,
            "adoption" => Self::Adoption,
            "defi" => Self::Defi,
            "experience" => Self::Experience,
            "insight" => Self::Insight,
            _ => Self::General,
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Heuristic sentiment classification. Ties (including zero matches either
/// way) are `Neutral`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sentiment {
    Positive,
    Negative,
    #[default]
    Neutral,
}

impl Sentiment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Positive => "positive",
            Self::Negative => "negative",
            Self::Neutral => "neutral",
        }
    }
}

impl std::fmt::Display for Sentiment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single user-submitted experience. Immutable once created; the engine
/// receives and returns fragments by value and never stores them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Fragment {
    /// UUID v7 (time-sortable) identifier.
    pub id: String,
    /// The raw experience text.
    pub content: String,
    /// Use-case category, defaulting to `general`.
    #[serde(default)]
    pub category: Category,
    /// Where the experience happened, if the submitter said.
    #[serde(default)]
    pub location: Option<String>,
    /// ISO 8601 submission timestamp.
    pub submitted_at: String,
}

impl Fragment {
    /// Create a fragment with a fresh id and submission timestamp.
    pub fn new(content: String, category: Category, location: Option<String>) -> Self {
        Self {
            id: uuid::Uuid::now_v7().to_string(),
            content,
            category,
            location,
            submitted_at: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Heuristic scores for one fragment, produced once by the analyzer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Analysis {
    pub sentiment: Sentiment,
    /// Up to 3 salient tokens, in first-occurrence order.
    pub topics: Vec<String>,
    /// Integer confidence in `[0, 100]`.
    pub confidence: u8,
    /// `true` iff at least one token matched the domain-term lexicon.
    pub domain_relevant: bool,
    pub word_count: usize,
    /// ISO 8601 analysis timestamp.
    pub analyzed_at: String,
}

impl Analysis {
    /// Placeholder analysis for a fragment that arrived without one and
    /// could not be scored (empty content). Neutral sentiment, zero
    /// confidence — counted in batches the same way the source treated
    /// unanalyzed fragments.
    pub fn unscored() -> Self {
        Self {
            sentiment: Sentiment::Neutral,
            topics: Vec::new(),
            confidence: 0,
            domain_relevant: false,
            word_count: 0,
            analyzed_at: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// A fragment together with its analysis — the unit the aggregator and
/// responder consume. Fragment fields serialize flat; the analysis nests.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzedFragment {
    #[serde(flatten)]
    pub fragment: Fragment,
    pub analysis: Analysis,
}

/// A fragment as submitted by callers, before ids, timestamps, or analysis
/// are attached. Accepts its own previous serialized form so analyzed
/// fragments can round-trip back in for aggregation.
#[derive(Debug, Clone, Deserialize)]
pub struct FragmentSubmission {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub category: Category,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub submitted_at: Option<String>,
    /// Pre-computed analysis, kept as-is when present.
    #[serde(default)]
    pub analysis: Option<Analysis>,
}

/// Category of a derived insight — which aggregation rule produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InsightCategory {
    Adoption,
    Sentiment,
    Geographic,
    Payment,
}

/// A derived statement about patterns across a fragment batch. Recomputed
/// from scratch on every aggregation — never persisted, never incremental.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Insight {
    /// UUID v7 identifier, fresh per derivation.
    pub id: String,
    /// One-line pattern statement.
    pub pattern: String,
    /// Which observations support the pattern.
    pub evidence: String,
    /// Integer confidence in `[0, 100]`.
    pub confidence: u8,
    /// What the pattern suggests.
    pub implications: String,
    pub category: InsightCategory,
    /// Raw counts and lists the derivation used, for verification.
    pub supporting_data: serde_json::Value,
}

/// Composed answer to a free-text question over a fragment set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryAnswer {
    pub response: String,
    /// Integer confidence in `[0, 100]`. Fixed at 30 when nothing matched.
    pub confidence: u8,
    pub sources: Vec<String>,
    /// Up to 3 canned follow-up questions, never echoing the question asked.
    pub suggestions: Vec<String>,
}
