//! Fixed word lists the scoring heuristics read.
//!
//! The lexicon is plain configuration data injected into the engine
//! components at construction — tests and deployments can swap word lists
//! per locale or domain without touching the scoring rules. Defaults
//! reproduce the Bitcoin lists the heuristics were calibrated against.

use serde::Deserialize;

/// Immutable word lists consumed by the analyzer and responder.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Lexicon {
    /// Tokens considered topically relevant to the domain.
    pub domain_terms: Vec<String>,
    /// Tokens counted toward positive sentiment.
    pub positive_terms: Vec<String>,
    /// Tokens counted toward negative sentiment.
    pub negative_terms: Vec<String>,
    /// Canned follow-up questions offered alongside query answers.
    pub suggested_questions: Vec<String>,
}

impl Default for Lexicon {
    fn default() -> Self {
        Self {
            domain_terms: to_owned(&[
                "bitcoin", "btc", "satoshi", "lightning", "wallet", "hodl", "mining",
            ]),
            positive_terms: to_owned(&[
                "good", "great", "fast", "easy", "love", "amazing", "excellent", "smooth",
            ]),
            negative_terms: to_owned(&[
                "slow", "expensive", "difficult", "problem", "issue", "hate", "terrible",
            ]),
            suggested_questions: to_owned(&[
                "Where can I spend Bitcoin?",
                "How fast are Bitcoin payments?",
                "What's the Bitcoin user experience like?",
                "How do people feel about Bitcoin mining?",
                "What are common Bitcoin wallet experiences?",
            ]),
        }
    }
}

impl Lexicon {
    pub fn is_domain_term(&self, token: &str) -> bool {
        self.domain_terms.iter().any(|t| t == token)
    }

    pub fn is_positive(&self, token: &str) -> bool {
        self.positive_terms.iter().any(|t| t == token)
    }

    pub fn is_negative(&self, token: &str) -> bool {
        self.negative_terms.iter().any(|t| t == token)
    }
}

fn to_owned(words: &[&str]) -> Vec<String> {
    words.iter().map(|w| (*w).to_owned()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_lexicon_has_bitcoin_vocabulary() {
        let lexicon = Lexicon::default();
        assert!(lexicon.is_domain_term("bitcoin"));
        assert!(lexicon.is_domain_term("lightning"));
        assert!(lexicon.is_positive("fast"));
        assert!(lexicon.is_negative("expensive"));
        assert!(!lexicon.is_domain_term("coffee"));
        assert_eq!(lexicon.suggested_questions.len(), 5);
    }

    #[test]
    fn lexicon_sections_deserialize_with_defaults() {
        let lexicon: Lexicon = toml::from_str(
            r#"
domain_terms = ["solar", "panel"]
"#,
        )
        .unwrap();
        assert!(lexicon.is_domain_term("solar"));
        assert!(!lexicon.is_domain_term("bitcoin"));
        // unset lists keep their defaults
        assert!(lexicon.is_positive("great"));
    }
}
