//! One-shot commands for exercising the engine without the server.

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};

use crate::config::PalaceConfig;
use crate::engine::analyzer::FragmentAnalyzer;
use crate::engine::query::QueryResponder;
use crate::engine::types::{AnalyzedFragment, Category, Fragment, FragmentSubmission};

/// Analyze a single fragment and print the result as pretty JSON on stdout.
pub fn analyze(
    config: &PalaceConfig,
    content: &str,
    category: &str,
    location: Option<String>,
) -> Result<()> {
    let analyzer = FragmentAnalyzer::new(Arc::new(config.lexicon.clone()));
    let fragment = Fragment::new(
        content.to_owned(),
        Category::parse_lossy(category),
        location,
    );
    let analyzed = analyzer.analyze_fragment(fragment)?;
    println!("{}", serde_json::to_string_pretty(&analyzed)?);
    Ok(())
}

/// Answer a question against fragments loaded from a JSON file (or an empty
/// set when no file is given) and print the answer as pretty JSON.
pub fn query(config: &PalaceConfig, question: &str, fragments_path: Option<&Path>) -> Result<()> {
    let lexicon = Arc::new(config.lexicon.clone());
    let analyzer = FragmentAnalyzer::new(lexicon.clone());

    let submissions: Vec<FragmentSubmission> = match fragments_path {
        Some(path) => {
            let contents = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read fragments file: {}", path.display()))?;
            serde_json::from_str(&contents).context("failed to parse fragments JSON")?
        }
        None => Vec::new(),
    };
    let fragments: Vec<AnalyzedFragment> =
        submissions.into_iter().map(|s| analyzer.admit(s)).collect();

    let responder = QueryResponder::new(lexicon);
    let answer = responder.answer(question, &fragments)?;
    println!("{}", serde_json::to_string_pretty(&answer)?);
    Ok(())
}
