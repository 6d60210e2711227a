//! Collective memory analytics for Bitcoin experience fragments.
//!
//! Palace turns short user-submitted text snippets ("memory fragments") into a
//! queryable picture of how a community is using Bitcoin. The core is a set of
//! deterministic, stateless heuristics — no model calls are required, and an
//! optional LLM enrichment step can only ever improve on the baseline, never
//! become a dependency of it.
//!
//! # Pipeline
//!
//! Raw fragment text flows one direction:
//!
//! ```text
//! content ──► FragmentAnalyzer ──► AnalyzedFragment ──┬──► InsightAggregator (batch)
//!                                                     └──► QueryResponder (per question)
//! ```
//!
//! Each stage produces a new value; nothing is mutated in place and nothing is
//! accumulated inside the engine itself. Fragment storage belongs to callers.
//!
//! # Modules
//!
//! - [`config`] — Configuration loading from TOML files and environment variables
//! - [`engine`] — The heuristic core: lexicon, analyzer, aggregator, responder
//! - [`enrich`] — Optional LLM-backed enrichment collaborator with local fallback

pub mod config;
pub mod engine;
pub mod enrich;
