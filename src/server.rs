//! HTTP layer over the analytics engine.
//!
//! One axum router exposing the three core operations plus a health check.
//! Handlers always compute the deterministic heuristic result first; when an
//! enricher is configured its output may replace that baseline, and any
//! enrichment failure is logged and swallowed — callers receive a complete
//! result either way.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};

use crate::config::PalaceConfig;
use crate::engine::analyzer::FragmentAnalyzer;
use crate::engine::insights::{self, InsightAggregator, SentimentCounts};
use crate::engine::query::{self, QueryResponder};
use crate::engine::types::{
    AnalyzedFragment, Category, Fragment, FragmentSubmission, Insight, QueryAnswer,
};
use crate::engine::EngineError;
use crate::enrich::{self, Enricher};

const ENDPOINTS: [&str; 3] = [
    "POST /analyze-fragment",
    "POST /generate-insights",
    "POST /query",
];

struct AppState {
    analyzer: FragmentAnalyzer,
    aggregator: InsightAggregator,
    responder: QueryResponder,
    enricher: Option<Box<dyn Enricher>>,
}

/// Start the HTTP server and run until ctrl-c.
pub async fn serve(config: PalaceConfig) -> anyhow::Result<()> {
    let bind_addr = config.bind_addr();

    let lexicon = Arc::new(config.lexicon.clone());
    let enricher = enrich::create_enricher(&config.enrichment);
    tracing::info!(
        enrichment = enricher.is_some(),
        "analytics engine ready"
    );

    let state = Arc::new(AppState {
        analyzer: FragmentAnalyzer::new(lexicon.clone()),
        aggregator: InsightAggregator::new(),
        responder: QueryResponder::new(lexicon),
        enricher,
    });

    let router = router(state);

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!(addr = %bind_addr, "memory palace listening at http://{bind_addr}");

    axum::serve(listener, router)
        .with_graceful_shutdown(async {
            tokio::signal::ctrl_c()
                .await
                .expect("failed to listen for ctrl-c");
            tracing::info!("shutting down server");
        })
        .await?;

    Ok(())
}

fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/analyze-fragment", post(analyze_fragment))
        .route("/generate-insights", post(generate_insights))
        .route("/query", post(run_query))
        .fallback(not_found)
        .with_state(state)
}

/// Request rejection. The engine's only failure mode is missing required
/// input, which maps to a 400 with an explanation.
#[derive(Debug, thiserror::Error)]
#[error("{0}")]
struct ApiError(#[from] EngineError);

#[derive(Serialize)]
struct ErrorBody {
    success: bool,
    message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let message = self.to_string();
        tracing::debug!(%message, "rejecting request");
        let body = Json(ErrorBody { success: false, message });
        (StatusCode::BAD_REQUEST, body).into_response()
    }
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    timestamp: String,
    api_ready: bool,
    endpoints: [&'static str; 3],
}

async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "Bitcoin Memory Palace AI is alive",
        timestamp: chrono::Utc::now().to_rfc3339(),
        api_ready: state.enricher.is_some(),
        endpoints: ENDPOINTS,
    })
}

async fn not_found() -> Response {
    let body = serde_json::json!({
        "success": false,
        "message": "endpoint not found",
        "available_endpoints": ENDPOINTS,
    });
    (StatusCode::NOT_FOUND, Json(body)).into_response()
}

#[derive(Deserialize)]
struct AnalyzeRequest {
    #[serde(default)]
    content: String,
    #[serde(default)]
    category: Category,
    #[serde(default)]
    location: Option<String>,
}

#[derive(Serialize)]
struct AnalyzeResponse {
    success: bool,
    analysis: AnalyzedFragment,
}

async fn analyze_fragment(
    State(state): State<Arc<AppState>>,
    Json(req): Json<AnalyzeRequest>,
) -> Result<Json<AnalyzeResponse>, ApiError> {
    let fragment = Fragment::new(req.content, req.category, req.location);
    let analysis = state.analyzer.analyze_fragment(fragment)?;
    tracing::debug!(id = %analysis.fragment.id, sentiment = %analysis.analysis.sentiment, "fragment analyzed");
    Ok(Json(AnalyzeResponse { success: true, analysis }))
}

#[derive(Deserialize)]
struct InsightsRequest {
    #[serde(default)]
    fragments: Vec<FragmentSubmission>,
}

#[derive(Serialize)]
struct InsightsMetadata {
    total_fragments_analyzed: usize,
    categories_found: Vec<&'static str>,
    locations_found: Vec<String>,
    sentiment_distribution: SentimentCounts,
    generation_timestamp: String,
}

#[derive(Serialize)]
struct InsightsResponse {
    success: bool,
    insights: Vec<Insight>,
    metadata: InsightsMetadata,
}

async fn generate_insights(
    State(state): State<Arc<AppState>>,
    Json(req): Json<InsightsRequest>,
) -> Result<Json<InsightsResponse>, ApiError> {
    let fragments: Vec<AnalyzedFragment> = req
        .fragments
        .into_iter()
        .map(|s| state.analyzer.admit(s))
        .collect();

    // Heuristic baseline first — validation errors surface before any
    // enrichment attempt, and the fallback result is always in hand.
    let mut insights = state.aggregator.aggregate(&fragments)?;

    if let Some(enricher) = &state.enricher {
        let prompt = enrich::insight_prompt(&fragments);
        match enricher.enrich(&prompt).await.and_then(enrich::parse_insights) {
            Ok(enriched) if !enriched.is_empty() => {
                tracing::debug!(count = enriched.len(), "using enriched insights");
                insights = enriched;
            }
            Ok(_) => tracing::debug!("enrichment returned no insights, keeping heuristics"),
            Err(err) => {
                tracing::warn!(%err, "enrichment unavailable, falling back to heuristics");
            }
        }
    }

    let metadata = InsightsMetadata {
        total_fragments_analyzed: fragments.len(),
        categories_found: insights::distinct_categories(&fragments)
            .iter()
            .map(Category::as_str)
            .collect(),
        locations_found: insights::distinct_locations(&fragments),
        sentiment_distribution: insights::sentiment_counts(&fragments),
        generation_timestamp: chrono::Utc::now().to_rfc3339(),
    };

    Ok(Json(InsightsResponse { success: true, insights, metadata }))
}

#[derive(Deserialize)]
struct QueryRequest {
    #[serde(default)]
    question: String,
    #[serde(default)]
    fragments: Vec<FragmentSubmission>,
}

#[derive(Serialize)]
struct QueryMetadata {
    total_fragments: usize,
    relevant_fragments: usize,
    processed_at: String,
}

#[derive(Serialize)]
struct QueryResponse {
    success: bool,
    answer: QueryAnswer,
    query: String,
    metadata: QueryMetadata,
}

async fn run_query(
    State(state): State<Arc<AppState>>,
    Json(req): Json<QueryRequest>,
) -> Result<Json<QueryResponse>, ApiError> {
    let fragments: Vec<AnalyzedFragment> = req
        .fragments
        .into_iter()
        .map(|s| state.analyzer.admit(s))
        .collect();

    let mut answer = state.responder.answer(&req.question, &fragments)?;

    if let Some(enricher) = &state.enricher {
        let prompt = enrich::query_prompt(&req.question, &fragments);
        let enriched = enricher
            .enrich(&prompt)
            .await
            .and_then(|v| enrich::parse_answer(v, &req.question));
        match enriched {
            Ok(parsed) => {
                tracing::debug!("using enriched answer");
                answer = parsed;
            }
            Err(err) => {
                tracing::warn!(%err, "enrichment unavailable, falling back to heuristics");
            }
        }
    }

    let metadata = QueryMetadata {
        total_fragments: fragments.len(),
        relevant_fragments: query::relevant_indices(&req.question, &fragments).len(),
        processed_at: chrono::Utc::now().to_rfc3339(),
    };

    Ok(Json(QueryResponse {
        success: true,
        answer,
        query: req.question,
        metadata,
    }))
}
