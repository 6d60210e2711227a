//! OpenRouter chat-completions enrichment backend.

use std::time::Duration;

use async_trait::async_trait;
use serde_json::json;

use crate::config::EnrichmentConfig;
use crate::enrich::{Enricher, EnrichmentUnavailable};

const SYSTEM_PROMPT: &str =
    "You analyze Bitcoin adoption patterns from community memory fragments. \
     Return only valid JSON, no other text.";

/// Calls the OpenRouter chat-completions API with a bounded timeout and
/// parses the model's message content as a JSON object.
pub struct OpenRouterEnricher {
    client: reqwest::Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl OpenRouterEnricher {
    pub fn new(api_key: String, config: &EnrichmentConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self {
            client,
            api_key,
            model: config.model.clone(),
            base_url: config.base_url.clone(),
        })
    }
}

#[async_trait]
impl Enricher for OpenRouterEnricher {
    async fn enrich(&self, prompt: &str) -> Result<serde_json::Value, EnrichmentUnavailable> {
        let body = json!({
            "model": self.model,
            "messages": [
                { "role": "system", "content": SYSTEM_PROMPT },
                { "role": "user", "content": prompt },
            ],
            "max_tokens": 800,
            "temperature": 0.3,
        });

        let response = self
            .client
            .post(&self.base_url)
            .bearer_auth(&self.api_key)
            .header("HTTP-Referer", "https://bitcoin-memory-palace.com")
            .header("X-Title", "Bitcoin Memory Palace")
            .json(&body)
            .send()
            .await?
            .error_for_status()?;

        let payload: serde_json::Value = response.json().await?;
        let content = payload["choices"][0]["message"]["content"]
            .as_str()
            .ok_or_else(|| {
                EnrichmentUnavailable::Malformed("no message content in completion".into())
            })?;

        serde_json::from_str(content)
            .map_err(|e| EnrichmentUnavailable::Malformed(e.to_string()))
    }
}
