//! HTTP-based embedder using an OpenAI-compatible `/v1/embeddings` service

use super::Embedder;
use crate::config::LLMServiceConfig;
use crate::error::{DocentError, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Embedder that uses external HTTP service (TEI, vLLM, OpenAI, etc.)
pub struct HttpEmbedder {
    http_client: reqwest::Client,
    url: String,
    model: String,
    api_key: Option<String>,
    expected_dimensions: Option<usize>,
}

#[derive(Serialize)]
struct EmbedRequest<'a> {
    model: &'a str,
    input: &'a [String],
}

#[derive(Deserialize)]
struct EmbedResponse {
    data: Vec<EmbedData>,
}

#[derive(Deserialize)]
struct EmbedData {
    #[serde(default)]
    index: Option<usize>,
    embedding: Vec<f32>,
}

impl HttpEmbedder {
    /// Create from configuration
    pub fn new(config: &LLMServiceConfig) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| {
                DocentError::EmbeddingProvider(format!("failed to build HTTP client: {}", e))
            })?;

        Ok(Self {
            http_client,
            url: format!("{}/v1/embeddings", config.embeddings_url().trim_end_matches('/')),
            model: config.embedding_model.clone(),
            api_key: config.api_key.clone(),
            expected_dimensions: config.embedding_dimensions,
        })
    }
}

/// Restore input order and check the response shape
fn order_embeddings(
    data: Vec<EmbedData>,
    expected_count: usize,
    expected_dimensions: Option<usize>,
) -> Result<Vec<Vec<f32>>> {
    if data.len() != expected_count {
        return Err(DocentError::EmbeddingProvider(format!(
            "expected {} embeddings, got {}",
            expected_count,
            data.len()
        )));
    }

    let mut slots: Vec<Option<Vec<f32>>> = vec![None; expected_count];
    for (position, item) in data.into_iter().enumerate() {
        let idx = item.index.unwrap_or(position);
        if idx >= expected_count || slots[idx].is_some() {
            return Err(DocentError::EmbeddingProvider(format!(
                "unexpected embedding index {}",
                idx
            )));
        }
        if let Some(dims) = expected_dimensions {
            if item.embedding.len() != dims {
                return Err(DocentError::EmbeddingProvider(format!(
                    "expected {} dimensions, got {}",
                    dims,
                    item.embedding.len()
                )));
            }
        }
        slots[idx] = Some(item.embedding);
    }

    // every slot is filled: count matches and indices are unique
    Ok(slots.into_iter().flatten().collect())
}

#[async_trait]
impl Embedder for HttpEmbedder {
    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        let request = EmbedRequest {
            model: &self.model,
            input: texts,
        };

        let mut req = self.http_client.post(&self.url).json(&request);

        if let Some(ref api_key) = self.api_key {
            req = req.bearer_auth(api_key.trim());
        }

        let response = req.send().await.map_err(|e| {
            DocentError::EmbeddingProvider(format!("request to {} failed: {}", self.url, e))
        })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(DocentError::EmbeddingProvider(format!(
                "HTTP {}: {}",
                status, body
            )));
        }

        let embed_response: EmbedResponse = response.json().await.map_err(|e| {
            DocentError::EmbeddingProvider(format!("malformed response: {}", e))
        })?;

        tracing::debug!("Embedded {} texts with {}", texts.len(), self.model);

        order_embeddings(embed_response.data, texts.len(), self.expected_dimensions)
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}
