//! HTTP client for OpenAI-compatible chat services (Groq, vLLM, OpenAI)

use super::{ChatMessage, LLMClient};
use crate::config::LLMServiceConfig;
use crate::error::{DocentError, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

/// API metrics for monitoring
#[derive(Debug, Default)]
struct APIMetrics {
    total_requests: AtomicU64,
    total_errors: AtomicU64,
    total_latency_ms: AtomicU64,
}

/// Snapshot of API metrics
#[derive(Debug, Clone)]
pub struct MetricsSnapshot {
    pub total_requests: u64,
    pub total_errors: u64,
    pub avg_latency_ms: f64,
}

/// OpenAI-compatible chat client
pub struct OpenAIClient {
    http_client: reqwest::Client,
    config: LLMServiceConfig,
    metrics: APIMetrics,
}

impl OpenAIClient {
    /// Create new client from configuration
    pub fn new(config: LLMServiceConfig) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| DocentError::LlmProvider(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http_client,
            config,
            metrics: APIMetrics::default(),
        })
    }

    /// Get current API metrics
    pub fn metrics(&self) -> MetricsSnapshot {
        let total = self.metrics.total_requests.load(Ordering::Relaxed);
        MetricsSnapshot {
            total_requests: total,
            total_errors: self.metrics.total_errors.load(Ordering::Relaxed),
            avg_latency_ms: if total > 0 {
                self.metrics.total_latency_ms.load(Ordering::Relaxed) as f64 / total as f64
            } else {
                0.0
            },
        }
    }

    fn fail(&self, message: String) -> DocentError {
        self.metrics.total_errors.fetch_add(1, Ordering::Relaxed);
        DocentError::LlmProvider(message)
    }
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[async_trait]
impl LLMClient for OpenAIClient {
    async fn chat_completion(&self, messages: Vec<ChatMessage>) -> Result<String> {
        let start = Instant::now();
        self.metrics.total_requests.fetch_add(1, Ordering::Relaxed);

        let request = ChatRequest {
            model: &self.config.model,
            messages,
            temperature: self.config.temperature,
            max_tokens: self.config.max_tokens,
        };

        let url = format!(
            "{}/v1/chat/completions",
            self.config.url.trim_end_matches('/')
        );

        let mut req = self.http_client.post(&url).json(&request);

        if let Some(ref api_key) = self.config.api_key {
            req = req.bearer_auth(api_key.trim());
        }

        let response = req
            .send()
            .await
            .map_err(|e| self.fail(format!("request to {} failed: {}", url, e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(self.fail(format!("HTTP {}: {}", status, body)));
        }

        let chat_response: ChatResponse = response
            .json()
            .await
            .map_err(|e| self.fail(format!("malformed response: {}", e)))?;

        let content = chat_response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| self.fail("response contained no choices".to_string()))?
            .message
            .content;

        let elapsed = start.elapsed().as_millis() as u64;
        self.metrics
            .total_latency_ms
            .fetch_add(elapsed, Ordering::Relaxed);
        tracing::debug!("Chat completion from {} in {}ms", self.config.model, elapsed);

        Ok(content)
    }

    fn model_name(&self) -> &str {
        &self.config.model
    }
}
