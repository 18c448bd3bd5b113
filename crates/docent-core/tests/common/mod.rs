//! Deterministic stand-ins for the embedding and chat services

#![allow(dead_code)]

use async_trait::async_trait;
use docent_core::{ChatMessage, DocentError, Embedder, LLMClient, Result};
use std::sync::Mutex;

pub const DIMS: usize = 256;

/// Bag-of-words embedder: lowercase alphanumeric tokens hashed into buckets
pub struct BagOfWordsEmbedder;

impl BagOfWordsEmbedder {
    pub fn vector(text: &str) -> Vec<f32> {
        let mut v = vec![0.0f32; DIMS];
        for token in text
            .split(|c: char| !c.is_alphanumeric())
            .filter(|t| !t.is_empty())
        {
            let mut hash: u64 = 0xcbf29ce484222325;
            for byte in token.to_lowercase().bytes() {
                hash ^= byte as u64;
                hash = hash.wrapping_mul(0x100000001b3);
            }
            v[(hash % DIMS as u64) as usize] += 1.0;
        }
        v
    }
}

#[async_trait]
impl Embedder for BagOfWordsEmbedder {
    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        Ok(texts.iter().map(|t| Self::vector(t)).collect())
    }

    fn model_name(&self) -> &str {
        "bag-of-words"
    }
}

/// Embedder whose service is always down
pub struct UnreachableEmbedder;

#[async_trait]
impl Embedder for UnreachableEmbedder {
    async fn embed_batch(&self, _texts: &[String]) -> Result<Vec<Vec<f32>>> {
        Err(DocentError::EmbeddingProvider(
            "connection refused".to_string(),
        ))
    }

    fn model_name(&self) -> &str {
        "unreachable"
    }
}

/// Chat client that answers with a fixed reply and records every prompt
pub struct RecordingLlm {
    reply: String,
    pub prompts: Mutex<Vec<String>>,
}

impl RecordingLlm {
    pub fn new(reply: &str) -> Self {
        Self {
            reply: reply.to_string(),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl LLMClient for RecordingLlm {
    async fn chat_completion(&self, messages: Vec<ChatMessage>) -> Result<String> {
        let prompt = messages.last().map(|m| m.content.clone()).unwrap_or_default();
        self.prompts.lock().unwrap().push(prompt);
        Ok(self.reply.clone())
    }

    fn model_name(&self) -> &str {
        "recording"
    }
}

/// Chat client whose service is always down
pub struct FailingLlm;

#[async_trait]
impl LLMClient for FailingLlm {
    async fn chat_completion(&self, _messages: Vec<ChatMessage>) -> Result<String> {
        Err(DocentError::LlmProvider("HTTP 401 Unauthorized".to_string()))
    }

    fn model_name(&self) -> &str {
        "failing"
    }
}

/// Numbers its replies; JSON when a system message asks for structure
pub struct CountingLlm {
    pub calls: Mutex<Vec<(bool, String)>>,
    fail_on_call: Option<usize>,
}

impl CountingLlm {
    pub fn new() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            fail_on_call: None,
        }
    }

    pub fn failing_on(call: usize) -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            fail_on_call: Some(call),
        }
    }

    pub fn calls(&self) -> Vec<(bool, String)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl LLMClient for CountingLlm {
    async fn chat_completion(&self, messages: Vec<ChatMessage>) -> Result<String> {
        let structured = messages.iter().any(|m| m.role == "system");
        let prompt = messages.last().map(|m| m.content.clone()).unwrap_or_default();
        let n = {
            let mut calls = self.calls.lock().unwrap();
            calls.push((structured, prompt));
            calls.len()
        };

        if self.fail_on_call == Some(n) {
            return Err(DocentError::LlmProvider("rate limited".to_string()));
        }
        if structured {
            Ok(format!("{{\"suggestion\": \"reply {}\"}}", n))
        } else {
            Ok(format!("  reply {}  \n", n))
        }
    }

    fn model_name(&self) -> &str {
        "counting"
    }
}
