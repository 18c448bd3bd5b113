//! LLM integration
//!
//! Provides traits and implementations for:
//! - Embedding generation via external services
//! - Chat completions against OpenAI-compatible APIs
//! - Single-field structured output

mod client;
mod http_embedder;
mod structured;
mod traits;

pub use client::{MetricsSnapshot, OpenAIClient};
pub use http_embedder::HttpEmbedder;
pub use structured::{complete_suggestion, parse_suggestion};
pub use traits::*;
