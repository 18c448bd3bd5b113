//! Docent Core Library
//!
//! Core functionality for the docent document assistant.
//!
//! # Features
//! - PDF and text ingestion with sliding-window segmentation
//! - Embedding index persisted as a single SQLite file
//! - Top-k cosine retrieval and retrieval-augmented answers
//! - Fixed-sequence stock and travel advisory pipelines

pub mod config;
pub mod db;
pub mod error;
pub mod index;
pub mod llm;
pub mod pipeline;
pub mod qa;
pub mod search;

pub use config::{Config, LLMServiceConfig};
pub use db::{IndexEntry, IndexStore};
pub use error::{DocentError, Error, Result};
pub use index::{
    build_index, ingest_document, loader_for_path, DocumentLoader, IndexProgress, IndexStats,
    Page, PdfLoader, Segment, SegmentSplitter, TextLoader,
};
pub use llm::{ChatMessage, Embedder, HttpEmbedder, LLMClient, MetricsSnapshot, OpenAIClient};
pub use pipeline::{OutputMode, Pipeline, PromptStep, Step};
pub use qa::{run_session, Exchange, QaEngine, SessionStats, Synthesizer};
pub use search::{Retriever, ScoredSegment};

/// Default config directory name
pub const CONFIG_DIR_NAME: &str = "docent";
