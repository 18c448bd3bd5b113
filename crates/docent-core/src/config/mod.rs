//! Configuration management
//!
//! Everything a component needs (API keys, model names, store location,
//! splitter geometry) lives in [`Config`] and is handed to constructors.
//! Environment variables are only consulted when defaults are built.

use crate::error::{DocentError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Directory holding the persisted embedding index
    #[serde(default = "default_persist_dir")]
    pub persist_dir: PathBuf,

    /// Number of segments retrieved per question
    #[serde(default = "default_top_k")]
    pub top_k: usize,

    /// Sliding window length in bytes
    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,

    /// Bytes shared between consecutive windows
    #[serde(default = "default_chunk_overlap")]
    pub chunk_overlap: usize,

    /// LLM and embedding service configuration
    #[serde(default)]
    pub llm_service: LLMServiceConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            persist_dir: default_persist_dir(),
            top_k: default_top_k(),
            chunk_size: default_chunk_size(),
            chunk_overlap: default_chunk_overlap(),
            llm_service: LLMServiceConfig::default(),
        }
    }
}

/// LLM service configuration for external inference
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LLMServiceConfig {
    /// Base URL of the OpenAI-compatible chat service
    #[serde(default = "default_llm_url")]
    pub url: String,

    /// Model name for chat completions
    #[serde(default = "default_chat_model")]
    pub model: String,

    /// Base URL for embeddings service (falls back to `url`)
    #[serde(default = "default_embedding_url")]
    pub embedding_url: Option<String>,

    /// Model name for embeddings
    #[serde(default = "default_embedding_model")]
    pub embedding_model: String,

    /// Expected embedding dimensions, checked against every response when set
    #[serde(default = "default_embedding_dimensions")]
    pub embedding_dimensions: Option<usize>,

    /// API key (optional, for authenticated services)
    #[serde(default = "default_api_key")]
    pub api_key: Option<String>,

    /// Sampling temperature for chat completions
    #[serde(default)]
    pub temperature: f32,

    /// Completion token limit
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl LLMServiceConfig {
    /// Get the embeddings URL (falls back to main URL if not specified)
    pub fn embeddings_url(&self) -> &str {
        self.embedding_url.as_deref().unwrap_or(&self.url)
    }
}

impl Default for LLMServiceConfig {
    fn default() -> Self {
        Self {
            url: default_llm_url(),
            model: default_chat_model(),
            embedding_url: default_embedding_url(),
            embedding_model: default_embedding_model(),
            embedding_dimensions: default_embedding_dimensions(),
            api_key: default_api_key(),
            temperature: 0.0,
            max_tokens: default_max_tokens(),
            timeout_secs: default_timeout(),
        }
    }
}

fn default_persist_dir() -> PathBuf {
    std::env::var("DOCENT_PERSIST_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("./chroma_store"))
}

fn default_top_k() -> usize {
    3
}

fn default_chunk_size() -> usize {
    800
}

fn default_chunk_overlap() -> usize {
    100
}

fn default_llm_url() -> String {
    std::env::var("DOCENT_LLM_URL").unwrap_or_else(|_| "https://api.groq.com/openai".to_string())
}

fn default_chat_model() -> String {
    std::env::var("DOCENT_LLM_MODEL").unwrap_or_else(|_| "llama-3.1-8b-instant".to_string())
}

fn default_embedding_model() -> String {
    std::env::var("DOCENT_EMBEDDING_MODEL")
        .unwrap_or_else(|_| "sentence-transformers/all-MiniLM-L6-v2".to_string())
}

fn default_embedding_url() -> Option<String> {
    std::env::var("DOCENT_EMBEDDING_URL").ok()
}

fn default_embedding_dimensions() -> Option<usize> {
    std::env::var("DOCENT_EMBEDDING_DIMS")
        .ok()
        .and_then(|s| s.parse().ok())
}

fn default_api_key() -> Option<String> {
    std::env::var("DOCENT_LLM_API_KEY")
        .or_else(|_| std::env::var("GROQ_API_KEY"))
        .ok()
}

fn default_max_tokens() -> u32 {
    1024
}

fn default_timeout() -> u64 {
    60
}

impl Config {
    /// Load config from default path
    pub fn load() -> Result<Self> {
        Self::load_from(Self::default_path())
    }

    /// Load config from an explicit path, falling back to defaults if absent
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            Self::from_yaml(&content)
        } else {
            Ok(Config::default())
        }
    }

    /// Parse config from YAML text
    pub fn from_yaml(content: &str) -> Result<Self> {
        let config: Config = serde_yaml::from_str(content)?;
        Ok(config)
    }

    /// Get default config path
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(crate::CONFIG_DIR_NAME)
            .join("config.yml")
    }

    /// Reject settings no component can work with
    pub fn validate(&self) -> Result<()> {
        if self.top_k == 0 {
            return Err(DocentError::Config("top_k must be at least 1".to_string()));
        }
        if self.chunk_size == 0 {
            return Err(DocentError::Config(
                "chunk_size must be at least 1".to_string(),
            ));
        }
        if self.chunk_overlap >= self.chunk_size {
            return Err(DocentError::Config(format!(
                "chunk_overlap ({}) must be smaller than chunk_size ({})",
                self.chunk_overlap, self.chunk_size
            )));
        }
        Ok(())
    }
}
