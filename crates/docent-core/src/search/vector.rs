//! Vector similarity search

use crate::db::{cosine_similarity, IndexStore};
use crate::error::{DocentError, Result};
use crate::index::Segment;
use crate::llm::Embedder;
use std::cmp::Ordering;
use std::sync::Arc;

/// A retrieved segment and its similarity to the query
#[derive(Debug, Clone)]
pub struct ScoredSegment {
    pub segment: Segment,
    pub score: f32,
}

/// Top-k retriever over a persisted index
pub struct Retriever {
    store: IndexStore,
    embedder: Arc<dyn Embedder>,
    k: usize,
}

impl Retriever {
    /// `embedder` must be the one the index was built with
    pub fn new(store: IndexStore, embedder: Arc<dyn Embedder>, k: usize) -> Result<Self> {
        if k == 0 {
            return Err(DocentError::InvalidInput(
                "retrieval size k must be at least 1".to_string(),
            ));
        }
        Ok(Self { store, embedder, k })
    }

    /// Return up to k segments ordered by decreasing similarity
    pub async fn retrieve(&self, query: &str) -> Result<Vec<ScoredSegment>> {
        let query_embedding = self.embedder.embed(query).await?;
        let entries = self.store.all_entries()?;

        let scored: Vec<ScoredSegment> = entries
            .into_iter()
            .map(|entry| ScoredSegment {
                score: cosine_similarity(&query_embedding, &entry.embedding),
                segment: entry.segment,
            })
            .collect();

        let results = rank_top_k(scored, self.k);
        tracing::debug!("Retrieved {} segments for query", results.len());
        Ok(results)
    }
}

/// Stable descending sort, so equal scores keep insertion order
pub fn rank_top_k(mut scored: Vec<ScoredSegment>, k: usize) -> Vec<ScoredSegment> {
    scored.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
    scored.truncate(k);
    scored
}
