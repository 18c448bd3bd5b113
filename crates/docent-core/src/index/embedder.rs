//! Embedding pipeline: segments in, persisted index entries out

use super::chunker::Segment;
use crate::db::IndexStore;
use crate::error::{DocentError, Result};
use crate::llm::Embedder;

const BATCH_SIZE: usize = 32;

/// Indexing progress
#[derive(Debug, Clone)]
pub struct IndexProgress {
    pub total_segments: usize,
    pub embedded_segments: usize,
}

/// Indexing statistics
#[derive(Debug, Clone, Default)]
pub struct IndexStats {
    pub total_segments: usize,
    pub embedded_segments: usize,
    pub batches: usize,
    pub dimensions: usize,
}

/// Embed every segment and append it to the store
///
/// Batches are embedded one at a time; each batch is written in its own
/// transaction once the provider returns a well-formed response.
pub async fn build_index(
    store: &IndexStore,
    embedder: &dyn Embedder,
    segments: &[Segment],
    progress: Option<Box<dyn Fn(IndexProgress) + Send + Sync>>,
) -> Result<IndexStats> {
    let mut stats = IndexStats {
        total_segments: segments.len(),
        ..Default::default()
    };

    if segments.is_empty() {
        return Ok(stats);
    }

    let model = embedder.model_name().to_string();

    for batch in segments.chunks(BATCH_SIZE) {
        let texts: Vec<String> = batch.iter().map(|s| s.text.clone()).collect();
        let embeddings = embedder.embed_batch(&texts).await?;

        if embeddings.len() != batch.len() {
            return Err(DocentError::EmbeddingProvider(format!(
                "expected {} embeddings, provider returned {}",
                batch.len(),
                embeddings.len()
            )));
        }

        let dimensions = batch_dimensions(&embeddings)?;
        if stats.dimensions == 0 {
            store.register_model(&model, dimensions)?;
            stats.dimensions = dimensions;
        } else if dimensions != stats.dimensions {
            return Err(DocentError::EmbeddingProvider(format!(
                "embedding dimensions changed mid-run: {} then {}",
                stats.dimensions, dimensions
            )));
        }

        store.insert_entries(batch, &embeddings)?;
        stats.embedded_segments += batch.len();
        stats.batches += 1;

        tracing::debug!(
            "Indexed batch {} ({}/{} segments)",
            stats.batches,
            stats.embedded_segments,
            stats.total_segments
        );

        if let Some(ref cb) = progress {
            cb(IndexProgress {
                total_segments: stats.total_segments,
                embedded_segments: stats.embedded_segments,
            });
        }
    }

    tracing::info!(
        "Indexed {} segments with {} ({} dimensions)",
        stats.embedded_segments,
        model,
        stats.dimensions
    );

    Ok(stats)
}

/// Common vector length of a batch, rejecting empty or ragged output
fn batch_dimensions(embeddings: &[Vec<f32>]) -> Result<usize> {
    let dimensions = embeddings.first().map(Vec::len).unwrap_or(0);
    if dimensions == 0 {
        return Err(DocentError::EmbeddingProvider(
            "provider returned an empty embedding".to_string(),
        ));
    }
    for embedding in embeddings {
        if embedding.len() != dimensions {
            return Err(DocentError::EmbeddingProvider(format!(
                "inconsistent embedding lengths: {} and {}",
                dimensions,
                embedding.len()
            )));
        }
        if embedding.iter().any(|v| !v.is_finite()) {
            return Err(DocentError::EmbeddingProvider(
                "provider returned non-finite embedding values".to_string(),
            ));
        }
    }
    Ok(dimensions)
}
