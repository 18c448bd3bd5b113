//! Vector storage operations
//!
//! Stores embeddings as BLOBs and computes cosine similarity in Rust.

use super::{hash_content, IndexStore};
use crate::error::{DocentError, Result};
use crate::index::Segment;
use chrono::Utc;
use rusqlite::params;

/// A segment together with its embedding
#[derive(Debug, Clone)]
pub struct IndexEntry {
    /// Insertion order key
    pub id: i64,
    pub segment: Segment,
    pub embedding: Vec<f32>,
}

impl IndexStore {
    /// Append segments and their embeddings in one transaction
    pub fn insert_entries(&self, segments: &[Segment], embeddings: &[Vec<f32>]) -> Result<()> {
        if segments.len() != embeddings.len() {
            return Err(DocentError::InvalidInput(format!(
                "{} segments but {} embeddings",
                segments.len(),
                embeddings.len()
            )));
        }

        let now = Utc::now().to_rfc3339();

        self.conn.execute("BEGIN IMMEDIATE", [])?;
        let result = (|| {
            for (segment, embedding) in segments.iter().zip(embeddings) {
                self.conn.execute(
                    "INSERT INTO segments (source, page, pos, text, chunk_hash, created_at)
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                    params![
                        segment.source,
                        segment.page,
                        segment.position as i64,
                        segment.text,
                        hash_content(&segment.text),
                        now
                    ],
                )?;
                let id = self.conn.last_insert_rowid();
                self.conn.execute(
                    "INSERT INTO embeddings (segment_id, embedding) VALUES (?1, ?2)",
                    params![id, embedding_to_bytes(embedding)],
                )?;
            }
            Ok(())
        })();

        if result.is_ok() {
            self.conn.execute("COMMIT", [])?;
        } else {
            let _ = self.conn.execute("ROLLBACK", []);
        }
        result
    }

    /// Count stored entries
    pub fn count_entries(&self) -> Result<usize> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM embeddings", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    /// Get all entries in insertion order
    pub fn all_entries(&self) -> Result<Vec<IndexEntry>> {
        let mut stmt = self.conn.prepare(
            "SELECT s.id, s.source, s.page, s.pos, s.text, e.embedding
             FROM segments s
             JOIN embeddings e ON e.segment_id = s.id
             ORDER BY s.id",
        )?;

        let results = stmt
            .query_map([], |row| {
                let embedding_bytes: Vec<u8> = row.get(5)?;
                Ok(IndexEntry {
                    id: row.get(0)?,
                    segment: Segment {
                        source: row.get(1)?,
                        page: row.get(2)?,
                        position: row.get::<_, i64>(3)? as usize,
                        text: row.get(4)?,
                    },
                    embedding: bytes_to_embedding(&embedding_bytes),
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(results)
    }

    /// Register model with its dimensions, rejecting a dimension change
    pub fn register_model(&self, model: &str, dimensions: usize) -> Result<()> {
        if let Some(stored) = self.model_dimensions(model)? {
            if stored != dimensions {
                return Err(DocentError::EmbeddingProvider(format!(
                    "model {} produced {} dimensions, index holds {}",
                    model, dimensions, stored
                )));
            }
            return Ok(());
        }

        self.conn.execute(
            "INSERT INTO model_metadata (model, dimensions, created_at) VALUES (?1, ?2, ?3)",
            params![model, dimensions as i64, Utc::now().to_rfc3339()],
        )?;
        Ok(())
    }

    /// Get stored model dimensions
    pub fn model_dimensions(&self, model: &str) -> Result<Option<usize>> {
        let result = self.conn.query_row(
            "SELECT dimensions FROM model_metadata WHERE model = ?1",
            params![model],
            |row| row.get::<_, i64>(0),
        );

        match result {
            Ok(dims) => Ok(Some(dims as usize)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Hashes of stored segment texts in insertion order
    pub fn chunk_hashes(&self) -> Result<Vec<String>> {
        let mut stmt = self
            .conn
            .prepare("SELECT chunk_hash FROM segments ORDER BY id")?;
        let results = stmt
            .query_map([], |row| row.get(0))?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(results)
    }
}

/// Convert f32 embedding to bytes (little-endian)
pub fn embedding_to_bytes(embedding: &[f32]) -> Vec<u8> {
    embedding.iter().flat_map(|f| f.to_le_bytes()).collect()
}

/// Convert bytes to f32 embedding
pub fn bytes_to_embedding(bytes: &[u8]) -> Vec<f32> {
    bytes
        .chunks_exact(4)
        .map(|chunk| f32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]))
        .collect()
}

/// Compute cosine similarity between two embeddings
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    // f32 sums overflow to inf for large components
    let dot: f64 = a.iter().zip(b.iter()).map(|(x, y)| *x as f64 * *y as f64).sum();
    let norm_a: f64 = a.iter().map(|x| (*x as f64).powi(2)).sum::<f64>().sqrt();
    let norm_b: f64 = b.iter().map(|x| (*x as f64).powi(2)).sum::<f64>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    (dot / (norm_a * norm_b)) as f32
}
