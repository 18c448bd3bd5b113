//! Storage layer for docent
//!
//! A single SQLite file under the persist directory holds segments, their
//! embeddings and the embedding model they were produced with.

mod content;
mod schema;
pub mod vectors;

pub use content::hash_content;
pub use schema::{IndexStore, INDEX_FILE_NAME};
pub use vectors::{cosine_similarity, IndexEntry};
