//! Indexing pipeline
//!
//! Document loading, sliding-window segmentation, and embedding into the
//! persisted store.

mod chunker;
mod embedder;
mod loader;

pub use chunker::*;
pub use embedder::*;
pub use loader::*;
