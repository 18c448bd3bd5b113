//! Retrieval
//!
//! Brute-force cosine similarity over every stored embedding.

mod vector;

pub use vector::*;
