//! Retrieval-augmented question answering

mod prompt;
mod session;

pub use prompt::*;
pub use session::*;

use crate::error::Result;
use crate::search::{Retriever, ScoredSegment};

/// One answered question
#[derive(Debug, Clone)]
pub struct Exchange {
    pub question: String,
    pub segments: Vec<ScoredSegment>,
    pub prompt: String,
    pub answer: String,
}

/// Retrieve-then-synthesize for a single question
pub struct QaEngine {
    retriever: Retriever,
    synthesizer: Synthesizer,
}

impl QaEngine {
    pub fn new(retriever: Retriever, synthesizer: Synthesizer) -> Self {
        Self {
            retriever,
            synthesizer,
        }
    }

    pub async fn ask(&self, question: &str) -> Result<Exchange> {
        let segments = self.retriever.retrieve(question).await?;
        let (prompt, answer) = self.synthesizer.answer(question, &segments).await?;
        Ok(Exchange {
            question: question.to_string(),
            segments,
            prompt,
            answer,
        })
    }
}
