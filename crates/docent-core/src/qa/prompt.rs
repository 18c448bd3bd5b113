//! Prompt assembly and answer synthesis

use crate::error::Result;
use crate::llm::{ChatMessage, LLMClient};
use crate::search::ScoredSegment;
use std::sync::Arc;

/// Join segment texts in rank order, separated by a blank line
pub fn build_context(segments: &[ScoredSegment]) -> String {
    segments
        .iter()
        .map(|s| s.segment.text.as_str())
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Render the question-answering prompt
pub fn build_prompt(question: &str, context: &str) -> String {
    format!(
        r#"
You are a helpful teacher-scholar assistant.
Answer the following question using the context below.

Context:
{}

Question: {}
Answer:
"#,
        context, question
    )
}

/// Turns a question and its retrieved context into an LLM answer
pub struct Synthesizer {
    llm: Arc<dyn LLMClient>,
}

impl Synthesizer {
    pub fn new(llm: Arc<dyn LLMClient>) -> Self {
        Self { llm }
    }

    /// Returns the rendered prompt and the raw model response
    pub async fn answer(&self, question: &str, segments: &[ScoredSegment]) -> Result<(String, String)> {
        let prompt = build_prompt(question, &build_context(segments));
        let response = self
            .llm
            .chat_completion(vec![ChatMessage::user(prompt.clone())])
            .await?;
        Ok((prompt, response))
    }
}
