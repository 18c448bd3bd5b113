//! Single-field structured output
//!
//! The advisory pipelines ask the model for `{"suggestion": "..."}` and keep
//! only the suggestion text.

use super::{ChatMessage, LLMClient};
use crate::error::{DocentError, Result};
use serde::Deserialize;

const STRUCTURED_SYSTEM_PROMPT: &str = "Respond ONLY with a JSON object of the form \
{\"suggestion\": \"<recommendation text>\"}. Put the whole answer in the suggestion field.";

#[derive(Debug, Deserialize)]
struct Suggestion {
    suggestion: String,
}

/// Ask for a suggestion and return its text
pub async fn complete_suggestion(llm: &dyn LLMClient, prompt: &str) -> Result<String> {
    let messages = vec![
        ChatMessage::system(STRUCTURED_SYSTEM_PROMPT),
        ChatMessage::user(prompt),
    ];
    let response = llm.chat_completion(messages).await?;
    parse_suggestion(&response)
}

/// Extract the suggestion field, tolerating prose or code fences around the JSON
pub fn parse_suggestion(response: &str) -> Result<String> {
    let json_str = match (response.find('{'), response.rfind('}')) {
        (Some(start), Some(end)) if start < end => &response[start..=end],
        _ => response,
    };

    serde_json::from_str::<Suggestion>(json_str)
        .map(|s| s.suggestion)
        .map_err(|e| DocentError::LlmProvider(format!("failed to parse structured output: {}", e)))
}
