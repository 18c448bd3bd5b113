//! Fixed-sequence LLM pipelines
//!
//! A pipeline is an ordered list of steps over one mutable state record.
//! Each step renders a prompt from the fields written so far, calls the
//! model once, and stores the reply in its own field.

pub mod stock;
pub mod travel;

use crate::error::Result;
use crate::llm::{complete_suggestion, ChatMessage, LLMClient};
use async_trait::async_trait;

/// One stage of a pipeline
#[async_trait]
pub trait Step<S>: Send + Sync {
    fn name(&self) -> &str;

    async fn run(&self, llm: &dyn LLMClient, state: &mut S) -> Result<()>;
}

/// How a step reads the model reply
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Reply text with surrounding whitespace trimmed
    Plain,
    /// Reply text exactly as returned
    Raw,
    /// `suggestion` field of a JSON reply
    Structured,
}

/// Step driven by a prompt template and a field setter
pub struct PromptStep<S> {
    name: &'static str,
    prompt: fn(&S) -> String,
    store: fn(&mut S, String),
    mode: OutputMode,
    recover_errors: bool,
}

impl<S> PromptStep<S> {
    pub fn new(
        name: &'static str,
        mode: OutputMode,
        prompt: fn(&S) -> String,
        store: fn(&mut S, String),
    ) -> Self {
        Self {
            name,
            prompt,
            store,
            mode,
            recover_errors: false,
        }
    }

    /// Store the error text in the field instead of failing the pipeline
    pub fn recover_errors(mut self) -> Self {
        self.recover_errors = true;
        self
    }
}

#[async_trait]
impl<S: Send + Sync> Step<S> for PromptStep<S> {
    fn name(&self) -> &str {
        self.name
    }

    async fn run(&self, llm: &dyn LLMClient, state: &mut S) -> Result<()> {
        let prompt = (self.prompt)(state);

        let outcome = match self.mode {
            OutputMode::Structured => complete_suggestion(llm, &prompt).await,
            OutputMode::Plain | OutputMode::Raw => llm
                .chat_completion(vec![ChatMessage::user(prompt)])
                .await
                .map(|reply| {
                    if self.mode == OutputMode::Plain {
                        reply.trim().to_string()
                    } else {
                        reply
                    }
                }),
        };

        let value = match outcome {
            Ok(value) => value,
            Err(e) if self.recover_errors => {
                tracing::warn!("Step {} failed, keeping error text: {}", self.name, e);
                format!("Error during analysis: {}", e)
            }
            Err(e) => return Err(e),
        };

        (self.store)(state, value);
        Ok(())
    }
}

/// Ordered list of steps
pub struct Pipeline<S> {
    name: &'static str,
    steps: Vec<Box<dyn Step<S>>>,
}

impl<S: Send + Sync> Pipeline<S> {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            steps: Vec::new(),
        }
    }

    /// Append a step
    pub fn then(mut self, step: impl Step<S> + 'static) -> Self {
        self.steps.push(Box::new(step));
        self
    }

    pub fn step_names(&self) -> Vec<&str> {
        self.steps.iter().map(|s| s.name()).collect()
    }

    /// Run every step in order, stopping at the first failure
    pub async fn run(&self, llm: &dyn LLMClient, mut state: S) -> Result<S> {
        tracing::info!("Running pipeline {} ({} steps)", self.name, self.steps.len());

        for (idx, step) in self.steps.iter().enumerate() {
            tracing::debug!("Step {}/{}: {}", idx + 1, self.steps.len(), step.name());
            step.run(llm, &mut state).await?;
        }

        Ok(state)
    }
}
