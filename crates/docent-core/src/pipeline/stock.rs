//! Stock advisory pipeline
//!
//! analyze_stocks -> suggest_investment_strategy -> assess_risks ->
//! finalize_recommendation

use super::{OutputMode, Pipeline, PromptStep};
use crate::error::Result;
use crate::llm::LLMClient;

pub const SECTOR_PROMPT: &str =
    "Enter the sector you're interested in (e.g., technology, healthcare, finance): ";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StockState {
    pub interest: String,
    pub stock_analysis: String,
    pub investment_strategy: String,
    pub risk_assessments: String,
    pub final_recommendation: String,
}

impl StockState {
    pub fn new(interest: impl Into<String>) -> Self {
        Self {
            interest: interest.into(),
            ..Default::default()
        }
    }
}

pub fn pipeline() -> Pipeline<StockState> {
    Pipeline::new("stock")
        .then(
            PromptStep::new(
                "analyze_stocks",
                OutputMode::Structured,
                |s: &StockState| {
                    format!(
                        "Analyze the current stock market trends and provide insights in the {} sector.",
                        s.interest
                    )
                },
                |s: &mut StockState, v| s.stock_analysis = v,
            )
            .recover_errors(),
        )
        .then(PromptStep::new(
            "suggest_investment_strategy",
            OutputMode::Plain,
            |s: &StockState| {
                format!(
                    "Based on the stock analysis: {}, suggest an investment strategy.",
                    s.stock_analysis
                )
            },
            |s: &mut StockState, v| s.investment_strategy = v,
        ))
        .then(PromptStep::new(
            "assess_risks",
            OutputMode::Plain,
            |s: &StockState| {
                format!(
                    "Based on the investment strategy: {}, assess the potential risks involved.",
                    s.investment_strategy
                )
            },
            |s: &mut StockState, v| s.risk_assessments = v,
        ))
        .then(PromptStep::new(
            "finalize_recommendation",
            OutputMode::Plain,
            |s: &StockState| {
                format!(
                    "Summarize the stock analysis, investment strategy, and risk assessments into a final recommendation.\
                     Stock Analysis: {}\
                     Investment Strategy: {}\
                     Risk Assessments: {}",
                    s.stock_analysis, s.investment_strategy, s.risk_assessments
                )
            },
            |s: &mut StockState, v| s.final_recommendation = v,
        ))
}

/// Run the full chain for one sector
pub async fn run(llm: &dyn LLMClient, sector: &str) -> Result<StockState> {
    pipeline().run(llm, StockState::new(sector.trim())).await
}
