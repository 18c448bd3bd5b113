//! Travel planning pipeline
//!
//! suggest_destination -> plan_activities -> plan_food ->
//! create_packing_list -> best_time_to_visit -> finalize_plan

use super::{OutputMode, Pipeline, PromptStep};
use crate::error::Result;
use crate::llm::LLMClient;

pub const INTEREST_PROMPT: &str = "Enter your travel interest: ";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TravelState {
    pub interest: String,
    pub destination_suggestions: String,
    pub activity_planner: String,
    pub food_planner: String,
    pub packing_list: String,
    pub best_time_to_visit: String,
    pub final_plan: String,
}

impl TravelState {
    pub fn new(interest: impl Into<String>) -> Self {
        Self {
            interest: interest.into(),
            ..Default::default()
        }
    }
}

pub fn pipeline() -> Pipeline<TravelState> {
    Pipeline::new("travel")
        .then(PromptStep::new(
            "suggest_destination",
            OutputMode::Structured,
            |s: &TravelState| {
                format!(
                    "Suggest 3 travel destination for a person interested in {}.",
                    s.interest
                )
            },
            |s: &mut TravelState, v| s.destination_suggestions = v,
        ))
        .then(PromptStep::new(
            "plan_activities",
            OutputMode::Structured,
            |s: &TravelState| {
                format!(
                    "Based on the following travel destinations: {}, suggest a 3-day activity plan.",
                    s.destination_suggestions
                )
            },
            |s: &mut TravelState, v| s.activity_planner = v,
        ))
        .then(PromptStep::new(
            "plan_food",
            OutputMode::Structured,
            |s: &TravelState| {
                format!(
                    "Based on the following travel destinations: {}, suggest popular local foods to try.",
                    s.destination_suggestions
                )
            },
            |s: &mut TravelState, v| s.food_planner = v,
        ))
        .then(PromptStep::new(
            "create_packing_list",
            OutputMode::Structured,
            |s: &TravelState| {
                format!(
                    "Based on the following travel destinations: {}, suggest a packing list.",
                    s.destination_suggestions
                )
            },
            |s: &mut TravelState, v| s.packing_list = v,
        ))
        .then(PromptStep::new(
            "best_time_to_visit",
            OutputMode::Structured,
            |s: &TravelState| {
                format!(
                    "Based on the following travel destinations: {}, suggest the best time to visit.",
                    s.destination_suggestions
                )
            },
            |s: &mut TravelState, v| s.best_time_to_visit = v,
        ))
        .then(PromptStep::new(
            "finalize_plan",
            OutputMode::Raw,
            |s: &TravelState| {
                format!(
                    "Summarize the following travel suggestions and activity plans into a short friendly plan:\n\
                     Destinations: {}\nActivities: {}\nFood: {}\nPacking List: {}\nBest Time to Visit: {}",
                    s.destination_suggestions,
                    s.activity_planner,
                    s.food_planner,
                    s.packing_list,
                    s.best_time_to_visit
                )
            },
            |s: &mut TravelState, v| s.final_plan = v,
        ))
}

/// Run the full chain for one interest
pub async fn run(llm: &dyn LLMClient, interest: &str) -> Result<TravelState> {
    pipeline().run(llm, TravelState::new(interest.trim())).await
}
