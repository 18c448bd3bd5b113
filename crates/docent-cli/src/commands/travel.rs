//! Travel command

use super::value_or_prompt;
use crate::app::TravelArgs;
use anyhow::Result;
use docent_core::pipeline::travel;
use docent_core::{Config, OpenAIClient};

pub async fn run(args: TravelArgs, config: Config) -> Result<()> {
    let interest = value_or_prompt(args.interest, travel::INTEREST_PROMPT)?;
    let client = OpenAIClient::new(config.llm_service)?;

    let state = travel::run(&client, &interest).await?;

    println!("Final Travel Plan:");
    println!("{}", state.final_plan);
    Ok(())
}
