//! Stock command

use super::value_or_prompt;
use crate::app::StockArgs;
use anyhow::Result;
use docent_core::pipeline::stock;
use docent_core::{Config, OpenAIClient};

pub async fn run(args: StockArgs, config: Config) -> Result<()> {
    let sector = value_or_prompt(args.sector, stock::SECTOR_PROMPT)?;
    let client = OpenAIClient::new(config.llm_service)?;

    let state = stock::run(&client, &sector).await?;

    println!("Final Stock Recommendation:");
    println!("{}", state.final_recommendation);
    Ok(())
}
