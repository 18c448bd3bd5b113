//! CLI argument definitions

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "docent")]
#[command(
    author,
    version,
    about = "Ask questions about a PDF, or run the stock and travel advisors"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file (defaults to the user config directory)
    #[arg(long, global = true, env = "DOCENT_CONFIG")]
    pub config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Index a document and answer questions about it
    Chat(ChatArgs),

    /// Stock market recommendation for a sector
    Stock(StockArgs),

    /// Travel plan for an interest
    Travel(TravelArgs),
}

#[derive(Args)]
pub struct ChatArgs {
    /// Document to index (prompted for when omitted)
    #[arg(short, long)]
    pub file: Option<PathBuf>,

    /// Directory for the persisted index
    #[arg(long)]
    pub persist_dir: Option<PathBuf>,

    /// Segments retrieved per question
    #[arg(short = 'k', long)]
    pub top_k: Option<usize>,
}

#[derive(Args)]
pub struct StockArgs {
    /// Sector of interest (prompted for when omitted)
    #[arg(long)]
    pub sector: Option<String>,
}

#[derive(Args)]
pub struct TravelArgs {
    /// Travel interest (prompted for when omitted)
    #[arg(long)]
    pub interest: Option<String>,
}
