//! Chat command: index a document, then answer questions about it

use super::value_or_prompt;
use crate::app::ChatArgs;
use crate::progress::ProgressReporter;
use anyhow::Result;
use docent_core::{
    build_index, ingest_document, loader_for_path, run_session, Config, Embedder, HttpEmbedder,
    IndexProgress, IndexStore, OpenAIClient, QaEngine, Retriever, SegmentSplitter, Synthesizer,
};
use std::io;
use std::path::PathBuf;
use std::sync::Arc;

pub async fn run(args: ChatArgs, mut config: Config) -> Result<()> {
    if let Some(dir) = args.persist_dir {
        config.persist_dir = dir;
    }
    if let Some(k) = args.top_k {
        config.top_k = k;
    }
    config.validate()?;

    let path = match args.file {
        Some(path) => path,
        None => PathBuf::from(value_or_prompt(None, "Enter path to your PDF file: ")?),
    };

    let splitter = SegmentSplitter::new(config.chunk_size, config.chunk_overlap)?;
    let loader = loader_for_path(&path);
    let segments = ingest_document(loader.as_ref(), &path, &splitter)?;

    let embedder: Arc<dyn Embedder> = Arc::new(HttpEmbedder::new(&config.llm_service)?);

    let store = IndexStore::create(&config.persist_dir)?;
    let reporter = ProgressReporter::new("Embedding");
    let stats = build_index(
        &store,
        embedder.as_ref(),
        &segments,
        Some(Box::new(move |p: IndexProgress| {
            reporter.update(p.embedded_segments, p.total_segments)
        })),
    )
    .await?;
    reporter.finish(stats.embedded_segments);
    drop(store);

    println!(
        "Database created and saved in: {}",
        config.persist_dir.display()
    );

    let store = IndexStore::open(&config.persist_dir)?;
    let retriever = Retriever::new(store, embedder, config.top_k)?;
    let llm = Arc::new(OpenAIClient::new(config.llm_service.clone())?);
    let engine = QaEngine::new(retriever, Synthesizer::new(llm.clone()));

    let session = run_session(&engine, io::stdin().lock(), io::stdout().lock()).await?;

    let metrics = llm.metrics();
    tracing::info!(
        "Session over: {} answered, {} failed, {} LLM requests ({:.0}ms avg)",
        session.answered,
        session.failed,
        metrics.total_requests,
        metrics.avg_latency_ms
    );

    Ok(())
}
