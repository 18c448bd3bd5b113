//! End-to-end tests for ingest -> index -> retrieve -> answer

mod common;

use common::{BagOfWordsEmbedder, FailingLlm, RecordingLlm, UnreachableEmbedder};
use docent_core::qa::FAREWELL;
use docent_core::{
    build_index, ingest_document, loader_for_path, run_session, DocentError, Embedder,
    IndexProgress, IndexStore, QaEngine, Retriever, SegmentSplitter, Synthesizer,
};
use std::fs;
use std::io::Cursor;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tempfile::TempDir;

const FACTS: &[&str] = &[
    "The capital of France is Paris.",
    "Bananas are rich in potassium and grow in tropical climates.",
    "Rust guarantees memory safety without a garbage collector.",
    "The Pacific Ocean is the largest ocean on Earth.",
    "Photosynthesis converts sunlight into chemical energy in plants.",
];

fn write_doc(dir: &Path, pages: &[&str]) -> std::path::PathBuf {
    let path = dir.join("facts.txt");
    fs::write(&path, pages.join("\x0c")).unwrap();
    path
}

async fn build_store(doc: &Path, persist_dir: &Path) -> IndexStore {
    let splitter = SegmentSplitter::default();
    let segments = ingest_document(loader_for_path(doc).as_ref(), doc, &splitter).unwrap();
    let store = IndexStore::create(persist_dir).unwrap();
    build_index(&store, &BagOfWordsEmbedder, &segments, None)
        .await
        .unwrap();
    drop(store);
    IndexStore::open(persist_dir).unwrap()
}

fn retriever(store: IndexStore, k: usize) -> Retriever {
    let embedder: Arc<dyn Embedder> = Arc::new(BagOfWordsEmbedder);
    Retriever::new(store, embedder, k).unwrap()
}

#[tokio::test]
async fn test_exact_segment_text_ranks_first() {
    let temp = TempDir::new().unwrap();
    let doc = write_doc(temp.path(), FACTS);
    let store = build_store(&doc, &temp.path().join("store")).await;
    let retriever = retriever(store, 3);

    for fact in FACTS {
        let results = retriever.retrieve(fact).await.unwrap();
        assert_eq!(results[0].segment.text, *fact);
        assert!(results[0].score > 0.99);
        for pair in results.windows(2) {
            assert!(pair[0].score >= pair[1].score);
        }
    }
}

#[tokio::test]
async fn test_fewer_entries_than_k() {
    let temp = TempDir::new().unwrap();
    let doc = write_doc(temp.path(), &FACTS[..2]);
    let store = build_store(&doc, &temp.path().join("store")).await;
    assert_eq!(store.count_entries().unwrap(), 2);

    let results = retriever(store, 5).retrieve("anything at all").await.unwrap();
    assert_eq!(results.len(), 2);
}

#[tokio::test]
async fn test_empty_index_returns_nothing() {
    let temp = TempDir::new().unwrap();
    let store = IndexStore::create(temp.path()).unwrap();
    let results = retriever(store, 3).retrieve("hello").await.unwrap();
    assert!(results.is_empty());
}

#[tokio::test]
async fn test_rebuild_into_fresh_directory_is_equivalent() {
    let temp = TempDir::new().unwrap();
    let doc = write_doc(temp.path(), FACTS);

    let first = build_store(&doc, &temp.path().join("first")).await;
    let second = build_store(&doc, &temp.path().join("second")).await;
    assert_eq!(first.chunk_hashes().unwrap(), second.chunk_hashes().unwrap());

    let first = retriever(first, 3);
    let second = retriever(second, 3);
    for query in ["Which ocean is largest?", "memory safety", "plants and sunlight"] {
        let a: Vec<String> = first
            .retrieve(query)
            .await
            .unwrap()
            .into_iter()
            .map(|s| s.segment.text)
            .collect();
        let b: Vec<String> = second
            .retrieve(query)
            .await
            .unwrap()
            .into_iter()
            .map(|s| s.segment.text)
            .collect();
        assert_eq!(a, b);
    }
}

#[tokio::test]
async fn test_create_replaces_previous_index() {
    let temp = TempDir::new().unwrap();
    let doc = write_doc(temp.path(), FACTS);
    let persist_dir = temp.path().join("store");

    build_store(&doc, &persist_dir).await;
    let store = build_store(&doc, &persist_dir).await;
    assert_eq!(store.count_entries().unwrap(), FACTS.len());
}

#[tokio::test]
async fn test_capital_of_france_end_to_end() {
    let temp = TempDir::new().unwrap();
    let doc = write_doc(temp.path(), &["The capital of France is Paris."]);
    let store = build_store(&doc, &temp.path().join("store")).await;

    let llm = Arc::new(RecordingLlm::new("Paris."));
    let engine = QaEngine::new(retriever(store, 3), Synthesizer::new(llm.clone()));

    let exchange = engine.ask("What is the capital of France?").await.unwrap();
    assert_eq!(exchange.segments.len(), 1);
    assert_eq!(
        exchange.segments[0].segment.text,
        "The capital of France is Paris."
    );
    assert_eq!(exchange.answer, "Paris.");

    let prompts = llm.prompts();
    assert_eq!(prompts.len(), 1);
    assert!(prompts[0].contains("What is the capital of France?"));
    assert!(prompts[0].contains("The capital of France is Paris."));
    assert_eq!(prompts[0], exchange.prompt);
}

#[tokio::test]
async fn test_relevant_segment_leads_the_context() {
    let temp = TempDir::new().unwrap();
    let doc = write_doc(temp.path(), FACTS);
    let store = build_store(&doc, &temp.path().join("store")).await;

    let llm = Arc::new(RecordingLlm::new("Paris."));
    let engine = QaEngine::new(retriever(store, 2), Synthesizer::new(llm.clone()));
    let exchange = engine.ask("What is the capital of France?").await.unwrap();

    assert_eq!(exchange.segments.len(), 2);
    let context_start = exchange.prompt.find("Context:\n").unwrap() + "Context:\n".len();
    assert!(exchange.prompt[context_start..].starts_with("The capital of France is Paris.\n\n"));
}

#[tokio::test]
async fn test_session_answers_until_exit() {
    let temp = TempDir::new().unwrap();
    let doc = write_doc(temp.path(), FACTS);
    let store = build_store(&doc, &temp.path().join("store")).await;

    let llm = Arc::new(RecordingLlm::new("It is Paris."));
    let engine = QaEngine::new(retriever(store, 3), Synthesizer::new(llm.clone()));

    let input = Cursor::new("hello\n\n   \nWhat is the capital of France?\n  QUIT  \nnever asked\n");
    let mut output = Vec::new();
    let stats = run_session(&engine, input, &mut output).await.unwrap();

    assert_eq!(stats.answered, 2);
    assert_eq!(stats.failed, 0);
    assert_eq!(llm.prompts().len(), 2);
    assert!(llm.prompts()[0].contains("Question: hello\n"));

    let printed = String::from_utf8(output).unwrap();
    assert_eq!(printed.matches("Answer:\nIt is Paris.").count(), 2);
    assert!(printed.trim_end().ends_with(FAREWELL));
}

#[tokio::test]
async fn test_session_survives_llm_failures() {
    let temp = TempDir::new().unwrap();
    let doc = write_doc(temp.path(), FACTS);
    let store = build_store(&doc, &temp.path().join("store")).await;

    let engine = QaEngine::new(retriever(store, 3), Synthesizer::new(Arc::new(FailingLlm)));

    let input = Cursor::new("first question\nsecond question\nexit\n");
    let mut output = Vec::new();
    let stats = run_session(&engine, input, &mut output).await.unwrap();

    assert_eq!(stats.failed, 2);
    let printed = String::from_utf8(output).unwrap();
    assert_eq!(
        printed
            .matches("Error: LLM provider error: HTTP 401 Unauthorized")
            .count(),
        2
    );
    assert!(printed.contains(FAREWELL));
}

#[tokio::test]
async fn test_session_ends_on_eof() {
    let store = IndexStore::open_in_memory().unwrap();
    let llm = Arc::new(RecordingLlm::new("unused"));
    let engine = QaEngine::new(retriever(store, 3), Synthesizer::new(llm.clone()));

    let mut output = Vec::new();
    let stats = run_session(&engine, Cursor::new("exit"), &mut output)
        .await
        .unwrap();
    assert_eq!(stats.answered, 0);
    assert!(llm.prompts().is_empty());

    let mut output = Vec::new();
    run_session(&engine, Cursor::new(""), &mut output).await.unwrap();
    assert!(String::from_utf8(output).unwrap().contains(FAREWELL));
}

#[tokio::test]
async fn test_progress_reports_every_batch() {
    let temp = TempDir::new().unwrap();
    let text = (0..100)
        .map(|i| format!("Sentence number {} talks about topic {}.", i, i * 7))
        .collect::<Vec<_>>()
        .join(" ");
    let doc = write_doc(temp.path(), &[text.as_str()]);

    let splitter = SegmentSplitter::new(120, 20).unwrap();
    let segments = ingest_document(loader_for_path(&doc).as_ref(), &doc, &splitter).unwrap();
    assert!(segments.len() > 32);

    let calls = Arc::new(AtomicUsize::new(0));
    let seen = calls.clone();
    let store = IndexStore::create(temp.path().join("store")).unwrap();
    let stats = build_index(
        &store,
        &BagOfWordsEmbedder,
        &segments,
        Some(Box::new(move |p: IndexProgress| {
            seen.fetch_add(1, Ordering::SeqCst);
            assert!(p.embedded_segments <= p.total_segments);
        })),
    )
    .await
    .unwrap();

    assert_eq!(stats.embedded_segments, segments.len());
    assert_eq!(stats.batches, segments.len().div_ceil(32));
    assert_eq!(calls.load(Ordering::SeqCst), stats.batches);
    assert_eq!(stats.dimensions, common::DIMS);
    assert_eq!(store.model_dimensions("bag-of-words").unwrap(), Some(common::DIMS));
}

#[tokio::test]
async fn test_unreachable_embedder_fails_indexing() {
    let temp = TempDir::new().unwrap();
    let doc = write_doc(temp.path(), FACTS);
    let segments =
        ingest_document(loader_for_path(&doc).as_ref(), &doc, &SegmentSplitter::default())
            .unwrap();

    let store = IndexStore::create(temp.path().join("store")).unwrap();
    let err = build_index(&store, &UnreachableEmbedder, &segments, None)
        .await
        .unwrap_err();
    assert!(matches!(err, DocentError::EmbeddingProvider(_)));
    assert_eq!(store.count_entries().unwrap(), 0);
}

#[test]
fn test_missing_store_is_unavailable() {
    let temp = TempDir::new().unwrap();
    let err = IndexStore::open(temp.path()).err().unwrap();
    assert!(matches!(err, DocentError::IndexUnavailable { .. }));
}

#[test]
fn test_blank_document_is_unreadable() {
    let temp = TempDir::new().unwrap();
    let doc = write_doc(temp.path(), &["   ", "\n\n"]);
    let err = ingest_document(loader_for_path(&doc).as_ref(), &doc, &SegmentSplitter::default())
        .unwrap_err();
    assert!(matches!(err, DocentError::UnreadableDocument { .. }));
}

#[test]
fn test_zero_k_rejected() {
    let store = IndexStore::open_in_memory().unwrap();
    let embedder: Arc<dyn Embedder> = Arc::new(BagOfWordsEmbedder);
    assert!(matches!(
        Retriever::new(store, embedder, 0),
        Err(DocentError::InvalidInput(_))
    ));
}
