//! Document loading
//!
//! Turns a file on disk into an ordered list of pages. PDF parsing is
//! delegated to `pdf-extract`; everything else is read as UTF-8 text with
//! form feeds marking page breaks.

use crate::error::{DocentError, Result};
use std::fs;
use std::path::Path;

/// One page of extracted source text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    /// 1-based page number within the source document
    pub number: u32,
    pub text: String,
}

/// Source of ordered pages for a document path
pub trait DocumentLoader: Send + Sync {
    /// Loader type identifier (e.g., "pdf", "text")
    fn loader_type(&self) -> &'static str;

    /// Load all pages of the document in source order
    fn load(&self, path: &Path) -> Result<Vec<Page>>;
}

/// Pick a loader from the file extension
pub fn loader_for_path(path: &Path) -> Box<dyn DocumentLoader> {
    let is_pdf = path
        .extension()
        .map(|ext| ext.eq_ignore_ascii_case("pdf"))
        .unwrap_or(false);
    if is_pdf {
        Box::new(PdfLoader::new())
    } else {
        Box::new(TextLoader::new())
    }
}

fn read_bytes(path: &Path) -> Result<Vec<u8>> {
    fs::read(path).map_err(|e| DocentError::unreadable(path, e.to_string()))
}

/// Loader for PDF files
#[derive(Debug, Default)]
pub struct PdfLoader;

impl PdfLoader {
    pub fn new() -> Self {
        Self
    }
}

impl DocumentLoader for PdfLoader {
    fn loader_type(&self) -> &'static str {
        "pdf"
    }

    fn load(&self, path: &Path) -> Result<Vec<Page>> {
        let bytes = read_bytes(path)?;

        let texts = pdf_extract::extract_text_from_mem_by_pages(&bytes).map_err(|e| {
            DocentError::unreadable(path, format!("failed to extract text from PDF: {}", e))
        })?;

        tracing::debug!("Extracted {} pages from {:?}", texts.len(), path);

        Ok(numbered_pages(texts))
    }
}

/// Loader for plain text and markdown files
#[derive(Debug, Default)]
pub struct TextLoader;

impl TextLoader {
    pub fn new() -> Self {
        Self
    }
}

impl DocumentLoader for TextLoader {
    fn loader_type(&self) -> &'static str {
        "text"
    }

    fn load(&self, path: &Path) -> Result<Vec<Page>> {
        let bytes = read_bytes(path)?;
        let text = String::from_utf8(bytes)
            .map_err(|_| DocentError::unreadable(path, "file is not valid UTF-8 text"))?;

        Ok(numbered_pages(text.split('\x0c').map(str::to_string)))
    }
}

fn numbered_pages(texts: impl IntoIterator<Item = String>) -> Vec<Page> {
    texts
        .into_iter()
        .enumerate()
        .map(|(idx, text)| Page {
            number: idx as u32 + 1,
            text,
        })
        .collect()
}
