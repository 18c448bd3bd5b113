//! Sliding-window segmentation of page text

use super::loader::{DocumentLoader, Page};
use crate::error::{DocentError, Result};
use std::path::Path;

/// Default window length in bytes
pub const CHUNK_SIZE_CHARS: usize = 800;
/// Default overlap between consecutive windows in bytes
pub const CHUNK_OVERLAP_CHARS: usize = 100;

/// A bounded span of source text used as one retrieval unit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub text: String,
    /// Document the segment came from
    pub source: String,
    /// 1-based page number
    pub page: u32,
    /// Byte offset of the segment within its page
    pub position: usize,
}

/// Fixed-size sliding window splitter
#[derive(Debug, Clone, Copy)]
pub struct SegmentSplitter {
    chunk_size: usize,
    chunk_overlap: usize,
}

impl Default for SegmentSplitter {
    fn default() -> Self {
        Self {
            chunk_size: CHUNK_SIZE_CHARS,
            chunk_overlap: CHUNK_OVERLAP_CHARS,
        }
    }
}

impl SegmentSplitter {
    pub fn new(chunk_size: usize, chunk_overlap: usize) -> Result<Self> {
        if chunk_size == 0 || chunk_overlap >= chunk_size {
            return Err(DocentError::Config(format!(
                "invalid splitter geometry: size {} overlap {}",
                chunk_size, chunk_overlap
            )));
        }
        Ok(Self {
            chunk_size,
            chunk_overlap,
        })
    }

    /// Split one page into segments with whitespace trimmed from both edges
    ///
    /// `position` points at the first byte kept after trimming. Windows that
    /// are whitespace only are dropped.
    pub fn split_page(&self, source: &str, page: &Page) -> Vec<Segment> {
        split_windows(&page.text, self.chunk_size, self.chunk_overlap)
            .into_iter()
            .filter_map(|(position, window)| {
                let text = window.trim();
                if text.is_empty() {
                    return None;
                }
                let leading = window.len() - window.trim_start().len();
                Some(Segment {
                    text: text.to_string(),
                    source: source.to_string(),
                    page: page.number,
                    position: position + leading,
                })
            })
            .collect()
    }

    /// Split pages in order
    pub fn split_pages(&self, source: &str, pages: &[Page]) -> Vec<Segment> {
        let mut segments = Vec::new();
        for page in pages {
            if page.text.trim().is_empty() {
                tracing::warn!("Skipping page {} of {}: no text", page.number, source);
                continue;
            }
            segments.extend(self.split_page(source, page));
        }
        segments
    }
}

/// Load a document and split it into segments
pub fn ingest_document(
    loader: &dyn DocumentLoader,
    path: &Path,
    splitter: &SegmentSplitter,
) -> Result<Vec<Segment>> {
    let pages = loader.load(path)?;
    let source = path.to_string_lossy();
    let segments = splitter.split_pages(&source, &pages);

    if segments.is_empty() {
        return Err(DocentError::unreadable(
            path,
            "document contains no extractable text (may be image-based)",
        ));
    }

    tracing::info!(
        "Split {:?} into {} segments across {} pages",
        path,
        segments.len(),
        pages.len()
    );

    Ok(segments)
}

/// Find a valid char boundary at or before the given byte index
fn floor_char_boundary(s: &str, index: usize) -> usize {
    if index >= s.len() {
        return s.len();
    }
    let mut i = index;
    while i > 0 && !s.is_char_boundary(i) {
        i -= 1;
    }
    i
}

/// Find a valid char boundary at or after the given byte index
fn ceil_char_boundary(s: &str, index: usize) -> usize {
    if index >= s.len() {
        return s.len();
    }
    let mut i = index;
    while i < s.len() && !s.is_char_boundary(i) {
        i += 1;
    }
    i
}

/// Cut `content` into `(offset, window)` pairs covering every byte
fn split_windows(content: &str, chunk_size: usize, overlap: usize) -> Vec<(usize, &str)> {
    if content.len() <= chunk_size {
        return vec![(0, content)];
    }

    let mut windows = Vec::new();
    let mut start = 0;

    while start < content.len() {
        let raw_end = (start + chunk_size).min(content.len());
        let mut end = floor_char_boundary(content, raw_end);
        if end <= start {
            // window narrower than one char
            end = ceil_char_boundary(content, start + 1);
        }
        let mut chunk_end = end;

        // Find natural break point in last 30%
        if end < content.len() {
            let search_start_raw = start + (chunk_size * 70 / 100);
            let search_start = ceil_char_boundary(content, search_start_raw.max(start + 1));

            if search_start < end {
                let search_region = &content[search_start..end];

                if let Some(pos) = search_region.rfind("\n\n") {
                    chunk_end = search_start + pos + 2;
                } else if let Some(pos) = search_region.rfind(". ") {
                    chunk_end = search_start + pos + 2;
                } else if let Some(pos) = search_region.rfind('\n') {
                    chunk_end = search_start + pos + 1;
                } else if let Some(pos) = search_region.rfind(' ') {
                    chunk_end = search_start + pos + 1;
                }
            }
        }

        chunk_end = floor_char_boundary(content, chunk_end);
        windows.push((start, &content[start..chunk_end]));

        if chunk_end >= content.len() {
            break;
        }

        let next_start = ceil_char_boundary(content, chunk_end.saturating_sub(overlap));
        start = if next_start > start { next_start } else { chunk_end };
    }

    windows
}
