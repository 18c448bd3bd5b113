//! Progress reporting for indexing

use std::io::{self, Write};

/// Single-line progress on stderr
#[derive(Clone, Copy)]
pub struct ProgressReporter {
    label: &'static str,
}

impl ProgressReporter {
    pub fn new(label: &'static str) -> Self {
        Self { label }
    }

    pub fn update(&self, processed: usize, total: usize) {
        let pct = if total > 0 {
            processed as f64 / total as f64 * 100.0
        } else {
            100.0
        };
        eprint!("\r{}: {}/{} ({:.0}%)   ", self.label, processed, total, pct);
        io::stderr().flush().ok();
    }

    pub fn finish(&self, total: usize) {
        eprintln!("\r{}: done ({})                    ", self.label, total);
    }
}
