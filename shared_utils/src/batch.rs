//! Batch Processing Module
//!
//! Per-file bookkeeping for a batch run: counts and the errors collected
//! when the run continues past failures.

use serde::Serialize;
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize)]
pub struct BatchResult {
    pub total: usize,
    pub succeeded: usize,
    pub failed: usize,
    pub skipped: usize,
    pub errors: Vec<(PathBuf, String)>,
    /// Bytes read by successful conversions
    pub input_bytes: u64,
    /// Bytes written by successful conversions
    pub output_bytes: u64,
}

impl BatchResult {
    pub fn new() -> Self {
        Self {
            total: 0,
            succeeded: 0,
            failed: 0,
            skipped: 0,
            errors: Vec::new(),
            input_bytes: 0,
            output_bytes: 0,
        }
    }

    pub fn success(&mut self) {
        self.total += 1;
        self.succeeded += 1;
    }

    /// Count one failed file. A file with several failing steps is still
    /// one file: pass every error message for it at once.
    pub fn fail(&mut self, path: PathBuf, errors: Vec<String>) {
        self.total += 1;
        self.failed += 1;
        self.errors
            .extend(errors.into_iter().map(|error| (path.clone(), error)));
    }

    pub fn skip(&mut self) {
        self.total += 1;
        self.skipped += 1;
    }

    pub fn add_sizes(&mut self, input_bytes: u64, output_bytes: u64) {
        self.input_bytes += input_bytes;
        self.output_bytes += output_bytes;
    }

    pub fn has_failures(&self) -> bool {
        self.failed > 0
    }

    pub fn success_rate(&self) -> f64 {
        if self.total == 0 {
            100.0
        } else {
            (self.succeeded as f64 / self.total as f64) * 100.0
        }
    }
}

impl Default for BatchResult {
    fn default() -> Self {
        Self::new()
    }
}
