// file: src/pipeline/progress.rs
// description: progress reporting and per-query statistics
// reference: uses indicatif for progress bars

use indicatif::{ProgressBar, ProgressStyle};
use std::sync::atomic::{AtomicUsize, Ordering};

/// Summary of one query's trip through the retrieval pipeline.
#[derive(Debug, Clone, Default)]
pub struct RetrievalStats {
    pub urls_discovered: usize,
    pub documents_fetched: usize,
    pub fetch_failures: usize,
    pub documents_indexed: usize,
    pub duration_ms: u64,
}

impl RetrievalStats {
    pub fn fetch_success_rate(&self) -> f64 {
        let total = self.documents_fetched + self.fetch_failures;
        if total == 0 {
            return 0.0;
        }
        (self.documents_fetched as f64 / total as f64) * 100.0
    }
}

/// Progress bar over the fetch stage, the only long-running part of a query.
pub struct ProgressTracker {
    bar: ProgressBar,
    fetched: AtomicUsize,
    failed: AtomicUsize,
}

impl ProgressTracker {
    pub fn new(total_urls: usize) -> Self {
        Self::with_color(total_urls, true)
    }

    pub fn with_color(total_urls: usize, colored: bool) -> Self {
        let bar = ProgressBar::new(total_urls as u64);
        let template = if colored {
            "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}"
        } else {
            "{spinner} [{elapsed_precise}] [{bar:40}] {pos}/{len} {msg}"
        };
        bar.set_style(
            ProgressStyle::default_bar()
                .template(template)
                .expect("Failed to create progress bar template")
                .progress_chars("█▓▒░"),
        );
        bar.set_message("fetching sources");

        Self {
            bar,
            fetched: AtomicUsize::new(0),
            failed: AtomicUsize::new(0),
        }
    }

    pub fn inc_fetched(&self) {
        self.fetched.fetch_add(1, Ordering::SeqCst);
        self.bar.inc(1);
    }

    pub fn inc_failed(&self) {
        let failed = self.failed.fetch_add(1, Ordering::SeqCst) + 1;
        self.bar.inc(1);
        self.bar.set_message(format!("fetching sources ({} failed)", failed));
    }

    pub fn fetched(&self) -> usize {
        self.fetched.load(Ordering::SeqCst)
    }

    pub fn failed(&self) -> usize {
        self.failed.load(Ordering::SeqCst)
    }

    pub fn finish(&self) {
        self.bar.finish_and_clear();
    }
}

impl Drop for ProgressTracker {
    fn drop(&mut self) {
        self.finish();
    }
}
