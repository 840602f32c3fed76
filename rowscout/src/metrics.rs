use tracing::{debug, info};

use crate::results::ScanStats;

/// Counts what a single scan did with each row it read.
///
/// A scan is single-threaded and owns its metrics, so these are plain counters.
#[derive(Debug, Default, Clone)]
pub struct ScanMetrics {
    rows_read: u64,
    empty_rows_skipped: u64,
    count_only_rows: u64,
    early_exit: bool,
}

impl ScanMetrics {
    /// Creates a new ScanMetrics instance
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a data row pulled from the source (the header is not counted)
    pub fn record_row(&mut self) {
        self.rows_read += 1;
    }

    /// Records a structurally empty row that was skipped
    pub fn record_empty_row(&mut self) {
        self.empty_rows_skipped += 1;
    }

    /// Records the switch into count-only mode
    pub fn record_early_exit(&mut self, after_rows: u64) {
        if !self.early_exit {
            self.early_exit = true;
            debug!("Page window filled after {} rows, counting remaining matches only", after_rows);
        }
    }

    /// Records a row evaluated in count-only mode
    pub fn record_count_only_row(&mut self) {
        self.count_only_rows += 1;
    }

    pub fn rows_read(&self) -> u64 {
        self.rows_read
    }

    /// Gets the collected statistics
    pub fn get_stats(&self) -> ScanStats {
        ScanStats {
            rows_read: self.rows_read,
            empty_rows_skipped: self.empty_rows_skipped,
            count_only_rows: self.count_only_rows,
            early_exit: self.early_exit,
        }
    }

    /// Logs the collected statistics
    pub fn log_stats(&self) {
        info!(
            "Scan stats: rows read: {}, empty rows skipped: {}, rows counted only: {}, early exit: {}",
            self.rows_read, self.empty_rows_skipped, self.count_only_rows, self.early_exit
        );
    }
}
