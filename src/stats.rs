/// Generation statistics tracking
///
/// Tracks rows and bytes written per dataset plus wall-clock time, for the
/// completion log line and the summaries returned to the caller.

use std::time::{Duration, Instant};
use tracing::info;

#[derive(Debug, Clone)]
pub struct GenerationStats {
    start_time: Option<Instant>,
    elapsed: Option<Duration>,
    total_rows: u64,
    total_bytes: u64,
}

impl GenerationStats {
    pub fn new() -> Self {
        GenerationStats {
            start_time: None,
            elapsed: None,
            total_rows: 0,
            total_bytes: 0,
        }
    }

    /// Start the clock; only the first call counts
    pub fn start(&mut self) {
        if self.start_time.is_none() {
            self.start_time = Some(Instant::now());
        }
    }

    /// Record a data row written
    pub fn record_row(&mut self) {
        self.start();
        self.total_rows += 1;
    }

    pub fn set_bytes(&mut self, bytes: u64) {
        self.total_bytes = bytes;
    }

    /// Freeze elapsed time
    pub fn finish(&mut self) {
        if let Some(start) = self.start_time {
            self.elapsed = Some(start.elapsed());
        }
    }

    pub fn total_rows(&self) -> u64 {
        self.total_rows
    }

    pub fn total_bytes(&self) -> u64 {
        self.total_bytes
    }

    /// Elapsed since start, frozen once `finish` has been called
    pub fn elapsed(&self) -> Duration {
        match (self.elapsed, self.start_time) {
            (Some(elapsed), _) => elapsed,
            (None, Some(start)) => start.elapsed(),
            (None, None) => Duration::ZERO,
        }
    }

    pub fn rows_per_sec(&self) -> f64 {
        per_sec(self.total_rows, self.elapsed())
    }

    pub fn bytes_per_sec(&self) -> f64 {
        per_sec(self.total_bytes, self.elapsed())
    }

    pub fn log_summary(&self, file: &str) {
        info!(
            file,
            rows = self.total_rows,
            bytes = self.total_bytes,
            elapsed_ms = self.elapsed().as_millis() as u64,
            rows_per_sec = self.rows_per_sec() as u64,
            bytes_per_sec = self.bytes_per_sec() as u64,
            "dataset written"
        );
    }
}

impl Default for GenerationStats {
    fn default() -> Self {
        Self::new()
    }
}

fn per_sec(count: u64, elapsed: Duration) -> f64 {
    let secs = elapsed.as_secs_f64();
    if secs > 0.0 {
        count as f64 / secs
    } else {
        0.0
    }
}
