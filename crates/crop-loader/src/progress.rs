//! Progress sinks for bulk loads.

use std::sync::Mutex;
use std::time::{Duration, Instant};
use tracing::info;

/// Receiver of incremental load progress.
///
/// Called after every committed chunk with the cumulative number of inserted
/// records. Implementations must return quickly; anything expensive (UI
/// redraws, network pushes) should be buffered or throttled internally.
pub trait ProgressSink: Send + Sync {
    fn report(&self, completed: u64, total: u64);
}

impl<F> ProgressSink for F
where
    F: Fn(u64, u64) + Send + Sync,
{
    fn report(&self, completed: u64, total: u64) {
        self(completed, total)
    }
}

/// Discards all progress.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProgress;

impl ProgressSink for NoProgress {
    fn report(&self, _completed: u64, _total: u64) {}
}

/// Logs progress through `tracing`, at most once per interval.
///
/// The final report (`completed >= total`) is always logged.
#[derive(Debug)]
pub struct LogProgress {
    interval: Duration,
    last_logged: Mutex<Option<Instant>>,
}

impl LogProgress {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last_logged: Mutex::new(None),
        }
    }

    fn is_due(&self, completed: u64, total: u64) -> bool {
        let now = Instant::now();
        let mut last = self
            .last_logged
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        let due = completed >= total
            || last.map_or(true, |at| now.duration_since(at) >= self.interval);
        if due {
            *last = Some(now);
        }
        due
    }
}

impl Default for LogProgress {
    fn default() -> Self {
        Self::new(Duration::from_secs(1))
    }
}

impl ProgressSink for LogProgress {
    fn report(&self, completed: u64, total: u64) {
        if self.is_due(completed, total) {
            let percent = if total > 0 {
                completed as f64 * 100.0 / total as f64
            } else {
                100.0
            };
            info!("{} of {} records inserted ({:.1}%)", completed, total, percent);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[test]
    fn test_closure_sink() {
        let seen = Mutex::new(Vec::new());
        let sink = |completed: u64, total: u64| seen.lock().unwrap().push((completed, total));

        sink.report(10, 30);
        sink.report(20, 30);

        assert_eq!(*seen.lock().unwrap(), vec![(10, 30), (20, 30)]);
    }

    #[test]
    fn test_log_progress_throttles() {
        let sink = LogProgress::new(Duration::from_secs(3600));

        assert!(sink.is_due(1, 10));
        assert!(!sink.is_due(2, 10));
        assert!(!sink.is_due(9, 10));
        assert!(sink.is_due(10, 10));
    }

    #[test]
    fn test_log_progress_without_interval() {
        let sink = LogProgress::new(Duration::ZERO);
        assert!(sink.is_due(1, 10));
        assert!(sink.is_due(2, 10));
    }
}
