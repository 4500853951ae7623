use std::sync::Mutex;

/// Counters describing how the event stream has been handled.
pub struct MetricsRecorder {
    inner: Mutex<Metrics>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MetricsSnapshot {
    pub processed: usize,
    pub rejected: usize,
    pub reprojections: usize,
}

#[derive(Default)]
struct Metrics {
    processed: usize,
    rejected: usize,
    reprojections: usize,
}

impl MetricsRecorder {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Metrics::default()),
        }
    }

    pub fn record_processed(&self) {
        if let Ok(mut metrics) = self.inner.lock() {
            metrics.processed += 1;
        }
    }

    pub fn record_rejected(&self) {
        if let Ok(mut metrics) = self.inner.lock() {
            metrics.rejected += 1;
        }
    }

    pub fn record_reprojection(&self) {
        if let Ok(mut metrics) = self.inner.lock() {
            metrics.reprojections += 1;
        }
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        if let Ok(metrics) = self.inner.lock() {
            MetricsSnapshot {
                processed: metrics.processed,
                rejected: metrics.rejected,
                reprojections: metrics.reprojections,
            }
        } else {
            MetricsSnapshot::default()
        }
    }
}

impl Default for MetricsRecorder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counters_accumulate() {
        let metrics = MetricsRecorder::new();
        metrics.record_processed();
        metrics.record_processed();
        metrics.record_rejected();
        metrics.record_reprojection();
        assert_eq!(
            metrics.snapshot(),
            MetricsSnapshot {
                processed: 2,
                rejected: 1,
                reprojections: 1,
            }
        );
    }
}
