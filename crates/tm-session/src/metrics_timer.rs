use crate::Metrics;

use std::time::Instant;

/// Times one profile resolution
pub struct MetricsTimer {
    start: Instant,
    metrics: Metrics,
}

impl MetricsTimer {
    pub fn new(metrics: Metrics) -> Self {
        Self {
            start: Instant::now(),
            metrics,
        }
    }

    pub fn finish(self) {
        self.metrics.resolution_latency(self.start.elapsed());
    }
}
