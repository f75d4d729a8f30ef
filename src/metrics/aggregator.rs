use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use super::percentile::percentile;
use super::report::{MetricsReport, Sample};

/// Shared aggregate state every worker records into.
///
/// Counters are relaxed atomics, min/max run compare-exchange retry loops
/// over f64 bit-patterns, and the latency collection and per-second buckets
/// sit behind their own short-lived mutexes. Nothing here can make one
/// worker wait on another beyond an O(1) critical section, and `record`
/// cannot fail.
pub struct MetricsAggregator {
    total: AtomicU64,
    successes: AtomicU64,
    failures: AtomicU64,
    min_latency_bits: AtomicU64,
    max_latency_bits: AtomicU64,
    latencies: Mutex<Vec<f64>>,
    per_second: Mutex<HashMap<i64, u64>>,
}

impl MetricsAggregator {
    #[must_use]
    pub fn new() -> Self {
        Self {
            total: AtomicU64::new(0),
            successes: AtomicU64::new(0),
            failures: AtomicU64::new(0),
            min_latency_bits: AtomicU64::new(f64::INFINITY.to_bits()),
            max_latency_bits: AtomicU64::new(0.0f64.to_bits()),
            latencies: Mutex::new(Vec::new()),
            per_second: Mutex::new(HashMap::new()),
        }
    }

    /// Records one completed request attempt.
    pub fn record(&self, sample: Sample) {
        self.total.fetch_add(1, Ordering::Relaxed);
        if sample.success {
            self.successes.fetch_add(1, Ordering::Relaxed);
        } else {
            self.failures.fetch_add(1, Ordering::Relaxed);
        }

        update_min(&self.min_latency_bits, sample.latency_ms);
        update_max(&self.max_latency_bits, sample.latency_ms);

        match self.latencies.lock() {
            Ok(mut guard) => guard.push(sample.latency_ms),
            Err(poisoned) => poisoned.into_inner().push(sample.latency_ms),
        }

        let second = chrono::Utc::now().timestamp();
        let mut buckets = match self.per_second.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        let counter = buckets.entry(second).or_insert(0);
        *counter = counter.saturating_add(1);
    }

    /// Running request count, for interim progress reporting.
    #[must_use]
    pub fn total_requests(&self) -> u64 {
        self.total.load(Ordering::Relaxed)
    }

    /// Computes the statistical report over everything recorded so far.
    ///
    /// Safe to call while `record` calls are in flight; the report reflects
    /// at least every sample recorded before the call began. Percentiles are
    /// computed over a sorted copy of the complete latency collection.
    #[must_use]
    pub fn snapshot(&self, elapsed: Duration) -> MetricsReport {
        let successes = self.successes.load(Ordering::Relaxed);
        let failures = self.failures.load(Ordering::Relaxed);
        let total = successes.saturating_add(failures);

        let mut values = match self.latencies.lock() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        };
        values.sort_by(f64::total_cmp);

        let sum: f64 = values.iter().sum();
        let avg_latency_ms = if values.is_empty() {
            0.0
        } else {
            sum / (values.len() as f64)
        };

        let (min_latency_ms, max_latency_ms) = if total == 0 {
            (0.0, 0.0)
        } else {
            (
                f64::from_bits(self.min_latency_bits.load(Ordering::Relaxed)),
                f64::from_bits(self.max_latency_bits.load(Ordering::Relaxed)),
            )
        };

        let duration_secs = elapsed.as_secs_f64();
        let average_tps = if duration_secs > 0.0 && total > 0 {
            (total as f64) / duration_secs
        } else {
            0.0
        };
        let peak = match self.per_second.lock() {
            Ok(guard) => guard.values().max().copied().unwrap_or(0),
            Err(poisoned) => poisoned.into_inner().values().max().copied().unwrap_or(0),
        };

        let success_rate = if total == 0 {
            0.0
        } else {
            (successes as f64) * 100.0 / (total as f64)
        };

        MetricsReport {
            duration_secs,
            total_requests: total,
            successful_requests: successes,
            failed_requests: failures,
            success_rate,
            average_tps,
            peak_tps: peak as f64,
            p75_ms: percentile(&values, 75.0),
            p90_ms: percentile(&values, 90.0),
            p99_ms: percentile(&values, 99.0),
            p99_9_ms: percentile(&values, 99.9),
            p99_99_ms: percentile(&values, 99.99),
            min_latency_ms,
            max_latency_ms,
            avg_latency_ms,
        }
    }
}

impl Default for MetricsAggregator {
    fn default() -> Self {
        Self::new()
    }
}

fn update_min(cell: &AtomicU64, value: f64) {
    let mut current = cell.load(Ordering::Relaxed);
    loop {
        if f64::from_bits(current) <= value {
            break;
        }
        match cell.compare_exchange_weak(
            current,
            value.to_bits(),
            Ordering::Relaxed,
            Ordering::Relaxed,
        ) {
            Ok(_) => break,
            Err(observed) => current = observed,
        }
    }
}

fn update_max(cell: &AtomicU64, value: f64) {
    let mut current = cell.load(Ordering::Relaxed);
    loop {
        if f64::from_bits(current) >= value {
            break;
        }
        match cell.compare_exchange_weak(
            current,
            value.to_bits(),
            Ordering::Relaxed,
            Ordering::Relaxed,
        ) {
            Ok(_) => break,
            Err(observed) => current = observed,
        }
    }
}
