use serde::Serialize;

/// Outcome of one completed request attempt.
#[derive(Debug, Clone, Copy)]
pub struct Sample {
    pub latency_ms: f64,
    pub success: bool,
}

impl Sample {
    /// Classifies a response status: 2xx is success, anything else failure.
    #[must_use]
    pub const fn from_status(latency_ms: f64, status: u16) -> Self {
        Self {
            latency_ms,
            success: matches!(status, 200..=299),
        }
    }

    /// A request that never produced a status (transport or build error).
    #[must_use]
    pub const fn failure(latency_ms: f64) -> Self {
        Self {
            latency_ms,
            success: false,
        }
    }
}

/// Point-in-time statistical snapshot of a run.
#[derive(Debug, Clone, Serialize)]
pub struct MetricsReport {
    pub duration_secs: f64,
    pub total_requests: u64,
    pub successful_requests: u64,
    pub failed_requests: u64,
    pub success_rate: f64,
    pub average_tps: f64,
    pub peak_tps: f64,
    pub p75_ms: f64,
    pub p90_ms: f64,
    pub p99_ms: f64,
    pub p99_9_ms: f64,
    pub p99_99_ms: f64,
    pub min_latency_ms: f64,
    pub max_latency_ms: f64,
    pub avg_latency_ms: f64,
}
