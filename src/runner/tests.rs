use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use tokio::time::sleep;

use super::*;
use crate::curl::{self, ResolvedRequest};
use crate::error::{AppError, ConfigError, HttpError};
use crate::http::Transport;

fn run_async_test<F>(future: F) -> Result<(), String>
where
    F: Future<Output = Result<(), String>>,
{
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(2)
        .enable_all()
        .build()
        .map_err(|err| format!("Failed to build runtime: {}", err))?;
    runtime.block_on(future)
}

/// Transport that answers with a fixed status after a fixed latency and
/// counts how often it was driven.
struct FixedTransport {
    latency: Duration,
    status: u16,
    calls: AtomicU64,
}

impl FixedTransport {
    fn new(latency: Duration, status: u16) -> Arc<Self> {
        Arc::new(Self {
            latency,
            status,
            calls: AtomicU64::new(0),
        })
    }

    fn calls(&self) -> u64 {
        self.calls.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl Transport for FixedTransport {
    async fn send(&self, _request: &ResolvedRequest) -> Result<u16, HttpError> {
        self.calls.fetch_add(1, Ordering::Relaxed);
        sleep(self.latency).await;
        Ok(self.status)
    }
}

fn test_config(users: u64, threads: usize, duration: Duration) -> RunConfig {
    RunConfig {
        users,
        threads,
        duration,
        delay: Duration::ZERO,
    }
}

fn parse_template(raw: &str) -> Result<curl::RequestTemplate, String> {
    curl::parse(raw).map_err(|err| format!("parse failed: {}", err))
}

#[test]
fn partition_spreads_remainder_to_first_workers() -> Result<(), String> {
    let shares = partition_users(103, 10);
    if shares.len() != 10 {
        return Err(format!("expected 10 shares, got {}", shares.len()));
    }
    let sum: u64 = shares.iter().sum();
    if sum != 103 {
        return Err(format!("shares sum to {}, expected 103", sum));
    }
    let min = shares.iter().min().copied().unwrap_or(0);
    let max = shares.iter().max().copied().unwrap_or(0);
    if max.saturating_sub(min) > 1 {
        return Err(format!("imbalance {} > 1 (min {}, max {})", max.saturating_sub(min), min, max));
    }
    Ok(())
}

#[test]
fn partition_is_exact_when_divisible() -> Result<(), String> {
    let shares = partition_users(10, 5);
    if shares.iter().any(|&share| share != 2) {
        return Err(format!("expected all shares = 2, got {:?}", shares));
    }
    Ok(())
}

#[test]
fn validate_rejects_threads_exceeding_users() -> Result<(), String> {
    let config = test_config(1, 2, Duration::from_secs(1));
    match config.validate() {
        Err(ConfigError::ThreadsExceedUsers { threads: 2, users: 1 }) => Ok(()),
        Err(other) => Err(format!("unexpected error: {}", other)),
        Ok(()) => Err("threads > users was accepted".to_owned()),
    }
}

#[test]
fn validate_rejects_zero_duration() -> Result<(), String> {
    let config = test_config(1, 1, Duration::ZERO);
    match config.validate() {
        Err(ConfigError::ValueTooSmall { .. }) => Ok(()),
        Err(other) => Err(format!("unexpected error: {}", other)),
        Ok(()) => Err("zero duration was accepted".to_owned()),
    }
}

#[test]
fn run_rejects_bad_config_before_any_request() -> Result<(), String> {
    run_async_test(async {
        let template = parse_template("curl http://localhost/ping")?;
        let transport = FixedTransport::new(Duration::from_millis(1), 200);
        let config = test_config(1, 2, Duration::from_secs(1));

        let outcome = run(config, template, Arc::clone(&transport) as Arc<dyn Transport>).await;
        match outcome {
            Err(AppError::Config(ConfigError::ThreadsExceedUsers { .. })) => {}
            Err(other) => return Err(format!("unexpected error: {}", other)),
            Ok(_) => return Err("invalid config produced a report".to_owned()),
        }
        if transport.calls() != 0 {
            return Err(format!(
                "{} request(s) sent despite invalid config",
                transport.calls()
            ));
        }
        Ok(())
    })
}

#[test]
fn fixed_transport_run_matches_expected_volume() -> Result<(), String> {
    run_async_test(async {
        let template = parse_template("curl http://localhost/ping")?;
        let transport = FixedTransport::new(Duration::from_millis(10), 200);
        let config = test_config(5, 5, Duration::from_secs(1));

        let started = std::time::Instant::now();
        let report = run(config, template, Arc::clone(&transport) as Arc<dyn Transport>)
            .await
            .map_err(|err| format!("run failed: {}", err))?;
        let wall = started.elapsed();

        // Five workers at ~11ms per cycle for one second, with generous
        // slack for scheduling noise.
        if report.total_requests < 100 || report.total_requests > 1000 {
            return Err(format!(
                "expected roughly 450 requests, got {}",
                report.total_requests
            ));
        }
        if (report.success_rate - 100.0).abs() > 1e-9 {
            return Err(format!("expected 100% success, got {}", report.success_rate));
        }
        let sum = report
            .successful_requests
            .saturating_add(report.failed_requests);
        if sum != report.total_requests {
            return Err("counter invariant violated".to_owned());
        }
        if report.p75_ms < 5.0 || report.p99_ms > 150.0 {
            return Err(format!(
                "latency percentiles out of range: p75 {} p99 {}",
                report.p75_ms, report.p99_ms
            ));
        }
        if report.min_latency_ms > report.p75_ms || report.p99_ms > report.max_latency_ms {
            return Err("percentiles escaped the min/max envelope".to_owned());
        }
        if wall > Duration::from_secs(5) {
            return Err(format!("run took {:?}, expected prompt stop", wall));
        }
        Ok(())
    })
}

#[test]
fn failures_surface_only_in_aggregate() -> Result<(), String> {
    run_async_test(async {
        let template = parse_template("curl http://localhost/ping")?;
        let transport = FixedTransport::new(Duration::from_millis(5), 503);
        let config = test_config(2, 2, Duration::from_secs(1));

        let report = run(config, template, Arc::clone(&transport) as Arc<dyn Transport>)
            .await
            .map_err(|err| format!("run failed: {}", err))?;

        if report.total_requests == 0 {
            return Err("expected some requests".to_owned());
        }
        if report.successful_requests != 0 {
            return Err(format!(
                "expected no successes, got {}",
                report.successful_requests
            ));
        }
        if report.success_rate.abs() > 1e-9 {
            return Err(format!("expected 0% success, got {}", report.success_rate));
        }
        Ok(())
    })
}

#[test]
fn configured_delay_throttles_request_volume() -> Result<(), String> {
    run_async_test(async {
        let template = parse_template("curl http://localhost/ping")?;
        let transport = FixedTransport::new(Duration::from_millis(1), 200);
        let config = RunConfig {
            users: 1,
            threads: 1,
            duration: Duration::from_secs(1),
            delay: Duration::from_millis(100),
        };

        let report = run(config, template, Arc::clone(&transport) as Arc<dyn Transport>)
            .await
            .map_err(|err| format!("run failed: {}", err))?;

        // One user pausing 100ms per cycle fits at most ~10 cycles in a
        // second; anything wildly above means the delay was ignored.
        if report.total_requests > 30 {
            return Err(format!(
                "expected throttled volume, got {}",
                report.total_requests
            ));
        }
        if report.total_requests == 0 {
            return Err("expected at least one request".to_owned());
        }
        Ok(())
    })
}
