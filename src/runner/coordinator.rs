use std::sync::Arc;
use std::time::Duration;

use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior, interval_at, sleep, timeout};
use tracing::{debug, info, warn};

use crate::curl::RequestTemplate;
use crate::error::AppResult;
use crate::http::Transport;
use crate::metrics::{MetricsAggregator, MetricsReport};
use crate::shutdown::ShutdownSender;

use super::config::RunConfig;
use super::partition::partition_users;
use super::worker::{WorkerContext, spawn_worker};

/// Cadence of the interim "Requests sent" progress line.
const INTERIM_REPORT_INTERVAL: Duration = Duration::from_secs(5);
/// Slice length for the bounded drain wait, so progress stays observable.
const DRAIN_POLL_INTERVAL: Duration = Duration::from_secs(1);
/// One stop signal per run.
const SHUTDOWN_CHANNEL_CAPACITY: usize = 1;

/// Coordinator lifecycle. `Running -> Stopping` is triggered only by the
/// duration deadline, `Stopping -> Completed` only once every worker has
/// exited; there is no transition back to `Running`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunPhase {
    Idle,
    Running,
    Stopping,
    Completed,
}

/// Runs the load test to completion and returns the final report.
///
/// Starts the worker pool, an interim progress ticker, and a one-shot
/// deadline timer; on deadline it signals stop, waits for every worker to
/// finish its in-flight request and exit, snapshots the aggregator, and
/// closes the transport last.
///
/// # Errors
///
/// Returns an error only for invalid configuration, before any worker
/// starts. Request-level failures are absorbed into the report.
pub async fn run(
    config: RunConfig,
    template: RequestTemplate,
    transport: Arc<dyn Transport>,
) -> AppResult<MetricsReport> {
    let mut phase = RunPhase::Idle;
    debug!("Run phase: {:?}", phase);
    config.validate()?;

    info!("Parsed request details:");
    info!("  URL: {}", template.url);
    info!("  Method: {}", template.method);
    info!("  Headers: {} header(s)", template.headers.len());
    info!("  Has Body: {}", template.has_body());

    let template = Arc::new(template);
    let aggregator = Arc::new(MetricsAggregator::new());
    let (shutdown_tx, mut shutdown_rx) =
        broadcast::channel::<()>(SHUTDOWN_CHANNEL_CAPACITY);

    let run_start = Instant::now();

    // Workers and the interim reporter subscribe before the deadline task
    // exists, so the stop signal can never fire ahead of a subscription.
    let shares = partition_users(config.users, config.threads);
    let mut worker_handles = Vec::with_capacity(shares.len());
    for share in shares {
        let context = WorkerContext {
            template: Arc::clone(&template),
            transport: Arc::clone(&transport),
            aggregator: Arc::clone(&aggregator),
            delay: config.delay,
        };
        worker_handles.push(spawn_worker(context, share, &shutdown_tx));
    }
    let interim_handle = spawn_interim_reporter(&aggregator, &shutdown_tx);
    let deadline_handle = spawn_deadline_timer(config.duration, &shutdown_tx);
    phase = RunPhase::Running;
    debug!("Run phase: {:?} ({} workers)", phase, worker_handles.len());

    if shutdown_rx.recv().await.is_err() {
        // Deadline sender dropped early; treat as stop.
    }
    phase = RunPhase::Stopping;
    debug!("Run phase: {:?}", phase);

    drain_workers(worker_handles).await;
    phase = RunPhase::Completed;
    debug!("Run phase: {:?}", phase);

    if deadline_handle.await.is_err() {
        warn!("Deadline timer task ended abnormally.");
    }
    if interim_handle.await.is_err() {
        warn!("Interim reporter task ended abnormally.");
    }

    let report = aggregator.snapshot(run_start.elapsed());
    drop(transport);

    Ok(report)
}

fn spawn_deadline_timer(duration: Duration, shutdown_tx: &ShutdownSender) -> JoinHandle<()> {
    let shutdown_tx = shutdown_tx.clone();
    tokio::spawn(async move {
        sleep(duration).await;
        info!("Test duration reached. Stopping...");
        if shutdown_tx.send(()).is_err() {
            // Every receiver is already gone; nothing left to stop.
        }
    })
}

fn spawn_interim_reporter(
    aggregator: &Arc<MetricsAggregator>,
    shutdown_tx: &ShutdownSender,
) -> JoinHandle<()> {
    let aggregator = Arc::clone(aggregator);
    let mut shutdown_rx = shutdown_tx.subscribe();
    tokio::spawn(async move {
        let first_tick = Instant::now()
            .checked_add(INTERIM_REPORT_INTERVAL)
            .unwrap_or_else(Instant::now);
        let mut ticker = interval_at(first_tick, INTERIM_REPORT_INTERVAL);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        loop {
            tokio::select! {
                _ = shutdown_rx.recv() => break,
                _ = ticker.tick() => {
                    info!("Requests sent: {}", aggregator.total_requests());
                }
            }
        }
    })
}

/// Waits for every worker to exit, in bounded one-second slices so the
/// drain never blocks silently.
async fn drain_workers(handles: Vec<JoinHandle<()>>) {
    let mut remaining = handles.len();
    for mut handle in handles {
        loop {
            let joined = timeout(DRAIN_POLL_INTERVAL, &mut handle).await;
            if let Ok(join_result) = joined {
                if join_result.is_err() {
                    warn!("Worker task ended abnormally.");
                }
                break;
            }
            info!("Waiting for {} worker(s) to finish...", remaining);
        }
        remaining = remaining.saturating_sub(1);
    }
}
