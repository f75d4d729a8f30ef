use std::sync::Arc;
use std::time::Duration;

use tokio::sync::broadcast::error::TryRecvError;
use tokio::time::{Instant, sleep};
use tracing::debug;

use crate::curl::{self, RequestTemplate};
use crate::http::Transport;
use crate::metrics::{MetricsAggregator, Sample};
use crate::shutdown::{ShutdownReceiver, ShutdownSender};

/// Floor pause when no inter-request delay is configured, so a
/// near-instant transport cannot spin a worker unboundedly.
const MIN_LOOP_DELAY: Duration = Duration::from_millis(1);

/// Everything one worker needs to drive its share of virtual users.
pub(super) struct WorkerContext {
    pub template: Arc<RequestTemplate>,
    pub transport: Arc<dyn Transport>,
    pub aggregator: Arc<MetricsAggregator>,
    pub delay: Duration,
}

/// Spawns one worker task driving `users` virtual users sequentially until
/// the stop signal is observed. The signal is checked before each batch and
/// between requests; a signal arriving during the inter-request sleep exits
/// immediately. An in-flight request is never aborted.
pub(super) fn spawn_worker(
    context: WorkerContext,
    users: u64,
    shutdown_tx: &ShutdownSender,
) -> tokio::task::JoinHandle<()> {
    let mut shutdown_rx = shutdown_tx.subscribe();

    tokio::spawn(async move {
        if users == 0 {
            return;
        }
        let pause = if context.delay.is_zero() {
            MIN_LOOP_DELAY
        } else {
            context.delay
        };

        'batch: loop {
            if stop_requested(&mut shutdown_rx) {
                break;
            }
            for _ in 0..users {
                if stop_requested(&mut shutdown_rx) {
                    break 'batch;
                }
                run_request_cycle(&context).await;
                tokio::select! {
                    _ = shutdown_rx.recv() => break 'batch,
                    () = sleep(pause) => {}
                }
            }
        }
    })
}

/// One virtual-user cycle: resolve, timed send, record. The sample is
/// recorded regardless of outcome.
async fn run_request_cycle(context: &WorkerContext) {
    let request = curl::resolve(&context.template);
    let start = Instant::now();
    let outcome = context.transport.send(&request).await;
    let latency_ms = start.elapsed().as_secs_f64() * 1000.0;

    let sample = match outcome {
        Ok(status) => Sample::from_status(latency_ms, status),
        Err(err) => {
            debug!("Request failed: {}", err);
            Sample::failure(latency_ms)
        }
    };
    context.aggregator.record(sample);
}

fn stop_requested(shutdown_rx: &mut ShutdownReceiver) -> bool {
    match shutdown_rx.try_recv() {
        Ok(()) => true,
        Err(TryRecvError::Empty) => false,
        Err(TryRecvError::Closed | TryRecvError::Lagged(_)) => true,
    }
}
