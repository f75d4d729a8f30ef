use std::time::Duration;

use reqwest::Client;

use crate::error::HttpError;

/// End-to-end response timeout per request.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
/// Connection establishment timeout.
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
/// Idle pooled connections kept per host.
const POOL_MAX_IDLE_PER_HOST: usize = 50;

/// Builds the shared HTTP client used by every worker.
///
/// # Errors
///
/// Returns an error when the underlying client cannot be constructed.
pub(super) fn build_client() -> Result<Client, HttpError> {
    Client::builder()
        .timeout(REQUEST_TIMEOUT)
        .connect_timeout(CONNECT_TIMEOUT)
        .pool_max_idle_per_host(POOL_MAX_IDLE_PER_HOST)
        .build()
        .map_err(|err| HttpError::BuildClientFailed { source: err })
}
