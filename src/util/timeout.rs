//! Per-request deadlines.

use std::future::Future;
use std::time::Duration;

use tracing::warn;

use crate::error::{Result, ToctocError};

/// Run `future`, failing with [`ToctocError::Timeout`] once `limit` elapses.
///
/// This is the only overall bound on a request; the shared HTTP client
/// carries a connect timeout and nothing else. `operation` names the call in
/// the log line emitted on expiry.
pub async fn bounded<T>(
    operation: &str,
    limit: Duration,
    future: impl Future<Output = Result<T>>,
) -> Result<T> {
    tokio::time::timeout(limit, future).await.unwrap_or_else(|_| {
        let timeout_ms = u64::try_from(limit.as_millis()).unwrap_or(u64::MAX);
        warn!(operation, timeout_ms, "request deadline elapsed");
        Err(ToctocError::Timeout(timeout_ms))
    })
}
