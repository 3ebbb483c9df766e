use std::future::Future;
use std::time::Duration;

use parley_core::{ParleyError, Result};

/// Runs an external call, turning an elapsed deadline into `ParleyError::Timeout`.
pub(crate) async fn bounded<T>(limit: Duration, call: impl Future<Output = Result<T>>) -> Result<T> {
    match tokio::time::timeout(limit, call).await {
        Ok(result) => result,
        Err(_) => Err(ParleyError::Timeout {
            seconds: limit.as_secs(),
        }),
    }
}
