//! Fixed-interval status polling.
//!
//! A poll loop runs as its own tokio task and is owned through a [`PollHandle`]. Ticks never
//! overlap: each request (bounded by [`PollConfig::request_timeout`]) finishes before the next
//! tick is awaited, and ticks missed while a slow request was running are delayed rather than
//! fired in a burst. Stopping or dropping the handle cancels the loop, including a request that
//! is still in flight.

use std::{future::Future, time::Duration};

use tokio::{task::JoinHandle, time::MissedTickBehavior};
use tokio_util::sync::CancellationToken;

use crate::foundation::error::{ReelError, ReelResult};

/// Refresh period for video/reel lists.
pub const VIDEO_LIST_INTERVAL: Duration = Duration::from_secs(5);
/// Refresh period for analytics views.
pub const ANALYTICS_INTERVAL: Duration = Duration::from_secs(10);

/// Timing of a poll loop.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PollConfig {
    /// Period between ticks. Zero is clamped to 1 ms.
    pub interval: Duration,
    /// Upper bound on a single fetch.
    pub request_timeout: Duration,
}

impl PollConfig {
    /// `interval`, with the request timeout defaulting to the same period.
    pub fn every(interval: Duration) -> Self {
        Self {
            interval,
            request_timeout: interval,
        }
    }

    /// Overrides the per-request timeout.
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }
}

impl Default for PollConfig {
    fn default() -> Self {
        Self::every(VIDEO_LIST_INTERVAL)
    }
}

/// Owner side of a running poll loop. Dropping it cancels the loop.
#[derive(Debug)]
pub struct PollHandle {
    cancel: CancellationToken,
    task: Option<JoinHandle<()>>,
}

impl PollHandle {
    /// Cancels the loop. A request in flight is abandoned and its result dropped.
    pub fn stop(&self) {
        self.cancel.cancel();
    }

    /// Whether [`Self::stop`] was called.
    pub fn is_stopped(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// Waits for the loop to end on its own or after [`Self::stop`].
    pub async fn join(mut self) -> ReelResult<()> {
        match self.task.take() {
            Some(task) => task
                .await
                .map_err(|e| ReelError::Other(anyhow::anyhow!("poll task failed: {e}"))),
            None => Ok(()),
        }
    }

    /// [`Self::stop`] then [`Self::join`].
    pub async fn shutdown(self) -> ReelResult<()> {
        self.stop();
        self.join().await
    }
}

impl Drop for PollHandle {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

/// Starts polling `fetch` every `config.interval`, handing each outcome to `on_tick`.
///
/// The first tick fires immediately. A request exceeding the timeout is reported to
/// `on_tick` as a transport error.
pub fn spawn_poll<T, F, Fut, H>(config: PollConfig, fetch: F, on_tick: H) -> PollHandle
where
    T: Send + 'static,
    F: FnMut() -> Fut + Send + 'static,
    Fut: Future<Output = ReelResult<T>> + Send + 'static,
    H: FnMut(ReelResult<T>) + Send + 'static,
{
    spawn_poll_with(CancellationToken::new(), config, fetch, on_tick)
}

/// [`spawn_poll`] under an existing cancellation token.
pub(crate) fn spawn_poll_with<T, F, Fut, H>(
    cancel: CancellationToken,
    config: PollConfig,
    mut fetch: F,
    mut on_tick: H,
) -> PollHandle
where
    T: Send + 'static,
    F: FnMut() -> Fut + Send + 'static,
    Fut: Future<Output = ReelResult<T>> + Send + 'static,
    H: FnMut(ReelResult<T>) + Send + 'static,
{
    let token = cancel.clone();

    let task = tokio::spawn(async move {
        tracing::info!(
            interval_ms = config.interval.as_millis() as u64,
            timeout_ms = config.request_timeout.as_millis() as u64,
            "poller started"
        );

        // tokio rejects a zero period.
        let mut ticker = tokio::time::interval(config.interval.max(Duration::from_millis(1)));
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                biased;
                _ = token.cancelled() => break,
                _ = ticker.tick() => {}
            }

            let outcome = tokio::select! {
                biased;
                _ = token.cancelled() => break,
                res = tokio::time::timeout(config.request_timeout, fetch()) => match res {
                    Ok(outcome) => outcome,
                    Err(_) => Err(ReelError::transport(format!(
                        "poll request timed out after {:?}",
                        config.request_timeout
                    ))),
                },
            };
            // A stop that lands while the request resolves drops its result.
            if token.is_cancelled() {
                break;
            }

            if let Err(err) = &outcome {
                tracing::debug!(error = %err, "poll tick failed");
            }
            on_tick(outcome);
        }

        tracing::info!("poller stopped");
    });

    PollHandle {
        cancel,
        task: Some(task),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/poll/poller.rs"]
mod tests;
