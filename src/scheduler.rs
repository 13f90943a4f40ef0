use crate::config::HookError;
use crate::domain::Entry;
use crate::queue::BatchQueue;
use crate::sink::Sink;
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

/// Periodic drain of the batch queue.
///
/// A single tokio task ticks at the configured interval; each tick takes the
/// pending entries, joins their formatted text, and fires an unawaited
/// `send_batch`. Skipped ticks are not replayed. The task is held on a
/// cancellation token so the owner gets an explicit stop, which performs one
/// final drain before the task exits.
#[derive(Debug, Default)]
pub struct FlushScheduler {
    cancel: Mutex<Option<CancellationToken>>,
}

impl FlushScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_running(&self) -> bool {
        self.cancel.lock().is_some()
    }

    pub fn start<S: Sink>(
        &self,
        sink: Arc<S>,
        queue: Arc<BatchQueue>,
        interval: Duration,
    ) -> Result<(), HookError> {
        let mut guard = self.cancel.lock();
        if guard.is_some() {
            return Err(HookError::SchedulerRunning);
        }

        let token = CancellationToken::new();
        *guard = Some(token.clone());
        debug!(interval_secs = interval.as_secs(), "starting flush scheduler");
        tokio::spawn(run_flush_loop(sink, queue, interval, token));
        Ok(())
    }

    /// Cancel the flush task. Returns whether a task was running.
    pub fn stop(&self) -> bool {
        match self.cancel.lock().take() {
            Some(token) => {
                token.cancel();
                true
            }
            None => false,
        }
    }
}

async fn run_flush_loop<S: Sink>(
    sink: Arc<S>,
    queue: Arc<BatchQueue>,
    interval: Duration,
    cancel: CancellationToken,
) {
    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
    // The first tick completes immediately; swallow it so the first drain
    // happens one full interval after start.
    ticker.tick().await;

    loop {
        tokio::select! {
            () = cancel.cancelled() => {
                flush(&sink, &queue);
                debug!("flush scheduler stopped");
                return;
            }
            _ = ticker.tick() => {
                flush(&sink, &queue);
            }
        }
    }
}

/// Take the pending entries and fire an unawaited batch send.
///
/// Entries are consumed at the moment of the take: anything appended once the
/// swap has happened belongs to the next cycle, and a failed send drops the
/// batch rather than re-enqueueing it.
fn flush<S: Sink>(sink: &Arc<S>, queue: &Arc<BatchQueue>) {
    let entries = queue.take_all();
    if entries.is_empty() {
        return;
    }

    let text = join_formatted(sink.as_ref(), &entries);
    let count = entries.len();
    let sink = Arc::clone(sink);
    tokio::spawn(async move {
        if let Err(e) = sink.send_batch(&text).await {
            warn!(error = %e, entries = count, "batch flush failed, dropping batch");
        }
    });
}

/// Formatted entries in insertion order, separated by one blank line.
fn join_formatted<S: Sink>(sink: &S, entries: &[Entry]) -> String {
    entries
        .iter()
        .map(|entry| sink.format(entry))
        .collect::<Vec<_>>()
        .join("\n\n")
}
