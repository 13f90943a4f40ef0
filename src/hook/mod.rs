//! The dispatch engine: severity filtering, mode selection, and the per-entry
//! callback registered with the host logger.

mod builder;

pub use builder::HookBuilder;

use crate::config::{DeliveryMode, HookError};
use crate::domain::Entry;
use crate::filter::LevelFilter;
use crate::queue::BatchQueue;
use crate::scheduler::FlushScheduler;
use crate::sink::{Sink, SinkError, TelegramSink};
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

/// Failure of a synchronous send, surfaced to the log call site.
///
/// The async and queue paths never produce this; their delivery errors are
/// discarded after a diagnostic log line.
#[derive(Error, Debug)]
#[error("delivery failed: {0}")]
pub struct DeliveryError(#[from] SinkError);

/// Forwards qualifying log entries to the sink.
///
/// `call` is the integration point with the host logging framework: invoke it
/// once per emitted entry, from as many concurrent tasks as the host runs.
pub struct Hook<S: Sink = TelegramSink> {
    sink: Arc<S>,
    filter: LevelFilter,
    mode: DeliveryMode,
    interval: Duration,
    queue: Arc<BatchQueue>,
    scheduler: FlushScheduler,
}

impl Hook<TelegramSink> {
    pub fn builder(token: impl Into<String>, chat_ids: Vec<i64>) -> HookBuilder {
        HookBuilder::new(token, chat_ids)
    }
}

impl<S: Sink> Hook<S> {
    pub(crate) fn from_parts(
        sink: S,
        filter: LevelFilter,
        mode: DeliveryMode,
        interval: Duration,
    ) -> Self {
        Self {
            sink: Arc::new(sink),
            filter,
            mode,
            interval,
            queue: Arc::new(BatchQueue::new()),
            scheduler: FlushScheduler::new(),
        }
    }

    /// Dispatch one emitted entry.
    ///
    /// Non-qualifying severities return `Ok` with no side effect. Otherwise
    /// the entry is sent on this task (`Sync`, the only mode whose delivery
    /// error reaches the caller), handed to an unawaited send task (`Async`),
    /// or appended to the batch queue (`Queue`).
    pub async fn call(&self, entry: Entry) -> Result<(), DeliveryError> {
        if !self.filter.is_qualifying(entry.severity) {
            return Ok(());
        }

        match self.mode {
            DeliveryMode::Sync => {
                self.sink.send_one(&entry).await?;
                Ok(())
            }
            DeliveryMode::Async => {
                let sink = Arc::clone(&self.sink);
                tokio::spawn(async move {
                    if let Err(e) = sink.send_one(&entry).await {
                        debug!(error = %e, "async send failed, dropping entry");
                    }
                });
                Ok(())
            }
            DeliveryMode::Queue => {
                self.queue.push(entry);
                Ok(())
            }
        }
    }

    /// Start the periodic flush. Construction alone never starts it.
    ///
    /// Errors if the hook is not in queue mode or the scheduler is already
    /// running.
    pub fn start_queue(&self) -> Result<(), HookError> {
        if self.mode != DeliveryMode::Queue {
            return Err(HookError::QueueDisabled);
        }
        self.scheduler.start(
            Arc::clone(&self.sink),
            Arc::clone(&self.queue),
            self.interval,
        )
    }

    /// Stop the periodic flush after one final drain of the queue.
    /// Returns whether a scheduler was running.
    pub fn stop_queue(&self) -> bool {
        self.scheduler.stop()
    }

    pub fn mode(&self) -> DeliveryMode {
        self.mode
    }

    /// Entries currently waiting for the next flush.
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    pub fn flush_interval(&self) -> Duration {
        self.interval
    }
}

// The sink may hold credentials; keep it out of the debug output.
impl<S: Sink> fmt::Debug for Hook<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Hook")
            .field("filter", &self.filter)
            .field("mode", &self.mode)
            .field("interval", &self.interval)
            .field("pending", &self.queue.len())
            .finish()
    }
}
