use crate::sink::SinkError;
use std::time::Duration;
use thiserror::Error;

/// Default HTTP timeout for the Telegram client.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Default flush interval, in whole minutes, when queue mode is enabled.
pub const DEFAULT_INTERVAL_MINUTES: u64 = 1;

#[derive(Error, Debug)]
pub enum HookError {
    #[error("token not defined")]
    MissingToken,

    #[error("chat ids not defined")]
    MissingChatIds,

    #[error("flush interval must be at least one minute")]
    InvalidInterval,

    #[error("queue mode is not enabled")]
    QueueDisabled,

    #[error("flush scheduler is already running")]
    SchedulerRunning,

    #[error("sink error: {0}")]
    Sink(#[from] SinkError),
}

/// How a qualifying entry leaves the hook.
///
/// Modelled as an enum so the async and queue settings cannot conflict:
/// enabling the queue discards a prior `Sync`, and a later `disable_async`
/// cannot downgrade it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DeliveryMode {
    /// Send on the calling task and surface the delivery error to the caller.
    Sync,
    /// Spawn an unawaited send per entry; errors are discarded.
    #[default]
    Async,
    /// Buffer entries and flush them on the scheduler's fixed interval.
    Queue,
}
