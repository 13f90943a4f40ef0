use super::Hook;
use crate::config::{DEFAULT_INTERVAL_MINUTES, DEFAULT_TIMEOUT, DeliveryMode, HookError};
use crate::domain::{Entry, Severity};
use crate::filter::LevelFilter;
use crate::sink::telegram::DEFAULT_API_BASE;
use crate::sink::{Formatter, Sink, TelegramConfig, TelegramSink, default_formatter};
use std::sync::Arc;
use std::time::Duration;

/// Assembles a validated, immutable hook configuration.
///
/// Setters collect the configuration; `build` validates it in a fixed order
/// (token, then chat ids, then the flush interval), each failure with its own
/// `HookError` variant, and no partially-built hook escapes.
pub struct HookBuilder {
    token: String,
    chat_ids: Vec<i64>,
    filter: LevelFilter,
    mode: DeliveryMode,
    interval_minutes: u64,
    api_base: String,
    timeout: Duration,
    disable_notification: bool,
    formatter: Formatter,
}

impl HookBuilder {
    pub(crate) fn new(token: impl Into<String>, chat_ids: Vec<i64>) -> Self {
        Self {
            token: token.into(),
            chat_ids,
            filter: LevelFilter::default(),
            mode: DeliveryMode::default(),
            interval_minutes: DEFAULT_INTERVAL_MINUTES,
            api_base: DEFAULT_API_BASE.to_string(),
            timeout: DEFAULT_TIMEOUT,
            disable_notification: false,
            formatter: Arc::new(default_formatter),
        }
    }

    /// Qualify every severity at or above `level`.
    pub fn threshold(mut self, level: Severity) -> Self {
        self.filter = LevelFilter::threshold(level);
        self
    }

    /// Qualify exactly `level` and nothing else.
    pub fn exact_severity(mut self, level: Severity) -> Self {
        self.filter = LevelFilter::exact(level);
        self
    }

    /// Deliver messages silently (no client-side notification sound).
    pub fn disable_notification(mut self) -> Self {
        self.disable_notification = true;
        self
    }

    /// HTTP timeout for the sink's network calls.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Replace the built-in entry-to-text formatter.
    pub fn formatter(mut self, f: impl Fn(&Entry) -> String + Send + Sync + 'static) -> Self {
        self.formatter = Arc::new(f);
        self
    }

    /// Switch to queue mode with the given flush interval in whole minutes.
    /// Queue mode always wins over async, regardless of setter order.
    pub fn enable_queue(mut self, interval_minutes: u64) -> Self {
        self.mode = DeliveryMode::Queue;
        self.interval_minutes = interval_minutes;
        self
    }

    /// Force synchronous sends, unless queue mode is set.
    pub fn disable_async(mut self) -> Self {
        if self.mode == DeliveryMode::Async {
            self.mode = DeliveryMode::Sync;
        }
        self
    }

    /// Bot API base URL; for tests and self-hosted API servers.
    pub fn api_base(mut self, base: impl Into<String>) -> Self {
        self.api_base = base.into();
        self
    }

    fn validate(&self) -> Result<(), HookError> {
        if self.token.is_empty() {
            return Err(HookError::MissingToken);
        }
        if self.chat_ids.is_empty() {
            return Err(HookError::MissingChatIds);
        }
        if self.mode == DeliveryMode::Queue && self.interval_minutes == 0 {
            return Err(HookError::InvalidInterval);
        }
        Ok(())
    }

    /// Build a hook delivering through the Telegram Bot API.
    pub fn build(self) -> Result<Hook<TelegramSink>, HookError> {
        self.validate()?;
        let Self {
            token,
            chat_ids,
            filter,
            mode,
            interval_minutes,
            api_base,
            timeout,
            disable_notification,
            formatter,
        } = self;

        let sink = TelegramSink::new(
            TelegramConfig {
                token,
                chat_ids,
                api_base,
                timeout,
                disable_notification,
            },
            formatter,
        )?;

        Ok(Hook::from_parts(
            sink,
            filter,
            mode,
            Duration::from_secs(interval_minutes * 60),
        ))
    }

    /// Build a hook over a caller-provided sink. The Telegram-specific
    /// settings are unused; validation still applies so construction errors
    /// stay uniform across sinks.
    pub fn build_with_sink<S: Sink>(self, sink: S) -> Result<Hook<S>, HookError> {
        self.validate()?;
        Ok(Hook::from_parts(
            sink,
            self.filter,
            self.mode,
            Duration::from_secs(self.interval_minutes * 60),
        ))
    }
}
