//! Delivery abstraction and the concrete Telegram implementation.

pub mod telegram;

pub use telegram::{TelegramConfig, TelegramSink};

use crate::domain::Entry;
use chrono::SecondsFormat;
use std::future::Future;
use std::sync::Arc;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SinkError {
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("HTTP error: {status} - {message}")]
    Http { status: u16, message: String },

    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
}

/// Entry-to-text conversion used for both single sends and batch joins.
pub type Formatter = Arc<dyn Fn(&Entry) -> String + Send + Sync>;

/// External delivery target for qualifying entries.
///
/// `send_one` carries an unformatted entry so the sink applies its own
/// formatter; `send_batch` receives text the scheduler already formatted and
/// joined, and must deliver it verbatim.
pub trait Sink: Send + Sync + 'static {
    /// Pure conversion of an entry to its human-readable message form.
    fn format(&self, entry: &Entry) -> String;

    fn send_one(&self, entry: &Entry) -> impl Future<Output = Result<(), SinkError>> + Send;

    fn send_batch(&self, text: &str) -> impl Future<Output = Result<(), SinkError>> + Send;
}

/// Built-in formatter: `LEVEL [timestamp] logger: message key=value ...`
pub fn default_formatter(entry: &Entry) -> String {
    let mut text = format!(
        "{} [{}]",
        entry.severity.as_str().to_uppercase(),
        entry.timestamp.to_rfc3339_opts(SecondsFormat::Secs, true)
    );
    if let Some(logger) = &entry.logger {
        text.push_str(&format!(" {logger}:"));
    }
    text.push(' ');
    text.push_str(&entry.message);

    let mut fields: Vec<_> = entry.fields.iter().collect();
    fields.sort();
    for (key, value) in fields {
        text.push_str(&format!(" {key}={value}"));
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Severity;
    use chrono::{TimeZone, Utc};

    #[test]
    fn default_formatter_shape() {
        let mut entry = Entry::new(Severity::Error, "connection lost")
            .with_logger("db")
            .with_field("attempt", "3");
        entry.timestamp = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap();

        assert_eq!(
            default_formatter(&entry),
            "ERROR [2024-01-01T12:00:00Z] db: connection lost attempt=3"
        );
    }

    #[test]
    fn default_formatter_without_logger_or_fields() {
        let mut entry = Entry::new(Severity::Warn, "disk almost full");
        entry.timestamp = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap();

        assert_eq!(
            default_formatter(&entry),
            "WARN [2024-01-01T12:00:00Z] disk almost full"
        );
    }
}
