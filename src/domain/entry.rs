use super::severity::Severity;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One emitted log record as handed to the hook by the host logger.
///
/// Immutable once built; the dispatcher only ever reads it or moves it into
/// the batch queue.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Entry {
    pub severity: Severity,
    pub timestamp: DateTime<Utc>,
    pub logger: Option<String>,
    pub message: String,
    #[serde(default)]
    pub fields: HashMap<String, String>,
}

impl Entry {
    /// Entry stamped with the current time and no structured fields.
    pub fn new(severity: Severity, message: impl Into<String>) -> Self {
        Self {
            severity,
            timestamp: Utc::now(),
            logger: None,
            message: message.into(),
            fields: HashMap::new(),
        }
    }

    pub fn with_logger(mut self, logger: impl Into<String>) -> Self {
        self.logger = Some(logger.into());
        self
    }

    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }
}
