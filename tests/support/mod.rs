#![allow(dead_code)] // each test binary uses a subset of these helpers

use parking_lot::Mutex;
use std::sync::Arc;
use telelog::{Entry, Sink, SinkError};

/// Sink that records what it was asked to deliver.
///
/// Clones share the recorded state. With `fail_sends` set, every delivery
/// returns an HTTP 500 after recording the attempt, so tests can inspect
/// what a failed send would have carried.
#[derive(Clone, Default)]
pub struct RecordingSink {
    singles: Arc<Mutex<Vec<String>>>,
    batches: Arc<Mutex<Vec<String>>>,
    fail_sends: bool,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            fail_sends: true,
            ..Self::default()
        }
    }

    pub fn singles(&self) -> Vec<String> {
        self.singles.lock().clone()
    }

    pub fn batches(&self) -> Vec<String> {
        self.batches.lock().clone()
    }

    fn forced_failure(&self) -> Result<(), SinkError> {
        if self.fail_sends {
            return Err(SinkError::Http {
                status: 500,
                message: "forced failure".to_string(),
            });
        }
        Ok(())
    }
}

impl Sink for RecordingSink {
    fn format(&self, entry: &Entry) -> String {
        format!("{}: {}", entry.severity, entry.message)
    }

    async fn send_one(&self, entry: &Entry) -> Result<(), SinkError> {
        self.singles.lock().push(self.format(entry));
        self.forced_failure()
    }

    async fn send_batch(&self, text: &str) -> Result<(), SinkError> {
        self.batches.lock().push(text.to_string());
        self.forced_failure()
    }
}
