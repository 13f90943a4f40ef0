#![deny(warnings, rust_2024_compatibility)]
// Specific pedantic lints enforced (not blanket allow):
#![deny(
    clippy::explicit_iter_loop,
    clippy::manual_let_else,
    clippy::semicolon_if_nothing_returned,
    clippy::inconsistent_struct_constructor
)]
// Noisy pedantic lints suppressed with justification:
#![allow(
    clippy::missing_errors_doc,      // Internal API
    clippy::must_use_candidate,      // Annotated selectively on critical APIs
    clippy::module_name_repetitions  // e.g. SinkError in sink module
)]

//! Forwards entries from a host structured logger to Telegram.
//!
//! Register [`Hook::call`] as the host framework's per-entry callback; the
//! hook filters on severity and delivers qualifying entries synchronously,
//! via unawaited per-entry tasks, or batched on a fixed timer.

pub mod config;
pub mod domain;
pub mod filter;
pub mod hook;
pub mod queue;
pub mod scheduler;
pub mod sink;

// Re-export main types for easy access
pub use config::{DeliveryMode, HookError};
pub use domain::{Entry, Severity};
pub use filter::LevelFilter;
pub use hook::{DeliveryError, Hook, HookBuilder};
pub use queue::BatchQueue;
pub use sink::{Formatter, Sink, SinkError, TelegramConfig, TelegramSink, default_formatter};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
