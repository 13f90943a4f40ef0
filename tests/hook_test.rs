mod support;

use std::time::Duration;
use support::RecordingSink;
use telelog::{DeliveryMode, Entry, Hook, HookError, Severity};

fn builder() -> telelog::HookBuilder {
    Hook::builder("123456:TEST", vec![1])
}

#[tokio::test]
async fn threshold_delivers_at_or_above() {
    let sink = RecordingSink::new();
    let hook = builder()
        .threshold(Severity::Warn)
        .disable_async()
        .build_with_sink(sink.clone())
        .unwrap();

    hook.call(Entry::new(Severity::Debug, "noise")).await.unwrap();
    hook.call(Entry::new(Severity::Warn, "watch out")).await.unwrap();
    hook.call(Entry::new(Severity::Error, "broken")).await.unwrap();

    assert_eq!(sink.singles(), vec!["warn: watch out", "error: broken"]);
}

#[tokio::test]
async fn exact_severity_suppresses_weaker_and_stronger() {
    let sink = RecordingSink::new();
    let hook = builder()
        .exact_severity(Severity::Error)
        .disable_async()
        .build_with_sink(sink.clone())
        .unwrap();

    hook.call(Entry::new(Severity::Warn, "below")).await.unwrap();
    hook.call(Entry::new(Severity::Error, "exact")).await.unwrap();
    hook.call(Entry::new(Severity::Fatal, "above")).await.unwrap();

    assert_eq!(sink.singles(), vec!["error: exact"]);
}

#[tokio::test]
async fn non_qualifying_entry_has_no_side_effect() {
    let sink = RecordingSink::failing();
    let hook = builder()
        .threshold(Severity::Error)
        .disable_async()
        .build_with_sink(sink.clone())
        .unwrap();

    // A failing sink would surface an error in sync mode; the filter must
    // short-circuit before the sink is touched.
    hook.call(Entry::new(Severity::Debug, "quiet")).await.unwrap();
    assert!(sink.singles().is_empty());
}

#[tokio::test]
async fn sync_mode_surfaces_delivery_failure() {
    let sink = RecordingSink::failing();
    let hook = builder()
        .threshold(Severity::Warn)
        .disable_async()
        .build_with_sink(sink)
        .unwrap();

    let result = hook.call(Entry::new(Severity::Warn, "boom")).await;
    assert!(result.is_err());
}

#[tokio::test]
async fn async_mode_returns_immediately_and_sends() {
    let sink = RecordingSink::new();
    // Async is the default mode.
    let hook = builder()
        .threshold(Severity::Warn)
        .build_with_sink(sink.clone())
        .unwrap();
    assert_eq!(hook.mode(), DeliveryMode::Async);

    hook.call(Entry::new(Severity::Warn, "later")).await.unwrap();

    for _ in 0..100 {
        if !sink.singles().is_empty() {
            break;
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    assert_eq!(sink.singles(), vec!["warn: later"]);
}

#[tokio::test]
async fn async_mode_discards_delivery_failure() {
    let sink = RecordingSink::failing();
    let hook = builder()
        .threshold(Severity::Warn)
        .build_with_sink(sink.clone())
        .unwrap();

    // The callback itself must not observe the spawned send's failure.
    hook.call(Entry::new(Severity::Warn, "lost")).await.unwrap();

    for _ in 0..100 {
        if !sink.singles().is_empty() {
            break;
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    assert_eq!(sink.singles().len(), 1);
}

#[tokio::test]
async fn queue_mode_defers_delivery() {
    let sink = RecordingSink::new();
    let hook = builder()
        .threshold(Severity::Warn)
        .enable_queue(1)
        .build_with_sink(sink.clone())
        .unwrap();

    hook.call(Entry::new(Severity::Warn, "first")).await.unwrap();
    hook.call(Entry::new(Severity::Error, "second")).await.unwrap();

    assert_eq!(hook.pending(), 2);
    assert!(sink.singles().is_empty());
    assert!(sink.batches().is_empty());
}

#[test]
fn empty_token_is_rejected() {
    let err = Hook::builder("", vec![1]).build().unwrap_err();
    assert!(matches!(err, HookError::MissingToken));
}

#[test]
fn empty_chat_ids_are_rejected() {
    let err = Hook::builder("123456:TEST", vec![]).build().unwrap_err();
    assert!(matches!(err, HookError::MissingChatIds));
}

#[test]
fn missing_token_is_reported_before_missing_chat_ids() {
    let err = Hook::builder("", vec![]).build().unwrap_err();
    assert!(matches!(err, HookError::MissingToken));
}

#[test]
fn zero_interval_is_rejected() {
    let err = builder().enable_queue(0).build().unwrap_err();
    assert!(matches!(err, HookError::InvalidInterval));
}

#[test]
fn enable_queue_forces_async_off_regardless_of_order() {
    let hook = builder().enable_queue(5).build().unwrap();
    assert_eq!(hook.mode(), DeliveryMode::Queue);
    assert_eq!(hook.flush_interval(), Duration::from_secs(300));

    let hook = builder().enable_queue(5).disable_async().build().unwrap();
    assert_eq!(hook.mode(), DeliveryMode::Queue);

    let hook = builder().disable_async().enable_queue(5).build().unwrap();
    assert_eq!(hook.mode(), DeliveryMode::Queue);
}

#[test]
fn disable_async_without_queue_selects_sync() {
    let hook = builder().disable_async().build().unwrap();
    assert_eq!(hook.mode(), DeliveryMode::Sync);
}

#[test]
fn default_configuration() {
    let hook = builder().build().unwrap();
    assert_eq!(hook.mode(), DeliveryMode::Async);
    assert_eq!(hook.flush_interval(), Duration::from_secs(60));
    assert_eq!(hook.pending(), 0);
}
