use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use vitals_simulator::config::EmitterConfig;
use vitals_simulator::emitter::Emitter;
use vitals_simulator::error::{Error, Result};
use vitals_simulator::transport::EventSink;
use vitals_simulator::vitals::VitalsRecord;

#[derive(Debug, Default)]
struct MockSink {
    sent: Mutex<Vec<String>>,
    close_calls: AtomicUsize,
    fail_sends: bool,
}

impl MockSink {
    fn new() -> MockSink {
        MockSink::default()
    }

    fn failing() -> MockSink {
        MockSink { fail_sends: true, ..MockSink::default() }
    }

    fn sent_count(&self) -> usize {
        self.sent.lock().unwrap().len()
    }
}

#[async_trait]
impl EventSink for MockSink {
    async fn send(&self, payload: &str) -> Result<()> {
        self.sent.lock().unwrap().push(payload.to_string());
        if self.fail_sends {
            return Err(Error::TransportError("mock send failure".to_string()));
        }
        Ok(())
    }

    async fn close(&self) -> Result<()> {
        self.close_calls.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

fn test_config(interval: Duration) -> EmitterConfig {
    EmitterConfig::from_values(Some("Endpoint=sb://ns.servicebus.windows.net/".to_string()), Some("patient-vitals".to_string()), interval).unwrap()
}

#[tokio::test]
async fn test_cancellation_during_sleep_closes_sink_once() {
    let sink = Arc::new(MockSink::new());
    let emitter = Emitter::new(test_config(Duration::from_secs(30)), sink.clone());

    let cancel = CancellationToken::new();
    let loop_cancel = cancel.clone();
    let handle = tokio::spawn(async move { emitter.run(loop_cancel).await });

    // Wait until the first record went out, then interrupt during the sleep
    while sink.sent_count() == 0 {
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    cancel.cancel();

    let result = handle.await.unwrap();
    assert!(result.is_ok(), "cancellation must not surface as an error: {:?}", result.err());
    assert_eq!(sink.close_calls.load(Ordering::SeqCst), 1);

    // No further records after shutdown
    let count_after_shutdown = sink.sent_count();
    assert_eq!(count_after_shutdown, 1);
    tokio::time::sleep(Duration::from_millis(50)).await;
    assert_eq!(sink.sent_count(), count_after_shutdown);
}

#[tokio::test]
async fn test_already_cancelled_token_sends_nothing() {
    let sink = Arc::new(MockSink::new());
    let emitter = Emitter::new(test_config(Duration::from_millis(10)), sink.clone());

    let cancel = CancellationToken::new();
    cancel.cancel();

    let result = emitter.run(cancel).await;

    assert!(result.is_ok());
    assert_eq!(sink.sent_count(), 0);
    assert_eq!(sink.close_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_send_error_stops_the_loop_and_still_closes() {
    let sink = Arc::new(MockSink::failing());
    let emitter = Emitter::new(test_config(Duration::from_millis(10)), sink.clone());

    let result = emitter.run(CancellationToken::new()).await;

    assert!(matches!(result, Err(Error::TransportError(_))), "Expected TransportError, got {:?}", result.err());
    assert_eq!(sink.sent_count(), 1, "a failed send must not be retried");
    assert_eq!(sink.close_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_emitted_payload_parses_as_vitals_record() {
    let sink = Arc::new(MockSink::new());
    let emitter = Emitter::new(test_config(Duration::from_secs(30)), sink.clone());

    let cancel = CancellationToken::new();
    let loop_cancel = cancel.clone();
    let handle = tokio::spawn(async move { emitter.run(loop_cancel).await });

    while sink.sent_count() == 0 {
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    cancel.cancel();
    handle.await.unwrap().unwrap();

    let payloads = sink.sent.lock().unwrap();
    let record: VitalsRecord = serde_json::from_str(&payloads[0]).unwrap();
    assert_eq!(record.patient_id, "patient_001");
    assert!((50..=120).contains(&record.heart_rate));
}
