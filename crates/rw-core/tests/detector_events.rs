//! Verifies the structured events emitted across the detector life cycle,
//! in particular that the implicit train-on-first-use path is observable.

use std::sync::{Arc, Mutex};

use tracing::field::{Field, Visit};
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::Layer;

use rw_core::{ClusterAnomalyDetector, IsolationAnomalyDetector};

/// Layer that records the `event` field of every emitted event.
#[derive(Clone, Default)]
struct EventCapture(Arc<Mutex<Vec<String>>>);

impl EventCapture {
    fn names(&self) -> Vec<String> {
        self.0.lock().unwrap().clone()
    }
}

impl<S: tracing::Subscriber> Layer<S> for EventCapture {
    fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
        struct EventName(Option<String>);
        impl Visit for EventName {
            fn record_str(&mut self, field: &Field, value: &str) {
                if field.name() == "event" {
                    self.0 = Some(value.to_string());
                }
            }
            fn record_debug(&mut self, _field: &Field, _value: &dyn std::fmt::Debug) {}
        }
        let mut visitor = EventName(None);
        event.record(&mut visitor);
        if let Some(name) = visitor.0 {
            self.0.lock().unwrap().push(name);
        }
    }
}

fn capture<F: FnOnce()>(f: F) -> Vec<String> {
    let layer = EventCapture::default();
    let subscriber = tracing_subscriber::registry().with(layer.clone());
    tracing::subscriber::with_default(subscriber, f);
    layer.names()
}

fn batch() -> Vec<f64> {
    let mut values: Vec<f64> = (0..40).map(|i| 10.0 + (i % 5) as f64 * 0.3).collect();
    values.push(200.0);
    values
}

#[test]
fn untrained_detect_emits_auto_train() {
    let tmp = tempfile::TempDir::new().unwrap();
    let events = capture(|| {
        let mut det = ClusterAnomalyDetector::new(tmp.path());
        det.detect(&batch());
    });

    assert_eq!(
        events.iter().filter(|e| *e == "detector.auto_train").count(),
        1
    );
    assert!(events.iter().any(|e| e == "detector.trained"));
    assert!(events.iter().any(|e| e == "model.saved"));
}

#[test]
fn trained_detect_does_not_auto_train() {
    let tmp = tempfile::TempDir::new().unwrap();
    let events = capture(|| {
        let mut det = ClusterAnomalyDetector::new(tmp.path());
        det.train(&batch());
        det.detect(&batch());
    });

    assert!(!events.iter().any(|e| e == "detector.auto_train"));
    assert!(events.iter().any(|e| e == "detector.trained"));
}

#[test]
fn isolation_life_cycle_events() {
    let tmp = tempfile::TempDir::new().unwrap();
    let events = capture(|| {
        let mut det = IsolationAnomalyDetector::new(tmp.path());
        det.detect(&batch());
        det.reset();
        det.detect(&batch());
    });

    // Both detect calls on an untrained detector auto-train.
    assert_eq!(
        events.iter().filter(|e| *e == "detector.auto_train").count(),
        2
    );
    assert!(events.iter().any(|e| e == "detector.reset"));
}

#[test]
fn reconstruction_emits_model_loaded() {
    let tmp = tempfile::TempDir::new().unwrap();
    {
        let mut det = IsolationAnomalyDetector::new(tmp.path());
        det.train(&batch());
    }
    let events = capture(|| {
        let det = IsolationAnomalyDetector::new(tmp.path());
        assert!(det.is_trained());
    });
    assert!(events.iter().any(|e| e == "model.loaded"));
}

#[test]
fn corrupt_blob_emits_load_failed() {
    let tmp = tempfile::TempDir::new().unwrap();
    std::fs::write(tmp.path().join("cluster_model.json"), "not json").unwrap();
    let events = capture(|| {
        let det = ClusterAnomalyDetector::new(tmp.path());
        assert!(!det.is_trained());
    });
    assert!(events.iter().any(|e| e == "model.load_failed"));
}
