//! Structured fields on `scrim.modal` events.

use scrim_core::clock::ManualClock;
use scrim_widgets::modal::{ClassListSurface, CloseCallback, ModalOverlayState};
use std::sync::{Arc, Mutex};
use tracing::Subscriber;
use tracing_subscriber::Layer;
use tracing_subscriber::layer::{Context, SubscriberExt};
use web_time::Duration;

#[derive(Debug, Default, Clone)]
struct Captured {
    target: String,
    message: String,
    fields: Vec<(String, String)>,
}

struct ModalEventCapture {
    events: Arc<Mutex<Vec<Captured>>>,
}

impl<S> Layer<S> for ModalEventCapture
where
    S: Subscriber + for<'lookup> tracing_subscriber::registry::LookupSpan<'lookup>,
{
    fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
        let target = event.metadata().target();
        if !target.starts_with("scrim.") {
            return;
        }

        struct Visitor<'a>(&'a mut Captured);

        impl tracing::field::Visit for Visitor<'_> {
            fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
                let rendered = format!("{value:?}");
                if field.name() == "message" {
                    self.0.message = rendered;
                } else {
                    self.0.fields.push((field.name().to_owned(), rendered));
                }
            }
        }

        let mut captured = Captured {
            target: target.to_owned(),
            ..Captured::default()
        };
        event.record(&mut Visitor(&mut captured));
        self.events.lock().expect("capture lock").push(captured);
    }
}

fn capture<R>(f: impl FnOnce() -> R) -> (R, Vec<Captured>) {
    let events = Arc::new(Mutex::new(Vec::new()));
    let subscriber = tracing_subscriber::registry().with(ModalEventCapture {
        events: Arc::clone(&events),
    });
    let out = {
        let _guard = tracing::subscriber::set_default(subscriber);
        tracing::callsite::rebuild_interest_cache();
        f()
    };
    let events = events.lock().expect("capture lock").clone();
    (out, events)
}

fn field<'a>(event: &'a Captured, name: &str) -> Option<&'a str> {
    event
        .fields
        .iter()
        .find(|(k, _)| k == name)
        .map(|(_, v)| v.as_str())
}

#[test]
fn presentation_events_carry_transition_and_interactivity() {
    let (_, events) = capture(|| {
        let clock = ManualClock::new();
        let mut state = ModalOverlayState::with_clock(clock.clone());
        state.mount(ClassListSurface::new());
        state.observe_open(true);
        clock.advance(Duration::from_millis(100));
        state.tick();
    });

    let applied: Vec<_> = events
        .iter()
        .filter(|e| e.target == "scrim.modal" && e.message == "presentation applied")
        .collect();
    assert_eq!(applied.len(), 2, "events: {events:#?}");
    assert_eq!(field(applied[0], "transition"), Some("Hidden"));
    assert_eq!(field(applied[0], "interactive"), Some("false"));
    assert_eq!(field(applied[1], "transition"), Some("Visible"));
    assert_eq!(field(applied[1], "interactive"), Some("true"));

    assert!(
        events
            .iter()
            .any(|e| e.target == "scrim.timer" && e.message == "timer scheduled")
    );
}

#[test]
fn unmount_reports_what_was_cancelled() {
    let (_, events) = capture(|| {
        let mut state = ModalOverlayState::with_clock(ManualClock::new());
        state.mount(ClassListSurface::new());
        state.observe_open(true);
        state.request_close(CloseCallback::noop());
        state.unmount();
    });

    let unmounted = events
        .iter()
        .find(|e| e.message == "surface unmounted")
        .expect("unmount event");
    assert_eq!(field(unmounted, "settle_cancelled"), Some("false"));
    assert_eq!(field(unmounted, "close_dropped"), Some("true"));
}
