// Mock Session - scripted stand-in for a browser page
//
// Each call to observe_response consumes the next scripted attempt. Responses
// are delivered from a spawned task after their delay, so a response that
// arrives after the waiter gave up is genuinely late rather than never sent.
//
// Also provides a tracing layer that captures the waiter's failure logs.

// Note: Items appear "unused" because each test binary compiles separately,
// but they ARE used across multiple test files. Suppress false-positive warnings.
#![allow(dead_code)]

use api_wait::{Error, HttpMethod, Response, ResponsePredicate, Session, SessionFuture};
use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, Layer};

/// What the page does during one observation attempt
#[derive(Debug, Clone)]
pub enum Attempt {
    /// No traffic at all
    Silent,
    /// Emits each response after its delay (measured from the start of the attempt)
    Emits(Vec<(Duration, Response)>),
    /// The driver's wait fails immediately
    Fails(String),
}

impl Attempt {
    pub fn responds_after(ms: u64, response: Response) -> Self {
        Attempt::Emits(vec![(Duration::from_millis(ms), response)])
    }
}

/// Scripted page
#[derive(Default)]
pub struct MockSession {
    script: Mutex<VecDeque<Attempt>>,
    probe: Option<Response>,
    reload_fails: bool,
    observe_calls: AtomicUsize,
    reload_calls: AtomicUsize,
    probe_calls: AtomicUsize,
    late_deliveries: Arc<AtomicUsize>,
}

impl MockSession {
    /// A page whose attempts play out as scripted, then stay silent
    pub fn scripted(attempts: impl IntoIterator<Item = Attempt>) -> Self {
        Self {
            script: Mutex::new(attempts.into_iter().collect()),
            ..Self::default()
        }
    }

    /// A page that never produces a matching response
    pub fn silent() -> Self {
        Self::default()
    }

    /// Answer diagnostic requests with `response` (default: they fail)
    pub fn with_probe(mut self, response: Response) -> Self {
        self.probe = Some(response);
        self
    }

    pub fn with_failing_reload(mut self) -> Self {
        self.reload_fails = true;
        self
    }

    pub fn observe_calls(&self) -> usize {
        self.observe_calls.load(Ordering::SeqCst)
    }

    pub fn reload_calls(&self) -> usize {
        self.reload_calls.load(Ordering::SeqCst)
    }

    pub fn probe_calls(&self) -> usize {
        self.probe_calls.load(Ordering::SeqCst)
    }

    /// Responses emitted after their attempt's wait was already dropped
    pub fn late_deliveries(&self) -> usize {
        self.late_deliveries.load(Ordering::SeqCst)
    }
}

impl Session for MockSession {
    fn observe_response(&self, predicate: ResponsePredicate) -> SessionFuture<'_, Response> {
        self.observe_calls.fetch_add(1, Ordering::SeqCst);
        let attempt = self
            .script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Attempt::Silent);

        match attempt {
            Attempt::Silent => Box::pin(std::future::pending()),
            Attempt::Fails(message) => Box::pin(async move { Err(Error::Driver(message)) }),
            Attempt::Emits(responses) => {
                let (tx, mut rx) = mpsc::unbounded_channel();
                let late = Arc::clone(&self.late_deliveries);
                tokio::spawn(async move {
                    let mut elapsed = Duration::ZERO;
                    for (at, response) in responses {
                        tokio::time::sleep(at.saturating_sub(elapsed)).await;
                        elapsed = at;
                        if tx.send(response).is_err() {
                            late.fetch_add(1, Ordering::SeqCst);
                        }
                    }
                });

                Box::pin(async move {
                    while let Some(response) = rx.recv().await {
                        if predicate(&response) {
                            return Ok(response);
                        }
                    }
                    std::future::pending().await
                })
            }
        }
    }

    fn reload(&self) -> SessionFuture<'_, ()> {
        self.reload_calls.fetch_add(1, Ordering::SeqCst);
        let fails = self.reload_fails;
        Box::pin(async move {
            if fails {
                Err(Error::TargetClosed {
                    target_type: "page".to_string(),
                    context: "reload".to_string(),
                })
            } else {
                Ok(())
            }
        })
    }

    fn direct_request<'a>(
        &'a self,
        url: &'a str,
        _method: HttpMethod,
    ) -> SessionFuture<'a, Response> {
        self.probe_calls.fetch_add(1, Ordering::SeqCst);
        Box::pin(async move {
            self.probe
                .clone()
                .ok_or_else(|| Error::Driver(format!("connection refused: {}", url)))
        })
    }
}

/// Fields of one captured WARN-level attempt failure log
pub type FailureLog = HashMap<String, String>;

/// Tracing layer collecting the waiter's attempt failure logs
#[derive(Clone, Default)]
pub struct CapturedLogs {
    failures: Arc<Mutex<Vec<FailureLog>>>,
}

impl CapturedLogs {
    /// Installs the capture as the thread's default subscriber
    pub fn install(&self) -> tracing::subscriber::DefaultGuard {
        use tracing_subscriber::prelude::*;
        tracing::subscriber::set_default(tracing_subscriber::registry().with(self.clone()))
    }

    pub fn failures(&self) -> Vec<FailureLog> {
        self.failures.lock().unwrap().clone()
    }

    /// Attempt numbers of the captured failure logs, in order
    pub fn failed_attempts(&self) -> Vec<u32> {
        self.failures()
            .iter()
            .filter_map(|log| log.get("attempt").and_then(|a| a.parse().ok()))
            .collect()
    }
}

impl<S: Subscriber> Layer<S> for CapturedLogs {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        if *event.metadata().level() != Level::WARN {
            return;
        }
        let mut fields = FieldCollector::default();
        event.record(&mut fields);
        if fields.0.contains_key("expected_status") {
            self.failures.lock().unwrap().push(fields.0);
        }
    }
}

#[derive(Default)]
struct FieldCollector(FailureLog);

impl Visit for FieldCollector {
    fn record_u64(&mut self, field: &Field, value: u64) {
        self.0.insert(field.name().to_string(), value.to_string());
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        self.0.insert(field.name().to_string(), value.to_string());
    }

    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        self.0
            .insert(field.name().to_string(), format!("{:?}", value));
    }
}

/// `GET 200` response for `https://app.test/api/locations`
pub fn locations_ok() -> Response {
    Response::new("https://app.test/api/locations", "GET", 200).with_status_text("OK")
}
