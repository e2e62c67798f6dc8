//! Recording transport stub for unit tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::TransportError;
use crate::transport::{HttpRequest, HttpTransport};

type Responder = dyn Fn(usize, &HttpRequest) -> Result<Value, TransportError> + Send + Sync;

/// Answers every request through `responder` and remembers what it was sent.
///
/// The responder receives the zero-based call index so tests can script
/// sequences.
pub(crate) struct StubTransport {
    responder: Box<Responder>,
    requests: Mutex<Vec<HttpRequest>>,
    calls: AtomicUsize,
    delay: Option<Duration>,
}

impl StubTransport {
    pub(crate) fn new<F>(responder: F) -> Self
    where
        F: Fn(usize, &HttpRequest) -> Result<Value, TransportError> + Send + Sync + 'static,
    {
        Self {
            responder: Box::new(responder),
            requests: Mutex::new(Vec::new()),
            calls: AtomicUsize::new(0),
            delay: None,
        }
    }

    /// Always answers 2xx with `body`.
    pub(crate) fn json(body: Value) -> Arc<Self> {
        Arc::new(Self::new(move |_, _| Ok(body.clone())))
    }

    /// Always answers with a non-2xx `status` and raw `body`.
    pub(crate) fn status(status: u16, body: &str) -> Arc<Self> {
        let body = body.to_string();
        Arc::new(Self::new(move |_, req| {
            Err(TransportError::Status {
                status,
                url: req.url.to_string(),
                body: body.clone(),
            })
        }))
    }

    /// Sleeps before answering, so concurrent callers overlap.
    pub(crate) fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub(crate) fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub(crate) fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().expect("stub mutex poisoned").clone()
    }
}

#[async_trait]
impl HttpTransport for StubTransport {
    async fn execute(&self, request: HttpRequest) -> Result<Value, TransportError> {
        let index = self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests
            .lock()
            .expect("stub mutex poisoned")
            .push(request.clone());
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        (self.responder)(index, &request)
    }
}

/// A decode failure with no HTTP response, for "network-ish" error paths.
pub(crate) fn decode_error(url: &str) -> TransportError {
    let source = serde_json::from_str::<Value>("<html>oops</html>").unwrap_err();
    TransportError::Decode {
        url: url.to_string(),
        source,
    }
}
