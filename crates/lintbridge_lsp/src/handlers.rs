//! Functions the bridge dispatches requests through.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;
use tower_lsp::jsonrpc;

/// Receives the response to a request issued in callback mode.
pub type ResponseHandler = Box<dyn FnOnce(jsonrpc::Result<Value>) + Send + 'static>;

/// Sends a request and calls the handler once its response arrives.
pub type RequestFn = Arc<dyn Fn(&str, Value, ResponseHandler) + Send + Sync>;

/// Sends a request and blocks for its response, up to the timeout.
pub type RequestSyncFn = Arc<dyn Fn(&str, Value, Duration) -> jsonrpc::Result<Value> + Send + Sync>;

/// The wrapped dispatcher's two call shapes.
///
/// Both are optional so a host can wire only what it uses; calling an entry
/// point whose function is missing fails with a configuration error.
#[derive(Clone, Default)]
pub struct Handlers {
    pub request: Option<RequestFn>,
    pub request_sync: Option<RequestSyncFn>,
}

impl Handlers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the callback-style dispatcher.
    pub fn with_request<F>(mut self, request: F) -> Self
    where
        F: Fn(&str, Value, ResponseHandler) + Send + Sync + 'static,
    {
        self.request = Some(Arc::new(request));
        self
    }

    /// Sets the blocking dispatcher.
    pub fn with_request_sync<F>(mut self, request_sync: F) -> Self
    where
        F: Fn(&str, Value, Duration) -> jsonrpc::Result<Value> + Send + Sync + 'static,
    {
        self.request_sync = Some(Arc::new(request_sync));
        self
    }
}

impl fmt::Debug for Handlers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Handlers")
            .field("request", &self.request.as_ref().map(|_| "<fn>"))
            .field("request_sync", &self.request_sync.as_ref().map(|_| "<fn>"))
            .finish()
    }
}
