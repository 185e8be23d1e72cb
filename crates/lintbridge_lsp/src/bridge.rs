//! Code action request interception.

use std::sync::Arc;
use std::time::{Duration, Instant};

use crossbeam_channel::RecvTimeoutError;
use serde_json::Value;
use tokio::runtime::Handle;
use tower_lsp::jsonrpc;
use tracing::{debug, error, warn};

use lintbridge_core::{
    BridgeConfig, BridgeError, BufferSnapshot, ProcessError, TracingSink, WarningSink,
    lint_actions, merge_actions,
};

use crate::CODE_ACTION_METHOD;
use crate::handlers::{Handlers, RequestFn, RequestSyncFn, ResponseHandler};

/// Wraps a language server dispatcher and appends linter actions to its
/// code action responses.
///
/// Every request other than `textDocument/codeAction` is forwarded untouched.
#[derive(Clone)]
pub struct CodeActionBridge {
    config: Arc<BridgeConfig>,
    handlers: Handlers,
    runtime: Handle,
    sink: Arc<dyn WarningSink>,
}

impl CodeActionBridge {
    /// Creates a bridge whose linter runs are spawned on `runtime`.
    pub fn new(config: BridgeConfig, handlers: Handlers, runtime: Handle) -> Self {
        Self {
            config: Arc::new(config),
            handlers,
            runtime,
            sink: Arc::new(TracingSink),
        }
    }

    /// Sets where user-facing warnings go.
    pub fn with_sink(mut self, sink: Arc<dyn WarningSink>) -> Self {
        self.sink = sink;
        self
    }

    pub fn config(&self) -> &BridgeConfig {
        &self.config
    }

    /// Issues a request in callback mode.
    ///
    /// For code action requests the handler runs once, after the linter has
    /// finished, with the linter actions appended to the server's actions.
    /// A failing linter process is reported to the handler as an internal
    /// error.
    pub fn request_with_callback(
        &self,
        buffer: BufferSnapshot,
        method: &str,
        params: Value,
        handler: ResponseHandler,
    ) -> Result<(), BridgeError> {
        let request = self.request_fn()?;
        self.check_filetype(&buffer)?;

        if method != CODE_ACTION_METHOD {
            request(method, params, handler);
            return Ok(());
        }

        debug!("Intercepting code action request for {}", buffer.uri);

        let config = Arc::clone(&self.config);
        let sink = Arc::clone(&self.sink);
        let runtime = self.runtime.clone();

        let wrapped: ResponseHandler = Box::new(move |response: jsonrpc::Result<Value>| {
            let original = match response {
                Ok(value) => value,
                Err(e) => {
                    debug!("Code action request failed, skipping linter: {}", e);
                    handler(Err(e));
                    return;
                }
            };

            runtime.spawn(async move {
                let response = match lint_actions(&config, &buffer, sink.as_ref()).await {
                    Ok(actions) => Ok(merge_actions(original, actions)),
                    Err(e) => {
                        error!("Linter run failed: {}", e);
                        Err(internal_error(&e))
                    }
                };
                handler(response);
            });
        });

        request(method, params, wrapped);
        Ok(())
    }

    /// Issues a request and blocks until it completes or `timeout` elapses.
    ///
    /// For code action requests the server is asked first; the linter then
    /// runs on the runtime while this thread waits for whatever is left of
    /// `timeout`. If time runs out, the server's actions are returned alone
    /// and the linter process is left to finish on its own.
    ///
    /// Must not be called from a thread driving the bridge's runtime.
    pub fn request_blocking(
        &self,
        buffer: BufferSnapshot,
        method: &str,
        params: Value,
        timeout: Duration,
    ) -> Result<Value, BridgeError> {
        let request_sync = self.request_sync_fn()?;
        self.check_filetype(&buffer)?;

        if method != CODE_ACTION_METHOD {
            return Ok(request_sync(method, params, timeout)?);
        }

        // No deadline when `timeout` is too large to represent
        let deadline = Instant::now().checked_add(timeout);
        let original = request_sync(method, params, timeout)?;

        debug!("Intercepting blocking code action request for {}", buffer.uri);

        let (tx, rx) = crossbeam_channel::bounded(1);
        let config = Arc::clone(&self.config);
        let sink = Arc::clone(&self.sink);
        self.runtime.spawn(async move {
            let result = lint_actions(&config, &buffer, sink.as_ref()).await;
            // The receiver is gone once the caller timed out
            let _ = tx.send(result);
        });

        let received = match deadline {
            Some(deadline) => rx.recv_timeout(deadline.saturating_duration_since(Instant::now())),
            None => rx.recv().map_err(|_| RecvTimeoutError::Disconnected),
        };

        match received {
            Ok(Ok(actions)) => Ok(merge_actions(original, actions)),
            Ok(Err(e)) => Err(e.into()),
            Err(RecvTimeoutError::Timeout) => {
                warn!(
                    "Linter did not finish within {:?}, returning server actions only",
                    timeout
                );
                Ok(original)
            }
            Err(RecvTimeoutError::Disconnected) => {
                error!("Linter task ended without a result");
                Ok(original)
            }
        }
    }

    /// Former entry point for fixing the current buffer.
    #[deprecated(note = "linter fixes are offered as code actions")]
    pub fn fix_current(&self) {
        self.sink
            .warn("fix_current has been removed, see the documentation for code action setup");
    }

    /// Former entry point for installing the code action hook.
    #[deprecated(note = "use CodeActionBridge::request_with_callback")]
    pub fn setup_eslint_actions(&self) {
        self.sink.warn(
            "setup_eslint_actions has been removed, see the documentation for code action setup",
        );
    }

    fn request_fn(&self) -> Result<&RequestFn, BridgeError> {
        self.handlers
            .request
            .as_ref()
            .ok_or(BridgeError::MissingHandler("request"))
    }

    fn request_sync_fn(&self) -> Result<&RequestSyncFn, BridgeError> {
        self.handlers
            .request_sync
            .as_ref()
            .ok_or(BridgeError::MissingHandler("request_sync"))
    }

    fn check_filetype(&self, buffer: &BufferSnapshot) -> Result<(), BridgeError> {
        if self.config.supports_filetype(&buffer.filetype) {
            Ok(())
        } else {
            Err(BridgeError::unsupported_filetype(buffer.filetype.as_str()))
        }
    }
}

fn internal_error(e: &ProcessError) -> jsonrpc::Error {
    jsonrpc::Error {
        code: jsonrpc::ErrorCode::InternalError,
        message: format!("Linter process error: {}", e).into(),
        data: None,
    }
}
