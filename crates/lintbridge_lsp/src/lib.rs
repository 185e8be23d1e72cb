//! lintbridge LSP bridge
//!
//! Sits between an editor and its JavaScript/TypeScript language server and
//! appends ESLint fixes, suggestions and disable-comment actions to the
//! server's code action responses.
//!
//! ```rust,ignore
//! use lintbridge_lsp::{CodeActionBridge, Handlers};
//!
//! let handlers = Handlers::new()
//!     .with_request(move |method, params, handler| client.request(method, params, handler))
//!     .with_request_sync(move |method, params, timeout| client.request_sync(method, params, timeout));
//! let bridge = CodeActionBridge::new(config, handlers, runtime.handle().clone());
//!
//! let actions = bridge.request_blocking(buffer, CODE_ACTION_METHOD, params, timeout)?;
//! ```

mod bridge;
mod handlers;

use tower_lsp::lsp_types::request::{CodeActionRequest, Request};

pub use bridge::CodeActionBridge;
pub use handlers::{Handlers, RequestFn, RequestSyncFn, ResponseHandler};

/// The only method the bridge intercepts.
pub const CODE_ACTION_METHOD: &str = CodeActionRequest::METHOD;
