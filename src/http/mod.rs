//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, request ID, timeout, trace layers)
//!     → middleware.rs (buffer body, build RequestContext, evaluate tree)
//!         Handled     → context.rs response converted and sent
//!         NotHandled  → request re-assembled, passed to the 404 fallback
//!     → Send to client
//! ```
//!
//! Leaves in response.rs are the only handlers that write bodies.

pub mod context;
pub mod middleware;
pub mod response;
pub mod server;

pub use context::{OutgoingResponse, RequestContext};
pub use middleware::{handler_tree_middleware, TreeState};
pub use response::{
    json, serialize, status, text, ContentNegotiator, Encoded, Json, JsonNegotiator, Serialized,
    Status, Text, APPLICATION_JSON_UTF8, TEXT_PLAIN_UTF8,
};
pub use server::HttpServer;

/// Header carrying the per-request correlation ID.
pub const X_REQUEST_ID: &str = "x-request-id";
