//! Trellis: composable request handling trees.
//!
//! A tree is built from two kinds of nodes. A [`Handler`] answers a request
//! or declines it ([`Outcome::NotHandled`]). A [`PartialHandler`] runs
//! before a continuation and decides whether, and how, to invoke it. Trees
//! are assembled with `then`/`and`, alternated with [`choose`], and run by
//! the host once per request through [`evaluate`].
//!
//! ```text
//! get()
//!   .then(choose([
//!       route("/").then(text("Hello World!")).boxed(),
//!       sub_route("/api", choose([...])).boxed(),
//!       route("/protected").and(basic_auth(check)).then(greeting).boxed(),
//!   ]))
//! ```

pub mod config;
pub mod demo;
pub mod handler;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod routing;
pub mod security;

pub use config::AppConfig;
pub use handler::{
    choose, evaluate, from_context, sequence, sequence_partial, Handler, HandlerError, HandlerExt,
    Outcome, PartialHandler, PartialHandlerExt,
};
pub use http::{HttpServer, RequestContext};
pub use lifecycle::Shutdown;

/// Everything needed to write a handler tree.
pub mod prelude {
    pub use crate::handler::{
        choose, evaluate, from_context, handler_fn, partial_fn, sequence, sequence_partial,
        BoxHandler, Handler, HandlerError, HandlerExt, Outcome, PartialHandler,
        PartialHandlerExt, SharedHandler,
    };
    pub use crate::http::{json, serialize, status, text, RequestContext};
    pub use crate::routing::{
        delete, get, handler_with_rooted_path, head, method, options, patch, post, put, route,
        route_starts_with, sub_route,
    };
    pub use crate::security::{basic_auth, basic_auth_with, Credentials, Principal, StaticUsers};
}
