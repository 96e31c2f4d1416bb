//! Handler algebra.
//!
//! # Data Flow
//! ```text
//! RequestContext
//!     → root Handler (usually a Choose or a Sequence)
//!     → PartialHandler gates (method, path, auth) decide whether to call `next`
//!     → leaf Handler writes the response
//!     → Outcome::Handled | Outcome::NotHandled bubbles back up
//! ```
//!
//! # Design Decisions
//! - Two-valued `Outcome` is the only control-flow signal; faults travel as `Err`
//! - A gate that declines must not touch the response
//! - Handlers are stateless and shared across requests (`Send + Sync`)
//! - Composition is plain structs, resolved at build time, no dynamic route table

pub mod choose;
pub mod compose;
pub mod error;
pub mod func;

use std::sync::Arc;

use async_trait::async_trait;

use crate::http::RequestContext;

pub use choose::{choose, Choose};
pub use compose::{sequence, sequence_partial, Chain, Closed, PartialHandlerExt, Sequence};
pub use error::{HandlerError, Result};
pub use func::{from_context, handler_fn, partial_fn, FromContext, HandlerFn, PartialFn};

/// Result of running a handler against one request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The response is final for this request.
    Handled,
    /// Nothing was done; the caller should try something else.
    NotHandled,
}

impl Outcome {
    pub fn is_handled(self) -> bool {
        matches!(self, Outcome::Handled)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Outcome::Handled => "handled",
            Outcome::NotHandled => "not_handled",
        }
    }
}

impl From<bool> for Outcome {
    fn from(handled: bool) -> Self {
        if handled {
            Outcome::Handled
        } else {
            Outcome::NotHandled
        }
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A terminal unit of request processing.
#[async_trait]
pub trait Handler: Send + Sync {
    async fn call(&self, ctx: &mut RequestContext) -> Result<Outcome>;
}

/// A handler that decides whether the rest of the pipeline runs.
///
/// `next` is only resolved when the partial handler is closed over a
/// concrete [`Handler`], see [`sequence`].
#[async_trait]
pub trait PartialHandler: Send + Sync {
    async fn apply(&self, next: &dyn Handler, ctx: &mut RequestContext) -> Result<Outcome>;
}

/// Owned, type-erased handler, the element type of [`Choose`].
pub type BoxHandler = Box<dyn Handler>;

/// Handler tree shared between concurrent requests.
pub type SharedHandler = Arc<dyn Handler>;

#[async_trait]
impl<H: Handler + ?Sized> Handler for Box<H> {
    async fn call(&self, ctx: &mut RequestContext) -> Result<Outcome> {
        (**self).call(ctx).await
    }
}

#[async_trait]
impl<H: Handler + ?Sized> Handler for Arc<H> {
    async fn call(&self, ctx: &mut RequestContext) -> Result<Outcome> {
        (**self).call(ctx).await
    }
}

#[async_trait]
impl<P: PartialHandler + ?Sized> PartialHandler for Box<P> {
    async fn apply(&self, next: &dyn Handler, ctx: &mut RequestContext) -> Result<Outcome> {
        (**self).apply(next, ctx).await
    }
}

#[async_trait]
impl<P: PartialHandler + ?Sized> PartialHandler for Arc<P> {
    async fn apply(&self, next: &dyn Handler, ctx: &mut RequestContext) -> Result<Outcome> {
        (**self).apply(next, ctx).await
    }
}

/// Conversions into the erased handler types.
pub trait HandlerExt: Handler + Sized + 'static {
    fn boxed(self) -> BoxHandler {
        Box::new(self)
    }

    fn shared(self) -> SharedHandler {
        Arc::new(self)
    }
}

impl<H: Handler + 'static> HandlerExt for H {}

/// Host entry point: run `root` once for the request held by `ctx`.
///
/// On `NotHandled` the host is expected to fall back to its own pipeline.
pub async fn evaluate<H>(root: &H, ctx: &mut RequestContext) -> Result<Outcome>
where
    H: Handler + ?Sized,
{
    let outcome = root.call(ctx).await?;
    tracing::debug!(
        method = %ctx.method(),
        path = %ctx.path(),
        outcome = %outcome,
        "Handler tree evaluated"
    );
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::text;
    use axum::http::Method;

    struct Decline;

    #[async_trait]
    impl Handler for Decline {
        async fn call(&self, _ctx: &mut RequestContext) -> Result<Outcome> {
            Ok(Outcome::NotHandled)
        }
    }

    #[test]
    fn test_outcome_from_bool() {
        assert_eq!(Outcome::from(true), Outcome::Handled);
        assert_eq!(Outcome::from(false), Outcome::NotHandled);
        assert!(Outcome::Handled.is_handled());
        assert!(!Outcome::NotHandled.is_handled());
    }

    #[tokio::test]
    async fn test_evaluate_reports_outcome() {
        let mut ctx = RequestContext::new(Method::GET, "/");
        assert_eq!(evaluate(&text("hi"), &mut ctx).await.unwrap(), Outcome::Handled);
        assert_eq!(ctx.response().body(), b"hi".as_slice());

        let mut ctx = RequestContext::new(Method::GET, "/");
        assert_eq!(evaluate(&Decline, &mut ctx).await.unwrap(), Outcome::NotHandled);
    }

    #[tokio::test]
    async fn test_erased_handlers_delegate() {
        let boxed: BoxHandler = text("boxed").boxed();
        let shared: SharedHandler = text("shared").shared();

        let mut ctx = RequestContext::new(Method::GET, "/");
        boxed.call(&mut ctx).await.unwrap();
        assert_eq!(ctx.response().body(), b"boxed".as_slice());

        let mut ctx = RequestContext::new(Method::GET, "/");
        evaluate(shared.as_ref(), &mut ctx).await.unwrap();
        assert_eq!(ctx.response().body(), b"shared".as_slice());
    }
}
