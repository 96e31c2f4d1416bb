//! Closure adaptors.
//!
//! Closures must return a boxed future borrowing the context, e.g.
//! `handler_fn(|ctx| async move { ... }.boxed())`.

use async_trait::async_trait;
use futures_util::future::BoxFuture;

use crate::handler::{Handler, Outcome, PartialHandler, Result};
use crate::http::RequestContext;

/// Handler backed by a closure.
#[derive(Clone)]
pub struct HandlerFn<F> {
    f: F,
}

/// Partial handler backed by a closure.
#[derive(Clone)]
pub struct PartialFn<F> {
    f: F,
}

/// Handler chosen per request from the context ("wrap").
#[derive(Clone)]
pub struct FromContext<F> {
    f: F,
}

pub fn handler_fn<F>(f: F) -> HandlerFn<F>
where
    F: for<'a> Fn(&'a mut RequestContext) -> BoxFuture<'a, Result<Outcome>> + Send + Sync,
{
    HandlerFn { f }
}

pub fn partial_fn<F>(f: F) -> PartialFn<F>
where
    F: for<'a> Fn(&'a dyn Handler, &'a mut RequestContext) -> BoxFuture<'a, Result<Outcome>>
        + Send
        + Sync,
{
    PartialFn { f }
}

/// Build the handler to run from the request itself, for example a
/// greeting that needs the authenticated principal.
pub fn from_context<F, H>(f: F) -> FromContext<F>
where
    F: Fn(&RequestContext) -> H + Send + Sync,
    H: Handler,
{
    FromContext { f }
}

#[async_trait]
impl<F> Handler for HandlerFn<F>
where
    F: for<'a> Fn(&'a mut RequestContext) -> BoxFuture<'a, Result<Outcome>> + Send + Sync,
{
    async fn call(&self, ctx: &mut RequestContext) -> Result<Outcome> {
        (self.f)(ctx).await
    }
}

#[async_trait]
impl<F> PartialHandler for PartialFn<F>
where
    F: for<'a> Fn(&'a dyn Handler, &'a mut RequestContext) -> BoxFuture<'a, Result<Outcome>>
        + Send
        + Sync,
{
    async fn apply(&self, next: &dyn Handler, ctx: &mut RequestContext) -> Result<Outcome> {
        (self.f)(next, ctx).await
    }
}

#[async_trait]
impl<F, H> Handler for FromContext<F>
where
    F: Fn(&RequestContext) -> H + Send + Sync,
    H: Handler,
{
    async fn call(&self, ctx: &mut RequestContext) -> Result<Outcome> {
        let handler = (self.f)(&*ctx);
        handler.call(ctx).await
    }
}
